// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

use super::{ContextError, ValidationError};

/// Failures reported by an individual processor while it runs.
///
/// The pipeline wraps these in [`PipelineError::Processor`](super::PipelineError::Processor)
/// together with the node index and processor name.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProcessorError {
    #[error("parameter '{name}' was not resolved")]
    MissingParameter { name: String },

    #[error("parameter '{name}' must be {expected}, got {actual}")]
    InvalidParameter {
        name: String,
        expected: &'static str,
        actual: String,
    },

    #[error("processor '{processor}' touched undeclared context key '{key}'")]
    UndeclaredContextKey { processor: String, key: String },

    #[error(transparent)]
    Context(#[from] ContextError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Failed(String),
}
