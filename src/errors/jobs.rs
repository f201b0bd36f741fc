// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::time::Duration;

use thiserror::Error;

use super::{PipelineError, TransportError};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum JobError {
    /// A result handle has exactly one writer; the second write is rejected.
    #[error("result handle was already resolved")]
    AlreadyResolved,

    /// The caller stopped waiting. The job keeps running and the handle stays resolvable.
    #[error("no result within {0:?}")]
    Timeout(Duration),

    #[error("result handle was dropped before it was resolved")]
    Abandoned,

    #[error("job queue is full ({capacity} jobs)")]
    QueueFull { capacity: usize },

    #[error("job queue is closed")]
    QueueClosed,

    #[error("malformed job descriptor: {0}")]
    InvalidDescriptor(String),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}
