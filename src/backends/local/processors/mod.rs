// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod context_ops;
pub mod float_ops;
pub mod probes;
pub mod sinks;
pub mod sources;
pub mod text_ops;

pub use context_ops::*;
pub use float_ops::*;
pub use probes::*;
pub use sinks::*;
pub use sources::*;
pub use text_ops::*;

use crate::data::TypedData;
use crate::errors::ProcessorError;

/// Float value of `data`, or a processor failure naming the actual type.
pub(crate) fn float_input(processor: &str, data: &TypedData) -> Result<f64, ProcessorError> {
    data.as_float().ok_or_else(|| {
        ProcessorError::Failed(format!(
            "{} expects Float data, got {}",
            processor,
            data.data_type()
        ))
    })
}
