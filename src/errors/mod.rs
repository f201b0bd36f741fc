// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod config;
mod data;
mod jobs;
mod pipeline;
mod processor;
mod transport;

pub use config::{ConfigError, ReferenceError};
pub use data::{ContextError, ValidationError};
pub use jobs::JobError;
pub use pipeline::{PipelineError, PipelineTopologyError};
pub use processor::ProcessorError;
pub use transport::{TransportError, TransportResult};
