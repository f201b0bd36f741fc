// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! # Organization
//!
//! * `pipeline` - pipeline construction and node execution events
//! * `transport` - transport connection and message events
//! * `jobs` - orchestrator and worker lifecycle events
//!
//! # Usage Pattern
//!
//! ```rust
//! use the_conduit::observability::messages::pipeline::PipelineConstructed;
//! use the_conduit::observability::messages::StructuredLog;
//!
//! let msg = PipelineConstructed { node_count: 6 };
//! msg.log();
//! let _span = msg.span("build").entered();
//! ```

pub mod jobs;
pub mod pipeline;
pub mod transport;

use tracing::Span;

/// A message that knows how to emit itself as a structured `tracing` event.
pub trait StructuredLog {
    /// Emit the event at the message's level.
    fn log(&self);

    /// A span carrying the message's fields.
    fn span(&self, name: &str) -> Span;
}
