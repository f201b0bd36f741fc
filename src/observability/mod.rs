// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! Message types follow a struct-based pattern with a `Display` implementation
//! for the human-readable line and a [`StructuredLog`](messages::StructuredLog)
//! implementation that emits the same event with typed fields. Call sites never
//! format ad-hoc log strings.
//!
//! # Architecture
//!
//! Messages are organized by subsystem:
//! * `messages::pipeline` - pipeline construction and per-node execution
//! * `messages::transport` - connection lifecycle and message flow
//! * `messages::jobs` - orchestrator and worker events
//!
//! Library code only emits events. The subscriber is installed once by the
//! binary through [`init_tracing`].
//!
//! # Usage
//!
//! ```rust
//! use the_conduit::observability::messages::jobs::JobEnqueued;
//! use the_conduit::observability::messages::StructuredLog;
//!
//! JobEnqueued { job_id: "0b7c", pending: 1 }.log();
//! ```

pub mod messages;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,the_conduit=info";

/// Install the global `tracing` subscriber. Honors `RUST_LOG`.
///
/// Calling this twice is harmless; the second install is ignored.
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)))
        .with(fmt::layer().with_target(false))
        .try_init();
}
