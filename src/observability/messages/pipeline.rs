// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for pipeline construction and execution events.
//!
//! This module contains message types for logging events related to:
//! * Pipeline construction (after the topology checks pass)
//! * Pipeline run lifecycle (start, completion)
//! * Per-node execution and failure

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use std::time::Duration;
use tracing::Span;

/// A pipeline passed its construction checks.
///
/// # Log Level
/// `debug!` - Workers build one pipeline per job
///
/// # Example
/// ```
/// use the_conduit::observability::messages::pipeline::PipelineConstructed;
///
/// let msg = PipelineConstructed { node_count: 6 };
/// assert_eq!(msg.to_string(), "Constructed pipeline with 6 nodes");
/// ```
pub struct PipelineConstructed {
    pub node_count: usize,
}

impl Display for PipelineConstructed {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Constructed pipeline with {} nodes", self.node_count)
    }
}

impl StructuredLog for PipelineConstructed {
    fn log(&self) {
        tracing::debug!(node_count = self.node_count, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "pipeline_constructed",
            span_name = name,
            node_count = self.node_count,
        )
    }
}

/// A pipeline run started. Its span wraps every node of the run.
///
/// # Log Level
/// `debug!`
pub struct PipelineRunStarted<'a> {
    pub node_count: usize,
    pub input_type: &'a str,
}

impl Display for PipelineRunStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Running pipeline of {} nodes on {} input",
            self.node_count, self.input_type
        )
    }
}

impl StructuredLog for PipelineRunStarted<'_> {
    fn log(&self) {
        tracing::debug!(
            node_count = self.node_count,
            input_type = self.input_type,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "pipeline_run",
            span_name = name,
            node_count = self.node_count,
            input_type = self.input_type,
        )
    }
}

/// # Log Level
/// `debug!`
pub struct PipelineRunCompleted {
    pub node_count: usize,
    pub duration: Duration,
}

impl Display for PipelineRunCompleted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Pipeline of {} nodes completed in {:?}",
            self.node_count, self.duration
        )
    }
}

impl StructuredLog for PipelineRunCompleted {
    fn log(&self) {
        tracing::debug!(
            node_count = self.node_count,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "pipeline_run_completed",
            span_name = name,
            node_count = self.node_count,
            duration = ?self.duration,
        )
    }
}

/// # Log Level
/// `trace!` - One per node per run
pub struct NodeExecuted<'a> {
    pub label: &'a str,
    pub duration: Duration,
}

impl Display for NodeExecuted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{} executed in {:?}", self.label, self.duration)
    }
}

impl StructuredLog for NodeExecuted<'_> {
    fn log(&self) {
        tracing::trace!(
            node = self.label,
            duration_us = self.duration.as_micros() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::trace_span!(
            "node_executed",
            span_name = name,
            node = self.label,
            duration = ?self.duration,
        )
    }
}

/// A node failed and the run was aborted.
///
/// # Log Level
/// `warn!` - The caller receives the error; this records where it happened
pub struct NodeFailed<'a> {
    pub label: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for NodeFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.label, self.error)
    }
}

impl StructuredLog for NodeFailed<'_> {
    fn log(&self) {
        tracing::warn!(node = self.label, error = %self.error, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "node_failed",
            span_name = name,
            node = self.label,
            error = %self.error,
        )
    }
}
