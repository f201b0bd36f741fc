// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for orchestrator and worker events.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use std::time::Duration;
use tracing::Span;

/// The orchestrator loop started. Its span wraps the whole loop.
///
/// # Log Level
/// `info!` - Important operational event
pub struct OrchestratorStarted<'a> {
    pub transport: &'a str,
    pub queue_capacity: usize,
}

impl Display for OrchestratorStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Orchestrator started on {} transport, queue capacity {}",
            self.transport, self.queue_capacity
        )
    }
}

impl StructuredLog for OrchestratorStarted<'_> {
    fn log(&self) {
        tracing::info!(
            transport = self.transport,
            queue_capacity = self.queue_capacity,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "orchestrator",
            span_name = name,
            transport = self.transport,
            queue_capacity = self.queue_capacity,
        )
    }
}

/// # Log Level
/// `info!`
pub struct OrchestratorStopped {
    pub dispatched: u64,
    pub pending: usize,
}

impl Display for OrchestratorStopped {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Orchestrator stopped after dispatching {} jobs, {} futures unresolved",
            self.dispatched, self.pending
        )
    }
}

impl StructuredLog for OrchestratorStopped {
    fn log(&self) {
        tracing::info!(dispatched = self.dispatched, pending = self.pending, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "orchestrator_stopped",
            span_name = name,
            dispatched = self.dispatched,
            pending = self.pending,
        )
    }
}

/// # Log Level
/// `debug!`
pub struct JobEnqueued<'a> {
    pub job_id: &'a str,
    pub pending: usize,
}

impl Display for JobEnqueued<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Enqueued job {} ({} awaiting results)", self.job_id, self.pending)
    }
}

impl StructuredLog for JobEnqueued<'_> {
    fn log(&self) {
        tracing::debug!(job_id = self.job_id, pending = self.pending, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "job_enqueued",
            span_name = name,
            job_id = self.job_id,
            pending = self.pending,
        )
    }
}

/// # Log Level
/// `debug!`
pub struct JobDispatched<'a> {
    pub job_id: &'a str,
    pub channel: &'a str,
}

impl Display for JobDispatched<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Dispatched job {} on '{}'", self.job_id, self.channel)
    }
}

impl StructuredLog for JobDispatched<'_> {
    fn log(&self) {
        tracing::debug!(job_id = self.job_id, channel = self.channel, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "job_dispatched",
            span_name = name,
            job_id = self.job_id,
            channel = self.channel,
        )
    }
}

/// A job could not be handed to the transport; its future is dropped.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct JobDispatchFailed<'a> {
    pub job_id: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for JobDispatchFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Failed to dispatch job {}: {}", self.job_id, self.error)
    }
}

impl StructuredLog for JobDispatchFailed<'_> {
    fn log(&self) {
        tracing::error!(job_id = self.job_id, error = %self.error, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "job_dispatch_failed",
            span_name = name,
            job_id = self.job_id,
            error = %self.error,
        )
    }
}

/// # Log Level
/// `info!`
pub struct JobResolved<'a> {
    pub job_id: &'a str,
}

impl Display for JobResolved<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Resolved result for job {}", self.job_id)
    }
}

impl StructuredLog for JobResolved<'_> {
    fn log(&self) {
        tracing::info!(job_id = self.job_id, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!("job_resolved", span_name = name, job_id = self.job_id)
    }
}

/// A status message arrived that no pending future is waiting for.
///
/// # Log Level
/// `warn!`
pub struct StatusIgnored<'a> {
    pub channel: &'a str,
    pub reason: &'a str,
}

impl Display for StatusIgnored<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Ignoring status on '{}': {}", self.channel, self.reason)
    }
}

impl StructuredLog for StatusIgnored<'_> {
    fn log(&self) {
        tracing::warn!(channel = self.channel, reason = self.reason, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "status_ignored",
            span_name = name,
            channel = self.channel,
            reason = self.reason,
        )
    }
}

/// A worker loop started. Its span carries `worker_id` for everything the worker logs.
///
/// # Log Level
/// `info!` - Important operational event
pub struct WorkerStarted<'a> {
    pub worker_id: &'a str,
    pub executor: &'a str,
}

impl Display for WorkerStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Worker {} started with {} executor",
            self.worker_id, self.executor
        )
    }
}

impl StructuredLog for WorkerStarted<'_> {
    fn log(&self) {
        tracing::info!(worker_id = self.worker_id, executor = self.executor, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "worker",
            span_name = name,
            worker_id = self.worker_id,
            executor = self.executor,
        )
    }
}

/// # Log Level
/// `info!`
pub struct WorkerStopped<'a> {
    pub worker_id: &'a str,
    pub jobs_completed: u64,
    pub jobs_failed: u64,
}

impl Display for WorkerStopped<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Worker {} stopped: {} jobs completed, {} failed",
            self.worker_id, self.jobs_completed, self.jobs_failed
        )
    }
}

impl StructuredLog for WorkerStopped<'_> {
    fn log(&self) {
        tracing::info!(
            worker_id = self.worker_id,
            jobs_completed = self.jobs_completed,
            jobs_failed = self.jobs_failed,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "worker_stopped",
            span_name = name,
            worker_id = self.worker_id,
            jobs_completed = self.jobs_completed,
            jobs_failed = self.jobs_failed,
        )
    }
}

/// # Log Level
/// `debug!`
pub struct JobCompleted<'a> {
    pub worker_id: &'a str,
    pub job_id: &'a str,
    pub duration: Duration,
}

impl Display for JobCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Worker {} completed job {} in {:?}",
            self.worker_id, self.job_id, self.duration
        )
    }
}

impl StructuredLog for JobCompleted<'_> {
    fn log(&self) {
        tracing::debug!(
            worker_id = self.worker_id,
            job_id = self.job_id,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "job_completed",
            span_name = name,
            worker_id = self.worker_id,
            job_id = self.job_id,
            duration = ?self.duration,
        )
    }
}

/// A job failed on a worker. No status is published, so its future stays unresolved.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct JobFailed<'a> {
    pub worker_id: &'a str,
    pub job_id: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for JobFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Worker {} failed job {}: {}",
            self.worker_id, self.job_id, self.error
        )
    }
}

impl StructuredLog for JobFailed<'_> {
    fn log(&self) {
        tracing::error!(
            worker_id = self.worker_id,
            job_id = self.job_id,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "job_failed",
            span_name = name,
            worker_id = self.worker_id,
            job_id = self.job_id,
            error = %self.error,
        )
    }
}
