// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Job intake and result correlation.
//!
//! ## Loop
//! 1. Pop one job with a short timeout and publish it on `jobs.<id>.cfg`
//! 2. Subscribe to `jobs.*.status`, handle at most one message, close the subscription
//! 3. Exit when the stop signal fires, releasing the transport connection
//!
//! Handling one status per iteration bounds the latency of each turn; job
//! publish order still follows enqueue order.

use dashmap::DashMap;
use serde_json::Value;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio_util::sync::CancellationToken;
use tracing::Instrument;
use uuid::Uuid;

use super::{cfg_channel, Job, ResultHandle};
use crate::config::consts::{JOB_ID_KEY, JOB_STATUS_PATTERN};
use crate::config::{OrchestratorOptions, PipelineSpec};
use crate::data::Payload;
use crate::errors::JobError;
use crate::observability::messages::jobs::{
    JobDispatchFailed, JobDispatched, JobEnqueued, JobResolved, OrchestratorStarted,
    OrchestratorStopped, StatusIgnored,
};
use crate::observability::messages::StructuredLog;
use crate::traits::Transport;

/// Returned by [`Orchestrator::enqueue`].
#[derive(Debug, Clone)]
pub struct JobTicket {
    pub job_id: Uuid,
    /// Present when a future was requested
    pub result: Option<ResultHandle<Payload>>,
}

pub struct Orchestrator {
    transport: Arc<dyn Transport>,
    options: OrchestratorOptions,
    sender: mpsc::Sender<Job>,
    receiver: Mutex<mpsc::Receiver<Job>>,
    pending: DashMap<String, ResultHandle<Payload>>,
    stop: CancellationToken,
    connected: AtomicBool,
    dispatched: AtomicU64,
}

impl Orchestrator {
    pub fn new(transport: Arc<dyn Transport>, options: OrchestratorOptions) -> Self {
        let (sender, receiver) = mpsc::channel(options.queue_capacity());
        Self {
            transport,
            options,
            sender,
            receiver: Mutex::new(receiver),
            pending: DashMap::new(),
            stop: CancellationToken::new(),
            connected: AtomicBool::new(false),
            dispatched: AtomicU64::new(0),
        }
    }

    /// Queue a job without blocking.
    ///
    /// With `want_future` the ticket carries a handle that resolves to the
    /// worker's final payload.
    pub fn enqueue(
        &self,
        pipeline: impl Into<PipelineSpec>,
        payload: Payload,
        want_future: bool,
    ) -> Result<JobTicket, JobError> {
        if self.stop.is_cancelled() {
            return Err(JobError::QueueClosed);
        }

        let job = Job::new(pipeline.into(), payload);
        let job_id = job.job_id;
        let key = job.id();

        let result = want_future.then(|| {
            let handle = ResultHandle::new();
            self.pending.insert(key.clone(), handle.clone());
            handle
        });

        if let Err(err) = self.sender.try_send(job) {
            self.pending.remove(&key);
            return Err(match err {
                mpsc::error::TrySendError::Full(_) => JobError::QueueFull {
                    capacity: self.options.queue_capacity(),
                },
                mpsc::error::TrySendError::Closed(_) => JobError::QueueClosed,
            });
        }

        JobEnqueued {
            job_id: &key,
            pending: self.pending.len(),
        }
        .log();

        Ok(JobTicket { job_id, result })
    }

    /// Run until [`stop`](Self::stop) is called or the stop handle fires.
    pub async fn run_forever(&self) -> Result<(), JobError> {
        self.transport.connect().await?;
        self.connected.store(true, Ordering::SeqCst);

        let started = OrchestratorStarted {
            transport: self.transport.name(),
            queue_capacity: self.options.queue_capacity(),
        };
        started.log();

        async {
            while !self.stop.is_cancelled() {
                if let Some(job) = self.pop_job().await {
                    self.dispatch(job).await;
                }
                self.collect_one_status().await;
            }
        }
        .instrument(started.span("run_forever"))
        .await;

        self.release_transport().await;
        OrchestratorStopped {
            dispatched: self.dispatched.load(Ordering::SeqCst),
            pending: self.pending.len(),
        }
        .log();
        Ok(())
    }

    /// Stop accepting jobs and release the transport. Idempotent.
    pub async fn stop(&self) {
        self.stop.cancel();
        self.release_transport().await;
    }

    /// External stop signal; cancelling it ends [`run_forever`](Self::run_forever).
    pub fn stop_handle(&self) -> CancellationToken {
        self.stop.clone()
    }

    /// Futures registered and not yet resolved.
    pub fn pending_jobs(&self) -> usize {
        self.pending.len()
    }

    async fn release_transport(&self) {
        if self.connected.swap(false, Ordering::SeqCst) {
            self.transport.close().await;
        }
    }

    async fn pop_job(&self) -> Option<Job> {
        let mut receiver = self.receiver.lock().await;
        tokio::select! {
            _ = self.stop.cancelled() => None,
            popped = tokio::time::timeout(self.options.pop_timeout(), receiver.recv()) => {
                popped.ok().flatten()
            }
        }
    }

    async fn dispatch(&self, job: Job) {
        let key = job.id();
        let channel = cfg_channel(&key);
        let metadata = job.metadata();
        let Payload { data, context } = job.payload;

        match self
            .transport
            .publish(&channel, data, context, metadata, false)
            .await
        {
            Ok(_) => {
                self.dispatched.fetch_add(1, Ordering::SeqCst);
                JobDispatched {
                    job_id: &key,
                    channel: &channel,
                }
                .log();
            }
            Err(err) => {
                self.pending.remove(&key);
                JobDispatchFailed {
                    job_id: &key,
                    error: &err,
                }
                .log();
            }
        }
    }

    async fn collect_one_status(&self) {
        let mut subscription = match self.transport.subscribe(JOB_STATUS_PATTERN).await {
            Ok(subscription) => subscription,
            Err(err) => {
                tracing::debug!(error = %err, "status subscription unavailable");
                return;
            }
        };

        if let Some(mut message) = subscription.next_message().await {
            let job_id = message
                .context
                .get(JOB_ID_KEY)
                .and_then(Value::as_str)
                .map(str::to_string);

            match job_id {
                Some(job_id) => match self.pending.remove(&job_id) {
                    Some((_, handle)) => match handle.resolve(message.payload()) {
                        Ok(()) => JobResolved { job_id: &job_id }.log(),
                        Err(_) => StatusIgnored {
                            channel: &message.channel,
                            reason: "future already resolved",
                        }
                        .log(),
                    },
                    None => StatusIgnored {
                        channel: &message.channel,
                        reason: "no pending future for this job",
                    }
                    .log(),
                },
                None => StatusIgnored {
                    channel: &message.channel,
                    reason: "context has no job_id",
                }
                .log(),
            }
            message.ack();
        }

        subscription.close().await;
    }
}
