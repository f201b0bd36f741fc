// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Consumes job descriptors, runs their pipelines and publishes results.
//!
//! Any failure while handling one message is logged and the message is
//! acknowledged; the loop carries on with the next one. Only a failure of
//! the loop itself (connecting or subscribing) ends [`Worker::run`], and the
//! transport connection is released either way.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

use super::{status_channel, JobDescriptor};
use crate::config::consts::{JOB_CFG_PATTERN, JOB_ID_KEY};
use crate::config::{PipelineLoader, ProcessorRegistry, WorkerOptions};
use crate::data::Payload;
use crate::engine::Pipeline;
use crate::errors::JobError;
use crate::observability::messages::jobs::{JobCompleted, JobFailed, WorkerStarted, WorkerStopped};
use crate::observability::messages::StructuredLog;
use crate::traits::{Executor, Transport};
use crate::transport::{Message, Metadata};

pub struct Worker {
    id: String,
    transport: Arc<dyn Transport>,
    registry: Arc<ProcessorRegistry>,
    loader: Arc<dyn PipelineLoader>,
    executor: Arc<dyn Executor>,
    options: WorkerOptions,
    stop: CancellationToken,
    completed: AtomicU64,
    failed: AtomicU64,
}

impl Worker {
    pub fn new(
        id: impl Into<String>,
        transport: Arc<dyn Transport>,
        registry: Arc<ProcessorRegistry>,
        loader: Arc<dyn PipelineLoader>,
        executor: Arc<dyn Executor>,
        options: WorkerOptions,
    ) -> Self {
        Self {
            id: id.into(),
            transport,
            registry,
            loader,
            executor,
            options,
            stop: CancellationToken::new(),
            completed: AtomicU64::new(0),
            failed: AtomicU64::new(0),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn jobs_completed(&self) -> u64 {
        self.completed.load(Ordering::SeqCst)
    }

    pub fn jobs_failed(&self) -> u64 {
        self.failed.load(Ordering::SeqCst)
    }

    pub fn stop(&self) {
        self.stop.cancel();
    }

    pub fn stop_handle(&self) -> CancellationToken {
        self.stop.clone()
    }

    pub async fn run(&self) -> Result<(), JobError> {
        self.transport.connect().await?;

        let started = WorkerStarted {
            worker_id: &self.id,
            executor: self.executor.name(),
        };
        started.log();

        let result = self.poll_loop().instrument(started.span("run")).await;

        self.transport.close().await;
        WorkerStopped {
            worker_id: &self.id,
            jobs_completed: self.jobs_completed(),
            jobs_failed: self.jobs_failed(),
        }
        .log();
        result
    }

    async fn poll_loop(&self) -> Result<(), JobError> {
        while !self.stop.is_cancelled() {
            let mut subscription = self.transport.subscribe(JOB_CFG_PATTERN).await?;
            let mut handled = 0usize;
            while let Some(message) = subscription.next_message().await {
                self.handle_message(message).await;
                handled += 1;
                if self.stop.is_cancelled() {
                    break;
                }
            }
            subscription.close().await;

            if handled == 0 {
                tokio::select! {
                    _ = self.stop.cancelled() => {}
                    _ = tokio::time::sleep(self.options.poll_interval()) => {}
                }
            }
        }
        Ok(())
    }

    async fn handle_message(&self, mut message: Message) {
        let started = Instant::now();
        let job_id = message
            .metadata_str(JOB_ID_KEY)
            .unwrap_or("<unknown>")
            .to_string();
        let metadata = message.metadata.clone();
        let payload = message.payload();

        match self.process(metadata, payload).await {
            Ok(()) => {
                self.completed.fetch_add(1, Ordering::SeqCst);
                JobCompleted {
                    worker_id: &self.id,
                    job_id: &job_id,
                    duration: started.elapsed(),
                }
                .log();
            }
            Err(err) => {
                self.failed.fetch_add(1, Ordering::SeqCst);
                JobFailed {
                    worker_id: &self.id,
                    job_id: &job_id,
                    error: &err,
                }
                .log();
            }
        }
        message.ack();
    }

    async fn process(&self, metadata: Metadata, payload: Payload) -> Result<(), JobError> {
        let descriptor = JobDescriptor::from_metadata(&metadata)?;
        let mut pipeline =
            Pipeline::from_spec(&descriptor.pipeline, &self.registry, self.loader.as_ref())?;

        let handle = self
            .executor
            .submit(Box::new(move || pipeline.process(payload)));
        let mut result = handle.wait().await??;

        result.context.set(JOB_ID_KEY, descriptor.job_id.as_str());
        let mut status_metadata = Metadata::new();
        status_metadata.insert(JOB_ID_KEY.to_string(), descriptor.job_id.clone().into());

        self.transport
            .publish(
                &status_channel(&descriptor.job_id),
                result.data,
                result.context,
                status_metadata,
                false,
            )
            .await?;
        Ok(())
    }
}
