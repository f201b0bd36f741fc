// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::data::Payload;
use crate::errors::PipelineError;
use crate::jobs::ResultHandle;

/// Outcome of one pipeline invocation.
pub type TaskResult = Result<Payload, PipelineError>;

/// A unit of work handed to an [`Executor`]. Typically a closure owning a
/// freshly constructed pipeline and its input payload.
pub type Task = Box<dyn FnOnce() -> TaskResult + Send + 'static>;

/// Invokes a task and hands back a handle for its result.
///
/// Callers see the same interface whether the task ran synchronously, on a
/// blocking pool, or somewhere else. Implementations must:
/// - invoke the task exactly once
/// - deliver exactly one result or one failure through the handle
/// - never swallow a failure, panics included
pub trait Executor: Send + Sync {
    fn submit(&self, task: Task) -> ResultHandle<TaskResult>;

    fn name(&self) -> &'static str;
}
