// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::errors::PipelineError;
use crate::jobs::ResultHandle;
use crate::traits::{Executor, Task, TaskResult};

/// Text of a caught panic payload.
pub(crate) fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

/// Runs each task immediately on the calling thread and returns an
/// already-resolved handle.
///
/// A panicking task resolves its handle with [`PipelineError::TaskPanicked`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialExecutor;

impl SequentialExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl Executor for SequentialExecutor {
    fn submit(&self, task: Task) -> ResultHandle<TaskResult> {
        let result = panic::catch_unwind(AssertUnwindSafe(task))
            .unwrap_or_else(|payload| Err(PipelineError::TaskPanicked(panic_message(payload))));
        ResultHandle::completed(result)
    }

    fn name(&self) -> &'static str {
        "sequential"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Payload, TypedData};

    #[test]
    fn test_result_is_ready_on_return() {
        let handle = SequentialExecutor::new().submit(Box::new(|| {
            Ok(Payload::from_data(TypedData::integer(5)))
        }));
        let payload = handle.try_get().unwrap().unwrap();
        assert_eq!(payload.data, TypedData::integer(5));
    }

    #[test]
    fn test_failure_is_delivered_not_swallowed() {
        let handle = SequentialExecutor::new()
            .submit(Box::new(|| Err(PipelineError::Load("missing.yaml".to_string()))));
        assert_eq!(
            handle.try_get(),
            Some(Err(PipelineError::Load("missing.yaml".to_string())))
        );
    }

    #[test]
    fn test_panic_becomes_error() {
        let handle = SequentialExecutor::new().submit(Box::new(|| -> TaskResult { panic!("boom") }));
        assert_eq!(
            handle.try_get(),
            Some(Err(PipelineError::TaskPanicked("boom".to_string())))
        );

        let formatted = SequentialExecutor::new()
            .submit(Box::new(|| -> TaskResult { panic!("node {} failed", 3) }));
        assert_eq!(
            formatted.try_get(),
            Some(Err(PipelineError::TaskPanicked("node 3 failed".to_string())))
        );
    }
}
