// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use tokio::runtime::Handle;
use tokio::task::JoinError;

use crate::engine::sequential::panic_message;
use crate::errors::PipelineError;
use crate::jobs::ResultHandle;
use crate::traits::{Executor, Task, TaskResult};

/// Runs each task on tokio's blocking thread pool.
///
/// A panicking task resolves its handle with [`PipelineError::TaskPanicked`].
#[derive(Debug, Clone)]
pub struct BlockingPoolExecutor {
    runtime: Handle,
}

impl BlockingPoolExecutor {
    pub fn new(runtime: Handle) -> Self {
        Self { runtime }
    }

    /// Bound to the ambient runtime; `None` outside of one.
    pub fn current() -> Option<Self> {
        Handle::try_current().ok().map(Self::new)
    }
}

fn join_error_message(err: JoinError) -> String {
    if err.is_panic() {
        panic_message(err.into_panic())
    } else {
        err.to_string()
    }
}

impl Executor for BlockingPoolExecutor {
    fn submit(&self, task: Task) -> ResultHandle<TaskResult> {
        let handle = ResultHandle::new();
        let resolver = handle.clone();
        let join = self.runtime.spawn_blocking(task);
        self.runtime.spawn(async move {
            let result = match join.await {
                Ok(result) => result,
                Err(err) => Err(PipelineError::TaskPanicked(join_error_message(err))),
            };
            let _ = resolver.resolve(result);
        });
        handle
    }

    fn name(&self) -> &'static str {
        "blocking_pool"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Payload, TypedData};
    use std::time::Duration;

    #[tokio::test]
    async fn test_runs_task_off_the_async_threads() {
        let executor = BlockingPoolExecutor::current().unwrap();
        let handle = executor.submit(Box::new(|| Ok(Payload::from_data(TypedData::text("done")))));
        let result = handle.wait_timeout(Duration::from_secs(5)).await.unwrap();
        assert_eq!(result.unwrap().data.as_text(), Some("done"));
    }

    #[tokio::test]
    async fn test_panic_becomes_error() {
        let executor = BlockingPoolExecutor::current().unwrap();
        let handle = executor.submit(Box::new(|| -> TaskResult { panic!("boom") }));
        let result = handle.wait_timeout(Duration::from_secs(5)).await.unwrap();
        assert_eq!(result, Err(PipelineError::TaskPanicked("boom".to_string())));
    }

    #[test]
    fn test_no_runtime_no_executor() {
        assert!(BlockingPoolExecutor::current().is_none());
    }
}
