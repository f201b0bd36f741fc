// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::config::ExecutorKind;
use crate::engine::blocking_pool::BlockingPoolExecutor;
use crate::engine::sequential::SequentialExecutor;
use crate::traits::Executor;

/// Factory for creating pipeline executors from configuration
pub struct ExecutorFactory;

impl ExecutorFactory {
    /// Create an executor for the configured kind.
    ///
    /// `BlockingPool` needs a tokio runtime; without one this falls back to
    /// sequential execution.
    pub fn from_kind(kind: ExecutorKind) -> Arc<dyn Executor> {
        match kind {
            ExecutorKind::Sequential => Arc::new(SequentialExecutor::new()),
            ExecutorKind::BlockingPool => match BlockingPoolExecutor::current() {
                Some(executor) => Arc::new(executor),
                None => {
                    tracing::warn!("no tokio runtime for blocking_pool executor, using sequential");
                    Arc::new(SequentialExecutor::new())
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_by_default_and_fallback() {
        assert_eq!(ExecutorFactory::from_kind(ExecutorKind::default()).name(), "sequential");
        assert_eq!(ExecutorFactory::from_kind(ExecutorKind::BlockingPool).name(), "sequential");
    }

    #[tokio::test]
    async fn test_blocking_pool_inside_runtime() {
        assert_eq!(ExecutorFactory::from_kind(ExecutorKind::BlockingPool).name(), "blocking_pool");
    }
}
