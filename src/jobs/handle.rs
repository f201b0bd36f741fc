// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

use crate::errors::JobError;

/// Write-once result cell with any number of waiting readers.
///
/// Clones share the same cell. Exactly one [`resolve`](Self::resolve) succeeds;
/// later attempts return [`JobError::AlreadyResolved`] and leave the stored
/// value untouched. A reader that gives up on a timed wait does not affect the
/// cell, which can still be resolved and read later.
pub struct ResultHandle<T> {
    sender: Arc<watch::Sender<Option<T>>>,
    receiver: watch::Receiver<Option<T>>,
}

impl<T> Clone for ResultHandle<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            receiver: self.receiver.clone(),
        }
    }
}

impl<T: Clone + Send + Sync> ResultHandle<T> {
    pub fn new() -> Self {
        let (sender, receiver) = watch::channel(None);
        Self {
            sender: Arc::new(sender),
            receiver,
        }
    }

    /// A handle that is already resolved to `value`.
    pub fn completed(value: T) -> Self {
        let (sender, receiver) = watch::channel(Some(value));
        Self {
            sender: Arc::new(sender),
            receiver,
        }
    }

    pub fn resolve(&self, value: T) -> Result<(), JobError> {
        let mut value = Some(value);
        let written = self.sender.send_if_modified(|slot| {
            if slot.is_some() {
                false
            } else {
                *slot = value.take();
                true
            }
        });
        if written {
            Ok(())
        } else {
            Err(JobError::AlreadyResolved)
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.receiver.borrow().is_some()
    }

    pub fn try_get(&self) -> Option<T> {
        self.receiver.borrow().clone()
    }

    /// Waits without bound for the value.
    pub async fn wait(&self) -> Result<T, JobError> {
        let mut receiver = self.receiver.clone();
        let slot = receiver
            .wait_for(Option::is_some)
            .await
            .map_err(|_| JobError::Abandoned)?;
        (*slot).clone().ok_or(JobError::Abandoned)
    }

    /// Waits up to `timeout`. Timing out only stops this caller from waiting.
    pub async fn wait_timeout(&self, timeout: Duration) -> Result<T, JobError> {
        match tokio::time::timeout(timeout, self.wait()).await {
            Ok(result) => result,
            Err(_) => Err(JobError::Timeout(timeout)),
        }
    }
}

impl<T: Clone + Send + Sync> Default for ResultHandle<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for ResultHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResultHandle")
            .field("resolved", &self.receiver.borrow().is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_second_resolve_is_rejected() {
        let handle = ResultHandle::new();
        handle.resolve(1).unwrap();
        assert_eq!(handle.resolve(2), Err(JobError::AlreadyResolved));
        assert_eq!(handle.wait().await, Ok(1));
    }

    #[tokio::test]
    async fn test_many_readers_see_the_value() {
        let handle: ResultHandle<String> = ResultHandle::new();
        let readers: Vec<_> = (0..3)
            .map(|_| {
                let reader = handle.clone();
                tokio::spawn(async move { reader.wait_timeout(Duration::from_secs(5)).await })
            })
            .collect();

        handle.resolve("done".to_string()).unwrap();
        for reader in readers {
            assert_eq!(reader.await.unwrap(), Ok("done".to_string()));
        }
    }

    #[tokio::test]
    async fn test_timeout_leaves_handle_resolvable() {
        let handle: ResultHandle<u32> = ResultHandle::new();
        let waited = handle.wait_timeout(Duration::from_millis(10)).await;
        assert_eq!(waited, Err(JobError::Timeout(Duration::from_millis(10))));
        assert!(!handle.is_resolved());

        handle.resolve(7).unwrap();
        assert_eq!(handle.wait_timeout(Duration::from_millis(10)).await, Ok(7));
    }

    #[test]
    fn test_completed_handle() {
        let handle = ResultHandle::completed("x");
        assert!(handle.is_resolved());
        assert_eq!(handle.try_get(), Some("x"));
        assert_eq!(handle.resolve("y"), Err(JobError::AlreadyResolved));
    }
}
