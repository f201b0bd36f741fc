// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! In-memory reference transport.
//!
//! ## Design
//! - One FIFO queue per channel, each behind its own lock; the channel table is a `DashMap`
//! - Every message gets a global sequence number, and a subscription always hands out the
//!   oldest matching message first, so per-channel FIFO holds and publish order is kept
//!   across channels as a side effect
//! - Messages leave their queue at dequeue time; `ack()` only bumps a counter
//! - Connections are counted: `connect`/`close` pairs from several components may share
//!   one instance, and it stays usable while any of them is connected
//! - Queued messages survive a full close and are delivered after the next `connect`

use async_trait::async_trait;
use dashmap::DashMap;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::{ChannelPattern, Message, Metadata};
use crate::data::{Context, TypedData};
use crate::errors::{TransportError, TransportResult};
use crate::jobs::ResultHandle;
use crate::observability::messages::transport::{
    MessageDelivered, MessagePublished, TransportClosed, TransportConnected,
};
use crate::observability::messages::StructuredLog;
use crate::traits::{Subscription, Transport};

type ChannelQueue = Arc<Mutex<VecDeque<Queued>>>;

struct Queued {
    sequence: u64,
    message: Message,
}

#[derive(Default)]
struct Shared {
    channels: DashMap<String, ChannelQueue>,
    connections: AtomicUsize,
    sequence: AtomicU64,
    acknowledged: Arc<AtomicU64>,
}

fn lock(queue: &Mutex<VecDeque<Queued>>) -> MutexGuard<'_, VecDeque<Queued>> {
    queue.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Shared {
    fn check_connected(&self, operation: &str) -> TransportResult<()> {
        if self.connections.load(Ordering::SeqCst) == 0 {
            Err(TransportError::NotConnected(format!(
                "cannot {} on a closed in-memory transport",
                operation
            )))
        } else {
            Ok(())
        }
    }

    /// Pops the oldest queued message whose channel matches `pattern`.
    fn dequeue(&self, pattern: &ChannelPattern) -> Option<Message> {
        loop {
            let mut oldest: Option<(String, ChannelQueue, u64)> = None;
            for entry in self.channels.iter() {
                if !pattern.matches(entry.key()) {
                    continue;
                }
                let front = lock(entry.value()).front().map(|q| q.sequence);
                if let Some(sequence) = front {
                    if oldest.as_ref().map_or(true, |(_, _, s)| sequence < *s) {
                        oldest = Some((entry.key().clone(), entry.value().clone(), sequence));
                    }
                }
            }

            let (channel, queue, sequence) = oldest?;
            let popped = {
                let mut guard = lock(&queue);
                if guard.front().map(|q| q.sequence) == Some(sequence) {
                    guard.pop_front()
                } else {
                    None
                }
            };

            match popped {
                Some(queued) => {
                    self.channels
                        .remove_if(&channel, |_, queue| lock(queue).is_empty());
                    return Some(queued.message);
                }
                // Another subscriber won the race for this message; look again.
                None => continue,
            }
        }
    }
}

/// Shared in-process transport. Clones share the same queues.
#[derive(Clone, Default)]
pub struct InMemoryTransport {
    shared: Arc<Shared>,
}

impl InMemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `ack()` calls observed so far.
    pub fn acknowledged(&self) -> u64 {
        self.shared.acknowledged.load(Ordering::SeqCst)
    }

    pub fn connections(&self) -> usize {
        self.shared.connections.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for InMemoryTransport {
    async fn connect(&self) -> TransportResult<()> {
        let connections = self.shared.connections.fetch_add(1, Ordering::SeqCst) + 1;
        TransportConnected {
            transport: self.name(),
            connections,
        }
        .log();
        Ok(())
    }

    async fn close(&self) {
        let previous = self
            .shared
            .connections
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));
        if let Ok(previous) = previous {
            TransportClosed {
                transport: self.name(),
                connections: previous - 1,
            }
            .log();
        }
    }

    async fn publish(
        &self,
        channel: &str,
        data: TypedData,
        context: Context,
        metadata: Metadata,
        require_ack: bool,
    ) -> TransportResult<Option<ResultHandle<()>>> {
        self.shared.check_connected("publish")?;
        if channel.is_empty() || channel.split('.').any(str::is_empty) {
            return Err(TransportError::InvalidPattern {
                pattern: channel.to_string(),
                reason: "channel names need non-empty dot-separated segments".to_string(),
            });
        }

        let acknowledged = self.shared.acknowledged.clone();
        let message = Message::new(channel, data, context, metadata).with_ack(Box::new(move || {
            acknowledged.fetch_add(1, Ordering::SeqCst);
        }));
        let sequence = self.shared.sequence.fetch_add(1, Ordering::SeqCst);

        // Push while holding the table entry so an emptied queue cannot be
        // removed from under us.
        {
            let entry = self.shared.channels.entry(channel.to_string()).or_default();
            lock(entry.value()).push_back(Queued { sequence, message });
        }

        MessagePublished { channel, sequence }.log();

        // Accepting into memory is as durable as this backend gets.
        Ok(require_ack.then(|| ResultHandle::completed(())))
    }

    async fn subscribe(&self, pattern: &str) -> TransportResult<Box<dyn Subscription>> {
        self.shared.check_connected("subscribe")?;
        let pattern = ChannelPattern::parse(pattern)?;
        Ok(Box::new(InMemorySubscription {
            shared: self.shared.clone(),
            pattern,
            closed: false,
        }))
    }

    fn is_connected(&self) -> bool {
        self.shared.connections.load(Ordering::SeqCst) > 0
    }

    fn name(&self) -> &'static str {
        "in_memory"
    }
}

struct InMemorySubscription {
    shared: Arc<Shared>,
    pattern: ChannelPattern,
    closed: bool,
}

#[async_trait]
impl Subscription for InMemorySubscription {
    async fn next_message(&mut self) -> Option<Message> {
        if self.closed {
            return None;
        }
        let message = self.shared.dequeue(&self.pattern)?;
        MessageDelivered {
            channel: &message.channel,
            pattern: self.pattern.as_str(),
        }
        .log();
        Some(message)
    }

    async fn close(&mut self) {
        self.closed = true;
    }
}
