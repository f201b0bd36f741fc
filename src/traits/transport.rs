// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::data::{Context, TypedData};
use crate::errors::TransportResult;
use crate::jobs::ResultHandle;
use crate::transport::{Message, Metadata};

/// Pluggable pub/sub channel abstraction.
///
/// Channels are dot-separated names such as `jobs.<id>.cfg`. Subscriptions take
/// a glob pattern where `*` stands for a single segment.
///
/// ## Invariants
/// - Delivery within one channel is FIFO
/// - No ordering is promised across channels
/// - `Message::ack` is advisory; a durable backend must tolerate it never being called
#[async_trait]
pub trait Transport: Send + Sync {
    async fn connect(&self) -> TransportResult<()>;

    /// Releases this caller's connection. Safe to call when already closed.
    async fn close(&self);

    /// Enqueues a message on `channel`.
    ///
    /// With `require_ack` the returned handle completes once the backend has
    /// durably accepted the message.
    async fn publish(
        &self,
        channel: &str,
        data: TypedData,
        context: Context,
        metadata: Metadata,
        require_ack: bool,
    ) -> TransportResult<Option<ResultHandle<()>>>;

    async fn subscribe(&self, pattern: &str) -> TransportResult<Box<dyn Subscription>>;

    fn is_connected(&self) -> bool;

    fn name(&self) -> &'static str;
}

/// Iteration over the messages currently queued for a pattern.
///
/// `next_message` returns `None` once nothing matching is queued; callers poll
/// by subscribing again.
#[async_trait]
pub trait Subscription: Send {
    async fn next_message(&mut self) -> Option<Message>;

    async fn close(&mut self);
}
