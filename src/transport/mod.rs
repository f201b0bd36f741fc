// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Pub/sub transport used between the orchestrator and its workers.
//!
//! The [`Transport`](crate::traits::Transport) trait is the seam; this module
//! holds the message type, channel-pattern matching, and the in-memory
//! reference backend. The reference backend is at-most-once: a message leaves
//! its queue when it is dequeued, not when it is acknowledged.

mod memory;
mod message;
mod pattern;

pub use memory::InMemoryTransport;
pub use message::{AckFn, Message, Metadata};
pub use pattern::ChannelPattern;
