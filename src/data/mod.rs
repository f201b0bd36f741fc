// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Values that flow between pipeline nodes.
//!
//! A [`Payload`] pairs a validated [`TypedData`] with the shared [`Context`]
//! that carries cross-node state. Context processors never write the context
//! directly; they go through a [`ContextObserver`] that enforces the keys the
//! processor declared and records what changed.

mod context;
mod observer;
mod payload;
mod typed;

pub use context::Context;
pub use observer::{ContextChanges, ContextObserver};
pub use payload::Payload;
pub use typed::{Data, DataType, TypedData};
