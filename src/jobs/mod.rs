// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Distributed execution over a [`Transport`](crate::traits::Transport).
//!
//! ```text
//! enqueue ─▶ Orchestrator ──jobs.<id>.cfg──▶ Worker ─▶ Pipeline
//!    ▲                                          │
//!    └── ResultHandle ◀──jobs.<id>.status───────┘
//! ```
//!
//! A job whose worker fails is logged and acknowledged on the worker side
//! but no status is published, so its result handle never resolves. Callers
//! bound their wait with [`ResultHandle::wait_timeout`].

pub mod handle;
pub mod job;
pub mod orchestrator;
pub mod worker;

pub use handle::ResultHandle;
pub use job::{cfg_channel, status_channel, Job, JobDescriptor};
pub use orchestrator::{JobTicket, Orchestrator};
pub use worker::Worker;
