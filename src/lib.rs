// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod backends;   // processor implementations
pub mod config;     // node config, registry, runtime settings
pub mod data;       // typed data, context, payload
pub mod engine;     // pipeline, nodes, executors
pub mod errors;     // error handling
pub mod jobs;       // orchestrator, worker, result handles
pub mod observability;
pub mod traits;     // unified abstractions
pub mod transport;  // pub/sub backends
