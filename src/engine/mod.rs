// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod blocking_pool;
pub mod factory;
pub mod inspection;
pub mod node;
pub mod parameters;
pub mod pipeline;
pub mod sequential;
#[cfg(test)]
pub mod integration_tests;

pub use blocking_pool::BlockingPoolExecutor;
pub use factory::ExecutorFactory;
pub use inspection::{NodeInspection, PipelineInspection};
pub use node::{NodeOutcome, NodeRole, PipelineNode};
pub use parameters::{KeyOrigins, ParameterSource, Parameters};
pub use pipeline::{NodeRun, NodeTiming, Pipeline};
pub use sequential::SequentialExecutor;
