// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod loader;
mod node;
mod registry;
mod runtime;

pub mod consts;

pub use loader::{load_pipeline_config, parse_pipeline_yaml, PipelineLoader, YamlPipelineLoader};
pub use node::{NodeConfig, PipelineSpec};
pub use registry::{ProcessorFactory, ProcessorRegistry};
pub use runtime::{
    load_runtime_config, ExecutorKind, OrchestratorOptions, RuntimeConfig, WorkerOptions,
};
