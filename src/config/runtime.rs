// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

use super::consts::{
    DEFAULT_POLL_INTERVAL_MS, DEFAULT_POP_TIMEOUT_MS, DEFAULT_QUEUE_CAPACITY,
    DEFAULT_RESULT_TIMEOUT_MS, DEFAULT_WORKER_COUNT,
};
use super::PipelineSpec;
use crate::errors::ConfigError;

/// Runtime settings for an orchestrator and its workers.
///
/// Every field is optional and falls back to the constants in
/// [`consts`](super::consts).
///
/// # Example
/// ```yaml
/// orchestrator:
///   queue_capacity: 256
///   pop_timeout_ms: 25
/// worker:
///   count: 4
///   poll_interval_ms: 10
/// executor: blocking_pool
/// result_timeout_ms: 5000
/// pipeline: pipelines/scale.yaml
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RuntimeConfig {
    #[serde(default)]
    pub orchestrator: OrchestratorOptions,
    #[serde(default)]
    pub worker: WorkerOptions,
    #[serde(default)]
    pub executor: ExecutorKind,
    pub result_timeout_ms: Option<u64>,
    pub pipeline: Option<PipelineSpec>,
}

impl RuntimeConfig {
    pub fn result_timeout(&self) -> Duration {
        Duration::from_millis(self.result_timeout_ms.unwrap_or(DEFAULT_RESULT_TIMEOUT_MS))
    }
}

/// Which [`Executor`](crate::traits::Executor) workers run pipelines on.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExecutorKind {
    /// Run in the worker's own task, result available immediately
    #[default]
    Sequential,
    /// Run on tokio's blocking thread pool
    BlockingPool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrchestratorOptions {
    pub queue_capacity: Option<usize>,
    pub pop_timeout_ms: Option<u64>,
}

impl OrchestratorOptions {
    pub fn queue_capacity(&self) -> usize {
        self.queue_capacity.unwrap_or(DEFAULT_QUEUE_CAPACITY).max(1)
    }

    pub fn pop_timeout(&self) -> Duration {
        Duration::from_millis(self.pop_timeout_ms.unwrap_or(DEFAULT_POP_TIMEOUT_MS))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkerOptions {
    pub count: Option<usize>,
    pub poll_interval_ms: Option<u64>,
}

impl WorkerOptions {
    pub fn count(&self) -> usize {
        self.count.unwrap_or(DEFAULT_WORKER_COUNT).max(1)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.unwrap_or(DEFAULT_POLL_INTERVAL_MS))
    }
}

/// Load runtime settings from a `.toml` file, or YAML for any other extension.
pub fn load_runtime_config<P: AsRef<Path>>(path: P) -> Result<RuntimeConfig, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let is_toml = path.extension().and_then(|ext| ext.to_str()) == Some("toml");
    if is_toml {
        toml::from_str(&content).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })
    } else {
        serde_yaml::from_str(&content).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg: RuntimeConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(cfg.orchestrator.queue_capacity(), DEFAULT_QUEUE_CAPACITY);
        assert_eq!(cfg.orchestrator.pop_timeout(), Duration::from_millis(DEFAULT_POP_TIMEOUT_MS));
        assert_eq!(cfg.worker.count(), DEFAULT_WORKER_COUNT);
        assert_eq!(cfg.executor, ExecutorKind::Sequential);
        assert!(cfg.pipeline.is_none());
    }

    #[test]
    fn test_yaml_with_inline_pipeline() {
        let yaml = r#"
worker:
  count: 3
executor: blocking_pool
pipeline:
  - processor: float_multiply
    parameters:
      factor: 2.0
"#;
        let cfg: RuntimeConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.worker.count(), 3);
        assert_eq!(cfg.executor, ExecutorKind::BlockingPool);
        match cfg.pipeline {
            Some(PipelineSpec::Nodes(nodes)) => assert_eq!(nodes[0].processor, "float_multiply"),
            other => panic!("expected inline nodes, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let cfg: RuntimeConfig = serde_yaml::from_str("orchestrator:\n  queue_capacity: 0\n").unwrap();
        assert_eq!(cfg.orchestrator.queue_capacity(), 1);
    }

    #[test]
    fn test_load_toml_and_yaml_files() {
        let dir = tempfile::tempdir().unwrap();
        let toml_path = dir.path().join("runtime.toml");
        std::fs::write(
            &toml_path,
            "pipeline = \"pipelines/a.yaml\"\n\n[worker]\npoll_interval_ms = 5\n",
        )
        .unwrap();
        let cfg = load_runtime_config(&toml_path).unwrap();
        assert_eq!(cfg.worker.poll_interval(), Duration::from_millis(5));
        assert_eq!(cfg.pipeline, Some(PipelineSpec::Path("pipelines/a.yaml".to_string())));

        let yaml_path = dir.path().join("runtime.yaml");
        std::fs::write(&yaml_path, "executor: nonsense\n").unwrap();
        assert!(matches!(
            load_runtime_config(&yaml_path),
            Err(ConfigError::Yaml { .. })
        ));
    }
}
