// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use super::NodeConfig;
use crate::errors::ConfigError;

/// Resolves a pipeline reference (usually a file path) to its node list.
///
/// Workers use this for jobs whose descriptor names a pipeline by path
/// instead of carrying the node list inline.
pub trait PipelineLoader: Send + Sync {
    fn load(&self, reference: &str) -> Result<Vec<NodeConfig>, ConfigError>;
}

/// A pipeline file is either a bare list of nodes or a map with a `pipeline` list.
///
/// # Example
/// ```yaml
/// pipeline:
///   - processor: float_multiply
///     parameters:
///       factor: 2.0
///   - processor: "delete:scratch"
/// ```
#[derive(Deserialize)]
#[serde(untagged)]
enum PipelineDocument {
    Nodes(Vec<NodeConfig>),
    Wrapped { pipeline: Vec<NodeConfig> },
}

impl PipelineDocument {
    fn into_nodes(self) -> Vec<NodeConfig> {
        match self {
            PipelineDocument::Nodes(nodes) => nodes,
            PipelineDocument::Wrapped { pipeline } => pipeline,
        }
    }
}

/// Parse pipeline YAML. `origin` is only used in error messages.
pub fn parse_pipeline_yaml(content: &str, origin: &Path) -> Result<Vec<NodeConfig>, ConfigError> {
    let document: PipelineDocument =
        serde_yaml::from_str(content).map_err(|source| ConfigError::Yaml {
            path: origin.to_path_buf(),
            source,
        })?;
    Ok(document.into_nodes())
}

/// Load a pipeline node list from a YAML file
pub fn load_pipeline_config<P: AsRef<Path>>(path: P) -> Result<Vec<NodeConfig>, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_pipeline_yaml(&content, path)
}

/// Loads pipeline YAML files, resolving relative references against an
/// optional base directory.
#[derive(Debug, Clone, Default)]
pub struct YamlPipelineLoader {
    base_dir: Option<PathBuf>,
}

impl YamlPipelineLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: Some(base_dir.into()),
        }
    }

    fn resolve_path(&self, reference: &str) -> PathBuf {
        let path = Path::new(reference);
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl PipelineLoader for YamlPipelineLoader {
    fn load(&self, reference: &str) -> Result<Vec<NodeConfig>, ConfigError> {
        load_pipeline_config(self.resolve_path(reference))
    }
}
