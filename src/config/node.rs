// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::errors::ConfigError;

/// Configuration for a single pipeline node.
///
/// # Fields
/// * `processor` - Registry name, or a built-in shorthand such as `rename:old:new`,
///   `delete:key` or `template:<format>:<output_key>`
/// * `parameters` - Explicit argument values; these always win over context keys
/// * `context_keyword` - For probes only: store the probe result under this context key
///
/// # Example
/// ```yaml
/// - processor: float_multiply
///   parameters:
///     factor: 2.0
/// - processor: float_value_probe
///   context_keyword: k1
/// - processor: "rename:k1:k1b"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeConfig {
    pub processor: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub parameters: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_keyword: Option<String>,
}

impl NodeConfig {
    pub fn new(processor: impl Into<String>) -> Self {
        Self {
            processor: processor.into(),
            parameters: BTreeMap::new(),
            context_keyword: None,
        }
    }

    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }

    pub fn with_context_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.context_keyword = Some(keyword.into());
        self
    }

    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert("processor".to_string(), Value::from(self.processor.as_str()));
        if !self.parameters.is_empty() {
            let parameters: Map<String, Value> = self
                .parameters
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect();
            map.insert("parameters".to_string(), Value::Object(parameters));
        }
        if let Some(keyword) = &self.context_keyword {
            map.insert("context_keyword".to_string(), Value::from(keyword.as_str()));
        }
        Value::Object(map)
    }
}

/// How a job names its pipeline: inline node list, or a path the worker's
/// loader resolves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PipelineSpec {
    Nodes(Vec<NodeConfig>),
    Path(String),
}

impl PipelineSpec {
    /// JSON form carried in job metadata: a list of node maps, or a string.
    pub fn to_value(&self) -> Value {
        match self {
            PipelineSpec::Nodes(nodes) => Value::Array(nodes.iter().map(NodeConfig::to_value).collect()),
            PipelineSpec::Path(path) => Value::from(path.as_str()),
        }
    }

    /// Parses the metadata form, checking its shape: a string, or a list whose
    /// entries are all node-configuration maps.
    pub fn from_value(value: &Value) -> Result<Self, ConfigError> {
        match value {
            Value::String(path) => Ok(PipelineSpec::Path(path.clone())),
            Value::Array(entries) => {
                let mut nodes = Vec::with_capacity(entries.len());
                for (index, entry) in entries.iter().enumerate() {
                    if !entry.is_object() {
                        return Err(ConfigError::Invalid(format!(
                            "pipeline entry {} is not a node configuration map",
                            index
                        )));
                    }
                    let node: NodeConfig = serde_json::from_value(entry.clone()).map_err(|e| {
                        ConfigError::Invalid(format!("pipeline entry {}: {}", index, e))
                    })?;
                    nodes.push(node);
                }
                Ok(PipelineSpec::Nodes(nodes))
            }
            other => Err(ConfigError::Invalid(format!(
                "pipeline must be a list of node configurations or a path, got {}",
                other
            ))),
        }
    }
}

impl From<Vec<NodeConfig>> for PipelineSpec {
    fn from(nodes: Vec<NodeConfig>) -> Self {
        PipelineSpec::Nodes(nodes)
    }
}
