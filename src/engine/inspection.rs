// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use super::{NodeRole, ParameterSource, PipelineNode};
use crate::data::DataType;
use crate::traits::ProcessorKind;

/// Static description of one node, for inspectors and the CLI.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeInspection {
    pub index: usize,
    pub label: String,
    pub processor: String,
    pub kind: ProcessorKind,
    pub role: NodeRole,
    pub input_type: DataType,
    pub output_type: DataType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_keyword: Option<String>,
    pub required_keys: Vec<String>,
    pub created_keys: Vec<String>,
    pub suppressed_keys: Vec<String>,
    pub parameters: BTreeMap<String, ParameterSource>,
}

/// Structure and static parameter provenance of a pipeline.
///
/// Provenance here is what can be known before running: a parameter resolves
/// from config, from a key an earlier node is declared to create, or from a
/// default. Anything else must come from the initial context and is listed in
/// `required_initial_keys`. Keys that processors create dynamically are not
/// visible.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineInspection {
    pub nodes: Vec<NodeInspection>,
    pub required_initial_keys: BTreeSet<String>,
}

impl PipelineInspection {
    pub fn of(nodes: &[PipelineNode]) -> Self {
        let mut producers: HashMap<String, usize> = HashMap::new();
        let mut required_initial_keys = BTreeSet::new();
        let mut inspected = Vec::with_capacity(nodes.len());

        for node in nodes {
            let mut parameters = BTreeMap::new();
            for spec in node.parameter_specs() {
                let source = if node.config().parameters.contains_key(&spec.name) {
                    ParameterSource::Config
                } else if let Some(origin) = producers.get(&spec.name) {
                    ParameterSource::Context {
                        origin: Some(*origin),
                    }
                } else if spec.default.is_some() {
                    ParameterSource::Default
                } else {
                    required_initial_keys.insert(spec.name.clone());
                    ParameterSource::Context { origin: None }
                };
                parameters.insert(spec.name.clone(), source);
            }

            let required_keys = node.required_context_keys();
            for key in &required_keys {
                if !producers.contains_key(key) {
                    required_initial_keys.insert(key.clone());
                }
            }

            let created_keys = node.created_keys();
            let suppressed_keys = node.suppressed_keys();
            for key in &suppressed_keys {
                producers.remove(key);
            }
            for key in &created_keys {
                producers.insert(key.clone(), node.index());
            }

            inspected.push(NodeInspection {
                index: node.index(),
                label: node.label().to_string(),
                processor: node.processor_name().to_string(),
                kind: node.kind(),
                role: node.role(),
                input_type: node.input_type(),
                output_type: node.output_type(),
                context_keyword: node.config().context_keyword.clone(),
                required_keys,
                created_keys,
                suppressed_keys,
                parameters,
            });
        }

        Self {
            nodes: inspected,
            required_initial_keys,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}
