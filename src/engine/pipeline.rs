// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Ordered, type-checked sequence of nodes run over one payload.
//!
//! ## Construction
//! 1. Resolve every processor reference through the registry (once, never per run)
//! 2. Bind each processor to its configuration as a [`PipelineNode`]
//! 3. Adjacency check: every node that reads data must accept what the most recent
//!    data-producing node emits. Probes, sinks and context mutators pass data
//!    through unchanged, so they never become the producer
//! 4. Deletion guard: a node may not require a context key an earlier context
//!    mutator deleted unless a node in between re-creates it
//!
//! ## Execution
//! Nodes run strictly in order on the calling thread. The first error aborts the run.

use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::time::{Duration, Instant};

use super::{KeyOrigins, NodeRole, ParameterSource, PipelineInspection, PipelineNode};
use crate::config::{NodeConfig, PipelineLoader, PipelineSpec, ProcessorRegistry};
use crate::data::{DataType, Payload};
use crate::errors::{PipelineError, PipelineTopologyError, ReferenceError};
use crate::observability::messages::pipeline::{
    NodeExecuted, NodeFailed, PipelineConstructed, PipelineRunCompleted, PipelineRunStarted,
};
use crate::observability::messages::StructuredLog;
use crate::traits::ProcessorKind;

/// Accumulated wall-clock time for one node across runs.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeTiming {
    pub label: String,
    pub calls: u64,
    pub total: Duration,
}

impl NodeTiming {
    pub fn mean(&self) -> Option<Duration> {
        let nanos = self.total.as_nanos().checked_div(u128::from(self.calls))?;
        Some(Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX)))
    }
}

/// What one node did during the most recent run.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeRun {
    pub index: usize,
    pub label: String,
    pub parameters: BTreeMap<String, ParameterSource>,
    pub duration: Duration,
}

#[derive(Debug)]
pub struct Pipeline {
    nodes: Vec<PipelineNode>,
    probe_results: BTreeMap<String, Vec<Value>>,
    timings: Vec<NodeTiming>,
    last_run: Vec<NodeRun>,
}

impl Pipeline {
    pub fn new(
        configs: &[NodeConfig],
        registry: &ProcessorRegistry,
    ) -> Result<Self, PipelineTopologyError> {
        let mut nodes = Vec::with_capacity(configs.len());
        for (index, config) in configs.iter().enumerate() {
            let processor = registry.resolve(&config.processor).map_err(|err| match err {
                ReferenceError::Unknown(reference) => {
                    PipelineTopologyError::UnknownProcessor { index, reference }
                }
                ReferenceError::Malformed { reference, reason } => {
                    PipelineTopologyError::MalformedReference {
                        index,
                        reference,
                        reason,
                    }
                }
            })?;
            nodes.push(PipelineNode::new(index, config.clone(), processor)?);
        }

        check_adjacency(&nodes)?;
        check_deleted_keys(&nodes)?;

        PipelineConstructed {
            node_count: nodes.len(),
        }
        .log();

        let timings = nodes
            .iter()
            .map(|node| NodeTiming {
                label: node.label().to_string(),
                calls: 0,
                total: Duration::ZERO,
            })
            .collect();

        Ok(Self {
            nodes,
            probe_results: BTreeMap::new(),
            timings,
            last_run: Vec::new(),
        })
    }

    /// Build from an inline node list, or load it through `loader` when the
    /// spec is a path.
    pub fn from_spec(
        spec: &PipelineSpec,
        registry: &ProcessorRegistry,
        loader: &dyn PipelineLoader,
    ) -> Result<Self, PipelineError> {
        match spec {
            PipelineSpec::Nodes(nodes) => Ok(Self::new(nodes, registry)?),
            PipelineSpec::Path(path) => {
                let nodes = loader
                    .load(path)
                    .map_err(|err| PipelineError::Load(err.to_string()))?;
                Ok(Self::new(&nodes, registry)?)
            }
        }
    }

    /// Run every node in order. An empty pipeline returns its input.
    pub fn process(&mut self, payload: Payload) -> Result<Payload, PipelineError> {
        let started = PipelineRunStarted {
            node_count: self.nodes.len(),
            input_type: payload.data.data_type().as_str(),
        };
        started.log();
        let span = started.span("process");
        let _guard = span.enter();

        let run_started = Instant::now();
        let mut origins = KeyOrigins::from_context(&payload.context);
        let mut run = Vec::with_capacity(self.nodes.len());
        let mut current = payload;

        for node in &self.nodes {
            let node_started = Instant::now();
            let outcome = match node.execute(current, &mut origins) {
                Ok(outcome) => outcome,
                Err(err) => {
                    NodeFailed {
                        label: node.label(),
                        error: &err,
                    }
                    .log();
                    self.last_run = run;
                    return Err(err);
                }
            };
            let duration = node_started.elapsed();

            let timing = &mut self.timings[node.index()];
            timing.calls += 1;
            timing.total += duration;
            NodeExecuted {
                label: node.label(),
                duration,
            }
            .log();

            if node.role() == NodeRole::ResultCollector {
                if let Some(value) = outcome.probe_value {
                    self.probe_results
                        .entry(node.label().to_string())
                        .or_default()
                        .push(value);
                }
            }

            run.push(NodeRun {
                index: node.index(),
                label: node.label().to_string(),
                parameters: outcome.parameters,
                duration,
            });
            current = outcome.payload;
        }

        self.last_run = run;
        PipelineRunCompleted {
            node_count: self.nodes.len(),
            duration: run_started.elapsed(),
        }
        .log();
        Ok(current)
    }

    pub fn nodes(&self) -> &[PipelineNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Values from result-collector probes, keyed `"Node <i>/<ProcessorName>"`,
    /// accumulated across every run of this pipeline.
    pub fn probe_results(&self) -> &BTreeMap<String, Vec<Value>> {
        &self.probe_results
    }

    pub fn timings(&self) -> &[NodeTiming] {
        &self.timings
    }

    /// Parameter provenance of the most recent run, up to the failing node if it failed.
    pub fn last_run(&self) -> &[NodeRun] {
        &self.last_run
    }

    pub fn inspect(&self) -> PipelineInspection {
        PipelineInspection::of(&self.nodes)
    }
}

fn produces_data(kind: ProcessorKind) -> bool {
    matches!(
        kind,
        ProcessorKind::DataOperation | ProcessorKind::DataSource | ProcessorKind::PayloadSource
    )
}

fn check_adjacency(nodes: &[PipelineNode]) -> Result<(), PipelineTopologyError> {
    let mut producer: Option<(&PipelineNode, DataType)> = None;
    for node in nodes {
        let reads_data = node.kind().reads_data();
        if let (true, Some((previous, output))) = (reads_data, producer) {
            if !output.compatible_with(node.input_type()) {
                return Err(PipelineTopologyError::TypeMismatch {
                    previous_index: previous.index(),
                    previous: previous.processor_name().to_string(),
                    index: node.index(),
                    processor: node.processor_name().to_string(),
                    expected: node.input_type(),
                    actual: output,
                });
            }
        }
        if produces_data(node.kind()) {
            producer = Some((node, node.output_type()));
        }
    }
    Ok(())
}

fn check_deleted_keys(nodes: &[PipelineNode]) -> Result<(), PipelineTopologyError> {
    let mut deleted: HashMap<String, &PipelineNode> = HashMap::new();
    for node in nodes {
        for key in node.required_context_keys() {
            if let Some(deleter) = deleted.get(&key) {
                return Err(PipelineTopologyError::DeletedKeyRequired {
                    index: node.index(),
                    processor: node.processor_name().to_string(),
                    key,
                    deleted_by: deleter.index(),
                    deleter: deleter.processor_name().to_string(),
                });
            }
        }
        for key in node.suppressed_keys() {
            deleted.insert(key, node);
        }
        for key in node.created_keys() {
            deleted.remove(&key);
        }
    }
    Ok(())
}
