// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

use super::{KeyOrigins, ParameterSource, Parameters};
use crate::config::NodeConfig;
use crate::data::{Context, ContextObserver, DataType, Payload};
use crate::errors::{PipelineError, PipelineTopologyError, ProcessorError};
use crate::traits::{ParameterSpec, Processor, ProcessorKind};

/// What a node does with the payload, derived from its processor kind and
/// configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeRole {
    Operation,
    /// A probe whose result is written under its `context_keyword`
    ContextInjector,
    /// A probe whose results accumulate in [`Pipeline::probe_results`](super::Pipeline::probe_results)
    ResultCollector,
    ContextMutator,
    Source,
    Sink,
    PayloadSource,
    PayloadSink,
}

/// Result of running one node.
#[derive(Debug, Clone)]
pub struct NodeOutcome {
    pub payload: Payload,
    /// Set for probe nodes
    pub probe_value: Option<Value>,
    pub parameters: BTreeMap<String, ParameterSource>,
}

/// A processor bound to its configuration at a fixed pipeline position.
#[derive(Debug, Clone)]
pub struct PipelineNode {
    index: usize,
    label: String,
    processor: Processor,
    config: NodeConfig,
    role: NodeRole,
    parameters: Vec<ParameterSpec>,
}

impl PipelineNode {
    /// Binds `processor` to `config`. Rejects configuration the processor
    /// cannot honor: a context keyword on a non-probe, or a parameter the
    /// processor does not declare.
    pub fn new(
        index: usize,
        config: NodeConfig,
        processor: Processor,
    ) -> Result<Self, PipelineTopologyError> {
        let role = match processor.kind() {
            ProcessorKind::DataOperation => NodeRole::Operation,
            ProcessorKind::DataProbe if config.context_keyword.is_some() => NodeRole::ContextInjector,
            ProcessorKind::DataProbe => NodeRole::ResultCollector,
            ProcessorKind::ContextProcessor => NodeRole::ContextMutator,
            ProcessorKind::DataSource => NodeRole::Source,
            ProcessorKind::DataSink => NodeRole::Sink,
            ProcessorKind::PayloadSource => NodeRole::PayloadSource,
            ProcessorKind::PayloadSink => NodeRole::PayloadSink,
        };

        if config.context_keyword.is_some() && processor.kind() != ProcessorKind::DataProbe {
            return Err(PipelineTopologyError::ContextKeywordOnNonProbe {
                index,
                processor: processor.name().to_string(),
            });
        }

        let parameters = processor.parameters();
        if let Some(unknown) = config
            .parameters
            .keys()
            .find(|name| !parameters.iter().any(|spec| &spec.name == *name))
        {
            return Err(PipelineTopologyError::UnknownParameter {
                index,
                processor: processor.name().to_string(),
                parameter: unknown.clone(),
            });
        }

        Ok(Self {
            index,
            label: format!("Node {}/{}", index, processor.name()),
            processor,
            config,
            role,
            parameters,
        })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// `"Node <i>/<ProcessorName>"`
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn processor(&self) -> &Processor {
        &self.processor
    }

    pub fn processor_name(&self) -> &str {
        self.processor.name()
    }

    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    pub fn role(&self) -> NodeRole {
        self.role
    }

    pub fn kind(&self) -> ProcessorKind {
        self.processor.kind()
    }

    pub fn input_type(&self) -> DataType {
        self.processor.input_type()
    }

    pub fn output_type(&self) -> DataType {
        self.processor.output_type()
    }

    pub fn parameter_specs(&self) -> &[ParameterSpec] {
        &self.parameters
    }

    /// Context keys this node cannot run without: parameters with neither a
    /// configured value nor a default, plus keys a context processor reads
    /// directly.
    pub fn required_context_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .parameters
            .iter()
            .filter(|spec| spec.is_required() && !self.config.parameters.contains_key(&spec.name))
            .map(|spec| spec.name.clone())
            .collect();
        if let Processor::ContextProcessor(p) = &self.processor {
            for key in p.required_keys() {
                if !keys.contains(&key) {
                    keys.push(key);
                }
            }
        }
        keys
    }

    /// Unconfigured parameters the context may override but a default covers.
    pub fn optional_context_keys(&self) -> Vec<String> {
        self.parameters
            .iter()
            .filter(|spec| !spec.is_required() && !self.config.parameters.contains_key(&spec.name))
            .map(|spec| spec.name.clone())
            .collect()
    }

    /// Keys this node is statically known to create.
    pub fn created_keys(&self) -> Vec<String> {
        match (&self.processor, &self.config.context_keyword) {
            (Processor::ContextProcessor(p), _) => p.created_keys(),
            (Processor::DataProbe(_), Some(keyword)) => vec![keyword.clone()],
            _ => Vec::new(),
        }
    }

    /// Keys this node is statically known to delete.
    pub fn suppressed_keys(&self) -> Vec<String> {
        match &self.processor {
            Processor::ContextProcessor(p) => p.suppressed_keys(),
            _ => Vec::new(),
        }
    }

    /// Resolve every declared parameter: configuration, then context, then
    /// default.
    pub fn resolve_parameters(
        &self,
        context: &Context,
        origins: &KeyOrigins,
    ) -> Result<(Parameters, BTreeMap<String, ParameterSource>), PipelineError> {
        let mut params = Parameters::new();
        let mut provenance = BTreeMap::new();

        for spec in &self.parameters {
            let (value, source) = if let Some(value) = self.config.parameters.get(&spec.name) {
                (value.clone(), ParameterSource::Config)
            } else if let Some(value) = context.get(&spec.name) {
                let origin = origins.origin(&spec.name).flatten();
                (value.clone(), ParameterSource::Context { origin })
            } else if let Some(default) = &spec.default {
                (default.clone(), ParameterSource::Default)
            } else {
                return Err(PipelineError::MissingParameter {
                    index: self.index,
                    processor: self.processor_name().to_string(),
                    parameter: spec.name.clone(),
                });
            };
            params.insert(spec.name.clone(), value);
            provenance.insert(spec.name.clone(), source);
        }

        Ok((params, provenance))
    }

    /// Run the node on `payload`, updating `origins` with every key it
    /// creates or deletes.
    pub fn execute(
        &self,
        mut payload: Payload,
        origins: &mut KeyOrigins,
    ) -> Result<NodeOutcome, PipelineError> {
        if self.kind().reads_data() && !self.input_type().accepts(payload.data.data_type()) {
            return Err(PipelineError::TypeMismatch {
                index: self.index,
                processor: self.processor_name().to_string(),
                expected: self.input_type(),
                actual: payload.data.data_type(),
            });
        }

        let (params, parameters) = self.resolve_parameters(&payload.context, origins)?;
        let mut probe_value = None;

        match &self.processor {
            Processor::DataOperation(op) => {
                payload.data = op.process(&payload.data, &params).map_err(|e| self.failed(e))?;
            }
            Processor::DataProbe(probe) => {
                let value = probe.probe(&payload.data, &params).map_err(|e| self.failed(e))?;
                if let Some(keyword) = &self.config.context_keyword {
                    payload.context.set(keyword.as_str(), value.clone());
                    origins.record(keyword.as_str(), self.index);
                }
                probe_value = Some(value);
            }
            Processor::ContextProcessor(p) => {
                let mut observer = ContextObserver::new(
                    &mut payload.context,
                    p.name(),
                    p.created_keys(),
                    p.suppressed_keys(),
                );
                p.process_context(&mut observer, &params)
                    .map_err(|e| self.failed(e))?;
                let changes = observer.finish();
                for key in &changes.deleted {
                    origins.forget(key);
                }
                for key in changes.created {
                    origins.record(key, self.index);
                }
            }
            Processor::DataSource(source) => {
                payload.data = source.produce(&params).map_err(|e| self.failed(e))?;
            }
            Processor::DataSink(sink) => {
                sink.consume(&payload.data, &params).map_err(|e| self.failed(e))?;
            }
            Processor::PayloadSource(source) => {
                let produced = source.produce_payload(&params).map_err(|e| self.failed(e))?;
                payload.data = produced.data;
                for (key, value) in produced.context {
                    origins.record(key.as_str(), self.index);
                    payload.context.set(key, value);
                }
            }
            Processor::PayloadSink(sink) => {
                sink.consume_payload(&payload, &params)
                    .map_err(|e| self.failed(e))?;
            }
        }

        Ok(NodeOutcome {
            payload,
            probe_value,
            parameters,
        })
    }

    /// Sources replace the data and context processors never look at it.
    fn failed(&self, source: ProcessorError) -> PipelineError {
        PipelineError::Processor {
            index: self.index,
            processor: self.processor_name().to_string(),
            source,
        }
    }
}
