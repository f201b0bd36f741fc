// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Processor capability set.
//!
//! Every unit of computation is one of seven variants, each with its own trait:
//!
//! | Variant            | Consumes        | Produces                         |
//! |--------------------|-----------------|----------------------------------|
//! | [`DataOperation`]  | data            | new data                         |
//! | [`DataProbe`]      | data            | a JSON value, data passes through|
//! | [`ContextProcessor`]| context        | context mutations                |
//! | [`DataSource`]     | nothing         | data                             |
//! | [`DataSink`]       | data            | side effect, data passes through |
//! | [`PayloadSource`]  | nothing         | data and context entries         |
//! | [`PayloadSink`]    | payload         | side effect, payload passes through |
//!
//! Parameter names and defaults are declared up front through
//! [`ProcessorInfo::parameters`], so the pipeline can decide per parameter
//! whether a value comes from node configuration, the context, or a default.

use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use crate::data::{ContextObserver, DataType, Payload, TypedData};
use crate::engine::Parameters;
use crate::errors::ProcessorError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessorKind {
    DataOperation,
    DataProbe,
    ContextProcessor,
    DataSource,
    DataSink,
    PayloadSource,
    PayloadSink,
}

impl ProcessorKind {
    /// Whether a node of this kind reads the incoming data. Sources and
    /// context mutators don't, so the adjacency and runtime type checks
    /// skip them.
    pub fn reads_data(self) -> bool {
        !matches!(
            self,
            ProcessorKind::ContextProcessor | ProcessorKind::DataSource | ProcessorKind::PayloadSource
        )
    }
}

/// One declared processing parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSpec {
    pub name: String,
    pub default: Option<Value>,
}

impl ParameterSpec {
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: None,
        }
    }

    pub fn optional(name: impl Into<String>, default: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            default: Some(default.into()),
        }
    }

    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }
}

/// Metadata shared by all processor variants.
pub trait ProcessorInfo: Send + Sync {
    fn name(&self) -> &str;

    fn parameters(&self) -> Vec<ParameterSpec> {
        Vec::new()
    }
}

pub trait DataOperation: ProcessorInfo {
    fn input_type(&self) -> DataType;
    fn output_type(&self) -> DataType;
    fn process(&self, data: &TypedData, params: &Parameters) -> Result<TypedData, ProcessorError>;
}

pub trait DataProbe: ProcessorInfo {
    fn input_type(&self) -> DataType;
    fn probe(&self, data: &TypedData, params: &Parameters) -> Result<Value, ProcessorError>;
}

pub trait ContextProcessor: ProcessorInfo {
    /// Keys read straight from the context, outside the parameter mechanism.
    fn required_keys(&self) -> Vec<String> {
        Vec::new()
    }

    fn created_keys(&self) -> Vec<String> {
        Vec::new()
    }

    fn suppressed_keys(&self) -> Vec<String> {
        Vec::new()
    }

    fn process_context(
        &self,
        context: &mut ContextObserver<'_>,
        params: &Parameters,
    ) -> Result<(), ProcessorError>;
}

pub trait DataSource: ProcessorInfo {
    fn output_type(&self) -> DataType;
    fn produce(&self, params: &Parameters) -> Result<TypedData, ProcessorError>;
}

pub trait DataSink: ProcessorInfo {
    fn input_type(&self) -> DataType;
    fn consume(&self, data: &TypedData, params: &Parameters) -> Result<(), ProcessorError>;
}

pub trait PayloadSource: ProcessorInfo {
    fn output_type(&self) -> DataType;
    fn produce_payload(&self, params: &Parameters) -> Result<Payload, ProcessorError>;
}

pub trait PayloadSink: ProcessorInfo {
    fn input_type(&self) -> DataType;
    fn consume_payload(&self, payload: &Payload, params: &Parameters) -> Result<(), ProcessorError>;
}

/// A processor instance, tagged with its variant.
#[derive(Clone)]
pub enum Processor {
    DataOperation(Arc<dyn DataOperation>),
    DataProbe(Arc<dyn DataProbe>),
    ContextProcessor(Arc<dyn ContextProcessor>),
    DataSource(Arc<dyn DataSource>),
    DataSink(Arc<dyn DataSink>),
    PayloadSource(Arc<dyn PayloadSource>),
    PayloadSink(Arc<dyn PayloadSink>),
}

impl Processor {
    pub fn operation(op: impl DataOperation + 'static) -> Self {
        Processor::DataOperation(Arc::new(op))
    }

    pub fn probe(probe: impl DataProbe + 'static) -> Self {
        Processor::DataProbe(Arc::new(probe))
    }

    pub fn context(processor: impl ContextProcessor + 'static) -> Self {
        Processor::ContextProcessor(Arc::new(processor))
    }

    pub fn source(source: impl DataSource + 'static) -> Self {
        Processor::DataSource(Arc::new(source))
    }

    pub fn sink(sink: impl DataSink + 'static) -> Self {
        Processor::DataSink(Arc::new(sink))
    }

    pub fn payload_source(source: impl PayloadSource + 'static) -> Self {
        Processor::PayloadSource(Arc::new(source))
    }

    pub fn payload_sink(sink: impl PayloadSink + 'static) -> Self {
        Processor::PayloadSink(Arc::new(sink))
    }

    pub fn kind(&self) -> ProcessorKind {
        match self {
            Processor::DataOperation(_) => ProcessorKind::DataOperation,
            Processor::DataProbe(_) => ProcessorKind::DataProbe,
            Processor::ContextProcessor(_) => ProcessorKind::ContextProcessor,
            Processor::DataSource(_) => ProcessorKind::DataSource,
            Processor::DataSink(_) => ProcessorKind::DataSink,
            Processor::PayloadSource(_) => ProcessorKind::PayloadSource,
            Processor::PayloadSink(_) => ProcessorKind::PayloadSink,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Processor::DataOperation(p) => p.name(),
            Processor::DataProbe(p) => p.name(),
            Processor::ContextProcessor(p) => p.name(),
            Processor::DataSource(p) => p.name(),
            Processor::DataSink(p) => p.name(),
            Processor::PayloadSource(p) => p.name(),
            Processor::PayloadSink(p) => p.name(),
        }
    }

    pub fn parameters(&self) -> Vec<ParameterSpec> {
        match self {
            Processor::DataOperation(p) => p.parameters(),
            Processor::DataProbe(p) => p.parameters(),
            Processor::ContextProcessor(p) => p.parameters(),
            Processor::DataSource(p) => p.parameters(),
            Processor::DataSink(p) => p.parameters(),
            Processor::PayloadSource(p) => p.parameters(),
            Processor::PayloadSink(p) => p.parameters(),
        }
    }

    /// Type of the data a node wrapping this processor accepts.
    ///
    /// Sources start from [`DataType::Empty`]; context processors never look at data.
    pub fn input_type(&self) -> DataType {
        match self {
            Processor::DataOperation(p) => p.input_type(),
            Processor::DataProbe(p) => p.input_type(),
            Processor::ContextProcessor(_) => DataType::Any,
            Processor::DataSource(_) | Processor::PayloadSource(_) => DataType::Empty,
            Processor::DataSink(p) => p.input_type(),
            Processor::PayloadSink(p) => p.input_type(),
        }
    }

    /// Type of the data leaving the node. Probes and sinks pass their input through.
    pub fn output_type(&self) -> DataType {
        match self {
            Processor::DataOperation(p) => p.output_type(),
            Processor::DataSource(p) => p.output_type(),
            Processor::PayloadSource(p) => p.output_type(),
            Processor::DataProbe(_)
            | Processor::ContextProcessor(_)
            | Processor::DataSink(_)
            | Processor::PayloadSink(_) => self.input_type(),
        }
    }
}

impl fmt::Debug for Processor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Processor")
            .field("kind", &self.kind())
            .field("name", &self.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_data_by_kind() {
        struct TestCase {
            kind: ProcessorKind,
            reads_data: bool,
        }

        let test_cases = vec![
            TestCase { kind: ProcessorKind::DataOperation, reads_data: true },
            TestCase { kind: ProcessorKind::DataProbe, reads_data: true },
            TestCase { kind: ProcessorKind::ContextProcessor, reads_data: false },
            TestCase { kind: ProcessorKind::DataSource, reads_data: false },
            TestCase { kind: ProcessorKind::DataSink, reads_data: true },
            TestCase { kind: ProcessorKind::PayloadSource, reads_data: false },
            TestCase { kind: ProcessorKind::PayloadSink, reads_data: true },
        ];

        for case in test_cases {
            assert_eq!(case.kind.reads_data(), case.reads_data, "kind: {:?}", case.kind);
        }
    }
}
