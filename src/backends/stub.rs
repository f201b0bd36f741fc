// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::{Arc, Mutex};

use crate::config::ProcessorRegistry;
use crate::data::{DataType, TypedData};
use crate::engine::Parameters;
use crate::errors::ProcessorError;
use crate::traits::{DataOperation, DataSink, ParameterSpec, Processor, ProcessorInfo};

/// An operation that always fails
pub struct FailingOperation;

impl ProcessorInfo for FailingOperation {
    fn name(&self) -> &str {
        "failing"
    }
}

impl DataOperation for FailingOperation {
    fn input_type(&self) -> DataType {
        DataType::Any
    }

    fn output_type(&self) -> DataType {
        DataType::Any
    }

    fn process(&self, _data: &TypedData, _params: &Parameters) -> Result<TypedData, ProcessorError> {
        Err(ProcessorError::Failed("simulated processor failure".to_string()))
    }
}

/// Declares a Float output but produces Text
pub struct WrongOutputOperation;

impl ProcessorInfo for WrongOutputOperation {
    fn name(&self) -> &str {
        "wrong_output"
    }
}

impl DataOperation for WrongOutputOperation {
    fn input_type(&self) -> DataType {
        DataType::Any
    }

    fn output_type(&self) -> DataType {
        DataType::Float
    }

    fn process(&self, _data: &TypedData, _params: &Parameters) -> Result<TypedData, ProcessorError> {
        Ok(TypedData::text("not a float"))
    }
}

pub struct PanickingOperation;

impl ProcessorInfo for PanickingOperation {
    fn name(&self) -> &str {
        "panicking"
    }
}

impl DataOperation for PanickingOperation {
    fn input_type(&self) -> DataType {
        DataType::Any
    }

    fn output_type(&self) -> DataType {
        DataType::Any
    }

    fn process(&self, _data: &TypedData, _params: &Parameters) -> Result<TypedData, ProcessorError> {
        panic!("simulated processor panic")
    }
}

/// Computes `value * gain + offset`; `gain` has no default, `offset` defaults to 1.0.
pub struct ParamEcho;

impl ProcessorInfo for ParamEcho {
    fn name(&self) -> &str {
        "param_echo"
    }

    fn parameters(&self) -> Vec<ParameterSpec> {
        vec![
            ParameterSpec::required("gain"),
            ParameterSpec::optional("offset", 1.0),
        ]
    }
}

impl DataOperation for ParamEcho {
    fn input_type(&self) -> DataType {
        DataType::Float
    }

    fn output_type(&self) -> DataType {
        DataType::Float
    }

    fn process(&self, data: &TypedData, params: &Parameters) -> Result<TypedData, ProcessorError> {
        let value = data.as_float().unwrap_or_default();
        Ok(TypedData::float(value * params.f64("gain")? + params.f64("offset")?)?)
    }
}

/// Records every float it consumes.
#[derive(Clone, Default)]
pub struct RecordingSink {
    pub seen: Arc<Mutex<Vec<f64>>>,
}

impl ProcessorInfo for RecordingSink {
    fn name(&self) -> &str {
        "recording_sink"
    }
}

impl DataSink for RecordingSink {
    fn input_type(&self) -> DataType {
        DataType::Float
    }

    fn consume(&self, data: &TypedData, _params: &Parameters) -> Result<(), ProcessorError> {
        if let Some(value) = data.as_float() {
            self.seen.lock().unwrap().push(value);
        }
        Ok(())
    }
}

/// Builtins plus every stub, with one shared [`RecordingSink`].
pub fn stub_registry() -> (ProcessorRegistry, RecordingSink) {
    let sink = RecordingSink::default();
    let mut registry = ProcessorRegistry::with_builtins();
    registry
        .register("failing", || Processor::operation(FailingOperation))
        .register("wrong_output", || Processor::operation(WrongOutputOperation))
        .register("panicking", || Processor::operation(PanickingOperation))
        .register("param_echo", || Processor::operation(ParamEcho));
    let shared = sink.clone();
    registry.register("recording_sink", move || Processor::sink(shared.clone()));
    (registry, sink)
}
