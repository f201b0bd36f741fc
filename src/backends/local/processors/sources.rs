// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::data::{Context, DataType, Payload, TypedData};
use crate::engine::Parameters;
use crate::errors::ProcessorError;
use crate::traits::{DataSource, ParameterSpec, PayloadSource, ProcessorInfo};

/// Emits a constant float.
pub struct FloatSource;

impl ProcessorInfo for FloatSource {
    fn name(&self) -> &str {
        "float_source"
    }

    fn parameters(&self) -> Vec<ParameterSpec> {
        vec![ParameterSpec::optional("value", 0.0)]
    }
}

impl DataSource for FloatSource {
    fn output_type(&self) -> DataType {
        DataType::Float
    }

    fn produce(&self, params: &Parameters) -> Result<TypedData, ProcessorError> {
        Ok(TypedData::float(params.f64("value")?)?)
    }
}

/// Emits a float together with a context entry naming where it came from.
pub struct FloatPayloadSource;

impl ProcessorInfo for FloatPayloadSource {
    fn name(&self) -> &str {
        "float_payload_source"
    }

    fn parameters(&self) -> Vec<ParameterSpec> {
        vec![
            ParameterSpec::required("value"),
            ParameterSpec::optional("origin_key", "origin"),
        ]
    }
}

impl PayloadSource for FloatPayloadSource {
    fn output_type(&self) -> DataType {
        DataType::Float
    }

    fn produce_payload(&self, params: &Parameters) -> Result<Payload, ProcessorError> {
        let data = TypedData::float(params.f64("value")?)?;
        let mut context = Context::new();
        context.set(params.str("origin_key")?, self.name());
        Ok(Payload::new(data, context))
    }
}
