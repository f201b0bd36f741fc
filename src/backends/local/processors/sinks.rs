// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use super::float_input;
use crate::data::{DataType, Payload, TypedData};
use crate::engine::Parameters;
use crate::errors::ProcessorError;
use crate::traits::{DataSink, ParameterSpec, PayloadSink, ProcessorInfo};

/// Logs each float it sees at `info` level.
pub struct FloatLogSink;

impl ProcessorInfo for FloatLogSink {
    fn name(&self) -> &str {
        "float_log_sink"
    }

    fn parameters(&self) -> Vec<ParameterSpec> {
        vec![ParameterSpec::optional("label", "value")]
    }
}

impl DataSink for FloatLogSink {
    fn input_type(&self) -> DataType {
        DataType::Float
    }

    fn consume(&self, data: &TypedData, params: &Parameters) -> Result<(), ProcessorError> {
        let value = float_input(self.name(), data)?;
        tracing::info!(label = params.str("label")?, value, "float sink");
        Ok(())
    }
}

/// Logs the data type and context keys of any payload.
pub struct PayloadLogSink;

impl ProcessorInfo for PayloadLogSink {
    fn name(&self) -> &str {
        "payload_log_sink"
    }
}

impl PayloadSink for PayloadLogSink {
    fn input_type(&self) -> DataType {
        DataType::Any
    }

    fn consume_payload(&self, payload: &Payload, _params: &Parameters) -> Result<(), ProcessorError> {
        let keys: Vec<String> = payload.context.keys().into_iter().collect();
        tracing::info!(
            data_type = payload.data.data_type().as_str(),
            context_keys = ?keys,
            "payload sink"
        );
        Ok(())
    }
}
