// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde_json::Value;

use super::float_input;
use crate::data::{DataType, TypedData};
use crate::engine::Parameters;
use crate::errors::ProcessorError;
use crate::traits::{DataProbe, ProcessorInfo};

/// Reports the float value itself.
pub struct FloatValueProbe;

impl ProcessorInfo for FloatValueProbe {
    fn name(&self) -> &str {
        "float_value_probe"
    }
}

impl DataProbe for FloatValueProbe {
    fn input_type(&self) -> DataType {
        DataType::Float
    }

    fn probe(&self, data: &TypedData, _params: &Parameters) -> Result<Value, ProcessorError> {
        Ok(Value::from(float_input(self.name(), data)?))
    }
}

/// Reports the runtime type tag of any value.
pub struct DataTypeProbe;

impl ProcessorInfo for DataTypeProbe {
    fn name(&self) -> &str {
        "data_type_probe"
    }
}

impl DataProbe for DataTypeProbe {
    fn input_type(&self) -> DataType {
        DataType::Any
    }

    fn probe(&self, data: &TypedData, _params: &Parameters) -> Result<Value, ProcessorError> {
        Ok(Value::from(data.data_type().as_str()))
    }
}
