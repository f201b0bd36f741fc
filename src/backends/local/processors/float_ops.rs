// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use super::float_input;
use crate::data::{DataType, TypedData};
use crate::engine::Parameters;
use crate::errors::ProcessorError;
use crate::traits::{DataOperation, ParameterSpec, ProcessorInfo};

/// Multiplies a float by `factor`.
pub struct FloatMultiply;

impl ProcessorInfo for FloatMultiply {
    fn name(&self) -> &str {
        "float_multiply"
    }

    fn parameters(&self) -> Vec<ParameterSpec> {
        vec![ParameterSpec::required("factor")]
    }
}

impl DataOperation for FloatMultiply {
    fn input_type(&self) -> DataType {
        DataType::Float
    }

    fn output_type(&self) -> DataType {
        DataType::Float
    }

    fn process(&self, data: &TypedData, params: &Parameters) -> Result<TypedData, ProcessorError> {
        let value = float_input(self.name(), data)?;
        Ok(TypedData::float(value * params.f64("factor")?)?)
    }
}

/// Adds `addend` to a float.
pub struct FloatAdd;

impl ProcessorInfo for FloatAdd {
    fn name(&self) -> &str {
        "float_add"
    }

    fn parameters(&self) -> Vec<ParameterSpec> {
        vec![ParameterSpec::required("addend")]
    }
}

impl DataOperation for FloatAdd {
    fn input_type(&self) -> DataType {
        DataType::Float
    }

    fn output_type(&self) -> DataType {
        DataType::Float
    }

    fn process(&self, data: &TypedData, params: &Parameters) -> Result<TypedData, ProcessorError> {
        let value = float_input(self.name(), data)?;
        Ok(TypedData::float(value + params.f64("addend")?)?)
    }
}

/// Divides a float by `divisor`; a zero divisor is a processor failure.
pub struct FloatDivide;

impl ProcessorInfo for FloatDivide {
    fn name(&self) -> &str {
        "float_divide"
    }

    fn parameters(&self) -> Vec<ParameterSpec> {
        vec![ParameterSpec::required("divisor")]
    }
}

impl DataOperation for FloatDivide {
    fn input_type(&self) -> DataType {
        DataType::Float
    }

    fn output_type(&self) -> DataType {
        DataType::Float
    }

    fn process(&self, data: &TypedData, params: &Parameters) -> Result<TypedData, ProcessorError> {
        let value = float_input(self.name(), data)?;
        let divisor = params.f64("divisor")?;
        if divisor == 0.0 {
            return Err(ProcessorError::Failed("division by zero".to_string()));
        }
        Ok(TypedData::float(value / divisor)?)
    }
}

/// Upper bound on `float_to_text` precision.
pub const MAX_PRECISION: u64 = 64;

/// Formats a float as text with `precision` decimal places.
pub struct FloatToText;

impl ProcessorInfo for FloatToText {
    fn name(&self) -> &str {
        "float_to_text"
    }

    fn parameters(&self) -> Vec<ParameterSpec> {
        vec![ParameterSpec::optional("precision", 3)]
    }
}

impl DataOperation for FloatToText {
    fn input_type(&self) -> DataType {
        DataType::Float
    }

    fn output_type(&self) -> DataType {
        DataType::Text
    }

    fn process(&self, data: &TypedData, params: &Parameters) -> Result<TypedData, ProcessorError> {
        let value = float_input(self.name(), data)?;
        let precision = params.u64("precision")?;
        if precision > MAX_PRECISION {
            return Err(ProcessorError::InvalidParameter {
                name: "precision".to_string(),
                expected: "integer in 0..=64",
                actual: precision.to_string(),
            });
        }
        Ok(TypedData::text(format!("{:.*}", precision as usize, value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(pairs: &[(&str, serde_json::Value)]) -> Parameters {
        pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
    }

    #[test]
    fn test_float_operations() {
        let seven = TypedData::float(7.0).unwrap();

        let doubled = FloatMultiply.process(&seven, &params(&[("factor", json!(2))])).unwrap();
        assert_eq!(doubled.as_float(), Some(14.0));

        let added = FloatAdd.process(&seven, &params(&[("addend", json!(0.5))])).unwrap();
        assert_eq!(added.as_float(), Some(7.5));

        let halved = FloatDivide.process(&seven, &params(&[("divisor", json!(2.0))])).unwrap();
        assert_eq!(halved.as_float(), Some(3.5));

        let text = FloatToText.process(&seven, &params(&[("precision", json!(1))])).unwrap();
        assert_eq!(text.as_text(), Some("7.0"));
    }

    #[test]
    fn test_divide_by_zero_fails() {
        let err = FloatDivide
            .process(&TypedData::float(1.0).unwrap(), &params(&[("divisor", json!(0))]))
            .unwrap_err();
        assert_eq!(err, ProcessorError::Failed("division by zero".to_string()));
    }

    #[test]
    fn test_overflow_surfaces_validation_error() {
        let err = FloatMultiply
            .process(&TypedData::float(f64::MAX).unwrap(), &params(&[("factor", json!(10.0))]))
            .unwrap_err();
        assert!(matches!(err, ProcessorError::Validation(_)));
    }

    #[test]
    fn test_wrong_parameter_type() {
        let err = FloatMultiply
            .process(&TypedData::float(1.0).unwrap(), &params(&[("factor", json!("two"))]))
            .unwrap_err();
        assert!(matches!(err, ProcessorError::InvalidParameter { .. }));
    }

    #[test]
    fn test_precision_bounds() {
        let one = TypedData::float(1.0).unwrap();

        let widest = FloatToText
            .process(&one, &params(&[("precision", json!(MAX_PRECISION))]))
            .unwrap();
        assert_eq!(widest.as_text().map(str::len), Some(2 + MAX_PRECISION as usize));

        for precision in [json!(MAX_PRECISION + 1), json!(70_000), json!(u64::MAX)] {
            let err = FloatToText
                .process(&one, &params(&[("precision", precision.clone())]))
                .unwrap_err();
            assert!(
                matches!(err, ProcessorError::InvalidParameter { ref name, .. } if name == "precision"),
                "precision {} gave {:?}",
                precision,
                err
            );
        }
    }
}
