// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::data::{DataType, TypedData};
use crate::engine::Parameters;
use crate::errors::ProcessorError;
use crate::traits::{DataOperation, ParameterSpec, ProcessorInfo};

fn text_input<'a>(processor: &str, data: &'a TypedData) -> Result<&'a str, ProcessorError> {
    data.as_text().ok_or_else(|| {
        ProcessorError::Failed(format!("{} expects Text data, got {}", processor, data.data_type()))
    })
}

/// Changes text case: `upper`, `lower`, `proper` or `title`.
pub struct ChangeTextCase;

impl ChangeTextCase {
    fn capitalize(word: &str) -> String {
        let mut chars = word.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
            None => String::new(),
        }
    }
}

impl ProcessorInfo for ChangeTextCase {
    fn name(&self) -> &str {
        "change_text_case"
    }

    fn parameters(&self) -> Vec<ParameterSpec> {
        vec![ParameterSpec::optional("case", "upper")]
    }
}

impl DataOperation for ChangeTextCase {
    fn input_type(&self) -> DataType {
        DataType::Text
    }

    fn output_type(&self) -> DataType {
        DataType::Text
    }

    fn process(&self, data: &TypedData, params: &Parameters) -> Result<TypedData, ProcessorError> {
        let input = text_input(self.name(), data)?;
        let output = match params.str("case")? {
            "upper" => input.to_uppercase(),
            "lower" => input.to_lowercase(),
            "proper" | "title" => input
                .split(' ')
                .map(Self::capitalize)
                .collect::<Vec<_>>()
                .join(" "),
            other => {
                return Err(ProcessorError::InvalidParameter {
                    name: "case".to_string(),
                    expected: "one of upper, lower, proper, title",
                    actual: other.to_string(),
                })
            }
        };
        Ok(TypedData::text(output))
    }
}

/// Wraps text in `prefix` and `suffix`.
pub struct PrefixSuffixAdder;

impl ProcessorInfo for PrefixSuffixAdder {
    fn name(&self) -> &str {
        "prefix_suffix_adder"
    }

    fn parameters(&self) -> Vec<ParameterSpec> {
        vec![
            ParameterSpec::optional("prefix", ""),
            ParameterSpec::optional("suffix", ""),
        ]
    }
}

impl DataOperation for PrefixSuffixAdder {
    fn input_type(&self) -> DataType {
        DataType::Text
    }

    fn output_type(&self) -> DataType {
        DataType::Text
    }

    fn process(&self, data: &TypedData, params: &Parameters) -> Result<TypedData, ProcessorError> {
        let input = text_input(self.name(), data)?;
        let mut result = String::with_capacity(input.len());
        result.push_str(params.str("prefix")?);
        result.push_str(input);
        result.push_str(params.str("suffix")?);
        Ok(TypedData::text(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_change_text_case_table() {
        let cases = vec![
            ("upper", "hello", "HELLO"),
            ("lower", "HELLO", "hello"),
            ("proper", "hello world", "Hello World"),
            ("title", "the quICK fox", "The Quick Fox"),
        ];

        for (case, input, expected) in cases {
            let params: Parameters = [("case".to_string(), json!(case))].into_iter().collect();
            let output = ChangeTextCase.process(&TypedData::text(input), &params).unwrap();
            assert_eq!(output.as_text(), Some(expected), "case: {}", case);
        }
    }

    #[test]
    fn test_prefix_suffix() {
        let params: Parameters = [
            ("prefix".to_string(), json!("[")),
            ("suffix".to_string(), json!("]")),
        ]
        .into_iter()
        .collect();
        let output = PrefixSuffixAdder.process(&TypedData::text("x"), &params).unwrap();
        assert_eq!(output.as_text(), Some("[x]"));
    }
}
