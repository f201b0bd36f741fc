// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::errors::ValidationError;

/// Runtime type tag carried by every [`TypedData`] and declared by every processor.
///
/// `Any` is only meaningful as a declaration: a node whose input is `Any`
/// accepts every value, and an `Any` output defers the adjacency check to run time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    Any,
    Empty,
    Float,
    Integer,
    Text,
    FloatVector,
    Record,
}

impl DataType {
    /// Whether a value tagged `actual` may be fed into something declaring `self`.
    pub fn accepts(self, actual: DataType) -> bool {
        self == DataType::Any || self == actual
    }

    /// Static adjacency rule used at pipeline construction.
    pub fn compatible_with(self, next_input: DataType) -> bool {
        next_input == DataType::Any || self == DataType::Any || self == next_input
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DataType::Any => "Any",
            DataType::Empty => "Empty",
            DataType::Float => "Float",
            DataType::Integer => "Integer",
            DataType::Text => "Text",
            DataType::FloatVector => "FloatVector",
            DataType::Record => "Record",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw data value. Use [`TypedData`] to obtain a validated instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Data {
    Empty,
    Float(f64),
    Integer(i64),
    Text(String),
    FloatVector(Vec<f64>),
    Record(Map<String, Value>),
}

impl Data {
    pub fn data_type(&self) -> DataType {
        match self {
            Data::Empty => DataType::Empty,
            Data::Float(_) => DataType::Float,
            Data::Integer(_) => DataType::Integer,
            Data::Text(_) => DataType::Text,
            Data::FloatVector(_) => DataType::FloatVector,
            Data::Record(_) => DataType::Record,
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Data::Float(value) if !value.is_finite() => Err(ValidationError::NonFinite {
                data_type: DataType::Float,
                value: *value,
            }),
            Data::FloatVector(values) => {
                match values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
                    Some((index, value)) => Err(ValidationError::NonFiniteElement {
                        data_type: DataType::FloatVector,
                        index,
                        value: *value,
                    }),
                    None => Ok(()),
                }
            }
            Data::Record(fields) if fields.keys().any(|k| k.is_empty()) => {
                Err(ValidationError::EmptyRecordField)
            }
            _ => Ok(()),
        }
    }
}

/// A data value that passed validation on construction.
///
/// Deserialization goes through the same check, so a payload received over a
/// transport is as trustworthy as one built locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Data", into = "Data")]
pub struct TypedData(Data);

impl TypedData {
    pub fn new(data: Data) -> Result<Self, ValidationError> {
        data.validate()?;
        Ok(Self(data))
    }

    pub fn empty() -> Self {
        Self(Data::Empty)
    }

    pub fn float(value: f64) -> Result<Self, ValidationError> {
        Self::new(Data::Float(value))
    }

    pub fn integer(value: i64) -> Self {
        Self(Data::Integer(value))
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self(Data::Text(value.into()))
    }

    pub fn float_vector(values: Vec<f64>) -> Result<Self, ValidationError> {
        Self::new(Data::FloatVector(values))
    }

    pub fn data_type(&self) -> DataType {
        self.0.data_type()
    }

    pub fn value(&self) -> &Data {
        &self.0
    }

    pub fn into_inner(self) -> Data {
        self.0
    }

    pub fn as_float(&self) -> Option<f64> {
        match self.0 {
            Data::Float(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match &self.0 {
            Data::Text(value) => Some(value),
            _ => None,
        }
    }

    /// Plain JSON rendering of the value, without the type tag.
    pub fn to_json(&self) -> Value {
        match &self.0 {
            Data::Empty => Value::Null,
            Data::Float(v) => Value::from(*v),
            Data::Integer(v) => Value::from(*v),
            Data::Text(v) => Value::from(v.as_str()),
            Data::FloatVector(v) => Value::from(v.clone()),
            Data::Record(v) => Value::Object(v.clone()),
        }
    }
}

impl Default for TypedData {
    fn default() -> Self {
        Self::empty()
    }
}

impl TryFrom<Data> for TypedData {
    type Error = ValidationError;

    fn try_from(data: Data) -> Result<Self, Self::Error> {
        Self::new(data)
    }
}

impl From<TypedData> for Data {
    fn from(data: TypedData) -> Self {
        data.0
    }
}
