// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors raised by typed data construction and context manipulation.

use thiserror::Error;

use crate::data::DataType;

/// A [`TypedData`](crate::data::TypedData) value failed its own invariant.
///
/// Always fatal to the construction call that produced it; never retried.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{data_type} value must be finite, got {value}")]
    NonFinite { data_type: DataType, value: f64 },

    #[error("{data_type} element {index} must be finite, got {value}")]
    NonFiniteElement {
        data_type: DataType,
        index: usize,
        value: f64,
    },

    #[error("record field names must not be empty")]
    EmptyRecordField,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ContextError {
    #[error("context key '{0}' does not exist")]
    MissingKey(String),
}
