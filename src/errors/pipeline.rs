// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors for pipeline construction and pipeline runs.

use thiserror::Error;

use super::ProcessorError;
use crate::data::DataType;

/// Static incompatibility found while constructing a pipeline. A pipeline that
/// fails with one of these is never run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineTopologyError {
    #[error("node {index}: unknown processor reference '{reference}'")]
    UnknownProcessor { index: usize, reference: String },

    #[error("node {index}: malformed processor reference '{reference}': {reason}")]
    MalformedReference {
        index: usize,
        reference: String,
        reason: String,
    },

    #[error(
        "node {index} ({processor}) expects {expected} input but node {previous_index} ({previous}) produces {actual}"
    )]
    TypeMismatch {
        previous_index: usize,
        previous: String,
        index: usize,
        processor: String,
        expected: DataType,
        actual: DataType,
    },

    #[error(
        "node {index} ({processor}) requires context key '{key}' which node {deleted_by} ({deleter}) deletes; supply it in the node parameters"
    )]
    DeletedKeyRequired {
        index: usize,
        processor: String,
        key: String,
        deleted_by: usize,
        deleter: String,
    },

    #[error("node {index} ({processor}) sets a context_keyword but is not a probe")]
    ContextKeywordOnNonProbe { index: usize, processor: String },

    #[error("node {index} ({processor}) has no parameter named '{parameter}'")]
    UnknownParameter {
        index: usize,
        processor: String,
        parameter: String,
    },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Topology(#[from] PipelineTopologyError),

    #[error(
        "node {index} ({processor}): parameter '{parameter}' is not in the node parameters, the context, or the defaults"
    )]
    MissingParameter {
        index: usize,
        processor: String,
        parameter: String,
    },

    #[error("node {index} ({processor}) expects {expected} input but received {actual}")]
    TypeMismatch {
        index: usize,
        processor: String,
        expected: DataType,
        actual: DataType,
    },

    #[error("node {index} ({processor}) failed: {source}")]
    Processor {
        index: usize,
        processor: String,
        #[source]
        source: ProcessorError,
    },

    #[error("pipeline definition could not be loaded: {0}")]
    Load(String),

    #[error("pipeline task panicked: {0}")]
    TaskPanicked(String),
}
