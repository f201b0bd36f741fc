// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Resolved processor arguments and where each one came from.

use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

use crate::data::Context;
use crate::errors::ProcessorError;

/// Arguments handed to one processor call, already resolved from node
/// configuration, context or defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parameters {
    values: BTreeMap<String, Value>,
}

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.values.insert(name.into(), value)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn value(&self, name: &str) -> Result<&Value, ProcessorError> {
        self.values
            .get(name)
            .ok_or_else(|| ProcessorError::MissingParameter {
                name: name.to_string(),
            })
    }

    pub fn f64(&self, name: &str) -> Result<f64, ProcessorError> {
        let value = self.value(name)?;
        value.as_f64().ok_or_else(|| invalid(name, "a number", value))
    }

    pub fn i64(&self, name: &str) -> Result<i64, ProcessorError> {
        let value = self.value(name)?;
        value.as_i64().ok_or_else(|| invalid(name, "an integer", value))
    }

    pub fn u64(&self, name: &str) -> Result<u64, ProcessorError> {
        let value = self.value(name)?;
        value
            .as_u64()
            .ok_or_else(|| invalid(name, "a non-negative integer", value))
    }

    pub fn str(&self, name: &str) -> Result<&str, ProcessorError> {
        let value = self.value(name)?;
        value.as_str().ok_or_else(|| invalid(name, "a string", value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }
}

fn invalid(name: &str, expected: &'static str, actual: &Value) -> ProcessorError {
    ProcessorError::InvalidParameter {
        name: name.to_string(),
        expected,
        actual: actual.to_string(),
    }
}

impl FromIterator<(String, Value)> for Parameters {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// Where a resolved parameter value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum ParameterSource {
    /// Explicit node configuration
    Config,
    /// A context key; `origin` is the node that last wrote it, `None` for the initial context
    Context { origin: Option<usize> },
    /// The processor's declared default
    Default,
}

/// Key-origin map for one pipeline run: which node most recently created
/// or injected each context key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyOrigins {
    origins: HashMap<String, Option<usize>>,
}

impl KeyOrigins {
    /// Every key already in `context` is attributed to the caller.
    pub fn from_context(context: &Context) -> Self {
        Self {
            origins: context.keys().into_iter().map(|key| (key, None)).collect(),
        }
    }

    /// Attribute `key` to node `index`, replacing any earlier producer.
    pub fn record(&mut self, key: impl Into<String>, index: usize) {
        self.origins.insert(key.into(), Some(index));
    }

    pub fn forget(&mut self, key: &str) {
        self.origins.remove(key);
    }

    /// `None` when the key is untracked, `Some(None)` for the initial context.
    pub fn origin(&self, key: &str) -> Option<Option<usize>> {
        self.origins.get(key).copied()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.origins.contains_key(key)
    }
}
