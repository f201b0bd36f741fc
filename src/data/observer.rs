// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde_json::Value;
use std::collections::HashSet;

use super::Context;
use crate::errors::ProcessorError;

/// Keys a context processor actually created and deleted during one call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContextChanges {
    pub created: Vec<String>,
    pub deleted: Vec<String>,
}

/// Write gate handed to context processors.
///
/// Reads are unrestricted. Writes must target a key the processor lists in
/// `created_keys`, deletions a key it lists in `suppressed_keys`.
pub struct ContextObserver<'a> {
    context: &'a mut Context,
    processor: &'a str,
    writable: HashSet<String>,
    deletable: HashSet<String>,
    changes: ContextChanges,
}

impl<'a> ContextObserver<'a> {
    pub fn new(
        context: &'a mut Context,
        processor: &'a str,
        created_keys: Vec<String>,
        suppressed_keys: Vec<String>,
    ) -> Self {
        Self {
            context,
            processor,
            writable: created_keys.into_iter().collect(),
            deletable: suppressed_keys.into_iter().collect(),
            changes: ContextChanges::default(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.context.get(key)
    }

    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> Result<(), ProcessorError> {
        self.check(&self.writable, key)?;
        self.context.set(key, value);
        self.record_created(key);
        Ok(())
    }

    pub fn delete(&mut self, key: &str) -> Result<Option<Value>, ProcessorError> {
        self.check(&self.deletable, key)?;
        let removed = self.context.delete(key);
        self.record_deleted(key);
        Ok(removed)
    }

    pub fn rename(&mut self, old: &str, new: &str) -> Result<(), ProcessorError> {
        self.check(&self.deletable, old)?;
        self.check(&self.writable, new)?;
        self.context.rename(old, new)?;
        self.record_deleted(old);
        self.record_created(new);
        Ok(())
    }

    pub fn finish(self) -> ContextChanges {
        self.changes
    }

    fn check(&self, allowed: &HashSet<String>, key: &str) -> Result<(), ProcessorError> {
        if allowed.contains(key) {
            Ok(())
        } else {
            Err(ProcessorError::UndeclaredContextKey {
                processor: self.processor.to_string(),
                key: key.to_string(),
            })
        }
    }

    fn record_created(&mut self, key: &str) {
        self.changes.deleted.retain(|k| k != key);
        if !self.changes.created.iter().any(|k| k == key) {
            self.changes.created.push(key.to_string());
        }
    }

    fn record_deleted(&mut self, key: &str) {
        self.changes.created.retain(|k| k != key);
        if !self.changes.deleted.iter().any(|k| k == key) {
            self.changes.deleted.push(key.to_string());
        }
    }
}
