// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Built-in context mutators behind the `rename:`, `delete:` and `template:`
//! reference shorthands.

use serde_json::Value;

use crate::data::ContextObserver;
use crate::engine::Parameters;
use crate::errors::{ContextError, ProcessorError, ReferenceError};
use crate::traits::{ContextProcessor, ProcessorInfo};

/// Moves the value under `old` to `new`.
#[derive(Debug, Clone)]
pub struct RenameContextKey {
    reference: String,
    old: String,
    new: String,
}

impl RenameContextKey {
    pub fn new(old: impl Into<String>, new: impl Into<String>) -> Self {
        let (old, new) = (old.into(), new.into());
        Self {
            reference: format!("rename:{}:{}", old, new),
            old,
            new,
        }
    }
}

impl ProcessorInfo for RenameContextKey {
    fn name(&self) -> &str {
        &self.reference
    }
}

impl ContextProcessor for RenameContextKey {
    fn required_keys(&self) -> Vec<String> {
        vec![self.old.clone()]
    }

    fn created_keys(&self) -> Vec<String> {
        vec![self.new.clone()]
    }

    fn suppressed_keys(&self) -> Vec<String> {
        vec![self.old.clone()]
    }

    fn process_context(
        &self,
        context: &mut ContextObserver<'_>,
        _params: &Parameters,
    ) -> Result<(), ProcessorError> {
        context.rename(&self.old, &self.new)
    }
}

/// Removes `key`. Deleting an absent key is a no-op.
#[derive(Debug, Clone)]
pub struct DeleteContextKey {
    reference: String,
    key: String,
}

impl DeleteContextKey {
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            reference: format!("delete:{}", key),
            key,
        }
    }
}

impl ProcessorInfo for DeleteContextKey {
    fn name(&self) -> &str {
        &self.reference
    }
}

impl ContextProcessor for DeleteContextKey {
    fn suppressed_keys(&self) -> Vec<String> {
        vec![self.key.clone()]
    }

    fn process_context(
        &self,
        context: &mut ContextObserver<'_>,
        _params: &Parameters,
    ) -> Result<(), ProcessorError> {
        context.delete(&self.key)?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Literal(String),
    Key(String),
}

/// Renders a `{key}` format string from context values into `output`.
///
/// String values are inserted as-is, everything else as compact JSON.
/// `{{` and `}}` escape literal braces.
#[derive(Debug, Clone)]
pub struct ContextTemplate {
    reference: String,
    segments: Vec<Segment>,
    output: String,
}

impl ContextTemplate {
    pub fn parse(format: &str, output: impl Into<String>) -> Result<Self, ReferenceError> {
        let output = output.into();
        let reference = format!("template:{}:{}", format, output);
        let malformed = |reason: &str| ReferenceError::Malformed {
            reference: reference.clone(),
            reason: reason.to_string(),
        };

        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = format.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    literal.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    literal.push('}');
                }
                '{' => {
                    let mut key = String::new();
                    loop {
                        match chars.next() {
                            Some('}') => break,
                            Some('{') | None => return Err(malformed("unclosed placeholder")),
                            Some(c) => key.push(c),
                        }
                    }
                    if key.is_empty() {
                        return Err(malformed("empty placeholder"));
                    }
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Key(key));
                }
                '}' => return Err(malformed("unmatched '}'")),
                c => literal.push(c),
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            reference,
            segments,
            output,
        })
    }

    fn placeholders(&self) -> Vec<String> {
        let mut keys: Vec<String> = Vec::new();
        for segment in &self.segments {
            if let Segment::Key(key) = segment {
                if !keys.contains(key) {
                    keys.push(key.clone());
                }
            }
        }
        keys
    }
}

impl ProcessorInfo for ContextTemplate {
    fn name(&self) -> &str {
        &self.reference
    }
}

impl ContextProcessor for ContextTemplate {
    fn required_keys(&self) -> Vec<String> {
        self.placeholders()
    }

    fn created_keys(&self) -> Vec<String> {
        vec![self.output.clone()]
    }

    fn process_context(
        &self,
        context: &mut ContextObserver<'_>,
        _params: &Parameters,
    ) -> Result<(), ProcessorError> {
        let mut rendered = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => rendered.push_str(text),
                Segment::Key(key) => match context.get(key) {
                    Some(Value::String(s)) => rendered.push_str(s),
                    Some(other) => rendered.push_str(&other.to_string()),
                    None => return Err(ContextError::MissingKey(key.clone()).into()),
                },
            }
        }
        context.set(&self.output, rendered)
    }
}
