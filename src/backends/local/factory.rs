// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use super::processors::*;
use crate::config::ProcessorRegistry;
use crate::errors::ReferenceError;
use crate::traits::Processor;

/// Factory for local (in-process) processor instances
pub struct LocalProcessorFactory;

impl LocalProcessorFactory {
    /// Name and constructor of every local processor.
    fn implementations() -> Vec<(&'static str, fn() -> Processor)> {
        vec![
            // Float operations
            ("float_multiply", || Processor::operation(FloatMultiply)),
            ("float_add", || Processor::operation(FloatAdd)),
            ("float_divide", || Processor::operation(FloatDivide)),
            ("float_to_text", || Processor::operation(FloatToText)),
            // Text operations
            ("change_text_case", || Processor::operation(ChangeTextCase)),
            ("prefix_suffix_adder", || Processor::operation(PrefixSuffixAdder)),
            // Probes
            ("float_value_probe", || Processor::probe(FloatValueProbe)),
            ("data_type_probe", || Processor::probe(DataTypeProbe)),
            // Sources and sinks
            ("float_source", || Processor::source(FloatSource)),
            ("float_payload_source", || Processor::payload_source(FloatPayloadSource)),
            ("float_log_sink", || Processor::sink(FloatLogSink)),
            ("payload_log_sink", || Processor::payload_sink(PayloadLogSink)),
        ]
    }

    /// Create a processor instance by its registry name
    pub fn create_processor(name: &str) -> Result<Processor, ReferenceError> {
        Self::implementations()
            .into_iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, constructor)| constructor())
            .ok_or_else(|| ReferenceError::Unknown(name.to_string()))
    }

    /// List all available local processor implementations
    pub fn list_available_implementations() -> Vec<&'static str> {
        Self::implementations().into_iter().map(|(name, _)| name).collect()
    }

    /// Check if an implementation is available
    pub fn is_implementation_available(name: &str) -> bool {
        Self::list_available_implementations().contains(&name)
    }

    /// Register every local processor in `registry`.
    pub fn register_all(registry: &mut ProcessorRegistry) {
        for (name, constructor) in Self::implementations() {
            registry.register(name, constructor);
        }
    }

    /// Parse `rename:<old>:<new>`, `delete:<key>` and `template:<format>:<key>`.
    ///
    /// Returns `None` when `reference` uses none of these prefixes.
    pub fn parse_context_shorthand(reference: &str) -> Option<Result<Processor, ReferenceError>> {
        let (prefix, rest) = reference.split_once(':')?;
        let malformed = |reason: &str| ReferenceError::Malformed {
            reference: reference.to_string(),
            reason: reason.to_string(),
        };

        let parsed = match prefix {
            "rename" => match rest.split_once(':') {
                Some((old, new)) if !old.is_empty() && !new.is_empty() && !new.contains(':') => {
                    Ok(Processor::context(RenameContextKey::new(old, new)))
                }
                _ => Err(malformed("expected rename:<old>:<new>")),
            },
            "delete" => {
                if rest.is_empty() || rest.contains(':') {
                    Err(malformed("expected delete:<key>"))
                } else {
                    Ok(Processor::context(DeleteContextKey::new(rest)))
                }
            }
            "template" => match rest.rsplit_once(':') {
                Some((format, output)) if !format.is_empty() && !output.is_empty() => {
                    ContextTemplate::parse(format, output).map(Processor::context)
                }
                _ => Err(malformed("expected template:<format>:<output_key>")),
            },
            _ => return None,
        };
        Some(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::ProcessorKind;

    #[test]
    fn test_create_every_listed_processor() {
        for name in LocalProcessorFactory::list_available_implementations() {
            let processor = LocalProcessorFactory::create_processor(name)
                .unwrap_or_else(|e| panic!("failed to create {}: {}", name, e));
            assert_eq!(processor.name(), name);
        }
    }

    #[test]
    fn test_create_processor_unknown_name() {
        let err = LocalProcessorFactory::create_processor("reverse_text").unwrap_err();
        assert_eq!(err, ReferenceError::Unknown("reverse_text".to_string()));
        assert!(!LocalProcessorFactory::is_implementation_available("reverse_text"));
        assert!(LocalProcessorFactory::is_implementation_available("float_add"));
    }

    #[test]
    fn test_kinds_of_registered_processors() {
        let cases = vec![
            ("float_multiply", ProcessorKind::DataOperation),
            ("float_value_probe", ProcessorKind::DataProbe),
            ("float_source", ProcessorKind::DataSource),
            ("float_payload_source", ProcessorKind::PayloadSource),
            ("float_log_sink", ProcessorKind::DataSink),
            ("payload_log_sink", ProcessorKind::PayloadSink),
        ];
        for (name, kind) in cases {
            assert_eq!(LocalProcessorFactory::create_processor(name).unwrap().kind(), kind, "{}", name);
        }
    }

    #[test]
    fn test_context_shorthand_table() {
        struct TestCase {
            name: &'static str,
            reference: &'static str,
            expect_ok: Option<bool>,
        }

        let test_cases = vec![
            TestCase { name: "rename", reference: "rename:a:b", expect_ok: Some(true) },
            TestCase { name: "rename extra segment", reference: "rename:a:b:c", expect_ok: Some(false) },
            TestCase { name: "rename empty old", reference: "rename::b", expect_ok: Some(false) },
            TestCase { name: "delete", reference: "delete:k", expect_ok: Some(true) },
            TestCase { name: "delete empty", reference: "delete:", expect_ok: Some(false) },
            TestCase { name: "template with colon in format", reference: "template:{a}:{b}:out", expect_ok: Some(true) },
            TestCase { name: "template no output", reference: "template:{a}", expect_ok: Some(false) },
            TestCase { name: "plain name", reference: "float_add", expect_ok: None },
            TestCase { name: "other prefix", reference: "custom:thing", expect_ok: None },
        ];

        for case in test_cases {
            let parsed = LocalProcessorFactory::parse_context_shorthand(case.reference);
            assert_eq!(parsed.map(|r| r.is_ok()), case.expect_ok, "test case: {}", case.name);
        }
    }

    #[test]
    fn test_shorthand_names_are_the_reference() {
        let processor = LocalProcessorFactory::parse_context_shorthand("rename:k1:k1b")
            .unwrap()
            .unwrap();
        assert_eq!(processor.name(), "rename:k1:k1b");
    }
}
