use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::backends::local::LocalProcessorFactory;
use crate::errors::ReferenceError;
use crate::traits::Processor;

/// Builds a fresh processor instance for one pipeline node.
pub type ProcessorFactory = Arc<dyn Fn() -> Processor + Send + Sync>;

/// Maps stable processor names to factories.
///
/// Resolution happens once per node at pipeline construction. References of
/// the form `rename:<old>:<new>`, `delete:<key>` and `template:<format>:<key>`
/// are parsed directly into built-in context processors and never hit the map.
#[derive(Clone, Default)]
pub struct ProcessorRegistry {
    factories: HashMap<String, ProcessorFactory>,
}

impl ProcessorRegistry {
    /// An empty registry. Context shorthands still resolve.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry preloaded with every local processor.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        LocalProcessorFactory::register_all(&mut registry);
        registry
    }

    /// Registers `factory` under `name`, replacing any earlier registration.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn() -> Processor + Send + Sync + 'static,
    {
        self.factories.insert(name.into(), Arc::new(factory));
        self
    }

    pub fn resolve(&self, reference: &str) -> Result<Processor, ReferenceError> {
        if let Some(parsed) = LocalProcessorFactory::parse_context_shorthand(reference) {
            return parsed;
        }
        self.factories
            .get(reference)
            .map(|factory| factory())
            .ok_or_else(|| ReferenceError::Unknown(reference.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for ProcessorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessorRegistry")
            .field("processor_count", &self.factories.len())
            .field("processor_names", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::local::FloatMultiply;
    use crate::traits::ProcessorKind;

    #[test]
    fn test_resolve_table_driven() {
        struct TestCase {
            name: &'static str,
            reference: &'static str,
            expected_kind: Option<ProcessorKind>,
        }

        let test_cases = vec![
            TestCase {
                name: "registered operation",
                reference: "float_multiply",
                expected_kind: Some(ProcessorKind::DataOperation),
            },
            TestCase {
                name: "registered probe",
                reference: "float_value_probe",
                expected_kind: Some(ProcessorKind::DataProbe),
            },
            TestCase {
                name: "rename shorthand",
                reference: "rename:a:b",
                expected_kind: Some(ProcessorKind::ContextProcessor),
            },
            TestCase {
                name: "delete shorthand",
                reference: "delete:a",
                expected_kind: Some(ProcessorKind::ContextProcessor),
            },
            TestCase {
                name: "template shorthand",
                reference: "template:{a}-{b}:joined",
                expected_kind: Some(ProcessorKind::ContextProcessor),
            },
            TestCase {
                name: "unknown name",
                reference: "no_such_processor",
                expected_kind: None,
            },
            TestCase {
                name: "rename missing target",
                reference: "rename:a",
                expected_kind: None,
            },
        ];

        let registry = ProcessorRegistry::with_builtins();
        for case in test_cases {
            let kind = registry.resolve(case.reference).ok().map(|p| p.kind());
            assert_eq!(kind, case.expected_kind, "test case: {}", case.name);
        }
    }

    #[test]
    fn test_empty_registry_still_parses_shorthand() {
        let registry = ProcessorRegistry::new();
        assert!(registry.resolve("delete:k").is_ok());
        assert_eq!(
            registry.resolve("float_multiply").unwrap_err(),
            ReferenceError::Unknown("float_multiply".to_string())
        );
    }

    #[test]
    fn test_custom_registration_replaces() {
        let mut registry = ProcessorRegistry::new();
        registry.register("double", || Processor::operation(FloatMultiply));
        assert!(registry.contains("double"));
        assert_eq!(registry.names(), vec!["double"]);
        assert_eq!(registry.resolve("double").unwrap().name(), "float_multiply");
    }
}
