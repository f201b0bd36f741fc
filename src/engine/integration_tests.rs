// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde_json::json;

use crate::backends::stub::stub_registry;
use crate::config::{NodeConfig, PipelineSpec, ProcessorRegistry, YamlPipelineLoader};
use crate::data::{Context, DataType, Payload, TypedData};
use crate::engine::{ParameterSource, Pipeline};
use crate::errors::{PipelineError, PipelineTopologyError, ProcessorError};

/// Integration tests for pipelines built from the local processors
#[cfg(test)]
mod tests {
    use super::*;

    fn float_payload(value: f64) -> Payload {
        Payload::from_data(TypedData::float(value).unwrap())
    }

    fn scale_probe_rename_delete() -> Vec<NodeConfig> {
        vec![
            NodeConfig::new("float_multiply").with_parameter("factor", 2),
            NodeConfig::new("float_multiply").with_parameter("factor", 3),
            NodeConfig::new("float_value_probe").with_context_keyword("k1"),
            NodeConfig::new("float_value_probe").with_context_keyword("k2"),
            NodeConfig::new("rename:k1:k1b"),
            NodeConfig::new("delete:k2"),
        ]
    }

    #[test]
    fn test_scale_probe_rename_delete_scenario() {
        let registry = ProcessorRegistry::with_builtins();
        let mut pipeline = Pipeline::new(&scale_probe_rename_delete(), &registry).unwrap();

        let out = pipeline.process(float_payload(7.0)).unwrap();

        assert_eq!(out.data.as_float(), Some(42.0));
        assert_eq!(out.context.get("k1b"), Some(&json!(42.0)));
        assert!(!out.context.contains_key("k1"));
        assert!(!out.context.contains_key("k2"));
        assert_eq!(out.context.len(), 1);
    }

    #[test]
    fn test_adjacent_type_mismatch_names_both_processors() {
        let registry = ProcessorRegistry::with_builtins();
        let nodes = vec![
            NodeConfig::new("float_to_text"),
            NodeConfig::new("float_multiply").with_parameter("factor", 2),
        ];
        let err = Pipeline::new(&nodes, &registry).unwrap_err();
        assert_eq!(
            err,
            PipelineTopologyError::TypeMismatch {
                previous_index: 0,
                previous: "float_to_text".to_string(),
                index: 1,
                processor: "float_multiply".to_string(),
                expected: DataType::Float,
                actual: DataType::Text,
            }
        );
        let message = err.to_string();
        assert!(message.contains("float_to_text") && message.contains("float_multiply"));
    }

    #[test]
    fn test_context_mutators_are_skipped_by_adjacency_check() {
        let registry = ProcessorRegistry::with_builtins();
        let nodes = vec![
            NodeConfig::new("float_multiply").with_parameter("factor", 2),
            NodeConfig::new("template:{x}:y"),
            NodeConfig::new("float_to_text"),
            NodeConfig::new("change_text_case"),
        ];
        assert!(Pipeline::new(&nodes, &registry).is_ok());
    }

    #[test]
    fn test_deleted_key_required_later_is_a_topology_error() {
        let registry = ProcessorRegistry::with_builtins();
        let nodes = vec![
            NodeConfig::new("float_value_probe").with_context_keyword("factor"),
            NodeConfig::new("delete:factor"),
            NodeConfig::new("float_multiply"),
        ];
        let err = Pipeline::new(&nodes, &registry).unwrap_err();
        assert_eq!(
            err,
            PipelineTopologyError::DeletedKeyRequired {
                index: 2,
                processor: "float_multiply".to_string(),
                key: "factor".to_string(),
                deleted_by: 1,
                deleter: "delete:factor".to_string(),
            }
        );

        // Supplying the value explicitly lifts the requirement.
        let mut fixed = nodes.clone();
        fixed[2] = NodeConfig::new("float_multiply").with_parameter("factor", 2);
        assert!(Pipeline::new(&fixed, &registry).is_ok());
    }

    #[test]
    fn test_explicit_config_wins_over_recent_context_key() {
        let registry = ProcessorRegistry::with_builtins();
        let nodes = vec![
            NodeConfig::new("float_value_probe").with_context_keyword("factor"),
            NodeConfig::new("float_multiply").with_parameter("factor", 10),
        ];
        let mut pipeline = Pipeline::new(&nodes, &registry).unwrap();
        let out = pipeline.process(float_payload(3.0)).unwrap();

        assert_eq!(out.data.as_float(), Some(30.0));
        assert_eq!(
            pipeline.last_run()[1].parameters.get("factor"),
            Some(&ParameterSource::Config)
        );
    }

    #[test]
    fn test_context_parameter_resolves_to_most_recent_producer() {
        let registry = ProcessorRegistry::with_builtins();
        let nodes = vec![
            NodeConfig::new("float_value_probe").with_context_keyword("factor"),
            NodeConfig::new("float_add").with_parameter("addend", 1),
            NodeConfig::new("float_value_probe").with_context_keyword("factor"),
            NodeConfig::new("float_multiply"),
        ];
        let mut pipeline = Pipeline::new(&nodes, &registry).unwrap();
        let initial = Payload::new(
            TypedData::float(2.0).unwrap(),
            [("factor", json!(100.0))].into_iter().collect::<Context>(),
        );
        let out = pipeline.process(initial).unwrap();

        // factor = 3.0 from node 2, not the initial 100.0 or node 0's 2.0
        assert_eq!(out.data.as_float(), Some(9.0));
        assert_eq!(
            pipeline.last_run()[3].parameters.get("factor"),
            Some(&ParameterSource::Context { origin: Some(2) })
        );
    }

    #[test]
    fn test_initial_context_parameter_has_no_origin_node() {
        let registry = ProcessorRegistry::with_builtins();
        let mut pipeline = Pipeline::new(&[NodeConfig::new("float_multiply")], &registry).unwrap();
        let initial = Payload::new(
            TypedData::float(2.0).unwrap(),
            [("factor", json!(4))].into_iter().collect::<Context>(),
        );
        assert_eq!(pipeline.process(initial).unwrap().data.as_float(), Some(8.0));
        assert_eq!(
            pipeline.last_run()[0].parameters.get("factor"),
            Some(&ParameterSource::Context { origin: None })
        );
    }

    #[test]
    fn test_missing_parameter_aborts_run() {
        let registry = ProcessorRegistry::with_builtins();
        let mut pipeline = Pipeline::new(
            &[
                NodeConfig::new("float_add").with_parameter("addend", 1),
                NodeConfig::new("float_multiply"),
            ],
            &registry,
        )
        .unwrap();
        let err = pipeline.process(float_payload(1.0)).unwrap_err();
        assert_eq!(
            err,
            PipelineError::MissingParameter {
                index: 1,
                processor: "float_multiply".to_string(),
                parameter: "factor".to_string(),
            }
        );
        assert_eq!(pipeline.last_run().len(), 1);
    }

    #[test]
    fn test_runtime_type_mismatch_aborts_remaining_nodes() {
        let (registry, sink) = stub_registry();
        let nodes = vec![
            NodeConfig::new("wrong_output"),
            NodeConfig::new("float_multiply").with_parameter("factor", 2),
            NodeConfig::new("recording_sink"),
        ];
        let mut pipeline = Pipeline::new(&nodes, &registry).unwrap();
        let err = pipeline.process(float_payload(1.0)).unwrap_err();

        assert_eq!(
            err,
            PipelineError::TypeMismatch {
                index: 1,
                processor: "float_multiply".to_string(),
                expected: DataType::Float,
                actual: DataType::Text,
            }
        );
        assert!(sink.seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_processor_failure_names_node() {
        let (registry, _) = stub_registry();
        let mut pipeline = Pipeline::new(&[NodeConfig::new("failing")], &registry).unwrap();
        let err = pipeline.process(float_payload(1.0)).unwrap_err();
        assert_eq!(
            err,
            PipelineError::Processor {
                index: 0,
                processor: "failing".to_string(),
                source: ProcessorError::Failed("simulated processor failure".to_string()),
            }
        );
    }

    #[test]
    fn test_probe_results_collected_per_node_label() {
        let (registry, sink) = stub_registry();
        let nodes = vec![
            NodeConfig::new("float_value_probe"),
            NodeConfig::new("float_add").with_parameter("addend", 1),
            NodeConfig::new("float_value_probe"),
            NodeConfig::new("recording_sink"),
        ];
        let mut pipeline = Pipeline::new(&nodes, &registry).unwrap();
        pipeline.process(float_payload(1.0)).unwrap();
        pipeline.process(float_payload(5.0)).unwrap();

        let results = pipeline.probe_results();
        assert_eq!(results["Node 0/float_value_probe"], vec![json!(1.0), json!(5.0)]);
        assert_eq!(results["Node 2/float_value_probe"], vec![json!(2.0), json!(6.0)]);
        assert_eq!(*sink.seen.lock().unwrap(), vec![2.0, 6.0]);
    }

    #[test]
    fn test_sources_and_payload_sources() {
        let registry = ProcessorRegistry::with_builtins();
        let nodes = vec![
            NodeConfig::new("float_payload_source")
                .with_parameter("value", 1.5)
                .with_parameter("origin_key", "from"),
            NodeConfig::new("float_add").with_parameter("addend", 1),
            NodeConfig::new("payload_log_sink"),
        ];
        let mut pipeline = Pipeline::new(&nodes, &registry).unwrap();
        let out = pipeline.process(Payload::default()).unwrap();
        assert_eq!(out.data.as_float(), Some(2.5));
        assert_eq!(out.context.get("from"), Some(&json!("float_payload_source")));
    }

    #[test]
    fn test_template_builds_from_context() {
        let registry = ProcessorRegistry::with_builtins();
        let nodes = vec![
            NodeConfig::new("float_value_probe").with_context_keyword("v"),
            NodeConfig::new("template:value={v} unit={unit}:summary"),
        ];
        let mut pipeline = Pipeline::new(&nodes, &registry).unwrap();
        let initial = Payload::new(
            TypedData::float(2.0).unwrap(),
            [("unit", json!("m"))].into_iter().collect::<Context>(),
        );
        let out = pipeline.process(initial).unwrap();
        assert_eq!(out.context.get("summary"), Some(&json!("value=2.0 unit=m")));
    }

    #[test]
    fn test_inspection_is_idempotent_and_reports_provenance() {
        let registry = ProcessorRegistry::with_builtins();
        let nodes = vec![
            NodeConfig::new("float_value_probe").with_context_keyword("factor"),
            NodeConfig::new("float_multiply"),
            NodeConfig::new("float_add"),
            NodeConfig::new("float_to_text"),
            NodeConfig::new("rename:factor:used_factor"),
        ];

        let first = Pipeline::new(&nodes, &registry).unwrap();
        let second = Pipeline::new(&nodes, &registry).unwrap();
        assert_eq!(first.inspect(), second.inspect());
        assert_eq!(first.len(), second.len());

        let report = first.inspect();
        assert_eq!(
            report.nodes[1].parameters["factor"],
            ParameterSource::Context { origin: Some(0) }
        );
        assert_eq!(
            report.nodes[2].parameters["addend"],
            ParameterSource::Context { origin: None }
        );
        assert_eq!(report.nodes[3].parameters["precision"], ParameterSource::Default);
        assert_eq!(report.nodes[0].created_keys, vec!["factor"]);
        assert_eq!(report.nodes[4].suppressed_keys, vec!["factor"]);
        assert_eq!(report.nodes[4].created_keys, vec!["used_factor"]);
        assert_eq!(
            report.required_initial_keys.into_iter().collect::<Vec<_>>(),
            vec!["addend"]
        );

        let json = first.inspect().to_json();
        assert_eq!(json["nodes"][1]["parameters"]["factor"]["source"], "context");
        assert_eq!(json["nodes"][0]["role"], "context_injector");
    }

    #[test]
    fn test_from_spec_loads_path_through_loader() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("double.yaml"),
            "pipeline:\n  - processor: float_multiply\n    parameters:\n      factor: 2\n",
        )
        .unwrap();
        let loader = YamlPipelineLoader::with_base_dir(dir.path());
        let registry = ProcessorRegistry::with_builtins();

        let mut pipeline =
            Pipeline::from_spec(&PipelineSpec::Path("double.yaml".to_string()), &registry, &loader)
                .unwrap();
        assert_eq!(pipeline.process(float_payload(4.0)).unwrap().data.as_float(), Some(8.0));

        let err = Pipeline::from_spec(&PipelineSpec::Path("nope.yaml".to_string()), &registry, &loader)
            .unwrap_err();
        assert!(matches!(err, PipelineError::Load(_)));
    }

    #[test]
    fn test_bundled_demo_pipeline() {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("configs/pipelines/scale-and-probe.yaml");
        let nodes = crate::config::load_pipeline_config(&path).unwrap();
        let mut pipeline = Pipeline::new(&nodes, &ProcessorRegistry::with_builtins()).unwrap();

        let out = pipeline.process(float_payload(7.0)).unwrap();
        assert_eq!(out.data.as_float(), Some(42.0));
        assert_eq!(out.context.get("summary"), Some(&json!("scaled to 42.0")));
        assert!(pipeline.inspect().required_initial_keys.is_empty());
    }
}
