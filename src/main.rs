// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use anyhow::{bail, Context as _, Result};
use std::env;
use std::path::Path;
use std::sync::Arc;
use the_conduit::config::{
    load_pipeline_config, load_runtime_config, PipelineSpec, ProcessorRegistry, RuntimeConfig,
    YamlPipelineLoader,
};
use the_conduit::data::{Payload, TypedData};
use the_conduit::engine::{ExecutorFactory, Pipeline};
use the_conduit::jobs::{Orchestrator, Worker};
use the_conduit::observability::init_tracing;
use the_conduit::traits::Transport;
use the_conduit::transport::InMemoryTransport;

fn usage(program: &str) -> String {
    format!(
        "Usage: {0} <runtime.yaml> <value> [value ...]\n       {0} --inspect <pipeline.yaml>\n\
         Example: {0} configs/runtime.yaml 7 1.5\n\
         Example: {0} --inspect configs/pipelines/scale-and-probe.yaml",
        program
    )
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("conduit");

    match args.get(1).map(String::as_str) {
        Some("--inspect") if args.len() == 3 => inspect(&args[2]),
        Some(runtime) if args.len() >= 3 && !runtime.starts_with("--") => {
            let values = args[2..]
                .iter()
                .map(|raw| {
                    raw.parse::<f64>()
                        .with_context(|| format!("'{}' is not a number", raw))
                })
                .collect::<Result<Vec<f64>>>()?;
            run(runtime, &values).await
        }
        _ => {
            eprintln!("{}", usage(program));
            std::process::exit(1);
        }
    }
}

/// Print the static inspection report of a pipeline file as JSON.
fn inspect(path: &str) -> Result<()> {
    let nodes = load_pipeline_config(path)?;
    let pipeline = Pipeline::new(&nodes, &ProcessorRegistry::with_builtins())
        .with_context(|| format!("pipeline {} failed its construction checks", path))?;
    println!("{}", serde_json::to_string_pretty(&pipeline.inspect())?);
    Ok(())
}

/// Start an orchestrator and workers on an in-memory transport, run one job
/// per value and print each result.
async fn run(runtime_path: &str, values: &[f64]) -> Result<()> {
    let config: RuntimeConfig = load_runtime_config(runtime_path)?;
    let spec: PipelineSpec = match &config.pipeline {
        Some(spec) => spec.clone(),
        None => bail!("{} does not name a pipeline", runtime_path),
    };

    let base_dir = Path::new(runtime_path)
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    let loader = Arc::new(YamlPipelineLoader::with_base_dir(base_dir));
    let registry = Arc::new(ProcessorRegistry::with_builtins());

    // Fail fast on a broken pipeline instead of letting every job time out.
    Pipeline::from_spec(&spec, &registry, loader.as_ref())
        .context("pipeline failed its construction checks")?;

    let transport: Arc<dyn Transport> = Arc::new(InMemoryTransport::new());
    let orchestrator = Arc::new(Orchestrator::new(transport.clone(), config.orchestrator.clone()));

    let mut workers = Vec::new();
    let mut tasks = Vec::new();
    for i in 0..config.worker.count() {
        let worker = Arc::new(Worker::new(
            format!("worker-{}", i),
            transport.clone(),
            registry.clone(),
            loader.clone(),
            ExecutorFactory::from_kind(config.executor),
            config.worker.clone(),
        ));
        workers.push(worker.clone());
        tasks.push(tokio::spawn(async move { worker.run().await }));
    }
    let runner = orchestrator.clone();
    tasks.push(tokio::spawn(async move { runner.run_forever().await }));

    let mut tickets = Vec::with_capacity(values.len());
    for value in values {
        let payload = Payload::from_data(TypedData::float(*value)?);
        tickets.push((*value, orchestrator.enqueue(spec.clone(), payload, true)?));
    }

    println!("🚀 The Conduit");
    println!("═══════════════════════════════════");
    println!("Runtime: {}", runtime_path);
    println!("Workers: {} ({:?} executor)", workers.len(), config.executor);
    println!();

    let mut failures = 0;
    for (value, ticket) in tickets {
        let Some(handle) = ticket.result else { continue };
        match handle.wait_timeout(config.result_timeout()).await {
            Ok(result) => {
                println!("✅ {} -> {}", value, serde_json::to_string(&result.data)?);
                println!("   context: {}", serde_json::to_string(&result.context)?);
            }
            Err(err) => {
                failures += 1;
                println!("❌ {} (job {}): {}", value, ticket.job_id, err);
            }
        }
    }

    orchestrator.stop().await;
    for worker in &workers {
        worker.stop();
    }
    for task in tasks {
        task.await??;
    }

    if failures > 0 {
        bail!("{} of {} jobs did not complete", failures, values.len());
    }
    Ok(())
}
