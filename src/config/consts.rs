/// Subscription pattern workers use to pick up job descriptors
pub const JOB_CFG_PATTERN: &str = "jobs.*.cfg";
/// Subscription pattern the orchestrator uses for completions
pub const JOB_STATUS_PATTERN: &str = "jobs.*.status";
/// Metadata key, and result-context key, carrying the job identifier
pub const JOB_ID_KEY: &str = "job_id";
/// Metadata key carrying the pipeline specification
pub const PIPELINE_KEY: &str = "pipeline";

/// Default capacity of the orchestrator's in-process job queue
pub const DEFAULT_QUEUE_CAPACITY: usize = 1024;
/// Default time the orchestrator waits on its queue per loop iteration
pub const DEFAULT_POP_TIMEOUT_MS: u64 = 50;
/// Default sleep between empty worker subscribe cycles
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 20;
/// Default number of workers started by the binary
pub const DEFAULT_WORKER_COUNT: usize = 2;
/// Default time the binary waits for each job result
pub const DEFAULT_RESULT_TIMEOUT_MS: u64 = 10_000;
