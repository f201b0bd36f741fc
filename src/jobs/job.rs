// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde_json::Value;
use uuid::Uuid;

use crate::config::consts::{JOB_ID_KEY, PIPELINE_KEY};
use crate::config::PipelineSpec;
use crate::data::Payload;
use crate::errors::JobError;
use crate::transport::Metadata;

/// Channel a job descriptor is published on: `jobs.<id>.cfg`.
pub fn cfg_channel(job_id: &str) -> String {
    format!("jobs.{}.cfg", job_id)
}

/// Channel a job's result is published on: `jobs.<id>.status`.
pub fn status_channel(job_id: &str) -> String {
    format!("jobs.{}.status", job_id)
}

/// A queued unit of work. Lives only until it is published.
#[derive(Debug, Clone)]
pub struct Job {
    pub job_id: Uuid,
    pub pipeline: PipelineSpec,
    pub payload: Payload,
}

impl Job {
    pub fn new(pipeline: PipelineSpec, payload: Payload) -> Self {
        Self {
            job_id: Uuid::new_v4(),
            pipeline,
            payload,
        }
    }

    pub fn id(&self) -> String {
        self.job_id.to_string()
    }

    /// `{job_id, pipeline}` as carried on the descriptor message.
    pub fn metadata(&self) -> Metadata {
        let mut metadata = Metadata::new();
        metadata.insert(JOB_ID_KEY.to_string(), Value::from(self.id()));
        metadata.insert(PIPELINE_KEY.to_string(), self.pipeline.to_value());
        metadata
    }
}

/// What a worker reads back out of descriptor metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct JobDescriptor {
    pub job_id: String,
    pub pipeline: PipelineSpec,
}

impl JobDescriptor {
    pub fn from_metadata(metadata: &Metadata) -> Result<Self, JobError> {
        let job_id = match metadata.get(JOB_ID_KEY) {
            Some(Value::String(id)) if !id.is_empty() => id.clone(),
            Some(other) => {
                return Err(JobError::InvalidDescriptor(format!(
                    "'{}' must be a non-empty string, got {}",
                    JOB_ID_KEY, other
                )))
            }
            None => {
                return Err(JobError::InvalidDescriptor(format!(
                    "missing '{}'",
                    JOB_ID_KEY
                )))
            }
        };

        let pipeline = metadata
            .get(PIPELINE_KEY)
            .ok_or_else(|| JobError::InvalidDescriptor(format!("missing '{}'", PIPELINE_KEY)))
            .and_then(|value| {
                PipelineSpec::from_value(value)
                    .map_err(|err| JobError::InvalidDescriptor(err.to_string()))
            })?;

        Ok(Self { job_id, pipeline })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NodeConfig;
    use serde_json::json;

    #[test]
    fn test_channels() {
        assert_eq!(cfg_channel("abc"), "jobs.abc.cfg");
        assert_eq!(status_channel("abc"), "jobs.abc.status");
    }

    #[test]
    fn test_descriptor_from_job_metadata() {
        let job = Job::new(
            PipelineSpec::Nodes(vec![NodeConfig::new("float_add").with_parameter("addend", 1)]),
            Payload::default(),
        );
        let descriptor = JobDescriptor::from_metadata(&job.metadata()).unwrap();
        assert_eq!(descriptor.job_id, job.id());
        assert_eq!(descriptor.pipeline, job.pipeline);
    }

    #[test]
    fn test_malformed_descriptors() {
        let cases = vec![
            ("no fields", json!({})),
            ("numeric id", json!({"job_id": 7, "pipeline": []})),
            ("no pipeline", json!({"job_id": "a"})),
            ("pipeline is a map", json!({"job_id": "a", "pipeline": {"processor": "x"}})),
            ("entry is not a map", json!({"job_id": "a", "pipeline": ["float_add"]})),
        ];
        for (name, value) in cases {
            let metadata = value.as_object().cloned().unwrap();
            assert!(
                matches!(
                    JobDescriptor::from_metadata(&metadata),
                    Err(JobError::InvalidDescriptor(_))
                ),
                "case: {}",
                name
            );
        }
    }
}
