// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Upkeep Contributors

//! Payload DTOs for the job topics.
//!
//! Field names follow the broker's camelCase convention; `serde_json`
//! ignores fields we do not model, and missing fields fail the decode.

use crate::codec::WireError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use upkeep_core::{Job, JobId, JobStatus};

/// Request payload for the get-pending-jobs topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetJobsRequest {
    pub client_token: String,
}

/// Request payload for a describe-job topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeJobRequest {
    pub client_token: String,
}

/// One job reference inside a job-list response. Stubs carry more fields on
/// the wire; only the id matters to the agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStub {
    pub job_id: String,
}

/// Response payload on the get-accepted topic: the pending jobs, split into
/// queued and in-progress sequences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetJobsResponse {
    pub queued_jobs: Vec<JobStub>,
    pub in_progress_jobs: Vec<JobStub>,
}

impl GetJobsResponse {
    /// All stubs in processing order: in-progress first, then queued.
    pub fn merged(self) -> Vec<JobStub> {
        let mut jobs = self.in_progress_jobs;
        jobs.extend(self.queued_jobs);
        jobs
    }
}

/// Full job document envelope delivered on a describe-accepted topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobExecutionEnvelope {
    pub execution: JobExecution,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobExecution {
    pub job_id: String,
    pub status: String,
    pub job_document: JobDocument,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDocument {
    pub package_name: String,
    pub app_name: String,
    /// Integer version code, transported as a string.
    pub latest_version: String,
    #[serde(rename = "artifactURL")]
    pub artifact_url: String,
}

impl TryFrom<JobExecutionEnvelope> for Job {
    type Error = WireError;

    /// Build the domain job, parsing the version code. A non-numeric
    /// `latestVersion` fails the whole document.
    fn try_from(envelope: JobExecutionEnvelope) -> Result<Self, WireError> {
        let JobExecution { job_id, status, job_document: doc } = envelope.execution;
        let latest_version = doc.latest_version.parse::<u64>().map_err(|_| {
            WireError::Version { job_id: job_id.clone(), value: doc.latest_version.clone() }
        })?;
        Ok(Job {
            id: JobId::new(job_id),
            status: JobStatus::from_wire(&status),
            package_name: doc.package_name,
            app_name: doc.app_name,
            latest_version,
            artifact_url: doc.artifact_url,
        })
    }
}

/// Status-update request published to a job's update topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateJobRequest {
    pub client_token: String,
    pub step_timeout_in_minutes: u64,
    pub status: String,
}

/// Update-available event delivered to the target application's own
/// inbound channel once an artifact has landed on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppUpdateEvent {
    pub action: String,
    pub target_package: String,
    pub extras: UpdateExtras,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateExtras {
    #[serde(rename = "AvailableVersion")]
    pub available_version: String,
    #[serde(rename = "FilePath")]
    pub file_path: String,
    #[serde(rename = "IsUpdateMandatory")]
    pub is_update_mandatory: String,
}

impl AppUpdateEvent {
    pub const ACTION: &'static str = "UPDATE_EVENT";

    /// The event announcing a downloaded artifact. Updates pushed through
    /// jobs are always mandatory for the receiving application.
    pub fn update_available(package: &str, latest_version: u64, artifact_path: &Path) -> Self {
        Self {
            action: Self::ACTION.to_string(),
            target_package: package.to_string(),
            extras: UpdateExtras {
                available_version: latest_version.to_string(),
                file_path: artifact_path.display().to_string(),
                is_update_mandatory: "true".to_string(),
            },
        }
    }
}

#[cfg(test)]
#[path = "payload_tests.rs"]
mod tests;
