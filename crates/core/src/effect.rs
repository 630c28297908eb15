// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Upkeep Contributors

//! Effects are the side effects the runtime performs on behalf of handlers.

use crate::job::{Job, JobId, JobStatus};
use std::path::PathBuf;

/// Everything the artifact fetcher needs to download one job's update.
///
/// Carried through the fetch queue and echoed back in the completion event
/// so the follow-up effects (notification, status report) need no job table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchSpec {
    pub job_id: JobId,
    pub package_name: String,
    pub app_name: String,
    pub latest_version: u64,
    pub artifact_url: String,
}

impl Job {
    /// The fetch request for this job's artifact.
    pub fn fetch_spec(&self) -> FetchSpec {
        FetchSpec {
            job_id: self.id.clone(),
            package_name: self.package_name.clone(),
            app_name: self.app_name.clone(),
            latest_version: self.latest_version,
            artifact_url: self.artifact_url.clone(),
        }
    }
}

/// Effects produced by the job processor and executed by the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Publish a raw payload to a broker topic (fire-and-forget).
    Publish { topic: String, payload: Vec<u8> },

    /// Publish a job-status update through the status reporter.
    /// Skipped entirely when the status has no wire representation.
    Report { job_id: JobId, status: JobStatus },

    /// Enqueue an artifact download on the fetcher pool.
    Fetch { spec: FetchSpec },

    /// Deliver an update-available event to the target application.
    NotifyApp { package_name: String, latest_version: u64, artifact_path: PathBuf },
}

impl Effect {
    /// Effect name for log lines (e.g., "publish", "fetch").
    pub fn name(&self) -> &'static str {
        match self {
            Effect::Publish { .. } => "publish",
            Effect::Report { .. } => "report",
            Effect::Fetch { .. } => "fetch",
            Effect::NotifyApp { .. } => "notify_app",
        }
    }

    /// Key-value pairs for structured logging
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        match self {
            Effect::Publish { topic, payload } => {
                vec![("topic", topic.clone()), ("bytes", payload.len().to_string())]
            }
            Effect::Report { job_id, status } => {
                vec![("job_id", job_id.to_string()), ("status", status.to_string())]
            }
            Effect::Fetch { spec } => vec![
                ("job_id", spec.job_id.to_string()),
                ("package", spec.package_name.clone()),
                ("url", spec.artifact_url.clone()),
            ],
            Effect::NotifyApp { package_name, latest_version, artifact_path } => vec![
                ("package", package_name.clone()),
                ("version", latest_version.to_string()),
                ("path", artifact_path.display().to_string()),
            ],
        }
    }
}

#[cfg(test)]
#[path = "effect_tests.rs"]
mod tests;
