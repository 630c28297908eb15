// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Upkeep Contributors

//! The job processor: events in, effects out.
//!
//! Each inbound message is handled independently. Decode failures drop the
//! message with a log line and nothing else; overlapping job-list responses
//! are tolerated because describe requests are idempotent on the remote
//! side.

use upkeep_core::{decide, ClientToken, Effect, Event, Job, JobStatus, UpdateDecision};
use upkeep_wire::{
    encode, DescribeJobRequest, GetJobsRequest, GetJobsResponse, JobExecutionEnvelope, JobTopics,
};

use crate::adapters::AppRegistry;

/// Turns runtime events into effects. Holds no job state.
pub struct Processor<R: AppRegistry> {
    topics: JobTopics,
    token: ClientToken,
    registry: R,
}

impl<R: AppRegistry> Processor<R> {
    pub fn new(topics: JobTopics, token: ClientToken, registry: R) -> Self {
        Self { topics, token, registry }
    }

    /// Dispatch one event. Never fails: every error degrades to "this
    /// message produces no further action".
    pub async fn handle(&self, event: Event) -> Vec<Effect> {
        match event {
            Event::PollTick => self.handle_poll_tick(),
            Event::JobListReceived { payload } => self.handle_job_list(&payload),
            Event::JobDocumentReceived { payload } => self.handle_job_document(&payload).await,
            Event::FetchFinished { spec, outcome } => self.handle_fetch_finished(spec, outcome),
        }
    }

    /// Poller tick: one get-pending-jobs request.
    fn handle_poll_tick(&self) -> Vec<Effect> {
        let request = GetJobsRequest { client_token: self.token.as_str().to_string() };
        match encode(&request) {
            Ok(payload) => vec![Effect::Publish { topic: self.topics.get_jobs(), payload }],
            Err(err) => {
                tracing::error!(error = %err, "failed to encode get-jobs request");
                Vec::new()
            }
        }
    }

    /// Job-list response: one describe request per stub, in-progress jobs
    /// first. No deduplication against previously requested ids.
    fn handle_job_list(&self, payload: &[u8]) -> Vec<Effect> {
        let response: GetJobsResponse = match upkeep_wire::decode(payload) {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(error = %err, "dropping malformed job list");
                return Vec::new();
            }
        };

        let request = DescribeJobRequest { client_token: self.token.as_str().to_string() };
        let payload = match encode(&request) {
            Ok(payload) => payload,
            Err(err) => {
                tracing::error!(error = %err, "failed to encode describe request");
                return Vec::new();
            }
        };

        response
            .merged()
            .into_iter()
            .map(|stub| Effect::Publish {
                topic: self.topics.describe_job(&stub.job_id),
                payload: payload.clone(),
            })
            .collect()
    }

    /// Job document: decode, look up the package, decide, act.
    async fn handle_job_document(&self, payload: &[u8]) -> Vec<Effect> {
        let envelope: JobExecutionEnvelope = match upkeep_wire::decode(payload) {
            Ok(envelope) => envelope,
            Err(err) => {
                tracing::warn!(error = %err, "dropping malformed job document");
                return Vec::new();
            }
        };
        let job = match Job::try_from(envelope) {
            Ok(job) => job,
            Err(err) => {
                tracing::warn!(error = %err, "dropping job document");
                return Vec::new();
            }
        };

        let installed = self.registry.installed(&job.package_name).await;
        match decide(&job, installed.as_ref()) {
            UpdateDecision::Reject => {
                tracing::info!(job_id = %job.id, package = %job.package_name, "package not installed");
                vec![Effect::Report { job_id: job.id, status: JobStatus::Rejected }]
            }
            UpdateDecision::AlreadyCurrent => {
                tracing::info!(job_id = %job.id, package = %job.package_name, "already current");
                vec![Effect::Report { job_id: job.id, status: JobStatus::Succeeded }]
            }
            UpdateDecision::Download => {
                tracing::info!(
                    job_id = %job.id,
                    package = %job.package_name,
                    version = job.latest_version,
                    "update available, queueing download"
                );
                vec![Effect::Fetch { spec: job.fetch_spec() }]
            }
            UpdateDecision::Defer => {
                // An in-flight attempt owns this job; leave the remote
                // state untouched until it resolves.
                tracing::debug!(job_id = %job.id, status = %job.status, "update pending elsewhere");
                Vec::new()
            }
        }
    }

    /// Fetch completion: notify-then-report on success, report on failure.
    fn handle_fetch_finished(
        &self,
        spec: upkeep_core::FetchSpec,
        outcome: Result<std::path::PathBuf, String>,
    ) -> Vec<Effect> {
        match outcome {
            Ok(artifact_path) => vec![
                Effect::NotifyApp {
                    package_name: spec.package_name,
                    latest_version: spec.latest_version,
                    artifact_path,
                },
                Effect::Report { job_id: spec.job_id, status: JobStatus::InProgress },
            ],
            Err(reason) => {
                tracing::error!(job_id = %spec.job_id, url = %spec.artifact_url, %reason, "download failed");
                vec![Effect::Report { job_id: spec.job_id, status: JobStatus::Failed }]
            }
        }
    }
}

#[cfg(test)]
#[path = "processor_tests.rs"]
mod tests;
