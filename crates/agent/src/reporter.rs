// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Upkeep Contributors

//! Status reporter: job-status transitions published to the broker.

use upkeep_broker::Channel;
use upkeep_core::{ClientToken, JobId, JobStatus};
use upkeep_wire::{encode, JobTopics, UpdateJobRequest};

/// Builds and publishes status-update requests.
///
/// Publishing is fire-and-forget: failures are logged and swallowed, and a
/// status with no wire representation skips the publish entirely.
pub struct StatusReporter<C: Channel> {
    channel: C,
    topics: JobTopics,
    token: ClientToken,
    step_timeout_minutes: u64,
}

impl<C: Channel> StatusReporter<C> {
    pub fn new(
        channel: C,
        topics: JobTopics,
        token: ClientToken,
        step_timeout_minutes: u64,
    ) -> Self {
        Self { channel, topics, token, step_timeout_minutes }
    }

    /// Publish one status update for a job.
    pub async fn report(&self, job_id: &JobId, status: &JobStatus) {
        let Some(wire_status) = status.wire_str() else {
            tracing::warn!(%job_id, %status, "unrecognized job status, skipping publish");
            return;
        };

        let request = UpdateJobRequest {
            client_token: self.token.as_str().to_string(),
            step_timeout_in_minutes: self.step_timeout_minutes,
            status: wire_status.to_string(),
        };
        let payload = match encode(&request) {
            Ok(payload) => payload,
            Err(err) => {
                tracing::error!(%job_id, error = %err, "failed to encode status update");
                return;
            }
        };

        let topic = self.topics.update_job(job_id.as_str());
        tracing::info!(%job_id, status = wire_status, "updating job");
        if let Err(err) = self.channel.publish(&topic, payload).await {
            tracing::error!(%job_id, %topic, error = %err, "status publish failed");
        }
    }
}

#[cfg(test)]
#[path = "reporter_tests.rs"]
mod tests;
