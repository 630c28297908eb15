// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Upkeep Contributors

//! Job topic templates and subscription pattern matching.

/// Topic templates for one device's job namespace.
///
/// The device identity is substituted once at construction; no global
/// topic constants exist anywhere else.
#[derive(Debug, Clone)]
pub struct JobTopics {
    device_id: String,
}

impl JobTopics {
    pub fn new(device_id: impl Into<String>) -> Self {
        Self { device_id: device_id.into() }
    }

    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    /// Publish here to request the list of pending jobs.
    pub fn get_jobs(&self) -> String {
        format!("things/{}/jobs/get", self.device_id)
    }

    /// Job-list responses arrive here.
    pub fn get_jobs_accepted(&self) -> String {
        format!("things/{}/jobs/get/accepted", self.device_id)
    }

    /// Publish here to request one job's description.
    pub fn describe_job(&self, job_id: &str) -> String {
        format!("things/{}/jobs/{}/get", self.device_id, job_id)
    }

    /// Job documents arrive on this pattern (any job id).
    pub fn describe_accepted(&self) -> String {
        format!("things/{}/jobs/+/get/accepted", self.device_id)
    }

    /// Publish here to report a job-status transition.
    pub fn update_job(&self, job_id: &str) -> String {
        format!("things/{}/jobs/{}/update", self.device_id, job_id)
    }
}

/// Match a topic against a subscription pattern.
///
/// `+` matches exactly one level; a trailing `#` matches any remainder,
/// including none. A `#` anywhere but the last level never matches.
pub fn matches(pattern: &str, topic: &str) -> bool {
    let mut pat = pattern.split('/');
    let mut top = topic.split('/');
    loop {
        match (pat.next(), top.next()) {
            (Some("#"), _) => return pat.next().is_none(),
            (Some("+"), Some(_)) => continue,
            (Some(p), Some(t)) if p == t => continue,
            (None, None) => return true,
            _ => return false,
        }
    }
}

#[cfg(test)]
#[path = "topic_tests.rs"]
mod tests;
