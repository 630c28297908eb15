// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Upkeep Contributors

//! Job identity, status, and the job value acted on by the decision logic.

use std::borrow::Borrow;
use std::fmt;

/// Unique identifier for an update job.
///
/// Job ids are assigned by the remote orchestrator and arrive in broker
/// messages; the agent never generates one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JobId(pub String);

impl JobId {
    /// Create a new JobId from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the string value of this JobId.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for JobId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for JobId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl PartialEq<str> for JobId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for JobId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl Borrow<str> for JobId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Remote-side status of a job.
///
/// The orchestrator owns the authoritative state machine; the agent only
/// publishes statuses derived from its own decisions. Status strings it does
/// not know are carried as `Unrecognized` so the reporter can skip them
/// instead of inventing a mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    Queued,
    InProgress,
    Succeeded,
    Rejected,
    TimedOut,
    Failed,
    Unrecognized(String),
}

impl JobStatus {
    /// The fixed status-to-wire-string table.
    ///
    /// Returns `None` for `Unrecognized`; callers must skip the publish.
    pub fn wire_str(&self) -> Option<&'static str> {
        match self {
            JobStatus::Queued => Some("QUEUED"),
            JobStatus::InProgress => Some("IN_PROGRESS"),
            JobStatus::Succeeded => Some("SUCCEEDED"),
            JobStatus::Rejected => Some("REJECTED"),
            JobStatus::TimedOut => Some("TIMED_OUT"),
            JobStatus::Failed => Some("FAILED"),
            JobStatus::Unrecognized(_) => None,
        }
    }

    /// Parse a wire status string; unknown values are carried, not rejected.
    pub fn from_wire(s: &str) -> Self {
        match s {
            "QUEUED" => JobStatus::Queued,
            "IN_PROGRESS" => JobStatus::InProgress,
            "SUCCEEDED" => JobStatus::Succeeded,
            "REJECTED" => JobStatus::Rejected,
            "TIMED_OUT" => JobStatus::TimedOut,
            "FAILED" => JobStatus::Failed,
            other => JobStatus::Unrecognized(other.to_string()),
        }
    }

    /// Whether this job is still waiting to be picked up.
    pub fn is_queued(&self) -> bool {
        matches!(self, JobStatus::Queued)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobStatus::Queued => f.write_str("queued"),
            JobStatus::InProgress => f.write_str("in_progress"),
            JobStatus::Succeeded => f.write_str("succeeded"),
            JobStatus::Rejected => f.write_str("rejected"),
            JobStatus::TimedOut => f.write_str("timed_out"),
            JobStatus::Failed => f.write_str("failed"),
            JobStatus::Unrecognized(s) => f.write_str(s),
        }
    }
}

/// A single update job, as described by its most recent job document.
///
/// Job values are ephemeral: constructed from one inbound message, consumed
/// by the decision logic, and discarded. There is no job table and no
/// cross-message merging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub id: JobId,
    pub status: JobStatus,
    /// Package name of the target application.
    pub package_name: String,
    /// Human-readable application name.
    pub app_name: String,
    /// Version code offered by this job, parsed from its wire string.
    pub latest_version: u64,
    /// Where to download the update artifact from.
    pub artifact_url: String,
}

#[cfg(any(test, feature = "test-support"))]
pub struct JobBuilder {
    id: String,
    status: JobStatus,
    package_name: String,
    app_name: String,
    latest_version: u64,
    artifact_url: String,
}

#[cfg(any(test, feature = "test-support"))]
impl Default for JobBuilder {
    fn default() -> Self {
        Self {
            id: "job-1".to_string(),
            status: JobStatus::Queued,
            package_name: "com.example.app".to_string(),
            app_name: "Example".to_string(),
            latest_version: 2,
            artifact_url: "http://updates.local/example.pkg".to_string(),
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
impl JobBuilder {
    pub fn id(mut self, v: impl Into<String>) -> Self {
        self.id = v.into();
        self
    }

    pub fn status(mut self, v: JobStatus) -> Self {
        self.status = v;
        self
    }

    pub fn package_name(mut self, v: impl Into<String>) -> Self {
        self.package_name = v.into();
        self
    }

    pub fn app_name(mut self, v: impl Into<String>) -> Self {
        self.app_name = v.into();
        self
    }

    pub fn latest_version(mut self, v: u64) -> Self {
        self.latest_version = v;
        self
    }

    pub fn artifact_url(mut self, v: impl Into<String>) -> Self {
        self.artifact_url = v.into();
        self
    }

    pub fn build(self) -> Job {
        Job {
            id: JobId::new(self.id),
            status: self.status,
            package_name: self.package_name,
            app_name: self.app_name,
            latest_version: self.latest_version,
            artifact_url: self.artifact_url,
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
impl Job {
    /// Create a builder with test defaults.
    pub fn builder() -> JobBuilder {
        JobBuilder::default()
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
