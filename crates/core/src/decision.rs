// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Upkeep Contributors

//! The update decision state machine.
//!
//! One job document plus one installed-app snapshot in, one decision out.
//! The caller maps the decision to effects; nothing here performs I/O.

use crate::job::Job;

/// Snapshot of an installed application, read on demand from the app
/// registry. Never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledApp {
    pub package_name: String,
    pub installed_version: u64,
}

impl InstalledApp {
    pub fn new(package_name: impl Into<String>, installed_version: u64) -> Self {
        Self { package_name: package_name.into(), installed_version }
    }
}

/// Outcome of evaluating a job document against the device state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateDecision {
    /// Target package is not installed; the job cannot apply here.
    /// Reported as `REJECTED`.
    Reject,
    /// Installed version is already current (or newer). Reported as
    /// `SUCCEEDED`.
    AlreadyCurrent,
    /// An update applies and the job is queued: download the artifact.
    /// The status publish is deferred to the fetch outcome.
    Download,
    /// An update applies but the job is already being attempted
    /// (not `QUEUED`). Leave the remote state untouched.
    Defer,
}

/// Decide what to do with a job document.
///
/// `installed` is `None` when the registry does not know the package;
/// lookup failures count as "not installed" too.
pub fn decide(job: &Job, installed: Option<&InstalledApp>) -> UpdateDecision {
    let Some(app) = installed else {
        return UpdateDecision::Reject;
    };

    if job.latest_version <= app.installed_version {
        return UpdateDecision::AlreadyCurrent;
    }

    if job.status.is_queued() {
        UpdateDecision::Download
    } else {
        UpdateDecision::Defer
    }
}

#[cfg(test)]
#[path = "decision_tests.rs"]
mod tests;
