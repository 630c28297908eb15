// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Upkeep Contributors

//! Centralized environment variable access for the agent crate.

use std::path::PathBuf;

fn non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

/// Device identity override (`UPKEEP_DEVICE_ID`).
pub fn device_id() -> Option<String> {
    non_empty("UPKEEP_DEVICE_ID")
}

/// Broker host override (`UPKEEP_BROKER_HOST`).
pub fn broker_host() -> Option<String> {
    non_empty("UPKEEP_BROKER_HOST")
}

/// Broker port override (`UPKEEP_BROKER_PORT`).
pub fn broker_port() -> Option<u16> {
    non_empty("UPKEEP_BROKER_PORT").and_then(|s| s.parse().ok())
}

/// Poll interval override in seconds (`UPKEEP_POLL_INTERVAL_SECS`).
pub fn poll_interval_secs() -> Option<u64> {
    non_empty("UPKEEP_POLL_INTERVAL_SECS").and_then(|s| s.parse().ok())
}

/// Artifact download directory override (`UPKEEP_DOWNLOAD_DIR`).
pub fn download_dir() -> Option<PathBuf> {
    non_empty("UPKEEP_DOWNLOAD_DIR").map(PathBuf::from)
}
