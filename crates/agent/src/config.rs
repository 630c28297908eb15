// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Upkeep Contributors

//! Agent configuration.
//!
//! One TOML file, loaded at startup and threaded through constructors.
//! Environment variables override individual fields (see [`crate::env`]);
//! nothing reads configuration after startup.

use crate::env;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use upkeep_broker::{BrokerSettings, FsCredentialStore, LastWillConfig};

/// Errors from configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Deserialize)]
pub struct AgentConfig {
    /// The identity this device registered with the orchestrator.
    pub device_id: String,
    #[serde(default)]
    pub broker: BrokerConfig,
    #[serde(default)]
    pub credentials: CredentialPaths,
    #[serde(default)]
    pub jobs: JobsConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BrokerConfig {
    pub host: String,
    pub port: u16,
    pub keep_alive_secs: u64,
    pub last_will_topic: Option<String>,
    pub last_will_payload: Option<String>,
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 1883,
            keep_alive_secs: 10,
            last_will_topic: None,
            last_will_payload: None,
        }
    }
}

/// PEM paths for the broker client identity. All or none.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CredentialPaths {
    pub ca_path: Option<PathBuf>,
    pub cert_path: Option<PathBuf>,
    pub key_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct JobsConfig {
    /// Fixed job-discovery period. No jitter, no backoff.
    pub poll_interval_secs: u64,
    /// Static client token for outbound requests. Generated at startup
    /// when unset.
    pub client_token: Option<String>,
    /// `stepTimeoutInMinutes` sent with every status update.
    pub step_timeout_minutes: u64,
    /// Size of the artifact download worker pool.
    pub fetch_workers: usize,
    /// Pending fetch requests before enqueueing applies backpressure.
    pub fetch_queue_depth: usize,
}

impl Default for JobsConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: 30,
            client_token: None,
            step_timeout_minutes: 10_000,
            fetch_workers: 4,
            fetch_queue_depth: 16,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Where downloaded artifacts land.
    pub download_dir: PathBuf,
    /// Installed-apps manifest maintained by the device's package tooling.
    pub manifest_path: PathBuf,
    /// Root of the per-application event spool directories.
    pub events_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        let base = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("/var/lib"))
            .join("upkeep");
        Self {
            download_dir: base.join("artifacts"),
            manifest_path: base.join("apps.json"),
            events_dir: base.join("events"),
        }
    }
}

impl AgentConfig {
    /// Load configuration from a TOML file, then apply environment
    /// overrides.
    pub fn load(path: &Path) -> Result<AgentConfig, ConfigError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        let mut config: AgentConfig = toml::from_str(&raw)?;
        config.apply_env_overrides();
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Some(device_id) = env::device_id() {
            self.device_id = device_id;
        }
        if let Some(host) = env::broker_host() {
            self.broker.host = host;
        }
        if let Some(port) = env::broker_port() {
            self.broker.port = port;
        }
        if let Some(secs) = env::poll_interval_secs() {
            self.jobs.poll_interval_secs = secs;
        }
        if let Some(dir) = env::download_dir() {
            self.storage.download_dir = dir;
        }
    }

    /// Connection parameters for the broker channel.
    pub fn broker_settings(&self) -> BrokerSettings {
        let last_will = match (&self.broker.last_will_topic, &self.broker.last_will_payload) {
            (Some(topic), Some(payload)) => {
                Some(LastWillConfig { topic: topic.clone(), payload: payload.clone() })
            }
            _ => None,
        };
        BrokerSettings {
            device_id: self.device_id.clone(),
            host: self.broker.host.clone(),
            port: self.broker.port,
            keep_alive: Duration::from_secs(self.broker.keep_alive_secs),
            last_will,
        }
    }

    /// Credential store for the configured PEM paths.
    pub fn credential_store(&self) -> FsCredentialStore {
        FsCredentialStore::new(
            self.credentials.ca_path.clone(),
            self.credentials.cert_path.clone(),
            self.credentials.key_path.clone(),
        )
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.jobs.poll_interval_secs)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
