// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Upkeep Contributors

//! App registry adapter: what is installed on this device, at what version.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use upkeep_core::InstalledApp;

/// Read-on-demand view of the device's installed applications.
#[async_trait]
pub trait AppRegistry: Clone + Send + Sync + 'static {
    /// Installed snapshot for a package.
    ///
    /// `None` covers both "not installed" and "lookup failed"; the
    /// decision logic treats them identically.
    async fn installed(&self, package_name: &str) -> Option<InstalledApp>;
}

/// Registry backed by the installed-apps manifest the device's package
/// tooling maintains: a JSON object mapping package name to version code.
///
/// The manifest is re-read on every lookup; job documents must see the
/// device state at decision time, not a cached one.
#[derive(Debug, Clone)]
pub struct ManifestRegistry {
    path: PathBuf,
}

impl ManifestRegistry {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl AppRegistry for ManifestRegistry {
    async fn installed(&self, package_name: &str) -> Option<InstalledApp> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(err) => {
                tracing::debug!(path = %self.path.display(), error = %err, "manifest unreadable");
                return None;
            }
        };
        let manifest: HashMap<String, u64> = match serde_json::from_slice(&raw) {
            Ok(manifest) => manifest,
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "manifest malformed");
                return None;
            }
        };
        manifest
            .get(package_name)
            .map(|&version| InstalledApp::new(package_name, version))
    }
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::AppRegistry;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::collections::HashMap;
    use std::sync::Arc;
    use upkeep_core::InstalledApp;

    /// In-memory registry for testing.
    #[derive(Clone, Default)]
    pub struct FakeRegistry {
        inner: Arc<Mutex<HashMap<String, u64>>>,
    }

    impl FakeRegistry {
        pub fn new() -> Self {
            Self::default()
        }

        /// Mark a package as installed at a version.
        pub fn install(&self, package_name: &str, version: u64) {
            self.inner.lock().insert(package_name.to_string(), version);
        }

        pub fn remove(&self, package_name: &str) {
            self.inner.lock().remove(package_name);
        }
    }

    #[async_trait]
    impl AppRegistry for FakeRegistry {
        async fn installed(&self, package_name: &str) -> Option<InstalledApp> {
            self.inner
                .lock()
                .get(package_name)
                .map(|&version| InstalledApp::new(package_name, version))
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeRegistry;

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
