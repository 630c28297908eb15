// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Upkeep Contributors

//! App notifier adapter: delivering update events to target applications.

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;
use upkeep_wire::{encode, AppUpdateEvent, WireError};

/// Errors from notification delivery.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("failed to encode event: {0}")]
    Encode(#[from] WireError),

    #[error("failed to write event: {0}")]
    Io(#[from] std::io::Error),
}

/// Delivers update-available events to a target application's own inbound
/// channel. Installation itself is the application's business.
#[async_trait]
pub trait AppNotifier: Clone + Send + Sync + 'static {
    async fn notify_update(&self, event: &AppUpdateEvent) -> Result<(), NotifyError>;
}

/// Notifier writing each event into the target application's spool
/// directory (`events_dir/{package}/`), which the application watches.
#[derive(Debug, Clone)]
pub struct SpoolNotifier {
    events_dir: PathBuf,
}

impl SpoolNotifier {
    pub fn new(events_dir: PathBuf) -> Self {
        Self { events_dir }
    }
}

#[async_trait]
impl AppNotifier for SpoolNotifier {
    async fn notify_update(&self, event: &AppUpdateEvent) -> Result<(), NotifyError> {
        let payload = encode(event)?;
        let spool = self.events_dir.join(&event.target_package);
        tokio::fs::create_dir_all(&spool).await?;
        let path = spool.join(format!("update-{}.json", event.extras.available_version));
        tokio::fs::write(&path, payload).await?;
        tracing::info!(
            package = %event.target_package,
            path = %path.display(),
            "update event delivered"
        );
        Ok(())
    }
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{AppNotifier, NotifyError};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::sync::Arc;
    use upkeep_wire::AppUpdateEvent;

    /// Notifier double recording every event.
    #[derive(Clone, Default)]
    pub struct FakeNotifier {
        inner: Arc<Mutex<Vec<AppUpdateEvent>>>,
    }

    impl FakeNotifier {
        pub fn new() -> Self {
            Self::default()
        }

        /// All delivered events, in call order.
        pub fn events(&self) -> Vec<AppUpdateEvent> {
            self.inner.lock().clone()
        }
    }

    #[async_trait]
    impl AppNotifier for FakeNotifier {
        async fn notify_update(&self, event: &AppUpdateEvent) -> Result<(), NotifyError> {
            self.inner.lock().push(event.clone());
            Ok(())
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeNotifier;

#[cfg(test)]
#[path = "notify_tests.rs"]
mod tests;
