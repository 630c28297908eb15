// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Upkeep Contributors

//! Effect executor.
//!
//! Every failure here degrades to a log line: publishes are best-effort,
//! notifications are the target application's problem once written, and a
//! full fetch queue only delays the enqueue.

use crate::adapters::AppNotifier;
use crate::fetcher::FetcherHandle;
use crate::reporter::StatusReporter;
use upkeep_broker::Channel;
use upkeep_core::Effect;
use upkeep_wire::AppUpdateEvent;

/// Executes effects against the broker channel and the device adapters.
pub struct Executor<C: Channel, N: AppNotifier> {
    channel: C,
    reporter: StatusReporter<C>,
    notifier: N,
    fetcher: FetcherHandle,
}

impl<C: Channel, N: AppNotifier> Executor<C, N> {
    pub fn new(
        channel: C,
        reporter: StatusReporter<C>,
        notifier: N,
        fetcher: FetcherHandle,
    ) -> Self {
        Self { channel, reporter, notifier, fetcher }
    }

    /// Execute a single effect with tracing.
    pub async fn execute(&self, effect: Effect) {
        let info = {
            let fields = effect.fields();
            let mut fmt = String::new();
            for (key, val) in fields {
                if !fmt.is_empty() {
                    fmt.push(' ');
                }
                fmt.push_str(key);
                fmt.push('=');
                fmt.push_str(&val);
            }
            fmt
        };
        tracing::debug!("executing effect={} {}", effect.name(), info);

        match effect {
            Effect::Publish { topic, payload } => {
                if let Err(err) = self.channel.publish(&topic, payload).await {
                    tracing::error!(%topic, error = %err, "publish failed");
                }
            }
            Effect::Report { job_id, status } => {
                self.reporter.report(&job_id, &status).await;
            }
            Effect::Fetch { spec } => {
                if let Err(err) = self.fetcher.enqueue(spec).await {
                    tracing::error!(error = %err, "could not enqueue fetch");
                }
            }
            Effect::NotifyApp { package_name, latest_version, artifact_path } => {
                let event =
                    AppUpdateEvent::update_available(&package_name, latest_version, &artifact_path);
                if let Err(err) = self.notifier.notify_update(&event).await {
                    tracing::error!(package = %package_name, error = %err, "notification failed");
                }
            }
        }
    }
}
