// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Upkeep Contributors

//! Shared world for lifecycle specs: a running runtime over fakes.

use std::time::Duration;
use tokio::sync::mpsc;
use upkeep_agent::{fetcher, Executor, FakeNotifier, FakeRegistry, Processor, Runtime, StatusReporter};
use upkeep_broker::MockChannel;
use upkeep_core::{ClientToken, Event};
use upkeep_wire::JobTopics;

pub const DEVICE: &str = "device-1";

pub struct World {
    pub channel: MockChannel,
    pub registry: FakeRegistry,
    pub notifier: FakeNotifier,
    pub events: mpsc::Sender<Event>,
    pub download_dir: tempfile::TempDir,
}

/// Build the runtime with fakes and spawn its event loop.
pub fn world() -> World {
    let channel = MockChannel::new();
    let registry = FakeRegistry::new();
    let notifier = FakeNotifier::new();
    let download_dir = tempfile::tempdir().expect("tempdir");
    let topics = JobTopics::new(DEVICE);
    let token = ClientToken::new("123");

    let (events_tx, events_rx) = mpsc::channel(64);
    let fetcher_handle =
        fetcher::spawn(2, 8, download_dir.path().to_path_buf(), events_tx.clone());

    let reporter = StatusReporter::new(channel.clone(), topics.clone(), token.clone(), 10_000);
    let processor = Processor::new(topics, token, registry.clone());
    let executor = Executor::new(channel.clone(), reporter, notifier.clone(), fetcher_handle);
    tokio::spawn(Runtime::new(processor, executor).run(events_rx));

    World { channel, registry, notifier, events: events_tx, download_dir }
}

/// Poll until `condition` holds or a few seconds pass.
pub async fn wait_until(mut condition: impl FnMut() -> bool) {
    for _ in 0..600 {
        if condition() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("condition not reached in time");
}

/// Wait long enough that anything pending would have happened.
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(250)).await;
}

/// A job document payload as the broker delivers it.
pub fn document(job_id: &str, status: &str, package: &str, latest: &str, url: &str) -> Vec<u8> {
    serde_json::to_vec(&serde_json::json!({
        "execution": {
            "jobId": job_id,
            "status": status,
            "jobDocument": {
                "packageName": package,
                "appName": "Foo",
                "latestVersion": latest,
                "artifactURL": url,
            }
        }
    }))
    .expect("encode document")
}

pub fn update_topic(job_id: &str) -> String {
    format!("things/{DEVICE}/jobs/{job_id}/update")
}
