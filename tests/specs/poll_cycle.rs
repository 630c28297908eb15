// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Upkeep Contributors

//! Discovery-cycle specs: poll ticks and job-list responses.

use super::harness::{settle, wait_until, world, DEVICE};
use upkeep_core::Event;

#[tokio::test]
async fn a_poll_tick_requests_the_pending_jobs() {
    let w = world();
    w.events.send(Event::PollTick).await.unwrap();

    let channel = w.channel.clone();
    let topic = format!("things/{DEVICE}/jobs/get");
    wait_until({
        let topic = topic.clone();
        move || !channel.published_to(&topic).is_empty()
    })
    .await;

    let published = w.channel.published_to(&topic);
    assert_eq!(published.len(), 1);
    let json: serde_json::Value = serde_json::from_slice(&published[0]).unwrap();
    assert_eq!(json["clientToken"], "123");
}

#[tokio::test]
async fn overlapping_poll_ticks_each_publish() {
    // No skip-if-in-flight: every tick publishes, responses or not.
    let w = world();
    w.events.send(Event::PollTick).await.unwrap();
    w.events.send(Event::PollTick).await.unwrap();

    let channel = w.channel.clone();
    let topic = format!("things/{DEVICE}/jobs/get");
    wait_until({
        let topic = topic.clone();
        move || channel.published_to(&topic).len() == 2
    })
    .await;
}

#[tokio::test]
async fn list_response_describes_in_progress_then_queued() {
    let w = world();
    let payload = serde_json::to_vec(&serde_json::json!({
        "queuedJobs": [{"jobId": "A"}],
        "inProgressJobs": [{"jobId": "B"}],
    }))
    .unwrap();
    w.events.send(Event::JobListReceived { payload }).await.unwrap();

    let channel = w.channel.clone();
    wait_until(move || channel.published().len() == 2).await;

    let topics: Vec<String> = w.channel.published().into_iter().map(|c| c.topic).collect();
    assert_eq!(
        topics,
        vec![
            format!("things/{DEVICE}/jobs/B/get"),
            format!("things/{DEVICE}/jobs/A/get"),
        ]
    );
}

#[tokio::test]
async fn empty_job_list_is_quiet() {
    let w = world();
    let payload =
        serde_json::to_vec(&serde_json::json!({"queuedJobs": [], "inProgressJobs": []})).unwrap();
    w.events.send(Event::JobListReceived { payload }).await.unwrap();

    settle().await;
    assert!(w.channel.published().is_empty());
}

#[tokio::test]
async fn malformed_list_is_dropped() {
    let w = world();
    w.events.send(Event::JobListReceived { payload: b"[1,2,3]".to_vec() }).await.unwrap();

    settle().await;
    assert!(w.channel.published().is_empty());
}
