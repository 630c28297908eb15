// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Upkeep Contributors

//! Job-document lifecycle specs, including the downloaded-artifact paths.

use super::harness::{document, settle, update_topic, wait_until, world};
use upkeep_core::Event;

fn status_of(payload: &[u8]) -> String {
    let json: serde_json::Value = serde_json::from_slice(payload).expect("status payload");
    json["status"].as_str().expect("status string").to_string()
}

#[tokio::test]
async fn not_installed_job_is_rejected() {
    let w = world();
    w.events
        .send(Event::JobDocumentReceived {
            payload: document("7", "QUEUED", "com.absent", "5", "http://unused.local/x.pkg"),
        })
        .await
        .unwrap();

    let channel = w.channel.clone();
    wait_until(move || !channel.published_to(&update_topic("7")).is_empty()).await;

    let published = w.channel.published_to(&update_topic("7"));
    assert_eq!(published.len(), 1);
    assert_eq!(status_of(&published[0]), "REJECTED");
    assert!(w.notifier.events().is_empty());
}

#[tokio::test]
async fn current_installation_reports_succeeded() {
    let w = world();
    w.registry.install("com.foo", 5);
    w.events
        .send(Event::JobDocumentReceived {
            payload: document("8", "QUEUED", "com.foo", "5", "http://unused.local/x.pkg"),
        })
        .await
        .unwrap();

    let channel = w.channel.clone();
    wait_until(move || !channel.published_to(&update_topic("8")).is_empty()).await;

    let published = w.channel.published_to(&update_topic("8"));
    assert_eq!(published.len(), 1);
    assert_eq!(status_of(&published[0]), "SUCCEEDED");
    // no fetch: nothing landed in the download dir
    assert_eq!(std::fs::read_dir(w.download_dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn in_progress_job_with_pending_update_is_left_alone() {
    let w = world();
    w.registry.install("com.foo", 3);
    w.events
        .send(Event::JobDocumentReceived {
            payload: document("9", "IN_PROGRESS", "com.foo", "5", "http://unused.local/x.pkg"),
        })
        .await
        .unwrap();

    settle().await;
    assert!(w.channel.published().is_empty());
    assert!(w.notifier.events().is_empty());
}

#[tokio::test]
async fn worked_example_job_42() {
    // Job 42: com.foo at installed version 3, latest 5, queued.
    let mut server = mockito::Server::new_async().await;
    server.mock("GET", "/y.apk").with_body(b"apk-bytes".to_vec()).create_async().await;

    let w = world();
    w.registry.install("com.foo", 3);
    w.events
        .send(Event::JobDocumentReceived {
            payload: document("42", "QUEUED", "com.foo", "5", &format!("{}/y.apk", server.url())),
        })
        .await
        .unwrap();

    let channel = w.channel.clone();
    wait_until(move || !channel.published_to(&update_topic("42")).is_empty()).await;

    // exactly one IN_PROGRESS update on the job-42 topic
    let published = w.channel.published_to(&update_topic("42"));
    assert_eq!(published.len(), 1);
    let json: serde_json::Value = serde_json::from_slice(&published[0]).unwrap();
    assert_eq!(json["status"], "IN_PROGRESS");
    assert_eq!(json["clientToken"], "123");

    // exactly one notification, carrying the downloaded artifact
    let events = w.notifier.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].target_package, "com.foo");
    assert_eq!(events[0].extras.available_version, "5");
    assert_eq!(events[0].extras.is_update_mandatory, "true");
    let artifact = w.download_dir.path().join("com.foo-5.pkg");
    assert_eq!(events[0].extras.file_path, artifact.display().to_string());
    assert_eq!(std::fs::read(&artifact).unwrap(), b"apk-bytes");
}

#[tokio::test]
async fn failed_download_reports_failed_and_does_not_notify() {
    let mut server = mockito::Server::new_async().await;
    server.mock("GET", "/y.apk").with_status(500).create_async().await;

    let w = world();
    w.registry.install("com.foo", 3);
    w.events
        .send(Event::JobDocumentReceived {
            payload: document("43", "QUEUED", "com.foo", "5", &format!("{}/y.apk", server.url())),
        })
        .await
        .unwrap();

    let channel = w.channel.clone();
    wait_until(move || !channel.published_to(&update_topic("43")).is_empty()).await;

    let published = w.channel.published_to(&update_topic("43"));
    assert_eq!(published.len(), 1);
    assert_eq!(status_of(&published[0]), "FAILED");
    assert!(w.notifier.events().is_empty());
}

#[tokio::test]
async fn malformed_document_produces_no_side_effects() {
    let w = world();
    w.events
        .send(Event::JobDocumentReceived { payload: b"{\"execution\":{}}".to_vec() })
        .await
        .unwrap();

    settle().await;
    assert!(w.channel.published().is_empty());
    assert!(w.notifier.events().is_empty());
}

#[tokio::test]
async fn each_document_is_processed_independently() {
    // Two documents for different jobs, one rejected and one succeeded;
    // each yields exactly one status publish on its own topic.
    let w = world();
    w.registry.install("com.ok", 9);
    w.events
        .send(Event::JobDocumentReceived {
            payload: document("a", "QUEUED", "com.ok", "9", "http://unused.local/x.pkg"),
        })
        .await
        .unwrap();
    w.events
        .send(Event::JobDocumentReceived {
            payload: document("b", "QUEUED", "com.gone", "9", "http://unused.local/x.pkg"),
        })
        .await
        .unwrap();

    let channel = w.channel.clone();
    wait_until(move || {
        !channel.published_to(&update_topic("a")).is_empty()
            && !channel.published_to(&update_topic("b")).is_empty()
    })
    .await;

    assert_eq!(status_of(&w.channel.published_to(&update_topic("a"))[0]), "SUCCEEDED");
    assert_eq!(status_of(&w.channel.published_to(&update_topic("b"))[0]), "REJECTED");
}
