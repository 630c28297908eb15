// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Upkeep Contributors

//! Artifact fetcher: a bounded pool of download workers.
//!
//! Message handlers never download inline; they enqueue a `FetchSpec` and
//! move on. A fixed number of workers drain the queue, so a flood of job
//! documents cannot open unbounded concurrent connections. Once started, a
//! download runs to completion or failure: no retry, no resume, no
//! checksum, no cancellation.

use futures_util::StreamExt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::sync::{mpsc, Mutex};
use upkeep_core::{Event, FetchSpec};

/// Errors from a single artifact download.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// The fetch queue is gone; only possible during shutdown.
#[derive(Debug, Error)]
#[error("fetch queue closed")]
pub struct FetchQueueClosed;

/// Handle for enqueueing downloads on the worker pool.
#[derive(Clone)]
pub struct FetcherHandle {
    tx: mpsc::Sender<FetchSpec>,
}

impl FetcherHandle {
    /// Enqueue one download. Waits when the queue is full; that
    /// backpressure is the bound on concurrent network use.
    pub async fn enqueue(&self, spec: FetchSpec) -> Result<(), FetchQueueClosed> {
        self.tx.send(spec).await.map_err(|_| FetchQueueClosed)
    }
}

/// Start the worker pool. Completions are reported as
/// `Event::FetchFinished` on the runtime's event channel.
pub fn spawn(
    workers: usize,
    queue_depth: usize,
    download_dir: PathBuf,
    events: mpsc::Sender<Event>,
) -> FetcherHandle {
    let (tx, rx) = mpsc::channel::<FetchSpec>(queue_depth);
    let rx = Arc::new(Mutex::new(rx));
    let client = reqwest::Client::new();

    for worker in 0..workers {
        let rx = Arc::clone(&rx);
        let client = client.clone();
        let events = events.clone();
        let download_dir = download_dir.clone();
        tokio::spawn(async move {
            loop {
                // Lock only to dequeue; downloads run unlocked.
                let spec = { rx.lock().await.recv().await };
                let Some(spec) = spec else { break };

                tracing::info!(
                    worker,
                    job_id = %spec.job_id,
                    url = %spec.artifact_url,
                    "downloading artifact"
                );
                let outcome =
                    fetch(&client, &spec, &download_dir).await.map_err(|err| err.to_string());
                if let Ok(path) = &outcome {
                    tracing::info!(worker, job_id = %spec.job_id, path = %path.display(), "artifact downloaded");
                }
                if events.send(Event::FetchFinished { spec, outcome }).await.is_err() {
                    break;
                }
            }
        });
    }

    FetcherHandle { tx }
}

/// Download one artifact, streaming it to
/// `download_dir/{package}-{version}.pkg`.
async fn fetch(
    client: &reqwest::Client,
    spec: &FetchSpec,
    download_dir: &Path,
) -> Result<PathBuf, FetchError> {
    let response = client.get(&spec.artifact_url).send().await?.error_for_status()?;

    tokio::fs::create_dir_all(download_dir).await?;
    let path = download_dir.join(format!("{}-{}.pkg", spec.package_name, spec.latest_version));
    let mut file = tokio::fs::File::create(&path).await?;

    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        file.write_all(&chunk?).await?;
    }
    file.flush().await?;

    Ok(path)
}

#[cfg(test)]
#[path = "fetcher_tests.rs"]
mod tests;
