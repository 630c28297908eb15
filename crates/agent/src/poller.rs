// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Upkeep Contributors

//! Job poller: the fixed-interval discovery tick.
//!
//! Started exactly once, after the first successful connection, and never
//! stopped for the lifetime of the process. No jitter, no backoff, no
//! skip-if-in-flight: overlapping get-jobs requests are possible and the
//! processor tolerates them.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use upkeep_core::Event;

/// Spawn the poller task. The first tick fires immediately.
pub fn start(interval: Duration, events: mpsc::Sender<Event>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            if events.send(Event::PollTick).await.is_err() {
                // Runtime gone: process is shutting down.
                break;
            }
        }
    })
}

#[cfg(test)]
#[path = "poller_tests.rs"]
mod tests;
