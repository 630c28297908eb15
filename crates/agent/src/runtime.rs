// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Upkeep Contributors

//! The runtime event loop: one consumer, many producers.
//!
//! The session, the poller, and the fetch workers all feed one channel;
//! events are handled strictly one at a time, so the decide-then-publish
//! sequence for a single message is never re-entered. Ordering across jobs
//! is deliberately unspecified.

use crate::adapters::{AppNotifier, AppRegistry};
use crate::executor::Executor;
use crate::processor::Processor;
use tokio::sync::mpsc;
use upkeep_broker::Channel;
use upkeep_core::Event;

/// Ties the processor and executor to the event channel.
pub struct Runtime<R: AppRegistry, C: Channel, N: AppNotifier> {
    processor: Processor<R>,
    executor: Executor<C, N>,
}

impl<R: AppRegistry, C: Channel, N: AppNotifier> Runtime<R, C, N> {
    pub fn new(processor: Processor<R>, executor: Executor<C, N>) -> Self {
        Self { processor, executor }
    }

    /// Consume events until every producer is gone.
    pub async fn run(self, mut events: mpsc::Receiver<Event>) {
        while let Some(event) = events.recv().await {
            tracing::debug!(event = event.name(), "handling event");
            let effects = self.processor.handle(event).await;
            for effect in effects {
                self.executor.execute(effect).await;
            }
        }
        tracing::info!("event channel closed, runtime stopping");
    }
}
