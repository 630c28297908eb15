// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Upkeep Contributors

//! Session manager: the one broker connection and its dispatch loop.
//!
//! The broker client's callback surface is consumed as an inbound event
//! channel; routing to handlers happens here, and suspension only ever
//! occurs at channel receive. A connection failure or drop is terminal for
//! the session: it is logged and the loop exits. No reconnection is
//! attempted.

use crate::poller;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use upkeep_broker::{BrokerEvent, Channel};
use upkeep_core::{ConnectionState, Event};
use upkeep_wire::{matches, JobTopics};

/// Where a subscribed topic's messages are routed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    JobList,
    JobDocument,
}

/// The session: connection state, subscriptions, and message routing.
///
/// Constructed once at startup and shared by reference; there is no global
/// session instance.
pub struct Session<C: Channel> {
    channel: C,
    topics: JobTopics,
    routes: Vec<(String, Route)>,
    state: Arc<Mutex<ConnectionState>>,
    events: mpsc::Sender<Event>,
    poll_interval: Duration,
    poller_started: AtomicBool,
}

impl<C: Channel> Session<C> {
    pub fn new(
        channel: C,
        topics: JobTopics,
        events: mpsc::Sender<Event>,
        poll_interval: Duration,
    ) -> Self {
        let routes = vec![
            (topics.get_jobs_accepted(), Route::JobList),
            (topics.describe_accepted(), Route::JobDocument),
        ];
        Self {
            channel,
            topics,
            routes,
            state: Arc::new(Mutex::new(ConnectionState::Disconnected)),
            events,
            poll_interval,
            poller_started: AtomicBool::new(false),
        }
    }

    pub fn connection_state(&self) -> ConnectionState {
        *self.state.lock()
    }

    /// Consume broker events until the connection dies or the session is
    /// cancelled.
    pub async fn run(&self, mut broker_events: mpsc::Receiver<BrokerEvent>, cancel: CancellationToken) {
        *self.state.lock() = ConnectionState::Connecting;
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("session cancelled");
                    break;
                }
                event = broker_events.recv() => match event {
                    Some(BrokerEvent::Connected) => self.on_connected().await,
                    Some(BrokerEvent::Message { topic, payload }) => {
                        self.dispatch(&topic, payload).await;
                    }
                    Some(BrokerEvent::Disconnected { reason }) => {
                        *self.state.lock() = ConnectionState::Disconnected;
                        tracing::error!(%reason, "broker connection lost");
                        break;
                    }
                    None => {
                        *self.state.lock() = ConnectionState::Disconnected;
                        tracing::info!("broker event stream ended");
                        break;
                    }
                }
            }
        }
    }

    /// First contact: subscribe to the job topics and start the poller.
    /// The poller starts once and outlives any later state changes.
    async fn on_connected(&self) {
        *self.state.lock() = ConnectionState::Connected;
        tracing::info!(device_id = %self.topics.device_id(), "connected to broker");

        for pattern in [self.topics.get_jobs_accepted(), self.topics.describe_accepted()] {
            match self.channel.subscribe(&pattern).await {
                Ok(()) => tracing::info!(%pattern, "subscribed"),
                Err(err) => tracing::error!(%pattern, error = %err, "subscription failed"),
            }
        }

        if !self.poller_started.swap(true, Ordering::SeqCst) {
            let _ = poller::start(self.poll_interval, self.events.clone());
            tracing::info!(
                interval_secs = self.poll_interval.as_secs(),
                "started polling for new jobs"
            );
        }
    }

    /// Route one inbound message by topic pattern.
    async fn dispatch(&self, topic: &str, payload: Vec<u8>) {
        let route = self
            .routes
            .iter()
            .find(|(pattern, _)| matches(pattern, topic))
            .map(|(_, route)| *route);

        let event = match route {
            Some(Route::JobList) => Event::JobListReceived { payload },
            Some(Route::JobDocument) => Event::JobDocumentReceived { payload },
            None => {
                tracing::warn!(%topic, "message on unrouted topic");
                return;
            }
        };
        if self.events.send(event).await.is_err() {
            tracing::warn!(%topic, "runtime gone, dropping message");
        }
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
