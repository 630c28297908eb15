// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Upkeep Contributors

//! Mock channel for testing without a broker.

use crate::channel::Channel;
use crate::error::BrokerError;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;

/// A recorded publish call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishCall {
    pub topic: String,
    pub payload: Vec<u8>,
}

#[derive(Default)]
struct MockState {
    published: Vec<PublishCall>,
    subscriptions: Vec<String>,
    disconnected: bool,
}

/// Channel double that records every call.
#[derive(Clone, Default)]
pub struct MockChannel {
    inner: Arc<Mutex<MockState>>,
}

impl MockChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// All publishes, in call order.
    pub fn published(&self) -> Vec<PublishCall> {
        self.inner.lock().published.clone()
    }

    /// Publishes to one topic, in call order.
    pub fn published_to(&self, topic: &str) -> Vec<Vec<u8>> {
        self.inner
            .lock()
            .published
            .iter()
            .filter(|call| call.topic == topic)
            .map(|call| call.payload.clone())
            .collect()
    }

    /// Registered subscription patterns, in call order.
    pub fn subscriptions(&self) -> Vec<String> {
        self.inner.lock().subscriptions.clone()
    }

    pub fn is_disconnected(&self) -> bool {
        self.inner.lock().disconnected
    }

    /// Drop all recorded calls.
    pub fn clear(&self) {
        let mut state = self.inner.lock();
        state.published.clear();
        state.subscriptions.clear();
    }
}

#[async_trait]
impl Channel for MockChannel {
    async fn publish(&self, topic: &str, payload: Vec<u8>) -> Result<(), BrokerError> {
        self.inner
            .lock()
            .published
            .push(PublishCall { topic: topic.to_string(), payload });
        Ok(())
    }

    async fn subscribe(&self, pattern: &str) -> Result<(), BrokerError> {
        self.inner.lock().subscriptions.push(pattern.to_string());
        Ok(())
    }

    async fn disconnect(&self) -> Result<(), BrokerError> {
        self.inner.lock().disconnected = true;
        Ok(())
    }
}

#[cfg(test)]
#[path = "mock_tests.rs"]
mod tests;
