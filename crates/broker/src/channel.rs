// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Upkeep Contributors

//! The channel boundary between the agent and its broker client.

use crate::error::BrokerError;
use async_trait::async_trait;

/// Publish/subscribe operations against the broker.
///
/// The agent is generic over this trait so tests run against `MockChannel`
/// while production uses the rumqttc-backed `MqttChannel`.
#[async_trait]
pub trait Channel: Clone + Send + Sync + 'static {
    /// Best-effort publish; callers never await delivery acknowledgement.
    async fn publish(&self, topic: &str, payload: Vec<u8>) -> Result<(), BrokerError>;

    /// Register a subscription pattern (`+` / trailing `#` wildcards).
    async fn subscribe(&self, pattern: &str) -> Result<(), BrokerError>;

    /// Orderly disconnect from the broker.
    async fn disconnect(&self) -> Result<(), BrokerError>;
}

/// Inbound occurrences from the broker connection, in arrival order.
///
/// The client library's callback surface is flattened into this stream; the
/// session manager consumes it from a single dispatch loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrokerEvent {
    /// The broker acknowledged the connection.
    Connected,
    /// A message arrived on a subscribed topic.
    Message { topic: String, payload: Vec<u8> },
    /// The connection failed or dropped. Terminal: the agent does not
    /// reconnect.
    Disconnected { reason: String },
}
