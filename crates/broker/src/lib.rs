// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Upkeep Contributors

//! Broker channel for the upkeep update agent.
//!
//! - `Channel` trait for publish/subscribe (mockable in tests)
//! - `MqttChannel` over rumqttc, with optional mTLS client identity
//! - `MockChannel` for testing without a broker (behind `test-support`)
//! - credential loading for the client identity

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod channel;
pub mod credential;
pub mod error;
pub mod mqtt;
#[cfg(any(test, feature = "test-support"))]
pub mod mock;

pub use channel::{BrokerEvent, Channel};
pub use credential::{ClientCredential, CredentialError, FsCredentialStore, TlsMaterial};
pub use error::BrokerError;
#[cfg(any(test, feature = "test-support"))]
pub use mock::MockChannel;
pub use mqtt::{BrokerSettings, LastWillConfig, MqttChannel, MqttEventStream};
