// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Upkeep Contributors

use thiserror::Error;

/// Errors from broker channel operations.
///
/// Callers treat these as log-and-continue: publishes are fire-and-forget
/// and nothing retries.
#[derive(Debug, Error)]
pub enum BrokerError {
    #[error("mqtt client error: {0}")]
    Client(#[from] rumqttc::ClientError),
}
