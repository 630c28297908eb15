// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Upkeep Contributors

//! Client token attached to outbound requests.
//!
//! The token is opaque and static for the lifetime of the process; no
//! correlation with responses is performed beyond its presence.

use std::fmt;

/// Opaque correlation value for outbound broker requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientToken(String);

impl ClientToken {
    /// Wrap a configured token value.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Generate a fresh token, used when the configuration does not pin one.
    pub fn generate() -> Self {
        Self(nanoid::nanoid!())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
#[path = "token_tests.rs"]
mod tests;
