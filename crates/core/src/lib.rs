// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Upkeep Contributors

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! upkeep-core: domain types and decision logic for the upkeep update agent.
//!
//! Everything in this crate is pure: jobs, statuses, the update decision
//! state machine, and the event/effect vocabulary the agent runtime speaks.
//! No I/O happens here.

pub mod connection;
pub mod decision;
pub mod effect;
pub mod event;
pub mod job;
pub mod token;

pub use connection::ConnectionState;
pub use decision::{decide, InstalledApp, UpdateDecision};
pub use effect::{Effect, FetchSpec};
pub use event::Event;
#[cfg(any(test, feature = "test-support"))]
pub use job::JobBuilder;
pub use job::{Job, JobId, JobStatus};
pub use token::ClientToken;
