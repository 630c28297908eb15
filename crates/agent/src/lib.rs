// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Upkeep Contributors

//! upkeep-agent: the job lifecycle engine.
//!
//! Wiring: the session manager consumes broker events and routes job
//! messages into the runtime's event channel; the poller ticks into the
//! same channel; the processor turns events into effects; the executor
//! performs them against the broker channel, the fetcher pool, and the
//! device adapters.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod adapters;
pub mod config;
pub mod env;
pub mod executor;
pub mod fetcher;
pub mod poller;
pub mod processor;
pub mod reporter;
pub mod runtime;
pub mod session;

#[cfg(any(test, feature = "test-support"))]
pub use adapters::{FakeNotifier, FakeRegistry};
pub use adapters::{AppNotifier, AppRegistry, ManifestRegistry, NotifyError, SpoolNotifier};
pub use config::{AgentConfig, ConfigError};
pub use executor::Executor;
pub use fetcher::{FetchError, FetcherHandle};
pub use processor::Processor;
pub use reporter::StatusReporter;
pub use runtime::Runtime;
pub use session::Session;
