// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Upkeep Contributors

//! Events consumed by the agent runtime.
//!
//! Everything that can make the agent act arrives here: poller ticks,
//! routed broker messages, and fetch completions. Message payloads stay
//! raw; decoding is the processor's job, so a malformed payload drops
//! only its own message.

use crate::effect::FetchSpec;
use std::path::PathBuf;

/// An occurrence the runtime dispatches to a handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Periodic job-discovery tick from the poller.
    PollTick,

    /// A job-list response arrived on the get-accepted topic.
    JobListReceived { payload: Vec<u8> },

    /// A job document arrived on the describe-accepted topic.
    JobDocumentReceived { payload: Vec<u8> },

    /// An artifact download finished, successfully or not.
    FetchFinished { spec: FetchSpec, outcome: Result<PathBuf, String> },
}

impl Event {
    /// Event name for log lines.
    pub fn name(&self) -> &'static str {
        match self {
            Event::PollTick => "poll_tick",
            Event::JobListReceived { .. } => "job_list_received",
            Event::JobDocumentReceived { .. } => "job_document_received",
            Event::FetchFinished { .. } => "fetch_finished",
        }
    }
}
