// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Upkeep Contributors

//! Broker wire format for the upkeep update agent.
//!
//! JSON payloads exchanged over job topics, the topic templates themselves,
//! and the subscription pattern grammar (`+` single level, trailing `#`
//! multi level).

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod codec;
mod payload;
mod topic;

pub use codec::{decode, encode, WireError};
pub use payload::{
    AppUpdateEvent, DescribeJobRequest, GetJobsRequest, GetJobsResponse, JobDocument,
    JobExecution, JobExecutionEnvelope, JobStub, UpdateExtras, UpdateJobRequest,
};
pub use topic::{matches, JobTopics};

#[cfg(test)]
mod property_tests;
