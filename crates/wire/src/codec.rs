// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Upkeep Contributors

//! JSON encode/decode for broker payloads.

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// Errors from payload encoding/decoding.
///
/// A decode failure aborts processing of that one message; nothing is
/// published in response to a malformed payload.
#[derive(Debug, Error)]
pub enum WireError {
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("job {job_id}: latestVersion {value:?} is not an integer version code")]
    Version { job_id: String, value: String },
}

/// Encode a payload as JSON bytes.
pub fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, WireError> {
    Ok(serde_json::to_vec(value)?)
}

/// Decode JSON bytes into a payload type. Unknown fields are tolerated;
/// missing fields are errors.
pub fn decode<T: DeserializeOwned>(payload: &[u8]) -> Result<T, WireError> {
    Ok(serde_json::from_slice(payload)?)
}
