// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Upkeep Contributors

//! Client identity for the broker connection.
//!
//! Keystore provisioning happens outside the agent; this module only reads
//! the PEM material the provisioner left on disk. A device without TLS
//! material gets a plain-TCP identity, which development brokers accept.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from credential loading.
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("incomplete TLS material: ca, cert, and key must all be configured")]
    Incomplete,
}

/// PEM material for mutual TLS against the broker.
#[derive(Debug, Clone)]
pub struct TlsMaterial {
    pub ca_pem: Vec<u8>,
    pub cert_pem: Vec<u8>,
    pub key_pem: Vec<u8>,
}

/// A usable client identity: TLS material, or nothing for plain TCP.
#[derive(Debug, Clone, Default)]
pub struct ClientCredential {
    pub tls: Option<TlsMaterial>,
}

/// Credential store reading PEM files from configured paths.
#[derive(Debug, Clone)]
pub struct FsCredentialStore {
    ca_path: Option<PathBuf>,
    cert_path: Option<PathBuf>,
    key_path: Option<PathBuf>,
}

impl FsCredentialStore {
    pub fn new(
        ca_path: Option<PathBuf>,
        cert_path: Option<PathBuf>,
        key_path: Option<PathBuf>,
    ) -> Self {
        Self { ca_path, cert_path, key_path }
    }

    /// Load the client identity.
    ///
    /// All three paths configured yields an mTLS identity; none yields a
    /// plain-TCP one; anything in between is a configuration mistake.
    pub fn load(&self) -> Result<ClientCredential, CredentialError> {
        match (&self.ca_path, &self.cert_path, &self.key_path) {
            (None, None, None) => Ok(ClientCredential { tls: None }),
            (Some(ca), Some(cert), Some(key)) => Ok(ClientCredential {
                tls: Some(TlsMaterial {
                    ca_pem: read_pem(ca)?,
                    cert_pem: read_pem(cert)?,
                    key_pem: read_pem(key)?,
                }),
            }),
            _ => Err(CredentialError::Incomplete),
        }
    }
}

fn read_pem(path: &Path) -> Result<Vec<u8>, CredentialError> {
    std::fs::read(path)
        .map_err(|source| CredentialError::Read { path: path.to_path_buf(), source })
}

#[cfg(test)]
#[path = "credential_tests.rs"]
mod tests;
