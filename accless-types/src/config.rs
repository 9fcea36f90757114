// SPDX-FileCopyrightText: © 2025 The Project Contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Attestation configuration, loaded once at instance start.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("bad attestation service endpoint: {0:?}")]
    BadAsEndpoint(String),
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttestationConfig {
    /// `[https://]host:port` of the attestation service.
    pub attestation_service_url: String,
    /// Whether attestation is enabled for this TEE instance.
    #[serde(default)]
    pub attestation_enabled: bool,
}

impl AttestationConfig {
    /// Load and validate a JSON config file. Endpoint faults fail here, at
    /// startup, rather than on the first attestation.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(&std::fs::read_to_string(path)?)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        split_host_port(&self.attestation_service_url)?;
        Ok(())
    }
}

/// Split `[https://]host:port` into its parts. A missing or empty host or
/// port is an endpoint fault.
pub fn split_host_port(url: &str) -> Result<(&str, u16), ConfigError> {
    let stripped = url.strip_prefix("https://").unwrap_or(url);
    let bad = || ConfigError::BadAsEndpoint(url.to_string());
    let (host, port) = stripped.split_once(':').ok_or_else(bad)?;
    if host.is_empty() || port.is_empty() {
        return Err(bad());
    }
    let port: u16 = port.parse().map_err(|_| bad())?;
    Ok((host, port))
}
