// SPDX-FileCopyrightText: © 2025 The Project Contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Shared data model for the accless remote attestation core.
//!
//! The binary layouts in this crate mirror the platform's fixed-size report
//! and quote structures bit for bit; every constructor validates sizes and
//! the held-data binding so that malformed material from outside the trust
//! boundary is rejected before it reaches any cryptography.

pub mod config;
pub mod quote;
pub mod report;

pub use config::{AttestationConfig, ConfigError};
pub use quote::{EnclaveInfo, Quote};
pub use report::{Report, TargetInfo};

use thiserror::Error;

/// Size of the caller-supplied data field bound into a report.
pub const REPORT_DATA_SIZE: usize = 64;

/// Size of the code measurement (a SHA-256 digest).
pub const MEASUREMENT_SIZE: usize = 32;

/// The 64-byte blob bound into the report's `report_data` field.
///
/// For this system it always holds the enclave's raw public key
/// (`gx ‖ gy`), which is what lets the attestation service encrypt its
/// response to the enclave.
pub type EnclaveHeldData = [u8; REPORT_DATA_SIZE];

/// Structural validation failures of the report/quote data model.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("malformed report: {0}")]
    MalformedReport(String),
    #[error("malformed quote: {0}")]
    MalformedQuote(String),
}
