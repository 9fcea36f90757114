// SPDX-FileCopyrightText: © 2025 The Project Contributors
//
// SPDX-License-Identifier: Apache-2.0

//! The TEE platform primitive that attests this enclave.

use accless_types::{EnclaveHeldData, Report, TargetInfo};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("invalid parameter")]
    InvalidParameter,
    #[error("platform failure: {0}")]
    Unexpected(String),
}

/// Capability interface over the platform's report instruction.
pub trait TeePlatform {
    /// Produce a report for this enclave, targeted at the QE described by
    /// `target_info`, with `held` bound into the report's `report_data`.
    fn create_report(
        &self,
        target_info: &TargetInfo,
        held: &EnclaveHeldData,
    ) -> Result<Report, PlatformError>;
}
