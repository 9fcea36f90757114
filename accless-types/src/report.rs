// SPDX-FileCopyrightText: © 2025 The Project Contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Typed views over the platform report and QE target info.

use crate::{ModelError, EnclaveHeldData, MEASUREMENT_SIZE, REPORT_DATA_SIZE};

/// Size of the QE targeting blob handed back by the host.
pub const TARGET_INFO_SIZE: usize = 512;

/// Size of a full platform report: attested body plus key id and MAC.
pub const REPORT_SIZE: usize = 432;

/// Size of the attested report body (the part the quote embeds).
pub const REPORT_BODY_SIZE: usize = 384;

const MEASUREMENT_OFFSET: usize = 64;
const REPORT_DATA_OFFSET: usize = 320;

/// Opaque targeting info for the Quoting Enclave.
///
/// The enclave never interprets it; it only flows from the host bridge into
/// report generation.
#[derive(Clone, Copy)]
pub struct TargetInfo(pub [u8; TARGET_INFO_SIZE]);

impl TargetInfo {
    pub fn zeroed() -> Self {
        Self([0u8; TARGET_INFO_SIZE])
    }
}

/// A platform-attested report.
///
/// Fixed layout; the fields this system reads are the code measurement at
/// body offset 64 and the caller-bound `report_data` at body offset 320.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Report([u8; REPORT_SIZE]);

impl Report {
    /// Wrap raw report bytes, rejecting any size mismatch.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ModelError> {
        let raw: [u8; REPORT_SIZE] = bytes.try_into().map_err(|_| {
            ModelError::MalformedReport(format!(
                "expected {REPORT_SIZE} bytes, got {}",
                bytes.len()
            ))
        })?;
        Ok(Self(raw))
    }

    pub fn as_bytes(&self) -> &[u8; REPORT_SIZE] {
        &self.0
    }

    /// The attested body, which the QE copies verbatim into the quote.
    pub fn body(&self) -> &[u8] {
        &self.0[..REPORT_BODY_SIZE]
    }

    /// The 32-byte SHA-256 measurement of the loaded code.
    pub fn measurement(&self) -> [u8; MEASUREMENT_SIZE] {
        let mut out = [0u8; MEASUREMENT_SIZE];
        out.copy_from_slice(&self.0[MEASUREMENT_OFFSET..MEASUREMENT_OFFSET + MEASUREMENT_SIZE]);
        out
    }

    /// The caller-supplied data bound into the report.
    pub fn report_data(&self) -> EnclaveHeldData {
        let mut out = [0u8; REPORT_DATA_SIZE];
        out.copy_from_slice(&self.0[REPORT_DATA_OFFSET..REPORT_DATA_OFFSET + REPORT_DATA_SIZE]);
        out
    }
}

impl std::fmt::Debug for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Report")
            .field("measurement", &hex::encode(self.measurement()))
            .finish_non_exhaustive()
    }
}
