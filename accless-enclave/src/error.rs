// SPDX-FileCopyrightText: © 2025 The Project Contributors
//
// SPDX-License-Identifier: Apache-2.0

use accless_crypto::CryptoError;
use accless_types::ModelError;
use thiserror::Error;

use crate::host::HostCallError;

/// Attestation failures surfaced to the sandbox frontier.
///
/// Cryptographic and structural failures are never swallowed; the workload
/// sees a trap. Messages carry no key material or token plaintext.
#[derive(Debug, Error)]
pub enum AttestError {
    #[error("host call failed (transport status {transport}, remote status {remote})")]
    HostCallFailed { transport: i32, remote: i32 },
    #[error("failed to generate report: {0}")]
    ReportGenFailed(String),
    #[error("malformed JWE ({len} bytes)")]
    MalformedJwe { len: usize },
    #[error(transparent)]
    MalformedReport(#[from] ModelError),
    #[error("server public key is not a valid point on the curve")]
    InvalidPublicKey,
    #[error("attestation response rejected: authentication tag mismatch")]
    AttestationRejected,
    #[error("sandbox allocation of {len} bytes failed")]
    OutOfSandboxMemory { len: usize },
    #[error("no cached report: attestation has not succeeded yet")]
    NoCachedReport,
    #[error("invalid argument: {0}")]
    InvalidArgs(String),
    #[error("crypto backend failure: {0}")]
    Crypto(CryptoError),
}

impl From<CryptoError> for AttestError {
    fn from(err: CryptoError) -> Self {
        match err {
            CryptoError::InvalidPublicKey => Self::InvalidPublicKey,
            // A bad tag means the response was not encrypted to our key:
            // man-in-the-middle or wrong-key. Must not be retried as-is.
            CryptoError::MacMismatch => Self::AttestationRejected,
            other => Self::Crypto(other),
        }
    }
}

impl From<HostCallError> for AttestError {
    fn from(err: HostCallError) -> Self {
        Self::HostCallFailed {
            transport: err.transport,
            remote: err.remote,
        }
    }
}
