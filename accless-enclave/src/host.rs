// SPDX-FileCopyrightText: © 2025 The Project Contributors
//
// SPDX-License-Identifier: Apache-2.0

//! The untrusted transitions between the enclave and its host.

use accless_crypto::PUBLIC_KEY_RAW_SIZE;
use accless_types::{Report, TargetInfo};
use thiserror::Error;

use crate::error::AttestError;

/// Two-level status of an untrusted transition: the bridge itself and the
/// remote operation it drove. Any non-zero on either level is a failure.
#[derive(Debug, Clone, Copy, Error)]
#[error("transport status {transport}, remote status {remote}")]
pub struct HostCallError {
    pub transport: i32,
    pub remote: i32,
}

/// Capability interface over the untrusted host.
///
/// Nothing returned through this trait is trusted: the engine validates
/// every buffer structurally and authenticates the attestation response
/// cryptographically. A rogue host can make attestation fail, never succeed
/// wrongly.
///
/// Contract for `submit_quote`: the host quotes the report, sends the quote
/// to the attestation service, and fills the transfer slot with
/// `response_size + 64` bytes laid out as
/// `[0 .. response_size) = base64 JWE` followed by the raw 64-byte server
/// public key (`gx ‖ gy`). The service returns that key base64 encoded; the
/// bridge decodes it before filling the slot.
pub trait HostBridge {
    /// Fetch the Quoting Enclave targeting info.
    fn get_qe_target_info(&mut self) -> Result<TargetInfo, HostCallError>;

    /// Quote the report and round-trip it through the attestation service.
    /// Returns the response size and fills the transfer slot.
    fn submit_quote(&mut self, report: &Report) -> Result<u32, HostCallError>;

    /// In-place view of the shared transfer slot.
    fn transfer_bytes(&self) -> &[u8];

    /// Free the transfer slot. Called exactly once per attestation, via
    /// [`TransferSlot`].
    fn release_transfer(&mut self);
}

/// Scoped borrow of the host's transfer slot.
///
/// Holds the slot for steps of the protocol that read it in place and
/// releases it on drop, on success and failure paths alike.
pub struct TransferSlot<'h> {
    bridge: &'h mut dyn HostBridge,
    response_size: usize,
}

impl<'h> TransferSlot<'h> {
    /// Borrow the slot after a successful `submit_quote`. The slot must hold
    /// exactly the advertised `response_size` plus the raw server key;
    /// anything else is a malformed transfer and fails closed.
    pub(crate) fn acquire(
        bridge: &'h mut dyn HostBridge,
        response_size: u32,
    ) -> Result<Self, AttestError> {
        let response_size = response_size as usize;
        let total = bridge.transfer_bytes().len();
        if total != response_size + PUBLIC_KEY_RAW_SIZE {
            // Release eagerly: the guard is never constructed on this path.
            bridge.release_transfer();
            return Err(AttestError::MalformedJwe { len: total });
        }
        Ok(Self {
            bridge,
            response_size,
        })
    }

    /// The base64 JWE portion of the slot.
    pub fn jwe_base64(&self) -> &[u8] {
        &self.bridge.transfer_bytes()[..self.response_size]
    }

    /// The raw server public key appended after the JWE.
    pub fn server_pubkey(&self) -> [u8; PUBLIC_KEY_RAW_SIZE] {
        let mut out = [0u8; PUBLIC_KEY_RAW_SIZE];
        out.copy_from_slice(&self.bridge.transfer_bytes()[self.response_size..]);
        out
    }
}

impl Drop for TransferSlot<'_> {
    fn drop(&mut self) {
        self.bridge.release_transfer();
    }
}
