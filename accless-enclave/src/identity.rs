// SPDX-FileCopyrightText: © 2025 The Project Contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Per-instance enclave identity and attestation cache.

use std::sync::{Mutex, MutexGuard, OnceLock};

use accless_crypto::EcKeypair;
use accless_types::{AttestationConfig, EnclaveHeldData, Report};

use crate::error::AttestError;

// The held data is exactly the raw public key; a platform where the sizes
// diverge cannot run this protocol.
const _: () = assert!(accless_types::REPORT_DATA_SIZE == accless_crypto::PUBLIC_KEY_RAW_SIZE);

/// A successfully obtained attestation token.
///
/// `response_size` is the length of the base64 JWE as delivered by the host;
/// it is what the sandbox ABI reports back as the token size (see
/// `AttestationEngine::get_attestation_jwt`), so replays from the cache must
/// reproduce it.
#[derive(Debug, Clone)]
pub(crate) struct CachedJwt {
    pub token: String,
    pub response_size: u32,
}

/// Identity and cache for one TEE instance.
///
/// Created once at TEE boot. The keypair is immutable and the secret scalar
/// never leaves the enclave. The report and JWT cells are written at most
/// once, on the first successful attestation; concurrent readers observe
/// either the absent or the fully populated state.
pub struct EnclaveIdentity {
    keypair: EcKeypair,
    attestation_enabled: bool,
    cached_report: OnceLock<Report>,
    cached_jwt: OnceLock<CachedJwt>,
    flow: Mutex<()>,
}

impl EnclaveIdentity {
    pub fn new(config: &AttestationConfig) -> Result<Self, AttestError> {
        let keypair = EcKeypair::generate().map_err(AttestError::from)?;
        Ok(Self {
            keypair,
            attestation_enabled: config.attestation_enabled,
            cached_report: OnceLock::new(),
            cached_jwt: OnceLock::new(),
            flow: Mutex::new(()),
        })
    }

    pub fn keypair(&self) -> &EcKeypair {
        &self.keypair
    }

    /// The 64-byte blob bound into the report: the raw public key, verbatim.
    pub fn enclave_held_data(&self) -> EnclaveHeldData {
        *self.keypair.public_raw()
    }

    pub fn is_enabled(&self) -> bool {
        self.attestation_enabled
    }

    pub fn cached_report(&self) -> Option<&Report> {
        self.cached_report.get()
    }

    pub fn cached_jwt(&self) -> Option<&str> {
        self.cached_jwt.get().map(|entry| entry.token.as_str())
    }

    /// First writer wins; returns whichever report ends up cached.
    pub(crate) fn cache_report(&self, report: Report) -> &Report {
        self.cached_report.get_or_init(|| report)
    }

    pub(crate) fn cached_jwt_entry(&self) -> Option<&CachedJwt> {
        self.cached_jwt.get()
    }

    pub(crate) fn cache_jwt(&self, entry: CachedJwt) {
        let _ = self.cached_jwt.set(entry);
    }

    /// Serializes attestation flows on this instance. A poisoned lock only
    /// means another flow failed; the cache stays consistent either way.
    pub(crate) fn lock_flow(&self) -> MutexGuard<'_, ()> {
        self.flow.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
