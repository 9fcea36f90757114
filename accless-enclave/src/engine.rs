// SPDX-FileCopyrightText: © 2025 The Project Contributors
//
// SPDX-License-Identifier: Apache-2.0

//! The attestation protocol driver.

use accless_crypto::{aes_key_from_shared, base64_decode, ecdh_shared, gcm_decrypt, Jwe};
use accless_types::MEASUREMENT_SIZE;
use tracing::{debug, info};

use crate::error::AttestError;
use crate::host::{HostBridge, TransferSlot};
use crate::identity::{CachedJwt, EnclaveIdentity};
use crate::platform::TeePlatform;
use crate::sandbox::SandboxMemory;

/// Drives the attestation protocol for one TEE instance.
///
/// The identity owns all durable state; the host bridge and sandbox are
/// per-call capabilities, mirroring how the untrusted transitions are
/// ambient to each invocation.
pub struct AttestationEngine<'a> {
    identity: &'a EnclaveIdentity,
    platform: &'a dyn TeePlatform,
}

impl<'a> AttestationEngine<'a> {
    pub fn new(identity: &'a EnclaveIdentity, platform: &'a dyn TeePlatform) -> Self {
        Self { identity, platform }
    }

    /// Obtain the attestation JWT and publish it into sandbox memory.
    ///
    /// Writes the guest offset of a freshly allocated buffer holding the JWT
    /// into `jwt_ptr_out` and the response size into `jwt_size_out`. Note
    /// that the reported size is the length of the base64 JWE as delivered
    /// by the host, not the length of the decrypted token; the value
    /// predates this implementation and sandbox code depends on it.
    ///
    /// Flows on the same instance are serialized; once an attestation has
    /// succeeded, later calls are served from the cache without touching the
    /// host.
    pub fn get_attestation_jwt(
        &self,
        host: &mut dyn HostBridge,
        sandbox: &mut dyn SandboxMemory,
        jwt_ptr_out: u32,
        jwt_size_out: u32,
    ) -> Result<(), AttestError> {
        let _flow = self.identity.lock_flow();

        if let Some(cached) = self.identity.cached_jwt_entry() {
            debug!("serving attestation JWT from cache");
            return publish_jwt(sandbox, &cached.token, cached.response_size, jwt_ptr_out, jwt_size_out);
        }

        // Reports are reusable across attempts: generate one only if no
        // earlier attempt got that far.
        let report = match self.identity.cached_report() {
            Some(report) => *report,
            None => {
                debug!("requesting QE target info from host");
                let target_info = host.get_qe_target_info()?;

                let held = self.identity.enclave_held_data();
                let report = self
                    .platform
                    .create_report(&target_info, &held)
                    .map_err(|err| AttestError::ReportGenFailed(err.to_string()))?;
                debug!(
                    measurement = %hex::encode(report.measurement()),
                    "generated enclave report"
                );
                *self.identity.cache_report(report)
            }
        };

        let response_size = host.submit_quote(&report)?;
        debug!(response_size, "received attestation response from host");
        let slot = TransferSlot::acquire(host, response_size)?;

        let jwe_raw = base64_decode(slot.jwe_base64());
        let jwe = Jwe::parse(&jwe_raw).ok_or(AttestError::MalformedJwe { len: jwe_raw.len() })?;

        let shared = ecdh_shared(self.identity.keypair().secret(), &slot.server_pubkey())?;
        let key = aes_key_from_shared(shared);

        let token_bytes = gcm_decrypt(&key, jwe.iv, jwe.ciphertext, &[], jwe.tag)?;
        let token = String::from_utf8(token_bytes)
            .map_err(|err| AttestError::MalformedJwe { len: err.as_bytes().len() })?;

        publish_jwt(sandbox, &token, response_size, jwt_ptr_out, jwt_size_out)?;

        drop(slot);

        self.identity.cache_jwt(CachedJwt {
            token,
            response_size,
        });
        info!("attestation succeeded, JWT cached");
        Ok(())
    }

    /// Copy the cached report's code measurement into `buf`.
    pub fn get_measurement(&self, buf: &mut [u8]) -> Result<(), AttestError> {
        if buf.len() != MEASUREMENT_SIZE {
            return Err(AttestError::InvalidArgs(format!(
                "measurement buffer must be {MEASUREMENT_SIZE} bytes, got {}",
                buf.len()
            )));
        }
        let report = self
            .identity
            .cached_report()
            .ok_or(AttestError::NoCachedReport)?;
        buf.copy_from_slice(&report.measurement());
        Ok(())
    }

    /// Whether attestation is enabled for this instance: 0 when enabled,
    /// 1 otherwise. The inversion is part of the external contract.
    pub fn is_enabled(&self) -> i32 {
        if self.identity.is_enabled() {
            0
        } else {
            1
        }
    }
}

/// Copy the token into a sandbox-allocated buffer and fill the out slots.
fn publish_jwt(
    sandbox: &mut dyn SandboxMemory,
    token: &str,
    response_size: u32,
    jwt_ptr_out: u32,
    jwt_size_out: u32,
) -> Result<(), AttestError> {
    let offset = sandbox
        .alloc(token.len())
        .ok_or(AttestError::OutOfSandboxMemory { len: token.len() })?;
    sandbox.write(offset, token.as_bytes());
    sandbox.write_i32(jwt_ptr_out, offset as i32);
    sandbox.write_i32(jwt_size_out, response_size as i32);
    Ok(())
}
