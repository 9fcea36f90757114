// SPDX-FileCopyrightText: © 2025 The Project Contributors
//
// SPDX-License-Identifier: Apache-2.0

//! The attestation API exported to sandboxed workload code.
//!
//! These are the host functions registered with the sandbox runtime. Errors
//! are returned to the embedder, which translates them into a trap at the
//! sandbox frontier; nothing here unwinds.

use crate::engine::AttestationEngine;
use crate::error::AttestError;
use crate::host::HostBridge;
use crate::sandbox::SandboxMemory;

/// A native symbol as registered with the sandbox runtime.
pub struct NativeSymbol {
    pub name: &'static str,
    pub signature: &'static str,
}

/// The exported attestation symbols and their registration signatures.
pub const NATIVE_SYMBOLS: &[NativeSymbol] = &[
    NativeSymbol {
        name: "accless_get_attestation_jwt",
        signature: "(**)",
    },
    NativeSymbol {
        name: "accless_get_mrenclave",
        signature: "(*i)",
    },
    NativeSymbol {
        name: "accless_is_enabled",
        signature: "()i",
    },
];

/// `accless_get_attestation_jwt(jwt_ptr_out, jwt_size_out)`
///
/// Runs the attestation protocol and writes `(buffer offset, size)` into the
/// two guest slots. The size written is the host's response size, not the
/// token length.
pub fn accless_get_attestation_jwt(
    engine: &AttestationEngine,
    host: &mut dyn HostBridge,
    sandbox: &mut dyn SandboxMemory,
    jwt_ptr_out: u32,
    jwt_size_out: u32,
) -> Result<(), AttestError> {
    engine.get_attestation_jwt(host, sandbox, jwt_ptr_out, jwt_size_out)
}

/// `accless_get_mrenclave(buf, buf_size)`
///
/// Copies the 32-byte code measurement of the cached report into `buf`.
/// Requires a prior successful report generation.
pub fn accless_get_mrenclave(engine: &AttestationEngine, buf: &mut [u8]) -> Result<(), AttestError> {
    engine.get_measurement(buf)
}

/// `accless_is_enabled() -> i32`
///
/// Returns 0 when attestation is enabled for this instance, 1 otherwise.
pub fn accless_is_enabled(engine: &AttestationEngine) -> i32 {
    engine.is_enabled()
}
