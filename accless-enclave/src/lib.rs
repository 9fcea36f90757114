// SPDX-FileCopyrightText: © 2025 The Project Contributors
//
// SPDX-License-Identifier: Apache-2.0

//! In-TEE remote attestation core.
//!
//! The engine binds the instance's ephemeral public key into a platform
//! report, routes the quoted report through the untrusted host to the
//! attestation service, decrypts the returned JWE with the ECDH-derived key,
//! and publishes the JWT and code measurement to the workload.
//!
//! Everything the host or the service hands us is validated before use; any
//! anomaly aborts the flow with a typed error, which the sandbox frontier
//! turns into a trap. Internal code never unwinds for control flow.

pub mod api;
pub mod engine;
pub mod error;
pub mod host;
pub mod identity;
pub mod platform;
pub mod sandbox;

pub use engine::AttestationEngine;
pub use error::AttestError;
pub use host::{HostBridge, HostCallError, TransferSlot};
pub use identity::EnclaveIdentity;
pub use platform::{PlatformError, TeePlatform};
pub use sandbox::SandboxMemory;

pub type Result<T> = std::result::Result<T, AttestError>;
