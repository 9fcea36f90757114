// SPDX-FileCopyrightText: © 2025 The Project Contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Byte codec and crypto primitives for the attestation core.
//!
//! Wire conventions in one place: raw P-256 points are `gx ‖ gy` with each
//! coordinate little-endian (the TEE platform EC convention), and the ECDH
//! shared secret is returned little-endian as well. The conversion to the
//! big-endian field bytes the `p256` crate expects happens here and nowhere
//! else.

pub mod base64;
pub mod ecdh;
pub mod gcm;

pub use base64::{base64_decode, base64url_decode, base64url_encode};
pub use ecdh::{aes_key_from_shared, ecdh_shared, EcKeypair};
pub use gcm::{gcm_decrypt, Jwe};

use thiserror::Error;

/// Raw size of an uncompressed P-256 point on the wire (`gx ‖ gy`).
pub const PUBLIC_KEY_RAW_SIZE: usize = 64;

/// Size of the ECDH shared secret (the x-coordinate).
pub const SHARED_SECRET_SIZE: usize = 32;

/// AES-128 key size.
pub const AES_KEY_SIZE: usize = 16;

/// GCM IV size.
pub const GCM_IV_SIZE: usize = 12;

/// GCM authentication tag size.
pub const GCM_TAG_SIZE: usize = 16;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CryptoError {
    #[error("peer public key is not a valid point on the curve")]
    InvalidPublicKey,
    #[error("crypto backend unavailable: {0}")]
    CryptoUnavailable(String),
    #[error("authentication tag mismatch")]
    MacMismatch,
    #[error("invalid argument: {0}")]
    InvalidArgs(String),
}
