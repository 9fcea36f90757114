// SPDX-FileCopyrightText: © 2025 The Project Contributors
//
// SPDX-License-Identifier: Apache-2.0

//! P-256 key agreement and the shared-secret-to-AES-key schedule.

use p256::{
    ecdh::diffie_hellman,
    elliptic_curve::sec1::{FromEncodedPoint, ToEncodedPoint},
    EncodedPoint, FieldBytes, PublicKey, SecretKey,
};
use rand::rngs::OsRng;

use crate::{CryptoError, AES_KEY_SIZE, PUBLIC_KEY_RAW_SIZE, SHARED_SECRET_SIZE};

/// The per-instance EC keypair. Generated once at TEE boot; the secret
/// scalar never leaves the enclave.
pub struct EcKeypair {
    secret: SecretKey,
    public_raw: [u8; PUBLIC_KEY_RAW_SIZE],
}

impl EcKeypair {
    pub fn generate() -> Result<Self, CryptoError> {
        Self::from_secret(SecretKey::random(&mut OsRng))
    }

    pub fn from_secret(secret: SecretKey) -> Result<Self, CryptoError> {
        let public_raw = raw_from_public(&secret.public_key())?;
        Ok(Self { secret, public_raw })
    }

    pub fn secret(&self) -> &SecretKey {
        &self.secret
    }

    /// Raw wire encoding of the public point: `gx ‖ gy`, little-endian per
    /// coordinate.
    pub fn public_raw(&self) -> &[u8; PUBLIC_KEY_RAW_SIZE] {
        &self.public_raw
    }
}

impl std::fmt::Debug for EcKeypair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The secret scalar must never appear in logs.
        f.debug_struct("EcKeypair").finish_non_exhaustive()
    }
}

fn raw_from_public(public: &PublicKey) -> Result<[u8; PUBLIC_KEY_RAW_SIZE], CryptoError> {
    let point = public.to_encoded_point(false);
    let (Some(x), Some(y)) = (point.x(), point.y()) else {
        return Err(CryptoError::CryptoUnavailable(
            "public key has no affine coordinates".to_string(),
        ));
    };
    let mut raw = [0u8; PUBLIC_KEY_RAW_SIZE];
    raw[..32].copy_from_slice(x);
    raw[..32].reverse();
    raw[32..].copy_from_slice(y);
    raw[32..].reverse();
    Ok(raw)
}

/// Build a P-256 public key from little-endian wire coordinates, rejecting
/// anything that is not a valid point on the curve.
pub fn public_from_raw(raw: &[u8; PUBLIC_KEY_RAW_SIZE]) -> Result<PublicKey, CryptoError> {
    let mut x = [0u8; 32];
    x.copy_from_slice(&raw[..32]);
    x.reverse();
    let mut y = [0u8; 32];
    y.copy_from_slice(&raw[32..]);
    y.reverse();
    let point =
        EncodedPoint::from_affine_coordinates(&FieldBytes::from(x), &FieldBytes::from(y), false);
    Option::from(PublicKey::from_encoded_point(&point)).ok_or(CryptoError::InvalidPublicKey)
}

/// ECDH over secp256r1. Returns the shared x-coordinate in the platform's
/// little-endian convention.
pub fn ecdh_shared(
    secret: &SecretKey,
    peer_raw: &[u8; PUBLIC_KEY_RAW_SIZE],
) -> Result<[u8; SHARED_SECRET_SIZE], CryptoError> {
    let peer = public_from_raw(peer_raw)?;
    let shared = diffie_hellman(secret.to_nonzero_scalar(), peer.as_affine());
    let mut out = [0u8; SHARED_SECRET_SIZE];
    out.copy_from_slice(shared.raw_secret_bytes());
    out.reverse();
    Ok(out)
}

/// Derive the AES-128 key from a shared secret: reverse the 32 bytes, then
/// truncate to the first 16. The peer writes the secret little-endian, so
/// the reversal is what puts both sides in byte-order agreement; skipping
/// either step produces a key the service never used.
pub fn aes_key_from_shared(mut shared: [u8; SHARED_SECRET_SIZE]) -> [u8; AES_KEY_SIZE] {
    shared.reverse();
    let mut key = [0u8; AES_KEY_SIZE];
    key.copy_from_slice(&shared[..AES_KEY_SIZE]);
    key
}
