// SPDX-FileCopyrightText: © 2025 The Project Contributors
//
// SPDX-License-Identifier: Apache-2.0

//! AES-128-GCM decryption and the JWE wire layout.

use aes_gcm::{AeadInPlace, Aes128Gcm, KeyInit, Nonce, Tag};

use crate::{CryptoError, AES_KEY_SIZE, GCM_IV_SIZE, GCM_TAG_SIZE};

/// Typed view over the fixed JWE layout: `IV(12) ‖ ciphertext ‖ tag(16)`.
#[derive(Debug, Clone, Copy)]
pub struct Jwe<'a> {
    pub iv: &'a [u8],
    pub ciphertext: &'a [u8],
    pub tag: &'a [u8],
}

impl<'a> Jwe<'a> {
    /// Split raw JWE bytes into IV, ciphertext and tag. Returns `None` when
    /// the blob cannot even hold the IV and tag.
    pub fn parse(raw: &'a [u8]) -> Option<Self> {
        if raw.len() < GCM_IV_SIZE + GCM_TAG_SIZE {
            return None;
        }
        let (iv, rest) = raw.split_at(GCM_IV_SIZE);
        let (ciphertext, tag) = rest.split_at(rest.len() - GCM_TAG_SIZE);
        Some(Self {
            iv,
            ciphertext,
            tag,
        })
    }
}

/// AES-128-GCM decrypt with detached IV and tag. The plaintext has the same
/// length as the ciphertext.
pub fn gcm_decrypt(
    key: &[u8; AES_KEY_SIZE],
    iv: &[u8],
    ciphertext: &[u8],
    aad: &[u8],
    tag: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    if ciphertext.is_empty() {
        return Err(CryptoError::InvalidArgs(
            "zero-length ciphertext".to_string(),
        ));
    }
    if iv.len() != GCM_IV_SIZE {
        return Err(CryptoError::InvalidArgs(format!(
            "IV must be {GCM_IV_SIZE} bytes, got {}",
            iv.len()
        )));
    }
    if tag.len() != GCM_TAG_SIZE {
        return Err(CryptoError::InvalidArgs(format!(
            "tag must be {GCM_TAG_SIZE} bytes, got {}",
            tag.len()
        )));
    }

    let cipher = Aes128Gcm::new_from_slice(key)
        .map_err(|err| CryptoError::CryptoUnavailable(err.to_string()))?;
    let mut buffer = ciphertext.to_vec();
    cipher
        .decrypt_in_place_detached(Nonce::from_slice(iv), aad, &mut buffer, Tag::from_slice(tag))
        .map_err(|_| CryptoError::MacMismatch)?;
    Ok(buffer)
}
