// SPDX-FileCopyrightText: © 2025 The Project Contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Base64 codecs.
//!
//! The standard-alphabet decoder is deliberately lenient: it decodes the
//! longest valid prefix and stops at the first byte outside the alphabet,
//! ignoring padding. The attestation transfer buffer concatenates base64
//! text with raw bytes, so prefix decoding is part of the wire contract and
//! cannot be delegated to a strict engine.

use ::base64::prelude::*;

use crate::CryptoError;

/// Decode the longest standard-base64 prefix of `input`.
///
/// Stops at the first byte outside `A–Z a–z 0–9 + /` (including `=`
/// padding) and returns whatever decoded so far.
pub fn base64_decode(input: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(input.len() / 4 * 3);
    let mut acc: u32 = 0;
    let mut bits: i32 = -8;

    for &byte in input {
        let Some(value) = decode_value(byte) else {
            break;
        };
        acc = (acc << 6) | u32::from(value);
        bits += 6;
        if bits >= 0 {
            out.push((acc >> bits) as u8);
            bits -= 8;
        }
    }

    out
}

fn decode_value(byte: u8) -> Option<u8> {
    match byte {
        b'A'..=b'Z' => Some(byte - b'A'),
        b'a'..=b'z' => Some(byte - b'a' + 26),
        b'0'..=b'9' => Some(byte - b'0' + 52),
        b'+' => Some(62),
        b'/' => Some(63),
        _ => None,
    }
}

/// URL-safe base64 without padding.
pub fn base64url_encode(data: &[u8]) -> String {
    BASE64_URL_SAFE_NO_PAD.encode(data)
}

pub fn base64url_decode(input: &str) -> Result<Vec<u8>, CryptoError> {
    BASE64_URL_SAFE_NO_PAD
        .decode(input)
        .map_err(|err| CryptoError::InvalidArgs(format!("invalid url-safe base64: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_standard_base64() {
        assert_eq!(base64_decode(b"TWFu"), b"Man");
        assert_eq!(base64_decode(b"bGVhc3VyZS4"), b"leasure.");
    }

    #[test]
    fn halts_at_first_non_alphabet_byte() {
        assert_eq!(base64_decode(b"TWFu\x00\xffgarbage"), b"Man");
        // Padding is outside the alphabet, so it terminates the decode.
        assert_eq!(base64_decode(b"TWE="), b"Ma");
        assert_eq!(base64_decode(b"TWE=TWFu"), b"Ma");
    }

    #[test]
    fn empty_and_all_invalid_inputs_decode_to_nothing() {
        assert_eq!(base64_decode(b""), Vec::<u8>::new());
        assert_eq!(base64_decode(b"=!*"), Vec::<u8>::new());
    }

    #[test]
    fn url_round_trip() {
        for input in [
            &b""[..],
            b"f",
            b"fo",
            b"foo",
            b"\xfb\xff\xbe",
            &[0u8; 64],
            &(0u8..=255).collect::<Vec<_>>(),
        ] {
            let encoded = base64url_encode(input);
            assert_eq!(base64url_decode(&encoded).unwrap(), input);
        }
    }

    #[test]
    fn standard_decode_of_url_text_may_differ() {
        // 0xfb 0xff encodes to "-_8" url-safe; the standard decoder stops at
        // the leading '-' and yields nothing.
        let encoded = base64url_encode(&[0xfb, 0xff]);
        assert_eq!(encoded, "-_8");
        assert_eq!(base64_decode(encoded.as_bytes()), Vec::<u8>::new());
    }
}
