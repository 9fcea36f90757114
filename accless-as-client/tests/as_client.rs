// SPDX-FileCopyrightText: © 2025 The Project Contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Attestation service round-trips against the quote fixtures.
//!
//! The live tests need an attestation service listening on localhost:8443
//! and are ignored by default, matching how they are run in CI.

use accless_as_client::{validate_quote, AsClientError, AttestationServiceClient};
use accless_types::EnclaveInfo;

const ATTESTATION_SERVICE_URL: &str = "https://127.0.0.1:8443";
const CORRECT_QUOTE: &str = "tests/files/example_correct_sgx_quote.json";
const ROGUE_QUOTE: &str = "tests/files/example_rogue_sgx_quote.json";

#[test]
fn fixtures_load_and_hold_the_binding() {
    for path in [CORRECT_QUOTE, ROGUE_QUOTE] {
        let enclave_info = EnclaveInfo::from_json_file(path).unwrap();
        assert_eq!(
            enclave_info.enclave_held_data(),
            &enclave_info.report().report_data()
        );
        assert_eq!(enclave_info.report().measurement().len(), 32);
    }
}

#[test]
#[ignore = "requires a running attestation service on 127.0.0.1:8443"]
fn valid_quote_yields_a_jwt_response() -> anyhow::Result<()> {
    tracing_subscriber::fmt::try_init().ok();
    let enclave_info = EnclaveInfo::from_json_file(CORRECT_QUOTE)?;

    let body =
        AttestationServiceClient::new(ATTESTATION_SERVICE_URL).attest_enclave(&enclave_info)?;

    let (encrypted_token, server_pubkey) = accless_as_client::split_jwt_response(&body)?;
    assert!(!encrypted_token.is_empty());
    assert!(!server_pubkey.is_empty());
    Ok(())
}

#[test]
#[ignore = "requires a running attestation service on 127.0.0.1:8443"]
fn rogue_quote_is_rejected() {
    tracing_subscriber::fmt::try_init().ok();
    let enclave_info = EnclaveInfo::from_json_file(ROGUE_QUOTE).unwrap();

    let err = validate_quote(&enclave_info, ATTESTATION_SERVICE_URL).unwrap_err();
    assert!(matches!(err, AsClientError::AsRejected { status, .. } if status != 200));
}
