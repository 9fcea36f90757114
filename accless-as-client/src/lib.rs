// SPDX-FileCopyrightText: © 2025 The Project Contributors
//
// SPDX-License-Identifier: Apache-2.0

//! HTTPS client used by the host process to attest an enclave.
//!
//! The request/response JSON follows the Azure Attestation wire format for
//! SGX enclaves, kept compatible so the service can be swapped for MAA.

use accless_crypto::base64url_encode;
use accless_types::{config::split_host_port, EnclaveInfo, ModelError, Quote, Report};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error};

const VERIFY_REPORT_ENDPOINT: &str = "/verify-sgx-report";

#[derive(Debug, Error)]
pub enum AsClientError {
    #[error("bad attestation service endpoint: {0:?}")]
    BadAsEndpoint(String),
    #[error("attestation service rejected the quote (status {status}): {body}")]
    AsRejected { status: u16, body: String },
    #[error("malformed attestation service response: {0}")]
    MalformedAsResponse(String),
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error("failed to encode request: {0}")]
    Json(#[from] serde_json::Error),
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Serialize)]
struct DataField {
    data: String,
    #[serde(rename = "dataType")]
    data_type: String,
}

#[derive(Serialize)]
struct AttestRequest {
    quote: String,
    #[serde(rename = "runtimeData")]
    runtime_data: DataField,
    #[serde(rename = "initTimeData")]
    init_time_data: DataField,
    #[serde(rename = "draftPolicyForAttestation")]
    draft_policy_for_attestation: String,
}

/// Serialize the attestation request for one enclave.
///
/// `runtimeData` carries the enclave-held data the enclave bound into its
/// report; the service checks the binding and encrypts its certificate to
/// the key inside.
fn request_body(enclave_info: &EnclaveInfo) -> Result<String, AsClientError> {
    // initTimeData and the draft policy are intentionally serialized from
    // the same unset string.
    let unset = String::new();
    let request = AttestRequest {
        quote: base64url_encode(enclave_info.quote_bytes()),
        runtime_data: DataField {
            data: base64url_encode(enclave_info.enclave_held_data()),
            data_type: "Binary".to_string(),
        },
        init_time_data: DataField {
            data: unset.clone(),
            data_type: unset.clone(),
        },
        draft_policy_for_attestation: unset,
    };
    Ok(serde_json::to_string(&request)?)
}

/// Client for one attestation service endpoint (`[https://]host:port`).
pub struct AttestationServiceClient {
    attestation_service_url: String,
    verify_tls: bool,
}

impl AttestationServiceClient {
    pub fn new(attestation_service_url: impl Into<String>) -> Self {
        Self {
            attestation_service_url: attestation_service_url.into(),
            verify_tls: false,
        }
    }

    /// Opt back into transport-level certificate verification.
    ///
    /// Off by default: the enclave authenticates the response through the
    /// GCM key bound to its ephemeral public key, so the certificate chain
    /// adds nothing for the attestation exchange itself.
    pub fn with_tls_verification(mut self, verify: bool) -> Self {
        self.verify_tls = verify;
        self
    }

    /// POST the quote to the service and return the JWT response body.
    ///
    /// Any status other than 200 is a rejection.
    pub fn attest_enclave(&self, enclave_info: &EnclaveInfo) -> Result<String, AsClientError> {
        let (host, port) = split_host_port(&self.attestation_service_url)
            .map_err(|_| AsClientError::BadAsEndpoint(self.attestation_service_url.clone()))?;
        let body = request_body(enclave_info)?;

        let client = reqwest::blocking::Client::builder()
            .danger_accept_invalid_certs(!self.verify_tls)
            .min_tls_version(reqwest::tls::Version::TLS_1_3)
            .build()?;

        debug!(host, port, "submitting quote to attestation service");
        let response = client
            .post(format!("https://{host}:{port}{VERIFY_REPORT_ENDPOINT}"))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .header(reqwest::header::ACCEPT, "*/*")
            .body(body)
            .send()?;

        let status = response.status();
        let body = response.text()?;
        if status != reqwest::StatusCode::OK {
            error!(
                status = status.as_u16(),
                "attestation service rejected the quote"
            );
            return Err(AsClientError::AsRejected {
                status: status.as_u16(),
                body,
            });
        }
        debug!("received JWT response from attestation service");
        Ok(body)
    }

    /// Attest from a report and its quote, taking the held data from the
    /// report itself.
    pub fn attest_enclave_parts(
        &self,
        report: Report,
        quote: Quote,
    ) -> Result<String, AsClientError> {
        let enclave_info = EnclaveInfo::from_report_and_quote(report, quote)?;
        self.attest_enclave(&enclave_info)
    }
}

/// One-shot validation of an enclave against the configured service.
pub fn validate_quote(
    enclave_info: &EnclaveInfo,
    attestation_service_url: &str,
) -> Result<String, AsClientError> {
    AttestationServiceClient::new(attestation_service_url).attest_enclave(enclave_info)
}

#[derive(Deserialize)]
struct JwtResponse {
    encrypted_token: String,
    server_pubkey: String,
}

/// Split the service response into the base64 encrypted token and the
/// base64 server public key.
pub fn split_jwt_response(body: &str) -> Result<(String, String), AsClientError> {
    let response: JwtResponse = serde_json::from_str(body)
        .map_err(|err| AsClientError::MalformedAsResponse(err.to_string()))?;
    Ok((response.encrypted_token, response.server_pubkey))
}
