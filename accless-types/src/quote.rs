// SPDX-FileCopyrightText: © 2025 The Project Contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Quotes and the attestation info bundle sent to the attestation service.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_human_bytes as hex_bytes;

use crate::report::{Report, REPORT_BODY_SIZE};
use crate::{EnclaveHeldData, ModelError, REPORT_DATA_SIZE};

/// Size of the quote header the QE prepends to the report body.
pub const QUOTE_HEADER_SIZE: usize = 48;

/// A platform-signed quote over a report.
///
/// Opaque to this system except that the attested report body sits verbatim
/// behind the quote header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote(Vec<u8>);

impl Quote {
    /// Wrap raw quote bytes; the quote must at least cover the header and
    /// the embedded report body.
    pub fn new(bytes: Vec<u8>) -> Result<Self, ModelError> {
        if bytes.len() < QUOTE_HEADER_SIZE + REPORT_BODY_SIZE {
            return Err(ModelError::MalformedQuote(format!(
                "expected at least {} bytes, got {}",
                QUOTE_HEADER_SIZE + REPORT_BODY_SIZE,
                bytes.len()
            )));
        }
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// The report body the QE signed, embedded unchanged.
    pub fn report_body(&self) -> &[u8] {
        &self.0[QUOTE_HEADER_SIZE..QUOTE_HEADER_SIZE + REPORT_BODY_SIZE]
    }
}

/// Everything the attestation service needs to verify one enclave:
/// the report, the quote over it, and the data the enclave bound in.
#[derive(Debug, Clone)]
pub struct EnclaveInfo {
    report: Report,
    quote: Quote,
    enclave_held_data: EnclaveHeldData,
}

/// On-disk form; byte fields are hex encoded.
#[derive(Serialize, Deserialize)]
struct EnclaveInfoJson {
    #[serde(with = "hex_bytes")]
    report: Vec<u8>,
    #[serde(with = "hex_bytes")]
    quote: Vec<u8>,
    #[serde(with = "hex_bytes")]
    enclave_held_data: Vec<u8>,
}

impl EnclaveInfo {
    /// Bundle a report with its quote and held data, enforcing the binding:
    /// the held data must equal the report's `report_data` and the quote
    /// must embed the report body unchanged.
    pub fn new(
        report: Report,
        quote: Quote,
        enclave_held_data: EnclaveHeldData,
    ) -> Result<Self, ModelError> {
        if enclave_held_data != report.report_data() {
            return Err(ModelError::MalformedReport(
                "enclave held data does not match the report's report_data".to_string(),
            ));
        }
        if quote.report_body() != report.body() {
            return Err(ModelError::MalformedQuote(
                "quote does not embed the attested report".to_string(),
            ));
        }
        Ok(Self {
            report,
            quote,
            enclave_held_data,
        })
    }

    /// Bundle a report with its quote, taking the held data from the report
    /// itself.
    pub fn from_report_and_quote(report: Report, quote: Quote) -> Result<Self, ModelError> {
        let held = report.report_data();
        Self::new(report, quote, held)
    }

    pub fn report(&self) -> &Report {
        &self.report
    }

    pub fn quote_bytes(&self) -> &[u8] {
        self.quote.as_bytes()
    }

    pub fn enclave_held_data(&self) -> &EnclaveHeldData {
        &self.enclave_held_data
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&EnclaveInfoJson {
            report: self.report.as_bytes().to_vec(),
            quote: self.quote.as_bytes().to_vec(),
            enclave_held_data: self.enclave_held_data.to_vec(),
        })
    }

    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        let raw: EnclaveInfoJson = serde_json::from_str(json)
            .map_err(|err| ModelError::MalformedReport(format!("invalid enclave info: {err}")))?;
        let report = Report::from_bytes(&raw.report)?;
        let quote = Quote::new(raw.quote)?;
        let held: EnclaveHeldData = raw.enclave_held_data.as_slice().try_into().map_err(|_| {
            ModelError::MalformedReport(format!(
                "enclave held data must be {REPORT_DATA_SIZE} bytes, got {}",
                raw.enclave_held_data.len()
            ))
        })?;
        Self::new(report, quote, held)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let json = std::fs::read_to_string(path.as_ref()).map_err(|err| {
            ModelError::MalformedReport(format!(
                "failed to read {}: {err}",
                path.as_ref().display()
            ))
        })?;
        Self::from_json(&json)
    }
}
