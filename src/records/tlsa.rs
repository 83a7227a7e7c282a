// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Certificate association records: TLSA (RFC 6698) and SMIMEA (RFC 8162).
//!
//! Both use `usage selector matching-type data`. The data is hex and its length is fixed
//! by the matching type: 64 digits for SHA-256 and 128 for SHA-512.

use crate::constants::{SHA256_HEX_LENGTH, SHA512_HEX_LENGTH};
use crate::primitives::encoding::is_hex;
use crate::primitives::numeric::parse_in_range;
use crate::primitives::text::check_printable;
use crate::record::RecordInput;
use crate::registry::RecordType;
use crate::records::{finish, zero_priority, RecordOutcome, RecordValidator, ValidationContext};
use crate::validation_errors::ValidationError;

/// DANE-EE: the record pins the end-entity certificate.
const USAGE_DANE_EE: u8 = 3;

/// Parsed certificate association.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateAssociation {
    /// Certificate usage, 0-3
    pub usage: u8,
    /// Selector, 0 (full certificate) or 1 (public key)
    pub selector: u8,
    /// Matching type, 0 (exact), 1 (SHA-256) or 2 (SHA-512)
    pub matching_type: u8,
    /// Lowercase hex association data
    pub data: String,
}

impl CertificateAssociation {
    /// Parse association content for `type_name`.
    ///
    /// # Errors
    ///
    /// Returns the first field that fails its check.
    pub fn parse(content: &str, type_name: &str) -> Result<Self, ValidationError> {
        let mut fields = content.split_whitespace();
        let (Some(usage), Some(selector), Some(matching_type)) =
            (fields.next(), fields.next(), fields.next())
        else {
            return Err(Self::missing(type_name));
        };
        let data: String = fields.collect();
        if data.is_empty() {
            return Err(Self::missing(type_name));
        }

        let usage = field(usage, 3).ok_or_else(|| {
            ValidationError::invalid_choice(format!(
                "{type_name} usage field must be a number between 0 and 3."
            ))
        })?;
        let selector = field(selector, 1).ok_or_else(|| {
            ValidationError::invalid_choice(format!(
                "{type_name} selector field must be 0 (Full certificate) or 1 (SubjectPublicKeyInfo)."
            ))
        })?;
        let matching_type = field(matching_type, 2).ok_or_else(|| {
            ValidationError::invalid_choice(format!(
                "{type_name} matching type field must be 0 (Exact match), 1 (SHA-256), or 2 (SHA-512)."
            ))
        })?;

        if !is_hex(&data) {
            return Err(ValidationError::encoding(format!(
                "{type_name} certificate data must be a hexadecimal string."
            )));
        }
        let expected = match matching_type {
            1 => Some((SHA256_HEX_LENGTH, "SHA-256")),
            2 => Some((SHA512_HEX_LENGTH, "SHA-512")),
            _ => None,
        };
        if let Some((length, label)) = expected {
            if data.len() != length {
                return Err(ValidationError::cross_field(format!(
                    "{type_name} {label} certificate data must be {length} characters long."
                )));
            }
        }

        Ok(Self {
            usage,
            selector,
            matching_type,
            data: data.to_ascii_lowercase(),
        })
    }

    fn missing(type_name: &str) -> ValidationError {
        ValidationError::structural(format!(
            "{type_name} record must contain usage, selector, matching-type, and certificate-data separated by spaces."
        ))
    }

    /// Canonical text form.
    #[must_use]
    pub fn to_content(&self) -> String {
        format!(
            "{} {} {} {}",
            self.usage, self.selector, self.matching_type, self.data
        )
    }
}

fn field(raw: &str, max: u64) -> Option<u8> {
    parse_in_range(raw, 0, max).and_then(|v| u8::try_from(v).ok())
}

/// Returns true for `_port._proto.host` names.
fn is_service_name(name: &str) -> bool {
    let mut labels = name.split('.');
    let port = labels.next().and_then(|l| l.strip_prefix('_'));
    let proto = labels.next().and_then(|l| l.strip_prefix('_'));
    port.is_some_and(|p| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit()))
        && proto.is_some_and(|p| !p.is_empty() && p.bytes().all(|b| b.is_ascii_alphabetic()))
        && labels.next().is_some()
}

/// Returns true for `<hash>._smimecert.domain` names.
fn is_smimecert_name(name: &str) -> bool {
    let mut labels = name.split('.');
    labels.next().is_some_and(|hash| !hash.is_empty())
        && labels
            .next()
            .is_some_and(|label| label.eq_ignore_ascii_case("_smimecert"))
        && labels.next().is_some()
}

/// Validator for TLSA and SMIMEA records.
#[derive(Debug, Clone, Copy)]
pub struct TlsaValidator {
    record_type: RecordType,
}

impl TlsaValidator {
    /// TLSA
    pub const TLSA: Self = Self {
        record_type: RecordType::Tlsa,
    };
    /// SMIMEA
    pub const SMIMEA: Self = Self {
        record_type: RecordType::Smimea,
    };

    /// The record type this instance validates.
    #[must_use]
    pub fn record_type(&self) -> RecordType {
        self.record_type
    }

    fn name_advisory(&self, name: &str) -> Option<String> {
        match self.record_type {
            RecordType::Smimea if !is_smimecert_name(name) => Some(
                "SMIMEA record name should follow the format <hash>._smimecert.<domain> (RFC 8162).".to_string(),
            ),
            RecordType::Tlsa if !is_service_name(name) => Some(
                "TLSA record name should typically follow the format _port._protocol.hostname (e.g., _443._tcp.www.example.com).".to_string(),
            ),
            _ => None,
        }
    }
}

impl RecordValidator for TlsaValidator {
    fn check(&self, record: &RecordInput, ctx: &ValidationContext<'_>) -> RecordOutcome {
        let t = self.record_type.as_str();
        let name = ctx.hostname(&record.name, false)?;
        check_printable(&record.content)?;
        if record.content.trim().is_empty() {
            return Err(ValidationError::structural(format!("{t} record content cannot be empty.")).into());
        }

        let association = CertificateAssociation::parse(&record.content, t)?;
        let mut warnings: Vec<String> = self.name_advisory(&name).into_iter().collect();
        if association.matching_type == 0 {
            warnings.push(format!(
                "{t} matching type 0 publishes the full data. Hashed matching types (1 or 2) keep responses small."
            ));
        }
        if self.record_type == RecordType::Tlsa && association.usage < USAGE_DANE_EE - 1 {
            warnings.push(
                "PKIX usages (0 and 1) also require validation against public certificate authorities. DANE-EE (3) is recommended for SMTP (RFC 7672).".to_string(),
            );
        }

        let ttl = ctx.ttl(record)?;
        let priority = zero_priority(record, t)?;

        finish(association.to_content(), name, priority, ttl, warnings)
    }
}

#[cfg(test)]
#[path = "tlsa_tests.rs"]
mod tlsa_tests;
