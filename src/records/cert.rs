// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! CERT record validation (RFC 4398).
//!
//! Content is `type key-tag algorithm data`. Type and algorithm accept either a number
//! or a mnemonic. The URL-based types (IPKIX, ISPKI, IPGP, IACPKIX) carry a URL instead
//! of base64 certificate data.

use crate::constants::MAX_U16_FIELD;
use crate::primitives::encoding::decode_base64;
use crate::primitives::numeric::{parse_in_range, parse_u16};
use crate::primitives::text::check_printable;
use crate::record::RecordInput;
use crate::records::dnssec::algorithm_name;
use crate::records::{finish, zero_priority, RecordOutcome, RecordValidator, ValidationContext};
use crate::validation_errors::ValidationError;

/// Certificate type mnemonics.
const CERT_TYPES: &[(&str, u16)] = &[
    ("PKIX", 1),
    ("SPKI", 2),
    ("PGP", 3),
    ("IPKIX", 4),
    ("ISPKI", 5),
    ("IPGP", 6),
    ("ACPKIX", 7),
    ("IACPKIX", 8),
    ("URI", 253),
    ("OID", 254),
];

/// Types whose data is an indirect reference.
const URL_TYPES: &[u16] = &[4, 5, 6, 8];

/// Algorithm mnemonics.
const CERT_ALGORITHMS: &[(&str, u8)] = &[
    ("RSAMD5", 1),
    ("DH", 2),
    ("DSA", 3),
    ("ECC", 4),
    ("RSASHA1", 5),
    ("RSASHA256", 8),
    ("RSASHA512", 10),
    ("ECCGOST", 12),
    ("ECDSAP256SHA256", 13),
    ("ECDSAP384SHA384", 14),
    ("ED25519", 15),
    ("ED448", 16),
];

/// Algorithms RFC 8624 forbids for signing.
const MUST_NOT_SIGN: &[u8] = &[1, 3, 12];

/// Algorithms RFC 8624 discourages for signing.
const NOT_RECOMMENDED_SIGN: &[u8] = &[5, 6, 7];

fn mnemonic<T: Copy>(table: &[(&str, T)], raw: &str) -> Option<T> {
    table
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(raw))
        .map(|(_, value)| *value)
}

/// Parsed CERT content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertContent {
    pub cert_type: u16,
    pub key_tag: u16,
    pub algorithm: u8,
    /// Certificate data or URL, as written
    pub data: String,
}

impl CertContent {
    /// Parse CERT content.
    ///
    /// # Errors
    ///
    /// Returns the first violation found, in field order.
    pub fn parse(content: &str) -> Result<Self, ValidationError> {
        let mut fields = content.split_whitespace();
        let (Some(cert_type), Some(key_tag), Some(algorithm)) =
            (fields.next(), fields.next(), fields.next())
        else {
            return Err(missing());
        };
        let data = fields.collect::<Vec<_>>().join(" ");
        if data.is_empty() {
            return Err(missing());
        }

        let cert_type = if cert_type.bytes().all(|b| b.is_ascii_digit()) {
            parse_u16(cert_type).ok_or_else(|| {
                ValidationError::range(
                    "CERT type must be a number between 0 and 65535 or a valid mnemonic.",
                )
            })?
        } else {
            mnemonic(CERT_TYPES, cert_type).ok_or_else(|| {
                ValidationError::invalid_choice(
                    "CERT type must be a number between 0 and 65535 or a valid mnemonic (PKIX, SPKI, PGP, etc.).",
                )
            })?
        };

        let key_tag = parse_in_range(key_tag, 0, MAX_U16_FIELD)
            .and_then(|v| u16::try_from(v).ok())
            .ok_or_else(|| {
                ValidationError::range("CERT key tag must be a number between 0 and 65535.")
            })?;

        let algorithm = if algorithm.bytes().all(|b| b.is_ascii_digit()) {
            algorithm.parse::<u8>().map_err(|_| {
                ValidationError::range(
                    "CERT algorithm must be a number between 0 and 255 or a valid mnemonic.",
                )
            })?
        } else {
            mnemonic(CERT_ALGORITHMS, algorithm).ok_or_else(|| {
                ValidationError::invalid_choice(
                    "CERT algorithm must be a number between 0 and 255 or a valid mnemonic (RSASHA1, DSA, etc.).",
                )
            })?
        };

        if URL_TYPES.contains(&cert_type) {
            check_url_data(&data)?;
        } else if decode_base64(&data).is_none() {
            return Err(ValidationError::encoding(
                "CERT certificate data must be valid base64-encoded data.",
            ));
        }

        Ok(Self {
            cert_type,
            key_tag,
            algorithm,
            data,
        })
    }

    #[must_use]
    pub fn advisories(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        let name = algorithm_name(self.algorithm);
        if MUST_NOT_SIGN.contains(&self.algorithm) {
            warnings.push(format!(
                "Algorithm {} ({name}) MUST NOT be used for signing according to RFC 8624.",
                self.algorithm
            ));
        } else if NOT_RECOMMENDED_SIGN.contains(&self.algorithm) {
            warnings.push(format!(
                "Algorithm {} ({name}) is NOT RECOMMENDED for signing according to RFC 8624.",
                self.algorithm
            ));
        }
        if URL_TYPES.contains(&self.cert_type) {
            warnings.push("URL-based certificate types make clients fetch data from a third party. Make sure the URL is served over a trusted channel (RFC 4398 section 6).".to_string());
        }
        warnings
    }
}

fn missing() -> ValidationError {
    ValidationError::structural(
        "CERT record must contain type, key-tag, algorithm and certificate-data separated by spaces.",
    )
}

/// IPGP data may lead with a fingerprint; the URL is whatever follows.
fn check_url_data(data: &str) -> Result<(), ValidationError> {
    let candidate = data.split_whitespace().last().unwrap_or(data);
    if candidate.contains("://") && url::Url::parse(candidate).is_err() {
        return Err(ValidationError::structural(
            "CERT URL-based certificate data must contain a valid URL.",
        ));
    }
    Ok(())
}

/// Validator for CERT records.
#[derive(Debug, Default, Clone, Copy)]
pub struct CertValidator;

impl RecordValidator for CertValidator {
    fn check(&self, record: &RecordInput, ctx: &ValidationContext<'_>) -> RecordOutcome {
        let name = ctx.hostname(&record.name, true)?;
        check_printable(&record.content)
            .map_err(|_| ValidationError::structural("Invalid characters in CERT record content."))?;
        let parsed = CertContent::parse(&record.content)?;
        let warnings = parsed.advisories();
        let ttl = ctx.ttl(record)?;
        let priority = zero_priority(record, "CERT")?;

        finish(record.content.trim().to_string(), name, priority, ttl, warnings)
    }
}

#[cfg(test)]
#[path = "cert_tests.rs"]
mod cert_tests;
