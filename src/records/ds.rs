// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Delegation signer records: DS, CDS (RFC 7344) and DLV (RFC 4431).
//!
//! All three share the `key-tag algorithm digest-type digest` grammar. The digest may be
//! split by whitespace and is returned lowercase. `0 0 0 00` is the RFC 8078 deletion
//! sentinel and bypasses the field checks.

use crate::constants::{
    DIGEST_SHA1, DIGEST_SHA256, DIGEST_SHA384, DS_DELETE_SENTINEL, SHA1_HEX_LENGTH,
    SHA256_HEX_LENGTH, SHA384_HEX_LENGTH,
};
use crate::primitives::encoding::is_hex;
use crate::primitives::hostname::is_zone_apex;
use crate::primitives::numeric::{parse_in_range, parse_u8};
use crate::primitives::text::check_printable;
use crate::record::RecordInput;
use crate::registry::RecordType;
use crate::records::dnssec::algorithm_advisory;
use crate::records::{finish, zero_priority, RecordOutcome, RecordValidator, ValidationContext};
use crate::validation_errors::ValidationError;

/// Parsed DS-style content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DsContent {
    /// Key tag of the referenced DNSKEY
    pub key_tag: u16,
    /// DNSSEC algorithm number
    pub algorithm: u8,
    /// Digest type: 1, 2 or 4
    pub digest_type: u8,
    /// Lowercase hex digest
    pub digest: String,
}

impl DsContent {
    /// Parse DS-style content.
    ///
    /// # Errors
    ///
    /// Returns the first field that fails its check.
    pub fn parse(content: &str) -> Result<Self, ValidationError> {
        let mut fields = content.split_whitespace();
        let (Some(key_tag), Some(algorithm), Some(digest_type)) =
            (fields.next(), fields.next(), fields.next())
        else {
            return Err(Self::format_error());
        };
        let digest: String = fields.collect();
        if digest.is_empty() {
            return Err(Self::format_error());
        }

        let key_tag = parse_in_range(key_tag, 1, u64::from(u16::MAX))
            .and_then(|tag| u16::try_from(tag).ok())
            .ok_or_else(|| {
                ValidationError::range("Invalid key tag. Must be a number between 1 and 65535.")
            })?;

        let algorithm = parse_u8(algorithm).filter(|a| (1..=16).contains(a)).ok_or_else(|| {
            ValidationError::invalid_choice(
                "Invalid algorithm. Must be one of the valid DNSSEC algorithms (1-16).",
            )
        })?;

        let (digest_type, expected, label) = match parse_u8(digest_type) {
            Some(DIGEST_SHA1) => (DIGEST_SHA1, SHA1_HEX_LENGTH, "SHA-1"),
            Some(DIGEST_SHA256) => (DIGEST_SHA256, SHA256_HEX_LENGTH, "SHA-256"),
            Some(DIGEST_SHA384) => (DIGEST_SHA384, SHA384_HEX_LENGTH, "SHA-384"),
            _ => {
                return Err(ValidationError::invalid_choice(
                    "Invalid digest type. Must be 1 (SHA-1), 2 (SHA-256), or 4 (SHA-384).",
                ))
            }
        };

        if !is_hex(&digest) {
            return Err(ValidationError::encoding(
                "Digest must contain only hexadecimal characters (0-9, a-f).",
            ));
        }
        if digest.len() != expected {
            return Err(ValidationError::cross_field(format!(
                "Invalid digest length for {label}. Should be {expected} hexadecimal characters."
            )));
        }

        Ok(Self {
            key_tag,
            algorithm,
            digest_type,
            digest: digest.to_ascii_lowercase(),
        })
    }

    fn format_error() -> ValidationError {
        ValidationError::structural(
            "Invalid record format. Expected: <key-tag> <algorithm> <digest-type> <digest>.",
        )
    }

    /// Canonical text form.
    #[must_use]
    pub fn to_content(&self) -> String {
        format!(
            "{} {} {} {}",
            self.key_tag, self.algorithm, self.digest_type, self.digest
        )
    }

    /// Algorithm and digest advisories.
    #[must_use]
    pub fn advisories(&self) -> Vec<String> {
        let mut warnings: Vec<String> = algorithm_advisory(self.algorithm).into_iter().collect();
        if self.digest_type == DIGEST_SHA1 {
            warnings.push(
                "SHA-1 (digest type 1) is deprecated for security reasons. Consider using SHA-256 (digest type 2) or SHA-384 (digest type 4) instead.".to_string(),
            );
        }
        warnings
    }
}

/// Validator for DS, CDS and DLV records.
#[derive(Debug, Clone, Copy)]
pub struct DsValidator {
    record_type: RecordType,
}

impl DsValidator {
    /// DS
    pub const DS: Self = Self {
        record_type: RecordType::Ds,
    };
    /// CDS
    pub const CDS: Self = Self {
        record_type: RecordType::Cds,
    };
    /// DLV
    pub const DLV: Self = Self {
        record_type: RecordType::Dlv,
    };

    /// The record type this instance validates.
    #[must_use]
    pub fn record_type(&self) -> RecordType {
        self.record_type
    }

    fn type_advisories(&self, record: &RecordInput, name: &str) -> Vec<String> {
        let mut warnings = Vec::new();
        match self.record_type {
            RecordType::Cds => {
                let off_apex = record
                    .zone
                    .as_deref()
                    .is_some_and(|zone| !is_zone_apex(name, zone));
                if off_apex {
                    warnings.push(
                        "CDS records should only be placed at the zone apex, not on subdomains, as required by RFC 7344.".to_string(),
                    );
                }
                warnings.push(
                    "CDS records must be accompanied by matching CDNSKEY records as recommended by RFC 7344.".to_string(),
                );
                warnings.push(
                    "According to RFC 8078, CDS records should be stable for some time before parent zones accept them.".to_string(),
                );
            }
            RecordType::Dlv => {
                warnings.push(
                    "IMPORTANT: DLV records have been obsoleted by RFC 8749 (March 2020). Major DNS resolvers have removed DLV support. Consider using standard DNSSEC validation with DS records instead.".to_string(),
                );
                if name.split('.').any(|label| label.eq_ignore_ascii_case("dlv")) {
                    warnings.push(
                        "This name appears to be in a DLV lookup domain. Note that dlv.isc.org, the main DLV registry, was decommissioned in 2017.".to_string(),
                    );
                }
            }
            _ => {}
        }
        warnings
    }
}

impl RecordValidator for DsValidator {
    fn check(&self, record: &RecordInput, ctx: &ValidationContext<'_>) -> RecordOutcome {
        let name = ctx.hostname(&record.name, true)?;
        check_printable(&record.content)?;

        let (content, mut warnings) = if record.content.trim() == DS_DELETE_SENTINEL {
            (
                DS_DELETE_SENTINEL.to_string(),
                vec![
                    "This is a deletion record as defined in RFC 8078. It signals that the corresponding DS records should be removed from the parent.".to_string(),
                ],
            )
        } else {
            let ds = DsContent::parse(&record.content)?;
            (ds.to_content(), ds.advisories())
        };
        warnings.extend(self.type_advisories(record, &name));

        let ttl = ctx.ttl(record)?;
        let priority = zero_priority(record, self.record_type.as_str())?;

        finish(content, name, priority, ttl, warnings)
    }
}

#[cfg(test)]
#[path = "ds_tests.rs"]
mod ds_tests;
