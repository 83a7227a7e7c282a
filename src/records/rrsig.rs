// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! RRSIG record validation (RFC 4034 section 3).
//!
//! Content is `covered-type algorithm labels original-ttl expiration inception key-tag
//! signer signature`. Timestamps use the `YYYYMMDDHHmmSS` presentation form and the
//! signature may be split by whitespace.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::primitives::numeric::{parse_u16, parse_u32, parse_u8};
use crate::primitives::text::check_printable;
use crate::record::RecordInput;
use crate::records::dnssec::algorithm_advisory;
use crate::records::{finish, zero_priority, RecordOutcome, RecordValidator, ValidationContext};
use crate::registry::is_known_type_mnemonic;
use crate::validation_errors::ValidationError;

const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Parsed RRSIG content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RrsigContent {
    /// Type mnemonic of the signed RRset, uppercase
    pub covered_type: String,
    /// DNSSEC algorithm number
    pub algorithm: u8,
    /// Label count of the owner name
    pub labels: u8,
    /// TTL of the covered RRset
    pub original_ttl: u32,
    /// End of the validity period
    pub expiration: DateTime<Utc>,
    /// Start of the validity period
    pub inception: DateTime<Utc>,
    /// Key tag of the signing key
    pub key_tag: u16,
    /// Signer name, with its trailing dot
    pub signer: String,
}

fn parse_timestamp(field: &str, label: &str) -> Result<DateTime<Utc>, ValidationError> {
    let invalid = || {
        ValidationError::structural(format!(
            "RRSIG {label} must be in YYYYMMDDHHmmSS format."
        ))
    };
    if field.len() != 14 || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    NaiveDateTime::parse_from_str(field, TIMESTAMP_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|_| invalid())
}

fn numeric<T>(value: Option<T>, label: &str) -> Result<T, ValidationError> {
    value.ok_or_else(|| {
        ValidationError::range(format!("RRSIG {label} field must be a numeric value in range."))
    })
}

impl RrsigContent {
    /// Parse RRSIG content.
    ///
    /// # Errors
    ///
    /// Returns the first field that fails its check.
    pub fn parse(content: &str, ctx: &ValidationContext<'_>) -> Result<Self, ValidationError> {
        let fields: Vec<&str> = content.split_whitespace().collect();
        if fields.is_empty() {
            return Err(ValidationError::structural("RRSIG record content cannot be empty."));
        }
        let [covered, algorithm, labels, original_ttl, expiration, inception, key_tag, signer, signature @ ..] =
            fields.as_slice()
        else {
            return Err(ValidationError::structural(
                "RRSIG record must contain covered-type, algorithm, labels, original TTL, expiration, inception, key tag, signer name and signature.",
            ));
        };
        if signature.is_empty() {
            return Err(ValidationError::structural(
                "RRSIG record must contain covered-type, algorithm, labels, original TTL, expiration, inception, key tag, signer name and signature.",
            ));
        }

        if !is_known_type_mnemonic(covered) {
            return Err(ValidationError::invalid_choice(
                "RRSIG covered type must be a valid DNS record type.",
            ));
        }
        let algorithm = numeric(parse_u8(algorithm), "algorithm")?;
        let labels = numeric(parse_u8(labels), "labels")?;
        let original_ttl = numeric(parse_u32(original_ttl), "original TTL")?;
        let expiration = parse_timestamp(expiration, "expiration")?;
        let inception = parse_timestamp(inception, "inception")?;
        let key_tag = numeric(parse_u16(key_tag), "key tag")?;

        if !signer.ends_with('.') || !ctx.hostnames.is_valid(signer, false) {
            return Err(ValidationError::hostname(
                "RRSIG signer name must be a fully qualified domain name (end with a dot).",
            ));
        }
        let valid_signature = signature.iter().all(|part| {
            part.bytes()
                .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'+' | b'/' | b'='))
        });
        if !valid_signature {
            return Err(ValidationError::encoding(
                "RRSIG signature must be Base64 encoded.",
            ));
        }
        if inception > expiration {
            return Err(ValidationError::cross_field(
                "RRSIG inception must not be later than its expiration.",
            ));
        }

        Ok(Self {
            covered_type: covered.to_ascii_uppercase(),
            algorithm,
            labels,
            original_ttl,
            expiration,
            inception,
            key_tag,
            signer: (*signer).to_string(),
        })
    }

    /// Advisory warnings, judged against `now` and the owner name.
    #[must_use]
    pub fn advisories(&self, owner: &str, now: DateTime<Utc>) -> Vec<String> {
        let mut warnings: Vec<String> = algorithm_advisory(self.algorithm).into_iter().collect();
        if self.expiration < now {
            warnings.push(format!(
                "RRSIG signature expired at {}.",
                self.expiration.format("%Y-%m-%d %H:%M:%S UTC")
            ));
        }
        if self.inception > now {
            warnings.push(format!(
                "RRSIG signature is not valid before {}.",
                self.inception.format("%Y-%m-%d %H:%M:%S UTC")
            ));
        }
        let owner_labels = owner
            .split('.')
            .filter(|label| !label.is_empty() && *label != "*")
            .count();
        if usize::from(self.labels) > owner_labels {
            warnings.push(format!(
                "RRSIG labels value {} exceeds the {owner_labels} labels of the owner name.",
                self.labels
            ));
        }
        warnings.push(
            "RRSIG records are normally generated by the signer. Manual entries are overwritten when the zone is re-signed.".to_string(),
        );
        warnings
    }
}

/// Validator for RRSIG records.
#[derive(Debug, Default, Clone, Copy)]
pub struct RrsigValidator;

impl RecordValidator for RrsigValidator {
    fn check(&self, record: &RecordInput, ctx: &ValidationContext<'_>) -> RecordOutcome {
        let name = ctx.hostname(&record.name, true)?;
        check_printable(&record.content)?;
        let rrsig = RrsigContent::parse(&record.content, ctx)?;
        let warnings = rrsig.advisories(&name, Utc::now());

        let ttl = ctx.ttl(record)?;
        let priority = zero_priority(record, "RRSIG")?;

        finish(record.content.trim().to_string(), name, priority, ttl, warnings)
    }
}

#[cfg(test)]
#[path = "rrsig_tests.rs"]
mod rrsig_tests;
