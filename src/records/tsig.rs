// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Transaction security meta-records: TSIG (RFC 8945) and TKEY (RFC 2930).
//!
//! Both carry an algorithm name. It is accepted when it is one of the registered HMAC
//! names or any fully-qualified domain name (trailing dot) that passes the hostname
//! rules.

use chrono::NaiveDateTime;

use crate::primitives::encoding::{is_base64, is_hex};
use crate::primitives::hostname::HostnameValidator;
use crate::primitives::numeric::{parse_in_range, parse_u16, parse_unsigned};
use crate::primitives::text::check_printable;
use crate::record::RecordInput;
use crate::records::{finish, zero_priority, RecordOutcome, RecordValidator, ValidationContext};
use crate::validation_errors::ValidationError;

/// Registered TSIG algorithm names (RFC 8945 section 6).
const HMAC_ALGORITHMS: &[&str] = &[
    "hmac-md5.sig-alg.reg.int.",
    "hmac-md5.",
    "hmac-sha1.",
    "hmac-sha224.",
    "hmac-sha256.",
    "hmac-sha256-128.",
    "hmac-sha384.",
    "hmac-sha384-192.",
    "hmac-sha512.",
    "hmac-sha512-256.",
];

/// Highest extended RCODE assigned for TSIG and TKEY errors.
const MAX_TSIG_RCODE: u64 = 23;

/// Highest TKEY mode (RFC 2930 section 2.5).
const MAX_TKEY_MODE: u64 = 5;

/// Returns true for a registered HMAC name or a valid fully-qualified domain name.
#[must_use]
pub fn is_valid_algorithm_name(name: &str, hostnames: &HostnameValidator) -> bool {
    if HMAC_ALGORITHMS
        .iter()
        .any(|known| known.eq_ignore_ascii_case(name))
    {
        return true;
    }
    name.strip_suffix('.')
        .is_some_and(|domain| !domain.is_empty() && hostnames.is_valid(domain, false))
}

fn is_base64_or_hex(data: &str) -> bool {
    is_base64(data) || is_hex(data)
}

fn is_valid_time(field: &str) -> bool {
    if field.len() == 14 && field.bytes().all(|b| b.is_ascii_digit()) {
        return NaiveDateTime::parse_from_str(field, "%Y%m%d%H%M%S").is_ok();
    }
    parse_unsigned(field).is_some()
}

/// Validator for TSIG records:
/// `algorithm time-signed fudge mac original-id error other-len [other-data]`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TsigValidator;

impl TsigValidator {
    fn content(content: &str, hostnames: &HostnameValidator) -> Result<(), ValidationError> {
        let fields: Vec<&str> = content.split_whitespace().collect();
        let [algorithm, timestamp, fudge, mac, original_id, error, other_len, other_data @ ..] =
            fields.as_slice()
        else {
            return Err(ValidationError::structural(
                "TSIG record must contain at least algorithm-name, timestamp, fudge, mac, original-id, error, and other-len separated by spaces.",
            ));
        };

        if !is_valid_algorithm_name(algorithm, hostnames) {
            return Err(ValidationError::invalid_choice(
                "TSIG algorithm name must be a valid domain name ending with a dot (e.g., hmac-sha256.).",
            ));
        }
        if parse_unsigned(timestamp).is_none() {
            return Err(ValidationError::range(
                "TSIG timestamp must be a non-negative integer.",
            ));
        }
        if parse_u16(fudge).is_none() {
            return Err(ValidationError::range(
                "TSIG fudge must be a number between 0 and 65535.",
            ));
        }
        if !is_base64_or_hex(mac) {
            return Err(ValidationError::encoding(
                "TSIG MAC must be a valid base64-encoded string or hexadecimal string.",
            ));
        }
        if parse_u16(original_id).is_none() {
            return Err(ValidationError::range(
                "TSIG original ID must be a number between 0 and 65535.",
            ));
        }
        if parse_in_range(error, 0, MAX_TSIG_RCODE).is_none() {
            return Err(ValidationError::range(
                "TSIG error must be a valid DNS RCODE number between 0 and 23.",
            ));
        }
        let other_len = parse_u16(other_len).ok_or_else(|| {
            ValidationError::range("TSIG other-len must be a number between 0 and 65535.")
        })?;
        let other_data = other_data.concat();
        if other_len > 0 && !other_data.is_empty() && !is_base64_or_hex(&other_data) {
            return Err(ValidationError::encoding(
                "TSIG other-data must be a valid base64-encoded string or hexadecimal string.",
            ));
        }
        Ok(())
    }
}

impl RecordValidator for TsigValidator {
    fn check(&self, record: &RecordInput, ctx: &ValidationContext<'_>) -> RecordOutcome {
        let name = ctx.hostname(&record.name, true)?;
        check_printable(&record.content)?;
        Self::content(&record.content, ctx.hostnames)?;

        let ttl = ctx.ttl(record)?;
        let priority = zero_priority(record, "TSIG")?;

        finish(
            record.content.trim().to_string(),
            name,
            priority,
            ttl,
            vec![
                "TSIG records are generated per transaction and are not normally stored in a zone."
                    .to_string(),
            ],
        )
    }
}

/// Validator for TKEY records:
/// `algorithm inception expiration mode error key-data`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TkeyValidator;

impl TkeyValidator {
    fn content(content: &str, hostnames: &HostnameValidator) -> Result<(), ValidationError> {
        let fields: Vec<&str> = content.split_whitespace().collect();
        let [algorithm, inception, expiration, mode, error, key_data @ ..] = fields.as_slice()
        else {
            return Err(Self::missing());
        };
        if key_data.is_empty() {
            return Err(Self::missing());
        }

        if !is_valid_algorithm_name(algorithm, hostnames) {
            return Err(ValidationError::invalid_choice(
                "TKEY algorithm name must be a valid domain name.",
            ));
        }
        if !is_valid_time(inception) {
            return Err(ValidationError::structural(
                "TKEY inception time must be a valid Unix timestamp or YYYYMMDDHHmmSS format.",
            ));
        }
        if !is_valid_time(expiration) {
            return Err(ValidationError::structural(
                "TKEY expiration time must be a valid Unix timestamp or YYYYMMDDHHmmSS format.",
            ));
        }
        if parse_in_range(mode, 0, MAX_TKEY_MODE).is_none() {
            return Err(ValidationError::invalid_choice(
                "TKEY mode must be a number between 0 and 5.",
            ));
        }
        if parse_in_range(error, 0, MAX_TSIG_RCODE).is_none() {
            return Err(ValidationError::range(
                "TKEY error must be a valid DNS RCODE number between 0 and 23.",
            ));
        }
        if !is_base64_or_hex(&key_data.concat()) {
            return Err(ValidationError::encoding(
                "TKEY key data must be valid base64-encoded data or a hexadecimal string.",
            ));
        }
        Ok(())
    }

    fn missing() -> ValidationError {
        ValidationError::structural(
            "TKEY record must contain algorithm-name, inception-time, expiration-time, mode, error, and key-data separated by spaces.",
        )
    }
}

impl RecordValidator for TkeyValidator {
    fn check(&self, record: &RecordInput, ctx: &ValidationContext<'_>) -> RecordOutcome {
        let name = ctx.hostname(&record.name, true)?;
        check_printable(&record.content)?;
        Self::content(&record.content, ctx.hostnames)?;

        let ttl = ctx.ttl(record)?;
        let priority = zero_priority(record, "TKEY")?;

        finish(record.content.trim().to_string(), name, priority, ttl, Vec::new())
    }
}

#[cfg(test)]
#[path = "tsig_tests.rs"]
mod tsig_tests;
