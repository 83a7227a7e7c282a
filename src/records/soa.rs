// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! SOA record validation.
//!
//! Content is `primary-ns mailbox serial refresh retry expire minimum`. The mailbox is
//! accepted either as an address (`hostmaster@example.com`) or in zone-file form
//! (`hostmaster.example.com`, with `\.` escaping dots in the local part) and is always
//! rewritten to zone-file form. Timers below the RFC 2308 recommendations produce
//! warnings, never errors.

use chrono::NaiveDate;

use crate::constants::{
    MAX_SOA_SERIAL, SOA_FIELD_COUNT, SOA_MAX_MINIMUM, SOA_MIN_EXPIRE, SOA_MIN_MINIMUM,
    SOA_MIN_REFRESH, SOA_MIN_RETRY,
};
use crate::primitives::email::is_valid_email;
use crate::primitives::hostname::is_zone_apex;
use crate::primitives::numeric::parse_unsigned;
use crate::record::RecordInput;
use crate::records::{finish, zero_priority, RecordOutcome, RecordValidator, ValidationContext};
use crate::validation_errors::ValidationError;
use crate::validation_result::Rejection;

/// Parsed SOA content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoaContent {
    /// Primary name server, without trailing dot
    pub primary_ns: String,
    /// Local part of the responsible mailbox, unescaped
    pub mailbox_local: String,
    /// Domain of the responsible mailbox
    pub mailbox_domain: String,
    /// Zone serial
    pub serial: u64,
    /// Refresh interval in seconds
    pub refresh: u64,
    /// Retry interval in seconds
    pub retry: u64,
    /// Expire interval in seconds
    pub expire: u64,
    /// Negative caching TTL in seconds
    pub minimum: u64,
}

impl SoaContent {
    /// Render the content in zone-file form with the mailbox dots escaped.
    #[must_use]
    pub fn to_content(&self) -> String {
        format!(
            "{} {}.{} {} {} {} {} {}",
            self.primary_ns,
            self.mailbox_local.replace('.', "\\."),
            self.mailbox_domain,
            self.serial,
            self.refresh,
            self.retry,
            self.expire,
            self.minimum
        )
    }
}

/// Validator for SOA records.
#[derive(Debug, Default, Clone, Copy)]
pub struct SoaValidator;

impl RecordValidator for SoaValidator {
    fn check(&self, record: &RecordInput, ctx: &ValidationContext<'_>) -> RecordOutcome {
        let zone = record
            .zone
            .as_deref()
            .filter(|zone| !zone.is_empty())
            .ok_or_else(|| {
                ValidationError::structural(
                    "SOA validation parameters not set. The zone name is required to validate an SOA record.",
                )
            })?;

        if !is_zone_apex(&record.name, zone) {
            return Err(ValidationError::cross_field(
                "Invalid value for name field of SOA record. It should be the name of the zone.",
            )
            .into());
        }

        let name = ctx.hostname(&record.name, true)?;
        let soa = parse(&record.content, &ctx.config.hostmaster, ctx)?;
        let warnings = advisories(&soa);
        let ttl = ctx.ttl(record)?;
        let priority = zero_priority(record, "SOA")?;

        finish(soa.to_content(), name, priority, ttl, warnings)
    }
}

/// Parse SOA content.
///
/// A missing mailbox takes `hostmaster`.
///
/// # Errors
///
/// Returns the first structural, hostname or range problem.
pub fn parse(
    content: &str,
    hostmaster: &str,
    ctx: &ValidationContext<'_>,
) -> Result<SoaContent, Rejection> {
    let fields: Vec<&str> = content.split_whitespace().collect();
    if fields.is_empty() || fields.len() > SOA_FIELD_COUNT {
        return Err(ValidationError::structural(
            "Your content field doesnt have a legit value. SOA record must have between 1 and 7 fields.",
        )
        .into());
    }

    let primary_ns = fields[0];
    let is_arpa = primary_ns
        .trim_end_matches('.')
        .to_ascii_lowercase()
        .ends_with(".arpa");
    let primary_ns = match ctx.hostname(primary_ns, false) {
        Ok(ns) if !is_arpa => ns,
        _ => {
            return Err(
                ValidationError::hostname("Invalid primary nameserver in SOA record.").into(),
            )
        }
    };

    let (mailbox_local, mailbox_domain) =
        parse_mailbox(fields.get(1).copied().unwrap_or(hostmaster))?;

    let serial = match fields.get(2) {
        Some(raw) => parse_serial(raw)?,
        None => 0,
    };

    let [_, _, _, refresh, retry, expire, minimum] =
        <[&str; SOA_FIELD_COUNT]>::try_from(fields).map_err(|_| {
            ValidationError::structural(
                "Your content field doesnt have a legit value. SOA record must have exactly 7 fields (primary NS, email, serial, refresh, retry, expire, minimum).",
            )
        })?;

    Ok(SoaContent {
        primary_ns,
        mailbox_local,
        mailbox_domain,
        serial,
        refresh: parse_timer("refresh", refresh)?,
        retry: parse_timer("retry", retry)?,
        expire: parse_timer("expire", expire)?,
        minimum: parse_timer("minimum", minimum)?,
    })
}

/// Split a mailbox into its unescaped local part and domain.
///
/// # Errors
///
/// Returns a structural error if the result is not a valid address.
fn parse_mailbox(raw: &str) -> Result<(String, String), ValidationError> {
    let address = if raw.contains('@') {
        raw.to_string()
    } else {
        match split_unescaped_dot(raw) {
            Some((local, domain)) => format!("{}@{domain}", local.replace('\\', "")),
            None => raw.replace('\\', ""),
        }
    };

    if !is_valid_email(&address) {
        return Err(ValidationError::structural(
            "Invalid email address in SOA record.",
        ));
    }

    match address.split_once('@') {
        Some((local, domain)) => Ok((local.to_string(), domain.to_string())),
        None => Err(ValidationError::structural(
            "Invalid email address in SOA record.",
        )),
    }
}

/// Split at the first dot not preceded by a backslash.
fn split_unescaped_dot(s: &str) -> Option<(&str, &str)> {
    let bytes = s.as_bytes();
    (0..bytes.len())
        .find(|&i| bytes[i] == b'.' && (i == 0 || bytes[i - 1] != b'\\'))
        .map(|i| (&s[..i], &s[i + 1..]))
}

fn parse_serial(raw: &str) -> Result<u64, ValidationError> {
    if raw.starts_with('-') && parse_unsigned(&raw[1..]).is_some() {
        return Err(ValidationError::range(
            "Serial number must be a 32-bit unsigned integer (0 to 4294967295).",
        ));
    }
    let serial = parse_unsigned(raw)
        .ok_or_else(|| ValidationError::structural("Serial number must be numeric."))?;
    if serial > MAX_SOA_SERIAL {
        return Err(ValidationError::range(
            "Serial number must be a 32-bit unsigned integer (0 to 4294967295).",
        ));
    }
    Ok(serial)
}

fn parse_timer(field: &str, raw: &str) -> Result<u64, ValidationError> {
    if raw.starts_with('-') && parse_unsigned(&raw[1..]).is_some() {
        return Err(ValidationError::range(format!(
            "SOA {field} field must be a positive integer."
        )));
    }
    let value = parse_unsigned(raw).ok_or_else(|| {
        ValidationError::structural(format!("SOA {field} field must be numeric."))
    })?;
    if value > MAX_SOA_SERIAL {
        return Err(ValidationError::range(format!(
            "SOA {field} field must be a 32-bit unsigned integer."
        )));
    }
    Ok(value)
}

/// Returns true for a ten-digit serial whose first eight digits are not a calendar date.
fn is_invalid_date_serial(serial: u64) -> bool {
    let text = serial.to_string();
    if text.len() != 10 {
        return false;
    }
    let year = text[0..4].parse::<i32>().unwrap_or(0);
    let month = text[4..6].parse::<u32>().unwrap_or(0);
    let day = text[6..8].parse::<u32>().unwrap_or(0);
    NaiveDate::from_ymd_opt(year, month, day).is_none()
}

/// RFC 1912 and RFC 2308 recommendations for a parsed SOA.
#[must_use]
pub fn advisories(soa: &SoaContent) -> Vec<String> {
    let mut warnings = Vec::new();

    if is_invalid_date_serial(soa.serial) {
        warnings.push(
            "Serial number appears to use YYYYMMDDnn format but contains an invalid date. This is allowed but not recommended.".to_string(),
        );
    }

    for (field, value, minimum) in [
        ("refresh", soa.refresh, SOA_MIN_REFRESH),
        ("retry", soa.retry, SOA_MIN_RETRY),
        ("expire", soa.expire, SOA_MIN_EXPIRE),
        ("minimum", soa.minimum, SOA_MIN_MINIMUM),
    ] {
        if value < minimum {
            warnings.push(format!(
                "SOA {field} value ({value}) is below the RFC 2308 recommended minimum ({minimum}). This is allowed but not recommended."
            ));
        }
        if field == "retry" && soa.retry >= soa.refresh {
            warnings.push(
                "SOA retry value should be less than refresh value according to RFC 2308. This is allowed but not recommended.".to_string(),
            );
        }
    }

    if soa.minimum > SOA_MAX_MINIMUM {
        warnings.push(
            "SOA minimum (negative caching) value exceeds 24 hours (86400), which may be excessive according to RFC 2308.".to_string(),
        );
    }

    warnings
}

#[cfg(test)]
#[path = "soa_tests.rs"]
mod soa_tests;
