// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! ILNP records (RFC 6742): NID, L32, L64 and LP.
//!
//! L32, L64 and LP carry their preference as the first content field. An explicit
//! priority field overrides it. NID content is the node identifier alone and its
//! preference lives in the priority field.

use std::net::{IpAddr, Ipv4Addr};

use crate::constants::{DEFAULT_ILNP_PREFERENCE, MAX_U16_FIELD};
use crate::primitives::ip::parse_ipv4;
use crate::primitives::numeric::parse_in_range;
use crate::primitives::text::check_printable;
use crate::record::RecordInput;
use crate::records::{finish, preference, RecordOutcome, RecordValidator, ValidationContext};
use crate::validation_errors::ValidationError;

/// Seconds below which an LP TTL is considered short.
const LP_SHORT_TTL: i32 = 3600;

fn experimental_note(type_name: &str) -> String {
    format!(
        "Note: {type_name} records are used by ILNP, an experimental protocol (RFC 6740, RFC 6742)."
    )
}

fn wildcard_note(name: &str, type_name: &str) -> Option<String> {
    name.starts_with("*.").then(|| {
        format!("{type_name} records should not be used with wildcard DNS entries; ILNP locators belong to specific nodes.")
    })
}

/// Split `preference value` content and parse the preference.
fn split_preference<'c>(
    content: &'c str,
    type_name: &str,
    what: &str,
) -> Result<(u16, &'c str), ValidationError> {
    let fields: Vec<&str> = content.split_whitespace().collect();
    let &[raw_pref, value] = fields.as_slice() else {
        return Err(ValidationError::structural(format!(
            "{type_name} record must contain preference and {what} separated by space."
        )));
    };
    let pref = parse_in_range(raw_pref, 0, MAX_U16_FIELD)
        .and_then(|p| u16::try_from(p).ok())
        .ok_or_else(|| {
            ValidationError::range(format!(
                "{type_name} preference must be a number between 0 and 65535."
            ))
        })?;
    Ok((pref, value))
}

/// Parse a 64-bit value written as four colon-separated groups of 1-4 hex digits.
fn parse_hex_groups(value: &str) -> Option<Result<u64, usize>> {
    let groups: Vec<&str> = value.split(':').collect();
    if groups.len() != 4
        || groups
            .iter()
            .any(|g| g.is_empty() || !g.bytes().all(|b| b.is_ascii_hexdigit()))
    {
        return None;
    }
    if let Some(position) = groups.iter().position(|g| g.len() > 4) {
        return Some(Err(position));
    }
    let mut result = 0u64;
    for group in groups {
        result = (result << 16) | u64::from(u16::from_str_radix(group, 16).ok()?);
    }
    Some(Ok(result))
}

/// Parse an L64 locator.
///
/// # Errors
///
/// Returns an error for a malformed, unspecified or all-ones locator.
pub fn parse_locator64(value: &str) -> Result<u64, ValidationError> {
    match parse_hex_groups(value) {
        None => Err(ValidationError::structural(
            "L64 locator must be a valid 64-bit hexadecimal value in the format xxxx:xxxx:xxxx:xxxx.",
        )),
        Some(Err(position)) => Err(ValidationError::structural(format!(
            "L64 locator group {} must be a hexadecimal IPv6 address segment of at most 4 digits.",
            position + 1
        ))),
        Some(Ok(0)) => Err(ValidationError::range(
            "L64 locator must not be the unspecified (all-zeros) value.",
        )),
        Some(Ok(u64::MAX)) => Err(ValidationError::range(
            "L64 locator must not be the all-ones value.",
        )),
        Some(Ok(locator)) => Ok(locator),
    }
}

/// Parse an L32 locator.
///
/// # Errors
///
/// Returns an error for a malformed, unspecified or broadcast address.
pub fn parse_locator32(value: &str) -> Result<Ipv4Addr, ValidationError> {
    let addr = parse_ipv4(value)
        .map_err(|_| ValidationError::structural("L32 locator must be a valid IPv4 address."))?;
    if addr.is_unspecified() {
        return Err(ValidationError::range(
            "L32 locator must not be the unspecified address 0.0.0.0.",
        ));
    }
    if addr.is_broadcast() {
        return Err(ValidationError::range(
            "L32 locator must not be the all-ones broadcast address.",
        ));
    }
    Ok(addr)
}

/// Parsed NID node identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeId(pub u64);

impl NodeId {
    /// Parse `xxxx:xxxx:xxxx:xxxx` or 16 bare hex digits. The flag is true for the bare form.
    ///
    /// # Errors
    ///
    /// Returns an error for a malformed identifier or a set group bit.
    pub fn parse(content: &str) -> Result<(Self, bool), ValidationError> {
        let content = content.trim();
        let (value, bare) = if content.contains(':') {
            match parse_hex_groups(content) {
                Some(Ok(value)) => (value, false),
                _ => {
                    return Err(ValidationError::structural(
                        "NID record content must be in format xxxx:xxxx:xxxx:xxxx with 4 groups of 4 hexadecimal digits.",
                    ))
                }
            }
        } else {
            if content.len() != 16 || !content.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(ValidationError::structural(
                    "NID record content must be a 64-bit hexadecimal value (16 hex characters or xxxx:xxxx:xxxx:xxxx format).",
                ));
            }
            let value = u64::from_str_radix(content, 16).map_err(|_| {
                ValidationError::encoding("NID record content is not valid hexadecimal.")
            })?;
            (value, true)
        };

        let first_octet = value >> 56;
        if first_octet & 0x01 != 0 {
            return Err(ValidationError::range(
                "Invalid NID record: the group bit (least significant bit of the first octet) must be 0 in ILNP (RFC 6742).",
            ));
        }
        Ok((Self(value), bare))
    }

    /// Presentation form: four zero-padded lowercase groups.
    #[must_use]
    pub fn to_presentation(self) -> String {
        let v = self.0;
        format!(
            "{:04x}:{:04x}:{:04x}:{:04x}",
            (v >> 48) & 0xFFFF,
            (v >> 32) & 0xFFFF,
            (v >> 16) & 0xFFFF,
            v & 0xFFFF
        )
    }

    /// Advice about the identifier's scope.
    #[must_use]
    pub fn advisories(self) -> Vec<String> {
        let mut warnings = Vec::new();
        if (self.0 >> 56) & 0x02 == 0 {
            warnings.push(
                "The universal/local bit is 0 (universal): this NID is based on a globally unique identifier.".to_string(),
            );
        } else {
            warnings.push(
                "The universal/local bit is 1 (local): this NID is locally assigned and not globally unique.".to_string(),
            );
        }
        if self.0 == 0 {
            warnings.push("A zero NodeID value is unusual and may indicate a configuration error.".to_string());
        }
        warnings
    }
}

/// Validator for NID records.
#[derive(Debug, Default, Clone, Copy)]
pub struct NidValidator;

impl RecordValidator for NidValidator {
    fn check(&self, record: &RecordInput, ctx: &ValidationContext<'_>) -> RecordOutcome {
        let name = ctx.hostname(&record.name, true)?;
        if record.content.trim().is_empty() {
            return Err(ValidationError::structural("NID record content cannot be empty.").into());
        }
        check_printable(&record.content)?;
        let (node_id, bare) = NodeId::parse(&record.content)?;

        let mut warnings = vec![experimental_note("NID")];
        if bare {
            warnings.push(
                "NID records should use the RFC 6742 presentation format xxxx:xxxx:xxxx:xxxx.".to_string(),
            );
        }
        warnings.extend(node_id.advisories());
        warnings.extend(wildcard_note(&name, "NID"));

        let ttl = ctx.ttl(record)?;
        let priority = preference(
            record,
            DEFAULT_ILNP_PREFERENCE,
            "NID record preference must be a number between 0 and 65535.",
        )?;

        finish(node_id.to_presentation(), name, priority, ttl, warnings)
    }
}

/// Validator for L32 records: `preference ipv4-locator`.
#[derive(Debug, Default, Clone, Copy)]
pub struct L32Validator;

impl RecordValidator for L32Validator {
    fn check(&self, record: &RecordInput, ctx: &ValidationContext<'_>) -> RecordOutcome {
        let name = ctx.hostname(&record.name, true)?;
        check_printable(&record.content)?;
        let (pref, value) = split_preference(&record.content, "L32", "locator32")?;
        let locator = parse_locator32(value)?;

        let mut warnings = vec![
            experimental_note("L32"),
            "Mobile ILNP nodes may need very low TTL values for L32 records so locator changes propagate quickly.".to_string(),
        ];
        if locator.is_private() || locator.is_loopback() || locator.is_link_local() {
            warnings.push(format!(
                "L32 locator {locator} is not globally routable."
            ));
        }
        warnings.extend(wildcard_note(&name, "L32"));

        let ttl = ctx.ttl(record)?;
        let priority = preference(record, pref, "L32 preference must be a number between 0 and 65535.")?;

        finish(format!("{pref} {value}"), name, priority, ttl, warnings)
    }
}

/// Validator for L64 records: `preference locator64`.
#[derive(Debug, Default, Clone, Copy)]
pub struct L64Validator;

impl RecordValidator for L64Validator {
    fn check(&self, record: &RecordInput, ctx: &ValidationContext<'_>) -> RecordOutcome {
        let name = ctx.hostname(&record.name, true)?;
        check_printable(&record.content)?;
        let (pref, value) = split_preference(&record.content, "L64", "locator64")?;
        parse_locator64(value)?;

        let mut warnings = vec![
            experimental_note("L64"),
            "Mobile ILNP nodes may need very low TTL values for L64 records so locator changes propagate quickly.".to_string(),
        ];
        warnings.extend(wildcard_note(&name, "L64"));

        let ttl = ctx.ttl(record)?;
        let priority = preference(record, pref, "L64 preference must be a number between 0 and 65535.")?;

        finish(format!("{pref} {value}"), name, priority, ttl, warnings)
    }
}

/// Validator for LP records: `preference fqdn`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LpValidator;

impl RecordValidator for LpValidator {
    fn check(&self, record: &RecordInput, ctx: &ValidationContext<'_>) -> RecordOutcome {
        let name = ctx.hostname(&record.name, true)?;
        check_printable(&record.content)?;
        let (pref, fqdn) = split_preference(&record.content, "LP", "FQDN")?;
        if fqdn.parse::<IpAddr>().is_ok() || !ctx.hostnames.is_valid(fqdn, false) {
            return Err(ValidationError::hostname(
                "LP FQDN must be a valid fully qualified domain name.",
            )
            .into());
        }

        let mut warnings = vec![experimental_note("LP")];
        if fqdn.trim_end_matches('.').eq_ignore_ascii_case(&name) {
            warnings.push(
                "The FQDN in an LP record SHOULD NOT have the same value as the owner name (RFC 6742).".to_string(),
            );
        }
        if !fqdn.ends_with('.') {
            warnings.push(
                "End the FQDN with a trailing dot so it is treated as an absolute domain name.".to_string(),
            );
        }
        warnings.extend(wildcard_note(&name, "LP"));

        let ttl = ctx.ttl(record)?;
        if ttl < LP_SHORT_TTL {
            warnings.push(
                "Consider longer TTL values for LP records. Unlike L32 and L64, LP records are stable (RFC 6742).".to_string(),
            );
        }
        let priority = preference(record, pref, "LP preference must be a number between 0 and 65535.")?;

        finish(format!("{pref} {fqdn}"), name, priority, ttl, warnings)
    }
}

#[cfg(test)]
#[path = "ilnp_tests.rs"]
mod ilnp_tests;
