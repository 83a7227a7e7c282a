// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! EUI48 and EUI64 record validation (RFC 7043).
//!
//! The presentation format is hyphen-separated hex octets, `00-11-22-33-44-55` or
//! `00-11-22-33-44-55-66-77`. Case is kept as entered.

use crate::primitives::text::check_printable;
use crate::record::RecordInput;
use crate::registry::RecordType;
use crate::records::{finish, zero_priority, RecordOutcome, RecordValidator, ValidationContext};
use crate::validation_errors::ValidationError;

/// The IANA OUI, `00-00-5E`.
const IANA_OUI: [u8; 3] = [0x00, 0x00, 0x5E];

/// Parse a hyphen-separated EUI of `octets` octets.
///
/// # Errors
///
/// Returns an error naming the common mistake when the input uses another MAC notation.
pub fn parse_eui(content: &str, octets: usize, type_name: &str) -> Result<Vec<u8>, ValidationError> {
    let expected = (0..octets).map(|_| "xx").collect::<Vec<_>>().join("-");
    let content = content.trim();

    if content.contains(':') {
        return Err(ValidationError::structural(format!(
            "{type_name} record must use hyphens, not colon separators (expected {expected})."
        )));
    }
    if content.contains('.') {
        let notation = if octets == 6 { "Cisco format" } else { "dotted format" };
        return Err(ValidationError::structural(format!(
            "{type_name} record must not use the {notation} (expected {expected})."
        )));
    }
    if !content.contains('-') && content.len() == octets * 2 {
        return Err(ValidationError::structural(format!(
            "{type_name} record has missing separators (expected {expected})."
        )));
    }

    let groups: Vec<&str> = content.split('-').collect();
    if groups.len() != octets
        || groups
            .iter()
            .any(|g| g.len() != 2 || !g.bytes().all(|b| b.is_ascii_hexdigit()))
    {
        return Err(ValidationError::structural(format!(
            "{type_name} record must be {octets} hexadecimal octets in the format {expected}."
        )));
    }

    groups
        .iter()
        .map(|g| u8::from_str_radix(g, 16))
        .collect::<Result<Vec<u8>, _>>()
        .map_err(|_| ValidationError::encoding(format!("{type_name} record contains invalid hexadecimal octets.")))
}

/// Advice about the kind of address an EUI denotes.
#[must_use]
pub fn eui_advisories(octets: &[u8], type_name: &str) -> Vec<String> {
    let mut warnings = vec![format!(
        "{type_name} records (RFC 7043) publish hardware addresses. Consider the privacy implications before publishing them in public DNS."
    )];

    let first = octets.first().copied().unwrap_or_default();
    if octets.iter().all(|&b| b == 0) {
        warnings.push("This is the all-zeros address, which does not identify a real interface.".to_string());
        return warnings;
    }
    if octets.iter().all(|&b| b == 0xFF) {
        warnings.push("This is the broadcast address, which does not identify a single interface.".to_string());
        return warnings;
    }
    if first & 0x01 != 0 {
        warnings.push("The group bit is set: this is a multicast address.".to_string());
    }
    if first & 0x02 != 0 {
        warnings.push(
            "The universal/local bit is set: this is a locally administered address, not a globally unique one.".to_string(),
        );
    }
    if octets.starts_with(&IANA_OUI) {
        warnings.push("This address uses the IANA OUI (00-00-5E), reserved for protocol assignments.".to_string());
    }
    if octets.len() == 8 && octets[3] == 0xFF && octets[4] == 0xFE {
        if first & 0x02 != 0 {
            warnings.push(
                "This value looks like a modified EUI-64 IPv6 interface identifier (RFC 4291) rather than a hardware EUI-64.".to_string(),
            );
        } else {
            warnings.push("This EUI-64 is derived from an EUI-48 address (FF-FE inserted after the OUI).".to_string());
        }
    }
    warnings
}

/// Validator for EUI48 and EUI64 records.
#[derive(Debug, Clone, Copy)]
pub struct EuiValidator {
    record_type: RecordType,
    octets: usize,
}

impl EuiValidator {
    pub const EUI48: Self = Self {
        record_type: RecordType::Eui48,
        octets: 6,
    };
    pub const EUI64: Self = Self {
        record_type: RecordType::Eui64,
        octets: 8,
    };

    /// The record type this instance validates.
    #[must_use]
    pub fn record_type(&self) -> RecordType {
        self.record_type
    }
}

impl RecordValidator for EuiValidator {
    fn check(&self, record: &RecordInput, ctx: &ValidationContext<'_>) -> RecordOutcome {
        let name = ctx.hostname(&record.name, true)?;
        check_printable(&record.content)?;
        let t = self.record_type.as_str();
        let octets = parse_eui(&record.content, self.octets, t)?;
        let warnings = eui_advisories(&octets, t);

        let ttl = ctx.ttl(record)?;
        let priority = zero_priority(record, t)?;

        finish(record.content.trim().to_string(), name, priority, ttl, warnings)
    }
}

#[cfg(test)]
#[path = "eui_tests.rs"]
mod eui_tests;
