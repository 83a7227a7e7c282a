// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! CSYNC record validation (RFC 7477): `soa-serial flags type [type ...]`.

use crate::constants::CSYNC_PROHIBITED_TYPES;
use crate::primitives::hostname::is_zone_apex;
use crate::primitives::numeric::{parse_in_range, parse_u32};
use crate::primitives::text::check_printable;
use crate::record::RecordInput;
use crate::records::nsec::TypeBitmap;
use crate::records::{finish, zero_priority, RecordOutcome, RecordValidator, ValidationContext};
use crate::validation_errors::ValidationError;

/// Flag bit: process the record immediately.
pub const CSYNC_FLAG_IMMEDIATE: u8 = 0x01;

/// Flag bit: require the child SOA serial to be at least the record's serial.
pub const CSYNC_FLAG_SOAMINIMUM: u8 = 0x02;

/// Parsed CSYNC content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsyncContent {
    pub soa_serial: u32,
    pub flags: u8,
    pub types: TypeBitmap,
}

impl CsyncContent {
    /// Parse CSYNC content.
    ///
    /// # Errors
    ///
    /// Returns the first field violation.
    pub fn parse(content: &str) -> Result<Self, ValidationError> {
        let mut fields = content.split_whitespace();

        let soa_serial = fields.next().and_then(parse_u32).ok_or_else(|| {
            ValidationError::range(
                "CSYNC SOA Serial must be a number between 0 and 4294967295.",
            )
        })?;

        let flags = fields
            .next()
            .and_then(|f| parse_in_range(f, 0, 3))
            .and_then(|f| u8::try_from(f).ok())
            .ok_or_else(|| {
                ValidationError::range(
                    "CSYNC Flags must be a number between 0 and 3 (bit 0 immediate, bit 1 soaminimum).",
                )
            })?;

        let tokens: Vec<&str> = fields.collect();
        if tokens.is_empty() {
            return Err(ValidationError::structural(
                "CSYNC record must specify at least one record type to synchronize.",
            ));
        }
        let types = TypeBitmap::parse(tokens, "CSYNC").map_err(|e| {
            ValidationError::invalid_choice(format!("Invalid Type in CSYNC record. {}", e.message()))
        })?;
        if let Some(prohibited) = CSYNC_PROHIBITED_TYPES.iter().find(|t| types.contains(t)) {
            return Err(ValidationError::invalid_choice(format!(
                "Type {prohibited} is prohibited in CSYNC records (RFC 7477 section 3.2)."
            )));
        }

        Ok(Self {
            soa_serial,
            flags,
            types,
        })
    }
}

/// Validator for CSYNC records.
#[derive(Debug, Default, Clone, Copy)]
pub struct CsyncValidator;

impl RecordValidator for CsyncValidator {
    fn check(&self, record: &RecordInput, ctx: &ValidationContext<'_>) -> RecordOutcome {
        let name = ctx.hostname(&record.name, true)?;
        check_printable(&record.content)?;
        let parsed = CsyncContent::parse(&record.content)?;

        let mut warnings = vec![
            "CSYNC records are only acted upon by the parent when signed with DNSSEC.".to_string(),
        ];
        if record
            .zone
            .as_deref()
            .is_none_or(|zone| !is_zone_apex(&name, zone))
        {
            warnings.push("CSYNC records must be placed at the zone apex of a child zone.".to_string());
        }
        if parsed.flags & CSYNC_FLAG_IMMEDIATE == 0 {
            warnings.push(
                "The immediate flag is not set: the parent waits for a DNSSEC-validated SOA serial before processing.".to_string(),
            );
        }

        let ttl = ctx.ttl(record)?;
        let priority = zero_priority(record, "CSYNC")?;

        finish(
            record.content.split_whitespace().collect::<Vec<_>>().join(" "),
            name,
            priority,
            ttl,
            warnings,
        )
    }
}

#[cfg(test)]
#[path = "csync_tests.rs"]
mod csync_tests;
