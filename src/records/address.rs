// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! A and AAAA record validation.
//!
//! Content is a single address literal. AAAA additionally refuses addresses that can never
//! be useful as published record data: the unspecified address `::`, the loopback
//! address `::1`, and deprecated site-local addresses (`fec0::/10`, RFC 3879).

use std::net::Ipv6Addr;

use crate::primitives::ip::{is_ipv6_site_local, parse_ipv4, parse_ipv6};
use crate::record::RecordInput;
use crate::records::{finish, zero_priority, RecordOutcome, RecordValidator, ValidationContext};
use crate::validation_errors::ValidationError;

/// Validator for A records.
#[derive(Debug, Default, Clone, Copy)]
pub struct AValidator;

impl RecordValidator for AValidator {
    fn check(&self, record: &RecordInput, ctx: &ValidationContext<'_>) -> RecordOutcome {
        let name = ctx.hostname(&record.name, true)?;
        let address = parse_ipv4(record.content.trim())?;
        let ttl = ctx.ttl(record)?;
        let priority = zero_priority(record, "A")?;

        finish(address.to_string(), name, priority, ttl, Vec::new())
    }
}

/// Validator for AAAA records.
#[derive(Debug, Default, Clone, Copy)]
pub struct AaaaValidator;

impl RecordValidator for AaaaValidator {
    fn check(&self, record: &RecordInput, ctx: &ValidationContext<'_>) -> RecordOutcome {
        let name = ctx.hostname(&record.name, true)?;
        let content = record.content.trim();
        let address = parse_ipv6(content, ctx.config.ipv6_canonical)?;
        check_publishable(&address)?;
        let ttl = ctx.ttl(record)?;
        let priority = zero_priority(record, "AAAA")?;

        finish(content.to_string(), name, priority, ttl, Vec::new())
    }
}

/// Refuse IPv6 addresses that are never valid AAAA content.
///
/// # Errors
///
/// Returns a structural error naming the address class.
pub fn check_publishable(address: &Ipv6Addr) -> Result<(), ValidationError> {
    if address.is_unspecified() {
        return Err(ValidationError::structural(
            "This is not a valid IPv6 address. The unspecified address (::) cannot be used as record content.",
        ));
    }
    if address.is_loopback() {
        return Err(ValidationError::structural(
            "This is not a valid IPv6 address. The loopback address (::1) cannot be used as record content.",
        ));
    }
    if is_ipv6_site_local(address) {
        return Err(ValidationError::structural(
            "This is not a valid IPv6 address. Site-local addresses (fec0::/10) are deprecated (RFC 3879).",
        ));
    }
    Ok(())
}

#[cfg(test)]
#[path = "address_tests.rs"]
mod address_tests;
