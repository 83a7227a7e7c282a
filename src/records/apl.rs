// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! APL record validation (RFC 3123).
//!
//! Content is a space-separated list of `[!]afi:address/prefix` items, AFI 1 for IPv4
//! and 2 for IPv6.

use std::net::{Ipv4Addr, Ipv6Addr};

use crate::constants::{MAX_IPV4_PREFIX, MAX_IPV6_PREFIX};
use crate::primitives::numeric::parse_unsigned;
use crate::record::RecordInput;
use crate::records::{finish, zero_priority, RecordOutcome, RecordValidator, ValidationContext};
use crate::validation_errors::ValidationError;

/// Address of one APL item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AplAddress {
    V4(Ipv4Addr),
    V6(Ipv6Addr),
}

/// One `[!]afi:address/prefix` item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AplItem {
    pub negated: bool,
    pub address: AplAddress,
    pub prefix: u8,
}

impl AplItem {
    /// Parse one item.
    ///
    /// # Errors
    ///
    /// Returns an error naming the malformed part.
    pub fn parse(item: &str) -> Result<Self, ValidationError> {
        let (negated, body) = match item.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, item),
        };
        let format = || {
            ValidationError::structural("Invalid APL element format. Expected [!]afi:address/prefix.")
        };
        let (afi, rest) = body.split_once(':').ok_or_else(format)?;
        let (address, prefix) = rest.rsplit_once('/').ok_or_else(format)?;
        let afi = parse_unsigned(afi).ok_or_else(format)?;
        let prefix = parse_unsigned(prefix).ok_or_else(format)?;
        if address.is_empty() {
            return Err(format());
        }

        let (address, max_prefix) = match afi {
            1 => (
                AplAddress::V4(address.parse().map_err(|_| {
                    ValidationError::structural("Invalid IPv4 address in APL record.")
                })?),
                MAX_IPV4_PREFIX,
            ),
            2 => (
                AplAddress::V6(address.parse().map_err(|_| {
                    ValidationError::structural("Invalid IPv6 address in APL record.")
                })?),
                MAX_IPV6_PREFIX,
            ),
            _ => {
                return Err(ValidationError::invalid_choice(
                    "Invalid Address Family Identifier (AFI). Must be 1 for IPv4 or 2 for IPv6.",
                ))
            }
        };
        if prefix > u64::from(max_prefix) {
            let family = if afi == 1 { "IPv4" } else { "IPv6" };
            return Err(ValidationError::range(format!(
                "{family} prefix must be between 0 and {max_prefix}."
            )));
        }

        Ok(Self {
            negated,
            address,
            prefix: u8::try_from(prefix).map_err(|_| format())?,
        })
    }

    /// Returns true if an IPv4 address has non-zero octets past its prefix.
    #[must_use]
    pub fn has_trailing_octets(&self) -> bool {
        match self.address {
            AplAddress::V4(addr) => {
                let significant = usize::from(self.prefix).div_ceil(8);
                addr.octets().iter().skip(significant).any(|o| *o != 0)
            }
            AplAddress::V6(_) => false,
        }
    }
}

/// Parse every item of an APL record.
///
/// # Errors
///
/// Returns the first malformed item's error.
pub fn parse_apl(content: &str) -> Result<Vec<AplItem>, ValidationError> {
    content.split_whitespace().map(AplItem::parse).collect()
}

/// Validator for APL records.
#[derive(Debug, Default, Clone, Copy)]
pub struct AplValidator;

impl RecordValidator for AplValidator {
    fn check(&self, record: &RecordInput, ctx: &ValidationContext<'_>) -> RecordOutcome {
        let name = ctx.hostname(&record.name, true)?;
        if record.content.trim().is_empty() {
            return Err(ValidationError::structural("APL record content cannot be empty.").into());
        }
        let items = parse_apl(&record.content)?;

        let mut warnings = Vec::new();
        if items.iter().any(AplItem::has_trailing_octets) {
            warnings.push("RFC 3123 recommends that trailing zero octets should not be present in APL address parts.".to_string());
        }
        let lower = name.to_ascii_lowercase();
        if lower.contains("_axfr") || lower.contains("access") {
            warnings.push("RFC 3123 notes security considerations when using APL records for access control lists.".to_string());
        }

        let ttl = ctx.ttl(record)?;
        let priority = zero_priority(record, "APL")?;

        let content = record.content.split_whitespace().collect::<Vec<_>>().join(" ");
        finish(content, name, priority, ttl, warnings)
    }
}

#[cfg(test)]
#[path = "apl_tests.rs"]
mod apl_tests;
