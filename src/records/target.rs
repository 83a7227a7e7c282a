// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Validation of record types whose content is a single host name.
//!
//! NS, PTR, DNAME, ALIAS and the experimental mailbox types MB, MG and MR share one
//! grammar; they differ only in wording and advisories. AFSDB prefixes the host name
//! with a subtype.

use crate::primitives::hostname::is_zone_apex;
use crate::primitives::numeric::parse_unsigned;
use crate::record::RecordInput;
use crate::registry::RecordType;
use crate::records::{
    exact_fields, finish, zero_priority, RecordOutcome, RecordValidator, ValidationContext,
};
use crate::validation_errors::ValidationError;

/// Validator for a record whose content is one host name.
#[derive(Debug, Clone, Copy)]
pub struct TargetValidator {
    record_type: RecordType,
    target: &'static str,
}

impl TargetValidator {
    /// NS: delegation to a name server.
    pub const NS: Self = Self::new(RecordType::Ns, "name server");
    /// PTR: reverse mapping.
    pub const PTR: Self = Self::new(RecordType::Ptr, "PTR target");
    /// DNAME: subtree redirection (RFC 6672).
    pub const DNAME: Self = Self::new(RecordType::Dname, "DNAME target");
    /// ALIAS: apex alias flattened by the authoritative server.
    pub const ALIAS: Self = Self::new(RecordType::Alias, "ALIAS target");
    /// MB: mailbox host (RFC 1035, experimental).
    pub const MB: Self = Self::new(RecordType::Mb, "mailbox");
    /// MG: mail group member (RFC 1035, experimental).
    pub const MG: Self = Self::new(RecordType::Mg, "mail group member");
    /// MR: mail rename (RFC 1035, experimental).
    pub const MR: Self = Self::new(RecordType::Mr, "mail rename");

    const fn new(record_type: RecordType, target: &'static str) -> Self {
        Self {
            record_type,
            target,
        }
    }

    /// The record type this validator serves.
    #[must_use]
    pub fn record_type(&self) -> RecordType {
        self.record_type
    }

    fn advisories(&self, name: &str, target: &str, zone: Option<&str>) -> Vec<String> {
        let mut warnings = Vec::new();
        match self.record_type {
            RecordType::Dname => {
                if zone.is_some_and(|zone| is_zone_apex(name, zone)) {
                    warnings.push(
                        "A DNAME at the zone apex redirects every name below the zone but not the apex itself (RFC 6672 section 2.3).".to_string(),
                    );
                }
            }
            RecordType::Alias => warnings.push(
                "ALIAS is not a standard record type; it is resolved by the authoritative server and only works with servers that support it.".to_string(),
            ),
            RecordType::Mb | RecordType::Mg | RecordType::Mr => warnings.push(format!(
                "{} records are experimental (RFC 1035) and are not supported by most mail software.",
                self.record_type
            )),
            RecordType::Ns => {
                if zone.is_some_and(|zone| is_zone_apex(target, zone)) {
                    warnings.push(
                        "The name server is the zone itself. Name servers are normally separate hosts.".to_string(),
                    );
                }
            }
            _ => {}
        }
        warnings
    }
}

impl RecordValidator for TargetValidator {
    fn check(&self, record: &RecordInput, ctx: &ValidationContext<'_>) -> RecordOutcome {
        let name = ctx.hostname(&record.name, true)?;
        let target = ctx.hostname(record.content.trim(), false).map_err(|_| {
            ValidationError::hostname(format!("Invalid {} hostname.", self.target))
        })?;

        if self.record_type == RecordType::Dname && is_same_or_below(&target, &name) {
            return Err(ValidationError::cross_field(
                "A DNAME record cannot point to its own name or to a name below it (RFC 6672 section 2.4).",
            )
            .into());
        }

        let ttl = ctx.ttl(record)?;
        let priority = zero_priority(record, self.record_type.as_str())?;
        let warnings = self.advisories(&name, &target, record.zone.as_deref());

        finish(target, name, priority, ttl, warnings)
    }
}

/// Returns true if `name` equals `owner` or lies below it.
fn is_same_or_below(name: &str, owner: &str) -> bool {
    let name = name.to_ascii_lowercase();
    let owner = owner.to_ascii_lowercase();
    name == owner || name.ends_with(&format!(".{owner}"))
}

/// Validator for AFSDB records (RFC 1183): `subtype hostname`.
#[derive(Debug, Default, Clone, Copy)]
pub struct AfsdbValidator;

impl RecordValidator for AfsdbValidator {
    fn check(&self, record: &RecordInput, ctx: &ValidationContext<'_>) -> RecordOutcome {
        let name = ctx.hostname(&record.name, true)?;
        let [subtype, host] = exact_fields::<2>(
            &record.content,
            "AFSDB record must contain a subtype and a hostname.",
        )?;

        let subtype = parse_unsigned(subtype)
            .filter(|s| *s == 1 || *s == 2)
            .ok_or_else(|| {
                ValidationError::invalid_choice(
                    "Invalid AFSDB subtype. Use 1 (AFS cell database server) or 2 (DCE/NCA root directory server).",
                )
            })?;
        let host = ctx
            .hostname(host, false)
            .map_err(|_| ValidationError::hostname("Invalid AFSDB server hostname."))?;

        let ttl = ctx.ttl(record)?;
        let priority = zero_priority(record, "AFSDB")?;
        let warnings = vec![
            "AFSDB is deprecated for AFS cell location in favor of SRV records (RFC 5864).".to_string(),
        ];

        finish(format!("{subtype} {host}"), name, priority, ttl, warnings)
    }
}

#[cfg(test)]
#[path = "target_tests.rs"]
mod target_tests;
