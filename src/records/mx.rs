// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! MX and KX record validation.
//!
//! Both carry a preference in the priority field (default 10) and a host name as content.
//! MX additionally supports the RFC 7505 null MX (`.` with preference 0), which states
//! that a domain accepts no mail.

use crate::constants::DEFAULT_MX_PRIORITY;
use crate::record::RecordInput;
use crate::records::{finish, preference, RecordOutcome, RecordValidator, ValidationContext};
use crate::validation_errors::ValidationError;

/// MX preferences above this value are unusual.
const HIGH_MX_PRIORITY: u16 = 100;

/// Validator for MX records.
#[derive(Debug, Default, Clone, Copy)]
pub struct MxValidator;

impl RecordValidator for MxValidator {
    fn check(&self, record: &RecordInput, ctx: &ValidationContext<'_>) -> RecordOutcome {
        let name = ctx.hostname(&record.name, true)?;
        let content = record.content.trim();

        if content == "." {
            let ttl = ctx.ttl(record)?;
            let priority = preference(record, 0, "Invalid value for MX priority field.")?;
            if priority != 0 {
                return Err(ValidationError::cross_field(
                    "Null MX records (RFC 7505) must use priority 0.",
                )
                .into());
            }
            return finish(".".to_string(), name, 0, ttl, null_mx_advisories());
        }

        let target = ctx
            .hostname(content, false)
            .map_err(|_| ValidationError::hostname("Invalid mail server hostname."))?;
        let ttl = ctx.ttl(record)?;
        let priority = preference(
            record,
            DEFAULT_MX_PRIORITY,
            "Invalid value for MX priority field. It should be an integer between 0 and 65535.",
        )?;

        finish(target, name, priority, ttl, mx_advisories(priority))
    }
}

fn null_mx_advisories() -> Vec<String> {
    vec![
        "Null MX record (RFC 7505): this domain explicitly accepts no email.".to_string(),
        "A null MX record must be the only MX record of the domain (RFC 7505 section 3).".to_string(),
    ]
}

fn mx_advisories(priority: u16) -> Vec<String> {
    let mut warnings = vec![
        "The MX target must not be a CNAME and should have A or AAAA records (RFC 2181 section 10.3).".to_string(),
    ];
    if priority > HIGH_MX_PRIORITY {
        warnings.push(format!(
            "Priority values above {HIGH_MX_PRIORITY} are unusual for MX records. Lower values are tried first."
        ));
    }
    warnings
}

/// Validator for KX records (RFC 2230).
#[derive(Debug, Default, Clone, Copy)]
pub struct KxValidator;

impl RecordValidator for KxValidator {
    fn check(&self, record: &RecordInput, ctx: &ValidationContext<'_>) -> RecordOutcome {
        let name = ctx.hostname(&record.name, true)?;
        let target = ctx
            .hostname(record.content.trim(), false)
            .map_err(|_| ValidationError::hostname("Invalid key exchanger hostname."))?;
        let ttl = ctx.ttl(record)?;
        let priority = preference(
            record,
            DEFAULT_MX_PRIORITY,
            "Invalid value for preference field of KX record. It should be an integer between 0 and 65535.",
        )?;

        let warnings = vec![
            "KX records must be protected with DNSSEC, otherwise the key exchanger can be spoofed (RFC 2230 section 4).".to_string(),
            "The key exchanger host needs A/AAAA records; resolvers add them in the additional section (RFC 2230).".to_string(),
        ];

        finish(target, name, priority, ttl, warnings)
    }
}

#[cfg(test)]
#[path = "mx_tests.rs"]
mod mx_tests;
