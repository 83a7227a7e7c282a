// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! RP record validation (RFC 1183).
//!
//! Content is `mbox-dname txt-dname`. Each is a fully-qualified name ending in a dot, or
//! `.` when absent.

use crate::constants::MAX_LABEL_LENGTH;
use crate::primitives::text::check_printable;
use crate::record::RecordInput;
use crate::records::{
    exact_fields, finish, zero_priority, RecordOutcome, RecordValidator, ValidationContext,
};
use crate::validation_errors::ValidationError;

/// Returns true for an LDH label that does not start or end with a hyphen.
fn is_ldh_label(label: &str) -> bool {
    !label.is_empty()
        && label.len() <= MAX_LABEL_LENGTH
        && label.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
        && !label.starts_with('-')
        && !label.ends_with('-')
}

/// Check one RP domain field. `what` names it in messages.
fn check_rp_domain(domain: &str, what: &str) -> Result<(), ValidationError> {
    if domain == "." {
        return Ok(());
    }
    let Some(body) = domain.strip_suffix('.') else {
        return Err(ValidationError::hostname(format!(
            "RP {what} must be a fully qualified domain name (end with a dot)."
        )));
    };
    if !body.split('.').all(is_ldh_label) {
        return Err(ValidationError::hostname(format!(
            "RP {what} contains invalid characters."
        )));
    }
    Ok(())
}

/// Validator for RP records.
#[derive(Debug, Default, Clone, Copy)]
pub struct RpValidator;

impl RecordValidator for RpValidator {
    fn check(&self, record: &RecordInput, ctx: &ValidationContext<'_>) -> RecordOutcome {
        let name = ctx.hostname(&record.name, true)?;
        if record.content.trim().is_empty() {
            return Err(ValidationError::structural("RP record content cannot be empty.").into());
        }
        check_printable(&record.content)?;
        let [mailbox, txt] = exact_fields::<2>(
            &record.content,
            "RP record must contain mailbox-domain and txt-record-domain.",
        )?;
        check_rp_domain(mailbox, "mailbox domain")?;
        check_rp_domain(txt, "TXT domain")?;

        let mut warnings = Vec::new();
        if mailbox == "." && txt == "." {
            warnings.push("RP record names neither a responsible mailbox nor a TXT record.".to_string());
        }

        let ttl = ctx.ttl(record)?;
        let priority = zero_priority(record, "RP")?;

        finish(format!("{mailbox} {txt}"), name, priority, ttl, warnings)
    }
}

#[cfg(test)]
#[path = "rp_tests.rs"]
mod rp_tests;
