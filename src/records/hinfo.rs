// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! HINFO record validation (RFC 1035, RFC 8482).
//!
//! Content is two character-strings, CPU and OS. Each may be quoted, which allows
//! embedded spaces, or a bare word.

use crate::constants::MAX_TXT_SEGMENT_LENGTH;
use crate::primitives::text::check_printable;
use crate::record::RecordInput;
use crate::records::{finish, zero_priority, RecordOutcome, RecordValidator, ValidationContext};
use crate::validation_errors::ValidationError;

/// Split HINFO content into its fields, quotes removed.
///
/// # Errors
///
/// Returns an error for an unterminated quote, a field count other than two, or an
/// empty field.
pub fn split_hinfo_fields(content: &str) -> Result<Vec<String>, ValidationError> {
    let mut fields = Vec::new();
    let mut chars = content.trim().chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }
        let mut field = String::new();
        if c == '"' {
            chars.next();
            let mut closed = false;
            while let Some(c) = chars.next() {
                match c {
                    '\\' => field.extend(chars.next()),
                    '"' => {
                        closed = true;
                        break;
                    }
                    other => field.push(other),
                }
            }
            if !closed {
                return Err(ValidationError::structural(
                    "HINFO record has an unterminated quoted string.",
                ));
            }
        } else {
            while let Some(&c) = chars.peek() {
                if c.is_whitespace() {
                    break;
                }
                field.push(c);
                chars.next();
            }
        }
        fields.push(field);
    }

    if fields.len() != 2 {
        return Err(ValidationError::structural(
            "HINFO record must have exactly two fields: CPU and OS.",
        ));
    }
    if fields.iter().any(|f| f.trim().is_empty()) {
        return Err(ValidationError::structural(
            "HINFO CPU and OS fields must not be empty.",
        ));
    }
    if fields.iter().any(|f| f.len() > MAX_TXT_SEGMENT_LENGTH) {
        return Err(ValidationError::range(format!(
            "HINFO fields may hold at most {MAX_TXT_SEGMENT_LENGTH} characters."
        )));
    }
    Ok(fields)
}

/// Returns true if `content` is a valid HINFO body.
#[must_use]
pub fn is_valid_rr_hinfo_content(content: &str) -> bool {
    split_hinfo_fields(content).is_ok()
}

/// Validator for HINFO records.
#[derive(Debug, Default, Clone, Copy)]
pub struct HinfoValidator;

impl RecordValidator for HinfoValidator {
    fn check(&self, record: &RecordInput, ctx: &ValidationContext<'_>) -> RecordOutcome {
        let name = ctx.hostname(&record.name, true)?;
        check_printable(&record.content)?;
        let fields = split_hinfo_fields(&record.content)?;

        let mut warnings = Vec::new();
        if fields[0].eq_ignore_ascii_case("RFC8482") {
            warnings.push("HINFO \"RFC8482\" is the synthesized answer to ANY queries and is not normally stored in a zone.".to_string());
        } else {
            warnings.push("HINFO discloses host details that can help attackers. Publish it only when needed.".to_string());
        }

        let ttl = ctx.ttl(record)?;
        let priority = zero_priority(record, "HINFO")?;

        finish(record.content.trim().to_string(), name, priority, ttl, warnings)
    }
}

#[cfg(test)]
#[path = "hinfo_tests.rs"]
mod hinfo_tests;
