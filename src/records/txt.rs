// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! TXT record validation and the quoting rules shared with SPF and DMARC.
//!
//! Content is one or more quoted character-strings. A record named `_dmarc.<domain>` is a
//! DMARC policy and is additionally checked against the DMARC grammar.

use crate::primitives::text::{check_printable, has_html_tags, has_quotes_around, split_character_strings};
use crate::record::RecordInput;
use crate::records::dmarc::{is_dmarc_name, DmarcPolicy};
use crate::records::{finish, zero_priority, RecordOutcome, RecordValidator, ValidationContext};
use crate::validation_errors::ValidationError;

/// Apply the TXT quoting rules and return the raw character-strings.
///
/// Checks, in order: printable ASCII, no HTML tags, surrounding quotes, escaped
/// embedded quotes and segment length.
///
/// # Arguments
///
/// * `content` - The record content
/// * `type_name` - Record type used in the quoting message
///
/// # Errors
///
/// Returns the first rule the content breaks.
pub fn parse_quoted(content: &str, type_name: &str) -> Result<Vec<String>, ValidationError> {
    let content = content.trim();
    check_printable(content)?;
    if has_html_tags(content) {
        return Err(ValidationError::structural(
            "You cannot use HTML tags for this type of record.",
        ));
    }
    if !has_quotes_around(content) {
        return Err(ValidationError::structural(format!(
            "Add quotes around {type_name} record content."
        )));
    }
    split_character_strings(content)
}

/// Concatenate character-strings into the text they carry, resolving escapes.
#[must_use]
pub fn join_segments(segments: &[String]) -> String {
    let mut text = String::new();
    for segment in segments {
        let mut chars = segment.chars();
        while let Some(c) = chars.next() {
            if c == '\\' {
                text.push(chars.next().unwrap_or(c));
            } else {
                text.push(c);
            }
        }
    }
    text
}

/// Validator for TXT records.
#[derive(Debug, Default, Clone, Copy)]
pub struct TxtValidator;

impl RecordValidator for TxtValidator {
    fn check(&self, record: &RecordInput, ctx: &ValidationContext<'_>) -> RecordOutcome {
        let name = ctx.hostname(&record.name, true)?;
        let segments = parse_quoted(&record.content, "TXT")?;

        let mut warnings = Vec::new();
        if is_dmarc_name(&name) {
            let policy = DmarcPolicy::parse(&join_segments(&segments))?;
            warnings.extend(policy.advisories());
        }

        let ttl = ctx.ttl(record)?;
        let priority = zero_priority(record, "TXT")?;

        finish(record.content.trim().to_string(), name, priority, ttl, warnings)
    }
}

#[cfg(test)]
#[path = "txt_tests.rs"]
mod txt_tests;
