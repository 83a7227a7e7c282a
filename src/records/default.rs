// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Fallback validator for record types without a dedicated grammar.

use crate::primitives::text::check_printable;
use crate::record::RecordInput;
use crate::records::{finish, zero_priority, RecordOutcome, RecordValidator, ValidationContext};
use crate::validation_errors::ValidationError;

/// Accepts any non-empty printable content and checks only the owner name and TTL.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultValidator;

impl RecordValidator for DefaultValidator {
    fn check(&self, record: &RecordInput, ctx: &ValidationContext<'_>) -> RecordOutcome {
        let name = ctx.hostname(&record.name, true)?;
        let content = record.content.trim();
        if content.is_empty() {
            return Err(ValidationError::structural("Record content cannot be empty.").into());
        }
        check_printable(content)?;

        let ttl = ctx.ttl(record)?;
        let priority = zero_priority(record, &record.record_type.to_ascii_uppercase())?;

        finish(content.to_string(), name, priority, ttl, Vec::new())
    }
}

#[cfg(test)]
#[path = "default_tests.rs"]
mod default_tests;
