// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! CNAME record validation.
//!
//! A CNAME is the only validator that reads the zone: with a record store attached it
//! refuses names already used by other records, duplicate aliases, and names that MX or
//! NS records point at. A CNAME at the zone apex is refused whenever the zone is known.

use tracing::debug;

use crate::conflicts::ConflictChecker;
use crate::primitives::hostname::is_zone_apex;
use crate::record::RecordInput;
use crate::records::{finish, zero_priority, RecordOutcome, RecordValidator, ValidationContext};
use crate::validation_errors::ValidationError;

/// Validator for CNAME records.
#[derive(Debug, Default, Clone, Copy)]
pub struct CnameValidator;

impl RecordValidator for CnameValidator {
    fn check(&self, record: &RecordInput, ctx: &ValidationContext<'_>) -> RecordOutcome {
        if let Some(store) = ctx.store {
            debug!(name = %record.name, "Checking CNAME exclusivity");
            ConflictChecker::new(store).check_cname(
                &record.name,
                record.zone_id,
                record.existing_record_id(),
            )?;
        }

        let name = ctx.hostname(&record.name, true)?;
        let target = ctx.hostname(record.content.trim(), false)?;

        if let Some(zone) = record.zone.as_deref().filter(|zone| !zone.is_empty()) {
            if is_zone_apex(&name, zone) {
                return Err(ValidationError::referential("Empty CNAME records are not allowed.").into());
            }
        }

        let ttl = ctx.ttl(record)?;
        let priority = zero_priority(record, "CNAME")?;

        finish(target, name, priority, ttl, Vec::new())
    }
}

#[cfg(test)]
#[path = "cname_tests.rs"]
mod cname_tests;
