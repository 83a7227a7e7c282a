// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Zone-level conflict checks.
//!
//! A CNAME owns its name exclusively (RFC 1034 section 3.6.2): no other record may share
//! the name, and MX or NS records must not point at it (RFC 2181 section 10.3). These
//! rules cannot be decided from one record alone, so [`ConflictChecker`] queries the
//! [`RecordStore`].
//!
//! A failed store read is never treated as "no conflict". It becomes a referential error
//! so the record is not persisted unverified.

use tracing::warn;

use crate::constants::{CNAME_CONFLICT_TYPES, NON_ALIAS_TARGET_TYPES};
use crate::record_store::RecordStore;
use crate::validation_errors::{StoreError, ValidationError};

/// Cross-record checks backed by a [`RecordStore`].
pub struct ConflictChecker<'a> {
    store: &'a dyn RecordStore,
}

impl<'a> ConflictChecker<'a> {
    /// Create a checker over `store`.
    #[must_use]
    pub fn new(store: &'a dyn RecordStore) -> Self {
        Self { store }
    }

    /// Check that a CNAME may be created at `name`.
    ///
    /// Runs, in order: no record of another type at the name, no other CNAME at the
    /// name, and no MX or NS record pointing at the name.
    ///
    /// # Arguments
    ///
    /// * `name` - Fully-qualified owner name of the CNAME
    /// * `zone_id` - Zone to search, or `None` for every zone
    /// * `record_id` - The record being edited, excluded from the search
    ///
    /// # Errors
    ///
    /// Returns a referential error for the first conflict found or for a failed query.
    pub fn check_cname(
        &self,
        name: &str,
        zone_id: Option<i64>,
        record_id: Option<i64>,
    ) -> Result<(), ValidationError> {
        let existing = self.query(
            name,
            self.store
                .find_records_by_name_and_zone(name, zone_id, record_id),
        )?;

        if existing
            .iter()
            .any(|r| !r.record_type.eq_ignore_ascii_case("CNAME"))
        {
            return Err(ValidationError::referential(
                "This is not a valid CNAME. There already exists a record with this name.",
            ));
        }
        if !existing.is_empty() {
            return Err(ValidationError::referential(
                "Multiple CNAME records with the same name are not allowed.",
            ));
        }

        let pointing = self.query(
            name,
            self.store
                .find_records_by_content_and_type(name, NON_ALIAS_TARGET_TYPES),
        )?;
        if !pointing.is_empty() {
            return Err(ValidationError::referential(
                "This is not a valid CNAME. Did you assign an MX or NS record to the record?",
            ));
        }

        Ok(())
    }

    /// Check that no CNAME already exists at `name`.
    ///
    /// # Errors
    ///
    /// Returns a referential error if a CNAME is found or the query fails.
    pub fn check_existing_cname(
        &self,
        name: &str,
        zone_id: Option<i64>,
        record_id: Option<i64>,
    ) -> Result<(), ValidationError> {
        if self.has_cname(name, zone_id, record_id)? {
            return Err(ValidationError::referential(
                "This is not a valid record. There already exists a CNAME with this name.",
            ));
        }
        Ok(())
    }

    /// Check that an NS or MX target is not the name of a CNAME.
    ///
    /// # Errors
    ///
    /// Returns a referential error if the target is an alias or the query fails.
    pub fn check_non_alias_target(&self, target: &str) -> Result<(), ValidationError> {
        if self.has_cname(target, None, None)? {
            return Err(ValidationError::referential(
                "You can not point a NS or MX record to a CNAME record. Remove or rename the CNAME record first, or take another name.",
            ));
        }
        Ok(())
    }

    /// Check type-specific CNAME coexistence rules within one zone.
    ///
    /// For a CNAME: no other CNAME and no record of another type at the name. For A,
    /// AAAA, TXT, MX, NS and PTR: no CNAME at the name. Other types pass.
    ///
    /// # Errors
    ///
    /// Returns a referential error naming the conflicting type, or for a failed query.
    pub fn check_violations(
        &self,
        record_type: &str,
        name: &str,
        zone_id: i64,
        record_id: Option<i64>,
    ) -> Result<(), ValidationError> {
        if record_type.eq_ignore_ascii_case("CNAME") {
            let existing = self.query(
                name,
                self.store
                    .find_records_by_name_and_zone(name, Some(zone_id), record_id),
            )?;
            if existing
                .iter()
                .any(|r| r.record_type.eq_ignore_ascii_case("CNAME"))
            {
                return Err(ValidationError::referential(
                    "Multiple CNAME records with the same name are not allowed. This would create a DNS violation.",
                ));
            }
            if let Some(other) = existing.first() {
                return Err(ValidationError::referential(format!(
                    "A CNAME record cannot coexist with other record types for the same name. Found existing {} record.",
                    other.record_type
                )));
            }
            return Ok(());
        }

        let checked = CNAME_CONFLICT_TYPES
            .iter()
            .any(|t| t.eq_ignore_ascii_case(record_type));
        if checked && self.has_cname(name, Some(zone_id), record_id)? {
            return Err(ValidationError::referential(
                "This record conflicts with an existing CNAME record with the same name. A CNAME record cannot coexist with other record types.",
            ));
        }
        Ok(())
    }

    fn has_cname(
        &self,
        name: &str,
        zone_id: Option<i64>,
        record_id: Option<i64>,
    ) -> Result<bool, ValidationError> {
        let existing = self.query(
            name,
            self.store
                .find_records_by_name_and_zone(name, zone_id, record_id),
        )?;
        Ok(existing
            .iter()
            .any(|r| r.record_type.eq_ignore_ascii_case("CNAME")))
    }

    fn query<T>(&self, name: &str, result: Result<T, StoreError>) -> Result<T, ValidationError> {
        result.map_err(|err| {
            warn!(name = %name, error = %err, "Record store query failed during conflict check");
            ValidationError::from(err)
        })
    }
}

#[cfg(test)]
#[path = "conflicts_tests.rs"]
mod conflicts_tests;
