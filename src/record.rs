// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Record input and output types.
//!
//! [`RecordInput`] is the unvalidated tuple a caller submits, exactly as typed into a
//! form: priority and TTL are raw text so that "abc" or "-1" can be reported instead of
//! being lost in a failed integer conversion. [`ValidatedRecord`] is the normalized
//! tuple the caller persists verbatim.

use serde::{Deserialize, Deserializer, Serialize};

/// An unvalidated record submitted for validation.
///
/// # Example
///
/// ```
/// use zone_validator::record::RecordInput;
///
/// let input = RecordInput::new("MX", "example.com", "mail.example.com")
///     .with_priority(10)
///     .with_ttl(3600)
///     .in_zone("example.com", 1);
/// assert_eq!(input.priority.as_deref(), Some("10"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RecordInput {
    /// Record type mnemonic, e.g. `"AAAA"`
    #[serde(rename = "type")]
    pub record_type: String,
    /// Free-text right-hand side of the record
    pub content: String,
    /// Owner name, relative to the zone or absolute
    pub name: String,
    /// Raw priority field, absent or blank when not supplied
    #[serde(deserialize_with = "deserialize_raw_field")]
    pub priority: Option<String>,
    /// Raw TTL field, absent or blank when not supplied
    #[serde(deserialize_with = "deserialize_raw_field")]
    pub ttl: Option<String>,
    /// TTL to apply when `ttl` is blank; falls back to the configured default
    pub default_ttl: Option<i32>,
    /// Name of the zone the record belongs to
    pub zone: Option<String>,
    /// Identifier of the zone in the record store
    pub zone_id: Option<i64>,
    /// Identifier of the record being edited; absent or 0 for a new record
    pub record_id: Option<i64>,
}

impl RecordInput {
    /// Create an input with the three mandatory fields.
    pub fn new(
        record_type: impl Into<String>,
        name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            record_type: record_type.into(),
            name: name.into(),
            content: content.into(),
            ..Self::default()
        }
    }

    /// Set the raw priority field.
    #[must_use]
    pub fn with_priority(mut self, priority: impl ToString) -> Self {
        self.priority = Some(priority.to_string());
        self
    }

    /// Set the raw TTL field.
    #[must_use]
    pub fn with_ttl(mut self, ttl: impl ToString) -> Self {
        self.ttl = Some(ttl.to_string());
        self
    }

    /// Set the TTL used when the TTL field is blank.
    #[must_use]
    pub fn with_default_ttl(mut self, default_ttl: i32) -> Self {
        self.default_ttl = Some(default_ttl);
        self
    }

    /// Attach the record to a zone.
    #[must_use]
    pub fn in_zone(mut self, zone: impl Into<String>, zone_id: i64) -> Self {
        self.zone = Some(zone.into());
        self.zone_id = Some(zone_id);
        self
    }

    /// Attach the zone name only, for checks that need no record store.
    #[must_use]
    pub fn with_zone_name(mut self, zone: impl Into<String>) -> Self {
        self.zone = Some(zone.into());
        self
    }

    /// Mark the input as an edit of an existing record.
    #[must_use]
    pub fn with_record_id(mut self, record_id: i64) -> Self {
        self.record_id = Some(record_id);
        self
    }

    /// The raw priority with surrounding whitespace removed, `None` when blank.
    #[must_use]
    pub fn priority_field(&self) -> Option<&str> {
        self.priority
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }

    /// The raw TTL field.
    #[must_use]
    pub fn ttl_field(&self) -> Option<&str> {
        self.ttl.as_deref()
    }

    /// The record identifier to exclude from uniqueness queries.
    #[must_use]
    pub fn existing_record_id(&self) -> Option<i64> {
        self.record_id.filter(|id| *id > 0)
    }
}

/// A record that passed validation, normalized for persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedRecord {
    /// Content, possibly re-normalized or re-quoted
    pub content: String,
    /// Owner name, possibly re-qualified
    pub name: String,
    /// Priority or preference, 0 for types without one
    pub priority: u16,
    /// TTL in seconds
    pub ttl: i32,
}

/// Accept a number or a string for raw form fields.
fn deserialize_raw_field<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawField {
        Integer(i64),
        Float(f64),
        Text(String),
    }

    Ok(
        Option::<RawField>::deserialize(deserializer)?.map(|field| match field {
            RawField::Integer(value) => value.to_string(),
            RawField::Float(value) => value.to_string(),
            RawField::Text(value) => value,
        }),
    )
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod record_tests;
