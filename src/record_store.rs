// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! The record store collaborator.
//!
//! The validation engine never owns persisted records. Checks that depend on what a
//! zone already contains (CNAME exclusivity, NS/MX targets, DNSSEC readiness) go
//! through the narrow, read-only [`RecordStore`] trait. Implementations must be safe for
//! concurrent reads; the engine issues no writes.
//!
//! [`InMemoryRecordStore`] is a thread-safe implementation used by the command line tool
//! and by tests.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::RwLock;
use tracing::debug;

use crate::validation_errors::StoreError;

/// Identifier and type of a stored record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordRef {
    /// Record identifier
    pub id: i64,
    /// Record type mnemonic
    #[serde(rename = "type")]
    pub record_type: String,
}

/// A full stored record row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredRecord {
    /// Record identifier
    pub id: i64,
    /// Zone identifier
    pub zone_id: i64,
    /// Fully-qualified owner name
    pub name: String,
    /// Record type mnemonic
    #[serde(rename = "type")]
    pub record_type: String,
    /// Record content
    pub content: String,
}

/// Read-only queries the engine issues against persisted records.
pub trait RecordStore: Send + Sync {
    /// Records at `name`, optionally limited to a zone, excluding the record being edited.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the query cannot be answered.
    fn find_records_by_name_and_zone(
        &self,
        name: &str,
        zone_id: Option<i64>,
        exclude_record_id: Option<i64>,
    ) -> Result<Vec<RecordRef>, StoreError>;

    /// Identifiers of records whose content is `content` and whose type is one of `types`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the query cannot be answered.
    fn find_records_by_content_and_type(
        &self,
        content: &str,
        types: &[&str],
    ) -> Result<Vec<i64>, StoreError>;

    /// All records of `record_type` in a zone.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the query cannot be answered.
    fn find_records_by_zone_and_type(
        &self,
        zone_id: i64,
        record_type: &str,
    ) -> Result<Vec<StoredRecord>, StoreError>;
}

/// Compare DNS names case-insensitively, ignoring a trailing dot.
fn same_name(a: &str, b: &str) -> bool {
    a.strip_suffix('.')
        .unwrap_or(a)
        .eq_ignore_ascii_case(b.strip_suffix('.').unwrap_or(b))
}

/// A [`RecordStore`] backed by a vector behind a read-write lock.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    records: RwLock<Vec<StoredRecord>>,
}

impl InMemoryRecordStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `records`.
    #[must_use]
    pub fn from_records(records: Vec<StoredRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    /// Load records from a YAML or JSON file holding a list of [`StoredRecord`].
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read record file {}", path.display()))?;
        let records: Vec<StoredRecord> = if path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
        {
            serde_json::from_str(&raw)
                .with_context(|| format!("Failed to parse JSON records {}", path.display()))?
        } else {
            serde_yaml::from_str(&raw)
                .with_context(|| format!("Failed to parse YAML records {}", path.display()))?
        };
        debug!(path = %path.display(), count = records.len(), "Loaded stored records");
        Ok(Self::from_records(records))
    }

    /// Add a record and return its identifier.
    ///
    /// The identifier is one more than the largest identifier present.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the lock is poisoned.
    pub fn insert(
        &self,
        zone_id: i64,
        name: &str,
        record_type: &str,
        content: &str,
    ) -> Result<i64, StoreError> {
        let mut records = self.records.write().map_err(|_| StoreError::Unavailable {
            reason: "record lock poisoned".to_string(),
        })?;
        let id = records.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        records.push(StoredRecord {
            id,
            zone_id,
            name: name.to_string(),
            record_type: record_type.to_ascii_uppercase(),
            content: content.to_string(),
        });
        Ok(id)
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.read().map(|records| records.len()).unwrap_or(0)
    }

    /// Returns true if the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(
        &self,
        query: &str,
    ) -> Result<std::sync::RwLockReadGuard<'_, Vec<StoredRecord>>, StoreError> {
        self.records.read().map_err(|_| StoreError::QueryFailed {
            query: query.to_string(),
            reason: "record lock poisoned".to_string(),
        })
    }
}

impl RecordStore for InMemoryRecordStore {
    fn find_records_by_name_and_zone(
        &self,
        name: &str,
        zone_id: Option<i64>,
        exclude_record_id: Option<i64>,
    ) -> Result<Vec<RecordRef>, StoreError> {
        let records = self.read("find_records_by_name_and_zone")?;
        Ok(records
            .iter()
            .filter(|r| same_name(&r.name, name))
            .filter(|r| zone_id.is_none_or(|zone| r.zone_id == zone))
            .filter(|r| exclude_record_id != Some(r.id))
            .map(|r| RecordRef {
                id: r.id,
                record_type: r.record_type.clone(),
            })
            .collect())
    }

    fn find_records_by_content_and_type(
        &self,
        content: &str,
        types: &[&str],
    ) -> Result<Vec<i64>, StoreError> {
        let records = self.read("find_records_by_content_and_type")?;
        Ok(records
            .iter()
            .filter(|r| same_name(&r.content, content))
            .filter(|r| types.iter().any(|t| t.eq_ignore_ascii_case(&r.record_type)))
            .map(|r| r.id)
            .collect())
    }

    fn find_records_by_zone_and_type(
        &self,
        zone_id: i64,
        record_type: &str,
    ) -> Result<Vec<StoredRecord>, StoreError> {
        let records = self.read("find_records_by_zone_and_type")?;
        Ok(records
            .iter()
            .filter(|r| r.zone_id == zone_id && r.record_type.eq_ignore_ascii_case(record_type))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
#[path = "record_store_tests.rs"]
mod record_store_tests;
