// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

// Common test utilities for integration tests

#![allow(dead_code)]

use std::sync::Arc;
use zone_validator::config::ValidatorConfig;
use zone_validator::record::{RecordInput, ValidatedRecord};
use zone_validator::record_store::InMemoryRecordStore;
use zone_validator::registry::Registry;
use zone_validator::validation_result::ValidationResult;

/// Zone used by every scenario
pub const ZONE: &str = "example.com";

/// Identifier of [`ZONE`] in the test store
pub const ZONE_ID: i64 = 1;

/// A registry without a record store
pub fn registry() -> Registry {
    Registry::new(ValidatorConfig::default())
}

/// A registry over a zone holding `records` as `(name, type, content)`
pub fn registry_with_zone(records: &[(&str, &str, &str)]) -> Registry {
    let store = InMemoryRecordStore::new();
    for (name, record_type, content) in records {
        store
            .insert(ZONE_ID, name, record_type, content)
            .expect("insert into in-memory store");
    }
    Registry::with_store(ValidatorConfig::default(), Arc::new(store))
}

/// A record submitted to [`ZONE`]
pub fn in_zone(record_type: &str, name: &str, content: &str) -> RecordInput {
    RecordInput::new(record_type, name, content).in_zone(ZONE, ZONE_ID)
}

/// The first error message of a result, or an empty string
pub fn first_error(result: &ValidationResult<ValidatedRecord>) -> String {
    result
        .first_error()
        .map(ToString::to_string)
        .unwrap_or_default()
}
