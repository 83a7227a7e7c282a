// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Helpers shared by the record validator tests.

use crate::config::ValidatorConfig;
use crate::primitives::hostname::HostnameValidator;
use crate::record::{RecordInput, ValidatedRecord};
use crate::record_store::RecordStore;
use crate::records::{RecordValidator, ValidationContext};
use crate::validation_result::ValidationResult;

/// Run a validator with the default configuration and no store.
pub(crate) fn run(
    validator: &dyn RecordValidator,
    record: &RecordInput,
) -> ValidationResult<ValidatedRecord> {
    run_with(&ValidatorConfig::default(), validator, record)
}

/// Run a validator with a custom configuration.
pub(crate) fn run_with(
    config: &ValidatorConfig,
    validator: &dyn RecordValidator,
    record: &RecordInput,
) -> ValidationResult<ValidatedRecord> {
    let hostnames = HostnameValidator::new(&config.hostname);
    let ctx = ValidationContext::new(config, &hostnames);
    validator.validate(record, &ctx)
}

/// Run a validator against a record store.
pub(crate) fn run_with_store(
    store: &dyn RecordStore,
    validator: &dyn RecordValidator,
    record: &RecordInput,
) -> ValidationResult<ValidatedRecord> {
    let config = ValidatorConfig::default();
    let hostnames = HostnameValidator::new(&config.hostname);
    let ctx = ValidationContext::new(&config, &hostnames).with_store(store);
    validator.validate(record, &ctx)
}

/// Returns true if any warning contains `needle`.
pub(crate) fn has_warning(result: &ValidationResult<ValidatedRecord>, needle: &str) -> bool {
    result.warnings().iter().any(|w| w.contains(needle))
}

/// The first error message, or an empty string for a valid result.
pub(crate) fn first_error(result: &ValidationResult<ValidatedRecord>) -> String {
    result
        .first_error()
        .map(ToString::to_string)
        .unwrap_or_default()
}
