// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Serializable reports of validation outcomes.
//!
//! A [`RecordReport`] pairs the submitted record with its result so the command line
//! tool (or any other caller) can emit it as JSON. Each error keeps its category and
//! machine-readable reason next to the message shown to users.

use serde::Serialize;

use crate::record::{RecordInput, ValidatedRecord};
use crate::validation_errors::{ErrorKind, ValidationError};
use crate::validation_result::ValidationResult;

/// One violation in a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorReport {
    pub kind: ErrorKind,
    /// Machine-readable reason, e.g. `RangeError`
    pub reason: &'static str,
    pub message: String,
}

impl From<&ValidationError> for ErrorReport {
    fn from(error: &ValidationError) -> Self {
        Self {
            kind: error.kind(),
            reason: error.status_reason(),
            message: error.message().to_string(),
        }
    }
}

/// The outcome of validating one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordReport {
    #[serde(rename = "type")]
    pub record_type: String,
    /// Owner name as submitted
    pub name: String,
    pub content: String,
    pub valid: bool,
    /// The normalized record to persist, present only when valid
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<ValidatedRecord>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ErrorReport>,
}

impl RecordReport {
    /// Build a report from a submitted record and its result.
    #[must_use]
    pub fn new(input: &RecordInput, result: &ValidationResult<ValidatedRecord>) -> Self {
        Self {
            record_type: input.record_type.clone(),
            name: input.name.clone(),
            content: input.content.clone(),
            valid: result.is_valid(),
            record: result.data().cloned(),
            warnings: result.warnings().to_vec(),
            errors: result.errors().iter().map(ErrorReport::from).collect(),
        }
    }
}

/// Totals over a batch of reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
    pub warnings: usize,
}

impl BatchSummary {
    #[must_use]
    pub fn from_reports(reports: &[RecordReport]) -> Self {
        let valid = reports.iter().filter(|r| r.valid).count();
        Self {
            total: reports.len(),
            valid,
            invalid: reports.len() - valid,
            warnings: reports.iter().map(|r| r.warnings.len()).sum(),
        }
    }

    /// Returns true if every record passed.
    #[must_use]
    pub fn all_valid(&self) -> bool {
        self.invalid == 0
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod report_tests;
