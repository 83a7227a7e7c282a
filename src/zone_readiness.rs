// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Pre-flight checks before a zone is signed with DNSSEC.
//!
//! Signing fails on a zone without exactly one well-formed SOA record at the apex, or
//! without NS records at the apex. [`ZoneReadinessChecker`] reads the zone through the
//! [`RecordStore`] and reports every such problem as a [`ReadinessIssue`]. Delegation NS
//! records below the apex do not count.

use serde::Serialize;
use std::fmt;
use tracing::{info, warn};

use crate::constants::SOA_FIELD_COUNT;
use crate::primitives::hostname::is_zone_apex;
use crate::record_store::RecordStore;
use crate::validation_errors::StoreError;

/// How much an issue blocks signing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    /// Signing cannot even start
    Critical,
    /// Signing would produce a broken zone
    Error,
    /// Worth fixing, does not block signing
    Warning,
}

impl fmt::Display for IssueSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Critical => "CRITICAL",
            Self::Error => "ERROR",
            Self::Warning => "WARNING",
        })
    }
}

/// Machine-readable issue category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    MissingSoa,
    MultipleSoa,
    SoaNotAtApex,
    InvalidSoaContent,
    MissingApexNs,
    StoreUnavailable,
}

/// One problem found in a zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadinessIssue {
    pub kind: IssueKind,
    pub severity: IssueSeverity,
    /// Owner name of the offending record, when there is one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_name: Option<String>,
    pub message: String,
    pub suggestion: String,
}

impl ReadinessIssue {
    fn new(
        kind: IssueKind,
        severity: IssueSeverity,
        message: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            severity,
            record_name: None,
            message: message.into(),
            suggestion: suggestion.into(),
        }
    }

    fn at(mut self, record_name: &str) -> Self {
        self.record_name = Some(record_name.to_string());
        self
    }
}

/// Outcome of a readiness check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneReadinessReport {
    pub zone_name: String,
    pub issues: Vec<ReadinessIssue>,
}

impl ZoneReadinessReport {
    /// Returns true if no issue is critical or an error.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        !self.issues.iter().any(|issue| issue.severity < IssueSeverity::Warning)
    }

    /// Human summary of the issues, blocking ones first.
    ///
    /// Empty when the zone is ready.
    #[must_use]
    pub fn format_messages(&self) -> String {
        if self.is_ready() {
            return String::new();
        }

        let mut blocking: Vec<&ReadinessIssue> = self
            .issues
            .iter()
            .filter(|issue| issue.severity < IssueSeverity::Warning)
            .collect();
        blocking.sort_by_key(|issue| issue.severity);
        let warnings: Vec<&ReadinessIssue> = self
            .issues
            .iter()
            .filter(|issue| issue.severity == IssueSeverity::Warning)
            .collect();

        let mut lines = vec![
            "DNSSEC signing cannot proceed due to the following errors:".to_string(),
            String::new(),
        ];
        push_issues(&mut lines, &blocking);
        if !warnings.is_empty() {
            lines.push("Additionally, the following warnings were found:".to_string());
            lines.push(String::new());
            push_issues(&mut lines, &warnings);
        }
        lines.join("\n").trim_end().to_string()
    }
}

fn push_issues(lines: &mut Vec<String>, issues: &[&ReadinessIssue]) {
    for issue in issues {
        lines.push(format!("[{}] {}", issue.severity, issue.message));
        if !issue.suggestion.is_empty() {
            lines.push(format!("  {}", issue.suggestion));
        }
        lines.push(String::new());
    }
}

/// Runs DNSSEC pre-flight checks against a [`RecordStore`].
pub struct ZoneReadinessChecker<'a> {
    store: &'a dyn RecordStore,
}

impl<'a> ZoneReadinessChecker<'a> {
    #[must_use]
    pub fn new(store: &'a dyn RecordStore) -> Self {
        Self { store }
    }

    /// Check that a zone can be signed.
    ///
    /// A store failure is reported as a critical issue, never as a ready zone.
    #[must_use]
    pub fn check_dnssec_readiness(&self, zone_id: i64, zone_name: &str) -> ZoneReadinessReport {
        let mut issues = self.check_soa(zone_id, zone_name);
        issues.extend(self.check_apex_ns(zone_id, zone_name));

        let report = ZoneReadinessReport {
            zone_name: zone_name.trim_end_matches('.').to_string(),
            issues,
        };
        info!(
            zone = %report.zone_name,
            zone_id,
            ready = report.is_ready(),
            issues = report.issues.len(),
            "DNSSEC readiness checked"
        );
        report
    }

    fn check_soa(&self, zone_id: i64, zone_name: &str) -> Vec<ReadinessIssue> {
        let soa_records = match self.store.find_records_by_zone_and_type(zone_id, "SOA") {
            Ok(records) => records,
            Err(e) => return vec![store_issue(zone_id, &e)],
        };

        let [soa] = soa_records.as_slice() else {
            return vec![if soa_records.is_empty() {
                ReadinessIssue::new(
                    IssueKind::MissingSoa,
                    IssueSeverity::Critical,
                    "No SOA record present, or active, in zone. This is required for DNSSEC.",
                    "Add an SOA record to the zone before attempting to sign it.",
                )
            } else {
                ReadinessIssue::new(
                    IssueKind::MultipleSoa,
                    IssueSeverity::Error,
                    format!(
                        "Zone has {} SOA records. Only one SOA record is allowed per zone.",
                        soa_records.len()
                    ),
                    "Remove duplicate SOA records, keeping only one.",
                )
            }];
        };

        let mut issues = Vec::new();
        if !is_zone_apex(&soa.name, zone_name) {
            issues.push(
                ReadinessIssue::new(
                    IssueKind::SoaNotAtApex,
                    IssueSeverity::Error,
                    format!(
                        "SOA record not at apex. Found at \"{}\" but zone is \"{zone_name}\".",
                        soa.name
                    ),
                    "Move the SOA record to the zone apex.",
                )
                .at(&soa.name),
            );
        }
        if soa.content.split_whitespace().count() < SOA_FIELD_COUNT {
            issues.push(
                ReadinessIssue::new(
                    IssueKind::InvalidSoaContent,
                    IssueSeverity::Error,
                    "SOA record has invalid content format.",
                    "SOA format should be: primary-ns hostmaster serial refresh retry expire minimum",
                )
                .at(&soa.name),
            );
        }
        issues
    }

    fn check_apex_ns(&self, zone_id: i64, zone_name: &str) -> Option<ReadinessIssue> {
        let ns_records = match self.store.find_records_by_zone_and_type(zone_id, "NS") {
            Ok(records) => records,
            Err(e) => return Some(store_issue(zone_id, &e)),
        };

        if ns_records.iter().any(|ns| is_zone_apex(&ns.name, zone_name)) {
            return None;
        }
        Some(ReadinessIssue::new(
            IssueKind::MissingApexNs,
            IssueSeverity::Error,
            "Zone has no NS (Name Server) records at the apex. At least one apex NS record is required for DNSSEC.",
            "Add NS records at the zone apex for your authoritative name servers.",
        ))
    }
}

fn store_issue(zone_id: i64, error: &StoreError) -> ReadinessIssue {
    warn!(zone_id, error = %error, "Record store query failed during readiness check");
    ReadinessIssue::new(
        IssueKind::StoreUnavailable,
        IssueSeverity::Critical,
        format!("Could not read zone records: {error}"),
        "",
    )
}

#[cfg(test)]
#[path = "zone_readiness_tests.rs"]
mod zone_readiness_tests;
