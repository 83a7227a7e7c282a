// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Tests for DNSSEC zone readiness checks.

#[cfg(test)]
mod tests {
    use crate::record_store::{InMemoryRecordStore, RecordRef, RecordStore, StoredRecord};
    use crate::validation_errors::StoreError;
    use crate::zone_readiness::*;

    const SOA: &str = "ns1.example.com hostmaster.example.com 2024010101 10800 3600 604800 3600";

    fn zone(records: &[(&str, &str, &str)]) -> InMemoryRecordStore {
        let store = InMemoryRecordStore::new();
        for (name, record_type, content) in records {
            store.insert(1, name, record_type, content).unwrap();
        }
        store
    }

    fn kinds(report: &ZoneReadinessReport) -> Vec<IssueKind> {
        report.issues.iter().map(|issue| issue.kind).collect()
    }

    struct BrokenStore;

    impl RecordStore for BrokenStore {
        fn find_records_by_name_and_zone(
            &self,
            _name: &str,
            _zone_id: Option<i64>,
            _exclude_record_id: Option<i64>,
        ) -> Result<Vec<RecordRef>, StoreError> {
            Ok(Vec::new())
        }

        fn find_records_by_content_and_type(
            &self,
            _content: &str,
            _types: &[&str],
        ) -> Result<Vec<i64>, StoreError> {
            Ok(Vec::new())
        }

        fn find_records_by_zone_and_type(
            &self,
            _zone_id: i64,
            record_type: &str,
        ) -> Result<Vec<StoredRecord>, StoreError> {
            Err(StoreError::QueryFailed {
                query: format!("zone records of type {record_type}"),
                reason: "timeout".to_string(),
            })
        }
    }

    #[test]
    fn test_complete_zone_is_ready() {
        let store = zone(&[
            ("example.com", "SOA", SOA),
            ("example.com.", "NS", "ns1.example.com"),
            ("www.example.com", "A", "192.0.2.1"),
        ]);
        let report = ZoneReadinessChecker::new(&store).check_dnssec_readiness(1, "example.com.");

        assert!(report.is_ready());
        assert!(report.issues.is_empty());
        assert_eq!(report.zone_name, "example.com");
        assert_eq!(report.format_messages(), "");
    }

    #[test]
    fn test_missing_soa_is_critical() {
        let store = zone(&[("example.com", "NS", "ns1.example.com")]);
        let report = ZoneReadinessChecker::new(&store).check_dnssec_readiness(1, "example.com");

        assert!(!report.is_ready());
        assert_eq!(kinds(&report), vec![IssueKind::MissingSoa]);
        assert_eq!(report.issues[0].severity, IssueSeverity::Critical);
    }

    #[test]
    fn test_multiple_soa_records() {
        let store = zone(&[
            ("example.com", "SOA", SOA),
            ("example.com", "SOA", SOA),
            ("example.com", "NS", "ns1.example.com"),
        ]);
        let report = ZoneReadinessChecker::new(&store).check_dnssec_readiness(1, "example.com");

        assert_eq!(kinds(&report), vec![IssueKind::MultipleSoa]);
        assert!(report.issues[0].message.contains("Zone has 2 SOA records"));
    }

    #[test]
    fn test_soa_off_apex_with_short_content() {
        let store = zone(&[
            ("sub.example.com", "SOA", "ns1.example.com hostmaster.example.com 1"),
            ("example.com", "NS", "ns1.example.com"),
        ]);
        let report = ZoneReadinessChecker::new(&store).check_dnssec_readiness(1, "example.com");

        assert_eq!(
            kinds(&report),
            vec![IssueKind::SoaNotAtApex, IssueKind::InvalidSoaContent]
        );
        assert_eq!(report.issues[0].record_name.as_deref(), Some("sub.example.com"));
    }

    #[test]
    fn test_delegation_ns_does_not_count() {
        let store = zone(&[
            ("example.com", "SOA", SOA),
            ("child.example.com", "NS", "ns1.child.example.com"),
        ]);
        let report = ZoneReadinessChecker::new(&store).check_dnssec_readiness(1, "example.com");

        assert_eq!(kinds(&report), vec![IssueKind::MissingApexNs]);
        assert!(!report.is_ready());
    }

    #[test]
    fn test_other_zone_records_are_ignored() {
        let store = zone(&[]);
        store.insert(2, "example.com", "SOA", SOA).unwrap();
        store.insert(2, "example.com", "NS", "ns1.example.com").unwrap();
        let report = ZoneReadinessChecker::new(&store).check_dnssec_readiness(1, "example.com");

        assert_eq!(
            kinds(&report),
            vec![IssueKind::MissingSoa, IssueKind::MissingApexNs]
        );
    }

    #[test]
    fn test_store_failure_is_not_ready() {
        let report = ZoneReadinessChecker::new(&BrokenStore).check_dnssec_readiness(1, "example.com");

        assert!(!report.is_ready());
        assert_eq!(
            kinds(&report),
            vec![IssueKind::StoreUnavailable, IssueKind::StoreUnavailable]
        );
        assert!(report.issues[0].message.contains("timeout"));
    }

    #[test]
    fn test_format_messages_orders_critical_first() {
        let report = ZoneReadinessReport {
            zone_name: "example.com".to_string(),
            issues: vec![
                ReadinessIssue {
                    kind: IssueKind::MissingApexNs,
                    severity: IssueSeverity::Error,
                    record_name: None,
                    message: "no ns".to_string(),
                    suggestion: "add ns".to_string(),
                },
                ReadinessIssue {
                    kind: IssueKind::MissingSoa,
                    severity: IssueSeverity::Critical,
                    record_name: None,
                    message: "no soa".to_string(),
                    suggestion: String::new(),
                },
            ],
        };

        let text = report.format_messages();
        assert!(text.starts_with("DNSSEC signing cannot proceed"));
        let critical = text.find("[CRITICAL] no soa").unwrap();
        let error = text.find("[ERROR] no ns").unwrap();
        assert!(critical < error);
        assert!(text.contains("  add ns"));
    }

    #[test]
    fn test_report_serializes_camel_case() {
        let store = zone(&[]);
        let report = ZoneReadinessChecker::new(&store).check_dnssec_readiness(1, "example.com");
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["zoneName"], "example.com");
        assert_eq!(json["issues"][0]["kind"], "missing_soa");
        assert_eq!(json["issues"][0]["severity"], "critical");
    }
}
