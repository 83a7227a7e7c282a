// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Tests for validation reports.

#[cfg(test)]
mod tests {
    use crate::config::ValidatorConfig;
    use crate::record::RecordInput;
    use crate::registry::Registry;
    use crate::report::*;

    fn report(input: &RecordInput) -> RecordReport {
        let registry = Registry::new(ValidatorConfig::default());
        RecordReport::new(input, &registry.validate(input))
    }

    #[test]
    fn test_valid_report_carries_record() {
        let input = RecordInput::new("A", "www.example.com", "192.0.2.1").with_ttl(300);
        let report = report(&input);

        assert!(report.valid);
        assert!(report.errors.is_empty());
        let record = report.record.unwrap();
        assert_eq!(record.ttl, 300);
        assert_eq!(record.content, "192.0.2.1");
    }

    #[test]
    fn test_invalid_report_json_shape() {
        let input = RecordInput::new("A", "www.example.com", "192.0.2.1").with_ttl("-1");
        let json = serde_json::to_value(report(&input)).unwrap();

        assert_eq!(json["type"], "A");
        assert_eq!(json["valid"], false);
        assert!(json.get("record").is_none());
        assert!(json.get("warnings").is_none());
        assert_eq!(json["errors"][0]["kind"], "Range");
        assert_eq!(json["errors"][0]["reason"], "RangeError");
    }

    #[test]
    fn test_batch_summary_counts() {
        let reports = vec![
            report(&RecordInput::new("A", "www.example.com", "192.0.2.1")),
            report(&RecordInput::new("AAAA", "www.example.com", "::1")),
            report(&RecordInput::new("DS", "example.com", "0 0 0 00")),
        ];
        let summary = BatchSummary::from_reports(&reports);

        assert_eq!(summary.total, 3);
        assert_eq!(summary.valid, 2);
        assert_eq!(summary.invalid, 1);
        assert!(summary.warnings >= 1);
        assert!(!summary.all_valid());
        assert!(BatchSummary::default().all_valid());
    }
}
