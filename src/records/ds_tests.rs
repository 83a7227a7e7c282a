// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Tests for DS, CDS and DLV validation.

#[cfg(test)]
mod tests {
    use crate::record::RecordInput;
    use crate::registry::RecordType;
    use crate::records::ds::*;
    use crate::records::test_support::{first_error, has_warning, run};

    // ===== Helper Functions =====

    const SHA256_DIGEST: &str = "348dedbedc0cddcc4f2605ba42d428223672e5e913762c68f29d8547baa680c0";
    const SHA1_DIGEST: &str = "2bb183af5f22588179a53b0a98631fad1a292118";

    fn ds(record_type: &str, content: &str) -> RecordInput {
        RecordInput::new(record_type, "example.com", content).with_ttl(3600)
    }

    // ===== DS =====

    #[test]
    fn test_valid_sha256() {
        let content = format!("45342 13 2 {SHA256_DIGEST}");
        let result = run(&DsValidator::DS, &ds("DS", &content));
        let data = result.data().unwrap();
        assert_eq!(data.content, content);
        assert_eq!(data.priority, 0);
        assert_eq!(data.ttl, 3600);
        assert!(result.warnings().is_empty());
    }

    #[test]
    fn test_digest_is_joined_and_lowercased() {
        let upper = SHA256_DIGEST.to_ascii_uppercase();
        let content = format!("45342 13 2 {} {}", &upper[..32], &upper[32..]);
        let result = run(&DsValidator::DS, &ds("DS", &content));
        assert_eq!(result.data().unwrap().content, format!("45342 13 2 {SHA256_DIGEST}"));
    }

    #[test]
    fn test_sha1_warning() {
        let result = run(&DsValidator::DS, &ds("DS", &format!("2371 8 1 {SHA1_DIGEST}")));
        assert!(result.is_valid());
        assert!(has_warning(&result, "SHA-1 (digest type 1) is deprecated"));
    }

    #[test]
    fn test_field_errors() {
        let cases = [
            (format!("0 13 2 {SHA256_DIGEST}"), "Invalid key tag"),
            (format!("65536 13 2 {SHA256_DIGEST}"), "Invalid key tag"),
            (format!("45342 99 2 {SHA256_DIGEST}"), "Invalid algorithm"),
            (format!("45342 13 3 {SHA256_DIGEST}"), "Invalid digest type"),
            (format!("45342 13 2 {}", &SHA256_DIGEST[..60]), "Invalid digest length for SHA-256"),
            (format!("45342 13 1 {SHA256_DIGEST}"), "Invalid digest length for SHA-1"),
            ("45342 13 2 zzzz".to_string(), "hexadecimal characters"),
            ("45342 13 2".to_string(), "Invalid record format"),
        ];
        for (content, expected) in cases {
            let result = run(&DsValidator::DS, &ds("DS", &content));
            assert!(
                first_error(&result).contains(expected),
                "{content}: {}",
                first_error(&result)
            );
        }
    }

    #[test]
    fn test_algorithm_advisory() {
        let result = run(&DsValidator::DS, &ds("DS", &format!("45342 5 2 {SHA256_DIGEST}")));
        assert!(has_warning(&result, "NOT RECOMMENDED"));
    }

    #[test]
    fn test_delete_sentinel() {
        let result = run(&DsValidator::CDS, &ds("CDS", "0 0 0 00"));
        assert_eq!(result.data().unwrap().content, "0 0 0 00");
        assert!(has_warning(&result, "deletion record"));
    }

    #[test]
    fn test_priority_must_be_zero() {
        let record = ds("DS", &format!("45342 13 2 {SHA256_DIGEST}")).with_priority(10);
        assert!(first_error(&run(&DsValidator::DS, &record))
            .contains("DS records must have priority value of 0"));
    }

    // ===== CDS and DLV =====

    #[test]
    fn test_cds_advisories() {
        let content = format!("45342 13 2 {SHA256_DIGEST}");
        let apex = ds("CDS", &content).in_zone("example.com", 1);
        let result = run(&DsValidator::CDS, &apex);
        assert!(has_warning(&result, "CDNSKEY"));
        assert!(has_warning(&result, "RFC 8078"));
        assert!(!has_warning(&result, "zone apex"));

        let sub = RecordInput::new("CDS", "sub.example.com", &content).in_zone("example.com", 1);
        assert!(has_warning(&run(&DsValidator::CDS, &sub), "zone apex"));
    }

    #[test]
    fn test_dlv_advisories() {
        let content = format!("45342 13 2 {SHA256_DIGEST}");
        let record = RecordInput::new("DLV", "example.com.dlv.isc.org", &content);
        let result = run(&DsValidator::DLV, &record);
        assert!(result.is_valid());
        assert!(has_warning(&result, "RFC 8749"));
        assert!(has_warning(&result, "decommissioned"));
        assert_eq!(DsValidator::DLV.record_type(), RecordType::Dlv);
    }
}
