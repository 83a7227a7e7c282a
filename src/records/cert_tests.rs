// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Tests for CERT validation.

#[cfg(test)]
mod tests {
    use crate::record::RecordInput;
    use crate::records::cert::*;
    use crate::records::test_support::{first_error, has_warning, run};

    const DATA: &str = "MIIC+zCCAeOgAwIBAgIJAJl8";

    fn cert(content: &str) -> RecordInput {
        RecordInput::new("CERT", "example.com", content)
            .with_priority(0)
            .with_ttl(3600)
    }

    #[test]
    fn test_numeric_fields() {
        let content = format!("1 12345 1 {DATA}");
        let result = run(&CertValidator, &cert(&content));
        let data = result.data().unwrap();
        assert_eq!(data.content, content);
        assert_eq!(data.priority, 0);
        assert_eq!(data.ttl, 3600);
        assert!(has_warning(&result, "MUST NOT be used"));
    }

    #[test]
    fn test_mnemonics() {
        let result = run(&CertValidator, &cert(&format!("PKIX 12345 RSASHA1 {DATA}")));
        assert!(result.is_valid());
        assert!(has_warning(&result, "NOT RECOMMENDED"));

        let parsed = CertContent::parse(&format!("pgp 0 ed25519 {DATA}")).unwrap();
        assert_eq!(parsed.cert_type, 3);
        assert_eq!(parsed.algorithm, 15);
        assert!(parsed.advisories().is_empty());
    }

    #[test]
    fn test_url_types() {
        let result = run(&CertValidator, &cert("IPKIX 12345 13 https://example.com/cert.pem"));
        assert!(result.is_valid());
        assert!(has_warning(&result, "URL-based certificate types"));

        let result = run(&CertValidator, &cert("IPKIX 1 13 https://[bad/cert.pem"));
        assert!(first_error(&result).contains("valid URL"));
    }

    #[test]
    fn test_invalid_fields() {
        let cases = [
            (format!("66000 12345 5 {DATA}"), "CERT type"),
            (format!("INVALID 12345 5 {DATA}"), "CERT type"),
            (format!("1 -1 5 {DATA}"), "key tag"),
            (format!("1 12345 256 {DATA}"), "algorithm"),
            (format!("1 12345 INVALID {DATA}"), "algorithm"),
            ("1 12345 5 @@invalid base64**".to_string(), "base64"),
            ("1 12345 5".to_string(), "must contain type"),
        ];
        for (content, expected) in cases {
            let result = run(&CertValidator, &cert(&content));
            assert!(first_error(&result).contains(expected), "{content}: {}", first_error(&result));
        }
    }

    #[test]
    fn test_name_priority_and_ttl() {
        let content = format!("1 12345 5 {DATA}");
        assert!(!run(&CertValidator, &RecordInput::new("CERT", "-invalid.example.com", &content)).is_valid());
        assert!(!run(&CertValidator, &cert(&content).with_ttl(-1)).is_valid());
        assert!(!run(&CertValidator, &cert(&content).with_priority(10)).is_valid());
        assert_eq!(
            run(&CertValidator, &RecordInput::new("CERT", "example.com", &content))
                .data()
                .unwrap()
                .ttl,
            86400
        );
    }
}
