// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Tests for A and AAAA validation.

#[cfg(test)]
mod tests {
    use crate::config::ValidatorConfig;
    use crate::record::RecordInput;
    use crate::records::address::*;
    use crate::records::test_support::{first_error, run, run_with};
    use crate::validation_errors::ErrorKind;

    #[test]
    fn test_a_valid() {
        let record = RecordInput::new("A", "www.example.com", "192.0.2.1").with_ttl(3600);
        let result = run(&AValidator, &record);

        let data = result.data().unwrap();
        assert_eq!(data.content, "192.0.2.1");
        assert_eq!(data.name, "www.example.com");
        assert_eq!(data.priority, 0);
        assert_eq!(data.ttl, 3600);
    }

    #[test]
    fn test_a_rejects_bad_address() {
        for content in ["192.0.2.256", "192.0.2", "2001:db8::1", "", "abc"] {
            let result = run(&AValidator, &RecordInput::new("A", "www.example.com", content));
            assert_eq!(first_error(&result), "This is not a valid IPv4 address.", "{content}");
        }
    }

    #[test]
    fn test_a_wildcard_name() {
        let result = run(&AValidator, &RecordInput::new("A", "*.example.com", "192.0.2.1"));
        assert!(result.is_valid());
    }

    #[test]
    fn test_a_bad_hostname_comes_first() {
        let result = run(&AValidator, &RecordInput::new("A", "-www.example.com", "bad"));
        assert_eq!(result.first_error().unwrap().kind(), ErrorKind::Hostname);
    }

    #[test]
    fn test_a_priority_pinned() {
        let record = RecordInput::new("A", "www.example.com", "192.0.2.1").with_priority(5);
        let result = run(&AValidator, &record);
        assert!(first_error(&result).contains("priority"));
    }

    #[test]
    fn test_a_default_ttl() {
        let record = RecordInput::new("A", "www.example.com", "192.0.2.1");
        assert_eq!(run(&AValidator, &record).data().unwrap().ttl, 86400);
    }

    #[test]
    fn test_aaaa_valid() {
        let record = RecordInput::new("AAAA", "www.example.com", "2001:db8::1");
        let result = run(&AaaaValidator, &record);
        assert_eq!(result.data().unwrap().content, "2001:db8::1");
    }

    #[test]
    fn test_aaaa_policy_addresses() {
        for content in ["::", "::1", "fec0::1", "feff::1"] {
            let result = run(&AaaaValidator, &RecordInput::new("AAAA", "www.example.com", content));
            assert!(!result.is_valid(), "{content}");
            assert!(first_error(&result).contains("valid IPv6"));
        }
    }

    #[test]
    fn test_aaaa_rejects_ipv4() {
        let result = run(&AaaaValidator, &RecordInput::new("AAAA", "www.example.com", "192.0.2.1"));
        assert_eq!(first_error(&result), "This is not a valid IPv6 address.");
    }

    #[test]
    fn test_aaaa_canonical_form_when_configured() {
        let config = ValidatorConfig {
            ipv6_canonical: true,
            ..ValidatorConfig::default()
        };
        let record = RecordInput::new("AAAA", "www.example.com", "2001:DB8:0:0::1");

        assert!(run(&AaaaValidator, &record).is_valid());
        let result = run_with(&config, &AaaaValidator, &record);
        assert!(first_error(&result).contains("expected 2001:db8::1"));
    }
}
