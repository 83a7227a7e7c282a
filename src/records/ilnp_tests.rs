// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Tests for the ILNP record validators.

#[cfg(test)]
mod tests {
    use crate::record::RecordInput;
    use crate::records::ilnp::*;
    use crate::records::test_support::{first_error, has_warning, run};

    fn record(record_type: &str, name: &str, content: &str) -> RecordInput {
        RecordInput::new(record_type, name, content)
            .with_priority(0)
            .with_ttl(3600)
    }

    #[test]
    fn test_l64_valid() {
        let result = run(&L64Validator, &record("L64", "host.example.com", "10 2001:0db8:1140:1000"));
        assert!(result.is_valid());
        let data = result.data().unwrap();
        assert_eq!(data.content, "10 2001:0db8:1140:1000");
        assert_eq!(data.priority, 0);
        assert!(has_warning(&result, "experimental protocol"));
        assert!(has_warning(&result, "very low TTL values"));
    }

    #[test]
    fn test_priority_field_overrides_content_preference() {
        let input = record("L64", "host.example.com", "10 2001:0db8:1140:1000").with_priority(20);
        assert_eq!(run(&L64Validator, &input).data().unwrap().priority, 20);

        let input = RecordInput::new("L64", "host.example.com", "15 fedc:ba98:7654:3210");
        assert_eq!(run(&L64Validator, &input).data().unwrap().priority, 15);
    }

    #[test]
    fn test_l64_errors() {
        let cases = [
            ("65536 2001:0db8:1140:1000", "preference must be a number between 0 and 65535"),
            ("-1 2001:0db8:1140:1000", "preference must be a number between 0 and 65535"),
            ("10 2001:0db8:1140:GGGG", "locator must be a valid 64-bit hexadecimal"),
            ("10 192.0.2.1", "locator must be a valid 64-bit hexadecimal"),
            ("10 2001:0db8:1140", "locator must be a valid 64-bit hexadecimal"),
            ("10 2001:0db8:1140:1000:abcd", "locator must be a valid 64-bit hexadecimal"),
            ("10", "must contain preference and locator64 separated by space"),
            ("10 2001:0db8:1140:1000 extrapart", "must contain preference and locator64 separated by space"),
            ("10 0000:0000:0000:0000", "unspecified"),
            ("10 ffff:ffff:ffff:ffff", "all-ones"),
            ("10 2001:0db8:11400:1000", "hexadecimal IPv6 address segment"),
        ];
        for (content, needle) in cases {
            let result = run(&L64Validator, &record("L64", "host.example.com", content));
            assert!(first_error(&result).contains(needle), "{content}: {}", first_error(&result));
        }
    }

    #[test]
    fn test_wildcard_owner_warns() {
        let result = run(&L64Validator, &record("L64", "*.example.com", "10 2001:0db8:1140:1000"));
        assert!(result.is_valid());
        assert!(has_warning(&result, "wildcard DNS entries"));
    }

    #[test]
    fn test_l32() {
        let result = run(&L32Validator, &record("L32", "host.example.com", "10 198.51.100.1"));
        assert!(result.is_valid());
        assert!(!has_warning(&result, "not globally routable"));

        let result = run(&L32Validator, &record("L32", "host.example.com", "10 10.1.2.3"));
        assert!(has_warning(&result, "not globally routable"));

        assert!(first_error(&run(&L32Validator, &record("L32", "host.example.com", "10 2001:db8::1")))
            .contains("valid IPv4"));
        assert!(first_error(&run(&L32Validator, &record("L32", "host.example.com", "10 0.0.0.0")))
            .contains("unspecified"));
        assert!(first_error(&run(&L32Validator, &record("L32", "host.example.com", "10")))
            .contains("locator32"));
    }

    #[test]
    fn test_lp() {
        let result = run(&LpValidator, &record("LP", "host.example.com", "10 example.com."));
        assert!(result.is_valid());
        assert_eq!(result.data().unwrap().content, "10 example.com.");
        assert!(!has_warning(&result, "trailing dot"));

        let result = run(&LpValidator, &record("LP", "host.example.com", "10 example.com"));
        assert!(result.is_valid());
        assert!(has_warning(&result, "trailing dot"));

        let result = run(&LpValidator, &record("LP", "host.example.com", "10 host.example.com."));
        assert!(has_warning(&result, "SHOULD NOT have the same value as the owner name"));

        let result = run(&LpValidator, &record("LP", "host.example.com", "10 example.com.").with_ttl(300));
        assert!(has_warning(&result, "longer TTL values"));
    }

    #[test]
    fn test_lp_errors() {
        let cases = [
            ("10 -invalid-.example.com.", "FQDN must be a valid"),
            ("10 192.0.2.1", "FQDN must be a valid"),
            ("10", "must contain preference and FQDN separated by space"),
            ("10 example.com. extrapart", "must contain preference and FQDN separated by space"),
            ("65536 example.com.", "preference must be a number between 0 and 65535"),
        ];
        for (content, needle) in cases {
            let result = run(&LpValidator, &record("LP", "host.example.com", content));
            assert!(first_error(&result).contains(needle), "{content}");
        }
        let result = run(&LpValidator, &record("LP", "-invalid-hostname.example.com", "10 example.com."));
        assert!(!result.is_valid());
    }

    #[test]
    fn test_nid() {
        let result = run(&NidValidator, &record("NID", "host.example.com", "0014:4fff:ff20:ee64"));
        assert!(result.is_valid());
        assert!(has_warning(&result, "universal"));

        let result = run(&NidValidator, &record("NID", "host.example.com", "00144FFFFF20EE64"));
        assert_eq!(result.data().unwrap().content, "0014:4fff:ff20:ee64");
        assert!(has_warning(&result, "presentation format"));

        let result = run(&NidValidator, &record("NID", "host.example.com", "200:0:0:1"));
        assert_eq!(result.data().unwrap().content, "0200:0000:0000:0001");
        assert!(has_warning(&result, "locally assigned"));
    }

    #[test]
    fn test_nid_preference_and_errors() {
        let input = RecordInput::new("NID", "host.example.com", "0014:4fff:ff20:ee64");
        assert_eq!(run(&NidValidator, &input).data().unwrap().priority, 0);

        let input = input.with_priority(65536);
        assert!(first_error(&run(&NidValidator, &input)).contains("preference"));

        assert!(first_error(&run(&NidValidator, &record("NID", "host.example.com", "0114:4fff:ff20:ee64")))
            .contains("group bit"));
        assert!(first_error(&run(&NidValidator, &record("NID", "host.example.com", "0014:4fff:ff20")))
            .contains("xxxx:xxxx:xxxx:xxxx"));
        assert!(first_error(&run(&NidValidator, &record("NID", "host.example.com", "0014")))
            .contains("64-bit hexadecimal"));
        assert!(first_error(&run(&NidValidator, &record("NID", "host.example.com", " ")))
            .contains("cannot be empty"));
    }

    #[test]
    fn test_node_id_presentation() {
        let (node, bare) = NodeId::parse("a8cd:0:12:3").unwrap();
        assert!(!bare);
        assert_eq!(node.to_presentation(), "a8cd:0000:0012:0003");
        assert!(parse_locator64("0:0:0:1").is_ok());
    }
}
