// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Tests for SVCB and HTTPS validation.

#[cfg(test)]
mod tests {
    use crate::record::RecordInput;
    use crate::registry::RecordType;
    use crate::records::svcb::*;
    use crate::records::test_support::{first_error, has_warning, run};

    fn https(content: &str) -> RecordInput {
        RecordInput::new("HTTPS", "host.example.com", content)
            .with_priority(0)
            .with_ttl(3600)
    }

    #[test]
    fn test_valid_service_and_alias_mode() {
        for content in [
            "1 example.org",
            "0 .",
            "0 svc.example.com",
            "1 example.org alpn=h2,h3 port=443 ipv4hint=192.0.2.1,192.0.2.2 ipv6hint=2001:db8::1,2001:db8::2",
            "1 example.org mandatory=alpn,ipv4hint alpn=h2 ipv4hint=192.0.2.1",
            "1 example.org ech=AEn+DQBFJDLlQYAkwUAwASGQFnYg9FHAQCGe4An1Eyf9eCmdwE7TJ1sV3esqVyguLK0zjFfdZ7ReL5hvzLxyyQ==",
            "1 example.org dohpath=/dns-query{?dns}",
            "1 . alpn=h3 no-default-alpn",
            "2 example.org key65333=ex1",
        ] {
            let result = run(&SvcbValidator::HTTPS, &https(content));
            let data = result.data().unwrap_or_else(|| panic!("{content}: {:?}", result.errors()));
            assert_eq!(data.content, content);
            assert_eq!(data.priority, 0);
            assert_eq!(data.ttl, 3600);
        }
    }

    #[test]
    fn test_unknown_key_warns() {
        let result = run(&SvcbValidator::HTTPS, &https("1 example.org unknown=value"));
        assert!(result.is_valid());
        assert!(has_warning(&result, "unknown"));
    }

    #[test]
    fn test_invalid_content() {
        let cases = [
            ("1", "priority and target"),
            ("65536 example.org", "priority"),
            ("1 -invalid-hostname.example.org", "target"),
            ("1 example.org alpn:h2", "parameters"),
            ("1 example.org alpn=h2@", "comma-separated"),
            ("1 example.org port=70000", "port"),
            ("1 example.org ipv4hint=300.300.300.300", "ipv4hint"),
            ("1 example.org ipv6hint=2001:zzzz::1", "ipv6hint"),
            ("0 . alpn=h2", "AliasMode"),
            ("1 example.org mandatory=alpn,ipv4hint alpn=h2", "mandatory"),
            ("1 example.org alpn=h2 alpn=h3", "more than once"),
            ("1 example.org ech=!!", "ech"),
        ];
        for (content, expected) in cases {
            let result = run(&SvcbValidator::HTTPS, &https(content));
            assert!(first_error(&result).contains(expected), "{content}: {}", first_error(&result));
        }
    }

    #[test]
    fn test_external_priority_rejected() {
        let record = https("1 example.org").with_priority(10);
        let result = run(&SvcbValidator::HTTPS, &record);
        assert!(first_error(&result).contains("Priority field should not be used"));
    }

    #[test]
    fn test_invalid_owner_and_ttl() {
        let record = RecordInput::new("SVCB", "-invalid-hostname.example.com", "1 example.org");
        assert!(!run(&SvcbValidator::SVCB, &record).is_valid());

        let record = RecordInput::new("SVCB", "host.example.com", "1 example.org").with_ttl(-1);
        assert!(first_error(&run(&SvcbValidator::SVCB, &record)).contains("TTL"));

        let record = RecordInput::new("SVCB", "host.example.com", "1 example.org");
        assert_eq!(run(&SvcbValidator::SVCB, &record).data().unwrap().ttl, 86400);
    }

    #[test]
    fn test_record_type_names_messages() {
        let record = RecordInput::new("SVCB", "host.example.com", "1");
        assert!(first_error(&run(&SvcbValidator::SVCB, &record)).starts_with("SVCB"));
        assert_eq!(SvcbValidator::HTTPS.record_type(), RecordType::Https);
    }
}
