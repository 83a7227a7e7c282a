// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Tests for hostname validation.

#[cfg(test)]
mod tests {
    use crate::config::HostnameConfig;
    use crate::primitives::hostname::*;
    use crate::validation_errors::ErrorKind;

    fn validator() -> HostnameValidator {
        HostnameValidator::default()
    }

    fn first_error(name: &str, wildcard: bool) -> String {
        validator()
            .validate(name, wildcard)
            .first_error()
            .map(ToString::to_string)
            .unwrap_or_default()
    }

    #[test]
    fn test_valid_hostname_strips_trailing_dot() {
        let result = validator().validate("host.example.com.", false);
        assert!(result.is_valid());
        assert_eq!(result.data().unwrap(), "host.example.com");
    }

    #[test]
    fn test_apex_sentinels_pass_unchanged() {
        for name in [".", "@", "@.example.com"] {
            let result = validator().validate(name, false);
            assert_eq!(result.data().map(String::as_str), Some(name));
        }
    }

    #[test]
    fn test_label_of_64_characters_is_invalid() {
        let name = format!("{}.example.com", "a".repeat(64));
        let result = validator().validate(&name, false);
        assert!(!result.is_valid());
        assert_eq!(
            result.first_error().unwrap().to_string(),
            "Given hostname or one of the labels is too short or too long."
        );
        assert_eq!(result.first_error().unwrap().kind(), ErrorKind::Hostname);
    }

    #[test]
    fn test_253_characters_is_valid() {
        let name = format!("{}.{}.{}.{}", "a".repeat(63), "b".repeat(63), "c".repeat(63), "d".repeat(61));
        assert_eq!(name.len(), 253);
        assert!(validator().validate(&name, false).is_valid());
        assert!(validator().validate(&format!("{name}."), false).is_valid());
    }

    #[test]
    fn test_254_characters_is_invalid() {
        let name = format!("{}.{}.{}.{}", "a".repeat(63), "b".repeat(63), "c".repeat(63), "d".repeat(62));
        assert_eq!(name.len(), 254);
        assert_eq!(first_error(&name, false), "The hostname is too long.");
    }

    #[test]
    fn test_invalid_characters() {
        assert_eq!(
            first_error("exa mple.com", false),
            "You have invalid characters in your zone name."
        );
        assert_eq!(
            first_error("ex!ample.com", false),
            "You have invalid characters in your zone name."
        );
    }

    #[test]
    fn test_dash_rules() {
        assert_eq!(
            first_error("-www.example.com", false),
            "A hostname can not start or end with a dash."
        );
        assert_eq!(
            first_error("www-.example.com", false),
            "A hostname can not start or end with a dash."
        );
        assert!(validator().validate("my-host.example.com", false).is_valid());
    }

    #[test]
    fn test_label_errors_are_accumulated_once() {
        let result = validator().validate("-a-.-b-.example.com", false);
        assert_eq!(
            result.error_messages(),
            vec!["A hostname can not start or end with a dash.".to_string()]
        );

        let result = validator().validate("-b!.example..com", false);
        assert_eq!(result.errors().len(), 3);
    }

    #[test]
    fn test_empty_label_is_invalid() {
        assert!(!validator().is_valid("www..example.com", false));
        assert!(!validator().is_valid("", false));
    }

    #[test]
    fn test_wildcard_only_when_allowed() {
        assert!(validator().is_valid("*.example.com", true));
        assert!(!validator().is_valid("*.example.com", false));
        assert!(!validator().is_valid("www.*.example.com", true));
    }

    #[test]
    fn test_underscore_labels_are_allowed() {
        assert!(validator().is_valid("_sip._tcp.example.com", false));
    }

    #[test]
    fn test_slash_outside_arpa() {
        assert_eq!(
            first_error("0/26.example.com", false),
            "Given hostname has too many slashes."
        );
    }

    #[test]
    fn test_classless_reverse_delegation() {
        assert!(validator().is_valid("0/26.1.0.192.in-addr.arpa", false));
        assert!(validator().is_valid("64/26.1.0.192.in-addr.arpa", false));
        assert!(validator().is_valid("128/25.1.0.192.in-addr.arpa", false));
    }

    #[test]
    fn test_classless_reverse_delegation_alignment() {
        let error = first_error("65/26.1.0.192.in-addr.arpa", false);
        assert_eq!(
            error,
            "Subnet 65 is not aligned with prefix /26. Should be multiple of 64."
        );
    }

    #[test]
    fn test_classless_reverse_delegation_ranges() {
        assert!(first_error("256/26.1.0.192.in-addr.arpa", false).contains("0-255"));
        assert!(first_error("0/24.1.0.192.in-addr.arpa", false).contains("prefix length"));
        assert!(first_error("0/32.1.0.192.in-addr.arpa", false).contains("prefix length"));
        assert!(first_error("0/x.1.0.192.in-addr.arpa", false).contains("Must be numeric"));
        assert!(first_error("0/26/1.1.0.192.in-addr.arpa", false).contains("subnet/prefix"));
        assert!(first_error("0/26.1/2.0.192.in-addr.arpa", false).contains("Multiple slashes"));
    }

    #[test]
    fn test_ip6_arpa_slash_notation() {
        assert!(validator().is_valid("a/64.8.b.d.0.1.0.0.2.ip6.arpa", false));
        assert!(first_error("g/64.8.b.d.0.1.0.0.2.ip6.arpa", false).contains("hexadecimal"));
        assert!(first_error("a/129.8.b.d.0.1.0.0.2.ip6.arpa", false).contains("0-128"));
    }

    #[test]
    fn test_top_level_tld_check() {
        let strict = HostnameValidator::new(&HostnameConfig {
            top_level_tld_check: true,
            ..HostnameConfig::default()
        });
        assert!(!strict.is_valid("localhost", false));
        assert!(strict.is_valid("example.com", false));
        assert!(validator().is_valid("localhost", false));
    }

    #[test]
    fn test_strict_tld_check() {
        let strict = HostnameValidator::new(&HostnameConfig {
            strict_tld_check: true,
            extra_tlds: vec![".LAN".to_string()],
            ..HostnameConfig::default()
        });
        assert!(strict.is_valid("example.com", false));
        assert!(strict.is_valid("example.co.uk", false));
        assert!(strict.is_valid("printer.lan", false));
        let result = strict.validate("example.notatld", false);
        assert_eq!(
            result.first_error().unwrap().to_string(),
            "You are using an invalid top level domain."
        );
    }

    #[test]
    fn test_normalize_record_name() {
        assert_eq!(normalize_record_name("www", "example.com"), "www.example.com");
        assert_eq!(normalize_record_name("@", "example.com"), "example.com");
        assert_eq!(normalize_record_name("", "example.com."), "example.com");
        assert_eq!(
            normalize_record_name("www.example.com", "example.com"),
            "www.example.com"
        );
        assert_eq!(
            normalize_record_name("mail.other.org.", "example.com"),
            "mail.other.org"
        );
        assert_eq!(
            normalize_record_name("notexample.com", "example.com"),
            "notexample.com.example.com"
        );
        assert_eq!(normalize_record_name("www", ""), "www");
    }

    #[test]
    fn test_is_zone_apex() {
        assert!(is_zone_apex("Example.com.", "example.com"));
        assert!(!is_zone_apex("www.example.com", "example.com"));
    }
}
