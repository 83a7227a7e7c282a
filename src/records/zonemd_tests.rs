// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Tests for ZONEMD validation.

#[cfg(test)]
mod tests {
    use crate::record::RecordInput;
    use crate::records::test_support::{first_error, has_warning, run};
    use crate::records::zonemd::*;

    fn sha384() -> String {
        "a0b9b16969687adf".repeat(6)
    }

    fn sha512() -> String {
        "a0b9b16969687adf".repeat(8)
    }

    fn zonemd(content: &str) -> RecordInput {
        RecordInput::new("ZONEMD", "example.com", content)
            .with_priority(0)
            .with_ttl(3600)
    }

    #[test]
    fn test_valid_sha384() {
        let content = format!("2021121600 1 1 {}", sha384());
        let result = run(&ZonemdValidator, &zonemd(&content));
        assert!(result.is_valid());
        let data = result.data().unwrap();
        assert_eq!(data.content, content);
        assert_eq!(data.priority, 0);
        assert_eq!(data.ttl, 3600);
        assert!(has_warning(&result, "apex"));
        assert!(has_warning(&result, "recommended"));
    }

    #[test]
    fn test_valid_sha512_and_normalization() {
        let digest = sha512().to_uppercase();
        let content = format!("2021121600 1 2 {} {}", &digest[..64], &digest[64..]);
        let result = run(&ZonemdValidator, &zonemd(&content));
        assert!(result.is_valid());
        assert_eq!(
            result.data().unwrap().content,
            format!("2021121600 1 2 {}", sha512())
        );
    }

    #[test]
    fn test_apex_advice_uses_zone() {
        let content = format!("2021121600 1 1 {}", sha384());
        let record = zonemd(&content).with_zone_name("example.com");
        assert!(!has_warning(&run(&ZonemdValidator, &record), "apex"));
    }

    #[test]
    fn test_field_errors() {
        let digest = sha384();
        let cases = [
            (format!("invalid 1 1 {digest}"), "serial"),
            (format!("9999999999 1 1 {digest}"), "serial"),
            (format!("2021121600 999 1 {digest}"), "scheme"),
            (format!("2021121600 0 1 {digest}"), "scheme must be 1"),
            (format!("2021121600 7 1 {digest}"), "scheme must be 1"),
            (format!("2021121600 1 999 {digest}"), "hash algorithm"),
            (format!("2021121600 1 0 {digest}"), "hash algorithm 0"),
            (format!("2021121600 1 1 {digest}z"), "hexadecimal string"),
            ("2021121600 1".to_string(), "must contain serial, scheme, hash-algorithm, and digest"),
            (format!("2021121600 1 1 {}", &digest[..94]), "96 hexadecimal characters"),
            (format!("2021121600 1 2 {digest}"), "128 hexadecimal characters"),
            ("2021121600 1 1 a0b9b16969".to_string(), "at least 24 hexadecimal characters"),
        ];
        for (content, needle) in cases {
            let result = run(&ZonemdValidator, &zonemd(&content));
            assert!(first_error(&result).contains(needle), "{content}: {}", first_error(&result));
        }
    }

    #[test]
    fn test_private_use_codes() {
        let result = run(&ZonemdValidator, &zonemd(&format!("2021121600 240 1 {}", sha384())));
        assert!(result.is_valid());
        assert!(has_warning(&result, "scheme values 240-255 are reserved for private use"));

        let result = run(&ZonemdValidator, &zonemd(&format!("2021121600 1 240 {}", sha384())));
        assert!(result.is_valid());
        assert!(has_warning(&result, "hash algorithm values 240-255 are reserved for private use"));
    }

    #[test]
    fn test_owner_priority_and_ttl() {
        let content = format!("2018031900 1 1 {}", sha384());
        let record = RecordInput::new("ZONEMD", "example\u{1}\u{2}.com", content.as_str());
        assert!(!run(&ZonemdValidator, &record).is_valid());
        assert!(first_error(&run(&ZonemdValidator, &zonemd(&content).with_priority(1))).contains("priority"));
        assert!(first_error(&run(&ZonemdValidator, &zonemd(&content).with_ttl(-5))).contains("TTL"));
    }
}
