// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Tests for OPENPGPKEY validation.

#[cfg(test)]
mod tests {
    use crate::record::RecordInput;
    use crate::records::openpgpkey::*;
    use crate::records::test_support::{first_error, has_warning, run};

    const KEY: &str = "mDMEXEcE6RYJKwYBBAHaRw8BAQdArjWwk3FAqyiFbFBKT4TzXcVBqPTB3gmzlC/Ub7O1u120F2pvaG5AZXhhbXBsZS5jb20=";
    const HASHED: &str = "c93f1e400f26708f98cb19d936620da35eec8f72e57f9eec01c1afd6._openpgpkey.example.com";

    fn pgp(name: &str, content: &str) -> RecordInput {
        RecordInput::new("OPENPGPKEY", name, content)
            .with_priority(0)
            .with_ttl(3600)
    }

    #[test]
    fn test_valid_record() {
        let result = run(&OpenpgpkeyValidator, &pgp(HASHED, KEY));
        assert!(result.is_valid());
        let data = result.data().unwrap();
        assert_eq!(data.content, KEY);
        assert_eq!(data.name, HASHED);
        assert_eq!(data.priority, 0);
        assert_eq!(data.ttl, 3600);
        assert!(!has_warning(&result, "does not follow the standard OPENPGPKEY format"));
        assert!(!has_warning(&result, "packet header"));
        assert!(has_warning(&result, "REQUIRE DNSSEC for any security benefit"));
    }

    #[test]
    fn test_local_part_label() {
        let label = local_part_label("hugh");
        assert_eq!(format!("{label}._openpgpkey.example.com"), HASHED);
    }

    #[test]
    fn test_owner_name_format() {
        let result = run(&OpenpgpkeyValidator, &pgp("abc-xyz._openpgpkey.example.com", KEY));
        assert!(result.is_valid());
        assert!(has_warning(&result, "does not follow the standard OPENPGPKEY format"));

        let result = run(&OpenpgpkeyValidator, &pgp("pgp.example.com", KEY));
        assert!(result.is_valid());
        assert!(has_warning(&result, "no _openpgpkey label"));
    }

    #[test]
    fn test_wrapped_key_is_joined() {
        let wrapped = format!("{}\n  {}", &KEY[..40], &KEY[40..]);
        let result = run(&OpenpgpkeyValidator, &pgp(HASHED, &wrapped));
        assert_eq!(result.data().unwrap().content, KEY);
    }

    #[test]
    fn test_invalid_content() {
        assert!(first_error(&run(&OpenpgpkeyValidator, &pgp(HASHED, ""))).contains("cannot be empty"));
        assert!(first_error(&run(
            &OpenpgpkeyValidator,
            &pgp(HASHED, "mDMEXEcE6RYJKwYBBAHaRw8BAQdArjWwk3FAqyi!FbFBKT4TzXcVB")
        ))
        .contains("valid base64"));
        assert!(has_warning(&run(&OpenpgpkeyValidator, &pgp(HASHED, "AAAA")), "packet header"));
    }

    #[test]
    fn test_priority_and_ttl() {
        assert!(first_error(&run(&OpenpgpkeyValidator, &pgp(HASHED, KEY).with_priority(10)))
            .contains("priority field"));
        assert!(first_error(&run(&OpenpgpkeyValidator, &pgp(HASHED, KEY).with_ttl("abc"))).contains("TTL"));
        assert!(!run(&OpenpgpkeyValidator, &pgp("invalid..example.com", KEY)).is_valid());
    }
}
