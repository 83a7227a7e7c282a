// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Tests for MX and KX validation.

#[cfg(test)]
mod tests {
    use crate::record::RecordInput;
    use crate::records::mx::*;
    use crate::records::test_support::{first_error, has_warning, run};

    fn mx(content: &str) -> RecordInput {
        RecordInput::new("MX", "example.com", content)
    }

    #[test]
    fn test_valid_mx() {
        let result = run(&MxValidator, &mx("mail.example.com").with_priority(20).with_ttl(3600));
        let data = result.data().unwrap();
        assert_eq!(data.content, "mail.example.com");
        assert_eq!(data.priority, 20);
        assert_eq!(data.ttl, 3600);
        assert!(result.warnings()[0].contains("CNAME"));
    }

    #[test]
    fn test_default_priority() {
        assert_eq!(run(&MxValidator, &mx("mail.example.com")).data().unwrap().priority, 10);
    }

    #[test]
    fn test_priority_bounds() {
        assert_eq!(
            run(&MxValidator, &mx("mail.example.com").with_priority(0)).data().unwrap().priority,
            0
        );
        assert_eq!(
            run(&MxValidator, &mx("mail.example.com").with_priority(65535)).data().unwrap().priority,
            65535
        );
        for priority in ["65536", "-1", "abc"] {
            let result = run(&MxValidator, &mx("mail.example.com").with_priority(priority));
            assert!(first_error(&result).starts_with("Invalid value for MX priority field."));
        }
    }

    #[test]
    fn test_high_priority_warning() {
        let result = run(&MxValidator, &mx("mail.example.com").with_priority(200));
        assert_eq!(result.warnings().len(), 2);
        assert!(result.warnings()[1].contains("Priority values above 100"));
    }

    #[test]
    fn test_invalid_target() {
        assert_eq!(
            first_error(&run(&MxValidator, &mx("-invalid-.example.com"))),
            "Invalid mail server hostname."
        );
    }

    #[test]
    fn test_null_mx() {
        let result = run(&MxValidator, &mx(".").with_priority(0));
        assert_eq!(result.data().unwrap().content, ".");
        assert_eq!(result.warnings().len(), 2);

        let bad = run(&MxValidator, &mx(".").with_priority(10));
        assert!(first_error(&bad).contains("priority 0"));
    }

    #[test]
    fn test_kx() {
        let record = RecordInput::new("KX", "example.com", "kx.example.com").with_priority(5);
        let result = run(&KxValidator, &record);
        assert_eq!(result.data().unwrap().priority, 5);
        assert!(has_warning(&result, "DNSSEC"));
        assert!(has_warning(&result, "RFC 2230"));
        assert!(has_warning(&result, "A/AAAA records"));

        let bad = run(&KxValidator, &record.clone().with_priority(70000));
        assert!(first_error(&bad).contains("preference field"));
    }
}
