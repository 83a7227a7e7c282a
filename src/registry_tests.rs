// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for record type dispatch and the registry entry point.

#[cfg(test)]
mod tests {
    use crate::config::ValidatorConfig;
    use crate::record::RecordInput;
    use crate::record_store::InMemoryRecordStore;
    use crate::registry::*;
    use std::str::FromStr;
    use std::sync::Arc;

    fn registry_with(records: &[(&str, &str, &str)]) -> Registry {
        let store = InMemoryRecordStore::new();
        for (name, record_type, content) in records {
            store.insert(1, name, record_type, content).unwrap();
        }
        Registry::with_store(ValidatorConfig::default(), Arc::new(store))
    }

    #[test]
    fn test_record_type_parses_case_insensitively() {
        assert_eq!(RecordType::from_str("aaaa").unwrap(), RecordType::Aaaa);
        assert_eq!(RecordType::from_str(" Nsec3Param ").unwrap(), RecordType::Nsec3param);
        assert_eq!(
            RecordType::from_str("WKS").unwrap_err().to_string(),
            "Unsupported record type: WKS"
        );
    }

    #[test]
    fn test_record_type_display_round_trips() {
        for record_type in RecordType::ALL {
            assert_eq!(
                RecordType::from_str(&record_type.to_string()).unwrap(),
                *record_type
            );
        }
        assert_eq!(RecordType::Eui48.to_string(), "EUI48");
    }

    #[test]
    fn test_all_is_sorted_and_unique() {
        let names: Vec<&str> = RecordType::ALL.iter().map(|t| t.as_str()).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_known_type_mnemonics() {
        assert!(is_known_type_mnemonic("A"));
        assert!(is_known_type_mnemonic("rrsig"));
        assert!(is_known_type_mnemonic("HIP"));
        assert!(is_known_type_mnemonic("TYPE65534"));
        assert!(!is_known_type_mnemonic("TYPE70000"));
        assert!(!is_known_type_mnemonic("DMARC"));
        assert!(!is_known_type_mnemonic("BOGUS"));
        assert!(!is_known_type_mnemonic(""));
    }

    #[test]
    fn test_unknown_type_uses_default_validator() {
        let registry = Registry::new(ValidatorConfig::default());
        let result = registry.validate(&RecordInput::new("WKS", "host.example.com", "192.0.2.1 TCP 25"));
        assert!(result.is_valid());
        assert_eq!(result.data().unwrap().priority, 0);

        let result = registry.validate(&RecordInput::new("WKS", "host.example.com", "   "));
        assert!(!result.is_valid());
    }

    #[test]
    fn test_name_is_normalized_against_zone() {
        let registry = Registry::new(ValidatorConfig::default());

        let relative = registry.validate(&RecordInput::new("A", "www", "192.0.2.1").with_zone_name("example.com"));
        assert_eq!(relative.data().unwrap().name, "www.example.com");

        let apex = registry.validate(&RecordInput::new("A", "", "192.0.2.1").with_zone_name("example.com"));
        assert_eq!(apex.data().unwrap().name, "example.com");

        let qualified = registry.validate(
            &RecordInput::new("A", "www.example.com", "192.0.2.1").with_zone_name("example.com"),
        );
        assert_eq!(qualified.data().unwrap().name, "www.example.com");
    }

    #[test]
    fn test_existing_cname_blocks_other_types() {
        let registry = registry_with(&[("alias.example.com", "CNAME", "www.example.com")]);
        let result = registry.validate(&RecordInput::new("TXT", "alias", "\"hello\"").in_zone("example.com", 1));

        assert!(!result.is_valid());
        assert_eq!(
            result.first_error().unwrap().to_string(),
            "This is not a valid record. There already exists a CNAME with this name."
        );
    }

    #[test]
    fn test_cname_conflicts_with_existing_record() {
        let registry = registry_with(&[("example.com", "A", "1.2.3.4")]);
        let result = registry.validate(
            &RecordInput::new("CNAME", "shop.example.com", "target.com").in_zone("example.com", 1),
        );
        assert!(result.is_valid());

        let result = registry.validate(
            &RecordInput::new("CNAME", "www.example.com", "target.com").in_zone("example.com", 1),
        );
        assert!(result.is_valid());

        let registry = registry_with(&[("www.example.com", "A", "1.2.3.4")]);
        let result = registry.validate(
            &RecordInput::new("CNAME", "www.example.com", "target.com").in_zone("example.com", 1),
        );
        assert!(result
            .first_error()
            .unwrap()
            .to_string()
            .contains("There already exists a record with this name"));
    }

    #[test]
    fn test_ns_and_mx_must_not_target_cname() {
        let registry = registry_with(&[("alias.example.com", "CNAME", "mail.example.net")]);

        let mx = registry.validate(
            &RecordInput::new("MX", "example.com", "alias.example.com").in_zone("example.com", 1),
        );
        assert!(mx
            .first_error()
            .unwrap()
            .to_string()
            .starts_with("You can not point a NS or MX record to a CNAME record."));

        let ns = registry.validate(
            &RecordInput::new("NS", "sub.example.com", "alias.example.com.").in_zone("example.com", 1),
        );
        assert!(!ns.is_valid());

        let fine = registry.validate(
            &RecordInput::new("MX", "example.com", "mail.example.com").in_zone("example.com", 1),
        );
        assert!(fine.is_valid());
        assert_eq!(fine.data().unwrap().priority, 10);
    }

    #[test]
    fn test_store_checks_are_skipped_without_store() {
        let registry = Registry::new(ValidatorConfig::default());
        let result = registry.validate(&RecordInput::new("MX", "example.com", "alias.example.com"));
        assert!(result.is_valid());
    }

    #[test]
    fn test_validate_batch_preserves_order() {
        let registry = Registry::new(ValidatorConfig::default());
        let results = registry.validate_batch(&[
            RecordInput::new("A", "www.example.com", "192.0.2.1"),
            RecordInput::new("AAAA", "www.example.com", "::1"),
            RecordInput::new("A", "www.example.com", "192.0.2.2").with_priority(5),
        ]);

        assert_eq!(results.len(), 3);
        assert!(results[0].is_valid());
        assert!(!results[1].is_valid());
        assert!(!results[2].is_valid());
    }

    #[test]
    fn test_get_validator_dispatches_by_tag() {
        let registry = Registry::new(ValidatorConfig::default());
        let config = ValidatorConfig::default();
        let hostnames = crate::primitives::hostname::HostnameValidator::new(&config.hostname);
        let ctx = crate::records::ValidationContext::new(&config, &hostnames);

        let record = RecordInput::new("DS", "example.com", "0 0 0 00");
        let result = registry.get_validator("ds").validate(&record, &ctx);
        assert!(result.is_valid());
        assert!(!result.warnings().is_empty());
    }
}
