// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for record input and output types.

#[cfg(test)]
mod tests {
    use crate::record::*;

    #[test]
    fn test_builder() {
        let input = RecordInput::new("A", "www", "192.0.2.1")
            .with_priority(0)
            .with_ttl("3600")
            .with_default_ttl(300)
            .in_zone("example.com", 7)
            .with_record_id(42);

        assert_eq!(input.record_type, "A");
        assert_eq!(input.priority_field(), Some("0"));
        assert_eq!(input.ttl_field(), Some("3600"));
        assert_eq!(input.default_ttl, Some(300));
        assert_eq!(input.zone.as_deref(), Some("example.com"));
        assert_eq!(input.zone_id, Some(7));
        assert_eq!(input.existing_record_id(), Some(42));
    }

    #[test]
    fn test_blank_priority_is_none() {
        let input = RecordInput::new("A", "www", "192.0.2.1").with_priority("  ");
        assert_eq!(input.priority_field(), None);
    }

    #[test]
    fn test_zero_record_id_is_new() {
        let input = RecordInput::new("A", "www", "192.0.2.1").with_record_id(0);
        assert_eq!(input.existing_record_id(), None);
    }

    #[test]
    fn test_deserialize_numbers_and_strings() {
        let yaml = "type: MX\nname: example.com\ncontent: mail.example.com\npriority: 10\nttl: \"3600\"\n";
        let input: RecordInput = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(input.priority.as_deref(), Some("10"));
        assert_eq!(input.ttl.as_deref(), Some("3600"));
        assert_eq!(input.zone, None);
    }

    #[test]
    fn test_deserialize_json() {
        let json = r#"{"type":"A","name":"www","content":"192.0.2.1","priority":null,"zoneId":3}"#;
        let input: RecordInput = serde_json::from_str(json).unwrap();

        assert_eq!(input.priority, None);
        assert_eq!(input.zone_id, Some(3));
    }

    #[test]
    fn test_validated_record_serializes_camel_case() {
        let record = ValidatedRecord {
            content: "192.0.2.1".to_string(),
            name: "www.example.com".to_string(),
            priority: 0,
            ttl: 3600,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["ttl"], 3600);
        assert_eq!(json["name"], "www.example.com");
    }
}
