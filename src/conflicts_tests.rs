// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Tests for zone-level conflict checks.

#[cfg(test)]
mod tests {
    use crate::conflicts::*;
    use crate::record_store::{InMemoryRecordStore, RecordRef, RecordStore, StoredRecord};
    use crate::validation_errors::{ErrorKind, StoreError};

    // =====================================================
    // Helper Functions
    // =====================================================

    struct UnavailableStore;

    impl RecordStore for UnavailableStore {
        fn find_records_by_name_and_zone(
            &self,
            _name: &str,
            _zone_id: Option<i64>,
            _exclude_record_id: Option<i64>,
        ) -> Result<Vec<RecordRef>, StoreError> {
            Err(StoreError::Unavailable {
                reason: "connection refused".to_string(),
            })
        }

        fn find_records_by_content_and_type(
            &self,
            _content: &str,
            _types: &[&str],
        ) -> Result<Vec<i64>, StoreError> {
            Err(StoreError::Unavailable {
                reason: "connection refused".to_string(),
            })
        }

        fn find_records_by_zone_and_type(
            &self,
            _zone_id: i64,
            _record_type: &str,
        ) -> Result<Vec<StoredRecord>, StoreError> {
            Err(StoreError::Unavailable {
                reason: "connection refused".to_string(),
            })
        }
    }

    fn zone() -> InMemoryRecordStore {
        let store = InMemoryRecordStore::new();
        store.insert(1, "www.example.com", "A", "192.0.2.1").unwrap();
        store.insert(1, "alias.example.com", "CNAME", "www.example.com").unwrap();
        store.insert(1, "example.com", "MX", "mail.example.com").unwrap();
        store
    }

    // =====================================================
    // check_cname
    // =====================================================

    #[test]
    fn test_cname_conflicts_with_other_type() {
        let store = zone();
        let err = ConflictChecker::new(&store)
            .check_cname("www.example.com", Some(1), None)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "This is not a valid CNAME. There already exists a record with this name."
        );
        assert_eq!(err.kind(), ErrorKind::Referential);
    }

    #[test]
    fn test_cname_duplicate() {
        let store = zone();
        let err = ConflictChecker::new(&store)
            .check_cname("alias.example.com", Some(1), None)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Multiple CNAME records with the same name are not allowed."
        );
    }

    #[test]
    fn test_cname_editing_itself_passes() {
        let store = zone();
        assert!(ConflictChecker::new(&store)
            .check_cname("alias.example.com", Some(1), Some(2))
            .is_ok());
    }

    #[test]
    fn test_cname_targeted_by_mx() {
        let store = zone();
        let err = ConflictChecker::new(&store)
            .check_cname("mail.example.com", Some(1), None)
            .unwrap_err();
        assert!(err.to_string().contains("Did you assign an MX or NS record"));
    }

    #[test]
    fn test_cname_free_name() {
        let store = zone();
        assert!(ConflictChecker::new(&store)
            .check_cname("new.example.com", Some(1), None)
            .is_ok());
    }

    // =====================================================
    // check_existing_cname / check_non_alias_target
    // =====================================================

    #[test]
    fn test_existing_cname() {
        let store = zone();
        let checker = ConflictChecker::new(&store);
        assert!(checker
            .check_existing_cname("alias.example.com", Some(1), None)
            .unwrap_err()
            .to_string()
            .contains("There already exists a CNAME with this name."));
        assert!(checker
            .check_existing_cname("www.example.com", Some(1), None)
            .is_ok());
    }

    #[test]
    fn test_non_alias_target() {
        let store = zone();
        let checker = ConflictChecker::new(&store);
        assert!(checker
            .check_non_alias_target("alias.example.com")
            .unwrap_err()
            .to_string()
            .starts_with("You can not point a NS or MX record to a CNAME record."));
        assert!(checker.check_non_alias_target("www.example.com").is_ok());
    }

    // =====================================================
    // check_violations
    // =====================================================

    #[test]
    fn test_violations_for_cname_name_type() {
        let store = zone();
        let err = ConflictChecker::new(&store)
            .check_violations("CNAME", "www.example.com", 1, None)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "A CNAME record cannot coexist with other record types for the same name. Found existing A record."
        );
    }

    #[test]
    fn test_violations_for_address_at_cname() {
        let store = zone();
        let checker = ConflictChecker::new(&store);
        assert!(checker
            .check_violations("AAAA", "alias.example.com", 1, None)
            .unwrap_err()
            .to_string()
            .contains("conflicts with an existing CNAME"));
        assert!(checker
            .check_violations("SRV", "alias.example.com", 1, None)
            .is_ok());
        assert!(checker
            .check_violations("A", "alias.example.com", 2, None)
            .is_ok());
    }

    // =====================================================
    // Store failures
    // =====================================================

    #[test]
    fn test_store_failure_is_referential_error() {
        let store = UnavailableStore;
        let err = ConflictChecker::new(&store)
            .check_cname("www.example.com", Some(1), None)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Referential);
        assert!(err
            .to_string()
            .starts_with("Could not verify uniqueness of the record:"));
    }
}
