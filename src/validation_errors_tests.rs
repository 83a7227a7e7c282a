// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for validation error types.

#[cfg(test)]
mod tests {
    use crate::validation_errors::*;

    #[test]
    fn test_display_is_the_message() {
        let error = ValidationError::range("Invalid value for MX priority field.");
        assert_eq!(error.to_string(), "Invalid value for MX priority field.");
        assert_eq!(error.message(), "Invalid value for MX priority field.");
    }

    #[test]
    fn test_kind_per_constructor() {
        assert_eq!(ValidationError::structural("x").kind(), ErrorKind::Structural);
        assert_eq!(ValidationError::range("x").kind(), ErrorKind::Range);
        assert_eq!(ValidationError::invalid_choice("x").kind(), ErrorKind::Enum);
        assert_eq!(ValidationError::encoding("x").kind(), ErrorKind::Encoding);
        assert_eq!(ValidationError::cross_field("x").kind(), ErrorKind::CrossField);
        assert_eq!(ValidationError::referential("x").kind(), ErrorKind::Referential);
        assert_eq!(ValidationError::hostname("x").kind(), ErrorKind::Hostname);
    }

    #[test]
    fn test_status_reason() {
        assert_eq!(
            ValidationError::cross_field("digest").status_reason(),
            "CrossFieldError"
        );
        assert_eq!(
            ValidationError::hostname("bad").status_reason(),
            "HostnameError"
        );
        assert_eq!(ErrorKind::Encoding.to_string(), "EncodingError");
    }

    #[test]
    fn test_is_referential() {
        assert!(ValidationError::referential("conflict").is_referential());
        assert!(!ValidationError::structural("fields").is_referential());
    }

    #[test]
    fn test_store_error_display() {
        let error = StoreError::QueryFailed {
            query: "find_records_by_name_and_zone".to_string(),
            reason: "connection reset".to_string(),
        };

        assert_eq!(
            error.to_string(),
            "record store query 'find_records_by_name_and_zone' failed: connection reset"
        );
    }

    #[test]
    fn test_store_error_becomes_referential() {
        let error: ValidationError = StoreError::Unavailable {
            reason: "timeout".to_string(),
        }
        .into();

        assert_eq!(error.kind(), ErrorKind::Referential);
        assert!(error.message().contains("Could not verify uniqueness"));
        assert!(error.message().contains("timeout"));
    }
}
