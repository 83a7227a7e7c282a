// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for the validation result type.

#[cfg(test)]
mod tests {
    use crate::validation_errors::ValidationError;
    use crate::validation_result::*;

    #[test]
    fn test_valid_result_accessors() {
        let result = ValidationResult::with_warnings(42, vec!["careful".to_string()]);

        assert!(result.is_valid());
        assert_eq!(result.data(), Some(&42));
        assert_eq!(result.warnings(), ["careful".to_string()]);
        assert!(result.errors().is_empty());
        assert!(result.first_error().is_none());
    }

    #[test]
    fn test_invalid_result_accessors() {
        let result: ValidationResult<u32> =
            ValidationResult::invalid(ValidationError::range("too big"));

        assert!(!result.is_valid());
        assert!(result.data().is_none());
        assert!(result.warnings().is_empty());
        assert_eq!(result.error_messages(), vec!["too big".to_string()]);
    }

    #[test]
    fn test_rejection_refuses_empty_list() {
        assert!(Rejection::from_errors(Vec::new()).is_none());
        assert!(reject_if_any(Vec::new()).is_ok());
    }

    #[test]
    fn test_rejection_keeps_order() {
        let rejection = Rejection::from_errors(vec![
            ValidationError::structural("first"),
            ValidationError::range("second"),
        ])
        .unwrap();

        let result: ValidationResult<()> = ValidationResult::rejected(rejection);
        assert_eq!(
            result.error_messages(),
            vec!["first".to_string(), "second".to_string()]
        );
        assert_eq!(result.first_error().unwrap().message(), "first");
    }

    #[test]
    fn test_map_preserves_warnings() {
        let result = ValidationResult::with_warnings(2, vec!["w".to_string()]).map(|n| n * 10);

        assert_eq!(result.data(), Some(&20));
        assert_eq!(result.warnings().len(), 1);
    }

    #[test]
    fn test_round_trip_through_result() {
        let result = ValidationResult::with_warnings("data", vec!["w".to_string()]);
        let back: ValidationResult<&str> = result.clone().into_result().into();
        assert_eq!(back, result);

        let invalid: ValidationResult<&str> =
            ValidationResult::invalid(ValidationError::encoding("bad base64"));
        assert!(invalid.clone().into_result().is_err());
    }

    #[test]
    fn test_from_single_error_result() {
        let ok: ValidationResult<u8> = Ok::<u8, ValidationError>(7).into();
        assert_eq!(ok, ValidationResult::valid(7));

        let err: ValidationResult<u8> = Err(ValidationError::range("nope")).into();
        assert!(!err.is_valid());
    }
}
