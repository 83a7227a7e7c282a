// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! TTL defaulting and range checks.

use crate::constants::MAX_TTL;
use crate::validation_errors::ValidationError;
use crate::validation_result::ValidationResult;

/// Resolve a TTL field.
///
/// An absent or blank field takes `default`. Otherwise the field must be an integer in
/// `0..=2147483647`. The default itself is held to the same range.
///
/// # Errors
///
/// Returns a range error naming the TTL field.
pub fn check_ttl(ttl: Option<&str>, default: i32) -> Result<i32, ValidationError> {
    let raw = ttl.map(str::trim).filter(|raw| !raw.is_empty());

    let value = match raw {
        None => i64::from(default),
        Some(raw) => raw.parse::<i64>().map_err(|_| {
            ValidationError::range("Invalid value for TTL field. It should be numeric.")
        })?,
    };

    if !(0..=MAX_TTL).contains(&value) {
        return Err(ValidationError::range(format!(
            "Invalid value for TTL field. It should be between 0 and {MAX_TTL}."
        )));
    }

    i32::try_from(value).map_err(|_| {
        ValidationError::range(format!(
            "Invalid value for TTL field. It should be between 0 and {MAX_TTL}."
        ))
    })
}

/// Validate a TTL field, see [`check_ttl`].
///
/// # Examples
///
/// ```
/// use zone_validator::primitives::validate_ttl;
///
/// assert_eq!(validate_ttl(Some(""), 3600).data(), Some(&3600));
/// assert!(!validate_ttl(Some("-1"), 3600).is_valid());
/// assert!(!validate_ttl(Some("2147483648"), 3600).is_valid());
/// ```
#[must_use]
pub fn validate_ttl(ttl: Option<&str>, default: i32) -> ValidationResult<i32> {
    check_ttl(ttl, default).into()
}

#[cfg(test)]
#[path = "ttl_tests.rs"]
mod ttl_tests;
