// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Strict unsigned integer parsing for record fields.
//!
//! Record fields are typed by users into free text. Only plain ASCII digits are accepted:
//! no sign, no exponent, no decimal point, no surrounding whitespace.

/// Parse a field made only of ASCII digits.
///
/// Returns `None` for empty input, any non-digit character, or overflow.
///
/// # Examples
///
/// ```
/// use zone_validator::primitives::parse_unsigned;
///
/// assert_eq!(parse_unsigned("65535"), Some(65535));
/// assert_eq!(parse_unsigned("-1"), None);
/// assert_eq!(parse_unsigned("1e3"), None);
/// ```
#[must_use]
pub fn parse_unsigned(field: &str) -> Option<u64> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}

/// Parse a digits-only field and require it to lie within `min..=max`.
#[must_use]
pub fn parse_in_range(field: &str, min: u64, max: u64) -> Option<u64> {
    parse_unsigned(field).filter(|value| (min..=max).contains(value))
}

/// Parse a field into a `u8`.
#[must_use]
pub fn parse_u8(field: &str) -> Option<u8> {
    parse_unsigned(field).and_then(|v| u8::try_from(v).ok())
}

/// Parse a field into a `u16`.
#[must_use]
pub fn parse_u16(field: &str) -> Option<u16> {
    parse_unsigned(field).and_then(|v| u16::try_from(v).ok())
}

/// Parse a field into a `u32`.
#[must_use]
pub fn parse_u32(field: &str) -> Option<u32> {
    parse_unsigned(field).and_then(|v| u32::try_from(v).ok())
}

#[cfg(test)]
#[path = "numeric_tests.rs"]
mod numeric_tests;
