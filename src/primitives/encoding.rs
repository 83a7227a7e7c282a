// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Base64 and hexadecimal payload checks.
//!
//! Key material in DNSKEY, CERT, OPENPGPKEY and friends is base64; digests and hashes in
//! DS, TLSA, SSHFP and friends are hex. Presentation format allows whitespace inside
//! base64 blobs, which is removed before decoding.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::validation_errors::ValidationError;
use crate::validation_result::ValidationResult;

/// Decode base64 after removing whitespace.
///
/// Decoding is strict: the standard alphabet, canonical padding, no trailing bits.
#[must_use]
pub fn decode_base64(s: &str) -> Option<Vec<u8>> {
    let compact: String = s.split_whitespace().collect();
    if compact.is_empty() {
        return None;
    }
    STANDARD.decode(compact.as_bytes()).ok()
}

/// Returns true if `s` decodes as strict base64.
#[must_use]
pub fn is_base64(s: &str) -> bool {
    decode_base64(s).is_some()
}

/// Returns true if `s` is non-empty and made only of hexadecimal digits.
#[must_use]
pub fn is_hex(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Validate a base64 payload and return the decoded bytes.
#[must_use]
pub fn validate_base64(s: &str) -> ValidationResult<Vec<u8>> {
    decode_base64(s)
        .ok_or_else(|| ValidationError::encoding("Invalid Base64 encoding."))
        .into()
}

/// Validate a hexadecimal payload, optionally of an exact digit count.
///
/// # Arguments
///
/// * `s` - The payload
/// * `exact_length` - The digit count implied by an algorithm code, if any
///
/// # Returns
///
/// The payload in lowercase.
#[must_use]
pub fn validate_hex(s: &str, exact_length: Option<usize>) -> ValidationResult<String> {
    check_hex(s, exact_length).into()
}

/// See [`validate_hex`].
///
/// # Errors
///
/// Returns an encoding error for non-hex input and a cross-field error for a length
/// that contradicts `exact_length`.
pub fn check_hex(s: &str, exact_length: Option<usize>) -> Result<String, ValidationError> {
    if !is_hex(s) {
        return Err(ValidationError::encoding(
            "Invalid hexadecimal data. Only the characters 0-9 and a-f are allowed.",
        ));
    }
    if let Some(expected) = exact_length {
        if s.len() != expected {
            return Err(ValidationError::cross_field(format!(
                "Hexadecimal data must be exactly {expected} characters long, got {}.",
                s.len()
            )));
        }
    }
    Ok(s.to_ascii_lowercase())
}

#[cfg(test)]
#[path = "encoding_tests.rs"]
mod encoding_tests;
