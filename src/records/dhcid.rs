// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! DHCID record validation (RFC 4701).
//!
//! Content is base64 of `identifier-type(2) digest-type(1) digest`.

use crate::primitives::encoding::decode_base64;
use crate::primitives::text::check_printable;
use crate::record::RecordInput;
use crate::records::{finish, zero_priority, RecordOutcome, RecordValidator, ValidationContext};
use crate::validation_errors::ValidationError;

/// Identifier types defined by RFC 4701.
const STANDARD_IDENTIFIER_TYPES: &[u16] = &[0x0000, 0x0001, 0x0002];

/// Digest type 1 is SHA-256.
const DIGEST_SHA256: u8 = 1;

/// Identifier type, digest type and a SHA-256 digest.
const SHA256_RDATA_LENGTH: usize = 35;

/// Decoded DHCID RDATA.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DhcidData {
    pub identifier_type: u16,
    pub digest_type: u8,
    pub digest: Vec<u8>,
}

impl DhcidData {
    /// Decode and check DHCID content.
    ///
    /// # Errors
    ///
    /// Returns an encoding error for malformed base64 and a structural error for RDATA
    /// too short for its digest type.
    pub fn parse(content: &str) -> Result<Self, ValidationError> {
        let data = content.trim();
        if data.is_empty()
            || !data
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'+' | b'/' | b'='))
        {
            return Err(ValidationError::encoding(
                "DHCID record must contain only valid base64 characters (A-Z, a-z, 0-9, +, /, =).",
            ));
        }
        let unpadded = data.trim_end_matches('=');
        if unpadded.contains('=') {
            return Err(ValidationError::encoding(
                "DHCID record has invalid base64 padding. Equals signs (=) should only appear at the end of the data.",
            ));
        }
        if data.len() - unpadded.len() > 2 || data.len() % 4 != 0 {
            return Err(ValidationError::encoding(
                "DHCID record has invalid base64 length. Base64 data must be a multiple of 4 characters (with padding).",
            ));
        }
        let decoded = decode_base64(data).ok_or_else(|| {
            ValidationError::encoding("DHCID record must contain valid base64-encoded data.")
        })?;

        let [high, low, digest_type, digest @ ..] = decoded.as_slice() else {
            return Err(ValidationError::structural(
                "DHCID record is too short. The decoded data must contain at least 3 bytes (type codes and digest).",
            ));
        };
        if *digest_type == DIGEST_SHA256 && decoded.len() < SHA256_RDATA_LENGTH {
            return Err(ValidationError::structural(
                "DHCID record with SHA-256 digest (type 1) must be at least 35 bytes when decoded (2 for identifier type, 1 for digest type, 32 for SHA-256 digest).",
            ));
        }

        Ok(Self {
            identifier_type: u16::from_be_bytes([*high, *low]),
            digest_type: *digest_type,
            digest: digest.to_vec(),
        })
    }

    #[must_use]
    pub fn advisories(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if !STANDARD_IDENTIFIER_TYPES.contains(&self.identifier_type) {
            warnings.push(format!(
                "DHCID identifier type 0x{:04X} is not one of the standard types defined in RFC 4701 (0x0000, 0x0001, 0x0002).",
                self.identifier_type
            ));
        }
        if self.digest_type != DIGEST_SHA256 {
            warnings.push(format!(
                "DHCID digest type {} is not the standard type (1 for SHA-256) defined in RFC 4701.",
                self.digest_type
            ));
        }
        warnings.push("DHCID records should be updated only by authorized DHCP clients or servers to prevent conflicts and unauthorized DNS updates.".to_string());
        warnings.push("Consider using DNSSEC or TSIG authentication (RFC 3007) for secure DHCID updates as recommended by RFC 4701.".to_string());
        warnings
    }
}

/// Validator for DHCID records.
#[derive(Debug, Default, Clone, Copy)]
pub struct DhcidValidator;

impl RecordValidator for DhcidValidator {
    fn check(&self, record: &RecordInput, ctx: &ValidationContext<'_>) -> RecordOutcome {
        let name = ctx.hostname(&record.name, true)?;
        check_printable(&record.content)
            .map_err(|_| ValidationError::structural("Invalid characters in DHCID record content."))?;
        let data = DhcidData::parse(&record.content)?;

        let mut warnings = data.advisories();
        let labels: Vec<&str> = name.split('.').collect();
        if labels.len() > 2 && !labels[0].bytes().all(|b| b.is_ascii_digit()) {
            warnings.push("As per RFC 4701 and RFC 4703, DHCID records should be placed at the same name as the A or AAAA records they correspond to.".to_string());
        }
        warnings.push("Per RFC 4703, DHCID records are used for collision detection when multiple DHCP clients claim the same name.".to_string());

        let ttl = ctx.ttl(record)?;
        let priority = zero_priority(record, "DHCID")?;

        finish(record.content.trim().to_string(), name, priority, ttl, warnings)
    }
}

#[cfg(test)]
#[path = "dhcid_tests.rs"]
mod dhcid_tests;
