// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! ZONEMD record validation (RFC 8976): `serial scheme hash-algorithm digest`.

use crate::constants::{SHA384_HEX_LENGTH, SHA512_HEX_LENGTH};
use crate::primitives::encoding::is_hex;
use crate::primitives::hostname::is_zone_apex;
use crate::primitives::numeric::{parse_u32, parse_u8};
use crate::primitives::text::check_printable;
use crate::record::RecordInput;
use crate::records::{finish, zero_priority, RecordOutcome, RecordValidator, ValidationContext};
use crate::validation_errors::ValidationError;

/// The SIMPLE collation scheme.
pub const ZONEMD_SCHEME_SIMPLE: u8 = 1;

/// Hash algorithm 1.
pub const ZONEMD_HASH_SHA384: u8 = 1;

/// Hash algorithm 2.
pub const ZONEMD_HASH_SHA512: u8 = 2;

/// Minimum digest length in hex characters (12 octets).
const MIN_DIGEST_HEX_LENGTH: usize = 24;

fn is_private_use(code: u8) -> bool {
    code >= 240
}

/// Parsed ZONEMD content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZonemdContent {
    pub serial: u32,
    pub scheme: u8,
    pub hash_algorithm: u8,
    /// Lowercase hex digest
    pub digest: String,
}

impl ZonemdContent {
    /// Parse ZONEMD content. The digest may be split by whitespace.
    ///
    /// # Errors
    ///
    /// Returns the first field violation.
    pub fn parse(content: &str) -> Result<Self, ValidationError> {
        let fields: Vec<&str> = content.split_whitespace().collect();
        if fields.len() < 4 {
            return Err(ValidationError::structural(
                "ZONEMD record must contain serial, scheme, hash-algorithm, and digest separated by spaces.",
            ));
        }

        let serial = parse_u32(fields[0]).ok_or_else(|| {
            ValidationError::range(
                "ZONEMD serial must be a number between 0 and 4294967295 (32-bit unsigned integer).",
            )
        })?;

        let scheme = parse_u8(fields[1]).ok_or_else(|| {
            ValidationError::range("ZONEMD scheme must be a number between 0 and 255.")
        })?;
        if scheme == 0 {
            return Err(ValidationError::invalid_choice(
                "ZONEMD scheme must be 1 (SIMPLE); scheme 0 is reserved.",
            ));
        }
        if scheme != ZONEMD_SCHEME_SIMPLE && !is_private_use(scheme) {
            return Err(ValidationError::invalid_choice(
                "ZONEMD scheme must be 1 (SIMPLE) for standard use. Other values are reserved or unassigned.",
            ));
        }

        let hash_algorithm = parse_u8(fields[2]).ok_or_else(|| {
            ValidationError::range("ZONEMD hash algorithm must be a number between 0 and 255.")
        })?;
        if hash_algorithm == 0 {
            return Err(ValidationError::invalid_choice(
                "ZONEMD hash algorithm 0 is reserved and not for standard use.",
            ));
        }

        let digest = fields[3..].concat();
        if !is_hex(&digest) {
            return Err(ValidationError::encoding(
                "ZONEMD digest must be a hexadecimal string.",
            ));
        }
        if digest.len() < MIN_DIGEST_HEX_LENGTH {
            return Err(ValidationError::structural(format!(
                "ZONEMD digest must be at least {MIN_DIGEST_HEX_LENGTH} hexadecimal characters (12 octets)."
            )));
        }
        let expected = match hash_algorithm {
            ZONEMD_HASH_SHA384 => Some(("SHA-384", SHA384_HEX_LENGTH)),
            ZONEMD_HASH_SHA512 => Some(("SHA-512", SHA512_HEX_LENGTH)),
            _ => None,
        };
        if let Some((label, length)) = expected {
            if digest.len() != length {
                return Err(ValidationError::cross_field(format!(
                    "ZONEMD digest for {label} (algorithm {hash_algorithm}) must be exactly {length} hexadecimal characters ({} octets).",
                    length / 2
                )));
            }
        }

        Ok(Self {
            serial,
            scheme,
            hash_algorithm,
            digest: digest.to_ascii_lowercase(),
        })
    }

    /// Algorithm and placement advice.
    #[must_use]
    pub fn advisories(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if is_private_use(self.scheme) {
            warnings.push(
                "ZONEMD scheme values 240-255 are reserved for private use and may not be interoperable.".to_string(),
            );
        }
        match self.hash_algorithm {
            ZONEMD_HASH_SHA384 => warnings.push(
                "SHA-384 (algorithm 1) is the recommended hash algorithm for ZONEMD records.".to_string(),
            ),
            ZONEMD_HASH_SHA512 => warnings.push(
                "SHA-512 (algorithm 2) is stronger but costs more to compute than SHA-384.".to_string(),
            ),
            code if is_private_use(code) => warnings.push(
                "ZONEMD hash algorithm values 240-255 are reserved for private use and may not be interoperable.".to_string(),
            ),
            code => warnings.push(format!(
                "ZONEMD hash algorithm {code} is unassigned; verifiers will treat the digest as unsupported."
            )),
        }
        warnings
    }

    /// Presentation form with a single-token lowercase digest.
    #[must_use]
    pub fn to_content(&self) -> String {
        format!(
            "{} {} {} {}",
            self.serial, self.scheme, self.hash_algorithm, self.digest
        )
    }
}

/// Validator for ZONEMD records.
#[derive(Debug, Default, Clone, Copy)]
pub struct ZonemdValidator;

impl RecordValidator for ZonemdValidator {
    fn check(&self, record: &RecordInput, ctx: &ValidationContext<'_>) -> RecordOutcome {
        let name = ctx.hostname(&record.name, false)?;
        check_printable(&record.content)?;
        let parsed = ZonemdContent::parse(&record.content)?;

        let mut warnings = Vec::new();
        if record
            .zone
            .as_deref()
            .is_none_or(|zone| !is_zone_apex(&name, zone))
        {
            warnings.push(
                "ZONEMD records are only meaningful at the zone apex; verifiers ignore them elsewhere.".to_string(),
            );
        }
        warnings.extend(parsed.advisories());
        warnings.push(
            "The digest must be recomputed whenever the zone changes, including on every re-signing.".to_string(),
        );

        let ttl = ctx.ttl(record)?;
        let priority = zero_priority(record, "ZONEMD")?;

        finish(parsed.to_content(), name, priority, ttl, warnings)
    }
}

#[cfg(test)]
#[path = "zonemd_tests.rs"]
mod zonemd_tests;
