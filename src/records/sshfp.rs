// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! SSHFP record validation (RFC 4255, RFC 6594, RFC 7479, RFC 8709).

use crate::constants::{SHA1_HEX_LENGTH, SHA256_HEX_LENGTH};
use crate::primitives::encoding::check_hex;
use crate::primitives::numeric::parse_u8;
use crate::record::RecordInput;
use crate::records::{
    exact_fields, finish, zero_priority, RecordOutcome, RecordValidator, ValidationContext,
};
use crate::validation_errors::ValidationError;

/// SSH public key algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SshAlgorithm {
    Rsa,
    Dsa,
    Ecdsa,
    Ed25519,
    Ed448,
}

impl SshAlgorithm {
    fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::Rsa),
            2 => Some(Self::Dsa),
            3 => Some(Self::Ecdsa),
            4 => Some(Self::Ed25519),
            6 => Some(Self::Ed448),
            _ => None,
        }
    }

    /// The wire code.
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::Rsa => 1,
            Self::Dsa => 2,
            Self::Ecdsa => 3,
            Self::Ed25519 => 4,
            Self::Ed448 => 6,
        }
    }
}

/// Parsed SSHFP content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SshfpContent {
    pub algorithm: SshAlgorithm,
    /// 1 = SHA-1, 2 = SHA-256
    pub fingerprint_type: u8,
    /// Lowercase hex fingerprint
    pub fingerprint: String,
}

impl SshfpContent {
    /// Parse `algorithm fp-type fingerprint`.
    ///
    /// # Errors
    ///
    /// Returns the first field that fails its check.
    pub fn parse(content: &str) -> Result<Self, ValidationError> {
        let [algorithm, fingerprint_type, fingerprint] = exact_fields::<3>(
            content,
            "SSHFP record must contain algorithm, fingerprint type and fingerprint separated by spaces.",
        )?;

        let algorithm = parse_u8(algorithm)
            .and_then(SshAlgorithm::from_code)
            .ok_or_else(|| {
                ValidationError::invalid_choice(
                    "SSHFP algorithm must be 1 (RSA), 2 (DSA), 3 (ECDSA), 4 (Ed25519) or 6 (Ed448).",
                )
            })?;
        let (fingerprint_type, length) = match parse_u8(fingerprint_type) {
            Some(1) => (1, SHA1_HEX_LENGTH),
            Some(2) => (2, SHA256_HEX_LENGTH),
            _ => {
                return Err(ValidationError::invalid_choice(
                    "SSHFP fingerprint type must be 1 (SHA-1) or 2 (SHA-256).",
                ))
            }
        };
        let fingerprint = check_hex(fingerprint, Some(length))?;

        Ok(Self {
            algorithm,
            fingerprint_type,
            fingerprint,
        })
    }

    /// Canonical text form.
    #[must_use]
    pub fn to_content(&self) -> String {
        format!(
            "{} {} {}",
            self.algorithm.code(),
            self.fingerprint_type,
            self.fingerprint
        )
    }

    #[must_use]
    pub fn advisories(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.algorithm == SshAlgorithm::Dsa {
            warnings.push("DSA host keys are deprecated by OpenSSH. Prefer Ed25519 or ECDSA keys.".to_string());
        }
        if self.fingerprint_type == 1 {
            warnings.push("SHA-1 fingerprints are weak. Publish a SHA-256 (type 2) fingerprint as well.".to_string());
        }
        warnings
    }
}

/// Validator for SSHFP records.
#[derive(Debug, Default, Clone, Copy)]
pub struct SshfpValidator;

impl RecordValidator for SshfpValidator {
    fn check(&self, record: &RecordInput, ctx: &ValidationContext<'_>) -> RecordOutcome {
        let name = ctx.hostname(&record.name, false)?;
        let parsed = SshfpContent::parse(&record.content)?;
        let mut warnings = parsed.advisories();
        warnings.push("SSHFP records are only trusted by SSH clients when the zone is signed with DNSSEC.".to_string());
        let ttl = ctx.ttl(record)?;
        let priority = zero_priority(record, "SSHFP")?;

        finish(parsed.to_content(), name, priority, ttl, warnings)
    }
}

#[cfg(test)]
#[path = "sshfp_tests.rs"]
mod sshfp_tests;
