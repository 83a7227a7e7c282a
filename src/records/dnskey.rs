// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Public key records: DNSKEY and CDNSKEY (RFC 4034, RFC 7344), KEY (RFC 2535) and RKEY.
//!
//! Every type carries `flags protocol algorithm public-key`. The key is base64 and may be
//! split by whitespace; the content is returned with the key exactly as written.

use crate::constants::{
    DNSKEY_DELETE_SENTINEL, DNSKEY_FLAGS_KSK, DNSKEY_FLAGS_ZSK, DNSKEY_PROTOCOL, MAX_U16_FIELD,
};
use crate::primitives::encoding::decode_base64;
use crate::primitives::hostname::is_zone_apex;
use crate::primitives::numeric::parse_in_range;
use crate::primitives::text::check_printable;
use crate::record::RecordInput;
use crate::registry::RecordType;
use crate::records::dnssec::{algorithm_advisory, rsa_key_size_advisory};
use crate::records::{finish, zero_priority, RecordOutcome, RecordValidator, ValidationContext};
use crate::validation_errors::ValidationError;

/// Fields common to every key record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyFields<'c> {
    /// Flags field
    pub flags: u64,
    /// Protocol field
    pub protocol: u64,
    /// Algorithm field
    pub algorithm: u64,
    /// Public key text as written
    pub key_text: &'c str,
}

impl<'c> KeyFields<'c> {
    /// Split content into its four fields and parse the numeric ones with `limits`.
    ///
    /// # Arguments
    ///
    /// * `content` - Record content
    /// * `type_name` - Record type, used in messages
    /// * `limits` - Inclusive maximum for flags, protocol and algorithm
    ///
    /// # Errors
    ///
    /// Returns a structural error for missing fields and a range error naming the field
    /// that is out of range.
    pub fn split(
        content: &'c str,
        type_name: &str,
        limits: (u64, u64, u64),
    ) -> Result<Self, ValidationError> {
        let missing = || {
            ValidationError::structural(format!(
                "{type_name} record must contain flags, protocol, algorithm and public key."
            ))
        };
        let content = content.trim();
        let mut rest = content;
        let mut numbers = [0u64; 3];
        let names = ["flags", "protocol", "algorithm"];
        let maxima = [limits.0, limits.1, limits.2];

        for index in 0..3 {
            let (field, tail) = rest.split_once(char::is_whitespace).ok_or_else(missing)?;
            numbers[index] = parse_in_range(field, 0, maxima[index]).ok_or_else(|| {
                ValidationError::range(format!(
                    "{type_name} {} must be a number between 0 and {}.",
                    names[index], maxima[index]
                ))
            })?;
            rest = tail.trim_start();
        }
        if rest.is_empty() {
            return Err(missing());
        }

        Ok(Self {
            flags: numbers[0],
            protocol: numbers[1],
            algorithm: numbers[2],
            key_text: rest,
        })
    }

    fn to_content(&self) -> String {
        format!(
            "{} {} {} {}",
            self.flags, self.protocol, self.algorithm, self.key_text
        )
    }

    fn algorithm_u8(&self) -> u8 {
        u8::try_from(self.algorithm).unwrap_or(u8::MAX)
    }
}

fn decode_key(key_text: &str, type_name: &str) -> Result<Vec<u8>, ValidationError> {
    decode_base64(key_text).ok_or_else(|| {
        ValidationError::encoding(format!(
            "{type_name} public key must be valid Base64 data."
        ))
    })
}

/// Validator for DNSKEY and CDNSKEY records.
#[derive(Debug, Clone, Copy)]
pub struct DnskeyValidator {
    record_type: RecordType,
}

impl DnskeyValidator {
    /// DNSKEY
    pub const DNSKEY: Self = Self {
        record_type: RecordType::Dnskey,
    };
    /// CDNSKEY
    pub const CDNSKEY: Self = Self {
        record_type: RecordType::Cdnskey,
    };

    /// The record type this instance validates.
    #[must_use]
    pub fn record_type(&self) -> RecordType {
        self.record_type
    }

    fn is_cdnskey(&self) -> bool {
        self.record_type == RecordType::Cdnskey
    }

    fn content(&self, content: &str) -> Result<(String, Vec<String>), ValidationError> {
        let t = self.record_type.as_str();
        let key = KeyFields::split(content, t, (MAX_U16_FIELD, 255, 255))?;

        if key.flags != 0 && key.flags != DNSKEY_FLAGS_ZSK && key.flags != DNSKEY_FLAGS_KSK {
            return Err(ValidationError::invalid_choice(format!(
                "{t} flags must be 0, 256 (ZSK) or 257 (KSK)."
            )));
        }
        if key.protocol != DNSKEY_PROTOCOL {
            return Err(ValidationError::invalid_choice(format!(
                "{t} protocol must be 3."
            )));
        }
        if !(1..=16).contains(&key.algorithm) {
            return Err(ValidationError::invalid_choice(format!(
                "{t} algorithm must be a number between 1 and 16."
            )));
        }
        let bytes = decode_key(key.key_text, t)?;

        let algorithm = key.algorithm_u8();
        let mut warnings: Vec<String> = algorithm_advisory(algorithm).into_iter().collect();
        warnings.extend(rsa_key_size_advisory(algorithm, &bytes));
        if key.flags == 0 {
            warnings.push(format!(
                "{t} flags 0 marks a key that is not a zone key and cannot validate zone data."
            ));
        }
        Ok((key.to_content(), warnings))
    }
}

impl RecordValidator for DnskeyValidator {
    fn check(&self, record: &RecordInput, ctx: &ValidationContext<'_>) -> RecordOutcome {
        let name = ctx.hostname(&record.name, true)?;
        check_printable(&record.content)?;

        let (content, mut warnings) =
            if self.is_cdnskey() && record.content.trim() == DNSKEY_DELETE_SENTINEL {
                (
                    DNSKEY_DELETE_SENTINEL.to_string(),
                    vec![
                        "This is a CDNSKEY deletion record as defined in RFC 8078. It signals that the DS records should be removed from the parent.".to_string(),
                    ],
                )
            } else {
                self.content(&record.content)?
            };

        let off_apex = record
            .zone
            .as_deref()
            .is_some_and(|zone| !is_zone_apex(&name, zone));
        if off_apex {
            warnings.push(format!(
                "{} records are normally placed at the zone apex.",
                self.record_type
            ));
        }
        if self.is_cdnskey() {
            warnings.push(
                "CDNSKEY records must be accompanied by matching CDS records as recommended by RFC 7344.".to_string(),
            );
        }

        let ttl = ctx.ttl(record)?;
        let priority = zero_priority(record, self.record_type.as_str())?;

        finish(content, name, priority, ttl, warnings)
    }
}

/// Validator for KEY records.
///
/// Accepts the full RFC 2535 value ranges and steers DNSSEC users to DNSKEY.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeyValidator;

impl RecordValidator for KeyValidator {
    fn check(&self, record: &RecordInput, ctx: &ValidationContext<'_>) -> RecordOutcome {
        let name = ctx.hostname(&record.name, true)?;
        check_printable(&record.content)?;

        let key = KeyFields::split(&record.content, "KEY", (MAX_U16_FIELD, 255, 255))?;
        decode_key(key.key_text, "KEY")?;

        let mut warnings = vec![
            "KEY records are superseded by DNSKEY for DNSSEC (RFC 4034). Use them only for SIG(0) or other legacy applications.".to_string(),
        ];
        if key.flags == DNSKEY_FLAGS_KSK || key.flags == DNSKEY_FLAGS_ZSK {
            warnings.push(format!(
                "KEY record with flags={} describes a zone key. DNSKEY records should be used for zone keys instead.",
                key.flags
            ));
        }
        if key.protocol != DNSKEY_PROTOCOL {
            warnings.push(format!(
                "Unusual protocol value {}. Protocol 3 (DNSSEC) is the only value in common use.",
                key.protocol
            ));
        }
        if key.algorithm == 1 {
            warnings.push(
                "Algorithm 1 (RSA/MD5) is cryptographically weak and should not be used.".to_string(),
            );
        }

        let ttl = ctx.ttl(record)?;
        let priority = zero_priority(record, "KEY")?;

        finish(key.to_content(), name, priority, ttl, warnings)
    }
}

/// Validator for RKEY records.
///
/// RKEY never left draft status, so most findings are warnings. Only the field layout,
/// numeric fields and a non-empty key are enforced.
#[derive(Debug, Default, Clone, Copy)]
pub struct RkeyValidator;

impl RecordValidator for RkeyValidator {
    fn check(&self, record: &RecordInput, ctx: &ValidationContext<'_>) -> RecordOutcome {
        let name = ctx.hostname(&record.name, true)?;
        check_printable(&record.content)?;
        if record.content.trim().is_empty() {
            return Err(ValidationError::structural("RKEY record content cannot be empty.").into());
        }

        let key = KeyFields::split(&record.content, "RKEY", (MAX_U16_FIELD, 255, 16))?;

        let mut warnings = Vec::new();
        if key.flags != 0 && key.flags != DNSKEY_FLAGS_ZSK && key.flags != DNSKEY_FLAGS_KSK {
            warnings.push(
                "Unusual flags value. Common values are 0, 256 (Zone Key), or 257 (Zone Key + SEP).".to_string(),
            );
        }
        if key.protocol != DNSKEY_PROTOCOL {
            warnings.push(
                "Protocol field should be 3 for compliance with standards based on DNSKEY format.".to_string(),
            );
        }
        warnings.extend(algorithm_advisory(key.algorithm_u8()));
        if decode_key(key.key_text, "RKEY").is_err() {
            warnings.push("Public key data should be Base64 encoded according to RFC 4034.".to_string());
        }
        warnings.push(
            "RKEY records were never formally standardized as an RFC, only proposed in draft-reid-dnsext-rkey-00.".to_string(),
        );

        let ttl = ctx.ttl(record)?;
        let priority = zero_priority(record, "RKEY")?;

        finish(key.to_content(), name, priority, ttl, warnings)
    }
}

#[cfg(test)]
#[path = "dnskey_tests.rs"]
mod dnskey_tests;
