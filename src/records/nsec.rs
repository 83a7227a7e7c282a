// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Authenticated denial records: NSEC (RFC 4034), NSEC3 and NSEC3PARAM (RFC 5155).
//!
//! NSEC3 parameter advice follows RFC 9276: zero extra iterations and no salt.

use std::collections::HashSet;

use crate::constants::{MAX_NSEC3_ITERATIONS, NSEC3_SALT_WARN_LENGTH};
use crate::primitives::encoding::is_hex;
use crate::primitives::numeric::{parse_in_range, parse_unsigned};
use crate::primitives::text::check_printable;
use crate::record::RecordInput;
use crate::records::{finish, zero_priority, RecordOutcome, RecordValidator, ValidationContext};
use crate::registry::is_known_type_mnemonic;
use crate::validation_errors::ValidationError;

/// Type mnemonics named in a type bitmap, uppercase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeBitmap {
    types: HashSet<String>,
}

impl TypeBitmap {
    /// Parse a list of type mnemonics.
    ///
    /// Accepts known mnemonics, RFC 3597 `TYPEnnn`, bare type numbers and mnemonics with a
    /// trailing `(n)` annotation.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first unrecognized type.
    pub fn parse<'a>(
        tokens: impl IntoIterator<Item = &'a str>,
        type_name: &str,
    ) -> Result<Self, ValidationError> {
        let mut types = HashSet::new();
        for token in tokens {
            let mnemonic = token.split_once('(').map_or(token, |(name, _)| name).trim();
            if parse_unsigned(mnemonic).is_some() {
                types.insert(format!("TYPE{mnemonic}"));
                continue;
            }
            if !is_known_type_mnemonic(mnemonic) {
                return Err(ValidationError::invalid_choice(format!(
                    "{type_name} record contains an invalid record type: {token}"
                )));
            }
            types.insert(mnemonic.to_ascii_uppercase());
        }
        Ok(Self { types })
    }

    /// Returns true if `mnemonic` is present.
    #[must_use]
    pub fn contains(&self, mnemonic: &str) -> bool {
        self.types.contains(mnemonic)
    }

    /// Returns true if no type is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// DNSSEC consistency advice for a bitmap.
    #[must_use]
    pub fn advisories(&self, type_name: &str) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.is_empty() {
            return warnings;
        }
        if !self.contains("RRSIG") {
            warnings.push(format!(
                "RRSIG type should typically be present in {type_name} type bit maps for DNSSEC-signed zones."
            ));
        }
        if self.contains("SOA") && self.contains("NS") {
            warnings.push(format!(
                "This {type_name} record contains both SOA and NS types, indicating it is for a zone apex."
            ));
            if type_name == "NSEC3" && self.contains("DNSKEY") && !self.contains("NSEC3PARAM") {
                warnings.push(
                    "For a zone apex using NSEC3, the NSEC3PARAM type should typically be present along with DNSKEY.".to_string(),
                );
            }
        }
        warnings
    }
}

fn is_base32hex(s: &str) -> bool {
    !s.is_empty()
        && s.bytes()
            .all(|b| b.is_ascii_digit() || matches!(b.to_ascii_uppercase(), b'A'..=b'V'))
}

/// Hash parameters shared by NSEC3 and NSEC3PARAM.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nsec3Params {
    /// Hash algorithm, always 1
    pub algorithm: u8,
    /// Flags octet
    pub flags: u8,
    /// Extra hash iterations
    pub iterations: u16,
    /// Hex salt, `None` for `-`
    pub salt: Option<String>,
}

impl Nsec3Params {
    fn parse(
        fields: [&str; 4],
        type_name: &str,
        max_flags: u64,
    ) -> Result<Self, ValidationError> {
        let [algorithm, flags, iterations, salt] = fields;

        if parse_in_range(algorithm, 1, 1).is_none() {
            return Err(ValidationError::invalid_choice(format!(
                "{type_name} hash algorithm must be 1 (SHA-1)."
            )));
        }
        let flags = parse_in_range(flags, 0, max_flags)
            .and_then(|f| u8::try_from(f).ok())
            .ok_or_else(|| {
                let allowed = if max_flags == 1 {
                    "0 or 1".to_string()
                } else {
                    format!("between 0 and {max_flags}")
                };
                ValidationError::range(format!("{type_name} flags must be {allowed}."))
            })?;
        let iterations = parse_in_range(iterations, 0, MAX_NSEC3_ITERATIONS)
            .and_then(|i| u16::try_from(i).ok())
            .ok_or_else(|| {
                ValidationError::range(format!(
                    "{type_name} iterations must be between 0 and {MAX_NSEC3_ITERATIONS}."
                ))
            })?;
        let salt = match salt {
            "-" => None,
            hex if is_hex(hex) => Some(hex.to_string()),
            _ => {
                return Err(ValidationError::encoding(format!(
                    "{type_name} salt must be - (for empty) or a hexadecimal value."
                )))
            }
        };

        Ok(Self {
            algorithm: 1,
            flags,
            iterations,
            salt,
        })
    }

    /// RFC 9276 advice on iterations and salt.
    #[must_use]
    pub fn advisories(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.iterations > 0 {
            warnings.push(
                "RFC 9276 recommends using 0 iterations. Additional iterations add computational cost without enhancing security.".to_string(),
            );
            if self.iterations > 100 {
                warnings.push(
                    "High iteration values (>100) may cause validating resolvers to reject your zones. RFC 9276 STRONGLY recommends using 0 iterations.".to_string(),
                );
            } else if self.iterations > 10 {
                warnings.push(
                    "Iteration values >10 create unnecessary computational load without security benefits. RFC 9276 recommends using 0 iterations.".to_string(),
                );
            }
        }
        if let Some(salt) = &self.salt {
            warnings.push(
                "RFC 9276 recommends NOT using a salt (indicated by \"-\") to simplify operation without reducing security.".to_string(),
            );
            if salt.len() > NSEC3_SALT_WARN_LENGTH {
                warnings.push(
                    "Long salts provide no additional security benefit. Consider using a shorter salt or no salt (-).".to_string(),
                );
            }
        }
        warnings
    }
}

fn non_empty<'c>(content: &'c str, type_name: &str) -> Result<&'c str, ValidationError> {
    let content = content.trim();
    if content.is_empty() {
        return Err(ValidationError::structural(format!(
            "{type_name} record content cannot be empty."
        )));
    }
    check_printable(content)?;
    Ok(content)
}

/// Validator for NSEC records: `next-domain [type ...]`.
#[derive(Debug, Default, Clone, Copy)]
pub struct NsecValidator;

impl RecordValidator for NsecValidator {
    fn check(&self, record: &RecordInput, ctx: &ValidationContext<'_>) -> RecordOutcome {
        let name = ctx.hostname(&record.name, true)?;
        let content = non_empty(&record.content, "NSEC")?;

        let mut fields = content.split_whitespace();
        let next = fields.next().unwrap_or_default();
        if !ctx.hostnames.is_valid(next, false) {
            return Err(ValidationError::hostname(
                "NSEC record must begin with a valid next domain name.",
            )
            .into());
        }
        let bitmap = TypeBitmap::parse(fields, "NSEC")?;

        let mut warnings = bitmap.advisories("NSEC");
        warnings.push(
            "NSEC records are normally generated by the signer. Manual entries are overwritten when the zone is re-signed.".to_string(),
        );

        let ttl = ctx.ttl(record)?;
        let priority = zero_priority(record, "NSEC")?;

        finish(content.to_string(), name, priority, ttl, warnings)
    }
}

/// Validator for NSEC3 records:
/// `algorithm flags iterations salt next-hashed-owner [type ...]`.
#[derive(Debug, Default, Clone, Copy)]
pub struct Nsec3Validator;

impl RecordValidator for Nsec3Validator {
    fn check(&self, record: &RecordInput, ctx: &ValidationContext<'_>) -> RecordOutcome {
        let name = ctx.hostname(&record.name, true)?;
        let mut warnings = Vec::new();
        let owner_hash = name.split('.').next().unwrap_or_default();
        if !name.contains('.') || !is_base32hex(owner_hash) {
            warnings.push(
                "NSEC3 record owner names should be a Base32hex encoded hash followed by the zone name (e.g., \"B4Q3JBMLEL2C7EMPGKUDAMPIP4DI4C2L.example.com\").".to_string(),
            );
        }

        let content = non_empty(&record.content, "NSEC3")?;
        let fields: Vec<&str> = content.split_whitespace().collect();
        let [algorithm, flags, iterations, salt, next_hash, types @ ..] = fields.as_slice() else {
            return Err(ValidationError::structural(
                "NSEC3 record must contain at least hash algorithm, flags, iterations, salt, and next hashed owner name.",
            )
            .into());
        };

        let params = Nsec3Params::parse([*algorithm, *flags, *iterations, *salt], "NSEC3", 1)?;
        if !is_base32hex(next_hash) {
            return Err(ValidationError::encoding(
                "NSEC3 next hashed owner name must be a valid Base32hex encoded value (using characters 0-9 and A-V).",
            )
            .into());
        }
        let bitmap = TypeBitmap::parse(types.iter().copied(), "NSEC3")?;

        if params.flags == 1 {
            warnings.push(
                "Flag value 1 indicates Opt-Out is in use. RFC 9276 recommends Opt-Out only for very large, sparsely signed zones.".to_string(),
            );
        }
        warnings.extend(params.advisories());
        if bitmap.is_empty() {
            warnings.push(
                "Type bit maps should be present to indicate which RR types exist at the original owner name.".to_string(),
            );
        }
        warnings.extend(bitmap.advisories("NSEC3"));
        warnings.push(
            "NSEC3 records require a corresponding NSEC3PARAM record at the zone apex.".to_string(),
        );

        let ttl = ctx.ttl(record)?;
        let priority = zero_priority(record, "NSEC3")?;

        finish(content.to_string(), name, priority, ttl, warnings)
    }
}

/// Validator for NSEC3PARAM records: `algorithm flags iterations salt`.
#[derive(Debug, Default, Clone, Copy)]
pub struct Nsec3ParamValidator;

impl RecordValidator for Nsec3ParamValidator {
    fn check(&self, record: &RecordInput, ctx: &ValidationContext<'_>) -> RecordOutcome {
        let name = ctx.hostname(&record.name, true)?;
        let content = non_empty(&record.content, "NSEC3PARAM")?;
        let fields: Vec<&str> = content.split_whitespace().collect();
        let Ok(fields) = <[&str; 4]>::try_from(fields) else {
            return Err(ValidationError::structural(
                "NSEC3PARAM record must contain exactly 4 fields: hash algorithm, flags, iterations and salt.",
            )
            .into());
        };

        let params = Nsec3Params::parse(fields, "NSEC3PARAM", 255)?;
        let mut warnings = params.advisories();
        if params.flags != 0 {
            warnings.push(
                "NSEC3PARAM flags should be 0. The Opt-Out flag only has meaning in NSEC3 records.".to_string(),
            );
        }

        let ttl = ctx.ttl(record)?;
        let priority = zero_priority(record, "NSEC3PARAM")?;

        finish(content.to_string(), name, priority, ttl, warnings)
    }
}

#[cfg(test)]
#[path = "nsec_tests.rs"]
mod nsec_tests;
