// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! OPENPGPKEY record validation (RFC 7929).

use sha2::{Digest, Sha256};

use crate::primitives::encoding::decode_base64;
use crate::record::RecordInput;
use crate::records::{finish, zero_priority, RecordOutcome, RecordValidator, ValidationContext};
use crate::validation_errors::ValidationError;

/// Hex length of the truncated SHA-256 local-part hash (28 octets).
const LOCAL_PART_HASH_HEX_LENGTH: usize = 56;

/// First owner label for a mailbox local part: SHA-256 truncated to 28 octets, in hex.
///
/// `hugh` becomes `c93f1e400f26708f98cb19d936620da35eec8f72e57f9eec01c1afd6`.
#[must_use]
pub fn local_part_label(local_part: &str) -> String {
    Sha256::digest(local_part.as_bytes())
        .iter()
        .take(LOCAL_PART_HASH_HEX_LENGTH / 2)
        .map(|b| format!("{b:02x}"))
        .collect()
}

/// Owner name advice: `<sha256-28>._openpgpkey.<domain>`.
fn owner_advisories(name: &str) -> Vec<String> {
    let labels: Vec<&str> = name.split('.').collect();
    match labels.iter().position(|l| l.eq_ignore_ascii_case("_openpgpkey")) {
        Some(1)
            if labels[0].len() == LOCAL_PART_HASH_HEX_LENGTH
                && labels[0].bytes().all(|b| b.is_ascii_hexdigit()) =>
        {
            Vec::new()
        }
        Some(_) => vec![format!(
            "Owner name does not follow the standard OPENPGPKEY format <{LOCAL_PART_HASH_HEX_LENGTH} hex digits>._openpgpkey.<domain> (RFC 7929)."
        )],
        None => vec![
            "Owner name has no _openpgpkey label. Mail clients only look for keys under <hash>._openpgpkey.<domain>.".to_string(),
        ],
    }
}

/// Validator for OPENPGPKEY records: base64 transferable public key.
#[derive(Debug, Default, Clone, Copy)]
pub struct OpenpgpkeyValidator;

impl RecordValidator for OpenpgpkeyValidator {
    fn check(&self, record: &RecordInput, ctx: &ValidationContext<'_>) -> RecordOutcome {
        let name = ctx.hostname(&record.name, true)?;
        let content = record.content.trim();
        if content.is_empty() {
            return Err(ValidationError::structural("OPENPGPKEY record content cannot be empty.").into());
        }
        let key = decode_base64(content).ok_or_else(|| {
            ValidationError::encoding("OPENPGPKEY record must contain valid base64-encoded key data.")
        })?;

        let mut warnings = owner_advisories(&name);
        if key.first().is_none_or(|tag| tag & 0x80 == 0) {
            warnings.push(
                "Key data does not start with an OpenPGP packet header. Publish a transferable public key (RFC 4880).".to_string(),
            );
        }
        warnings.push(
            "OPENPGPKEY records REQUIRE DNSSEC for any security benefit. Sign the zone before publishing keys.".to_string(),
        );

        let ttl = ctx.ttl(record)?;
        let priority = zero_priority(record, "OPENPGPKEY")?;

        finish(content.split_whitespace().collect(), name, priority, ttl, warnings)
    }
}

#[cfg(test)]
#[path = "openpgpkey_tests.rs"]
mod openpgpkey_tests;
