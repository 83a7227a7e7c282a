// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! IPSECKEY record validation (RFC 4025, RFC 8005, RFC 9373).
//!
//! Content is `precedence gateway-type algorithm gateway public-key`. The public key may
//! be omitted when the algorithm is 0.

use std::net::IpAddr;

use crate::constants::MIN_RSA_KEY_BITS;
use crate::primitives::encoding::decode_base64;
use crate::primitives::hostname::HostnameValidator;
use crate::primitives::ip::{parse_ipv4, parse_ipv6};
use crate::primitives::numeric::parse_u8;
use crate::primitives::text::check_printable;
use crate::record::RecordInput;
use crate::records::dnssec::rsa_modulus_bits;
use crate::records::{finish, zero_priority, RecordOutcome, RecordValidator, ValidationContext};
use crate::validation_errors::ValidationError;

/// Where the IPsec gateway is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gateway {
    None,
    Address(IpAddr),
    Domain(String),
}

/// IPSECKEY public key algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IpseckeyAlgorithm {
    NoKey,
    Dsa,
    Rsa,
    Ecdsa,
    EdDsa,
}

impl IpseckeyAlgorithm {
    fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::NoKey),
            1 => Some(Self::Dsa),
            2 => Some(Self::Rsa),
            3 => Some(Self::Ecdsa),
            4 => Some(Self::EdDsa),
            _ => None,
        }
    }
}

/// Parsed IPSECKEY content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IpseckeyContent {
    pub precedence: u8,
    pub gateway: Gateway,
    pub algorithm: IpseckeyAlgorithm,
    /// Decoded key, empty when the algorithm is 0
    pub public_key: Vec<u8>,
}

impl IpseckeyContent {
    /// Parse IPSECKEY content.
    ///
    /// # Errors
    ///
    /// Returns the first field violation.
    pub fn parse(content: &str, hostnames: &HostnameValidator) -> Result<Self, ValidationError> {
        let fields: Vec<&str> = content.split_whitespace().collect();
        if fields.len() < 4 {
            return Err(ValidationError::structural(
                "IPSECKEY record must contain precedence, gateway type, algorithm, gateway and public key.",
            ));
        }

        let precedence = parse_u8(fields[0]).ok_or_else(|| {
            ValidationError::range("IPSECKEY precedence must be a number between 0 and 255.")
        })?;
        let gateway_type = parse_u8(fields[1]).filter(|t| *t <= 3).ok_or_else(|| {
            ValidationError::invalid_choice(
                "IPSECKEY gateway type must be 0 (none), 1 (IPv4), 2 (IPv6) or 3 (domain name).",
            )
        })?;
        let algorithm = parse_u8(fields[2])
            .and_then(IpseckeyAlgorithm::from_code)
            .ok_or_else(|| {
                ValidationError::invalid_choice(
                    "IPSECKEY algorithm must be 0 (no key), 1 (DSA), 2 (RSA), 3 (ECDSA) or 4 (EdDSA).",
                )
            })?;

        let raw_gateway = fields[3];
        let gateway = match gateway_type {
            0 if raw_gateway == "." => Gateway::None,
            0 => {
                return Err(ValidationError::cross_field(
                    "IPSECKEY gateway must be \".\" when the gateway type is 0.",
                ))
            }
            1 => Gateway::Address(IpAddr::V4(parse_ipv4(raw_gateway).map_err(|_| {
                ValidationError::cross_field(
                    "IPSECKEY gateway must be a valid IPv4 address for gateway type 1.",
                )
            })?)),
            2 => Gateway::Address(IpAddr::V6(parse_ipv6(raw_gateway, false).map_err(|_| {
                ValidationError::cross_field(
                    "IPSECKEY gateway must be a valid IPv6 address for gateway type 2.",
                )
            })?)),
            _ if hostnames.is_valid(raw_gateway, false) => {
                Gateway::Domain(raw_gateway.trim_end_matches('.').to_string())
            }
            _ => {
                return Err(ValidationError::hostname(
                    "IPSECKEY gateway must be a valid domain name for gateway type 3.",
                ))
            }
        };

        let key_text: String = fields[4..].concat();
        let public_key = if algorithm == IpseckeyAlgorithm::NoKey {
            Vec::new()
        } else if key_text.is_empty() {
            return Err(ValidationError::structural(
                "IPSECKEY public key is required when the algorithm is not 0.",
            ));
        } else {
            decode_base64(&key_text).ok_or_else(|| {
                ValidationError::encoding("IPSECKEY public key must be valid Base64 data.")
            })?
        };

        Ok(Self {
            precedence,
            gateway,
            algorithm,
            public_key,
        })
    }

    /// Key and gateway advice.
    #[must_use]
    pub fn advisories(&self, key_present: bool) -> Vec<String> {
        let mut warnings = vec![
            "IPSECKEY records (RFC 4025) should be protected with DNSSEC; unsigned keys can be spoofed.".to_string(),
        ];
        if matches!(self.gateway, Gateway::Domain(_)) {
            warnings.push(
                "Domain name gateways need an extra lookup. Sign the gateway's address records with DNSSEC as well.".to_string(),
            );
        }
        match self.algorithm {
            IpseckeyAlgorithm::NoKey if key_present => warnings.push(
                "The algorithm is 0, so the public key field is ignored.".to_string(),
            ),
            IpseckeyAlgorithm::NoKey => warnings.push(
                "The algorithm is 0: no public key is published for this gateway.".to_string(),
            ),
            IpseckeyAlgorithm::Dsa => warnings.push(
                "DSA keys are deprecated for IPsec. Prefer ECDSA (3) or EdDSA (4).".to_string(),
            ),
            IpseckeyAlgorithm::Rsa => {
                warnings.push("RSA keys must be encoded as described in RFC 3110.".to_string());
                if let Some(bits) = rsa_modulus_bits(&self.public_key) {
                    if bits < MIN_RSA_KEY_BITS {
                        warnings.push(format!(
                            "RSA key size of {bits} bits is below the recommended minimum of {MIN_RSA_KEY_BITS} bits."
                        ));
                    }
                }
            }
            IpseckeyAlgorithm::Ecdsa | IpseckeyAlgorithm::EdDsa => {}
        }
        warnings
    }
}

/// Validator for IPSECKEY records.
#[derive(Debug, Default, Clone, Copy)]
pub struct IpseckeyValidator;

impl RecordValidator for IpseckeyValidator {
    fn check(&self, record: &RecordInput, ctx: &ValidationContext<'_>) -> RecordOutcome {
        let name = ctx.hostname(&record.name, true)?;
        check_printable(&record.content)?;
        let parsed = IpseckeyContent::parse(&record.content, ctx.hostnames)?;
        let key_present = record.content.split_whitespace().count() > 4;
        let warnings = parsed.advisories(key_present);

        let ttl = ctx.ttl(record)?;
        let priority = zero_priority(record, "IPSECKEY")?;

        finish(
            record.content.split_whitespace().collect::<Vec<_>>().join(" "),
            name,
            priority,
            ttl,
            warnings,
        )
    }
}

#[cfg(test)]
#[path = "ipseckey_tests.rs"]
mod ipseckey_tests;
