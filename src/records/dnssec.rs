// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! DNSSEC algorithm helpers shared by the DS, DNSKEY and RRSIG families.

use crate::constants::{
    ALGORITHMS_DEPRECATED, ALGORITHMS_MUST_IMPLEMENT, ALGORITHMS_MUST_NOT,
    ALGORITHMS_NOT_RECOMMENDED, ALGORITHMS_OPTIONAL, ALGORITHMS_RECOMMENDED, MIN_RSA_KEY_BITS,
    RSA_ALGORITHMS,
};

/// RFC 8624 implementation category of a DNSSEC signing algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AlgorithmCategory {
    MustImplement,
    Recommended,
    Optional,
    NotRecommended,
    Deprecated,
    MustNot,
    Unassigned,
}

impl AlgorithmCategory {
    pub(crate) fn of(algorithm: u8) -> Self {
        if ALGORITHMS_MUST_IMPLEMENT.contains(&algorithm) {
            Self::MustImplement
        } else if ALGORITHMS_RECOMMENDED.contains(&algorithm) {
            Self::Recommended
        } else if ALGORITHMS_OPTIONAL.contains(&algorithm) {
            Self::Optional
        } else if ALGORITHMS_NOT_RECOMMENDED.contains(&algorithm) {
            Self::NotRecommended
        } else if ALGORITHMS_DEPRECATED.contains(&algorithm) {
            Self::Deprecated
        } else if ALGORITHMS_MUST_NOT.contains(&algorithm) {
            Self::MustNot
        } else {
            Self::Unassigned
        }
    }
}

/// Mnemonic of a DNSSEC algorithm number.
pub(crate) fn algorithm_name(algorithm: u8) -> &'static str {
    match algorithm {
        1 => "RSAMD5",
        3 => "DSA",
        5 => "RSASHA1",
        6 => "DSA-NSEC3-SHA1",
        7 => "RSASHA1-NSEC3-SHA1",
        8 => "RSASHA256",
        10 => "RSASHA512",
        12 => "ECC-GOST",
        13 => "ECDSAP256SHA256",
        14 => "ECDSAP384SHA384",
        15 => "ED25519",
        16 => "ED448",
        _ => "reserved",
    }
}

/// The RFC 8624 advisory for an algorithm, if any.
///
/// The two MUST-implement algorithms carry no warning.
pub(crate) fn algorithm_advisory(algorithm: u8) -> Option<String> {
    let name = algorithm_name(algorithm);
    match AlgorithmCategory::of(algorithm) {
        AlgorithmCategory::MustImplement => None,
        AlgorithmCategory::Recommended => Some(format!(
            "Algorithm {algorithm} ({name}) is recommended for use according to RFC 8624."
        )),
        AlgorithmCategory::Optional => Some(format!(
            "Algorithm {algorithm} ({name}) is optional for implementation according to RFC 8624."
        )),
        AlgorithmCategory::NotRecommended => Some(format!(
            "Algorithm {algorithm} ({name}) is NOT RECOMMENDED for use according to RFC 8624. Consider using ECDSAP256SHA256 (13) or ED25519 (15) instead."
        )),
        AlgorithmCategory::Deprecated => Some(format!(
            "Algorithm {algorithm} ({name}) is DEPRECATED according to RFC 8624. Do not use this algorithm for new deployments."
        )),
        AlgorithmCategory::MustNot => Some(format!(
            "Algorithm {algorithm} MUST NOT be implemented according to RFC 8624. This value should not be used."
        )),
        AlgorithmCategory::Unassigned => Some(format!(
            "Algorithm {algorithm} is not assigned by IANA for DNSSEC."
        )),
    }
}

/// Modulus size in bits of an RFC 3110 RSA public key.
pub(crate) fn rsa_modulus_bits(key: &[u8]) -> Option<usize> {
    let (&first, rest) = key.split_first()?;
    let (exponent_len, rest) = if first == 0 {
        let (len, rest) = rest.split_at_checked(2)?;
        (usize::from(u16::from_be_bytes([len[0], len[1]])), rest)
    } else {
        (usize::from(first), rest)
    };
    let modulus = rest.get(exponent_len..)?;
    let leading_zeros = modulus.iter().take_while(|b| **b == 0).count();
    let modulus = &modulus[leading_zeros..];
    let (&top, _) = modulus.split_first()?;
    Some(modulus.len() * 8 - top.leading_zeros() as usize)
}

/// Warn about RSA keys shorter than the recommended minimum.
pub(crate) fn rsa_key_size_advisory(algorithm: u8, key: &[u8]) -> Option<String> {
    if !RSA_ALGORITHMS.contains(&algorithm) {
        return None;
    }
    let bits = rsa_modulus_bits(key)?;
    (bits < MIN_RSA_KEY_BITS).then(|| {
        format!(
            "RSA key size of {bits} bits is below the recommended minimum of {MIN_RSA_KEY_BITS} bits."
        )
    })
}

#[cfg(test)]
#[path = "dnssec_tests.rs"]
mod dnssec_tests;
