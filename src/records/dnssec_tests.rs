// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Tests for DNSSEC algorithm helpers.

#[cfg(test)]
mod tests {
    use crate::records::dnssec::*;

    #[test]
    fn test_categories() {
        assert_eq!(AlgorithmCategory::of(13), AlgorithmCategory::MustImplement);
        assert_eq!(AlgorithmCategory::of(15), AlgorithmCategory::Recommended);
        assert_eq!(AlgorithmCategory::of(14), AlgorithmCategory::Optional);
        assert_eq!(AlgorithmCategory::of(5), AlgorithmCategory::NotRecommended);
        assert_eq!(AlgorithmCategory::of(1), AlgorithmCategory::Deprecated);
        assert_eq!(AlgorithmCategory::of(2), AlgorithmCategory::MustNot);
        assert_eq!(AlgorithmCategory::of(200), AlgorithmCategory::Unassigned);
    }

    #[test]
    fn test_advisories() {
        assert!(algorithm_advisory(8).is_none());
        assert!(algorithm_advisory(5).unwrap().contains("NOT RECOMMENDED"));
        assert!(algorithm_advisory(1).unwrap().contains("DEPRECATED"));
        assert!(algorithm_advisory(15).unwrap().contains("ED25519"));
    }

    #[test]
    fn test_rsa_modulus_bits() {
        // 1-byte exponent length, exponent 0x010001, 128-byte modulus with top bit set
        let mut key = vec![3, 1, 0, 1];
        key.push(0x80);
        key.extend(std::iter::repeat_n(0xff, 127));
        assert_eq!(rsa_modulus_bits(&key), Some(1024));
        assert!(rsa_key_size_advisory(8, &key).unwrap().contains("1024 bits"));
        assert!(rsa_key_size_advisory(13, &key).is_none());

        assert_eq!(rsa_modulus_bits(&[]), None);
        assert_eq!(rsa_modulus_bits(&[5, 1, 2]), None);
    }
}
