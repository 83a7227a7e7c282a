// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Tests for TSIG and TKEY validation.

#[cfg(test)]
mod tests {
    use crate::config::HostnameConfig;
    use crate::primitives::hostname::HostnameValidator;
    use crate::record::RecordInput;
    use crate::records::test_support::{first_error, has_warning, run};
    use crate::records::tsig::*;

    fn tsig(content: &str) -> RecordInput {
        RecordInput::new("TSIG", "key.example.com", content).with_ttl(3600)
    }

    fn tkey(content: &str) -> RecordInput {
        RecordInput::new("TKEY", "key.example.com", content).with_ttl(3600)
    }

    #[test]
    fn test_algorithm_names() {
        let hostnames = HostnameValidator::new(&HostnameConfig::default());
        assert!(is_valid_algorithm_name("hmac-sha256.", &hostnames));
        assert!(is_valid_algorithm_name("HMAC-MD5.SIG-ALG.REG.INT.", &hostnames));
        assert!(is_valid_algorithm_name("gss-tsig.example.com.", &hostnames));
        assert!(!is_valid_algorithm_name("invalid-algorithm", &hostnames));
        assert!(!is_valid_algorithm_name("-invalid.algorithm.", &hostnames));
        assert!(!is_valid_algorithm_name(".", &hostnames));
    }

    #[test]
    fn test_valid_tsig() {
        for content in [
            "hmac-sha256. 1609459200 300 MTIzNDU2Nzg5MGFiY2RlZg== 12345 0 0",
            "hmac-sha256. 1609459200 300 MTIzNDU2Nzg5MGFiY2RlZg== 12345 0 10 MTIzNDU2Nzg5MA==",
            "hmac-md5.sig-alg.reg.int. 1609459200 300 MTIzNDU2Nzg5MGFiY2RlZg== 12345 0 0",
            "hmac-sha256. 1609459200 300 1234567890abcdef 12345 0 0",
        ] {
            let result = run(&TsigValidator, &tsig(content));
            assert_eq!(result.data().unwrap().content, content);
            assert!(has_warning(&result, "per transaction"));
        }
    }

    #[test]
    fn test_invalid_tsig() {
        for (content, expected) in [
            ("invalid-algorithm 1609459200 300 MTIzNDU2Nzg5MGFiY2RlZg== 12345 0 0", "algorithm name"),
            ("hmac-sha256. invalid 300 MTIzNDU2Nzg5MGFiY2RlZg== 12345 0 0", "timestamp"),
            ("hmac-sha256. 1609459200 invalid MTIzNDU2Nzg5MGFiY2RlZg== 12345 0 0", "fudge"),
            ("hmac-sha256. 1609459200 300 !@#$%^ 12345 0 0", "MAC"),
            ("hmac-sha256. 1609459200 300 MTIzNDU2Nzg5MGFiY2RlZg== 999999 0 0", "original ID"),
            ("hmac-sha256. 1609459200 300 MTIzNDU2Nzg5MGFiY2RlZg== 12345 24 0", "RCODE"),
            ("hmac-sha256. 1609459200 300 MTIzNDU2Nzg5MGFiY2RlZg== 12345 0 invalid", "other-len"),
            ("hmac-sha256. 1609459200 300 MTIzNDU2Nzg5MGFiY2RlZg== 12345 0 10 !@#$%^", "other-data"),
            ("hmac-sha256. 1609459200 300", "must contain at least"),
        ] {
            let result = run(&TsigValidator, &tsig(content));
            assert!(first_error(&result).contains(expected), "{content}");
        }
    }

    #[test]
    fn test_valid_tkey() {
        for content in [
            "hmac-sha256.example.com. 1609459200 1640995200 3 0 MTIzNDU2Nzg5MA==",
            "hmac-md5.example.com. 20210101000000 20211231235959 2 0 abcdef0123456789",
        ] {
            let result = run(&TkeyValidator, &tkey(content));
            assert_eq!(result.data().unwrap().content, content);
        }
    }

    #[test]
    fn test_invalid_tkey() {
        for (content, expected) in [
            ("-invalid.algorithm. 1609459200 1640995200 3 0 MTIzNDU2Nzg5MA==", "algorithm name"),
            ("hmac-sha256.example.com. invalid 1640995200 3 0 MTIzNDU2Nzg5MA==", "inception time"),
            ("hmac-sha256.example.com. 1609459200 invalid 3 0 MTIzNDU2Nzg5MA==", "expiration time"),
            ("hmac-sha256.example.com. 20211301000000 1640995200 3 0 MTIzNDU2Nzg5MA==", "inception time"),
            ("hmac-sha256.example.com. 1609459200 1640995200 6 0 MTIzNDU2Nzg5MA==", "mode must be"),
            ("hmac-sha256.example.com. 1609459200 1640995200 3 24 MTIzNDU2Nzg5MA==", "error must be"),
            ("hmac-sha256.example.com. 1609459200 1640995200 3 0 !@#$%^", "key data"),
            ("hmac-sha256.example.com. 1609459200 1640995200 3", "must contain"),
        ] {
            let result = run(&TkeyValidator, &tkey(content));
            assert!(first_error(&result).contains(expected), "{content}");
        }
    }

    #[test]
    fn test_tkey_priority() {
        let record = tkey("hmac-sha256. 1609459200 1640995200 3 0 MTIzNDU2Nzg5MA==").with_priority(1);
        assert!(first_error(&run(&TkeyValidator, &record)).contains("TKEY records must have priority value of 0"));
    }
}
