// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Tests for IP address checks.

#[cfg(test)]
mod tests {
    use crate::primitives::ip::*;
    use std::net::Ipv6Addr;

    #[test]
    fn test_ipv4() {
        assert!(validate_ipv4("192.0.2.1").is_valid());
        assert!(!validate_ipv4("256.0.0.1").is_valid());
        assert!(!validate_ipv4("2001:db8::1").is_valid());
        assert_eq!(
            validate_ipv4("nope").first_error().unwrap().to_string(),
            "This is not a valid IPv4 address."
        );
    }

    #[test]
    fn test_ipv6() {
        assert!(validate_ipv6("2001:db8::1", false).is_valid());
        assert!(validate_ipv6("2001:0DB8:0000::0001", false).is_valid());
        assert!(!validate_ipv6("192.0.2.1", false).is_valid());
        assert!(validate_ipv6("zz::1", false)
            .first_error()
            .unwrap()
            .to_string()
            .contains("valid IPv6"));
    }

    #[test]
    fn test_ipv6_canonical_form() {
        assert!(validate_ipv6("2001:db8::1", true).is_valid());
        let result = validate_ipv6("2001:0DB8:0000::0001", true);
        assert!(!result.is_valid());
        assert!(result.first_error().unwrap().to_string().contains("2001:db8::1"));
        assert!(!validate_ipv6("2001:db8:0:0:0:0:0:1", true).is_valid());
    }

    #[test]
    fn test_multiple_ips() {
        assert!(are_multiple_valid_ips("192.0.2.1, 2001:db8::1"));
        assert!(are_multiple_valid_ips("192.0.2.1"));
        assert!(!are_multiple_valid_ips("192.0.2.1, bogus"));
        assert!(!are_multiple_valid_ips(""));
    }

    #[test]
    fn test_networks() {
        assert!(parse_ipv4_network("192.0.2.0/24").is_some());
        assert!(parse_ipv4_network("192.0.2.1").is_some());
        assert!(parse_ipv4_network("192.0.2.0/33").is_none());
        assert!(parse_ipv4_network("999.0.0.1").is_none());
        assert!(parse_ipv6_network("2001:db8::/32").is_some());
        assert!(parse_ipv6_network("2001:db8::/129").is_none());
    }

    #[test]
    fn test_site_local() {
        assert!(is_ipv6_site_local(&"fec0::1".parse::<Ipv6Addr>().unwrap()));
        assert!(is_ipv6_site_local(&"feff::1".parse::<Ipv6Addr>().unwrap()));
        assert!(!is_ipv6_site_local(&"fe80::1".parse::<Ipv6Addr>().unwrap()));
    }
}
