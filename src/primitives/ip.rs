// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! IPv4 and IPv6 literal checks.
//!
//! Address parsing is delegated to [`std::net`]; this module adds the messages callers
//! see, the optional RFC 5952 canonical-form rule, and CIDR network parsing used by
//! SPF and APL.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use crate::constants::{MAX_IPV4_PREFIX, MAX_IPV6_PREFIX};
use crate::primitives::numeric::parse_unsigned;
use crate::validation_errors::ValidationError;
use crate::validation_result::ValidationResult;

/// Parse an IPv4 address.
///
/// # Errors
///
/// Returns a structural error if `s` is not a dotted-quad IPv4 address.
pub fn parse_ipv4(s: &str) -> Result<Ipv4Addr, ValidationError> {
    s.parse::<Ipv4Addr>()
        .map_err(|_| ValidationError::structural("This is not a valid IPv4 address."))
}

/// Parse an IPv6 address, optionally requiring RFC 5952 canonical text.
///
/// The canonical form is lowercase, without leading zeros, with the longest run of
/// zero groups compressed to `::`. `std` renders addresses in exactly that form, so the
/// check compares the input with the rendered address.
///
/// # Errors
///
/// Returns a structural error if `s` is not an IPv6 address, or if `canonical` is set
/// and `s` is not in canonical form.
pub fn parse_ipv6(s: &str, canonical: bool) -> Result<Ipv6Addr, ValidationError> {
    let addr = s
        .parse::<Ipv6Addr>()
        .map_err(|_| ValidationError::structural("This is not a valid IPv6 address."))?;

    if canonical {
        let rendered = addr.to_string();
        if rendered != s {
            return Err(ValidationError::structural(format!(
                "IPv6 address is not in canonical form (RFC 5952), expected {rendered}."
            )));
        }
    }

    Ok(addr)
}

/// Validate an IPv4 address.
#[must_use]
pub fn validate_ipv4(s: &str) -> ValidationResult<Ipv4Addr> {
    parse_ipv4(s).into()
}

/// Validate an IPv6 address, optionally requiring canonical form.
#[must_use]
pub fn validate_ipv6(s: &str, canonical: bool) -> ValidationResult<Ipv6Addr> {
    parse_ipv6(s, canonical).into()
}

/// Returns true if `ips` is a comma-separated list of IPv4/IPv6 addresses.
///
/// Used for master server lists such as `"192.0.2.1, 2001:db8::1"`.
#[must_use]
pub fn are_multiple_valid_ips(ips: &str) -> bool {
    let mut any = false;
    for ip in ips.split(',') {
        if ip.trim().parse::<IpAddr>().is_err() {
            return false;
        }
        any = true;
    }
    any
}

/// Parse `address[/prefix]` for IPv4, with prefix 0-32.
#[must_use]
pub fn parse_ipv4_network(s: &str) -> Option<(Ipv4Addr, Option<u8>)> {
    let (addr, prefix) = split_prefix(s, MAX_IPV4_PREFIX)?;
    Some((addr.parse().ok()?, prefix))
}

/// Parse `address[/prefix]` for IPv6, with prefix 0-128.
#[must_use]
pub fn parse_ipv6_network(s: &str) -> Option<(Ipv6Addr, Option<u8>)> {
    let (addr, prefix) = split_prefix(s, MAX_IPV6_PREFIX)?;
    Some((addr.parse().ok()?, prefix))
}

fn split_prefix(s: &str, max: u32) -> Option<(&str, Option<u8>)> {
    match s.split_once('/') {
        None => Some((s, None)),
        Some((addr, prefix)) => {
            let prefix = parse_unsigned(prefix).filter(|p| *p <= u64::from(max))?;
            Some((addr, Some(u8::try_from(prefix).ok()?)))
        }
    }
}

/// Returns true for IPv6 site-local addresses (`fec0::/10`, deprecated by RFC 3879).
#[must_use]
pub fn is_ipv6_site_local(addr: &Ipv6Addr) -> bool {
    (addr.segments()[0] & 0xffc0) == 0xfec0
}

#[cfg(test)]
#[path = "ip_tests.rs"]
mod ip_tests;
