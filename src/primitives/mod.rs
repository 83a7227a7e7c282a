// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Single-concern checks shared by every record-type validator.
//!
//! ## Modules
//!
//! - [`hostname`] - hostname and FQDN syntax, classless reverse delegation, TLD checks
//! - [`ip`] - IPv4/IPv6 literals and CIDR networks
//! - [`ttl`] - TTL defaulting and range checks
//! - [`text`] - printable, quoting and character-string rules for TXT-like content
//! - [`encoding`] - base64 and hexadecimal payloads
//! - [`email`] - mailbox syntax used by SOA and DMARC
//! - [`numeric`] - strict unsigned integer parsing for record fields

pub mod email;
pub mod encoding;
pub mod hostname;
pub mod ip;
pub mod numeric;
pub mod text;
pub mod ttl;

pub use email::is_valid_email;
pub use encoding::{decode_base64, is_base64, is_hex, validate_base64, validate_hex};
pub use hostname::{normalize_record_name, HostnameValidator};
pub use ip::{are_multiple_valid_ips, validate_ipv4, validate_ipv6};
pub use numeric::{parse_in_range, parse_unsigned};
pub use text::{has_html_tags, has_quotes_around, is_properly_quoted, is_valid_printable};
pub use ttl::validate_ttl;
