// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Hostname and FQDN validation.
//!
//! Rules applied, in order:
//!
//! 1. `.`, `@` and names starting with `@.` are zone-apex sentinels and pass unchanged
//! 2. A single trailing dot is removed
//! 3. The name may not exceed 253 characters
//! 4. Optionally, single-label names are refused
//! 5. Every label is checked for characters, dashes and length; all label problems are
//!    reported together, each message once
//! 6. Names under `arpa` may carry one RFC 2317 `subnet/prefix` label; slashes are
//!    refused everywhere else
//! 7. Optionally, the last label must be a known top level domain

use std::collections::HashSet;

use crate::config::HostnameConfig;
use crate::constants::{
    COUNTRY_CODE_TLDS, GENERIC_TLDS, MAX_CLASSLESS_PREFIX, MAX_HOSTNAME_LENGTH,
    MAX_IPV6_PREFIX, MAX_LABEL_LENGTH, MIN_CLASSLESS_PREFIX, MIN_LABEL_LENGTH,
};
use crate::primitives::numeric::parse_unsigned;
use crate::validation_errors::ValidationError;
use crate::validation_result::{Rejection, ValidationResult};

const MSG_TOO_LONG: &str = "The hostname is too long.";
const MSG_SINGLE_LABEL: &str = "Single-label hostnames are not allowed.";
const MSG_INVALID_CHARACTERS: &str = "You have invalid characters in your zone name.";
const MSG_DASH: &str = "A hostname can not start or end with a dash.";
const MSG_LABEL_LENGTH: &str = "Given hostname or one of the labels is too short or too long.";
const MSG_TOO_MANY_SLASHES: &str = "Given hostname has too many slashes.";
const MSG_INVALID_TLD: &str = "You are using an invalid top level domain.";

/// Validates hostnames according to the configured [`HostnameConfig`].
///
/// Built once alongside the registry; cheap to share by reference.
#[derive(Debug, Clone, Default)]
pub struct HostnameValidator {
    top_level_tld_check: bool,
    strict_tld_check: bool,
    extra_tlds: HashSet<String>,
}

impl HostnameValidator {
    /// Create a validator from configuration.
    #[must_use]
    pub fn new(config: &HostnameConfig) -> Self {
        Self {
            top_level_tld_check: config.top_level_tld_check,
            strict_tld_check: config.strict_tld_check,
            extra_tlds: config
                .extra_tlds
                .iter()
                .map(|tld| tld.trim_start_matches('.').to_ascii_lowercase())
                .collect(),
        }
    }

    /// Validate a hostname.
    ///
    /// # Arguments
    ///
    /// * `hostname` - The name to check, with or without trailing dot
    /// * `allow_wildcard` - Whether the first label may be `*`
    ///
    /// # Returns
    ///
    /// The normalized hostname (trailing dot removed) or the rules it breaks.
    #[must_use]
    pub fn validate(&self, hostname: &str, allow_wildcard: bool) -> ValidationResult<String> {
        self.check(hostname, allow_wildcard)
            .map(|name| (name, Vec::<String>::new()))
            .into()
    }

    /// Returns true if the hostname passes [`HostnameValidator::validate`].
    #[must_use]
    pub fn is_valid(&self, hostname: &str, allow_wildcard: bool) -> bool {
        self.check(hostname, allow_wildcard).is_ok()
    }

    /// Validate a hostname for use with `?` inside other validators.
    ///
    /// # Errors
    ///
    /// Returns a [`Rejection`] of [`ValidationError::Hostname`] errors.
    pub fn check(&self, hostname: &str, allow_wildcard: bool) -> Result<String, Rejection> {
        if hostname == "." || hostname == "@" || hostname.starts_with("@.") {
            return Ok(hostname.to_string());
        }

        let normalized = hostname.strip_suffix('.').unwrap_or(hostname);

        if normalized.len() > MAX_HOSTNAME_LENGTH {
            return Err(ValidationError::hostname(MSG_TOO_LONG).into());
        }

        let labels: Vec<&str> = normalized.split('.').collect();

        if self.top_level_tld_check && labels.len() == 1 {
            return Err(ValidationError::hostname(MSG_SINGLE_LABEL).into());
        }

        let mut messages: Vec<&'static str> = Vec::new();
        for (index, label) in labels.iter().enumerate() {
            for message in label_problems(label, allow_wildcard && index == 0) {
                if !messages.contains(&message) {
                    messages.push(message);
                }
            }
        }
        if let Some(rejection) = Rejection::from_errors(
            messages
                .into_iter()
                .map(ValidationError::hostname)
                .collect(),
        ) {
            return Err(rejection);
        }

        let is_arpa = labels
            .last()
            .is_some_and(|tld| tld.eq_ignore_ascii_case("arpa"));
        if is_arpa {
            check_classless_delegation(&labels)?;
        } else if normalized.contains('/') {
            return Err(ValidationError::hostname(MSG_TOO_MANY_SLASHES).into());
        }

        if self.strict_tld_check && !self.is_known_tld(labels.last().copied().unwrap_or("")) {
            return Err(ValidationError::hostname(MSG_INVALID_TLD).into());
        }

        Ok(normalized.to_string())
    }

    fn is_known_tld(&self, tld: &str) -> bool {
        let tld = tld.to_ascii_lowercase();
        GENERIC_TLDS.contains(&tld.as_str())
            || COUNTRY_CODE_TLDS.contains(&tld.as_str())
            || self.extra_tlds.contains(&tld)
    }
}

fn label_problems(label: &str, wildcard_allowed: bool) -> Vec<&'static str> {
    let mut problems = Vec::new();

    let charset_ok = (wildcard_allowed && label == "*")
        || (!label.is_empty()
            && label
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-' | b'/')));
    if !charset_ok {
        problems.push(MSG_INVALID_CHARACTERS);
    }
    if label.starts_with('-') || label.ends_with('-') {
        problems.push(MSG_DASH);
    }
    if !(MIN_LABEL_LENGTH..=MAX_LABEL_LENGTH).contains(&label.len()) {
        problems.push(MSG_LABEL_LENGTH);
    }

    problems
}

/// Validate the RFC 2317 `subnet/prefix` label of a reverse zone name.
fn check_classless_delegation(labels: &[&str]) -> Result<(), ValidationError> {
    let mut slash_labels = labels.iter().filter(|label| label.contains('/'));
    let Some(slash_label) = slash_labels.next() else {
        return Ok(());
    };
    if slash_labels.next().is_some() {
        return Err(ValidationError::hostname(
            "Multiple slashes in different labels are not allowed in ARPA zones.",
        ));
    }

    let parts: Vec<&str> = slash_label.split('/').collect();
    let [subnet, prefix] = parts.as_slice() else {
        return Err(ValidationError::hostname(
            "Invalid RFC 2317 format. Use format: subnet/prefix (e.g., 0/26).",
        ));
    };

    let family = labels
        .len()
        .checked_sub(2)
        .and_then(|index| labels.get(index))
        .map(|label| label.to_ascii_lowercase());

    match family.as_deref() {
        Some("in-addr") => {
            let subnet = parse_unsigned(subnet).filter(|s| *s <= 255).ok_or_else(|| {
                ValidationError::hostname(
                    "Invalid subnet number in RFC 2317 notation. Must be 0-255 for IPv4.",
                )
            })?;
            let prefix = parse_prefix(prefix)?;
            if !(u64::from(MIN_CLASSLESS_PREFIX)..=u64::from(MAX_CLASSLESS_PREFIX))
                .contains(&prefix)
            {
                return Err(ValidationError::hostname(format!(
                    "Invalid IPv4 prefix length for RFC 2317. Must be {MIN_CLASSLESS_PREFIX}-{MAX_CLASSLESS_PREFIX}."
                )));
            }
            let block_size = 1u64 << (32 - prefix);
            if subnet % block_size != 0 {
                return Err(ValidationError::hostname(format!(
                    "Subnet {subnet} is not aligned with prefix /{prefix}. Should be multiple of {block_size}."
                )));
            }
        }
        Some("ip6") => {
            if subnet.is_empty() || !subnet.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(ValidationError::hostname(
                    "Invalid subnet in RFC 2317 notation. Must be hexadecimal (0-9, a-f) for IPv6.",
                ));
            }
            if parse_prefix(prefix)? > u64::from(MAX_IPV6_PREFIX) {
                return Err(ValidationError::hostname(
                    "Invalid IPv6 prefix length. Must be 0-128.",
                ));
            }
        }
        _ => {
            if subnet.is_empty() || !subnet.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(ValidationError::hostname(
                    "Invalid subnet in RFC 2317 notation. Must be numeric or hexadecimal.",
                ));
            }
            if parse_prefix(prefix)? > u64::from(MAX_IPV6_PREFIX) {
                return Err(ValidationError::hostname(
                    "Invalid prefix length. Must be 0-128.",
                ));
            }
        }
    }

    Ok(())
}

fn parse_prefix(prefix: &str) -> Result<u64, ValidationError> {
    parse_unsigned(prefix).ok_or_else(|| {
        ValidationError::hostname("Invalid prefix length in RFC 2317 notation. Must be numeric.")
    })
}

/// Qualify a record name with its zone.
///
/// - an empty name or `@` becomes the zone itself
/// - a name with a trailing dot is absolute and only loses the dot
/// - a name equal to the zone or ending in `.<zone>` is kept (compared case-insensitively)
/// - anything else gets `.<zone>` appended
///
/// # Examples
///
/// ```
/// use zone_validator::primitives::normalize_record_name;
///
/// assert_eq!(normalize_record_name("www", "example.com"), "www.example.com");
/// assert_eq!(normalize_record_name("WWW.Example.com", "example.com"), "WWW.Example.com");
/// assert_eq!(normalize_record_name("", "example.com"), "example.com");
/// ```
#[must_use]
pub fn normalize_record_name(name: &str, zone: &str) -> String {
    let zone = zone.strip_suffix('.').unwrap_or(zone);
    let name = name.trim();

    if name.is_empty() || name == "@" {
        return zone.to_string();
    }
    if let Some(absolute) = name.strip_suffix('.') {
        return absolute.to_string();
    }
    if zone.is_empty() {
        return name.to_string();
    }

    let lower_name = name.to_ascii_lowercase();
    let lower_zone = zone.to_ascii_lowercase();
    if lower_name == lower_zone || lower_name.ends_with(&format!(".{lower_zone}")) {
        name.to_string()
    } else {
        format!("{name}.{zone}")
    }
}

/// Returns true if `name` is the zone apex (case-insensitive, trailing dots ignored).
#[must_use]
pub fn is_zone_apex(name: &str, zone: &str) -> bool {
    let name = name.strip_suffix('.').unwrap_or(name);
    let zone = zone.strip_suffix('.').unwrap_or(zone);
    name.eq_ignore_ascii_case(zone)
}

#[cfg(test)]
#[path = "hostname_tests.rs"]
mod hostname_tests;
