// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! SPF policy validation (RFC 7208).
//!
//! A policy is `v=spf1` followed by whitespace-separated terms. Each term is either a
//! directive (an optional qualifier `+ - ~ ?` and a mechanism such as `ip4:192.0.2.0/24`)
//! or a modifier (`name=value`). Unknown mechanisms are errors; unknown modifiers are
//! allowed by the RFC and produce warnings. Term errors are accumulated.

use std::collections::HashSet;
use std::fmt;

use crate::constants::{MAX_IPV4_PREFIX, MAX_IPV6_PREFIX, MAX_POLICY_LENGTH};
use crate::primitives::hostname::HostnameValidator;
use crate::primitives::ip::{parse_ipv4_network, parse_ipv6_network};
use crate::primitives::numeric::parse_unsigned;
use crate::primitives::text::{check_printable, ensure_quoted, has_quotes_around, split_character_strings};
use crate::record::RecordInput;
use crate::records::txt::join_segments;
use crate::records::{finish, zero_priority, RecordOutcome, RecordValidator, ValidationContext};
use crate::validation_errors::ValidationError;
use crate::validation_result::{reject_if_any, Rejection};

/// Result a directive yields when its mechanism matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Qualifier {
    /// `+`, the default
    Pass,
    /// `-`
    Fail,
    /// `~`
    SoftFail,
    /// `?`
    Neutral,
}

impl fmt::Display for Qualifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Self::Pass => "+",
            Self::Fail => "-",
            Self::SoftFail => "~",
            Self::Neutral => "?",
        };
        f.write_str(symbol)
    }
}

/// One term of an SPF policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpfTerm {
    /// A mechanism with its qualifier
    Directive {
        /// Qualifier, `+` when omitted
        qualifier: Qualifier,
        /// Mechanism name, lowercase
        mechanism: String,
        /// Domain or address after `:`, empty when absent
        value: String,
        /// CIDR suffix after `/`, without the slash
        cidr: Option<String>,
    },
    /// A `name=value` modifier
    Modifier {
        /// Modifier name, lowercase
        name: String,
        /// Modifier value
        value: String,
    },
}

impl SpfTerm {
    fn parse(raw: &str) -> Self {
        if let Some((name, value)) = raw.split_once('=') {
            let looks_like_modifier = !name.is_empty()
                && name
                    .bytes()
                    .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.'));
            if looks_like_modifier {
                return Self::Modifier {
                    name: name.to_ascii_lowercase(),
                    value: value.to_string(),
                };
            }
        }

        let (qualifier, rest) = match raw.chars().next() {
            Some('+') => (Qualifier::Pass, &raw[1..]),
            Some('-') => (Qualifier::Fail, &raw[1..]),
            Some('~') => (Qualifier::SoftFail, &raw[1..]),
            Some('?') => (Qualifier::Neutral, &raw[1..]),
            _ => (Qualifier::Pass, raw),
        };

        let split_at = rest.find([':', '/']).unwrap_or(rest.len());
        let mechanism = rest[..split_at].to_ascii_lowercase();
        let remainder = &rest[split_at..];

        let (value, cidr) = match remainder.strip_prefix(':') {
            Some(argument) => match mechanism.as_str() {
                "ip4" | "ip6" => (argument.to_string(), None),
                _ => match argument.split_once('/') {
                    Some((domain, cidr)) => (domain.to_string(), Some(cidr.to_string())),
                    None => (argument.to_string(), None),
                },
            },
            None => (
                String::new(),
                remainder.strip_prefix('/').map(ToString::to_string),
            ),
        };

        Self::Directive {
            qualifier,
            mechanism,
            value,
            cidr,
        }
    }
}

/// A parsed SPF policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpfPolicy {
    terms: Vec<SpfTerm>,
}

impl SpfPolicy {
    /// Parse and check a policy.
    ///
    /// # Arguments
    ///
    /// * `text` - Unquoted policy text starting with `v=spf1`
    /// * `hostnames` - Rules for domains named in mechanisms and modifiers
    ///
    /// # Errors
    ///
    /// Returns every term error found, or a single error if the version is missing.
    pub fn parse(text: &str, hostnames: &HostnameValidator) -> Result<Self, Rejection> {
        let text = text.trim();
        let body = text
            .get(..6)
            .filter(|v| v.eq_ignore_ascii_case("v=spf1"))
            .map(|_| &text[6..])
            .filter(|body| body.is_empty() || body.starts_with(char::is_whitespace))
            .ok_or_else(|| ValidationError::structural("SPF record must start with \"v=spf1\""))?;

        let policy = Self {
            terms: body.split_whitespace().map(SpfTerm::parse).collect(),
        };
        reject_if_any(policy.errors(hostnames))?;
        Ok(policy)
    }

    /// The parsed terms in order.
    #[must_use]
    pub fn terms(&self) -> &[SpfTerm] {
        &self.terms
    }

    fn has_mechanism(&self, name: &str) -> bool {
        self.terms
            .iter()
            .any(|t| matches!(t, SpfTerm::Directive { mechanism, .. } if mechanism == name))
    }

    fn has_modifier(&self, wanted: &str) -> bool {
        self.terms
            .iter()
            .any(|t| matches!(t, SpfTerm::Modifier { name, .. } if name == wanted))
    }

    fn errors(&self, hostnames: &HostnameValidator) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        let mut seen_mechanisms = HashSet::new();
        let mut seen_modifiers = HashSet::new();

        for term in &self.terms {
            match term {
                SpfTerm::Directive {
                    mechanism,
                    value,
                    cidr,
                    ..
                } => {
                    if !seen_mechanisms.insert(mechanism.as_str()) {
                        errors.push(ValidationError::structural(format!(
                            "Duplicate {mechanism} mechanism found. Each mechanism type should appear at most once."
                        )));
                    }
                    if let Some(error) = check_mechanism(mechanism, value, cidr.as_deref(), hostnames) {
                        errors.push(error);
                    }
                }
                SpfTerm::Modifier { name, value } => {
                    if !seen_modifiers.insert(name.as_str()) {
                        errors.push(ValidationError::structural(format!(
                            "Duplicate {name} modifier found. Each modifier can appear at most once."
                        )));
                    }
                    if matches!(name.as_str(), "redirect" | "exp")
                        && !hostnames.is_valid(value.trim(), false)
                    {
                        errors.push(ValidationError::hostname(format!(
                            "Invalid domain in {name} modifier."
                        )));
                    }
                }
            }
        }
        errors
    }

    /// RFC 7208 advice for a valid policy.
    #[must_use]
    pub fn advisories(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        let last = self.terms.len().saturating_sub(1);

        for (index, term) in self.terms.iter().enumerate() {
            match term {
                SpfTerm::Directive { mechanism, .. } if mechanism == "ptr" => warnings.push(
                    "The ptr mechanism is not recommended due to performance issues (RFC 7208 Section 5.5).".to_string(),
                ),
                SpfTerm::Directive { mechanism, .. } if mechanism == "all" && index != last => {
                    warnings.push(
                        "The \"all\" mechanism should be the last mechanism in the record (RFC 7208 Section 5.1).".to_string(),
                    );
                }
                SpfTerm::Modifier { name, value } if name != "redirect" && name != "exp" => {
                    warnings.push(format!("Unknown modifier: {name}={value}"));
                }
                _ => {}
            }
        }

        let has_all = self.has_mechanism("all");
        let has_redirect = self.has_modifier("redirect");
        if !has_all && !has_redirect {
            warnings.push(
                "SPF record should have either a terminating \"all\" mechanism or a \"redirect\" modifier (RFC 7208 Section 4.6.2).".to_string(),
            );
        }
        if has_all && has_redirect {
            warnings.push(
                "SPF record has both \"all\" mechanism and \"redirect\" modifier. The \"redirect\" modifier will be ignored when \"all\" is present (RFC 7208 Section 6.1).".to_string(),
            );
        }
        warnings
    }
}

fn check_mechanism(
    mechanism: &str,
    value: &str,
    cidr: Option<&str>,
    hostnames: &HostnameValidator,
) -> Option<ValidationError> {
    match mechanism {
        "all" => None,
        "ip4" => parse_ipv4_network(value).is_none().then(|| {
            ValidationError::structural("Invalid IPv4 address or network in ip4 mechanism.")
        }),
        "ip6" => parse_ipv6_network(value).is_none().then(|| {
            ValidationError::structural("Invalid IPv6 address or network in ip6 mechanism.")
        }),
        "a" | "mx" | "ptr" | "exists" | "include" => {
            if !value.is_empty() && !hostnames.is_valid(value, false) {
                return Some(ValidationError::hostname(format!(
                    "Invalid domain name in {mechanism} mechanism."
                )));
            }
            if (mechanism == "include" || mechanism == "exists") && value.is_empty() {
                return Some(ValidationError::structural(format!(
                    "The {mechanism} mechanism requires a domain."
                )));
            }
            let cidr = cidr?;
            if mechanism != "a" && mechanism != "mx" {
                return Some(ValidationError::structural(format!(
                    "CIDR notation is not valid with the {mechanism} mechanism."
                )));
            }
            (!is_valid_dual_cidr(cidr))
                .then(|| ValidationError::range("Invalid CIDR length in mechanism."))
        }
        unknown => Some(ValidationError::invalid_choice(format!(
            "Unknown mechanism: {unknown}"
        ))),
    }
}

/// Accept `v4`, `/v6` (written `//v6`) or `v4//v6` prefix lengths.
fn is_valid_dual_cidr(cidr: &str) -> bool {
    let (v4, v6) = match cidr.split_once("//") {
        Some((v4, v6)) => (v4, Some(v6)),
        None => match cidr.strip_prefix('/') {
            Some(v6) => ("", Some(v6)),
            None => (cidr, None),
        },
    };
    let v4_ok = v4.is_empty()
        || parse_unsigned(v4).is_some_and(|p| p <= u64::from(MAX_IPV4_PREFIX));
    let v6_ok = v6.is_none_or(|v6| {
        parse_unsigned(v6).is_some_and(|p| p <= u64::from(MAX_IPV6_PREFIX))
    });
    v4_ok && v6_ok && !(v4.is_empty() && v6.is_none())
}

/// Validator for SPF records.
///
/// Unquoted content is accepted and returned quoted.
#[derive(Debug, Default, Clone, Copy)]
pub struct SpfValidator;

impl RecordValidator for SpfValidator {
    fn check(&self, record: &RecordInput, ctx: &ValidationContext<'_>) -> RecordOutcome {
        let name = ctx.hostname(&record.name, true)?;
        let raw = record.content.trim();
        check_printable(raw)?;

        let (content, text) = if raw.len() >= 2 && has_quotes_around(raw) {
            (raw.to_string(), join_segments(&split_character_strings(raw)?))
        } else {
            if raw.len() > MAX_POLICY_LENGTH {
                return Err(ValidationError::range(
                    "SPF record exceeds 255 character limit. Split it into several quoted strings.",
                )
                .into());
            }
            (ensure_quoted(raw), raw.to_string())
        };

        let policy = SpfPolicy::parse(&text, ctx.hostnames)?;
        let warnings = policy.advisories();

        let ttl = ctx.ttl(record)?;
        let priority = zero_priority(record, "SPF")?;

        finish(content, name, priority, ttl, warnings)
    }
}

#[cfg(test)]
#[path = "spf_tests.rs"]
mod spf_tests;
