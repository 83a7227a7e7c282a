// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! URI record validation (RFC 7553).
//!
//! Content is `priority weight "target"`. The target must carry an RFC 3986 scheme;
//! hierarchical schemes also need `://`.

use crate::constants::MAX_U16_FIELD;
use crate::primitives::numeric::parse_in_range;
use crate::primitives::text::check_printable;
use crate::record::RecordInput;
use crate::records::{finish, preference, RecordOutcome, RecordValidator, ValidationContext};
use crate::validation_errors::ValidationError;

/// Schemes that need no warning.
const KNOWN_SCHEMES: &[&str] = &[
    "http", "https", "ftp", "ftps", "ldap", "ldaps", "mailto", "tel", "sms", "bitcoin", "urn",
    "sip", "sips", "xmpp", "ws", "wss", "sftp", "git", "file",
];

/// Schemes whose URIs have no authority component.
const OPAQUE_SCHEMES: &[&str] = &["mailto", "tel", "sms", "bitcoin", "urn"];

/// Parsed URI content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriContent {
    pub priority: u16,
    pub weight: u16,
    /// Target URI without quotes
    pub target: String,
    /// Lowercase scheme
    pub scheme: String,
}

impl UriContent {
    /// Parse URI content.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn parse(content: &str) -> Result<Self, ValidationError> {
        let format = || {
            ValidationError::structural("URI record must be in the format: <priority> <weight> \"<target URI>\"")
        };
        let content = content.trim();
        let (priority, rest) = content.split_once(char::is_whitespace).ok_or_else(format)?;
        let (weight, target) = rest.trim_start().split_once(char::is_whitespace).ok_or_else(format)?;
        let target = target
            .trim_start()
            .strip_prefix('"')
            .and_then(|t| t.strip_suffix('"'))
            .ok_or_else(format)?;
        if !priority.bytes().all(|b| b.is_ascii_digit()) || !weight.bytes().all(|b| b.is_ascii_digit()) {
            return Err(format());
        }

        let priority = u16_field(priority).ok_or_else(|| {
            ValidationError::range("URI priority must be between 0 and 65535 (16-bit unsigned integer).")
        })?;
        let weight = u16_field(weight).ok_or_else(|| {
            ValidationError::range("URI weight must be between 0 and 65535 (16-bit unsigned integer).")
        })?;

        if target.trim().is_empty() {
            return Err(ValidationError::structural("URI must not be empty."));
        }
        let scheme = scheme_of(target).ok_or_else(|| {
            ValidationError::structural(
                "URI must start with a valid scheme that begins with a letter followed by letters, digits, plus, period, or hyphen.",
            )
        })?;

        let after_scheme = &target[scheme.len() + 1..];
        if !OPAQUE_SCHEMES.contains(&scheme.as_str()) && !after_scheme.starts_with("//") {
            return Err(ValidationError::structural(
                "URI with this protocol must include \"://\" after the protocol name.",
            ));
        }
        if (scheme == "http" || scheme == "https")
            && after_scheme
                .strip_prefix("//")
                .and_then(|rest| rest.chars().next())
                .is_none_or(|c| c == '/' || c.is_whitespace())
        {
            return Err(ValidationError::structural("HTTP/HTTPS URIs must include a hostname."));
        }
        if target.chars().any(char::is_control) {
            return Err(ValidationError::structural("URI must not contain control characters."));
        }

        Ok(Self {
            priority,
            weight,
            target: target.to_string(),
            scheme,
        })
    }

    /// Canonical text form.
    #[must_use]
    pub fn to_content(&self) -> String {
        format!("{} {} \"{}\"", self.priority, self.weight, self.target)
    }

    #[must_use]
    pub fn advisories(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if !KNOWN_SCHEMES.contains(&self.scheme.as_str()) {
            warnings.push("URI uses an uncommon protocol. Consider using a standard URI scheme for better compatibility.".to_string());
        }
        if self.target.contains('\\') {
            warnings.push("URI contains backslash characters, which may be interpreted differently across systems.".to_string());
        }
        if self.target.contains("..") {
            warnings.push("URI contains \"..\" sequences, which may be used for directory traversal attacks.".to_string());
        }
        if self.target.contains('%') && !has_percent_encoding(&self.target) {
            warnings.push("URI contains percent characters not used for properly formatted percent-encoding.".to_string());
        }
        if let Some(host) = self.authority() {
            if !host.is_ascii() {
                warnings.push("URI contains non-ASCII characters in hostname. Consider using Punycode for international domain names.".to_string());
            }
        }

        let scheme_warning = match self.scheme.as_str() {
            "http" => Some("Consider using HTTPS instead of HTTP for better security."),
            "ftp" => Some("FTP is considered less secure than alternatives like SFTP or HTTPS."),
            "ldap" => Some("Consider using LDAPS (LDAP over SSL/TLS) for securing LDAP connections."),
            "tel" | "sms" => Some("Phone-related URI schemes may contain sensitive personal information."),
            "file" => Some("The \"file\" URI scheme may pose security risks and is not recommended for public DNS records."),
            _ => None,
        };
        warnings.extend(scheme_warning.map(str::to_string));
        warnings.push("URI records should be protected with DNSSEC to prevent manipulation by attackers.".to_string());
        warnings
    }

    fn authority(&self) -> Option<&str> {
        let rest = self.target.get(self.scheme.len() + 1..)?.strip_prefix("//")?;
        let end = rest.find(|c: char| c == '/' || c.is_whitespace()).unwrap_or(rest.len());
        Some(&rest[..end])
    }
}

fn u16_field(raw: &str) -> Option<u16> {
    parse_in_range(raw, 0, MAX_U16_FIELD).and_then(|v| u16::try_from(v).ok())
}

/// The lowercase scheme of `uri`, if it starts with one.
fn scheme_of(uri: &str) -> Option<String> {
    let (scheme, _) = uri.split_once(':')?;
    let mut chars = scheme.chars();
    let first_ok = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    let rest_ok = chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '.' | '-'));
    (first_ok && rest_ok).then(|| scheme.to_ascii_lowercase())
}

fn has_percent_encoding(s: &str) -> bool {
    s.as_bytes()
        .windows(3)
        .any(|w| w[0] == b'%' && w[1].is_ascii_hexdigit() && w[2].is_ascii_hexdigit())
}

/// Validator for URI records.
#[derive(Debug, Default, Clone, Copy)]
pub struct UriValidator;

impl RecordValidator for UriValidator {
    fn check(&self, record: &RecordInput, ctx: &ValidationContext<'_>) -> RecordOutcome {
        let name = ctx.hostname(&record.name, true)?;
        check_printable(&record.content)?;
        let parsed = UriContent::parse(&record.content)?;
        let warnings = parsed.advisories();
        let ttl = ctx.ttl(record)?;
        let priority = preference(
            record,
            parsed.priority,
            "Invalid value for URI priority field. It should be an integer between 0 and 65535.",
        )?;

        finish(parsed.to_content(), name, priority, ttl, warnings)
    }
}

#[cfg(test)]
#[path = "uri_tests.rs"]
mod uri_tests;
