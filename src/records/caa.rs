// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! CAA record validation (RFC 8659).
//!
//! Content is `flags tag "value"`. The value is a single quoted string that may contain
//! spaces.

use std::fmt;

use url::Url;

use crate::primitives::email::is_valid_email;
use crate::primitives::hostname::HostnameValidator;
use crate::primitives::numeric::parse_u8;
use crate::primitives::text::{check_printable, unquote};
use crate::record::RecordInput;
use crate::records::{finish, zero_priority, RecordOutcome, RecordValidator, ValidationContext};
use crate::validation_errors::ValidationError;

/// Issuer-critical flag.
const CAA_CRITICAL_FLAG: u8 = 128;

/// The property tags this engine models.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaaTag {
    /// `issue`
    Issue,
    /// `issuewild`
    IssueWild,
    /// `iodef`
    Iodef,
}

impl CaaTag {
    fn parse(tag: &str) -> Option<Self> {
        match tag.to_ascii_lowercase().as_str() {
            "issue" => Some(Self::Issue),
            "issuewild" => Some(Self::IssueWild),
            "iodef" => Some(Self::Iodef),
            _ => None,
        }
    }
}

impl fmt::Display for CaaTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Issue => "issue",
            Self::IssueWild => "issuewild",
            Self::Iodef => "iodef",
        })
    }
}

/// Parsed CAA content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaaContent {
    /// Flags octet
    pub flags: u8,
    /// Property tag
    pub tag: CaaTag,
    /// Property value without quotes
    pub value: String,
}

impl CaaContent {
    /// Parse and check CAA content.
    ///
    /// # Errors
    ///
    /// Returns the first structural or semantic problem found.
    pub fn parse(content: &str, hostnames: &HostnameValidator) -> Result<Self, ValidationError> {
        let content = content.trim();
        let mut parts = content.splitn(3, char::is_whitespace);
        let (Some(flags), Some(tag), Some(value)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(ValidationError::structural(
                "CAA record must have exactly 3 fields: flags tag \"value\".",
            ));
        };

        let flags = parse_u8(flags).ok_or_else(|| {
            ValidationError::range("CAA flags must be a number between 0 and 255.")
        })?;
        let tag = CaaTag::parse(tag).ok_or_else(|| {
            ValidationError::invalid_choice(
                "CAA tag must be one of: issue, issuewild, iodef.",
            )
        })?;

        let value = value.trim();
        if value.len() < 2 || !value.starts_with('"') || !value.ends_with('"') {
            return Err(ValidationError::structural(
                "CAA value must be enclosed in double quotes.",
            ));
        }
        let value = unquote(value).to_string();
        if value.contains('"') {
            return Err(ValidationError::structural(
                "CAA record must have exactly 3 fields: flags tag \"value\".",
            ));
        }

        match tag {
            CaaTag::Iodef => check_iodef(&value)?,
            CaaTag::Issue | CaaTag::IssueWild => check_issuer(&value, hostnames)?,
        }

        Ok(Self { flags, tag, value })
    }

    /// Canonical text form, with the tag lowercase.
    #[must_use]
    pub fn to_content(&self) -> String {
        format!("{} {} \"{}\"", self.flags, self.tag, self.value)
    }

    /// Advisory warnings for parsed content.
    #[must_use]
    pub fn advisories(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.flags != 0 && self.flags != CAA_CRITICAL_FLAG {
            warnings.push(format!(
                "CAA flags value {} sets undefined bits. Only 0 and 128 (issuer critical) are defined by RFC 8659.",
                self.flags
            ));
        }
        if self.tag != CaaTag::Iodef && self.issuer_domain().is_empty() {
            warnings.push(format!(
                "CAA {} record with an empty issuer forbids every certificate authority from issuing.",
                self.tag
            ));
        }
        warnings
    }

    fn issuer_domain(&self) -> &str {
        self.value.split(';').next().unwrap_or("").trim()
    }
}

fn check_iodef(value: &str) -> Result<(), ValidationError> {
    let invalid = || {
        ValidationError::structural(
            "CAA iodef value must be a URL starting with http:, https: or mailto:.",
        )
    };
    let lower = value.to_ascii_lowercase();
    if let Some(address) = lower.strip_prefix("mailto:") {
        return is_valid_email(address).then_some(()).ok_or_else(invalid);
    }
    if !(lower.starts_with("http:") || lower.starts_with("https:")) {
        return Err(invalid());
    }
    Url::parse(value)
        .ok()
        .filter(|url| url.host_str().is_some())
        .map(|_| ())
        .ok_or_else(invalid)
}

fn check_issuer(value: &str, hostnames: &HostnameValidator) -> Result<(), ValidationError> {
    let mut parts = value.split(';');
    let domain = parts.next().unwrap_or("").trim();
    if !domain.is_empty() && !hostnames.is_valid(domain, false) {
        return Err(ValidationError::hostname(
            "CAA issuer must be a valid domain name.",
        ));
    }
    for parameter in parts.map(str::trim).filter(|p| !p.is_empty()) {
        let valid = parameter.split_once('=').is_some_and(|(key, _)| {
            !key.is_empty() && key.bytes().all(|b| b.is_ascii_alphanumeric())
        });
        if !valid {
            return Err(ValidationError::structural(format!(
                "Invalid CAA issuer parameter: {parameter}"
            )));
        }
    }
    Ok(())
}

/// Validator for CAA records.
#[derive(Debug, Default, Clone, Copy)]
pub struct CaaValidator;

impl RecordValidator for CaaValidator {
    fn check(&self, record: &RecordInput, ctx: &ValidationContext<'_>) -> RecordOutcome {
        let name = ctx.hostname(&record.name, true)?;
        check_printable(&record.content)?;
        let caa = CaaContent::parse(&record.content, ctx.hostnames)?;
        let warnings = caa.advisories();

        let ttl = ctx.ttl(record)?;
        let priority = zero_priority(record, "CAA")?;

        finish(caa.to_content(), name, priority, ttl, warnings)
    }
}

#[cfg(test)]
#[path = "caa_tests.rs"]
mod caa_tests;
