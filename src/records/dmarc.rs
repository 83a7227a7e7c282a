// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! DMARC policy validation (RFC 7489).
//!
//! A DMARC policy is a TXT record at `_dmarc.<domain>` holding `tag=value` pairs separated
//! by semicolons, starting with `v=DMARC1`. Tag errors are accumulated so every broken
//! tag is reported at once.

use url::Url;

use crate::constants::MAX_POLICY_LENGTH;
use crate::primitives::email::is_valid_email;
use crate::primitives::numeric::parse_unsigned;
use crate::primitives::text::{ensure_quoted, unquote};
use crate::record::RecordInput;
use crate::records::{finish, zero_priority, RecordOutcome, RecordValidator, ValidationContext};
use crate::validation_errors::ValidationError;
use crate::validation_result::{reject_if_any, Rejection};

const POLICIES: &[&str] = &["none", "quarantine", "reject"];
const REPORT_FORMATS: &[&str] = &["afrf", "iodef"];

/// Returns true if `name` is a DMARC policy name (`_dmarc.` prefix, case-insensitive).
#[must_use]
pub fn is_dmarc_name(name: &str) -> bool {
    name.get(..7)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("_dmarc."))
}

/// A parsed DMARC policy: its tags in the order written, names lowercased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DmarcPolicy {
    tags: Vec<(String, String)>,
    duplicates: Vec<String>,
}

impl DmarcPolicy {
    /// Parse and check a policy.
    ///
    /// # Errors
    ///
    /// Returns every tag error found, or a single error if the version or length is wrong.
    pub fn parse(text: &str) -> Result<Self, Rejection> {
        let text = text.trim();
        let has_version = text
            .get(..8)
            .is_some_and(|v| v.eq_ignore_ascii_case("v=DMARC1"))
            && text[8..]
                .chars()
                .next()
                .is_none_or(|c| !c.is_ascii_alphanumeric() && c != '_');
        if !has_version {
            return Err(
                ValidationError::structural("DMARC record must start with \"v=DMARC1\"").into(),
            );
        }
        if text.len() > MAX_POLICY_LENGTH {
            return Err(ValidationError::range(
                "DMARC record exceeds 255 character limit. For complex policies, consider simplifying or using URI references.",
            )
            .into());
        }

        let mut tags: Vec<(String, String)> = Vec::new();
        let mut duplicates = Vec::new();
        for part in text[8..].split(';') {
            let Some((tag, value)) = part.trim().split_once('=') else {
                continue;
            };
            let tag = tag.trim();
            if tag.is_empty() || !tag.bytes().all(|b| b.is_ascii_alphanumeric()) {
                continue;
            }
            let tag = tag.to_ascii_lowercase();
            let value = value.trim().to_string();
            if let Some(existing) = tags.iter_mut().find(|(t, _)| *t == tag) {
                duplicates.push(tag);
                existing.1 = value;
            } else {
                tags.push((tag, value));
            }
        }

        let policy = Self { tags, duplicates };
        reject_if_any(policy.errors())?;
        Ok(policy)
    }

    /// The value of a tag, if present.
    #[must_use]
    pub fn tag(&self, name: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|(tag, _)| tag == name)
            .map(|(_, value)| value.as_str())
    }

    fn errors(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        for (tag, value) in &self.tags {
            match tag.as_str() {
                "v" => {
                    if !value.eq_ignore_ascii_case("DMARC1") {
                        errors.push(ValidationError::invalid_choice(
                            "DMARC version tag (v) must be DMARC1",
                        ));
                    }
                }
                "p" | "sp" => {
                    if !POLICIES.contains(&value.to_ascii_lowercase().as_str()) {
                        let label = if tag == "p" { "policy" } else { "subdomain policy" };
                        errors.push(ValidationError::invalid_choice(format!(
                            "DMARC {label} tag ({tag}) must be one of: none, quarantine, reject"
                        )));
                    }
                }
                "adkim" | "aspf" => {
                    if value != "r" && value != "s" {
                        let label = if tag == "adkim" { "DKIM" } else { "SPF" };
                        errors.push(ValidationError::invalid_choice(format!(
                            "DMARC {label} alignment tag ({tag}) must be r (relaxed) or s (strict)"
                        )));
                    }
                }
                "pct" => {
                    if parse_unsigned(value).is_none_or(|pct| pct > 100) {
                        errors.push(ValidationError::range(
                            "DMARC percentage tag (pct) must be between 0 and 100",
                        ));
                    }
                }
                "ri" => {
                    if parse_unsigned(value).is_none_or(|ri| ri == 0) {
                        errors.push(ValidationError::range(
                            "DMARC reporting interval tag (ri) must be a positive integer",
                        ));
                    }
                }
                "fo" => {
                    if !value
                        .split(':')
                        .all(|option| matches!(option, "0" | "1" | "d" | "s"))
                    {
                        errors.push(ValidationError::invalid_choice(
                            "DMARC failure reporting options tag (fo) must contain only 0, 1, d, s, or colon-separated combinations",
                        ));
                    }
                }
                "rua" | "ruf" => {
                    if let Some(error) = check_report_uris(tag, value) {
                        errors.push(error);
                    }
                }
                "rf" => {
                    if !REPORT_FORMATS.contains(&value.to_ascii_lowercase().as_str()) {
                        errors.push(ValidationError::invalid_choice(
                            "DMARC report format tag (rf) must be afrf or iodef",
                        ));
                    }
                }
                _ => {}
            }
        }

        if self.tag("p").is_none() {
            errors.push(ValidationError::structural("Required DMARC tag missing: p"));
        }
        errors
    }

    /// RFC 7489 deployment advice for a valid policy.
    #[must_use]
    pub fn advisories(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        for (tag, value) in &self.tags {
            match tag.as_str() {
                "p" if value.eq_ignore_ascii_case("none") => warnings.push(
                    "Using \"p=none\" provides visibility into email authentication without affecting delivery. Consider a stricter policy once you've reviewed the reports.".to_string(),
                ),
                "pct" => {
                    if let Some(pct) = parse_unsigned(value).filter(|pct| *pct < 100) {
                        warnings.push(format!(
                            "DMARC policy is applied to only {pct}% of messages. This should only be used during policy rollout."
                        ));
                    }
                }
                "v" | "p" | "sp" | "adkim" | "aspf" | "ri" | "fo" | "rua" | "ruf" | "rf" => {}
                unknown => warnings.push(format!("Unknown DMARC tag: {unknown}")),
            }
        }
        for tag in &self.duplicates {
            warnings.push(format!(
                "DMARC tag {tag} appears more than once; only the last value is used."
            ));
        }
        if self.tag("rua").is_none() && self.tag("ruf").is_none() {
            warnings.push(
                "DMARC record does not specify any reporting URIs (rua or ruf). This may limit your ability to monitor authentication results.".to_string(),
            );
        }
        warnings
    }
}

/// Check a comma-separated list of `mailto:` or `https:` report URIs.
fn check_report_uris(tag: &str, value: &str) -> Option<ValidationError> {
    for uri in value.split(',').map(str::trim) {
        if let Some(mailbox) = uri.strip_prefix("mailto:") {
            let address = mailbox.split('!').next().unwrap_or(mailbox);
            if !is_valid_email(address) {
                return Some(ValidationError::structural(format!(
                    "Invalid email address in DMARC {tag} tag: {address}"
                )));
            }
        } else if uri.starts_with("https:") {
            if Url::parse(uri).is_err() {
                return Some(ValidationError::structural(format!(
                    "DMARC {tag} tag must contain valid mailto: or https: URIs"
                )));
            }
        } else {
            return Some(ValidationError::structural(format!(
                "DMARC {tag} tag must contain valid mailto: or https: URIs"
            )));
        }
    }
    None
}

/// Validator for DMARC policy records stored as TXT.
///
/// Unquoted content is accepted and returned quoted.
#[derive(Debug, Default, Clone, Copy)]
pub struct DmarcValidator;

impl RecordValidator for DmarcValidator {
    fn check(&self, record: &RecordInput, ctx: &ValidationContext<'_>) -> RecordOutcome {
        let name = ctx.hostname(&record.name, true)?;
        if !is_dmarc_name(&name) {
            return Err(ValidationError::structural(
                "DMARC records must be placed at _dmarc.<domain>.",
            )
            .into());
        }

        let content = ensure_quoted(record.content.trim());
        let policy = DmarcPolicy::parse(unquote(&content))?;
        let warnings = policy.advisories();

        let ttl = ctx.ttl(record)?;
        let priority = zero_priority(record, "DMARC")?;

        finish(content, name, priority, ttl, warnings)
    }
}

#[cfg(test)]
#[path = "dmarc_tests.rs"]
mod dmarc_tests;
