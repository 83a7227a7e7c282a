// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! NAPTR record validation (RFC 3403, ENUM per RFC 6116).
//!
//! Content is `order preference "flags" "service" "regexp" replacement`. The ordering
//! fields live in the content, so the priority field must be 0.

use crate::constants::MAX_U16_FIELD;
use crate::primitives::hostname::HostnameValidator;
use crate::primitives::numeric::parse_in_range;
use crate::record::RecordInput;
use crate::records::{
    exact_fields, finish, zero_priority, RecordOutcome, RecordValidator, ValidationContext,
};
use crate::validation_errors::ValidationError;

/// Longest accepted regexp field.
const MAX_REGEXP_LENGTH: usize = 1000;

/// Regexps longer than this get a maintainability warning.
const COMPLEX_REGEXP_LENGTH: usize = 50;

/// Longest service segment between `+` separators.
const MAX_SERVICE_SEGMENT: usize = 32;

/// Regexp constructs NAPTR clients must not be asked to evaluate.
const DANGEROUS_PATTERNS: &[(&str, &str)] = &[
    ("(?{", "Perl code execution in regexp"),
    ("(?<", "Named backreferences"),
    ("(?>", "Named backreferences"),
    ("(?#", "Conditional or comment expressions"),
    ("(?|", "Conditional or comment expressions"),
    ("(?=", "Conditional or comment expressions"),
    ("(?!", "Conditional or comment expressions"),
    ("\\$$", "Potentially dangerous backreferences"),
    ("\\$&", "Potentially dangerous backreferences"),
    ("\\$`", "Potentially dangerous backreferences"),
    ("\\$'", "Potentially dangerous backreferences"),
    ("$$", "Double dollar sign backreference"),
];

/// Parsed NAPTR content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NaptrContent {
    pub order: u16,
    pub preference: u16,
    pub flags: String,
    pub service: String,
    pub regexp: String,
    /// `.` or a domain name
    pub replacement: String,
}

impl NaptrContent {
    /// Parse NAPTR content.
    ///
    /// # Errors
    ///
    /// Returns the first violation found, in field order.
    pub fn parse(content: &str, hostnames: &HostnameValidator) -> Result<Self, ValidationError> {
        let [order, preference, flags, service, regexp, replacement] = exact_fields::<6>(
            content,
            "NAPTR record must contain order, preference, flags, service, regexp, and replacement values.",
        )?;

        let order = u16_field(order).ok_or_else(|| {
            ValidationError::range("NAPTR record order must be a number between 0 and 65535.")
        })?;
        let preference = u16_field(preference).ok_or_else(|| {
            ValidationError::range("NAPTR record preference must be a number between 0 and 65535.")
        })?;

        let flags = quoted(flags)
            .ok_or_else(|| ValidationError::structural("NAPTR record flags must be a quoted string."))?;
        if !flags.chars().all(|c| matches!(c.to_ascii_uppercase(), 'A' | 'P' | 'S' | 'U')) {
            return Err(ValidationError::invalid_choice(
                "NAPTR record flags must contain only A, P, S, or U.",
            ));
        }

        let service = quoted(service)
            .ok_or_else(|| ValidationError::structural("NAPTR record service must be a quoted string."))?;
        if !is_valid_service(service) {
            return Err(ValidationError::structural(
                "NAPTR service must follow the format: [protocol][+rs][+rs]... where protocol and rs start with a letter and contain alphanumeric characters, hyphens, colons, or plus signs (max 32 chars each).",
            ));
        }

        let regexp = quoted(regexp)
            .ok_or_else(|| ValidationError::structural("NAPTR record regexp must be a quoted string."))?;
        check_regexp(regexp)?;

        if replacement != "." && !hostnames.is_valid(replacement, true) {
            return Err(ValidationError::hostname(
                "NAPTR record replacement must be either \".\" or a valid fully-qualified domain name.",
            ));
        }
        if !regexp.is_empty() && replacement != "." {
            return Err(ValidationError::cross_field(
                "NAPTR record with a regexp must have \".\" as the replacement.",
            ));
        }

        Ok(Self {
            order,
            preference,
            flags: flags.to_string(),
            service: service.to_string(),
            regexp: regexp.to_string(),
            replacement: replacement.to_string(),
        })
    }

    /// Canonical text form.
    #[must_use]
    pub fn to_content(&self) -> String {
        format!(
            "{} {} \"{}\" \"{}\" \"{}\" {}",
            self.order, self.preference, self.flags, self.service, self.regexp, self.replacement
        )
    }

    #[must_use]
    pub fn advisories(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.flags.len() > 1 {
            warnings.push("Terminal flags \"S\", \"A\", \"U\", and \"P\" are mutually exclusive (RFC 3403 section 4.1).".to_string());
        }
        if is_enum_service(&self.service) {
            warnings.push("This appears to be an ENUM NAPTR record (RFC 6116). Ensure the domain is under e164.arpa or a private ENUM tree.".to_string());
            warnings.push("ENUM records should have the \"U\" flag to indicate URI output.".to_string());
        }
        if self.regexp.len() > COMPLEX_REGEXP_LENGTH {
            warnings.push("Complex regexp patterns in NAPTR records can be difficult to debug and maintain.".to_string());
        }
        warnings.push("This record follows RFC 3403. Be aware that some DNS servers may not fully support all NAPTR features.".to_string());
        warnings
    }
}

fn u16_field(raw: &str) -> Option<u16> {
    parse_in_range(raw, 0, MAX_U16_FIELD).and_then(|v| u16::try_from(v).ok())
}

fn quoted(field: &str) -> Option<&str> {
    field.strip_prefix('"')?.strip_suffix('"')
}

/// `protocol(+rs)*`, each segment starting with a letter.
fn is_valid_service(service: &str) -> bool {
    service.is_empty()
        || service.split('+').all(|segment| {
            let mut chars = segment.chars();
            chars.next().is_some_and(|c| c.is_ascii_alphabetic())
                && segment.len() <= MAX_SERVICE_SEGMENT
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == ':')
        })
}

fn is_enum_service(service: &str) -> bool {
    let mut segments = service.split('+');
    segments
        .next()
        .is_some_and(|first| first.eq_ignore_ascii_case("E2U"))
}

/// `delim pattern delim replacement delim flags`, flags limited to `i`.
fn check_regexp(regexp: &str) -> Result<(), ValidationError> {
    let Some(delimiter) = regexp.chars().next() else {
        return Ok(());
    };
    if regexp.matches(delimiter).count() < 3 {
        return Err(ValidationError::structural(
            "NAPTR regexp must have the format delimiter+pattern+delimiter+replacement+delimiter+flags.",
        ));
    }
    let flags = regexp.rsplit(delimiter).next().unwrap_or_default();
    if !flags.chars().all(|c| c == 'i') {
        return Err(ValidationError::structural(
            "NAPTR regexp flags (after third delimiter) should only contain \"i\" or be empty.",
        ));
    }
    if let Some((_, description)) = DANGEROUS_PATTERNS
        .iter()
        .find(|(pattern, _)| regexp.contains(pattern))
    {
        return Err(ValidationError::structural(format!(
            "NAPTR regexp contains potentially dangerous pattern: {description}"
        )));
    }
    if regexp.len() > MAX_REGEXP_LENGTH {
        return Err(ValidationError::range(format!(
            "NAPTR regexp is too long. Maximum length is {MAX_REGEXP_LENGTH} characters."
        )));
    }
    Ok(())
}

/// Returns true for names in an ENUM tree.
fn is_enum_domain(name: &str) -> bool {
    name.to_ascii_lowercase().contains("e164.arpa")
}

/// Validator for NAPTR records.
#[derive(Debug, Default, Clone, Copy)]
pub struct NaptrValidator;

impl RecordValidator for NaptrValidator {
    fn check(&self, record: &RecordInput, ctx: &ValidationContext<'_>) -> RecordOutcome {
        let name = ctx.hostname(&record.name, true)?;
        let mut warnings = Vec::new();
        if is_enum_domain(&name) {
            warnings.push("This appears to be an ENUM domain. NAPTR records should use E2U service field and follow RFC 6116.".to_string());
        }

        let parsed = NaptrContent::parse(&record.content, ctx.hostnames)?;
        warnings.extend(parsed.advisories());
        let ttl = ctx.ttl(record)?;
        let priority = zero_priority(record, "NAPTR")?;

        finish(parsed.to_content(), name, priority, ttl, warnings)
    }
}

#[cfg(test)]
#[path = "naptr_tests.rs"]
mod naptr_tests;
