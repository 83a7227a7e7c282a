// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! SRV record validation (RFC 2782).
//!
//! The owner must be `_service._proto.domain`. Content is `priority weight port target`.
//! Zone stores that keep the priority in its own column hold `weight port target`; that
//! form is accepted when the priority field is set.

use crate::constants::{DEFAULT_MX_PRIORITY, MAX_HOSTNAME_LENGTH, MAX_U16_FIELD};
use crate::primitives::hostname::HostnameValidator;
use crate::primitives::numeric::parse_in_range;
use crate::record::RecordInput;
use crate::records::{finish, preference, RecordOutcome, RecordValidator, ValidationContext};
use crate::validation_errors::ValidationError;

/// Check an SRV owner name and return it.
///
/// # Errors
///
/// Returns an error naming the part of `_service._proto.domain` that is wrong.
pub fn check_srv_name(name: &str, hostnames: &HostnameValidator) -> Result<String, ValidationError> {
    if name.len() > MAX_HOSTNAME_LENGTH {
        return Err(ValidationError::hostname("The hostname is too long."));
    }
    let mut parts = name.splitn(3, '.');
    let (Some(service), Some(proto), Some(domain)) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(ValidationError::hostname(
            "SRV record name must be in format _service._protocol.domain",
        ));
    };

    let is_word = |s: &str, dash: bool| {
        !s.is_empty()
            && s.bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'_' || (dash && b == b'-'))
    };
    if !service.strip_prefix('_').is_some_and(|s| is_word(s, true)) {
        return Err(ValidationError::hostname(
            "Invalid service value in name field of SRV record.",
        ));
    }
    if !proto.strip_prefix('_').is_some_and(|p| is_word(p, false)) {
        return Err(ValidationError::hostname(
            "Invalid protocol value in name field of SRV record.",
        ));
    }
    if !hostnames.is_valid(domain, false) {
        return Err(ValidationError::hostname(
            "Invalid FQDN value in name field of SRV record.",
        ));
    }

    Ok(name.strip_suffix('.').unwrap_or(name).to_string())
}

/// Parsed SRV content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SrvContent {
    /// Priority embedded in the content, absent in the three-field form
    pub priority: Option<u16>,
    pub weight: u16,
    pub port: u16,
    /// `.` or a host name
    pub target: String,
}

impl SrvContent {
    /// Parse SRV content.
    ///
    /// # Errors
    ///
    /// Returns the first violation found. The three-field form is only accepted when
    /// `three_fields_allowed` is set.
    pub fn parse(
        content: &str,
        hostnames: &HostnameValidator,
        three_fields_allowed: bool,
    ) -> Result<Self, ValidationError> {
        let fields: Vec<&str> = content.split_whitespace().collect();
        let (priority, rest) = match fields.as_slice() {
            [priority, rest @ ..] if rest.len() == 3 => (Some(*priority), rest),
            rest if rest.len() == 3 && three_fields_allowed => (None, rest),
            _ => {
                return Err(ValidationError::structural(
                    "SRV record content must have priority, weight, port and target",
                ))
            }
        };

        let priority = priority
            .map(|p| {
                u16_field(p).ok_or_else(|| {
                    ValidationError::range("Invalid value for the priority field of the SRV record.")
                })
            })
            .transpose()?;
        let weight = u16_field(rest[0]).ok_or_else(|| {
            ValidationError::range("Invalid value for the weight field of the SRV record.")
        })?;
        let port = u16_field(rest[1]).ok_or_else(|| {
            ValidationError::range("Invalid value for the port field of the SRV record.")
        })?;
        let target = rest[2];
        if target != "." && !hostnames.is_valid(target, false) {
            return Err(ValidationError::hostname("Invalid SRV target."));
        }

        Ok(Self {
            priority,
            weight,
            port,
            target: target.to_string(),
        })
    }

    /// Canonical text form.
    #[must_use]
    pub fn to_content(&self) -> String {
        let tail = format!("{} {} {}", self.weight, self.port, self.target);
        match self.priority {
            Some(priority) => format!("{priority} {tail}"),
            None => tail,
        }
    }

    #[must_use]
    pub fn advisories(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.target == "." {
            warnings.push("SRV target \".\" means the service is decidedly not available at this domain (RFC 2782).".to_string());
        } else if self.port == 0 {
            warnings.push("SRV port 0 is unusual for an available service.".to_string());
        }
        warnings
    }
}

fn u16_field(raw: &str) -> Option<u16> {
    parse_in_range(raw, 0, MAX_U16_FIELD).and_then(|v| u16::try_from(v).ok())
}

/// Validator for SRV records.
#[derive(Debug, Default, Clone, Copy)]
pub struct SrvValidator;

impl RecordValidator for SrvValidator {
    fn check(&self, record: &RecordInput, ctx: &ValidationContext<'_>) -> RecordOutcome {
        let name = check_srv_name(&record.name, ctx.hostnames)?;
        let parsed = SrvContent::parse(
            &record.content,
            ctx.hostnames,
            record.priority_field().is_some(),
        )?;
        let warnings = parsed.advisories();
        let priority = preference(
            record,
            DEFAULT_MX_PRIORITY,
            "Invalid value for the priority field of the SRV record.",
        )?;
        let ttl = ctx.ttl(record)?;

        finish(parsed.to_content(), name, priority, ttl, warnings)
    }
}

#[cfg(test)]
#[path = "srv_tests.rs"]
mod srv_tests;
