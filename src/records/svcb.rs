// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! SVCB and HTTPS record validation (RFC 9460).
//!
//! Content is `priority target [key=value ...]`. Priority 0 selects AliasMode, which
//! forwards to `target` and must carry no parameters. Any other priority is ServiceMode.
//! The priority lives in the content, so the separate priority field must stay empty.

use std::collections::HashSet;

use crate::constants::MAX_U16_FIELD;
use crate::primitives::encoding::is_base64;
use crate::primitives::hostname::HostnameValidator;
use crate::primitives::numeric::parse_in_range;
use crate::primitives::text::check_printable;
use crate::record::RecordInput;
use crate::registry::RecordType;
use crate::records::{finish, RecordOutcome, RecordValidator, ValidationContext};
use crate::validation_errors::ValidationError;

/// Parameter keys with a registered meaning.
const KNOWN_KEYS: &[&str] = &[
    "mandatory",
    "alpn",
    "no-default-alpn",
    "port",
    "ipv4hint",
    "ech",
    "ipv6hint",
    "dohpath",
    "ohttp",
];

/// One `key[=value]` service parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvcParam {
    pub key: String,
    pub value: Option<String>,
}

/// Parsed SVCB/HTTPS content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvcbContent {
    pub priority: u16,
    /// `.` or a host name
    pub target: String,
    pub params: Vec<SvcParam>,
}

impl SvcbContent {
    /// Parse SVCB-style content for `type_name`.
    ///
    /// # Errors
    ///
    /// Returns the first violation found, in field order.
    pub fn parse(
        content: &str,
        type_name: &str,
        hostnames: &HostnameValidator,
    ) -> Result<Self, ValidationError> {
        let mut fields = content.split_whitespace();
        let (Some(priority), Some(target)) = (fields.next(), fields.next()) else {
            return Err(ValidationError::structural(format!(
                "{type_name} record must start with a priority and target: <priority> <target> [<params>...]"
            )));
        };
        if !priority.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::structural(format!(
                "{type_name} record must start with a priority and target: <priority> <target> [<params>...]"
            )));
        }
        let priority = parse_in_range(priority, 0, MAX_U16_FIELD)
            .and_then(|p| u16::try_from(p).ok())
            .ok_or_else(|| {
                ValidationError::range(format!(
                    "{type_name} priority must be between 0 and 65535."
                ))
            })?;

        if target != "." && !hostnames.is_valid(target, false) {
            return Err(ValidationError::hostname(format!(
                "{type_name} target must be either \".\" (for AliasMode) or a valid hostname."
            )));
        }

        let params = fields
            .map(|raw| parse_param(raw, type_name))
            .collect::<Result<Vec<_>, _>>()?;

        if priority == 0 && !params.is_empty() {
            return Err(ValidationError::cross_field(format!(
                "{type_name} AliasMode records (priority 0) must not have parameters."
            )));
        }

        let parsed = Self {
            priority,
            target: target.to_string(),
            params,
        };
        parsed.check_params(type_name)?;
        Ok(parsed)
    }

    fn keys(&self) -> HashSet<&str> {
        self.params.iter().map(|p| p.key.as_str()).collect()
    }

    fn check_params(&self, t: &str) -> Result<(), ValidationError> {
        let mut seen = HashSet::new();
        for param in &self.params {
            if !seen.insert(param.key.as_str()) {
                return Err(ValidationError::cross_field(format!(
                    "{t} parameter {} must not appear more than once.",
                    param.key
                )));
            }
            check_value(param, t)?;
        }

        let present = self.keys();
        for param in self.params.iter().filter(|p| p.key == "mandatory") {
            for key in param.value.as_deref().unwrap_or_default().split(',') {
                if key == "mandatory" {
                    return Err(ValidationError::cross_field(format!(
                        "{t} mandatory parameter must not list itself."
                    )));
                }
                if !present.contains(key) {
                    return Err(ValidationError::cross_field(format!(
                        "{t} mandatory parameter lists \"{key}\", which is not present in the record."
                    )));
                }
            }
        }
        Ok(())
    }

    /// Canonical text form.
    #[must_use]
    pub fn to_content(&self) -> String {
        let mut parts = vec![self.priority.to_string(), self.target.clone()];
        parts.extend(self.params.iter().map(|p| match &p.value {
            Some(value) => format!("{}={value}", p.key),
            None => p.key.clone(),
        }));
        parts.join(" ")
    }

    #[must_use]
    pub fn advisories(&self, type_name: &str) -> Vec<String> {
        let mut warnings: Vec<String> = self
            .params
            .iter()
            .filter(|p| !KNOWN_KEYS.contains(&p.key.as_str()) && generic_key_number(&p.key).is_none())
            .map(|p| format!("{type_name} parameter \"{}\" is unknown and is passed through unchecked.", p.key))
            .collect();

        let keys = self.keys();
        if keys.contains("no-default-alpn") && !keys.contains("alpn") {
            warnings.push(format!(
                "{type_name} no-default-alpn without alpn leaves clients with no protocol to use."
            ));
        }
        if self.priority == 0 && self.target == "." {
            warnings.push(format!(
                "{type_name} AliasMode with target \".\" indicates that the service is not available."
            ));
        }
        warnings
    }
}

/// The number of a `keyNNNN` generic key.
fn generic_key_number(key: &str) -> Option<u64> {
    let digits = key.strip_prefix("key")?;
    if digits.is_empty() {
        return None;
    }
    parse_in_range(digits, 0, MAX_U16_FIELD)
}

fn parse_param(raw: &str, t: &str) -> Result<SvcParam, ValidationError> {
    let malformed = || ValidationError::structural(format!("{t} parameters must be in \"key=value\" format."));
    let (key, value) = match raw.split_once('=') {
        Some((key, value)) if !value.is_empty() => (key, Some(value.to_string())),
        Some(_) => return Err(malformed()),
        None => (raw, None),
    };
    let key_ok = !key.is_empty()
        && key
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-');
    if !key_ok || (value.is_none() && key != "no-default-alpn" && key != "ohttp") {
        return Err(malformed());
    }
    Ok(SvcParam {
        key: key.to_string(),
        value,
    })
}

fn check_value(param: &SvcParam, t: &str) -> Result<(), ValidationError> {
    let value = param.value.as_deref().unwrap_or_default();
    match param.key.as_str() {
        "alpn" => {
            let ok = value.split(',').all(|id| {
                !id.is_empty()
                    && id
                        .bytes()
                        .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'.' || b == b'/')
            });
            if !ok {
                return Err(ValidationError::structural(format!(
                    "{t} alpn parameter must be a comma-separated list of protocol names."
                )));
            }
        }
        "ipv4hint" => {
            if !value.split(',').all(|ip| ip.trim().parse::<std::net::Ipv4Addr>().is_ok()) {
                return Err(ValidationError::structural(format!(
                    "{t} ipv4hint must contain valid IPv4 addresses."
                )));
            }
        }
        "ipv6hint" => {
            if !value.split(',').all(|ip| ip.trim().parse::<std::net::Ipv6Addr>().is_ok()) {
                return Err(ValidationError::structural(format!(
                    "{t} ipv6hint must contain valid IPv6 addresses."
                )));
            }
        }
        "port" => {
            if parse_in_range(value, 1, MAX_U16_FIELD).is_none() {
                return Err(ValidationError::range(format!(
                    "{t} port must be between 1 and 65535."
                )));
            }
        }
        "ech" => {
            if !is_base64(value) {
                return Err(ValidationError::encoding(format!(
                    "{t} ech parameter must be a Base64 encoded ECHConfigList."
                )));
            }
        }
        "dohpath" => {
            if !value.starts_with('/') || !value.contains("{?dns}") {
                return Err(ValidationError::structural(format!(
                    "{t} dohpath must be a relative URI template containing the \"dns\" variable (RFC 9461)."
                )));
            }
        }
        key if key.starts_with("key") && key.len() > 3 => {
            if generic_key_number(key).is_none() {
                return Err(ValidationError::range(format!(
                    "{t} generic parameter keys must be key0 to key65535."
                )));
            }
        }
        _ => {}
    }
    Ok(())
}

/// Validator for SVCB and HTTPS records.
#[derive(Debug, Clone, Copy)]
pub struct SvcbValidator {
    record_type: RecordType,
}

impl SvcbValidator {
    /// SVCB
    pub const SVCB: Self = Self {
        record_type: RecordType::Svcb,
    };
    /// HTTPS
    pub const HTTPS: Self = Self {
        record_type: RecordType::Https,
    };

    /// The record type this instance validates.
    #[must_use]
    pub fn record_type(&self) -> RecordType {
        self.record_type
    }
}

impl RecordValidator for SvcbValidator {
    fn check(&self, record: &RecordInput, ctx: &ValidationContext<'_>) -> RecordOutcome {
        let t = self.record_type.as_str();
        let name = ctx.hostname(&record.name, false)?;
        check_printable(&record.content)?;

        let parsed = SvcbContent::parse(&record.content, t, ctx.hostnames)?;
        let warnings = parsed.advisories(t);
        let ttl = ctx.ttl(record)?;

        if record
            .priority_field()
            .is_some_and(|raw| parse_in_range(raw, 0, 0).is_none())
        {
            return Err(ValidationError::range(format!(
                "Priority field should not be used for {t} records. The priority is the first field of the content."
            ))
            .into());
        }

        finish(parsed.to_content(), name, 0, ttl, warnings)
    }
}

#[cfg(test)]
#[path = "svcb_tests.rs"]
mod svcb_tests;
