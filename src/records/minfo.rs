// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! MINFO record validation (RFC 1035 section 3.3.7).
//!
//! Content is `rmailbx emailbx`: the mailbox responsible for a mailing list and the
//! mailbox that receives errors about it. Either may be `.`.

use crate::primitives::hostname::HostnameValidator;
use crate::primitives::text::check_printable;
use crate::record::RecordInput;
use crate::records::{
    exact_fields, finish, zero_priority, RecordOutcome, RecordValidator, ValidationContext,
};
use crate::validation_errors::ValidationError;

/// Parsed MINFO content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinfoContent {
    pub responsible_mailbox: String,
    pub error_mailbox: String,
}

impl MinfoContent {
    /// Parse MINFO content.
    ///
    /// # Errors
    ///
    /// Returns an error for a wrong field count or an invalid mailbox name.
    pub fn parse(content: &str, hostnames: &HostnameValidator) -> Result<Self, ValidationError> {
        let [rmailbx, emailbx] = exact_fields::<2>(
            content,
            "MINFO record must contain exactly two domain names: responsible mailbox and error mailbox.",
        )?;
        if rmailbx != "." && !hostnames.is_valid(rmailbx, false) {
            return Err(ValidationError::hostname(
                "MINFO responsible mailbox (RMAILBX) must be a valid domain name.",
            ));
        }
        if emailbx != "." && !hostnames.is_valid(emailbx, false) {
            return Err(ValidationError::hostname(
                "MINFO error mailbox (EMAILBX) must be a valid domain name.",
            ));
        }
        Ok(Self {
            responsible_mailbox: rmailbx.to_string(),
            error_mailbox: emailbx.to_string(),
        })
    }

    /// Usage advice for a parsed record.
    #[must_use]
    pub fn advisories(&self) -> Vec<String> {
        let mut warnings = vec![
            "MINFO is an EXPERIMENTAL record type (RFC 1035) with little resolver or mail software support.".to_string(),
        ];

        if self.responsible_mailbox == "." {
            warnings.push(
                "RMAILBX is the root domain: the owner of the MINFO record is responsible for the list.".to_string(),
            );
        } else {
            let local_part = self
                .responsible_mailbox
                .split('.')
                .next()
                .unwrap_or_default();
            if !local_part.to_ascii_lowercase().ends_with("-request") {
                warnings.push(
                    "By convention the responsible mailbox of a list is the mailbox \"list-name-request\".".to_string(),
                );
            }
        }

        if self.error_mailbox == "." {
            warnings.push(
                "EMAILBX is the root domain: errors should be returned to the sender of the message.".to_string(),
            );
        }

        if self.responsible_mailbox != "."
            && self
                .responsible_mailbox
                .trim_end_matches('.')
                .eq_ignore_ascii_case(self.error_mailbox.trim_end_matches('.'))
        {
            warnings.push(
                "The responsible and error mailboxes are identical. A separate error mailbox keeps bounces away from the list owner.".to_string(),
            );
        }
        warnings
    }
}

/// Validator for MINFO records.
#[derive(Debug, Default, Clone, Copy)]
pub struct MinfoValidator;

impl RecordValidator for MinfoValidator {
    fn check(&self, record: &RecordInput, ctx: &ValidationContext<'_>) -> RecordOutcome {
        let name = ctx.hostname(&record.name, true)?;
        if record.content.trim().is_empty() {
            return Err(ValidationError::structural("MINFO record content cannot be empty.").into());
        }
        check_printable(&record.content)?;
        let parsed = MinfoContent::parse(&record.content, ctx.hostnames)?;
        let warnings = parsed.advisories();

        let ttl = ctx.ttl(record)?;
        let priority = zero_priority(record, "MINFO")?;

        finish(
            format!("{} {}", parsed.responsible_mailbox, parsed.error_mailbox),
            name,
            priority,
            ttl,
            warnings,
        )
    }
}

#[cfg(test)]
#[path = "minfo_tests.rs"]
mod minfo_tests;
