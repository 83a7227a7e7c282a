// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Record-type validators.
//!
//! Every DNS record type has one validator implementing [`RecordValidator`]. A validator
//! receives the raw [`RecordInput`] and a [`ValidationContext`] and produces a
//! [`ValidationResult`] holding either the normalized [`ValidatedRecord`] plus advisory
//! warnings, or the ordered list of hard violations.
//!
//! Validators follow the same shape:
//!
//! 1. Check the owner name through the hostname primitive
//! 2. Parse `content` into a typed struct, failing on the first structural problem
//! 3. Compute advisory warnings from the parsed value with a pure function
//! 4. Resolve the priority and TTL fields
//!
//! ## Modules
//!
//! - [`address`] - A and AAAA
//! - [`cname`] - CNAME
//! - [`soa`] - SOA
//! - [`mx`] - MX and KX
//! - [`target`] - single-target types: NS, PTR, DNAME, ALIAS, MR, MB, MG, AFSDB
//! - [`txt`], [`spf`], [`dmarc`] - TXT-like policy records
//! - [`caa`] - CAA
//! - [`ds`], [`dnskey`], [`nsec`], [`rrsig`] - DNSSEC records
//! - [`tsig`] - TSIG and TKEY
//! - [`tlsa`], [`sshfp`] - certificate and key fingerprints
//! - [`svcb`], [`uri`], [`naptr`], [`srv`] - service location records
//! - [`loc`], [`apl`], [`cert`], [`dhcid`], [`hinfo`], [`minfo`], [`rp`], [`eui`], [`ilnp`],
//!   [`openpgpkey`], [`csync`], [`zonemd`], [`ipseckey`] - the remaining modeled types
//! - [`lua`] - PowerDNS LUA scripts
//! - [`default`] - fallback for unmodeled types

pub mod address;
pub mod apl;
pub mod caa;
pub mod cert;
pub mod cname;
pub mod csync;
pub mod default;
pub mod dhcid;
pub mod dmarc;
pub mod dnskey;
pub(crate) mod dnssec;
pub mod ds;
pub mod eui;
pub mod hinfo;
pub mod ilnp;
pub mod ipseckey;
pub mod loc;
pub mod lua;
pub mod minfo;
pub mod mx;
pub mod naptr;
pub mod nsec;
pub mod openpgpkey;
pub mod rp;
pub mod rrsig;
pub mod soa;
pub mod spf;
pub mod srv;
pub mod sshfp;
pub mod svcb;
pub mod target;
pub mod tlsa;
pub mod tsig;
pub mod txt;
pub mod uri;
pub mod zonemd;

use crate::config::ValidatorConfig;
use crate::constants::MAX_U16_FIELD;
use crate::primitives::hostname::HostnameValidator;
use crate::primitives::numeric::parse_in_range;
use crate::primitives::ttl::check_ttl;
use crate::record::{RecordInput, ValidatedRecord};
use crate::record_store::RecordStore;
use crate::validation_errors::ValidationError;
use crate::validation_result::{Rejection, ValidationResult};

/// What a validator produces internally before conversion into a [`ValidationResult`].
pub type RecordOutcome = Result<(ValidatedRecord, Vec<String>), Rejection>;

/// A validator for one or more DNS record types.
///
/// Implementations are stateless; one static instance serves every call.
pub trait RecordValidator: Send + Sync {
    /// Validate a record, short-circuiting on the first hard violation.
    ///
    /// # Errors
    ///
    /// Returns a [`Rejection`] describing the violations.
    fn check(&self, record: &RecordInput, ctx: &ValidationContext<'_>) -> RecordOutcome;

    /// Validate a record and return the uniform result.
    fn validate(
        &self,
        record: &RecordInput,
        ctx: &ValidationContext<'_>,
    ) -> ValidationResult<ValidatedRecord> {
        self.check(record, ctx).into()
    }
}

/// Read-only state shared by every validator call.
#[derive(Clone, Copy)]
pub struct ValidationContext<'a> {
    /// Engine configuration
    pub config: &'a ValidatorConfig,
    /// Hostname rules built from the configuration
    pub hostnames: &'a HostnameValidator,
    /// Persisted records, for the checks that need them
    pub store: Option<&'a dyn RecordStore>,
}

impl<'a> ValidationContext<'a> {
    /// A context without a record store.
    #[must_use]
    pub fn new(config: &'a ValidatorConfig, hostnames: &'a HostnameValidator) -> Self {
        Self {
            config,
            hostnames,
            store: None,
        }
    }

    /// Attach a record store.
    #[must_use]
    pub fn with_store(mut self, store: &'a dyn RecordStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Check a hostname and return it without its trailing dot.
    ///
    /// # Errors
    ///
    /// Returns the hostname violations.
    pub fn hostname(&self, name: &str, allow_wildcard: bool) -> Result<String, Rejection> {
        self.hostnames.check(name, allow_wildcard)
    }

    /// Resolve the TTL field, defaulting to the record's or the configured default.
    ///
    /// # Errors
    ///
    /// Returns a range error for a non-numeric or out-of-range TTL.
    pub fn ttl(&self, record: &RecordInput) -> Result<i32, ValidationError> {
        check_ttl(
            record.ttl_field(),
            record.default_ttl.unwrap_or(self.config.default_ttl),
        )
    }
}

impl std::fmt::Debug for ValidationContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationContext")
            .field("config", self.config)
            .field("hostnames", self.hostnames)
            .field("store", &self.store.is_some())
            .finish()
    }
}

/// Require the priority field to be blank or `0`.
///
/// # Errors
///
/// Returns a range error naming the record type.
pub(crate) fn zero_priority(record: &RecordInput, type_name: &str) -> Result<u16, ValidationError> {
    match record.priority_field() {
        None => Ok(0),
        Some(raw) if parse_in_range(raw, 0, 0).is_some() => Ok(0),
        Some(_) => Err(ValidationError::range(format!(
            "Invalid value for priority field. {type_name} records must have priority value of 0."
        ))),
    }
}

/// Resolve a preference-style priority field: blank takes `default`, otherwise 0-65535.
///
/// # Errors
///
/// Returns a range error carrying `message`.
pub(crate) fn preference(
    record: &RecordInput,
    default: u16,
    message: &str,
) -> Result<u16, ValidationError> {
    match record.priority_field() {
        None => Ok(default),
        Some(raw) => parse_in_range(raw, 0, MAX_U16_FIELD)
            .and_then(|value| u16::try_from(value).ok())
            .ok_or_else(|| ValidationError::range(message)),
    }
}

/// Split content on whitespace and require exactly `N` fields.
///
/// # Errors
///
/// Returns a structural error carrying `message`.
pub(crate) fn exact_fields<'c, const N: usize>(
    content: &'c str,
    message: &str,
) -> Result<[&'c str; N], ValidationError> {
    let fields: Vec<&str> = content.split_whitespace().collect();
    <[&str; N]>::try_from(fields).map_err(|_| ValidationError::structural(message))
}

/// Build the successful outcome.
pub(crate) fn finish(
    content: String,
    name: String,
    priority: u16,
    ttl: i32,
    warnings: Vec<String>,
) -> RecordOutcome {
    Ok((
        ValidatedRecord {
            content,
            name,
            priority,
            ttl,
        },
        warnings,
    ))
}

#[cfg(test)]
pub(crate) mod test_support;
