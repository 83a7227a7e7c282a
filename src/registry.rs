// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! The validator registry and single entry point of the engine.
//!
//! Record types form the closed [`RecordType`] enumeration and [`validator_for`] maps each
//! one to its validator with an exhaustive `match`, so adding a type without a validator
//! fails to compile. Type tags that are not modeled fall back to
//! [`DefaultValidator`].
//!
//! [`Registry`] is built once from a [`ValidatorConfig`] and an optional
//! [`RecordStore`], then shared by reference between callers. It holds no mutable state.
//!
//! # Example
//!
//! ```rust
//! use zone_validator::config::ValidatorConfig;
//! use zone_validator::record::RecordInput;
//! use zone_validator::registry::Registry;
//!
//! let registry = Registry::new(ValidatorConfig::default());
//! let result = registry.validate(&RecordInput::new("A", "www", "192.0.2.10").with_zone_name("example.com"));
//!
//! assert!(result.is_valid());
//! assert_eq!(result.data().map(|r| r.name.as_str()), Some("www.example.com"));
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use tracing::debug;

use crate::config::ValidatorConfig;
use crate::conflicts::ConflictChecker;
use crate::constants::EXTRA_TYPE_MNEMONICS;
use crate::primitives::hostname::{normalize_record_name, HostnameValidator};
use crate::primitives::numeric::parse_unsigned;
use crate::record::{RecordInput, ValidatedRecord};
use crate::record_store::RecordStore;
use crate::records::address::{AValidator, AaaaValidator};
use crate::records::apl::AplValidator;
use crate::records::caa::CaaValidator;
use crate::records::cert::CertValidator;
use crate::records::cname::CnameValidator;
use crate::records::csync::CsyncValidator;
use crate::records::default::DefaultValidator;
use crate::records::dhcid::DhcidValidator;
use crate::records::dmarc::DmarcValidator;
use crate::records::dnskey::{DnskeyValidator, KeyValidator, RkeyValidator};
use crate::records::ds::DsValidator;
use crate::records::eui::EuiValidator;
use crate::records::hinfo::HinfoValidator;
use crate::records::ilnp::{L32Validator, L64Validator, LpValidator, NidValidator};
use crate::records::ipseckey::IpseckeyValidator;
use crate::records::loc::LocValidator;
use crate::records::lua::LuaValidator;
use crate::records::minfo::MinfoValidator;
use crate::records::mx::{KxValidator, MxValidator};
use crate::records::naptr::NaptrValidator;
use crate::records::nsec::{Nsec3ParamValidator, Nsec3Validator, NsecValidator};
use crate::records::openpgpkey::OpenpgpkeyValidator;
use crate::records::rp::RpValidator;
use crate::records::rrsig::RrsigValidator;
use crate::records::soa::SoaValidator;
use crate::records::spf::SpfValidator;
use crate::records::srv::SrvValidator;
use crate::records::sshfp::SshfpValidator;
use crate::records::svcb::SvcbValidator;
use crate::records::target::{AfsdbValidator, TargetValidator};
use crate::records::tlsa::TlsaValidator;
use crate::records::tsig::{TkeyValidator, TsigValidator};
use crate::records::txt::TxtValidator;
use crate::records::uri::UriValidator;
use crate::records::zonemd::ZonemdValidator;
use crate::records::{RecordValidator, ValidationContext};
use crate::validation_result::ValidationResult;

/// Declares [`RecordType`] together with its mnemonic table.
macro_rules! record_types {
    ($($(#[$meta:meta])* $variant:ident => $mnemonic:literal,)+) => {
        /// A record type with a dedicated validator.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum RecordType {
            $($(#[$meta])* $variant,)+
        }

        impl RecordType {
            /// Every modeled record type, in mnemonic order.
            pub const ALL: &'static [RecordType] = &[$(RecordType::$variant,)+];

            /// The uppercase mnemonic.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(RecordType::$variant => $mnemonic,)+
                }
            }
        }

        impl FromStr for RecordType {
            type Err = UnknownRecordType;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let tag = s.trim();
                $(
                    if tag.eq_ignore_ascii_case($mnemonic) {
                        return Ok(RecordType::$variant);
                    }
                )+
                Err(UnknownRecordType(tag.to_string()))
            }
        }
    };
}

record_types! {
    /// IPv4 address
    A => "A",
    /// IPv6 address
    Aaaa => "AAAA",
    /// AFS database location
    Afsdb => "AFSDB",
    /// Apex alias, resolved by the authoritative server
    Alias => "ALIAS",
    /// Address prefix list
    Apl => "APL",
    Caa => "CAA",
    Cdnskey => "CDNSKEY",
    Cds => "CDS",
    Cert => "CERT",
    Cname => "CNAME",
    Csync => "CSYNC",
    Dhcid => "DHCID",
    Dlv => "DLV",
    /// DMARC policy, stored as TXT at `_dmarc.<domain>`
    Dmarc => "DMARC",
    Dname => "DNAME",
    Dnskey => "DNSKEY",
    Ds => "DS",
    Eui48 => "EUI48",
    Eui64 => "EUI64",
    Hinfo => "HINFO",
    Https => "HTTPS",
    Ipseckey => "IPSECKEY",
    Key => "KEY",
    Kx => "KX",
    L32 => "L32",
    L64 => "L64",
    Loc => "LOC",
    Lp => "LP",
    /// PowerDNS Lua script
    Lua => "LUA",
    Mb => "MB",
    Mg => "MG",
    Minfo => "MINFO",
    Mr => "MR",
    Mx => "MX",
    Naptr => "NAPTR",
    Nid => "NID",
    Ns => "NS",
    Nsec => "NSEC",
    Nsec3 => "NSEC3",
    Nsec3param => "NSEC3PARAM",
    Openpgpkey => "OPENPGPKEY",
    Ptr => "PTR",
    Rkey => "RKEY",
    Rp => "RP",
    Rrsig => "RRSIG",
    Smimea => "SMIMEA",
    Soa => "SOA",
    Spf => "SPF",
    Srv => "SRV",
    Sshfp => "SSHFP",
    Svcb => "SVCB",
    Tkey => "TKEY",
    Tlsa => "TLSA",
    Tsig => "TSIG",
    Txt => "TXT",
    Uri => "URI",
    Zonemd => "ZONEMD",
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A type tag that is not one of the modeled [`RecordType`]s.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported record type: {0}")]
pub struct UnknownRecordType(pub String);

/// The validator for a modeled record type.
#[must_use]
pub fn validator_for(record_type: RecordType) -> &'static dyn RecordValidator {
    match record_type {
        RecordType::A => &AValidator,
        RecordType::Aaaa => &AaaaValidator,
        RecordType::Afsdb => &AfsdbValidator,
        RecordType::Alias => &TargetValidator::ALIAS,
        RecordType::Apl => &AplValidator,
        RecordType::Caa => &CaaValidator,
        RecordType::Cdnskey => &DnskeyValidator::CDNSKEY,
        RecordType::Cds => &DsValidator::CDS,
        RecordType::Cert => &CertValidator,
        RecordType::Cname => &CnameValidator,
        RecordType::Csync => &CsyncValidator,
        RecordType::Dhcid => &DhcidValidator,
        RecordType::Dlv => &DsValidator::DLV,
        RecordType::Dmarc => &DmarcValidator,
        RecordType::Dname => &TargetValidator::DNAME,
        RecordType::Dnskey => &DnskeyValidator::DNSKEY,
        RecordType::Ds => &DsValidator::DS,
        RecordType::Eui48 => &EuiValidator::EUI48,
        RecordType::Eui64 => &EuiValidator::EUI64,
        RecordType::Hinfo => &HinfoValidator,
        RecordType::Https => &SvcbValidator::HTTPS,
        RecordType::Ipseckey => &IpseckeyValidator,
        RecordType::Key => &KeyValidator,
        RecordType::Kx => &KxValidator,
        RecordType::L32 => &L32Validator,
        RecordType::L64 => &L64Validator,
        RecordType::Loc => &LocValidator,
        RecordType::Lp => &LpValidator,
        RecordType::Lua => &LuaValidator,
        RecordType::Mb => &TargetValidator::MB,
        RecordType::Mg => &TargetValidator::MG,
        RecordType::Minfo => &MinfoValidator,
        RecordType::Mr => &TargetValidator::MR,
        RecordType::Mx => &MxValidator,
        RecordType::Naptr => &NaptrValidator,
        RecordType::Nid => &NidValidator,
        RecordType::Ns => &TargetValidator::NS,
        RecordType::Nsec => &NsecValidator,
        RecordType::Nsec3 => &Nsec3Validator,
        RecordType::Nsec3param => &Nsec3ParamValidator,
        RecordType::Openpgpkey => &OpenpgpkeyValidator,
        RecordType::Ptr => &TargetValidator::PTR,
        RecordType::Rkey => &RkeyValidator,
        RecordType::Rp => &RpValidator,
        RecordType::Rrsig => &RrsigValidator,
        RecordType::Smimea => &TlsaValidator::SMIMEA,
        RecordType::Soa => &SoaValidator,
        RecordType::Spf => &SpfValidator,
        RecordType::Srv => &SrvValidator,
        RecordType::Sshfp => &SshfpValidator,
        RecordType::Svcb => &SvcbValidator::SVCB,
        RecordType::Tkey => &TkeyValidator,
        RecordType::Tlsa => &TlsaValidator::TLSA,
        RecordType::Tsig => &TsigValidator,
        RecordType::Txt => &TxtValidator,
        RecordType::Uri => &UriValidator,
        RecordType::Zonemd => &ZonemdValidator,
    }
}

/// Returns true if `mnemonic` names a DNS record type.
///
/// Used by type lists inside record content (NSEC bitmaps, RRSIG type covered). Accepts
/// the modeled types, the RFC 3597 `TYPEnnn` form and any mnemonic the DNS protocol
/// library knows about.
#[must_use]
pub fn is_known_type_mnemonic(mnemonic: &str) -> bool {
    let mnemonic = mnemonic.trim();
    if mnemonic.is_empty() {
        return false;
    }
    if let Ok(record_type) = RecordType::from_str(mnemonic) {
        return record_type != RecordType::Dmarc;
    }
    if EXTRA_TYPE_MNEMONICS
        .iter()
        .any(|extra| extra.eq_ignore_ascii_case(mnemonic))
    {
        return true;
    }
    if let Some(number) = mnemonic
        .get(..4)
        .filter(|prefix| prefix.eq_ignore_ascii_case("TYPE"))
        .and_then(|_| mnemonic.get(4..))
    {
        return parse_unsigned(number).is_some_and(|n| n <= u64::from(u16::MAX));
    }
    hickory_proto::rr::RecordType::from_str(&mnemonic.to_ascii_uppercase())
        .is_ok_and(|known| !matches!(known, hickory_proto::rr::RecordType::Unknown(_)))
}

/// The entry point: dispatches records to their validators and applies the zone-level
/// checks that need the record store.
pub struct Registry {
    config: ValidatorConfig,
    hostnames: HostnameValidator,
    store: Option<Arc<dyn RecordStore>>,
}

impl Registry {
    /// A registry without a record store. Store-backed checks are skipped.
    #[must_use]
    pub fn new(config: ValidatorConfig) -> Self {
        let hostnames = HostnameValidator::new(&config.hostname);
        Self {
            config,
            hostnames,
            store: None,
        }
    }

    /// A registry whose conflict checks query `store`.
    #[must_use]
    pub fn with_store(config: ValidatorConfig, store: Arc<dyn RecordStore>) -> Self {
        Self {
            store: Some(store),
            ..Self::new(config)
        }
    }

    /// The configuration this registry was built with.
    #[must_use]
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// The validator for a type tag, matched case-insensitively.
    ///
    /// Unknown tags resolve to the default validator.
    #[must_use]
    pub fn get_validator(&self, record_type: &str) -> &'static dyn RecordValidator {
        match RecordType::from_str(record_type) {
            Ok(modeled) => validator_for(modeled),
            Err(_) => &DefaultValidator,
        }
    }

    /// Validate one record.
    ///
    /// Runs, in order: owner-name normalization against the zone, the existing-CNAME
    /// check, the record-type validator, and for NS and MX the check that the target is
    /// not an alias. The store checks run only when a store is attached.
    pub fn validate(&self, input: &RecordInput) -> ValidationResult<ValidatedRecord> {
        let record_type = RecordType::from_str(&input.record_type).ok();

        let mut record = input.clone();
        if let Some(zone) = input.zone.as_deref() {
            record.name = normalize_record_name(&input.name, zone);
        }

        debug!(
            record_type = %input.record_type,
            name = %record.name,
            modeled = record_type.is_some(),
            "Dispatching record to validator"
        );

        let checker = self.store.as_deref().map(ConflictChecker::new);

        if let Some(checker) = &checker {
            if record_type != Some(RecordType::Cname) {
                if let Err(e) = checker.check_existing_cname(
                    &record.name,
                    record.zone_id,
                    record.existing_record_id(),
                ) {
                    debug!(name = %record.name, error = %e, "Record conflicts with a CNAME");
                    return ValidationResult::invalid(e);
                }
            }
        }

        let mut ctx = ValidationContext::new(&self.config, &self.hostnames);
        if let Some(store) = self.store.as_deref() {
            ctx = ctx.with_store(store);
        }
        let result = self.get_validator(&input.record_type).validate(&record, &ctx);

        if let (Some(checker), Some(RecordType::Ns | RecordType::Mx)) = (&checker, record_type) {
            if let Some(target) = result
                .data()
                .map(|validated| validated.content.clone())
                .filter(|target| target != ".")
            {
                if let Err(e) = checker.check_non_alias_target(&target) {
                    debug!(target = %target, error = %e, "Target is an alias");
                    return ValidationResult::invalid(e);
                }
            }
        }

        debug!(
            record_type = %input.record_type,
            name = %record.name,
            valid = result.is_valid(),
            warnings = result.warnings().len(),
            errors = result.errors().len(),
            "Record validated"
        );
        result
    }

    /// Validate every record independently, preserving order.
    pub fn validate_batch(&self, records: &[RecordInput]) -> Vec<ValidationResult<ValidatedRecord>> {
        records.iter().map(|record| self.validate(record)).collect()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("config", &self.config)
            .field("store", &self.store.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod registry_tests;
