// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! # zone-validator - DNS record validation engine
//!
//! zone-validator decides whether a DNS resource record submitted for a zone is
//! acceptable before it is persisted, and normalizes it for storage. Every record type
//! has its own grammar and RFC rules; a small set of rules (CNAME exclusivity, NS/MX
//! targets) also look at the records the zone already holds.
//!
//! ## Overview
//!
//! - Hard violations block persistence and come back as an ordered list of messages
//! - Advisory warnings travel alongside a valid result and never block
//! - Validation is synchronous and side-effect free; the only outside reads go through
//!   the [`record_store::RecordStore`] trait
//!
//! ## Modules
//!
//! - [`registry`] - record type dispatch and the single entry point
//! - [`records`] - one validator per record type
//! - [`primitives`] - hostname, IP, TTL, text, encoding and numeric checks
//! - [`conflicts`] - CNAME coexistence rules backed by the record store
//! - [`zone_readiness`] - DNSSEC pre-flight checks for a whole zone
//! - [`record_store`] - the read-only store collaborator and an in-memory implementation
//! - [`config`] - engine configuration
//! - [`report`] - serializable validation reports
//!
//! ## Example
//!
//! ```rust
//! use zone_validator::config::ValidatorConfig;
//! use zone_validator::record::RecordInput;
//! use zone_validator::registry::Registry;
//!
//! let registry = Registry::new(ValidatorConfig::default());
//!
//! let mx = RecordInput::new("MX", "@", "mail.example.com").with_zone_name("example.com");
//! let result = registry.validate(&mx);
//! assert!(result.is_valid());
//! assert_eq!(result.data().map(|r| r.priority), Some(10));
//!
//! let aaaa = RecordInput::new("AAAA", "www.example.com", "::1");
//! assert!(!registry.validate(&aaaa).is_valid());
//! ```

pub mod config;
pub mod conflicts;
pub mod constants;
pub mod primitives;
pub mod record;
pub mod record_store;
pub mod records;
pub mod registry;
pub mod report;
pub mod validation_errors;
pub mod validation_result;
pub mod zone_readiness;

#[cfg(test)]
mod validation_errors_tests;
#[cfg(test)]
mod validation_result_tests;
