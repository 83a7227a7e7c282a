// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Validation and record store error types.
//!
//! This module provides the error taxonomy of the validation engine:
//! - [`ValidationError`] - a single hard violation that rejects a record
//! - [`ErrorKind`] - the category of a violation, independent of its message
//! - [`StoreError`] - failures of the [`crate::record_store::RecordStore`] collaborator
//!
//! Every [`ValidationError`] renders exactly its human-readable message through `Display`,
//! so the list of strings handed to callers is stable and deterministic.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Category of a validation failure.
///
/// Categories never change how a failure is reported to the caller. They exist so
/// callers and tests can reason about *why* a record was rejected without matching on
/// message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    /// Wrong field count or unparseable grammar
    Structural,
    /// Numeric value outside the allowed range
    Range,
    /// Value not in the allowed code set
    Enum,
    /// Malformed base64 or hexadecimal payload
    Encoding,
    /// Two fields that contradict each other
    CrossField,
    /// Conflict with records already present in the zone
    Referential,
    /// Name rejected by the hostname rules
    Hostname,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Structural => "StructuralError",
            Self::Range => "RangeError",
            Self::Enum => "EnumError",
            Self::Encoding => "EncodingError",
            Self::CrossField => "CrossFieldError",
            Self::Referential => "ReferentialError",
            Self::Hostname => "HostnameError",
        };
        f.write_str(name)
    }
}

/// A hard violation that blocks persistence of a record.
///
/// Construct errors with the category helpers ([`ValidationError::structural`],
/// [`ValidationError::range`], ...) rather than the variants directly.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Wrong field count, missing field or grammar that cannot be parsed
    ///
    /// Returned before any per-field check runs, e.g. a DS record with three fields.
    #[error("{message}")]
    Structural {
        /// Human-readable explanation
        message: String,
    },

    /// Numeric field outside the range allowed for the record type
    ///
    /// Includes priorities, TTLs, key tags, ports and SOA timers.
    #[error("{message}")]
    Range {
        /// Human-readable explanation naming the field and the expected range
        message: String,
    },

    /// Field value not part of the enumeration the record type allows
    #[error("{message}")]
    Enum {
        /// Human-readable explanation naming the field and the allowed set
        message: String,
    },

    /// Malformed base64 or hexadecimal payload
    #[error("{message}")]
    Encoding {
        /// Human-readable explanation
        message: String,
    },

    /// Fields that are individually valid but contradict each other
    ///
    /// The canonical case is a DS digest whose length does not match the declared
    /// digest type.
    #[error("{message}")]
    CrossField {
        /// Human-readable explanation
        message: String,
    },

    /// Conflict with records already stored for the zone
    ///
    /// Only produced by checks that consult the record store, including the case where
    /// the store itself could not answer.
    #[error("{message}")]
    Referential {
        /// Human-readable explanation
        message: String,
    },

    /// Name rejected by the hostname rules
    #[error("{message}")]
    Hostname {
        /// Human-readable explanation
        message: String,
    },
}

impl ValidationError {
    /// Build a [`ValidationError::Structural`] error.
    pub fn structural(message: impl Into<String>) -> Self {
        Self::Structural {
            message: message.into(),
        }
    }

    /// Build a [`ValidationError::Range`] error.
    pub fn range(message: impl Into<String>) -> Self {
        Self::Range {
            message: message.into(),
        }
    }

    /// Build a [`ValidationError::Enum`] error.
    pub fn invalid_choice(message: impl Into<String>) -> Self {
        Self::Enum {
            message: message.into(),
        }
    }

    /// Build a [`ValidationError::Encoding`] error.
    pub fn encoding(message: impl Into<String>) -> Self {
        Self::Encoding {
            message: message.into(),
        }
    }

    /// Build a [`ValidationError::CrossField`] error.
    pub fn cross_field(message: impl Into<String>) -> Self {
        Self::CrossField {
            message: message.into(),
        }
    }

    /// Build a [`ValidationError::Referential`] error.
    pub fn referential(message: impl Into<String>) -> Self {
        Self::Referential {
            message: message.into(),
        }
    }

    /// Build a [`ValidationError::Hostname`] error.
    pub fn hostname(message: impl Into<String>) -> Self {
        Self::Hostname {
            message: message.into(),
        }
    }

    /// Returns the category of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Structural { .. } => ErrorKind::Structural,
            Self::Range { .. } => ErrorKind::Range,
            Self::Enum { .. } => ErrorKind::Enum,
            Self::Encoding { .. } => ErrorKind::Encoding,
            Self::CrossField { .. } => ErrorKind::CrossField,
            Self::Referential { .. } => ErrorKind::Referential,
            Self::Hostname { .. } => ErrorKind::Hostname,
        }
    }

    /// Returns the human-readable message without the category.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Structural { message }
            | Self::Range { message }
            | Self::Enum { message }
            | Self::Encoding { message }
            | Self::CrossField { message }
            | Self::Referential { message }
            | Self::Hostname { message } => message,
        }
    }

    /// Returns a machine-readable reason code for this error.
    ///
    /// Used by reports that need a stable identifier next to the translated message.
    #[must_use]
    pub fn status_reason(&self) -> &'static str {
        match self.kind() {
            ErrorKind::Structural => "StructuralError",
            ErrorKind::Range => "RangeError",
            ErrorKind::Enum => "EnumError",
            ErrorKind::Encoding => "EncodingError",
            ErrorKind::CrossField => "CrossFieldError",
            ErrorKind::Referential => "ReferentialError",
            ErrorKind::Hostname => "HostnameError",
        }
    }

    /// Returns true if the error came from a zone-wide record store check.
    #[must_use]
    pub fn is_referential(&self) -> bool {
        self.kind() == ErrorKind::Referential
    }
}

/// Errors raised by a [`crate::record_store::RecordStore`] implementation.
///
/// The engine never propagates these to callers as-is. A failed read during a uniqueness
/// or conflict check becomes a [`ValidationError::Referential`] so that a record is
/// never accepted on the basis of a query that did not run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backing store could not be reached at all
    #[error("record store unavailable: {reason}")]
    Unavailable {
        /// Specific reason for the failure
        reason: String,
    },

    /// A single query failed
    #[error("record store query '{query}' failed: {reason}")]
    QueryFailed {
        /// Name of the query that failed
        query: String,
        /// Specific reason for the failure
        reason: String,
    },
}

impl From<StoreError> for ValidationError {
    fn from(err: StoreError) -> Self {
        ValidationError::referential(format!(
            "Could not verify uniqueness of the record: {err}"
        ))
    }
}
