// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! The uniform outcome type returned by every validator.
//!
//! A [`ValidationResult`] is either `Valid` (data plus advisory warnings) or `Invalid`
//! (a non-empty list of errors). Internally validators work with
//! `Result<T, Rejection>` so that `?` short-circuits on the first hard violation;
//! the conversion into a [`ValidationResult`] happens once, at the validator boundary.

use crate::validation_errors::ValidationError;

/// Outcome of a validation call.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationResult<T> {
    /// The input is acceptable. Warnings are advisory and never block persistence.
    Valid {
        /// The normalized value
        data: T,
        /// Advisory notices in the order they were raised
        warnings: Vec<String>,
    },
    /// The input is rejected.
    Invalid {
        /// Hard violations, never empty, first blocking rule first
        errors: Vec<ValidationError>,
    },
}

impl<T> ValidationResult<T> {
    /// A valid result without warnings.
    pub fn valid(data: T) -> Self {
        Self::Valid {
            data,
            warnings: Vec::new(),
        }
    }

    /// A valid result carrying advisory warnings.
    pub fn with_warnings(data: T, warnings: Vec<String>) -> Self {
        Self::Valid { data, warnings }
    }

    /// An invalid result with a single error.
    pub fn invalid(error: ValidationError) -> Self {
        Self::Invalid {
            errors: vec![error],
        }
    }

    /// An invalid result from a rejection.
    pub fn rejected(rejection: Rejection) -> Self {
        Self::Invalid {
            errors: rejection.into_errors(),
        }
    }

    /// Returns true for `Valid`.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid { .. })
    }

    /// The validated data, if any.
    #[must_use]
    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Valid { data, .. } => Some(data),
            Self::Invalid { .. } => None,
        }
    }

    /// Consumes the result and returns the validated data, if any.
    pub fn into_data(self) -> Option<T> {
        match self {
            Self::Valid { data, .. } => Some(data),
            Self::Invalid { .. } => None,
        }
    }

    /// Warnings of a valid result. Empty for invalid results.
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        match self {
            Self::Valid { warnings, .. } => warnings,
            Self::Invalid { .. } => &[],
        }
    }

    /// Errors of an invalid result. Empty for valid results.
    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        match self {
            Self::Valid { .. } => &[],
            Self::Invalid { errors } => errors,
        }
    }

    /// The first blocking error, if any.
    #[must_use]
    pub fn first_error(&self) -> Option<&ValidationError> {
        self.errors().first()
    }

    /// Error messages as plain strings, in order.
    #[must_use]
    pub fn error_messages(&self) -> Vec<String> {
        self.errors().iter().map(ToString::to_string).collect()
    }

    /// Transforms the data of a valid result.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> ValidationResult<U> {
        match self {
            Self::Valid { data, warnings } => ValidationResult::Valid {
                data: f(data),
                warnings,
            },
            Self::Invalid { errors } => ValidationResult::Invalid { errors },
        }
    }

    /// Splits the result for use with `?` inside another validator.
    ///
    /// # Errors
    ///
    /// Returns the [`Rejection`] of an invalid result.
    pub fn into_result(self) -> Result<(T, Vec<String>), Rejection> {
        match self {
            Self::Valid { data, warnings } => Ok((data, warnings)),
            Self::Invalid { errors } => Err(Rejection { errors }),
        }
    }
}

impl<T> From<Result<(T, Vec<String>), Rejection>> for ValidationResult<T> {
    fn from(result: Result<(T, Vec<String>), Rejection>) -> Self {
        match result {
            Ok((data, warnings)) => Self::Valid { data, warnings },
            Err(rejection) => Self::rejected(rejection),
        }
    }
}

impl<T> From<Result<T, ValidationError>> for ValidationResult<T> {
    fn from(result: Result<T, ValidationError>) -> Self {
        match result {
            Ok(data) => Self::valid(data),
            Err(error) => Self::invalid(error),
        }
    }
}

/// One or more hard violations.
///
/// A rejection always holds at least one error; the only ways to build one are from a
/// single error or through [`Rejection::from_errors`], which refuses an empty list.
#[derive(Debug, Clone, PartialEq)]
pub struct Rejection {
    errors: Vec<ValidationError>,
}

impl Rejection {
    /// Builds a rejection from accumulated errors, or `None` if there are none.
    #[must_use]
    pub fn from_errors(errors: Vec<ValidationError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self { errors })
        }
    }

    /// The errors, first blocking rule first.
    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// The first error.
    #[must_use]
    pub fn first(&self) -> Option<&ValidationError> {
        self.errors.first()
    }

    /// Consumes the rejection and returns its errors.
    #[must_use]
    pub fn into_errors(self) -> Vec<ValidationError> {
        self.errors
    }
}

impl From<ValidationError> for Rejection {
    fn from(error: ValidationError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

/// Returns `Err` when any errors were accumulated, `Ok(())` otherwise.
///
/// # Errors
///
/// Returns a [`Rejection`] holding every accumulated error.
pub fn reject_if_any(errors: Vec<ValidationError>) -> Result<(), Rejection> {
    match Rejection::from_errors(errors) {
        Some(rejection) => Err(rejection),
        None => Ok(()),
    }
}
