// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! LOC record validation (RFC 1876).
//!
//! ```text
//! d1 [m1 [s1]] {N|S} d2 [m2 [s2]] {E|W} alt[m] [siz[m] [hp[m] [vp[m]]]]
//! ```
//!
//! A composite regex fixes the shape and the decimal precision of every field; the
//! numeric bounds are checked afterwards on the captured values.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::primitives::text::check_printable;
use crate::record::RecordInput;
use crate::records::{finish, zero_priority, RecordOutcome, RecordValidator, ValidationContext};
use crate::validation_errors::ValidationError;

/// LOC text grammar (RFC 1876 section 3).
///
/// The pattern is a literal, so building it cannot fail at run time;
/// `loc_tests::test_format_pattern_compiles` forces it.
static LOC_FORMAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(?P<lat_d>\d{1,2})(?: (?P<lat_m>\d{1,2})(?: (?P<lat_s>\d{1,2}(?:\.\d{1,3})?))?)? (?P<lat_h>[NSns])",
        r" (?P<lon_d>\d{1,3})(?: (?P<lon_m>\d{1,2})(?: (?P<lon_s>\d{1,2}(?:\.\d{1,3})?))?)? (?P<lon_h>[EWew])",
        r" (?P<alt>-?\d{1,8}(?:\.\d{1,2})?)m?",
        r"(?: (?P<size>\d{1,8}(?:\.\d{1,2})?)m?(?: (?P<hp>\d{1,8}(?:\.\d{1,2})?)m?(?: (?P<vp>\d{1,8}(?:\.\d{1,2})?)m?)?)?)?$",
    ))
    .expect("LOC format regex is valid")
});

/// Lowest altitude in centimeters.
const MIN_ALTITUDE_CM: i64 = -10_000_000;

/// Highest altitude in centimeters.
const MAX_ALTITUDE_CM: i64 = 4_284_967_295;

/// Largest size or precision in centimeters.
const MAX_PRECISION_CM: i64 = 9_000_000_000;

/// One sexagesimal coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coordinate {
    pub degrees: u32,
    pub minutes: u32,
    /// Seconds in thousandths
    pub milliseconds: u32,
    /// `N`, `S`, `E` or `W`
    pub hemisphere: char,
}

impl Coordinate {
    fn total_milliseconds(&self) -> u64 {
        ((u64::from(self.degrees) * 60 + u64::from(self.minutes)) * 60) * 1000
            + u64::from(self.milliseconds)
    }
}

/// Parsed LOC content. Distances are centimeters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocContent {
    pub latitude: Coordinate,
    pub longitude: Coordinate,
    pub altitude_cm: i64,
    pub size_cm: Option<i64>,
    pub horizontal_precision_cm: Option<i64>,
    pub vertical_precision_cm: Option<i64>,
}

impl LocContent {
    /// Parse LOC content.
    ///
    /// # Errors
    ///
    /// Returns a structural error when the shape does not match and a range error for
    /// the first out-of-range value.
    pub fn parse(content: &str) -> Result<Self, ValidationError> {
        let normalized = content.split_whitespace().collect::<Vec<_>>().join(" ");
        let caps = LOC_FORMAT.captures(&normalized).ok_or_else(|| {
            ValidationError::structural(
                "LOC record must be in the format: d1 [m1 [s1]] {N|S} d2 [m2 [s2]] {E|W} alt[m] [siz[m] [hp[m] [vp[m]]]]",
            )
        })?;

        let latitude = coordinate(&caps, "lat", 90, "latitude")?;
        let longitude = coordinate(&caps, "lon", 180, "longitude")?;

        let altitude_cm = caps
            .name("alt")
            .and_then(|m| centimeters(m.as_str()))
            .filter(|cm| (MIN_ALTITUDE_CM..=MAX_ALTITUDE_CM).contains(cm))
            .ok_or_else(|| {
                ValidationError::range("LOC altitude must be between -100000.00m and 42849672.95m.")
            })?;

        let precision = |group: &str, label: &str| -> Result<Option<i64>, ValidationError> {
            caps.name(group)
                .map(|m| {
                    centimeters(m.as_str())
                        .filter(|cm| *cm <= MAX_PRECISION_CM)
                        .ok_or_else(|| {
                            ValidationError::range(format!(
                                "LOC {label} must be between 0m and 90000000.00m."
                            ))
                        })
                })
                .transpose()
        };

        Ok(Self {
            latitude,
            longitude,
            altitude_cm,
            size_cm: precision("size", "size")?,
            horizontal_precision_cm: precision("hp", "horizontal precision")?,
            vertical_precision_cm: precision("vp", "vertical precision")?,
        })
    }

    #[must_use]
    pub fn advisories(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.latitude.total_milliseconds() > 90 * 3_600_000 {
            warnings.push("LOC latitude exceeds 90 degrees once minutes and seconds are added.".to_string());
        }
        if self.longitude.total_milliseconds() > 180 * 3_600_000 {
            warnings.push("LOC longitude exceeds 180 degrees once minutes and seconds are added.".to_string());
        }
        warnings
    }
}

fn coordinate(
    caps: &Captures<'_>,
    prefix: &str,
    max_degrees: u32,
    label: &str,
) -> Result<Coordinate, ValidationError> {
    let group = |suffix: &str| caps.name(&format!("{prefix}_{suffix}")).map(|m| m.as_str());

    let degrees = group("d")
        .and_then(|d| d.parse::<u32>().ok())
        .filter(|d| *d <= max_degrees)
        .ok_or_else(|| {
            ValidationError::range(format!(
                "LOC {label} degrees must be between 0 and {max_degrees}."
            ))
        })?;
    let minutes = match group("m") {
        None => 0,
        Some(m) => m.parse::<u32>().ok().filter(|m| *m < 60).ok_or_else(|| {
            ValidationError::range(format!("LOC {label} minutes must be between 0 and 59."))
        })?,
    };
    let milliseconds = match group("s") {
        None => 0,
        Some(s) => thousandths(s).filter(|ms| *ms < 60_000).ok_or_else(|| {
            ValidationError::range(format!("LOC {label} seconds must be between 0 and 59.999."))
        })?,
    };
    let hemisphere = group("h")
        .and_then(|h| h.chars().next())
        .map(|h| h.to_ascii_uppercase())
        .unwrap_or('N');

    Ok(Coordinate {
        degrees,
        minutes,
        milliseconds,
        hemisphere,
    })
}

/// Parse a decimal with up to `scale` fractional digits into an integer of that scale.
fn scaled(raw: &str, scale: u32) -> Option<i64> {
    let (negative, digits) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw),
    };
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits, ""));
    if fraction.len() > scale as usize {
        return None;
    }
    let whole: i64 = whole.parse().ok()?;
    let fraction: i64 = if fraction.is_empty() {
        0
    } else {
        fraction.parse::<i64>().ok()? * 10_i64.pow(scale - fraction.len() as u32)
    };
    let value = whole.checked_mul(10_i64.pow(scale))?.checked_add(fraction)?;
    Some(if negative { -value } else { value })
}

fn centimeters(raw: &str) -> Option<i64> {
    scaled(raw, 2)
}

fn thousandths(raw: &str) -> Option<u32> {
    scaled(raw, 3).and_then(|v| u32::try_from(v).ok())
}

/// Returns true if `content` is a valid LOC record body.
#[must_use]
pub fn is_valid_loc(content: &str) -> bool {
    LocContent::parse(content).is_ok()
}

/// Validator for LOC records.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocValidator;

impl RecordValidator for LocValidator {
    fn check(&self, record: &RecordInput, ctx: &ValidationContext<'_>) -> RecordOutcome {
        let name = ctx.hostname(&record.name, true)?;
        check_printable(&record.content)?;
        let parsed = LocContent::parse(&record.content)?;
        let warnings = parsed.advisories();
        let ttl = ctx.ttl(record)?;
        let priority = zero_priority(record, "LOC")?;

        finish(record.content.trim().to_string(), name, priority, ttl, warnings)
    }
}

#[cfg(test)]
#[path = "loc_tests.rs"]
mod loc_tests;
