// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Character-class and quoting rules for TXT-like content.
//!
//! TXT, SPF and DMARC content is stored as one or more quoted character-strings
//! (`"v=spf1 -all"` or `"part one" "part two"`). Embedded quotes must be escaped with a
//! backslash and each string may hold at most 255 bytes.

use crate::constants::MAX_TXT_SEGMENT_LENGTH;
use crate::validation_errors::ValidationError;

/// Returns true if the trimmed string is non-empty printable ASCII.
#[must_use]
pub fn is_valid_printable(s: &str) -> bool {
    let trimmed = s.trim();
    !trimmed.is_empty() && trimmed.bytes().all(|b| (0x20..=0x7e).contains(&b))
}

/// Require printable ASCII.
///
/// # Errors
///
/// Returns a structural error if [`is_valid_printable`] is false.
pub fn check_printable(s: &str) -> Result<(), ValidationError> {
    if is_valid_printable(s) {
        Ok(())
    } else {
        Err(ValidationError::structural(
            "Invalid characters have been used in this record.",
        ))
    }
}

/// Returns true if the string contains `<` or `>`.
#[must_use]
pub fn has_html_tags(s: &str) -> bool {
    s.trim().contains(['<', '>'])
}

/// Returns true if every quote inside the (optionally quoted) string is escaped.
#[must_use]
pub fn is_properly_quoted(content: &str) -> bool {
    let inner = content
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(content);

    let mut previous = None;
    for c in inner.chars() {
        if c == '"' && previous != Some('\\') {
            return false;
        }
        previous = Some(c);
    }
    true
}

/// Returns true if the string is empty or both starts and ends with a quote.
#[must_use]
pub fn has_quotes_around(s: &str) -> bool {
    s.is_empty() || (s.len() >= 2 && s.starts_with('"') && s.ends_with('"'))
}

/// Remove one pair of surrounding quotes, if present.
#[must_use]
pub fn unquote(s: &str) -> &str {
    s.strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(s)
}

/// Wrap a string in quotes unless it already has them.
#[must_use]
pub fn ensure_quoted(s: &str) -> String {
    if s.len() >= 2 && s.starts_with('"') && s.ends_with('"') {
        s.to_string()
    } else {
        format!("\"{s}\"")
    }
}

/// Split quoted content into its character-strings.
///
/// Returns each string's text with escapes kept as written (`\"` stays two characters),
/// so re-quoting a segment reproduces the input. Segment length is measured after
/// unescaping.
///
/// A backslash right before the quote that ends the content is literal, so `"\"` is a
/// one-character string.
///
/// # Errors
///
/// Returns an error if text appears outside quotes, a quote is left open, or a segment
/// exceeds 255 bytes.
pub fn split_character_strings(content: &str) -> Result<Vec<String>, ValidationError> {
    let mut segments = Vec::new();
    let mut chars = content.trim().chars().peekable();

    while let Some(c) = chars.next() {
        if c.is_whitespace() {
            continue;
        }
        if c != '"' {
            return Err(ValidationError::structural(
                "Backslashes must precede all quotes (\") in TXT content",
            ));
        }

        let mut raw = String::new();
        let mut unescaped_len = 0usize;
        let mut closed = false;
        while let Some(c) = chars.next() {
            match c {
                '\\' if is_final_quote(chars.clone()) => {
                    raw.push(c);
                    unescaped_len += 1;
                    chars.next();
                    closed = true;
                    break;
                }
                '\\' => {
                    raw.push(c);
                    if let Some(escaped) = chars.next() {
                        raw.push(escaped);
                    }
                    unescaped_len += 1;
                }
                '"' => {
                    closed = true;
                    break;
                }
                other => {
                    raw.push(other);
                    unescaped_len += other.len_utf8();
                }
            }
        }

        if !closed {
            return Err(ValidationError::structural(
                "Backslashes must precede all quotes (\") in TXT content",
            ));
        }
        if unescaped_len > MAX_TXT_SEGMENT_LENGTH {
            return Err(ValidationError::range(format!(
                "A TXT string may hold at most {MAX_TXT_SEGMENT_LENGTH} characters. Split long text into several quoted strings."
            )));
        }
        if let Some(next) = chars.peek() {
            if !next.is_whitespace() {
                return Err(ValidationError::structural(
                    "Backslashes must precede all quotes (\") in TXT content",
                ));
            }
        }
        segments.push(raw);
    }

    Ok(segments)
}

/// Returns true if `rest` is exactly one closing quote.
fn is_final_quote(mut rest: impl Iterator<Item = char>) -> bool {
    rest.next() == Some('"') && rest.next().is_none()
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod text_tests;
