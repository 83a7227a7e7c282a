// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! LUA record validation (PowerDNS).
//!
//! A LUA record carries a Lua snippet the authoritative server evaluates per query. It
//! comes in two modes:
//!
//! - Implicit return: a single expression, usually a function call, optionally prefixed
//!   by the record type it produces, e.g. `A "ifportup(443, {'192.0.2.1'})"`
//! - Explicit return: a script starting with `;` that returns the value itself
//!
//! The script itself is never parsed; only its surface shape is checked.

use std::sync::LazyLock;

use regex::Regex;

use crate::constants::{LUA_COMMON_FUNCTIONS, LUA_RECORD_PREFIXES};
use crate::primitives::text::is_valid_printable;
use crate::record::RecordInput;
use crate::records::{finish, zero_priority, RecordOutcome, RecordValidator, ValidationContext};
use crate::validation_errors::ValidationError;

/// `TYPE func(` or `TYPE "func(`
static TYPED_CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r#"^(?:{})\s+["']?[A-Za-z_][A-Za-z0-9_]*\s*\("#,
        LUA_RECORD_PREFIXES.join("|")
    ))
    .expect("LUA typed call regex is valid")
});

/// `func(`
static DIRECT_CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*\s*\(").expect("LUA call regex is valid")
});

static FUNCTION_KEYWORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^function\s").expect("LUA keyword regex is valid"));

/// File and process access that PowerDNS blocks.
static SYSTEM_ACCESS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:os\.|io\.|file\.|loadfile|dofile)\b").expect("LUA access regex is valid")
});

/// How a LUA body produces its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LuaMode {
    /// A single expression whose value is the answer
    Implicit,
    /// A `;`-prefixed script with its own `return` statements
    Explicit,
}

impl LuaMode {
    /// The mode of trimmed LUA content.
    #[must_use]
    pub fn of(content: &str) -> Self {
        if content.starts_with(';') {
            Self::Explicit
        } else {
            Self::Implicit
        }
    }
}

/// Check the shape of a LUA body and return its mode.
///
/// # Errors
///
/// Returns a structural error for unbalanced parentheses or braces, an explicit script
/// without `return`, an implicit body that is not a call or function definition, or
/// file and system access.
pub fn check_lua_content(content: &str) -> Result<LuaMode, ValidationError> {
    let content = content.trim();
    if content.is_empty() {
        return Err(ValidationError::structural(
            "LUA record content cannot be empty.",
        ));
    }
    if count(content, '(') != count(content, ')') {
        return Err(ValidationError::structural(
            "LUA record has mismatched parentheses. Check your syntax.",
        ));
    }
    if count(content, '{') != count(content, '}') {
        return Err(ValidationError::structural(
            "LUA record has mismatched braces. Check your syntax.",
        ));
    }

    let mode = LuaMode::of(content);
    match mode {
        LuaMode::Explicit if !content.contains("return") => {
            return Err(ValidationError::structural(
                "LUA record in explicit return mode (starts with semicolon) must contain at least one \"return\" statement.",
            ));
        }
        LuaMode::Implicit if !is_implicit_body(content) => {
            return Err(ValidationError::structural(
                "LUA record in implicit return mode should be a valid function call or function definition with \"function\" and \"end\" keywords.",
            ));
        }
        _ => {}
    }

    if SYSTEM_ACCESS.is_match(content) {
        return Err(ValidationError::structural(
            "LUA record contains potentially dangerous system access functions. These are likely to be blocked by PowerDNS security restrictions.",
        ));
    }
    Ok(mode)
}

fn is_implicit_body(content: &str) -> bool {
    TYPED_CALL.is_match(content)
        || (DIRECT_CALL.is_match(content) && !FUNCTION_KEYWORD.is_match(content))
        || (content.contains("function") && content.contains("end"))
}

fn count(content: &str, needle: char) -> usize {
    content.chars().filter(|&c| c == needle).count()
}

/// Advisories for a LUA body that passed [`check_lua_content`].
#[must_use]
pub fn lua_advisories(content: &str, mode: LuaMode) -> Vec<String> {
    let mut warnings = Vec::new();
    match mode {
        LuaMode::Explicit => warnings.push(
            "This LUA record uses explicit return mode (starts with semicolon). Ensure your Lua script explicitly returns the appropriate value.".to_string(),
        ),
        LuaMode::Implicit => {
            let lowered = content.to_ascii_lowercase();
            let uses_common = LUA_COMMON_FUNCTIONS
                .iter()
                .any(|function| lowered.contains(&format!("{function}(")));
            if !uses_common {
                warnings.push(
                    "This LUA record doesn't appear to use common PowerDNS Lua functions. Make sure it returns an appropriate value for the record type.".to_string(),
                );
            }
        }
    }
    if count(content, '\'') % 2 != 0 || count(content, '"') % 2 != 0 {
        warnings.push(
            "WARNING: This LUA record appears to have unbalanced quotes, which may cause syntax errors.".to_string(),
        );
    }
    warnings
}

/// Validator for LUA records.
#[derive(Debug, Default, Clone, Copy)]
pub struct LuaValidator;

impl RecordValidator for LuaValidator {
    fn check(&self, record: &RecordInput, ctx: &ValidationContext<'_>) -> RecordOutcome {
        let name = ctx.hostname(&record.name, true)?;
        let content = record.content.trim();
        if content.is_empty() {
            return Err(ValidationError::structural("LUA record content cannot be empty.").into());
        }
        if !is_valid_printable(content) {
            return Err(
                ValidationError::structural("Invalid characters in LUA record content.").into(),
            );
        }

        let mode = check_lua_content(content)?;
        let ttl = ctx.ttl(record)?;
        let priority = zero_priority(record, "LUA")?;
        let warnings = lua_advisories(content, mode);

        finish(content.to_string(), name, priority, ttl, warnings)
    }
}

#[cfg(test)]
#[path = "lua_tests.rs"]
mod lua_tests;
