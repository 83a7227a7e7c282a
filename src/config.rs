// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Validator configuration.
//!
//! Configuration is read once, before the [`crate::registry::Registry`] is built, and is
//! immutable afterwards. Sources, lowest precedence first:
//!
//! 1. Built-in defaults ([`ValidatorConfig::default`])
//! 2. A YAML or JSON file ([`ValidatorConfig::from_file`])
//! 3. `ZONE_VALIDATOR_*` environment variables ([`ValidatorConfig::apply_env_overrides`])

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::constants::{
    DEFAULT_TTL_SECS, ENV_DEFAULT_TTL, ENV_HOSTMASTER, ENV_STRICT_TLD_CHECK,
    ENV_TOP_LEVEL_TLD_CHECK, MAX_TTL,
};

/// Settings that change how hostnames are judged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HostnameConfig {
    /// Reject single-label hostnames such as `localhost`
    pub top_level_tld_check: bool,
    /// Require the last label to be a known top level domain
    pub strict_tld_check: bool,
    /// Extra TLDs accepted by the strict check, lowercase
    pub extra_tlds: Vec<String>,
}

/// Engine-wide configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ValidatorConfig {
    /// TTL applied when a record has none and the caller supplies no default
    pub default_ttl: i32,
    /// Mailbox used as SOA admin when the SOA content omits it
    pub hostmaster: String,
    /// Require RFC 5952 canonical text for AAAA content
    pub ipv6_canonical: bool,
    /// Hostname rules
    pub hostname: HostnameConfig,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            default_ttl: DEFAULT_TTL_SECS,
            hostmaster: "hostmaster@example.com".to_string(),
            ipv6_canonical: false,
            hostname: HostnameConfig::default(),
        }
    }
}

impl ValidatorConfig {
    /// Load configuration from a YAML or JSON file.
    ///
    /// The format is chosen by extension: `.json` is parsed as JSON, anything else as
    /// YAML. Missing keys take their default values.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, cannot be parsed, or holds values
    /// that fail [`ValidatorConfig::check`].
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let config: Self = if is_json {
            serde_json::from_str(&raw)
                .with_context(|| format!("Failed to parse JSON config {}", path.display()))?
        } else {
            serde_yaml::from_str(&raw)
                .with_context(|| format!("Failed to parse YAML config {}", path.display()))?
        };

        debug!(path = %path.display(), "Loaded validator configuration");
        config.check()?;
        Ok(config)
    }

    /// Apply `ZONE_VALIDATOR_*` environment variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an unparseable value.
    pub fn apply_env_overrides(self) -> Result<Self> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if a value cannot be parsed.
    pub fn apply_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(ttl) = lookup(ENV_DEFAULT_TTL) {
            self.default_ttl = ttl
                .trim()
                .parse()
                .with_context(|| format!("{ENV_DEFAULT_TTL} must be an integer, got '{ttl}'"))?;
        }
        if let Some(hostmaster) = lookup(ENV_HOSTMASTER) {
            self.hostmaster = hostmaster;
        }
        if let Some(flag) = lookup(ENV_STRICT_TLD_CHECK) {
            self.hostname.strict_tld_check = parse_flag(ENV_STRICT_TLD_CHECK, &flag)?;
        }
        if let Some(flag) = lookup(ENV_TOP_LEVEL_TLD_CHECK) {
            self.hostname.top_level_tld_check = parse_flag(ENV_TOP_LEVEL_TLD_CHECK, &flag)?;
        }
        self.check()?;
        Ok(self)
    }

    /// Check that the configuration itself is usable.
    ///
    /// # Errors
    ///
    /// Returns an error if the default TTL is out of range or the hostmaster is empty.
    pub fn check(&self) -> Result<()> {
        if self.default_ttl < 0 || i64::from(self.default_ttl) > MAX_TTL {
            bail!("defaultTtl must be between 0 and {MAX_TTL}");
        }
        if self.hostmaster.trim().is_empty() {
            bail!("hostmaster must not be empty");
        }
        Ok(())
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("{key} must be a boolean, got '{other}'"),
    }
}
