// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration for the automation layer and the local host
//!
//! Every field has a default, so an empty file (or no file) is valid:
//!
//! ```toml
//! [automation]
//! default_group = "default"
//! wait_group = "__wait"
//!
//! [host]
//! max_match_lines = 5
//! command_delimiter = ";"
//! send_empty_commands = false
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub automation: AutomationConfig,
    pub host: HostConfig,
}

/// Defaults applied by the registration layer
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AutomationConfig {
    /// Group assigned to sources created without one
    pub default_group: String,
    /// Group holding the internal sources armed by waits
    pub wait_group: String,
}

impl Default for AutomationConfig {
    fn default() -> Self {
        Self {
            default_group: "default".to_string(),
            wait_group: "__wait".to_string(),
        }
    }
}

/// Settings of the in-process host engine
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HostConfig {
    /// Lines kept for multi-line triggers; upper bound of `match_lines`
    pub max_match_lines: u8,
    /// Splits one line of user input into several commands
    pub command_delimiter: char,
    /// Keep empty commands produced by splitting instead of dropping them
    pub send_empty_commands: bool,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            max_match_lines: 5,
            command_delimiter: ';',
            send_empty_commands: false,
        }
    }
}

impl Config {
    /// Parse configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(text)?;
        config.check()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    fn check(&self) -> Result<(), ConfigError> {
        if self.automation.default_group.is_empty() {
            return Err(ConfigError::Invalid(
                "automation.default_group must not be empty".to_string(),
            ));
        }
        if self.automation.wait_group.is_empty() {
            return Err(ConfigError::Invalid(
                "automation.wait_group must not be empty".to_string(),
            ));
        }
        if self.host.max_match_lines == 0 {
            return Err(ConfigError::Invalid(
                "host.max_match_lines must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
