//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Global Config
//!
//! Located at (in order of precedence):
//! 1. `$GITOSCOPE_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/gitoscope/config.toml`
//! 3. `~/.gitoscope/config.toml`
//!
//! # Repo Config
//!
//! Located at `gitoscope/config.toml` inside the visualized repository's
//! git directory.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Upper bound for `context_lines`.
pub const MAX_CONTEXT_LINES: u32 = 1000;

/// Global configuration (user scope).
///
/// # Example
///
/// ```toml
/// repo = "/home/me/projects/site"
/// include_ignored = false
/// context_lines = 3
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Repository to visualize
    pub repo: Option<PathBuf>,

    /// Report ignored files in status
    pub include_ignored: Option<bool>,

    /// Context lines around each diff hunk
    pub context_lines: Option<u32>,
}

impl GlobalConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(repo) = &self.repo {
            if repo.as_os_str().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "repo cannot be empty".to_string(),
                ));
            }
        }
        validate_context_lines(self.context_lines)
    }
}

/// Repository configuration.
///
/// # Example
///
/// ```toml
/// include_ignored = true
/// context_lines = 10
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RepoConfig {
    /// Report ignored files in status
    pub include_ignored: Option<bool>,

    /// Context lines around each diff hunk
    pub context_lines: Option<u32>,
}

impl RepoConfig {
    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_context_lines(self.context_lines)
    }
}

fn validate_context_lines(value: Option<u32>) -> Result<(), ConfigError> {
    match value {
        Some(n) if n > MAX_CONTEXT_LINES => Err(ConfigError::InvalidValue(format!(
            "context_lines must be at most {}, got {}",
            MAX_CONTEXT_LINES, n
        ))),
        _ => Ok(()),
    }
}
