//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! Gitoscope has two configuration scopes:
//! - **Global**: User-level settings, including which repository to visualize
//! - **Repo**: Overrides stored inside the visualized repository
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. Repo config file
//! 4. CLI flags (not handled here)
//!
//! # Example
//!
//! ```no_run
//! use gitoscope::core::config::Config;
//! use std::path::Path;
//!
//! let result = Config::load(Some(Path::new("/path/to/repo/.git"))).unwrap();
//! let config = result.config;
//!
//! println!("Context lines: {}", config.context_lines());
//! println!("Include ignored: {}", config.include_ignored());
//! ```

pub mod schema;

pub use schema::{GlobalConfig, RepoConfig};

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::git::QueryOptions;

/// Default number of context lines around diff hunks.
pub const DEFAULT_CONTEXT_LINES: u32 = 3;

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct ConfigLoadResult {
    /// The loaded configuration.
    pub config: Config,
}

/// Merged configuration from all sources.
///
/// Accessor methods apply precedence rules: repo config overrides global
/// config, which overrides defaults.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Global configuration
    pub global: GlobalConfig,
    /// Repository configuration (if found)
    pub repo: Option<RepoConfig>,
    global_path: Option<PathBuf>,
    repo_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// If `git_dir` is provided, repo-specific config is loaded from it.
    /// Otherwise the `.git` directory of the repository named by the global
    /// config (if any) is used.
    ///
    /// # Errors
    ///
    /// Returns an error if config files exist but cannot be parsed.
    /// Missing config files are not an error (defaults are used).
    pub fn load(git_dir: Option<&Path>) -> Result<ConfigLoadResult, ConfigError> {
        Self::load_from(Self::locate_global(), git_dir)
    }

    /// Load configuration from an explicit global config file.
    pub fn load_from(
        global_file: Option<PathBuf>,
        git_dir: Option<&Path>,
    ) -> Result<ConfigLoadResult, ConfigError> {
        let global = match &global_file {
            Some(path) => Self::read_toml::<GlobalConfig>(path)?,
            None => GlobalConfig::default(),
        };
        global.validate()?;

        let git_dir = git_dir
            .map(Path::to_path_buf)
            .or_else(|| global.repo.as_ref().map(|repo| repo.join(".git")));

        let (repo, repo_path_found) = match git_dir {
            Some(dir) => Self::load_repo(&dir)?,
            None => (None, None),
        };
        if let Some(ref r) = repo {
            r.validate()?;
        }

        Ok(ConfigLoadResult {
            config: Config {
                global,
                repo,
                global_path: global_file,
                repo_path: repo_path_found,
            },
        })
    }

    /// Find the global config file, if one exists.
    fn locate_global() -> Option<PathBuf> {
        // 1. Check $GITOSCOPE_CONFIG
        if let Ok(path) = std::env::var("GITOSCOPE_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        // 2. Check $XDG_CONFIG_HOME/gitoscope/config.toml
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("gitoscope/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        // 3. Check ~/.gitoscope/config.toml
        dirs::home_dir()
            .map(|home| home.join(".gitoscope/config.toml"))
            .filter(|path| path.exists())
    }

    fn load_repo(git_dir: &Path) -> Result<(Option<RepoConfig>, Option<PathBuf>), ConfigError> {
        let path = Self::repo_config_path(git_dir);
        if !path.exists() {
            return Ok((None, None));
        }
        let config = Self::read_toml::<RepoConfig>(&path)?;
        Ok((Some(config), Some(path)))
    }

    fn read_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Get the canonical path for repo config.
    ///
    /// Returns `gitoscope/config.toml` inside the given git directory.
    pub fn repo_config_path(git_dir: &Path) -> PathBuf {
        git_dir.join("gitoscope/config.toml")
    }

    // =========================================================================
    // Accessor methods with precedence
    // =========================================================================

    /// Repository to visualize, if configured globally.
    pub fn repo(&self) -> Option<&Path> {
        self.global.repo.as_deref()
    }

    /// Whether ignored files are reported in status.
    ///
    /// Defaults to `false` if not configured.
    pub fn include_ignored(&self) -> bool {
        self.repo
            .as_ref()
            .and_then(|r| r.include_ignored)
            .or(self.global.include_ignored)
            .unwrap_or(false)
    }

    /// Context lines around diff hunks.
    ///
    /// Defaults to [`DEFAULT_CONTEXT_LINES`] if not configured.
    pub fn context_lines(&self) -> u32 {
        self.repo
            .as_ref()
            .and_then(|r| r.context_lines)
            .or(self.global.context_lines)
            .unwrap_or(DEFAULT_CONTEXT_LINES)
    }

    /// Backend query options derived from this configuration.
    pub fn query_options(&self) -> QueryOptions {
        QueryOptions {
            include_ignored: self.include_ignored(),
            context_lines: self.context_lines(),
        }
    }

    /// Get the path to the loaded global config file.
    pub fn global_config_loaded_from(&self) -> Option<&Path> {
        self.global_path.as_deref()
    }

    /// Get the path to the loaded repo config file.
    pub fn repo_config_loaded_from(&self) -> Option<&Path> {
        self.repo_path.as_deref()
    }
}
