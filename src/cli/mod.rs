//! cli
//!
//! Command-line interface layer for Gitoscope.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Resolve the repository and configuration
//! - Delegate to the [`crate::facade`] and print results
//!
//! The CLI stands in for the presentation layer: it never touches the
//! repository itself.

pub mod args;
pub mod commands;

pub use args::Cli;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use crate::backend::GitAccessor;
use crate::core::config::Config;
use crate::facade::Gitoscope;
use crate::git::Git;
use crate::ui::output::{self, Verbosity};

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub async fn run() -> Result<()> {
    let cli = Cli::parse_args();
    output::init_logging(Verbosity::from_flags(cli.quiet, cli.debug));

    let repo_path = resolve_repo(cli.repo.as_deref())?;
    // Repo config lives in the discovered git dir, not under the given path
    let git_dir = Git::open(&repo_path)?.common_dir().to_path_buf();
    let config = Config::load(Some(&git_dir))
        .context("failed to load configuration")?
        .config;
    debug!(
        repo = %repo_path.display(),
        git_dir = %git_dir.display(),
        global_config = ?config.global_config_loaded_from(),
        repo_config = ?config.repo_config_loaded_from(),
        "configuration loaded"
    );

    let gitoscope = Gitoscope::new(GitAccessor::new(repo_path, config.query_options()));
    commands::dispatch(cli.command, &gitoscope).await
}

/// Repository path: `--repo`, else the configured repo, else the current
/// directory.
fn resolve_repo(flag: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = flag {
        return Ok(path.to_path_buf());
    }

    let config = Config::load(None)
        .context("failed to load configuration")?
        .config;
    match config.repo() {
        Some(path) => Ok(path.to_path_buf()),
        None => std::env::current_dir().context("cannot determine current directory"),
    }
}
