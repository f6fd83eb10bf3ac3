//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--repo <path>`: Repository to inspect (overrides config)
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Errors only on stderr

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Gitoscope - inspect a repository's HEAD tree, index and working copy
#[derive(Parser, Debug)]
#[command(name = "gitoscope")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Repository to inspect (defaults to config, then the current directory)
    #[arg(long, global = true)]
    pub repo: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Only report errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the three-way status of every changed or tracked path
    Status,

    /// Print a file as committed at HEAD
    #[command(name = "tree-content")]
    TreeContent {
        /// Repository-relative path
        path: String,

        /// Print as a JSON string
        #[arg(long)]
        json: bool,
    },

    /// Print a file as staged in the index
    #[command(name = "cache-content")]
    CacheContent {
        /// Repository-relative path
        path: String,

        /// Print as a JSON string
        #[arg(long)]
        json: bool,
    },

    /// Print a file as it is in the working copy
    #[command(name = "working-content")]
    WorkingContent {
        /// Repository-relative path
        path: String,

        /// Print as a JSON string
        #[arg(long)]
        json: bool,
    },

    /// Describe a commit
    Commit {
        /// Commit id (full hex)
        id: String,
    },

    /// Describe a tree object
    Tree {
        /// Tree id (full hex)
        id: String,
    },

    /// Describe a blob object
    Blob {
        /// Blob id (full hex)
        id: String,
    },

    /// List references, with the current HEAD last
    Refs,
}
