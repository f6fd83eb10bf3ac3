//! ui::output
//!
//! Output formatting and logging setup.
//!
//! # Design
//!
//! Command results go to stdout: JSON for structured data, raw text for
//! file content. Diagnostics go to stderr through `tracing`, filtered by
//! the verbosity derived from `--quiet` / `--debug`.

use std::fmt::Display;

use serde::Serialize;
use tracing_subscriber::filter::LevelFilter;

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Quiet mode - errors only
    Quiet,
    /// Normal mode - warnings and errors
    Normal,
    /// Debug mode - verbose output
    Debug,
}

impl Verbosity {
    /// Create verbosity from flags.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }

    /// Most verbose log level shown at this verbosity.
    pub fn level_filter(&self) -> LevelFilter {
        match self {
            Verbosity::Quiet => LevelFilter::ERROR,
            Verbosity::Normal => LevelFilter::WARN,
            Verbosity::Debug => LevelFilter::DEBUG,
        }
    }
}

/// Install the stderr log subscriber.
///
/// `RUST_LOG` overrides the verbosity-derived level when set. Calling this
/// more than once keeps the first subscriber.
pub fn init_logging(verbosity: Verbosity) {
    let filter = tracing_subscriber::EnvFilter::builder()
        .with_default_directive(verbosity.level_filter().into())
        .from_env_lossy();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Print a value as pretty JSON.
pub fn print_json<T: Serialize>(value: &T) -> serde_json::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print text exactly as given, without adding a newline.
pub fn print_raw(text: &str) {
    print!("{}", text);
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}
