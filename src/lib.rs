//! Gitoscope - repository views across HEAD tree, index and working copy
//!
//! Gitoscope is the backend of a repository visualizer. For every tracked
//! path it exposes three content views (committed, staged, working copy)
//! and a three-state status classification, without reading the working
//! directory or the index file directly.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line stand-in for the presentation layer
//! - [`facade`] - The operations callers use
//! - [`backend`] - Async accessor seam, one repository handle per call
//! - [`core`] - Pure classification and reconstruction, domain types, config
//! - [`git`] - Single interface for all Git operations
//! - [`ui`] - Output and logging
//!
//! # Known Limitations
//!
//! 1. Only the first hunk of a path's diff is applied when rebuilding
//!    staged or working-copy content
//! 2. If several patches share an old-file path, the first one is used

pub mod backend;
pub mod cli;
pub mod core;
pub mod facade;
pub mod git;
pub mod ui;

pub use facade::{Gitoscope, LookupError};
