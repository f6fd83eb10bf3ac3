//! ui
//!
//! User-facing output.
//!
//! # Modules
//!
//! - [`output`] - Result printing, verbosity and log subscriber setup

pub mod output;
