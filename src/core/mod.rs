//! core
//!
//! Core domain types and the pure algorithms of Gitoscope.
//!
//! # Modules
//!
//! - [`types`] - Strong types: Oid
//! - [`status`] - Three-state status classification
//! - [`content`] - Hunk-based content reconstruction
//! - [`models`] - Object descriptors for pass-through lookups
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Classification and reconstruction are pure and deterministic
//! - Nothing in `core` talks to the repository

pub mod config;
pub mod content;
pub mod models;
pub mod status;
pub mod types;
