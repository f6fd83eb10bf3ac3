//! git
//!
//! Single interface for all Git operations.
//!
//! # Architecture
//!
//! This module is the **ONLY doorway** to Git. All repository reads flow
//! through this interface. No other module should import `git2`.
//!
//! # Responsibilities
//!
//! - Repository discovery and opening
//! - HEAD resolution and tree walking
//! - Status flags, flattened into [`RawStatusRecord`](crate::core::status::RawStatusRecord)
//! - Tree→index and tree→workdir diff hunks
//! - Commit, tree, blob and reference descriptors
//!
//! # Invariants
//!
//! - No other module calls git2 directly
//! - All operations return strong types (Oid, descriptors, records)
//! - A `Git` handle is never shared between requests
//!
//! # Example
//!
//! ```ignore
//! use gitoscope::core::content::DiffMode;
//! use gitoscope::git::{Git, QueryOptions};
//! use std::path::Path;
//!
//! let git = Git::open(Path::new("."))?;
//! let hunks = git.diff_hunks(DiffMode::TreeToWorkdir, "README.md", &QueryOptions::default())?;
//! ```

mod interface;

pub use interface::{Git, GitError, QueryOptions};
