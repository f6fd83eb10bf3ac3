//! backend
//!
//! Async seam between the facade and the version-control backend.
//!
//! # Design
//!
//! The [`RepositoryAccessor`] trait is async because every backend call is
//! blocking libgit2 work that must not stall the runtime. Each method is one
//! composable step; the facade joins independent steps concurrently.
//!
//! [`GitAccessor`] is the production implementation. It opens a fresh
//! [`Git`] handle on the blocking pool for **every** call: handles are never
//! pooled or shared between calls. [`mock::MockAccessor`] is an in-memory
//! double for tests.
//!
//! # Example
//!
//! ```ignore
//! use gitoscope::backend::{GitAccessor, RepositoryAccessor};
//! use gitoscope::git::QueryOptions;
//!
//! let accessor = GitAccessor::new("/path/to/repo", QueryOptions::default());
//! let files = accessor.head_tree_paths().await?;
//! ```

pub mod mock;

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use crate::core::content::{DiffHunk, DiffMode};
use crate::core::models::{BlobDescriptor, CommitDescriptor, ReferenceDescriptor, TreeDescriptor};
use crate::core::status::RawStatusRecord;
use crate::core::types::Oid;
use crate::git::{Git, GitError, QueryOptions};

/// Backend capabilities the facade depends on.
#[async_trait]
pub trait RepositoryAccessor: Send + Sync {
    /// Per-path status flags.
    async fn status_records(&self) -> Result<Vec<RawStatusRecord>, GitError>;

    /// Every blob path in the HEAD tree.
    async fn head_tree_paths(&self) -> Result<Vec<String>, GitError>;

    /// Text of `path` as committed at HEAD.
    async fn head_blob_text(&self, path: &str) -> Result<String, GitError>;

    /// Hunks of the first patch for `path` in the given diff.
    async fn diff_hunks(&self, mode: DiffMode, path: &str) -> Result<Vec<DiffHunk>, GitError>;

    async fn commit(&self, oid: &Oid) -> Result<CommitDescriptor, GitError>;

    async fn tree(&self, oid: &Oid) -> Result<TreeDescriptor, GitError>;

    async fn blob(&self, oid: &Oid) -> Result<BlobDescriptor, GitError>;

    /// All references plus the current HEAD reference.
    async fn references(&self) -> Result<Vec<ReferenceDescriptor>, GitError>;
}

/// Accessor backed by a repository on disk.
#[derive(Debug, Clone)]
pub struct GitAccessor {
    repo_path: PathBuf,
    options: QueryOptions,
}

impl GitAccessor {
    pub fn new(repo_path: impl Into<PathBuf>, options: QueryOptions) -> Self {
        Self {
            repo_path: repo_path.into(),
            options,
        }
    }

    pub fn repo_path(&self) -> &Path {
        &self.repo_path
    }

    pub fn options(&self) -> &QueryOptions {
        &self.options
    }

    /// Run `op` against a freshly opened repository on the blocking pool.
    async fn with_git<T, F>(&self, operation: &'static str, op: F) -> Result<T, GitError>
    where
        T: Send + 'static,
        F: FnOnce(&Git) -> Result<T, GitError> + Send + 'static,
    {
        let path = self.repo_path.clone();
        debug!(operation, repo = %path.display(), "opening repository");

        tokio::task::spawn_blocking(move || {
            let git = Git::open(&path)?;
            op(&git)
        })
        .await
        .map_err(|e| GitError::Internal {
            message: format!("{} task failed: {}", operation, e),
        })?
    }
}

#[async_trait]
impl RepositoryAccessor for GitAccessor {
    async fn status_records(&self) -> Result<Vec<RawStatusRecord>, GitError> {
        let options = self.options;
        self.with_git("status_records", move |git| git.status_records(&options))
            .await
    }

    async fn head_tree_paths(&self) -> Result<Vec<String>, GitError> {
        self.with_git("head_tree_paths", |git| git.head_tree_paths())
            .await
    }

    async fn head_blob_text(&self, path: &str) -> Result<String, GitError> {
        let path = path.to_string();
        self.with_git("head_blob_text", move |git| git.head_blob_text(&path))
            .await
    }

    async fn diff_hunks(&self, mode: DiffMode, path: &str) -> Result<Vec<DiffHunk>, GitError> {
        let path = path.to_string();
        let options = self.options;
        self.with_git("diff_hunks", move |git| {
            git.diff_hunks(mode, &path, &options)
        })
        .await
    }

    async fn commit(&self, oid: &Oid) -> Result<CommitDescriptor, GitError> {
        let oid = oid.clone();
        self.with_git("commit", move |git| git.commit(&oid)).await
    }

    async fn tree(&self, oid: &Oid) -> Result<TreeDescriptor, GitError> {
        let oid = oid.clone();
        self.with_git("tree", move |git| git.tree(&oid)).await
    }

    async fn blob(&self, oid: &Oid) -> Result<BlobDescriptor, GitError> {
        let oid = oid.clone();
        self.with_git("blob", move |git| git.blob(&oid)).await
    }

    async fn references(&self) -> Result<Vec<ReferenceDescriptor>, GitError> {
        self.with_git("references", |git| git.references()).await
    }
}
