//! facade
//!
//! The operations a presentation layer calls.
//!
//! # Operations
//!
//! - [`Gitoscope::status`] - status map over every changed or tracked path
//! - [`Gitoscope::tree_content`] - committed text of a path
//! - [`Gitoscope::cache_content`] - staged text, rebuilt from hunks
//! - [`Gitoscope::working_copy_content`] - working-copy text, rebuilt from hunks
//! - [`Gitoscope::commit`], [`Gitoscope::tree`], [`Gitoscope::blob`],
//!   [`Gitoscope::references`] - pass-through descriptors
//!
//! # Concurrency
//!
//! Independent backend steps run concurrently and are joined before
//! continuing: status records with HEAD tree paths, and HEAD blob text with
//! diff hunks. No deadline is imposed here; callers wrap calls in their own
//! timeout if they need one.
//!
//! # Errors
//!
//! A HEAD lookup that finds nothing is not an error for the content
//! operations: the base text is taken as empty and the absence is logged.
//! Every other backend failure propagates. [`Gitoscope::lookup_tree_content`]
//! exposes the distinction through [`LookupError`].
//!
//! # Example
//!
//! ```
//! use gitoscope::backend::mock::MockAccessor;
//! use gitoscope::core::content::{DiffHunk, DiffMode};
//! use gitoscope::Gitoscope;
//!
//! # tokio_test::block_on(async {
//! let accessor = MockAccessor::new()
//!     .with_head_file("file.txt", "a\nb\nc\n")
//!     .with_hunks(DiffMode::TreeToWorkdir, "file.txt", vec![DiffHunk {
//!         old_start: 2,
//!         old_lines: 1,
//!         lines: vec!["B\n".to_string()],
//!     }]);
//! let gitoscope = Gitoscope::new(accessor);
//!
//! assert_eq!(gitoscope.working_copy_content("file.txt").await.unwrap(), "a\nB\nc\n");
//! assert_eq!(gitoscope.cache_content("file.txt").await.unwrap(), "a\nb\nc\n");
//! # });
//! ```

use thiserror::Error;
use tracing::{debug, warn};

use crate::backend::RepositoryAccessor;
use crate::core::content::{reconstruct, DiffMode};
use crate::core::models::{BlobDescriptor, CommitDescriptor, ReferenceDescriptor, TreeDescriptor};
use crate::core::status::{status_to_map, StatusMap};
use crate::core::types::Oid;
use crate::git::GitError;

/// Outcome of a HEAD content lookup that did not produce text.
#[derive(Debug, Clone, Error)]
pub enum LookupError {
    /// Nothing exists at HEAD for the path (or HEAD itself is unborn).
    #[error("not found: {0}")]
    NotFound(String),

    /// The lookup itself failed.
    #[error(transparent)]
    Backend(GitError),
}

impl From<GitError> for LookupError {
    fn from(err: GitError) -> Self {
        if err.is_not_found() {
            LookupError::NotFound(err.to_string())
        } else {
            LookupError::Backend(err)
        }
    }
}

/// Repository views over a backend accessor.
#[derive(Debug, Clone)]
pub struct Gitoscope<A> {
    accessor: A,
}

impl<A: RepositoryAccessor> Gitoscope<A> {
    pub fn new(accessor: A) -> Self {
        Self { accessor }
    }

    pub fn accessor(&self) -> &A {
        &self.accessor
    }

    /// Status of every path with a change or present in the HEAD tree.
    pub async fn status(&self) -> Result<StatusMap, GitError> {
        let (records, head_files) = tokio::try_join!(
            self.accessor.status_records(),
            self.accessor.head_tree_paths()
        )?;
        debug!(
            records = records.len(),
            head_files = head_files.len(),
            "classifying status"
        );

        Ok(status_to_map(records, &head_files))
    }

    /// Committed text of `path`, distinguishing absence from failure.
    pub async fn lookup_tree_content(&self, path: &str) -> Result<String, LookupError> {
        self.accessor
            .head_blob_text(path)
            .await
            .map_err(LookupError::from)
    }

    /// Committed text of `path`, or empty text if HEAD has no such file.
    pub async fn tree_content(&self, path: &str) -> Result<String, GitError> {
        match self.lookup_tree_content(path).await {
            Ok(text) => Ok(text),
            Err(LookupError::NotFound(reason)) => {
                warn!(path, %reason, "no committed content");
                Ok(String::new())
            }
            Err(LookupError::Backend(e)) => Err(e),
        }
    }

    /// Staged text of `path`.
    pub async fn cache_content(&self, path: &str) -> Result<String, GitError> {
        self.build_content(DiffMode::TreeToIndex, path).await
    }

    /// Working-copy text of `path`.
    pub async fn working_copy_content(&self, path: &str) -> Result<String, GitError> {
        self.build_content(DiffMode::TreeToWorkdir, path).await
    }

    /// Rebuild the content of `path` from its HEAD blob and the first hunk
    /// of the `mode` diff.
    pub async fn build_content(&self, mode: DiffMode, path: &str) -> Result<String, GitError> {
        let (blob, hunks) = tokio::join!(
            self.lookup_tree_content(path),
            self.accessor.diff_hunks(mode, path)
        );
        let hunks = hunks?;

        let blob = match blob {
            Ok(text) => text,
            Err(LookupError::NotFound(reason)) => {
                warn!(path, %mode, %reason, "no committed content, rebuilding from empty");
                String::new()
            }
            Err(LookupError::Backend(e)) => return Err(e),
        };

        if hunks.len() > 1 {
            debug!(path, %mode, hunks = hunks.len(), "applying first hunk only");
        }

        Ok(reconstruct(&blob, &hunks))
    }

    /// Describe a commit by id.
    pub async fn commit(&self, id: &str) -> Result<CommitDescriptor, GitError> {
        let oid = Oid::new(id)?;
        self.accessor.commit(&oid).await
    }

    /// Describe a tree by id.
    pub async fn tree(&self, id: &str) -> Result<TreeDescriptor, GitError> {
        let oid = Oid::new(id)?;
        self.accessor.tree(&oid).await
    }

    /// Describe a blob by id.
    pub async fn blob(&self, id: &str) -> Result<BlobDescriptor, GitError> {
        let oid = Oid::new(id)?;
        self.accessor.blob(&oid).await
    }

    /// All references plus the current HEAD reference.
    pub async fn references(&self) -> Result<Vec<ReferenceDescriptor>, GitError> {
        self.accessor.references().await
    }
}
