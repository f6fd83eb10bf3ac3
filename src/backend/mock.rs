//! backend::mock
//!
//! In-memory accessor for deterministic testing.
//!
//! # Design
//!
//! The mock stores HEAD files, status records, hunks and object
//! descriptors in memory, records every call, and can be configured to
//! fail a specific operation.
//!
//! # Example
//!
//! ```
//! use gitoscope::backend::mock::MockAccessor;
//! use gitoscope::backend::RepositoryAccessor;
//!
//! # tokio_test::block_on(async {
//! let accessor = MockAccessor::new().with_head_file("a.txt", "hello\n");
//!
//! assert_eq!(accessor.head_blob_text("a.txt").await.unwrap(), "hello\n");
//! assert_eq!(accessor.head_tree_paths().await.unwrap(), vec!["a.txt"]);
//! # });
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::RepositoryAccessor;
use crate::core::content::{DiffHunk, DiffMode};
use crate::core::models::{BlobDescriptor, CommitDescriptor, ReferenceDescriptor, TreeDescriptor};
use crate::core::status::RawStatusRecord;
use crate::core::types::Oid;
use crate::git::GitError;

/// Mock accessor for testing.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping.
#[derive(Debug, Clone, Default)]
pub struct MockAccessor {
    inner: Arc<Mutex<MockAccessorInner>>,
}

#[derive(Debug, Default)]
struct MockAccessorInner {
    /// HEAD files in insertion order.
    head_files: Vec<(String, String)>,
    status_records: Vec<RawStatusRecord>,
    hunks: HashMap<(DiffMode, String), Vec<DiffHunk>>,
    commits: HashMap<Oid, CommitDescriptor>,
    trees: HashMap<Oid, TreeDescriptor>,
    blobs: HashMap<Oid, BlobDescriptor>,
    references: Vec<ReferenceDescriptor>,
    fail_on: Option<FailOn>,
    operations: Vec<MockOperation>,
}

/// Configuration for which operation should fail.
#[derive(Debug, Clone)]
pub enum FailOn {
    StatusRecords(GitError),
    HeadTreePaths(GitError),
    HeadBlobText(GitError),
    DiffHunks(GitError),
    Commit(GitError),
    Tree(GitError),
    Blob(GitError),
    References(GitError),
}

/// Recorded operation for test verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockOperation {
    StatusRecords,
    HeadTreePaths,
    HeadBlobText { path: String },
    DiffHunks { mode: DiffMode, path: String },
    Commit { oid: Oid },
    Tree { oid: Oid },
    Blob { oid: Oid },
    References,
}

impl MockAccessor {
    /// Create a new empty mock accessor (unborn HEAD, clean status).
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file to the HEAD tree.
    pub fn with_head_file(self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.lock().head_files.push((path.into(), content.into()));
        self
    }

    pub fn with_status_record(self, record: RawStatusRecord) -> Self {
        self.lock().status_records.push(record);
        self
    }

    /// Set the hunks the given diff reports for `path`.
    pub fn with_hunks(self, mode: DiffMode, path: impl Into<String>, hunks: Vec<DiffHunk>) -> Self {
        self.lock().hunks.insert((mode, path.into()), hunks);
        self
    }

    pub fn with_commit(self, commit: CommitDescriptor) -> Self {
        self.lock().commits.insert(commit.id.clone(), commit);
        self
    }

    pub fn with_tree(self, tree: TreeDescriptor) -> Self {
        self.lock().trees.insert(tree.id.clone(), tree);
        self
    }

    pub fn with_blob(self, blob: BlobDescriptor) -> Self {
        self.lock().blobs.insert(blob.id.clone(), blob);
        self
    }

    pub fn with_reference(self, reference: ReferenceDescriptor) -> Self {
        self.lock().references.push(reference);
        self
    }

    /// Configure the mock to fail on a specific operation.
    ///
    /// # Example
    ///
    /// ```
    /// use gitoscope::backend::mock::{FailOn, MockAccessor};
    /// use gitoscope::git::GitError;
    ///
    /// let accessor = MockAccessor::new().fail_on(FailOn::StatusRecords(GitError::BareRepo));
    /// ```
    pub fn fail_on(self, fail_on: FailOn) -> Self {
        self.lock().fail_on = Some(fail_on);
        self
    }

    /// Clear the failure configuration.
    pub fn clear_fail_on(&self) {
        self.lock().fail_on = None;
    }

    /// Get all recorded operations.
    pub fn operations(&self) -> Vec<MockOperation> {
        self.lock().operations.clone()
    }

    /// Clear recorded operations.
    pub fn clear_operations(&self) {
        self.lock().operations.clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockAccessorInner> {
        self.inner.lock().unwrap()
    }

    fn record(&self, op: MockOperation) {
        self.lock().operations.push(op);
    }

    /// Check if we should fail and return the error if so.
    fn check_fail(&self, expected: &str) -> Option<GitError> {
        let inner = self.lock();
        match &inner.fail_on {
            Some(FailOn::StatusRecords(e)) if expected == "status_records" => Some(e.clone()),
            Some(FailOn::HeadTreePaths(e)) if expected == "head_tree_paths" => Some(e.clone()),
            Some(FailOn::HeadBlobText(e)) if expected == "head_blob_text" => Some(e.clone()),
            Some(FailOn::DiffHunks(e)) if expected == "diff_hunks" => Some(e.clone()),
            Some(FailOn::Commit(e)) if expected == "commit" => Some(e.clone()),
            Some(FailOn::Tree(e)) if expected == "tree" => Some(e.clone()),
            Some(FailOn::Blob(e)) if expected == "blob" => Some(e.clone()),
            Some(FailOn::References(e)) if expected == "references" => Some(e.clone()),
            _ => None,
        }
    }
}

#[async_trait]
impl RepositoryAccessor for MockAccessor {
    async fn status_records(&self) -> Result<Vec<RawStatusRecord>, GitError> {
        self.record(MockOperation::StatusRecords);
        if let Some(e) = self.check_fail("status_records") {
            return Err(e);
        }
        Ok(self.lock().status_records.clone())
    }

    async fn head_tree_paths(&self) -> Result<Vec<String>, GitError> {
        self.record(MockOperation::HeadTreePaths);
        if let Some(e) = self.check_fail("head_tree_paths") {
            return Err(e);
        }
        Ok(self
            .lock()
            .head_files
            .iter()
            .map(|(path, _)| path.clone())
            .collect())
    }

    async fn head_blob_text(&self, path: &str) -> Result<String, GitError> {
        self.record(MockOperation::HeadBlobText {
            path: path.to_string(),
        });
        if let Some(e) = self.check_fail("head_blob_text") {
            return Err(e);
        }

        let inner = self.lock();
        if inner.head_files.is_empty() {
            return Err(GitError::RefNotFound {
                refname: "HEAD".to_string(),
            });
        }
        inner
            .head_files
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, content)| content.clone())
            .ok_or_else(|| GitError::PathNotFound {
                path: path.to_string(),
            })
    }

    async fn diff_hunks(&self, mode: DiffMode, path: &str) -> Result<Vec<DiffHunk>, GitError> {
        self.record(MockOperation::DiffHunks {
            mode,
            path: path.to_string(),
        });
        if let Some(e) = self.check_fail("diff_hunks") {
            return Err(e);
        }
        Ok(self
            .lock()
            .hunks
            .get(&(mode, path.to_string()))
            .cloned()
            .unwrap_or_default())
    }

    async fn commit(&self, oid: &Oid) -> Result<CommitDescriptor, GitError> {
        self.record(MockOperation::Commit { oid: oid.clone() });
        if let Some(e) = self.check_fail("commit") {
            return Err(e);
        }
        self.lock()
            .commits
            .get(oid)
            .cloned()
            .ok_or_else(|| object_not_found(oid))
    }

    async fn tree(&self, oid: &Oid) -> Result<TreeDescriptor, GitError> {
        self.record(MockOperation::Tree { oid: oid.clone() });
        if let Some(e) = self.check_fail("tree") {
            return Err(e);
        }
        self.lock()
            .trees
            .get(oid)
            .cloned()
            .ok_or_else(|| object_not_found(oid))
    }

    async fn blob(&self, oid: &Oid) -> Result<BlobDescriptor, GitError> {
        self.record(MockOperation::Blob { oid: oid.clone() });
        if let Some(e) = self.check_fail("blob") {
            return Err(e);
        }
        self.lock()
            .blobs
            .get(oid)
            .cloned()
            .ok_or_else(|| object_not_found(oid))
    }

    async fn references(&self) -> Result<Vec<ReferenceDescriptor>, GitError> {
        self.record(MockOperation::References);
        if let Some(e) = self.check_fail("references") {
            return Err(e);
        }
        Ok(self.lock().references.clone())
    }
}

fn object_not_found(oid: &Oid) -> GitError {
    GitError::ObjectNotFound {
        oid: oid.to_string(),
    }
}
