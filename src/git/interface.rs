//! git::interface
//!
//! Git interface implementation using git2.
//!
//! This module provides the **single doorway** to all Git operations in
//! Gitoscope. Every repository read flows through this interface, which
//! provides structured results and normalizes errors into typed failure
//! categories.
//!
//! # Architecture
//!
//! The `Git` struct is the only way to interact with a Git repository.
//! No other module should import `git2` directly. This ensures:
//!
//! - Consistent error handling across all Git operations
//! - Strong type guarantees at the boundary
//! - Raw backend flags are flattened into fixed-shape records before
//!   anything else sees them
//!
//! # Error Handling
//!
//! Git errors are categorized into typed variants:
//! - [`GitError::NotARepo`]: Not inside a Git repository
//! - [`GitError::RefNotFound`]: Requested ref does not exist (or HEAD is unborn)
//! - [`GitError::ObjectNotFound`]: Requested object does not exist
//! - [`GitError::PathNotFound`]: Path has no blob in the HEAD tree
//!
//! # Example
//!
//! ```ignore
//! use gitoscope::git::Git;
//! use std::path::Path;
//!
//! let git = Git::open(Path::new("."))?;
//! let files = git.head_tree_paths()?;
//! println!("{} files at HEAD", files.len());
//! ```

use std::path::{Path, PathBuf};

use chrono::Offset;
use thiserror::Error;

use crate::core::config::DEFAULT_CONTEXT_LINES;
use crate::core::content::{DiffHunk, DiffMode};
use crate::core::models::{
    BlobDescriptor, CommitDescriptor, EntryKind, ReferenceDescriptor, ReferenceKind, Signature,
    TreeDescriptor, TreeEntryDescriptor,
};
use crate::core::status::RawStatusRecord;
use crate::core::types::{Oid, TypeError};

/// Errors from Git operations.
#[derive(Debug, Clone, Error)]
pub enum GitError {
    /// Not inside a Git repository.
    #[error("not a git repository: {path}")]
    NotARepo {
        /// The path that was searched
        path: PathBuf,
    },

    /// Repository is bare (no working directory).
    #[error("bare repository not supported")]
    BareRepo,

    /// Requested ref does not exist.
    #[error("ref not found: {refname}")]
    RefNotFound {
        /// The ref that was not found
        refname: String,
    },

    /// Object not found in repository.
    #[error("object not found: {oid}")]
    ObjectNotFound {
        /// The OID that was not found
        oid: String,
    },

    /// Path has no blob entry in the HEAD tree.
    #[error("path not found at HEAD: {path}")]
    PathNotFound {
        /// The repository-relative path
        path: String,
    },

    /// Invalid object id format.
    #[error("invalid object id: {oid}")]
    InvalidOid {
        /// The invalid OID string
        oid: String,
    },

    /// Permission or filesystem error.
    #[error("repository access error: {message}")]
    AccessError {
        /// Description of the error
        message: String,
    },

    /// Internal git2 error.
    #[error("git error: {message}")]
    Internal {
        /// The error message
        message: String,
    },
}

impl GitError {
    /// Create a GitError from a git2::Error with richer context.
    fn from_git2(err: git2::Error, context: &str) -> Self {
        match err.code() {
            git2::ErrorCode::NotFound | git2::ErrorCode::UnbornBranch => {
                if context == "HEAD" || context.starts_with("refs/") {
                    GitError::RefNotFound {
                        refname: context.to_string(),
                    }
                } else {
                    GitError::ObjectNotFound {
                        oid: context.to_string(),
                    }
                }
            }
            git2::ErrorCode::InvalidSpec | git2::ErrorCode::Ambiguous => GitError::InvalidOid {
                oid: context.to_string(),
            },
            git2::ErrorCode::Locked => GitError::AccessError {
                message: format!("repository is locked: {}", err.message()),
            },
            _ => GitError::Internal {
                message: format!("{}: {}", context, err.message()),
            },
        }
    }

    /// Whether this error means "the thing does not exist" rather than
    /// "the lookup failed".
    ///
    /// # Example
    ///
    /// ```
    /// use gitoscope::git::GitError;
    ///
    /// let missing = GitError::PathNotFound { path: "a.txt".to_string() };
    /// assert!(missing.is_not_found());
    ///
    /// let broken = GitError::Internal { message: "corrupt pack".to_string() };
    /// assert!(!broken.is_not_found());
    /// ```
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            GitError::RefNotFound { .. }
                | GitError::ObjectNotFound { .. }
                | GitError::PathNotFound { .. }
        )
    }
}

impl From<git2::Error> for GitError {
    fn from(err: git2::Error) -> Self {
        GitError::Internal {
            message: err.message().to_string(),
        }
    }
}

impl From<TypeError> for GitError {
    fn from(err: TypeError) -> Self {
        match err {
            TypeError::InvalidOid(msg) => GitError::InvalidOid { oid: msg },
        }
    }
}

/// Tunables for status and diff queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryOptions {
    /// Report ignored files in status.
    pub include_ignored: bool,
    /// Context lines around each diff hunk.
    pub context_lines: u32,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            include_ignored: false,
            context_lines: DEFAULT_CONTEXT_LINES,
        }
    }
}

/// Flatten libgit2 status bits into a fixed-shape record.
///
/// `in_index` and `in_working_tree` are set when any bit of the respective
/// side is present.
fn raw_record_from_status(path: impl Into<String>, status: git2::Status) -> RawStatusRecord {
    let index_bits = git2::Status::INDEX_NEW
        | git2::Status::INDEX_MODIFIED
        | git2::Status::INDEX_DELETED
        | git2::Status::INDEX_RENAMED
        | git2::Status::INDEX_TYPECHANGE;
    let worktree_bits = git2::Status::WT_NEW
        | git2::Status::WT_MODIFIED
        | git2::Status::WT_DELETED
        | git2::Status::WT_RENAMED
        | git2::Status::WT_TYPECHANGE
        | git2::Status::WT_UNREADABLE;

    RawStatusRecord {
        path: path.into(),
        is_new: status.is_wt_new() || status.is_index_new(),
        is_modified: status.is_wt_modified() || status.is_index_modified(),
        is_deleted: status.is_wt_deleted() || status.is_index_deleted(),
        is_ignored: status.is_ignored(),
        in_index: status.intersects(index_bits),
        in_working_tree: status.intersects(worktree_bits),
        is_renamed: status.is_wt_renamed() || status.is_index_renamed(),
        is_typechange: status.is_wt_typechange() || status.is_index_typechange(),
        is_conflicted: status.is_conflicted(),
    }
}

/// The Git interface.
///
/// This is the **single point of interaction** with Git. A handle is cheap
/// to open and is not shared: callers open one per request.
pub struct Git {
    /// The underlying git2 repository
    repo: git2::Repository,
}

impl std::fmt::Debug for Git {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Git")
            .field("path", &self.repo.path())
            .finish()
    }
}

impl Git {
    // =========================================================================
    // Repository Opening
    // =========================================================================

    /// Open a repository at the given path.
    ///
    /// Uses `git2::Repository::discover` to find the repository root,
    /// so `path` can be any directory within the repository.
    ///
    /// # Errors
    ///
    /// - [`GitError::NotARepo`] if no repository is found
    /// - [`GitError::BareRepo`] if the repository has no working directory
    pub fn open(path: &Path) -> Result<Self, GitError> {
        let repo = git2::Repository::discover(path).map_err(|_| GitError::NotARepo {
            path: path.to_path_buf(),
        })?;

        // The working copy view needs a working directory
        if repo.is_bare() {
            return Err(GitError::BareRepo);
        }

        Ok(Self { repo })
    }

    /// The repository's common git directory.
    ///
    /// For a linked worktree this is the main repository's `.git`, so state
    /// kept there is shared by every worktree.
    pub fn common_dir(&self) -> &Path {
        self.repo.commondir()
    }

    // =========================================================================
    // HEAD
    // =========================================================================

    /// Get the HEAD commit OID.
    ///
    /// # Errors
    ///
    /// - [`GitError::RefNotFound`] if HEAD is unborn (new repository)
    pub fn head_oid(&self) -> Result<Oid, GitError> {
        let commit = self.head_commit()?;
        to_oid(commit.id())
    }

    fn head_commit(&self) -> Result<git2::Commit<'_>, GitError> {
        self.repo
            .head()
            .and_then(|head| head.peel_to_commit())
            .map_err(|e| GitError::from_git2(e, "HEAD"))
    }

    fn head_tree(&self) -> Result<git2::Tree<'_>, GitError> {
        self.head_commit()?
            .tree()
            .map_err(|e| GitError::from_git2(e, "HEAD^{tree}"))
    }

    /// HEAD tree, or `None` when HEAD is unborn.
    fn try_head_tree(&self) -> Result<Option<git2::Tree<'_>>, GitError> {
        match self.head_tree() {
            Ok(tree) => Ok(Some(tree)),
            Err(GitError::RefNotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// List every blob path in the HEAD tree, recursively.
    ///
    /// Paths are `/`-separated and relative to the repository root. An
    /// unborn HEAD has no files.
    pub fn head_tree_paths(&self) -> Result<Vec<String>, GitError> {
        let Some(tree) = self.try_head_tree()? else {
            return Ok(Vec::new());
        };

        let mut paths = Vec::new();
        tree.walk(git2::TreeWalkMode::PreOrder, |root, entry| {
            if entry.kind() == Some(git2::ObjectType::Blob) {
                let name = String::from_utf8_lossy(entry.name_bytes());
                paths.push(format!("{}{}", root, name));
            }
            git2::TreeWalkResult::Ok
        })
        .map_err(|e| GitError::from_git2(e, "HEAD^{tree}"))?;

        Ok(paths)
    }

    /// Read the text of `path` as committed at HEAD.
    ///
    /// Non-UTF-8 bytes are replaced.
    ///
    /// # Errors
    ///
    /// - [`GitError::RefNotFound`] if HEAD is unborn
    /// - [`GitError::PathNotFound`] if the HEAD tree has no blob at `path`
    pub fn head_blob_text(&self, path: &str) -> Result<String, GitError> {
        let tree = self.head_tree()?;
        let not_found = || GitError::PathNotFound {
            path: path.to_string(),
        };
        if path.is_empty() {
            return Err(not_found());
        }

        let entry = tree.get_path(Path::new(path)).map_err(|e| {
            if e.code() == git2::ErrorCode::NotFound {
                not_found()
            } else {
                GitError::from_git2(e, path)
            }
        })?;

        let object = entry
            .to_object(&self.repo)
            .map_err(|e| GitError::from_git2(e, path))?;
        let blob = object.into_blob().map_err(|_| not_found())?;

        Ok(String::from_utf8_lossy(blob.content()).into_owned())
    }

    // =========================================================================
    // Status
    // =========================================================================

    /// Per-path status records.
    ///
    /// Untracked files are included and untracked directories recursed;
    /// ignored files are included only if `options.include_ignored`.
    pub fn status_records(&self, options: &QueryOptions) -> Result<Vec<RawStatusRecord>, GitError> {
        let mut opts = git2::StatusOptions::new();
        opts.include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_ignored(options.include_ignored);

        let statuses = self
            .repo
            .statuses(Some(&mut opts))
            .map_err(|e| GitError::Internal {
                message: e.message().to_string(),
            })?;

        Ok(statuses
            .iter()
            .map(|entry| {
                let path = String::from_utf8_lossy(entry.path_bytes()).into_owned();
                raw_record_from_status(path, entry.status())
            })
            .collect())
    }

    // =========================================================================
    // Diff Hunks
    // =========================================================================

    /// Hunks of the HEAD-tree diff for one path.
    ///
    /// The first patch whose old-file path equals `path` is used; an empty
    /// list means the diff reports no change. Each hunk keeps the context and
    /// added lines (those present in the new content) with their terminators.
    pub fn diff_hunks(
        &self,
        mode: DiffMode,
        path: &str,
        options: &QueryOptions,
    ) -> Result<Vec<DiffHunk>, GitError> {
        // No file has an empty path, so there is no patch to find
        if path.is_empty() {
            return Ok(Vec::new());
        }
        let tree = self.try_head_tree()?;

        let mut opts = git2::DiffOptions::new();
        opts.context_lines(options.context_lines)
            .pathspec(path)
            .disable_pathspec_match(true);

        let diff = match mode {
            DiffMode::TreeToIndex => {
                self.repo
                    .diff_tree_to_index(tree.as_ref(), None, Some(&mut opts))
            }
            DiffMode::TreeToWorkdir => {
                self.repo
                    .diff_tree_to_workdir(tree.as_ref(), Some(&mut opts))
            }
        }
        .map_err(|e| GitError::from_git2(e, path))?;

        let wanted = Path::new(path);
        let Some(index) = diff
            .deltas()
            .position(|delta| delta.old_file().path() == Some(wanted))
        else {
            return Ok(Vec::new());
        };

        let Some(patch) =
            git2::Patch::from_diff(&diff, index).map_err(|e| GitError::from_git2(e, path))?
        else {
            return Ok(Vec::new());
        };

        let mut hunks = Vec::with_capacity(patch.num_hunks());
        for hunk_idx in 0..patch.num_hunks() {
            let (hunk, line_count) = patch.hunk(hunk_idx)?;

            let mut lines = Vec::with_capacity(line_count);
            for line_idx in 0..line_count {
                let line = patch.line_in_hunk(hunk_idx, line_idx)?;
                if line.new_lineno().is_none() {
                    continue;
                }
                // End-of-file newline markers carry no file text
                if matches!(
                    line.origin_value(),
                    git2::DiffLineType::ContextEOFNL
                        | git2::DiffLineType::AddEOFNL
                        | git2::DiffLineType::DeleteEOFNL
                ) {
                    continue;
                }
                lines.push(String::from_utf8_lossy(line.content()).into_owned());
            }

            let old_lines = hunk.old_lines() as usize;
            let mut old_start = hunk.old_start() as usize;
            // Pure insertions are reported by the line they follow
            if old_lines == 0 && old_start > 0 {
                old_start += 1;
            }

            hunks.push(DiffHunk {
                old_start,
                old_lines,
                lines,
            });
        }

        Ok(hunks)
    }

    // =========================================================================
    // Object Lookups
    // =========================================================================

    /// Describe a commit.
    ///
    /// # Errors
    ///
    /// - [`GitError::ObjectNotFound`] if the commit doesn't exist
    pub fn commit(&self, oid: &Oid) -> Result<CommitDescriptor, GitError> {
        let commit = self
            .repo
            .find_commit(parse_oid(oid)?)
            .map_err(|e| GitError::from_git2(e, oid.as_str()))?;

        let parents = commit
            .parent_ids()
            .map(to_oid)
            .collect::<Result<Vec<_>, _>>()?;

        let descriptor = CommitDescriptor {
            id: oid.clone(),
            tree: to_oid(commit.tree_id())?,
            parents,
            summary: commit.summary().unwrap_or("").to_string(),
            message: commit.message().unwrap_or("").to_string(),
            author: signature(&commit.author()),
            committer: signature(&commit.committer()),
        };
        Ok(descriptor)
    }

    /// Describe a tree and its direct entries.
    pub fn tree(&self, oid: &Oid) -> Result<TreeDescriptor, GitError> {
        let tree = self
            .repo
            .find_tree(parse_oid(oid)?)
            .map_err(|e| GitError::from_git2(e, oid.as_str()))?;

        let entries = tree
            .iter()
            .map(|entry| {
                Ok(TreeEntryDescriptor {
                    name: String::from_utf8_lossy(entry.name_bytes()).into_owned(),
                    id: to_oid(entry.id())?,
                    kind: match entry.kind() {
                        Some(git2::ObjectType::Blob) => EntryKind::Blob,
                        Some(git2::ObjectType::Tree) => EntryKind::Tree,
                        Some(git2::ObjectType::Commit) => EntryKind::Commit,
                        _ => EntryKind::Other,
                    },
                    filemode: format!("{:06o}", entry.filemode()),
                })
            })
            .collect::<Result<Vec<_>, GitError>>()?;

        Ok(TreeDescriptor {
            id: oid.clone(),
            entries,
        })
    }

    /// Describe a blob. Text content is included unless the blob is binary.
    pub fn blob(&self, oid: &Oid) -> Result<BlobDescriptor, GitError> {
        let blob = self
            .repo
            .find_blob(parse_oid(oid)?)
            .map_err(|e| GitError::from_git2(e, oid.as_str()))?;

        let is_binary = blob.is_binary();
        Ok(BlobDescriptor {
            id: oid.clone(),
            size: blob.size(),
            is_binary,
            content: (!is_binary).then(|| String::from_utf8_lossy(blob.content()).into_owned()),
        })
    }

    // =========================================================================
    // References
    // =========================================================================

    /// Every reference, followed by the current HEAD reference.
    ///
    /// The HEAD entry is the reference HEAD resolves to (the checked-out
    /// branch, or `HEAD` itself when detached) with `is_head` set. It is
    /// omitted when HEAD is unborn.
    pub fn references(&self) -> Result<Vec<ReferenceDescriptor>, GitError> {
        let refs = self.repo.references().map_err(|e| GitError::Internal {
            message: e.message().to_string(),
        })?;

        let mut result = Vec::new();
        for reference in refs {
            let reference = reference.map_err(|e| GitError::Internal {
                message: e.message().to_string(),
            })?;
            if let Some(descriptor) = describe_reference(&reference, false)? {
                result.push(descriptor);
            }
        }

        match self.repo.head() {
            Ok(head) => {
                if let Some(descriptor) = describe_reference(&head, true)? {
                    result.push(descriptor);
                }
            }
            Err(e)
                if matches!(
                    e.code(),
                    git2::ErrorCode::UnbornBranch | git2::ErrorCode::NotFound
                ) => {}
            Err(e) => return Err(GitError::from_git2(e, "HEAD")),
        }

        Ok(result)
    }
}

fn describe_reference(
    reference: &git2::Reference<'_>,
    is_head: bool,
) -> Result<Option<ReferenceDescriptor>, GitError> {
    // Skip refs with non-UTF8 names
    let Some(name) = reference.name() else {
        return Ok(None);
    };

    let target = match reference.resolve() {
        Ok(resolved) => resolved.target().map(to_oid).transpose()?,
        Err(_) => None,
    };

    Ok(Some(ReferenceDescriptor {
        name: name.to_string(),
        shorthand: reference.shorthand().unwrap_or(name).to_string(),
        target,
        symbolic_target: reference.symbolic_target().map(String::from),
        kind: ReferenceKind::from_name(name),
        is_head,
    }))
}

fn signature(sig: &git2::Signature<'_>) -> Signature {
    let when = sig.when();
    let offset = chrono::FixedOffset::east_opt(when.offset_minutes() * 60)
        .unwrap_or_else(|| chrono::Utc.fix());
    let time = chrono::DateTime::from_timestamp(when.seconds(), 0)
        .unwrap_or(chrono::DateTime::UNIX_EPOCH)
        .with_timezone(&offset);

    Signature {
        name: String::from_utf8_lossy(sig.name_bytes()).into_owned(),
        email: String::from_utf8_lossy(sig.email_bytes()).into_owned(),
        time,
    }
}

fn to_oid(id: git2::Oid) -> Result<Oid, GitError> {
    Ok(Oid::new(id.to_string())?)
}

fn parse_oid(oid: &Oid) -> Result<git2::Oid, GitError> {
    git2::Oid::from_str(oid.as_str()).map_err(|e| GitError::from_git2(e, oid.as_str()))
}
