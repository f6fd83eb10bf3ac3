//! core::models
//!
//! Serializable descriptors for raw repository objects.
//!
//! These are what the pass-through lookups (commit, tree, blob, references)
//! hand to the presentation layer. They are built by [`crate::git`] and
//! carry no behavior beyond serialization.

use serde::{Deserialize, Serialize};

use super::types::Oid;

/// Author or committer identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    pub name: String,
    pub email: String,
    pub time: chrono::DateTime<chrono::FixedOffset>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitDescriptor {
    pub id: Oid,
    pub tree: Oid,
    pub parents: Vec<Oid>,
    /// First line of the message.
    pub summary: String,
    pub message: String,
    pub author: Signature,
    pub committer: Signature,
}

/// Kind of object a tree entry points to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Blob,
    Tree,
    /// Submodule commit.
    Commit,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeEntryDescriptor {
    pub name: String,
    pub id: Oid,
    pub kind: EntryKind,
    /// Octal file mode as git prints it, e.g. `100644`.
    pub filemode: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeDescriptor {
    pub id: Oid,
    pub entries: Vec<TreeEntryDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlobDescriptor {
    pub id: Oid,
    pub size: usize,
    pub is_binary: bool,
    /// Text content, absent for binary blobs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// Namespace a reference lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceKind {
    Branch,
    Remote,
    Tag,
    Note,
    Other,
}

impl ReferenceKind {
    /// Classify a full reference name by its prefix.
    ///
    /// # Example
    ///
    /// ```
    /// use gitoscope::core::models::ReferenceKind;
    ///
    /// assert_eq!(ReferenceKind::from_name("refs/heads/main"), ReferenceKind::Branch);
    /// assert_eq!(ReferenceKind::from_name("refs/remotes/origin/main"), ReferenceKind::Remote);
    /// assert_eq!(ReferenceKind::from_name("HEAD"), ReferenceKind::Other);
    /// ```
    pub fn from_name(name: &str) -> Self {
        if name.starts_with("refs/heads/") {
            ReferenceKind::Branch
        } else if name.starts_with("refs/remotes/") {
            ReferenceKind::Remote
        } else if name.starts_with("refs/tags/") {
            ReferenceKind::Tag
        } else if name.starts_with("refs/notes/") {
            ReferenceKind::Note
        } else {
            ReferenceKind::Other
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceDescriptor {
    /// Full name, e.g. `refs/heads/main` or `HEAD`.
    pub name: String,
    pub shorthand: String,
    /// Resolved object id. Absent for dangling symbolic refs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<Oid>,
    /// Target name for symbolic refs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbolic_target: Option<String>,
    pub kind: ReferenceKind,
    pub is_head: bool,
}
