//! core::status
//!
//! Three-state status classification across HEAD tree, index and working copy.
//!
//! # Overview
//!
//! The backend reports a flat set of flags per path ([`RawStatusRecord`]).
//! This module turns those flags into a [`FileStatus`]: where the path is
//! present (tree, index, working copy) and a short label describing the
//! difference between each adjacent pair of snapshots.
//!
//! # Rule Order
//!
//! Both label functions are priority-ordered: the first matching rule wins.
//! The preconditions overlap, so the order is load-bearing and must not be
//! rearranged.
//!
//! # Example
//!
//! ```
//! use gitoscope::core::status::{status_to_map, RawStatusRecord, WorkdirDiff, IndexDiff};
//!
//! let untracked = RawStatusRecord {
//!     path: "notes.txt".to_string(),
//!     is_new: true,
//!     in_working_tree: true,
//!     ..Default::default()
//! };
//! let map = status_to_map(vec![untracked], &["README.md".to_string()]);
//!
//! assert_eq!(map["notes.txt"].diff_string, WorkdirDiff::Untracked);
//! assert_eq!(map["README.md"].diff_cached_string, IndexDiff::Unchanged);
//! ```

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

/// Backend-supplied flags for one path.
///
/// This is a fixed-shape record computed once at the backend boundary.
/// Flags the backend does not report are `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStatusRecord {
    /// Repository-relative path, `/`-separated.
    pub path: String,
    pub is_new: bool,
    pub is_modified: bool,
    pub is_deleted: bool,
    pub is_ignored: bool,
    /// Any index-side change is recorded for this path.
    pub in_index: bool,
    /// Any working-tree-side change is recorded for this path.
    pub in_working_tree: bool,
    pub is_renamed: bool,
    pub is_typechange: bool,
    pub is_conflicted: bool,
}

/// Difference label between the index and the working copy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkdirDiff {
    #[default]
    #[serde(rename = "")]
    Unchanged,
    Untracked,
    Deleted,
    Modified,
}

impl WorkdirDiff {
    /// The wire label (`""` when unchanged).
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkdirDiff::Unchanged => "",
            WorkdirDiff::Untracked => "untracked",
            WorkdirDiff::Deleted => "deleted",
            WorkdirDiff::Modified => "modified",
        }
    }
}

impl std::fmt::Display for WorkdirDiff {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Difference label between the HEAD tree and the index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexDiff {
    #[default]
    #[serde(rename = "")]
    Unchanged,
    New,
    Deleted,
    Modified,
}

impl IndexDiff {
    /// The wire label (`""` when unchanged).
    pub fn as_str(&self) -> &'static str {
        match self {
            IndexDiff::Unchanged => "",
            IndexDiff::New => "new",
            IndexDiff::Deleted => "deleted",
            IndexDiff::Modified => "modified",
        }
    }
}

impl std::fmt::Display for IndexDiff {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a path is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Presence {
    pub is_in_working_copy: bool,
    pub is_in_cache: bool,
    pub is_in_tree: bool,
}

/// Semantic status of one path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileStatus {
    pub is_in_working_copy: bool,
    pub is_in_cache: bool,
    pub is_in_tree: bool,
    pub diff_string: WorkdirDiff,
    pub diff_cached_string: IndexDiff,
    /// The flags this status was derived from. Absent for untouched paths.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_status: Option<RawStatusRecord>,
}

impl FileStatus {
    /// Status of a tracked path with no recorded change: present everywhere,
    /// no differences.
    pub fn untouched() -> Self {
        Self {
            is_in_working_copy: true,
            is_in_cache: true,
            is_in_tree: true,
            diff_string: WorkdirDiff::Unchanged,
            diff_cached_string: IndexDiff::Unchanged,
            raw_status: None,
        }
    }
}

/// Status per path, ordered by path.
pub type StatusMap = BTreeMap<String, FileStatus>;

/// Derive presence from raw flags.
///
/// Working-copy presence relies solely on the backend's deleted flag. A path
/// is absent from the index only if it was deleted while staged, or is new
/// and was never staged.
pub fn presence(raw: &RawStatusRecord, is_in_tree: bool) -> Presence {
    Presence {
        is_in_working_copy: !raw.is_deleted,
        is_in_cache: !((raw.in_index && raw.is_deleted) || (raw.is_new && !raw.in_index)),
        is_in_tree,
    }
}

/// Label the index → working copy difference.
pub fn diff_string(presence: &Presence, raw: &RawStatusRecord) -> WorkdirDiff {
    if presence.is_in_working_copy && !presence.is_in_cache {
        return WorkdirDiff::Untracked;
    }
    if !presence.is_in_working_copy && presence.is_in_cache {
        return WorkdirDiff::Deleted;
    }
    if raw.in_working_tree && !raw.is_deleted && !raw.is_new {
        return WorkdirDiff::Modified;
    }
    WorkdirDiff::Unchanged
}

/// Label the HEAD tree → index difference.
pub fn diff_cached_string(presence: &Presence, raw: &RawStatusRecord) -> IndexDiff {
    if presence.is_in_cache && !presence.is_in_tree {
        return IndexDiff::New;
    }
    if !presence.is_in_cache && presence.is_in_tree {
        return IndexDiff::Deleted;
    }
    if raw.in_index && raw.is_modified {
        return IndexDiff::Modified;
    }
    IndexDiff::Unchanged
}

/// Classify a single raw record.
pub fn build_status(raw: RawStatusRecord, is_in_tree: bool) -> FileStatus {
    let presence = presence(&raw, is_in_tree);
    let diff_string = diff_string(&presence, &raw);
    let diff_cached_string = diff_cached_string(&presence, &raw);

    FileStatus {
        is_in_working_copy: presence.is_in_working_copy,
        is_in_cache: presence.is_in_cache,
        is_in_tree: presence.is_in_tree,
        diff_string,
        diff_cached_string,
        raw_status: Some(raw),
    }
}

/// Build the status map for a set of raw records and the HEAD tree file list.
///
/// Every record is classified and keyed by its path. Every HEAD tree path
/// without a record then gets [`FileStatus::untouched`]; the default pass
/// never overwrites a classified entry.
pub fn status_to_map(records: Vec<RawStatusRecord>, head_tree_files: &[String]) -> StatusMap {
    let in_tree: HashSet<&str> = head_tree_files.iter().map(String::as_str).collect();
    let mut map = StatusMap::new();

    for raw in records {
        let is_in_tree = in_tree.contains(raw.path.as_str());
        let path = raw.path.clone();
        map.insert(path, build_status(raw, is_in_tree));
    }

    for path in head_tree_files {
        map.entry(path.clone()).or_insert_with(FileStatus::untouched);
    }

    map
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(path: &str) -> RawStatusRecord {
        RawStatusRecord {
            path: path.to_string(),
            ..Default::default()
        }
    }

    mod presence {
        use super::*;

        #[test]
        fn deleted_is_not_in_working_copy() {
            let raw = RawStatusRecord {
                is_deleted: true,
                ..record("a")
            };
            assert!(!presence(&raw, true).is_in_working_copy);
        }

        #[test]
        fn staged_deletion_leaves_cache() {
            let raw = RawStatusRecord {
                is_deleted: true,
                in_index: true,
                ..record("a")
            };
            assert!(!presence(&raw, true).is_in_cache);
        }

        #[test]
        fn unstaged_deletion_stays_in_cache() {
            let raw = RawStatusRecord {
                is_deleted: true,
                in_working_tree: true,
                ..record("a")
            };
            assert!(presence(&raw, true).is_in_cache);
        }

        #[test]
        fn new_unstaged_is_not_cached() {
            let raw = RawStatusRecord {
                is_new: true,
                in_working_tree: true,
                ..record("a")
            };
            assert!(!presence(&raw, false).is_in_cache);
        }

        #[test]
        fn new_staged_is_cached() {
            let raw = RawStatusRecord {
                is_new: true,
                in_index: true,
                ..record("a")
            };
            assert!(presence(&raw, false).is_in_cache);
        }
    }

    mod diff_string {
        use super::*;

        #[test]
        fn new_not_in_index_is_untracked() {
            let status = build_status(
                RawStatusRecord {
                    is_new: true,
                    in_index: false,
                    in_working_tree: true,
                    ..record("a")
                },
                false,
            );
            assert_eq!(status.diff_string, WorkdirDiff::Untracked);
        }

        #[test]
        fn staged_deletion_is_absent_from_both_sides() {
            // Gone from index and working copy alike: nothing differs
            // between them, the deletion shows up on the cached side.
            let status = build_status(
                RawStatusRecord {
                    is_deleted: true,
                    in_index: true,
                    ..record("a")
                },
                true,
            );
            assert!(!status.is_in_working_copy);
            assert!(!status.is_in_cache);
            assert_eq!(status.diff_string, WorkdirDiff::Unchanged);
            assert_eq!(status.diff_cached_string, IndexDiff::Deleted);
        }

        #[test]
        fn unstaged_deletion_is_deleted() {
            let status = build_status(
                RawStatusRecord {
                    is_deleted: true,
                    in_working_tree: true,
                    ..record("a")
                },
                true,
            );
            assert_eq!(status.diff_string, WorkdirDiff::Deleted);
            assert_eq!(status.diff_cached_string, IndexDiff::Unchanged);
        }

        #[test]
        fn worktree_edit_is_modified() {
            let status = build_status(
                RawStatusRecord {
                    is_modified: true,
                    in_working_tree: true,
                    ..record("a")
                },
                true,
            );
            assert_eq!(status.diff_string, WorkdirDiff::Modified);
            assert_eq!(status.diff_cached_string, IndexDiff::Unchanged);
        }

        #[test]
        fn staged_only_edit_is_unchanged_in_workdir() {
            let status = build_status(
                RawStatusRecord {
                    is_modified: true,
                    in_index: true,
                    ..record("a")
                },
                true,
            );
            assert_eq!(status.diff_string, WorkdirDiff::Unchanged);
            assert_eq!(status.diff_cached_string, IndexDiff::Modified);
        }

        #[test]
        fn staged_new_then_edited_is_modified() {
            // New in index and modified in worktree: the new flag suppresses
            // the modified label.
            let status = build_status(
                RawStatusRecord {
                    is_new: true,
                    is_modified: true,
                    in_index: true,
                    in_working_tree: true,
                    ..record("a")
                },
                false,
            );
            assert_eq!(status.diff_string, WorkdirDiff::Unchanged);
            assert_eq!(status.diff_cached_string, IndexDiff::New);
        }
    }

    mod diff_cached_string {
        use super::*;

        #[test]
        fn in_index_not_in_tree_is_new() {
            let status = build_status(
                RawStatusRecord {
                    is_new: true,
                    in_index: true,
                    ..record("a")
                },
                false,
            );
            assert_eq!(status.diff_cached_string, IndexDiff::New);
        }

        #[test]
        fn staged_deletion_is_deleted() {
            let status = build_status(
                RawStatusRecord {
                    is_deleted: true,
                    in_index: true,
                    ..record("a")
                },
                true,
            );
            assert_eq!(status.diff_cached_string, IndexDiff::Deleted);
        }

        #[test]
        fn rule_order_prefers_new_over_modified() {
            let raw = RawStatusRecord {
                is_modified: true,
                in_index: true,
                ..record("a")
            };
            let p = presence(&raw, false);
            assert_eq!(diff_cached_string(&p, &raw), IndexDiff::New);
        }
    }

    mod status_to_map {
        use super::*;

        #[test]
        fn untouched_tree_paths_get_default_entry() {
            let map = status_to_map(
                vec![],
                &["a.txt".to_string(), "dir/b.txt".to_string()],
            );
            assert_eq!(map.len(), 2);
            assert_eq!(map["a.txt"], FileStatus::untouched());
            assert_eq!(map["dir/b.txt"], FileStatus::untouched());
        }

        #[test]
        fn default_pass_does_not_overwrite() {
            let raw = RawStatusRecord {
                is_modified: true,
                in_working_tree: true,
                ..record("a.txt")
            };
            let map = status_to_map(vec![raw.clone()], &["a.txt".to_string()]);
            assert_eq!(map.len(), 1);
            assert_eq!(map["a.txt"].diff_string, WorkdirDiff::Modified);
            assert_eq!(map["a.txt"].raw_status, Some(raw));
        }

        #[test]
        fn in_tree_reflects_head_listing() {
            let map = status_to_map(
                vec![RawStatusRecord {
                    is_new: true,
                    in_working_tree: true,
                    ..record("new.txt")
                }],
                &["old.txt".to_string()],
            );
            assert!(!map["new.txt"].is_in_tree);
            assert!(map["old.txt"].is_in_tree);
        }

        #[test]
        fn one_entry_per_path() {
            let map = status_to_map(
                vec![record("a"), record("a")],
                &["a".to_string(), "a".to_string()],
            );
            assert_eq!(map.len(), 1);
        }
    }

    mod serialization {
        use super::*;

        #[test]
        fn uses_camel_case_keys_and_string_labels() {
            let json = serde_json::to_value(FileStatus::untouched()).unwrap();
            assert_eq!(json["isInWorkingCopy"], true);
            assert_eq!(json["isInCache"], true);
            assert_eq!(json["isInTree"], true);
            assert_eq!(json["diffString"], "");
            assert_eq!(json["diffCachedString"], "");
            assert!(json.get("rawStatus").is_none());
        }

        #[test]
        fn labels_serialize_lowercase() {
            assert_eq!(
                serde_json::to_string(&WorkdirDiff::Untracked).unwrap(),
                "\"untracked\""
            );
            assert_eq!(serde_json::to_string(&IndexDiff::New).unwrap(), "\"new\"");
            assert_eq!(IndexDiff::Modified.to_string(), "modified");
        }

        #[test]
        fn raw_status_is_retained() {
            let status = build_status(
                RawStatusRecord {
                    is_new: true,
                    in_working_tree: true,
                    ..record("x")
                },
                false,
            );
            let json = serde_json::to_value(&status).unwrap();
            assert_eq!(json["rawStatus"]["path"], "x");
            assert_eq!(json["rawStatus"]["isNew"], true);
            assert_eq!(json["rawStatus"]["inWorkingTree"], true);
        }
    }
}
