//! core::content
//!
//! Rebuilding staged and working-copy text from the committed blob plus diff hunks.
//!
//! # Algorithm
//!
//! 1. Normalize the HEAD blob text into a line array where every line ends
//!    with `\n` (CR/LF variation is canonicalized).
//! 2. If the diff for the path produced any hunks, splice the **first**
//!    hunk into the line array and join.
//! 3. Otherwise return the normalized text.
//!
//! Only the first hunk is ever applied. Diffs with several hunks for the
//! same path are not merged; later hunks are ignored.
//!
//! # Example
//!
//! ```
//! use gitoscope::core::content::{reconstruct, DiffHunk};
//!
//! let hunk = DiffHunk {
//!     old_start: 2,
//!     old_lines: 1,
//!     lines: vec!["B\n".to_string()],
//! };
//! assert_eq!(reconstruct("a\nb\nc\n", &[hunk]), "a\nB\nc\n");
//! assert_eq!(reconstruct("a\nb\nc\n", &[]), "a\nb\nc\n");
//! ```

use serde::{Deserialize, Serialize};

/// Which snapshot the HEAD tree is diffed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DiffMode {
    /// HEAD tree → index (staged content).
    TreeToIndex,
    /// HEAD tree → working directory (working-copy content).
    TreeToWorkdir,
}

impl DiffMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiffMode::TreeToIndex => "treeToIndex",
            DiffMode::TreeToWorkdir => "treeToWorkdir",
        }
    }
}

impl std::fmt::Display for DiffMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One contiguous change of a patch.
///
/// `lines` holds the hunk's context and added lines in order, each with its
/// own terminator. Removed lines are not part of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffHunk {
    /// 1-based line number in the old content where the replaced range
    /// begins. Zero for hunks that add a file from nothing.
    ///
    /// For a pure insertion (`old_lines == 0`) this is the line the new
    /// lines go in front of, one past the anchor line libgit2 reports.
    pub old_start: usize,
    /// Number of old lines the hunk replaces.
    pub old_lines: usize,
    pub lines: Vec<String>,
}

/// Split text into lines that each end with `\n`.
///
/// A single trailing terminator is stripped first, so `"a\nb\n"` and
/// `"a\nb"` both yield `["a\n", "b\n"]`. Empty text yields no lines.
pub fn normalize_lines(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    let trimmed = text
        .strip_suffix("\r\n")
        .or_else(|| text.strip_suffix('\n'))
        .unwrap_or(text);

    trimmed
        .split('\n')
        .map(|line| {
            let line = line.strip_suffix('\r').unwrap_or(line);
            format!("{}\n", line)
        })
        .collect()
}

/// Replace `old_lines` entries starting at line `old_start` with `new_lines`.
///
/// The range is clamped to the base, so out-of-range hunks append rather
/// than panic.
///
/// # Example
///
/// ```
/// use gitoscope::core::content::splice_hunk;
///
/// let base = vec!["a\n".to_string(), "b\n".to_string(), "c\n".to_string()];
/// let out = splice_hunk(base, 2, 1, vec!["B\n".to_string()]);
/// assert_eq!(out, vec!["a\n", "B\n", "c\n"]);
/// ```
pub fn splice_hunk(
    mut base: Vec<String>,
    old_start: usize,
    old_lines: usize,
    new_lines: Vec<String>,
) -> Vec<String> {
    let start = old_start.saturating_sub(1).min(base.len());
    let end = start.saturating_add(old_lines).min(base.len());
    base.splice(start..end, new_lines);
    base
}

/// Rebuild content from HEAD blob text and the hunks of one path.
pub fn reconstruct(blob_text: &str, hunks: &[DiffHunk]) -> String {
    let base = normalize_lines(blob_text);

    match hunks.first() {
        Some(hunk) => {
            splice_hunk(base, hunk.old_start, hunk.old_lines, hunk.lines.clone()).concat()
        }
        None => base.concat(),
    }
}
