//! Property-based tests for status classification and content rebuilding.
//!
//! These tests use proptest to verify invariants hold across
//! randomly generated inputs.

use proptest::prelude::*;

use gitoscope::core::content::{normalize_lines, reconstruct, splice_hunk, DiffHunk};
use gitoscope::core::status::{status_to_map, FileStatus, RawStatusRecord};
use gitoscope::core::types::Oid;

/// Strategy for a single line body without terminators.
fn line_body() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{0,12}"
}

/// Strategy for normalized lines (each ending with exactly one `\n`).
fn lines() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(line_body().prop_map(|l| format!("{}\n", l)), 0..20)
}

/// Strategy for repository-relative paths.
fn path() -> impl Strategy<Value = String> {
    "[a-z]{1,6}(/[a-z]{1,6}){0,2}\\.txt"
}

fn raw_record() -> impl Strategy<Value = RawStatusRecord> {
    (
        path(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(
            |(path, is_new, is_modified, is_deleted, in_index, in_working_tree)| RawStatusRecord {
                path,
                is_new,
                is_modified,
                is_deleted,
                in_index,
                in_working_tree,
                ..Default::default()
            },
        )
}

proptest! {
    /// Splicing never panics and removes at most `old_lines` entries.
    #[test]
    fn splice_length_is_bounded(
        base in lines(),
        old_start in 0usize..30,
        old_lines in 0usize..30,
        new_lines in lines(),
    ) {
        let base_len = base.len();
        let new_len = new_lines.len();
        let out = splice_hunk(base, old_start, old_lines, new_lines);

        prop_assert!(out.len() >= base_len.saturating_sub(old_lines) + new_len);
        prop_assert!(out.len() <= base_len + new_len);
    }

    /// Replacing the whole base with its own lines is the identity.
    #[test]
    fn splice_whole_range_with_same_lines_is_identity(base in lines()) {
        let out = splice_hunk(base.clone(), 1, base.len(), base.clone());
        prop_assert_eq!(out, base);
    }

    /// Lines before and after the replaced range are preserved.
    #[test]
    fn splice_preserves_surrounding_lines(
        base in lines(),
        start in 1usize..20,
        count in 0usize..5,
        new_lines in lines(),
    ) {
        prop_assume!(start - 1 + count <= base.len());
        let out = splice_hunk(base.clone(), start, count, new_lines.clone());

        prop_assert_eq!(&out[..start - 1], &base[..start - 1]);
        prop_assert_eq!(&out[start - 1..start - 1 + new_lines.len()], &new_lines[..]);
        prop_assert_eq!(&out[start - 1 + new_lines.len()..], &base[start - 1 + count..]);
    }

    /// Without hunks, rebuilding yields the normalized blob text.
    #[test]
    fn reconstruct_without_hunks_is_normalized(base in lines()) {
        let text = base.concat();
        prop_assert_eq!(reconstruct(&text, &[]), text);
    }

    /// Rebuilding is a pure function of its inputs.
    #[test]
    fn reconstruct_is_deterministic(
        base in lines(),
        old_start in 0usize..25,
        old_lines in 0usize..25,
        new_lines in lines(),
    ) {
        let text = base.concat();
        let hunks = vec![DiffHunk { old_start, old_lines, lines: new_lines }];
        prop_assert_eq!(reconstruct(&text, &hunks), reconstruct(&text, &hunks));
    }

    /// Every normalized line ends with exactly one newline and no carriage return.
    #[test]
    fn normalized_lines_have_single_terminator(
        parts in prop::collection::vec(
            prop_oneof!["[a-z]{1,3}", Just("\n".to_string()), Just("\r\n".to_string())],
            0..15,
        ),
    ) {
        let text = parts.concat();
        for line in normalize_lines(&text) {
            prop_assert!(line.ends_with('\n'));
            prop_assert!(!line[..line.len() - 1].contains('\n'));
            prop_assert!(!line.ends_with("\r\n"));
        }
    }

    /// Every HEAD tree path appears in the status map.
    #[test]
    fn status_map_covers_tree_and_records(
        records in prop::collection::vec(raw_record(), 0..10),
        tree in prop::collection::vec(path(), 0..10),
    ) {
        let record_paths: Vec<String> = records.iter().map(|r| r.path.clone()).collect();
        let map = status_to_map(records, &tree);

        for path in &tree {
            prop_assert!(map.contains_key(path));
            if !record_paths.contains(path) {
                prop_assert_eq!(&map[path], &FileStatus::untouched());
            }
        }
        for path in &record_paths {
            prop_assert!(map[path].raw_status.is_some());
        }
    }

    /// A path is in the working copy exactly when it is not deleted.
    #[test]
    fn working_copy_presence_follows_deleted_flag(record in raw_record(), in_tree in any::<bool>()) {
        let path = record.path.clone();
        let is_deleted = record.is_deleted;
        let tree = if in_tree { vec![path.clone()] } else { Vec::new() };

        let map = status_to_map(vec![record], &tree);
        prop_assert_eq!(map[&path].is_in_working_copy, !is_deleted);
        prop_assert_eq!(map[&path].is_in_tree, in_tree);
    }

    /// OIDs are accepted case-insensitively and stored lowercase.
    #[test]
    fn oid_normalizes_case(hex in "[0-9a-fA-F]{40}") {
        let oid = Oid::new(hex.clone()).unwrap();
        prop_assert_eq!(oid.as_str(), hex.to_lowercase());
    }
}
