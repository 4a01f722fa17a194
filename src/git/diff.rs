//! Grouped line diff.
//!
//! Classifies two line sequences into contiguous runs of unchanged, old-only
//! and new-only lines. Only run lengths are reported; the line mapper walks
//! the runs in file order to rebuild positions.

use serde::{Deserialize, Serialize};
use similar::{capture_diff_slices, Algorithm, DiffOp};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupKind {
    /// Same content on both sides
    Unchanged,
    /// Present only in the old content
    Old,
    /// Present only in the new content
    New,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffGroup {
    pub kind: GroupKind,
    pub len: usize,
}

impl DiffGroup {
    pub fn unchanged(len: usize) -> Self {
        Self { kind: GroupKind::Unchanged, len }
    }

    pub fn old_only(len: usize) -> Self {
        Self { kind: GroupKind::Old, len }
    }

    pub fn new_only(len: usize) -> Self {
        Self { kind: GroupKind::New, len }
    }
}

/// Diff `old` against `new` and return the grouped runs in file order.
///
/// A replaced block is reported as its old-only run followed by its new-only
/// run. Adjacent runs of the same kind are merged and empty runs dropped.
pub fn grouped_diff(old: &[String], new: &[String]) -> Vec<DiffGroup> {
    let ops = capture_diff_slices(Algorithm::Myers, old, new);

    let mut groups: Vec<DiffGroup> = Vec::with_capacity(ops.len());
    for op in ops {
        match op {
            DiffOp::Equal { len, .. } => push_group(&mut groups, DiffGroup::unchanged(len)),
            DiffOp::Delete { old_len, .. } => push_group(&mut groups, DiffGroup::old_only(old_len)),
            DiffOp::Insert { new_len, .. } => push_group(&mut groups, DiffGroup::new_only(new_len)),
            DiffOp::Replace {
                old_len, new_len, ..
            } => {
                push_group(&mut groups, DiffGroup::old_only(old_len));
                push_group(&mut groups, DiffGroup::new_only(new_len));
            }
        }
    }

    groups
}

/// Split text into lines on `\n` only.
///
/// A trailing newline does not start another line. Carriage returns stay part
/// of the line they end.
pub fn split_lines(text: &str) -> Vec<&str> {
    if text.is_empty() {
        return Vec::new();
    }
    text.strip_suffix('\n').unwrap_or(text).split('\n').collect()
}

fn push_group(groups: &mut Vec<DiffGroup>, group: DiffGroup) {
    if group.len == 0 {
        return;
    }
    match groups.last_mut() {
        Some(last) if last.kind == group.kind => last.len += group.len,
        _ => groups.push(group),
    }
}
