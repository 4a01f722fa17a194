//! Line correspondence between two revisions of the followed file.
//!
//! Both directions are built in one pass over the grouped diff and cached
//! under their ordered key, so asking for `(a, b)` and later `(b, a)` costs a
//! single computation. Revision content never changes, so entries are never
//! evicted.

use std::collections::HashMap;

use crate::error::Result;
use crate::git::backend::GitBackend;
use crate::git::diff::{DiffGroup, GroupKind};
use crate::models::{LineMap, LineMapping};

#[derive(Default)]
pub struct LineMapper {
    maps: HashMap<(String, String), LineMap>,
}

impl LineMapper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_cached(&self, start: &str, finish: &str) -> bool {
        self.maps.contains_key(&key(start, finish))
    }

    /// Mapping between `start` and `finish`, computed on first use.
    ///
    /// `start_path` and `finish_path` name the file in each revision, which
    /// differ when a rename lies between them.
    pub fn mapping<B: GitBackend>(
        &mut self,
        backend: &B,
        start_path: &str,
        start: &str,
        finish_path: &str,
        finish: &str,
    ) -> Result<LineMapping> {
        if let (Some(forward), Some(backward)) = (
            self.maps.get(&key(start, finish)),
            self.maps.get(&key(finish, start)),
        ) {
            tracing::debug!("Line mapping cache hit for {} -> {}", start, finish);
            return Ok(LineMapping {
                start: start.to_string(),
                finish: finish.to_string(),
                forward: forward.clone(),
                backward: backward.clone(),
            });
        }

        tracing::debug!(
            "Computing line mapping for {} at {} and {} at {}",
            start_path,
            start,
            finish_path,
            finish
        );
        let old = backend.content_at(start_path, start)?;
        let new = backend.content_at(finish_path, finish)?;
        let groups = backend.grouped_diff(&old, &new);

        let (forward, backward) = build_line_maps(&groups, old.len(), new.len());
        self.maps.insert(key(start, finish), forward.clone());
        self.maps.insert(key(finish, start), backward.clone());

        Ok(LineMapping {
            start: start.to_string(),
            finish: finish.to_string(),
            forward,
            backward,
        })
    }
}

fn key(start: &str, finish: &str) -> (String, String) {
    (start.to_string(), finish.to_string())
}

/// Build the forward (old → new) and backward (new → old) line maps.
///
/// Lines are zero-based. After the diff runs are consumed both sides advance
/// together up to and including one past their last line, so the maps cover
/// the end-of-file position too.
pub fn build_line_maps(groups: &[DiffGroup], old_len: usize, new_len: usize) -> (LineMap, LineMap) {
    let mut forward = LineMap::new();
    let mut backward = LineMap::new();
    let mut old_ln = 0;
    let mut new_ln = 0;

    for group in groups {
        match group.kind {
            GroupKind::Unchanged => {
                for _ in 0..group.len {
                    forward.insert(old_ln, Some(new_ln));
                    backward.insert(new_ln, Some(old_ln));
                    old_ln += 1;
                    new_ln += 1;
                }
            }
            GroupKind::Old => {
                for _ in 0..group.len {
                    forward.insert(old_ln, None);
                    old_ln += 1;
                }
            }
            GroupKind::New => {
                for _ in 0..group.len {
                    backward.insert(new_ln, None);
                    new_ln += 1;
                }
            }
        }
    }

    while old_ln <= old_len && new_ln <= new_len {
        forward.insert(old_ln, Some(new_ln));
        backward.insert(new_ln, Some(old_ln));
        old_ln += 1;
        new_ln += 1;
    }

    (forward, backward)
}
