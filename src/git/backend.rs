//! Queries the history engine needs from version control.
//!
//! Every query goes through a backend value that carries its own repository
//! root, so nothing depends on the process working directory.

use crate::error::Result;
use crate::git::diff::{grouped_diff, DiffGroup};
use crate::models::Commit;

pub trait GitBackend {
    /// Whether `revision` names a commit in the repository.
    fn resolve_revision(&self, revision: &str) -> bool;

    /// Whether `path` is tracked.
    fn is_tracked(&self, path: &str) -> Result<bool>;

    /// Commits that modified `path`, newest first, starting at `start` and
    /// following renames.
    fn file_history(&self, path: &str, start: &str) -> Result<Vec<Commit>>;

    /// Raw `git blame --porcelain` output for `path` at `sha`.
    fn blame_at(&self, path: &str, sha: &str) -> Result<String>;

    /// Lines of `path` as of `revision`.
    fn content_at(&self, path: &str, revision: &str) -> Result<Vec<String>>;

    fn grouped_diff(&self, old: &[String], new: &[String]) -> Vec<DiffGroup> {
        grouped_diff(old, new)
    }
}
