//! Commit history of a single file and the cursor moving through it.
//!
//! The history is loaded once, newest first: index 0 is the most recent
//! commit that touched the file as of the starting revision. The cursor is an
//! index into that list and never leaves its bounds.

use crate::error::{AppError, Result};
use crate::git::backend::GitBackend;
use crate::models::Commit;

/// Position in a history of `len` commits. 0 is the newest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    position: usize,
    len: usize,
}

impl Cursor {
    pub fn new(len: usize) -> Self {
        Self { position: 0, len }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Move toward more recent commits. Returns false at the newest commit.
    pub fn step_forward(&mut self) -> bool {
        if self.position == 0 {
            return false;
        }
        self.position -= 1;
        true
    }

    /// Move toward older commits. Returns false at the oldest commit.
    pub fn step_backward(&mut self) -> bool {
        if self.position + 1 >= self.len {
            return false;
        }
        self.position += 1;
        true
    }
}

pub struct CommitHistory {
    path: String,
    commits: Vec<Commit>,
    cursor: Cursor,
}

impl CommitHistory {
    /// Validate `start` and `path`, then load the commits touching `path`.
    ///
    /// Nothing is queried from history unless both checks pass.
    pub fn load<B: GitBackend>(backend: &B, path: &str, start: &str) -> Result<Self> {
        if !backend.resolve_revision(start) {
            return Err(AppError::InvalidRevision(start.to_string()));
        }
        if !backend.is_tracked(path)? {
            return Err(AppError::UntrackedFile(path.to_string()));
        }

        let commits = backend.file_history(path, start)?;
        if commits.is_empty() {
            // A tracked path always has at least the commit that added it.
            return Err(AppError::Internal(format!(
                "no commits found for {} starting at {}",
                path, start
            )));
        }
        tracing::info!("Loaded {} commits for {} from {}", commits.len(), path, start);

        Ok(Self::from_commits(path.to_string(), commits))
    }

    pub(crate) fn from_commits(path: String, commits: Vec<Commit>) -> Self {
        let cursor = Cursor::new(commits.len());
        Self { path, commits, cursor }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn commits(&self) -> &[Commit] {
        &self.commits
    }

    pub fn len(&self) -> usize {
        self.commits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }

    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    pub fn current(&self) -> &Commit {
        &self.commits[self.cursor.position()]
    }

    pub fn commit_at(&self, index: usize) -> Option<&Commit> {
        self.commits.get(index)
    }

    /// Name of the file at `revision`.
    ///
    /// A full sha, or an abbreviation of at least 7 characters, of a commit in
    /// the history gives that commit's path. Any other revision gets the path
    /// the history was opened with.
    pub fn path_at(&self, revision: &str) -> &str {
        self.commits
            .iter()
            .find(|c| c.sha == revision || (revision.len() >= 7 && c.sha.starts_with(revision)))
            .map(|c| c.path.as_str())
            .unwrap_or(&self.path)
    }

    pub fn step_forward(&mut self) -> bool {
        self.cursor.step_forward()
    }

    pub fn step_backward(&mut self) -> bool {
        self.cursor.step_backward()
    }
}
