//! Scripted backend for unit tests.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use crate::error::{AppError, Result};
use crate::git::backend::GitBackend;
use crate::git::diff::{grouped_diff, DiffGroup};
use crate::models::Commit;

pub fn commit(sha: &str) -> Commit {
    Commit {
        sha: sha.to_string(),
        author: "Tester".to_string(),
        message: format!("commit {}", sha),
        timestamp: 0,
        path: "f.txt".to_string(),
    }
}

/// Porcelain blame output with one entry per `(sha, content)` pair.
pub fn porcelain(lines: &[(&str, &str)]) -> String {
    let mut out = String::new();
    for (i, (sha, content)) in lines.iter().enumerate() {
        out.push_str(&format!("{} {} {} 1\n", sha, i + 1, i + 1));
        out.push_str("author Tester\n");
        out.push_str("filename f.txt\n");
        out.push_str(&format!("\t{}\n", content));
    }
    out
}

#[derive(Default)]
pub struct FakeBackend {
    history: Vec<Commit>,
    untracked: bool,
    blames: HashMap<String, String>,
    contents: HashMap<String, Vec<String>>,
    history_calls: Cell<usize>,
    blame_calls: Cell<usize>,
    content_calls: Cell<usize>,
    diff_calls: Cell<usize>,
    /// `(revision, path)` of every blame and content query, in order
    requested: RefCell<Vec<(String, String)>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_history(mut self, commits: Vec<Commit>) -> Self {
        self.history = commits;
        self
    }

    pub fn untracked(mut self) -> Self {
        self.untracked = true;
        self
    }

    pub fn with_blame(mut self, sha: &str, raw: String) -> Self {
        self.blames.insert(sha.to_string(), raw);
        self
    }

    pub fn with_content(mut self, revision: &str, lines: &[&str]) -> Self {
        self.contents
            .insert(revision.to_string(), lines.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn history_calls(&self) -> usize {
        self.history_calls.get()
    }

    pub fn blame_calls(&self) -> usize {
        self.blame_calls.get()
    }

    pub fn content_calls(&self) -> usize {
        self.content_calls.get()
    }

    pub fn diff_calls(&self) -> usize {
        self.diff_calls.get()
    }

    pub fn requested_paths(&self) -> Vec<(String, String)> {
        self.requested.borrow().clone()
    }

    fn record(&self, revision: &str, path: &str) {
        self.requested
            .borrow_mut()
            .push((revision.to_string(), path.to_string()));
    }
}

impl GitBackend for FakeBackend {
    fn resolve_revision(&self, revision: &str) -> bool {
        revision == "HEAD" || self.history.iter().any(|c| c.sha == revision)
    }

    fn is_tracked(&self, _path: &str) -> Result<bool> {
        Ok(!self.untracked)
    }

    fn file_history(&self, _path: &str, _start: &str) -> Result<Vec<Commit>> {
        self.history_calls.set(self.history_calls.get() + 1);
        Ok(self.history.clone())
    }

    fn blame_at(&self, path: &str, sha: &str) -> Result<String> {
        self.blame_calls.set(self.blame_calls.get() + 1);
        self.record(sha, path);
        self.blames
            .get(sha)
            .cloned()
            .ok_or_else(|| AppError::BlameUnavailable {
                path: path.to_string(),
                sha: sha.to_string(),
            })
    }

    fn content_at(&self, path: &str, revision: &str) -> Result<Vec<String>> {
        self.content_calls.set(self.content_calls.get() + 1);
        self.record(revision, path);
        self.contents
            .get(revision)
            .cloned()
            .ok_or_else(|| AppError::ContentUnavailable {
                path: path.to_string(),
                revision: revision.to_string(),
            })
    }

    fn grouped_diff(&self, old: &[String], new: &[String]) -> Vec<DiffGroup> {
        self.diff_calls.set(self.diff_calls.get() + 1);
        grouped_diff(old, new)
    }
}
