//! The engine that ties a file's history, cursor and caches together.

use std::sync::{Arc, RwLock};

use crate::error::Result;
use crate::git::backend::GitBackend;
use crate::git::blame::BlameCache;
use crate::git::history::CommitHistory;
use crate::git::mapping::LineMapper;
use crate::git::repository::GitRepository;
use crate::models::{BlameLine, Commit, LineMapping, MappedLine};

/// Browsing state for one file: its history, the cursor, and the blame and
/// line-mapping caches.
///
/// Moving the cursor drops the cached blame before returning. Line mappings
/// are independent of the cursor and stay cached.
///
/// Not synchronised; share it behind a lock (see [`SharedHistory`]).
pub struct FileHistory<B = GitRepository> {
    backend: B,
    history: CommitHistory,
    blame: BlameCache,
    mapper: LineMapper,
}

impl<B: GitBackend> FileHistory<B> {
    /// Fails with `InvalidRevision` or `UntrackedFile` before any history is read.
    pub fn open(backend: B, path: &str, start: &str) -> Result<Self> {
        let history = CommitHistory::load(&backend, path, start)?;
        Ok(Self {
            backend,
            history,
            blame: BlameCache::new(),
            mapper: LineMapper::new(),
        })
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn path(&self) -> &str {
        self.history.path()
    }

    pub fn commits(&self) -> &[Commit] {
        self.history.commits()
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn position(&self) -> usize {
        self.history.position()
    }

    pub fn current(&self) -> &Commit {
        self.history.current()
    }

    pub fn commit_at(&self, index: usize) -> Option<&Commit> {
        self.history.commit_at(index)
    }

    /// Move to the next more recent commit.
    pub fn step_forward(&mut self) -> bool {
        let moved = self.history.step_forward();
        if moved {
            self.blame.invalidate();
        }
        moved
    }

    /// Move to the next older commit.
    pub fn step_backward(&mut self) -> bool {
        let moved = self.history.step_backward();
        if moved {
            self.blame.invalidate();
        }
        moved
    }

    /// Blame of the file at the current commit.
    pub fn blame(&mut self) -> Result<&[BlameLine]> {
        let position = self.history.position();
        self.blame
            .get(&self.backend, position, self.history.current())
    }

    /// Zero-based line correspondence between any two revisions of the file.
    ///
    /// Revisions naming a commit of the history read the file under the name
    /// it had there.
    pub fn line_mapping(&mut self, start: &str, finish: &str) -> Result<LineMapping> {
        let start_path = self.history.path_at(start);
        let finish_path = self.history.path_at(finish);
        self.mapper
            .mapping(&self.backend, start_path, start, finish_path, finish)
    }

    /// Where zero-based `line` of `start` sits in `finish`.
    pub fn map_line(&mut self, start: &str, finish: &str, line: usize) -> Result<MappedLine> {
        let mapping = self.line_mapping(start, finish)?;
        Ok(MappedLine::lookup(&mapping.forward, line))
    }
}

pub type SharedHistory = Arc<RwLock<FileHistory<GitRepository>>>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::git::testing::{commit, porcelain, FakeBackend};
    use pretty_assertions::assert_eq;

    fn three_commit_backend() -> FakeBackend {
        FakeBackend::new()
            .with_history(vec![commit("c3"), commit("c2"), commit("c1")])
            .with_blame("c3", porcelain(&[("c1", "a"), ("c3", "b")]))
            .with_blame("c2", porcelain(&[("c1", "a"), ("c2", "b")]))
            .with_blame("c1", porcelain(&[("c1", "a")]))
            .with_content("c1", &["a"])
            .with_content("c2", &["a", "b"])
            .with_content("c3", &["a", "b"])
    }

    #[test]
    fn test_round_trip_recomputes_blame() {
        let mut engine = FileHistory::open(three_commit_backend(), "f.txt", "HEAD").unwrap();
        assert_eq!(engine.current().sha, "c3");

        let at_newest = engine.blame().unwrap().to_vec();
        assert_eq!(
            at_newest.iter().map(|l| l.current).collect::<Vec<_>>(),
            vec![false, true]
        );

        assert!(engine.step_backward());
        assert_eq!(engine.current().sha, "c2");
        let at_older = engine.blame().unwrap().to_vec();
        assert_eq!(at_older[1].sha, "c2");
        assert!(at_older[1].current);
        assert_ne!(at_older, at_newest);

        assert!(engine.step_forward());
        assert_eq!(engine.current().sha, "c3");
        let again = engine.blame().unwrap().to_vec();
        assert_eq!(again, at_newest);
        assert_eq!(engine.backend().blame_calls(), 3);
    }

    #[test]
    fn test_refused_step_keeps_blame_cached() {
        let mut engine = FileHistory::open(three_commit_backend(), "f.txt", "HEAD").unwrap();
        engine.blame().unwrap();

        assert!(!engine.step_forward());
        engine.blame().unwrap();
        assert_eq!(engine.backend().blame_calls(), 1);

        while engine.step_backward() {}
        assert_eq!(engine.position(), 2);
        assert_eq!(engine.current().sha, "c1");
        assert!(!engine.step_backward());
        assert_eq!(engine.position(), 2);
    }

    #[test]
    fn test_stepping_keeps_line_mappings() {
        let mut engine = FileHistory::open(three_commit_backend(), "f.txt", "HEAD").unwrap();
        engine.line_mapping("c1", "c3").unwrap();

        engine.step_backward();
        engine.step_backward();
        engine.line_mapping("c3", "c1").unwrap();
        assert_eq!(engine.backend().content_calls(), 2);
    }

    #[test]
    fn test_map_line() {
        let mut engine = FileHistory::open(three_commit_backend(), "f.txt", "HEAD").unwrap();
        assert_eq!(engine.map_line("c1", "c2", 0).unwrap(), MappedLine::Line(0));
        assert_eq!(engine.map_line("c2", "c1", 1).unwrap(), MappedLine::Deleted);
        assert_eq!(engine.map_line("c2", "c1", 9).unwrap(), MappedLine::OutOfRange);
    }

    #[test]
    fn test_blame_failure_keeps_engine_usable() {
        let backend = FakeBackend::new()
            .with_history(vec![commit("c2"), commit("c1")])
            .with_blame("c1", porcelain(&[("c1", "a")]));
        let mut engine = FileHistory::open(backend, "f.txt", "HEAD").unwrap();

        let err = engine.blame().unwrap_err();
        assert!(matches!(err, AppError::BlameUnavailable { ref sha, .. } if sha == "c2"));

        assert!(engine.step_backward());
        assert_eq!(engine.blame().unwrap().len(), 1);
    }

    #[test]
    fn test_renamed_commits_use_their_own_path() {
        let older = Commit {
            path: "old.txt".to_string(),
            ..commit("c1")
        };
        let backend = FakeBackend::new()
            .with_history(vec![commit("c2"), older])
            .with_blame("c1", porcelain(&[("c1", "a")]))
            .with_content("c1", &["a"])
            .with_content("c2", &["a", "b"]);
        let mut engine = FileHistory::open(backend, "f.txt", "HEAD").unwrap();

        assert!(engine.step_backward());
        engine.blame().unwrap();
        engine.line_mapping("c1", "c2").unwrap();

        assert_eq!(
            engine.backend().requested_paths(),
            vec![
                ("c1".to_string(), "old.txt".to_string()),
                ("c1".to_string(), "old.txt".to_string()),
                ("c2".to_string(), "f.txt".to_string()),
            ]
        );
    }

    #[test]
    fn test_open_invalid_revision() {
        let err = FileHistory::open(three_commit_backend(), "f.txt", "bogus").err().unwrap();
        assert!(matches!(err, AppError::InvalidRevision(_)));
    }
}
