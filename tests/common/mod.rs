use std::fs;
use std::path::Path;

use git2::{IndexAddOption, Repository, Signature, Time};
use tempfile::TempDir;

pub struct TestRepo {
    pub dir: TempDir,
    pub repo: Repository,
    clock: std::cell::Cell<i64>,
}

impl TestRepo {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let repo = Repository::init(dir.path()).expect("init repository");
        repo.config()
            .and_then(|mut config| config.set_bool("core.autocrlf", false))
            .expect("disable autocrlf");
        Self {
            dir,
            repo,
            clock: std::cell::Cell::new(1_600_000_000),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, path: &str, content: &str) {
        let full = self.dir.path().join(path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).expect("create parent dirs");
        }
        fs::write(full, content).expect("write file");
    }

    pub fn rename(&self, from: &str, to: &str) {
        fs::rename(self.dir.path().join(from), self.dir.path().join(to)).expect("rename file");
    }

    /// Stage everything in the working tree and commit it. Returns the sha.
    pub fn commit(&self, message: &str) -> String {
        let mut index = self.repo.index().expect("open index");
        index
            .add_all(["*"].iter(), IndexAddOption::DEFAULT, None)
            .expect("add files");
        index.update_all(["*"].iter(), None).expect("drop removed files");
        index.write().expect("write index");

        let tree_id = index.write_tree().expect("write tree");
        let tree = self.repo.find_tree(tree_id).expect("find tree");

        let when = self.clock.get() + 60;
        self.clock.set(when);
        let sig = Signature::new("Tester", "tester@example.com", &Time::new(when, 0)).expect("signature");

        let parents = match self.repo.head() {
            Ok(head) => vec![head.peel_to_commit().expect("head commit")],
            Err(_) => vec![],
        };
        let parent_refs: Vec<&git2::Commit> = parents.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parent_refs)
            .expect("commit")
            .to_string()
    }
}

pub fn git_available() -> bool {
    std::process::Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}
