use git2::{Delta, DiffFindOptions, Oid, Repository, Sort};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Mutex;

use crate::error::{AppError, Result};
use crate::git::backend::GitBackend;
use crate::git::diff::split_lines;
use crate::models::Commit;

/// A repository handle answering history, blame and content queries.
///
/// Object lookups go through libgit2. Blame is delegated to the git
/// executable, run against this repository's root.
pub struct GitRepository {
    pub repo: Mutex<Repository>,
    pub path: String,
    workdir: PathBuf,
    /// Directory the repository was opened from; relative file paths start here
    base: PathBuf,
    git_cmd: String,
}

impl GitRepository {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_str = path.as_ref().to_string_lossy().to_string();
        let repo = Repository::discover(&path).map_err(|_| AppError::RepoNotFound(path_str.clone()))?;
        let workdir = repo.workdir().unwrap_or_else(|| repo.path()).to_path_buf();
        let base = path
            .as_ref()
            .canonicalize()
            .unwrap_or_else(|_| path.as_ref().to_path_buf());

        Ok(Self {
            repo: Mutex::new(repo),
            path: path_str,
            workdir,
            base,
            git_cmd: "git".to_string(),
        })
    }

    /// Use `git_cmd` instead of `git` when running blame.
    pub fn with_git_cmd(mut self, git_cmd: impl Into<String>) -> Self {
        self.git_cmd = git_cmd.into();
        self
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Turn a path into one relative to the repository root.
    ///
    /// Relative paths are taken from the directory the repository was opened
    /// from, as git does from a subdirectory. Paths that end up outside the
    /// working directory are returned unchanged.
    pub fn relative_path(&self, path: &str) -> String {
        let joined = self.base.join(path);
        let root = self.workdir.canonicalize().unwrap_or_else(|_| self.workdir.clone());
        let candidate = joined.canonicalize().unwrap_or(joined);
        match candidate.strip_prefix(&root) {
            Ok(rel) => rel
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/"),
            Err(_) => path.to_string(),
        }
    }

    pub fn with_repo<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Repository) -> Result<T>,
    {
        let repo = self.repo.lock().map_err(|_| AppError::Internal("Lock poisoned".to_string()))?;
        f(&repo)
    }
}

impl GitBackend for GitRepository {
    fn resolve_revision(&self, revision: &str) -> bool {
        self.with_repo(|repo| {
            Ok(repo
                .revparse_single(revision)
                .and_then(|obj| obj.peel_to_commit())
                .is_ok())
        })
        .unwrap_or(false)
    }

    fn is_tracked(&self, path: &str) -> Result<bool> {
        self.with_repo(|repo| {
            if repo.is_bare() {
                let tree = repo.head()?.peel_to_tree()?;
                return Ok(tree.get_path(Path::new(path)).is_ok());
            }
            let index = repo.index()?;
            Ok(index.get_path(Path::new(path), 0).is_some())
        })
    }

    fn file_history(&self, path: &str, start: &str) -> Result<Vec<Commit>> {
        self.with_repo(|repo| {
            let start_commit = repo
                .revparse_single(start)
                .and_then(|obj| obj.peel_to_commit())
                .map_err(|_| AppError::InvalidRevision(start.to_string()))?;

            let mut revwalk = repo.revwalk()?;
            revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
            revwalk.push(start_commit.id())?;

            let mut tracked = path.to_string();
            let mut commits = Vec::new();

            for oid in revwalk {
                let oid = oid?;
                let commit = repo.find_commit(oid)?;

                match touch_of(repo, &commit, &tracked)? {
                    Touch::Untouched => {}
                    Touch::Modified => commits.push(commit_to_model(&commit, &tracked)),
                    Touch::RenamedFrom(old_path) => {
                        tracing::debug!("{} renamed from {} in {}", tracked, old_path, oid);
                        commits.push(commit_to_model(&commit, &tracked));
                        tracked = old_path;
                    }
                }
            }

            Ok(commits)
        })
    }

    fn blame_at(&self, path: &str, sha: &str) -> Result<String> {
        let unavailable = || AppError::BlameUnavailable {
            path: path.to_string(),
            sha: sha.to_string(),
        };

        let output = Command::new(&self.git_cmd)
            .arg("-C")
            .arg(&self.workdir)
            .args(["blame", "--porcelain", sha, "--", path])
            .output()
            .map_err(|e| {
                tracing::warn!("Failed to run {}: {}", self.git_cmd, e);
                unavailable()
            })?;

        if !output.status.success() {
            tracing::warn!(
                "git blame {} {} failed: {}",
                sha,
                path,
                String::from_utf8_lossy(&output.stderr).trim()
            );
            return Err(unavailable());
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn content_at(&self, path: &str, revision: &str) -> Result<Vec<String>> {
        self.with_repo(|repo| {
            let unavailable = || AppError::ContentUnavailable {
                path: path.to_string(),
                revision: revision.to_string(),
            };

            let commit = repo
                .revparse_single(revision)
                .and_then(|obj| obj.peel_to_commit())
                .map_err(|_| unavailable())?;
            let tree = commit.tree()?;
            let entry = tree.get_path(Path::new(path)).map_err(|_| unavailable())?;
            let blob = entry
                .to_object(repo)
                .and_then(|obj| obj.peel_to_blob())
                .map_err(|_| unavailable())?;

            let text = String::from_utf8_lossy(blob.content());
            Ok(split_lines(&text).into_iter().map(str::to_string).collect())
        })
    }
}

/// How a commit relates to the followed path.
#[derive(Debug, PartialEq, Eq)]
enum Touch {
    Untouched,
    Modified,
    /// The path was created by renaming this older path
    RenamedFrom(String),
}

fn blob_at(tree: &git2::Tree, path: &str) -> Option<Oid> {
    tree.get_path(Path::new(path)).ok().map(|entry| entry.id())
}

fn touch_of(repo: &Repository, commit: &git2::Commit, path: &str) -> Result<Touch> {
    let tree = commit.tree()?;
    let blob = blob_at(&tree, path);

    if commit.parent_count() == 0 {
        return Ok(if blob.is_some() { Touch::Modified } else { Touch::Untouched });
    }

    // Same as any parent: the change (if any) is attributed to that side of the merge.
    for parent in commit.parents() {
        if blob_at(&parent.tree()?, path) == blob {
            return Ok(Touch::Untouched);
        }
    }

    let parent_tree = commit.parent(0)?.tree()?;
    if blob.is_none() || blob_at(&parent_tree, path).is_some() {
        return Ok(Touch::Modified);
    }

    // Path appears in this commit: look for a rename source.
    let mut diff = repo.diff_tree_to_tree(Some(&parent_tree), Some(&tree), None)?;
    let mut find = DiffFindOptions::new();
    find.renames(true);
    diff.find_similar(Some(&mut find))?;

    for delta in diff.deltas() {
        if delta.status() != Delta::Renamed {
            continue;
        }
        if delta.new_file().path() != Some(Path::new(path)) {
            continue;
        }
        if let Some(old_path) = delta.old_file().path() {
            return Ok(Touch::RenamedFrom(old_path.to_string_lossy().to_string()));
        }
    }

    Ok(Touch::Modified)
}

/// `path` is the name the followed file has in `commit`.
pub fn commit_to_model(commit: &git2::Commit, path: &str) -> Commit {
    Commit {
        sha: commit.id().to_string(),
        author: commit.author().name().unwrap_or("Unknown").to_string(),
        message: commit.summary().unwrap_or("").trim().to_string(),
        timestamp: commit.time().seconds(),
        path: path.to_string(),
    }
}

pub fn format_relative_time(timestamp: i64) -> String {
    let now = chrono::Utc::now().timestamp();
    let diff = now - timestamp;

    if diff < 60 {
        "just now".to_string()
    } else if diff < 3600 {
        let mins = diff / 60;
        format!("{} minute{} ago", mins, if mins == 1 { "" } else { "s" })
    } else if diff < 86400 {
        let hours = diff / 3600;
        format!("{} hour{} ago", hours, if hours == 1 { "" } else { "s" })
    } else if diff < 2592000 {
        let days = diff / 86400;
        format!("{} day{} ago", days, if days == 1 { "" } else { "s" })
    } else if diff < 31536000 {
        let months = diff / 2592000;
        format!("{} month{} ago", months, if months == 1 { "" } else { "s" })
    } else {
        let years = diff / 31536000;
        format!("{} year{} ago", years, if years == 1 { "" } else { "s" })
    }
}
