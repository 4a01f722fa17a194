use serde::{Deserialize, Serialize};

use crate::git::repository::format_relative_time;

/// A commit that touched the followed file.
///
/// Built once while loading the history and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    pub sha: String,
    pub author: String,
    /// First line of the commit message
    pub message: String,
    pub timestamp: i64,
    /// Path of the followed file in this commit. Differs from the opened
    /// path for commits older than a rename.
    pub path: String,
}

impl Commit {
    pub fn short_sha(&self) -> &str {
        &self.sha[..self.sha.len().min(7)]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitDetail {
    pub sha: String,
    pub author: String,
    pub message: String,
    pub timestamp: i64,
    pub relative_time: String,
    pub path: String,
}

impl From<&Commit> for CommitDetail {
    fn from(commit: &Commit) -> Self {
        CommitDetail {
            sha: commit.sha.clone(),
            author: commit.author.clone(),
            message: commit.message.clone(),
            timestamp: commit.timestamp,
            relative_time: format_relative_time(commit.timestamp),
            path: commit.path.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub path: String,
    pub position: usize,
    pub total: usize,
    pub commits: Vec<CommitDetail>,
}

/// The commit under the cursor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentResponse {
    pub path: String,
    pub position: usize,
    pub total: usize,
    pub commit: CommitDetail,
}

/// Result of moving the cursor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CursorResponse {
    pub moved: bool,
    pub position: usize,
    pub commit: CommitDetail,
}
