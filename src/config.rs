//! Runtime settings shared by every subcommand.

use std::path::PathBuf;

use crate::error::Result;
use crate::git::GitRepository;

#[derive(Debug, Clone)]
pub struct Config {
    /// Repository to open; discovery walks up from here.
    pub repo_path: PathBuf,
    /// Command used to invoke git for blame.
    pub git_cmd: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            repo_path: PathBuf::from("."),
            git_cmd: "git".to_string(),
        }
    }
}

impl Config {
    pub fn open_repository(&self) -> Result<GitRepository> {
        Ok(GitRepository::open(&self.repo_path)?.with_git_cmd(self.git_cmd.clone()))
    }
}
