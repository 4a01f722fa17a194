//! Blame of the followed file at the commit under the cursor.
//!
//! Blame comes from `git blame --porcelain`. Each entry in that output is a
//! header line (`<sha> <original line> <final line> [<group size>]`),
//! optionally followed by commit metadata lines, and ends with the line's
//! content prefixed by a tab.
//!
//! Only one result is kept, keyed on cursor position. The engine clears it
//! whenever the cursor moves.

use crate::error::{AppError, Result};
use crate::git::backend::GitBackend;
use crate::git::diff::split_lines;
use crate::models::{BlameLine, Commit};

const CONTENT_MARKER: char = '\t';

/// Parse porcelain blame output into one `BlameLine` per line of the file.
///
/// `current_sha` is the commit being blamed; lines last touched by it are
/// flagged `current`.
pub fn parse_porcelain(raw: &str, current_sha: &str) -> Result<Vec<BlameLine>> {
    let mut blamed = Vec::new();
    let mut input = split_lines(raw).into_iter();

    while let Some(header) = input.next() {
        let mut fields = header.split_whitespace();
        let (sha, original, final_) = match (fields.next(), fields.next(), fields.next()) {
            (Some(sha), Some(original), Some(final_)) => (sha, original, final_),
            _ => return Err(AppError::MalformedBlame(format!("bad header {:?}", header))),
        };

        let content = loop {
            match input.next() {
                Some(line) => {
                    if let Some(text) = line.strip_prefix(CONTENT_MARKER) {
                        break text;
                    }
                }
                None => {
                    return Err(AppError::MalformedBlame(format!(
                        "no content line after {:?}",
                        header
                    )));
                }
            }
        };

        blamed.push(BlameLine {
            sha: sha.to_string(),
            line: content.to_string(),
            current: sha == current_sha,
            original_line: line_number(original, header)?,
            final_line: line_number(final_, header)?,
        });
    }

    Ok(blamed)
}

fn line_number(field: &str, header: &str) -> Result<u32> {
    field
        .parse()
        .map_err(|_| AppError::MalformedBlame(format!("bad line number in {:?}", header)))
}

struct CachedBlame {
    position: usize,
    lines: Vec<BlameLine>,
}

#[derive(Default)]
pub struct BlameCache {
    cached: Option<CachedBlame>,
}

impl BlameCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_cached(&self, position: usize) -> bool {
        self.cached.as_ref().is_some_and(|c| c.position == position)
    }

    /// Blame for `commit`, the commit at cursor `position`, under the name
    /// the file has in that commit.
    pub fn get<B: GitBackend>(
        &mut self,
        backend: &B,
        position: usize,
        commit: &Commit,
    ) -> Result<&[BlameLine]> {
        let cached = match self.cached.take() {
            Some(cached) if cached.position == position => {
                tracing::debug!("Blame cache hit for {} at {}", commit.path, commit.short_sha());
                cached
            }
            _ => {
                tracing::debug!("Blame cache miss for {} at {}", commit.path, commit.short_sha());
                let raw = backend.blame_at(&commit.path, &commit.sha)?;
                let lines = parse_porcelain(&raw, &commit.sha)?;
                CachedBlame { position, lines }
            }
        };

        Ok(self.cached.insert(cached).lines.as_slice())
    }

    pub fn invalidate(&mut self) {
        self.cached = None;
    }
}
