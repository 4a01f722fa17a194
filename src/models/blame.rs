//! Blame data transfer objects.
//!
//! Provides per-line attribution for the followed file at the commit under
//! the cursor.

use serde::{Deserialize, Serialize};

/// Response for blame request on the current commit.
#[derive(Debug, Serialize)]
pub struct BlameResponse {
    /// Path of the file
    pub path: String,
    /// Commit the blame was calculated at
    pub commit: String,
    /// Per-line blame information
    pub lines: Vec<BlameLine>,
}

/// Blame information for a single line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlameLine {
    /// Commit that last touched this line
    pub sha: String,
    /// Literal line content, without the trailing newline
    pub line: String,
    /// Whether `sha` is the commit currently under the cursor
    pub current: bool,
    /// Line number in the commit that introduced the line (1-indexed)
    pub original_line: u32,
    /// Line number in the blamed revision (1-indexed)
    pub final_line: u32,
}
