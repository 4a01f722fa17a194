//! Line correspondence between two revisions of a file.
//!
//! Line numbers are zero-based. A `None` value means the line has no
//! counterpart on the other side (it was deleted or added).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type LineMap = BTreeMap<usize, Option<usize>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineMapping {
    pub start: String,
    pub finish: String,
    /// Line in `start` → line in `finish`
    pub forward: LineMap,
    /// Line in `finish` → line in `start`
    pub backward: LineMap,
}

/// Where a single line of one revision ended up in another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "line", rename_all = "snake_case")]
pub enum MappedLine {
    Line(usize),
    Deleted,
    /// The line lies outside the file (past the end-of-file position)
    OutOfRange,
}

impl MappedLine {
    pub fn lookup(map: &LineMap, line: usize) -> Self {
        match map.get(&line) {
            Some(Some(target)) => MappedLine::Line(*target),
            Some(None) => MappedLine::Deleted,
            None => MappedLine::OutOfRange,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapLineResponse {
    pub start: String,
    pub finish: String,
    pub line: usize,
    pub target: MappedLine,
}
