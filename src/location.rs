use serde::Serialize;
use std::fmt;

/// 1-based source line of a word.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Ord, PartialOrd, Hash, Serialize)]
#[serde(transparent)]
pub struct Location {
    pub line: usize,
}

impl Location {
    pub fn new(line: usize) -> Self {
        Self { line }
    }

    pub fn skip_lines(mut self, count: usize) -> Self {
        self.line += count;
        self
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::new(1)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.line)
    }
}
