use std::fmt;

use serde::{Deserialize, Serialize};

/// Line and column in the grammar source, both 1-based.
///
/// Ordering is line-major, which is what makes "first declared rule" and
/// "sorted occurrences" well defined.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// Translate a position relative to an embedded snippet into the
    /// enclosing source, where the snippet starts at `self`.
    ///
    /// `line` is 1-based, `column` is a 0-based char offset within that line.
    /// Only the first line of the snippet is shifted horizontally.
    pub fn offset_by(self, line: u32, column: u32) -> Self {
        if line <= 1 {
            Self::new(self.line, self.column + column)
        } else {
            Self::new(self.line + line - 1, column + 1)
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

impl From<(u32, u32)> for Position {
    fn from((line, column): (u32, u32)) -> Self {
        Self::new(line, column)
    }
}
