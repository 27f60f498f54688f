//! Line/column positions for shells that display a caret as `line:col`.
//!
//! The engine itself works in absolute char offsets. A `Position` is only a
//! view of such an offset: both fields are **0-indexed** and the column
//! counts chars (not bytes), which is how `ropey` indexes lines.

use std::fmt;

/// A (line, column) pair, both 0-indexed.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl Position {
    /// The origin — line 0, column 0.
    pub const ZERO: Self = Self { line: 0, col: 0 };

    #[inline]
    #[must_use]
    pub const fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pos({}:{})", self.line, self.col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 1-indexed for humans.
        write!(f, "{}:{}", self.line + 1, self.col + 1)
    }
}
