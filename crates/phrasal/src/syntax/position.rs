//! Line and column tracking for the character stream
//!
//! Unlike byte-offset ranges, the engine reports locations as 1-based
//! line/column pairs, advanced one character at a time while the input is
//! consumed.

use std::fmt;

/// A 1-based line/column location in the source text
///
/// Columns count Unicode scalar values, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cursor {
    /// Line number, starting at 1
    pub line: u32,
    /// Column number, starting at 1
    pub column: u32,
}

impl Cursor {
    /// Create a new cursor
    #[must_use]
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// The cursor at the very start of a text
    #[must_use]
    pub const fn start() -> Self {
        Self { line: 1, column: 1 }
    }

    /// Move past one consumed character.
    ///
    /// A newline moves to the first column of the next line; anything else
    /// moves one column to the right.
    pub fn advance(&mut self, ch: char) {
        if ch == '\n' {
            self.line = self.line.saturating_add(1);
            self.column = 1;
        } else {
            self.column = self.column.saturating_add(1);
        }
    }

    /// Return a copy advanced past `ch`
    #[must_use]
    pub fn advanced(mut self, ch: char) -> Self {
        self.advance(ch);
        self
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::start()
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A span between two cursors; `end` points just past the last character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub start: Cursor,
    pub end: Cursor,
}

impl Position {
    /// Create a new position
    #[must_use]
    pub const fn new(start: Cursor, end: Cursor) -> Self {
        Self { start, end }
    }

    /// An empty position at `at`
    #[must_use]
    pub const fn empty(at: Cursor) -> Self {
        Self { start: at, end: at }
    }

    /// Smallest position covering both `self` and `other`
    #[must_use]
    pub fn cover(self, other: Self) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}
