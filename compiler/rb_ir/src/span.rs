//! Source locations.
//!
//! A [`Position`] is a point in the source: byte offset plus the 1-based
//! line and column a human would read. A [`SourceSpan`] is a half-open pair
//! of positions. Columns count characters, not bytes.

use std::fmt;

/// A point in the source text.
///
/// `offset` is a 0-based UTF-8 byte offset; `line` and `column` are 1-based.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub offset: u32,
    pub line: u32,
    pub column: u32,
}

impl Position {
    /// Position of the first character of a source unit.
    pub const START: Position = Position {
        offset: 0,
        line: 1,
        column: 1,
    };

    #[inline]
    pub const fn new(offset: u32, line: u32, column: u32) -> Self {
        Position {
            offset,
            line,
            column,
        }
    }

    /// Position after reading `ch`.
    ///
    /// `\n` starts a new line; every other character (including a lone `\r`)
    /// advances the column by one.
    #[inline]
    #[must_use]
    pub fn advanced_by(self, ch: char) -> Position {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "len_utf8 is at most 4"
        )]
        let width = ch.len_utf8() as u32;
        if ch == '\n' {
            Position {
                offset: self.offset.saturating_add(width),
                line: self.line.saturating_add(1),
                column: 1,
            }
        } else {
            Position {
                offset: self.offset.saturating_add(width),
                line: self.line,
                column: self.column.saturating_add(1),
            }
        }
    }

    /// True when this position is the first column of a line.
    #[inline]
    pub const fn is_line_start(&self) -> bool {
        self.column == 1
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}:{}", self.offset, self.line, self.column)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Half-open source range `[start, end)`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct SourceSpan {
    pub start: Position,
    pub end: Position,
}

impl SourceSpan {
    #[inline]
    pub const fn new(start: Position, end: Position) -> Self {
        SourceSpan { start, end }
    }

    /// Zero-length span at `at`.
    #[inline]
    pub const fn empty(at: Position) -> Self {
        SourceSpan { start: at, end: at }
    }

    /// Length of the span in bytes.
    #[inline]
    pub const fn len(&self) -> u32 {
        self.end.offset - self.start.offset
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start.offset == self.end.offset
    }

    /// Check if a byte offset is within this span.
    #[inline]
    pub fn contains(&self, offset: u32) -> bool {
        offset >= self.start.offset && offset < self.end.offset
    }

    /// Smallest span covering both.
    #[inline]
    #[must_use]
    pub fn merge(self, other: SourceSpan) -> SourceSpan {
        SourceSpan {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Byte range for slicing the source.
    #[inline]
    pub fn to_range(&self) -> std::ops::Range<usize> {
        self.start.offset as usize..self.end.offset as usize
    }
}

impl fmt::Debug for SourceSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start.offset, self.end.offset)
    }
}

impl fmt::Display for SourceSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

// Size assertions to prevent accidental regressions
#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::{Position, SourceSpan};
    crate::static_assert_size!(Position, 12);
    crate::static_assert_size!(SourceSpan, 24);
}

#[cfg(test)]
mod tests;
