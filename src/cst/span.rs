//! Line/column coordinates for tree nodes

use std::fmt;

/// A reader position.
///
/// `line` starts at 1. `column` is 0 right after a newline and is
/// incremented for every other consumed character, so the position of a
/// character is the reader position right after consuming it: the first
/// character of a line sits at column 1 and a `'\n'` sits at column 0 of the
/// line it opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// The position one column to the left, on the same line.
    pub(crate) fn before(self) -> Self {
        Self {
            line: self.line,
            column: self.column.saturating_sub(1),
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self { line: 1, column: 0 }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Source range of a node.
///
/// `start` is the position of the first character and `end` the position of
/// the last one. Read as 0-based half-open columns this is "start inclusive,
/// end exclusive": the text of a single-line node is
/// `line[start.column - 1..end.column]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// A single character at `pos`.
    pub const fn point(pos: Position) -> Self {
        Self { start: pos, end: pos }
    }

    /// A zero-width range right before the character at `pos`.
    pub(crate) fn empty_at(pos: Position) -> Self {
        Self {
            start: pos,
            end: pos.before(),
        }
    }

    pub fn start_line(&self) -> usize {
        self.start.line
    }

    pub fn start_column(&self) -> usize {
        self.start.column
    }

    pub fn end_line(&self) -> usize {
        self.end.line
    }

    pub fn end_column(&self) -> usize {
        self.end.column
    }

    /// Whether the range covers no text at all.
    pub fn is_empty(&self) -> bool {
        self.start.line == self.end.line && self.start.column > self.end.column
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{}-{},{}",
            self.start.line, self.start.column, self.end.line, self.end.column
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_span_ends_before_it_starts() {
        let span = Span::empty_at(Position::new(3, 5));
        assert!(span.is_empty());
        assert_eq!(span.end, Position::new(3, 4));
        assert!(!Span::point(Position::new(3, 5)).is_empty());
    }

    #[test]
    fn display_matches_dump_format() {
        let span = Span::new(Position::new(1, 1), Position::new(2, 0));
        assert_eq!(span.to_string(), "1,1-2,0");
        assert_eq!(Position::new(4, 7).to_string(), "4:7");
    }
}
