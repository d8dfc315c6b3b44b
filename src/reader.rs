//! Position-tracking input reader

use crate::cst::Position;
use crate::error::{ErrorKind, Failure};
use crate::result::ParseResult;
use crate::source::Source;

/// Wraps a [`Source`], keeping the current lookahead and the line/column of
/// its last character.
pub(crate) struct Reader<S> {
    source: S,
    c: String,
    position: Position,
    exhausted: bool,
}

impl<S: Source> Reader<S> {
    /// Nothing is read until the first call to [`read`](Self::read).
    pub(crate) fn new(source: S) -> Self {
        Self {
            source,
            c: String::new(),
            position: Position::default(),
            exhausted: false,
        }
    }

    /// Pulls `n` characters, makes them the lookahead and advances the
    /// position past them. An empty result means end of input.
    pub(crate) fn read(&mut self, n: usize) -> ParseResult<&str> {
        if self.exhausted {
            self.c.clear();
            return Ok(&self.c);
        }

        let chunk = self
            .source
            .read(n)
            .map_err(|err| Failure::new(ErrorKind::Io(err), self.position))?;

        let mut consumed = 0;
        for c in chunk.chars() {
            if c == '\n' {
                self.position.line += 1;
                self.position.column = 0;
            } else {
                self.position.column += 1;
            }
            consumed += 1;
        }
        if consumed < n {
            self.exhausted = true;
        }

        self.c = chunk;
        Ok(&self.c)
    }

    /// Like [`read`](Self::read), but running out of input is an error.
    pub(crate) fn read_no_eof(&mut self, n: usize, reason: &str) -> ParseResult<&str> {
        self.read(n)?;
        if self.c.is_empty() {
            return Err(Failure::new(
                ErrorKind::Eof {
                    reason: reason.to_owned(),
                },
                self.position,
            ));
        }
        Ok(&self.c)
    }

    /// First character of the lookahead, `None` at end of input.
    pub(crate) fn current(&self) -> Option<char> {
        self.c.chars().next()
    }

    pub(crate) fn position(&self) -> Position {
        self.position
    }
}
