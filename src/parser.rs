//! Recursive-descent parser producing a lossless [`ParseTree`].
//!
//! There is one routine per production. Each one decides on at most two
//! characters of lookahead, attaches its node to the parent as soon as it
//! commits, and fixes the node's end once its children are parsed. Parsing
//! stops at the first error; the tree built so far travels with the error.
//!
//! Routines recurse as deep as the input nests brackets and comments.
//! [`ParseOptions::max_nesting`] bounds that depth so hostile input cannot
//! exhaust the stack.

mod comment;
mod common;
mod definition;
mod primary;
mod product;
mod term;

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::cst::{NodeId, NodeKind, ParseTree, Position};
use crate::error::{DetachedLiteral, ErrorKind, Failure, ParseError, Result};
use crate::reader::Reader;
use crate::result::ParseResult;
use crate::source::{IoSource, Source, StrSource};

/// Separators between the definitions of a definition list.
pub const DEFINITION_SEPARATORS: &[&str] = &["|", "/", "!"];
/// Characters that end a product.
pub const PRODUCT_TERMINATORS: &[&str] = &[";", "."];
/// Quote characters that may enclose a terminal.
pub const TERMINAL_QUOTES: &[&str] = &["\"", "'", "`"];
/// Characters, besides letters, that may start a primary.
pub const PRIMARY_START_SYMBOLS: &[char] = &['(', '[', '{', '?', '"', '\'', '`'];

/// Parser configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Deepest allowed nesting of comments and bracketed primaries.
    pub max_nesting: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self { max_nesting: 256 }
    }
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_nesting(mut self, max_nesting: usize) -> Self {
        self.max_nesting = max_nesting;
        self
    }
}

/// Parser state threaded through every grammar routine: the reader, the
/// tree under construction and the current nesting depth.
pub struct Parser<S> {
    reader: Reader<S>,
    tree: ParseTree,
    options: ParseOptions,
    nesting: usize,
}

impl<S: Source> Parser<S> {
    pub fn new(source: S) -> Self {
        Self::with_options(source, ParseOptions::default())
    }

    pub fn with_options(source: S, options: ParseOptions) -> Self {
        Self {
            reader: Reader::new(source),
            tree: ParseTree::new(),
            options,
            nesting: 0,
        }
    }

    /// Parses the whole input.
    pub fn parse(mut self) -> Result<ParseTree> {
        log::debug!("parsing started with {:?}", self.options);

        match self.run() {
            Ok(()) => {
                log::debug!(
                    "parsing finished: {} nodes, height {}, max degree {}",
                    self.tree.count(),
                    self.tree.height(),
                    self.tree.max_degree()
                );
                Ok(self.tree)
            }
            Err(failure) => {
                log::debug!("parsing failed at {}: {}", failure.position, failure.kind);
                Err(ParseError::new(failure, self.tree))
            }
        }
    }

    fn run(&mut self) -> ParseResult<()> {
        self.advance()?;
        product::root(self)
    }

    fn current(&self) -> Option<char> {
        self.reader.current()
    }

    fn at(&self, predicate: impl Fn(char) -> bool) -> bool {
        self.current().is_some_and(predicate)
    }

    fn position(&self) -> Position {
        self.reader.position()
    }

    fn advance(&mut self) -> ParseResult<()> {
        self.reader.read(1).map(drop)
    }

    fn advance_no_eof(&mut self, reason: &str) -> ParseResult<()> {
        self.reader.read_no_eof(1, reason).map(drop)
    }

    /// Attaches a new node starting at the lookahead.
    fn start_node(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let start = self.position();
        self.tree.add_child(parent, kind, start)
    }

    /// Ends `id` on the character right before the lookahead.
    fn finish_before_lookahead(&mut self, id: NodeId) {
        let end = self.position().before();
        self.tree.set_end(id, end);
    }

    /// Ends `id` where its last child ends.
    fn finish_at_last_child(&mut self, id: NodeId) {
        if let Some(end) = self.tree.last_child_end(id) {
            self.tree.set_end(id, end);
        }
    }

    fn attach_literal(&mut self, parent: NodeId, literal: DetachedLiteral) -> NodeId {
        let id = self.tree.add_child(parent, NodeKind::Literal, literal.span.start);
        self.tree.set_span(id, literal.span);
        self.tree.set_data(id, literal.text);
        id
    }

    fn fail(&self, kind: ErrorKind) -> Failure {
        Failure::new(kind, self.position())
    }

    fn eof(&self, reason: impl Into<String>) -> Failure {
        self.fail(ErrorKind::Eof {
            reason: reason.into(),
        })
    }

    /// The lookahead does not fit `expected`; end of input reports as EOF.
    fn unexpected(&self, expected: impl Into<String>) -> Failure {
        match self.current() {
            Some(found) => self.fail(ErrorKind::UnexpectedCharacter {
                found,
                expected: expected.into(),
            }),
            None => self.eof(expected),
        }
    }

    fn enter(&mut self) -> ParseResult<()> {
        if self.nesting >= self.options.max_nesting {
            return Err(self.fail(ErrorKind::NestingTooDeep {
                limit: self.options.max_nesting,
            }));
        }
        self.nesting += 1;
        Ok(())
    }

    fn leave(&mut self) {
        self.nesting -= 1;
    }
}

/// Parses everything `source` yields.
pub fn parse<S: Source>(source: S) -> Result<ParseTree> {
    Parser::new(source).parse()
}

pub fn parse_with_options<S: Source>(source: S, options: ParseOptions) -> Result<ParseTree> {
    Parser::with_options(source, options).parse()
}

pub fn parse_str(text: &str) -> Result<ParseTree> {
    parse(StrSource::new(text))
}

/// Parses UTF-8 text pulled from `reader`.
pub fn parse_reader<R: Read>(reader: R) -> Result<ParseTree> {
    parse(IoSource::from_reader(reader))
}

/// Parses the file at `path`. A file that cannot be opened is reported as
/// an I/O error at 1:0 with an empty tree.
pub fn parse_file(path: impl AsRef<Path>) -> Result<ParseTree> {
    let path = path.as_ref();
    log::debug!("parsing {}", path.display());

    let file = File::open(path).map_err(|err| {
        ParseError::new(
            Failure::new(ErrorKind::Io(err), Position::default()),
            ParseTree::new(),
        )
    })?;
    parse_reader(file)
}
