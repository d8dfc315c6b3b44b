use std::fmt;
use std::io;

use thiserror::Error;

use crate::cst::{NodeId, ParseTree, Position, Span};

pub type Result<T, E = ParseError> = std::result::Result<T, E>;

/// A literal the engine read but did not attach to the tree, such as a `/)`
/// closer where only `)` or `:)` may appear.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetachedLiteral {
    pub text: String,
    pub span: Span,
}

impl DetachedLiteral {
    pub(crate) fn new(text: impl Into<String>, span: Span) -> Self {
        Self {
            text: text.into(),
            span,
        }
    }
}

/// What went wrong. Node references point into the partial tree carried by
/// the enclosing [`ParseError`].
#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("did not expect end of input, {reason}")]
    Eof { reason: String },
    #[error("did not expect character `{found}`, {expected}")]
    UnexpectedCharacter { found: char, expected: String },
    #[error("expected a space character, found `{}`", .found.map(String::from).unwrap_or_default())]
    NoSpace { found: Option<char> },
    #[error("could not match any of {candidates:?}, read {read:?}")]
    NoLiteral {
        candidates: Vec<&'static str>,
        read: String,
    },
    #[error("start of another term before the term started at {term_start} was terminated")]
    UndelimitedTerm { term: NodeId, term_start: Position },
    #[error("term can only have one repetition, previous one defined at {previous}")]
    MultipleTermRepetitions {
        term: NodeId,
        repetition: NodeId,
        previous: Position,
    },
    #[error("term already has an exception defined at {previous}")]
    MultipleTermExceptions {
        term: NodeId,
        exception: NodeId,
        previous: Position,
    },
    #[error("term can only have one primary, previous one defined at {previous}")]
    MultipleTermPrimaries {
        term: NodeId,
        primary: NodeId,
        previous: Position,
    },
    #[error("did not expect literal `{}` at {}", .literal.text, .literal.span.start)]
    UnexpectedLiteral { literal: DetachedLiteral },
    #[error("nesting deeper than {limit} levels")]
    NestingTooDeep { limit: usize },
    #[error("reading input failed: {0}")]
    Io(#[from] io::Error),
}

/// Why a node arena is not a well-formed [`ParseTree`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("tree has no nodes")]
    MissingRoot,
    #[error("node #0 must be a root without parent at depth 0")]
    MisplacedRoot,
    #[error("node {node} refers to node #{target}, which does not exist")]
    DanglingId { node: NodeId, target: usize },
    #[error("node {parent} lists {child} as a child, but {child} does not point back")]
    BrokenLink { parent: NodeId, child: NodeId },
    #[error("node {node} is listed as a child more than once")]
    SharedChild { node: NodeId },
    #[error("node {node} is not attached to the tree")]
    Detached { node: NodeId },
    #[error("node {node} is at depth {found}, expected {expected}")]
    WrongDepth {
        node: NodeId,
        found: usize,
        expected: usize,
    },
    #[error("{counter} is {found}, the nodes give {expected}")]
    WrongCounter {
        counter: &'static str,
        found: usize,
        expected: usize,
    },
}

/// Engine-internal failure: a kind plus the reader position it happened at.
/// The tree is attached once the failure leaves the engine.
#[derive(Debug)]
pub(crate) struct Failure {
    pub(crate) kind: ErrorKind,
    pub(crate) position: Position,
}

impl Failure {
    pub(crate) fn new(kind: ErrorKind, position: Position) -> Self {
        Self { kind, position }
    }
}

/// A failed parse.
///
/// Carries the position of the reader when parsing stopped and the tree
/// built up to that point. In the partial tree only the most recently added
/// node and its ancestors may have unfinished spans.
#[derive(Debug)]
pub struct ParseError {
    kind: ErrorKind,
    position: Position,
    tree: ParseTree,
}

impl ParseError {
    pub(crate) fn new(failure: Failure, tree: ParseTree) -> Self {
        Self {
            kind: failure.kind,
            position: failure.position,
            tree,
        }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn line(&self) -> usize {
        self.position.line
    }

    pub fn column(&self) -> usize {
        self.position.column
    }

    /// The partial tree.
    pub fn tree(&self) -> &ParseTree {
        &self.tree
    }

    pub fn into_tree(self) -> ParseTree {
        self.tree
    }

    pub fn into_parts(self) -> (ErrorKind, ParseTree) {
        (self.kind, self.tree)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.kind, self.position)
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            ErrorKind::Io(err) => Some(err),
            _ => None,
        }
    }
}
