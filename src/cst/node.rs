//! CST node definitions

use std::fmt;

use super::span::Span;

/// Index of a node inside its [`ParseTree`](super::ParseTree).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a [`Term`](NodeKind::Term) or [`Exception`](NodeKind::Exception)
/// matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Primary {
    /// Alphanumeric name, may hold interior whitespace. Leaf.
    Identifier,
    /// Text between two identical quote characters.
    Terminal,
    /// `{ ... }` or `(/ ... /)`.
    Repeat {
        /// The opening literal.
        lit: Option<NodeId>,
    },
    /// `[ ... ]` or `(: ... :)`.
    Option {
        /// The opening literal.
        lit: Option<NodeId>,
    },
    /// `( ... )`.
    Group {
        /// The opening literal.
        lit: Option<NodeId>,
    },
    /// `? ... ?`.
    Special,
    /// Zero-width marker for an empty alternative. Leaf.
    EmptyString,
}

/// The closed set of node kinds.
///
/// Component fields (`lhs`, `primary`, ...) point at children of the same
/// node and are `None` only while the node is still being parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeKind {
    /// Children: `Comment`, `Product` and `Space`.
    Root,
    /// `(*`, `Text` and nested `Comment`s, `*)`.
    Comment,
    /// `lhs = rhs ;`
    Product {
        lhs: Option<NodeId>,
        rhs: Option<NodeId>,
    },
    /// Definitions separated by `|`, `/` or `!`.
    DefinitionList,
    /// Terms separated by `,`.
    Definition,
    Term {
        repetition: Option<NodeId>,
        primary: Option<NodeId>,
        exception: Option<NodeId>,
    },
    /// `- primary`, owned by a `Term`.
    Exception {
        primary: Option<NodeId>,
    },
    /// `count *`
    Repetition,
    Primary(Primary),
    Text,
    Space,
    Literal,
    Number,
}

impl NodeKind {
    /// Node type name as used by the debug dump.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Root => "Root",
            Self::Comment => "Comment",
            Self::Product { .. } => "Product",
            Self::DefinitionList => "DefinitionList",
            Self::Definition => "Definition",
            Self::Term { .. } => "Term",
            Self::Exception { .. } => "Exception",
            Self::Repetition => "Repetition",
            Self::Primary(primary) => match primary {
                Primary::Identifier => "Identifier",
                Primary::Terminal => "Terminal",
                Primary::Repeat { .. } => "Repeat",
                Primary::Option { .. } => "Option",
                Primary::Group { .. } => "Group",
                Primary::Special => "Special",
                Primary::EmptyString => "EmptyString",
            },
            Self::Text => "Text",
            Self::Space => "Space",
            Self::Literal => "Literal",
            Self::Number => "Number",
        }
    }

    /// Leaves hold text and never have children.
    pub fn is_leaf(&self) -> bool {
        matches!(
            self,
            Self::Text
                | Self::Space
                | Self::Literal
                | Self::Number
                | Self::Primary(Primary::Identifier | Primary::EmptyString)
        )
    }

    pub fn is_primary(&self) -> bool {
        matches!(self, Self::Primary(_))
    }

    /// Node ids held by the kind's own fields.
    #[cfg(feature = "serde")]
    pub(crate) fn links(&self) -> [Option<NodeId>; 3] {
        match *self {
            Self::Product { lhs, rhs } => [lhs, rhs, None],
            Self::Term {
                repetition,
                primary,
                exception,
            } => [repetition, primary, exception],
            Self::Exception { primary } => [primary, None, None],
            Self::Primary(
                Primary::Repeat { lit } | Primary::Option { lit } | Primary::Group { lit },
            ) => [lit, None, None],
            _ => [None; 3],
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single tree node.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    pub(crate) kind: NodeKind,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) depth: usize,
    pub(crate) span: Span,
    pub(crate) data: String,
}

impl Node {
    pub(crate) fn new(kind: NodeKind, parent: Option<NodeId>, depth: usize, span: Span) -> Self {
        Self {
            kind,
            parent,
            children: Vec::new(),
            depth,
            span,
            data: String::new(),
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// `None` only for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Root is at depth 0.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn span(&self) -> Span {
        self.span
    }

    /// Text held by a leaf; empty for interior nodes.
    pub fn data(&self) -> &str {
        &self.data
    }

    pub fn is_leaf(&self) -> bool {
        self.kind.is_leaf()
    }

    pub fn is_primary(&self) -> bool {
        self.kind.is_primary()
    }

    /// Left hand side of a `Product`.
    pub fn lhs(&self) -> Option<NodeId> {
        match self.kind {
            NodeKind::Product { lhs, .. } => lhs,
            _ => None,
        }
    }

    /// Right hand side of a `Product`.
    pub fn rhs(&self) -> Option<NodeId> {
        match self.kind {
            NodeKind::Product { rhs, .. } => rhs,
            _ => None,
        }
    }

    pub fn repetition(&self) -> Option<NodeId> {
        match self.kind {
            NodeKind::Term { repetition, .. } => repetition,
            _ => None,
        }
    }

    /// Primary of a `Term` or an `Exception`.
    pub fn primary(&self) -> Option<NodeId> {
        match self.kind {
            NodeKind::Term { primary, .. } | NodeKind::Exception { primary } => primary,
            _ => None,
        }
    }

    pub fn exception(&self) -> Option<NodeId> {
        match self.kind {
            NodeKind::Term { exception, .. } => exception,
            _ => None,
        }
    }

    /// Opening literal of a `Repeat`, `Option` or `Group`.
    pub fn lit(&self) -> Option<NodeId> {
        match self.kind {
            NodeKind::Primary(
                Primary::Repeat { lit } | Primary::Option { lit } | Primary::Group { lit },
            ) => lit,
            _ => None,
        }
    }

    /// Value of a `Number` node.
    pub fn to_int(&self) -> Option<u64> {
        match self.kind {
            NodeKind::Number => self.data.parse().ok(),
            _ => None,
        }
    }
}
