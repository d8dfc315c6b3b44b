//! Concrete Syntax Tree (CST) module
//!
//! Every character of the parsed input, whitespace and comments included,
//! belongs to exactly one leaf, so the source can be rebuilt from the tree
//! and every node knows the line/column range it was read from.

pub mod node;
pub mod span;
pub mod tree;

pub use node::{Node, NodeId, NodeKind, Primary};
pub use span::{Position, Span};
pub use tree::{Descendants, ParseTree};
