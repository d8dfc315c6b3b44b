//! Parse tree container

use std::fmt;
use std::ops::Index;

use super::node::{Node, NodeId, NodeKind};
use super::span::{Position, Span};
#[cfg(feature = "serde")]
use crate::error::TreeError;

/// Owns every node of one parse plus aggregate counters.
///
/// Nodes live in a flat arena addressed by [`NodeId`]; the parent link is an
/// index, children are owned through the arena. Counters are updated as
/// children are attached.
///
/// A deserialized tree is checked first: node 0 must be the root, every id
/// must resolve, parent and child links must agree and the counters must
/// match the nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawParseTree"))]
pub struct ParseTree {
    nodes: Vec<Node>,
    count: usize,
    height: usize,
    max_degree: usize,
}

impl Default for ParseTree {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(clippy::len_without_is_empty)]
impl ParseTree {
    /// A tree holding only its root.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeKind::Root, None, 0, Span::default())],
            count: 1,
            height: 0,
            max_degree: 0,
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// # Panics
    ///
    /// Panics if `id` does not belong to this tree.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Total number of nodes, the root included.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Greatest node depth.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Greatest number of children of a single node.
    pub fn max_degree(&self) -> usize {
        self.max_degree
    }

    /// Number of nodes in the arena, the root included. Never zero.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether nothing was attached below the root.
    pub fn has_only_root(&self) -> bool {
        self.nodes.len() == 1
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// Pre-order walk of the subtree rooted at `id`, `id` included.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            tree: self,
            stack: vec![id],
        }
    }

    /// Source text covered by the subtree rooted at `id`.
    pub fn text(&self, id: NodeId) -> String {
        self.descendants(id)
            .map(|node| self.node(node).data.as_str())
            .collect()
    }

    /// Writes the original source text.
    pub fn unparse<W: fmt::Write + ?Sized>(&self, out: &mut W) -> fmt::Result {
        self.unparse_node(self.root(), out)
    }

    pub fn unparse_node<W: fmt::Write + ?Sized>(&self, id: NodeId, out: &mut W) -> fmt::Result {
        for node in self.descendants(id) {
            out.write_str(&self.node(node).data)?;
        }
        Ok(())
    }

    /// Writes a header with the counters followed by the root dump.
    pub fn write<W: fmt::Write + ?Sized>(&self, out: &mut W) -> fmt::Result {
        writeln!(
            out,
            "ParseTree{{count = {}, height = {}, max_degree = {}}}:",
            self.count, self.height, self.max_degree
        )?;
        self.write_node(self.root(), out)
    }

    /// Indented listing of a subtree: one line per node with its kind and
    /// span, leaves prefixed with their data, children one tab deeper.
    pub fn write_node<W: fmt::Write + ?Sized>(&self, id: NodeId, out: &mut W) -> fmt::Result {
        let base = self.node(id).depth;
        for node_id in self.descendants(id) {
            let node = self.node(node_id);
            for _ in base..node.depth {
                out.write_char('\t')?;
            }
            if node.is_leaf() {
                write!(out, "({})", node.data.escape_debug())?;
            }
            writeln!(out, "{}:{}", node.kind, node.span)?;
        }
        Ok(())
    }

    /// Dump of the whole tree as a string.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write(&mut out);
        out
    }

    /// Creates a node starting at `start` and appends it to `parent`.
    pub(crate) fn add_child(&mut self, parent: NodeId, kind: NodeKind, start: Position) -> NodeId {
        let id = NodeId(self.nodes.len());
        let depth = self.nodes[parent.0].depth + 1;
        self.nodes
            .push(Node::new(kind, Some(parent), depth, Span::point(start)));

        let siblings = &mut self.nodes[parent.0].children;
        siblings.push(id);

        self.count += 1;
        self.height = self.height.max(depth);
        self.max_degree = self.max_degree.max(siblings.len());

        id
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub(crate) fn set_kind(&mut self, id: NodeId, kind: NodeKind) {
        self.nodes[id.0].kind = kind;
    }

    pub(crate) fn set_start(&mut self, id: NodeId, start: Position) {
        self.nodes[id.0].span.start = start;
    }

    pub(crate) fn set_end(&mut self, id: NodeId, end: Position) {
        self.nodes[id.0].span.end = end;
    }

    pub(crate) fn set_span(&mut self, id: NodeId, span: Span) {
        self.nodes[id.0].span = span;
    }

    pub(crate) fn push_char(&mut self, id: NodeId, c: char) {
        self.nodes[id.0].data.push(c);
    }

    pub(crate) fn set_data(&mut self, id: NodeId, data: impl Into<String>) {
        self.nodes[id.0].data = data.into();
    }

    /// End position of the last child of `id`.
    pub(crate) fn last_child_end(&self, id: NodeId) -> Option<Position> {
        self.node(id)
            .children
            .last()
            .map(|&child| self.node(child).span.end)
    }
}

/// Unchecked serialized form of a [`ParseTree`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawParseTree {
    nodes: Vec<Node>,
    count: usize,
    height: usize,
    max_degree: usize,
}

#[cfg(feature = "serde")]
impl TryFrom<RawParseTree> for ParseTree {
    type Error = TreeError;

    fn try_from(raw: RawParseTree) -> Result<Self, TreeError> {
        let tree = Self::from_nodes(raw.nodes)?;

        for (counter, found, expected) in [
            ("count", raw.count, tree.count),
            ("height", raw.height, tree.height),
            ("max_degree", raw.max_degree, tree.max_degree),
        ] {
            if found != expected {
                return Err(TreeError::WrongCounter {
                    counter,
                    found,
                    expected,
                });
            }
        }
        Ok(tree)
    }
}

#[cfg(feature = "serde")]
impl ParseTree {
    /// Checks the arena invariants and computes the counters.
    ///
    /// Every node but the root is listed by exactly the parent it points
    /// to, one level below it, so the links form a single tree.
    fn from_nodes(nodes: Vec<Node>) -> Result<Self, TreeError> {
        let root = nodes.first().ok_or(TreeError::MissingRoot)?;
        if root.kind != NodeKind::Root || root.parent.is_some() || root.depth != 0 {
            return Err(TreeError::MisplacedRoot);
        }

        let len = nodes.len();
        let resolve = |node: usize, target: NodeId| {
            if target.0 < len {
                Ok(target.0)
            } else {
                Err(TreeError::DanglingId {
                    node: NodeId(node),
                    target: target.0,
                })
            }
        };

        let mut listed = vec![false; len];
        for (index, node) in nodes.iter().enumerate() {
            for target in node.kind.links().into_iter().flatten().chain(node.parent) {
                resolve(index, target)?;
            }

            for &child in &node.children {
                let found = &nodes[resolve(index, child)?];
                if found.parent != Some(NodeId(index)) {
                    return Err(TreeError::BrokenLink {
                        parent: NodeId(index),
                        child,
                    });
                }
                if std::mem::replace(&mut listed[child.0], true) {
                    return Err(TreeError::SharedChild { node: child });
                }
                if found.depth != node.depth + 1 {
                    return Err(TreeError::WrongDepth {
                        node: child,
                        found: found.depth,
                        expected: node.depth + 1,
                    });
                }
            }
        }

        if let Some(index) = listed.iter().skip(1).position(|&seen| !seen) {
            return Err(TreeError::Detached {
                node: NodeId(index + 1),
            });
        }

        let height = nodes.iter().map(|node| node.depth).max().unwrap_or(0);
        let max_degree = nodes
            .iter()
            .map(|node| node.children.len())
            .max()
            .unwrap_or(0);
        Ok(Self {
            count: len,
            height,
            max_degree,
            nodes,
        })
    }
}

impl Index<NodeId> for ParseTree {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        self.node(id)
    }
}

impl fmt::Display for ParseTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.unparse(f)
    }
}

/// Iterator returned by [`ParseTree::descendants`].
pub struct Descendants<'a> {
    tree: &'a ParseTree,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.tree.node(id).children.iter().rev().copied());
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cst::Primary;

    fn sample() -> (ParseTree, NodeId, NodeId) {
        let mut tree = ParseTree::new();
        let root = tree.root();
        let product = tree.add_child(
            root,
            NodeKind::Product {
                lhs: None,
                rhs: None,
            },
            Position::new(1, 1),
        );
        let ident = tree.add_child(
            product,
            NodeKind::Primary(Primary::Identifier),
            Position::new(1, 1),
        );
        tree.set_data(ident, "abc");
        tree.set_end(ident, Position::new(1, 3));
        let space = tree.add_child(product, NodeKind::Space, Position::new(1, 4));
        tree.set_data(space, " ");
        let newline = tree.add_child(root, NodeKind::Space, Position::new(2, 0));
        tree.set_data(newline, "\n");
        (tree, product, ident)
    }

    #[test]
    fn attach_updates_counters() {
        let (tree, product, ident) = sample();
        assert_eq!(tree.count(), 5);
        assert_eq!(tree.height(), 2);
        assert_eq!(tree.max_degree(), 2);
        assert_eq!(tree.node(ident).depth(), 2);
        assert_eq!(tree.parent(ident), Some(product));
        assert_eq!(tree.parent(tree.root()), None);
    }

    #[test]
    fn new_tree_has_only_root() {
        let tree = ParseTree::new();
        assert!(tree.has_only_root());
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.count(), tree.len());

        let (tree, _, _) = sample();
        assert!(!tree.has_only_root());
        assert_eq!(tree.len(), 5);
    }

    #[test]
    fn descendants_are_pre_order() {
        let (tree, product, ident) = sample();
        let order: Vec<_> = tree.descendants(tree.root()).collect();
        assert_eq!(order[..3], [tree.root(), product, ident]);
        assert_eq!(order.len(), tree.count());
    }

    #[test]
    fn unparse_concatenates_leaves() {
        let (tree, product, _) = sample();
        assert_eq!(tree.to_string(), "abc \n");
        assert_eq!(tree.text(product), "abc ");
    }

    #[test]
    fn dump_indents_children() {
        let (tree, _, _) = sample();
        let dump = tree.dump();
        let mut lines = dump.lines();
        assert_eq!(
            lines.next(),
            Some("ParseTree{count = 5, height = 2, max_degree = 2}:")
        );
        assert_eq!(lines.next(), Some("Root:1,0-1,0"));
        assert_eq!(lines.next(), Some("\tProduct:1,1-1,1"));
        assert_eq!(lines.next(), Some("\t\t(abc)Identifier:1,1-1,3"));
        assert_eq!(lines.next(), Some("\t\t( )Space:1,4-1,4"));
        assert_eq!(lines.next(), Some("\t(\\n)Space:2,0-2,0"));
    }
}
