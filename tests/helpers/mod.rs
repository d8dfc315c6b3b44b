//! Shared checks for the integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use ebnf_cst::{NodeId, ParseTree, Position, Span};

pub fn resources(kind: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("resources")
        .join(kind)
}

/// Every grammar file under `tests/resources/<kind>`, sorted by name.
pub fn resource_files(kind: &str) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = fs::read_dir(resources(kind))
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "ebnf"))
        .collect();
    files.sort();
    files
}

pub fn parse_ok(source: &str) -> ParseTree {
    match ebnf_cst::parse_str(source) {
        Ok(tree) => tree,
        Err(err) => panic!("failed to parse {source:?}: {err}\n{}", err.tree().dump()),
    }
}

/// The reader position of every character of `source`.
pub fn positions(source: &str) -> Vec<Position> {
    let mut position = Position::default();
    source
        .chars()
        .map(|c| {
            if c == '\n' {
                position.line += 1;
                position.column = 0;
            } else {
                position.column += 1;
            }
            position
        })
        .collect()
}

/// The slice of `source` a span covers.
pub fn slice(source: &str, span: Span) -> String {
    if span.is_empty() {
        return String::new();
    }

    let positions = positions(source);
    let index_of = |position: Position| {
        positions
            .iter()
            .position(|&p| p == position)
            .unwrap_or_else(|| panic!("{position} is not a character of {source:?}"))
    };

    let (start, end) = (index_of(span.start), index_of(span.end));
    source.chars().skip(start).take(end + 1 - start).collect()
}

pub fn assert_round_trip(source: &str, tree: &ParseTree) {
    assert_eq!(tree.to_string(), source);
}

/// Counters must match a fresh walk of the tree.
pub fn assert_counters(tree: &ParseTree) {
    let nodes: Vec<NodeId> = tree.descendants(tree.root()).collect();
    let height = nodes.iter().map(|&id| tree[id].depth()).max().unwrap();
    let max_degree = nodes
        .iter()
        .map(|&id| tree[id].children().len())
        .max()
        .unwrap();

    assert_eq!(tree.count(), nodes.len(), "count");
    assert_eq!(tree.len(), nodes.len(), "arena size");
    assert_eq!(tree.height(), height, "height");
    assert_eq!(tree.max_degree(), max_degree, "max degree");
}

/// Every node must cover exactly its own text.
pub fn assert_coordinates(source: &str, tree: &ParseTree) {
    for id in tree.descendants(tree.root()) {
        let node = &tree[id];
        let span = node.span();

        assert!(span.start_line() <= span.end_line(), "{id} {span}");
        assert_eq!(
            slice(source, span),
            tree.text(id),
            "{} {id} at {span}",
            node.kind()
        );
    }
}

/// Parses `source` and runs every consistency check on the result.
pub fn check(source: &str) -> ParseTree {
    let tree = parse_ok(source);
    assert_round_trip(source, &tree);
    assert_counters(&tree);
    assert_coordinates(source, &tree);
    tree
}

/// Ids of every node of the given kind name, in pre-order.
pub fn find(tree: &ParseTree, name: &str) -> Vec<NodeId> {
    tree.descendants(tree.root())
        .filter(|&id| tree[id].kind().name() == name)
        .collect()
}

pub fn child_kinds(tree: &ParseTree, id: NodeId) -> Vec<&'static str> {
    tree.children(id)
        .iter()
        .map(|&child| tree[child].kind().name())
        .collect()
}
