use crate::cst::{NodeId, NodeKind, Position};
use crate::error::ErrorKind;
use crate::result::ParseResult;
use crate::source::Source;

use super::{Parser, PRIMARY_START_SYMBOLS, TERMINAL_QUOTES};

pub(super) fn is_letter(c: char) -> bool {
    c.is_alphabetic()
}

pub(super) fn is_digit(c: char) -> bool {
    c.is_numeric()
}

pub(super) fn is_space(c: char) -> bool {
    c.is_whitespace()
}

pub(super) fn is_primary_start(c: char) -> bool {
    is_letter(c) || PRIMARY_START_SYMBOLS.contains(&c)
}

/// The candidate spelling of a quote character, if `c` is one.
pub(super) fn quote_literal(c: char) -> Option<&'static str> {
    TERMINAL_QUOTES
        .iter()
        .copied()
        .find(|quote| quote.starts_with(c))
}

/// A run of whitespace.
pub(super) fn space<S: Source>(p: &mut Parser<S>, parent: NodeId) -> ParseResult<NodeId> {
    let Some(first) = p.current().filter(|&c| is_space(c)) else {
        return Err(p.fail(ErrorKind::NoSpace {
            found: p.current(),
        }));
    };

    let space = p.start_node(parent, NodeKind::Space);
    p.tree.push_char(space, first);
    loop {
        let end = p.position();
        p.tree.set_end(space, end);
        p.advance()?;

        match p.current().filter(|&c| is_space(c)) {
            Some(c) => p.tree.push_char(space, c),
            None => break,
        }
    }

    Ok(space)
}

/// A run of whitespace, if the lookahead starts one.
pub(super) fn optional_space<S: Source>(
    p: &mut Parser<S>,
    parent: NodeId,
) -> ParseResult<Option<NodeId>> {
    if p.at(is_space) {
        space(p, parent).map(Some)
    } else {
        Ok(None)
    }
}

/// Matches one of `candidates`, preferring the longest.
///
/// Every candidate still consistent with the characters read so far stays
/// live; a candidate that is read in full is recorded but reading goes on
/// while a longer one is live, so `/)` wins over `/` on `/)`. Ties go to the
/// candidate declared first. When a longer candidate dies on a character,
/// that character stays as the lookahead.
pub(super) fn literal<S: Source>(
    p: &mut Parser<S>,
    parent: NodeId,
    candidates: &[&'static str],
) -> ParseResult<NodeId> {
    let literal = p.start_node(parent, NodeKind::Literal);

    let mut live: Vec<&'static str> = candidates.to_vec();
    let mut best: Option<(&'static str, Position)> = None;
    let mut read = String::new();
    let mut index = 0;

    loop {
        let c = p.current();
        live.retain(|candidate| c.is_some() && candidate.chars().nth(index) == c);
        let extends_match = !live.is_empty();
        if let Some(c) = c {
            read.push(c);
        }
        index += 1;

        let position = p.position();
        live.retain(|&candidate| {
            if candidate.chars().count() > index {
                return true;
            }
            if !best.is_some_and(|(held, _)| held.len() >= candidate.len()) {
                best = Some((candidate, position));
            }
            false
        });

        if live.is_empty() {
            if extends_match {
                p.advance()?;
            }
            break;
        }

        if best.is_some() {
            p.advance()?;
        } else {
            p.advance_no_eof("reading literal")?;
        }
    }

    let Some((text, end)) = best else {
        return Err(p.fail(ErrorKind::NoLiteral {
            candidates: candidates.to_vec(),
            read,
        }));
    };

    p.tree.set_data(literal, text);
    p.tree.set_end(literal, end);
    Ok(literal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::StrSource;

    fn parser(text: &str) -> Parser<StrSource<'_>> {
        let mut p = Parser::new(StrSource::new(text));
        p.advance().unwrap();
        p
    }

    #[test]
    fn longest_candidate_wins() {
        let mut p = parser("/)x");
        let root = p.tree.root();
        let lit = literal(&mut p, root, &["/", "/)"]).unwrap();

        assert_eq!(p.tree[lit].data(), "/)");
        assert_eq!(p.tree[lit].span().end, Position::new(1, 2));
        assert_eq!(p.current(), Some('x'));
    }

    #[test]
    fn shorter_candidate_leaves_mismatch_as_lookahead() {
        let mut p = parser("/x");
        let root = p.tree.root();
        let lit = literal(&mut p, root, &["/", "/)"]).unwrap();

        assert_eq!(p.tree[lit].data(), "/");
        assert_eq!(p.tree[lit].span().end, Position::new(1, 1));
        assert_eq!(p.current(), Some('x'));
    }

    #[test]
    fn shorter_candidate_at_end_of_input() {
        let mut p = parser("/");
        let root = p.tree.root();
        let lit = literal(&mut p, root, &["/)", "/"]).unwrap();

        assert_eq!(p.tree[lit].data(), "/");
        assert_eq!(p.current(), None);
    }

    #[test]
    fn equal_length_ties_pick_first_declared() {
        let mut p = parser(";");
        let root = p.tree.root();
        let lit = literal(&mut p, root, &[";", ";"]).unwrap();
        assert_eq!(p.tree[lit].data(), ";");
        assert_eq!(p.tree.count(), 2);
    }

    #[test]
    fn no_candidate_matches() {
        let mut p = parser("(x");
        let root = p.tree.root();
        let failure = literal(&mut p, root, &["(:", "["]).unwrap_err();

        match failure.kind {
            ErrorKind::NoLiteral { candidates, read } => {
                assert_eq!(candidates, ["(:", "["]);
                assert_eq!(read, "(x");
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert_eq!(failure.position, Position::new(1, 2));
    }

    #[test]
    fn eof_inside_literal() {
        let mut p = parser("(");
        let root = p.tree.root();
        let failure = literal(&mut p, root, &["(*"]).unwrap_err();
        assert!(matches!(failure.kind, ErrorKind::Eof { .. }));
    }

    #[test]
    fn space_collects_the_whole_run() {
        let mut p = parser(" \t\n x");
        let root = p.tree.root();
        let space = space(&mut p, root).unwrap();

        assert_eq!(p.tree[space].data(), " \t\n ");
        assert_eq!(p.tree[space].span().start, Position::new(1, 1));
        assert_eq!(p.tree[space].span().end, Position::new(2, 1));
        assert_eq!(p.current(), Some('x'));
    }

    #[test]
    fn space_requires_whitespace() {
        let mut p = parser("x");
        let root = p.tree.root();
        let failure = space(&mut p, root).unwrap_err();
        assert!(matches!(failure.kind, ErrorKind::NoSpace { found: Some('x') }));
    }
}
