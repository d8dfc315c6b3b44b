use crate::cst::{NodeId, NodeKind, Span};
use crate::error::{DetachedLiteral, ErrorKind};
use crate::result::ParseResult;
use crate::source::Source;

use super::common::{is_digit, is_primary_start, is_space, literal, optional_space, space};
use super::term::{empty_term, term};
use super::{Parser, DEFINITION_SEPARATORS};

/// parse definitions separated by `|`, `/` or `!`
///
/// A `/` followed by `)` is not a separator but the closer of an enclosing
/// `(/ ... /)` repeat. It is consumed and handed back to the caller instead
/// of being attached.
pub(super) fn definition_list<S: Source>(
    p: &mut Parser<S>,
    parent: NodeId,
) -> ParseResult<(NodeId, Option<DetachedLiteral>)> {
    log::trace!("definition list at {}", p.position());
    let list = p.start_node(parent, NodeKind::DefinitionList);

    loop {
        optional_space(p, list)?;
        definition(p, list)?;
        optional_space(p, list)?;
        p.finish_before_lookahead(list);

        match p.current() {
            Some('/') => {
                let start = p.position();
                p.advance_no_eof("definition list not terminated")?;

                if p.current() == Some(')') {
                    let closer = DetachedLiteral::new("/)", Span::new(start, p.position()));
                    p.tree.set_end(list, start.before());
                    p.advance()?;
                    return Ok((list, Some(closer)));
                }
                p.attach_literal(list, DetachedLiteral::new("/", Span::point(start)));
            }
            Some(c) if DEFINITION_SEPARATORS.iter().any(|sep| sep.starts_with(c)) => {
                literal(p, list, DEFINITION_SEPARATORS)?;
            }
            _ => break,
        }
    }

    Ok((list, None))
}

/// parse terms separated by `,`
///
/// A missing term, before a `,` or at the end, becomes an empty term.
pub(super) fn definition<S: Source>(p: &mut Parser<S>, parent: NodeId) -> ParseResult<NodeId> {
    let definition = p.start_node(parent, NodeKind::Definition);
    let start = p.position();

    let mut pending: Option<NodeId> = None;
    loop {
        let Some(c) = p.current() else {
            return Err(p.eof(format!("definition started at {start} not terminated")));
        };

        if is_space(c) {
            space(p, definition)?;
        } else if is_digit(c) || is_primary_start(c) {
            if let Some(previous) = pending {
                let term_start = p.tree[previous].span().start;
                return Err(p.fail(ErrorKind::UndelimitedTerm {
                    term: previous,
                    term_start,
                }));
            }
            pending = Some(term(p, definition)?);
        } else if c == ',' {
            if pending.is_none() {
                empty_term(p, definition);
            }
            literal(p, definition, &[","])?;
            pending = None;
        } else {
            break;
        }
    }

    if pending.is_none() {
        empty_term(p, definition);
    }
    p.finish_before_lookahead(definition);

    Ok(definition)
}
