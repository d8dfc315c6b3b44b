use crate::cst::{NodeId, NodeKind, Primary, Span};
use crate::error::ErrorKind;
use crate::result::ParseResult;
use crate::source::Source;

use super::common::{is_digit, is_primary_start, is_space, literal, optional_space, space};
use super::primary::primary;
use super::Parser;

/// parse a term: an optional repetition, one primary and an optional
/// exception, in any order and separated by optional whitespace
///
/// A term without a primary gets an empty string.
pub(super) fn term<S: Source>(p: &mut Parser<S>, parent: NodeId) -> ParseResult<NodeId> {
    log::trace!("term at {}", p.position());
    let term = p.start_node(
        parent,
        NodeKind::Term {
            repetition: None,
            primary: None,
            exception: None,
        },
    );

    let mut repetition_of = None;
    let mut primary_of = None;
    let mut exception_of = None;

    loop {
        match p.current() {
            Some(c) if is_space(c) => {
                space(p, term)?;
            }
            Some(c) if is_digit(c) => {
                if let Some(held) = repetition_of {
                    let previous = p.tree[held].span().start;
                    return Err(p.fail(ErrorKind::MultipleTermRepetitions {
                        term,
                        repetition: held,
                        previous,
                    }));
                }
                repetition_of = Some(repetition(p, term)?);
            }
            Some('-') => {
                if let Some(held) = exception_of {
                    let previous = p.tree[held].span().start;
                    return Err(p.fail(ErrorKind::MultipleTermExceptions {
                        term,
                        exception: held,
                        previous,
                    }));
                }
                literal(p, term, &["-"])?;
                exception_of = Some(exception(p, term)?);
            }
            Some(c) if is_primary_start(c) => {
                if let Some(held) = primary_of {
                    let previous = p.tree[held].span().start;
                    return Err(p.fail(ErrorKind::MultipleTermPrimaries {
                        term,
                        primary: held,
                        previous,
                    }));
                }
                primary_of = Some(primary(p, term)?);
            }
            _ => break,
        }

        p.tree.set_kind(
            term,
            NodeKind::Term {
                repetition: repetition_of,
                primary: primary_of,
                exception: exception_of,
            },
        );
    }

    if primary_of.is_none() {
        let empty = empty_string(p, term);
        p.tree.set_kind(
            term,
            NodeKind::Term {
                repetition: repetition_of,
                primary: Some(empty),
                exception: exception_of,
            },
        );
    }
    p.finish_at_last_child(term);

    Ok(term)
}

/// parse the primary following a `-`
///
/// The `-` itself belongs to the owning term.
fn exception<S: Source>(p: &mut Parser<S>, term: NodeId) -> ParseResult<NodeId> {
    let exception = p.start_node(term, NodeKind::Exception { primary: None });

    let mut primary_of = None;
    loop {
        match p.current() {
            Some(c) if is_space(c) => {
                space(p, exception)?;
            }
            Some(c) if is_primary_start(c) => {
                if let Some(held) = primary_of {
                    let previous = p.tree[held].span().start;
                    return Err(p.fail(ErrorKind::MultipleTermPrimaries {
                        term,
                        primary: held,
                        previous,
                    }));
                }
                primary_of = Some(primary(p, exception)?);
                p.tree
                    .set_kind(exception, NodeKind::Exception { primary: primary_of });
            }
            _ => break,
        }
    }

    if primary_of.is_none() {
        let empty = empty_string(p, exception);
        p.tree
            .set_kind(exception, NodeKind::Exception { primary: Some(empty) });
    }
    p.finish_at_last_child(exception);

    Ok(exception)
}

/// parse a repetition count like `3 *`
fn repetition<S: Source>(p: &mut Parser<S>, parent: NodeId) -> ParseResult<NodeId> {
    let repetition = p.start_node(parent, NodeKind::Repetition);

    number(p, repetition)?;
    optional_space(p, repetition)?;
    literal(p, repetition, &["*"])?;
    p.finish_at_last_child(repetition);

    Ok(repetition)
}

fn number<S: Source>(p: &mut Parser<S>, parent: NodeId) -> ParseResult<NodeId> {
    let Some(first) = p.current().filter(|&c| is_digit(c)) else {
        return Err(p.unexpected("expected a number"));
    };

    let number = p.start_node(parent, NodeKind::Number);
    let mut c = first;
    loop {
        p.tree.push_char(number, c);
        let end = p.position();
        p.tree.set_end(number, end);
        p.advance()?;

        match p.current().filter(|&c| is_digit(c)) {
            Some(next) => c = next,
            None => break,
        }
    }

    Ok(number)
}

/// A zero-width term holding only an empty string.
pub(super) fn empty_term<S: Source>(p: &mut Parser<S>, parent: NodeId) -> NodeId {
    let term = p.start_node(
        parent,
        NodeKind::Term {
            repetition: None,
            primary: None,
            exception: None,
        },
    );
    p.finish_before_lookahead(term);

    let empty = empty_string(p, term);
    p.tree.set_kind(
        term,
        NodeKind::Term {
            repetition: None,
            primary: Some(empty),
            exception: None,
        },
    );
    term
}

/// A zero-width empty string right before the lookahead.
pub(super) fn empty_string<S: Source>(p: &mut Parser<S>, parent: NodeId) -> NodeId {
    let empty = p.start_node(parent, NodeKind::Primary(Primary::EmptyString));
    let span = Span::empty_at(p.position());
    p.tree.set_span(empty, span);
    empty
}
