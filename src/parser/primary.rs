use crate::cst::{NodeId, NodeKind, Position, Primary, Span};
use crate::error::{DetachedLiteral, ErrorKind};
use crate::result::ParseResult;
use crate::source::Source;

use super::common::{is_digit, is_letter, is_space, literal, optional_space, quote_literal};
use super::definition::definition_list;
use super::{Parser, PRIMARY_START_SYMBOLS};

/// dispatch on the lookahead to the matching primary
///
/// `(` needs a second character: `(/` opens a repeat, `(:` an option and
/// anything else a group.
pub(super) fn primary<S: Source>(p: &mut Parser<S>, parent: NodeId) -> ParseResult<NodeId> {
    log::trace!("primary at {}", p.position());
    match p.current() {
        Some(c) if is_letter(c) => identifier(p, parent).map(|(identifier, _)| identifier),
        Some(c) if quote_literal(c).is_some() => terminal(p, parent),
        Some('{') => repeat(p, parent, None),
        Some('[') => option(p, parent, None),
        Some('?') => special(p, parent),
        Some('(') => {
            let start = p.position();
            p.advance_no_eof("reading primary")?;

            match p.current() {
                Some('/') => {
                    let opener = DetachedLiteral::new("(/", Span::new(start, p.position()));
                    p.advance()?;
                    repeat(p, parent, Some(opener))
                }
                Some(':') => {
                    let opener = DetachedLiteral::new("(:", Span::new(start, p.position()));
                    p.advance()?;
                    option(p, parent, Some(opener))
                }
                _ => group(p, parent, Some(DetachedLiteral::new("(", Span::point(start)))),
            }
        }
        _ => Err(p.unexpected(format!(
            "expected a letter or one of {PRIMARY_START_SYMBOLS:?}"
        ))),
    }
}

/// parse an identifier like `digit` or `binary digit`
///
/// Whitespace between letters and digits belongs to the identifier. A
/// trailing whitespace run is split off into a `Space` sibling, returned
/// alongside.
pub(super) fn identifier<S: Source>(
    p: &mut Parser<S>,
    parent: NodeId,
) -> ParseResult<(NodeId, Option<NodeId>)> {
    let Some(first) = p.current().filter(|&c| is_letter(c)) else {
        return Err(p.unexpected("expected a letter"));
    };

    let identifier = p.start_node(parent, NodeKind::Primary(Primary::Identifier));
    p.tree.push_char(identifier, first);
    let end = p.position();
    p.tree.set_end(identifier, end);
    p.advance()?;

    let mut trailing: Option<(Position, Position)> = None;
    while let Some(c) = p
        .current()
        .filter(|&c| is_letter(c) || is_digit(c) || is_space(c))
    {
        let here = p.position();
        if is_space(c) {
            let start = trailing.map_or(here, |(start, _)| start);
            trailing = Some((start, here));
        } else {
            trailing = None;
            p.tree.set_end(identifier, here);
        }

        p.tree.push_char(identifier, c);
        p.advance()?;
    }

    let Some((start, end)) = trailing else {
        return Ok((identifier, None));
    };

    let data = &mut p.tree.node_mut(identifier).data;
    let kept = data.trim_end().len();
    let tail = data.split_off(kept);

    let space = p.tree.add_child(parent, NodeKind::Space, start);
    p.tree.set_end(space, end);
    p.tree.set_data(space, tail);

    Ok((identifier, Some(space)))
}

/// parse a terminal like `'text'`, `"text"` or `` `text` ``
fn terminal<S: Source>(p: &mut Parser<S>, parent: NodeId) -> ParseResult<NodeId> {
    let Some(quote) = p.current().and_then(quote_literal) else {
        return Err(p.unexpected("expected a quote character"));
    };

    let terminal = p.start_node(parent, NodeKind::Primary(Primary::Terminal));
    literal(p, terminal, &[quote])?;

    let text = p.start_node(terminal, NodeKind::Text);
    loop {
        match p.current() {
            Some(c) if quote.starts_with(c) => break,
            Some(c) => p.tree.push_char(text, c),
            None => return Err(p.eof("reading terminal")),
        }
        p.advance_no_eof("reading terminal")?;
    }
    p.finish_before_lookahead(text);

    let closing = literal(p, terminal, &[quote])?;
    let end = p.tree[closing].span().end;
    p.tree.set_end(terminal, end);

    Ok(terminal)
}

/// parse a special sequence like `? any character ?`
fn special<S: Source>(p: &mut Parser<S>, parent: NodeId) -> ParseResult<NodeId> {
    let special = p.start_node(parent, NodeKind::Primary(Primary::Special));
    literal(p, special, &["?"])?;

    let text = p.start_node(special, NodeKind::Text);
    loop {
        match p.current() {
            Some('?') => break,
            Some(c) => p.tree.push_char(text, c),
            None => return Err(p.eof("reading special")),
        }
        p.advance_no_eof("reading special")?;
    }
    p.finish_before_lookahead(text);

    let closing = literal(p, special, &["?"])?;
    let end = p.tree[closing].span().end;
    p.tree.set_end(special, end);

    Ok(special)
}

/// Attaches the opening bracket of `node`, matching one of `candidates`
/// unless the caller already consumed it as `opener`.
fn open_bracket<S: Source>(
    p: &mut Parser<S>,
    node: NodeId,
    opener: Option<DetachedLiteral>,
    candidates: &[&'static str],
) -> ParseResult<NodeId> {
    match opener {
        Some(opener) => {
            p.tree.set_start(node, opener.span.start);
            Ok(p.attach_literal(node, opener))
        }
        None => literal(p, node, candidates),
    }
}

/// parse a repeat like `{ definitions }` or `(/ definitions /)`
fn repeat<S: Source>(
    p: &mut Parser<S>,
    parent: NodeId,
    opener: Option<DetachedLiteral>,
) -> ParseResult<NodeId> {
    p.enter()?;
    let repeat = p.start_node(parent, NodeKind::Primary(Primary::Repeat { lit: None }));

    let lit = open_bracket(p, repeat, opener, &["{", "(/"])?;
    p.tree
        .set_kind(repeat, NodeKind::Primary(Primary::Repeat { lit: Some(lit) }));
    optional_space(p, repeat)?;

    let (_, closer) = definition_list(p, repeat)?;
    let closing = match closer {
        Some(closer) => p.attach_literal(repeat, closer),
        None => literal(p, repeat, &["}"])?,
    };
    let end = p.tree[closing].span().end;
    p.tree.set_end(repeat, end);

    p.leave();
    Ok(repeat)
}

/// parse an option like `[ definitions ]` or `(: definitions :)`
fn option<S: Source>(
    p: &mut Parser<S>,
    parent: NodeId,
    opener: Option<DetachedLiteral>,
) -> ParseResult<NodeId> {
    p.enter()?;
    let option = p.start_node(parent, NodeKind::Primary(Primary::Option { lit: None }));

    let lit = open_bracket(p, option, opener, &["(:", "["])?;
    p.tree
        .set_kind(option, NodeKind::Primary(Primary::Option { lit: Some(lit) }));
    optional_space(p, option)?;

    let (_, closer) = definition_list(p, option)?;
    if let Some(literal) = closer {
        return Err(p.fail(ErrorKind::UnexpectedLiteral { literal }));
    }

    let closing = literal(p, option, &["]", ":)"])?;
    let end = p.tree[closing].span().end;
    p.tree.set_end(option, end);

    p.leave();
    Ok(option)
}

/// parse a group like `( definitions )`
fn group<S: Source>(
    p: &mut Parser<S>,
    parent: NodeId,
    opener: Option<DetachedLiteral>,
) -> ParseResult<NodeId> {
    p.enter()?;
    let group = p.start_node(parent, NodeKind::Primary(Primary::Group { lit: None }));

    let lit = open_bracket(p, group, opener, &["("])?;
    p.tree
        .set_kind(group, NodeKind::Primary(Primary::Group { lit: Some(lit) }));
    optional_space(p, group)?;

    let (_, closer) = definition_list(p, group)?;
    if let Some(literal) = closer {
        return Err(p.fail(ErrorKind::UnexpectedLiteral { literal }));
    }

    let closing = literal(p, group, &[")"])?;
    let end = p.tree[closing].span().end;
    p.tree.set_end(group, end);

    p.leave();
    Ok(group)
}
