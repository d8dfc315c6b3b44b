use crate::cst::{NodeId, NodeKind, Position, Span};
use crate::error::DetachedLiteral;
use crate::result::ParseResult;
use crate::source::Source;

use super::common::literal;
use super::Parser;

const UNTERMINATED: &str = "comment not terminated";

/// parse comment like `(* text (* nested *) text *)`
///
/// `opener` is the `(*` of a nested comment, already consumed by the
/// enclosing one.
pub(super) fn comment<S: Source>(
    p: &mut Parser<S>,
    parent: NodeId,
    opener: Option<DetachedLiteral>,
) -> ParseResult<NodeId> {
    log::trace!("comment at {}", p.position());
    p.enter()?;

    let comment = p.start_node(parent, NodeKind::Comment);
    match opener {
        Some(opener) => {
            p.tree.set_start(comment, opener.span.start);
            p.attach_literal(comment, opener);
        }
        None => {
            literal(p, comment, &["(*"])?;
        }
    }

    let mut text = None;
    loop {
        let Some(c) = p.current() else {
            return Err(p.eof(UNTERMINATED));
        };

        if c != '*' && c != '(' {
            let here = p.position();
            let run = text_run(p, comment, &mut text, here);
            p.tree.push_char(run, c);
            p.tree.set_end(run, here);
            p.advance_no_eof(UNTERMINATED)?;
            continue;
        }

        let start = p.position();
        p.advance_no_eof(UNTERMINATED)?;
        let span = Span::new(start, p.position());

        match (c, p.current()) {
            ('*', Some(')')) => {
                p.attach_literal(comment, DetachedLiteral::new("*)", span));
                break;
            }
            ('(', Some('*')) => {
                p.advance_no_eof(UNTERMINATED)?;
                self::comment(p, comment, Some(DetachedLiteral::new("(*", span)))?;
                text = None;
            }
            _ => {
                // A lone `*` or `(`; the lookahead is examined on the next turn.
                let run = text_run(p, comment, &mut text, start);
                p.tree.push_char(run, c);
                p.tree.set_end(run, start);
            }
        }
    }

    let end = p.position();
    p.tree.set_end(comment, end);
    p.advance()?;

    p.leave();
    Ok(comment)
}

/// The open text run of `comment`, started at `start` if there is none.
fn text_run<S: Source>(
    p: &mut Parser<S>,
    comment: NodeId,
    text: &mut Option<NodeId>,
    start: Position,
) -> NodeId {
    *text.get_or_insert_with(|| p.tree.add_child(comment, NodeKind::Text, start))
}
