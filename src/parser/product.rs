use crate::cst::{NodeId, NodeKind, Position, Span};
use crate::error::ErrorKind;
use crate::result::ParseResult;
use crate::source::Source;

use super::comment::comment;
use super::common::{is_letter, is_space, literal, optional_space, space};
use super::definition::definition_list;
use super::primary::identifier;
use super::{Parser, PRODUCT_TERMINATORS};

/// parse a grammar: a sequence of comments, products and whitespace
pub(super) fn root<S: Source>(p: &mut Parser<S>) -> ParseResult<()> {
    let root = p.tree.root();
    if p.current().is_none() {
        let first = Position::new(1, 1);
        p.tree.set_span(root, Span::empty_at(first));
        return Ok(());
    }

    let start = p.position();
    p.tree.set_start(root, start);

    while let Some(c) = p.current() {
        if c == '(' {
            comment(p, root, None)?;
        } else if is_letter(c) {
            product(p, root)?;
        } else if is_space(c) {
            space(p, root)?;
        } else {
            return Err(p.unexpected("expected a letter, white space or a `(*` literal"));
        }
    }

    let end = p.position();
    p.tree.set_end(root, end);
    Ok(())
}

/// parse a rule like `name = definitions ;`
pub(super) fn product<S: Source>(p: &mut Parser<S>, parent: NodeId) -> ParseResult<NodeId> {
    log::trace!("product at {}", p.position());
    if !p.at(is_letter) {
        return Err(p.unexpected("expected a letter"));
    }

    let product = p.start_node(
        parent,
        NodeKind::Product {
            lhs: None,
            rhs: None,
        },
    );

    let (lhs, _) = identifier(p, product)?;
    p.tree.set_kind(
        product,
        NodeKind::Product {
            lhs: Some(lhs),
            rhs: None,
        },
    );

    if p.current() != Some('=') {
        return Err(p.unexpected("expected `=`"));
    }
    literal(p, product, &["="])?;
    optional_space(p, product)?;

    let (rhs, closer) = definition_list(p, product)?;
    p.tree.set_kind(
        product,
        NodeKind::Product {
            lhs: Some(lhs),
            rhs: Some(rhs),
        },
    );
    if let Some(literal) = closer {
        return Err(p.fail(ErrorKind::UnexpectedLiteral { literal }));
    }

    let terminator = literal(p, product, PRODUCT_TERMINATORS)?;
    let end = p.tree[terminator].span().end;
    p.tree.set_end(product, end);

    Ok(product)
}
