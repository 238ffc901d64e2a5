//! The filter grammar (spec §4.2):
//!
//! ```text
//! Filter      := OrExpr
//! OrExpr      := AndExpr ( "or" AndExpr )*
//! AndExpr     := NotExpr ( "and" NotExpr )*
//! NotExpr     := "not" "(" Filter ")"          -- does not bind a term
//!              | Primary
//! Primary     := "(" Filter ")"
//!              | Path "[" Filter "]"          -- ComplexValue
//!              | Path "pr"                     -- Present
//!              | Path CompOp Value             -- Comparison
//!              | Path                          -- error (path-without-op)
//! ```
//!
//! `and` binds tighter than `or`; `not` binds tighter still and is not
//! folded across consecutive applications (`not (not (X))` parses to two
//! distinct `Not` nodes, never collapsed to `X`). `And`/`Or` constructors
//! flatten a chain of same-keyword siblings into one node with >=2 children
//! rather than nesting binary pairs, matching the AST invariant in spec §3.

use crate::ast::Filter;
use crate::error::{ParseError, ParseErrorKind, ParseResult};
use crate::lexer::TokenKind;
use crate::literal::Literal;

use super::{path, value, Parser};

/// Parses a complete filter string (the `parseFilter` library entry point,
/// spec §6).
pub fn parse_filter(source: &str) -> ParseResult<Filter> {
    tracing::debug!(len = source.len(), "parse_filter: start");
    let mut parser = match Parser::new(source) {
        Ok(p) => p,
        Err(e) => {
            tracing::warn!(kind = ?e.kind, "parse_filter: lexer error");
            return Err(e);
        }
    };

    if matches!(parser.current().kind, TokenKind::End) {
        let err = ParseError::new(ParseErrorKind::UnexpectedEnd, parser.current().offset, "empty filter string");
        tracing::warn!(kind = ?err.kind, "parse_filter: error");
        return Err(err);
    }

    match parse_filter_expr(&mut parser).and_then(|f| {
        parser.expect_end()?;
        Ok(f)
    }) {
        Ok(f) => {
            tracing::debug!("parse_filter: ok");
            Ok(f)
        }
        Err(e) => {
            tracing::warn!(kind = ?e.kind, offset = e.offset, "parse_filter: error");
            Err(e)
        }
    }
}

/// Parses one `Filter` from the shared token stream; used at the top level
/// and recursively for `not (...)`, `(...)`, and value-filter brackets.
pub(super) fn parse_filter_expr(p: &mut Parser) -> ParseResult<Filter> {
    parse_or(p)
}

fn parse_or(p: &mut Parser) -> ParseResult<Filter> {
    let mut children = vec![parse_and(p)?];
    while p.eat_keyword("or") {
        children.push(parse_and(p)?);
    }
    Ok(if children.len() == 1 { children.pop().unwrap() } else { Filter::Or(children) })
}

fn parse_and(p: &mut Parser) -> ParseResult<Filter> {
    let mut children = vec![parse_not(p)?];
    while p.eat_keyword("and") {
        children.push(parse_not(p)?);
    }
    Ok(if children.len() == 1 { children.pop().unwrap() } else { Filter::And(children) })
}

fn parse_not(p: &mut Parser) -> ParseResult<Filter> {
    if p.eat_keyword("not") {
        p.expect_lparen()?;
        let inner = parse_or(p)?;
        p.expect_rparen()?;
        return Ok(Filter::Not(Box::new(inner)));
    }
    parse_primary(p)
}

const COMPARISON_OPS: &[(&str, fn(crate::ast::Path, Literal) -> Filter)] = &[
    ("eq", Filter::Equal),
    ("ne", Filter::NotEqual),
    ("co", Filter::Contains),
    ("sw", Filter::StartsWith),
    ("ew", Filter::EndsWith),
    ("gt", Filter::GreaterThan),
    ("ge", Filter::GreaterOrEqual),
    ("lt", Filter::LessThan),
    ("le", Filter::LessOrEqual),
];

fn parse_primary(p: &mut Parser) -> ParseResult<Filter> {
    if matches!(p.current().kind, TokenKind::LParen) {
        p.bump()?;
        let inner = parse_or(p)?;
        p.expect_rparen()?;
        return Ok(inner);
    }

    let (attr_path, pending_complex) = path::parse_path_for_primary(p)?;

    if let Some(inner) = pending_complex {
        return Ok(Filter::ComplexValue(attr_path, Box::new(inner)));
    }

    if p.eat_keyword("pr") {
        return Ok(Filter::Present(attr_path));
    }

    if let Some(&(name, ctor)) = COMPARISON_OPS.iter().find(|(name, _)| p.peek_keyword(name)) {
        p.eat_keyword(name);
        let val = value::parse_value(p)?;
        return Ok(ctor(attr_path, val));
    }

    let offset = p.current().offset;
    match p.current().kind {
        TokenKind::End => Err(ParseError::new(
            ParseErrorKind::UnexpectedEnd,
            offset,
            "expected an operator ('pr', a comparison, or '[') after attribute path",
        )),
        _ => Err(ParseError::new(
            ParseErrorKind::MissingOperator,
            offset,
            "expected an operator ('pr', a comparison, or '[') after attribute path",
        )),
    }
}
