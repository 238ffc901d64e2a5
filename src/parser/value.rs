//! The `Value` production (spec §4.2): `String | Number | Bool | Null`,
//! read off the current token and turned into a [`Literal`]. Comparison
//! filters never carry an Array or Object literal — the grammar has no
//! production for either, so there's nothing to reject here.

use crate::error::{ParseError, ParseErrorKind, ParseResult};
use crate::lexer::{NumberLiteral, TokenKind};
use crate::literal::Literal;

use super::Parser;

pub(super) fn parse_value(p: &mut Parser) -> ParseResult<Literal> {
    let tok = p.current().clone();
    let literal = match tok.kind {
        TokenKind::String(s) => Literal::String(s),
        TokenKind::Number(NumberLiteral::Int(i)) => Literal::Int(i),
        TokenKind::Number(NumberLiteral::Float(f)) => Literal::Float(f),
        TokenKind::Bool(b) => Literal::Bool(b),
        TokenKind::Null => Literal::Null,
        _ => {
            return Err(ParseError::new(
                ParseErrorKind::UnexpectedToken,
                tok.offset,
                "expected a comparison value (string, number, boolean, or null)",
            ))
        }
    };
    p.bump()?;
    Ok(literal)
}
