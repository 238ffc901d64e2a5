//! Recursive-descent parsing (spec §4.2–§4.3): the filter grammar and the
//! path grammar share one token stream, because the filter grammar's
//! `Primary` production starts with a `Path` and the path grammar's
//! value-filter brackets recurse back into a full `Filter`. [`Parser`] is
//! the single-token-lookahead cursor both [`filter::parse_filter_expr`] and
//! [`path::parse_path_expr`] advance.

pub mod filter;
pub mod path;
mod value;

pub use filter::parse_filter;
pub use path::parse_path;

use crate::error::{ParseError, ParseErrorKind, ParseResult};
use crate::lexer::{Lexer, Token, TokenKind};

pub(crate) struct Parser {
    lexer: Lexer,
    current: Token,
}

impl Parser {
    fn new(source: &str) -> ParseResult<Self> {
        let mut lexer = Lexer::new(source);
        let current = lexer.next()?;
        Ok(Self { lexer, current })
    }

    fn current(&self) -> &Token {
        &self.current
    }

    fn bump(&mut self) -> ParseResult<Token> {
        let next = self.lexer.next()?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    fn expect_end(&mut self) -> ParseResult<()> {
        match self.current.kind {
            TokenKind::End => Ok(()),
            _ => Err(ParseError::new(
                ParseErrorKind::UnexpectedToken,
                self.current.offset,
                "trailing input after a complete filter",
            )),
        }
    }

    fn expect_lparen(&mut self) -> ParseResult<()> {
        match self.current.kind {
            TokenKind::LParen => {
                self.bump()?;
                Ok(())
            }
            _ => Err(ParseError::new(ParseErrorKind::UnexpectedToken, self.current.offset, "expected '('")),
        }
    }

    fn expect_rparen(&mut self) -> ParseResult<()> {
        match self.current.kind {
            TokenKind::RParen => {
                self.bump()?;
                Ok(())
            }
            _ => Err(ParseError::new(ParseErrorKind::BracketMismatch, self.current.offset, "expected ')'")),
        }
    }

    fn expect_rbracket(&mut self) -> ParseResult<()> {
        match self.current.kind {
            TokenKind::RBracket => {
                self.bump()?;
                Ok(())
            }
            _ => Err(ParseError::new(ParseErrorKind::BracketMismatch, self.current.offset, "expected ']'")),
        }
    }

    fn eat_lbracket(&mut self) -> bool {
        if matches!(self.current.kind, TokenKind::LBracket) {
            let _ = self.bump();
            true
        } else {
            false
        }
    }

    fn eat_dot(&mut self) -> bool {
        if matches!(self.current.kind, TokenKind::Dot) {
            let _ = self.bump();
            true
        } else {
            false
        }
    }

    /// Consumes the current token if it's a `Word` matching `kw`
    /// case-insensitively (spec §4.1: keywords recognized case-insensitively
    /// after tokenization).
    fn eat_keyword(&mut self, kw: &str) -> bool {
        if let TokenKind::Word(w) = &self.current.kind {
            if w.eq_ignore_ascii_case(kw) {
                let _ = self.bump();
                return true;
            }
        }
        false
    }

    /// Peeks whether the current token is a `Word` matching `kw`
    /// case-insensitively, without consuming it.
    fn peek_keyword(&self, kw: &str) -> bool {
        matches!(&self.current.kind, TokenKind::Word(w) if w.eq_ignore_ascii_case(kw))
    }

    fn expect_word_raw(&mut self) -> ParseResult<String> {
        match &self.current.kind {
            TokenKind::Word(w) => {
                let w = w.clone();
                self.bump()?;
                Ok(w)
            }
            _ => Err(ParseError::new(
                ParseErrorKind::InvalidPath,
                self.current.offset,
                "expected an attribute path",
            )),
        }
    }
}
