//! Tokenizer for SCIM filter strings (spec §4.1).
//!
//! The lexer is a thin, synchronous pass: it does not know about keyword
//! semantics (that's the parser's job, applied case-insensitively to `Word`
//! tokens) — it only knows how to carve the source into `LParen`/`RParen`/
//! `LBracket`/`RBracket`/`Word`/`String`/`Number`/`Bool`/`Null`/`End` tokens
//! and report the character offset of anything it can't make sense of.

use crate::error::{ParseError, ParseErrorKind, ParseResult};

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    LParen,
    RParen,
    LBracket,
    RBracket,
    /// A bare `.` that was not absorbed into a preceding `Word` — only
    /// possible right after a `]`, since `Word` otherwise swallows internal
    /// dots itself (spec §4.3's path grammar relies on this to chain a
    /// sub-attribute onto a value-filtered element, e.g. `emails[...].value`).
    Dot,
    Word(String),
    String(String),
    Number(NumberLiteral),
    Bool(bool),
    Null,
    End,
}

/// A lexed number, still tagged integer/float so the parser can build the
/// right [`crate::literal::Literal`] variant without re-inspecting the text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumberLiteral {
    Int(i64),
    Float(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// 0-indexed character offset of the token's first character.
    pub offset: usize,
}

/// A lazy-ish tokenizer: tokens are produced on demand by [`Lexer::next`],
/// but since filters are short, the whole source is held as a `Vec<char>`
/// up front rather than streamed byte-by-byte.
pub struct Lexer {
    chars: Vec<char>,
    pos: usize,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(' ') | Some('\t') | Some('\r') | Some('\n')) {
            self.pos += 1;
        }
    }

    /// Returns the next token, always ending with [`TokenKind::End`] (which
    /// it will keep returning on repeated calls at end-of-input).
    pub fn next(&mut self) -> ParseResult<Token> {
        self.skip_whitespace();
        let start = self.pos;
        let Some(c) = self.peek() else {
            return Ok(Token {
                kind: TokenKind::End,
                offset: start,
            });
        };

        tracing::trace!(offset = start, char = %c, "lexer: token start");

        match c {
            '(' => {
                self.bump();
                Ok(Token { kind: TokenKind::LParen, offset: start })
            }
            ')' => {
                self.bump();
                Ok(Token { kind: TokenKind::RParen, offset: start })
            }
            '[' => {
                self.bump();
                Ok(Token { kind: TokenKind::LBracket, offset: start })
            }
            ']' => {
                self.bump();
                Ok(Token { kind: TokenKind::RBracket, offset: start })
            }
            '.' => {
                self.bump();
                Ok(Token { kind: TokenKind::Dot, offset: start })
            }
            '"' => self.lex_string(start),
            c if c.is_ascii_digit() || ((c == '-' || c == '+') && self.peek_at(1).is_some_and(|n| n.is_ascii_digit())) => {
                self.lex_number(start)
            }
            c if c.is_ascii_alphabetic() || c == '_' => self.lex_word(start),
            other => Err(ParseError::new(
                ParseErrorKind::UnexpectedToken,
                start,
                format!("unexpected character '{}'", other),
            )),
        }
    }

    fn lex_word(&mut self, start: usize) -> ParseResult<Token> {
        let mut s = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | ':' | '.' | '/' | '$') {
                s.push(c);
                self.pos += 1;
            } else {
                break;
            }
        }
        let kind = match s.to_ascii_lowercase().as_str() {
            "true" => TokenKind::Bool(true),
            "false" => TokenKind::Bool(false),
            "null" => TokenKind::Null,
            _ => TokenKind::Word(s),
        };
        Ok(Token { kind, offset: start })
    }

    fn lex_number(&mut self, start: usize) -> ParseResult<Token> {
        let mut s = String::new();
        if matches!(self.peek(), Some('+') | Some('-')) {
            s.push(self.bump().unwrap());
        }
        let mut is_float = false;
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                s.push(c);
                self.pos += 1;
            } else if c == '.' && self.peek_at(1).is_some_and(|n| n.is_ascii_digit()) {
                is_float = true;
                s.push(c);
                self.pos += 1;
            } else if (c == 'e' || c == 'E') && !s.is_empty() {
                is_float = true;
                s.push(c);
                self.pos += 1;
                if matches!(self.peek(), Some('+') | Some('-')) {
                    s.push(self.bump().unwrap());
                }
            } else {
                break;
            }
        }
        if is_float {
            s.parse::<f64>()
                .map(|f| Token { kind: TokenKind::Number(NumberLiteral::Float(f)), offset: start })
                .map_err(|e| ParseError::new(ParseErrorKind::InvalidNumber, start, e.to_string()))
        } else {
            s.parse::<i64>()
                .map(|i| Token { kind: TokenKind::Number(NumberLiteral::Int(i)), offset: start })
                .map_err(|e| ParseError::new(ParseErrorKind::InvalidNumber, start, e.to_string()))
        }
    }

    fn lex_string(&mut self, start: usize) -> ParseResult<Token> {
        self.bump(); // opening quote
        let mut s = String::new();
        loop {
            match self.bump() {
                None => {
                    return Err(ParseError::new(
                        ParseErrorKind::UnterminatedString,
                        start,
                        "unterminated string literal",
                    ))
                }
                Some('"') => break,
                Some('\\') => {
                    let esc_offset = self.pos - 1;
                    match self.bump() {
                        Some('"') => s.push('"'),
                        Some('\\') => s.push('\\'),
                        Some('/') => s.push('/'),
                        Some('b') => s.push('\u{8}'),
                        Some('f') => s.push('\u{c}'),
                        Some('n') => s.push('\n'),
                        Some('r') => s.push('\r'),
                        Some('t') => s.push('\t'),
                        Some('u') => {
                            let mut hex = String::with_capacity(4);
                            for _ in 0..4 {
                                match self.bump() {
                                    Some(h) if h.is_ascii_hexdigit() => hex.push(h),
                                    _ => {
                                        return Err(ParseError::new(
                                            ParseErrorKind::InvalidEscape,
                                            esc_offset,
                                            "invalid \\u escape",
                                        ))
                                    }
                                }
                            }
                            let code = u32::from_str_radix(&hex, 16).map_err(|e| {
                                ParseError::new(ParseErrorKind::InvalidEscape, esc_offset, e.to_string())
                            })?;
                            match char::from_u32(code) {
                                Some(c) => s.push(c),
                                None => {
                                    return Err(ParseError::new(
                                        ParseErrorKind::InvalidEscape,
                                        esc_offset,
                                        "invalid unicode code point",
                                    ))
                                }
                            }
                        }
                        _ => {
                            return Err(ParseError::new(
                                ParseErrorKind::InvalidEscape,
                                esc_offset,
                                "invalid escape sequence",
                            ))
                        }
                    }
                }
                Some(c) => s.push(c),
            }
        }
        Ok(Token { kind: TokenKind::String(s), offset: start })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(src: &str) -> Vec<TokenKind> {
        let mut lexer = Lexer::new(src);
        let mut out = Vec::new();
        loop {
            let t = lexer.next().unwrap();
            let end = t.kind == TokenKind::End;
            out.push(t.kind);
            if end {
                break;
            }
        }
        out
    }

    #[test]
    fn lexes_simple_comparison() {
        assert_eq!(
            tokens(r#"userName eq "alice""#),
            vec![
                TokenKind::Word("userName".into()),
                TokenKind::Word("eq".into()),
                TokenKind::String("alice".into()),
                TokenKind::End,
            ]
        );
    }

    #[test]
    fn lexes_keywords_case_insensitively_as_words() {
        assert_eq!(tokens("AND"), vec![TokenKind::Word("AND".into()), TokenKind::End]);
    }

    #[test]
    fn lexes_booleans_and_null_case_insensitively() {
        assert_eq!(tokens("TRUE False NULL"), vec![TokenKind::Bool(true), TokenKind::Bool(false), TokenKind::Null, TokenKind::End]);
    }

    #[test]
    fn lexes_negative_and_float_numbers() {
        assert_eq!(
            tokens("-5 3.25 1e10"),
            vec![
                TokenKind::Number(NumberLiteral::Int(-5)),
                TokenKind::Number(NumberLiteral::Float(3.25)),
                TokenKind::Number(NumberLiteral::Float(1e10)),
                TokenKind::End,
            ]
        );
    }

    #[test]
    fn lexes_brackets_and_parens() {
        assert_eq!(
            tokens("([])"),
            vec![TokenKind::LParen, TokenKind::LBracket, TokenKind::RBracket, TokenKind::RParen, TokenKind::End]
        );
    }

    #[test]
    fn string_escape_sequences() {
        assert_eq!(
            tokens(r#""a\"b\nA""#),
            vec![TokenKind::String("a\"b\nA".into()), TokenKind::End]
        );
    }

    #[test]
    fn unterminated_string_reports_offset() {
        let mut lexer = Lexer::new(r#"userName eq "alice"#);
        lexer.next().unwrap();
        lexer.next().unwrap();
        let err = lexer.next().unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnterminatedString);
        assert_eq!(err.offset, 12);
    }

    #[test]
    fn invalid_escape_reports_offset() {
        let mut lexer = Lexer::new(r#""a\qb""#);
        let err = lexer.next().unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidEscape);
        assert_eq!(err.offset, 2);
    }

    #[test]
    fn word_includes_path_punctuation() {
        assert_eq!(
            tokens("urn:ietf:params:scim:schemas:core:2.0:User:userName"),
            vec![TokenKind::Word("urn:ietf:params:scim:schemas:core:2.0:User:userName".into()), TokenKind::End]
        );
    }
}
