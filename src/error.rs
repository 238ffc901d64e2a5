//! Error types for the filter and path subsystem.
//!
//! Two domains, per the RFC 7644 §3.4.2.2 core: [`ParseError`] from the
//! lexer, the filter parser, and the path parser; [`FilterError`] from the
//! evaluator. Neither is ever raised by the other's side of the library.

use std::fmt;

/// What went wrong while lexing or parsing a filter or path string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    UnexpectedToken,
    UnexpectedEnd,
    UnterminatedString,
    InvalidEscape,
    InvalidNumber,
    InvalidPath,
    MissingOperator,
    BracketMismatch,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ParseErrorKind::UnexpectedToken => "unexpected token",
            ParseErrorKind::UnexpectedEnd => "unexpected end of input",
            ParseErrorKind::UnterminatedString => "unterminated string",
            ParseErrorKind::InvalidEscape => "invalid escape sequence",
            ParseErrorKind::InvalidNumber => "invalid number",
            ParseErrorKind::InvalidPath => "invalid attribute path",
            ParseErrorKind::MissingOperator => "missing operator",
            ParseErrorKind::BracketMismatch => "mismatched bracket",
        };
        write!(f, "{}", s)
    }
}

/// Raised only by [`crate::parse_filter`] and [`crate::parse_path`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    /// 0-indexed character offset into the source string.
    pub offset: usize,
    pub message: String,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, offset: usize, message: impl Into<String>) -> Self {
        Self {
            kind,
            offset,
            message: message.into(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at offset {}: {}", self.kind, self.offset, self.message)
    }
}

impl std::error::Error for ParseError {}

pub type ParseResult<T> = Result<T, ParseError>;

/// What went wrong while evaluating a filter against a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterErrorKind {
    /// `gt`/`ge`/`lt`/`le` applied to a located value that isn't a String or Number.
    InvalidComparison,
    /// The evaluator recursed past the configured depth bound.
    TooDeep,
    /// The value locator could not make sense of a path against the resource.
    PathResolution,
}

impl fmt::Display for FilterErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FilterErrorKind::InvalidComparison => "invalid comparison",
            FilterErrorKind::TooDeep => "filter nesting too deep",
            FilterErrorKind::PathResolution => "path resolution error",
        };
        write!(f, "{}", s)
    }
}

/// Raised only by [`crate::evaluate`] and [`crate::evaluate_with_config`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterError {
    pub kind: FilterErrorKind,
    pub message: String,
}

impl FilterError {
    pub fn new(kind: FilterErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for FilterError {}

pub type FilterResult<T> = Result<T, FilterError>;

/// Raised only by the [`crate::builder`] construction helpers.
///
/// Not one of the two error domains in RFC 7644 §3.4.2.2 itself — the
/// builders are a programmatic alternative to parsing, not parsing or
/// evaluation, so their failures (wrong arity, empty byte slices, ...) get
/// their own minimal type rather than overloading `ParseError`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuilderError {
    pub message: String,
}

impl BuilderError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for BuilderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid argument: {}", self.message)
    }
}

impl std::error::Error for BuilderError {}

pub type BuilderResult<T> = Result<T, BuilderError>;
