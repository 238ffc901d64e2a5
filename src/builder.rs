//! The Builder API (spec §4.7): a non-parsing construction surface that
//! mirrors the filter grammar's operators directly as functions, for
//! callers that already have a path and a value in hand and would rather
//! not round-trip through filter text.
//!
//! `eq`/`ne`/`co`/`sw`/`ew`/`gt`/`ge`/`lt`/`le`/`pr`/`not`/`complex` build a
//! `Filter` unconditionally — there's no arity to get wrong. `and`/`or`
//! require at least two children, matching the AST invariant that a
//! combining node is never built with fewer (§3), and return
//! `BuilderError::invalid_argument` otherwise.

use crate::ast::{Filter, Path};
use crate::error::{BuilderError, BuilderResult};
use crate::literal::Literal;

/// Normalizes a builder-supplied value to a comparison [`Literal`].
///
/// Timestamps normalize to ISO-8601 text (§4.7) so the evaluator's
/// date-heuristic in §4.6.3 treats them the same as a parsed filter's
/// string literal.
pub trait IntoLiteral {
    fn into_literal(self) -> Literal;
}

impl IntoLiteral for Literal {
    fn into_literal(self) -> Literal {
        self
    }
}

impl IntoLiteral for bool {
    fn into_literal(self) -> Literal {
        Literal::Bool(self)
    }
}

impl IntoLiteral for i64 {
    fn into_literal(self) -> Literal {
        Literal::Int(self)
    }
}

impl IntoLiteral for i32 {
    fn into_literal(self) -> Literal {
        Literal::Int(self as i64)
    }
}

impl IntoLiteral for u32 {
    fn into_literal(self) -> Literal {
        Literal::Int(self as i64)
    }
}

impl IntoLiteral for f64 {
    fn into_literal(self) -> Literal {
        Literal::Float(self)
    }
}

impl IntoLiteral for String {
    fn into_literal(self) -> Literal {
        Literal::String(self)
    }
}

impl IntoLiteral for &str {
    fn into_literal(self) -> Literal {
        Literal::String(self.to_string())
    }
}

impl IntoLiteral for Vec<u8> {
    fn into_literal(self) -> Literal {
        Literal::Binary(self)
    }
}

impl IntoLiteral for &[u8] {
    fn into_literal(self) -> Literal {
        Literal::Binary(self.to_vec())
    }
}

/// A timestamp, normalized to RFC 3339 text on construction (§4.7).
pub struct Timestamp(chrono::DateTime<chrono::FixedOffset>);

impl Timestamp {
    pub fn new(dt: chrono::DateTime<chrono::FixedOffset>) -> Self {
        Self(dt)
    }
}

impl IntoLiteral for Timestamp {
    fn into_literal(self) -> Literal {
        Literal::String(self.0.to_rfc3339())
    }
}

pub fn eq(path: Path, value: impl IntoLiteral) -> Filter {
    Filter::Equal(path, value.into_literal())
}

pub fn ne(path: Path, value: impl IntoLiteral) -> Filter {
    Filter::NotEqual(path, value.into_literal())
}

pub fn co(path: Path, value: impl IntoLiteral) -> Filter {
    Filter::Contains(path, value.into_literal())
}

pub fn sw(path: Path, value: impl IntoLiteral) -> Filter {
    Filter::StartsWith(path, value.into_literal())
}

pub fn ew(path: Path, value: impl IntoLiteral) -> Filter {
    Filter::EndsWith(path, value.into_literal())
}

pub fn gt(path: Path, value: impl IntoLiteral) -> Filter {
    Filter::GreaterThan(path, value.into_literal())
}

pub fn ge(path: Path, value: impl IntoLiteral) -> Filter {
    Filter::GreaterOrEqual(path, value.into_literal())
}

pub fn lt(path: Path, value: impl IntoLiteral) -> Filter {
    Filter::LessThan(path, value.into_literal())
}

pub fn le(path: Path, value: impl IntoLiteral) -> Filter {
    Filter::LessOrEqual(path, value.into_literal())
}

pub fn pr(path: Path) -> Filter {
    Filter::Present(path)
}

pub fn not(inner: Filter) -> Filter {
    Filter::Not(Box::new(inner))
}

pub fn complex(path: Path, inner: Filter) -> Filter {
    Filter::ComplexValue(path, Box::new(inner))
}

pub fn and(children: Vec<Filter>) -> BuilderResult<Filter> {
    if children.len() < 2 {
        return Err(BuilderError::invalid_argument("`and` requires at least two children"));
    }
    Ok(Filter::And(children))
}

pub fn or(children: Vec<Filter>) -> BuilderResult<Filter> {
    if children.len() < 2 {
        return Err(BuilderError::invalid_argument("`or` requires at least two children"));
    }
    Ok(Filter::Or(children))
}
