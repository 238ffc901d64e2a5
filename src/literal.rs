//! The comparison-value side of the filter AST.
//!
//! RFC 7644 §3.4.2.2 filter values are JSON literals, but never arrays or
//! objects, and the SCIM wire encoding adds one kind plain JSON doesn't have
//! (Binary, carried as a base64 string — see §6 of the spec this crate
//! implements). [`Literal`] is that closed set.

use std::hash::{Hash, Hasher};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

/// A filter comparison value: `Null`, `Bool`, `Int`, `Float`, `String`, or `Binary`.
///
/// The parser only ever produces `Null`/`Bool`/`Int`/`Float`/`String` — the
/// wire grammar has no separate syntax for binary literals (§6). `Binary`
/// exists for the [`crate::builder`] API, which accepts raw bytes directly.
#[derive(Debug, Clone)]
pub enum Literal {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Binary(Vec<u8>),
}

impl Literal {
    /// The canonical textual form used by the renderer (§4.4): strings and
    /// binary values are both double-quoted, binary additionally base64-encoded.
    pub fn render(&self) -> String {
        match self {
            Literal::Null => "null".to_string(),
            Literal::Bool(b) => b.to_string(),
            Literal::Int(i) => i.to_string(),
            Literal::Float(f) => render_float(*f),
            Literal::String(s) => quote(s),
            Literal::Binary(bytes) => quote(&BASE64.encode(bytes)),
        }
    }

    /// The textual serialization used to compare a `Binary` literal against
    /// a resource's JSON string (the "Resource View" contract in §3).
    pub fn as_comparable_str(&self) -> Option<String> {
        match self {
            Literal::String(s) => Some(s.clone()),
            Literal::Binary(bytes) => Some(BASE64.encode(bytes)),
            _ => None,
        }
    }
}

/// Numbers render in their smallest faithful decimal form (§4.4): integral
/// floats print without a trailing `.0` only when `serde_json::Number`
/// itself would also drop the fraction; since the AST tags Int/Float
/// separately, a `Float` always keeps a decimal point so it never
/// round-trips back into `Literal::Int`.
fn render_float(f: f64) -> String {
    if f.is_nan() || f.is_infinite() {
        return f.to_string();
    }
    let mut s = format!("{}", f);
    if !s.contains('.') && !s.contains('e') && !s.contains('E') {
        s.push_str(".0");
    }
    s
}

fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

impl PartialEq for Literal {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Literal::Null, Literal::Null) => true,
            (Literal::Bool(a), Literal::Bool(b)) => a == b,
            (Literal::Int(a), Literal::Int(b)) => a == b,
            (Literal::Float(a), Literal::Float(b)) => a.to_bits() == b.to_bits(),
            (Literal::String(a), Literal::String(b)) => a == b,
            (Literal::Binary(a), Literal::Binary(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Literal {}

impl Hash for Literal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Literal::Null => {}
            Literal::Bool(b) => b.hash(state),
            Literal::Int(i) => i.hash(state),
            Literal::Float(f) => f.to_bits().hash(state),
            Literal::String(s) => s.hash(state),
            Literal::Binary(b) => b.hash(state),
        }
    }
}

/// ASCII-only case-insensitive equality (§9: "do not Unicode-case-fold").
pub fn ascii_eq_ignore_case(a: &str, b: &str) -> bool {
    a.len() == b.len() && a.bytes().zip(b.bytes()).all(|(x, y)| x.to_ascii_lowercase() == y.to_ascii_lowercase())
}

/// ASCII-only case-insensitive `contains`/`starts_with`/`ends_with` all reduce
/// to lowercasing both sides first, per §4.6's `co`/`sw`/`ew` rules.
pub fn ascii_lower(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii() { c.to_ascii_lowercase() } else { c })
        .collect()
}

/// The date-detection heuristic from §4.6.3 / §9: "length >= 19 and first 4
/// chars are digits followed by `-`". Deliberately not a real ISO-8601
/// validator — that heuristic *is* the contract.
pub fn looks_like_date(s: &str) -> bool {
    let chars: Vec<char> = s.chars().collect();
    chars.len() >= 19
        && chars[0].is_ascii_digit()
        && chars[1].is_ascii_digit()
        && chars[2].is_ascii_digit()
        && chars[3].is_ascii_digit()
        && chars[4] == '-'
}

/// Parses a string that already passed [`looks_like_date`] into a UTC
/// instant for ordering comparisons. Returns `None` if it isn't actually a
/// valid timestamp despite looking like one lexically.
pub fn parse_date(s: &str) -> Option<chrono::DateTime<chrono::Utc>> {
    chrono::DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&chrono::Utc))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_strings_with_json_escaping() {
        assert_eq!(Literal::String("a\"b".to_string()).render(), "\"a\\\"b\"");
    }

    #[test]
    fn renders_binary_as_base64_string() {
        let lit = Literal::Binary(vec![0x68, 0x69]);
        assert_eq!(lit.render(), "\"aGk=\"");
    }

    #[test]
    fn float_equality_is_bitwise() {
        assert_eq!(Literal::Float(1.5), Literal::Float(1.5));
        assert_ne!(Literal::Float(1.5), Literal::Float(1.50001));
    }

    #[test]
    fn int_and_float_of_same_value_are_not_equal() {
        assert_ne!(Literal::Int(5), Literal::Float(5.0));
    }

    #[test]
    fn ascii_case_insensitive_eq() {
        assert!(ascii_eq_ignore_case("Alice", "alice"));
        assert!(!ascii_eq_ignore_case("Alice", "alicia"));
    }

    #[test]
    fn date_heuristic_requires_dash_after_four_digits() {
        assert!(looks_like_date("2023-07-25T08:00:00Z"));
        assert!(!looks_like_date("2023/07/25T08:00:00Z"));
        assert!(!looks_like_date("abcd-ef-ghij-klmnop"));
        assert!(!looks_like_date("short"));
    }

    #[test]
    fn parses_fractional_seconds() {
        let dt = parse_date("2023-07-25T08:00:00.000Z").unwrap();
        assert_eq!(dt.to_rfc3339(), "2023-07-25T08:00:00+00:00");
    }
}
