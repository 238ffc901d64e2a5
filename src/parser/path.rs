//! Attribute-path grammar (spec §4.3): an optional schema URN, then one or
//! more dotted [`PathElement`]s, each optionally carrying an inline
//! value-filter.
//!
//! Path parsing recurses into [`crate::parser::filter`] for value-filter
//! brackets, and the filter parser recurses back in here for bare path
//! references — the two grammars share one token stream via
//! [`super::Parser`].
//!
//! One ambiguity needs resolving between the two grammars: a bracket right
//! after the path's *last* segment with nothing following it (`emails[type
//! eq "work"]`) is syntactically identical whether read as that element's
//! own value-filter (§4.3's `Element := Name ("[" Filter "]")?`) or as
//! Primary's dedicated `Path "[" Filter "]"` → `ComplexValue` production
//! (§4.2). The distinguishing fact is what parses it: a standalone
//! `parsePath` call has no `ComplexValue` to hand the bracket to, so it's
//! always the element's value-filter there; inside a filter, it's only
//! unambiguously a *mid-path* value-filter when a `.` and another segment
//! follow. [`parse_path_core`]'s `in_primary` flag picks between the two.

use crate::ast::{Filter, Path, PathElement};
use crate::error::{ParseError, ParseErrorKind, ParseResult};

use super::Parser;

/// Parses a standalone path string (the `parsePath` library entry point,
/// spec §6). A terminal bracket is always this path's last element's
/// value-filter here — there's no surrounding `Filter` to hand it to.
pub fn parse_path(source: &str) -> ParseResult<Path> {
    tracing::debug!(len = source.len(), "parse_path: start");
    let mut parser = Parser::new(source)?;
    let (path, _) = parse_path_core(&mut parser, false)?;
    parser.expect_end()?;
    tracing::debug!("parse_path: ok");
    Ok(path)
}

/// Parses a `Path` for `Primary`'s use (spec §4.2): returns the path, plus
/// `Some(inner)` when a terminal, non-dotted bracket was found — the
/// caller then builds a top-level `ComplexValue` from it rather than
/// attaching it to the path's last element.
pub(super) fn parse_path_for_primary(p: &mut Parser) -> ParseResult<(Path, Option<Filter>)> {
    parse_path_core(p, true)
}

/// Parses one path expression from the shared token stream. The lexer's
/// `Word` token already swallows internal `.`/`:` characters (spec §4.1),
/// so a dotted run with no bracket in it (`name.givenName`) arrives as a
/// single token; a `Dot` token only appears when a `]` breaks up the run
/// (`emails[type eq "work"].value`), so that's the only place this needs
/// to ask the lexer for another word explicitly.
fn parse_path_core(p: &mut Parser, in_primary: bool) -> ParseResult<(Path, Option<Filter>)> {
    let (schema, first_run) = split_schema_prefix(p)?;
    let mut elements = Vec::new();
    let mut run = first_run;

    loop {
        let mut names = split_segments(&run, p)?;
        let last = names.pop().expect("split yields at least one segment");
        elements.extend(names.into_iter().map(PathElement::new));

        if !p.eat_lbracket() {
            elements.push(PathElement::new(last));
            return Ok((Path { schema, elements }, None));
        }

        let inner = super::filter::parse_filter_expr(p)?;
        p.expect_rbracket()?;

        if p.eat_dot() {
            elements.push(PathElement::with_value_filter(last, inner));
            run = p.expect_word_raw()?;
            continue;
        }

        if in_primary {
            elements.push(PathElement::new(last));
            return Ok((Path { schema, elements }, Some(inner)));
        }
        elements.push(PathElement::with_value_filter(last, inner));
        return Ok((Path { schema, elements }, None));
    }
}

/// Splits a leading `urn:...:` schema prefix off the raw word token that
/// starts the path, per §4.3: "the URN prefix is detected by a leading
/// `urn:` literal and terminated at the last `:` before the first element
/// name." Returns the (optional) schema and the remaining raw text.
fn split_schema_prefix(p: &mut Parser) -> ParseResult<(Option<String>, String)> {
    let raw = p.expect_word_raw()?;

    if raw.to_ascii_lowercase().starts_with("urn:") {
        match raw.rfind(':') {
            Some(idx) if idx + 1 < raw.len() => Ok((Some(raw[..idx].to_string()), raw[idx + 1..].to_string())),
            _ => Err(ParseError::new(
                ParseErrorKind::InvalidPath,
                p.current().offset,
                "URN schema prefix is not followed by an attribute name",
            )),
        }
    } else {
        Ok((None, raw))
    }
}

fn split_segments(run: &str, p: &Parser) -> ParseResult<Vec<String>> {
    let names: Vec<String> = run.split('.').map(|s| s.to_string()).collect();
    for name in &names {
        validate_name(name, p.current().offset)?;
    }
    Ok(names)
}

fn validate_name(name: &str, offset: usize) -> ParseResult<()> {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => {
            return Err(ParseError::new(
                ParseErrorKind::InvalidPath,
                offset,
                format!("attribute name '{}' must start with a letter", name),
            ))
        }
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '$') {
        return Err(ParseError::new(
            ParseErrorKind::InvalidPath,
            offset,
            format!("attribute name '{}' contains invalid characters", name),
        ));
    }
    Ok(())
}
