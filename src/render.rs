//! Canonical string rendering (spec §4.4): the inverse of the parser, used
//! both to round-trip ASTs and to expose a stable textual form to callers.

use crate::ast::{Filter, Path};

/// Renders a `Path` the way the path parser expects to read it back:
/// optional `urn:...:` prefix, dotted elements, inline `[filter]` on any
/// element that carries a value-filter.
pub fn render_path(path: &Path) -> String {
    let joined = path
        .elements
        .iter()
        .map(|e| match &e.value_filter {
            Some(f) => format!("{}[{}]", e.attribute, render_filter(f)),
            None => e.attribute.clone(),
        })
        .collect::<Vec<_>>()
        .join(".");

    match &path.schema {
        Some(schema) => format!("{}:{}", schema, joined),
        None => joined,
    }
}

/// Renders a `Filter` to the canonical lowercase-keyword textual form
/// (spec §6): `parse(render(ast)) ≡ ast` for every `ast` the parser
/// produces (§8 law 1).
pub fn render_filter(filter: &Filter) -> String {
    match filter {
        Filter::And(children) => render_combining(children, true),
        Filter::Or(children) => render_combining(children, false),
        Filter::Not(inner) => format!("not ({})", render_filter(inner)),
        Filter::Present(path) => format!("{} pr", render_path(path)),
        Filter::Equal(path, v) => render_comparison(path, "eq", v),
        Filter::NotEqual(path, v) => render_comparison(path, "ne", v),
        Filter::Contains(path, v) => render_comparison(path, "co", v),
        Filter::StartsWith(path, v) => render_comparison(path, "sw", v),
        Filter::EndsWith(path, v) => render_comparison(path, "ew", v),
        Filter::GreaterThan(path, v) => render_comparison(path, "gt", v),
        Filter::GreaterOrEqual(path, v) => render_comparison(path, "ge", v),
        Filter::LessThan(path, v) => render_comparison(path, "lt", v),
        Filter::LessOrEqual(path, v) => render_comparison(path, "le", v),
        Filter::ComplexValue(path, inner) => format!("{}[{}]", render_path(path), render_filter(inner)),
    }
}

fn render_comparison(path: &Path, op: &str, value: &crate::literal::Literal) -> String {
    format!("{} {} {}", render_path(path), op, value.render())
}

fn render_combining(children: &[Filter], parent_is_and: bool) -> String {
    let sep = if parent_is_and { " and " } else { " or " };
    children
        .iter()
        .map(|c| {
            if needs_parens(c, parent_is_and) {
                format!("({})", render_filter(c))
            } else {
                render_filter(c)
            }
        })
        .collect::<Vec<_>>()
        .join(sep)
}

/// And/Or children are parenthesized only when the child is itself
/// And/Or/Not "of different kind" (spec §4.4): a nested `And` inside an
/// `And` stays bare (it will be re-flattened on re-parse anyway), but a
/// nested `Or` inside an `And`, or any `Not`, needs parens to preserve
/// precedence on re-parse.
fn needs_parens(child: &Filter, parent_is_and: bool) -> bool {
    match child {
        Filter::And(_) => !parent_is_and,
        Filter::Or(_) => parent_is_and,
        Filter::Not(_) => true,
        _ => false,
    }
}
