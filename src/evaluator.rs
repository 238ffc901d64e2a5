//! The Evaluator (spec §4.6): walks a [`Filter`] against a JSON resource
//! and returns a boolean, applying SCIM's case-insensitive string rules,
//! the ISO-8601 date heuristic, and the "unassigned ≡ null" rule uniformly
//! across every comparison variant.

use std::cmp::Ordering;

use serde_json::{Number, Value};

use crate::ast::{Filter, Path};
use crate::config::EvaluatorConfig;
use crate::error::{FilterError, FilterErrorKind, FilterResult};
use crate::literal::{ascii_lower, looks_like_date, parse_date, Literal};
use crate::locator;

/// Per-call recursion bookkeeping: `depth` counts nested `ComplexValue` /
/// value-filter evaluations (spec §5), bounded by `config.max_depth`.
pub(crate) struct Ctx<'a> {
    config: &'a EvaluatorConfig,
    depth: usize,
}

impl<'a> Ctx<'a> {
    pub(crate) fn root(config: &'a EvaluatorConfig) -> Self {
        Self { config, depth: 0 }
    }

    pub(crate) fn deeper(&self) -> FilterResult<Ctx<'a>> {
        let depth = self.depth + 1;
        if depth > self.config.max_depth {
            return Err(FilterError::new(
                FilterErrorKind::TooDeep,
                format!("filter nesting exceeds configured max_depth of {}", self.config.max_depth),
            ));
        }
        Ok(Ctx { config: self.config, depth })
    }
}

/// Evaluates `filter` against `root` using the default [`EvaluatorConfig`]
/// (spec §6: `evaluate(Filter, jsonObject) -> bool | FilterError`).
pub fn evaluate(filter: &Filter, root: &Value) -> FilterResult<bool> {
    evaluate_with_config(filter, root, &EvaluatorConfig::default())
}

/// Evaluates `filter` against `root` with an explicit recursion depth bound.
pub fn evaluate_with_config(filter: &Filter, root: &Value, config: &EvaluatorConfig) -> FilterResult<bool> {
    tracing::debug!("evaluate: start");
    let ctx = Ctx::root(config);
    let result = evaluate_filter(filter, root, &ctx);
    match &result {
        Ok(b) => tracing::debug!(result = b, "evaluate: ok"),
        Err(e) => tracing::warn!(kind = ?e.kind, "evaluate: error"),
    }
    result
}

pub(crate) fn evaluate_filter(filter: &Filter, root: &Value, ctx: &Ctx) -> FilterResult<bool> {
    match filter {
        Filter::And(children) => {
            for c in children {
                if !evaluate_filter(c, root, ctx)? {
                    return Ok(false);
                }
            }
            Ok(true)
        }
        Filter::Or(children) => {
            for c in children {
                if evaluate_filter(c, root, ctx)? {
                    return Ok(true);
                }
            }
            Ok(false)
        }
        Filter::Not(inner) => Ok(!evaluate_filter(inner, root, ctx)?),
        Filter::Present(path) => eval_present(path, root, ctx),
        Filter::Equal(path, lit) => eval_equality(path, lit, root, ctx, false),
        Filter::NotEqual(path, lit) => eval_equality(path, lit, root, ctx, true),
        Filter::Contains(path, lit) => eval_text(path, lit, root, ctx, TextOp::Contains),
        Filter::StartsWith(path, lit) => eval_text(path, lit, root, ctx, TextOp::StartsWith),
        Filter::EndsWith(path, lit) => eval_text(path, lit, root, ctx, TextOp::EndsWith),
        Filter::GreaterThan(path, lit) => eval_order(path, lit, root, ctx, OrdOp::Gt),
        Filter::GreaterOrEqual(path, lit) => eval_order(path, lit, root, ctx, OrdOp::Ge),
        Filter::LessThan(path, lit) => eval_order(path, lit, root, ctx, OrdOp::Lt),
        Filter::LessOrEqual(path, lit) => eval_order(path, lit, root, ctx, OrdOp::Le),
        Filter::ComplexValue(path, inner) => eval_complex(path, inner, root, ctx),
    }
}

fn eval_present(path: &Path, root: &Value, ctx: &Ctx) -> FilterResult<bool> {
    let located = locator::locate(path, root, ctx)?;
    Ok(located.iter().any(|v| !v.is_null()))
}

/// Shared by `Equal` (`invert = false`) and `NotEqual` (`invert = true`):
/// "unassigned ≡ null" (§4.6.2) makes an absent attribute compare equal to
/// an explicit `null` literal; everything else uses §4.6.3's per-kind rules.
fn eval_equality(path: &Path, lit: &Literal, root: &Value, ctx: &Ctx, invert: bool) -> FilterResult<bool> {
    let located = locator::locate(path, root, ctx)?;

    if matches!(lit, Literal::Null) && located.is_empty() {
        return Ok(!invert);
    }

    let any_match = located.iter().any(|v| values_equal(v, lit));
    Ok(if invert { !any_match } else { any_match })
}

enum TextOp {
    Contains,
    StartsWith,
    EndsWith,
}

fn eval_text(path: &Path, lit: &Literal, root: &Value, ctx: &Ctx, op: TextOp) -> FilterResult<bool> {
    let located = locator::locate(path, root, ctx)?;
    let lit_str = lit.as_comparable_str();

    Ok(located.iter().any(|v| match (v, &lit_str) {
        (Value::String(s), Some(target)) => {
            let a = ascii_lower(s);
            let b = ascii_lower(target);
            match op {
                TextOp::Contains => a.contains(&b),
                TextOp::StartsWith => a.starts_with(&b),
                TextOp::EndsWith => a.ends_with(&b),
            }
        }
        _ => values_equal(v, lit),
    }))
}

enum OrdOp {
    Gt,
    Ge,
    Lt,
    Le,
}

fn satisfies(op: &OrdOp, ord: Ordering) -> bool {
    match op {
        OrdOp::Gt => ord == Ordering::Greater,
        OrdOp::Ge => ord != Ordering::Less,
        OrdOp::Lt => ord == Ordering::Less,
        OrdOp::Le => ord != Ordering::Greater,
    }
}

fn eval_order(path: &Path, lit: &Literal, root: &Value, ctx: &Ctx, op: OrdOp) -> FilterResult<bool> {
    let located = locator::locate(path, root, ctx)?;
    for v in &located {
        let ord = match v {
            Value::String(s) => match lit.as_comparable_str() {
                Some(target) => string_order(s, &target),
                None => return Err(invalid_comparison(v)),
            },
            Value::Number(n) => match number_order(n, lit) {
                Some(ord) => ord,
                None => return Err(invalid_comparison(v)),
            },
            _ => return Err(invalid_comparison(v)),
        };
        if satisfies(&op, ord) {
            return Ok(true);
        }
    }
    Ok(false)
}

fn invalid_comparison(v: &Value) -> FilterError {
    FilterError::new(
        FilterErrorKind::InvalidComparison,
        format!("gt/ge/lt/le require a String or Number located value, found {}", kind_name(v)),
    )
}

fn kind_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn eval_complex(path: &Path, inner: &Filter, root: &Value, ctx: &Ctx) -> FilterResult<bool> {
    let located = locator::locate(path, root, ctx)?;
    let deeper = ctx.deeper()?;
    for v in &located {
        if v.is_object() && evaluate_filter(inner, v, &deeper)? {
            return Ok(true);
        }
    }
    Ok(false)
}

/// §4.6.3's unified comparison rule, used directly for `eq`/`ne` and as the
/// non-String/non-Number fallback for `co`/`sw`/`ew`.
fn values_equal(v: &Value, lit: &Literal) -> bool {
    match (v, lit) {
        (Value::Null, Literal::Null) => true,
        (Value::Bool(a), Literal::Bool(b)) => a == b,
        (Value::Number(n), Literal::Int(_) | Literal::Float(_)) => number_order(n, lit) == Some(Ordering::Equal),
        (Value::String(s), Literal::String(_) | Literal::Binary(_)) => {
            string_order(s, &lit.as_comparable_str().expect("String/Binary literal always has a comparable string")) == Ordering::Equal
        }
        _ => false,
    }
}

/// ISO-8601 instants if both sides pass the §4.6.3/§9 date heuristic and
/// actually parse; otherwise ASCII-case-insensitive lexical order.
fn string_order(v: &str, lit: &str) -> Ordering {
    if looks_like_date(v) && looks_like_date(lit) {
        if let (Some(a), Some(b)) = (parse_date(v), parse_date(lit)) {
            return a.cmp(&b);
        }
    }
    ascii_lower(v).cmp(&ascii_lower(lit))
}

/// Doubles if either side is floating-point, otherwise 64-bit signed
/// integers (§4.6.3). `None` means the pair isn't numerically comparable
/// at all (surfaced as `InvalidComparison` by callers that need an error).
fn number_order(n: &Number, lit: &Literal) -> Option<Ordering> {
    match lit {
        Literal::Int(i) => {
            if n.is_f64() {
                n.as_f64()?.partial_cmp(&(*i as f64))
            } else {
                Some(n.as_i64()?.cmp(i))
            }
        }
        Literal::Float(f) => n.as_f64()?.partial_cmp(f),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_filter;
    use serde_json::json;

    fn check(filter_src: &str, resource: Value) -> bool {
        let filter = parse_filter(filter_src).unwrap();
        evaluate(&filter, &resource).unwrap()
    }

    #[test]
    fn s1_case_insensitive_string_eq() {
        assert!(check(r#"userName eq "alice""#, json!({"userName": "Alice"})));
    }

    #[test]
    fn s2_complex_value_filter_with_and() {
        let resource = json!({"emails": [
            {"type": "home", "value": "a@x.io"},
            {"type": "Work", "value": "b@example.com"},
        ]});
        assert!(check(r#"emails[type eq "work" and value ew "@example.com"]"#, resource));
    }

    #[test]
    fn s3_date_comparison() {
        let resource = json!({"meta": {"created": "2023-07-25T08:00:00.000Z"}});
        assert!(check(r#"meta.created ge "2023-07-25T08:00:00Z""#, resource));
    }

    #[test]
    fn s4_unassigned_null_present_is_false() {
        assert!(check(r#"not (nickName pr)"#, json!({"nickName": null})));
    }

    #[test]
    fn s5_and_of_parenthesized_comparisons() {
        let resource = json!({"userName": "wind", "meta": {"resourceType": "User"}});
        assert!(check(r#"(userName sw "win") and (meta.resourceType eq "User")"#, resource));
    }

    #[test]
    fn s6_not_equal_is_true_for_absent_attribute() {
        assert!(check(r#"name.familyName ne "Traffic""#, json!({"name": {"givenName": "A"}})));
    }

    #[test]
    fn not_negates_inner_result() {
        let filter = parse_filter(r#"userName eq "bob""#).unwrap();
        let resource = json!({"userName": "alice"});
        assert_eq!(evaluate(&Filter::Not(Box::new(filter.clone())), &resource).unwrap(), !evaluate(&filter, &resource).unwrap());
    }

    #[test]
    fn and_short_circuits_without_evaluating_remaining_children() {
        let filter = parse_filter(r#"active eq true and active gt true"#).unwrap();
        // The second child (`active gt true`) would be InvalidComparison if
        // evaluated (located value is a Bool) — the false first child must
        // short-circuit before that happens.
        assert!(!evaluate(&filter, &json!({"active": false})).unwrap());
    }

    #[test]
    fn gt_on_boolean_is_invalid_comparison() {
        let filter = parse_filter("active gt true").unwrap();
        let err = evaluate(&filter, &json!({"active": false})).unwrap_err();
        assert_eq!(err.kind, FilterErrorKind::InvalidComparison);
    }

    #[test]
    fn numeric_comparison_int_and_float() {
        assert!(check("age gt 30", json!({"age": 31})));
        assert!(check("age ge 30.0", json!({"age": 30})));
        assert!(!check("age lt 30", json!({"age": 30})));
    }

    #[test]
    fn eq_and_ne_are_complements_for_present_non_null_value() {
        let resource = json!({"userName": "alice"});
        assert!(check(r#"userName eq "alice""#, resource.clone()));
        assert!(!check(r#"userName ne "alice""#, resource));
    }

    #[test]
    fn depth_bound_is_enforced() {
        use crate::config::EvaluatorConfig;
        let config = EvaluatorConfig { max_depth: 1 };
        // `a[...]` is one level (the outer ComplexValue); the mid-path
        // value-filter on `b` inside it is a second, which must exceed a
        // max_depth of 1.
        let filter = parse_filter(r#"a[b[c eq "1"].d eq "2"]"#).unwrap();
        let err = evaluate_with_config(&filter, &json!({"a": {}}), &config).unwrap_err();
        assert_eq!(err.kind, FilterErrorKind::TooDeep);
    }
}
