//! The Value Locator (spec §4.5): resolves a [`Path`] against a JSON
//! resource to the list of sub-values it names, flattening arrays one
//! level and honoring any inline value-filter by recursing into the
//! evaluator. Never errors on a missing attribute — absence is represented
//! by an empty result — but does propagate [`FilterError`] from a
//! value-filter sub-evaluation or a depth-bound violation.

use serde_json::Value;

use crate::ast::Path;
use crate::error::FilterResult;
use crate::evaluator::{evaluate_filter, Ctx};
use crate::literal::ascii_eq_ignore_case;

/// Resolves `path` against `root`, returning every matched JSON value
/// (leaf or sub-object) with its kind preserved.
pub(crate) fn locate(path: &Path, root: &Value, ctx: &Ctx) -> FilterResult<Vec<Value>> {
    if path.elements.is_empty() {
        return Ok(vec![root.clone()]);
    }

    let mut current: Vec<Value> = match &path.schema {
        Some(schema) => match get_case_insensitive(root, schema) {
            Some(v) => vec![v.clone()],
            None => return Ok(Vec::new()),
        },
        None => vec![root.clone()],
    };

    for element in &path.elements {
        let mut next = Vec::new();
        for v in &current {
            if let Some(resolved) = get_case_insensitive(v, &element.attribute) {
                flatten_into(resolved, &mut next);
            }
        }

        if let Some(value_filter) = &element.value_filter {
            let deeper = ctx.deeper()?;
            let mut filtered = Vec::with_capacity(next.len());
            for v in next {
                if v.is_object() && evaluate_filter(value_filter, &v, &deeper)? {
                    filtered.push(v);
                }
            }
            next = filtered;
        }

        current = next;
    }

    Ok(current)
}

fn flatten_into(value: &Value, out: &mut Vec<Value>) {
    match value {
        Value::Array(items) => out.extend(items.iter().cloned()),
        other => out.push(other.clone()),
    }
}

fn get_case_insensitive<'a>(value: &'a Value, name: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => map.iter().find(|(k, _)| ascii_eq_ignore_case(k, name)).map(|(_, v)| v),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::PathElement;
    use crate::config::EvaluatorConfig;
    use crate::parser::parse_path;
    use serde_json::json;

    fn ctx() -> Ctx {
        Ctx::root(&EvaluatorConfig::default())
    }

    #[test]
    fn empty_path_returns_root() {
        let root = json!({"a": 1});
        assert_eq!(locate(&Path::root(), &root, &ctx()).unwrap(), vec![root]);
    }

    #[test]
    fn resolves_case_insensitively() {
        let root = json!({"userName": "alice"});
        let path = Path::simple("USERNAME");
        assert_eq!(locate(&path, &root, &ctx()).unwrap(), vec![json!("alice")]);
    }

    #[test]
    fn missing_attribute_yields_empty() {
        let root = json!({"a": 1});
        let path = Path::simple("b");
        assert_eq!(locate(&path, &root, &ctx()).unwrap(), Vec::<Value>::new());
    }

    #[test]
    fn flattens_arrays_one_level() {
        let root = json!({"emails": [{"value": "a@x.io"}, {"value": "b@x.io"}]});
        let path = parse_path("emails.value").unwrap();
        assert_eq!(locate(&path, &root, &ctx()).unwrap(), vec![json!("a@x.io"), json!("b@x.io")]);
    }

    #[test]
    fn descends_through_schema_urn() {
        let root = json!({"urn:ietf:params:scim:schemas:core:2.0:User": {"userName": "alice"}});
        let path = parse_path("urn:ietf:params:scim:schemas:core:2.0:User:userName").unwrap();
        assert_eq!(locate(&path, &root, &ctx()).unwrap(), vec![json!("alice")]);
    }

    #[test]
    fn value_filter_retains_only_matching_elements() {
        let root = json!({"emails": [
            {"type": "home", "value": "a@x.io"},
            {"type": "work", "value": "b@x.io"},
        ]});
        let path = Path {
            schema: None,
            elements: vec![PathElement::with_value_filter(
                "emails",
                crate::ast::Filter::Equal(Path::simple("type"), crate::literal::Literal::String("work".to_string())),
            )],
        };
        assert_eq!(locate(&path, &root, &ctx()).unwrap(), vec![json!({"type": "work", "value": "b@x.io"})]);
    }

    #[test]
    fn value_filter_on_non_array_yields_no_matches() {
        let root = json!({"name": "not an array"});
        let path = Path {
            schema: None,
            elements: vec![PathElement::with_value_filter(
                "name",
                crate::ast::Filter::Present(Path::simple("x")),
            )],
        };
        assert_eq!(locate(&path, &root, &ctx()).unwrap(), Vec::<Value>::new());
    }
}
