//! Evaluator configuration.
//!
//! The filter/path core has exactly one configurable knob: the recursion
//! depth bound an embedding service may want to tune. Shaped like
//! `wadahiro-scim-server`'s own `CompatibilityConfig` — a small
//! `serde`-deserializable struct with a `#[serde(default = "..")]` field and
//! a hand-written `Default` impl — so a caller can fold it into whatever
//! configuration source (file, env, CLI) their own service already uses.

use serde::{Deserialize, Serialize};

fn default_max_depth() -> usize {
    64
}

/// Bounds placed on evaluator recursion.
///
/// `max_depth` counts nested `ComplexValue` / value-filter evaluations; once
/// exceeded, [`crate::evaluate_with_config`] returns
/// `FilterError { kind: TooDeep, .. }` rather than recursing further.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct EvaluatorConfig {
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_spec_bound() {
        assert_eq!(EvaluatorConfig::default().max_depth, 64);
    }

    #[test]
    fn deserializes_with_default_when_omitted() {
        let cfg: EvaluatorConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg.max_depth, 64);
    }

    #[test]
    fn deserializes_explicit_value() {
        let cfg: EvaluatorConfig = serde_json::from_str(r#"{"max_depth": 8}"#).unwrap();
        assert_eq!(cfg.max_depth, 8);
    }
}
