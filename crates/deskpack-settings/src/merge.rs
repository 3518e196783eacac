//! Deep merge for settings layers
//!
//! Implements the profile-layer fold with:
//! - Mappings: union by key (recursive)
//! - Sequences: CONCATENATE (base entries first)
//! - Scalars: override (higher-precedence layer wins)
//!
//! Shape conflicts (a mapping colliding with a sequence, a container
//! colliding with a scalar) are errors, not silent overrides.

use serde_json::{Map, Value};

use crate::error::SettingsError;

/// Deep merge two JSON values, `overriding` taking precedence.
///
/// Merge semantics:
/// - Mappings: union by key; shared keys recurse, base-only keys are
///   kept unchanged, override-only keys are added
/// - Sequences: concatenation, base entries before override entries
/// - Scalars (strings, numbers, booleans, null): override wins, even
///   across scalar kinds
/// - Anything else is a shape conflict and fails with
///   [`SettingsError::TypeMismatch`]
///
/// Both inputs are borrowed and never mutated; the result is a freshly
/// built value. On error no partial result is produced.
pub fn deep_merge(base: &Value, overriding: &Value) -> Result<Value, SettingsError> {
    match (base, overriding) {
        // Both mappings: union with recursion on shared keys
        (Value::Object(base_map), Value::Object(over_map)) => {
            Ok(Value::Object(merge_maps(base_map, over_map)?))
        }

        // Both sequences: concatenate
        (Value::Array(base_items), Value::Array(over_items)) => {
            let mut items = Vec::with_capacity(base_items.len() + over_items.len());
            items.extend(base_items.iter().cloned());
            items.extend(over_items.iter().cloned());
            Ok(Value::Array(items))
        }

        // One side is a container, the other is not (or a different container)
        (Value::Object(_) | Value::Array(_), _) | (_, Value::Object(_) | Value::Array(_)) => {
            Err(SettingsError::TypeMismatch {
                base: value_shape(base),
                overriding: value_shape(overriding),
            })
        }

        // Scalar over scalar: the overriding value wins, whatever its kind
        (_, overriding) => Ok(overriding.clone()),
    }
}

/// The mapping branch of [`deep_merge`], exposed for callers that fold
/// whole settings documents (which are always mappings at the root).
///
/// Key order in the result is the base map's order with override-only
/// keys appended in override order.
pub fn merge_maps(
    base: &Map<String, Value>,
    overriding: &Map<String, Value>,
) -> Result<Map<String, Value>, SettingsError> {
    let mut merged = base.clone();
    for (key, over_value) in overriding {
        let value = match merged.get(key) {
            Some(base_value) => deep_merge(base_value, over_value)?,
            None => over_value.clone(),
        };
        // Re-inserting an existing key keeps its position; new keys append.
        merged.insert(key.clone(), value);
    }
    Ok(merged)
}

/// Shape name of a JSON value, used in mismatch diagnostics.
pub fn value_shape(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalar_override() {
        let base = json!({"app_name": "Base"});
        let overriding = json!({"app_name": "Final"});
        let result = deep_merge(&base, &overriding).unwrap();
        assert_eq!(result["app_name"], "Final");
    }

    #[test]
    fn test_cross_kind_scalar_override() {
        // Scalars never shape-conflict with each other.
        let result = deep_merge(&json!({"v": 5}), &json!({"v": "5"})).unwrap();
        assert_eq!(result["v"], "5");

        let result = deep_merge(&json!({"v": true}), &json!({"v": null})).unwrap();
        assert!(result["v"].is_null());
    }

    #[test]
    fn test_mapping_union_preserves_base_keys() {
        let base = json!({
            "build": {
                "optimize": false,
                "strip": true
            }
        });
        let overriding = json!({
            "build": {
                "optimize": true
            }
        });
        let result = deep_merge(&base, &overriding).unwrap();

        assert_eq!(result["build"]["optimize"], true);
        assert_eq!(result["build"]["strip"], true);
    }

    #[test]
    fn test_new_keys_added() {
        let result = deep_merge(&json!({"a": 1}), &json!({"b": 2})).unwrap();
        assert_eq!(result["a"], 1);
        assert_eq!(result["b"], 2);
    }

    #[test]
    fn test_sequence_concatenation() {
        let base = json!({"extra_files": [1, 2]});
        let overriding = json!({"extra_files": [3]});
        let result = deep_merge(&base, &overriding).unwrap();

        assert_eq!(result["extra_files"], json!([1, 2, 3]));
    }

    #[test]
    fn test_nested_merge() {
        let base = json!({
            "outer": {
                "inner": {
                    "a": 1,
                    "b": 2
                }
            }
        });
        let overriding = json!({
            "outer": {
                "inner": {
                    "b": 3,
                    "c": 4
                }
            }
        });
        let result = deep_merge(&base, &overriding).unwrap();

        assert_eq!(result["outer"]["inner"]["a"], 1);
        assert_eq!(result["outer"]["inner"]["b"], 3);
        assert_eq!(result["outer"]["inner"]["c"], 4);
    }

    #[test]
    fn test_shape_mismatch_is_error() {
        let err = deep_merge(&json!({"v": [1]}), &json!({"v": {"k": 1}})).unwrap_err();
        match err {
            SettingsError::TypeMismatch { base, overriding } => {
                assert_eq!(base, "sequence");
                assert_eq!(overriding, "mapping");
            }
            other => panic!("unexpected error: {other}"),
        }

        assert!(deep_merge(&json!({"v": "s"}), &json!({"v": [1]})).is_err());
        assert!(deep_merge(&json!({"v": {}}), &json!({"v": 3})).is_err());
    }

    #[test]
    fn test_mismatch_produces_no_partial_result() {
        // The conflict sits behind a key that would merge fine on its own.
        let base = json!({"ok": 1, "bad": [1, 2]});
        let overriding = json!({"ok": 2, "bad": "oops"});
        assert!(deep_merge(&base, &overriding).is_err());
    }

    #[test]
    fn test_inputs_not_mutated() {
        let base = json!({"a": {"x": 1}, "list": [1]});
        let overriding = json!({"a": {"y": 2}, "list": [2]});
        let base_before = base.clone();
        let over_before = overriding.clone();

        let _ = deep_merge(&base, &overriding).unwrap();

        assert_eq!(base, base_before);
        assert_eq!(overriding, over_before);
    }

    #[test]
    fn test_key_order_base_first_then_appended() {
        let base = json!({"first": 1, "second": 2});
        let overriding = json!({"second": 20, "third": 3});
        let result = deep_merge(&base, &overriding).unwrap();

        let keys: Vec<&str> = result
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, ["first", "second", "third"]);
        assert_eq!(result["second"], 20);
    }

    #[test]
    fn test_fold_matches_pairwise_chain() {
        let layers = [
            json!({"a": 1, "seq": [1]}),
            json!({"b": 2, "seq": [2]}),
            json!({"a": 10, "c": 3}),
        ];

        let chained = deep_merge(&deep_merge(&layers[0], &layers[1]).unwrap(), &layers[2]).unwrap();

        let mut folded = json!({});
        for layer in &layers {
            folded = deep_merge(&folded, layer).unwrap();
        }

        assert_eq!(folded, chained);
        assert_eq!(folded["seq"], json!([1, 2]));
        assert_eq!(folded["a"], 10);
    }

    #[test]
    fn test_value_shape_names() {
        assert_eq!(value_shape(&json!(null)), "null");
        assert_eq!(value_shape(&json!(true)), "boolean");
        assert_eq!(value_shape(&json!(1.5)), "number");
        assert_eq!(value_shape(&json!("s")), "string");
        assert_eq!(value_shape(&json!([])), "sequence");
        assert_eq!(value_shape(&json!({})), "mapping");
    }
}
