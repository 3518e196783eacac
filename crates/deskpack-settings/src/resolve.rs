//! Placeholder expansion for settings values
//!
//! Settings strings may embed `${key}` tokens referring to other
//! entries of a context mapping (usually the resolved settings
//! themselves). Expansion is a single pass: each context key is applied
//! exactly once, in the context's insertion order. A substitution that
//! re-introduces an already-applied key's token leaves it literal,
//! which is what makes cyclic references terminate instead of looping.
//!
//! Tokens naming keys absent from the context are left literal, never
//! an error. `${...}` text is therefore always expressible in settings.

use serde_json::{Map, Value};

/// Expand `${key}` tokens in `value` against `context`.
///
/// Strings are expanded with [`expand_str`]; sequences and mappings are
/// rebuilt with every element or entry value expanded (keys are never
/// touched); other scalars pass through unchanged. Neither input is
/// mutated.
pub fn expand_placeholders(value: &Value, context: &Map<String, Value>) -> Value {
    match value {
        Value::String(text) => Value::String(expand_str(text, context)),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| expand_placeholders(item, context))
                .collect(),
        ),
        Value::Object(entries) => {
            let mut expanded = Map::with_capacity(entries.len());
            for (key, entry) in entries {
                expanded.insert(key.clone(), expand_placeholders(entry, context));
            }
            Value::Object(expanded)
        }
        other => other.clone(),
    }
}

/// Expand `${key}` tokens in a single string.
///
/// Context keys are applied once each, in insertion order, replacing
/// every occurrence of `${key}` with the stringified context value.
/// Non-string context values substitute as their JSON form: numbers and
/// booleans as their display text, null as `null`, containers as
/// compact JSON. Strings substitute their raw contents, unquoted.
pub fn expand_str(input: &str, context: &Map<String, Value>) -> String {
    let mut output = input.to_string();
    for (key, value) in context {
        let token = format!("${{{key}}}");
        if output.contains(&token) {
            output = output.replace(&token, &stringify(value));
        }
    }
    output
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
