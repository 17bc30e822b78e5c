//! Dotted-key lookups over parsed YAML documents.
//!
//! Keys are matched case-insensitively and scalars are read back as text,
//! so `version: 1.0` and `version: "1.0"` both yield a string.

use serde_yaml::{Mapping, Value};

/// Looks up a single key in a mapping, exact match first.
#[must_use]
pub fn get_key<'a>(mapping: &'a Mapping, key: &str) -> Option<&'a Value> {
    if let Some(value) = mapping.get(key) {
        return Some(value);
    }
    mapping
        .iter()
        .find(|(k, _)| k.as_str().is_some_and(|k| k.eq_ignore_ascii_case(key)))
        .map(|(_, v)| v)
}

/// Follows a `.`-separated key path through nested mappings.
#[must_use]
pub fn get<'a>(value: &'a Value, key_path: &str) -> Option<&'a Value> {
    key_path.split('.').try_fold(value, |current, segment| {
        current.as_mapping().and_then(|mapping| get_key(mapping, segment))
    })
}

/// The value at `key_path` as text, or an empty string when absent.
#[must_use]
pub fn get_string(value: &Value, key_path: &str) -> String {
    get(value, key_path).map(scalar_to_string).unwrap_or_default()
}

/// Renders a scalar as text. Sequences, mappings and null render empty.
#[must_use]
pub fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Tagged(tagged) => scalar_to_string(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => String::new(),
    }
}
