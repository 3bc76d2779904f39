//! Shape-tolerant field extraction from JSON documents.
//!
//! Documents come from a loosely-typed store, so every accessor here coerces instead of
//! failing: a list where a list is expected, a one-element list for a bare string, and
//! empty for anything else.

use serde_json::{Map, Value};

/// Returns the first present, non-null field among `keys`.
pub(crate) fn pick<'a>(object: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| object.get(*key))
        .find(|value| !value.is_null())
}

/// Like [`pick`], but also looks one level down into `parent` (e.g. `company_info.sectors`).
pub(crate) fn pick_nested<'a>(
    object: &'a Map<String, Value>,
    parent: &str,
    keys: &[&str],
) -> Option<&'a Value> {
    pick(object, keys).or_else(|| {
        object
            .get(parent)
            .and_then(Value::as_object)
            .and_then(|inner| pick(inner, keys))
    })
}

/// Coerces a value into a list of strings. Non-string list items are dropped.
pub(crate) fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        Some(Value::String(s)) if !s.trim().is_empty() => vec![s.clone()],
        _ => Vec::new(),
    }
}

/// Coerces a value into a string; anything that is not a string becomes empty.
pub(crate) fn string(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        _ => String::new(),
    }
}

/// Coerces a value into an optional, non-blank string.
///
/// Extended-JSON dates (`{"$date": "..."}`) are unwrapped.
pub(crate) fn opt_string(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
        Some(Value::Object(inner)) => match inner.get("$date") {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
            _ => None,
        },
        _ => None,
    }
}

/// Coerces an identifier. Numbers and extended-JSON object ids are stringified so that
/// the same document always yields the same key.
pub(crate) fn identifier(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Object(inner)) => match inner.get("$oid") {
            Some(Value::String(s)) => s.trim().to_string(),
            _ => String::new(),
        },
        _ => String::new(),
    }
}
