#![forbid(unsafe_code)]

use serde_json::{Map, Value};

/// Only a JSON `true` counts; `"true"`, `1` and friends do not.
pub(crate) fn flag_is_true(args: &Map<String, Value>, key: &str) -> bool {
    matches!(args.get(key), Some(Value::Bool(true)))
}

/// String arguments; any other JSON type reads as absent.
pub(crate) fn optional_str<'a>(args: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    args.get(key).and_then(Value::as_str)
}

/// Numeric arguments; strings, bools and nulls read as absent so callers fall back to defaults.
pub(crate) fn optional_number(args: &Map<String, Value>, key: &str) -> Option<f64> {
    args.get(key).and_then(Value::as_f64)
}
