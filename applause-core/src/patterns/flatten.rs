//! flatten.rs - Collapses nested key/value documents into dotted paths.

use serde_json::Value;

/// Flattens `value` into an ordered list of `(path, leaf)` entries.
///
/// Objects are descended recursively, joining keys with `delimiter`. Arrays,
/// scalars and nulls are leaves; arrays are kept whole rather than expanded by
/// index. A non-object `value` is a single leaf at the empty path.
pub fn flatten(value: &Value, delimiter: &str) -> Vec<(String, Value)> {
    let mut entries = Vec::new();
    match value {
        Value::Object(_) => flatten_into(value, None, delimiter, &mut entries),
        leaf => entries.push((String::new(), leaf.clone())),
    }
    entries
}

fn flatten_into(value: &Value, path: Option<&str>, delimiter: &str, out: &mut Vec<(String, Value)>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let child_path = match path {
                    Some(parent) => format!("{parent}{delimiter}{key}"),
                    None => key.clone(),
                };
                flatten_into(child, Some(&child_path), delimiter, out);
            }
        }
        leaf => out.push((path.unwrap_or_default().to_string(), leaf.clone())),
    }
}
