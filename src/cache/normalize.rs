//! Request parameter normalization.

use serde_json::{Map, Value};
use std::borrow::Cow;

/// Canonicalize request parameters so equivalent requests hash identically.
///
/// For a JSON object, returns a new object with keys in lexicographic order,
/// string values lowercased and trimmed, and array values sorted. Numbers,
/// booleans, null and nested objects pass through untouched. Any non-object
/// input is returned unchanged.
///
/// Array elements sort by their text when they are strings and by their
/// compact JSON rendering otherwise. The sort is stable, so applying
/// `normalize` twice yields the same value as applying it once.
pub fn normalize(params: &Value) -> Value {
    let Value::Object(map) = params else {
        return params.clone();
    };

    let mut keys: Vec<&String> = map.keys().collect();
    keys.sort();

    let mut normalized = Map::with_capacity(map.len());
    for key in keys {
        let value = &map[key.as_str()];
        let value = match value {
            Value::String(s) => Value::String(s.to_lowercase().trim().to_string()),
            Value::Array(items) => Value::Array(sorted(items)),
            other => other.clone(),
        };
        normalized.insert(key.clone(), value);
    }
    Value::Object(normalized)
}

fn sorted(items: &[Value]) -> Vec<Value> {
    let mut items = items.to_vec();
    items.sort_by(|a, b| sort_text(a).cmp(&sort_text(b)));
    items
}

fn sort_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s.as_str()),
        other => Cow::Owned(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strings_are_lowercased_and_trimmed() {
        let out = normalize(&json!({ "title": "  Hello World ", "platform": "YouTube" }));
        assert_eq!(out, json!({ "platform": "youtube", "title": "hello world" }));
    }

    #[test]
    fn test_keys_are_sorted() {
        let out = normalize(&json!({ "b": 1, "a": 2, "c": 3 }));
        let keys: Vec<&String> = out.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["a", "b", "c"]);
    }

    #[test]
    fn test_arrays_are_sorted_but_elements_keep_case() {
        let out = normalize(&json!({ "tags": ["Zebra", "apple", "Mango"] }));
        assert_eq!(out, json!({ "tags": ["Mango", "Zebra", "apple"] }));
    }

    #[test]
    fn test_mixed_array_sorts_deterministically() {
        let a = normalize(&json!({ "xs": [3, "b", true, null, 10] }));
        let b = normalize(&json!({ "xs": [null, 10, true, "b", 3] }));
        assert_eq!(a, b);
    }

    #[test]
    fn test_nested_objects_pass_through() {
        let out = normalize(&json!({ "filter": { "Lang": "EN" }, "n": 5, "flag": true }));
        assert_eq!(out["filter"], json!({ "Lang": "EN" }));
        assert_eq!(out["n"], json!(5));
        assert_eq!(out["flag"], json!(true));
    }

    #[test]
    fn test_non_objects_are_unchanged() {
        for value in [
            json!(null),
            json!(42),
            json!("  MiXeD  "),
            json!(["b", "a"]),
            json!(false),
        ] {
            assert_eq!(normalize(&value), value);
        }
    }

    #[test]
    fn test_idempotent() {
        let p = json!({
            "platform": " TikTok ",
            "hashtags": ["#B", "#a", "#C"],
            "limit": 10,
            "nested": { "Z": "Q" },
            "roastMode": null
        });
        let once = normalize(&p);
        assert_eq!(normalize(&once), once);
    }
}
