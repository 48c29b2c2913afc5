//! Control-character sanitization of raw order input.
//!
//! Runs after validation and before model construction. Pure and
//! independent of the release-character escaping applied later by the
//! segment encoder.

use serde_json::Value;

/// Strip control characters (0–31 and 127) from a string.
pub fn strip_control(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_ascii_control())
        .collect()
}

/// Recursively sanitize every string inside a raw JSON value.
/// Keys, numbers, booleans, and nulls pass through unchanged.
pub fn sanitize(value: &Value) -> Value {
    match value {
        Value::String(s) => Value::String(strip_control(s)),
        Value::Array(items) => Value::Array(items.iter().map(sanitize).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), sanitize(v)))
                .collect(),
        ),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn strips_control_characters() {
        assert_eq!(strip_control("a\x00b\x1fc\x7fd"), "abcd");
        assert_eq!(strip_control("line\nbreak\ttab"), "linebreaktab");
        assert_eq!(strip_control("clean"), "clean");
    }

    #[test]
    fn sanitizes_nested_structures() {
        let raw = json!({
            "order_number": "PO-\x01123",
            "parties": [{"id": "ACME\x7f", "name": "A\nB"}],
            "count": 2,
            "flag": true,
        });
        let clean = sanitize(&raw);
        assert_eq!(clean["order_number"], "PO-123");
        assert_eq!(clean["parties"][0]["id"], "ACME");
        assert_eq!(clean["parties"][0]["name"], "AB");
        assert_eq!(clean["count"], 2);
    }

    #[test]
    fn sanitize_is_idempotent() {
        let raw = json!({"a": "x\x02y", "b": ["\x1b[0m"]});
        let once = sanitize(&raw);
        assert_eq!(sanitize(&once), once);
    }
}
