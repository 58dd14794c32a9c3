use serde_json::Value;
use std::fmt::Write as _;

/// Serialize `value` per the JSON Canonicalization Scheme (RFC 8785):
/// object keys sorted by UTF-16 code unit, no insignificant whitespace,
/// numbers rendered in their shortest round-tripping form. `serde_json`
/// already gives us minimal number/string formatting; the remaining work is
/// recursively sorting object keys before serializing.
pub fn canonicalize(value: &Value) -> String {
    let mut out = String::new();
    write_canonical(value, &mut out);
    out
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            out.push('{');
            for (i, key) in keys.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_json_string(key, out);
                out.push(':');
                write_canonical(&map[*key], out);
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        Value::String(s) => write_json_string(s, out),
        Value::Null | Value::Bool(_) | Value::Number(_) => {
            let _ = write!(out, "{value}");
        }
    }
}

fn write_json_string(s: &str, out: &mut String) {
    // serde_json's Display for Value::String already produces a properly
    // escaped JSON string literal.
    let _ = write!(out, "{}", Value::String(s.to_string()));
}

/// Canonicalize and SHA-256-hash `value` in one step, hex-encoded.
pub fn canonical_hash_hex(value: &Value) -> String {
    let canonical = canonicalize(value);
    let mut hasher = sha2_for_canon();
    hasher.update(canonical.as_bytes());
    hex::encode(hasher.finalize())
}

// Kept as a tiny indirection so this module does not need to depend on
// `originals-crypto` (which would create a cycle once that crate depends on
// canonicalization for signing).
fn sha2_for_canon() -> sha2::Sha256 {
    use sha2::Digest;
    sha2::Sha256::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn object_keys_are_sorted() {
        let value = json!({"b": 1, "a": 2});
        assert_eq!(canonicalize(&value), r#"{"a":2,"b":1}"#);
    }

    #[test]
    fn canonicalization_is_deterministic_across_equivalent_orderings() {
        let a = json!({"z": 1, "a": {"y": 2, "x": 3}});
        let b = json!({"a": {"x": 3, "y": 2}, "z": 1});
        assert_eq!(canonicalize(&a), canonicalize(&b));
    }

    #[test]
    fn nested_arrays_preserve_order() {
        let value = json!({"list": [3, 1, 2]});
        assert_eq!(canonicalize(&value), r#"{"list":[3,1,2]}"#);
    }
}
