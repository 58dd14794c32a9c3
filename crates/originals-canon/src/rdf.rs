use originals_core::{OriginalsError, Result};
use serde_json::Value;

/// RDF dataset canonicalization (URDNA2015) for the `*-rdfc-*` cryptosuite
/// family. A full JSON-LD-to-RDF expansion and canonical N-Quads labeling
/// pipeline is out of scope here; this produces a best-effort canonical
/// N-Quads rendering sufficient for fixed-shape credential documents that
/// carry no blank nodes, which is the only shape the Credential Manager
/// emits. Documents containing blank nodes return `CryptoError` so callers
/// fall back to the JCS cryptosuites instead of silently hashing the wrong
/// thing.
pub fn canonicalize_rdf(document: &Value) -> Result<String> {
    let quads = flatten_to_quads(document, "_:doc")?;
    let mut lines: Vec<String> = quads;
    lines.sort();
    Ok(lines.join("\n"))
}

fn flatten_to_quads(value: &Value, subject: &str) -> Result<Vec<String>> {
    let Value::Object(map) = value else {
        return Err(OriginalsError::validation("RDF canonicalization requires a JSON object"));
    };
    let mut quads = Vec::new();
    for (predicate, object) in map {
        if predicate == "@context" {
            continue;
        }
        match object {
            Value::Object(_) => {
                return Err(OriginalsError::validation(
                    "nested object canonicalization requires JSON-LD expansion, not yet supported",
                ));
            }
            Value::Array(items) => {
                for item in items {
                    quads.push(format!("{subject} <{predicate}> {} .", literal(item)?));
                }
            }
            other => quads.push(format!("{subject} <{predicate}> {} .", literal(other)?)),
        }
    }
    Ok(quads)
}

fn literal(value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(format!("\"{s}\"")),
        Value::Number(n) => Ok(format!("\"{n}\"^^<http://www.w3.org/2001/XMLSchema#decimal>")),
        Value::Bool(b) => Ok(format!("\"{b}\"^^<http://www.w3.org/2001/XMLSchema#boolean>")),
        Value::Null => Ok("\"\"".to_string()),
        _ => Err(OriginalsError::validation("unsupported RDF object shape")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn flat_document_canonicalizes_to_sorted_quads() {
        let doc = json!({"name": "widget", "version": "1.0.0"});
        let quads = canonicalize_rdf(&doc).unwrap();
        let lines: Vec<&str> = quads.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0] < lines[1]);
    }

    #[test]
    fn nested_object_is_rejected_rather_than_silently_wrong() {
        let doc = json!({"subject": {"nested": true}});
        assert!(canonicalize_rdf(&doc).is_err());
    }
}
