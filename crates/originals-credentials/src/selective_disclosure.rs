use originals_core::VerifiableCredential;
use serde_json::Value;

use crate::error::{CredentialError, Result};

/// Read a field out of a credential subject by a `/`-separated pointer
/// path, e.g. `"resourceId"` or `"nested/field"`.
pub fn get_field_by_pointer(vc: &VerifiableCredential, pointer: &str) -> Option<&Value> {
    let mut current = &vc.credential_subject.fields;
    for segment in pointer.split('/').filter(|s| !s.is_empty()) {
        current = current.get(segment)?;
    }
    Some(current)
}

/// Mark which subject fields a holder intends to reveal, ahead of BBS+
/// derivation. This step is plain JSON bookkeeping and needs no signature
/// material, unlike `derive_disclosure` below.
pub fn prepare_disclosure(vc: &VerifiableCredential, reveal_pointers: &[&str]) -> Value {
    let mut revealed = serde_json::Map::new();
    for pointer in reveal_pointers {
        if let Some(value) = get_field_by_pointer(vc, pointer) {
            revealed.insert((*pointer).to_string(), value.clone());
        }
    }
    Value::Object(revealed)
}

/// Derive a BBS+ selective-disclosure proof. Requires `bbs-2023` signing,
/// which `originals-crypto`'s `Bls12381G2` key pair does not yet implement.
pub fn derive_disclosure(_vc: &VerifiableCredential, _reveal_pointers: &[&str]) -> Result<VerifiableCredential> {
    Err(CredentialError::UnsupportedCryptosuite("bbs-2023 selective disclosure is not implemented".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use originals_core::{CredentialSubject, CredentialSubtype};

    fn sample() -> VerifiableCredential {
        crate::issuer::create_credential(
            CredentialSubtype::ResourceCreated,
            CredentialSubject {
                id: "did:peer:0abc".to_string(),
                previous_credential: None,
                fields: serde_json::json!({"resourceId": "r1", "nested": {"field": "value"}}),
            },
            "did:peer:0abc".to_string(),
            1,
        )
    }

    #[test]
    fn pointer_reads_top_level_and_nested_fields() {
        let vc = sample();
        assert_eq!(get_field_by_pointer(&vc, "resourceId").unwrap(), "r1");
        assert_eq!(get_field_by_pointer(&vc, "nested/field").unwrap(), "value");
        assert!(get_field_by_pointer(&vc, "missing").is_none());
    }

    #[test]
    fn prepare_only_keeps_the_requested_pointers() {
        let vc = sample();
        let revealed = prepare_disclosure(&vc, &["resourceId"]);
        assert_eq!(revealed["resourceId"], "r1");
        assert!(revealed.get("nested").is_none());
    }

    #[test]
    fn derive_reports_the_unimplemented_cryptosuite() {
        let vc = sample();
        assert!(derive_disclosure(&vc, &["resourceId"]).is_err());
    }
}
