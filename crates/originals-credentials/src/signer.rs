use originals_core::{Proof, Timestamp, VerifiableCredential};
use originals_crypto::{decode_multibase_bytes, decode_public_key_any, encode_multibase_bytes, sha256, verify, KeyPair};
use serde_json::Value;

use crate::error::{CredentialError, Result};

/// Contract for HSM/MPC/hardware signers (§4.4 external signer). The manager
/// prepares the unsigned document and proof stub; the signer returns only
/// the proof value.
pub trait ExternalSigner {
    fn verification_method_id(&self) -> String;
    fn cryptosuite(&self) -> String;
    fn sign(&self, document: &Value, proof: &Value) -> Result<String>;
}

/// Canonicalize a document per the cryptosuite family: `*-rdfc-*` suites use
/// RDF dataset canonicalization, everything else (including the `*-jcs-*`
/// and `bbs-*` families) uses JSON Canonicalization Scheme, per §4.4.
fn canonicalize_for_suite(cryptosuite: &str, value: &Value) -> Result<String> {
    if cryptosuite.contains("rdfc") {
        originals_canon::canonicalize_rdf(value).map_err(|e| CredentialError::VerificationFailed(e.to_string()))
    } else {
        Ok(originals_canon::canonicalize(value))
    }
}

/// The digest a Data-Integrity proof signs: canonicalize the credential sans
/// proof and the proof sans `proofValue` (with the credential's `@context`
/// injected), SHA-256 each, and concatenate proof-hash ∥ credential-hash.
pub fn credential_signing_digest(vc: &VerifiableCredential, proof: &Proof) -> Result<Vec<u8>> {
    let credential_value = serde_json::to_value(vc.without_proof()).unwrap_or(Value::Null);
    let credential_canonical = canonicalize_for_suite(&proof.cryptosuite, &credential_value)?;
    let credential_hash = sha256(credential_canonical.as_bytes());

    let mut unsigned_proof = proof.clone();
    unsigned_proof.proof_value = None;
    let mut proof_value = serde_json::to_value(&unsigned_proof).unwrap_or(Value::Null);
    if let Some(obj) = proof_value.as_object_mut() {
        obj.insert("@context".to_string(), serde_json::to_value(&vc.context).unwrap_or(Value::Null));
    }
    let proof_canonical = canonicalize_for_suite(&proof.cryptosuite, &proof_value)?;
    let proof_hash = sha256(proof_canonical.as_bytes());

    Ok([proof_hash.as_slice(), credential_hash.as_slice()].concat())
}

/// Sign a credential locally with a key pair held in process.
pub fn sign_credential(vc: &VerifiableCredential, key_pair: &KeyPair, verification_method: &str, created: Timestamp) -> Result<VerifiableCredential> {
    let proof = Proof::unsigned(key_pair.key_type().default_cryptosuite(), verification_method, created);
    let digest = credential_signing_digest(vc, &proof)?;
    let signature = key_pair.sign(&digest).map_err(|e| CredentialError::SigningFailed(e.to_string()))?;

    let mut signed_proof = proof;
    signed_proof.proof_value = Some(encode_multibase_bytes(&signature));

    let mut signed = vc.clone();
    signed.proof = Some(signed_proof);
    Ok(signed)
}

/// Sign a credential via an external signer (HSM/MPC), per §4.4.
pub fn sign_credential_with_external_signer(vc: &VerifiableCredential, signer: &dyn ExternalSigner, created: Timestamp) -> Result<VerifiableCredential> {
    let proof = Proof::unsigned(signer.cryptosuite(), signer.verification_method_id(), created);

    let document_value = serde_json::to_value(vc.without_proof()).unwrap_or(Value::Null);
    let mut proof_value = serde_json::to_value(&proof).unwrap_or(Value::Null);
    if let Some(obj) = proof_value.as_object_mut() {
        obj.insert("@context".to_string(), serde_json::to_value(&vc.context).unwrap_or(Value::Null));
    }

    let proof_value_str = signer.sign(&document_value, &proof_value)?;
    let mut signed_proof = proof;
    signed_proof.proof_value = Some(proof_value_str);

    let mut signed = vc.clone();
    signed.proof = Some(signed_proof);
    Ok(signed)
}

/// Verify a credential's proof. A `did:peer` verification method carries its
/// key inline and needs no resolver; other methods require `resolve_key`
/// (verification method id → multibase public key) to be supplied.
pub fn verify_credential(vc: &VerifiableCredential, resolve_key: Option<&dyn Fn(&str) -> Option<String>>) -> Result<bool> {
    let proof = vc.proof.as_ref().ok_or_else(|| CredentialError::VerificationFailed("credential has no proof".to_string()))?;
    let proof_value = proof.proof_value.as_ref().ok_or_else(|| CredentialError::VerificationFailed("proof has no proofValue".to_string()))?;
    let signature = decode_multibase_bytes(proof_value).map_err(|e| CredentialError::VerificationFailed(e.to_string()))?;

    let did = proof.verification_method.split('#').next().unwrap_or(&proof.verification_method);
    let multikey = if let Some(mk) = did.strip_prefix("did:peer:0") {
        mk.to_string()
    } else if let Some(resolver) = resolve_key {
        resolver(&proof.verification_method)
            .ok_or_else(|| CredentialError::VerificationFailed(format!("could not resolve {did}")))?
    } else {
        return Err(CredentialError::VerificationFailed(format!("no resolver available for {did}")));
    };

    let (key_type, public_key) = decode_public_key_any(&multikey).map_err(|e| CredentialError::VerificationFailed(e.to_string()))?;
    if !proof.cryptosuite.starts_with(key_type.cryptosuite_algorithm()) {
        return Err(CredentialError::UnsupportedCryptosuite(proof.cryptosuite.clone()));
    }

    let mut unsigned_proof = proof.clone();
    unsigned_proof.proof_value = None;
    let digest = credential_signing_digest(vc, &unsigned_proof)?;

    verify(key_type, &public_key, &digest, &signature).map_err(|e| CredentialError::VerificationFailed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use originals_core::{CredentialSubject, CredentialSubtype};
    use originals_core::KeyType;

    fn sample_vc(did: &str) -> VerifiableCredential {
        crate::issuer::create_credential(
            CredentialSubtype::ResourceCreated,
            CredentialSubject { id: did.to_string(), previous_credential: None, fields: serde_json::json!({"resourceId": "res-1"}) },
            did.to_string(),
            1_700_000_000,
        )
    }

    #[test]
    fn sign_then_verify_round_trips_for_a_peer_did() {
        let key_pair = KeyPair::generate(KeyType::Ed25519).unwrap();
        let multikey = originals_crypto::encode_public_key(KeyType::Ed25519, &key_pair.public_key_bytes()).unwrap();
        let did = format!("did:peer:0{multikey}");
        let vc = sample_vc(&did);

        let signed = sign_credential(&vc, &key_pair, &format!("{did}#key-1"), 1_700_000_000).unwrap();
        assert!(verify_credential(&signed, None).unwrap());
    }

    #[test]
    fn tampered_subject_fails_verification() {
        let key_pair = KeyPair::generate(KeyType::Ed25519).unwrap();
        let multikey = originals_crypto::encode_public_key(KeyType::Ed25519, &key_pair.public_key_bytes()).unwrap();
        let did = format!("did:peer:0{multikey}");
        let vc = sample_vc(&did);

        let mut signed = sign_credential(&vc, &key_pair, &format!("{did}#key-1"), 1_700_000_000).unwrap();
        signed.credential_subject.fields = serde_json::json!({"resourceId": "res-2"});

        let result = verify_credential(&signed, None);
        assert!(result.is_err() || result == Ok(false));
    }

    #[test]
    fn verification_without_resolver_fails_for_non_peer_dids() {
        let key_pair = KeyPair::generate(KeyType::Ed25519).unwrap();
        let vc = sample_vc("did:webvh:abc:example.com:widget");
        let signed = sign_credential(&vc, &key_pair, "did:webvh:abc:example.com:widget#key-1", 1_700_000_000).unwrap();
        assert!(verify_credential(&signed, None).is_err());
    }

    #[test]
    fn jcs_and_rdfc_cryptosuites_produce_different_digests_for_the_same_proof_document() {
        let vc = sample_vc("did:peer:0abc");
        let jcs_proof = Proof::unsigned("eddsa-jcs-2022", "did:peer:0abc#key-1", 1_700_000_000);
        let rdfc_proof = Proof::unsigned("eddsa-rdfc-2022", "did:peer:0abc#key-1", 1_700_000_000);

        let jcs_digest = credential_signing_digest(&vc, &jcs_proof).unwrap();
        // `credentialSubject` is a nested object, which the RDF dataset
        // canonicalizer does not yet expand, so the rdfc path reports that
        // explicitly instead of silently reusing the JCS digest.
        let rdfc_result = credential_signing_digest(&vc, &rdfc_proof);
        assert!(rdfc_result.is_err());
        assert_ne!(jcs_digest.len(), 0);
    }

    #[test]
    fn verify_credential_routes_an_externally_signed_rdfc_proof_through_rdf_canonicalization() {
        struct StubRdfcSigner {
            key_pair: KeyPair,
            verification_method_id: String,
        }
        impl ExternalSigner for StubRdfcSigner {
            fn verification_method_id(&self) -> String {
                self.verification_method_id.clone()
            }
            fn cryptosuite(&self) -> String {
                "eddsa-rdfc-2022".to_string()
            }
            fn sign(&self, _document: &Value, _proof: &Value) -> Result<String> {
                let signature = self.key_pair.sign(b"placeholder").map_err(|e| CredentialError::SigningFailed(e.to_string()))?;
                Ok(encode_multibase_bytes(&signature))
            }
        }

        let key_pair = KeyPair::generate(KeyType::Ed25519).unwrap();
        let multikey = originals_crypto::encode_public_key(KeyType::Ed25519, &key_pair.public_key_bytes()).unwrap();
        let did = format!("did:peer:0{multikey}");
        let vc = sample_vc(&did);
        let signer = StubRdfcSigner { key_pair, verification_method_id: format!("{did}#key-1") };
        let signed = sign_credential_with_external_signer(&vc, &signer, 1_700_000_000).unwrap();
        assert_eq!(signed.proof.as_ref().unwrap().cryptosuite, "eddsa-rdfc-2022");

        let err = verify_credential(&signed, None).unwrap_err();
        assert!(err.to_string().contains("JSON-LD expansion"));
    }
}
