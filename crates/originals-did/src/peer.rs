use originals_core::{Did, DidDocument, KeyType, VerificationMethod, VerificationPurpose};
use originals_crypto::encode_public_key;

use crate::error::Result;

/// Derive a `did:peer` identifier (numalgo 0: a single inline key, no
/// separate document transform) from a raw public key, per §4.3. The
/// identifier is fully determined by the key, so it can always be
/// re-derived without external state.
pub fn create_peer_did(key_type: KeyType, public_key: &[u8]) -> Result<(Did, DidDocument)> {
    let multikey = encode_public_key(key_type, public_key).map_err(|e| crate::error::DidError::Malformed(e.to_string()))?;
    let did = format!("did:peer:0{multikey}");
    let vm_id = format!("{did}#key-1");

    let mut document = DidDocument::new(did.clone());
    document.add_verification_method(
        VerificationMethod { id: vm_id, controller: did.clone(), key_type, public_key_multibase: multikey },
        &[VerificationPurpose::Authentication, VerificationPurpose::AssertionMethod],
    );
    Ok((did, document))
}

/// Extract the multikey-encoded public key embedded in a numalgo-0
/// `did:peer` identifier.
pub fn peer_multikey(did: &str) -> Result<&str> {
    did.strip_prefix("did:peer:0")
        .ok_or_else(|| crate::error::DidError::Malformed(format!("not a numalgo-0 did:peer: {did}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peer_did_embeds_recoverable_multikey() {
        let raw = vec![3u8; 32];
        let (did, doc) = create_peer_did(KeyType::Ed25519, &raw).unwrap();
        assert!(did.starts_with("did:peer:0"));
        assert_eq!(doc.verification_method.len(), 1);
        assert_eq!(doc.authentication.len(), 1);
        assert_eq!(doc.assertion_method.len(), 1);

        let multikey = peer_multikey(&did).unwrap();
        let decoded = originals_crypto::decode_public_key(KeyType::Ed25519, multikey).unwrap();
        assert_eq!(decoded, raw);
    }
}
