use originals_credentials::ExternalSigner;
use originals_crypto::{encode_multibase_bytes, KeyPair};

/// An external signer backed by a local key pair, standing in for an
/// HSM/MPC integration in tests (§6 external signer contract).
pub struct LocalExternalSigner {
    verification_method_id: String,
    key_pair: KeyPair,
}

impl LocalExternalSigner {
    pub fn new(verification_method_id: impl Into<String>, key_pair: KeyPair) -> Self {
        Self { verification_method_id: verification_method_id.into(), key_pair }
    }
}

impl ExternalSigner for LocalExternalSigner {
    fn verification_method_id(&self) -> String {
        self.verification_method_id.clone()
    }

    fn cryptosuite(&self) -> String {
        self.key_pair.key_type().default_cryptosuite().to_string()
    }

    fn sign(&self, document: &serde_json::Value, proof: &serde_json::Value) -> originals_credentials::Result<String> {
        let document_canonical = originals_canon::canonicalize(document);
        let proof_canonical = originals_canon::canonicalize(proof);
        let document_hash = originals_crypto::sha256(document_canonical.as_bytes());
        let proof_hash = originals_crypto::sha256(proof_canonical.as_bytes());
        let digest = [proof_hash.as_slice(), document_hash.as_slice()].concat();

        let signature = self
            .key_pair
            .sign(&digest)
            .map_err(|e| originals_credentials::CredentialError::SigningFailed(e.to_string()))?;
        Ok(encode_multibase_bytes(&signature))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use originals_core::KeyType;

    #[test]
    fn local_signer_reports_its_key_types_default_cryptosuite() {
        let key_pair = KeyPair::generate(KeyType::Ed25519).unwrap();
        let signer = LocalExternalSigner::new("did:peer:0abc#key-1", key_pair);
        assert_eq!(signer.cryptosuite(), "eddsa-jcs-2022");
        assert_eq!(signer.verification_method_id(), "did:peer:0abc#key-1");
    }
}
