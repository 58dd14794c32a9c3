use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{BitcoinError, Result};

/// The CBOR metadata envelope carried in an inscription's tag-5 pushes: a
/// single top-level map of the DID document and accompanying credential
/// (which may be a JSON object or a JWT string), per §4.5.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MetadataEnvelope {
    #[serde(rename = "didDocument")]
    pub did_document: Value,
    #[serde(rename = "verifiableCredential")]
    pub verifiable_credential: Value,
}

pub fn encode_metadata_envelope(envelope: &MetadataEnvelope) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    ciborium::ser::into_writer(envelope, &mut bytes).map_err(|e| BitcoinError::CborEncoding(e.to_string()))?;
    Ok(bytes)
}

pub fn decode_metadata_envelope(bytes: &[u8]) -> Result<MetadataEnvelope> {
    ciborium::de::from_reader(bytes).map_err(|e| BitcoinError::CborDecoding(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn metadata_envelope_encodes_to_nonempty_cbor() {
        let envelope = MetadataEnvelope {
            did_document: json!({"id": "did:peer:0abc"}),
            verifiable_credential: json!({"type": ["VerifiableCredential"]}),
        };
        let bytes = encode_metadata_envelope(&envelope).unwrap();
        assert!(!bytes.is_empty());
    }

    #[test]
    fn jwt_string_credential_is_accepted() {
        let envelope = MetadataEnvelope {
            did_document: json!({"id": "did:peer:0abc"}),
            verifiable_credential: json!("eyJhbGciOiJFZERTQSJ9..."),
        };
        assert!(encode_metadata_envelope(&envelope).is_ok());
    }

    #[test]
    fn encode_then_decode_roundtrips_to_a_structurally_equal_envelope() {
        let envelope = MetadataEnvelope {
            did_document: json!({"id": "did:webvh:example.com:asset-01", "verificationMethod": []}),
            verifiable_credential: json!({"type": ["VerifiableCredential", "MigrationCompleted"], "issuer": "did:webvh:example.com:asset-01"}),
        };
        let bytes = encode_metadata_envelope(&envelope).unwrap();
        let decoded = decode_metadata_envelope(&bytes).unwrap();
        assert_eq!(decoded, envelope);
    }

    #[test]
    fn decoding_garbage_bytes_fails() {
        assert!(decode_metadata_envelope(&[0xff, 0x00, 0x01]).is_err());
    }
}
