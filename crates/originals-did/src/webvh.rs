use originals_core::{Did, DidDocument, KeyType, VerificationMethod, VerificationPurpose};
use originals_crypto::{encode_multibase_bytes, encode_public_key, sha256, KeyPair};
use serde::{Deserialize, Serialize};

use crate::error::{DidError, Result};

pub(crate) const METHOD_VERSION: &str = "1.0";
const SCID_PLACEHOLDER: &str = "{SCID}";

/// A witness's contribution weight, per the external `did:webvh` spec.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct WitnessWeight {
    pub id: String,
    pub weight: u64,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Witness {
    pub threshold: u64,
    pub witnesses: Vec<WitnessWeight>,
}

/// Per-version parameters carried by a log entry.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Parameters {
    pub method: String,
    pub scid: String,
    pub update_keys: Vec<String>,
    pub portable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_key_hashes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub witness: Option<Witness>,
    pub deactivated: bool,
    pub ttl: u64,
}

/// A data-integrity proof over a log entry, signed by an update key.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct LogEntryProof {
    #[serde(rename = "type")]
    pub proof_type: String,
    pub cryptosuite: String,
    pub verification_method: String,
    pub created: i64,
    pub proof_purpose: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proof_value: Option<String>,
}

/// One entry in the append-only `did:webvh` log, per §4.3/§9.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub version_id: String,
    pub version_time: i64,
    pub parameters: Parameters,
    pub state: DidDocument,
    #[serde(default)]
    pub proof: Vec<LogEntryProof>,
}

impl LogEntry {
    /// Canonical hash of the entry with its proof cleared, used both to
    /// derive the SCID and to chain `versionId` entries.
    fn unsigned_hash(&self) -> String {
        let mut unsigned = self.clone();
        unsigned.proof.clear();
        let value = serde_json::to_value(&unsigned).unwrap_or(serde_json::Value::Null);
        let canonical = originals_canon::canonicalize(&value);
        encode_multibase_bytes(&sha256(canonical.as_bytes()))
    }
}

fn webvh_did(domain: &str, slug: &str, scid: &str) -> Did {
    format!("did:webvh:{scid}:{domain}:{slug}")
}

/// Create a new `did:webvh` identifier and its first log entry, per §4.3.
/// `domain` is the HTTPS host (and optional path) the log is published
/// under; `slug` disambiguates multiple DIDs on the same host.
pub fn create_webvh_did(
    domain: &str,
    slug: &str,
    key_type: KeyType,
    authorization_key: &KeyPair,
    created_at: i64,
) -> Result<(Did, DidDocument, Vec<LogEntry>)> {
    if domain.is_empty() || slug.is_empty() {
        return Err(DidError::Malformed("domain and slug must be non-empty".to_string()));
    }
    let update_key = encode_public_key(key_type, &authorization_key.public_key_bytes())
        .map_err(|e| DidError::Malformed(e.to_string()))?;

    // First pass: build the entry with a placeholder SCID to compute the
    // self-certifying identifier, exactly as the external did:webvh create
    // algorithm does.
    let placeholder_did = webvh_did(domain, slug, SCID_PLACEHOLDER);
    let mut document = DidDocument::new(placeholder_did.clone());
    let vm_id = format!("{placeholder_did}#key-1");
    document.add_verification_method(
        VerificationMethod { id: vm_id, controller: placeholder_did.clone(), key_type, public_key_multibase: update_key.clone() },
        &[VerificationPurpose::Authentication, VerificationPurpose::AssertionMethod],
    );

    let placeholder_entry = LogEntry {
        version_id: SCID_PLACEHOLDER.to_string(),
        version_time: created_at,
        parameters: Parameters {
            method: format!("did:webvh:{METHOD_VERSION}"),
            scid: SCID_PLACEHOLDER.to_string(),
            update_keys: vec![update_key.clone()],
            portable: false,
            next_key_hashes: None,
            witness: None,
            deactivated: false,
            ttl: 0,
        },
        state: document,
        proof: vec![],
    };
    let scid = placeholder_entry.unsigned_hash();

    let did = webvh_did(domain, slug, &scid);
    let mut document = DidDocument::new(did.clone());
    let vm_id = format!("{did}#key-1");
    document.add_verification_method(
        VerificationMethod { id: vm_id, controller: did.clone(), key_type, public_key_multibase: update_key.clone() },
        &[VerificationPurpose::Authentication, VerificationPurpose::AssertionMethod],
    );

    let mut entry = LogEntry {
        version_id: scid.clone(),
        version_time: created_at,
        parameters: Parameters {
            method: format!("did:webvh:{METHOD_VERSION}"),
            scid: scid.clone(),
            update_keys: vec![update_key],
            portable: false,
            next_key_hashes: None,
            witness: None,
            deactivated: false,
            ttl: 0,
        },
        state: document.clone(),
        proof: vec![],
    };
    let entry_hash = entry.unsigned_hash();
    entry.version_id = format!("1-{entry_hash}");

    let digest = sha256(serde_json::to_vec(&entry).unwrap_or_default().as_slice());
    let signature = authorization_key.sign(&digest).map_err(|e| DidError::LogConstruction(e.to_string()))?;
    entry.proof.push(LogEntryProof {
        proof_type: "DataIntegrityProof".to_string(),
        cryptosuite: key_type.default_cryptosuite().to_string(),
        verification_method: format!("{did}#key-1"),
        created: created_at,
        proof_purpose: "authentication".to_string(),
        proof_value: Some(encode_multibase_bytes(&signature)),
    });

    Ok((did, document, vec![entry]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use originals_core::KeyType;

    #[test]
    fn webvh_did_embeds_domain_slug_and_scid() {
        let kp = KeyPair::generate(KeyType::Ed25519).unwrap();
        let (did, _doc, log) = create_webvh_did("example.com", "widget", KeyType::Ed25519, &kp, 1_700_000_000).unwrap();
        assert!(did.starts_with("did:webvh:"));
        assert!(did.ends_with(":example.com:widget"));
        assert_eq!(log.len(), 1);
        assert!(log[0].version_id.starts_with("1-"));
        assert_eq!(log[0].proof.len(), 1);
    }

    #[test]
    fn empty_domain_is_rejected() {
        let kp = KeyPair::generate(KeyType::Ed25519).unwrap();
        assert!(create_webvh_did("", "widget", KeyType::Ed25519, &kp, 0).is_err());
    }
}
