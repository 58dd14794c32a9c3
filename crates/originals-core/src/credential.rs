use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::{Did, Timestamp};

/// The specific VC subtype, carried alongside `"VerifiableCredential"` in a
/// credential's `type` list. See §3.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CredentialSubtype {
    ResourceCreated,
    ResourceUpdated,
    ResourceMigrated,
    MigrationCompleted,
    OwnershipTransferred,
}

impl CredentialSubtype {
    pub const fn as_str(self) -> &'static str {
        match self {
            CredentialSubtype::ResourceCreated => "ResourceCreated",
            CredentialSubtype::ResourceUpdated => "ResourceUpdated",
            CredentialSubtype::ResourceMigrated => "ResourceMigrated",
            CredentialSubtype::MigrationCompleted => "MigrationCompleted",
            CredentialSubtype::OwnershipTransferred => "OwnershipTransferred",
        }
    }
}

/// A reference to a predecessor credential, enabling chaining (§3, §4.4).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PreviousCredential {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
}

/// The credential subject: always carries `id` (the subject DID) plus
/// subtype-specific fields folded into the same JSON object, plus an
/// optional chain link.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CredentialSubject {
    pub id: Did,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_credential: Option<PreviousCredential>,
    /// Subtype-specific fields (e.g. `resourceId`, `targetDid`, `fromAddress`),
    /// flattened into the subject object at serialization time by callers
    /// that build the JSON-LD representation from this value.
    #[serde(default)]
    pub fields: Value,
}

/// A Data-Integrity proof, per §3.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Proof {
    #[serde(rename = "type")]
    pub proof_type: String,
    pub cryptosuite: String,
    pub created: Timestamp,
    pub verification_method: String,
    pub proof_purpose: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proof_value: Option<String>,
}

impl Proof {
    pub fn unsigned(cryptosuite: impl Into<String>, verification_method: impl Into<String>, created: Timestamp) -> Self {
        Self {
            proof_type: "DataIntegrityProof".to_string(),
            cryptosuite: cryptosuite.into(),
            created,
            verification_method: verification_method.into(),
            proof_purpose: "assertionMethod".to_string(),
            proof_value: None,
        }
    }
}

/// A W3C Verifiable Credential, per §3.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct VerifiableCredential {
    #[serde(rename = "@context")]
    pub context: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub types: Vec<String>,
    pub issuer: Did,
    pub issuance_date: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<Timestamp>,
    pub credential_subject: CredentialSubject,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proof: Option<Proof>,
}

impl VerifiableCredential {
    pub fn subtype(&self) -> Option<CredentialSubtype> {
        for t in &self.types {
            let st = match t.as_str() {
                "ResourceCreated" => CredentialSubtype::ResourceCreated,
                "ResourceUpdated" => CredentialSubtype::ResourceUpdated,
                "ResourceMigrated" => CredentialSubtype::ResourceMigrated,
                "MigrationCompleted" => CredentialSubtype::MigrationCompleted,
                "OwnershipTransferred" => CredentialSubtype::OwnershipTransferred,
                _ => continue,
            };
            return Some(st);
        }
        None
    }

    pub fn is_signed(&self) -> bool {
        self.proof.as_ref().is_some_and(|p| p.proof_value.is_some())
    }

    /// The credential with its proof removed, for re-canonicalizing during
    /// verification (§4.4's "canonicalize the credential sans its proof").
    pub fn without_proof(&self) -> Self {
        let mut c = self.clone();
        c.proof = None;
        c
    }
}

/// A Verifiable Presentation wrapping one or more credentials, per §4.4's
/// `createPresentation`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct VerifiablePresentation {
    #[serde(rename = "@context")]
    pub context: Vec<String>,
    #[serde(rename = "type")]
    pub types: Vec<String>,
    pub holder: Did,
    pub verifiable_credential: Vec<VerifiableCredential>,
}
