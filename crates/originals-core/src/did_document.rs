use serde::{Deserialize, Serialize};

use crate::types::{Did, KeyType};

/// A public-key binding inside a DID document, per §3.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct VerificationMethod {
    /// A DID URL with a fragment, e.g. `did:peer:z6Mk...#key-1`.
    pub id: String,
    pub controller: Did,
    #[serde(rename = "type")]
    pub key_type: KeyType,
    /// Multibase-encoded, multicodec-prefixed public key.
    pub public_key_multibase: String,
}

/// The purpose lists a verification method may be registered under.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum VerificationPurpose {
    Authentication,
    AssertionMethod,
    CapabilityInvocation,
    CapabilityDelegation,
}

/// Fields present only on an inscribed `did:btco` document. Once set, these
/// must never change (§3 invariant).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct InscriptionBinding {
    pub satoshi: u64,
    pub inscription_id: String,
    pub reveal_tx_id: String,
}

/// A DID document, shared across all three layers. `inscription` is `Some`
/// only for `did:btco` documents that have completed inscription.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DidDocument {
    pub id: Did,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controller: Option<Vec<Did>>,
    pub verification_method: Vec<VerificationMethod>,
    #[serde(default)]
    pub authentication: Vec<String>,
    #[serde(default)]
    pub assertion_method: Vec<String>,
    #[serde(default)]
    pub capability_invocation: Vec<String>,
    #[serde(default)]
    pub capability_delegation: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inscription: Option<InscriptionBinding>,
}

impl DidDocument {
    pub fn new(id: Did) -> Self {
        Self {
            id,
            controller: None,
            verification_method: Vec::new(),
            authentication: Vec::new(),
            assertion_method: Vec::new(),
            capability_invocation: Vec::new(),
            capability_delegation: Vec::new(),
            inscription: None,
        }
    }

    /// Register `method` for the given purposes, pushing its id onto each
    /// corresponding purpose list.
    pub fn add_verification_method(
        &mut self,
        method: VerificationMethod,
        purposes: &[VerificationPurpose],
    ) {
        let vm_id = method.id.clone();
        self.verification_method.push(method);
        for p in purposes {
            let list = match p {
                VerificationPurpose::Authentication => &mut self.authentication,
                VerificationPurpose::AssertionMethod => &mut self.assertion_method,
                VerificationPurpose::CapabilityInvocation => &mut self.capability_invocation,
                VerificationPurpose::CapabilityDelegation => &mut self.capability_delegation,
            };
            if !list.contains(&vm_id) {
                list.push(vm_id.clone());
            }
        }
    }

    pub fn find_verification_method(&self, id: &str) -> Option<&VerificationMethod> {
        self.verification_method.iter().find(|vm| vm.id == id)
    }

    /// The verification method registered for `assertionMethod`, if unambiguous.
    pub fn assertion_method_key(&self) -> Option<&VerificationMethod> {
        let id = self.assertion_method.first()?;
        self.find_verification_method(id)
    }
}
