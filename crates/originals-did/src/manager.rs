use originals_core::{Did, DidDocument, KeyType};
use originals_crypto::KeyPair;

use crate::error::{DidError, Result};
use crate::peer::create_peer_did;
use crate::webvh::{create_webvh_did, LogEntry};

/// Which identity layer to mint a DID for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DidMethod {
    Peer,
    Webvh,
}

#[derive(Clone, Debug, Default)]
pub struct CreateDidOptions {
    pub key_type: Option<KeyType>,
    pub domain: Option<String>,
    pub slug: Option<String>,
}

pub struct CreatedDid {
    pub did: Did,
    pub did_document: DidDocument,
    pub key_pair: KeyPair,
    pub log_entries: Vec<LogEntry>,
}

/// Resolves a DID to its current document. Implementations may reach a
/// did:webvh log host, a did:btco inscription index, or nothing at all;
/// callers without a resolver fall back to the proof's inline multibase key
/// (§4.3 constraint), which this manager does not itself perform.
pub trait DidResolver: Send + Sync {
    fn resolve(&self, did: &str) -> Result<DidDocument>;
}

/// Creates and resolves DIDs across all three identity layers. Holds no
/// process-wide state; an optional resolver may be injected for methods
/// that require external lookup.
pub struct DidManager {
    default_key_type: KeyType,
    resolver: Option<Box<dyn DidResolver>>,
}

impl Default for DidManager {
    fn default() -> Self {
        Self::new(KeyType::Ed25519)
    }
}

impl DidManager {
    pub fn new(default_key_type: KeyType) -> Self {
        Self { default_key_type, resolver: None }
    }

    pub fn with_resolver(mut self, resolver: Box<dyn DidResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    fn key_type_for(&self, options: &CreateDidOptions) -> KeyType {
        options.key_type.unwrap_or(self.default_key_type)
    }

    /// Create a DID under the requested method, generating a fresh key pair.
    pub fn create_did(&self, method: DidMethod, options: CreateDidOptions) -> Result<CreatedDid> {
        match method {
            DidMethod::Peer => self.create_peer(options),
            DidMethod::Webvh => self.create_webvh(options),
        }
    }

    fn create_peer(&self, options: CreateDidOptions) -> Result<CreatedDid> {
        let key_type = self.key_type_for(&options);
        let key_pair = KeyPair::generate(key_type).map_err(|e| DidError::Malformed(e.to_string()))?;
        let (did, did_document) = create_peer_did(key_type, &key_pair.public_key_bytes())?;
        Ok(CreatedDid { did, did_document, key_pair, log_entries: Vec::new() })
    }

    /// Create a `did:webvh` identifier. Equivalent to `createDID(Webvh, ..)`
    /// but named separately since it is the method most callers reach for
    /// directly, per §4.3.
    pub fn create_webvh(&self, options: CreateDidOptions) -> Result<CreatedDid> {
        let key_type = self.key_type_for(&options);
        let domain = options.domain.ok_or_else(|| DidError::Malformed("did:webvh requires a domain".to_string()))?;
        let slug = options.slug.unwrap_or_else(|| "default".to_string());
        let key_pair = KeyPair::generate(key_type).map_err(|e| DidError::Malformed(e.to_string()))?;
        let created_at = chrono::Utc::now().timestamp();
        let (did, did_document, log_entries) = create_webvh_did(&domain, &slug, key_type, &key_pair, created_at)?;
        Ok(CreatedDid { did, did_document, key_pair, log_entries })
    }

    /// Resolve a DID to its current document, consulting the injected
    /// resolver when present. Without one, only self-certifying
    /// `did:peer` identifiers can be resolved locally.
    pub fn resolve_did(&self, did: &str) -> Result<DidDocument> {
        if let Some(resolver) = &self.resolver {
            return resolver.resolve(did);
        }
        if did.starts_with("did:peer:0") {
            let multikey = crate::peer::peer_multikey(did)?;
            let (key_type, raw) = originals_crypto::decode_public_key_any(multikey).map_err(|e| DidError::ResolutionFailed(e.to_string()))?;
            let (_, document) = create_peer_did(key_type, &raw)?;
            return Ok(document);
        }
        Err(DidError::ResolutionFailed(format!("no resolver configured for {did}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_peer_without_resolver_resolves_locally() {
        let manager = DidManager::new(KeyType::Ed25519);
        let created = manager.create_did(DidMethod::Peer, CreateDidOptions::default()).unwrap();
        let resolved = manager.resolve_did(&created.did).unwrap();
        assert_eq!(resolved.id, created.did);
    }

    #[test]
    fn create_webvh_requires_a_domain() {
        let manager = DidManager::new(KeyType::Ed25519);
        let err = manager.create_did(DidMethod::Webvh, CreateDidOptions::default());
        assert!(err.is_err());
    }

    #[test]
    fn create_webvh_with_domain_succeeds() {
        let manager = DidManager::new(KeyType::Ed25519);
        let options = CreateDidOptions { domain: Some("example.com".to_string()), slug: Some("thing".to_string()), ..Default::default() };
        let created = manager.create_did(DidMethod::Webvh, options).unwrap();
        assert!(created.did.starts_with("did:webvh:"));
        assert_eq!(created.log_entries.len(), 1);
    }

    struct NeverResolves;
    impl DidResolver for NeverResolves {
        fn resolve(&self, did: &str) -> Result<DidDocument> {
            Err(DidError::ResolutionFailed(format!("unreachable: {did}")))
        }
    }

    #[test]
    fn injected_resolver_is_consulted_even_for_peer_dids() {
        let manager = DidManager::new(KeyType::Ed25519).with_resolver(Box::new(NeverResolves));
        let created = manager.create_did(DidMethod::Peer, CreateDidOptions::default()).unwrap();
        assert!(manager.resolve_did(&created.did).is_err());
    }
}
