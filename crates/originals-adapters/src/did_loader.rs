use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use originals_core::{OriginalsError, Result};

/// The document fragment a DID-document loader returns: enough to verify a
/// proof without resolving the full document, per §6.
#[derive(Clone, Debug, PartialEq)]
pub struct LoadedVerificationMethod {
    pub public_key_multibase: String,
}

#[async_trait]
pub trait DidDocumentLoader: Send + Sync {
    async fn load(&self, verification_method_id: &str) -> Result<LoadedVerificationMethod>;
}

/// A loader backed by a fixed, in-memory table, for tests and the demo CLI.
#[derive(Default)]
pub struct StaticDidDocumentLoader {
    entries: RwLock<HashMap<String, String>>,
}

impl StaticDidDocumentLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, verification_method_id: impl Into<String>, public_key_multibase: impl Into<String>) {
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(verification_method_id.into(), public_key_multibase.into());
        }
    }
}

#[async_trait]
impl DidDocumentLoader for StaticDidDocumentLoader {
    async fn load(&self, verification_method_id: &str) -> Result<LoadedVerificationMethod> {
        let entries = self.entries.read().map_err(|_| OriginalsError::network("did loader state poisoned", false))?;
        entries
            .get(verification_method_id)
            .map(|multibase| LoadedVerificationMethod { public_key_multibase: multibase.clone() })
            .ok_or_else(|| OriginalsError::not_found(format!("no entry for {verification_method_id}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn registered_entries_are_loadable() {
        let loader = StaticDidDocumentLoader::new();
        loader.register("did:webvh:abc:example.com:widget#key-1", "z6Mk...");
        let loaded = loader.load("did:webvh:abc:example.com:widget#key-1").await.unwrap();
        assert_eq!(loaded.public_key_multibase, "z6Mk...");
    }

    #[tokio::test]
    async fn unregistered_verification_methods_are_not_found() {
        let loader = StaticDidDocumentLoader::new();
        assert!(loader.load("did:webvh:missing#key-1").await.is_err());
    }
}
