use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use originals_core::{OriginalsError, Result};
use serde_json::Value;

/// Publishes content-addressed resource bytes to URLs reachable under a
/// `did:webvh` domain's well-known path, per §6.
#[async_trait]
pub trait StorageAdapter: Send + Sync {
    async fn put(&self, content_hash: &str, bytes: &[u8], content_type: &str, metadata: Option<Value>) -> Result<String>;
    async fn get(&self, content_hash: &str) -> Result<Option<Vec<u8>>>;
    fn url_for(&self, content_hash: &str) -> String;
}

struct StoredObject {
    bytes: Vec<u8>,
    #[allow(dead_code)]
    content_type: String,
    #[allow(dead_code)]
    metadata: Option<Value>,
}

/// In-memory storage adapter publishing under
/// `https://<domain>/.well-known/webvh/<slug>/resources/<hash>`.
pub struct InMemoryStorageAdapter {
    domain: String,
    slug: String,
    objects: Mutex<HashMap<String, StoredObject>>,
}

impl InMemoryStorageAdapter {
    pub fn new(domain: impl Into<String>, slug: impl Into<String>) -> Self {
        Self { domain: domain.into(), slug: slug.into(), objects: Mutex::new(HashMap::new()) }
    }
}

#[async_trait]
impl StorageAdapter for InMemoryStorageAdapter {
    async fn put(&self, content_hash: &str, bytes: &[u8], content_type: &str, metadata: Option<Value>) -> Result<String> {
        let mut objects = self.objects.lock().map_err(|_| OriginalsError::network("storage state poisoned", false))?;
        objects.insert(content_hash.to_string(), StoredObject { bytes: bytes.to_vec(), content_type: content_type.to_string(), metadata });
        Ok(self.url_for(content_hash))
    }

    async fn get(&self, content_hash: &str) -> Result<Option<Vec<u8>>> {
        let objects = self.objects.lock().map_err(|_| OriginalsError::network("storage state poisoned", false))?;
        Ok(objects.get(content_hash).map(|o| o.bytes.clone()))
    }

    fn url_for(&self, content_hash: &str) -> String {
        format!("https://{}/.well-known/webvh/{}/resources/{}", self.domain, self.slug, content_hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_then_get_round_trips_the_bytes() {
        let adapter = InMemoryStorageAdapter::new("example.com", "widget");
        adapter.put("abc123", b"hello", "text/plain", None).await.unwrap();
        let fetched = adapter.get("abc123").await.unwrap();
        assert_eq!(fetched.unwrap(), b"hello");
    }

    #[test]
    fn url_for_follows_the_well_known_webvh_layout() {
        let adapter = InMemoryStorageAdapter::new("example.com", "widget");
        assert_eq!(adapter.url_for("abc123"), "https://example.com/.well-known/webvh/widget/resources/abc123");
    }
}
