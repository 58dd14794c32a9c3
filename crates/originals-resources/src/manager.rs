use std::collections::HashMap;

use originals_core::{
    OriginalsError, Resource, ResourceContent, ResourceType, Result, Timestamp, ValidationResult,
    DEFAULT_MAX_RESOURCE_BYTES,
};
use tracing::{info, warn};

/// Options accepted by `ResourceManager::create`, per §4.1.
#[derive(Clone, Debug)]
pub struct CreateOptions {
    pub id: Option<String>,
    pub resource_type: Option<ResourceType>,
    pub content_type: Option<String>,
    pub max_size_bytes: Option<u64>,
    pub allowed_content_types: Option<Vec<String>>,
}

impl Default for CreateOptions {
    fn default() -> Self {
        Self { id: None, resource_type: None, content_type: None, max_size_bytes: None, allowed_content_types: None }
    }
}

/// Process-local resource history store. The manager owns no persistence of
/// its own; callers needing cross-process consistency go through
/// `import`/`export` rather than sharing this struct's internals.
#[derive(Default)]
pub struct ResourceManager {
    histories: HashMap<String, Vec<Resource>>,
    by_hash: HashMap<String, (String, u32)>,
}

fn validate_content_type(content_type: &str) -> Result<()> {
    let parts: Vec<&str> = content_type.splitn(2, '/').collect();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        return Err(OriginalsError::validation(format!(
            "content type '{content_type}' is not of the form a/b"
        )));
    }
    Ok(())
}

impl ResourceManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hash_content(&self, bytes: &[u8]) -> String {
        originals_crypto::sha256_hex(bytes)
    }

    /// Create the first version of a resource. Fails per §4.1's contract:
    /// missing type/content-type, malformed content-type, oversize content,
    /// or a content type outside an optional allow-list.
    pub fn create(&mut self, content: &[u8], options: CreateOptions, now: Timestamp) -> Result<Resource> {
        let resource_type = options
            .resource_type
            .ok_or_else(|| OriginalsError::validation("resource type is required"))?;
        let content_type = options
            .content_type
            .ok_or_else(|| OriginalsError::validation("content type is required"))?;
        validate_content_type(&content_type)?;

        let max_size = options.max_size_bytes.unwrap_or(DEFAULT_MAX_RESOURCE_BYTES);
        if content.len() as u64 > max_size {
            return Err(OriginalsError::validation(format!(
                "content size {} exceeds maximum of {max_size} bytes",
                content.len()
            )));
        }
        if let Some(allowed) = &options.allowed_content_types {
            if !allowed.iter().any(|a| a == &content_type) {
                return Err(OriginalsError::validation(format!(
                    "content type '{content_type}' is not in the allowed list"
                )));
            }
        }

        let hash = self.hash_content(content);
        let id = options.id.unwrap_or_else(|| hash.clone());
        if self.histories.contains_key(&id) {
            return Err(OriginalsError::conflict(format!("resource id already exists: {id}")));
        }

        let resource = Resource {
            id: id.clone(),
            resource_type,
            content_type,
            hash: hash.clone(),
            size: content.len() as u64,
            version: 1,
            previous_version_hash: None,
            created_at: now,
            url: None,
            content: Some(ResourceContent::Bytes(content.to_vec())),
        };
        self.histories.insert(id.clone(), vec![resource.clone()]);
        self.by_hash.insert(hash, (id, 1));
        info!(resource_id = %resource.id, "created resource");
        Ok(resource)
    }

    /// Produce a new version of an existing resource. No-op content updates
    /// (identical hash) are rejected, per §4.1.
    pub fn update(&mut self, id: &str, new_content: &[u8], now: Timestamp) -> Result<Resource> {
        let history = self.histories.get(id).ok_or_else(|| OriginalsError::not_found(format!("resource not found: {id}")))?;
        let prior = history.last().ok_or_else(|| OriginalsError::not_found(format!("resource not found: {id}")))?;
        let new_hash = self.hash_content(new_content);
        if new_hash == prior.hash {
            return Err(OriginalsError::validation("update content is identical to the current version"));
        }
        let next = Resource {
            id: id.to_string(),
            resource_type: prior.resource_type,
            content_type: prior.content_type.clone(),
            hash: new_hash.clone(),
            size: new_content.len() as u64,
            version: prior.version + 1,
            previous_version_hash: Some(prior.hash.clone()),
            created_at: now,
            url: None,
            content: Some(ResourceContent::Bytes(new_content.to_vec())),
        };
        let version = next.version;
        self.histories.get_mut(id).unwrap().push(next.clone());
        self.by_hash.insert(new_hash, (id.to_string(), version));
        info!(resource_id = %id, version, "updated resource");
        Ok(next)
    }

    pub fn history(&self, id: &str) -> Vec<Resource> {
        self.histories.get(id).cloned().unwrap_or_default()
    }

    pub fn version_at(&self, id: &str, version: u32) -> Option<Resource> {
        self.histories.get(id)?.iter().find(|r| r.version == version).cloned()
    }

    pub fn current(&self, id: &str) -> Option<Resource> {
        self.histories.get(id)?.last().cloned()
    }

    pub fn by_hash(&self, hash: &str) -> Option<Resource> {
        let (id, version) = self.by_hash.get(hash)?;
        self.version_at(id, *version)
    }

    /// Structural validation of a single resource, independent of history.
    pub fn validate(&self, resource: &Resource) -> ValidationResult {
        let mut errors = Vec::new();
        if resource.id.trim().is_empty() {
            errors.push("resource id must not be empty".to_string());
        }
        if validate_content_type(&resource.content_type).is_err() {
            errors.push(format!("content type '{}' is not of the form a/b", resource.content_type));
        }
        if resource.version == 0 {
            errors.push("resource version must be >= 1".to_string());
        }
        if resource.version == 1 && resource.previous_version_hash.is_some() {
            errors.push("version 1 must not carry a previous_version_hash".to_string());
        }
        ValidationResult::with_errors(errors)
    }

    /// Walk `id`'s full history; valid iff every version ≥2's
    /// `previous_version_hash` equals the preceding version's hash.
    pub fn verify_chain(&self, id: &str) -> ValidationResult {
        let history = match self.histories.get(id) {
            Some(h) => h,
            None => return ValidationResult::with_errors(vec![format!("resource not found: {id}")]),
        };
        let mut errors = Vec::new();
        for pair in history.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            match &next.previous_version_hash {
                Some(h) if h == &prev.hash => {}
                _ => errors.push(format!(
                    "version {} does not chain from version {}",
                    next.version, prev.version
                )),
            }
        }
        ValidationResult::with_errors(errors)
    }

    pub fn delete(&mut self, id: &str) -> bool {
        match self.histories.remove(id) {
            Some(history) => {
                for r in history {
                    self.by_hash.remove(&r.hash);
                }
                warn!(resource_id = %id, "deleted resource history");
                true
            }
            None => false,
        }
    }

    /// Import a resource version, de-duplicated by (id, version): importing
    /// an identical version already present is a no-op.
    pub fn import(&mut self, resource: Resource) -> Result<Resource> {
        let history = self.histories.entry(resource.id.clone()).or_default();
        if let Some(existing) = history.iter().find(|r| r.version == resource.version) {
            if existing.hash == resource.hash {
                return Ok(existing.clone());
            }
            return Err(OriginalsError::conflict(format!(
                "resource {} version {} already imported with a different hash",
                resource.id, resource.version
            )));
        }
        self.by_hash.insert(resource.hash.clone(), (resource.id.clone(), resource.version));
        history.push(resource.clone());
        history.sort_by_key(|r| r.version);
        Ok(resource)
    }

    pub fn export(&self) -> Vec<Resource> {
        let mut all: Vec<Resource> = self.histories.values().flat_map(|h| h.iter().cloned()).collect();
        all.sort_by(|a, b| a.id.cmp(&b.id).then(a.version.cmp(&b.version)));
        all
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(content_type: &str) -> CreateOptions {
        CreateOptions { resource_type: Some(ResourceType::Text), content_type: Some(content_type.to_string()), ..Default::default() }
    }

    #[test]
    fn equivalent_string_and_bytes_hash_identically() {
        let mgr = ResourceManager::new();
        let s = "hello";
        assert_eq!(mgr.hash_content(s.as_bytes()), mgr.hash_content(s.to_string().into_bytes().as_slice()));
    }

    #[test]
    fn create_rejects_malformed_content_type() {
        let mut mgr = ResourceManager::new();
        let err = mgr.create(b"data", opts("not-a-mime"), 0).unwrap_err();
        assert!(matches!(err, OriginalsError::ValidationError(_)));
    }

    #[test]
    fn create_rejects_oversize_content() {
        let mut mgr = ResourceManager::new();
        let options = CreateOptions { max_size_bytes: Some(4), ..opts("text/plain") };
        assert!(mgr.create(b"too big", options, 0).is_err());
    }

    #[test]
    fn update_rejects_identical_content() {
        let mut mgr = ResourceManager::new();
        let r = mgr.create(b"hello", opts("text/plain"), 0).unwrap();
        assert!(mgr.update(&r.id, b"hello", 1).is_err());
    }

    #[test]
    fn update_chains_previous_version_hash() {
        let mut mgr = ResourceManager::new();
        let r1 = mgr.create(b"v1", opts("text/plain"), 0).unwrap();
        let r2 = mgr.update(&r1.id, b"v2", 1).unwrap();
        assert_eq!(r2.version, 2);
        assert_eq!(r2.previous_version_hash.as_deref(), Some(r1.hash.as_str()));
        assert!(mgr.verify_chain(&r1.id).valid);
    }

    #[test]
    fn import_is_idempotent_for_identical_version() {
        let mut mgr = ResourceManager::new();
        let r = mgr.create(b"hello", opts("text/plain"), 0).unwrap();
        let reimported = mgr.import(r.clone()).unwrap();
        assert_eq!(reimported.hash, r.hash);
        assert_eq!(mgr.history(&r.id).len(), 1);
    }

    #[test]
    fn by_hash_finds_specific_version() {
        let mut mgr = ResourceManager::new();
        let r1 = mgr.create(b"v1", opts("text/plain"), 0).unwrap();
        let found = mgr.by_hash(&r1.hash).unwrap();
        assert_eq!(found.version, 1);
    }
}
