use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

/// Semantic type tag for a resource, per §3.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Code,
    Text,
    Image,
    Audio,
    Video,
    Document,
    Data,
    Config,
    Other,
}

/// The raw payload of a resource, held either inline or referenced by URL.
/// A resource never carries both; callers that fetch by URL go through a
/// `StorageAdapter`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ResourceContent {
    Bytes(Vec<u8>),
    /// Base64-encoded bytes, used when a resource is reconstructed from a
    /// JSON document without losing binary fidelity.
    Base64(String),
}

impl ResourceContent {
    pub fn as_bytes(&self) -> crate::error::Result<Vec<u8>> {
        use base64::Engine;
        match self {
            ResourceContent::Bytes(b) => Ok(b.clone()),
            ResourceContent::Base64(s) => base64::engine::general_purpose::STANDARD
                .decode(s)
                .map_err(|e| crate::error::OriginalsError::validation(format!(
                    "invalid base64 content: {e}"
                ))),
        }
    }
}

/// A content-addressed, immutable resource version. See §3 and §4.1.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Resource {
    pub id: String,
    pub resource_type: ResourceType,
    pub content_type: String,
    /// Hex-encoded SHA-256 of the raw bytes.
    pub hash: String,
    pub size: u64,
    pub version: u32,
    pub previous_version_hash: Option<String>,
    pub created_at: Timestamp,
    pub url: Option<String>,
    pub content: Option<ResourceContent>,
}

impl Resource {
    /// True iff this is the first version in its history.
    pub fn is_initial_version(&self) -> bool {
        self.version == 1 && self.previous_version_hash.is_none()
    }
}

/// The subset of a `Resource` an `OriginalsAsset` actually carries, per §3.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AssetResource {
    pub id: String,
    pub resource_type: ResourceType,
    pub content_type: String,
    pub hash: String,
    pub size: Option<u64>,
    pub url: Option<String>,
}

impl From<&Resource> for AssetResource {
    fn from(r: &Resource) -> Self {
        AssetResource {
            id: r.id.clone(),
            resource_type: r.resource_type,
            content_type: r.content_type.clone(),
            hash: r.hash.clone(),
            size: Some(r.size),
            url: r.url.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self { valid: true, errors: Vec::new(), warnings: Vec::new() }
    }

    pub fn with_errors(errors: Vec<String>) -> Self {
        Self { valid: errors.is_empty(), errors, warnings: Vec::new() }
    }
}
