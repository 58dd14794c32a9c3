use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{OriginalsError, Result};
use crate::resource::Resource;

/// One of the six typed manifest kinds, per §4.2.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    App,
    Module,
    Dataset,
    Agent,
    Media,
    Document,
}

impl Kind {
    pub const ALL: [Kind; 6] =
        [Kind::App, Kind::Module, Kind::Dataset, Kind::Agent, Kind::Media, Kind::Document];

    pub const fn short_name(self) -> &'static str {
        match self {
            Kind::App => "app",
            Kind::Module => "module",
            Kind::Dataset => "dataset",
            Kind::Agent => "agent",
            Kind::Media => "media",
            Kind::Document => "document",
        }
    }

    pub const fn uri(self) -> &'static str {
        match self {
            Kind::App => "originals:kind:app",
            Kind::Module => "originals:kind:module",
            Kind::Dataset => "originals:kind:dataset",
            Kind::Agent => "originals:kind:agent",
            Kind::Media => "originals:kind:media",
            Kind::Document => "originals:kind:document",
        }
    }

    /// Accept either a bare short name ("app") or the full
    /// `originals:kind:<name>` URI, per §4.2.
    pub fn parse(s: &str) -> Option<Kind> {
        let short = s.strip_prefix("originals:kind:").unwrap_or(s);
        Kind::ALL.into_iter().find(|k| k.short_name() == short)
    }
}

/// A dependency reference inside a manifest: a DID and optional semver range.
/// The range grammar itself is treated as an opaque string (§9 Open Question).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Dependency {
    pub did: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_range: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Author {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// The typed manifest descriptor, per §3. `metadata` carries the kind-specific
/// block; concrete validators in `originals-kinds` interpret its shape.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct KindManifest {
    pub kind: Kind,
    pub name: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub resources: Vec<Resource>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<Dependency>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<Author>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(default)]
    pub metadata: Value,
}

impl KindManifest {
    /// A bare skeleton for `kind`, suitable as a starting point for
    /// `createTemplate` (§4.2). Carries no resources; callers fill those in.
    pub fn template(kind: Kind, name: impl Into<String>, version: Option<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            version: version.unwrap_or_else(|| "0.1.0".to_string()),
            description: None,
            resources: Vec::new(),
            dependencies: Vec::new(),
            author: None,
            tags: Vec::new(),
            license: None,
            metadata: Value::Object(Default::default()),
        }
    }

    /// Base validation shared by every kind, per §4.2: non-empty name, valid
    /// semver, non-empty unique-id resource list, well-formed dependency DIDs.
    pub fn validate_base(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(OriginalsError::validation("manifest name must not be empty"));
        }
        semver::Version::parse(&self.version)
            .map_err(|e| OriginalsError::validation(format!("invalid semver '{}': {e}", self.version)))?;
        if self.resources.is_empty() {
            return Err(OriginalsError::validation("manifest must declare at least one resource"));
        }
        let mut seen = std::collections::HashSet::new();
        for r in &self.resources {
            if !seen.insert(r.id.as_str()) {
                return Err(OriginalsError::validation(format!("duplicate resource id: {}", r.id)));
            }
        }
        for dep in &self.dependencies {
            let parts: Vec<&str> = dep.did.splitn(3, ':').collect();
            if parts.len() != 3 || parts[0] != "did" || parts[1].is_empty() || parts[2].is_empty() {
                return Err(OriginalsError::validation(format!(
                    "dependency DID is not well-formed: {}",
                    dep.did
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_roundtrips_through_uri_and_short_name() {
        for kind in Kind::ALL {
            assert_eq!(Kind::parse(kind.short_name()), Some(kind));
            assert_eq!(Kind::parse(kind.uri()), Some(kind));
        }
    }

    #[test]
    fn template_fails_base_validation_without_resources() {
        let m = KindManifest::template(Kind::App, "demo", None);
        assert!(m.validate_base().is_err());
    }

    #[test]
    fn malformed_dependency_did_rejected() {
        let mut m = KindManifest::template(Kind::Module, "demo", Some("1.0.0".to_string()));
        m.resources.push(Resource {
            id: "r1".to_string(),
            resource_type: crate::resource::ResourceType::Code,
            content_type: "text/javascript".to_string(),
            hash: "abc".to_string(),
            size: 3,
            version: 1,
            previous_version_hash: None,
            created_at: 0,
            url: None,
            content: None,
        });
        m.dependencies.push(Dependency { did: "not-a-did".to_string(), version_range: None });
        assert!(m.validate_base().is_err());
    }
}
