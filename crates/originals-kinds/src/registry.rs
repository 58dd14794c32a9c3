use std::collections::HashMap;
use std::sync::RwLock;

use once_cell::sync::Lazy;
use originals_core::{Kind, KindManifest, OriginalsError, Result, ValidationResult};

use crate::validators::{default_validator, KindValidator};

/// Options accepted by `KindRegistry::validate`, per §4.2.
#[derive(Clone, Copy, Debug, Default)]
pub struct ValidateOptions {
    pub strict_mode: bool,
    pub skip_validation: bool,
}

pub struct KindRegistry {
    validators: RwLock<HashMap<Kind, Box<dyn KindValidator>>>,
}

impl KindRegistry {
    fn new() -> Self {
        let mut validators: HashMap<Kind, Box<dyn KindValidator>> = HashMap::new();
        for kind in Kind::ALL {
            validators.insert(kind, default_validator(kind));
        }
        Self { validators: RwLock::new(validators) }
    }

    /// Replace the validator registered for `kind`, e.g. to tighten a host
    /// application's rules beyond the base set.
    pub fn register_validator(&self, kind: Kind, validator: Box<dyn KindValidator>) {
        self.validators.write().unwrap().insert(kind, validator);
    }

    pub fn validate(&self, manifest: &KindManifest, options: ValidateOptions) -> ValidationResult {
        if options.skip_validation {
            return ValidationResult::ok();
        }
        let validators = self.validators.read().unwrap();
        match validators.get(&manifest.kind) {
            Some(v) => v.validate(manifest, options.strict_mode),
            None => ValidationResult::with_errors(vec![format!("no validator registered for kind {:?}", manifest.kind)]),
        }
    }

    pub fn validate_or_throw(&self, manifest: &KindManifest, options: ValidateOptions) -> Result<()> {
        let result = self.validate(manifest, options);
        if result.valid {
            Ok(())
        } else {
            Err(OriginalsError::validation(result.errors.join("; ")))
        }
    }

    pub fn create_template(&self, kind: Kind, name: impl Into<String>, version: Option<String>) -> KindManifest {
        KindManifest::template(kind, name, version)
    }
}

/// The process-wide, read-mostly, initialize-once registry singleton named
/// in §9's dependency-inversion note: callers that need their own isolated
/// registry can still construct `KindRegistry` directly.
pub static GLOBAL_KIND_REGISTRY: Lazy<KindRegistry> = Lazy::new(KindRegistry::new);

#[cfg(test)]
mod tests {
    use super::*;
    use originals_core::ResourceType;
    use serde_json::json;

    fn sample_manifest(kind: Kind, metadata: serde_json::Value) -> KindManifest {
        let mut m = KindManifest::template(kind, "demo", Some("1.0.0".to_string()));
        m.resources.push(originals_core::Resource {
            id: "r1".to_string(),
            resource_type: ResourceType::Code,
            content_type: "application/javascript".to_string(),
            hash: "abc".to_string(),
            size: 1,
            version: 1,
            previous_version_hash: None,
            created_at: 0,
            url: None,
            content: None,
        });
        m.metadata = metadata;
        m
    }

    #[test]
    fn app_manifest_requires_runtime_and_entrypoint() {
        let m = sample_manifest(Kind::App, json!({}));
        let result = GLOBAL_KIND_REGISTRY.validate(&m, ValidateOptions::default());
        assert!(!result.valid);
    }

    #[test]
    fn app_manifest_passes_with_required_fields() {
        let m = sample_manifest(Kind::App, json!({"runtime": "node", "entrypoint": "index.js"}));
        let result = GLOBAL_KIND_REGISTRY.validate(&m, ValidateOptions::default());
        assert!(result.valid);
    }

    #[test]
    fn strict_mode_promotes_runtime_warning_to_error() {
        let m = sample_manifest(Kind::App, json!({"runtime": "fortran", "entrypoint": "main.f90"}));
        let lenient = GLOBAL_KIND_REGISTRY.validate(&m, ValidateOptions::default());
        assert!(lenient.valid);
        assert!(!lenient.warnings.is_empty());

        let strict = GLOBAL_KIND_REGISTRY.validate(&m, ValidateOptions { strict_mode: true, skip_validation: false });
        assert!(!strict.valid);
    }

    #[test]
    fn skip_validation_always_passes() {
        let m = sample_manifest(Kind::App, json!({}));
        let result = GLOBAL_KIND_REGISTRY.validate(&m, ValidateOptions { strict_mode: false, skip_validation: true });
        assert!(result.valid);
    }
}
