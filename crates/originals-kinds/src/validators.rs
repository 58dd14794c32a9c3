use originals_core::{Kind, KindManifest, ValidationResult};
use serde_json::Value;

/// A pluggable per-kind validator, registered in the `KindRegistry`.
pub trait KindValidator: Send + Sync {
    fn validate(&self, manifest: &KindManifest, strict: bool) -> ValidationResult;
}

fn metadata_str<'a>(metadata: &'a Value, field: &str) -> Option<&'a str> {
    metadata.get(field).and_then(Value::as_str)
}

fn promote(mut result: ValidationResult, warnings: Vec<String>, strict: bool) -> ValidationResult {
    if strict {
        result.errors.extend(warnings);
    } else {
        result.warnings.extend(warnings);
    }
    result.valid = result.errors.is_empty();
    result
}

/// Runs `KindManifest::validate_base` and folds the result into a fresh
/// `ValidationResult`, letting each concrete validator push onto it.
fn base(manifest: &KindManifest) -> ValidationResult {
    match manifest.validate_base() {
        Ok(()) => ValidationResult::ok(),
        Err(e) => ValidationResult::with_errors(vec![e.to_string()]),
    }
}

pub struct AppValidator;
impl KindValidator for AppValidator {
    fn validate(&self, manifest: &KindManifest, strict: bool) -> ValidationResult {
        let mut result = base(manifest);
        let mut warnings = Vec::new();
        match metadata_str(&manifest.metadata, "runtime") {
            Some(rt) if ["node", "bun", "deno", "python", "go", "browser", "other"].contains(&rt) => {}
            Some(other) => warnings.push(format!("unrecognized runtime '{other}'")),
            None => result.errors.push("app metadata must declare a runtime".to_string()),
        }
        if metadata_str(&manifest.metadata, "entrypoint").is_none() {
            result.errors.push("app metadata must declare an entrypoint".to_string());
        }
        if let Some(platforms) = manifest.metadata.get("platforms").and_then(Value::as_array) {
            for p in platforms {
                if !matches!(p.as_str(), Some("linux") | Some("darwin") | Some("windows")) {
                    result.errors.push(format!("invalid platform: {p}"));
                }
            }
        }
        result.valid = result.errors.is_empty();
        promote(result, warnings, strict)
    }
}

pub struct ModuleValidator;
impl KindValidator for ModuleValidator {
    fn validate(&self, manifest: &KindManifest, strict: bool) -> ValidationResult {
        let mut result = base(manifest);
        let mut warnings = Vec::new();
        match metadata_str(&manifest.metadata, "format") {
            Some(f) if ["esm", "cjs", "umd", "system"].contains(&f) => {}
            _ => result.errors.push("module metadata must declare format ∈ {esm, cjs, umd, system}".to_string()),
        }
        if metadata_str(&manifest.metadata, "main").is_none() {
            result.errors.push("module metadata must declare main".to_string());
        }
        if metadata_str(&manifest.metadata, "types").is_none() {
            warnings.push("module metadata has no types entry".to_string());
        }
        result.valid = result.errors.is_empty();
        promote(result, warnings, strict)
    }
}

pub struct DatasetValidator;
impl KindValidator for DatasetValidator {
    fn validate(&self, manifest: &KindManifest, strict: bool) -> ValidationResult {
        let mut result = base(manifest);
        if manifest.metadata.get("schema").is_none() {
            result.errors.push("dataset metadata must declare a schema".to_string());
        }
        if let Some(columns) = manifest.metadata.get("columns").and_then(Value::as_array) {
            let mut seen = std::collections::HashSet::new();
            for c in columns {
                if let Some(name) = c.as_str() {
                    if !seen.insert(name) {
                        result.errors.push(format!("duplicate column name: {name}"));
                    }
                }
            }
        }
        match metadata_str(&manifest.metadata, "privacy") {
            Some(p) if ["public", "private", "internal", "confidential"].contains(&p) => {}
            Some(other) => result.errors.push(format!("invalid privacy level: {other}")),
            None => {}
        }
        result.valid = result.errors.is_empty();
        promote(result, Vec::new(), strict)
    }
}

pub struct AgentValidator;
impl KindValidator for AgentValidator {
    fn validate(&self, manifest: &KindManifest, strict: bool) -> ValidationResult {
        let mut result = base(manifest);
        match manifest.metadata.get("capabilities").and_then(Value::as_array) {
            Some(caps) if !caps.is_empty() => {}
            _ => result.errors.push("agent metadata must declare non-empty capabilities".to_string()),
        }
        if let Some(memory_type) = manifest.metadata.get("memory").and_then(|m| m.get("type")).and_then(Value::as_str) {
            if !["session", "persistent", "none"].contains(&memory_type) {
                result.errors.push(format!("invalid memory.type: {memory_type}"));
            }
        }
        if let Some(tools) = manifest.metadata.get("tools").and_then(Value::as_array) {
            for tool in tools {
                if tool.get("name").and_then(Value::as_str).is_none() {
                    result.errors.push("every tool entry must name the tool".to_string());
                }
            }
        }
        result.valid = result.errors.is_empty();
        promote(result, Vec::new(), strict)
    }
}

pub struct MediaValidator;
impl KindValidator for MediaValidator {
    fn validate(&self, manifest: &KindManifest, strict: bool) -> ValidationResult {
        let mut result = base(manifest);
        let mut warnings = Vec::new();
        let media_type = metadata_str(&manifest.metadata, "mediaType");
        match media_type {
            Some(m) if ["image", "audio", "video", "animation", "other"].contains(&m) => {}
            _ => result.errors.push("media metadata must declare mediaType ∈ {image, audio, video, animation, other}".to_string()),
        }
        if manifest.resources.iter().all(|r| r.content_type.splitn(2, '/').count() != 2) {
            result.errors.push("media resources must carry a valid MIME content type".to_string());
        }
        if let (Some(w), Some(h)) = (
            manifest.metadata.get("width").and_then(Value::as_i64),
            manifest.metadata.get("height").and_then(Value::as_i64),
        ) {
            if w <= 0 || h <= 0 {
                result.errors.push("width and height must be positive when given".to_string());
            }
        }
        if media_type == Some("image") && manifest.metadata.get("alt").and_then(Value::as_str).is_none() {
            warnings.push("image media is missing alt text".to_string());
        }
        result.valid = result.errors.is_empty();
        promote(result, warnings, strict)
    }
}

pub struct DocumentValidator;
impl KindValidator for DocumentValidator {
    fn validate(&self, manifest: &KindManifest, strict: bool) -> ValidationResult {
        let mut result = base(manifest);
        match metadata_str(&manifest.metadata, "format") {
            Some(f) if ["markdown", "pdf", "html", "latex", "plaintext", "rst", "asciidoc"].contains(&f) => {}
            _ => result.errors.push("document metadata must declare a supported format".to_string()),
        }
        if let Some(toc) = manifest.metadata.get("toc").and_then(Value::as_array) {
            for entry in toc {
                let has_title = entry.get("title").and_then(Value::as_str).is_some();
                let level_positive = entry.get("level").and_then(Value::as_i64).is_some_and(|l| l > 0);
                if !has_title || !level_positive {
                    result.errors.push("every toc entry needs a title and a positive level".to_string());
                }
            }
        }
        if let Some(refs) = manifest.metadata.get("references").and_then(Value::as_array) {
            let mut seen = std::collections::HashSet::new();
            for r in refs {
                if let Some(id) = r.get("id").and_then(Value::as_str) {
                    if !seen.insert(id) {
                        result.errors.push(format!("duplicate reference id: {id}"));
                    }
                }
            }
        }
        match metadata_str(&manifest.metadata, "status") {
            Some(s) if ["draft", "review", "published", "archived"].contains(&s) => {}
            Some(other) => result.errors.push(format!("invalid document status: {other}")),
            None => {}
        }
        result.valid = result.errors.is_empty();
        promote(result, Vec::new(), strict)
    }
}

pub fn default_validator(kind: Kind) -> Box<dyn KindValidator> {
    match kind {
        Kind::App => Box::new(AppValidator),
        Kind::Module => Box::new(ModuleValidator),
        Kind::Dataset => Box::new(DatasetValidator),
        Kind::Agent => Box::new(AgentValidator),
        Kind::Media => Box::new(MediaValidator),
        Kind::Document => Box::new(DocumentValidator),
    }
}
