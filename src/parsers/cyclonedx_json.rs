//! CycloneDX JSON package extractor.
//!
//! JSON components already carry discrete identity fields, so no locator
//! parsing happens here. Everything the record does not normalize is kept
//! in [`PackageRecord::passthrough`].

use super::traits::{read_bom_file, PackageExtractor};
use crate::error::{ErrorContext, ExtractError, Result};
use crate::model::{licenses_from_json, strip_version_prefix, PackageRecord, ANY_VERSION};
use serde_json::{Map, Value};
use std::path::Path;

/// Component keys that always map onto typed [`PackageRecord`] fields.
const NORMALIZED_KEYS: &[&str] = &["vendor", "licenses"];

/// Component keys that map onto typed fields only when they hold a string.
const TEXT_KEYS: &[&str] = &["name", "version", "scope", "purl"];

/// Whether a source field is replaced by its typed counterpart.
fn is_consumed(key: &str, value: &Value) -> bool {
    NORMALIZED_KEYS.contains(&key) || (TEXT_KEYS.contains(&key) && value.is_string())
}

/// Extractor for CycloneDX JSON BOMs
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonExtractor;

impl JsonExtractor {
    /// Create a new JSON extractor
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Build a record from one `components[]` object.
    #[must_use]
    pub fn record_from_component(component: &Map<String, Value>) -> PackageRecord {
        let text = |key: &str| component.get(key).and_then(Value::as_str);

        let vendor = text("group").unwrap_or_default();
        let name = text("name").unwrap_or_default();
        // Absent means any version; a non-string stays in passthrough.
        let version = match component.get("version") {
            None => ANY_VERSION,
            Some(value) => value.as_str().map(strip_version_prefix).unwrap_or_default(),
        };

        let licenses = component
            .get("licenses")
            .and_then(Value::as_array)
            .map(|entries| entries.iter().flat_map(licenses_from_json).collect())
            .unwrap_or_default();

        let passthrough = component
            .iter()
            .filter(|(key, value)| !is_consumed(key, value))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        PackageRecord {
            vendor: vendor.to_string(),
            name: name.to_string(),
            version: version.to_string(),
            licenses,
            scope: text("scope").unwrap_or_default().to_string(),
            purl: text("purl").map(str::to_string),
            passthrough,
        }
    }
}

impl PackageExtractor for JsonExtractor {
    fn format_name(&self) -> &str {
        "CycloneDX JSON"
    }

    fn try_extract_str(&self, content: &str) -> Result<Vec<PackageRecord>> {
        let document: Value = serde_json::from_str(content).context("BOM document")?;

        let Some(root) = document.as_object() else {
            return Err(ExtractError::invalid_structure(
                "BOM root is not a JSON object",
            ));
        };

        let components = match root.get("components") {
            None | Some(Value::Null) => return Ok(Vec::new()),
            Some(Value::Array(components)) => components,
            Some(_) => {
                return Err(ExtractError::invalid_structure(
                    "'components' is not an array",
                ))
            }
        };

        Ok(components
            .iter()
            .filter_map(Value::as_object)
            .map(Self::record_from_component)
            .collect())
    }

    fn extract(&self, path: &Path) -> Vec<PackageRecord> {
        match read_bom_file(path) {
            Ok(content) => self.try_extract_str(&content).unwrap_or_default(),
            Err(e) => {
                tracing::debug!("Unable to read {}: {}", path.display(), e);
                Vec::new()
            }
        }
    }
}
