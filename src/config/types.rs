//! Configuration types for sbom-extract.

use crate::parsers::{Dispatcher, JsonExtractor, XmlExtractor};
use crate::reports::ReportFormat;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Top-level configuration
// ============================================================================

/// Extraction configuration that can be loaded from a config file, CLI
/// arguments, or both (with CLI overriding file settings).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ExtractConfig {
    /// Package filtering
    pub filter: FilterConfig,
    /// Output rendering
    pub output: OutputConfig,
    /// XML extractor behavior
    pub xml: XmlConfig,
}

impl ExtractConfig {
    /// Create a new `ExtractConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Dispatcher honoring the XML settings.
    #[must_use]
    pub fn dispatcher(&self) -> Dispatcher<JsonExtractor, XmlExtractor> {
        let xml = if self.xml.strict_namespace {
            XmlExtractor::strict()
        } else {
            XmlExtractor::new()
        };
        Dispatcher::new(JsonExtractor::new(), xml)
    }
}

// ============================================================================
// Sections
// ============================================================================

/// Package filtering options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct FilterConfig {
    /// Keep only packages of this purl type (`npm`, `maven`, `pypi`, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_type: Option<String>,
}

/// Output configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format (table when unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<ReportFormat>,
    /// Pretty-print JSON output
    pub pretty: bool,
    /// Output file path (None for stdout)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl OutputConfig {
    /// Format to render with
    #[must_use]
    pub fn effective_format(&self) -> ReportFormat {
        self.format.unwrap_or_default()
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            pretty: true,
            file: None,
        }
    }
}

/// XML extractor configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct XmlConfig {
    /// Only read license elements bound to the CycloneDX 1.5 namespace
    pub strict_namespace: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ExtractConfig::default();
        assert!(config.output.pretty);
        assert_eq!(config.output.effective_format(), ReportFormat::Table);
        assert!(config.filter.package_type.is_none());
        assert!(!config.xml.strict_namespace);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config: ExtractConfig = serde_yaml::from_str("filter:\n  package_type: npm\n").expect("parses");
        assert_eq!(config.filter.package_type.as_deref(), Some("npm"));
        assert!(config.output.pretty);
    }

    #[test]
    fn test_dispatcher_honors_strict_namespace() {
        let mut config = ExtractConfig::default();
        let xml = r#"<bom xmlns="http://cyclonedx.org/schema/bom/1.4"><components>
            <component bom-ref="pkg:npm/a@1"><licenses><license><id>MIT</id></license></licenses></component>
        </components></bom>"#;
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("bom.xml");
        std::fs::write(&path, xml).expect("write");

        assert_eq!(config.dispatcher().extract(&path)[0].licenses, vec!["MIT"]);
        config.xml.strict_namespace = true;
        assert!(config.dispatcher().extract(&path)[0].licenses.is_empty());
    }
}
