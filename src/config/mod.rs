//! Configuration module for sbom-extract.
//!
//! This module provides:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - YAML config file loading and discovery
//! - CLI argument merging
//!
//! # Configuration File
//!
//! Place a `.sbom-extract.yaml` file in your project root or `~/.config/sbom-extract/`:
//!
//! ```yaml
//! filter:
//!   package_type: npm
//! output:
//!   format: summary
//! ```

pub mod file;
mod types;
mod validation;

pub use types::{ExtractConfig, FilterConfig, OutputConfig, XmlConfig};
pub use validation::{ConfigError, Validatable};

pub use file::{
    discover_config_file, generate_example_config, load_config_file, load_or_default,
    ConfigFileError,
};

/// Generate a JSON Schema for the `ExtractConfig` configuration format.
///
/// Editors can use it to validate and autocomplete `.sbom-extract.yaml`.
pub fn generate_json_schema() -> Result<String, serde_json::Error> {
    let schema = schemars::schema_for!(ExtractConfig);
    serde_json::to_string_pretty(&schema)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_schema_names_sections() {
        let schema = generate_json_schema().expect("schema serializes");
        assert!(schema.contains("ExtractConfig"));
        assert!(schema.contains("strict_namespace"));
        assert!(schema.contains("package_type"));
    }
}
