//! Configuration validation for sbom-extract.

use super::types::{ExtractConfig, FilterConfig, OutputConfig, XmlConfig};

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for ExtractConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.filter.validate());
        errors.extend(self.output.validate());
        errors.extend(self.xml.validate());
        errors
    }
}

impl Validatable for FilterConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if let Some(ref package_type) = self.package_type {
            let malformed = package_type.is_empty()
                || package_type
                    .chars()
                    .any(|c| c == '/' || c == '@' || c.is_whitespace());
            if malformed {
                errors.push(ConfigError {
                    field: "filter.package_type".to_string(),
                    message: format!(
                        "Invalid package type '{package_type}'. Expected a bare purl type such as npm or maven"
                    ),
                });
            }
            if package_type.starts_with("pkg:") {
                errors.push(ConfigError {
                    field: "filter.package_type".to_string(),
                    message: "Package type must not include the 'pkg:' prefix".to_string(),
                });
            }
        }
        errors
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if let Some(parent) = self.file.as_deref().and_then(std::path::Path::parent) {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                errors.push(ConfigError {
                    field: "output.file".to_string(),
                    message: format!("Parent directory does not exist: {}", parent.display()),
                });
            }
        }

        errors
    }
}

impl Validatable for XmlConfig {
    fn validate(&self) -> Vec<ConfigError> {
        // Only a boolean flag today
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ExtractConfig::default().is_valid());
    }

    #[test]
    fn test_filter_config_validation() {
        let valid = FilterConfig {
            package_type: Some("npm".to_string()),
        };
        assert!(valid.is_valid());

        for bad in ["", "pkg:npm", "npm/x", "np m"] {
            let invalid = FilterConfig {
                package_type: Some(bad.to_string()),
            };
            assert!(!invalid.is_valid(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn test_output_file_parent_must_exist() {
        let invalid = OutputConfig {
            file: Some(PathBuf::from("/nonexistent/dir/out.json")),
            ..OutputConfig::default()
        };
        let errors = invalid.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "output.file");

        let relative = OutputConfig {
            file: Some(PathBuf::from("out.json")),
            ..OutputConfig::default()
        };
        assert!(relative.is_valid());
    }

    #[test]
    fn test_errors_are_collected_across_sections() {
        let mut config = ExtractConfig::default();
        config.filter.package_type = Some("pkg:npm".to_string());
        config.output.file = Some(PathBuf::from("/nonexistent/dir/out.json"));

        let fields: Vec<String> = config.validate().into_iter().map(|e| e.field).collect();
        assert!(fields.contains(&"filter.package_type".to_string()));
        assert!(fields.contains(&"output.file".to_string()));
        assert_eq!(
            ConfigError {
                field: "a".to_string(),
                message: "b".to_string()
            }
            .to_string(),
            "a: b"
        );
    }
}
