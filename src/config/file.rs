//! Configuration file loading and discovery.
//!
//! Supports loading configuration from YAML files with automatic discovery.

use super::types::ExtractConfig;
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
const CONFIG_FILE_NAMES: &[&str] = &[
    ".sbom-extract.yaml",
    ".sbom-extract.yml",
    "sbom-extract.yaml",
    "sbom-extract.yml",
];

/// Directory under the user config dir that may hold a config file.
const CONFIG_DIR_NAME: &str = "sbom-extract";

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. Git repository root (if in a repo)
/// 4. User config directory (~/.config/sbom-extract/)
/// 5. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path.filter(|p| p.exists()) {
        return Some(path.to_path_buf());
    }

    if let Some(path) = std::env::current_dir()
        .ok()
        .and_then(|cwd| find_config_in_dir(&cwd))
    {
        return Some(path);
    }

    if let Some(path) = find_git_root().and_then(|root| find_config_in_dir(&root)) {
        return Some(path);
    }

    if let Some(path) =
        dirs::config_dir().and_then(|dir| find_config_in_dir(&dir.join(CONFIG_DIR_NAME)))
    {
        return Some(path);
    }

    dirs::home_dir().and_then(|home| find_config_in_dir(&home))
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Find the git repository root by walking up the directory tree.
fn find_git_root() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    let mut current = cwd.as_path();

    loop {
        if current.join(".git").exists() {
            return Some(current.to_path_buf());
        }
        current = current.parent()?;
    }
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug)]
pub enum ConfigFileError {
    /// File not found
    NotFound(PathBuf),
    /// IO error reading file
    Io(std::io::Error),
    /// YAML parsing error
    Parse(serde_yaml::Error),
}

impl std::fmt::Display for ConfigFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => {
                write!(f, "Config file not found: {}", path.display())
            }
            Self::Io(e) => write!(f, "Failed to read config file: {e}"),
            Self::Parse(e) => write!(f, "Failed to parse config file: {e}"),
        }
    }
}

impl std::error::Error for ConfigFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigFileError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_yaml::Error> for ConfigFileError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Parse(err)
    }
}

/// Load an `ExtractConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<ExtractConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    // An empty file deserializes to null, which means "all defaults"
    if content.trim().is_empty() {
        return Ok(ExtractConfig::default());
    }
    let config: ExtractConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Load config from discovered file, or return default.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (ExtractConfig, Option<PathBuf>) {
    discover_config_file(explicit_path).map_or_else(
        || (ExtractConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => (config, Some(path)),
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (ExtractConfig::default(), None)
            }
        },
    )
}

// ============================================================================
// Configuration Merging
// ============================================================================

impl ExtractConfig {
    /// Merge another config into this one, with `other` taking precedence.
    ///
    /// Only settings that differ from their defaults in `other` are applied,
    /// which is what layering CLI args over file config needs.
    pub fn merge(&mut self, other: &Self) {
        if other.filter.package_type.is_some() {
            self.filter.package_type.clone_from(&other.filter.package_type);
        }

        if other.output.format.is_some() {
            self.output.format = other.output.format;
        }
        if !other.output.pretty {
            self.output.pretty = false;
        }
        if other.output.file.is_some() {
            self.output.file.clone_from(&other.output.file);
        }

        if other.xml.strict_namespace {
            self.xml.strict_namespace = true;
        }
    }

    /// Load from file and merge with CLI overrides.
    #[must_use]
    pub fn from_file_with_overrides(
        config_path: Option<&Path>,
        cli_overrides: &Self,
    ) -> (Self, Option<PathBuf>) {
        let (mut config, loaded_from) = load_or_default(config_path);
        config.merge(cli_overrides);
        (config, loaded_from)
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate a commented example config with all options.
#[must_use]
pub fn generate_example_config() -> String {
    r"# sbom-extract configuration
# Place this file at .sbom-extract.yaml in your project root
# or ~/.config/sbom-extract/sbom-extract.yaml for global config.
#
# CLI arguments always override file settings.

filter:
  # Keep only packages of one purl type (npm, maven, pypi, ...)
  # package_type: npm

output:
  # Format: json, table, summary
  format: table
  # Pretty-print JSON output
  pretty: true
  # Output file path (omit for stdout)
  # file: packages.json

xml:
  # Only read licenses bound to the CycloneDX 1.5 namespace
  strict_namespace: false
"
    .to_string()
}
