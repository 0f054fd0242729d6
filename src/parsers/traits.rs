//! Extractor trait definitions.
//!
//! Every BOM serialization is handled by a [`PackageExtractor`]. Extractors
//! expose a strict, fallible API (`try_extract*`) and the lenient
//! [`PackageExtractor::extract`] that the scan pipeline relies on: it always
//! returns a list, applying the extractor's own policy for logging failures.

use crate::error::{ExtractError, Result};
use crate::model::PackageRecord;
use std::path::Path;

/// Maximum BOM file size (512 MB) the extractors will load into memory.
pub const MAX_BOM_FILE_SIZE: u64 = 512 * 1024 * 1024;

/// Trait for BOM package extractors
pub trait PackageExtractor {
    /// Human-readable name of the serialization handled
    fn format_name(&self) -> &str;

    /// Extract packages from string content
    fn try_extract_str(&self, content: &str) -> Result<Vec<PackageRecord>>;

    /// Extract packages from a file, surfacing any failure
    fn try_extract(&self, path: &Path) -> Result<Vec<PackageRecord>> {
        let content = read_bom_file(path)?;
        self.try_extract_str(&content)
    }

    /// Extract packages from a file. Never fails: an unreadable or malformed
    /// BOM yields an empty list.
    fn extract(&self, path: &Path) -> Vec<PackageRecord>;
}

/// Read a BOM file, refusing anything larger than [`MAX_BOM_FILE_SIZE`].
pub fn read_bom_file(path: &Path) -> Result<String> {
    let metadata = std::fs::metadata(path).map_err(|e| ExtractError::io(path, e))?;
    if metadata.len() > MAX_BOM_FILE_SIZE {
        return Err(ExtractError::FileTooLarge {
            size_mb: metadata.len() / (1024 * 1024),
            limit_mb: MAX_BOM_FILE_SIZE / (1024 * 1024),
        });
    }
    std::fs::read_to_string(path).map_err(|e| ExtractError::io(path, e))
}
