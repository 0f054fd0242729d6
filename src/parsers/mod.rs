//! CycloneDX package extractors.
//!
//! This module turns CycloneDX XML and JSON documents into canonical
//! [`PackageRecord`](crate::model::PackageRecord) lists.
//!
//! ## Usage
//!
//! ```no_run
//! use sbom_extract::parsers::{extract_packages, try_extract_packages};
//! use std::path::Path;
//!
//! // Never fails: a broken BOM yields an empty list
//! let packages = extract_packages(Path::new("bom.xml"));
//!
//! // Strict variant for callers that care why
//! match try_extract_packages(Path::new("bom.json")) {
//!     Ok(packages) => println!("{} packages", packages.len()),
//!     Err(e) => eprintln!("extraction failed: {e}"),
//! }
//! ```

mod cyclonedx_json;
mod cyclonedx_xml;
mod detection;
mod traits;
mod xml_tree;

pub use cyclonedx_json::JsonExtractor;
pub use cyclonedx_xml::{XmlExtractor, CYCLONEDX_NS_1_5};
pub use detection::BomFormat;
pub use traits::{read_bom_file, PackageExtractor, MAX_BOM_FILE_SIZE};
pub use xml_tree::{parse_document, XmlElement};

use crate::error::Result;
use crate::model::PackageRecord;
use std::path::Path;

/// Routes a BOM file to the extractor for its serialization.
#[derive(Debug, Clone, Default)]
pub struct Dispatcher<J = JsonExtractor, X = XmlExtractor> {
    json: J,
    xml: X,
}

impl<J: PackageExtractor, X: PackageExtractor> Dispatcher<J, X> {
    /// Create a dispatcher over the given extractors
    pub const fn new(json: J, xml: X) -> Self {
        Self { json, xml }
    }

    /// Extractor responsible for a path
    pub fn route(&self, path: &Path) -> &dyn PackageExtractor {
        match BomFormat::from_path(path) {
            BomFormat::Json => &self.json,
            BomFormat::Xml => &self.xml,
        }
    }

    /// Extract packages, absorbing failures into an empty list
    pub fn extract(&self, path: &Path) -> Vec<PackageRecord> {
        let extractor = self.route(path);
        tracing::debug!("Extracting {} as {}", path.display(), extractor.format_name());
        extractor.extract(path)
    }

    /// Extract packages, surfacing failures
    pub fn try_extract(&self, path: &Path) -> Result<Vec<PackageRecord>> {
        self.route(path).try_extract(path)
    }
}

/// Extract packages from a BOM file with the default extractors.
///
/// Never fails: missing, oversized and malformed files yield an empty list.
///
/// The default XML extractor reads license elements in any namespace, so
/// BOMs written against older CycloneDX schemas keep their licenses. Use a
/// [`Dispatcher`] over [`XmlExtractor::strict`] to only accept the fixed
/// CycloneDX 1.5 namespace.
#[must_use]
pub fn extract_packages(path: &Path) -> Vec<PackageRecord> {
    Dispatcher::<JsonExtractor, XmlExtractor>::default().extract(path)
}

/// Extract packages from a BOM file, returning the error on failure.
pub fn try_extract_packages(path: &Path) -> Result<Vec<PackageRecord>> {
    Dispatcher::<JsonExtractor, XmlExtractor>::default().try_extract(path)
}
