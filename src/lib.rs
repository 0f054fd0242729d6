//! **Package extraction and identity normalization for CycloneDX SBOMs.**
//!
//! `sbom-extract` reads a Software Bill of Materials in CycloneDX XML or JSON
//! form and produces a flat list of [`PackageRecord`]s for downstream
//! vulnerability or license analysis.
//!
//! Producers disagree on where package identity lives: XML BOMs often encode
//! it only in a composite `bom-ref` locator (`pkg:npm/%40angular/core@v16.0.0`),
//! JSON BOMs in discrete `group`/`name`/`version` fields, and licenses arrive
//! as SPDX IDs, free-text names, URLs or `MIT/Apache-2.0` style pairs. The
//! extractors reconcile all of this into one schema with fixed precedence
//! rules, and never fail a scan: a broken BOM yields an empty list.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: [`PackageRecord`], the [`Locator`] parser and the license normalizer.
//! - **[`parsers`]**: the XML and JSON extractors and the [`Dispatcher`] that routes a
//!   file to one of them.
//! - **[`filter`]**: ecosystem filtering by purl type.
//! - **[`reports`]**: JSON, table and summary rendering.
//! - **[`config`]**: YAML configuration with discovery and validation.
//! - **[`collaborators`]**: interfaces for the BOM generator and the findings upload
//!   that surround extraction.
//!
//! ## Getting Started
//!
//! ```no_run
//! use std::path::Path;
//! use sbom_extract::{extract_packages, filter_by_type};
//!
//! let packages = extract_packages(Path::new("reports/bom.json"));
//! for package in filter_by_type(&packages, "npm") {
//!     println!("{package} {:?}", package.licenses);
//! }
//! ```
//!
//! Locators can also be parsed on their own:
//!
//! ```
//! use sbom_extract::Locator;
//!
//! let locator = Locator::parse("pkg:npm/%40angular/core@v16.0.0?arch=x64");
//! assert_eq!(locator.vendor, "@angular");
//! assert_eq!(locator.name, "core");
//! assert_eq!(locator.version, "16.0.0");
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(clippy::missing_errors_doc, clippy::module_name_repetitions)]

pub mod collaborators;
pub mod config;
pub mod error;
pub mod filter;
pub mod model;
pub mod parsers;
pub mod reports;

// Re-export main types for convenience
pub use collaborators::{BomProducer, BomRequest, FindingsSink, SinkCredentials, SubmitOutcome};
pub use config::{ConfigError, ExtractConfig, Validatable};
pub use error::{ErrorContext, ExtractError, Result};
pub use filter::filter_by_type;
pub use model::{Locator, PackageRecord, ANY_VERSION};
pub use parsers::{
    extract_packages, try_extract_packages, Dispatcher, JsonExtractor, PackageExtractor,
    XmlExtractor,
};
pub use reports::{PackageReporter, ReportFormat};
