//! Canonical package model.
//!
//! Every extractor, regardless of the BOM serialization it reads, produces
//! [`PackageRecord`]s. Identity fields are reconciled from composite
//! [`Locator`] strings and discrete BOM fields; licenses go through the
//! normalizer in [`license`].

pub mod license;
mod locator;
mod package;

pub use license::{cleanup_license_string, licenses_from_json, licenses_from_xml, normalize_license_name};
pub use locator::Locator;
pub use package::{PackageRecord, ANY_VERSION};

pub(crate) use package::strip_version_prefix;
