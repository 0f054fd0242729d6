//! Canonical package record produced by every extractor.

use serde::de::{Deserializer, Error as _};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Wildcard version used when a locator carries no version.
pub const ANY_VERSION: &str = "*";

/// A normalized package entry extracted from a BOM.
///
/// XML-derived records only ever fill the typed fields. JSON-derived records
/// additionally carry every other field of the source component in
/// [`passthrough`](Self::passthrough), which is flattened back into the
/// record on serialization. A passthrough key that shares a typed field's
/// name (a numeric `version`, a `null` purl) is written instead of that field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackageRecord {
    /// Namespace or group of the package (may be empty)
    pub vendor: String,
    /// Package name
    pub name: String,
    /// Package version, never carrying a producer's leading `v`
    pub version: String,
    /// Normalized license tokens in document order
    pub licenses: Vec<String>,
    /// Dependency scope (`required`, `optional`, ...) if the source states one
    pub scope: String,
    /// Package URL, only present on records that came with one
    pub purl: Option<String>,
    /// Untouched source fields (JSON path only)
    pub passthrough: Map<String, Value>,
}

impl PackageRecord {
    /// Create a record from its identity fields.
    pub fn new(
        vendor: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            vendor: vendor.into(),
            name: name.into(),
            version: version.into(),
            ..Self::default()
        }
    }

    /// Attach licenses
    #[must_use]
    pub fn with_licenses(mut self, licenses: Vec<String>) -> Self {
        self.licenses = licenses;
        self
    }

    /// Attach a package URL
    #[must_use]
    pub fn with_purl(mut self, purl: impl Into<String>) -> Self {
        self.purl = Some(purl.into());
        self
    }

    /// Package URL or the empty string.
    #[must_use]
    pub fn purl_str(&self) -> &str {
        self.purl.as_deref().unwrap_or_default()
    }

    /// Look up an original source field that was not normalized.
    #[must_use]
    pub fn original(&self, key: &str) -> Option<&Value> {
        self.passthrough.get(key)
    }

    /// True when the record has neither a name nor a version.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.name.is_empty() && self.version.is_empty()
    }
}

impl fmt::Display for PackageRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.vendor.is_empty() {
            write!(f, "{}@{}", self.name, self.version)
        } else {
            write!(f, "{}/{}@{}", self.vendor, self.name, self.version)
        }
    }
}

impl Serialize for PackageRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let shadowed = |key: &str| self.passthrough.contains_key(key);
        let mut map = serializer.serialize_map(None)?;

        if !shadowed("vendor") {
            map.serialize_entry("vendor", &self.vendor)?;
        }
        if !shadowed("name") {
            map.serialize_entry("name", &self.name)?;
        }
        if !shadowed("version") {
            map.serialize_entry("version", &self.version)?;
        }
        if !shadowed("licenses") {
            map.serialize_entry("licenses", &self.licenses)?;
        }
        if !shadowed("scope") {
            map.serialize_entry("scope", &self.scope)?;
        }
        if let Some(purl) = self.purl.as_ref().filter(|_| !shadowed("purl")) {
            map.serialize_entry("purl", purl)?;
        }
        for (key, value) in &self.passthrough {
            map.serialize_entry(key, value)?;
        }

        map.end()
    }
}

impl<'de> Deserialize<'de> for PackageRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let fields = Map::<String, Value>::deserialize(deserializer)?;
        let mut record = Self::default();

        for (key, value) in fields {
            let slot = match key.as_str() {
                "vendor" => &mut record.vendor,
                "name" => &mut record.name,
                "version" => &mut record.version,
                "scope" => &mut record.scope,
                "purl" if value.is_string() => record.purl.get_or_insert_with(String::new),
                "licenses" if value.is_array() => {
                    record.licenses = serde_json::from_value(value).map_err(D::Error::custom)?;
                    continue;
                }
                _ => {
                    record.passthrough.insert(key, value);
                    continue;
                }
            };
            match value {
                Value::String(text) => *slot = text,
                other => {
                    record.passthrough.insert(key, other);
                }
            }
        }

        Ok(record)
    }
}

/// Strip a single leading `v` from a producer version string.
pub(crate) fn strip_version_prefix(version: &str) -> &str {
    version.strip_prefix('v').unwrap_or(version)
}
