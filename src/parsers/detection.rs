//! Serialization detection for BOM files.
//!
//! Routing is purely by file name: the producer pipeline names its outputs
//! `bom.json` / `bom.xml`, so content sniffing would only add ways to
//! disagree with it.

use std::fmt;
use std::path::Path;

/// BOM serialization handled by one of the extractors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BomFormat {
    Json,
    Xml,
}

impl BomFormat {
    /// Detect the serialization from a path.
    ///
    /// Anything whose name ends in `.json` is JSON; every other path,
    /// including ones without an extension, is treated as XML.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        if path.to_string_lossy().ends_with(".json") {
            Self::Json
        } else {
            Self::Xml
        }
    }

    /// Human-readable name for this format.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Json => "CycloneDX JSON",
            Self::Xml => "CycloneDX XML",
        }
    }
}

impl fmt::Display for BomFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_suffix() {
        assert_eq!(BomFormat::from_path(Path::new("out/bom.json")), BomFormat::Json);
        assert_eq!(BomFormat::from_path(Path::new("x.cdx.json")), BomFormat::Json);
    }

    #[test]
    fn test_everything_else_is_xml() {
        assert_eq!(BomFormat::from_path(Path::new("bom.xml")), BomFormat::Xml);
        assert_eq!(BomFormat::from_path(Path::new("bom")), BomFormat::Xml);
        assert_eq!(BomFormat::from_path(Path::new("bom.JSON")), BomFormat::Xml);
        assert_eq!(BomFormat::from_path(Path::new("bom.json.bak")), BomFormat::Xml);
    }
}
