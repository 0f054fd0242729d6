//! JSON report generator.

use super::{PackageReporter, ReportError, ReportFormat};
use crate::model::PackageRecord;

/// JSON report generator
pub struct JsonReporter {
    /// Pretty print output
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { pretty: true }
    }

    /// Set pretty printing
    #[must_use]
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl PackageReporter for JsonReporter {
    fn generate(&self, packages: &[PackageRecord]) -> Result<String, ReportError> {
        let rendered = if self.pretty {
            serde_json::to_string_pretty(packages)
        } else {
            serde_json::to_string(packages)
        };
        rendered.map_err(|e| ReportError::SerializationError(e.to_string()))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_records_round_trip_through_report() {
        let mut record = PackageRecord::new("org.apache", "commons-io", "2.11.0")
            .with_licenses(vec!["Apache-2.0".to_string()])
            .with_purl("pkg:maven/org.apache/commons-io@2.11.0");
        record.passthrough.insert("type".to_string(), json!("library"));

        let report = JsonReporter::new().generate(&[record.clone()]).expect("renders");
        let parsed: Vec<PackageRecord> = serde_json::from_str(&report).expect("parses");
        assert_eq!(parsed, vec![record]);
    }

    #[test]
    fn test_compact_output_is_single_line() {
        let packages = vec![PackageRecord::new("", "a", "1"), PackageRecord::new("", "b", "2")];
        let compact = JsonReporter::new().pretty(false).generate(&packages).expect("renders");
        assert!(!compact.contains('\n'));
        assert!(JsonReporter::new().generate(&packages).expect("renders").contains('\n'));
    }

    #[test]
    fn test_xml_records_omit_purl() {
        let report = JsonReporter::new()
            .pretty(false)
            .generate(&[PackageRecord::new("npm", "a", "1")])
            .expect("renders");
        assert_eq!(
            report,
            r#"[{"vendor":"npm","name":"a","version":"1","licenses":[],"scope":""}]"#
        );
    }
}
