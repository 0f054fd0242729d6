//! Rendering of extracted package lists.
//!
//! - JSON: the records themselves, for programmatic consumers
//! - Table: aligned vendor/name/version/license columns
//! - Summary: counts per vendor and license coverage

mod json;
mod summary;
mod types;

pub use json::JsonReporter;
pub use summary::{SummaryReporter, TableReporter};
pub use types::ReportFormat;

use crate::config::OutputConfig;
use crate::model::PackageRecord;
use std::io::Write;
use thiserror::Error;

/// Errors that can occur during report generation
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Format error: {0}")]
    FormatError(#[from] std::fmt::Error),
}

/// Trait for package list renderers
pub trait PackageReporter {
    /// Render the packages to a string
    fn generate(&self, packages: &[PackageRecord]) -> Result<String, ReportError>;

    /// Write the rendered packages to a writer
    fn write_to(&self, packages: &[PackageRecord], writer: &mut dyn Write) -> Result<(), ReportError> {
        let report = self.generate(packages)?;
        writer.write_all(report.as_bytes())?;
        if !report.ends_with('\n') {
            writer.write_all(b"\n")?;
        }
        Ok(())
    }

    /// Get the format this reporter produces
    fn format(&self) -> ReportFormat;
}

/// Build the reporter selected by an output configuration.
#[must_use]
pub fn create_reporter(output: &OutputConfig) -> Box<dyn PackageReporter> {
    match output.effective_format() {
        ReportFormat::Json => Box::new(JsonReporter::new().pretty(output.pretty)),
        ReportFormat::Table => Box::new(TableReporter::new()),
        ReportFormat::Summary => Box::new(SummaryReporter::new()),
    }
}
