//! Summary and table reporters for shell output.

use super::{PackageReporter, ReportError, ReportFormat};
use crate::model::PackageRecord;
use indexmap::IndexMap;
use std::fmt::Write as _;

/// Placeholder for empty cells.
const EMPTY_CELL: &str = "-";

/// Label used for packages without a vendor in the summary.
const NO_VENDOR: &str = "(none)";

// ============================================================================
// Summary
// ============================================================================

/// Summary reporter: totals, per-vendor counts and license coverage
#[derive(Debug, Default)]
pub struct SummaryReporter;

impl SummaryReporter {
    /// Create a new summary reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

/// Package counts per vendor, in first-seen order.
fn vendor_counts(packages: &[PackageRecord]) -> IndexMap<&str, usize> {
    let mut counts = IndexMap::new();
    for package in packages {
        let vendor = if package.vendor.is_empty() {
            NO_VENDOR
        } else {
            package.vendor.as_str()
        };
        *counts.entry(vendor).or_insert(0) += 1;
    }
    counts
}

impl PackageReporter for SummaryReporter {
    fn generate(&self, packages: &[PackageRecord]) -> Result<String, ReportError> {
        let mut out = String::new();
        writeln!(out, "Packages: {}", packages.len())?;

        let counts = vendor_counts(packages);
        if !counts.is_empty() {
            writeln!(out, "By vendor:")?;
            let width = counts.keys().map(|v| v.chars().count()).max().unwrap_or(0);
            for (vendor, count) in &counts {
                writeln!(out, "  {vendor:<width$}  {count}")?;
            }
        }

        let unlicensed = packages.iter().filter(|p| p.licenses.is_empty()).count();
        write!(out, "Without license: {unlicensed}")?;
        Ok(out)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Summary
    }
}

// ============================================================================
// Table
// ============================================================================

/// Table reporter: one aligned row per package
#[derive(Debug)]
pub struct TableReporter {
    /// Maximum width of any column
    max_column_width: usize,
}

impl TableReporter {
    /// Create a new table reporter
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_column_width: 48,
        }
    }

    /// Limit column width
    #[must_use]
    pub const fn max_column_width(mut self, width: usize) -> Self {
        self.max_column_width = width;
        self
    }
}

impl Default for TableReporter {
    fn default() -> Self {
        Self::new()
    }
}

fn cell(value: &str) -> &str {
    if value.is_empty() {
        EMPTY_CELL
    } else {
        value
    }
}

impl PackageReporter for TableReporter {
    fn generate(&self, packages: &[PackageRecord]) -> Result<String, ReportError> {
        let header = ["VENDOR", "NAME", "VERSION", "LICENSES"];
        let rows: Vec<[String; 4]> = packages
            .iter()
            .map(|p| {
                [
                    truncate(cell(&p.vendor), self.max_column_width),
                    truncate(cell(&p.name), self.max_column_width),
                    truncate(cell(&p.version), self.max_column_width),
                    truncate(cell(&p.licenses.join(", ")), self.max_column_width),
                ]
            })
            .collect();

        let mut widths = header.map(str::len);
        for row in &rows {
            for (width, value) in widths.iter_mut().zip(row) {
                *width = (*width).max(value.chars().count());
            }
        }

        let mut out = String::new();
        write_row(&mut out, &header, &widths)?;
        let rule_len = widths.iter().sum::<usize>() + 2 * (widths.len() - 1);
        writeln!(out, "{}", "─".repeat(rule_len))?;
        for row in &rows {
            write_row(&mut out, row, &widths)?;
        }
        write!(out, "Total: {} packages", packages.len())?;
        Ok(out)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Table
    }
}

fn write_row<S: AsRef<str>>(out: &mut String, cells: &[S], widths: &[usize]) -> std::fmt::Result {
    let last = cells.len().saturating_sub(1);
    for (i, (value, width)) in cells.iter().zip(widths).enumerate() {
        if i == last {
            writeln!(out, "{}", value.as_ref())?;
        } else {
            write!(out, "{:<width$}  ", value.as_ref())?;
        }
    }
    Ok(())
}

/// Truncate a string to fit within `max_len` characters
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len > 3 {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{kept}...")
    } else {
        s.chars().take(max_len).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<PackageRecord> {
        vec![
            PackageRecord::new("npm", "lodash", "4.17.21").with_licenses(vec!["MIT".to_string()]),
            PackageRecord::new("", "left-pad", "*"),
            PackageRecord::new("npm", "react", "18.2.0").with_licenses(vec!["MIT".to_string()]),
        ]
    }

    #[test]
    fn test_summary_counts() {
        let report = SummaryReporter::new().generate(&sample()).expect("renders");
        assert_eq!(
            report,
            "Packages: 3\nBy vendor:\n  npm     2\n  (none)  1\nWithout license: 1"
        );
    }

    #[test]
    fn test_summary_empty() {
        let report = SummaryReporter::new().generate(&[]).expect("renders");
        assert_eq!(report, "Packages: 0\nWithout license: 0");
    }

    #[test]
    fn test_table_rows_are_aligned() {
        let report = TableReporter::new().generate(&sample()).expect("renders");
        let lines: Vec<&str> = report.lines().collect();

        assert!(lines[0].starts_with("VENDOR  NAME      VERSION  LICENSES"));
        assert!(lines[2].starts_with("npm     lodash    4.17.21  MIT"));
        assert!(lines[3].starts_with("-       left-pad  *        -"));
        assert_eq!(lines.last(), Some(&"Total: 3 packages"));
    }

    #[test]
    fn test_truncate_is_char_safe() {
        assert_eq!(truncate("abcdef", 10), "abcdef");
        assert_eq!(truncate("abcdefghij", 6), "abc...");
        assert_eq!(truncate("ééééé", 4), "é...");
        assert_eq!(truncate("abcdef", 2), "ab");
    }

    #[test]
    fn test_table_column_limit() {
        let long = PackageRecord::new("v", "x".repeat(100), "1");
        let report = TableReporter::new()
            .max_column_width(10)
            .generate(&[long])
            .expect("renders");
        assert!(report.contains("xxxxxxx..."));
        assert!(!report.contains(&"x".repeat(11)));
    }
}
