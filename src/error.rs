//! Unified error types for sbom-extract.
//!
//! The public extraction API never surfaces these: a missing or corrupt BOM
//! degrades to an empty package list. They exist for the strict entry points
//! (`try_extract_*`) and for callers that want to know *why* a BOM produced
//! nothing.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for extraction operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ExtractError {
    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// The input exceeds the size the extractors are willing to load
    #[error("BOM file is {size_mb} MB, exceeding the {limit_mb} MB limit")]
    FileTooLarge { size_mb: u64, limit_mb: u64 },

    /// Malformed JSON document
    #[error("Invalid JSON [{context}]: {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// Malformed XML document
    #[error("Invalid XML: {0}")]
    Xml(String),

    /// Well-formed document that is not shaped like a BOM
    #[error("Invalid BOM structure: {0}")]
    InvalidStructure(String),
}

/// Convenient Result type for extraction operations
pub type Result<T> = std::result::Result<T, ExtractError>;

impl ExtractError {
    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: Some(path.into()),
            message: source.to_string(),
            source,
        }
    }

    /// Create an XML error
    pub fn xml(message: impl Into<String>) -> Self {
        Self::Xml(message.into())
    }

    /// Create a structural error
    pub fn invalid_structure(message: impl Into<String>) -> Self {
        Self::InvalidStructure(message.into())
    }

    /// True when the error comes from reading the file rather than its contents.
    #[must_use]
    pub const fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. } | Self::FileTooLarge { .. })
    }
}

impl From<std::io::Error> for ExtractError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<serde_json::Error> for ExtractError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json {
            context: String::new(),
            source: err,
        }
    }
}

impl From<quick_xml::Error> for ExtractError {
    fn from(err: quick_xml::Error) -> Self {
        Self::Xml(err.to_string())
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// Context is prepended to whatever the error already carries, so nested
/// calls read outermost-first: `"reading bom.xml: line 3: ..."`.
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<ExtractError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

fn add_context_to_error(err: ExtractError, new_ctx: &str) -> ExtractError {
    match err {
        ExtractError::Io {
            path,
            message,
            source,
        } => ExtractError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        ExtractError::Json { context, source } => ExtractError::Json {
            context: chain_context(new_ctx, &context),
            source,
        },
        ExtractError::Xml(msg) => ExtractError::Xml(chain_context(new_ctx, &msg)),
        ExtractError::InvalidStructure(msg) => {
            ExtractError::InvalidStructure(chain_context(new_ctx, &msg))
        }
        other @ ExtractError::FileTooLarge { .. } => other,
    }
}

/// Returns "`new`: `existing`", or just `new` when nothing exists yet.
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_mentions_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = ExtractError::io("/path/to/bom.json", io_err);

        assert!(err.to_string().contains("/path/to/bom.json"));
        assert!(err.is_io());
    }

    #[test]
    fn test_context_chaining_multiple_levels() {
        fn inner() -> Result<()> {
            Err(ExtractError::xml("unexpected end of document"))
        }

        fn outer() -> Result<()> {
            inner().context("middle layer").context("outer layer")
        }

        match outer() {
            Err(ExtractError::Xml(msg)) => {
                assert_eq!(msg, "outer layer: middle layer: unexpected end of document");
            }
            other => panic!("Expected Xml error, got {other:?}"),
        }
    }

    #[test]
    fn test_with_context_lazy_evaluation() {
        let mut called = false;
        let ok_result: Result<i32> = Ok(42);
        let _ = ok_result.with_context(|| {
            called = true;
            "should not be called"
        });
        assert!(!called, "Closure should not be called for Ok result");

        let err_result: Result<i32> = Err(ExtractError::invalid_structure("no components"));
        let _ = err_result.with_context(|| {
            called = true;
            "should be called"
        });
        assert!(called, "Closure should be called for Err result");
    }

    #[test]
    fn test_json_error_context() {
        let parsed: std::result::Result<serde_json::Value, _> = serde_json::from_str("{");
        let err = parsed.context("parsing bom.json").unwrap_err();
        assert!(err.to_string().contains("parsing bom.json"));
        assert!(!err.is_io());
    }

    #[test]
    fn test_chain_context_helper() {
        assert_eq!(chain_context("new", ""), "new");
        assert_eq!(chain_context("new", "existing"), "new: existing");
    }
}
