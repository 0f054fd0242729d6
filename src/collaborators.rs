//! Interfaces to the processes around extraction.
//!
//! A scan needs a BOM before there is anything to extract, and its findings
//! are usually shipped somewhere afterwards. Neither step belongs in this
//! crate, so only the seams are defined here: a [`BomProducer`] that writes
//! a BOM file for a source tree, and a [`FindingsSink`] that uploads the
//! resulting artifacts. The pure request-building helpers live next to them
//! so every implementation agrees on the wire details.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Project type used when none was detected.
pub const UNIVERSAL_PROJECT_TYPE: &str = "universal";

/// Project types that always get a deep scan.
const DEEP_BY_DEFAULT: &[&str] = &["jar", "jenkins"];

// ============================================================================
// BOM producer
// ============================================================================

/// Options forwarded to a BOM generator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProducerOptions {
    /// Base URL of a generator service; local execution when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_url: Option<String>,
    /// Repository URL to scan instead of a local path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Path override for the service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// Project type override for the service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_type: Option<String>,
    /// Treat the source as a multi-project build
    #[serde(default)]
    pub multi_project: bool,
}

/// One request to produce a BOM.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BomRequest {
    pub project_type: String,
    pub output_path: PathBuf,
    pub source_dir: PathBuf,
    pub deep: bool,
    pub options: ProducerOptions,
}

/// JSON body sent to a generator service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerBomRequest {
    pub url: String,
    pub path: String,
    #[serde(rename = "type")]
    pub project_type: String,
    pub multi_project: bool,
}

impl BomRequest {
    /// Create a request for a shallow scan with default options
    pub fn new(
        project_type: impl Into<String>,
        output_path: impl Into<PathBuf>,
        source_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            project_type: project_type.into(),
            output_path: output_path.into(),
            source_dir: source_dir.into(),
            deep: false,
            options: ProducerOptions::default(),
        }
    }

    /// Request a deep scan
    #[must_use]
    pub const fn with_deep(mut self, deep: bool) -> Self {
        self.deep = deep;
        self
    }

    /// Set producer options
    #[must_use]
    pub fn with_options(mut self, options: ProducerOptions) -> Self {
        self.options = options;
        self
    }

    /// Project type, falling back to [`UNIVERSAL_PROJECT_TYPE`]
    #[must_use]
    pub fn effective_project_type(&self) -> &str {
        if self.project_type.is_empty() {
            UNIVERSAL_PROJECT_TYPE
        } else {
            &self.project_type
        }
    }

    /// Whether the generator should run a deep scan
    #[must_use]
    pub fn is_deep(&self) -> bool {
        self.deep || DEEP_BY_DEFAULT.contains(&self.project_type.as_str())
    }

    /// Command line for a local `cdxgen`-compatible generator.
    #[must_use]
    pub fn cdxgen_args(&self, command: &str) -> Vec<String> {
        let mut args = vec![
            command.to_string(),
            "-r".to_string(),
            "-t".to_string(),
            self.effective_project_type().to_string(),
            "-o".to_string(),
            self.output_path.display().to_string(),
        ];
        if self.is_deep() {
            args.push("--deep".to_string());
        }
        args.push(self.source_dir.display().to_string());
        args
    }

    /// Request body for a generator service, options taking precedence.
    #[must_use]
    pub fn server_body(&self) -> ServerBomRequest {
        let path = self
            .options
            .path
            .as_deref()
            .unwrap_or(&self.source_dir)
            .display()
            .to_string();
        ServerBomRequest {
            url: self.options.url.clone().unwrap_or_default(),
            path,
            project_type: self
                .options
                .project_type
                .clone()
                .unwrap_or_else(|| self.effective_project_type().to_string()),
            multi_project: self.options.multi_project,
        }
    }
}

/// Something that can write a BOM for a source tree.
pub trait BomProducer {
    /// Produce the BOM described by `request`.
    ///
    /// Returns true when the output file exists afterwards.
    fn produce(&self, request: &BomRequest) -> bool;
}

// ============================================================================
// Findings sink
// ============================================================================

/// Connection details for a findings service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SinkCredentials {
    pub server: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default)]
    pub username: String,
    #[serde(default, skip_serializing)]
    pub password: String,
}

impl SinkCredentials {
    /// Upload endpoint, always ending in `/import`
    #[must_use]
    pub fn import_url(&self) -> String {
        if self.server.ends_with("/import") {
            self.server.clone()
        } else {
            format!("{}/import", self.server)
        }
    }

    /// Login endpoint derived from the upload endpoint
    #[must_use]
    pub fn login_url(&self) -> String {
        self.import_url().replace("/import", "/login")
    }
}

/// Result of submitting one artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitOutcome {
    pub artifact: PathBuf,
    pub accepted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Something that uploads scan artifacts.
pub trait FindingsSink {
    /// Submit every artifact under `artifacts_dir`.
    fn submit(&self, artifacts_dir: &Path, credentials: &SinkCredentials) -> Vec<SubmitOutcome>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn test_cdxgen_args_shallow() {
        let request = BomRequest::new("python", "/out/bom.json", "/src");
        assert_eq!(
            request.cdxgen_args("cdxgen"),
            vec!["cdxgen", "-r", "-t", "python", "-o", "/out/bom.json", "/src"]
        );
    }

    #[test]
    fn test_cdxgen_args_deep() {
        let request = BomRequest::new("python", "bom.json", ".").with_deep(true);
        assert_eq!(request.cdxgen_args("cdxgen")[6], "--deep");

        for project_type in ["jar", "jenkins"] {
            let request = BomRequest::new(project_type, "bom.json", ".");
            assert!(request.cdxgen_args("cdxgen").contains(&"--deep".to_string()));
        }
    }

    #[test]
    fn test_empty_type_is_universal() {
        let request = BomRequest::new("", "bom.json", ".");
        assert_eq!(request.cdxgen_args("cdxgen")[3], "universal");
        assert_eq!(request.server_body().project_type, "universal");
    }

    #[test]
    fn test_server_body_prefers_options() {
        let request = BomRequest::new("npm", "bom.json", "/src").with_options(ProducerOptions {
            url: Some("https://github.com/acme/app".to_string()),
            project_type: Some("js".to_string()),
            multi_project: true,
            ..ProducerOptions::default()
        });
        let body = serde_json::to_value(request.server_body()).expect("serializes");
        assert_eq!(
            body,
            serde_json::json!({
                "url": "https://github.com/acme/app",
                "path": "/src",
                "type": "js",
                "multiProject": true
            })
        );
    }

    #[test]
    fn test_sink_urls() {
        let creds = SinkCredentials {
            server: "https://db.example.com".to_string(),
            ..SinkCredentials::default()
        };
        assert_eq!(creds.import_url(), "https://db.example.com/import");
        assert_eq!(creds.login_url(), "https://db.example.com/login");

        let creds = SinkCredentials {
            server: "https://db.example.com/import".to_string(),
            token: Some("t".to_string()),
            ..SinkCredentials::default()
        };
        assert_eq!(creds.import_url(), "https://db.example.com/import");
    }

    struct RecordingProducer {
        requests: RefCell<Vec<Vec<String>>>,
    }

    impl BomProducer for RecordingProducer {
        fn produce(&self, request: &BomRequest) -> bool {
            self.requests.borrow_mut().push(request.cdxgen_args("cdxgen"));
            true
        }
    }

    #[test]
    fn test_producer_is_object_safe() {
        let producer = RecordingProducer {
            requests: RefCell::new(Vec::new()),
        };
        let dyn_producer: &dyn BomProducer = &producer;
        assert!(dyn_producer.produce(&BomRequest::new("go", "bom.json", ".")));
        assert_eq!(producer.requests.borrow().len(), 1);
    }
}
