//! JSON output helpers.
//!
//! Provides the error-object formatter used by all `--json` code paths when
//! a command fails, and the `JsonRenderer` for successful results.

use std::path::Path;

use anyhow::{Context, Result};
use autodock_common::{ContainerRecord, DetectionReport, InfoOutput};
use serde::Serialize;

use crate::domain::{AutodockConfig, ConfigError, DetectError, EngineError, RecordError};

/// Format a JSON error object.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = serde_json::json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

/// Stable machine-readable code for an error chain.
#[must_use]
pub fn error_code(err: &anyhow::Error) -> &'static str {
    for cause in err.chain() {
        if let Some(e) = cause.downcast_ref::<DetectError>() {
            return match e {
                DetectError::ClassificationFailed => "CLASSIFICATION_FAILED",
                DetectError::PortUnresolved => "PORT_UNRESOLVED",
                DetectError::EntryUnresolved => "ENTRY_UNRESOLVED",
                DetectError::InvalidPort(_) => "INVALID_PORT",
                DetectError::EntryNotFound(_) => "ENTRY_NOT_FOUND",
            };
        }
        if let Some(e) = cause.downcast_ref::<EngineError>() {
            return match e {
                EngineError::Unavailable(_) => "ENGINE_UNAVAILABLE",
                EngineError::OperationFailed { .. } => "ENGINE_OPERATION_FAILED",
            };
        }
        if let Some(e) = cause.downcast_ref::<RecordError>() {
            return match e {
                RecordError::Missing => "RECORD_MISSING",
                RecordError::Malformed(_) => "RECORD_MALFORMED",
            };
        }
        if cause.downcast_ref::<ConfigError>().is_some() {
            return "INVALID_CONFIG";
        }
    }
    "COMMAND_FAILED"
}

/// Renders results as pretty-printed JSON on stdout.
pub struct JsonRenderer;

impl JsonRenderer {
    fn print(value: &impl Serialize) -> Result<()> {
        let text = serde_json::to_string_pretty(value).context("JSON serialization failed")?;
        println!("{text}");
        Ok(())
    }

    /// Render the CLI version.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_version(&self, version: &str) -> Result<()> {
        Self::print(&serde_json::json!({ "version": version }))
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_detection(&self, report: &DetectionReport) -> Result<()> {
        Self::print(report)
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_deployed(&self, record: &ContainerRecord, container_id: &str) -> Result<()> {
        Self::print(&serde_json::json!({
            "container_id": container_id,
            "record": record,
        }))
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_created(
        &self,
        report: &DetectionReport,
        record: &ContainerRecord,
        container_id: &str,
    ) -> Result<()> {
        Self::print(&serde_json::json!({
            "detection": report,
            "container_id": container_id,
            "record": record,
        }))
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_info(&self, info: &InfoOutput) -> Result<()> {
        Self::print(info)
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_deleted(&self, name: &str, removed: bool, record_cleared: bool) -> Result<()> {
        Self::print(&serde_json::json!({
            "name": name,
            "removed": removed,
            "record_cleared": record_cleared,
        }))
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_listing(&self, listing: &str) -> Result<()> {
        let rows: Vec<&str> = listing.lines().filter(|l| !l.trim().is_empty()).collect();
        Self::print(&serde_json::json!({ "listing": rows }))
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_config(&self, config: &AutodockConfig, path: &Path) -> Result<()> {
        Self::print(&serde_json::json!({
            "path": path.display().to_string(),
            "config": config,
        }))
    }
}
