//! Output formatting module

pub mod human;
pub mod json;
pub mod progress;
pub mod prompt;
pub mod reporter;
pub mod styles;

use std::path::Path;

use anyhow::Result;
use autodock_common::{ContainerRecord, DetectionReport, InfoOutput};
use console::Term;
use owo_colors::OwoColorize as _;

use crate::domain::AutodockConfig;
pub use human::HumanRenderer;
pub use json::JsonRenderer;
pub use styles::Styles;

/// Output context carrying styling and terminal state.
pub struct OutputContext {
    /// Stylesheet for colored output.
    pub styles: Styles,
    /// Whether stdout is a TTY.
    pub is_tty: bool,
    /// Whether to suppress non-error output.
    pub quiet: bool,
}

impl OutputContext {
    /// Create output context based on CLI flags and environment.
    #[must_use]
    pub fn new(no_color: bool, quiet: bool) -> Self {
        let is_tty = Term::stdout().is_term();
        let use_colors = !no_color && is_tty && std::env::var("NO_COLOR").is_err();

        let mut styles = Styles::default();
        if use_colors {
            styles.colorize();
        }

        Self {
            styles,
            is_tty,
            quiet,
        }
    }

    /// Check if progress indicators should be shown.
    #[must_use]
    pub fn show_progress(&self) -> bool {
        self.is_tty && !self.quiet
    }

    /// Print a success message prefixed with `✓`. Suppressed when `quiet`.
    pub fn success(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "✓".style(self.styles.success));
        }
    }

    /// Print a warning message prefixed with `⚠`. Suppressed when `quiet`.
    pub fn warn(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "⚠".style(self.styles.warning));
        }
    }

    /// Print an error message prefixed with `✗` to stderr. Never suppressed.
    pub fn error(&self, msg: &str) {
        eprintln!("  {} {msg}", "✗".style(self.styles.error));
    }

    /// Print an info message prefixed with `ℹ`. Suppressed when `quiet`.
    pub fn info(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "ℹ".style(self.styles.info));
        }
    }

    /// Print a section header. Suppressed when `quiet`.
    pub fn header(&self, msg: &str) {
        if !self.quiet {
            println!("  {}", msg.style(self.styles.header));
        }
    }

    /// Print a key-value pair with the key dimmed. Suppressed when `quiet`.
    pub fn kv(&self, key: &str, value: &str) {
        if !self.quiet {
            println!("  {}  {value}", key.style(self.styles.dim));
        }
    }
}

/// Dispatches rendering to the human or JSON renderer.
pub enum Renderer<'a> {
    Human(HumanRenderer<'a>),
    Json(JsonRenderer),
}

impl Renderer<'_> {
    /// Render the CLI version.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_version(&self, version: &str) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_version(version);
                Ok(())
            }
            Self::Json(r) => r.render_version(version),
        }
    }

    /// Render inference results.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_detection(&self, report: &DetectionReport) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_detection(report);
                Ok(())
            }
            Self::Json(r) => r.render_detection(report),
        }
    }

    /// Render a freshly deployed container.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_deployed(&self, record: &ContainerRecord, container_id: &str) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_deployed(record, container_id);
                Ok(())
            }
            Self::Json(r) => r.render_deployed(record, container_id),
        }
    }

    /// Render what `create` detected and deployed.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_created(
        &self,
        report: &DetectionReport,
        record: &ContainerRecord,
        container_id: &str,
    ) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_detection(report);
                r.render_deployed(record, container_id);
                Ok(())
            }
            Self::Json(r) => r.render_created(report, record, container_id),
        }
    }

    /// Render container status.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_info(&self, info: &InfoOutput) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_info(info);
                Ok(())
            }
            Self::Json(r) => r.render_info(info),
        }
    }

    /// Render the outcome of `delete`.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_deleted(&self, name: &str, removed: bool, record_cleared: bool) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_deleted(name, removed, record_cleared);
                Ok(())
            }
            Self::Json(r) => r.render_deleted(name, removed, record_cleared),
        }
    }

    /// Render the engine's container listing.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_listing(&self, listing: &str) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_listing(listing);
                Ok(())
            }
            Self::Json(r) => r.render_listing(listing),
        }
    }

    /// Render the effective configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_config(&self, config: &AutodockConfig, path: &Path) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_config(config, path);
                Ok(())
            }
            Self::Json(r) => r.render_config(config, path),
        }
    }
}
