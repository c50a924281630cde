//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain`, never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Output};

use anyhow::Result;
use autodock_common::ContainerRecord;

use crate::domain::{AutodockConfig, PsQuery, RunSpec};

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
///
/// Calls run to completion; there is no timeout.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;
    /// Run a program with inherited stdio and return only its exit status.
    async fn run_status(&self, program: &str, args: &[&str]) -> Result<ExitStatus>;
}

// ── Container Engine Port ─────────────────────────────────────────────────────

/// The external container engine, treated as an opaque process contract.
#[allow(async_fn_in_trait)]
pub trait ContainerEngine {
    /// Engine executable name, for messages.
    fn binary(&self) -> &str;
    /// Fail with `EngineError::Unavailable` unless the engine answers.
    async fn check_available(&self) -> Result<()>;
    /// Build `context` into an image tagged `tag`.
    async fn build(&self, tag: &str, context: &Path) -> Result<()>;
    /// Start a detached container and return its id.
    async fn run(&self, spec: &RunSpec) -> Result<String>;
    async fn stop(&self, name: &str) -> Result<()>;
    async fn remove(&self, name: &str) -> Result<()>;
    async fn remove_image(&self, tag: &str) -> Result<()>;
    /// Raw listing text for `query`.
    async fn ps(&self, query: &PsQuery) -> Result<String>;
    /// Print the last `lines` log lines of `name` to the terminal.
    async fn tail_logs(&self, name: &str, lines: u32) -> Result<()>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Synchronous.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}

// ── State and Filesystem Ports ────────────────────────────────────────────────

/// Per-project container record persistence. No caching: every call hits
/// the backing store.
#[allow(async_fn_in_trait)]
pub trait RecordStore {
    /// Load the record, returning `None` if none exists.
    async fn load(&self) -> Result<Option<ContainerRecord>>;
    /// Replace the record.
    async fn save(&self, record: &ContainerRecord) -> Result<()>;
    /// Remove the record. Succeeds when there is none.
    async fn clear(&self) -> Result<()>;
}

/// Writes generated artifacts into the project.
pub trait ArtifactWriter {
    /// Project root, used as the engine build context.
    fn root(&self) -> &Path;
    /// Replace the build descriptor and return its path.
    fn write_descriptor(&self, content: &str) -> Result<PathBuf>;
}

/// User configuration persistence.
pub trait ConfigStore {
    /// Load the config, falling back to defaults when none is stored.
    fn load(&self) -> Result<AutodockConfig>;
    fn save(&self, config: &AutodockConfig) -> Result<()>;
    /// Where the config lives.
    fn path(&self) -> Result<PathBuf>;
}

// ── Interaction Port ──────────────────────────────────────────────────────────

/// Asks the user for missing values.
pub trait Prompter {
    /// Whether prompts may be shown at all.
    fn is_interactive(&self) -> bool;
    /// Ask for a line of text.
    fn ask(&self, prompt: &str, hint: Option<&str>) -> Result<String>;
}
