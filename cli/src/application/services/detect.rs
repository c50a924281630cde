//! Application service: inference pipeline with interactive fallbacks.
//!
//! Runs the pure resolvers, then asks the user for whatever they could not
//! determine. Prompted values pass the same checks as detected ones.

use std::path::Path;

use anyhow::Result;
use autodock_common::{DetectionReport, ProjectType};

use crate::application::ports::{ProgressReporter, Prompter};
use crate::domain::detect::{self, Port, ProjectReader, SignalBag, signals::normalize};
use crate::domain::error::DetectError;
use crate::domain::naming::resolve_name;

/// Attempts allowed at the port prompt before giving up.
pub const MAX_PORT_ATTEMPTS: usize = 3;

/// Fully resolved project parameters, ready for descriptor generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedProject {
    pub project_type: ProjectType,
    pub port: Port,
    pub entry: Option<String>,
    pub datastore: bool,
    pub name: String,
}

impl ResolvedProject {
    #[must_use]
    pub fn report(&self) -> DetectionReport {
        DetectionReport {
            project_type: self.project_type,
            port: self.port.get(),
            entry: self.entry.clone(),
            datastore: self.datastore,
            name: self.name.clone(),
        }
    }
}

/// Detect every parameter of the project, prompting for the gaps.
///
/// `recorded_name` is the name from an existing record, preferred over the
/// name derived from `project_dir`.
///
/// # Errors
///
/// Fails with a [`DetectError`] when the project cannot be classified, or when
/// a missing value cannot be obtained from the user.
pub fn detect_project(
    reader: &impl ProjectReader,
    project_dir: &Path,
    recorded_name: Option<&str>,
    prompter: &impl Prompter,
    reporter: &impl ProgressReporter,
) -> Result<ResolvedProject> {
    let signals = SignalBag::new(reader);
    let inference = detect::infer(&signals)?;

    let port = match inference.port {
        Some(candidate) => {
            tracing::debug!(port = %candidate.port, layer = ?candidate.layer, "port detected");
            candidate.port
        }
        None => prompt_port(prompter, reporter)?,
    };

    let entry = if inference.entry_missing() {
        Some(prompt_entry(&signals, prompter)?)
    } else {
        inference.entry.map(|c| c.path)
    };

    Ok(ResolvedProject {
        project_type: inference.project_type,
        port,
        entry,
        datastore: inference.datastore,
        name: resolve_name(None, recorded_name, project_dir),
    })
}

/// Ask for a port until a valid one is given, at most [`MAX_PORT_ATTEMPTS`] times.
fn prompt_port(prompter: &impl Prompter, reporter: &impl ProgressReporter) -> Result<Port> {
    if !prompter.is_interactive() {
        return Err(DetectError::PortUnresolved.into());
    }
    reporter.warn(&DetectError::PortUnresolved.to_string());
    let mut last = String::new();
    for attempt in 1..=MAX_PORT_ATTEMPTS {
        let answer = prompter.ask("Port your app listens on", Some("3000"))?;
        if let Some(port) = Port::parse(&answer) {
            return Ok(port);
        }
        tracing::debug!(attempt, answer = %answer, "rejected prompted port");
        if attempt < MAX_PORT_ATTEMPTS {
            reporter.warn(&DetectError::InvalidPort(answer.trim().to_string()).to_string());
        }
        last = answer.trim().to_string();
    }
    Err(DetectError::InvalidPort(last).into())
}

/// Ask for the entry file once; it must exist inside the project.
fn prompt_entry(signals: &SignalBag<'_>, prompter: &impl Prompter) -> Result<String> {
    if !prompter.is_interactive() {
        return Err(DetectError::EntryUnresolved.into());
    }
    let answer = prompter.ask("Entry file of your app", Some("server.js"))?;
    let entry = normalize(&answer);
    if !signals.exists(entry) {
        return Err(DetectError::EntryNotFound(entry.to_string()).into());
    }
    Ok(entry.to_string())
}
