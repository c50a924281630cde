//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

// ── Detection errors ──────────────────────────────────────────────────────────

/// Errors raised by the inference pipeline.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DetectError {
    #[error(
        "Could not detect project type.\n\n\
Supported: Node.js (package.json), React/Vite, Next.js, Python (requirements.txt).\n\
Run autodock from the project root, or pass --dir <path>."
    )]
    ClassificationFailed,

    #[error("Could not detect the port your app listens on.")]
    PortUnresolved,

    #[error("Could not detect the entry file of your app.")]
    EntryUnresolved,

    #[error("Invalid or forbidden port: {0}. Use a number between 1025 and 65534.")]
    InvalidPort(String),

    #[error("Entry file '{0}' does not exist in the project.")]
    EntryNotFound(String),
}

// ── Engine errors ─────────────────────────────────────────────────────────────

/// Errors raised while driving the container engine.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("Container engine '{0}' is not running. Start it and try again.")]
    Unavailable(String),

    #[error("{op} failed: {detail}")]
    OperationFailed { op: String, detail: String },
}

// ── Record errors ─────────────────────────────────────────────────────────────

/// Errors related to the persisted correlation record.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("No container record for this project. Run 'autodock' first.")]
    Missing,

    #[error("Malformed container record: {0}")]
    Malformed(String),
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to configuration key/value validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unknown setting: {key}\n\nValid settings: {valid}")]
    UnknownKey { key: String, valid: String },

    #[error("Invalid value for {key}: {value}\n\n{hint}")]
    InvalidValue {
        key: String,
        value: String,
        hint: String,
    },
}
