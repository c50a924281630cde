use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Inferred runtime/framework category of a project.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectType {
    /// Node.js server process.
    BackendRuntime,
    /// Static bundle built by React/Vite/CRA and served by a web server.
    FrontendAssets,
    /// Next.js application served by its own runtime.
    FullstackFramework,
    /// Python application.
    ScriptingApp,
    Unknown,
}

impl ProjectType {
    /// Stable identifier used in the record file and JSON output.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BackendRuntime => "backend-runtime",
            Self::FrontendAssets => "frontend-assets",
            Self::FullstackFramework => "fullstack-framework",
            Self::ScriptingApp => "scripting-app",
            Self::Unknown => "unknown",
        }
    }

    /// Human-friendly label for terminal output.
    #[must_use]
    pub fn friendly_name(self) -> &'static str {
        match self {
            Self::BackendRuntime => "Node.js (Backend)",
            Self::FrontendAssets => "Node.js (Frontend: React/Vite)",
            Self::FullstackFramework => "Next.js (Fullstack)",
            Self::ScriptingApp => "Python",
            Self::Unknown => "Unknown",
        }
    }

    /// Whether the container command runs a specific entry file.
    #[must_use]
    pub fn needs_entry_file(self) -> bool {
        matches!(self, Self::BackendRuntime | Self::ScriptingApp)
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unrecognised project type identifier.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown project type '{0}'")]
pub struct ParseProjectTypeError(pub String);

impl FromStr for ProjectType {
    type Err = ParseProjectTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "backend-runtime" => Ok(Self::BackendRuntime),
            "frontend-assets" => Ok(Self::FrontendAssets),
            "fullstack-framework" => Ok(Self::FullstackFramework),
            "scripting-app" => Ok(Self::ScriptingApp),
            "unknown" => Ok(Self::Unknown),
            other => Err(ParseProjectTypeError(other.to_string())),
        }
    }
}

/// Live container status as reported by the engine.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ContainerStatus {
    Running,
    Stopped,
    NotFound,
}

impl ContainerStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Stopped => "stopped",
            Self::NotFound => "not found",
        }
    }
}

impl fmt::Display for ContainerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Correlation record persisted once per project directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContainerRecord {
    /// Container name (also used as the image tag).
    pub name: String,
    /// Image tag the container was started from.
    pub image: String,
    /// Host and container port.
    pub port: u16,
    /// Entry file relative to the project root, when the type needs one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry: Option<String>,
    pub project_type: ProjectType,
    pub created_at: DateTime<Utc>,
}

/// Result of the inference pipeline, as shown by `detect` and `create`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DetectionReport {
    pub project_type: ProjectType,
    pub port: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry: Option<String>,
    /// Whether an auxiliary datastore dependency was detected.
    pub datastore: bool,
    /// Container name that `create` would use.
    pub name: String,
}

/// Output of the `info` verb.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InfoOutput {
    pub name: String,
    pub status: ContainerStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record: Option<ContainerRecord>,
}
