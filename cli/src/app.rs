//! Application context: unified state passed to every command handler.
//!
//! `AppContext` resolves the project directory and the effective config once,
//! then hands out the adapters each command needs. Adding a cross-cutting
//! concern requires only one field change here.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::application::ports::ConfigStore;
use crate::domain::AutodockConfig;
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::config::{YamlConfigStore, with_env_overrides};
use crate::infra::engine::DockerEngine;
use crate::infra::fs::LocalProject;
use crate::infra::state::FileRecordStore;
use crate::output::prompt::DialoguerPrompter;
use crate::output::reporter::TerminalReporter;
use crate::output::{HumanRenderer, JsonRenderer, OutputContext, Renderer};

/// Environment variable that, like `CI`, disables prompts.
pub const YES_ENV: &str = "AUTODOCK_YES";

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Output rendering flags.
pub struct OutputFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Enable JSON output mode.
    pub json: bool,
}

/// Behaviour flags.
pub struct BehaviourFlags {
    /// Skip interactive prompts (also set by `CI` / `AUTODOCK_YES` env vars).
    pub yes: bool,
    /// Project directory; the current directory when absent.
    pub dir: Option<PathBuf>,
}

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    pub output: OutputFlags,
    pub behaviour: BehaviourFlags,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Output rendering mode (human vs JSON).
    pub mode: OutputMode,
    /// Canonical project root.
    pub project_dir: PathBuf,
    /// Effective configuration, env overrides applied.
    pub config: AutodockConfig,
    /// When `true`, never prompt; missing values become errors.
    pub non_interactive: bool,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the project directory does not exist or the config
    /// file cannot be parsed.
    pub fn new(flags: &AppFlags) -> Result<Self> {
        let ci_env = std::env::var("CI").is_ok() || std::env::var(YES_ENV).is_ok();
        let non_interactive = flags.behaviour.yes || ci_env;

        let dir = match &flags.behaviour.dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir().context("cannot determine current directory")?,
        };
        let project_dir = dir
            .canonicalize()
            .with_context(|| format!("project directory {} not found", dir.display()))?;

        let config = with_env_overrides(YamlConfigStore.load()?);
        tracing::debug!(
            project = %project_dir.display(),
            engine = %config.engine.binary,
            non_interactive,
            "context ready"
        );

        Ok(Self {
            output: OutputContext::new(
                flags.output.no_color,
                flags.output.quiet || flags.output.json,
            ),
            mode: output_mode(flags.output.json),
            project_dir,
            config,
            non_interactive,
        })
    }

    /// Returns `true` when JSON output mode is active.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    /// Returns the appropriate `Renderer` variant for the current output mode.
    #[must_use]
    pub fn renderer(&self) -> Renderer<'_> {
        match self.mode {
            OutputMode::Human => Renderer::Human(HumanRenderer::new(&self.output)),
            OutputMode::Json => Renderer::Json(JsonRenderer),
        }
    }

    /// Engine adapter for the configured binary.
    #[must_use]
    pub fn engine(&self) -> DockerEngine<TokioCommandRunner> {
        DockerEngine::new(self.config.engine.binary.clone(), TokioCommandRunner::new())
    }

    /// The project directory as a readable/writable project.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory vanished since startup.
    pub fn project(&self) -> Result<LocalProject> {
        LocalProject::open(&self.project_dir)
    }

    #[must_use]
    pub fn record_store(&self) -> FileRecordStore {
        FileRecordStore::for_project(&self.project_dir)
    }

    /// Prompter honouring `--yes` / `CI`. JSON mode never prompts.
    #[must_use]
    pub fn prompter(&self) -> DialoguerPrompter {
        DialoguerPrompter::new(self.non_interactive || self.is_json())
    }

    /// Progress reporter; silent in JSON mode so stdout stays parseable.
    #[must_use]
    pub fn terminal_reporter(&self) -> TerminalReporter<'_> {
        TerminalReporter::new(&self.output)
    }
}

fn output_mode(json: bool) -> OutputMode {
    if json {
        OutputMode::Json
    } else {
        OutputMode::Human
    }
}
