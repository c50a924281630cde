//! CLI argument parsing with clap derive

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, AppFlags, BehaviourFlags, OutputFlags};
use crate::commands;
use crate::infra::config::YamlConfigStore;
use crate::logging::LogOptions;
use crate::output::{HumanRenderer, JsonRenderer, OutputContext, Renderer};

/// Containerize a local project without writing a Dockerfile.
///
/// Run without a command to detect the project, generate its Dockerfile, and
/// build and start its container.
#[derive(Parser, Debug)]
#[command(name = "autodock", version, propagate_version = true)]
pub struct Cli {
    /// Project directory (default: current directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub dir: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub no_color: bool,

    /// Never prompt; fail when a value cannot be detected
    #[arg(short, long, global = true)]
    pub yes: bool,

    /// Show debug diagnostics on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Diagnostic log level (trace, debug, info, warn, error)
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the last log lines of the container
    Logs(commands::TargetArgs),

    /// Stop and remove the container
    Delete(commands::TargetArgs),

    /// List all containers known to the engine
    Show,

    /// Show container status and the stored record
    Info,

    /// Rebuild and restart the container from the stored record
    Rebuild,

    /// Detect project settings without building anything
    Detect,

    /// Manage configuration
    #[command(subcommand)]
    Config(commands::config::ConfigCommand),

    /// Show version
    Version,
}

impl Cli {
    /// Logging flags for `logging::init_logging`.
    #[must_use]
    pub fn log_options(&self) -> LogOptions {
        LogOptions {
            log_level: self.log_level.clone(),
            verbose: self.verbose,
            quiet: self.quiet,
        }
    }

    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn run(self) -> Result<()> {
        let Cli {
            dir,
            json,
            quiet,
            no_color,
            yes,
            command,
            ..
        } = self;

        let flags = AppFlags {
            output: OutputFlags {
                no_color,
                quiet,
                json,
            },
            behaviour: BehaviourFlags { yes, dir },
        };
        let context = || AppContext::new(&flags);

        match command {
            None => commands::create::run(&context()?).await,
            Some(Command::Logs(args)) => commands::logs::run(&context()?, &args).await,
            Some(Command::Delete(args)) => commands::delete::run(&context()?, &args).await,
            Some(Command::Show) => commands::show::run(&context()?).await,
            Some(Command::Info) => commands::info::run(&context()?).await,
            Some(Command::Rebuild) => commands::rebuild::run(&context()?).await,
            Some(Command::Detect) => commands::detect::run(&context()?),
            // Neither needs a project directory.
            Some(Command::Version) => {
                let ctx = OutputContext::new(no_color, quiet);
                commands::version::run(&renderer_for(&ctx, json))
            }
            Some(Command::Config(cmd)) => {
                let ctx = OutputContext::new(no_color, quiet || json);
                commands::config::run(&ctx, &renderer_for(&ctx, json), &YamlConfigStore, cmd)
            }
        }
    }
}

fn renderer_for(ctx: &OutputContext, json: bool) -> Renderer<'_> {
    if json {
        Renderer::Json(JsonRenderer)
    } else {
        Renderer::Human(HumanRenderer::new(ctx))
    }
}
