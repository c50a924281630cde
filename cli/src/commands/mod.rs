//! Command implementations

pub mod config;
pub mod create;
pub mod delete;
pub mod detect;
pub mod info;
pub mod logs;
pub mod rebuild;
pub mod show;
pub mod version;

use clap::Args;

/// Arguments for commands that target one container by name.
#[derive(Args, Debug, Default)]
pub struct TargetArgs {
    /// Container name (default: the project's recorded or derived name)
    pub name: Option<String>,
}
