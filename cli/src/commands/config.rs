//! `autodock config`: show and set configuration values.

use anyhow::Result;
use clap::Subcommand;

use crate::application::ports::ConfigStore;
use crate::application::services::config_service;
use crate::output::{OutputContext, Renderer};

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,
    /// Set configuration value
    Set {
        /// Configuration key (e.g. logs.tail)
        key: String,
        /// Configuration value
        value: String,
    },
}

/// Run the config command.
///
/// # Errors
///
/// Returns an error if the key or value is invalid or the config file cannot
/// be read or written.
pub fn run(
    ctx: &OutputContext,
    renderer: &Renderer<'_>,
    store: &impl ConfigStore,
    cmd: ConfigCommand,
) -> Result<()> {
    match cmd {
        ConfigCommand::Show => {
            let config = config_service::load_config(store)?;
            renderer.render_config(&config, &store.path()?)
        }
        ConfigCommand::Set { key, value } => {
            config_service::set_value(store, &key, &value)?;
            ctx.success(&format!("Set {key} = {value}"));
            Ok(())
        }
    }
}
