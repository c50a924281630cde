//! `autodock logs [name]`: tail the container's logs.

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::logs as service;
use crate::commands::TargetArgs;

/// Run `autodock logs [name]`. Log lines go straight to the terminal.
///
/// # Errors
///
/// Returns an error if the engine cannot produce logs for the container.
pub async fn run(app: &AppContext, args: &TargetArgs) -> Result<()> {
    service::show_logs(
        &app.engine(),
        &app.record_store(),
        &app.project_dir,
        args.name.as_deref(),
        app.config.logs.tail,
    )
    .await
    .map(drop)
}
