//! `autodock delete [name]`: stop and remove a container.

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::delete as service;
use crate::commands::TargetArgs;

/// Run `autodock delete [name]`.
///
/// # Errors
///
/// Returns an error if the engine is unavailable or removal fails.
pub async fn run(app: &AppContext, args: &TargetArgs) -> Result<()> {
    let reporter = app.terminal_reporter();
    let outcome = service::delete_container(
        &app.engine(),
        &app.record_store(),
        &reporter,
        &app.project_dir,
        args.name.as_deref(),
    )
    .await?;
    drop(reporter);
    app.renderer()
        .render_deleted(&outcome.name, outcome.removed, outcome.record_cleared)
}
