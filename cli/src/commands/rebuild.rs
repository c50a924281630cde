//! `autodock rebuild`: rebuild and restart from the stored record.

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::rebuild as service;

/// Run `autodock rebuild`.
///
/// # Errors
///
/// Returns an error if there is no record, the recorded entry file is gone,
/// or any engine step fails.
pub async fn run(app: &AppContext) -> Result<()> {
    let project = app.project()?;
    let reporter = app.terminal_reporter();
    let deployment = service::rebuild_container(
        &app.engine(),
        &app.record_store(),
        &project,
        &reporter,
        &app.config.base_images(),
    )
    .await?;
    drop(reporter);
    app.renderer()
        .render_deployed(&deployment.record, &deployment.container_id)
}
