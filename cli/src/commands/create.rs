//! `autodock`: detect the project, then build and run its container.

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::create::{self as service, CreateOutcome};
use crate::output::OutputContext;

/// Run the default command.
///
/// # Errors
///
/// Returns an error if the engine is unavailable, detection fails, or any
/// build or run step fails.
pub async fn run(app: &AppContext) -> Result<()> {
    let project = app.project()?;
    let reporter = app.terminal_reporter();
    let images = app.config.base_images();

    let outcome = service::create_container(
        &app.engine(),
        &app.record_store(),
        &project,
        &app.prompter(),
        &reporter,
        &images,
    )
    .await?;
    drop(reporter);

    let CreateOutcome { report, deployment } = outcome;
    app.renderer()
        .render_created(&report, &deployment.record, &deployment.container_id)?;
    print_next_steps(&app.output, deployment.datastore);
    Ok(())
}

fn print_next_steps(ctx: &OutputContext, datastore: bool) {
    if ctx.quiet {
        return;
    }
    if datastore {
        ctx.info("MongoDB is expected on the host at port 27017.");
    }
    ctx.kv("Logs   ", "autodock logs");
    ctx.kv("Status ", "autodock info");
    ctx.kv("Remove ", "autodock delete");
}
