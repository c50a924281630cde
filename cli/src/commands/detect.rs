//! `autodock detect`: inference only; touches neither engine nor record.

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::detect::detect_project;

/// Run `autodock detect`.
///
/// The container name is derived from the directory; an existing record is
/// not consulted.
///
/// # Errors
///
/// Returns an error if the project cannot be classified or a missing value
/// cannot be obtained.
pub fn run(app: &AppContext) -> Result<()> {
    let project = app.project()?;
    let reporter = app.terminal_reporter();
    let resolved = detect_project(
        &project,
        &app.project_dir,
        None,
        &app.prompter(),
        &reporter,
    )?;
    drop(reporter);
    app.renderer().render_detection(&resolved.report())
}
