//! `autodock info`: container status and the stored record.

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::inspect;

/// Run `autodock info`.
///
/// # Errors
///
/// Returns an error if the record is malformed or the engine cannot be queried.
pub async fn run(app: &AppContext) -> Result<()> {
    let info = inspect::inspect(&app.engine(), &app.record_store(), &app.project_dir).await?;
    app.renderer().render_info(&info)
}
