//! `autodock show`: every container the engine knows about.

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::show;

/// Run `autodock show`.
///
/// # Errors
///
/// Returns an error if the engine listing fails.
pub async fn run(app: &AppContext) -> Result<()> {
    let listing = show::list_containers(&app.engine()).await?;
    app.renderer().render_listing(&listing)
}
