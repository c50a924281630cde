//! Application service: container log tailing.

use std::path::Path;

use anyhow::Result;

use crate::application::ports::{ContainerEngine, RecordStore};
use crate::domain::naming::resolve_name;

/// Print the last `tail` lines of the target container's logs.
///
/// The target is `explicit`, else the recorded name, else the derived name.
/// Returns the name that was used.
///
/// # Errors
///
/// Fails when the engine call fails.
pub async fn show_logs(
    engine: &impl ContainerEngine,
    store: &impl RecordStore,
    project_dir: &Path,
    explicit: Option<&str>,
    tail: u32,
) -> Result<String> {
    let recorded = if explicit.is_some() {
        None
    } else {
        store.load().await.ok().flatten()
    };
    let name = resolve_name(explicit, recorded.as_ref().map(|r| r.name.as_str()), project_dir);
    tracing::debug!(%name, tail, "tailing logs");
    engine.tail_logs(&name, tail).await?;
    Ok(name)
}
