//! Application service: container deletion.

use std::path::Path;

use anyhow::Result;

use crate::application::ports::{ContainerEngine, ProgressReporter, RecordStore};
use crate::application::services::teardown::remove_if_present;
use crate::domain::naming::resolve_name;

/// What `delete` did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteOutcome {
    pub name: String,
    /// `false` when no such container existed.
    pub removed: bool,
    /// Whether the project's record referred to the container and was removed.
    pub record_cleared: bool,
}

/// Stop and remove the target container; drop the record when it refers to it.
///
/// # Errors
///
/// Fails when the engine is unavailable or an engine step fails.
pub async fn delete_container(
    engine: &impl ContainerEngine,
    store: &impl RecordStore,
    reporter: &impl ProgressReporter,
    project_dir: &Path,
    explicit: Option<&str>,
) -> Result<DeleteOutcome> {
    engine.check_available().await?;

    let record = match store.load().await {
        Ok(record) => record,
        Err(e) => {
            tracing::warn!(error = %e, "container record unreadable");
            None
        }
    };
    let recorded_name = record.as_ref().map(|r| r.name.as_str());
    let name = resolve_name(explicit, recorded_name, project_dir);

    let removed = remove_if_present(engine, reporter, &name).await?;

    let record_cleared = recorded_name == Some(name.as_str());
    if record_cleared {
        store.clear().await?;
        tracing::debug!(%name, "record cleared");
    }

    Ok(DeleteOutcome {
        name,
        removed,
        record_cleared,
    })
}
