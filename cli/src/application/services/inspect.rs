//! Application service: report the project's container status.

use std::path::Path;

use anyhow::Result;
use autodock_common::InfoOutput;

use crate::application::ports::{ContainerEngine, RecordStore};
use crate::application::services::teardown::status_of;
use crate::domain::naming::resolve_name;

/// Status of the recorded (or derived) container together with the record.
///
/// # Errors
///
/// Fails when the record is unreadable or the engine cannot be queried.
pub async fn inspect(
    engine: &impl ContainerEngine,
    store: &impl RecordStore,
    project_dir: &Path,
) -> Result<InfoOutput> {
    let record = store.load().await?;
    let name = resolve_name(None, record.as_ref().map(|r| r.name.as_str()), project_dir);
    let status = status_of(engine, &name).await?;
    Ok(InfoOutput {
        name,
        status,
        record,
    })
}
