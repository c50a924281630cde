//! Application service: list every container the engine knows.

use anyhow::Result;

use crate::application::ports::ContainerEngine;
use crate::domain::PsQuery;

/// The engine's own listing of all containers, passed through unchanged.
///
/// # Errors
///
/// Fails when the engine cannot be queried.
pub async fn list_containers(engine: &impl ContainerEngine) -> Result<String> {
    engine.ps(&PsQuery::All).await
}
