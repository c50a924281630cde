//! Shared container teardown steps.

use anyhow::Result;
use autodock_common::ContainerStatus;

use crate::application::ports::{ContainerEngine, ProgressReporter};
use crate::domain::{PsQuery, parse_names, parse_status};

/// Current status of `name`.
pub async fn status_of(engine: &impl ContainerEngine, name: &str) -> Result<ContainerStatus> {
    let listing = engine.ps(&PsQuery::ByName(name.to_string())).await?;
    Ok(parse_status(&listing, name))
}

/// Stop (when running) and remove `name`. Returns `false` when it did not exist.
pub async fn remove_if_present(
    engine: &impl ContainerEngine,
    reporter: &impl ProgressReporter,
    name: &str,
) -> Result<bool> {
    let status = status_of(engine, name).await?;
    if status == ContainerStatus::NotFound {
        return Ok(false);
    }
    tracing::info!(%name, %status, "removing container");
    if status == ContainerStatus::Running {
        reporter.step(&format!("Stopping {name}..."));
        engine.stop(name).await?;
    }
    engine.remove(name).await?;
    Ok(true)
}

/// Stop and remove every container publishing `port` on the host.
pub async fn free_port(
    engine: &impl ContainerEngine,
    reporter: &impl ProgressReporter,
    port: u16,
) -> Result<Vec<String>> {
    let listing = engine.ps(&PsQuery::Publishing(port)).await?;
    let names = parse_names(&listing);
    for name in &names {
        tracing::info!(%name, port, "container holds the port; removing");
        reporter.step(&format!("Port {port} is used by {name}, removing it..."));
        engine.stop(name).await?;
        engine.remove(name).await?;
    }
    Ok(names)
}
