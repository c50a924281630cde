//! Application service: rebuild the recorded container from current sources.

use anyhow::Result;

use crate::application::ports::{ArtifactWriter, ContainerEngine, ProgressReporter, RecordStore};
use crate::application::services::create::{DeployPlan, Deployment, deploy};
use crate::application::services::teardown::remove_if_present;
use crate::domain::BaseImages;
use crate::domain::detect::{Port, ProjectReader};
use crate::domain::error::{DetectError, RecordError};

/// Tear down the recorded container and image, then redeploy with the
/// recorded port, entry and type.
///
/// # Errors
///
/// [`RecordError::Missing`] without a record; [`DetectError::EntryNotFound`]
/// when the recorded entry file is gone. Failures after teardown say so.
pub async fn rebuild_container(
    engine: &impl ContainerEngine,
    store: &impl RecordStore,
    project: &(impl ProjectReader + ArtifactWriter),
    reporter: &impl ProgressReporter,
    images: &BaseImages,
) -> Result<Deployment> {
    engine.check_available().await?;
    let record = store.load().await?.ok_or(RecordError::Missing)?;

    if let Some(entry) = record.entry.as_deref().filter(|e| !project.is_file(e)) {
        return Err(DetectError::EntryNotFound(entry.to_string()).into());
    }
    let port = Port::new(record.port)
        .ok_or_else(|| RecordError::Malformed(format!("invalid port '{}'", record.port)))?;

    reporter.step(&format!("Removing {}...", record.name));
    remove_if_present(engine, reporter, &record.name).await?;
    if let Err(e) = engine.remove_image(&record.image).await {
        tracing::warn!(image = %record.image, error = %e, "old image not removed");
        reporter.warn(&format!("Could not remove image {}: {e}", record.image));
    }

    let plan = DeployPlan {
        name: record.name.clone(),
        project_type: record.project_type,
        port,
        entry: record.entry.clone(),
    };
    deploy(engine, store, project, reporter, images, &plan)
        .await
        .map_err(|e| {
            e.context(format!(
                "Rebuild failed after {} was removed; no replacement is running",
                record.name
            ))
        })
}
