//! Application service: create (and redeploy) a project's container.

use std::path::PathBuf;

use anyhow::{Context, Result};
use autodock_common::{ContainerRecord, DetectionReport, ProjectType};
use chrono::Utc;

use crate::application::ports::{
    ArtifactWriter, ContainerEngine, ProgressReporter, Prompter, RecordStore,
};
use crate::application::services::detect::{ResolvedProject, detect_project};
use crate::application::services::teardown::{free_port, remove_if_present};
use crate::domain::detect::{Port, ProjectReader, SignalBag, needs_datastore};
use crate::domain::{BaseImages, RunSpec, descriptor};

/// Result of a successful deployment.
#[derive(Debug, Clone)]
pub struct Deployment {
    pub record: ContainerRecord,
    pub container_id: String,
    pub descriptor_path: PathBuf,
    pub datastore: bool,
}

/// Outcome of `create`: what was detected and what was deployed.
#[derive(Debug, Clone)]
pub struct CreateOutcome {
    pub report: DetectionReport,
    pub deployment: Deployment,
}

/// Parameters `deploy` needs, detected or taken from a record.
#[derive(Debug, Clone)]
pub struct DeployPlan {
    pub name: String,
    pub project_type: ProjectType,
    pub port: Port,
    pub entry: Option<String>,
}

impl From<&ResolvedProject> for DeployPlan {
    fn from(p: &ResolvedProject) -> Self {
        Self {
            name: p.name.clone(),
            project_type: p.project_type,
            port: p.port,
            entry: p.entry.clone(),
        }
    }
}

/// Detect the project, then build and run its container.
///
/// # Errors
///
/// Fails when the engine is unavailable, detection fails, or any engine step
/// fails. No record is written unless the container started.
pub async fn create_container(
    engine: &impl ContainerEngine,
    store: &impl RecordStore,
    project: &(impl ProjectReader + ArtifactWriter),
    prompter: &impl Prompter,
    reporter: &impl ProgressReporter,
    images: &BaseImages,
) -> Result<CreateOutcome> {
    engine.check_available().await?;

    let recorded = match store.load().await {
        Ok(record) => record,
        Err(e) => {
            tracing::warn!(error = %e, "ignoring unreadable container record");
            reporter.warn("Ignoring unreadable container record; it will be replaced.");
            None
        }
    };

    let resolved = detect_project(
        project,
        project.root(),
        recorded.as_ref().map(|r| r.name.as_str()),
        prompter,
        reporter,
    )?;
    let report = resolved.report();

    let deployment = deploy(engine, store, project, reporter, images, &DeployPlan::from(&resolved))
        .await?;
    Ok(CreateOutcome { report, deployment })
}

/// Write the descriptor, clear the way, build, run, and persist the record.
///
/// # Errors
///
/// Fails on the first failing step. The record is only saved after the
/// container is running.
pub async fn deploy(
    engine: &impl ContainerEngine,
    store: &impl RecordStore,
    project: &(impl ProjectReader + ArtifactWriter),
    reporter: &impl ProgressReporter,
    images: &BaseImages,
    plan: &DeployPlan,
) -> Result<Deployment> {
    let descriptor = descriptor::generate(
        plan.project_type,
        plan.port,
        plan.entry.as_deref(),
        images,
    )?;
    let descriptor_path = project
        .write_descriptor(&descriptor.render())
        .context("writing build descriptor")?;
    reporter.success(&format!("Wrote {}", descriptor_path.display()));

    let port = plan.port.get();
    free_port(engine, reporter, port).await?;
    remove_if_present(engine, reporter, &plan.name).await?;

    reporter.step(&format!("Building image {}...", plan.name));
    engine.build(&plan.name, project.root()).await?;

    let signals = SignalBag::new(project);
    let datastore = needs_datastore(&signals);
    let mut spec = RunSpec::new(&plan.name, &plan.name, port);
    if datastore {
        spec = spec.with_datastore(&signals.env_file());
    }

    reporter.step(&format!("Starting {} on port {port}...", plan.name));
    let container_id = engine.run(&spec).await?;

    let record = ContainerRecord {
        name: plan.name.clone(),
        image: plan.name.clone(),
        port,
        entry: plan.entry.clone(),
        project_type: plan.project_type,
        created_at: Utc::now(),
    };
    store.save(&record).await.context("saving container record")?;
    tracing::debug!(name = %record.name, id = %container_id, "record saved");

    Ok(Deployment {
        record,
        container_id,
        descriptor_path,
        datastore,
    })
}
