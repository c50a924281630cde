//! Infrastructure implementation of the `RecordStore` port.
//!
//! `FileRecordStore` keeps the record in `<project>/.autodock` and writes it
//! atomically (temp file + rename) so a partial record is never observed.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use autodock_common::ContainerRecord;

use crate::application::ports::RecordStore;
use crate::domain::record::{self, RECORD_FILE};

/// Record file manager for one project directory.
pub struct FileRecordStore {
    path: PathBuf,
}

impl FileRecordStore {
    /// Store for the project rooted at `project_dir`.
    #[must_use]
    pub fn for_project(project_dir: &Path) -> Self {
        Self::with_path(project_dir.join(RECORD_FILE))
    }

    /// Store with an explicit file path (used in tests).
    #[must_use]
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_sync(&self) -> Result<Option<ContainerRecord>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("reading record file {}", self.path.display()))?;
        let record = record::parse(&content)
            .with_context(|| format!("parsing record file {}", self.path.display()))?;
        Ok(Some(record))
    }

    fn save_sync(&self, record: &ContainerRecord) -> Result<()> {
        let content = record::encode(record);

        let temp_path = self.path.with_extension("tmp");
        std::fs::write(&temp_path, &content)
            .with_context(|| format!("writing temp file {}", temp_path.display()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&temp_path, std::fs::Permissions::from_mode(0o600))
                .with_context(|| format!("setting permissions on {}", temp_path.display()))?;
        }

        std::fs::rename(&temp_path, &self.path)
            .with_context(|| format!("finalizing record file {}", self.path.display()))?;
        Ok(())
    }

    fn clear_sync(&self) -> Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)
                .with_context(|| format!("removing record file {}", self.path.display()))?;
        }
        Ok(())
    }
}

impl RecordStore for FileRecordStore {
    async fn load(&self) -> Result<Option<ContainerRecord>> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || FileRecordStore::with_path(path).load_sync())
            .await
            .context("record load task panicked")?
    }

    async fn save(&self, record: &ContainerRecord) -> Result<()> {
        let path = self.path.clone();
        let record = record.clone();
        tracing::debug!(path = %path.display(), name = %record.name, "saving record");
        tokio::task::spawn_blocking(move || FileRecordStore::with_path(path).save_sync(&record))
            .await
            .context("record save task panicked")?
    }

    async fn clear(&self) -> Result<()> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || FileRecordStore::with_path(path).clear_sync())
            .await
            .context("record clear task panicked")?
    }
}
