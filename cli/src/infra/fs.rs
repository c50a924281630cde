//! Filesystem infrastructure: project reads and artifact writes.
//!
//! `LocalProject` is the on-disk `ProjectReader` the signal bag is built on,
//! and the `ArtifactWriter` that replaces the generated descriptor.

use std::io::Read;
use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result};

use crate::application::ports::ArtifactWriter;
use crate::domain::DESCRIPTOR_FILE;
use crate::domain::detect::ProjectReader;

/// Upper bound on bytes read from any single project file.
pub const MAX_READ_BYTES: u64 = 512 * 1024;

/// A project directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalProject {
    root: PathBuf,
}

impl LocalProject {
    /// Open `root` as a project.
    ///
    /// # Errors
    ///
    /// Returns an error if `root` is not an existing directory.
    pub fn open(root: &Path) -> Result<Self> {
        let root = root
            .canonicalize()
            .with_context(|| format!("project directory {} not found", root.display()))?;
        if !root.is_dir() {
            anyhow::bail!("{} is not a directory", root.display());
        }
        Ok(Self { root })
    }

    /// Absolute path of `rel`, or `None` when it would leave the root.
    fn resolve(&self, rel: &str) -> Option<PathBuf> {
        let rel = Path::new(rel);
        let confined = rel
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
        (confined && !rel.as_os_str().is_empty()).then(|| self.root.join(rel))
    }
}

impl ProjectReader for LocalProject {
    fn list_files(&self) -> Vec<String> {
        let Ok(entries) = std::fs::read_dir(&self.root) else {
            tracing::debug!(root = %self.root.display(), "project root not readable");
            return Vec::new();
        };
        let mut files: Vec<String> = entries
            .filter_map(Result::ok)
            .filter(|e| e.path().is_file())
            .filter_map(|e| e.file_name().into_string().ok())
            .collect();
        files.sort();
        files
    }

    fn read(&self, rel: &str) -> Option<String> {
        let path = self.resolve(rel)?;
        let file = std::fs::File::open(&path).ok()?;
        let mut buf = Vec::new();
        file.take(MAX_READ_BYTES).read_to_end(&mut buf).ok()?;
        Some(String::from_utf8_lossy(&buf).into_owned())
    }

    fn is_file(&self, rel: &str) -> bool {
        self.resolve(rel).is_some_and(|p| p.is_file())
    }
}

impl ArtifactWriter for LocalProject {
    fn root(&self) -> &Path {
        &self.root
    }

    fn write_descriptor(&self, content: &str) -> Result<PathBuf> {
        let path = self.root.join(DESCRIPTOR_FILE);
        std::fs::write(&path, content)
            .with_context(|| format!("writing {}", path.display()))?;
        tracing::debug!(path = %path.display(), "descriptor written");
        Ok(path)
    }
}
