//! Pre-object-store project directories
//!
//! Before the object store existed, project files were kept on local disk under
//! `<legacy_root>/<token>/`. These helpers read such a directory into a file set and remove it
//! once its content has been persisted elsewhere.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::error::{StorageError, StorageResult};
use crate::model::ProjectFileSet;
use crate::path;

/// Legacy on-disk project layout rooted at one directory
#[derive(Debug, Clone)]
pub struct LegacyDirectory {
    root: PathBuf,
}

impl LegacyDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory that holds one project's files
    pub fn project_dir(&self, token: &str) -> PathBuf {
        self.root.join(token)
    }

    /// Read every regular file below the project directory
    ///
    /// A missing directory yields an empty set.
    pub async fn read(&self, token: &str) -> StorageResult<ProjectFileSet> {
        let dir = self.project_dir(token);
        match tokio::fs::metadata(&dir).await {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => return Ok(ProjectFileSet::new()),
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(ProjectFileSet::new()),
            Err(err) => return Err(StorageError::io(dir, err)),
        }

        let mut files = ProjectFileSet::new();
        for entry in WalkDir::new(&dir).min_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|err| {
                let at = err.path().map(Path::to_path_buf).unwrap_or_else(|| dir.clone());
                StorageError::io(at, err.into())
            })?;
            if !entry.file_type().is_file() {
                continue;
            }

            let relative = entry
                .path()
                .strip_prefix(&dir)
                .map_err(|_| StorageError::invalid_path(entry.path().display().to_string(), "outside legacy directory"))?;
            let segments: Vec<String> = relative
                .components()
                .map(|component| component.as_os_str().to_string_lossy().into_owned())
                .collect();
            let virtual_path = path::normalize(&segments.join("/"))?;

            let content = tokio::fs::read_to_string(entry.path())
                .await
                .map_err(|err| StorageError::io(entry.path(), err))?;
            files.insert(virtual_path, content);
        }

        debug!(token, count = files.len(), "Read legacy project directory");
        Ok(files)
    }

    /// Remove the project directory; absence is not an error
    pub async fn remove(&self, token: &str) -> StorageResult<()> {
        let dir = self.project_dir(token);
        match tokio::fs::remove_dir_all(&dir).await {
            Ok(()) => {
                debug!(token, "Removed legacy project directory");
                Ok(())
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StorageError::io(dir, err)),
        }
    }
}
