//! Project virtual file store
//!
//! Metadata lives in a [`DocumentStore`], file content in an [`ObjectStore`] with one object per
//! file. Projects can be found in three historical layouts:
//!
//! 1. files embedded in the metadata document,
//! 2. files on local disk under the legacy directory,
//! 3. files in the object store (current).
//!
//! [`ProjectFileStore::get`] migrates layouts 1 and 2 to layout 3 on first read, and bootstraps
//! the starter files when a project has no files anywhere. Each fallback persists what it found,
//! so it runs at most once per project.
//!
//! Concurrent writers are not coordinated: two `replace_all` calls on the same project end in
//! the file set of whichever finished last.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::Utc;
use skillstudio_config::StorageSettings;
use tracing::{debug, info};
use uuid::Uuid;

use crate::defaults::default_project_files;
use crate::error::{StorageError, StorageResult};
use crate::keys::KeyCodec;
use crate::legacy::LegacyDirectory;
use crate::model::{
    DocumentUpdate, MetaUpdate, NewProject, ProjectData, ProjectDocument, ProjectFileSet,
    ProjectRecord, ProjectSummary,
};
use crate::path;
use crate::ports::{DocumentStore, ObjectStore};

/// Generate a fresh project token: 32 lowercase hex characters
pub fn generate_token() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Reject tokens that cannot be used as a single key or directory segment
fn check_token(token: &str) -> StorageResult<()> {
    let invalid = token.trim().is_empty()
        || token == "."
        || token == ".."
        || token.contains(['/', '\\', '\0']);
    if invalid {
        return Err(StorageError::invalid_path(token, "invalid project token"));
    }
    Ok(())
}

/// Project file API over an object store and a document store
#[derive(Clone)]
pub struct ProjectFileStore {
    objects: Arc<dyn ObjectStore>,
    documents: Arc<dyn DocumentStore>,
    codec: KeyCodec,
    legacy: LegacyDirectory,
}

impl std::fmt::Debug for ProjectFileStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectFileStore")
            .field("codec", &self.codec)
            .field("legacy", &self.legacy)
            .finish_non_exhaustive()
    }
}

impl ProjectFileStore {
    pub fn new(
        objects: Arc<dyn ObjectStore>,
        documents: Arc<dyn DocumentStore>,
        settings: &StorageSettings,
    ) -> Self {
        Self {
            objects,
            documents,
            codec: KeyCodec::from_settings(settings),
            legacy: LegacyDirectory::new(&settings.legacy_root),
        }
    }

    pub fn codec(&self) -> &KeyCodec {
        &self.codec
    }

    /// Load a project with its files, migrating older layouts on the way
    pub async fn get(&self, token: &str) -> StorageResult<Option<ProjectData>> {
        check_token(token)?;
        let Some(mut doc) = self.documents.find_one(token).await? else {
            return Ok(None);
        };

        if let Some(embedded) = doc.files.clone().filter(|files| !files.is_empty()) {
            let embedded = ProjectFileSet::from(embedded).normalized()?;
            info!(token, count = embedded.len(), "Migrating embedded project files to object storage");
            self.write_files(token, &embedded).await?;
            self.mark_migrated(token, &mut doc).await?;
        }

        let mut files = self.read_files(token).await?;
        if !files.is_empty() {
            self.legacy.remove(token).await?;
        } else {
            let legacy_files = self.legacy.read(token).await?;
            if !legacy_files.is_empty() {
                info!(token, count = legacy_files.len(), "Migrating legacy project directory to object storage");
                self.write_files(token, &legacy_files).await?;
                self.legacy.remove(token).await?;
                files = legacy_files;
            } else {
                info!(token, "Bootstrapping project with starter files");
                files = default_project_files();
                self.write_files(token, &files).await?;
            }
            self.mark_migrated(token, &mut doc).await?;
        }

        Ok(Some(ProjectData {
            record: doc.record,
            files,
        }))
    }

    /// Replace the project's file set; afterwards the object keys match `files` exactly
    pub async fn replace_all(&self, token: &str, files: &ProjectFileSet) -> StorageResult<()> {
        check_token(token)?;
        let files = files.normalized()?;
        let desired = files
            .paths()
            .map(|path| self.codec.encode(token, path))
            .collect::<StorageResult<BTreeSet<_>>>()?;

        self.ensure_exists(token).await?;
        self.write_files(token, &files).await?;

        let stale: Vec<String> = self
            .objects
            .list_keys(&self.codec.list_prefix(token))
            .await?
            .into_iter()
            .filter(|key| !desired.contains(key))
            .collect();
        if !stale.is_empty() {
            debug!(token, count = stale.len(), "Deleting stale project objects");
            self.objects.delete_many(&stale).await?;
        }

        self.legacy.remove(token).await?;
        self.touch(token).await
    }

    /// Write a single file; other files are left alone
    pub async fn update_file(&self, token: &str, path: &str, content: &str) -> StorageResult<()> {
        check_token(token)?;
        let normalized = path::normalize(path)?;
        let key = self.codec.encode(token, &normalized)?;

        self.ensure_exists(token).await?;
        debug!(token, key = %key, "Writing project object");
        self.objects.put(&key, content.as_bytes().to_vec()).await?;

        self.legacy.remove(token).await?;
        self.touch(token).await
    }

    /// Create a project document and write its files
    pub async fn save(&self, project: NewProject) -> StorageResult<ProjectRecord> {
        check_token(&project.token)?;
        let files = project.files.normalized()?;

        let now = Utc::now();
        let record = ProjectRecord {
            token: project.token,
            name: project.name,
            template: project.template,
            owner_id: project.owner_id,
            dependencies: project.dependencies,
            compile_info: project.compile_info,
            created_at: now,
            updated_at: now,
        };
        let files_path = self.codec.project_prefix(&record.token);
        self.documents
            .insert_one(ProjectDocument::migrated(record.clone(), files_path))
            .await?;
        info!(token = %record.token, owner = %record.owner_id, "Created project");

        self.replace_all(&record.token, &files).await?;
        Ok(record)
    }

    /// Delete a project's document, objects and legacy directory
    ///
    /// Objects and the legacy directory are cleaned up even when no document exists, in which
    /// case the result is still `NotFound`.
    pub async fn delete(&self, token: &str) -> StorageResult<()> {
        check_token(token)?;
        let deleted = self.documents.delete_one(token).await?;

        let keys = self.objects.list_keys(&self.codec.list_prefix(token)).await?;
        if !keys.is_empty() {
            self.objects.delete_many(&keys).await?;
        }
        self.legacy.remove(token).await?;

        if !deleted {
            return Err(StorageError::project_not_found(token));
        }
        info!(token, objects = keys.len(), "Deleted project");
        Ok(())
    }

    /// Partially update name, template, dependencies or compile diagnostics
    pub async fn update_meta(&self, token: &str, update: MetaUpdate) -> StorageResult<()> {
        check_token(token)?;
        let matched = self
            .documents
            .update_one(token, DocumentUpdate::meta(update, Utc::now()))
            .await?;
        if !matched {
            return Err(StorageError::project_not_found(token));
        }
        Ok(())
    }

    /// Projects owned by `owner_id`, most recently updated first
    pub async fn list_projects(&self, owner_id: &str) -> StorageResult<Vec<ProjectSummary>> {
        if owner_id.trim().is_empty() {
            return Ok(Vec::new());
        }
        let mut summaries: Vec<ProjectSummary> = self
            .documents
            .find_by_owner(owner_id)
            .await?
            .iter()
            .map(|doc| ProjectSummary::from(&doc.record))
            .collect();
        summaries.sort_by(|a, b| {
            b.updated_at
                .cmp(&a.updated_at)
                .then_with(|| a.token.cmp(&b.token))
        });
        Ok(summaries)
    }

    /// Whether any object exists for the project
    pub async fn has_files(&self, token: &str) -> StorageResult<bool> {
        check_token(token)?;
        let keys = self.objects.list_keys(&self.codec.list_prefix(token)).await?;
        Ok(!keys.is_empty())
    }

    pub fn generate_token(&self) -> String {
        generate_token()
    }

    async fn ensure_exists(&self, token: &str) -> StorageResult<()> {
        match self.documents.find_one(token).await? {
            Some(_) => Ok(()),
            None => Err(StorageError::project_not_found(token)),
        }
    }

    async fn write_files(&self, token: &str, files: &ProjectFileSet) -> StorageResult<()> {
        for (path, content) in files.iter() {
            let key = self.codec.encode(token, path)?;
            debug!(token, key = %key, "Writing project object");
            self.objects.put(&key, content.as_bytes().to_vec()).await?;
        }
        Ok(())
    }

    async fn read_files(&self, token: &str) -> StorageResult<ProjectFileSet> {
        let keys = self.objects.list_keys(&self.codec.list_prefix(token)).await?;
        let mut files = ProjectFileSet::new();
        for key in keys {
            let path = self.codec.decode(token, &key)?;
            let body = self.objects.get(&key).await?;
            let content = String::from_utf8(body).map_err(|e| {
                StorageError::backend("get", format!("object '{}' is not valid UTF-8: {}", key, e))
            })?;
            files.insert(path, content);
        }
        Ok(files)
    }

    async fn touch(&self, token: &str) -> StorageResult<()> {
        let update = DocumentUpdate::mark_migrated(self.codec.project_prefix(token), Utc::now());
        if !self.documents.update_one(token, update).await? {
            return Err(StorageError::project_not_found(token));
        }
        Ok(())
    }

    async fn mark_migrated(&self, token: &str, doc: &mut ProjectDocument) -> StorageResult<()> {
        let update = DocumentUpdate::mark_migrated(self.codec.project_prefix(token), Utc::now());
        self.documents.update_one(token, update.clone()).await?;
        update.apply_to(doc);
        Ok(())
    }
}
