//! Project records and file sets

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StorageResult;
use crate::path;

/// Project metadata as stored in the document store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    /// Opaque unique identifier
    pub token: String,
    /// Display name
    pub name: String,
    /// Template id the project was created from
    pub template: String,
    /// Owner; never changes after creation
    pub owner_id: String,
    /// Dependency map (package name to version)
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
    /// Last-known compile diagnostics reported by the preview runtime
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compile_info: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Storage shape of a project document, including historical layout markers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectDocument {
    #[serde(flatten)]
    pub record: ProjectRecord,
    /// Object-store prefix, set once the files live in the object store
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files_path: Option<String>,
    /// Files embedded in the document by the oldest layout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<BTreeMap<String, String>>,
}

impl ProjectDocument {
    /// Document for a record whose files already live in the object store
    pub fn migrated(record: ProjectRecord, files_path: impl Into<String>) -> Self {
        Self {
            record,
            files_path: Some(files_path.into()),
            files: None,
        }
    }

    /// Document in the embedded layout (files inside the document)
    pub fn embedded(record: ProjectRecord, files: BTreeMap<String, String>) -> Self {
        Self {
            record,
            files_path: None,
            files: Some(files),
        }
    }

    pub fn token(&self) -> &str {
        &self.record.token
    }

    /// Whether the embedded layout still carries files
    pub fn has_embedded_files(&self) -> bool {
        self.files.as_ref().is_some_and(|files| !files.is_empty())
    }
}

/// Ordered map of virtual path to file content for one project
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectFileSet(BTreeMap<String, String>);

impl ProjectFileSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a file, replacing previous content at the same path
    pub fn insert(&mut self, path: impl Into<String>, content: impl Into<String>) -> Option<String> {
        self.0.insert(path.into(), content.into())
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.0.get(path).map(String::as_str)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.0.contains_key(path)
    }

    pub fn remove(&mut self, path: &str) -> Option<String> {
        self.0.remove(path)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate `(path, content)` pairs in ascending path order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(path, content)| (path.as_str(), content.as_str()))
    }

    /// Paths in ascending order
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Keep only the files for which `keep` returns true
    pub fn retain(&mut self, mut keep: impl FnMut(&str, &str) -> bool) {
        self.0.retain(|path, content| keep(path, content));
    }

    /// Copy of the set with every path normalized
    ///
    /// Fails on the first invalid path. When two raw paths normalize to the same
    /// virtual path the one that sorts last wins.
    pub fn normalized(&self) -> StorageResult<Self> {
        let mut out = BTreeMap::new();
        for (raw, content) in &self.0 {
            out.insert(path::normalize(raw)?, content.clone());
        }
        Ok(Self(out))
    }

    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.0
    }

    pub fn as_map(&self) -> &BTreeMap<String, String> {
        &self.0
    }
}

impl From<BTreeMap<String, String>> for ProjectFileSet {
    fn from(files: BTreeMap<String, String>) -> Self {
        Self(files)
    }
}

impl<P: Into<String>, C: Into<String>> FromIterator<(P, C)> for ProjectFileSet {
    fn from_iter<I: IntoIterator<Item = (P, C)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(path, content)| (path.into(), content.into()))
                .collect(),
        )
    }
}

impl IntoIterator for ProjectFileSet {
    type Item = (String, String);
    type IntoIter = std::collections::btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// A project with its files, as returned by a read
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectData {
    #[serde(flatten)]
    pub record: ProjectRecord,
    pub files: ProjectFileSet,
}

/// Input for creating a project
#[derive(Debug, Clone, PartialEq)]
pub struct NewProject {
    pub token: String,
    pub name: String,
    pub template: String,
    pub owner_id: String,
    pub dependencies: BTreeMap<String, String>,
    pub compile_info: Option<serde_json::Value>,
    pub files: ProjectFileSet,
}

impl NewProject {
    pub fn new(
        token: impl Into<String>,
        owner_id: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            token: token.into(),
            name: name.into(),
            template: "react".to_string(),
            owner_id: owner_id.into(),
            dependencies: BTreeMap::new(),
            compile_info: None,
            files: ProjectFileSet::new(),
        }
    }

    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    pub fn with_files(mut self, files: ProjectFileSet) -> Self {
        self.files = files;
        self
    }

    pub fn with_dependency(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.dependencies.insert(name.into(), version.into());
        self
    }
}

/// Partial metadata update; `None` fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetaUpdate {
    pub name: Option<String>,
    pub template: Option<String>,
    pub dependencies: Option<BTreeMap<String, String>>,
    pub compile_info: Option<serde_json::Value>,
}

impl MetaUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.template.is_none()
            && self.dependencies.is_none()
            && self.compile_info.is_none()
    }
}

/// Listing entry for a user's projects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub token: String,
    pub name: String,
    pub updated_at: DateTime<Utc>,
}

impl From<&ProjectRecord> for ProjectSummary {
    fn from(record: &ProjectRecord) -> Self {
        Self {
            token: record.token.clone(),
            name: record.name.clone(),
            updated_at: record.updated_at,
        }
    }
}

/// Field-level update applied by [`crate::ports::DocumentStore::update_one`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentUpdate {
    pub meta: MetaUpdate,
    pub updated_at: Option<DateTime<Utc>>,
    pub files_path: Option<String>,
    /// Drop the embedded legacy file map
    pub clear_embedded_files: bool,
}

impl DocumentUpdate {
    /// Update recording that the files now live under `files_path`
    pub fn mark_migrated(files_path: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            updated_at: Some(now),
            files_path: Some(files_path.into()),
            clear_embedded_files: true,
            ..Self::default()
        }
    }

    /// Metadata update stamped with `now`
    pub fn meta(meta: MetaUpdate, now: DateTime<Utc>) -> Self {
        Self {
            meta,
            updated_at: Some(now),
            ..Self::default()
        }
    }

    /// Apply the update to a document in place
    pub fn apply_to(&self, doc: &mut ProjectDocument) {
        if let Some(name) = &self.meta.name {
            doc.record.name = name.clone();
        }
        if let Some(template) = &self.meta.template {
            doc.record.template = template.clone();
        }
        if let Some(dependencies) = &self.meta.dependencies {
            doc.record.dependencies = dependencies.clone();
        }
        if let Some(compile_info) = &self.meta.compile_info {
            doc.record.compile_info = Some(compile_info.clone());
        }
        if let Some(updated_at) = self.updated_at {
            doc.record.updated_at = updated_at;
        }
        if let Some(files_path) = &self.files_path {
            doc.files_path = Some(files_path.clone());
        }
        if self.clear_embedded_files {
            doc.files = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ProjectRecord {
        let now = Utc::now();
        ProjectRecord {
            token: "t1".to_string(),
            name: "Demo".to_string(),
            template: "react".to_string(),
            owner_id: "u1".to_string(),
            dependencies: BTreeMap::new(),
            compile_info: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_file_set_is_ordered() {
        let files: ProjectFileSet = [("/b.txt", "2"), ("/a.txt", "1")].into_iter().collect();
        let paths: Vec<_> = files.paths().collect();
        assert_eq!(paths, vec!["/a.txt", "/b.txt"]);
    }

    #[test]
    fn test_normalized_rejects_bad_path() {
        let files: ProjectFileSet = [("ok.txt", "1"), ("/../bad", "2")].into_iter().collect();
        assert!(files.normalized().is_err());

        let files: ProjectFileSet = [("ok.txt", "1")].into_iter().collect();
        assert_eq!(files.normalized().unwrap().get("/ok.txt"), Some("1"));
    }

    #[test]
    fn test_mark_migrated_clears_embedded_files() {
        let mut files = BTreeMap::new();
        files.insert("/a.txt".to_string(), "1".to_string());
        let mut doc = ProjectDocument::embedded(record(), files);
        assert!(doc.has_embedded_files());

        DocumentUpdate::mark_migrated("projects/t1/files", Utc::now()).apply_to(&mut doc);
        assert!(!doc.has_embedded_files());
        assert_eq!(doc.files_path.as_deref(), Some("projects/t1/files"));
    }

    #[test]
    fn test_meta_update_leaves_owner_untouched() {
        let mut doc = ProjectDocument::migrated(record(), "projects/t1/files");
        let update = MetaUpdate {
            name: Some("Renamed".to_string()),
            ..MetaUpdate::default()
        };
        DocumentUpdate::meta(update, Utc::now()).apply_to(&mut doc);
        assert_eq!(doc.record.name, "Renamed");
        assert_eq!(doc.record.owner_id, "u1");
        assert_eq!(doc.record.template, "react");
    }

    #[test]
    fn test_document_serializes_flat() {
        let doc = ProjectDocument::migrated(record(), "projects/t1/files");
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["token"], "t1");
        assert_eq!(json["files_path"], "projects/t1/files");
        assert!(json.get("files").is_none());
    }
}
