//! Skill workspace service
//!
//! A workspace is the part of a project's file set under a fixed root (`/skills` by default).
//! It is never stored on its own: every call loads the project, works on the filtered view
//! and writes the whole project back through [`ProjectFileStore::replace_all`].
//!
//! Path arguments are resolved before anything else. Resolution is pure, so a path that
//! escapes the root is rejected without touching storage. Only then is the project loaded
//! and its owner checked.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use skillstudio_config::{StudioConfig, WorkspaceSettings};
use skillstudio_skills::{collect_project_skills, ProjectSkills, DEFAULT_LOCATION_PREFIX};
use skillstudio_storage::{path, ProjectData, ProjectFileSet, ProjectFileStore};
use tracing::{debug, info};

use crate::error::{WorkspaceError, WorkspaceResult};

const README_NAME: &str = "README.md";


/// Live view of a project's workspace files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillWorkspace {
    /// Workspace id, equal to the project token
    pub id: String,
    pub owner_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub files: ProjectFileSet,
}

/// One substring hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchMatch {
    pub path: String,
    /// 1-based line number
    pub line: usize,
    /// 1-based column, counted in characters
    pub column: usize,
    pub snippet: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplaceOutcome {
    pub path: String,
    pub replaced: usize,
}

/// Prefix-scoped operations over one project's files
#[derive(Debug, Clone)]
pub struct SkillWorkspaceService {
    store: ProjectFileStore,
    settings: WorkspaceSettings,
    root: String,
    location_prefix: String,
}

impl SkillWorkspaceService {
    /// Fails with `InvalidPath` when the configured root does not normalize to a directory below `/`
    pub fn new(store: ProjectFileStore, settings: &WorkspaceSettings) -> WorkspaceResult<Self> {
        let root = path::normalize(&settings.root)?;
        Ok(Self {
            store,
            settings: settings.clone(),
            root,
            location_prefix: DEFAULT_LOCATION_PREFIX.to_string(),
        })
    }

    /// Service using the workspace settings and the project skill location prefix
    pub fn from_config(store: ProjectFileStore, config: &StudioConfig) -> WorkspaceResult<Self> {
        Ok(Self::new(store, &config.workspace)?
            .with_location_prefix(config.skills.project_location_prefix.clone()))
    }

    /// Label used in project skill locations (`<prefix>:<token>:<path>`)
    pub fn with_location_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.location_prefix = prefix.into();
        self
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    /// Largest accepted search limit
    pub fn max_search_limit(&self) -> usize {
        self.settings.max_search_limit.max(1)
    }

    pub fn settings(&self) -> &WorkspaceSettings {
        &self.settings
    }

    pub fn store(&self) -> &ProjectFileStore {
        &self.store
    }

    fn readme_path(&self) -> String {
        format!("{}/{}", self.root, README_NAME)
    }

    fn readme_content(&self) -> String {
        format!(
            "# Skills\n\nStore project-bound skills here, for example:\n- {}/my-skill/SKILL.md",
            self.root
        )
    }

    /// Resolve a caller path to a canonical path inside the workspace root
    pub fn resolve_path(&self, raw: &str) -> WorkspaceResult<String> {
        if raw.trim().is_empty() {
            return Err(WorkspaceError::invalid_path(raw, "path is empty"));
        }
        if raw.contains('\0') {
            return Err(WorkspaceError::access_denied(format!(
                "unsafe path '{}'",
                raw.escape_default()
            )));
        }
        if raw.split(['/', '\\']).any(|segment| segment.trim() == "..") {
            return Err(WorkspaceError::access_denied(format!("unsafe path '{}'", raw)));
        }

        let normalized = path::normalize(raw)?;
        if !path::is_within(&normalized, &self.root) {
            return Err(WorkspaceError::access_denied(format!(
                "only paths under {} are allowed",
                self.root
            )));
        }
        Ok(normalized)
    }

    fn in_root(&self, file_path: &str) -> bool {
        path::is_within(file_path, &self.root)
    }

    fn workspace_files(&self, files: &ProjectFileSet) -> ProjectFileSet {
        files
            .iter()
            .filter(|(file_path, _)| self.in_root(file_path))
            .collect()
    }

    fn view(&self, project: &ProjectData, files: &ProjectFileSet) -> SkillWorkspace {
        SkillWorkspace {
            id: project.record.token.clone(),
            owner_id: project.record.owner_id.clone(),
            created_at: project.record.created_at,
            updated_at: project.record.updated_at,
            files: self.workspace_files(files),
        }
    }

    /// Load the project and check its owner
    async fn authorize(&self, workspace_id: &str, owner_id: &str) -> WorkspaceResult<ProjectData> {
        let token = workspace_id.trim();
        if token.is_empty() {
            return Err(WorkspaceError::invalid_input("workspace id is empty"));
        }
        let project = self
            .store
            .get(token)
            .await?
            .ok_or_else(|| WorkspaceError::not_found("Project", token))?;
        if project.record.owner_id != owner_id {
            return Err(WorkspaceError::access_denied("project belongs to another user"));
        }
        Ok(project)
    }

    async fn ensure_readme(&self, project: &mut ProjectData) -> WorkspaceResult<()> {
        let readme = self.readme_path();
        if project.files.contains(&readme) {
            return Ok(());
        }
        project.files.insert(readme, self.readme_content());
        self.store
            .replace_all(&project.record.token, &project.files)
            .await?;
        info!(token = %project.record.token, "Created workspace README");
        Ok(())
    }

    /// Open the workspace of a project the caller owns, creating the README if needed
    pub async fn create(&self, owner_id: &str, project_token: &str) -> WorkspaceResult<SkillWorkspace> {
        let mut project = self.authorize(project_token, owner_id).await?;
        self.ensure_readme(&mut project).await?;
        Ok(self.view(&project, &project.files))
    }

    /// Like [`Self::create`], but rejects a project token that differs from the workspace id
    pub async fn open(
        &self,
        workspace_id: &str,
        owner_id: &str,
        project_token: Option<&str>,
    ) -> WorkspaceResult<SkillWorkspace> {
        let workspace_id = workspace_id.trim();
        let token = project_token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(workspace_id);
        if token.is_empty() {
            return Err(WorkspaceError::invalid_input("project token is missing"));
        }
        if !workspace_id.is_empty() && workspace_id != token {
            return Err(WorkspaceError::access_denied("workspace does not match project"));
        }
        self.create(owner_id, token).await
    }

    /// Sorted workspace paths
    pub async fn list(&self, workspace_id: &str, owner_id: &str) -> WorkspaceResult<Vec<String>> {
        let project = self.authorize(workspace_id, owner_id).await?;
        Ok(self
            .workspace_files(&project.files)
            .paths()
            .map(str::to_string)
            .collect())
    }

    pub async fn read(&self, workspace_id: &str, owner_id: &str, raw_path: &str) -> WorkspaceResult<String> {
        let file_path = self.resolve_path(raw_path)?;
        let project = self.authorize(workspace_id, owner_id).await?;
        project
            .files
            .get(&file_path)
            .map(str::to_string)
            .ok_or_else(|| WorkspaceError::not_found("File", file_path))
    }

    /// Create or overwrite one file; returns the updated workspace files
    pub async fn write(
        &self,
        workspace_id: &str,
        owner_id: &str,
        raw_path: &str,
        content: &str,
    ) -> WorkspaceResult<ProjectFileSet> {
        let file_path = self.resolve_path(raw_path)?;
        let mut project = self.authorize(workspace_id, owner_id).await?;
        project.files.insert(file_path.clone(), content);
        self.store
            .replace_all(&project.record.token, &project.files)
            .await?;
        debug!(token = %project.record.token, path = %file_path, "Wrote workspace file");
        Ok(self.workspace_files(&project.files))
    }

    /// Replace every workspace file with `files`; files outside the root are kept
    pub async fn replace_files(
        &self,
        workspace_id: &str,
        owner_id: &str,
        files: &ProjectFileSet,
    ) -> WorkspaceResult<ProjectFileSet> {
        let mut resolved = ProjectFileSet::new();
        for (raw_path, content) in files.iter() {
            resolved.insert(self.resolve_path(raw_path)?, content);
        }

        let project = self.authorize(workspace_id, owner_id).await?;
        let mut merged: ProjectFileSet = project
            .files
            .iter()
            .filter(|(file_path, _)| !self.in_root(file_path))
            .collect();
        for (file_path, content) in resolved {
            merged.insert(file_path, content);
        }

        self.store.replace_all(&project.record.token, &merged).await?;
        Ok(self.workspace_files(&merged))
    }

    /// Replace every literal occurrence of `query` in one file
    pub async fn replace(
        &self,
        workspace_id: &str,
        owner_id: &str,
        raw_path: &str,
        query: &str,
        replacement: &str,
    ) -> WorkspaceResult<ReplaceOutcome> {
        let file_path = self.resolve_path(raw_path)?;
        if query.is_empty() {
            return Err(WorkspaceError::not_found("Text", "<empty query>"));
        }

        let mut project = self.authorize(workspace_id, owner_id).await?;
        let source = project
            .files
            .get(&file_path)
            .ok_or_else(|| WorkspaceError::not_found("File", file_path.clone()))?;

        let replaced = source.matches(query).count();
        if replaced > 0 {
            let updated = source.replace(query, replacement);
            project.files.insert(file_path.clone(), updated);
            self.store
                .replace_all(&project.record.token, &project.files)
                .await?;
        }
        Ok(ReplaceOutcome {
            path: file_path,
            replaced,
        })
    }

    /// Substring search across workspace files, at most `limit` matches in total
    pub async fn search(
        &self,
        workspace_id: &str,
        owner_id: &str,
        query: &str,
        limit: Option<usize>,
    ) -> WorkspaceResult<Vec<SearchMatch>> {
        if query.is_empty() {
            return Err(WorkspaceError::invalid_input("query must not be empty"));
        }
        let limit = limit
            .unwrap_or(self.settings.default_search_limit)
            .clamp(1, self.max_search_limit());

        let project = self.authorize(workspace_id, owner_id).await?;
        let files = self.workspace_files(&project.files);
        Ok(collect_matches(&files, query, limit, self.settings.snippet_chars))
    }

    /// Skills defined inside the workspace
    pub async fn skills(&self, workspace_id: &str, owner_id: &str) -> WorkspaceResult<ProjectSkills> {
        let project = self.authorize(workspace_id, owner_id).await?;
        let prefix = format!("{}:{}", self.location_prefix, project.record.token);
        Ok(collect_project_skills(
            &self.workspace_files(&project.files),
            &self.root,
            &prefix,
        ))
    }
}

fn collect_matches(files: &ProjectFileSet, query: &str, limit: usize, snippet_chars: usize) -> Vec<SearchMatch> {
    let mut matches = Vec::new();
    for (file_path, content) in files.iter() {
        for (index, line) in content.split('\n').enumerate() {
            let line = line.strip_suffix('\r').unwrap_or(line);
            for (offset, _) in line.match_indices(query) {
                matches.push(SearchMatch {
                    path: file_path.to_string(),
                    line: index + 1,
                    column: line[..offset].chars().count() + 1,
                    snippet: line.trim().chars().take(snippet_chars).collect(),
                });
                if matches.len() >= limit {
                    return matches;
                }
            }
        }
    }
    matches
}

#[cfg(test)]
mod tests {
    use super::*;

    fn files(pairs: &[(&str, &str)]) -> ProjectFileSet {
        pairs.iter().copied().collect()
    }

    fn service(root: &str) -> WorkspaceResult<SkillWorkspaceService> {
        use skillstudio_config::StorageSettings;
        use skillstudio_storage::memory::{InMemoryDocumentStore, InMemoryObjectStore};
        use std::sync::Arc;

        let store = ProjectFileStore::new(
            Arc::new(InMemoryObjectStore::new()),
            Arc::new(InMemoryDocumentStore::new()),
            &StorageSettings::default(),
        );
        let settings = WorkspaceSettings {
            root: root.to_string(),
            ..WorkspaceSettings::default()
        };
        SkillWorkspaceService::new(store, &settings)
    }

    #[test]
    fn test_invalid_root_is_rejected() {
        for root in ["/", "   ", "/skills/../etc"] {
            let err = service(root).unwrap_err();
            assert_eq!(err.code(), "invalid_path", "{}", root);
        }
        assert_eq!(service("agents//").unwrap().root(), "/agents");
    }

    #[test]
    fn test_resolve_path_is_pure() {
        let service = service("/skills").unwrap();
        assert_eq!(service.resolve_path("skills/./a.md").unwrap(), "/skills/a.md");
        assert_eq!(service.resolve_path("/skills").unwrap(), "/skills");
        assert_eq!(service.resolve_path("/skills/..").unwrap_err().code(), "access_denied");
        assert_eq!(service.resolve_path("").unwrap_err().code(), "invalid_path");
    }

    #[test]
    fn test_collect_matches_positions() {
        let files = files(&[("/skills/a.md", "first\r\n  TODO: one TODO\nnone")]);
        let matches = collect_matches(&files, "TODO", 10, 160);
        assert_eq!(matches.len(), 2);
        assert_eq!((matches[0].line, matches[0].column), (2, 3));
        assert_eq!((matches[1].line, matches[1].column), (2, 13));
        assert_eq!(matches[0].snippet, "TODO: one TODO");
    }

    #[test]
    fn test_collect_matches_columns_count_chars() {
        let files = files(&[("/skills/a.md", "ééx")]);
        let matches = collect_matches(&files, "x", 10, 160);
        assert_eq!(matches[0].column, 3);
    }

    #[test]
    fn test_collect_matches_limit_and_snippet() {
        let long_line = format!("{}needle", "a".repeat(300));
        let files = files(&[("/skills/a.md", long_line.as_str()), ("/skills/b.md", "needle")]);
        let matches = collect_matches(&files, "needle", 1, 160);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].path, "/skills/a.md");
        assert_eq!(matches[0].snippet.chars().count(), 160);
    }
}
