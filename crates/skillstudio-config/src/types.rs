//! Core configuration types

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct StudioConfig {
    /// Project virtual file store settings
    pub storage: StorageSettings,
    /// Skill catalog settings
    pub skills: SkillsSettings,
    /// Skill workspace settings
    pub workspace: WorkspaceSettings,
}

/// Object-store layout and legacy migration settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StorageSettings {
    /// First key segment shared by every project (`<prefix>/<token>/...`)
    pub object_prefix: String,
    /// Segment between the token and the virtual path
    pub files_segment: String,
    /// Directory holding pre-object-store projects, one sub-directory per token
    pub legacy_root: PathBuf,
}

/// Global skill catalog settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SkillsSettings {
    /// Directory scanned for `SKILL.md` descriptors
    pub root_dir: PathBuf,
    /// Base directory for relative locations
    pub working_dir: PathBuf,
    /// Snapshot time-to-live in seconds
    pub cache_ttl_secs: u64,
    /// Location label for skills collected from a project
    pub project_location_prefix: String,
}

/// Skill workspace settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WorkspaceSettings {
    /// Virtual directory the workspace is confined to
    pub root: String,
    /// Match limit used when a search omits one
    pub default_search_limit: usize,
    /// Upper bound for a requested search limit
    pub max_search_limit: usize,
    /// Maximum snippet length in characters
    pub snippet_chars: usize,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            object_prefix: "projects".to_string(),
            files_segment: "files".to_string(),
            legacy_root: PathBuf::from("data").join("projects"),
        }
    }
}

impl Default for SkillsSettings {
    fn default() -> Self {
        Self {
            root_dir: PathBuf::from("skills"),
            working_dir: PathBuf::from("."),
            cache_ttl_secs: 60,
            project_location_prefix: "project".to_string(),
        }
    }
}

impl Default for WorkspaceSettings {
    fn default() -> Self {
        Self {
            root: "/skills".to_string(),
            default_search_limit: 50,
            max_search_limit: 200,
            snippet_chars: 160,
        }
    }
}

impl StudioConfig {
    /// Check invariants the loaders cannot express
    pub fn validate(&self) -> Result<()> {
        if self.storage.object_prefix.trim_matches('/').is_empty() {
            return Err(ConfigError::validation(
                "storage.object_prefix",
                "must not be empty",
            ));
        }
        if self.storage.files_segment.trim_matches('/').is_empty() {
            return Err(ConfigError::validation(
                "storage.files_segment",
                "must not be empty",
            ));
        }
        if self.skills.cache_ttl_secs == 0 {
            return Err(ConfigError::validation(
                "skills.cache_ttl_secs",
                "must be greater than 0",
            ));
        }
        if self.skills.project_location_prefix.trim().is_empty() {
            return Err(ConfigError::validation(
                "skills.project_location_prefix",
                "must not be empty",
            ));
        }
        if !self.workspace.root.starts_with('/') || self.workspace.root.trim_matches('/').is_empty()
        {
            return Err(ConfigError::validation(
                "workspace.root",
                format!("must be an absolute virtual directory, got '{}'", self.workspace.root),
            ));
        }
        if self.workspace.max_search_limit == 0 {
            return Err(ConfigError::validation(
                "workspace.max_search_limit",
                "must be greater than 0",
            ));
        }
        if self.workspace.default_search_limit == 0
            || self.workspace.default_search_limit > self.workspace.max_search_limit
        {
            return Err(ConfigError::validation(
                "workspace.default_search_limit",
                format!(
                    "must be between 1 and {}",
                    self.workspace.max_search_limit
                ),
            ));
        }
        if self.workspace.snippet_chars == 0 {
            return Err(ConfigError::validation(
                "workspace.snippet_chars",
                "must be greater than 0",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = StudioConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.storage.object_prefix, "projects");
        assert_eq!(config.workspace.root, "/skills");
        assert_eq!(config.skills.cache_ttl_secs, 60);
    }

    #[test]
    fn test_zero_ttl_rejected() {
        let mut config = StudioConfig::default();
        config.skills.cache_ttl_secs = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("skills.cache_ttl_secs"));
    }

    #[test]
    fn test_relative_workspace_root_rejected() {
        let mut config = StudioConfig::default();
        config.workspace.root = "skills".to_string();
        assert!(config.validate().is_err());

        config.workspace.root = "/".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_limit_above_max_rejected() {
        let mut config = StudioConfig::default();
        config.workspace.default_search_limit = 500;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: StudioConfig = toml::from_str("[skills]\ncache_ttl_secs = 5\n").unwrap();
        assert_eq!(config.skills.cache_ttl_secs, 5);
        assert_eq!(config.skills.root_dir, PathBuf::from("skills"));
        assert_eq!(config.workspace, WorkspaceSettings::default());
    }
}
