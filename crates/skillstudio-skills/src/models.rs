//! Skill data models

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// File name every skill descriptor must have
pub const SKILL_FILE_NAME: &str = "SKILL.md";

/// Maximum skill name length in characters
pub const MAX_NAME_LEN: usize = 64;

/// Maximum description length in characters
pub const MAX_DESCRIPTION_LEN: usize = 1024;

/// Machine-readable problem found in a skill descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillIssueCode {
    HeaderMissing,
    HeaderParseError,
    HeaderNotObject,
    NameMissing,
    NameInvalid,
    NameDirMismatch,
    DescriptionMissing,
    DescriptionInvalid,
    DescriptionTooLong,
    DuplicateName,
    NotFound,
}

impl SkillIssueCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HeaderMissing => "header_missing",
            Self::HeaderParseError => "header_parse_error",
            Self::HeaderNotObject => "header_not_object",
            Self::NameMissing => "name_missing",
            Self::NameInvalid => "name_invalid",
            Self::NameDirMismatch => "name_dir_mismatch",
            Self::DescriptionMissing => "description_missing",
            Self::DescriptionInvalid => "description_invalid",
            Self::DescriptionTooLong => "description_too_long",
            Self::DuplicateName => "duplicate_name",
            Self::NotFound => "not_found",
        }
    }
}

impl fmt::Display for SkillIssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One validation finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillIssue {
    pub code: SkillIssueCode,
    pub message: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl SkillIssue {
    pub fn new(code: SkillIssueCode, message: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            location: location.into(),
            name: None,
        }
    }

    pub fn with_name(mut self, name: Option<&str>) -> Self {
        self.name = name.map(str::to_string);
        self
    }
}

/// A scanned descriptor with its validation outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillEntry {
    pub name: Option<String>,
    pub description: Option<String>,
    pub license: Option<String>,
    pub compatibility: Option<String>,
    pub metadata: Option<BTreeMap<String, String>>,
    /// Unique location (absolute path, or `<prefix>:<virtual path>` for project skills)
    pub location: String,
    pub relative_location: String,
    /// Directory containing the descriptor
    pub base_dir: String,
    pub body: String,
    pub issues: Vec<SkillIssue>,
    pub is_loadable: bool,
}

impl SkillEntry {
    /// Runtime view of the entry; `None` unless the entry is loadable
    pub fn runtime_skill(&self) -> Option<RuntimeSkill> {
        if !self.is_loadable {
            return None;
        }
        Some(RuntimeSkill {
            name: self.name.clone()?,
            description: self.description.clone()?,
            license: self.license.clone(),
            compatibility: self.compatibility.clone(),
            metadata: self.metadata.clone(),
            location: self.location.clone(),
            relative_location: self.relative_location.clone(),
            base_dir: self.base_dir.clone(),
            body: self.body.clone(),
        })
    }

    pub fn has_issue(&self, code: SkillIssueCode) -> bool {
        self.issues.iter().any(|issue| issue.code == code)
    }
}

/// A skill an agent can load
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuntimeSkill {
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compatibility: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<BTreeMap<String, String>>,
    pub location: String,
    pub relative_location: String,
    pub base_dir: String,
    pub body: String,
}

/// Result of one catalog scan; replaced wholesale, never mutated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillSnapshot {
    pub scanned_at: DateTime<Utc>,
    pub root_dir: PathBuf,
    pub entries: Vec<SkillEntry>,
    /// Loadable skills, one per name, sorted by name
    pub skills: Vec<RuntimeSkill>,
    /// Names defined by more than one loadable entry, with ascending locations
    pub duplicate_names: BTreeMap<String, Vec<String>>,
}

impl SkillSnapshot {
    pub fn empty(root_dir: impl Into<PathBuf>, scanned_at: DateTime<Utc>) -> Self {
        Self {
            scanned_at,
            root_dir: root_dir.into(),
            entries: Vec::new(),
            skills: Vec::new(),
            duplicate_names: BTreeMap::new(),
        }
    }

    pub fn skill(&self, name: &str) -> Option<&RuntimeSkill> {
        self.skills.iter().find(|skill| skill.name == name)
    }

    /// Names of all loadable skills, sorted
    pub fn skill_names(&self) -> Vec<String> {
        self.skills.iter().map(|skill| skill.name.clone()).collect()
    }
}

/// Skills collected from one project's file set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectSkills {
    pub entries: Vec<SkillEntry>,
    pub skills: Vec<RuntimeSkill>,
    pub duplicate_names: BTreeMap<String, Vec<String>>,
}

/// Outcome of a lookup by name
#[derive(Debug, Clone, PartialEq)]
pub struct SkillLookup {
    pub skill: Option<RuntimeSkill>,
    /// Every loadable name, sorted
    pub available: Vec<String>,
}
