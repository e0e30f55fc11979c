//! Creating new skills on disk

use std::collections::BTreeMap;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use tracing::{info, warn};

use crate::catalog::SkillCatalog;
use crate::error::{SkillError, SkillResult};
use crate::models::{MAX_DESCRIPTION_LEN, MAX_NAME_LEN, SKILL_FILE_NAME};
use crate::validator::is_valid_name;

/// Compatibility recorded when the caller gives none
pub const DEFAULT_COMPATIBILITY: &str = "skillstudio";

const DEFAULT_BODY: &str = "# Skill

## Goal

Describe what this skill should help accomplish.

## Workflow

1. Read context before action.
2. Keep changes scoped.
3. Validate before finishing.";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateSkillInput {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub compatibility: Option<String>,
    #[serde(default)]
    pub license: Option<String>,
    #[serde(default)]
    pub metadata: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedSkill {
    pub name: String,
    pub skill_dir: PathBuf,
    pub skill_file: PathBuf,
}

fn validate_name(name: &str) -> SkillResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(SkillError::invalid_input("name", "must not be empty"));
    }
    if !is_valid_name(trimmed) {
        return Err(SkillError::invalid_input(
            "name",
            format!(
                "must match ^[a-z0-9]+(-[a-z0-9]+)*$ and be 1-{} characters",
                MAX_NAME_LEN
            ),
        ));
    }
    Ok(trimmed.to_string())
}

fn validate_description(description: &str) -> SkillResult<String> {
    let trimmed = description.trim();
    if trimmed.is_empty() {
        return Err(SkillError::invalid_input("description", "must not be empty"));
    }
    if trimmed.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(SkillError::invalid_input(
            "description",
            format!("must not exceed {} characters", MAX_DESCRIPTION_LEN),
        ));
    }
    Ok(trimmed.to_string())
}

fn yaml_string(value: &str) -> Value {
    Value::String(value.to_string())
}

/// Render a `SKILL.md` document
///
/// The header is emitted by `serde_yaml`, so every scalar reads back exactly as written.
pub fn build_skill_markdown(
    name: &str,
    description: &str,
    body: &str,
    compatibility: Option<&str>,
    license: Option<&str>,
    metadata: Option<&BTreeMap<String, String>>,
) -> SkillResult<String> {
    let mut header = Mapping::new();
    header.insert(yaml_string("name"), yaml_string(name));
    header.insert(yaml_string("description"), yaml_string(description));
    if let Some(compatibility) = compatibility {
        header.insert(yaml_string("compatibility"), yaml_string(compatibility));
    }
    if let Some(license) = license {
        header.insert(yaml_string("license"), yaml_string(license));
    }
    if let Some(metadata) = metadata.filter(|m| !m.is_empty()) {
        let entries: Mapping = metadata
            .iter()
            .map(|(key, value)| (yaml_string(key), yaml_string(value)))
            .collect();
        header.insert(yaml_string("metadata"), Value::Mapping(entries));
    }

    let header = serde_yaml::to_string(&header)
        .map_err(|err| SkillError::invalid_input("header", err.to_string()))?;
    Ok(format!("---\n{}---\n\n{}", header, body.trim()))
}

/// Create `SKILL.md` inside a freshly created skill directory
///
/// On failure the directory is removed again so the name can be retried.
fn write_new_skill(skill_dir: &Path, markdown: &str) -> SkillResult<PathBuf> {
    let skill_file = skill_dir.join(SKILL_FILE_NAME);
    let written = std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&skill_file)
        .and_then(|mut file| file.write_all(markdown.as_bytes()));

    if let Err(err) = written {
        if let Err(cleanup) = std::fs::remove_dir_all(skill_dir) {
            warn!(path = %skill_dir.display(), error = %cleanup, "Failed to remove partial skill directory");
        }
        return Err(SkillError::io(&skill_file, err));
    }
    Ok(skill_file)
}

/// Write a new skill under the catalog's root directory and reload the catalog
pub fn create_skill(catalog: &SkillCatalog, input: CreateSkillInput) -> SkillResult<CreatedSkill> {
    let name = validate_name(&input.name)?;
    let description = validate_description(&input.description)?;
    let compatibility = input
        .compatibility
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_COMPATIBILITY);
    let license = input
        .license
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());
    let body = input
        .body
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_BODY);

    let root = catalog.scanner().root_dir();
    std::fs::create_dir_all(root).map_err(|err| SkillError::io(root, err))?;

    let skill_dir = root.join(&name);
    match std::fs::create_dir(&skill_dir) {
        Ok(()) => {}
        Err(err) if err.kind() == ErrorKind::AlreadyExists => {
            return Err(SkillError::AlreadyExists {
                name,
                path: skill_dir,
            });
        }
        Err(err) => return Err(SkillError::io(&skill_dir, err)),
    }

    let markdown = build_skill_markdown(
        &name,
        &description,
        body,
        Some(compatibility),
        license,
        input.metadata.as_ref(),
    )?;
    let skill_file = write_new_skill(&skill_dir, &markdown)?;

    info!(name = %name, path = %skill_file.display(), "Created skill");
    catalog.reload();

    Ok(CreatedSkill {
        name,
        skill_dir,
        skill_file,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_document;
    use crate::scanner::SkillScanner;
    use std::time::Duration;
    use tempfile::TempDir;

    fn catalog(temp: &TempDir) -> SkillCatalog {
        SkillCatalog::new(
            SkillScanner::new(temp.path().join("skills"), temp.path()),
            Duration::from_secs(60),
        )
    }

    fn header_description(md: &str) -> Option<String> {
        let doc = parse_document(md, "loc");
        assert!(doc.issues.is_empty(), "{:?}\n{}", doc.issues, md);
        doc.header?
            .get("description")
            .and_then(|v| v.as_str())
            .map(str::to_string)
    }

    #[test]
    fn test_awkward_descriptions_survive() {
        for description in [
            "Use it\t# carefully",
            "key:\tvalue pairs",
            "line\rbreak",
            "two\nlines",
            "a: b",
            "true",
            "1.5",
            "- looks like a list",
        ] {
            let md = build_skill_markdown("foo", description, "", None, None, None).unwrap();
            assert_eq!(header_description(&md).as_deref(), Some(description));
        }
    }

    #[test]
    fn test_numeric_name_stays_a_string() {
        let md = build_skill_markdown("123", "d", "", None, None, None).unwrap();
        let header = parse_document(&md, "loc").header.unwrap();
        assert_eq!(header.get("name").and_then(|v| v.as_str()), Some("123"));
    }

    #[test]
    fn test_failed_write_removes_skill_dir() {
        let temp = TempDir::new().unwrap();
        let skill_dir = temp.path().join("blocked");
        std::fs::create_dir_all(skill_dir.join(SKILL_FILE_NAME)).unwrap();

        let err = write_new_skill(&skill_dir, "---\n").unwrap_err();
        assert!(matches!(err, SkillError::Io { .. }));
        assert!(!skill_dir.exists());
    }

    #[test]
    fn test_markdown_round_trips_through_parser() {
        let mut metadata = BTreeMap::new();
        metadata.insert("author".to_string(), "me: myself".to_string());
        let md = build_skill_markdown("foo", "Does: things", "# Body", Some("studio"), None, Some(&metadata))
            .unwrap();
        let doc = parse_document(&md, "loc");
        assert!(doc.issues.is_empty());
        let header = doc.header.unwrap();
        assert_eq!(header.get("description").and_then(|v| v.as_str()), Some("Does: things"));
        assert_eq!(doc.body, "# Body");
    }

    #[test]
    fn test_create_skill_is_loadable() {
        let temp = TempDir::new().unwrap();
        let catalog = catalog(&temp);
        let created = create_skill(
            &catalog,
            CreateSkillInput {
                name: " my-skill ".to_string(),
                description: "Helps with things".to_string(),
                ..CreateSkillInput::default()
            },
        )
        .unwrap();
        assert_eq!(created.name, "my-skill");
        assert!(created.skill_file.is_file());

        let lookup = catalog.get_by_name("my-skill");
        let skill = lookup.skill.unwrap();
        assert_eq!(skill.compatibility.as_deref(), Some(DEFAULT_COMPATIBILITY));
        assert!(skill.body.starts_with("# Skill"));
    }

    #[test]
    fn test_create_skill_rejects_existing() {
        let temp = TempDir::new().unwrap();
        let catalog = catalog(&temp);
        let input = CreateSkillInput {
            name: "dup".to_string(),
            description: "d".to_string(),
            ..CreateSkillInput::default()
        };
        create_skill(&catalog, input.clone()).unwrap();
        assert!(matches!(
            create_skill(&catalog, input),
            Err(SkillError::AlreadyExists { .. })
        ));
    }

    #[test]
    fn test_create_skill_validates_input() {
        let temp = TempDir::new().unwrap();
        let catalog = catalog(&temp);
        let bad_name = CreateSkillInput {
            name: "Bad Name".to_string(),
            description: "d".to_string(),
            ..CreateSkillInput::default()
        };
        assert!(matches!(
            create_skill(&catalog, bad_name),
            Err(SkillError::InvalidInput { .. })
        ));
        let blank = CreateSkillInput {
            name: "ok".to_string(),
            description: "   ".to_string(),
            ..CreateSkillInput::default()
        };
        assert!(matches!(
            create_skill(&catalog, blank),
            Err(SkillError::InvalidInput { .. })
        ));
        assert!(!temp.path().join("skills").join("ok").exists());
    }
}
