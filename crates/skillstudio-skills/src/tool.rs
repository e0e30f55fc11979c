//! `skill_load` agent tool

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use crate::catalog::SkillCatalog;
use crate::error::{SkillError, SkillResult};
use crate::prompt::{build_skill_content_block, sample_skill_files, DEFAULT_SAMPLE_LIMIT};

/// Name of the skill loading tool
pub const SKILL_LOAD_TOOL: &str = "skill_load";

/// Tool definition as advertised to the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    /// JSON schema of the input object
    pub parameters: Value,
}

impl ToolDefinition {
    pub fn new(name: impl Into<String>, description: impl Into<String>, parameters: Value) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
        }
    }
}

/// Loads one skill's full instructions from the catalog
#[derive(Debug, Clone)]
pub struct SkillLoadTool {
    catalog: Arc<SkillCatalog>,
    sample_limit: usize,
}

impl SkillLoadTool {
    pub fn new(catalog: Arc<SkillCatalog>) -> Self {
        Self {
            catalog,
            sample_limit: DEFAULT_SAMPLE_LIMIT,
        }
    }

    pub fn with_sample_limit(mut self, limit: usize) -> Self {
        self.sample_limit = limit;
        self
    }

    pub fn definition() -> ToolDefinition {
        ToolDefinition::new(
            SKILL_LOAD_TOOL,
            "Load one skill's full instructions from this project's skills catalog. Use exact name from available_skills.",
            json!({
                "type": "object",
                "properties": {
                    "name": {
                        "type": "string",
                        "description": "The exact skill name from available_skills."
                    }
                },
                "required": ["name"]
            }),
        )
    }

    /// Definition, or `None` when the catalog has no loadable skills
    pub fn available_definition(&self) -> Option<ToolDefinition> {
        if self.catalog.runtime_skills().is_empty() {
            None
        } else {
            Some(Self::definition())
        }
    }

    /// Run the tool with a JSON input `{ "name": ... }`
    pub fn execute(&self, input: &Value) -> SkillResult<String> {
        let name = input
            .get("name")
            .and_then(Value::as_str)
            .map(str::trim)
            .unwrap_or_default();
        if name.is_empty() {
            return Err(SkillError::invalid_input("name", "missing skill name"));
        }

        let lookup = self.catalog.get_by_name(name);
        let skill = lookup
            .skill
            .ok_or_else(|| SkillError::not_found(name, &lookup.available))?;

        debug!(name = %skill.name, "Loading skill content");
        let sampled = sample_skill_files(&skill, self.sample_limit);
        Ok(build_skill_content_block(&skill, &sampled))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ManualClock;
    use crate::scanner::SkillScanner;
    use std::fs;
    use std::time::Duration;
    use tempfile::TempDir;

    fn tool(temp: &TempDir) -> SkillLoadTool {
        let catalog = SkillCatalog::with_clock(
            SkillScanner::new(temp.path(), temp.path()),
            Duration::from_secs(60),
            Arc::new(ManualClock::default()),
        );
        SkillLoadTool::new(Arc::new(catalog))
    }

    #[test]
    fn test_definition_schema() {
        let def = SkillLoadTool::definition();
        assert_eq!(def.name, "skill_load");
        assert_eq!(def.parameters["required"], json!(["name"]));
    }

    #[test]
    fn test_no_definition_without_skills() {
        let temp = TempDir::new().unwrap();
        assert!(tool(&temp).available_definition().is_none());
    }

    #[test]
    fn test_execute_loads_skill() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("pdf");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("SKILL.md"), "---\nname: pdf\ndescription: PDF\n---\nUse pdftk").unwrap();
        fs::write(dir.join("notes.txt"), "n").unwrap();

        let tool = tool(&temp);
        assert!(tool.available_definition().is_some());
        let output = tool.execute(&json!({ "name": " pdf " })).unwrap();
        assert!(output.contains("<skill_content name=\"pdf\">"));
        assert!(output.contains("Use pdftk"));
        assert!(output.contains("notes.txt</file>"));
    }

    #[test]
    fn test_execute_errors() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("pdf");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("SKILL.md"), "---\nname: pdf\ndescription: PDF\n---\n").unwrap();
        let tool = tool(&temp);

        assert!(matches!(
            tool.execute(&json!({})),
            Err(SkillError::InvalidInput { .. })
        ));
        match tool.execute(&json!({ "name": "docx" })) {
            Err(SkillError::NotFound { available, .. }) => assert_eq!(available, vec!["pdf"]),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
