// Print the tool definitions an agent is offered

use std::sync::Arc;

use serde_json::Value;
use skillstudio_config::{StudioConfig, WorkspaceSettings};
use skillstudio_skills::{SkillCatalog, SkillLoadTool};
use skillstudio_workspace::workspace_tool_definitions;

use super::Command;
use crate::error::CliResult;

pub struct ToolsCommand {
    catalog: Arc<SkillCatalog>,
    workspace: WorkspaceSettings,
}

impl ToolsCommand {
    pub fn new(config: &StudioConfig) -> Self {
        Self {
            catalog: Arc::new(SkillCatalog::from_settings(&config.skills)),
            workspace: config.workspace.clone(),
        }
    }

    /// Workspace tools, plus `skill_load` when the catalog has a loadable skill
    pub fn definitions(&self) -> CliResult<Value> {
        let mut definitions = workspace_tool_definitions(&self.workspace)?;
        if let Some(skill_load) = SkillLoadTool::new(Arc::clone(&self.catalog)).available_definition() {
            definitions.push(skill_load);
        }
        Ok(serde_json::to_value(definitions)?)
    }
}

#[async_trait::async_trait]
impl Command for ToolsCommand {
    async fn execute(&self) -> CliResult<()> {
        println!("{}", serde_json::to_string_pretty(&self.definitions()?)?);
        Ok(())
    }
}
