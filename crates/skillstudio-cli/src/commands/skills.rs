// Inspect, validate and author skills in the configured skills directory

use std::collections::BTreeMap;
use std::sync::Arc;

use skillstudio_config::SkillsSettings;
use skillstudio_skills::{
    build_catalog_prompt, create_skill, validate_skills, CreateSkillInput, SkillCatalog,
    SkillLoadTool,
};
use tracing::debug;

use super::Command;
use crate::error::{CliError, CliResult};
use crate::output::OutputStyle;

#[derive(Debug, Clone, PartialEq)]
pub enum SkillsAction {
    List { json: bool },
    Show { name: String },
    Validate { name: Option<String>, json: bool },
    /// Rescan the skills directory, bypassing the cache
    Reload,
    /// Print the `<available_skills>` block
    Prompt,
    Create {
        name: String,
        description: String,
        body: Option<String>,
        license: Option<String>,
        compatibility: Option<String>,
        metadata: Vec<(String, String)>,
    },
}

pub struct SkillsCommand {
    action: SkillsAction,
    catalog: Arc<SkillCatalog>,
    style: OutputStyle,
}

impl SkillsCommand {
    pub fn new(action: SkillsAction, settings: &SkillsSettings) -> Self {
        Self {
            action,
            catalog: Arc::new(SkillCatalog::from_settings(settings)),
            style: OutputStyle::default(),
        }
    }

    pub fn with_style(mut self, style: OutputStyle) -> Self {
        self.style = style;
        self
    }

    /// Render the command output without printing it
    pub fn render(&self) -> CliResult<String> {
        match &self.action {
            SkillsAction::List { json } => self.render_list(*json),
            SkillsAction::Show { name } => {
                let tool = SkillLoadTool::new(Arc::clone(&self.catalog));
                Ok(tool.execute(&serde_json::json!({ "name": name }))?)
            }
            SkillsAction::Validate { name, json } => self.render_validation(name.as_deref(), *json),
            SkillsAction::Reload => {
                let snapshot = self.catalog.reload();
                Ok(self.style.success(&format!(
                    "Reloaded {} skill(s) from {} descriptor(s)",
                    snapshot.skills.len(),
                    snapshot.entries.len()
                )))
            }
            SkillsAction::Prompt => Ok(build_catalog_prompt(&self.catalog.runtime_skills())),
            SkillsAction::Create {
                name,
                description,
                body,
                license,
                compatibility,
                metadata,
            } => {
                let metadata: BTreeMap<String, String> = metadata.iter().cloned().collect();
                let created = create_skill(
                    &self.catalog,
                    CreateSkillInput {
                        name: name.clone(),
                        description: description.clone(),
                        body: body.clone(),
                        compatibility: compatibility.clone(),
                        license: license.clone(),
                        metadata: (!metadata.is_empty()).then_some(metadata),
                    },
                )?;
                Ok(self.style.success(&format!(
                    "Created skill '{}' at {}",
                    created.name,
                    created.skill_file.display()
                )))
            }
        }
    }

    fn render_list(&self, json: bool) -> CliResult<String> {
        let snapshot = self.catalog.snapshot(false);
        if json {
            return Ok(serde_json::to_string_pretty(&snapshot.skills)?);
        }
        if snapshot.entries.is_empty() {
            return Ok(self.style.warning(&format!(
                "No skills found in {}",
                snapshot.root_dir.display()
            )));
        }

        let mut lines = vec![self.style.header(&format!("Skills in {}", snapshot.root_dir.display()))];
        for entry in &snapshot.entries {
            let label = entry.name.as_deref().unwrap_or("<unnamed>");
            let line = if entry.is_loadable {
                self.style.success(&format!(
                    "{}: {}",
                    label,
                    entry.description.as_deref().unwrap_or_default()
                ))
            } else {
                self.style
                    .error(&format!("{} ({} issue(s))", label, entry.issues.len()))
            };
            lines.push(format!("{}  {}", line, self.style.muted(&entry.relative_location)));
        }
        Ok(lines.join("\n"))
    }

    fn render_validation(&self, name: Option<&str>, json: bool) -> CliResult<String> {
        let report = validate_skills(&self.catalog, name);
        debug!(ok = report.ok, issues = report.issues.len(), "Validated skills");
        if json {
            return Ok(serde_json::to_string_pretty(&report)?);
        }
        if !report.ok {
            let mut lines: Vec<String> = report
                .issues
                .iter()
                .map(|issue| {
                    self.style.error(&format!(
                        "[{}] {} {}",
                        issue.code,
                        issue.message,
                        self.style.muted(&issue.location)
                    ))
                })
                .collect();
            lines.push(CliError::ValidationFailed {
                issues: report.issues.len(),
            }
            .user_message());
            return Ok(lines.join("\n"));
        }
        Ok(self
            .style
            .success(&format!("{} skill(s) valid", report.skills.len())))
    }

    /// Whether validation of `name` (or everything) passes
    pub fn validation_passes(&self, name: Option<&str>) -> bool {
        validate_skills(&self.catalog, name).ok
    }
}

#[async_trait::async_trait]
impl Command for SkillsCommand {
    async fn execute(&self) -> CliResult<()> {
        println!("{}", self.render()?);
        if let SkillsAction::Validate { name, .. } = &self.action {
            let report = validate_skills(&self.catalog, name.as_deref());
            if !report.ok {
                return Err(CliError::ValidationFailed {
                    issues: report.issues.len(),
                });
            }
        }
        Ok(())
    }
}
