//! Agent tool surface over the skill workspace
//!
//! Each tool takes a JSON object, runs one [`SkillWorkspaceService`] call and answers with a
//! [`ToolOutcome`]. Failures never escape as errors: they become `ok = false` with a code.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use skillstudio_config::WorkspaceSettings;
use skillstudio_skills::ToolDefinition;
use skillstudio_storage::path;
use tracing::debug;

use crate::error::{WorkspaceError, WorkspaceResult};
use crate::workspace::SkillWorkspaceService;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkspaceAction {
    ListFiles,
    ReadFile,
    WriteFile,
    ReplaceInFile,
    SearchInFiles,
}

impl WorkspaceAction {
    pub const ALL: [WorkspaceAction; 5] = [
        Self::ListFiles,
        Self::ReadFile,
        Self::WriteFile,
        Self::ReplaceInFile,
        Self::SearchInFiles,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ListFiles => "list_files",
            Self::ReadFile => "read_file",
            Self::WriteFile => "write_file",
            Self::ReplaceInFile => "replace_in_file",
            Self::SearchInFiles => "search_in_files",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.as_str() == name)
    }
}

impl fmt::Display for WorkspaceAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ListFilesInput {}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ReadFileInput {
    path: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct WriteFileInput {
    path: String,
    content: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ReplaceInFileInput {
    path: String,
    query: String,
    replacement: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SearchInFilesInput {
    query: String,
    #[serde(default)]
    limit: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolError {
    pub code: String,
    pub message: String,
}

/// Result of one tool call, serialized back to the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolOutcome {
    pub ok: bool,
    /// Tool name as called
    pub action: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ToolError>,
}

impl ToolOutcome {
    fn success(action: &str, message: impl Into<String>, data: Value) -> Self {
        Self {
            ok: true,
            action: action.to_string(),
            message: message.into(),
            data: Some(data),
            error: None,
        }
    }

    fn failure(action: &str, err: &WorkspaceError) -> Self {
        Self {
            ok: false,
            action: action.to_string(),
            message: err.to_string(),
            data: None,
            error: Some(ToolError {
                code: err.code().to_string(),
                message: err.to_string(),
            }),
        }
    }
}

/// JSON-schema definitions for every workspace tool under the configured root and search cap
pub fn workspace_tool_definitions(settings: &WorkspaceSettings) -> WorkspaceResult<Vec<ToolDefinition>> {
    let root = path::normalize(&settings.root)?;
    Ok(tool_definitions(&root, settings.max_search_limit.max(1)))
}

fn tool_definitions(root: &str, max_search_limit: usize) -> Vec<ToolDefinition> {
    let path_description = format!("Absolute path under {}.", root);
    vec![
        ToolDefinition::new(
            WorkspaceAction::ListFiles.as_str(),
            "List every file in the skills workspace.",
            json!({
                "type": "object",
                "properties": {},
                "additionalProperties": false
            }),
        ),
        ToolDefinition::new(
            WorkspaceAction::ReadFile.as_str(),
            "Read one file from the skills workspace.",
            json!({
                "type": "object",
                "properties": {
                    "path": { "type": "string", "description": path_description }
                },
                "required": ["path"],
                "additionalProperties": false
            }),
        ),
        ToolDefinition::new(
            WorkspaceAction::WriteFile.as_str(),
            "Create or overwrite a file in the skills workspace.",
            json!({
                "type": "object",
                "properties": {
                    "path": { "type": "string", "description": path_description },
                    "content": { "type": "string", "description": "Full file content." }
                },
                "required": ["path", "content"],
                "additionalProperties": false
            }),
        ),
        ToolDefinition::new(
            WorkspaceAction::ReplaceInFile.as_str(),
            "Replace every literal occurrence of a string in one workspace file.",
            json!({
                "type": "object",
                "properties": {
                    "path": { "type": "string", "description": path_description },
                    "query": { "type": "string", "description": "Exact text to replace." },
                    "replacement": { "type": "string", "description": "Replacement text." }
                },
                "required": ["path", "query", "replacement"],
                "additionalProperties": false
            }),
        ),
        ToolDefinition::new(
            WorkspaceAction::SearchInFiles.as_str(),
            "Search workspace files for a literal substring.",
            json!({
                "type": "object",
                "properties": {
                    "query": { "type": "string", "description": "Text to find." },
                    "limit": {
                        "type": "integer",
                        "minimum": 1,
                        "maximum": max_search_limit,
                        "description": "Maximum number of matches."
                    }
                },
                "required": ["query"],
                "additionalProperties": false
            }),
        ),
    ]
}

fn parse_input<T: DeserializeOwned>(input: &Value) -> WorkspaceResult<T> {
    let input = if input.is_null() { json!({}) } else { input.clone() };
    serde_json::from_value(input).map_err(|e| WorkspaceError::invalid_input(e.to_string()))
}

/// Tool dispatcher bound to one workspace and caller
#[derive(Debug, Clone)]
pub struct WorkspaceToolbox {
    service: SkillWorkspaceService,
    workspace_id: String,
    owner_id: String,
}

impl WorkspaceToolbox {
    pub fn new(
        service: SkillWorkspaceService,
        workspace_id: impl Into<String>,
        owner_id: impl Into<String>,
    ) -> Self {
        Self {
            service,
            workspace_id: workspace_id.into(),
            owner_id: owner_id.into(),
        }
    }

    /// Definitions matching what [`Self::execute`] accepts for this service
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        tool_definitions(self.service.root(), self.service.max_search_limit())
    }

    /// Run the named tool; never fails, errors are reported in the outcome
    pub async fn execute(&self, name: &str, input: &Value) -> ToolOutcome {
        let Some(action) = WorkspaceAction::from_name(name) else {
            let err = WorkspaceError::invalid_input(format!("unknown tool '{}'", name));
            return ToolOutcome::failure(name, &err);
        };

        debug!(tool = %action, workspace = %self.workspace_id, "Executing workspace tool");
        match self.dispatch(action, input).await {
            Ok((message, data)) => ToolOutcome::success(name, message, data),
            Err(err) => {
                debug!(tool = %action, code = err.code(), error = %err, "Workspace tool failed");
                ToolOutcome::failure(name, &err)
            }
        }
    }

    async fn dispatch(&self, action: WorkspaceAction, input: &Value) -> WorkspaceResult<(String, Value)> {
        let id = self.workspace_id.as_str();
        let owner = self.owner_id.as_str();
        match action {
            WorkspaceAction::ListFiles => {
                parse_input::<ListFilesInput>(input)?;
                let paths = self.service.list(id, owner).await?;
                Ok((format!("{} file(s)", paths.len()), json!({ "paths": paths })))
            }
            WorkspaceAction::ReadFile => {
                let input: ReadFileInput = parse_input(input)?;
                let path = self.service.resolve_path(&input.path)?;
                let content = self.service.read(id, owner, &path).await?;
                Ok((
                    format!("Read {}", path),
                    json!({ "path": path, "content": content }),
                ))
            }
            WorkspaceAction::WriteFile => {
                let input: WriteFileInput = parse_input(input)?;
                let path = self.service.resolve_path(&input.path)?;
                let files = self.service.write(id, owner, &path, &input.content).await?;
                let paths: Vec<&str> = files.paths().collect();
                Ok((
                    format!("Wrote {}", path),
                    json!({ "path": path, "paths": paths }),
                ))
            }
            WorkspaceAction::ReplaceInFile => {
                let input: ReplaceInFileInput = parse_input(input)?;
                let outcome = self
                    .service
                    .replace(id, owner, &input.path, &input.query, &input.replacement)
                    .await?;
                Ok((
                    format!("Replaced {} occurrence(s) in {}", outcome.replaced, outcome.path),
                    json!({ "path": outcome.path, "replaced": outcome.replaced }),
                ))
            }
            WorkspaceAction::SearchInFiles => {
                let input: SearchInFilesInput = parse_input(input)?;
                let max = self.service.max_search_limit();
                if let Some(limit) = input.limit {
                    if limit == 0 || limit > max {
                        return Err(WorkspaceError::invalid_input(format!(
                            "limit must be between 1 and {}",
                            max
                        )));
                    }
                }
                let matches = self
                    .service
                    .search(id, owner, &input.query, input.limit)
                    .await?;
                Ok((
                    format!("{} match(es)", matches.len()),
                    json!({ "matches": matches }),
                ))
            }
        }
    }
}
