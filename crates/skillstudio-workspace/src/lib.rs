//! SkillStudio skill workspace
//!
//! A prefix-scoped view of a project's files where an agent keeps project-bound skills, plus
//! the tool surface (`list_files`, `read_file`, `write_file`, `replace_in_file`,
//! `search_in_files`) that exposes it.

pub mod error;
pub mod tools;
pub mod workspace;

pub use error::{WorkspaceError, WorkspaceResult};
pub use tools::{workspace_tool_definitions, ToolError, ToolOutcome, WorkspaceAction, WorkspaceToolbox};
pub use workspace::{ReplaceOutcome, SearchMatch, SkillWorkspace, SkillWorkspaceService};
