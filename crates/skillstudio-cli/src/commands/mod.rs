// Command handlers for the studio CLI

pub mod config;
pub mod skills;
pub mod tools;

pub use config::{ConfigAction, ConfigCommand};
pub use skills::{SkillsAction, SkillsCommand};
pub use tools::ToolsCommand;

use crate::error::CliResult;

/// Trait for command handlers
#[async_trait::async_trait]
pub trait Command: Send + Sync {
    /// Execute the command
    async fn execute(&self) -> CliResult<()>;
}
