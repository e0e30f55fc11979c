use skillstudio_config::ConfigError;
use skillstudio_skills::SkillError;
use skillstudio_workspace::WorkspaceError;
use thiserror::Error;

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Skill error: {0}")]
    Skill(#[from] SkillError),

    #[error("Workspace error: {0}")]
    Workspace(#[from] WorkspaceError),

    #[error("Validation failed with {issues} issue(s)")]
    ValidationFailed { issues: usize },

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// User-facing message with a hint on what to try next
    pub fn user_message(&self) -> String {
        match self {
            CliError::InvalidArgument { message } => {
                format!("Invalid argument: {}\n\nRun 'studio --help' for usage information.", message)
            }
            CliError::Config(err) => {
                format!("Configuration error: {}\n\nRun 'studio config show' to inspect the active settings.", err)
            }
            CliError::Skill(SkillError::NotFound { name, available }) if available.is_empty() => {
                format!("Skill not found: {}\n\nNo skills are installed.", name)
            }
            CliError::Skill(SkillError::NotFound { name, available }) => {
                format!("Skill not found: {}\n\nAvailable skills: {}", name, available.join(", "))
            }
            CliError::Skill(err) => err.to_string(),
            CliError::Workspace(err) => {
                format!("Workspace error: {}\n\nCheck the [workspace] section of the configuration.", err)
            }
            CliError::ValidationFailed { issues } => {
                format!("Skill validation found {} issue(s)", issues)
            }
            CliError::Json(err) => format!("Failed to render output: {}", err),
        }
    }
}

pub type CliResult<T> = Result<T, CliError>;
