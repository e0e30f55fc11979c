//! Skill error types

use std::path::PathBuf;

use thiserror::Error;

/// Result type for skill operations
pub type SkillResult<T> = Result<T, SkillError>;

/// Errors raised by skill lookup, loading and authoring
///
/// Problems found in a skill document are not errors; they are reported as
/// [`crate::models::SkillIssue`] values on the entry.
#[derive(Error, Debug)]
pub enum SkillError {
    /// Skill not found
    #[error("Skill '{name}' not found. Available skills: {}", format_available(.available))]
    NotFound { name: String, available: Vec<String> },

    /// Caller supplied a missing or malformed argument
    #[error("Invalid {field}: {message}")]
    InvalidInput { field: String, message: String },

    /// Authoring target already exists
    #[error("Skill '{name}' already exists at {}", .path.display())]
    AlreadyExists { name: String, path: PathBuf },

    /// IO error while reading or writing skills
    #[error("IO error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

fn format_available(available: &[String]) -> String {
    if available.is_empty() {
        "none".to_string()
    } else {
        available.join(", ")
    }
}

impl SkillError {
    /// Create a skill not found error with the available skill names
    pub fn not_found(name: impl Into<String>, available: &[String]) -> Self {
        let mut available = available.to_vec();
        available.sort();
        Self::NotFound {
            name: name.into(),
            available,
        }
    }

    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
