//! Workspace error types

use skillstudio_storage::StorageError;
use thiserror::Error;

pub type WorkspaceResult<T> = Result<T, WorkspaceError>;

#[derive(Debug, Error)]
pub enum WorkspaceError {
    /// Path rejected by normalization
    #[error("Invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    /// Owner mismatch or an attempt to leave the workspace root
    #[error("Access denied: {reason}")]
    AccessDenied { reason: String },

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// Backend failure surfaced from the project store
    #[error("Storage failure: {0}")]
    Storage(StorageError),
}

impl WorkspaceError {
    pub fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn access_denied(reason: impl Into<String>) -> Self {
        Self::AccessDenied {
            reason: reason.into(),
        }
    }

    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidPath { .. } => "invalid_path",
            Self::AccessDenied { .. } => "access_denied",
            Self::NotFound { .. } => "not_found",
            Self::InvalidInput { .. } => "invalid_input",
            Self::Storage(_) => "storage_failure",
        }
    }
}

impl From<StorageError> for WorkspaceError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::InvalidPath { path, reason } => Self::InvalidPath { path, reason },
            StorageError::NotFound { entity, id } => Self::NotFound { entity, id },
            other => Self::Storage(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_errors_are_mapped() {
        let err: WorkspaceError = StorageError::project_not_found("t1").into();
        assert_eq!(err.code(), "not_found");

        let err: WorkspaceError = StorageError::backend("put", "timeout").into();
        assert_eq!(err.code(), "storage_failure");
        assert!(err.to_string().contains("timeout"));
    }
}
