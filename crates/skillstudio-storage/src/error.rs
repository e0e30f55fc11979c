//! Storage error types

use std::path::PathBuf;

use thiserror::Error;

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors raised by the project virtual file store and its backends
#[derive(Debug, Error)]
pub enum StorageError {
    /// A virtual path was rejected by the normalizer
    #[error("Invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    /// Project (or other entity) absent
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Insert of a token that already exists
    #[error("Project token already exists: {token}")]
    DuplicateToken { token: String },

    /// Object key that does not belong to the expected project layout
    #[error("Unrecognized storage key '{key}': {reason}")]
    KeyDecode { key: String, reason: String },

    /// Object-store or document-store call failed
    #[error("Backend failure during {operation}: {message}")]
    Backend { operation: String, message: String },

    /// Legacy directory access failed
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl StorageError {
    /// Create an invalid path error
    pub fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a project not found error
    pub fn project_not_found(token: impl Into<String>) -> Self {
        Self::NotFound {
            entity: "Project",
            id: token.into(),
        }
    }

    /// Create a key decode error
    pub fn key_decode(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::KeyDecode {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Create a backend failure
    pub fn backend(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Backend {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Create an IO error for a legacy path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error means the requested entity does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let err = StorageError::project_not_found("abc123");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Project not found: abc123");
    }

    #[test]
    fn test_invalid_path_message() {
        let err = StorageError::invalid_path("/../x", "contains '..' segment");
        assert!(err.to_string().contains("/../x"));
        assert!(!err.is_not_found());
    }
}
