//! Object key encoding
//!
//! Project files live under `<object_prefix>/<token>/<files_segment>/<relative path>`.

use skillstudio_config::StorageSettings;

use crate::error::{StorageError, StorageResult};
use crate::path;

/// Maps virtual paths of a project to object-store keys and back
#[derive(Debug, Clone)]
pub struct KeyCodec {
    object_prefix: String,
    files_segment: String,
}

impl Default for KeyCodec {
    fn default() -> Self {
        Self::from_settings(&StorageSettings::default())
    }
}

impl KeyCodec {
    /// Create a codec with explicit segments
    pub fn new(object_prefix: impl Into<String>, files_segment: impl Into<String>) -> Self {
        Self {
            object_prefix: object_prefix.into().trim_matches('/').to_string(),
            files_segment: files_segment.into().trim_matches('/').to_string(),
        }
    }

    /// Create a codec from storage settings
    pub fn from_settings(settings: &StorageSettings) -> Self {
        Self::new(&settings.object_prefix, &settings.files_segment)
    }

    /// Key prefix shared by every file of the project, without a trailing slash
    ///
    /// This is also the value recorded as `files_path` on a migrated document.
    pub fn project_prefix(&self, token: &str) -> String {
        format!("{}/{}/{}", self.object_prefix, token, self.files_segment)
    }

    /// Prefix used for listing, with a trailing slash so `abc` never matches `abcd`
    pub fn list_prefix(&self, token: &str) -> String {
        format!("{}/", self.project_prefix(token))
    }

    /// Encode a virtual path into its object key
    pub fn encode(&self, token: &str, virtual_path: &str) -> StorageResult<String> {
        let normalized = path::normalize(virtual_path)?;
        Ok(format!(
            "{}{}",
            self.list_prefix(token),
            normalized.trim_start_matches('/')
        ))
    }

    /// Decode an object key back into the virtual path it stores
    pub fn decode(&self, token: &str, key: &str) -> StorageResult<String> {
        let prefix = self.list_prefix(token);
        let relative = key
            .strip_prefix(&prefix)
            .ok_or_else(|| StorageError::key_decode(key, format!("expected prefix '{}'", prefix)))?;

        if relative.trim().is_empty() {
            return Err(StorageError::key_decode(key, "empty relative path"));
        }
        if relative.contains('\0') {
            return Err(StorageError::key_decode(key, "contains a NUL character"));
        }
        if relative.split('/').any(|segment| segment == "..") {
            return Err(StorageError::key_decode(key, "contains a '..' segment"));
        }

        Ok(format!("/{}", relative))
    }
}
