//! Virtual path normalization
//!
//! Every path that reaches the object store passes through [`normalize`]. A canonical
//! virtual path starts with exactly one `/`, uses `/` as the only separator, has no empty,
//! `.` or `..` segments and contains no NUL byte.

use crate::error::{StorageError, StorageResult};

/// Separator used in virtual paths
pub const SEPARATOR: char = '/';

/// Turn an arbitrary path string into a canonical virtual path
pub fn normalize(raw: &str) -> StorageResult<String> {
    let trimmed = raw.trim();
    if trimmed.contains('\0') {
        return Err(StorageError::invalid_path(raw, "contains a NUL character"));
    }

    let unified = trimmed.replace('\\', "/");
    let mut segments = Vec::new();
    for segment in unified.split(SEPARATOR) {
        match segment {
            "" | "." => continue,
            ".." => {
                return Err(StorageError::invalid_path(raw, "contains a '..' segment"));
            }
            other => segments.push(other),
        }
    }

    if segments.is_empty() {
        return Err(StorageError::invalid_path(raw, "path is empty"));
    }

    Ok(format!("/{}", segments.join("/")))
}

/// Compose a parent directory and a name, then re-normalize
pub fn join(parent: &str, name: &str) -> StorageResult<String> {
    normalize(&format!("{}/{}", parent, name))
}

/// Longest proper prefix before the last separator, or `/`
pub fn parent_of(path: &str) -> String {
    match path.trim_end_matches(SEPARATOR).rfind(SEPARATOR) {
        Some(0) | None => "/".to_string(),
        Some(index) => path[..index].to_string(),
    }
}

/// Final segment of a virtual path
pub fn file_name(path: &str) -> &str {
    path.rsplit(SEPARATOR).next().unwrap_or(path)
}

/// Whether `path` is `root` itself or lies below it
///
/// Both arguments must already be normalized.
pub fn is_within(path: &str, root: &str) -> bool {
    if root == "/" {
        return path.starts_with(SEPARATOR);
    }
    path == root
        || (path.starts_with(root) && path[root.len()..].starts_with(SEPARATOR))
}
