//! Backend ports
//!
//! The project store talks to its backends only through these traits. Concrete object-store
//! and database clients live outside this crate; [`crate::memory`] ships in-memory versions.

use async_trait::async_trait;

use crate::error::StorageResult;
use crate::model::{DocumentUpdate, ProjectDocument};

/// Key/value blob store
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Write (or overwrite) one object
    async fn put(&self, key: &str, body: Vec<u8>) -> StorageResult<()>;

    /// Read one object; a missing key is a `NotFound` error
    async fn get(&self, key: &str) -> StorageResult<Vec<u8>>;

    /// Every key starting with `prefix`, ascending
    async fn list_keys(&self, prefix: &str) -> StorageResult<Vec<String>>;

    /// Remove the given keys; unknown keys are ignored
    async fn delete_many(&self, keys: &[String]) -> StorageResult<()>;
}

/// Project metadata store, one document per token
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn find_one(&self, token: &str) -> StorageResult<Option<ProjectDocument>>;

    /// Insert a new document; an existing token is a `DuplicateToken` error
    async fn insert_one(&self, doc: ProjectDocument) -> StorageResult<()>;

    /// Apply a field update; returns whether a document matched
    async fn update_one(&self, token: &str, update: DocumentUpdate) -> StorageResult<bool>;

    /// Returns whether a document was deleted
    async fn delete_one(&self, token: &str) -> StorageResult<bool>;

    /// Every document owned by `owner_id`, in no particular order
    async fn find_by_owner(&self, owner_id: &str) -> StorageResult<Vec<ProjectDocument>>;
}
