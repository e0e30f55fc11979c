//! SkillStudio Storage
//!
//! Project virtual file store. Each project is a flat map of virtual paths (`/src/App.js`) to
//! text content, persisted one object per file in a key/value object store, with its metadata
//! in a separate document store.
//!
//! - [`path`]: canonical virtual paths; every external path passes through here
//! - [`keys`]: virtual path to object key encoding
//! - [`ports`]: async traits for the two backends
//! - [`memory`]: in-memory backends for tests and local use
//! - [`project_store`]: the project file API with layout migration
//!
//! ```ignore
//! use std::sync::Arc;
//! use skillstudio_config::StorageSettings;
//! use skillstudio_storage::memory::{InMemoryDocumentStore, InMemoryObjectStore};
//! use skillstudio_storage::{NewProject, ProjectFileStore};
//!
//! let store = ProjectFileStore::new(
//!     Arc::new(InMemoryObjectStore::new()),
//!     Arc::new(InMemoryDocumentStore::new()),
//!     &StorageSettings::default(),
//! );
//! store.save(NewProject::new(store.generate_token(), "user-1", "Demo")).await?;
//! ```

pub mod defaults;
pub mod error;
pub mod keys;
pub mod legacy;
pub mod memory;
pub mod model;
pub mod path;
pub mod ports;
pub mod project_store;

pub use defaults::default_project_files;
pub use error::{StorageError, StorageResult};
pub use keys::KeyCodec;
pub use legacy::LegacyDirectory;
pub use model::{
    DocumentUpdate, MetaUpdate, NewProject, ProjectData, ProjectDocument, ProjectFileSet,
    ProjectRecord, ProjectSummary,
};
pub use ports::{DocumentStore, ObjectStore};
pub use project_store::{generate_token, ProjectFileStore};
