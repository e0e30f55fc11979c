//! In-memory backends
//!
//! Thread-safe implementations of the storage ports, used by tests and local tooling.
//! Each keeps operation counters so callers can assert that no I/O happened.

mod document_store;
mod object_store;

pub use document_store::InMemoryDocumentStore;
pub use object_store::InMemoryObjectStore;
