use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::error::{StorageError, StorageResult};
use crate::model::{DocumentUpdate, ProjectDocument};
use crate::ports::DocumentStore;

/// Document store keyed by project token
///
/// Stores cloned documents so callers never share state with the store.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    documents: RwLock<HashMap<String, ProjectDocument>>,
    operations: AtomicUsize,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with initial documents (useful for testing)
    pub fn with_documents(documents: Vec<ProjectDocument>) -> Self {
        let map = documents
            .into_iter()
            .map(|doc| (doc.record.token.clone(), doc))
            .collect();
        Self {
            documents: RwLock::new(map),
            operations: AtomicUsize::new(0),
        }
    }

    /// Number of port calls served so far
    pub fn operation_count(&self) -> usize {
        self.operations.load(Ordering::SeqCst)
    }

    /// Current document for a token, bypassing the counters (for testing)
    pub fn peek(&self, token: &str) -> Option<ProjectDocument> {
        self.documents.read().get(token).cloned()
    }

    pub fn count(&self) -> usize {
        self.documents.read().len()
    }

    fn record(&self) {
        self.operations.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn find_one(&self, token: &str) -> StorageResult<Option<ProjectDocument>> {
        self.record();
        Ok(self.documents.read().get(token).cloned())
    }

    async fn insert_one(&self, doc: ProjectDocument) -> StorageResult<()> {
        self.record();
        let mut documents = self.documents.write();
        if documents.contains_key(doc.token()) {
            return Err(StorageError::DuplicateToken {
                token: doc.record.token,
            });
        }
        documents.insert(doc.record.token.clone(), doc);
        Ok(())
    }

    async fn update_one(&self, token: &str, update: DocumentUpdate) -> StorageResult<bool> {
        self.record();
        let mut documents = self.documents.write();
        match documents.get_mut(token) {
            Some(doc) => {
                update.apply_to(doc);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_one(&self, token: &str) -> StorageResult<bool> {
        self.record();
        Ok(self.documents.write().remove(token).is_some())
    }

    async fn find_by_owner(&self, owner_id: &str) -> StorageResult<Vec<ProjectDocument>> {
        self.record();
        Ok(self
            .documents
            .read()
            .values()
            .filter(|doc| doc.record.owner_id == owner_id)
            .cloned()
            .collect())
    }
}
