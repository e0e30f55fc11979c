use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::error::{StorageError, StorageResult};
use crate::ports::ObjectStore;

/// Object store backed by an ordered map
///
/// ```ignore
/// use std::sync::Arc;
/// use skillstudio_storage::memory::InMemoryObjectStore;
///
/// let objects = Arc::new(InMemoryObjectStore::new());
/// ```
#[derive(Debug, Default)]
pub struct InMemoryObjectStore {
    objects: RwLock<BTreeMap<String, Vec<u8>>>,
    operations: AtomicUsize,
}

impl InMemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of port calls served so far
    pub fn operation_count(&self) -> usize {
        self.operations.load(Ordering::SeqCst)
    }

    /// All stored keys (for testing)
    pub fn keys(&self) -> Vec<String> {
        self.objects.read().keys().cloned().collect()
    }

    /// Number of stored objects (for testing)
    pub fn len(&self) -> usize {
        self.objects.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.read().is_empty()
    }

    /// Insert an object without counting it as an operation (for fixtures)
    pub fn seed(&self, key: impl Into<String>, body: impl Into<Vec<u8>>) {
        self.objects.write().insert(key.into(), body.into());
    }

    fn record(&self) {
        self.operations.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn put(&self, key: &str, body: Vec<u8>) -> StorageResult<()> {
        self.record();
        self.objects.write().insert(key.to_string(), body);
        Ok(())
    }

    async fn get(&self, key: &str) -> StorageResult<Vec<u8>> {
        self.record();
        self.objects
            .read()
            .get(key)
            .cloned()
            .ok_or_else(|| StorageError::NotFound {
                entity: "Object",
                id: key.to_string(),
            })
    }

    async fn list_keys(&self, prefix: &str) -> StorageResult<Vec<String>> {
        self.record();
        let objects = self.objects.read();
        Ok(objects
            .range(prefix.to_string()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(key, _)| key.clone())
            .collect())
    }

    async fn delete_many(&self, keys: &[String]) -> StorageResult<()> {
        self.record();
        let mut objects = self.objects.write();
        for key in keys {
            objects.remove(key);
        }
        Ok(())
    }
}
