//! InMemoryStore - insertion-ordered document store for tests and single-node runs.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use indexmap::IndexMap;

use super::{Document, DocumentStore, Query, StoreError};

/// In-memory document store backed by an `IndexMap`.
///
/// Storage key is `"collection:id"`; values are JSON bytes. Scans visit
/// documents in insertion order, and upserts keep a document's original
/// position. Clone-friendly via Arc.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    storage: Arc<RwLock<IndexMap<String, Vec<u8>>>>,
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents in a collection.
    pub fn count<D: Document>(&self) -> Result<usize, StoreError> {
        let prefix = Self::prefix(D::COLLECTION);
        Ok(self.read()?.keys().filter(|k| k.starts_with(&prefix)).count())
    }

    fn make_key(collection: &str, id: &str) -> String {
        format!("{}:{}", collection, id)
    }

    fn prefix(collection: &str) -> String {
        format!("{}:", collection)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, IndexMap<String, Vec<u8>>>, StoreError> {
        self.storage
            .read()
            .map_err(|_| StoreError::Storage("lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, IndexMap<String, Vec<u8>>>, StoreError> {
        self.storage
            .write()
            .map_err(|_| StoreError::Storage("lock poisoned".into()))
    }

    fn encode<D: Document>(doc: &D) -> Result<Vec<u8>, StoreError> {
        serde_json::to_vec(doc).map_err(|e| StoreError::Serde(e.to_string()))
    }

    fn decode<D: Document>(bytes: &[u8]) -> Result<D, StoreError> {
        serde_json::from_slice(bytes).map_err(|e| StoreError::Serde(e.to_string()))
    }
}

impl DocumentStore for InMemoryStore {
    fn get<D: Document>(&self, id: &str) -> Result<Option<D>, StoreError> {
        let key = Self::make_key(D::COLLECTION, id);
        match self.read()?.get(&key) {
            Some(bytes) => Self::decode(bytes).map(Some),
            None => Ok(None),
        }
    }

    fn insert<D: Document>(&self, doc: &D) -> Result<(), StoreError> {
        let key = Self::make_key(D::COLLECTION, doc.id());
        let bytes = Self::encode(doc)?;

        let mut storage = self.write()?;
        if storage.contains_key(&key) {
            return Err(StoreError::Duplicate {
                collection: D::COLLECTION.to_string(),
                id: doc.id().to_string(),
            });
        }
        storage.insert(key, bytes);
        Ok(())
    }

    fn save<D: Document>(&self, doc: &D) -> Result<(), StoreError> {
        let key = Self::make_key(D::COLLECTION, doc.id());
        let bytes = Self::encode(doc)?;
        self.write()?.insert(key, bytes);
        Ok(())
    }

    fn delete<D: Document>(&self, id: &str) -> Result<bool, StoreError> {
        let key = Self::make_key(D::COLLECTION, id);
        Ok(self.write()?.shift_remove(&key).is_some())
    }

    fn find<D: Document>(&self, query: &Query<'_, D>) -> Result<Vec<D>, StoreError> {
        let prefix = Self::prefix(D::COLLECTION);
        let storage = self.read()?;

        let mut results = Vec::new();
        for (key, bytes) in storage.iter() {
            if !key.starts_with(&prefix) {
                continue;
            }
            let doc: D = Self::decode(bytes)?;
            if query.matches(&doc) {
                results.push(doc);
            }
        }

        Ok(query.finish(results))
    }
}
