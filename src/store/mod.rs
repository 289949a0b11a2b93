//! Document store - typed collections of serde documents.
//!
//! Every persisted record (users, library entries, comments) implements
//! [`Document`] and lives in a named collection. Backends implement
//! [`DocumentStore`]; the crate ships [`InMemoryStore`].
//!
//! ## Example
//!
//! ```ignore
//! use bookshelf::{Document, InMemoryStore, CollectionsExt, Query};
//!
//! #[derive(Clone, Serialize, Deserialize, Document)]
//! #[document(collection = "shelves")]
//! struct Shelf {
//!     id: String,
//!     name: String,
//! }
//!
//! let store = InMemoryStore::new();
//! store.collection::<Shelf>().insert(&shelf)?;
//! let named = store.collection::<Shelf>().find(&Query::filter(|s: &Shelf| s.name == "sci-fi"))?;
//! ```

mod collection;
mod in_memory;
mod query;

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Trait for types that can be persisted in a [`DocumentStore`].
pub trait Document: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// Collection name. Maps to a table in SQL, a collection in MongoDB,
    /// a key prefix in KV stores.
    const COLLECTION: &'static str;

    /// Unique identifier within the collection.
    fn id(&self) -> &str;
}

/// Error type for document store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("document already exists: {collection}:{id}")]
    Duplicate { collection: String, id: String },

    #[error("document serialization error: {0}")]
    Serde(String),

    #[error("document storage error: {0}")]
    Storage(String),
}

/// Abstract document storage.
///
/// Scans return documents in the store's default ordering (insertion order
/// for [`InMemoryStore`]) unless the query supplies a comparator.
pub trait DocumentStore: Send + Sync {
    /// Get a document by id. Returns `None` if absent.
    fn get<D: Document>(&self, id: &str) -> Result<Option<D>, StoreError>;

    /// Insert a new document. Fails with [`StoreError::Duplicate`] if the id is taken.
    fn insert<D: Document>(&self, doc: &D) -> Result<(), StoreError>;

    /// Upsert a document. Last write wins.
    fn save<D: Document>(&self, doc: &D) -> Result<(), StoreError>;

    /// Delete a document by id. Returns true if it existed.
    fn delete<D: Document>(&self, id: &str) -> Result<bool, StoreError>;

    /// Run a query over one collection.
    fn find<D: Document>(&self, query: &Query<'_, D>) -> Result<Vec<D>, StoreError>;
}

pub use collection::{Collection, CollectionsExt};
pub use in_memory::InMemoryStore;
pub use query::Query;
