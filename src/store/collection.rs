//! Collection - typed accessor over one document collection.

use std::marker::PhantomData;

use super::{Document, DocumentStore, Query, StoreError};
use crate::error::{Error, Result};

/// Typed accessor for documents of a single type.
pub struct Collection<'a, S, D> {
    store: &'a S,
    _marker: PhantomData<D>,
}

impl<'a, S: DocumentStore, D: Document> Collection<'a, S, D> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            _marker: PhantomData,
        }
    }

    pub fn get(&self, id: &str) -> Result<Option<D>, StoreError> {
        self.store.get(id)
    }

    /// Get a document or fail with [`Error::NotFound`].
    pub fn require(&self, id: &str) -> Result<D> {
        self.store
            .get(id)?
            .ok_or_else(|| Error::not_found::<D>(id))
    }

    pub fn insert(&self, doc: &D) -> Result<(), StoreError> {
        self.store.insert(doc)
    }

    pub fn save(&self, doc: &D) -> Result<(), StoreError> {
        self.store.save(doc)
    }

    pub fn delete(&self, id: &str) -> Result<bool, StoreError> {
        self.store.delete::<D>(id)
    }

    pub fn find(&self, query: &Query<'_, D>) -> Result<Vec<D>, StoreError> {
        self.store.find(query)
    }

    /// First document matching `predicate` in default store order.
    pub fn find_one(&self, predicate: impl Fn(&D) -> bool) -> Result<Option<D>, StoreError> {
        let query = Query::filter(predicate).limit(1);
        Ok(self.store.find(&query)?.into_iter().next())
    }
}

/// Extension trait for typed collection access on any [`DocumentStore`].
pub trait CollectionsExt: DocumentStore + Sized {
    fn collection<D: Document>(&self) -> Collection<'_, Self, D> {
        Collection::new(self)
    }
}

impl<S: DocumentStore> CollectionsExt for S {}
