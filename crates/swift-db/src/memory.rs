use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use arc_swap::ArcSwap;
use bson::Document;
use imbl::Vector;

use crate::collation::Collation;
use crate::error::DbError;
use crate::eval;
use crate::pipeline::{self, Stage};
use crate::store::{DocumentStore, FindQuery};

type Collection = Vector<Document>;

/// In-memory document store.
///
/// Each collection is an immutable snapshot behind an `ArcSwap`: readers load
/// the current snapshot without blocking, writers build the next snapshot
/// from a structurally shared clone and swap it in.
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Arc<ArcSwap<Collection>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
        }
    }

    pub fn create_collection(&self, name: &str) -> Result<(), DbError> {
        let mut collections = self
            .collections
            .write()
            .map_err(|e| DbError::Storage(format!("collection lock poisoned: {e}")))?;
        collections
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(ArcSwap::from_pointee(Vector::new())));
        Ok(())
    }

    /// Append documents to a collection, creating it if needed. Returns the
    /// number of documents inserted.
    pub fn insert_many(&self, name: &str, docs: Vec<Document>) -> Result<usize, DbError> {
        // Holding the write lock serializes writers; readers keep loading
        // the previous snapshot until the swap.
        let mut collections = self
            .collections
            .write()
            .map_err(|e| DbError::Storage(format!("collection lock poisoned: {e}")))?;
        let slot = collections
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(ArcSwap::from_pointee(Vector::new())));

        let inserted = docs.len();
        let mut next = (**slot.load()).clone();
        next.extend(docs);
        slot.store(Arc::new(next));
        Ok(inserted)
    }

    pub fn count(&self, name: &str) -> Result<u64, DbError> {
        Ok(self.snapshot(name)?.len() as u64)
    }

    fn snapshot(&self, name: &str) -> Result<Arc<Collection>, DbError> {
        let collections = self
            .collections
            .read()
            .map_err(|e| DbError::Storage(format!("collection lock poisoned: {e}")))?;
        collections
            .get(name)
            .map(|slot| slot.load_full())
            .ok_or_else(|| DbError::CollectionNotFound(name.to_string()))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentStore for MemoryStore {
    fn find(
        &self,
        collection: &str,
        query: &FindQuery,
        collation: Collation,
    ) -> Result<Vec<Document>, DbError> {
        let snapshot = self.snapshot(collection)?;
        let mut docs: Vec<Document> = snapshot
            .iter()
            .filter(|doc| {
                query
                    .filter
                    .as_ref()
                    .is_none_or(|expr| eval::matches(doc, expr, collation))
            })
            .cloned()
            .collect();
        pipeline::sort_documents(&mut docs, &query.sort, collation);
        Ok(pipeline::paginate(docs, query.skip, query.limit))
    }

    fn aggregate(
        &self,
        collection: &str,
        stages: &[Stage],
        collation: Collation,
    ) -> Result<Vec<Document>, DbError> {
        let snapshot = self.snapshot(collection)?;
        pipeline::run(snapshot.iter().cloned().collect(), stages, collation)
    }
}
