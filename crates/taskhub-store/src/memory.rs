//! In-memory document collection backed by `dashmap`.

use dashmap::DashMap;
use uuid::Uuid;

use crate::document::Document;

/// One collection of documents, keyed by id.
///
/// Reads return clones so callers never hold a lock across an await
/// point. Conflicting field updates are last-write-wins, matching the
/// consistency the backing document database offers.
#[derive(Debug)]
pub struct Collection<T> {
    items: DashMap<Uuid, T>,
}

impl<T: Document> Collection<T> {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self {
            items: DashMap::new(),
        }
    }

    /// Fetch a document by id.
    pub fn get(&self, id: Uuid) -> Option<T> {
        self.items.get(&id).map(|entry| entry.clone())
    }

    /// Check for a document's presence without cloning it.
    pub fn contains(&self, id: Uuid) -> bool {
        self.items.contains_key(&id)
    }

    /// Insert a document, returning it back.
    pub fn insert(&self, doc: T) -> T {
        self.items.insert(doc.id(), doc.clone());
        doc
    }

    /// Apply an in-place mutation to a document, returning the updated
    /// copy. `None` when the id is absent.
    pub fn update(&self, id: Uuid, mutate: impl FnOnce(&mut T)) -> Option<T> {
        let mut entry = self.items.get_mut(&id)?;
        mutate(entry.value_mut());
        entry.value_mut().touch();
        Some(entry.clone())
    }

    /// Remove a document. Returns whether anything was removed.
    pub fn remove(&self, id: Uuid) -> bool {
        self.items.remove(&id).is_some()
    }

    /// All documents matching a predicate, in unspecified order.
    pub fn filter(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        self.items
            .iter()
            .filter(|entry| predicate(entry.value()))
            .map(|entry| entry.value().clone())
            .collect()
    }

    /// Every document, in unspecified order.
    pub fn all(&self) -> Vec<T> {
        self.items.iter().map(|entry| entry.value().clone()).collect()
    }

    /// Number of stored documents.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: Document> Default for Collection<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Doc {
        id: Uuid,
        value: u32,
    }

    impl Document for Doc {
        fn id(&self) -> Uuid {
            self.id
        }
    }

    #[test]
    fn test_insert_get_remove() {
        let col = Collection::new();
        let doc = col.insert(Doc {
            id: Uuid::new_v4(),
            value: 1,
        });

        assert_eq!(col.get(doc.id), Some(doc.clone()));
        assert!(col.remove(doc.id));
        assert!(!col.remove(doc.id));
        assert_eq!(col.get(doc.id), None);
    }

    #[test]
    fn test_update_missing_is_none() {
        let col: Collection<Doc> = Collection::new();
        assert!(col.update(Uuid::new_v4(), |d| d.value = 2).is_none());
    }

    #[test]
    fn test_filter() {
        let col = Collection::new();
        for value in 0..10 {
            col.insert(Doc {
                id: Uuid::new_v4(),
                value,
            });
        }
        assert_eq!(col.filter(|d| d.value >= 5).len(), 5);
    }
}
