//! Keyed row collection behind the shadow model.
//!
//! Shaped like the persistence layer the production service talks to:
//! create, read, update and delete by id, plus a scan by parent document.

use al_01_recommendation_ordering::{DocumentId, Recommendation, RecommendationId};
use std::collections::HashMap;

#[derive(Debug, Default, Clone)]
pub struct ShadowStore {
    rows: HashMap<RecommendationId, Recommendation>,
}

impl ShadowStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new row. Returns false (and changes nothing) if the id exists.
    pub fn create(&mut self, row: Recommendation) -> bool {
        if self.rows.contains_key(&row.id) {
            return false;
        }
        self.rows.insert(row.id, row);
        true
    }

    pub fn read(&self, id: RecommendationId) -> Option<Recommendation> {
        self.rows.get(&id).copied()
    }

    /// Overwrite an existing row. Returns false if the id is unknown.
    pub fn update(&mut self, row: Recommendation) -> bool {
        match self.rows.get_mut(&row.id) {
            Some(existing) => {
                *existing = row;
                true
            }
            None => false,
        }
    }

    pub fn delete(&mut self, id: RecommendationId) -> Option<Recommendation> {
        self.rows.remove(&id)
    }

    /// All rows owned by `document_id`, in no particular order.
    pub fn scan_document(&self, document_id: DocumentId) -> Vec<Recommendation> {
        self.rows
            .values()
            .filter(|r| r.document_id == document_id)
            .copied()
            .collect()
    }

    /// Every row, regardless of owner.
    pub fn all_rows(&self) -> Vec<Recommendation> {
        self.rows.values().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: u64, pos: u32) -> Recommendation {
        Recommendation::new(RecommendationId(id), DocumentId(1), pos)
    }

    #[test]
    fn test_create_rejects_existing_id() {
        let mut store = ShadowStore::new();
        assert!(store.create(row(1, 0)));
        assert!(!store.create(row(1, 5)));
        assert_eq!(store.read(RecommendationId(1)), Some(row(1, 0)));
    }

    #[test]
    fn test_update_and_delete() {
        let mut store = ShadowStore::new();
        store.create(row(1, 0));

        assert!(store.update(row(1, 3)));
        assert!(!store.update(row(2, 0)));
        assert_eq!(store.delete(RecommendationId(1)), Some(row(1, 3)));
        assert!(store.is_empty());
    }

    #[test]
    fn test_scan_document_filters_owner() {
        let mut store = ShadowStore::new();
        store.create(row(1, 0));
        store.create(Recommendation::new(RecommendationId(2), DocumentId(9), 0));

        assert_eq!(store.scan_document(DocumentId(1)), vec![row(1, 0)]);
        assert_eq!(store.len(), 2);
    }
}
