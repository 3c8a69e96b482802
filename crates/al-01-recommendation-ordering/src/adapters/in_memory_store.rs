//! In-memory Recommendation Store
//!
//! Rows are keyed by `(DocumentId, RecommendationId)` so any number of
//! documents share one store. A commit replaces all rows of one document under
//! a single write lock, which gives the all-or-nothing guarantee the port
//! requires.

use crate::domain::entities::{Ordering, Recommendation, StoredOrdering};
use crate::domain::errors::StoreError;
use crate::domain::value_objects::{DocumentId, OrderingVersion, Position, RecommendationId};
use crate::ports::outbound::RecommendationStore;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

#[derive(Default)]
struct StoreState {
    rows: BTreeMap<(DocumentId, RecommendationId), Position>,
    versions: HashMap<DocumentId, OrderingVersion>,
}

impl StoreState {
    fn version_of(&self, document_id: DocumentId) -> OrderingVersion {
        self.versions
            .get(&document_id)
            .copied()
            .unwrap_or(OrderingVersion::INITIAL)
    }

    fn rows_of(&self, document_id: DocumentId) -> Vec<Recommendation> {
        let start = (document_id, RecommendationId(u64::MIN));
        let end = (document_id, RecommendationId(u64::MAX));
        self.rows
            .range(start..=end)
            .map(|((doc, id), pos)| Recommendation::new(*id, *doc, *pos))
            .collect()
    }
}

/// Store backed by a `BTreeMap`, for tests and single-process embedding.
#[derive(Default)]
pub struct InMemoryRecommendationStore {
    state: RwLock<StoreState>,
}

impl InMemoryRecommendationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write rows directly, bypassing ordering checks.
    ///
    /// Lets tests seed a store with rows that break an invariant.
    pub fn seed_rows(&self, rows: impl IntoIterator<Item = Recommendation>) {
        let mut state = self.state.write();
        for row in rows {
            state.rows.insert((row.document_id, row.id), row.position);
            let next = state.version_of(row.document_id).next();
            state.versions.insert(row.document_id, next);
        }
    }

    /// Number of documents that have been written at least once.
    pub fn document_count(&self) -> usize {
        self.state.read().versions.len()
    }
}

#[async_trait]
impl RecommendationStore for InMemoryRecommendationStore {
    async fn load(&self, document_id: DocumentId) -> Result<StoredOrdering, StoreError> {
        let state = self.state.read();
        Ok(StoredOrdering {
            version: state.version_of(document_id),
            recommendations: state.rows_of(document_id),
        })
    }

    async fn commit(
        &self,
        document_id: DocumentId,
        expected: OrderingVersion,
        ordering: &Ordering,
    ) -> Result<OrderingVersion, StoreError> {
        let mut state = self.state.write();

        let actual = state.version_of(document_id);
        if actual != expected {
            return Err(StoreError::VersionConflict {
                document_id,
                expected,
                actual,
            });
        }

        state.rows.retain(|(doc, _), _| *doc != document_id);
        for (id, pos) in ordering.positions() {
            state.rows.insert((document_id, *id), *pos);
        }

        let version = actual.next();
        state.versions.insert(document_id, version);

        debug!(
            document_id = %document_id,
            version = %version,
            count = ordering.len(),
            "[al-01] Committed ordering"
        );

        Ok(version)
    }
}
