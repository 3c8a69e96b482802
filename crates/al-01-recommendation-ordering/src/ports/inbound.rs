//! Inbound Ports (Driving Ports / API)

use crate::domain::entities::{NewRecommendation, Ordering, PositionMap};
use crate::domain::errors::{OrderingError, ServiceError};
use crate::domain::value_objects::{DocumentId, OrderingEntry, RecommendationId};
use async_trait::async_trait;

/// Pure ordering operations over a caller-owned ordering.
///
/// Implementations hold no state between calls. Every method either returns a
/// complete new ordering or an error and leaves `current` untouched.
pub trait OrderingEngineApi: Send + Sync {
    /// Append a recommendation at position `current.len()`.
    fn insert(
        &self,
        document_id: DocumentId,
        current: &Ordering,
        recommendation: NewRecommendation,
    ) -> Result<Ordering, OrderingError>;

    /// Remove a recommendation and shift every later one down by one.
    fn delete(
        &self,
        document_id: DocumentId,
        current: &Ordering,
        id: RecommendationId,
    ) -> Result<(Ordering, OrderingEntry), OrderingError>;

    /// Replace the ordering with a complete id -> position mapping.
    fn reorder(
        &self,
        document_id: DocumentId,
        current: &Ordering,
        mapping: &PositionMap,
    ) -> Result<Ordering, OrderingError>;
}

/// Store-backed ordering API used by the request layer.
///
/// Each mutating call loads the document, applies one engine operation and
/// commits the result atomically.
#[async_trait]
pub trait RecommendationOrderingApi: Send + Sync {
    /// Current ordering of a document.
    async fn ordering(&self, document_id: DocumentId) -> Result<Ordering, ServiceError>;

    async fn insert(
        &self,
        document_id: DocumentId,
        recommendation: NewRecommendation,
    ) -> Result<Ordering, ServiceError>;

    async fn delete(
        &self,
        document_id: DocumentId,
        id: RecommendationId,
    ) -> Result<(Ordering, OrderingEntry), ServiceError>;

    async fn reorder(
        &self,
        document_id: DocumentId,
        mapping: PositionMap,
    ) -> Result<Ordering, ServiceError>;
}
