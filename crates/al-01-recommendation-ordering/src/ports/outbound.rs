//! Outbound Ports (Driven Ports / SPI)
//!
//! These are the interfaces the host application implements.

use crate::domain::entities::{Ordering, OrderingChanged, StoredOrdering};
use crate::domain::errors::{PublishError, StoreError};
use crate::domain::value_objects::{DocumentId, OrderingVersion};
use async_trait::async_trait;

/// Persistence of recommendation rows, scoped by document.
///
/// Production: the tracker's relational store
/// Testing: `InMemoryRecommendationStore`
#[async_trait]
pub trait RecommendationStore: Send + Sync {
    /// Load every row of a document together with the version it was read at.
    ///
    /// A document that has never been written loads as empty at
    /// [`OrderingVersion::INITIAL`].
    async fn load(&self, document_id: DocumentId) -> Result<StoredOrdering, StoreError>;

    /// Replace the document's rows with `ordering`.
    ///
    /// ## Atomicity
    ///
    /// Either every row of the document is written, or none is. Fails with
    /// [`StoreError::VersionConflict`] if the stored version is no longer
    /// `expected`. Returns the new version.
    async fn commit(
        &self,
        document_id: DocumentId,
        expected: OrderingVersion,
        ordering: &Ordering,
    ) -> Result<OrderingVersion, StoreError>;
}

/// Sink for committed ordering changes.
///
/// Notification generation hangs off this port.
#[async_trait]
pub trait OrderingEventPublisher: Send + Sync {
    async fn publish(&self, event: OrderingChanged) -> Result<(), PublishError>;
}
