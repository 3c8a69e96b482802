//! Recommendation Ordering Service
//!
//! Main service implementing RecommendationOrderingApi.
//!
//! Mutations to one document are serialized with optimistic concurrency: the
//! ordering is read together with its version, the engine computes the next
//! ordering, and the commit only succeeds if the version has not moved. A lost
//! race is retried from a fresh read.

use crate::adapters::{InMemoryRecommendationStore, TracingEventPublisher};
use crate::application::engine::OrderingEngine;
use crate::config::OrderingConfig;
use crate::domain::entities::{
    NewRecommendation, Ordering, OrderingChange, OrderingChanged, PositionMap, Recommendation,
};
use crate::domain::errors::{OrderingError, ServiceError, StoreError};
use crate::domain::value_objects::{
    DocumentId, OrderingEntry, OrderingVersion, RecommendationId,
};
use crate::ports::inbound::{OrderingEngineApi, RecommendationOrderingApi};
use crate::ports::outbound::{OrderingEventPublisher, RecommendationStore};
use async_trait::async_trait;
use std::sync::Arc;

use tracing::{debug, info, warn};

/// Result of one committed (or skipped) mutation.
struct Applied<T> {
    previous: Ordering,
    next: Ordering,
    /// `None` when the mutation changed nothing and no write happened
    version: Option<OrderingVersion>,
    extra: T,
}

/// Recommendation Ordering Service
///
/// Orchestrates a mutation:
/// 1. Load rows and version
/// 2. Validate rows against the ordering invariants
/// 3. Apply one engine operation
/// 4. Commit with version check, retrying on conflict
/// 5. Publish the change
pub struct RecommendationOrderingService {
    config: OrderingConfig,
    engine: OrderingEngine,
    store: Arc<dyn RecommendationStore>,
    publisher: Arc<dyn OrderingEventPublisher>,
}

impl RecommendationOrderingService {
    /// Create a new service with default config
    pub fn new(
        store: Arc<dyn RecommendationStore>,
        publisher: Arc<dyn OrderingEventPublisher>,
    ) -> Self {
        Self::with_config(OrderingConfig::default(), store, publisher)
    }

    /// Create a new service with custom config
    pub fn with_config(
        config: OrderingConfig,
        store: Arc<dyn RecommendationStore>,
        publisher: Arc<dyn OrderingEventPublisher>,
    ) -> Self {
        Self {
            config,
            engine: OrderingEngine::new(),
            store,
            publisher,
        }
    }

    /// Service over a fresh in-memory store that logs its change events
    pub fn new_in_memory(config: OrderingConfig) -> Self {
        Self::with_config(
            config,
            Arc::new(InMemoryRecommendationStore::new()),
            Arc::new(TracingEventPublisher::new()),
        )
    }

    pub fn config(&self) -> &OrderingConfig {
        &self.config
    }

    /// Turn loaded rows into an ordering, refusing rows that break an invariant
    fn validate_loaded(
        &self,
        document_id: DocumentId,
        rows: Vec<Recommendation>,
    ) -> Result<Ordering, ServiceError> {
        Ordering::from_recommendations(document_id, rows).map_err(|violation| {
            warn!(
                document_id = %document_id,
                %violation,
                "Stored ordering breaks an invariant"
            );
            ServiceError::CorruptOrdering {
                document_id,
                violation,
            }
        })
    }

    /// Read-modify-write loop shared by every mutation.
    async fn apply<T, F>(&self, document_id: DocumentId, op: F) -> Result<Applied<T>, ServiceError>
    where
        T: Send,
        F: Fn(&Ordering) -> Result<(Ordering, T), ServiceError> + Send + Sync,
    {
        let mut attempt: u32 = 0;

        loop {
            let stored = self.store.load(document_id).await?;
            let previous = self.validate_loaded(document_id, stored.recommendations)?;
            let (next, extra) = op(&previous)?;

            if next == previous {
                debug!(document_id = %document_id, "Ordering unchanged, skipping commit");
                return Ok(Applied {
                    previous,
                    next,
                    version: None,
                    extra,
                });
            }

            match self.store.commit(document_id, stored.version, &next).await {
                Ok(version) => {
                    return Ok(Applied {
                        previous,
                        next,
                        version: Some(version),
                        extra,
                    })
                }
                Err(StoreError::VersionConflict { actual, .. })
                    if attempt < self.config.max_commit_retries =>
                {
                    attempt += 1;
                    warn!(
                        document_id = %document_id,
                        expected = %stored.version,
                        actual = %actual,
                        attempt,
                        "Version conflict, retrying from fresh read"
                    );
                }
                Err(StoreError::VersionConflict { .. }) => {
                    return Err(ServiceError::ConcurrentModification {
                        document_id,
                        attempts: attempt + 1,
                    });
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Forward a committed change. Failures are logged, never returned.
    async fn publish(&self, document_id: DocumentId, version: OrderingVersion, change: OrderingChange) {
        if !self.config.publish_events {
            return;
        }

        let event = OrderingChanged {
            document_id,
            version,
            change,
        };
        if let Err(e) = self.publisher.publish(event).await {
            warn!(
                document_id = %document_id,
                version = %version,
                error = %e,
                "Failed to publish ordering change"
            );
        }
    }
}

impl Default for RecommendationOrderingService {
    fn default() -> Self {
        Self::new_in_memory(OrderingConfig::default())
    }
}

#[async_trait]
impl RecommendationOrderingApi for RecommendationOrderingService {
    async fn ordering(&self, document_id: DocumentId) -> Result<Ordering, ServiceError> {
        let stored = self.store.load(document_id).await?;
        self.validate_loaded(document_id, stored.recommendations)
    }

    async fn insert(
        &self,
        document_id: DocumentId,
        recommendation: NewRecommendation,
    ) -> Result<Ordering, ServiceError> {
        let max = self.config.max_recommendations_per_document;

        let applied = self
            .apply(document_id, |current| {
                let next = self.engine.insert(document_id, current, recommendation)?;
                if next.len() > max {
                    return Err(ServiceError::DocumentFull { document_id, max });
                }
                Ok((next, ()))
            })
            .await?;

        let position = applied
            .next
            .position_of(recommendation.id)
            .ok_or(OrderingError::NotFound {
                document_id,
                id: recommendation.id,
            })?;
        info!(
            document_id = %document_id,
            recommendation_id = %recommendation.id,
            position,
            "Recommendation inserted"
        );

        if let Some(version) = applied.version {
            self.publish(
                document_id,
                version,
                OrderingChange::Inserted {
                    id: recommendation.id,
                    position,
                },
            )
            .await;
        }

        Ok(applied.next)
    }

    async fn delete(
        &self,
        document_id: DocumentId,
        id: RecommendationId,
    ) -> Result<(Ordering, OrderingEntry), ServiceError> {
        let applied = self
            .apply(document_id, |current| {
                Ok(self.engine.delete(document_id, current, id)?)
            })
            .await?;
        let removed = applied.extra;

        info!(
            document_id = %document_id,
            recommendation_id = %id,
            position = removed.position,
            shifted = applied.previous.len() - 1 - removed.position as usize,
            "Recommendation deleted"
        );

        if let Some(version) = applied.version {
            self.publish(
                document_id,
                version,
                OrderingChange::Deleted {
                    id,
                    position: removed.position,
                },
            )
            .await;
        }

        Ok((applied.next, removed))
    }

    async fn reorder(
        &self,
        document_id: DocumentId,
        mapping: PositionMap,
    ) -> Result<Ordering, ServiceError> {
        let applied = self
            .apply(document_id, |current| {
                Ok((self.engine.reorder(document_id, current, &mapping)?, ()))
            })
            .await?;

        let moved = applied.next.moved_since(&applied.previous);
        info!(
            document_id = %document_id,
            count = applied.next.len(),
            moved = moved.len(),
            "Recommendations reordered"
        );

        if let Some(version) = applied.version {
            self.publish(document_id, version, OrderingChange::Reordered { moved })
                .await;
        }

        Ok(applied.next)
    }
}
