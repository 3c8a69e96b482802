//! # Service / Shadow Parity
//!
//! The store-backed service run against the shadow model. After every step
//! the store's contents are read back and diffed against the shadow, which
//! is how divergence in a real production store would be caught.

#[cfg(test)]
mod tests {
    use super::super::harness::{
        apply_to_shadow, ops_strategy, Op, Outcome, ReorderPlan, DOC, OTHER_DOC,
    };
    use crate::shadow::ShadowModel;
    use al_01_recommendation_ordering::{
        DocumentId, InMemoryRecommendationStore, NewRecommendation, Ordering, OrderingConfig,
        OrderingVersion, RecommendationId, RecommendationOrderingApi,
        RecommendationOrderingService, RecommendationStore, ServiceError, StoreError,
        StoredOrdering, TracingEventPublisher,
    };
    use async_trait::async_trait;
    use proptest::prelude::*;
    use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};
    use std::sync::Arc;
    use tokio::sync::Barrier;

    async fn apply_to_service(
        service: &RecommendationOrderingService,
        shadow: &ShadowModel,
        op: &Op,
    ) -> Outcome {
        let result = match op {
            Op::Insert { id, foreign } => {
                let owner = if *foreign { OTHER_DOC } else { DOC };
                service
                    .insert(DOC, NewRecommendation::new(RecommendationId(*id), owner))
                    .await
                    .map(|_| ())
            }
            Op::Delete { id, wrong_document } => {
                let document_id = if *wrong_document { OTHER_DOC } else { DOC };
                service
                    .delete(document_id, RecommendationId(*id))
                    .await
                    .map(|_| ())
            }
            Op::Reorder(plan) => {
                let (document_id, mapping) = plan.resolve(&shadow.snapshot());
                service.reorder(document_id, mapping).await.map(|_| ())
            }
        };

        match result {
            Ok(()) => Ok(service
                .ordering(DOC)
                .await
                .expect("reload")
                .positions()
                .clone()),
            Err(ServiceError::Ordering(e)) => Err(e.kind()),
            Err(other) => panic!("unexpected service error: {other}"),
        }
    }

    /// The service scopes every call by the document it loads, so a request
    /// aimed at another document is a lookup in that (empty) document rather
    /// than a scope error. Those ops are left out of service parity.
    fn comparable(op: &Op) -> bool {
        !matches!(
            op,
            Op::Delete { wrong_document: true, .. }
                | Op::Reorder(ReorderPlan::WrongDocument)
        )
    }

    async fn run_stream(ops: &[Op]) {
        let service = RecommendationOrderingService::new_in_memory(OrderingConfig::default());
        let mut shadow = ShadowModel::new(DOC);

        for (step, op) in ops.iter().filter(|op| comparable(op)).enumerate() {
            let service_outcome = apply_to_service(&service, &shadow, op).await;
            let shadow_outcome = apply_to_shadow(&mut shadow, op);

            assert_eq!(
                service_outcome, shadow_outcome,
                "step {step} ({op:?}): service and shadow disagree"
            );

            let stored = service.ordering(DOC).await.expect("reload");
            let divergences = shadow.diff(&stored);
            assert!(
                divergences.is_empty(),
                "step {step} ({op:?}): store diverged: {divergences:?}"
            );
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_service_matches_shadow(ops in ops_strategy(100)) {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("runtime");
            rt.block_on(run_stream(&ops));
        }
    }

    #[tokio::test]
    async fn test_wrong_document_delete_is_not_found() {
        al_telemetry::init_test_logging();
        let service = RecommendationOrderingService::new_in_memory(OrderingConfig::default());
        service
            .insert(DOC, NewRecommendation::new(RecommendationId(1), DOC))
            .await
            .unwrap();

        let result = service.delete(OTHER_DOC, RecommendationId(1)).await;

        assert!(matches!(
            result,
            Err(ServiceError::Ordering(
                al_01_recommendation_ordering::OrderingError::NotFound { .. }
            ))
        ));
        assert_eq!(service.ordering(DOC).await.unwrap().len(), 1);
    }

    const WRITERS: usize = 16;

    /// In-memory store that holds the first `WRITERS` commits until all of
    /// them have arrived. Every writer has loaded the same version by then,
    /// so all but one of those commits conflict.
    struct InterleavingStore {
        inner: InMemoryRecommendationStore,
        gate: Barrier,
        commits: AtomicUsize,
        conflicts: AtomicUsize,
    }

    impl InterleavingStore {
        fn new() -> Self {
            Self {
                inner: InMemoryRecommendationStore::new(),
                gate: Barrier::new(WRITERS),
                commits: AtomicUsize::new(0),
                conflicts: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl RecommendationStore for InterleavingStore {
        async fn load(&self, document_id: DocumentId) -> Result<StoredOrdering, StoreError> {
            self.inner.load(document_id).await
        }

        async fn commit(
            &self,
            document_id: DocumentId,
            expected: OrderingVersion,
            ordering: &Ordering,
        ) -> Result<OrderingVersion, StoreError> {
            if self.commits.fetch_add(1, AtomicOrdering::SeqCst) < WRITERS {
                self.gate.wait().await;
            }
            tokio::task::yield_now().await;
            let result = self.inner.commit(document_id, expected, ordering).await;
            if matches!(result, Err(StoreError::VersionConflict { .. })) {
                self.conflicts.fetch_add(1, AtomicOrdering::SeqCst);
            }
            result
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_inserts_retry_and_stay_contiguous() {
        al_telemetry::init_test_logging();
        let config = OrderingConfig {
            max_commit_retries: 64,
            ..Default::default()
        };
        let store = Arc::new(InterleavingStore::new());
        let service = Arc::new(RecommendationOrderingService::with_config(
            config,
            store.clone(),
            Arc::new(TracingEventPublisher::new()),
        ));

        let handles: Vec<_> = (0..WRITERS as u64)
            .map(|id| {
                let service = service.clone();
                tokio::spawn(async move {
                    service
                        .insert(DOC, NewRecommendation::new(RecommendationId(id), DOC))
                        .await
                })
            })
            .collect();
        for handle in handles {
            handle.await.expect("join").expect("insert");
        }

        assert!(store.conflicts.load(AtomicOrdering::SeqCst) >= WRITERS - 1);
        let ordering = service.ordering(DOC).await.unwrap();
        assert_eq!(ordering.len(), WRITERS);
        let mut positions: Vec<u32> = ordering.positions().values().copied().collect();
        positions.sort_unstable();
        assert_eq!(positions, (0..16).collect::<Vec<u32>>());
    }
}
