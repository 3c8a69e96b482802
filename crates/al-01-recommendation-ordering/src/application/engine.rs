//! Ordering Engine
//!
//! Stateless implementation of `OrderingEngineApi`. Safe to share across
//! threads and to call for different documents concurrently.

use crate::algorithms::{delete_recommendation, insert_recommendation, reorder_recommendations};
use crate::domain::entities::{NewRecommendation, Ordering, PositionMap};
use crate::domain::errors::OrderingError;
use crate::domain::value_objects::{DocumentId, OrderingEntry, RecommendationId};
use crate::ports::inbound::OrderingEngineApi;

/// The production ordering engine.
#[derive(Debug, Default, Clone, Copy)]
pub struct OrderingEngine;

impl OrderingEngine {
    pub fn new() -> Self {
        Self
    }
}

impl OrderingEngineApi for OrderingEngine {
    fn insert(
        &self,
        document_id: DocumentId,
        current: &Ordering,
        recommendation: NewRecommendation,
    ) -> Result<Ordering, OrderingError> {
        insert_recommendation(document_id, current, recommendation)
    }

    fn delete(
        &self,
        document_id: DocumentId,
        current: &Ordering,
        id: RecommendationId,
    ) -> Result<(Ordering, OrderingEntry), OrderingError> {
        delete_recommendation(document_id, current, id)
    }

    fn reorder(
        &self,
        document_id: DocumentId,
        current: &Ordering,
        mapping: &PositionMap,
    ) -> Result<Ordering, OrderingError> {
        reorder_recommendations(document_id, current, mapping)
    }
}
