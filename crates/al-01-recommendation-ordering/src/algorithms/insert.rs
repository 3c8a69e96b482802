//! Append-on-insert
//!
//! A new recommendation always lands at position `n`, the current count.
//! Existing entries keep their positions.

use super::{ensure_scope, position_at};
use crate::domain::entities::{NewRecommendation, Ordering};
use crate::domain::errors::OrderingError;
use crate::domain::value_objects::DocumentId;

/// Append `recommendation` to the end of `current`.
pub fn insert_recommendation(
    document_id: DocumentId,
    current: &Ordering,
    recommendation: NewRecommendation,
) -> Result<Ordering, OrderingError> {
    ensure_scope(document_id, current)?;

    if recommendation.document_id != document_id {
        return Err(OrderingError::DocumentMismatch {
            expected: document_id,
            actual: recommendation.document_id,
        });
    }

    if current.contains(recommendation.id) {
        return Err(OrderingError::DuplicateId {
            document_id,
            id: recommendation.id,
        });
    }

    let position = position_at(document_id, current.len())?;
    let mut positions = current.positions().clone();
    positions.insert(recommendation.id, position);

    Ok(Ordering::from_validated(document_id, positions))
}
