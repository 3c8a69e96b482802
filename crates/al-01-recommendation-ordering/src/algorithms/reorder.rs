//! Total-permutation reorder
//!
//! The caller supplies a position for every recommendation in the document.
//! Partial mappings are rejected rather than completed, since there is no
//! unambiguous place for the ids they leave out.

use super::ensure_scope;
use crate::domain::entities::{Ordering, PositionMap};
use crate::domain::errors::OrderingError;
use crate::domain::invariants::check_positions;
use crate::domain::value_objects::{DocumentId, RecommendationId};

/// Replace `current` with `mapping`, or change nothing.
pub fn reorder_recommendations(
    document_id: DocumentId,
    current: &Ordering,
    mapping: &PositionMap,
) -> Result<Ordering, OrderingError> {
    ensure_scope(document_id, current)?;

    let missing: Vec<RecommendationId> = current
        .positions()
        .keys()
        .filter(|id| !mapping.contains_key(id))
        .copied()
        .collect();
    let unexpected: Vec<RecommendationId> = mapping
        .keys()
        .filter(|id| !current.contains(**id))
        .copied()
        .collect();

    if !missing.is_empty() || !unexpected.is_empty() {
        return Err(OrderingError::IncompleteMapping {
            document_id,
            missing,
            unexpected,
        });
    }

    check_positions(mapping.values().copied(), mapping.len())
        .map_err(|defect| OrderingError::InvalidPositions {
            document_id,
            defect,
        })?;

    Ok(Ordering::from_validated(document_id, mapping.clone()))
}
