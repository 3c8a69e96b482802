//! Algorithms module for Recommendation Ordering
//!
//! Pure functions from one ordering to the next:
//! - Append on insert
//! - Compaction on delete
//! - Total permutation on reorder

pub mod delete;
pub mod insert;
pub mod reorder;

pub use delete::delete_recommendation;
pub use insert::insert_recommendation;
pub use reorder::reorder_recommendations;

use crate::domain::entities::Ordering;
use crate::domain::errors::OrderingError;
use crate::domain::value_objects::{DocumentId, Position};

/// Reject an ordering that was loaded for some other document.
pub(crate) fn ensure_scope(document_id: DocumentId, current: &Ordering) -> Result<(), OrderingError> {
    if current.document_id() != document_id {
        return Err(OrderingError::DocumentMismatch {
            expected: document_id,
            actual: current.document_id(),
        });
    }
    Ok(())
}

/// Position for the entry at `index`, if it fits in a [`Position`].
pub(crate) fn position_at(document_id: DocumentId, index: usize) -> Result<Position, OrderingError> {
    Position::try_from(index).map_err(|_| OrderingError::PositionsExhausted {
        document_id,
        len: index,
    })
}
