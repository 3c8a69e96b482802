//! Compaction-on-delete
//!
//! Removing the entry at position `p` moves every entry above `p` down by one
//! and leaves every entry below `p` alone. This is the only operation that
//! renumbers entries it was not asked about.

use super::ensure_scope;
use crate::domain::entities::Ordering;
use crate::domain::errors::OrderingError;
use crate::domain::value_objects::{DocumentId, OrderingEntry, RecommendationId};

/// Remove `id` from `current` and close the gap it leaves.
///
/// Returns the new ordering together with the removed entry.
pub fn delete_recommendation(
    document_id: DocumentId,
    current: &Ordering,
    id: RecommendationId,
) -> Result<(Ordering, OrderingEntry), OrderingError> {
    ensure_scope(document_id, current)?;

    let Some(removed_position) = current.position_of(id) else {
        return Err(OrderingError::NotFound { document_id, id });
    };

    let positions = current
        .positions()
        .iter()
        .filter(|(other, _)| **other != id)
        .map(|(other, pos)| {
            if *pos > removed_position {
                (*other, pos - 1)
            } else {
                (*other, *pos)
            }
        })
        .collect();

    Ok((
        Ordering::from_validated(document_id, positions),
        OrderingEntry::new(id, removed_position),
    ))
}
