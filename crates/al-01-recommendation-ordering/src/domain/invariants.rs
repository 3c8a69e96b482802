//! Domain invariants for Recommendation Ordering
//!
//! | Invariant | Rule |
//! |-----------|------|
//! | Scoping | every row's document id equals the document being mutated |
//! | Unique ids | no id appears twice in a document |
//! | Unique positions | no position is held twice in a document |
//! | Contiguity | `n` rows hold exactly positions `0..n` |

use super::entities::Recommendation;
use super::errors::{InvariantViolation, PositionDefect};
use super::value_objects::{DocumentId, Position};
use std::collections::HashSet;

/// INVARIANT: Scoping
pub fn invariant_same_document(
    document_id: DocumentId,
    rows: &[Recommendation],
) -> Result<(), InvariantViolation> {
    match rows.iter().find(|r| r.document_id != document_id) {
        Some(foreign) => Err(InvariantViolation::ForeignRecommendation {
            id: foreign.id,
            expected: document_id,
            actual: foreign.document_id,
        }),
        None => Ok(()),
    }
}

/// INVARIANT: Unique ids
pub fn invariant_unique_ids(rows: &[Recommendation]) -> Result<(), InvariantViolation> {
    let mut seen = HashSet::with_capacity(rows.len());
    match rows.iter().find(|r| !seen.insert(r.id)) {
        Some(duplicate) => Err(InvariantViolation::DuplicateId(duplicate.id)),
        None => Ok(()),
    }
}

/// INVARIANT: Unique positions and zero-based contiguity
pub fn invariant_contiguous(rows: &[Recommendation]) -> Result<(), InvariantViolation> {
    check_positions(rows.iter().map(|r| r.position), rows.len()).map_err(|defect| match defect {
        PositionDefect::Duplicate(position) => InvariantViolation::DuplicatePosition(position),
        PositionDefect::OutOfRange { position, len } => {
            InvariantViolation::NotContiguous { position, len }
        }
    })
}

/// Check all four invariants, reporting the first violation found.
pub fn check_recommendations(
    document_id: DocumentId,
    rows: &[Recommendation],
) -> Result<(), InvariantViolation> {
    invariant_same_document(document_id, rows)?;
    invariant_unique_ids(rows)?;
    invariant_contiguous(rows)
}

/// Check that `positions` is exactly `{0, ..., len-1}`.
///
/// `len` unique values that are all below `len` cover the whole range, so only
/// duplicates and out-of-range values need to be looked for.
pub fn check_positions<I>(positions: I, len: usize) -> Result<(), PositionDefect>
where
    I: IntoIterator<Item = Position>,
{
    let mut seen = vec![false; len];
    for position in positions {
        let Some(slot) = seen.get_mut(position as usize) else {
            return Err(PositionDefect::OutOfRange { position, len });
        };
        if *slot {
            return Err(PositionDefect::Duplicate(position));
        }
        *slot = true;
    }

    // Fewer positions than `len` would leave a hole
    if let Some(hole) = seen.iter().position(|filled| !filled) {
        return Err(PositionDefect::OutOfRange {
            position: Position::try_from(hole).unwrap_or(Position::MAX),
            len,
        });
    }

    Ok(())
}
