//! Core entities for Recommendation Ordering

use super::errors::InvariantViolation;
use super::invariants::check_recommendations;
use super::value_objects::{DocumentId, OrderingEntry, OrderingVersion, Position, RecommendationId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Full id -> position mapping, as supplied to a reorder.
pub type PositionMap = BTreeMap<RecommendationId, Position>;

/// A recommendation row as held by the persistence layer.
///
/// Content fields live elsewhere; ordering only needs identity, owner and rank.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: RecommendationId,
    pub document_id: DocumentId,
    pub position: Position,
}

impl Recommendation {
    pub fn new(id: RecommendationId, document_id: DocumentId, position: Position) -> Self {
        Self {
            id,
            document_id,
            position,
        }
    }
}

/// A recommendation that has not been placed yet. Insert assigns its position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NewRecommendation {
    pub id: RecommendationId,
    pub document_id: DocumentId,
}

impl NewRecommendation {
    pub fn new(id: RecommendationId, document_id: DocumentId) -> Self {
        Self { id, document_id }
    }
}

/// The id -> position mapping of one document.
///
/// Fields are private: every value of this type satisfies id uniqueness,
/// position uniqueness and zero-based contiguity. Deserialization goes
/// through the same validation as [`Ordering::from_recommendations`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawOrdering")]
pub struct Ordering {
    document_id: DocumentId,
    positions: PositionMap,
}

/// Wire shape of [`Ordering`] before validation.
#[derive(Deserialize)]
struct RawOrdering {
    document_id: DocumentId,
    positions: PositionMap,
}

impl TryFrom<RawOrdering> for Ordering {
    type Error = InvariantViolation;

    fn try_from(raw: RawOrdering) -> Result<Self, Self::Error> {
        let document_id = raw.document_id;
        Ordering::from_recommendations(
            document_id,
            raw.positions
                .into_iter()
                .map(|(id, pos)| Recommendation::new(id, document_id, pos)),
        )
    }
}

impl Ordering {
    /// Ordering of a document with no recommendations.
    pub fn empty(document_id: DocumentId) -> Self {
        Self {
            document_id,
            positions: BTreeMap::new(),
        }
    }

    /// Build an ordering from stored rows, rejecting rows that break an invariant.
    pub fn from_recommendations<I>(
        document_id: DocumentId,
        recommendations: I,
    ) -> Result<Self, InvariantViolation>
    where
        I: IntoIterator<Item = Recommendation>,
    {
        let rows: Vec<Recommendation> = recommendations.into_iter().collect();
        check_recommendations(document_id, &rows)?;

        let positions = rows.iter().map(|r| (r.id, r.position)).collect();
        Ok(Self {
            document_id,
            positions,
        })
    }

    /// Build an ordering where `ids[i]` sits at position `i`.
    pub fn from_ids(
        document_id: DocumentId,
        ids: &[RecommendationId],
    ) -> Result<Self, InvariantViolation> {
        let rows = ids
            .iter()
            .enumerate()
            .map(|(pos, id)| {
                Position::try_from(pos)
                    .map(|pos| Recommendation::new(*id, document_id, pos))
                    .map_err(|_| InvariantViolation::NotContiguous {
                        position: Position::MAX,
                        len: ids.len(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_recommendations(document_id, rows)
    }

    /// Wrap a mapping the caller has already proven valid.
    pub(crate) fn from_validated(document_id: DocumentId, positions: PositionMap) -> Self {
        debug_assert!(
            check_recommendations(
                document_id,
                &positions
                    .iter()
                    .map(|(id, pos)| Recommendation::new(*id, document_id, *pos))
                    .collect::<Vec<_>>()
            )
            .is_ok(),
            "engine produced an ordering that breaks an invariant"
        );
        Self {
            document_id,
            positions,
        }
    }

    pub fn document_id(&self) -> DocumentId {
        self.document_id
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn contains(&self, id: RecommendationId) -> bool {
        self.positions.contains_key(&id)
    }

    pub fn position_of(&self, id: RecommendationId) -> Option<Position> {
        self.positions.get(&id).copied()
    }

    /// The raw id -> position mapping.
    pub fn positions(&self) -> &PositionMap {
        &self.positions
    }

    /// Entries sorted by position.
    pub fn entries(&self) -> Vec<OrderingEntry> {
        let mut entries: Vec<OrderingEntry> = self
            .positions
            .iter()
            .map(|(id, pos)| OrderingEntry::new(*id, *pos))
            .collect();
        entries.sort_by_key(|e| e.position);
        entries
    }

    /// Ids sorted by position.
    pub fn ids_in_order(&self) -> Vec<RecommendationId> {
        self.entries().into_iter().map(|e| e.id).collect()
    }

    /// Rows to persist for this ordering.
    pub fn into_recommendations(self) -> Vec<Recommendation> {
        let document_id = self.document_id;
        self.positions
            .into_iter()
            .map(|(id, pos)| Recommendation::new(id, document_id, pos))
            .collect()
    }

    /// Entries whose position differs from `previous`.
    pub fn moved_since(&self, previous: &Ordering) -> Vec<OrderingEntry> {
        let mut moved: Vec<OrderingEntry> = self
            .positions
            .iter()
            .filter(|(id, pos)| previous.position_of(**id) != Some(**pos))
            .map(|(id, pos)| OrderingEntry::new(*id, *pos))
            .collect();
        moved.sort_by_key(|e| e.position);
        moved
    }
}

/// What a committed operation did to a document's ordering.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderingChange {
    /// A recommendation was appended
    Inserted {
        id: RecommendationId,
        position: Position,
    },
    /// A recommendation was removed from `position`; later ones moved up
    Deleted {
        id: RecommendationId,
        position: Position,
    },
    /// Entries that ended up at a new position
    Reordered { moved: Vec<OrderingEntry> },
}

/// Event emitted after a change has been committed.
///
/// Notification generation subscribes to these.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderingChanged {
    pub document_id: DocumentId,
    pub version: OrderingVersion,
    pub change: OrderingChange,
}

/// A document's rows as loaded from the store, with the version they were read at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredOrdering {
    pub version: OrderingVersion,
    pub recommendations: Vec<Recommendation>,
}
