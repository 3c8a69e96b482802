//! Value objects for Recommendation Ordering
//!
//! Identifiers are opaque newtypes so a recommendation id can never be passed
//! where a document id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Zero-based rank of a recommendation within its document.
pub type Position = u32;

/// Identifier of an advice letter (the parent document).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DocumentId(pub u64);

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "doc-{}", self.0)
    }
}

/// Identifier of a recommendation. Immutable once created.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecommendationId(pub u64);

impl fmt::Display for RecommendationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rec-{}", self.0)
    }
}

/// A single `(id, position)` pair of an ordering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderingEntry {
    pub id: RecommendationId,
    pub position: Position,
}

impl OrderingEntry {
    pub fn new(id: RecommendationId, position: Position) -> Self {
        Self { id, position }
    }
}

/// Version stamp of a stored document ordering, used for optimistic concurrency.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OrderingVersion(pub u64);

impl OrderingVersion {
    /// Version assigned to a document that has never been written.
    pub const INITIAL: OrderingVersion = OrderingVersion(0);

    pub fn next(self) -> Self {
        OrderingVersion(self.0 + 1)
    }
}

impl fmt::Display for OrderingVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}
