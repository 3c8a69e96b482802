//! Error types for Recommendation Ordering
//!
//! Every engine error is a caller precondition violation. None of them are
//! transient and none of them leave a partially-applied ordering behind.

use super::value_objects::{DocumentId, OrderingVersion, Position, RecommendationId};
use thiserror::Error;

/// Errors returned by the ordering engine operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderingError {
    /// Insert with an id that already exists in the document
    #[error("Duplicate recommendation {id} in {document_id}")]
    DuplicateId {
        document_id: DocumentId,
        id: RecommendationId,
    },

    /// Entity or ordering belongs to another document
    #[error("Document mismatch: expected {expected}, got {actual}")]
    DocumentMismatch {
        expected: DocumentId,
        actual: DocumentId,
    },

    /// Delete of an id that is not part of the ordering
    #[error("Recommendation {id} not found in {document_id}")]
    NotFound {
        document_id: DocumentId,
        id: RecommendationId,
    },

    /// Reorder mapping does not cover exactly the current id set
    #[error(
        "Incomplete reorder mapping for {document_id}: {} missing, {} unexpected",
        .missing.len(),
        .unexpected.len()
    )]
    IncompleteMapping {
        document_id: DocumentId,
        missing: Vec<RecommendationId>,
        unexpected: Vec<RecommendationId>,
    },

    /// Reorder positions are not a zero-based contiguous sequence
    #[error("Invalid positions for {document_id}: {defect}")]
    InvalidPositions {
        document_id: DocumentId,
        defect: PositionDefect,
    },

    /// Insert would need a position beyond `Position::MAX`
    #[error("No position left in {document_id}: already holds {len} recommendations")]
    PositionsExhausted { document_id: DocumentId, len: usize },
}

/// Why a supplied set of positions is not `{0, ..., n-1}`.
///
/// With unique values all below `n` the set is necessarily contiguous, so
/// these two cases are exhaustive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PositionDefect {
    #[error("position {0} assigned more than once")]
    Duplicate(Position),

    #[error("position {position} out of range for {len} recommendations")]
    OutOfRange { position: Position, len: usize },
}

/// Payload-free discriminant of [`OrderingError`].
///
/// Parity harnesses compare kinds, not payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    DuplicateId,
    DocumentMismatch,
    NotFound,
    IncompleteMapping,
    InvalidPositions,
    PositionsExhausted,
}

impl OrderingError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            OrderingError::DuplicateId { .. } => ErrorKind::DuplicateId,
            OrderingError::DocumentMismatch { .. } => ErrorKind::DocumentMismatch,
            OrderingError::NotFound { .. } => ErrorKind::NotFound,
            OrderingError::IncompleteMapping { .. } => ErrorKind::IncompleteMapping,
            OrderingError::InvalidPositions { .. } => ErrorKind::InvalidPositions,
            OrderingError::PositionsExhausted { .. } => ErrorKind::PositionsExhausted,
        }
    }
}

/// A set of recommendation rows that breaks one of the ordering invariants.
///
/// Raised when rows are turned into an [`Ordering`](super::entities::Ordering),
/// e.g. after loading them from a store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("{id} belongs to {actual}, not {expected}")]
    ForeignRecommendation {
        id: RecommendationId,
        expected: DocumentId,
        actual: DocumentId,
    },

    #[error("{0} appears more than once")]
    DuplicateId(RecommendationId),

    #[error("position {0} is held by more than one recommendation")]
    DuplicatePosition(Position),

    #[error("position {position} breaks contiguity for {len} recommendations")]
    NotContiguous { position: Position, len: usize },
}

/// Persistence port errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Someone else committed to the document since it was loaded
    #[error("Version conflict on {document_id}: expected {expected}, found {actual}")]
    VersionConflict {
        document_id: DocumentId,
        expected: OrderingVersion,
        actual: OrderingVersion,
    },

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Change-event port errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PublishError {
    #[error("Event sink unavailable: {0}")]
    Unavailable(String),
}

/// Errors surfaced by the application service.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Ordering(#[from] OrderingError),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// Stored rows for the document break an ordering invariant
    #[error("Stored ordering for {document_id} is corrupt: {violation}")]
    CorruptOrdering {
        document_id: DocumentId,
        #[source]
        violation: InvariantViolation,
    },

    /// Optimistic commit kept losing the race
    #[error("Concurrent modification of {document_id}: gave up after {attempts} attempts")]
    ConcurrentModification {
        document_id: DocumentId,
        attempts: u32,
    },

    #[error("Document {document_id} is full: {max} recommendations")]
    DocumentFull { document_id: DocumentId, max: usize },
}
