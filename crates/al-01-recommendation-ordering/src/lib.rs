//! # AL-01: Recommendation Ordering Subsystem
//!
//! Maintains the contiguous, zero-based position sequence of the
//! recommendations attached to an advice letter.
//!
//! ## Architecture
//!
//! - **Domain**: Entities (Recommendation, Ordering), errors, invariants
//! - **Algorithms**: Append on insert, compaction on delete, total reorder
//! - **Ports**: Inbound (OrderingEngineApi, RecommendationOrderingApi) and
//!   Outbound (RecommendationStore, OrderingEventPublisher)
//! - **Application**: Pure engine and store-backed service
//! - **Adapters**: In-memory store, tracing event publisher
//!
//! ## Domain Invariants
//!
//! | Invariant | Description |
//! |-----------|-------------|
//! | Unique ids | No id appears twice in a document |
//! | Unique positions | No position is held twice in a document |
//! | Contiguity | `n` recommendations hold exactly positions `0..n` |
//! | Scoping | Every recommendation belongs to the document being mutated |
//!
//! ## Usage
//!
//! ```ignore
//! use al_01_recommendation_ordering::{
//!     DocumentId, NewRecommendation, OrderingEngine, OrderingEngineApi, Ordering, RecommendationId,
//! };
//!
//! let doc = DocumentId(1);
//! let engine = OrderingEngine::new();
//! let ordering = engine.insert(doc, &Ordering::empty(doc), NewRecommendation::new(RecommendationId(7), doc))?;
//! assert_eq!(ordering.position_of(RecommendationId(7)), Some(0));
//! ```

pub mod adapters;
pub mod algorithms;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

pub use adapters::{InMemoryRecommendationStore, TracingEventPublisher};
pub use application::engine::OrderingEngine;
pub use application::service::RecommendationOrderingService;
pub use config::OrderingConfig;
pub use domain::entities::*;
pub use domain::errors::{
    ErrorKind, InvariantViolation, OrderingError, PositionDefect, PublishError, ServiceError,
    StoreError,
};
pub use domain::value_objects::*;
pub use ports::inbound::{OrderingEngineApi, RecommendationOrderingApi};
pub use ports::outbound::{OrderingEventPublisher, RecommendationStore};
