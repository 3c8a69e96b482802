//! # Adapters Layer (Hexagonal Architecture)
//!
//! Implements outbound port traits for embedding and tests.

mod in_memory_store;
mod tracing_publisher;

pub use in_memory_store::InMemoryRecommendationStore;
pub use tracing_publisher::TracingEventPublisher;
