//! Ports module for Recommendation Ordering
//!
//! Defines inbound (API) and outbound (SPI) port traits.

pub mod inbound;
pub mod outbound;

pub use inbound::{OrderingEngineApi, RecommendationOrderingApi};
pub use outbound::{OrderingEventPublisher, RecommendationStore};
