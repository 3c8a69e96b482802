//! Tracing Event Publisher
//!
//! Writes committed ordering changes to the log. The notification service
//! tails these lines; nothing here renders or sends mail.

use crate::domain::entities::{OrderingChange, OrderingChanged};
use crate::domain::errors::PublishError;
use crate::ports::outbound::OrderingEventPublisher;
use al_telemetry::{log_document_event, log_recommendation_event};
use async_trait::async_trait;

const SUBSYSTEM: &str = "recommendation-ordering";

/// Publishes ordering changes as structured log events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEventPublisher;

impl TracingEventPublisher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl OrderingEventPublisher for TracingEventPublisher {
    async fn publish(&self, event: OrderingChanged) -> Result<(), PublishError> {
        match &event.change {
            OrderingChange::Inserted { id, position } => log_recommendation_event!(
                info,
                SUBSYSTEM,
                "Recommendation inserted",
                event.document_id,
                id,
                position = *position,
                version = %event.version
            ),
            OrderingChange::Deleted { id, position } => log_recommendation_event!(
                info,
                SUBSYSTEM,
                "Recommendation deleted",
                event.document_id,
                id,
                position = *position,
                version = %event.version
            ),
            OrderingChange::Reordered { moved } => log_document_event!(
                info,
                SUBSYSTEM,
                "Recommendations reordered",
                event.document_id,
                moved = moved.len(),
                version = %event.version
            ),
        }
        Ok(())
    }
}
