use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::order::PosOrder;

/// Common metadata for record-creation events
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventMetadata {
    /// Unique identifier for this event
    pub event_id: Uuid,
    /// Timestamp when the event occurred
    pub timestamp: DateTime<Utc>,
}

impl EventMetadata {
    pub fn new() -> Self {
        Self {
            event_id: Uuid::new_v4(),
            timestamp: Utc::now(),
        }
    }
}

impl Default for EventMetadata {
    fn default() -> Self {
        Self::new()
    }
}

/// Emitted by the host platform once an order record has been durably
/// created. Carries a snapshot of the order as it was persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderCreated {
    pub metadata: EventMetadata,
    pub order: PosOrder,
}

impl OrderCreated {
    pub fn new(order: PosOrder) -> Self {
        Self {
            metadata: EventMetadata::new(),
            order,
        }
    }

    pub fn order_id(&self) -> i64 {
        self.order.id
    }
}
