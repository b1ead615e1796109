use std::collections::VecDeque;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// In-memory, capacity-bounded queue of webhook deliveries.
///
/// Submission is fail-fast: once `capacity` deliveries are pending, further
/// enqueues are rejected so the order-creation path is never blocked behind a
/// slow destination.
#[derive(Debug, Clone)]
pub struct DeliveryQueue {
    /// Pending deliveries waiting to be sent
    pending: Arc<RwLock<VecDeque<QueuedDelivery>>>,

    capacity: usize,
}

/// A queued webhook delivery.
///
/// Owns its payload and URL; both are resolved at submission time and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuedDelivery {
    pub event_id: String,

    pub order_id: i64,

    pub payload: String,

    /// Webhook URL
    pub url: String,
}

impl QueuedDelivery {
    /// Create a new queued delivery
    pub fn new(event_id: String, order_id: i64, payload: String, url: String) -> Self {
        Self {
            event_id,
            order_id,
            payload,
            url,
        }
    }
}

/// Error returned when the queue is at capacity.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Delivery queue is full (capacity {capacity})")]
pub struct QueueFull {
    pub capacity: usize,
}

impl DeliveryQueue {
    /// Create a queue holding at most `capacity` pending deliveries.
    pub fn new(capacity: usize) -> Self {
        Self {
            pending: Arc::new(RwLock::new(VecDeque::new())),
            capacity,
        }
    }

    /// Enqueue a delivery, failing fast when the queue is at capacity.
    pub async fn enqueue(&self, delivery: QueuedDelivery) -> Result<(), QueueFull> {
        let mut pending = self.pending.write().await;

        if pending.len() >= self.capacity {
            return Err(QueueFull {
                capacity: self.capacity,
            });
        }

        debug!(
            event_id = %delivery.event_id,
            order_id = delivery.order_id,
            "Enqueuing delivery"
        );
        pending.push_back(delivery);
        Ok(())
    }

    /// Dequeue the next delivery
    pub async fn dequeue(&self) -> Option<QueuedDelivery> {
        let mut pending = self.pending.write().await;
        let delivery = pending.pop_front();

        if let Some(ref d) = delivery {
            debug!(
                event_id = %d.event_id,
                order_id = d.order_id,
                "Dequeued delivery"
            );
        }

        delivery
    }

    /// Get queue size
    pub async fn size(&self) -> usize {
        let pending = self.pending.read().await;
        pending.len()
    }

    /// Check if queue is empty
    pub async fn is_empty(&self) -> bool {
        let pending = self.pending.read().await;
        pending.is_empty()
    }

    /// Clear all pending deliveries
    pub async fn clear(&self) {
        let mut pending = self.pending.write().await;
        let count = pending.len();
        pending.clear();
        info!(cleared_count = count, "Cleared delivery queue");
    }

    /// Get configured capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
