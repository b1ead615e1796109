use crate::config::WebhookConfig;
use crate::domain::events::OrderCreated;
use crate::domain::ports::{HookError, OrderCreatedHook};
use crate::outbound::webhook::delivery_queue::{DeliveryQueue, QueuedDelivery};
use crate::outbound::webhook::payload::OrderPayload;
use crate::outbound::webhook::stats::DeliveryStats;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, error};

/// Reacts to order creation by queueing a webhook delivery.
///
/// This is the glue between the host's record-creation hook and the delivery
/// pipeline: resolve the destination from configuration, project the order
/// into the wire payload and submit it to the queue. Every failure mode
/// (missing token, serialization failure, full queue) is logged and absorbed
/// here; the creation path never sees it.
pub struct OrderCreatedNotifier {
    config: WebhookConfig,
    queue: Arc<DeliveryQueue>,
    stats: Arc<DeliveryStats>,
}

impl OrderCreatedNotifier {
    pub fn new(config: WebhookConfig, queue: Arc<DeliveryQueue>, stats: Arc<DeliveryStats>) -> Self {
        Self {
            config,
            queue,
            stats,
        }
    }

    /// Build the payload for `event` and submit it to the delivery queue.
    ///
    /// Returns once the delivery is queued (or rejected); it never waits on
    /// the network.
    pub async fn submit(&self, event: &OrderCreated) {
        let Some(url) = self.config.destination_url() else {
            error!(
                order_id = event.order.id,
                "Webhook token is not configured – skipping export"
            );
            self.stats.record_skipped();
            return;
        };

        let payload = OrderPayload::from(&event.order);
        let json = match payload.to_json() {
            Ok(json) => json,
            Err(e) => {
                error!(
                    order_id = event.order.id,
                    error = %e,
                    "Failed to serialise order into webhook payload – skipping export"
                );
                return;
            }
        };

        let delivery = QueuedDelivery::new(
            event.metadata.event_id.to_string(),
            event.order.id,
            json,
            url,
        );

        match self.queue.enqueue(delivery).await {
            Ok(()) => {
                self.stats.record_submitted();
                debug!(
                    event_id = %event.metadata.event_id,
                    order_id = event.order.id,
                    "Delivery enqueued"
                );
            }
            Err(e) => {
                error!(
                    event_id = %event.metadata.event_id,
                    order_id = event.order.id,
                    error = %e,
                    "Delivery queue is full – dropping export"
                );
                self.stats.record_dropped();
            }
        }
    }
}

#[async_trait]
impl OrderCreatedHook for OrderCreatedNotifier {
    async fn on_order_created(&self, event: &OrderCreated) -> Result<(), HookError> {
        self.submit(event).await;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "OrderCreatedNotifier"
    }
}
