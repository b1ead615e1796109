// Webhook delivery module
//
// Independent components (no dependency on the domain model):
//   delivery_queue, http_client, stats
//
// Integration components:
//   payload          – projects an order into the wire format
//   notifier         – reacts to order creation and enqueues deliveries
//   delivery_service – drains the queue and sends HTTP webhooks

pub mod delivery_queue;
pub mod delivery_service;
pub mod http_client;
pub mod notifier;
pub mod payload;
pub mod stats;

// Re-export commonly used types
pub use delivery_queue::{DeliveryQueue, QueueFull, QueuedDelivery};
pub use delivery_service::{DeliveryService, DeliveryServiceError};
pub use http_client::{HttpClientError, WebhookHttpClient};
pub use notifier::OrderCreatedNotifier;
pub use payload::OrderPayload;
pub use stats::{DeliveryRecord, DeliveryStats, StatsSnapshot};
