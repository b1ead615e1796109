use crate::config::WebhookConfig;
use crate::outbound::webhook::delivery_queue::{DeliveryQueue, QueuedDelivery};
use crate::outbound::webhook::http_client::{HttpClientError, WebhookHttpClient};
use crate::outbound::webhook::stats::{DeliveryRecord, DeliveryStats};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Drains the delivery queue and sends webhooks.
///
/// `DeliveryService` is designed to run as a fixed pool of long-lived
/// background tasks. Call [`DeliveryService::start`] to launch the workers
/// inside `tokio::spawn`.
///
/// Responsibilities:
/// 1. Dequeue deliveries produced by the `OrderCreatedNotifier`.
/// 2. Issue a single HTTP POST with [`WebhookHttpClient`].
/// 3. Log the outcome and record it in [`DeliveryStats`].
///
/// There is deliberately no retry path: a failed attempt is terminal for
/// that delivery.
pub struct DeliveryService {
    /// Shared delivery queue – same instance the notifier writes to.
    queue: Arc<DeliveryQueue>,

    /// HTTP client reused across all requests.
    http_client: Arc<WebhookHttpClient>,

    /// Outcome counters shared with the notifier.
    stats: Arc<DeliveryStats>,

    /// Number of worker tasks to spawn.
    workers: usize,
}

impl DeliveryService {
    /// Create a `DeliveryService` for the given configuration.
    pub fn new(
        config: &WebhookConfig,
        queue: Arc<DeliveryQueue>,
        stats: Arc<DeliveryStats>,
    ) -> Result<Self, DeliveryServiceError> {
        let http_client = WebhookHttpClient::with_timeout(config.timeout())
            .map_err(|e| DeliveryServiceError::Initialisation(e.to_string()))?;

        Ok(Self {
            queue,
            http_client: Arc::new(http_client),
            stats,
            workers: config.workers,
        })
    }

    /// Override the HTTP client.
    pub fn with_http_client(mut self, http_client: WebhookHttpClient) -> Self {
        self.http_client = Arc::new(http_client);
        self
    }

    /// Start the worker pool.
    ///
    /// Returns immediately; the actual work happens inside `tokio::spawn`.
    /// The spawned workers run until the process exits.
    pub fn start(self: Arc<Self>) {
        info!(workers = self.workers, "Webhook delivery service starting");

        for worker in 0..self.workers {
            let service = self.clone();
            tokio::spawn(async move {
                service.run_loop(worker).await;
            });
        }
    }

    /// Inner processing loop – poll the queue and deliver.
    async fn run_loop(&self, worker: usize) {
        debug!(worker, "Delivery worker started");

        loop {
            match self.queue.dequeue().await {
                Some(delivery) => {
                    Self::process_delivery(delivery, self.http_client.clone(), self.stats.clone())
                        .await;
                }
                None => {
                    // Queue is empty; back off briefly before polling again.
                    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
                }
            }
        }
    }

    /// Perform the single delivery attempt for one queued webhook.
    ///
    /// Success and failure are both terminal: the outcome is logged and
    /// recorded, nothing is re-enqueued and no error escapes the worker.
    async fn process_delivery(
        delivery: QueuedDelivery,
        http_client: Arc<WebhookHttpClient>,
        stats: Arc<DeliveryStats>,
    ) {
        let QueuedDelivery {
            event_id,
            order_id,
            payload,
            url,
        } = delivery;

        debug!(event_id = %event_id, order_id, "Processing delivery");

        match http_client.post_json(&url, &payload).await {
            Ok((status_code, response_time_ms, _body)) => {
                info!(
                    event_id = %event_id,
                    order_id,
                    status_code,
                    response_time_ms,
                    "Webhook delivered successfully"
                );

                stats
                    .record_delivered(DeliveryRecord::success(
                        event_id,
                        order_id,
                        status_code,
                        response_time_ms,
                    ))
                    .await;
            }
            Err(e) => {
                error!(
                    event_id = %event_id,
                    order_id,
                    error = %e,
                    "Webhook delivery failed"
                );

                let status_code = extract_status_code(&e);
                stats
                    .record_failed(DeliveryRecord::failure(
                        event_id,
                        order_id,
                        status_code,
                        e.to_string(),
                    ))
                    .await;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Extract an HTTP status code from a `HttpClientError`, if available.
fn extract_status_code(err: &HttpClientError) -> Option<u16> {
    match err {
        HttpClientError::ResponseError { status, .. } => Some(status.as_u16()),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors that can occur during `DeliveryService` initialisation.
#[derive(Debug, thiserror::Error)]
pub enum DeliveryServiceError {
    #[error("Initialisation failed: {0}")]
    Initialisation(String),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WebhookConfig;

    fn test_config() -> WebhookConfig {
        WebhookConfig {
            token: Some("test-token".to_string()),
            endpoint_base: "https://webhook.site".to_string(),
            timeout_secs: 1,
            workers: 2,
            queue_capacity: 16,
        }
    }

    fn make_delivery(event_id: &str, url: &str) -> QueuedDelivery {
        QueuedDelivery::new(
            event_id.to_string(),
            42,
            r#"{"pos_order_id":42}"#.to_string(),
            url.to_string(),
        )
    }

    #[tokio::test]
    async fn test_service_creation() {
        let queue = Arc::new(DeliveryQueue::new(16));
        let stats = Arc::new(DeliveryStats::new());
        let service = DeliveryService::new(&test_config(), queue, stats);
        assert!(service.is_ok());
    }

    #[tokio::test]
    async fn test_failed_delivery_is_recorded_and_absorbed() {
        let stats = Arc::new(DeliveryStats::new());
        let http_client =
            Arc::new(WebhookHttpClient::with_timeout(std::time::Duration::from_secs(1)).unwrap());

        // Nothing listening here
        let delivery = make_delivery("evt-fail", "http://127.0.0.1:19998/test-token");

        DeliveryService::process_delivery(delivery, http_client, stats.clone()).await;

        assert_eq!(stats.failed(), 1);
        assert_eq!(stats.delivered(), 0);

        let snapshot = stats.snapshot().await;
        let failure = snapshot.last_failure.expect("failure recorded");
        assert_eq!(failure.event_id, "evt-fail");
        assert_eq!(failure.status_code, None);
        assert!(failure.error.is_some());
    }

    #[test]
    fn test_extract_status_code_response_error() {
        let err = HttpClientError::ResponseError {
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            body: "oops".to_string(),
        };
        assert_eq!(extract_status_code(&err), Some(500));
    }

    #[test]
    fn test_extract_status_code_network_error() {
        let err = HttpClientError::NetworkError("timeout".to_string());
        assert_eq!(extract_status_code(&err), None);
    }

    #[test]
    fn test_extract_status_code_timeout() {
        let err = HttpClientError::Timeout(std::time::Duration::from_secs(30));
        assert_eq!(extract_status_code(&err), None);
    }
}
