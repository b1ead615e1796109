use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tokio::sync::RwLock;

/// Outcome counters for webhook deliveries.
///
/// The structured channel the host can poll instead of scraping logs: every
/// submission, delivery, failure, queue-full drop and missing-configuration
/// skip is counted, and the most recent success and failure are kept with
/// their details. Counters only ever grow; they are process-local and not
/// persisted.
#[derive(Debug, Default)]
pub struct DeliveryStats {
    submitted: AtomicU64,
    delivered: AtomicU64,
    failed: AtomicU64,
    dropped: AtomicU64,
    skipped: AtomicU64,
    last_success: RwLock<Option<DeliveryRecord>>,
    last_failure: RwLock<Option<DeliveryRecord>>,
}

/// Details of a single delivery outcome.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeliveryRecord {
    pub event_id: String,

    pub order_id: i64,

    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,

    pub status_code: Option<u16>,

    pub response_time_ms: Option<u64>,

    pub error: Option<String>,
}

impl DeliveryRecord {
    /// Record a successful delivery
    pub fn success(event_id: String, order_id: i64, status_code: u16, response_time_ms: u64) -> Self {
        Self {
            event_id,
            order_id,
            timestamp: OffsetDateTime::now_utc(),
            status_code: Some(status_code),
            response_time_ms: Some(response_time_ms),
            error: None,
        }
    }

    /// Record a failed delivery
    pub fn failure(
        event_id: String,
        order_id: i64,
        status_code: Option<u16>,
        error: String,
    ) -> Self {
        Self {
            event_id,
            order_id,
            timestamp: OffsetDateTime::now_utc(),
            status_code,
            response_time_ms: None,
            error: Some(error),
        }
    }
}

impl DeliveryStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// A delivery was accepted into the queue.
    pub fn record_submitted(&self) {
        self.submitted.fetch_add(1, Ordering::Relaxed);
    }

    /// A submission was rejected because the queue was full.
    pub fn record_dropped(&self) {
        self.dropped.fetch_add(1, Ordering::Relaxed);
    }

    /// An export was skipped because no token is configured.
    pub fn record_skipped(&self) {
        self.skipped.fetch_add(1, Ordering::Relaxed);
    }

    /// A delivery completed with a 2xx response.
    pub async fn record_delivered(&self, record: DeliveryRecord) {
        self.delivered.fetch_add(1, Ordering::Relaxed);
        *self.last_success.write().await = Some(record);
    }

    /// A delivery failed (network error, timeout or non-2xx response).
    pub async fn record_failed(&self, record: DeliveryRecord) {
        self.failed.fetch_add(1, Ordering::Relaxed);
        *self.last_failure.write().await = Some(record);
    }

    pub fn submitted(&self) -> u64 {
        self.submitted.load(Ordering::Relaxed)
    }

    pub fn delivered(&self) -> u64 {
        self.delivered.load(Ordering::Relaxed)
    }

    pub fn failed(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }

    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    pub fn skipped(&self) -> u64 {
        self.skipped.load(Ordering::Relaxed)
    }

    /// Point-in-time view of all counters and the last outcomes.
    pub async fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            submitted: self.submitted(),
            delivered: self.delivered(),
            failed: self.failed(),
            dropped: self.dropped(),
            skipped: self.skipped(),
            last_success: self.last_success.read().await.clone(),
            last_failure: self.last_failure.read().await.clone(),
        }
    }
}

/// Serializable view of [`DeliveryStats`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatsSnapshot {
    pub submitted: u64,
    pub delivered: u64,
    pub failed: u64,
    pub dropped: u64,
    pub skipped: u64,
    pub last_success: Option<DeliveryRecord>,
    pub last_failure: Option<DeliveryRecord>,
}
