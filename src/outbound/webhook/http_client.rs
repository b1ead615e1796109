use reqwest::{Client, Response, StatusCode};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, warn};

/// Error type for HTTP client operations
#[derive(Debug, Error)]
pub enum HttpClientError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(String),

    #[error("Request timeout after {0:?}")]
    Timeout(Duration),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Response error: status={status}, body={body}")]
    ResponseError { status: StatusCode, body: String },
}

/// HTTP client wrapper for webhook delivery
pub struct WebhookHttpClient {
    client: Client,
    timeout: Duration,
}

impl WebhookHttpClient {
    /// Create a new HTTP client with default timeout (30 seconds)
    pub fn new() -> Result<Self, HttpClientError> {
        Self::with_timeout(Duration::from_secs(30))
    }

    /// Create a new HTTP client with custom timeout
    pub fn with_timeout(timeout: Duration) -> Result<Self, HttpClientError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(format!("PosWebhookExporter/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| HttpClientError::RequestFailed(e.to_string()))?;

        Ok(Self { client, timeout })
    }

    /// Send a webhook POST request with a JSON body
    pub async fn post_json(
        &self,
        url: &str,
        payload: &str,
    ) -> Result<(u16, u64, String), HttpClientError> {
        debug!(url = %url, "Sending webhook");

        let start = Instant::now();

        let response = self
            .client
            .post(url)
            .header("Content-Type", "application/json")
            .body(payload.to_string())
            .send()
            .await
            .map_err(|e| {
                warn!(url = %url, error = %e, "Webhook request failed");
                self.classify(e)
            })?;

        let elapsed = start.elapsed();
        let response_time_ms = elapsed.as_millis() as u64;
        let status = response.status();
        let status_code = status.as_u16();

        debug!(
            url = %url,
            status = %status_code,
            response_time_ms = %response_time_ms,
            "Webhook response received"
        );

        // Read response body
        let body = self.read_response_body(response).await?;

        // Check if request was successful
        if !status.is_success() {
            return Err(HttpClientError::ResponseError { status, body });
        }

        Ok((status_code, response_time_ms, body))
    }

    /// Map a transport error onto the client error taxonomy
    fn classify(&self, err: reqwest::Error) -> HttpClientError {
        if err.is_timeout() {
            HttpClientError::Timeout(self.timeout)
        } else if err.is_connect() {
            HttpClientError::NetworkError(err.to_string())
        } else {
            HttpClientError::RequestFailed(err.to_string())
        }
    }

    /// Read response body with size limit
    async fn read_response_body(&self, response: Response) -> Result<String, HttpClientError> {
        // Limit response body size to 1MB
        const MAX_BODY_SIZE: usize = 1024 * 1024;

        let bytes = response.bytes().await.map_err(|e| {
            HttpClientError::RequestFailed(format!("Failed to read response body: {e}"))
        })?;

        if bytes.len() > MAX_BODY_SIZE {
            warn!(
                size = bytes.len(),
                max_size = MAX_BODY_SIZE,
                "Response body too large, truncating"
            );
        }

        let body = String::from_utf8_lossy(&bytes[..bytes.len().min(MAX_BODY_SIZE)]).to_string();
        Ok(body)
    }

    /// Get configured timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}
