use std::collections::HashMap;
use std::time::Duration;

use config::{Config as ConfigLib, ConfigBuilder, ConfigError, Environment, builder::DefaultState};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub webhook: WebhookConfig,
}

/// Webhook destination and delivery tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookConfig {
    /// Destination token appended to `endpoint_base`. Absence is a valid
    /// state and disables exporting entirely.
    #[serde(default)]
    pub token: Option<String>,

    pub endpoint_base: String,

    /// HTTP client timeout, in seconds.
    pub timeout_secs: u64,

    /// Number of delivery worker tasks.
    pub workers: usize,

    /// Maximum number of pending deliveries before submissions are rejected.
    pub queue_capacity: usize,
}

impl WebhookConfig {
    /// Full destination URL, or `None` when no token is configured.
    pub fn destination_url(&self) -> Option<String> {
        self.token
            .as_ref()
            .map(|token| format!("{}/{}", self.endpoint_base.trim_end_matches('/'), token))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with_sources(None)
    }

    fn load_with_sources(env_vars: Option<HashMap<String, String>>) -> Result<Self, ConfigError> {
        let mut builder = Self::set_defaults()?;
        // If env_vars is provided, we use it instead of system environment
        // This is to avoid systems variables pollution across tests
        if let Some(vars) = env_vars {
            for (key, value) in vars {
                builder = builder.set_override(&key, value)?;
            }
        } else {
            // Use system environment variables
            // Should be in the format APP_WEBHOOK__TOKEN or APP_WEBHOOK__WORKERS
            builder = builder.add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            );
        }

        builder.build()?.try_deserialize()
    }

    /// Set default values for the configuration.
    /// This is used when no environment variables or config file are provided
    fn set_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        ConfigLib::builder()
            .set_default("webhook.endpoint_base", "https://webhook.site")?
            .set_default("webhook.timeout_secs", 30)?
            .set_default("webhook.workers", 4)?
            .set_default("webhook.queue_capacity", 1024)
    }
}
