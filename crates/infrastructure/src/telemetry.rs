//! Telemetry and tracing setup
//!
//! Initializes the tracing subscriber used across the gateway. The filter
//! honors `RUST_LOG` when set and falls back to the configured default.

use serde::{Deserialize, Serialize};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Configuration for tracing output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Log filter applied when `RUST_LOG` is not set
    /// (e.g., "info", "framelight=debug,hyper=warn")
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Emit JSON-formatted log lines instead of the human-readable format
    #[serde(default)]
    pub json: bool,
}

fn default_log_filter() -> String {
    "framelight=info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
            json: false,
        }
    }
}

/// Initialize the global tracing subscriber
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), application::GatewayError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    let registry = tracing_subscriber::registry().with(filter);

    let result = if config.json {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    };

    result.map_err(|e| {
        application::GatewayError::Configuration(format!("Failed to init telemetry: {e}"))
    })
}
