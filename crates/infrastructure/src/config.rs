//! Application configuration
//!
//! Loaded from an optional `config` file plus `FRAMELIGHT_*` environment
//! variables. Secrets stay wrapped in `SecretString` so they never appear in
//! debug output.

use std::path::PathBuf;
use std::time::Duration;

use application::retry::RetryConfig;
use domain::UnitSystem;
use integration_photos::PhotosConfig;
use integration_weather::WeatherConfig;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::telemetry::TelemetryConfig;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Photo-library provider configuration
    pub photos: PhotoLibraryAppConfig,

    /// Weather provider configuration
    pub weather: WeatherAppConfig,

    /// Response cache configuration
    #[serde(default)]
    pub cache: CacheAppConfig,

    /// Retry policy applied to outbound provider calls
    #[serde(default)]
    pub retry: RetryAppConfig,

    /// Tracing configuration
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from environment and optional file
    ///
    /// # Errors
    ///
    /// Returns an error when required fields (provider credentials) are
    /// missing from every source or a value fails to parse.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            // Load from file if exists
            .add_source(config::File::with_name("config").required(false))
            // Override with environment variables (e.g., FRAMELIGHT_WEATHER_API_KEY)
            .add_source(
                config::Environment::with_prefix("FRAMELIGHT")
                    .separator("_")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }
}

/// Photo-library provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PhotoLibraryAppConfig {
    /// OAuth2 client identifier
    pub client_id: String,

    /// OAuth2 client secret
    pub client_secret: SecretString,

    /// REST API base URL
    #[serde(default = "default_photos_api_base_url")]
    pub api_base_url: String,

    /// OAuth2 token endpoint
    #[serde(default = "default_photos_token_url")]
    pub token_url: String,

    /// Where the refreshable credential set is persisted
    #[serde(default = "default_credentials_path")]
    pub credentials_path: PathBuf,

    /// Connection timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Media-item page size
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_photos_api_base_url() -> String {
    "https://photoslibrary.googleapis.com".to_string()
}

fn default_photos_token_url() -> String {
    "https://oauth2.googleapis.com/token".to_string()
}

fn default_credentials_path() -> PathBuf {
    PathBuf::from("credentials.json")
}

const fn default_timeout() -> u64 {
    30
}

const fn default_page_size() -> u32 {
    100
}

impl PhotoLibraryAppConfig {
    /// Build the integration client configuration
    #[must_use]
    pub fn to_client_config(&self) -> PhotosConfig {
        PhotosConfig {
            api_base_url: self.api_base_url.clone(),
            token_url: self.token_url.clone(),
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.expose_secret().to_string(),
            timeout_secs: self.timeout_secs,
            page_size: self.page_size,
        }
    }
}

/// Weather provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherAppConfig {
    /// Provider API key
    pub api_key: SecretString,

    /// REST API base URL
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,

    /// Unit system used when the display client does not specify one
    #[serde(default)]
    pub default_units: UnitSystem,

    /// Connection timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_weather_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

impl WeatherAppConfig {
    /// Build the integration client configuration
    #[must_use]
    pub fn to_client_config(&self) -> WeatherConfig {
        WeatherConfig {
            base_url: self.base_url.clone(),
            api_key: self.api_key.expose_secret().to_string(),
            timeout_secs: self.timeout_secs,
        }
    }
}

/// Response cache configuration
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CacheAppConfig {
    /// TTL for weather and forecast entries in minutes
    #[serde(default = "default_ttl_minutes")]
    pub ttl_minutes: u64,

    /// Maximum cache capacity in megabytes
    #[serde(default = "default_max_capacity_mb")]
    pub max_capacity_mb: u64,
}

const fn default_ttl_minutes() -> u64 {
    30
}

const fn default_max_capacity_mb() -> u64 {
    16
}

impl Default for CacheAppConfig {
    fn default() -> Self {
        Self {
            ttl_minutes: default_ttl_minutes(),
            max_capacity_mb: default_max_capacity_mb(),
        }
    }
}

impl CacheAppConfig {
    /// TTL as a duration
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_minutes * 60)
    }
}

/// Retry policy configuration
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RetryAppConfig {
    /// Maximum attempts per outbound call, including the first
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Base backoff delay in milliseconds
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,
}

const fn default_max_attempts() -> u32 {
    3
}

const fn default_base_delay_ms() -> u64 {
    1000
}

impl Default for RetryAppConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            base_delay_ms: default_base_delay_ms(),
        }
    }
}

impl RetryAppConfig {
    /// Build the executor configuration
    #[must_use]
    pub const fn to_retry_config(&self) -> RetryConfig {
        RetryConfig::new(self.max_attempts, self.base_delay_ms)
    }
}
