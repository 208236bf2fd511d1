//! Infrastructure layer - Adapters for external systems
//!
//! Implements the ports defined in the application layer: provider adapters
//! over the integration clients, the moka-backed response cache, durable
//! credential persistence, configuration loading and tracing setup.

pub mod adapters;
pub mod bootstrap;
pub mod cache;
pub mod config;
pub mod persistence;
pub mod telemetry;

pub use adapters::{PhotoLibraryAdapter, WeatherAdapter};
pub use bootstrap::build_gateway;
pub use cache::{MokaCache, MokaCacheConfig};
pub use config::{AppConfig, CacheAppConfig, PhotoLibraryAppConfig, RetryAppConfig, WeatherAppConfig};
pub use persistence::FileCredentialStore;
pub use telemetry::{TelemetryConfig, init_telemetry};
