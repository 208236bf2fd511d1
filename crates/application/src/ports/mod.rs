//! Port definitions for application layer
//!
//! Ports are interfaces that define how the gateway interacts with external
//! systems. Adapters in the infrastructure layer implement these ports.

mod cache_port;
mod credential_store;
mod photo_library_port;
mod weather_port;

pub use cache_port::{CachePort, CachePortExt, CacheStats, ttl};
#[cfg(test)]
pub use credential_store::{MockCredentialRefreshPort, MockCredentialStorePort};
pub use credential_store::{CredentialRefreshPort, CredentialStorePort};
#[cfg(test)]
pub use photo_library_port::MockPhotoLibraryPort;
pub use photo_library_port::{Album, MediaItem, PhotoLibraryPort};
#[cfg(test)]
pub use weather_port::MockWeatherPort;
pub use weather_port::{ForecastDay, WeatherPort, WeatherSnapshot};
