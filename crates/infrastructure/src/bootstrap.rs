//! Composition root
//!
//! Wires stores, adapters, cache and services into a ready `GatewayService`
//! for the out-of-repo HTTP layer.

use std::sync::Arc;

use application::{
    CredentialRefreshPort, GatewayError, GatewayService, PhotoLibraryPort, TokenLifecycleManager,
};

use crate::adapters::{PhotoLibraryAdapter, WeatherAdapter};
use crate::cache::{MokaCache, MokaCacheConfig};
use crate::config::AppConfig;
use crate::persistence::FileCredentialStore;

/// Build a gateway from loaded configuration
///
/// # Errors
///
/// Returns an error if a provider HTTP client fails to initialize.
pub fn build_gateway(config: &AppConfig) -> Result<GatewayService, GatewayError> {
    let photos = Arc::new(PhotoLibraryAdapter::from_config(
        config.photos.to_client_config(),
    )?);
    let weather = Arc::new(WeatherAdapter::from_config(
        config.weather.to_client_config(),
    )?);
    let store = Arc::new(FileCredentialStore::new(&config.photos.credentials_path));
    let cache = Arc::new(MokaCache::with_config(MokaCacheConfig {
        max_capacity_mb: config.cache.max_capacity_mb,
        ..MokaCacheConfig::default()
    }));

    let retry = config.retry.to_retry_config();
    let refresher: Arc<dyn CredentialRefreshPort> = Arc::clone(&photos) as _;
    let tokens = TokenLifecycleManager::new(store, refresher).with_retry_config(retry);

    let photos: Arc<dyn PhotoLibraryPort> = photos;
    Ok(GatewayService::new(tokens, photos, weather, cache)
        .with_retry_config(retry)
        .with_weather_ttl(config.cache.ttl()))
}
