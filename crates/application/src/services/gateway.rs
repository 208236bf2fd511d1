//! External integration gateway
//!
//! Orchestrates the token lifecycle, retry executor, response cache and
//! sizing rules into the four call-sites the display client's HTTP layer
//! consumes: media listing, album listing, current weather and forecast.

use std::sync::Arc;
use std::time::Duration;

use domain::{DomainError, MediaDimensions, RenderTarget, UnitSystem, Viewport};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::GatewayError;
use crate::ports::{
    Album, CachePort, CachePortExt, ForecastDay, MediaItem, PhotoLibraryPort, WeatherPort,
    WeatherSnapshot, ttl,
};
use crate::retry::{RetryConfig, retry};
use crate::services::TokenLifecycleManager;

/// Smallest forecast the weather provider serves
pub const MIN_FORECAST_DAYS: u8 = 1;
/// Largest forecast the weather provider serves
pub const MAX_FORECAST_DAYS: u8 = 5;

/// A media item sized for a specific viewport
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SizedMediaItem {
    /// Provider-assigned item identifier
    pub id: String,
    /// Media URL rewritten with the computed size directive
    pub url: String,
    /// MIME type, when the provider reports one
    pub mime_type: Option<String>,
    /// Render box width the URL requests
    pub target_width: u32,
    /// Render box height the URL requests
    pub target_height: u32,
    /// Media width used for the computation (viewport fallback included)
    pub original_width: u32,
    /// Media height used for the computation (viewport fallback included)
    pub original_height: u32,
}

/// The gateway between the display client and the external providers
///
/// Photo operations run under the token lifecycle manager; weather
/// operations run through the response cache. Every outbound provider call
/// is wrapped in the retry executor.
pub struct GatewayService {
    tokens: TokenLifecycleManager,
    photos: Arc<dyn PhotoLibraryPort>,
    weather: Arc<dyn WeatherPort>,
    cache: Arc<dyn CachePort>,
    retry: RetryConfig,
    weather_ttl: Duration,
}

impl std::fmt::Debug for GatewayService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayService")
            .field("retry", &self.retry)
            .field("weather_ttl", &self.weather_ttl)
            .finish_non_exhaustive()
    }
}

impl GatewayService {
    /// Create a gateway with the default retry policy (3 attempts, 1000 ms
    /// base delay) and the default weather TTL (30 minutes)
    #[must_use]
    pub fn new(
        tokens: TokenLifecycleManager,
        photos: Arc<dyn PhotoLibraryPort>,
        weather: Arc<dyn WeatherPort>,
        cache: Arc<dyn CachePort>,
    ) -> Self {
        Self {
            tokens,
            photos,
            weather,
            cache,
            retry: RetryConfig::default(),
            weather_ttl: ttl::WEATHER,
        }
    }

    /// Override the retry policy applied to provider calls
    #[must_use]
    pub fn with_retry_config(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Override the weather cache TTL
    #[must_use]
    pub fn with_weather_ttl(mut self, ttl: Duration) -> Self {
        self.weather_ttl = ttl;
        self
    }

    /// List an album's media, sized for the given viewport
    ///
    /// Newest items first, one provider page. Items without dimension
    /// metadata are treated as exactly screen-shaped.
    #[instrument(skip(self), fields(album_id = %album_id))]
    pub async fn list_media(
        &self,
        album_id: &str,
        screen_width: u32,
        screen_height: u32,
    ) -> Result<Vec<SizedMediaItem>, GatewayError> {
        if album_id.trim().is_empty() {
            return Err(
                DomainError::ValidationError("album id must not be empty".to_string()).into(),
            );
        }
        let viewport = Viewport::new(screen_width, screen_height)?;

        let items = self
            .tokens
            .with_valid_credential(|creds| async move {
                retry(&self.retry, || {
                    self.photos.search_media_items(&creds, album_id)
                })
                .await
            })
            .await?;

        debug!(count = items.len(), viewport = %viewport, "Fetched media items");

        Ok(items
            .into_iter()
            .map(|item| Self::size_item(item, viewport))
            .collect())
    }

    /// List the user's albums
    #[instrument(skip(self))]
    pub async fn list_albums(&self) -> Result<Vec<Album>, GatewayError> {
        let albums = self
            .tokens
            .with_valid_credential(|creds| async move {
                retry(&self.retry, || self.photos.list_albums(&creds)).await
            })
            .await?;

        debug!(count = albums.len(), "Fetched albums");
        Ok(albums)
    }

    /// Current weather for a city, served from cache within the TTL window
    #[instrument(skip(self))]
    pub async fn get_weather(
        &self,
        city: &str,
        units: UnitSystem,
    ) -> Result<WeatherSnapshot, GatewayError> {
        let city = normalized_city(city)?;
        let key = format!("weather:{}:{units}", city_key_segment(&city));

        self.cache
            .get_or_fetch(&key, self.weather_ttl, || async {
                retry(&self.retry, || self.weather.current_conditions(&city, units)).await
            })
            .await
    }

    /// Daily forecast for a city, days clamped to the provider range,
    /// served from cache within the TTL window
    #[instrument(skip(self))]
    pub async fn get_forecast(
        &self,
        city: &str,
        units: UnitSystem,
        days: u8,
    ) -> Result<Vec<ForecastDay>, GatewayError> {
        let city = normalized_city(city)?;
        let days = days.clamp(MIN_FORECAST_DAYS, MAX_FORECAST_DAYS);
        let key = format!("forecast:{}:{units}:{days}", city_key_segment(&city));

        self.cache
            .get_or_fetch(&key, self.weather_ttl, || async {
                retry(&self.retry, || self.weather.forecast(&city, units, days)).await
            })
            .await
    }

    /// Drop every cached weather and forecast entry
    ///
    /// Called when a parameter that participates in cache-key semantics
    /// (the unit system) changes. Returns the number of entries removed.
    #[instrument(skip(self))]
    pub async fn invalidate_weather_cache(&self) -> Result<u64, GatewayError> {
        let removed = self.cache.invalidate_pattern("weather:*").await?
            + self.cache.invalidate_pattern("forecast:*").await?;
        debug!(removed, "Weather cache invalidated");
        Ok(removed)
    }

    fn size_item(item: MediaItem, viewport: Viewport) -> SizedMediaItem {
        let dims = MediaDimensions::from_provider_metadata(item.width, item.height, viewport);
        let target = RenderTarget::for_media(viewport, dims);
        SizedMediaItem {
            url: target.sized_url(&item.base_url),
            id: item.id,
            mime_type: item.mime_type,
            target_width: target.width,
            target_height: target.height,
            original_width: dims.width(),
            original_height: dims.height(),
        }
    }
}

/// Trim and validate a caller-supplied city name
fn normalized_city(city: &str) -> Result<String, GatewayError> {
    let trimmed = city.trim();
    if trimmed.is_empty() {
        return Err(DomainError::ValidationError("city must not be empty".to_string()).into());
    }
    Ok(trimmed.to_string())
}

/// Cache-key segment for a city: case-insensitive so display clients that
/// disagree on capitalization share entries
fn city_key_segment(city: &str) -> String {
    city.to_lowercase()
}
