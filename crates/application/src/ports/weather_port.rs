//! Weather service port
//!
//! Defines the interface for city-keyed weather data retrieval. The provider
//! requires an API key but no refreshable credential.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::UnitSystem;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::GatewayError;

/// Current conditions for a city
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// City the snapshot describes
    pub city: String,
    /// Unit system the quantities are expressed in
    pub units: UnitSystem,
    /// Temperature, rounded to whole degrees
    pub temperature: i32,
    /// Apparent temperature, rounded to whole degrees
    pub feels_like: i32,
    /// Relative humidity in percent (0-100)
    pub humidity: u8,
    /// Wind speed in the unit system's speed unit
    pub wind_speed: f64,
    /// Wind direction in degrees
    pub wind_direction: u16,
    /// Surface pressure in hPa
    pub pressure: u32,
    /// Condition group, e.g. `Clouds`
    pub condition: String,
    /// Human-readable condition description
    pub description: String,
    /// Provider icon code
    pub icon: String,
    /// Sunrise time (UTC)
    pub sunrise: DateTime<Utc>,
    /// Sunset time (UTC)
    pub sunset: DateTime<Utc>,
}

/// One day of forecast
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastDay {
    /// The instant the reading applies to (UTC)
    pub date: DateTime<Utc>,
    /// Temperature, rounded to whole degrees
    pub temperature: i32,
    /// Apparent temperature, rounded to whole degrees
    pub feels_like: i32,
    /// Relative humidity in percent (0-100)
    pub humidity: u8,
    /// Wind speed in the unit system's speed unit
    pub wind_speed: f64,
    /// Wind direction in degrees
    pub wind_direction: u16,
    /// Surface pressure in hPa
    pub pressure: u32,
    /// Condition group, e.g. `Rain`
    pub condition: String,
    /// Human-readable condition description
    pub description: String,
    /// Provider icon code
    pub icon: String,
}

/// Port for weather service operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WeatherPort: Send + Sync {
    /// Get current conditions for a city
    async fn current_conditions(
        &self,
        city: &str,
        units: UnitSystem,
    ) -> Result<WeatherSnapshot, GatewayError>;

    /// Get a daily forecast for a city
    ///
    /// # Arguments
    /// * `city` - City name as understood by the provider
    /// * `units` - Unit system for all quantities
    /// * `days` - Number of days (implementations clamp to the provider range)
    async fn forecast(
        &self,
        city: &str,
        units: UnitSystem,
        days: u8,
    ) -> Result<Vec<ForecastDay>, GatewayError>;
}
