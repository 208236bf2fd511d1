//! Weather data models
//!
//! Wire types for the provider's current-weather and forecast endpoints,
//! plus the flattened shapes handed to callers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Current conditions for a city, flattened and rounded for display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// Temperature, rounded to whole degrees
    pub temperature: i32,
    /// Apparent temperature, rounded to whole degrees
    pub feels_like: i32,
    /// Relative humidity in percent (0-100)
    pub humidity: u8,
    /// Wind speed in the requested unit system's speed unit
    pub wind_speed: f64,
    /// Wind direction in degrees (0-359)
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

/// One daily forecast reading
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastEntry {
    /// The instant the reading applies to (UTC)
    pub date: DateTime<Utc>,
    /// Temperature, rounded to whole degrees
    pub temperature: i32,
    /// Apparent temperature, rounded to whole degrees
    pub feels_like: i32,
    /// Relative humidity in percent (0-100)
    pub humidity: u8,
    /// Wind speed in the requested unit system's speed unit
    pub wind_speed: f64,
    /// Wind direction in degrees (0-359)
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

/// Temperature/humidity/pressure block shared by both endpoints
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct MainData {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: u8,
    pub pressure: f64,
}

/// Wind block; the provider omits it for some readings
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct WindData {
    #[serde(default)]
    pub speed: f64,
    #[serde(default)]
    pub deg: f64,
}

/// One entry of the provider's `weather` condition array
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ConditionData {
    pub main: String,
    pub description: String,
    pub icon: String,
}

/// Sunrise/sunset block of the current-weather endpoint (epoch seconds)
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SysData {
    pub sunrise: i64,
    pub sunset: i64,
}

/// Wire shape of the current-weather endpoint
#[derive(Debug, Deserialize)]
pub(crate) struct ApiCurrentResponse {
    pub main: MainData,
    #[serde(default)]
    pub wind: Option<WindData>,
    pub weather: Vec<ConditionData>,
    pub sys: SysData,
}

/// One three-hour slot of the forecast endpoint
#[derive(Debug, Deserialize)]
pub(crate) struct ForecastSlot {
    pub dt: i64,
    pub main: MainData,
    #[serde(default)]
    pub wind: Option<WindData>,
    pub weather: Vec<ConditionData>,
}

/// Wire shape of the forecast endpoint
#[derive(Debug, Deserialize)]
pub(crate) struct ApiForecastResponse {
    pub list: Vec<ForecastSlot>,
}
