//! Weather HTTP client
//!
//! Client for the city-keyed weather REST API. Quantities are rounded the
//! way the display client expects them; forecast responses are reduced from
//! three-hour slots to one reading per day.

use chrono::{DateTime, Utc};
use domain::UnitSystem;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::models::{
    ApiCurrentResponse, ApiForecastResponse, ConditionData, CurrentConditions, ForecastEntry,
    ForecastSlot,
};

/// The forecast endpoint serves three-hour slots; every eighth slot is one
/// calendar day apart.
const SLOTS_PER_DAY: usize = 8;

/// Largest forecast the provider serves through this client
pub const MAX_FORECAST_DAYS: u8 = 5;

/// Weather client errors
#[derive(Debug, Error)]
pub enum WeatherApiError {
    /// City parameter was empty
    #[error("City name is required")]
    EmptyCity,

    /// The provider answered outside 2xx
    #[error("Request failed with status {status}: {body}")]
    RequestFailed { status: u16, body: String },

    /// Connection to the provider failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Failed to parse the provider's response
    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Weather client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// REST API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Provider API key
    pub api_key: String,

    /// Connection timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

const fn default_timeout() -> u64 {
    30
}

impl WeatherConfig {
    /// Create a configuration with the default endpoint for the given key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: default_base_url(),
            api_key: api_key.into(),
            timeout_secs: default_timeout(),
        }
    }
}

/// HTTP client for the weather provider
#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: Client,
    config: WeatherConfig,
}

impl WeatherClient {
    /// Create a new client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: WeatherConfig) -> Result<Self, WeatherApiError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| WeatherApiError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Current conditions for a city
    #[instrument(skip(self), fields(city = %city, units = %units))]
    pub async fn current(
        &self,
        city: &str,
        units: UnitSystem,
    ) -> Result<CurrentConditions, WeatherApiError> {
        Self::validate_city(city)?;

        let url = format!("{}/weather", self.config.base_url);
        debug!(url = %url, "Fetching current weather");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", city),
                ("units", units.as_str()),
                ("appid", self.config.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| WeatherApiError::ConnectionFailed(e.to_string()))?;

        let response = Self::check_status(response).await?;
        let body: ApiCurrentResponse = response
            .json()
            .await
            .map_err(|e| WeatherApiError::ParseError(e.to_string()))?;

        Self::map_current(&body)
    }

    /// Daily forecast for a city
    ///
    /// `days` is clamped to `[1, MAX_FORECAST_DAYS]`; one reading per day is
    /// taken from the provider's three-hour slots.
    #[instrument(skip(self), fields(city = %city, units = %units, days = days))]
    pub async fn forecast(
        &self,
        city: &str,
        units: UnitSystem,
        days: u8,
    ) -> Result<Vec<ForecastEntry>, WeatherApiError> {
        Self::validate_city(city)?;
        let days = days.clamp(1, MAX_FORECAST_DAYS);

        let url = format!("{}/forecast", self.config.base_url);
        debug!(url = %url, "Fetching forecast");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", city),
                ("units", units.as_str()),
                ("appid", self.config.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| WeatherApiError::ConnectionFailed(e.to_string()))?;

        let response = Self::check_status(response).await?;
        let body: ApiForecastResponse = response
            .json()
            .await
            .map_err(|e| WeatherApiError::ParseError(e.to_string()))?;

        body.list
            .iter()
            .step_by(SLOTS_PER_DAY)
            .take(days as usize)
            .map(Self::map_slot)
            .collect()
    }

    fn validate_city(city: &str) -> Result<(), WeatherApiError> {
        if city.trim().is_empty() {
            return Err(WeatherApiError::EmptyCity);
        }
        Ok(())
    }

    /// Classify a provider response by status code
    async fn check_status(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, WeatherApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(WeatherApiError::RequestFailed {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    fn map_current(body: &ApiCurrentResponse) -> Result<CurrentConditions, WeatherApiError> {
        let condition = Self::primary_condition(&body.weather)?;
        let wind = body.wind.clone().unwrap_or_default();

        Ok(CurrentConditions {
            temperature: round_degrees(body.main.temp),
            feels_like: round_degrees(body.main.feels_like),
            humidity: body.main.humidity,
            wind_speed: wind.speed,
            wind_direction: round_direction(wind.deg),
            pressure: round_pressure(body.main.pressure),
            condition: condition.main.clone(),
            description: condition.description.clone(),
            icon: condition.icon.clone(),
            sunrise: parse_epoch_seconds(body.sys.sunrise)?,
            sunset: parse_epoch_seconds(body.sys.sunset)?,
        })
    }

    fn map_slot(slot: &ForecastSlot) -> Result<ForecastEntry, WeatherApiError> {
        let condition = Self::primary_condition(&slot.weather)?;
        let wind = slot.wind.clone().unwrap_or_default();

        Ok(ForecastEntry {
            date: parse_epoch_seconds(slot.dt)?,
            temperature: round_degrees(slot.main.temp),
            feels_like: round_degrees(slot.main.feels_like),
            humidity: slot.main.humidity,
            wind_speed: wind.speed,
            wind_direction: round_direction(wind.deg),
            pressure: round_pressure(slot.main.pressure),
            condition: condition.main.clone(),
            description: condition.description.clone(),
            icon: condition.icon.clone(),
        })
    }

    fn primary_condition(weather: &[ConditionData]) -> Result<&ConditionData, WeatherApiError> {
        weather.first().ok_or_else(|| {
            WeatherApiError::ParseError("No weather condition in response".to_string())
        })
    }
}

#[allow(clippy::cast_possible_truncation)]
fn round_degrees(value: f64) -> i32 {
    value.round() as i32
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn round_direction(degrees: f64) -> u16 {
    degrees.round().rem_euclid(360.0) as u16
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn round_pressure(value: f64) -> u32 {
    value.round().max(0.0) as u32
}

fn parse_epoch_seconds(seconds: i64) -> Result<DateTime<Utc>, WeatherApiError> {
    DateTime::from_timestamp(seconds, 0).ok_or_else(|| {
        WeatherApiError::ParseError(format!("Invalid epoch timestamp: {seconds}"))
    })
}
