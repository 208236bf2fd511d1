//! Weather integration
//!
//! Client for the city-keyed weather REST API. Requires an API key but no
//! refreshable credential; responses are volatile and meant to be cached by
//! the caller.

pub mod client;
mod models;

pub use client::{MAX_FORECAST_DAYS, WeatherApiError, WeatherClient, WeatherConfig};
pub use models::{CurrentConditions, ForecastEntry};
