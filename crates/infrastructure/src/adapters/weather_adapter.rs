//! Weather adapter - Implements `WeatherPort` using `integration_weather`

use application::error::GatewayError;
use application::ports::{ForecastDay, WeatherPort, WeatherSnapshot};
use async_trait::async_trait;
use domain::{DomainError, UnitSystem};
use integration_weather::{
    CurrentConditions, ForecastEntry, WeatherApiError, WeatherClient, WeatherConfig,
};
use tracing::{debug, instrument};

/// Adapter for the weather provider
#[derive(Debug, Clone)]
pub struct WeatherAdapter {
    client: WeatherClient,
}

impl WeatherAdapter {
    /// Create an adapter over an existing client
    #[must_use]
    pub const fn new(client: WeatherClient) -> Self {
        Self { client }
    }

    /// Create an adapter from a client configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn from_config(config: WeatherConfig) -> Result<Self, GatewayError> {
        let client =
            WeatherClient::new(config).map_err(|e| GatewayError::Configuration(e.to_string()))?;
        Ok(Self { client })
    }

    /// Map a provider error into the gateway taxonomy
    ///
    /// The weather provider has no refreshable credential, so even a 401
    /// (bad API key) is an upstream failure rather than a re-authorization
    /// signal.
    fn map_error(err: WeatherApiError) -> GatewayError {
        match err {
            WeatherApiError::EmptyCity => {
                DomainError::ValidationError("city must not be empty".to_string()).into()
            },
            WeatherApiError::RequestFailed { status, body } => {
                GatewayError::Upstream { status, body }
            },
            WeatherApiError::ConnectionFailed(e) => GatewayError::TransientNetwork(e),
            WeatherApiError::ParseError(e) => GatewayError::Internal(e),
        }
    }

    fn map_current(conditions: CurrentConditions, city: &str, units: UnitSystem) -> WeatherSnapshot {
        WeatherSnapshot {
            city: city.to_string(),
            units,
            temperature: conditions.temperature,
            feels_like: conditions.feels_like,
            humidity: conditions.humidity,
            wind_speed: conditions.wind_speed,
            wind_direction: conditions.wind_direction,
            pressure: conditions.pressure,
            condition: conditions.condition,
            description: conditions.description,
            icon: conditions.icon,
            sunrise: conditions.sunrise,
            sunset: conditions.sunset,
        }
    }

    fn map_entry(entry: ForecastEntry) -> ForecastDay {
        ForecastDay {
            date: entry.date,
            temperature: entry.temperature,
            feels_like: entry.feels_like,
            humidity: entry.humidity,
            wind_speed: entry.wind_speed,
            wind_direction: entry.wind_direction,
            pressure: entry.pressure,
            condition: entry.condition,
            description: entry.description,
            icon: entry.icon,
        }
    }
}

#[async_trait]
impl WeatherPort for WeatherAdapter {
    #[instrument(skip(self), fields(city = %city, units = %units))]
    async fn current_conditions(
        &self,
        city: &str,
        units: UnitSystem,
    ) -> Result<WeatherSnapshot, GatewayError> {
        let conditions = self
            .client
            .current(city, units)
            .await
            .map_err(Self::map_error)?;

        debug!(
            temperature = conditions.temperature,
            condition = %conditions.condition,
            "Retrieved current weather"
        );
        Ok(Self::map_current(conditions, city, units))
    }

    #[instrument(skip(self), fields(city = %city, units = %units, days = days))]
    async fn forecast(
        &self,
        city: &str,
        units: UnitSystem,
        days: u8,
    ) -> Result<Vec<ForecastDay>, GatewayError> {
        let entries = self
            .client
            .forecast(city, units, days)
            .await
            .map_err(Self::map_error)?;

        debug!(count = entries.len(), "Retrieved forecast");
        Ok(entries.into_iter().map(Self::map_entry).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn conditions() -> CurrentConditions {
        CurrentConditions {
            temperature: 21,
            feels_like: 20,
            humidity: 40,
            wind_speed: 3.6,
            wind_direction: 270,
            pressure: 1015,
            condition: "Clear".to_string(),
            description: "clear sky".to_string(),
            icon: "01d".to_string(),
            sunrise: Utc::now(),
            sunset: Utc::now(),
        }
    }

    #[test]
    fn request_failure_maps_to_upstream_even_for_401() {
        let err = WeatherAdapter::map_error(WeatherApiError::RequestFailed {
            status: 401,
            body: "Invalid API key".into(),
        });
        assert!(matches!(
            err,
            GatewayError::Upstream { status: 401, .. }
        ));
    }

    #[test]
    fn connection_failure_maps_to_transient() {
        let err = WeatherAdapter::map_error(WeatherApiError::ConnectionFailed("refused".into()));
        assert!(matches!(err, GatewayError::TransientNetwork(_)));
        assert!(err.is_retryable());
    }

    #[test]
    fn parse_failure_maps_to_internal() {
        let err = WeatherAdapter::map_error(WeatherApiError::ParseError("bad json".into()));
        assert!(matches!(err, GatewayError::Internal(_)));
    }

    #[test]
    fn empty_city_maps_to_domain_validation() {
        let err = WeatherAdapter::map_error(WeatherApiError::EmptyCity);
        assert!(matches!(
            err,
            GatewayError::Domain(DomainError::ValidationError(_))
        ));
    }

    #[test]
    fn snapshot_echoes_city_and_units() {
        let snapshot =
            WeatherAdapter::map_current(conditions(), "Bucharest", UnitSystem::Imperial);
        assert_eq!(snapshot.city, "Bucharest");
        assert_eq!(snapshot.units, UnitSystem::Imperial);
        assert_eq!(snapshot.temperature, 21);
    }

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<WeatherAdapter>();
    }
}
