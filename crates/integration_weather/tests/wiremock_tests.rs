//! Integration tests for the weather client using wiremock
//!
//! These tests verify query-parameter shapes, the daily reduction of the
//! forecast list, and response classification against a mock HTTP server.

use domain::UnitSystem;
use integration_weather::{WeatherApiError, WeatherClient, WeatherConfig};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sample_current_response() -> serde_json::Value {
    serde_json::json!({
        "main": {"temp": 21.4, "feels_like": 20.6, "humidity": 40, "pressure": 1015.3},
        "wind": {"speed": 3.6, "deg": 270.0},
        "weather": [{"main": "Clear", "description": "clear sky", "icon": "01d"}],
        "sys": {"sunrise": 1_700_000_000, "sunset": 1_700_040_000},
        "dt": 1_700_020_000
    })
}

/// Forecast body with 24 three-hour slots (three days)
fn sample_forecast_response() -> serde_json::Value {
    let slots: Vec<serde_json::Value> = (0..24)
        .map(|i| {
            serde_json::json!({
                "dt": 1_700_000_000 + i * 10_800,
                "main": {
                    "temp": 10.0 + f64::from(i),
                    "feels_like": 8.0 + f64::from(i),
                    "humidity": 70,
                    "pressure": 1005.0
                },
                "wind": {"speed": 4.0, "deg": 180.0},
                "weather": [{"main": "Rain", "description": "light rain", "icon": "10d"}]
            })
        })
        .collect();
    serde_json::json!({ "list": slots })
}

/// Create a test client configured to use the mock server
///
/// # Panics
///
/// Panics if the client cannot be created (should not happen in tests).
fn create_test_client(mock_server: &MockServer) -> WeatherClient {
    let config = WeatherConfig {
        base_url: mock_server.uri(),
        api_key: "test-api-key".to_string(),
        timeout_secs: 5,
    };
    #[allow(clippy::expect_used)]
    WeatherClient::new(config).expect("Failed to create client")
}

// ============================================================================
// Success scenarios
// ============================================================================

#[tokio::test]
async fn test_current_weather_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "Bucharest"))
        .and(query_param("units", "metric"))
        .and(query_param("appid", "test-api-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_current_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let conditions = client
        .current("Bucharest", UnitSystem::Metric)
        .await
        .expect("current weather fetched");

    assert_eq!(conditions.temperature, 21);
    assert_eq!(conditions.humidity, 40);
    assert_eq!(conditions.condition, "Clear");
    assert_eq!(conditions.sunrise.timestamp(), 1_700_000_000);
}

#[tokio::test]
async fn test_imperial_units_are_passed_through() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("units", "imperial"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_current_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client.current("Bucharest", UnitSystem::Imperial).await;

    assert!(result.is_ok(), "Expected success, got: {result:?}");
}

#[tokio::test]
async fn test_forecast_takes_one_reading_per_day() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("q", "Berlin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_forecast_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let entries = client
        .forecast("Berlin", UnitSystem::Metric, 3)
        .await
        .expect("forecast fetched");

    // Slots 0, 8 and 16 of the three-hour list.
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].temperature, 10);
    assert_eq!(entries[1].temperature, 18);
    assert_eq!(entries[2].temperature, 26);
    assert_eq!(entries[1].date.timestamp(), 1_700_000_000 + 8 * 10_800);
}

#[tokio::test]
async fn test_forecast_days_clamped_to_provider_range() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_forecast_response()))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    // 24 slots cover three days; asking for 99 days still returns what the
    // body holds, clamped to the provider maximum of 5.
    let entries = client
        .forecast("Berlin", UnitSystem::Metric, 99)
        .await
        .expect("forecast fetched");
    assert_eq!(entries.len(), 3);

    let entries = client
        .forecast("Berlin", UnitSystem::Metric, 0)
        .await
        .expect("forecast fetched");
    assert_eq!(entries.len(), 1);
}

// ============================================================================
// Error handling scenarios
// ============================================================================

#[tokio::test]
async fn test_bad_api_key_is_request_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(
            ResponseTemplate::new(401).set_body_string(r#"{"cod":401,"message":"Invalid API key"}"#),
        )
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client.current("Bucharest", UnitSystem::Metric).await;

    match result {
        Err(WeatherApiError::RequestFailed { status, body }) => {
            assert_eq!(status, 401);
            assert!(body.contains("Invalid API key"));
        },
        other => unreachable!("Expected RequestFailed, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_unknown_city_is_request_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(
            ResponseTemplate::new(404).set_body_string(r#"{"cod":"404","message":"city not found"}"#),
        )
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client.current("Atlantis", UnitSystem::Metric).await;

    assert!(
        matches!(result, Err(WeatherApiError::RequestFailed { status: 404, .. })),
        "Expected RequestFailed 404, got: {result:?}"
    );
}

#[tokio::test]
async fn test_invalid_json_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not valid json"))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client.current("Bucharest", UnitSystem::Metric).await;

    assert!(
        matches!(result, Err(WeatherApiError::ParseError(_))),
        "Expected ParseError, got: {result:?}"
    );
}

#[tokio::test]
async fn test_empty_city_fails_before_any_request() {
    let mock_server = MockServer::start().await;

    // No mock mounted: a request would return 404 and a different error.
    let client = create_test_client(&mock_server);
    let result = client.current("   ", UnitSystem::Metric).await;

    assert!(
        matches!(result, Err(WeatherApiError::EmptyCity)),
        "Expected EmptyCity, got: {result:?}"
    );
}
