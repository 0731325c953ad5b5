//! Weather API client for fetching current conditions
//!
//! Integrates with the OpenWeatherMap API. The orchestrator consumes the
//! provider through the `WeatherProvider` trait so tests can substitute a
//! stub without network access.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use shared::WeatherObservation;

use crate::error::{AppError, AppResult};

/// Capability the orchestrator depends on: current weather for a coordinate.
///
/// Failures and timeouts surface as `AppError::UpstreamData`; any retry or
/// backoff policy belongs to the implementation, not the caller.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn current_weather(&self, latitude: f64, longitude: f64)
        -> AppResult<WeatherObservation>;
}

/// Weather API client
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
}

/// OpenWeatherMap API response for current weather
#[derive(Debug, Deserialize)]
struct OwmCurrentResponse {
    weather: Vec<OwmWeather>,
    main: OwmMain,
    wind: Option<OwmWind>,
    clouds: Option<OwmClouds>,
    rain: Option<OwmRain>,
    dt: i64,
}

#[derive(Debug, Deserialize)]
struct OwmWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: Option<f64>,
    pressure: Option<i32>,
    humidity: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwmWind {
    speed: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwmClouds {
    all: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct OwmRain {
    #[serde(rename = "1h")]
    one_hour: Option<f64>,
    #[serde(rename = "3h")]
    three_hour: Option<f64>,
}

impl WeatherClient {
    /// Create a new WeatherClient
    pub fn new(api_key: String, base_url: String, timeout: Duration) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key,
            base_url,
        })
    }

    /// Convert an OpenWeatherMap response to the domain snapshot.
    ///
    /// Absent readings stay absent; substituting defaults is the feature
    /// fuser's job, not the client's.
    fn convert_current_response(&self, data: OwmCurrentResponse) -> WeatherObservation {
        let precipitation = data
            .rain
            .as_ref()
            .and_then(|r| r.three_hour.or(r.one_hour));

        WeatherObservation {
            timestamp: DateTime::from_timestamp(data.dt, 0).unwrap_or_else(Utc::now),
            temperature_celsius: data.main.temp,
            humidity_percent: data.main.humidity,
            precipitation_mm: precipitation,
            wind_speed_mps: data.wind.and_then(|w| w.speed),
            pressure_hpa: data.main.pressure,
            cloud_coverage_percent: data.clouds.and_then(|c| c.all),
            conditions: data.weather.first().map(|w| w.description.clone()),
        }
    }
}

#[async_trait]
impl WeatherProvider for WeatherClient {
    async fn current_weather(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> AppResult<WeatherObservation> {
        let url = format!(
            "{}/weather?lat={}&lon={}&appid={}&units=metric",
            self.base_url, latitude, longitude, self.api_key
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::upstream("weather", format!("request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::upstream(
                "weather",
                format!("API returned {status}: {body}"),
            ));
        }

        let data: OwmCurrentResponse = response
            .json()
            .await
            .map_err(|e| AppError::upstream("weather", format!("failed to parse response: {e}")))?;

        Ok(self.convert_current_response(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> WeatherClient {
        WeatherClient::new(
            "test-key".to_string(),
            "http://localhost:0".to_string(),
            Duration::from_secs(1),
        )
        .unwrap()
    }

    #[test]
    fn test_convert_full_response() {
        let data = OwmCurrentResponse {
            weather: vec![OwmWeather {
                description: "light rain".to_string(),
            }],
            main: OwmMain {
                temp: Some(24.5),
                pressure: Some(1012),
                humidity: Some(88.0),
            },
            wind: Some(OwmWind { speed: Some(4.2) }),
            clouds: Some(OwmClouds { all: Some(75) }),
            rain: Some(OwmRain {
                one_hour: Some(0.4),
                three_hour: Some(1.2),
            }),
            dt: 1_717_000_000,
        };

        let observation = client().convert_current_response(data);
        assert_eq!(observation.temperature_celsius, Some(24.5));
        assert_eq!(observation.humidity_percent, Some(88.0));
        // 3h accumulation wins over 1h when both are reported
        assert_eq!(observation.precipitation_mm, Some(1.2));
        assert_eq!(observation.conditions.as_deref(), Some("light rain"));
    }

    #[test]
    fn test_convert_sparse_response_keeps_fields_absent() {
        let data = OwmCurrentResponse {
            weather: vec![],
            main: OwmMain {
                temp: None,
                pressure: None,
                humidity: Some(60.0),
            },
            wind: None,
            clouds: None,
            rain: None,
            dt: 1_717_000_000,
        };

        let observation = client().convert_current_response(data);
        assert!(observation.temperature_celsius.is_none());
        assert!(observation.precipitation_mm.is_none());
        assert!(observation.wind_speed_mps.is_none());
        assert!(observation.conditions.is_none());
        assert_eq!(observation.humidity_percent, Some(60.0));
    }
}
