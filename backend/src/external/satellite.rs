//! Satellite vegetation index client
//!
//! Fetches satellite-derived vegetation indices (NDVI and friends) from an
//! agro-monitoring API. Mirrors the weather client: a `SatelliteProvider`
//! trait for the orchestrator, a reqwest-backed production implementation.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use shared::VegetationIndices;

use crate::error::{AppError, AppResult};

/// Capability the orchestrator depends on: vegetation indices for a
/// coordinate. Same failure contract as the weather provider.
#[async_trait]
pub trait SatelliteProvider: Send + Sync {
    async fn vegetation_indices(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> AppResult<VegetationIndices>;
}

/// Satellite API client
#[derive(Clone)]
pub struct SatelliteClient {
    client: Client,
    api_key: String,
    base_url: String,
}

/// Agro-monitoring API response for the latest index observation
#[derive(Debug, Deserialize)]
struct IndexResponse {
    dt: i64,
    #[serde(default)]
    indices: std::collections::BTreeMap<String, f64>,
}

impl SatelliteClient {
    /// Create a new SatelliteClient
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

    fn convert_response(&self, data: IndexResponse) -> VegetationIndices {
        VegetationIndices {
            timestamp: DateTime::from_timestamp(data.dt, 0).unwrap_or_else(Utc::now),
            indices: data.indices,
        }
    }
}

#[async_trait]
impl SatelliteProvider for SatelliteClient {
    async fn vegetation_indices(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> AppResult<VegetationIndices> {
        let url = format!(
            "{}/indices/latest?lat={}&lon={}",
            self.base_url, latitude, longitude
        );

        let response = self
            .client
            .get(&url)
            .header("x-api-key", &self.api_key)
            .send()
            .await
            .map_err(|e| AppError::upstream("satellite", format!("request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::upstream(
                "satellite",
                format!("API returned {status}: {body}"),
            ));
        }

        let data: IndexResponse = response.json().await.map_err(|e| {
            AppError::upstream("satellite", format!("failed to parse response: {e}"))
        })?;

        Ok(self.convert_response(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> SatelliteClient {
        SatelliteClient::new(
            "test-key".to_string(),
            "http://localhost:0".to_string(),
            Duration::from_secs(1),
        )
        .unwrap()
    }

    #[test]
    fn test_convert_response_preserves_index_keys() {
        let mut indices = std::collections::BTreeMap::new();
        indices.insert("ndvi".to_string(), 0.62);
        indices.insert("evi".to_string(), 0.41);
        indices.insert("some_future_index".to_string(), 0.9);

        let result = client().convert_response(IndexResponse {
            dt: 1_717_000_000,
            indices,
        });

        assert_eq!(result.ndvi(), Some(0.62));
        assert_eq!(result.get("evi"), Some(0.41));
        // Unknown index names pass through untouched
        assert_eq!(result.get("some_future_index"), Some(0.9));
    }

    #[test]
    fn test_convert_empty_response() {
        let result = client().convert_response(IndexResponse {
            dt: 1_717_000_000,
            indices: Default::default(),
        });
        assert!(result.is_empty());
        assert!(result.ndvi().is_none());
    }
}
