//! Weather data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A weather observation for one location at a point in time.
///
/// Produced by the weather provider and treated as a read-only snapshot.
/// Scalar readings are optional because the provider payload may be
/// partially populated; feature fusion substitutes documented defaults for
/// anything missing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherObservation {
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature_celsius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub humidity_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precipitation_mm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind_speed_mps: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pressure_hpa: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_coverage_percent: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditions: Option<String>,
}

impl WeatherObservation {
    /// An observation carrying no readings, only a timestamp.
    pub fn empty(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            temperature_celsius: None,
            humidity_percent: None,
            precipitation_mm: None,
            wind_speed_mps: None,
            pressure_hpa: None,
            cloud_coverage_percent: None,
            conditions: None,
        }
    }
}
