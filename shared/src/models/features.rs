//! Fused, model-ready feature record

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The fused feature record consumed by the inference engine.
///
/// All scalar features are normalized to [0, 1]; the exact scaling is owned
/// by the feature fuser and must stay stable because models are trained
/// against it. `degraded_inputs` marks records where missing source data was
/// replaced with defaults; `substituted_fields` lists which ones.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureRecord {
    pub crop_type: String,
    pub soil_type: String,
    pub growth_stage: String,
    pub days_since_planting: i64,

    // Normalized weather scalars
    pub temperature: f64,
    pub humidity: f64,
    pub precipitation: f64,
    pub wind_speed: f64,

    // Normalized vegetation indices, keyed by index name
    pub vegetation: BTreeMap<String, f64>,
    /// Normalized NDVI, always present (defaulted when the provider omits it)
    pub ndvi: f64,

    pub degraded_inputs: bool,
    pub substituted_fields: Vec<String>,
}

impl FeatureRecord {
    /// Whether every mandatory feature the model contract declares is
    /// present and within its normalized range.
    pub fn contract_violation(&self) -> Option<String> {
        if self.crop_type.trim().is_empty() {
            return Some("crop_type is empty".to_string());
        }
        if self.soil_type.trim().is_empty() {
            return Some("soil_type is empty".to_string());
        }
        if self.days_since_planting < 0 {
            return Some("days_since_planting is negative".to_string());
        }
        for (name, value) in [
            ("temperature", self.temperature),
            ("humidity", self.humidity),
            ("precipitation", self.precipitation),
            ("wind_speed", self.wind_speed),
            ("ndvi", self.ndvi),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Some(format!("{name} is outside the normalized range: {value}"));
            }
        }
        None
    }
}
