//! Feature fusion
//!
//! Normalizes and merges raw weather, satellite and agronomic inputs into
//! one model-ready feature record. The scaling here is part of the model
//! contract: models are trained against these exact ranges, so any change
//! is a breaking change to the model version.
//!
//! Normalization:
//! - humidity: percent / 100
//! - temperature: (celsius - 10) / 30, covering the 10-40 C band
//! - precipitation: mm / 25
//! - wind speed: mps / 20
//! - NDVI-family indices (-1..1): (value + 1) / 2; other indices clamp raw
//!
//! All results clamp to [0, 1]. Missing optional readings are replaced with
//! neutral defaults and recorded on the feature record instead of erroring.

use chrono::NaiveDate;
use shared::{
    days_since_planting, validate_identifier, validate_planting_date, CropContext, FeatureRecord,
    VegetationIndices, WeatherObservation,
};

use crate::error::{AppError, AppResult};

/// Neutral defaults substituted for missing readings (raw units).
const DEFAULT_HUMIDITY_PERCENT: f64 = 60.0;
const DEFAULT_TEMPERATURE_CELSIUS: f64 = 22.0;
const DEFAULT_PRECIPITATION_MM: f64 = 0.0;
const DEFAULT_WIND_SPEED_MPS: f64 = 3.0;
const DEFAULT_NDVI: f64 = 0.5;

/// Index names measured on the [-1, 1] scale.
const SIGNED_INDEX_PREFIXES: &[&str] = &["ndvi", "evi", "savi", "ndwi", "ndre"];

/// Fuses heterogeneous raw inputs into a [`FeatureRecord`].
#[derive(Debug, Clone, Default)]
pub struct FeatureFuser;

impl FeatureFuser {
    pub fn new() -> Self {
        Self
    }

    /// Fuse crop context, weather and satellite data into a feature record.
    ///
    /// Pure function of its inputs. Fails with `InvalidInput` only for
    /// malformed categorical or temporal inputs; missing numeric readings
    /// degrade instead.
    pub fn prepare_features(
        &self,
        context: &CropContext,
        weather: &WeatherObservation,
        satellite: &VegetationIndices,
        assessment_date: NaiveDate,
    ) -> AppResult<FeatureRecord> {
        validate_identifier(&context.crop_type)
            .map_err(|e| AppError::invalid_input("crop_type", e))?;
        validate_identifier(&context.soil_type)
            .map_err(|e| AppError::invalid_input("soil_type", e))?;
        validate_planting_date(context.planting_date, assessment_date)
            .map_err(|e| AppError::invalid_input("planting_date", e))?;

        let mut substituted = Vec::new();
        let mut take = |name: &str, reading: Option<f64>, default: f64| match reading {
            Some(value) => value,
            None => {
                substituted.push(name.to_string());
                default
            }
        };

        let humidity_percent = take(
            "humidity_percent",
            weather.humidity_percent,
            DEFAULT_HUMIDITY_PERCENT,
        );
        let temperature_celsius = take(
            "temperature_celsius",
            weather.temperature_celsius,
            DEFAULT_TEMPERATURE_CELSIUS,
        );
        let precipitation_mm = take(
            "precipitation_mm",
            weather.precipitation_mm,
            DEFAULT_PRECIPITATION_MM,
        );
        let wind_speed_mps = take(
            "wind_speed_mps",
            weather.wind_speed_mps,
            DEFAULT_WIND_SPEED_MPS,
        );
        let ndvi_raw = take("ndvi", satellite.ndvi(), DEFAULT_NDVI);

        let vegetation = satellite
            .indices
            .iter()
            .map(|(name, value)| (name.clone(), normalize_index(name, *value)))
            .collect();

        let degraded_inputs = !substituted.is_empty();

        Ok(FeatureRecord {
            crop_type: context.crop_type.clone(),
            soil_type: context.soil_type.clone(),
            growth_stage: context.growth_stage.clone(),
            days_since_planting: days_since_planting(context.planting_date, assessment_date),
            temperature: normalize_temperature(temperature_celsius),
            humidity: normalize_humidity(humidity_percent),
            precipitation: normalize_precipitation(precipitation_mm),
            wind_speed: normalize_wind_speed(wind_speed_mps),
            vegetation,
            ndvi: normalize_index("ndvi", ndvi_raw),
            degraded_inputs,
            substituted_fields: substituted,
        })
    }
}

fn normalize_humidity(percent: f64) -> f64 {
    (percent / 100.0).clamp(0.0, 1.0)
}

fn normalize_temperature(celsius: f64) -> f64 {
    ((celsius - 10.0) / 30.0).clamp(0.0, 1.0)
}

fn normalize_precipitation(mm: f64) -> f64 {
    (mm / 25.0).clamp(0.0, 1.0)
}

fn normalize_wind_speed(mps: f64) -> f64 {
    (mps / 20.0).clamp(0.0, 1.0)
}

fn normalize_index(name: &str, value: f64) -> f64 {
    let name = name.to_ascii_lowercase();
    if SIGNED_INDEX_PREFIXES.iter().any(|p| name.starts_with(p)) {
        ((value + 1.0) / 2.0).clamp(0.0, 1.0)
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use shared::CropContext;

    fn assessment_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn context() -> CropContext {
        CropContext::new(
            "wheat",
            "loam",
            None,
            NaiveDate::from_ymd_opt(2024, 5, 16).unwrap(),
        )
    }

    fn full_weather() -> WeatherObservation {
        WeatherObservation {
            timestamp: Utc.with_ymd_and_hms(2024, 6, 15, 6, 0, 0).unwrap(),
            temperature_celsius: Some(25.0),
            humidity_percent: Some(90.0),
            precipitation_mm: Some(5.0),
            wind_speed_mps: Some(4.0),
            pressure_hpa: Some(1010),
            cloud_coverage_percent: Some(80),
            conditions: Some("overcast".to_string()),
        }
    }

    fn full_satellite() -> VegetationIndices {
        VegetationIndices::new(Utc.with_ymd_and_hms(2024, 6, 14, 10, 0, 0).unwrap())
            .with_index("ndvi", 0.3)
            .with_index("evi", 0.2)
    }

    #[test]
    fn test_complete_inputs_fuse_without_degradation() {
        let fuser = FeatureFuser::new();
        let record = fuser
            .prepare_features(&context(), &full_weather(), &full_satellite(), assessment_date())
            .unwrap();

        assert_eq!(record.days_since_planting, 30);
        assert!(!record.degraded_inputs);
        assert!(record.substituted_fields.is_empty());
        assert!((record.humidity - 0.9).abs() < 1e-9);
        assert!((record.temperature - 0.5).abs() < 1e-9);
        assert!((record.precipitation - 0.2).abs() < 1e-9);
        assert!((record.ndvi - 0.65).abs() < 1e-9);
        assert!(record.contract_violation().is_none());
    }

    #[test]
    fn test_missing_satellite_degrades_not_fails() {
        let fuser = FeatureFuser::new();
        let empty = VegetationIndices::new(Utc.with_ymd_and_hms(2024, 6, 14, 10, 0, 0).unwrap());
        let record = fuser
            .prepare_features(&context(), &full_weather(), &empty, assessment_date())
            .unwrap();

        assert!(record.degraded_inputs);
        assert!(record.substituted_fields.contains(&"ndvi".to_string()));
        // DEFAULT_NDVI = 0.5 raw, normalized to 0.75
        assert!((record.ndvi - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_missing_weather_readings_substitute_defaults() {
        let fuser = FeatureFuser::new();
        let sparse = WeatherObservation::empty(Utc.with_ymd_and_hms(2024, 6, 15, 6, 0, 0).unwrap());
        let record = fuser
            .prepare_features(&context(), &sparse, &full_satellite(), assessment_date())
            .unwrap();

        assert!(record.degraded_inputs);
        assert!(record
            .substituted_fields
            .contains(&"humidity_percent".to_string()));
        assert!((record.humidity - 0.6).abs() < 1e-9);
        assert!((record.temperature - 0.4).abs() < 1e-9);
        assert_eq!(record.precipitation, 0.0);
    }

    #[test]
    fn test_future_planting_date_rejected() {
        let fuser = FeatureFuser::new();
        let future = CropContext::new(
            "wheat",
            "loam",
            None,
            NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
        );
        let result =
            fuser.prepare_features(&future, &full_weather(), &full_satellite(), assessment_date());

        match result {
            Err(AppError::InvalidInput { field, .. }) => assert_eq!(field, "planting_date"),
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_crop_type_rejected() {
        let fuser = FeatureFuser::new();
        let bad = CropContext::new(
            " ",
            "loam",
            None,
            NaiveDate::from_ymd_opt(2024, 5, 16).unwrap(),
        );
        let result =
            fuser.prepare_features(&bad, &full_weather(), &full_satellite(), assessment_date());
        assert!(matches!(
            result,
            Err(AppError::InvalidInput { field, .. }) if field == "crop_type"
        ));
    }

    #[test]
    fn test_normalization_clamps_extremes() {
        let fuser = FeatureFuser::new();
        let mut weather = full_weather();
        weather.temperature_celsius = Some(55.0);
        weather.precipitation_mm = Some(120.0);
        weather.wind_speed_mps = Some(45.0);
        let satellite = VegetationIndices::new(weather.timestamp).with_index("ndvi", 1.8);

        let record = fuser
            .prepare_features(&context(), &weather, &satellite, assessment_date())
            .unwrap();
        assert_eq!(record.temperature, 1.0);
        assert_eq!(record.precipitation, 1.0);
        assert_eq!(record.wind_speed, 1.0);
        assert_eq!(record.ndvi, 1.0);
        assert!(record.contract_violation().is_none());
    }

    #[test]
    fn test_unknown_index_names_pass_through_clamped() {
        let fuser = FeatureFuser::new();
        let satellite = VegetationIndices::new(Utc.with_ymd_and_hms(2024, 6, 14, 10, 0, 0).unwrap())
            .with_index("ndvi", 0.3)
            .with_index("leaf_wetness", 0.8);
        let record = fuser
            .prepare_features(&context(), &full_weather(), &satellite, assessment_date())
            .unwrap();
        assert_eq!(record.vegetation.get("leaf_wetness"), Some(&0.8));
    }

    #[test]
    fn test_fusion_is_pure() {
        let fuser = FeatureFuser::new();
        let a = fuser
            .prepare_features(&context(), &full_weather(), &full_satellite(), assessment_date())
            .unwrap();
        let b = fuser
            .prepare_features(&context(), &full_weather(), &full_satellite(), assessment_date())
            .unwrap();
        assert_eq!(a.humidity, b.humidity);
        assert_eq!(a.substituted_fields, b.substituted_fields);
    }
}
