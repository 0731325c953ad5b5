//! Agronomic context models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Default growth stage assumed when the caller does not supply one.
pub const DEFAULT_GROWTH_STAGE: &str = "vegetative";

/// Agronomic context for a field, supplied by the caller.
///
/// `crop_type` and `soil_type` are open vocabularies: unknown values are
/// passed through to the inference model rather than rejected here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CropContext {
    pub crop_type: String,
    pub soil_type: String,
    #[serde(default = "default_growth_stage")]
    pub growth_stage: String,
    pub planting_date: NaiveDate,
}

fn default_growth_stage() -> String {
    DEFAULT_GROWTH_STAGE.to_string()
}

impl CropContext {
    pub fn new(
        crop_type: impl Into<String>,
        soil_type: impl Into<String>,
        growth_stage: Option<String>,
        planting_date: NaiveDate,
    ) -> Self {
        Self {
            crop_type: crop_type.into(),
            soil_type: soil_type.into(),
            growth_stage: growth_stage.unwrap_or_else(default_growth_stage),
            planting_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_growth_stage_defaults_when_absent() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let context = CropContext::new("wheat", "loam", None, date);
        assert_eq!(context.growth_stage, "vegetative");
    }

    #[test]
    fn test_growth_stage_default_in_deserialization() {
        let json = r#"{"crop_type":"rice","soil_type":"clay","planting_date":"2024-05-01"}"#;
        let context: CropContext = serde_json::from_str(json).unwrap();
        assert_eq!(context.growth_stage, "vegetative");
    }

    #[test]
    fn test_explicit_growth_stage_kept() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let context = CropContext::new("wheat", "loam", Some("flowering".to_string()), date);
        assert_eq!(context.growth_stage, "flowering");
    }
}
