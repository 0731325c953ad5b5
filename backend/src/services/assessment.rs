//! Assessment orchestration
//!
//! Composes the data providers, feature fuser, inference engine and
//! recommendation policy into one request-scoped operation. Validation runs
//! first, before any provider is contacted; a provider failure fails the
//! whole request with no partial assessment.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::{
    validate_identifier, validate_planting_date, CropContext, DiseaseRisk, GpsCoordinates,
    Recommendation, RiskLevel, VegetationIndices, WeatherObservation,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::external::{SatelliteProvider, WeatherProvider};
use crate::services::{FeatureFuser, RecommendationPolicy, RiskInferenceEngine};

/// Raw assessment request as received from the caller.
///
/// Mandatory fields are optional here so validation can report the first
/// missing field explicitly instead of failing opaquely during parsing.
#[derive(Debug, Deserialize)]
pub struct AssessmentRequest {
    pub crop_type: Option<String>,
    pub location: Option<LocationInput>,
    pub planting_date: Option<chrono::NaiveDate>,
    pub soil_type: Option<String>,
    pub current_stage: Option<String>,
}

/// Caller-supplied coordinates
#[derive(Debug, Deserialize, Validate)]
pub struct LocationInput {
    #[validate(range(min = -90.0, max = 90.0, message = "must be between -90 and 90 degrees"))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0, message = "must be between -180 and 180 degrees"))]
    pub longitude: f64,
}

/// A fully validated request, ready for the pipeline.
#[derive(Debug, Clone)]
struct ValidatedRequest {
    location: GpsCoordinates,
    context: CropContext,
}

impl AssessmentRequest {
    /// Validate mandatory fields in a stable order and produce the typed
    /// request. Fails with the first missing or malformed field.
    fn validate(self, assessment_date: chrono::NaiveDate) -> AppResult<ValidatedRequest> {
        let crop_type = self
            .crop_type
            .ok_or_else(|| AppError::invalid_input("crop_type", "Missing required field"))?;
        validate_identifier(&crop_type).map_err(|e| AppError::invalid_input("crop_type", e))?;

        let location = self
            .location
            .ok_or_else(|| AppError::invalid_input("location", "Missing required field"))?;
        if let Err(errors) = location.validate() {
            if let Some((field, field_errors)) = errors.field_errors().iter().next() {
                let message = field_errors
                    .first()
                    .and_then(|e| e.message.as_ref())
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "is out of range".to_string());
                return Err(AppError::invalid_input(format!("location.{field}"), message));
            }
            return Err(AppError::invalid_input("location", "Invalid coordinates"));
        }

        let planting_date = self
            .planting_date
            .ok_or_else(|| AppError::invalid_input("planting_date", "Missing required field"))?;
        validate_planting_date(planting_date, assessment_date)
            .map_err(|e| AppError::invalid_input("planting_date", e))?;

        let soil_type = self
            .soil_type
            .ok_or_else(|| AppError::invalid_input("soil_type", "Missing required field"))?;
        validate_identifier(&soil_type).map_err(|e| AppError::invalid_input("soil_type", e))?;

        Ok(ValidatedRequest {
            location: GpsCoordinates::new(location.latitude, location.longitude),
            context: CropContext::new(crop_type, soil_type, self.current_stage, planting_date),
        })
    }
}

/// Assembled assessment response
#[derive(Debug, Serialize)]
pub struct AssessmentResponse {
    pub request_id: Uuid,
    pub risk_score: f64,
    pub risk_level: RiskLevel,
    pub predicted_diseases: Vec<DiseaseRisk>,
    pub confidence: f64,
    pub weather_data: WeatherObservation,
    pub satellite_data: VegetationIndices,
    pub recommendations: Vec<Recommendation>,
    pub model_version: String,
    pub timestamp: DateTime<Utc>,
}

/// Orchestrates one assessment per request.
///
/// All collaborators are injected at construction; this is the only
/// component that talks to the external data providers.
pub struct AssessmentOrchestrator {
    weather: Arc<dyn WeatherProvider>,
    satellite: Arc<dyn SatelliteProvider>,
    fuser: FeatureFuser,
    engine: RiskInferenceEngine,
    policy: RecommendationPolicy,
}

impl AssessmentOrchestrator {
    pub fn new(
        weather: Arc<dyn WeatherProvider>,
        satellite: Arc<dyn SatelliteProvider>,
        fuser: FeatureFuser,
        engine: RiskInferenceEngine,
        policy: RecommendationPolicy,
    ) -> Self {
        Self {
            weather,
            satellite,
            fuser,
            engine,
            policy,
        }
    }

    /// Run the full assessment pipeline for one request.
    pub async fn assess(&self, request: AssessmentRequest) -> AppResult<AssessmentResponse> {
        let now = Utc::now();
        let request = request.validate(now.date_naive())?;

        let request_id = Uuid::new_v4();
        tracing::info!(
            %request_id,
            crop_type = %request.context.crop_type,
            latitude = request.location.latitude,
            longitude = request.location.longitude,
            "Processing assessment request"
        );

        // The two fetches have no data dependency; issue them concurrently
        // and join before fusion.
        let (weather, satellite) = tokio::join!(
            self.weather
                .current_weather(request.location.latitude, request.location.longitude),
            self.satellite
                .vegetation_indices(request.location.latitude, request.location.longitude),
        );
        let weather = weather?;
        let satellite = satellite?;

        let features =
            self.fuser
                .prepare_features(&request.context, &weather, &satellite, now.date_naive())?;
        if features.degraded_inputs {
            tracing::warn!(
                %request_id,
                substituted = ?features.substituted_fields,
                "Assessment running on degraded inputs"
            );
        }

        let assessment = self.engine.predict(&features)?;
        let recommendations = self.policy.generate(
            &assessment,
            &request.context.crop_type,
            &request.context.growth_stage,
        );

        tracing::info!(
            %request_id,
            risk_score = assessment.risk_score,
            risk_level = %assessment.risk_level,
            "Assessment completed"
        );

        Ok(AssessmentResponse {
            request_id,
            risk_score: assessment.risk_score,
            risk_level: assessment.risk_level,
            predicted_diseases: assessment.diseases,
            confidence: assessment.confidence,
            weather_data: weather,
            satellite_data: satellite,
            recommendations,
            model_version: self.engine.model_version().to_string(),
            timestamp: now,
        })
    }
}
