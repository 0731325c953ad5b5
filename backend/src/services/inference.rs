//! Risk inference engine
//!
//! Wraps the pluggable risk model behind a stable contract: validates the
//! incoming feature record, bands the continuous score into a risk level,
//! orders the candidate diseases and applies the confidence policy for
//! degraded inputs.

use std::sync::Arc;

use shared::{FeatureRecord, RiskAssessment, RiskLevel};

use crate::error::{AppError, AppResult};
use crate::model::RiskModel;

/// Upper bound on reported confidence when the feature record was fused
/// with substituted defaults.
const DEGRADED_CONFIDENCE_CAP: f64 = 0.7;

/// Inference over a model selected at startup.
///
/// The model artifact is read-only after initialization and shared across
/// requests without locking.
#[derive(Clone)]
pub struct RiskInferenceEngine {
    model: Arc<dyn RiskModel>,
}

impl RiskInferenceEngine {
    pub fn new(model: Arc<dyn RiskModel>) -> Self {
        Self { model }
    }

    /// Version string of the active model.
    pub fn model_version(&self) -> &str {
        self.model.version()
    }

    /// Produce a risk assessment from a fused feature record.
    ///
    /// A record violating the feature contract is an internal integration
    /// fault (`FeatureContract`), not a caller error: the fuser guarantees
    /// well-formed records for valid requests.
    pub fn predict(&self, features: &FeatureRecord) -> AppResult<RiskAssessment> {
        if let Some(violation) = features.contract_violation() {
            return Err(AppError::FeatureContract(violation));
        }

        let output = self.model.infer(features);

        if !output.risk_score.is_finite() {
            return Err(AppError::Internal(
                "model returned a non-finite risk score".to_string(),
            ));
        }
        let risk_score = output.risk_score.clamp(0.0, 1.0);

        let mut diseases = output.diseases;
        diseases.sort_by(|a, b| {
            b.likelihood
                .partial_cmp(&a.likelihood)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        if risk_score > 0.0 && diseases.is_empty() {
            return Err(AppError::Internal(
                "model returned no disease candidates for a nonzero risk score".to_string(),
            ));
        }

        let mut confidence = output.certainty.clamp(0.0, 1.0);
        if features.degraded_inputs {
            confidence = confidence.min(DEGRADED_CONFIDENCE_CAP);
        }

        Ok(RiskAssessment {
            risk_score,
            risk_level: RiskLevel::from_score(risk_score),
            diseases,
            confidence,
        })
    }
}
