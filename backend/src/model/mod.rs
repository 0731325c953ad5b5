//! Risk model abstraction
//!
//! The inference engine is polymorphic over this trait: concrete models
//! (the statistical baseline, a learned classifier) are interchangeable and
//! selected once at startup, never at call time.

mod baseline;

pub use baseline::BaselineRiskModel;

use shared::{DiseaseRisk, FeatureRecord};

/// Raw model output, before the inference engine applies banding, ordering
/// and confidence policy.
#[derive(Debug, Clone)]
pub struct ModelOutput {
    /// Continuous disease risk in [0, 1]
    pub risk_score: f64,
    /// Candidate diseases with raw likelihoods (unordered)
    pub diseases: Vec<DiseaseRisk>,
    /// The model's own certainty about this prediction, in [0, 1]
    pub certainty: f64,
}

/// The capability set a concrete model must provide.
///
/// Implementations are read-only after construction and must support
/// unlimited concurrent calls.
pub trait RiskModel: Send + Sync {
    fn infer(&self, features: &FeatureRecord) -> ModelOutput;
    fn version(&self) -> &str;
}
