//! Business logic services for the AgroLens risk service

pub mod assessment;
pub mod fusion;
pub mod inference;
pub mod recommendation;

pub use assessment::AssessmentOrchestrator;
pub use fusion::FeatureFuser;
pub use inference::RiskInferenceEngine;
pub use recommendation::RecommendationPolicy;
