//! Recommendation policy
//!
//! Deterministic tiered rule engine mapping a risk assessment to an ordered
//! list of actions. Tiers are keyed by [`RiskLevel`], which carries the same
//! cutoffs used to band the risk score, so level banding and recommendation
//! tiers cannot disagree.

use shared::{Priority, Recommendation, RecommendationKind, RiskAssessment, RiskLevel};

/// Total, pure rule engine; never fails and never returns an empty list.
#[derive(Debug, Clone, Default)]
pub struct RecommendationPolicy;

impl RecommendationPolicy {
    pub fn new() -> Self {
        Self
    }

    /// Generate recommendations for an assessment, most urgent first.
    ///
    /// Crop type and growth stage are accepted for future per-crop
    /// specialization; unknown values fall back to the generic tier text
    /// rather than erroring.
    pub fn generate(
        &self,
        assessment: &RiskAssessment,
        _crop_type: &str,
        _growth_stage: &str,
    ) -> Vec<Recommendation> {
        match assessment.risk_level {
            RiskLevel::Severe => vec![
                Recommendation {
                    kind: RecommendationKind::Treatment,
                    action: "Apply preventive fungicide spray immediately".to_string(),
                    priority: Priority::Urgent,
                    timeframe: "within 24 hours".to_string(),
                },
                Recommendation {
                    kind: RecommendationKind::Monitoring,
                    action: "Increase field inspection frequency to twice daily".to_string(),
                    priority: Priority::High,
                    timeframe: "starting immediately".to_string(),
                },
            ],
            RiskLevel::High => vec![
                Recommendation {
                    kind: RecommendationKind::Preventive,
                    action: "Improve field drainage and air circulation".to_string(),
                    priority: Priority::High,
                    timeframe: "within 48 hours".to_string(),
                },
                Recommendation {
                    kind: RecommendationKind::Monitoring,
                    action: "Monitor for early disease symptoms".to_string(),
                    priority: Priority::Medium,
                    timeframe: "daily for next week".to_string(),
                },
            ],
            RiskLevel::Moderate => vec![
                Recommendation {
                    kind: RecommendationKind::Preventive,
                    action: "Adjust irrigation schedule to reduce humidity".to_string(),
                    priority: Priority::Medium,
                    timeframe: "within 3 days".to_string(),
                },
                Recommendation {
                    kind: RecommendationKind::Monitoring,
                    action: "Regular field inspection for disease signs".to_string(),
                    priority: Priority::Medium,
                    timeframe: "every 2-3 days".to_string(),
                },
            ],
            RiskLevel::Low => vec![Recommendation {
                kind: RecommendationKind::Monitoring,
                action: "Continue regular monitoring and good agricultural practices".to_string(),
                priority: Priority::Low,
                timeframe: "weekly".to_string(),
            }],
        }
    }
}
