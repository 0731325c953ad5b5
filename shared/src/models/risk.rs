//! Risk assessment models

use serde::{Deserialize, Serialize};

/// Categorical risk banding of a continuous risk score
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    Severe,
}

impl RiskLevel {
    /// Band a risk score into a level using fixed closed lower bounds.
    ///
    /// These cutoffs double as the recommendation tier boundaries; the
    /// policy matches on `RiskLevel`, so the two cannot disagree.
    pub fn from_score(score: f64) -> Self {
        if score >= 0.8 {
            RiskLevel::Severe
        } else if score >= 0.6 {
            RiskLevel::High
        } else if score >= 0.4 {
            RiskLevel::Moderate
        } else {
            RiskLevel::Low
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "low"),
            RiskLevel::Moderate => write!(f, "moderate"),
            RiskLevel::High => write!(f, "high"),
            RiskLevel::Severe => write!(f, "severe"),
        }
    }
}

/// A candidate disease with its likelihood
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiseaseRisk {
    pub name: String,
    pub likelihood: f64,
}

/// The full risk assessment produced for one request.
///
/// Immutable once produced; `diseases` is ordered by likelihood descending
/// and is non-empty whenever `risk_score` is greater than zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub risk_score: f64,
    pub risk_level: RiskLevel,
    pub diseases: Vec<DiseaseRisk>,
    pub confidence: f64,
}
