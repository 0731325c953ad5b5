//! Recommendation models

use serde::{Deserialize, Serialize};

/// Kind of recommended action
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    Treatment,
    Preventive,
    Monitoring,
}

/// Recommendation priority, most urgent first
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Urgent,
    High,
    Medium,
    Low,
}

impl Priority {
    /// Rank for ordering checks; lower rank means more urgent.
    pub fn rank(self) -> u8 {
        match self {
            Priority::Urgent => 0,
            Priority::High => 1,
            Priority::Medium => 2,
            Priority::Low => 3,
        }
    }
}

/// An actionable recommendation produced for one assessment.
///
/// Never persisted or mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    pub action: String,
    pub priority: Priority,
    pub timeframe: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_rank_ordering() {
        assert!(Priority::Urgent.rank() < Priority::High.rank());
        assert!(Priority::High.rank() < Priority::Medium.rank());
        assert!(Priority::Medium.rank() < Priority::Low.rank());
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&RecommendationKind::Preventive).unwrap(),
            "\"preventive\""
        );
    }

    #[test]
    fn test_recommendation_serializes_kind_as_type() {
        let rec = Recommendation {
            kind: RecommendationKind::Monitoring,
            action: "Continue regular monitoring".to_string(),
            priority: Priority::Low,
            timeframe: "weekly".to_string(),
        };
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["type"], "monitoring");
        assert_eq!(json["priority"], "low");
    }
}
