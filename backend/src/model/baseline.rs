//! Statistical baseline risk model
//!
//! A deterministic weighted scoring model over the normalized feature
//! record. Disease pressure rises with humidity, temperatures near the
//! pathogen optimum, sustained wetness, canopy stress (depressed NDVI) and
//! stage susceptibility. Candidate diseases come from a per-crop catalog and
//! are scored by how well current conditions match each pathogen's
//! environmental preferences.

use shared::{DiseaseRisk, FeatureRecord};

use crate::error::{AppError, AppResult};

use super::{ModelOutput, RiskModel};

/// Factor weights. All features are normalized to [0, 1], so the weighted
/// sum stays in [0, 1] as long as the weights sum to 1.
#[derive(Debug, Clone, Copy)]
struct Weights {
    humidity: f64,
    temperature_band: f64,
    wetness: f64,
    canopy_stress: f64,
    stage_susceptibility: f64,
}

const WEIGHTS: Weights = Weights {
    humidity: 0.30,
    temperature_band: 0.20,
    wetness: 0.15,
    canopy_stress: 0.20,
    stage_susceptibility: 0.15,
};

/// Environmental preferences of a candidate disease, in normalized feature
/// space.
struct DiseaseProfile {
    name: &'static str,
    humidity_pref: f64,
    temperature_pref: f64,
    wetness_pref: f64,
}

const WHEAT_DISEASES: &[DiseaseProfile] = &[
    DiseaseProfile { name: "Leaf rust", humidity_pref: 0.80, temperature_pref: 0.55, wetness_pref: 0.40 },
    DiseaseProfile { name: "Powdery mildew", humidity_pref: 0.90, temperature_pref: 0.45, wetness_pref: 0.20 },
    DiseaseProfile { name: "Septoria leaf blotch", humidity_pref: 0.85, temperature_pref: 0.50, wetness_pref: 0.70 },
    DiseaseProfile { name: "Fusarium head blight", humidity_pref: 0.90, temperature_pref: 0.60, wetness_pref: 0.80 },
];

const RICE_DISEASES: &[DiseaseProfile] = &[
    DiseaseProfile { name: "Rice blast", humidity_pref: 0.90, temperature_pref: 0.55, wetness_pref: 0.70 },
    DiseaseProfile { name: "Bacterial leaf blight", humidity_pref: 0.85, temperature_pref: 0.65, wetness_pref: 0.80 },
    DiseaseProfile { name: "Sheath blight", humidity_pref: 0.95, temperature_pref: 0.60, wetness_pref: 0.60 },
    DiseaseProfile { name: "Brown spot", humidity_pref: 0.80, temperature_pref: 0.55, wetness_pref: 0.40 },
];

const MAIZE_DISEASES: &[DiseaseProfile] = &[
    DiseaseProfile { name: "Northern corn leaf blight", humidity_pref: 0.85, temperature_pref: 0.45, wetness_pref: 0.60 },
    DiseaseProfile { name: "Gray leaf spot", humidity_pref: 0.90, temperature_pref: 0.55, wetness_pref: 0.50 },
    DiseaseProfile { name: "Common rust", humidity_pref: 0.80, temperature_pref: 0.40, wetness_pref: 0.40 },
];

const POTATO_DISEASES: &[DiseaseProfile] = &[
    DiseaseProfile { name: "Late blight", humidity_pref: 0.95, temperature_pref: 0.40, wetness_pref: 0.80 },
    DiseaseProfile { name: "Early blight", humidity_pref: 0.80, temperature_pref: 0.55, wetness_pref: 0.50 },
    DiseaseProfile { name: "Black scurf", humidity_pref: 0.70, temperature_pref: 0.35, wetness_pref: 0.60 },
];

const TOMATO_DISEASES: &[DiseaseProfile] = &[
    DiseaseProfile { name: "Late blight", humidity_pref: 0.95, temperature_pref: 0.45, wetness_pref: 0.80 },
    DiseaseProfile { name: "Early blight", humidity_pref: 0.80, temperature_pref: 0.55, wetness_pref: 0.50 },
    DiseaseProfile { name: "Septoria leaf spot", humidity_pref: 0.85, temperature_pref: 0.50, wetness_pref: 0.70 },
    DiseaseProfile { name: "Fusarium wilt", humidity_pref: 0.70, temperature_pref: 0.65, wetness_pref: 0.40 },
];

const COFFEE_DISEASES: &[DiseaseProfile] = &[
    DiseaseProfile { name: "Coffee leaf rust", humidity_pref: 0.85, temperature_pref: 0.45, wetness_pref: 0.60 },
    DiseaseProfile { name: "Coffee berry disease", humidity_pref: 0.90, temperature_pref: 0.40, wetness_pref: 0.70 },
];

/// Fallback catalog for crops without a dedicated entry; the open crop
/// vocabulary must still yield a ranked candidate list.
const GENERIC_DISEASES: &[DiseaseProfile] = &[
    DiseaseProfile { name: "Fungal leaf spot", humidity_pref: 0.85, temperature_pref: 0.50, wetness_pref: 0.60 },
    DiseaseProfile { name: "Powdery mildew", humidity_pref: 0.90, temperature_pref: 0.45, wetness_pref: 0.20 },
    DiseaseProfile { name: "Root rot", humidity_pref: 0.75, temperature_pref: 0.40, wetness_pref: 0.90 },
];

/// Maximum number of candidate diseases reported per assessment.
const MAX_CANDIDATES: usize = 4;

/// Statistical baseline implementation of [`RiskModel`].
pub struct BaselineRiskModel {
    weights: Weights,
    version: String,
}

impl BaselineRiskModel {
    /// Load the embedded model coefficients.
    ///
    /// Fails with `ModelUnavailable` if the coefficients are unusable; this
    /// is fatal at startup, never a per-request condition.
    pub fn load() -> AppResult<Self> {
        let w = WEIGHTS;
        let sum =
            w.humidity + w.temperature_band + w.wetness + w.canopy_stress + w.stage_susceptibility;
        if (sum - 1.0).abs() > 1e-9 {
            return Err(AppError::ModelUnavailable(format!(
                "factor weights sum to {sum}, expected 1.0"
            )));
        }

        Ok(Self {
            weights: w,
            version: "baseline-1.0.0".to_string(),
        })
    }

    /// Susceptibility by growth stage. Open vocabulary: unknown stages get
    /// the vegetative default rather than an error.
    fn stage_susceptibility(stage: &str) -> f64 {
        match stage.to_ascii_lowercase().as_str() {
            "flowering" => 1.0,
            "fruiting" | "grain_filling" => 0.85,
            "seedling" => 0.7,
            "maturity" | "ripening" => 0.5,
            _ => 0.6,
        }
    }

    /// Proximity of the current temperature to the pathogen-favorable band
    /// centered on normalized 0.5 (25 degrees C).
    fn temperature_band(temperature: f64) -> f64 {
        (1.0 - (temperature - 0.5).abs() * 2.0).clamp(0.0, 1.0)
    }

    fn factors(&self, features: &FeatureRecord) -> [f64; 5] {
        [
            features.humidity,
            Self::temperature_band(features.temperature),
            features.precipitation,
            1.0 - features.ndvi,
            Self::stage_susceptibility(&features.growth_stage),
        ]
    }

    fn catalog(crop_type: &str) -> &'static [DiseaseProfile] {
        match crop_type.to_ascii_lowercase().as_str() {
            "wheat" => WHEAT_DISEASES,
            "rice" => RICE_DISEASES,
            "maize" | "corn" => MAIZE_DISEASES,
            "potato" => POTATO_DISEASES,
            "tomato" => TOMATO_DISEASES,
            "coffee" => COFFEE_DISEASES,
            _ => GENERIC_DISEASES,
        }
    }

    /// How well current conditions match a pathogen's preferences.
    fn affinity(profile: &DiseaseProfile, features: &FeatureRecord) -> f64 {
        let humidity_match = 1.0 - (features.humidity - profile.humidity_pref).abs();
        let temperature_match = 1.0 - (features.temperature - profile.temperature_pref).abs();
        let wetness_match = 1.0 - (features.precipitation - profile.wetness_pref).abs();

        (0.5 * humidity_match + 0.3 * temperature_match + 0.2 * wetness_match).clamp(0.0, 1.0)
    }

    fn rank_diseases(&self, risk_score: f64, features: &FeatureRecord) -> Vec<DiseaseRisk> {
        if risk_score <= 0.0 {
            return Vec::new();
        }

        let mut candidates: Vec<DiseaseRisk> = Self::catalog(&features.crop_type)
            .iter()
            .map(|profile| DiseaseRisk {
                name: profile.name.to_string(),
                likelihood: (risk_score * (0.55 + 0.45 * Self::affinity(profile, features)))
                    .min(0.99),
            })
            .collect();

        candidates.sort_by(|a, b| {
            b.likelihood
                .partial_cmp(&a.likelihood)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        candidates.truncate(MAX_CANDIDATES);
        candidates
    }
}

impl RiskModel for BaselineRiskModel {
    fn infer(&self, features: &FeatureRecord) -> ModelOutput {
        let [humidity, temperature_band, wetness, canopy_stress, stage] = self.factors(features);

        let w = &self.weights;
        let risk_score = (w.humidity * humidity
            + w.temperature_band * temperature_band
            + w.wetness * wetness
            + w.canopy_stress * canopy_stress
            + w.stage_susceptibility * stage)
            .clamp(0.0, 1.0);

        // Certainty drops when the factors disagree: a uniform signal is a
        // clearer prediction than a split one.
        let factors = [humidity, temperature_band, wetness, canopy_stress, stage];
        let mean = factors.iter().sum::<f64>() / factors.len() as f64;
        let dispersion =
            factors.iter().map(|f| (f - mean).abs()).sum::<f64>() / factors.len() as f64;
        let certainty = (0.92 - 0.45 * dispersion).clamp(0.5, 0.92);

        ModelOutput {
            risk_score,
            diseases: self.rank_diseases(risk_score, features),
            certainty,
        }
    }

    fn version(&self) -> &str {
        &self.version
    }
}
