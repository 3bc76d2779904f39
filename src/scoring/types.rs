use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_GEO_WEIGHT, DEFAULT_KEYWORD_WEIGHT, DEFAULT_MATERIAL_WEIGHT, DEFAULT_SECTOR_WEIGHT,
    HIGH_RISK_THRESHOLD, MEDIUM_RISK_THRESHOLD,
};
use crate::model::Regulation;

use super::error::ScoringError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
/// Categorical risk derived only from `total_score`.
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Classifies a total score: `>= 0.7` high, `>= 0.4` medium, otherwise low.
    pub fn from_score(total_score: f64) -> Self {
        if total_score >= HIGH_RISK_THRESHOLD {
            RiskLevel::High
        } else if total_score >= MEDIUM_RISK_THRESHOLD {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
/// Maximum contribution of each factor to the total score.
pub struct FactorWeights {
    pub geo: f64,
    pub sector: f64,
    pub keyword: f64,
    pub material: f64,
}

impl Default for FactorWeights {
    fn default() -> Self {
        Self {
            geo: DEFAULT_GEO_WEIGHT,
            sector: DEFAULT_SECTOR_WEIGHT,
            keyword: DEFAULT_KEYWORD_WEIGHT,
            material: DEFAULT_MATERIAL_WEIGHT,
        }
    }
}

impl FactorWeights {
    pub fn new(geo: f64, sector: f64, keyword: f64, material: f64) -> Self {
        Self {
            geo,
            sector,
            keyword,
            material,
        }
    }

    /// Every weight must be finite and within `[0.0, 1.0]`.
    ///
    /// The sum may exceed 1.0; the total score is capped instead.
    pub fn validate(&self) -> Result<(), ScoringError> {
        for (factor, value) in [
            ("geo", self.geo),
            ("sector", self.sector),
            ("keyword", self.keyword),
            ("material", self.material),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ScoringError::InvalidWeight { factor, value });
            }
        }
        Ok(())
    }

    pub fn sum(&self) -> f64 {
        self.geo + self.sector + self.keyword + self.material
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Normalized terms that matched, per factor.
pub struct FactorMatches {
    pub countries: Vec<String>,
    pub sectors: Vec<String>,
    pub keywords: Vec<String>,
    pub materials: Vec<String>,
}

impl FactorMatches {
    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
            && self.sectors.is_empty()
            && self.keywords.is_empty()
            && self.materials.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Outcome of scoring one regulation against one profile.
pub struct ScoreResult {
    pub geo_score: f64,
    pub sector_score: f64,
    pub keyword_score: f64,
    pub material_score: f64,
    /// Sum of the factor scores, capped to `[0.0, 1.0]`.
    pub total_score: f64,
    pub risk_level: RiskLevel,
    pub matches: FactorMatches,
}

impl ScoreResult {
    /// Zero score across all factors.
    pub fn zero() -> Self {
        Self {
            geo_score: 0.0,
            sector_score: 0.0,
            keyword_score: 0.0,
            material_score: 0.0,
            total_score: 0.0,
            risk_level: RiskLevel::Low,
            matches: FactorMatches::default(),
        }
    }
}

impl std::fmt::Display for ScoreResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (total: {:.4}, geo: {:.4}, sector: {:.4}, keyword: {:.4}, material: {:.4})",
            self.risk_level,
            self.total_score,
            self.geo_score,
            self.sector_score,
            self.keyword_score,
            self.material_score
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
/// A regulation with its score and position in a ranking.
pub struct RankedRegulation {
    /// 1-based position after sorting.
    pub position: usize,
    /// Index in the input collection; breaks ties.
    pub input_index: usize,
    pub regulation: Regulation,
    pub score: ScoreResult,
}
