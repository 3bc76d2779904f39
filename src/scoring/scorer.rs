use std::cmp::Ordering;
use tracing::{debug, info};

use crate::constants::MAX_TOTAL_SCORE;
use crate::model::{CompanyProfile, Regulation};

use super::error::ScoringError;
use super::normalize::{LabelSet, normalize_text};
use super::types::{FactorMatches, FactorWeights, RankedRegulation, RiskLevel, ScoreResult};

/// `weight * min(1, matched / denominator)`, or zero for an empty denominator.
///
/// Every factor reduces to this.
pub fn weighted_ratio(matched: usize, denominator: usize, weight: f64) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    weight * (matched as f64 / denominator as f64).min(1.0)
}

/// Set-overlap factor: share of the regulation's labels the company also carries.
pub fn factor_score(company: &LabelSet, regulation: &LabelSet, weight: f64) -> f64 {
    let matched = company.intersection(regulation).count();
    weighted_ratio(matched, regulation.len(), weight)
}

/// Normalized view of a [`CompanyProfile`], built once per scoring pass.
#[derive(Debug, Clone, Default)]
pub struct PreparedProfile {
    pub sectors: LabelSet,
    pub geography: LabelSet,
    pub materials: LabelSet,
    pub keywords: LabelSet,
}

impl PreparedProfile {
    pub fn new(profile: &CompanyProfile) -> Self {
        Self {
            sectors: LabelSet::from_labels(&profile.sectors),
            geography: LabelSet::from_labels(&profile.geographical_presence),
            materials: LabelSet::from_labels(&profile.materials),
            keywords: LabelSet::from_labels(&profile.keywords),
        }
    }
}

impl From<&CompanyProfile> for PreparedProfile {
    fn from(profile: &CompanyProfile) -> Self {
        Self::new(profile)
    }
}

/// Multi-factor relevance scorer.
///
/// Stateless apart from its weights: scoring the same pair twice yields identical results,
/// and neither input is modified.
#[derive(Debug, Clone)]
pub struct RelevanceScorer {
    weights: FactorWeights,
    scan_text: bool,
}

impl Default for RelevanceScorer {
    fn default() -> Self {
        Self {
            weights: FactorWeights::default(),
            scan_text: true,
        }
    }
}

impl RelevanceScorer {
    /// Creates a scorer with validated weights and body scanning enabled.
    pub fn new(weights: FactorWeights) -> Result<Self, ScoringError> {
        weights.validate()?;
        Ok(Self {
            weights,
            scan_text: true,
        })
    }

    /// Enables or disables keyword matching against the regulation body.
    pub fn with_text_scan(mut self, enabled: bool) -> Self {
        self.scan_text = enabled;
        self
    }

    pub fn weights(&self) -> &FactorWeights {
        &self.weights
    }

    pub fn scans_text(&self) -> bool {
        self.scan_text
    }

    /// Scores one regulation against one profile.
    pub fn score(&self, regulation: &Regulation, profile: &CompanyProfile) -> ScoreResult {
        self.score_prepared(regulation, &PreparedProfile::new(profile))
    }

    /// Scores against an already-normalized profile.
    pub fn score_prepared(&self, regulation: &Regulation, profile: &PreparedProfile) -> ScoreResult {
        let countries = LabelSet::from_labels(&regulation.countries);
        let sectors = LabelSet::from_labels(&regulation.sectors);
        let keywords = LabelSet::from_labels(&regulation.keywords);
        let text = normalize_text(&regulation.text);

        let mut matches = FactorMatches {
            countries: owned(profile.geography.intersection(&countries)),
            sectors: owned(profile.sectors.intersection(&sectors)),
            ..Default::default()
        };

        let geo_score = factor_score(&profile.geography, &countries, self.weights.geo);
        let sector_score = factor_score(&profile.sectors, &sectors, self.weights.sector);
        let keyword_score = self.keyword_score(profile, &keywords, &text, &mut matches);
        let material_score = self.material_score(profile, &keywords, &text, &mut matches);

        let total_score = (geo_score + sector_score + keyword_score + material_score)
            .clamp(0.0, MAX_TOTAL_SCORE);

        ScoreResult {
            geo_score,
            sector_score,
            keyword_score,
            material_score,
            total_score,
            risk_level: RiskLevel::from_score(total_score),
            matches,
        }
    }

    /// Keyword factor over the structured keyword set, widened by body hits.
    ///
    /// Company keywords found only in the body count toward both the numerator and the
    /// denominator, so tagging a keyword that was already found in the body leaves the
    /// score unchanged. An untagged regulation scores zero here.
    fn keyword_score(
        &self,
        profile: &PreparedProfile,
        keywords: &LabelSet,
        text: &str,
        matches: &mut FactorMatches,
    ) -> f64 {
        if keywords.is_empty() {
            return 0.0;
        }

        let mut hits = owned(profile.keywords.intersection(keywords));
        let structured = hits.len();

        if self.scan_text {
            hits.extend(
                profile
                    .keywords
                    .iter()
                    .filter(|keyword| !keywords.contains(keyword) && text.contains(keyword))
                    .map(str::to_string),
            );
        }

        let text_hits = hits.len() - structured;
        matches.keywords = hits;

        weighted_ratio(
            structured + text_hits,
            keywords.len() + text_hits,
            self.weights.keyword,
        )
    }

    /// Material factor: share of the company's materials the regulation tags or mentions.
    ///
    /// Regulations carry no material tags, so the keyword set stands in for them. An
    /// untagged regulation scores zero here.
    fn material_score(
        &self,
        profile: &PreparedProfile,
        keywords: &LabelSet,
        text: &str,
        matches: &mut FactorMatches,
    ) -> f64 {
        if keywords.is_empty() || profile.materials.is_empty() {
            return 0.0;
        }

        matches.materials = profile
            .materials
            .iter()
            .filter(|material| keywords.contains(material) || text.contains(material))
            .map(str::to_string)
            .collect();

        weighted_ratio(
            matches.materials.len(),
            profile.materials.len(),
            self.weights.material,
        )
    }

    /// Scores every regulation and sorts by `total_score` descending.
    ///
    /// The sort is stable, so equal scores keep their input order.
    pub fn rank(&self, regulations: &[Regulation], profile: &CompanyProfile) -> Vec<RankedRegulation> {
        let prepared = PreparedProfile::new(profile);

        let mut ranked: Vec<RankedRegulation> = regulations
            .iter()
            .enumerate()
            .map(|(input_index, regulation)| {
                let score = self.score_prepared(regulation, &prepared);
                debug!(
                    regulation_id = %regulation.id,
                    total_score = score.total_score,
                    risk_level = %score.risk_level,
                    "Scored regulation"
                );
                RankedRegulation {
                    position: 0,
                    input_index,
                    regulation: regulation.clone(),
                    score,
                }
            })
            .collect();

        ranked.sort_by(|a, b| {
            b.score
                .total_score
                .partial_cmp(&a.score.total_score)
                .unwrap_or(Ordering::Equal)
        });

        for (i, entry) in ranked.iter_mut().enumerate() {
            entry.position = i + 1;
        }

        info!(
            company = profile.display_name(),
            regulations = ranked.len(),
            top_score = ranked.first().map(|r| r.score.total_score).unwrap_or(0.0),
            "Ranking complete"
        );

        ranked
    }
}

fn owned<'a>(labels: impl Iterator<Item = &'a str>) -> Vec<String> {
    labels.map(str::to_string).collect()
}
