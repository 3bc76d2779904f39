use super::error::ScoringError;
use super::normalize::LabelSet;
use super::scorer::{RelevanceScorer, factor_score, weighted_ratio};
use super::types::{FactorWeights, RiskLevel, ScoreResult};
use crate::model::{CompanyProfile, Regulation};

const EPSILON: f64 = 1e-9;

fn automotive_profile() -> CompanyProfile {
    CompanyProfile::default()
        .with_sectors(["Automotive"])
        .with_geographical_presence(["France", "Germany"])
        .with_materials(["steel"])
        .with_keywords(["sealing", "vibration"])
}

fn sealing_regulation() -> Regulation {
    Regulation::new("EU2025_892")
        .with_countries(["France", "Germany", "Poland", "Spain"])
        .with_sectors(["Automotive", "Manufacturing"])
        .with_keywords(["sealing", "automotive", "rubber"])
}

fn pharma_regulation() -> Regulation {
    Regulation::new("EU2025_456")
        .with_text("PHARMACEUTICAL manufacturing standards for drug development.")
        .with_countries(["UE"])
        .with_sectors(["Pharmaceutical", "Healthcare"])
        .with_keywords(["pharmaceutical", "drugs", "clinical", "sterile", "GMP"])
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

#[test]
fn test_weighted_ratio_empty_denominator() {
    assert_eq!(weighted_ratio(0, 0, 0.3), 0.0);
    assert_eq!(weighted_ratio(3, 0, 0.3), 0.0);
}

#[test]
fn test_weighted_ratio_caps_at_weight() {
    assert!(approx(weighted_ratio(5, 2, 0.4), 0.4));
    assert!(approx(weighted_ratio(1, 4, 0.4), 0.1));
}

#[test]
fn test_factor_score_uses_regulation_denominator() {
    let company = LabelSet::from_labels(["France", "Germany"]);
    let regulation = LabelSet::from_labels(["france", "GERMANY", "Poland", "Spain"]);
    assert!(approx(factor_score(&company, &regulation, 0.3), 0.15));
}

#[test]
fn test_factor_score_empty_regulation_set() {
    let company = LabelSet::from_labels(["France"]);
    assert_eq!(factor_score(&company, &LabelSet::default(), 0.3), 0.0);
}

#[test]
fn test_concrete_medium_scenario() {
    let result = RelevanceScorer::default().score(&sealing_regulation(), &automotive_profile());

    assert!(approx(result.geo_score, 0.15));
    assert!(approx(result.sector_score, 0.20));
    assert!(approx(result.keyword_score, 0.10));
    assert_eq!(result.material_score, 0.0);
    assert!(approx(result.total_score, 0.45));
    assert_eq!(result.risk_level, RiskLevel::Medium);

    assert_eq!(result.matches.countries, vec!["france", "germany"]);
    assert_eq!(result.matches.sectors, vec!["automotive"]);
    assert_eq!(result.matches.keywords, vec!["sealing"]);
    assert!(result.matches.materials.is_empty());
}

#[test]
fn test_concrete_pharma_scenario_scores_zero() {
    let result = RelevanceScorer::default().score(&pharma_regulation(), &automotive_profile());
    assert_eq!(result.total_score, 0.0);
    assert_eq!(result.risk_level, RiskLevel::Low);
    assert!(result.matches.is_empty());
}

#[test]
fn test_untagged_regulation_scores_zero_even_with_matching_text() {
    let regulation = Regulation::new("R")
        .with_text("France Germany automotive sealing vibration steel");
    let result = RelevanceScorer::default().score(&regulation, &automotive_profile());
    assert_eq!(result, ScoreResult::zero());
}

#[test]
fn test_empty_profile_scores_zero() {
    let result = RelevanceScorer::default().score(&sealing_regulation(), &CompanyProfile::default());
    assert_eq!(result.total_score, 0.0);
    assert_eq!(result.risk_level, RiskLevel::Low);
}

#[test]
fn test_keyword_text_scan_widens_matches() {
    let regulation = sealing_regulation().with_text("Covers vibration control components.");
    let scorer = RelevanceScorer::default();

    let with_scan = scorer.score(&regulation, &automotive_profile());
    // sealing (tagged) + vibration (body) over 3 tags + 1 body hit
    assert!(approx(with_scan.keyword_score, 0.30 * 2.0 / 4.0));
    assert_eq!(with_scan.matches.keywords, vec!["sealing", "vibration"]);

    let without_scan = scorer
        .clone()
        .with_text_scan(false)
        .score(&regulation, &automotive_profile());
    assert!(approx(without_scan.keyword_score, 0.10));
}

#[test]
fn test_tagging_a_body_hit_keeps_keyword_score() {
    let scorer = RelevanceScorer::default();
    let profile = automotive_profile();

    let body_only = sealing_regulation().with_text("vibration");
    let tagged = sealing_regulation()
        .with_text("vibration")
        .with_keywords(["sealing", "automotive", "rubber", "vibration"]);

    let a = scorer.score(&body_only, &profile);
    let b = scorer.score(&tagged, &profile);
    assert!(b.keyword_score >= a.keyword_score - EPSILON);
}

#[test]
fn test_material_matches_keyword_or_body() {
    let profile = automotive_profile().with_materials(["steel", "natural_rubber", "aluminum"]);
    let regulation = sealing_regulation()
        .with_keywords(["sealing", "steel"])
        .with_text("Components made of Natural Rubber.");

    let result = RelevanceScorer::default().score(&regulation, &profile);
    assert!(approx(result.material_score, 0.15 * 2.0 / 3.0));
    assert_eq!(result.matches.materials, vec!["natural rubber", "steel"]);
}

#[test]
fn test_total_is_capped_at_one() {
    let profile = CompanyProfile::default()
        .with_sectors(["Automotive"])
        .with_geographical_presence(["France"])
        .with_materials(["steel"])
        .with_keywords(["steel"]);
    let regulation = Regulation::new("R")
        .with_countries(["France"])
        .with_sectors(["Automotive"])
        .with_keywords(["steel"]);

    let result = RelevanceScorer::default().score(&regulation, &profile);
    // 0.30 + 0.40 + 0.30 + 0.15 = 1.15 before the cap
    assert_eq!(result.total_score, 1.0);
    assert_eq!(result.risk_level, RiskLevel::High);
}

#[test]
fn test_risk_level_thresholds() {
    assert_eq!(RiskLevel::from_score(0.0), RiskLevel::Low);
    assert_eq!(RiskLevel::from_score(0.399), RiskLevel::Low);
    assert_eq!(RiskLevel::from_score(0.4), RiskLevel::Medium);
    assert_eq!(RiskLevel::from_score(0.699), RiskLevel::Medium);
    assert_eq!(RiskLevel::from_score(0.7), RiskLevel::High);
    assert_eq!(RiskLevel::from_score(1.0), RiskLevel::High);
}

#[test]
fn test_risk_level_serde_and_display() {
    assert_eq!(
        serde_json::to_string(&RiskLevel::Medium).expect("serialize"),
        "\"MEDIUM\""
    );
    assert_eq!(format!("{}", RiskLevel::High), "HIGH");
    assert!(RiskLevel::High > RiskLevel::Medium);
}

#[test]
fn test_custom_weights_are_respected() {
    let scorer = RelevanceScorer::new(FactorWeights::new(0.25, 0.35, 0.25, 0.15)).expect("valid");
    let result = scorer.score(&sealing_regulation(), &automotive_profile());
    assert!(approx(result.geo_score, 0.125));
    assert!(approx(result.sector_score, 0.175));
}

#[test]
fn test_invalid_weights_rejected() {
    let err = RelevanceScorer::new(FactorWeights::new(-0.1, 0.4, 0.3, 0.15)).unwrap_err();
    assert_eq!(
        err,
        ScoringError::InvalidWeight {
            factor: "geo",
            value: -0.1
        }
    );

    assert!(RelevanceScorer::new(FactorWeights::new(0.3, f64::NAN, 0.3, 0.15)).is_err());
    assert!(RelevanceScorer::new(FactorWeights::new(0.3, 0.4, 1.5, 0.15)).is_err());
}

#[test]
fn test_default_weights_sum() {
    assert!(approx(FactorWeights::default().sum(), 1.15));
}

#[test]
fn test_scoring_is_idempotent() {
    let scorer = RelevanceScorer::default();
    let regulation = sealing_regulation().with_text("vibration dampers in steel");
    let profile = automotive_profile();

    let first = scorer.score(&regulation, &profile);
    let second = scorer.score(&regulation, &profile);
    assert_eq!(first.total_score.to_bits(), second.total_score.to_bits());
    assert_eq!(first, second);
}

#[test]
fn test_rank_sorts_descending_with_stable_ties() {
    let scorer = RelevanceScorer::default();
    let regulations = vec![
        pharma_regulation(),
        sealing_regulation(),
        Regulation::new("TIE_A"),
        Regulation::new("TIE_B"),
    ];

    let ranked = scorer.rank(&regulations, &automotive_profile());
    let ids: Vec<_> = ranked.iter().map(|r| r.regulation.id.as_str()).collect();
    assert_eq!(ids, vec!["EU2025_892", "EU2025_456", "TIE_A", "TIE_B"]);

    let positions: Vec<_> = ranked.iter().map(|r| r.position).collect();
    assert_eq!(positions, vec![1, 2, 3, 4]);
    assert_eq!(ranked[0].input_index, 1);
}

#[test]
fn test_rank_empty_collection() {
    assert!(
        RelevanceScorer::default()
            .rank(&[], &automotive_profile())
            .is_empty()
    );
}

#[test]
fn test_score_result_display() {
    let result = RelevanceScorer::default().score(&sealing_regulation(), &automotive_profile());
    let text = result.to_string();
    assert!(text.starts_with("MEDIUM"));
    assert!(text.contains("0.4500"));
}
