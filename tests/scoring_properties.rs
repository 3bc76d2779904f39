//! Integration tests for scoring invariants.

mod common;

use common::fixtures::{
    FIXTURE_IDS, ProfileBuilder, RegulationBuilder, fixture_profile, fixture_regulations,
    walkthrough_pair,
};
use regrisk::model::{CompanyProfile, Regulation};
use regrisk::scoring::{FactorWeights, RelevanceScorer, RiskLevel};

const EPSILON: f64 = 1e-9;

fn broad_profile() -> CompanyProfile {
    ProfileBuilder::new()
        .sectors(&["automotive", "aerospace", "manufacturing"])
        .geography(&["France", "Germany", "Spain", "Poland"])
        .materials(&["steel", "natural_rubber"])
        .keywords(&["sealing", "vibration", "emissions"])
        .build()
}

#[test]
fn test_walkthrough_scenario() {
    let (regulation, profile) = walkthrough_pair();
    let result = RelevanceScorer::default().score(&regulation, &profile);

    assert!((result.geo_score - 0.15).abs() < EPSILON);
    assert!((result.sector_score - 0.20).abs() < EPSILON);
    assert!((result.keyword_score - 0.10).abs() < EPSILON);
    assert_eq!(result.material_score, 0.0);
    assert!((result.total_score - 0.45).abs() < EPSILON);
    assert_eq!(result.risk_level, RiskLevel::Medium);
}

#[test]
fn test_untagged_regulation_scores_zero_for_any_profile() {
    let regulation = RegulationBuilder::new()
        .text("Steel, sealing, vibration and emissions in France.")
        .build();

    for profile in [broad_profile(), fixture_profile(), ProfileBuilder::new().build()] {
        let result = RelevanceScorer::default().score(&regulation, &profile);
        assert_eq!(result.total_score, 0.0);
        assert_eq!(result.risk_level, RiskLevel::Low);
    }
}

#[test]
fn test_adding_matching_country_never_lowers_score() {
    let scorer = RelevanceScorer::default();
    let profile = broad_profile();
    let candidates = ["France", "Germany", "Spain", "Poland"];

    let mut countries: Vec<&str> = vec!["Italy"];
    let mut previous = 0.0;
    for country in candidates {
        countries.push(country);
        let regulation = RegulationBuilder::new()
            .countries(&countries)
            .sectors(&["automotive"])
            .build();
        let total = scorer.score(&regulation, &profile).total_score;
        assert!(total + EPSILON >= previous, "{countries:?}: {total} < {previous}");
        previous = total;
    }
}

#[test]
fn test_adding_matching_keyword_never_lowers_score() {
    let scorer = RelevanceScorer::default();
    let profile = broad_profile();

    for text in ["", "Vibration dampers and sealing systems."] {
        let mut keywords: Vec<&str> = vec!["pharmaceutical"];
        let mut previous = 0.0;
        for keyword in ["sealing", "vibration", "emissions", "steel"] {
            keywords.push(keyword);
            let regulation = RegulationBuilder::new().text(text).keywords(&keywords).build();
            let total = scorer.score(&regulation, &profile).total_score;
            assert!(total + EPSILON >= previous, "{keywords:?}: {total} < {previous}");
            previous = total;
        }
    }
}

#[test]
fn test_adding_matching_sector_never_lowers_score() {
    let scorer = RelevanceScorer::default();
    let profile = broad_profile();

    let mut sectors: Vec<&str> = vec!["banking", "insurance"];
    let mut previous = 0.0;
    for sector in ["automotive", "aerospace", "manufacturing"] {
        sectors.push(sector);
        let regulation = RegulationBuilder::new().sectors(&sectors).build();
        let total = scorer.score(&regulation, &profile).total_score;
        assert!(total + EPSILON >= previous, "{sectors:?}: {total} < {previous}");
        previous = total;
    }
}

#[test]
fn test_scores_stay_in_bounds() {
    let scorer = RelevanceScorer::default();
    let profile = fixture_profile();

    for regulation in fixture_regulations() {
        let result = scorer.score(&regulation, &profile);
        for factor in [
            result.geo_score,
            result.sector_score,
            result.keyword_score,
            result.material_score,
            result.total_score,
        ] {
            assert!((0.0..=1.0).contains(&factor), "{}: {factor}", regulation.id);
        }
        assert!(result.geo_score <= scorer.weights().geo + EPSILON);
        assert!(result.sector_score <= scorer.weights().sector + EPSILON);
        assert!(result.keyword_score <= scorer.weights().keyword + EPSILON);
        assert!(result.material_score <= scorer.weights().material + EPSILON);
    }
}

#[test]
fn test_full_overlap_is_capped_at_one() {
    let profile = broad_profile();
    let regulation = RegulationBuilder::new()
        .text("Natural rubber and steel.")
        .countries(&["France"])
        .sectors(&["automotive"])
        .keywords(&["sealing", "vibration", "emissions", "steel", "natural_rubber"])
        .build();

    let result = RelevanceScorer::default().score(&regulation, &profile);
    assert_eq!(result.total_score, 1.0);
    assert_eq!(result.risk_level, RiskLevel::High);
}

#[test]
fn test_matching_ignores_case_and_underscores() {
    let scorer = RelevanceScorer::default();
    let profile = ProfileBuilder::new()
        .sectors(&["Sealing_Systems"])
        .geography(&["united states"])
        .build();
    let regulation = RegulationBuilder::new()
        .countries(&["UNITED_STATES"])
        .sectors(&["sealing systems"])
        .build();

    let result = scorer.score(&regulation, &profile);
    assert!((result.geo_score - 0.30).abs() < EPSILON);
    assert!((result.sector_score - 0.40).abs() < EPSILON);
}

/// Applies `f` to every string a regulation carries.
fn map_regulation(regulation: &Regulation, f: impl Fn(&str) -> String) -> Regulation {
    let list = |items: &[String]| items.iter().map(|s| f(s.as_str())).collect::<Vec<_>>();
    Regulation {
        id: regulation.id.clone(),
        title: regulation.title.as_deref().map(&f),
        text: f(&regulation.text),
        countries: list(&regulation.countries),
        sectors: list(&regulation.sectors),
        keywords: list(&regulation.keywords),
        effective_date: regulation.effective_date.clone(),
        sanctions_text: regulation.sanctions_text.as_deref().map(&f),
        url: regulation.url.clone(),
    }
}

fn german_pair() -> (Regulation, CompanyProfile) {
    let regulation = RegulationBuilder::new()
        .text("Anforderungen an den Straßenbau und die Straße.")
        .countries(&["Deutschland"])
        .sectors(&["Straßenbau"])
        .keywords(&["straße"])
        .build();
    let profile = ProfileBuilder::new()
        .sectors(&["Straßenbau"])
        .geography(&["Deutschland"])
        .keywords(&["Straße"])
        .build();
    (regulation, profile)
}

#[test]
fn test_upper_cased_regulation_scores_identically() {
    let scorer = RelevanceScorer::default();
    let mut cases: Vec<(Regulation, CompanyProfile)> = fixture_regulations()
        .into_iter()
        .map(|regulation| (regulation, fixture_profile()))
        .collect();
    cases.push(german_pair());
    cases.push((german_pair().0, fixture_profile()));

    for (regulation, profile) in &cases {
        let original = scorer.score(regulation, profile);
        let upper = scorer.score(&map_regulation(regulation, str::to_uppercase), profile);
        assert_eq!(original, upper, "{}", regulation.id);
    }
}

#[test]
fn test_underscored_regulation_scores_identically() {
    let scorer = RelevanceScorer::default();
    let mut cases: Vec<(Regulation, CompanyProfile)> = fixture_regulations()
        .into_iter()
        .map(|regulation| (regulation, fixture_profile()))
        .collect();
    cases.push(german_pair());

    for (regulation, profile) in &cases {
        let original = scorer.score(regulation, profile);
        let spaced = scorer.score(&map_regulation(regulation, |s| s.replace('_', " ")), profile);
        let underscored =
            scorer.score(&map_regulation(regulation, |s| s.replace(' ', "_")), profile);
        assert_eq!(original, spaced, "{}", regulation.id);
        assert_eq!(
            original.total_score, underscored.total_score,
            "{}",
            regulation.id
        );
    }
}

#[test]
fn test_expanding_upper_case_keeps_risk_level() {
    let (regulation, profile) = german_pair();
    let scorer = RelevanceScorer::default();

    let original = scorer.score(&regulation, &profile);
    let upper = scorer.score(&map_regulation(&regulation, str::to_uppercase), &profile);

    assert_eq!(original.total_score, 1.0);
    assert_eq!(upper.total_score, 1.0);
    assert_eq!(upper.risk_level, RiskLevel::High);
}

#[test]
fn test_scoring_is_idempotent() {
    let scorer = RelevanceScorer::default();
    let profile = fixture_profile();

    for regulation in fixture_regulations() {
        let first = scorer.score(&regulation, &profile);
        let second = scorer.score(&regulation, &profile);
        assert_eq!(first, second);
        assert_eq!(first.total_score.to_bits(), second.total_score.to_bits());
    }
}

#[test]
fn test_fixture_ranking() {
    let ranked = RelevanceScorer::default().rank(&fixture_regulations(), &fixture_profile());

    let ids: Vec<&str> = ranked.iter().map(|r| r.regulation.id.as_str()).collect();
    assert_eq!(
        ids,
        [
            "32025R0892",
            "FAR145067",
            "32023R0956",
            "32025L0001",
            "32024R1347",
            "32025L0456",
        ]
    );

    let levels: Vec<RiskLevel> = ranked.iter().map(|r| r.score.risk_level).collect();
    assert_eq!(
        levels,
        [
            RiskLevel::High,
            RiskLevel::High,
            RiskLevel::Medium,
            RiskLevel::Low,
            RiskLevel::Low,
            RiskLevel::Low,
        ]
    );

    for entry in &ranked {
        assert_eq!(FIXTURE_IDS[entry.input_index], entry.regulation.id);
    }
}

#[test]
fn test_fixture_scores() {
    let ranked = RelevanceScorer::default().rank(&fixture_regulations(), &fixture_profile());
    let score_of = |id: &str| {
        ranked
            .iter()
            .find(|r| r.regulation.id == id)
            .map(|r| r.score.clone())
            .unwrap()
    };

    let sealing = score_of("32025R0892");
    assert!((sealing.geo_score - 0.24).abs() < EPSILON);
    assert!((sealing.keyword_score - 0.24).abs() < EPSILON);
    assert!((sealing.material_score - 0.15).abs() < EPSILON);
    assert_eq!(sealing.matches.keywords, ["emissions", "rubber", "sealing", "vibration"]);

    let cbam = score_of("32023R0956");
    assert!((cbam.total_score - 0.4125).abs() < EPSILON);
    assert_eq!(cbam.matches.materials, ["steel"]);

    assert_eq!(score_of("32025L0456").total_score, 0.0);
}

#[test]
fn test_disabling_text_scan_drops_body_hits() {
    let scorer = RelevanceScorer::default().with_text_scan(false);
    let ranked = scorer.rank(&fixture_regulations(), &fixture_profile());
    let sealing = ranked
        .iter()
        .find(|r| r.regulation.id == "32025R0892")
        .unwrap();

    assert!((sealing.score.keyword_score - 0.225).abs() < EPSILON);
    assert_eq!(sealing.score.matches.keywords, ["emissions", "rubber", "sealing"]);
}

#[test]
fn test_custom_weights() {
    let scorer = RelevanceScorer::new(FactorWeights::new(0.5, 0.5, 0.0, 0.0)).unwrap();
    let (regulation, profile) = walkthrough_pair();

    let result = scorer.score(&regulation, &profile);
    assert!((result.total_score - 0.5).abs() < EPSILON);
    assert_eq!(result.keyword_score, 0.0);
    assert_eq!(result.risk_level, RiskLevel::Medium);
}

#[test]
fn test_invalid_weights_rejected() {
    assert!(RelevanceScorer::new(FactorWeights::new(0.3, f64::NAN, 0.3, 0.15)).is_err());
    assert!(RelevanceScorer::new(FactorWeights::new(-0.1, 0.4, 0.3, 0.15)).is_err());
}
