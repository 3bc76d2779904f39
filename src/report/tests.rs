use super::*;
use crate::model::Regulation;
use crate::scoring::RelevanceScorer;

fn profile() -> CompanyProfile {
    CompanyProfile::default()
        .with_name("Acme Tyres")
        .with_sectors(["automotive", "manufacturing"])
        .with_geographical_presence(["France", "Germany"])
        .with_materials(["steel", "rubber"])
        .with_keywords(["import", "carbon"])
        .with_supplier_regions(["China"])
}

fn regulations() -> Vec<Regulation> {
    vec![
        Regulation::new("LOW_1")
            .with_title("Medical device sterility")
            .with_countries(["Spain"])
            .with_sectors(["pharmaceutical"])
            .with_keywords(["sterile"]),
        Regulation::new("HIGH_1")
            .with_title("Carbon border adjustment")
            .with_text("CBAM applies to steel imports from China.")
            .with_countries(["France", "Germany"])
            .with_sectors(["automotive", "manufacturing"])
            .with_keywords(["import", "carbon"])
            .with_effective_date("2026-01-01")
            .with_sanctions("Penalty of EUR 100 per tonne"),
        Regulation::new("MED_1")
            .with_countries(["France"])
            .with_sectors(["automotive", "aerospace"])
            .with_keywords(["tariff"]),
    ]
}

fn report() -> RiskReport {
    let ranked = RelevanceScorer::default().rank(&regulations(), &profile());
    build_report(&ranked, &profile())
}

#[test]
fn test_summary_counts() {
    let report = report();
    assert_eq!(
        report.summary,
        RiskSummary {
            high: 1,
            medium: 1,
            low: 1,
            total: 3,
        }
    );
    assert_eq!(report.company, "Acme Tyres");
}

#[test]
fn test_entries_follow_ranking() {
    let report = report();
    let ids: Vec<_> = report.entries.iter().map(|e| e.regulation_id.as_str()).collect();
    assert_eq!(ids, ["HIGH_1", "MED_1", "LOW_1"]);
    let positions: Vec<_> = report.entries.iter().map(|e| e.position).collect();
    assert_eq!(positions, [1, 2, 3]);
}

#[test]
fn test_entry_details() {
    let report = report();
    let top = &report.entries[0];
    assert_eq!(top.title, "Carbon border adjustment");
    assert_eq!(top.effective_date.as_deref(), Some("2026-01-01"));
    assert!(top.categories.contains(&RiskCategory::Cbam));
    assert!(top.impacts.contains(&ImpactDetail::Material("steel".into())));
    assert!(top.impacts.contains(&ImpactDetail::SupplierRegion("China".into())));

    // untitled regulations fall back to their id
    assert_eq!(report.entries[1].title, "MED_1");
    assert_eq!(report.entries[1].impacts, vec![ImpactDetail::General]);
}

#[test]
fn test_entries_at_level() {
    let report = report();
    let high: Vec<_> = report.entries_at(RiskLevel::High).collect();
    assert_eq!(high.len(), 1);
    assert_eq!(high[0].regulation_id, "HIGH_1");
}

#[test]
fn test_recommendations_included() {
    let report = report();
    let priorities: Vec<_> = report.recommendations.iter().map(|r| r.priority).collect();
    assert_eq!(
        priorities,
        [Priority::Urgent, Priority::Important, Priority::Preventive]
    );
}

#[test]
fn test_empty_ranking() {
    let report = build_report(&[], &CompanyProfile::default());
    assert_eq!(report.summary, RiskSummary::default());
    assert!(report.entries.is_empty());
    assert_eq!(report.company, "unnamed company");
}

#[test]
fn test_run_ids_are_unique() {
    assert_ne!(report().run_id, report().run_id);
}

#[test]
fn test_format_report_sections() {
    let text = format_report(&report());
    assert!(text.contains("Company: Acme Tyres"));
    assert!(text.contains("HIGH RISK:"));
    assert!(text.contains("MEDIUM RISK:"));
    assert!(text.contains("LOW RISK:"));
    assert!(text.contains("Effective: 2026-01-01"));
    assert!(text.contains("[URGENT]"));

    let high = text.find("HIGH RISK:").unwrap();
    let low = text.find("LOW RISK:").unwrap();
    assert!(high < low);
}

#[test]
fn test_format_report_lists_matched_terms() {
    let text = format_report(&report());

    assert_eq!(text.matches("Matched:").count(), 2);
    let high_block = &text[text.find("HIGH RISK:").unwrap()..text.find("MEDIUM RISK:").unwrap()];
    assert!(high_block.contains("Matched: france, germany"));
    assert!(high_block.contains("carbon"));
    assert!(high_block.contains("steel"));

    let low_block = &text[text.find("LOW RISK:").unwrap()..];
    assert!(!low_block.contains("Matched:"));
}

#[test]
fn test_format_report_skips_empty_levels() {
    let ranked = RelevanceScorer::default().rank(&regulations()[..1], &profile());
    let text = format_report(&build_report(&ranked, &profile()));
    assert!(!text.contains("HIGH RISK:"));
    assert!(text.contains("LOW RISK:"));
}

#[test]
fn test_report_serializes() {
    let value = serde_json::to_value(report()).unwrap();
    assert_eq!(value["summary"]["high"], 1);
    assert_eq!(value["entries"][0]["score"]["risk_level"], "HIGH");
}
