//! Plain-text rendering of a [`RiskReport`].

use std::fmt::Write;

use crate::scoring::RiskLevel;

use super::RiskReport;

const RULE_WIDTH: usize = 80;

pub fn format_report(report: &RiskReport) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = String::new();

    // writing into a String cannot fail
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "REGULATORY RISK REPORT");
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "Company: {}", report.company);
    let _ = writeln!(out, "Generated: {}", report.generated_at.format("%Y-%m-%d %H:%M UTC"));
    let _ = writeln!(out, "Run: {}", report.run_id);
    let _ = writeln!(out);

    let summary = &report.summary;
    let _ = writeln!(out, "SUMMARY ({} regulation(s) analyzed)", summary.total);
    let _ = writeln!(out, "  HIGH:   {}", summary.high);
    let _ = writeln!(out, "  MEDIUM: {}", summary.medium);
    let _ = writeln!(out, "  LOW:    {}", summary.low);
    let _ = writeln!(out);

    for level in [RiskLevel::High, RiskLevel::Medium, RiskLevel::Low] {
        if summary.count(level) == 0 {
            continue;
        }
        let _ = writeln!(out, "{level} RISK:");
        for (i, entry) in report.entries_at(level).enumerate() {
            let _ = writeln!(out, "  {}. {}", i + 1, entry.title);
            let _ = writeln!(out, "     ID: {}", entry.regulation_id);
            let _ = writeln!(out, "     Score: {:.4}", entry.score.total_score);
            let matches = &entry.score.matches;
            if !matches.is_empty() {
                let terms: Vec<&str> = [
                    &matches.countries,
                    &matches.sectors,
                    &matches.keywords,
                    &matches.materials,
                ]
                .into_iter()
                .flatten()
                .map(String::as_str)
                .collect();
                let _ = writeln!(out, "     Matched: {}", terms.join(", "));
            }
            if let Some(date) = &entry.effective_date {
                let _ = writeln!(out, "     Effective: {date}");
            }
            if let Some(sanctions) = &entry.sanctions {
                let _ = writeln!(out, "     Sanctions: {sanctions}");
            }
            if !entry.categories.is_empty() {
                let categories: Vec<_> = entry.categories.iter().map(|c| c.label()).collect();
                let _ = writeln!(out, "     Categories: {}", categories.join(", "));
            }
            let impacts: Vec<_> = entry.impacts.iter().map(ToString::to_string).collect();
            let _ = writeln!(out, "     Impacts: {}", impacts.join(", "));
        }
        let _ = writeln!(out);
    }

    if !report.recommendations.is_empty() {
        let _ = writeln!(out, "RECOMMENDED ACTIONS:");
        for (i, rec) in report.recommendations.iter().enumerate() {
            let _ = writeln!(out, "  {}. [{}] {}", i + 1, rec.priority, rec.action);
            let _ = writeln!(out, "     Timeline: {}", rec.timeline);
        }
        let _ = writeln!(out);
    }

    let _ = write!(out, "{rule}");
    out
}
