use std::fmt::Write;

use crate::constants::PROMPT_EXCERPT_CHARS;
use crate::model::{CompanyProfile, Regulation};
use crate::report::RiskReport;

const MAX_LISTED_COUNTRIES: usize = 10;
const MAX_LISTED_MATERIALS: usize = 8;

const INDICATOR_SCHEMA: &str = r#"{
  "indicators": [
    {
      "law_name": "Exact name of the relevant regulation",
      "law_url": "Exact URL given above",
      "deadline": "DD/MM/YYYY",
      "impact_financial": 9,
      "impact_reputation": 8,
      "impact_operational": 6,
      "notes": "Why this regulation affects the company (80 chars max)",
      "sector_match": "Company sector concerned"
    }
  ]
}"#;

/// First `max_chars` characters of `text`, never splitting a character.
pub fn excerpt(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

fn listing(values: &[String], limit: usize, fallback: &str) -> String {
    if values.is_empty() {
        return fallback.to_string();
    }
    values
        .iter()
        .take(limit)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Builds the indicator-extraction prompt.
///
/// Regulations are listed in the report's ranked order; `regulations` supplies the body
/// excerpts. The output is deterministic for a given report, profile and corpus.
pub fn build_analysis_prompt(
    report: &RiskReport,
    profile: &CompanyProfile,
    regulations: &[Regulation],
) -> String {
    let name = profile.display_name();
    let mut prompt = String::new();

    // writing into a String cannot fail
    let _ = writeln!(
        prompt,
        "You are a regulatory compliance expert. Analyze these regulations for {name}."
    );
    let _ = writeln!(prompt);
    let _ = writeln!(prompt, "COMPANY PROFILE:");
    let _ = writeln!(prompt, "- Name: {name}");
    let _ = writeln!(
        prompt,
        "- Sectors: {}",
        listing(&profile.sectors, usize::MAX, "Not specified")
    );
    let _ = writeln!(
        prompt,
        "- Geographical presence: {}",
        listing(&profile.geographical_presence, MAX_LISTED_COUNTRIES, "International")
    );
    let _ = writeln!(
        prompt,
        "- Raw materials: {}",
        listing(&profile.materials, MAX_LISTED_MATERIALS, "Not specified")
    );
    let _ = writeln!(prompt);
    let _ = writeln!(prompt, "REGULATIONS TO ANALYZE:");

    for (i, entry) in report.entries.iter().enumerate() {
        let body = regulations
            .iter()
            .find(|r| r.id == entry.regulation_id)
            .map(|r| r.text.as_str())
            .unwrap_or_default();

        let _ = writeln!(prompt);
        let _ = writeln!(prompt, "{}. {}", i + 1, entry.title);
        let _ = writeln!(prompt, "   URL: {}", entry.url.as_deref().unwrap_or("#"));
        let _ = writeln!(
            prompt,
            "   Deadline: {}",
            entry.effective_date.as_deref().unwrap_or("Not defined")
        );
        let _ = writeln!(
            prompt,
            "   Sanctions: {}",
            entry.sanctions.as_deref().unwrap_or("Not specified")
        );
        let _ = writeln!(prompt, "   Risk: {} ({:.2})", entry.score.risk_level, entry.score.total_score);
        let _ = writeln!(prompt, "   Text: {}...", excerpt(body, PROMPT_EXCERPT_CHARS));
    }

    let _ = writeln!(prompt);
    let _ = writeln!(
        prompt,
        "Keep ONLY the regulations that directly affect the activities of {name}."
    );
    let _ = writeln!(prompt, "Return EXACTLY this JSON format:");
    let _ = writeln!(prompt);
    let _ = writeln!(prompt, "{INDICATOR_SCHEMA}");
    let _ = writeln!(prompt);
    let _ = writeln!(prompt, "RULES:");
    let _ = writeln!(
        prompt,
        "1. If no regulation applies, return {{\"indicators\": []}}"
    );
    let _ = writeln!(prompt, "2. Financial impact (1-10): based on sanctions and fines");
    let _ = writeln!(prompt, "3. Reputation impact (1-10): image risk for the company");
    let _ = writeln!(prompt, "4. Operational impact (1-10): effort to comply in production");
    let _ = writeln!(prompt, "5. law_url: use exactly the URL given above");
    let _ = write!(prompt, "6. Return ONLY the JSON, no other text.");

    prompt
}
