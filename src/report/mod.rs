//! Heuristic risk report over a ranked set of regulations.
//!
//! The report is what the dashboard renders when no narrative generator is configured:
//! counts per risk level, each regulation's score with the concrete impacts and risk
//! categories found in its text, and a short list of recommended actions.

pub mod categories;
pub mod format;
pub mod impact;
pub mod recommend;

#[cfg(test)]
mod tests;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::model::CompanyProfile;
use crate::scoring::{RankedRegulation, RiskLevel, ScoreResult};

pub use categories::{RiskCategory, detect_categories};
pub use format::format_report;
pub use impact::{ImpactDetail, specific_impacts};
pub use recommend::{Priority, Recommendation, recommendations};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskSummary {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub total: usize,
}

impl RiskSummary {
    pub fn from_levels(levels: impl IntoIterator<Item = RiskLevel>) -> Self {
        let mut summary = Self::default();
        for level in levels {
            match level {
                RiskLevel::High => summary.high += 1,
                RiskLevel::Medium => summary.medium += 1,
                RiskLevel::Low => summary.low += 1,
            }
            summary.total += 1;
        }
        summary
    }

    pub fn count(&self, level: RiskLevel) -> usize {
        match level {
            RiskLevel::High => self.high,
            RiskLevel::Medium => self.medium,
            RiskLevel::Low => self.low,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// One regulation's line in the report.
pub struct ReportEntry {
    pub position: usize,
    pub regulation_id: String,
    pub title: String,
    pub url: Option<String>,
    pub effective_date: Option<String>,
    pub sanctions: Option<String>,
    pub score: ScoreResult,
    pub categories: Vec<RiskCategory>,
    pub impacts: Vec<ImpactDetail>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskReport {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub company: String,
    pub summary: RiskSummary,
    /// Ordered as ranked: highest score first.
    pub entries: Vec<ReportEntry>,
    pub recommendations: Vec<Recommendation>,
}

impl RiskReport {
    /// Entries at `level`, in ranked order.
    pub fn entries_at(&self, level: RiskLevel) -> impl Iterator<Item = &ReportEntry> {
        self.entries
            .iter()
            .filter(move |entry| entry.score.risk_level == level)
    }
}

/// Builds a report from an already-ranked list.
pub fn build_report(ranked: &[RankedRegulation], profile: &CompanyProfile) -> RiskReport {
    let entries: Vec<ReportEntry> = ranked
        .iter()
        .map(|item| {
            let regulation = &item.regulation;
            ReportEntry {
                position: item.position,
                regulation_id: regulation.id.clone(),
                title: regulation.display_title().to_string(),
                url: regulation.url.clone(),
                effective_date: regulation.effective_date.clone(),
                sanctions: regulation.sanctions_text.clone(),
                score: item.score.clone(),
                categories: detect_categories(&regulation.text),
                impacts: specific_impacts(regulation, profile),
            }
        })
        .collect();

    let summary = RiskSummary::from_levels(entries.iter().map(|e| e.score.risk_level));
    let recommendations = recommendations(&summary, profile);

    let report = RiskReport {
        run_id: Uuid::new_v4(),
        generated_at: Utc::now(),
        company: profile.display_name().to_string(),
        summary,
        entries,
        recommendations,
    };

    info!(
        run_id = %report.run_id,
        company = %report.company,
        high = summary.high,
        medium = summary.medium,
        low = summary.low,
        "Risk report built"
    );

    report
}
