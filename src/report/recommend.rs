use serde::{Deserialize, Serialize};

use crate::model::CompanyProfile;
use crate::scoring::normalize_label;

use super::RiskSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    Urgent,
    Important,
    Preventive,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Priority::Urgent => "URGENT",
            Priority::Important => "IMPORTANT",
            Priority::Preventive => "PREVENTIVE",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub priority: Priority,
    pub action: String,
    pub timeline: String,
}

/// Sector terms that mark an industrial producer exposed to carbon border measures.
const INDUSTRIAL_SECTOR_TERMS: &[&str] = &["manufacturing", "industr"];

/// Follow-up actions derived from the risk counts and the company's sectors.
pub fn recommendations(summary: &RiskSummary, profile: &CompanyProfile) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    if summary.high > 0 {
        recommendations.push(Recommendation {
            priority: Priority::Urgent,
            action: format!(
                "Immediate compliance audit for {} high-risk regulation(s)",
                summary.high
            ),
            timeline: "1-2 weeks".to_string(),
        });
    }

    if summary.medium > 0 {
        recommendations.push(Recommendation {
            priority: Priority::Important,
            action: format!(
                "Detailed assessment for {} medium-risk regulation(s)",
                summary.medium
            ),
            timeline: "1-2 months".to_string(),
        });
    }

    let industrial = profile.sectors.iter().any(|sector| {
        let sector = normalize_label(sector);
        INDUSTRIAL_SECTOR_TERMS
            .iter()
            .any(|term| sector.contains(term))
    });
    if industrial {
        recommendations.push(Recommendation {
            priority: Priority::Preventive,
            action: "Set up carbon emissions monitoring ahead of CBAM reporting".to_string(),
            timeline: "3-6 months".to_string(),
        });
    }

    recommendations
}
