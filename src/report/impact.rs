use serde::{Deserialize, Serialize};

use crate::model::{CompanyProfile, Regulation};
use crate::scoring::normalize_text;

use super::categories::contains_term;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "subject", rename_all = "snake_case")]
/// One concrete way a regulation touches the company.
pub enum ImpactDetail {
    Material(String),
    SupplierRegion(String),
    ClientRegion(String),
    /// Nothing specific was found in the text.
    General,
}

impl std::fmt::Display for ImpactDetail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImpactDetail::Material(m) => write!(f, "Impact on raw material: {m}"),
            ImpactDetail::SupplierRegion(r) => write!(f, "Impact on supplier region: {r}"),
            ImpactDetail::ClientRegion(r) => write!(f, "Impact on client region: {r}"),
            ImpactDetail::General => f.write_str("General impact on operations"),
        }
    }
}

/// Lists the profile's materials, supplier regions and client regions mentioned in the
/// regulation body. Falls back to a single [`ImpactDetail::General`].
pub fn specific_impacts(regulation: &Regulation, profile: &CompanyProfile) -> Vec<ImpactDetail> {
    let text = normalize_text(&regulation.text);
    let mentioned = |label: &String| contains_term(&text, &normalize_text(label));

    let mut impacts: Vec<ImpactDetail> = profile
        .materials
        .iter()
        .filter(|&m| mentioned(m))
        .map(|m| ImpactDetail::Material(m.clone()))
        .chain(
            profile
                .supplier_regions
                .iter()
                .filter(|&r| mentioned(r))
                .map(|r| ImpactDetail::SupplierRegion(r.clone())),
        )
        .chain(
            profile
                .client_regions
                .iter()
                .filter(|&r| mentioned(r))
                .map(|r| ImpactDetail::ClientRegion(r.clone())),
        )
        .collect();

    if impacts.is_empty() {
        impacts.push(ImpactDetail::General);
    }
    impacts
}
