use serde::{Deserialize, Serialize};

use crate::scoring::normalize_label;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// Family of regulatory risk a regulation belongs to.
pub enum RiskCategory {
    Cbam,
    Csrd,
    Eudr,
    Sanctions,
    Customs,
    Gdpr,
    SupplyChain,
}

impl RiskCategory {
    pub const ALL: [RiskCategory; 7] = [
        RiskCategory::Cbam,
        RiskCategory::Csrd,
        RiskCategory::Eudr,
        RiskCategory::Sanctions,
        RiskCategory::Customs,
        RiskCategory::Gdpr,
        RiskCategory::SupplyChain,
    ];

    /// Trigger terms, already normalized. English and French, as both appear in the corpus.
    fn triggers(&self) -> &'static [&'static str] {
        match self {
            RiskCategory::Cbam => &[
                "cbam",
                "carbon border adjustment",
                "émissions carbone",
                "frontière carbone",
            ],
            RiskCategory::Csrd => &[
                "csrd",
                "corporate sustainability reporting",
                "reporting durabilité",
            ],
            RiskCategory::Eudr => &["eudr", "deforestation", "déforestation"],
            // bare "sanctions" is left out: most texts use it for penalties
            RiskCategory::Sanctions => &[
                "embargo",
                "sanctioned countries",
                "pays sanctionnés",
                "trade restrictions",
                "restrictions commerciales",
                "export controls",
            ],
            RiskCategory::Customs => &[
                "customs",
                "tariff",
                "tariffs",
                "import",
                "imports",
                "export",
                "exports",
                "droits de douane",
                "tarifs douaniers",
            ],
            RiskCategory::Gdpr => &[
                "gdpr",
                "rgpd",
                "data protection",
                "personal data",
                "protection des données",
            ],
            RiskCategory::SupplyChain => &[
                "supply chain",
                "due diligence",
                "suppliers",
                "chaîne d'approvisionnement",
                "fournisseurs",
            ],
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskCategory::Cbam => "CBAM",
            RiskCategory::Csrd => "CSRD",
            RiskCategory::Eudr => "EUDR",
            RiskCategory::Sanctions => "Sanctions",
            RiskCategory::Customs => "Customs",
            RiskCategory::Gdpr => "GDPR",
            RiskCategory::SupplyChain => "Supply chain",
        }
    }
}

impl std::fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Categories whose trigger terms occur as whole words in `text`.
pub fn detect_categories(text: &str) -> Vec<RiskCategory> {
    let text = normalize_label(text);
    RiskCategory::ALL
        .into_iter()
        .filter(|category| {
            category
                .triggers()
                .iter()
                .any(|term| contains_term(&text, term))
        })
        .collect()
}

/// Whole-word containment: the match must not be flanked by alphanumerics.
pub(crate) fn contains_term(haystack: &str, term: &str) -> bool {
    if term.is_empty() {
        return false;
    }
    haystack.match_indices(term).any(|(start, matched)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + matched.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}
