use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

/// Impact scores are on a 1..=10 scale.
const MIN_IMPACT: u8 = 1;
const MAX_IMPACT: u8 = 10;

/// Financial impact at or above this marks a high-impact law.
const HIGH_FINANCIAL_IMPACT: u8 = 8;

/// Deadline placeholder models emit when the regulation gives none.
const UNDEFINED_DEADLINE: &[&str] = &["", "not defined", "non définie", "n/a"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// One regulation the model judged relevant, with its impact ratings.
pub struct Indicator {
    pub law_name: String,
    pub law_url: String,
    pub deadline: String,
    pub impact_financial: u8,
    pub impact_reputation: u8,
    pub impact_operational: u8,
    pub notes: String,
    pub sector_match: String,
}

impl Indicator {
    fn from_value(value: &Value) -> Self {
        let text = |key: &str| match value.get(key) {
            Some(Value::String(s)) => s.trim().to_string(),
            Some(Value::Number(n)) => n.to_string(),
            _ => String::new(),
        };

        Self {
            law_name: text("law_name"),
            law_url: text("law_url"),
            deadline: text("deadline"),
            impact_financial: impact(value.get("impact_financial")),
            impact_reputation: impact(value.get("impact_reputation")),
            impact_operational: impact(value.get("impact_operational")),
            notes: text("notes"),
            sector_match: text("sector_match"),
        }
    }

    pub fn has_deadline(&self) -> bool {
        let deadline = self.deadline.trim().to_lowercase();
        !UNDEFINED_DEADLINE.contains(&deadline.as_str())
    }
}

/// Reads an impact rating from a number or numeric string and clamps it to `1..=10`.
fn impact(value: Option<&Value>) -> u8 {
    let raw = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match raw {
        Some(v) if v.is_finite() => v
            .round()
            .clamp(f64::from(MIN_IMPACT), f64::from(MAX_IMPACT)) as u8,
        _ => MIN_IMPACT,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorExtraction {
    pub indicators: Vec<Indicator>,
    /// Set when the model output could not be decoded.
    pub error: Option<String>,
}

impl IndicatorExtraction {
    fn failed(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        warn!(reason = %reason, "Could not extract indicators from model output");
        Self {
            indicators: Vec::new(),
            error: Some(reason),
        }
    }

    pub fn summary(&self) -> IndicatorSummary {
        IndicatorSummary::from_indicators(&self.indicators)
    }
}

/// Extracts `{"indicators": [...]}` from raw model output.
///
/// The JSON object is taken from the first `{` to the last `}`, so surrounding prose is
/// ignored. Never fails: undecodable output yields no indicators and an error message.
pub fn extract_indicators(raw: &str) -> IndicatorExtraction {
    let (Some(start), Some(end)) = (raw.find('{'), raw.rfind('}')) else {
        return IndicatorExtraction::failed("no JSON object in model output");
    };
    if end < start {
        return IndicatorExtraction::failed("no JSON object in model output");
    }

    let value: Value = match serde_json::from_str(&raw[start..=end]) {
        Ok(value) => value,
        Err(e) => return IndicatorExtraction::failed(format!("invalid JSON: {e}")),
    };

    let Some(items) = value.get("indicators").and_then(Value::as_array) else {
        return IndicatorExtraction::failed("JSON has no `indicators` array");
    };

    let indicators: Vec<Indicator> = items
        .iter()
        .filter(|item| item.is_object())
        .map(Indicator::from_value)
        .collect();

    debug!(count = indicators.len(), "Extracted indicators");

    IndicatorExtraction {
        indicators,
        error: None,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
/// Aggregate view over extracted indicators.
pub struct IndicatorSummary {
    pub total: usize,
    pub avg_financial_impact: f64,
    pub avg_reputation_impact: f64,
    pub avg_operational_impact: f64,
    pub high_impact_laws: usize,
    pub laws_with_deadlines: usize,
}

impl IndicatorSummary {
    pub fn from_indicators(indicators: &[Indicator]) -> Self {
        if indicators.is_empty() {
            return Self::default();
        }

        let n = indicators.len() as f64;
        let avg = |f: fn(&Indicator) -> u8| {
            indicators.iter().map(|i| f64::from(f(i))).sum::<f64>() / n
        };

        Self {
            total: indicators.len(),
            avg_financial_impact: avg(|i| i.impact_financial),
            avg_reputation_impact: avg(|i| i.impact_reputation),
            avg_operational_impact: avg(|i| i.impact_operational),
            high_impact_laws: indicators
                .iter()
                .filter(|i| i.impact_financial >= HIGH_FINANCIAL_IMPACT)
                .count(),
            laws_with_deadlines: indicators.iter().filter(|i| i.has_deadline()).count(),
        }
    }
}
