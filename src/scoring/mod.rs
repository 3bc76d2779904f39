//! Multi-factor relevance scoring of regulations against a company profile.
//!
//! Four independent factors contribute additively, each capped at its weight:
//!
//! | Factor    | Regulation side                  | Company side            |
//! |-----------|----------------------------------|-------------------------|
//! | geography | `countries`                      | `geographical_presence` |
//! | sector    | `sectors`                        | `sectors`               |
//! | keyword   | `keywords` (+ body hits)         | `keywords`              |
//! | material  | `keywords` + body                | `materials`             |
//!
//! The total is capped at 1.0 and mapped to a [`RiskLevel`] with fixed thresholds.
//! Scoring has no failure mode: absent or malformed inputs simply contribute zero.

pub mod error;
pub mod normalize;
pub mod scorer;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::ScoringError;
pub use normalize::{LabelSet, normalize_label, normalize_text};
pub use scorer::{PreparedProfile, RelevanceScorer, factor_score, weighted_ratio};
pub use types::{FactorMatches, FactorWeights, RankedRegulation, RiskLevel, ScoreResult};
