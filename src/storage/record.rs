use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::SIGNIFICANT_SCORE_CHANGE;
use crate::model::Regulation;
use crate::scoring::ScoreResult;

/// Tolerance for comparing score deltas against [`SIGNIFICANT_SCORE_CHANGE`].
const DELTA_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Persisted result of scoring one regulation, keyed by `regulation_id`.
pub struct AnalysisRecord {
    pub regulation_id: String,
    pub title: Option<String>,
    /// See [`fingerprint_profile`](crate::hashing::fingerprint_profile).
    pub profile_fingerprint: String,
    pub score: ScoreResult,
    pub analyzed_at: DateTime<Utc>,
}

impl AnalysisRecord {
    /// Creates a record stamped with the current time.
    pub fn new(regulation: &Regulation, profile_fingerprint: String, score: ScoreResult) -> Self {
        Self {
            regulation_id: regulation.id.clone(),
            title: regulation.title.clone(),
            profile_fingerprint,
            score,
            analyzed_at: Utc::now(),
        }
    }

    pub fn with_analyzed_at(mut self, analyzed_at: DateTime<Utc>) -> Self {
        self.analyzed_at = analyzed_at;
        self
    }

    /// Compares the analysis content, ignoring the timestamp.
    pub fn same_analysis(&self, other: &AnalysisRecord) -> bool {
        self.regulation_id == other.regulation_id
            && self.profile_fingerprint == other.profile_fingerprint
            && self.score == other.score
    }

    /// Classifies how `self` (the new record) relates to the record it replaces.
    pub fn outcome_against(&self, previous: Option<&AnalysisRecord>) -> UpsertOutcome {
        match previous {
            None => UpsertOutcome::Created,
            Some(previous) if self.same_analysis(previous) => UpsertOutcome::Unchanged,
            Some(previous) => UpsertOutcome::Updated {
                previous_total: previous.score.total_score,
                delta: self.score.total_score - previous.score.total_score,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
/// What an upsert did to the store.
pub enum UpsertOutcome {
    /// No record existed for this regulation.
    Created,
    /// Same profile and score as the stored record; only the timestamp moved.
    Unchanged,
    /// The stored record was replaced with a different analysis.
    Updated { previous_total: f64, delta: f64 },
}

impl UpsertOutcome {
    /// `true` for an update whose total moved by at least [`SIGNIFICANT_SCORE_CHANGE`].
    pub fn is_significant(&self) -> bool {
        match self {
            UpsertOutcome::Updated { delta, .. } => {
                delta.abs() + DELTA_EPSILON >= SIGNIFICANT_SCORE_CHANGE
            }
            UpsertOutcome::Created | UpsertOutcome::Unchanged => false,
        }
    }
}
