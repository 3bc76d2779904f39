use serde::Serialize;
use tracing::{info, warn};

use crate::hashing::fingerprint_profile;
use crate::model::CompanyProfile;
use crate::scoring::RankedRegulation;

use super::AnalysisStore;
use super::error::StorageResult;
use super::record::{AnalysisRecord, UpsertOutcome};

#[derive(Debug, Clone, PartialEq, Serialize)]
/// A re-score that moved a regulation's total by a significant amount.
pub struct ScoreChange {
    pub regulation_id: String,
    pub previous_total: f64,
    pub new_total: f64,
    pub delta: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
/// Counts of what a persisted ranking did to the store.
pub struct PersistSummary {
    pub created: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub significant_changes: Vec<ScoreChange>,
}

/// Upserts one analysis per ranked regulation.
///
/// Regulations are keyed by id, so persisting the same ranking twice leaves one record
/// per regulation. Significant score changes are logged and returned.
pub fn persist_ranking<S>(
    store: &S,
    ranked: &[RankedRegulation],
    profile: &CompanyProfile,
) -> StorageResult<PersistSummary>
where
    S: AnalysisStore + ?Sized,
{
    let fingerprint = fingerprint_profile(profile);
    let mut summary = PersistSummary::default();

    for entry in ranked {
        let record = AnalysisRecord::new(&entry.regulation, fingerprint.clone(), entry.score.clone());
        let outcome = store.upsert(record)?;

        match outcome {
            UpsertOutcome::Created => summary.created += 1,
            UpsertOutcome::Unchanged => summary.unchanged += 1,
            UpsertOutcome::Updated {
                previous_total,
                delta,
            } => {
                summary.updated += 1;
                if outcome.is_significant() {
                    warn!(
                        regulation_id = %entry.regulation.id,
                        previous_total,
                        new_total = entry.score.total_score,
                        delta,
                        "Significant score change"
                    );
                    summary.significant_changes.push(ScoreChange {
                        regulation_id: entry.regulation.id.clone(),
                        previous_total,
                        new_total: entry.score.total_score,
                        delta,
                    });
                }
            }
        }
    }

    info!(
        created = summary.created,
        updated = summary.updated,
        unchanged = summary.unchanged,
        significant = summary.significant_changes.len(),
        "Ranking persisted"
    );

    Ok(summary)
}
