//! Optional LLM narrative over a risk report.
//!
//! A [`NarrativeGenerator`] receives the prompt from [`build_analysis_prompt`] and its raw
//! output is decoded by [`extract_indicators`]. Scoring never depends on this module.

pub mod client;
pub mod error;
pub mod extract;
pub mod prompt;

#[cfg(any(test, feature = "mock"))]
pub mod mock;


use tracing::info;

use crate::model::{CompanyProfile, Regulation};
use crate::report::RiskReport;

pub use client::{NarrativeGenerator, OllamaClient};
pub use error::{NarrativeError, NarrativeResult};
pub use extract::{Indicator, IndicatorExtraction, IndicatorSummary, extract_indicators};
#[cfg(any(test, feature = "mock"))]
pub use mock::MockNarrativeGenerator;
pub use prompt::{build_analysis_prompt, excerpt};

/// Prompts `generator` with the report and decodes the indicators it returns.
///
/// Transport failures are errors; undecodable output is not (see [`extract_indicators`]).
pub async fn generate_indicators(
    generator: &dyn NarrativeGenerator,
    report: &RiskReport,
    profile: &CompanyProfile,
    regulations: &[Regulation],
) -> NarrativeResult<IndicatorExtraction> {
    let prompt = build_analysis_prompt(report, profile, regulations);
    let raw = generator.generate(&prompt).await?;
    let extraction = extract_indicators(&raw);

    info!(
        run_id = %report.run_id,
        model = generator.model_name(),
        indicators = extraction.indicators.len(),
        decoded = extraction.error.is_none(),
        "Narrative generated"
    );

    Ok(extraction)
}
