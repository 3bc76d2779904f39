//! Regrisk library crate (used by the server and integration tests).
//!
//! Scores regulations against a company profile and summarises the result for a
//! risk dashboard.
//!
//! # Public API Surface
//!
//! ## Core Types
//! - [`Regulation`], [`CompanyProfile`] - Input records, decoded leniently from JSON
//! - [`RelevanceScorer`], [`ScoreResult`], [`RiskLevel`] - Multi-factor scoring
//! - [`RankedRegulation`] - Batch ranking output
//!
//! ## Reporting
//! - [`RiskReport`], [`build_report`], [`format_report`] - Heuristic impact report
//! - [`NarrativeGenerator`], [`OllamaClient`], [`extract_indicators`] - Optional LLM narrative
//!
//! ## Persistence
//! - [`AnalysisStore`], [`FileAnalysisStore`], [`MemoryAnalysisStore`] - Analyses keyed by
//!   regulation id
//!
//! ## Server
//! - [`Config`], [`ConfigError`] - Environment configuration
//! - [`gateway`] - Axum router for the dashboard
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod config;
pub mod constants;
pub mod gateway;
pub mod hashing;
pub mod model;
pub mod narrative;
pub mod report;
pub mod scoring;
pub mod storage;

pub use config::{Config, ConfigError};
pub use constants::{REGRISK_STATUS_HEADER, SIGNIFICANT_SCORE_CHANGE};
pub use hashing::{fingerprint_profile, regulation_key};
pub use model::{
    CompanyProfile, DataError, DataResult, Regulation, load_profile, load_regulations,
    parse_profile, parse_regulations,
};
#[cfg(any(test, feature = "mock"))]
pub use narrative::MockNarrativeGenerator;
pub use narrative::{
    Indicator, IndicatorExtraction, IndicatorSummary, NarrativeError, NarrativeGenerator,
    OllamaClient, build_analysis_prompt, extract_indicators, generate_indicators,
};
pub use report::{
    ImpactDetail, Priority, Recommendation, RiskCategory, RiskReport, RiskSummary, build_report,
    format_report,
};
pub use scoring::{
    FactorMatches, FactorWeights, RankedRegulation, RelevanceScorer, RiskLevel, ScoreResult,
    ScoringError,
};
pub use storage::{
    AnalysisRecord, AnalysisStore, FileAnalysisStore, MemoryAnalysisStore, PersistSummary,
    StorageError, UpsertOutcome, persist_ranking,
};
