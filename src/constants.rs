//! Cross-cutting, shared constants.
//!
//! Factor weights are defaults only; the effective weights come from
//! [`Config`](crate::config::Config). Risk thresholds are fixed here and are not
//! configurable, so every caller classifies a given score the same way.

pub const DEFAULT_GEO_WEIGHT: f64 = 0.30;
pub const DEFAULT_SECTOR_WEIGHT: f64 = 0.40;
pub const DEFAULT_KEYWORD_WEIGHT: f64 = 0.30;
pub const DEFAULT_MATERIAL_WEIGHT: f64 = 0.15;

/// Upper bound of `total_score`.
pub const MAX_TOTAL_SCORE: f64 = 1.0;

/// Scores at or above this are [`RiskLevel::High`](crate::scoring::RiskLevel::High).
pub const HIGH_RISK_THRESHOLD: f64 = 0.7;

/// Scores at or above this (and below [`HIGH_RISK_THRESHOLD`]) are medium risk.
pub const MEDIUM_RISK_THRESHOLD: f64 = 0.4;

/// A re-score that moves the total by at least this much is reported as a significant change.
pub const SIGNIFICANT_SCORE_CHANGE: f64 = 0.10;

/// Characters of regulation body quoted per regulation in the narrative prompt.
pub const PROMPT_EXCERPT_CHARS: usize = 200;

pub const DEFAULT_LLM_MODEL: &str = "llama2";

pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 60;

/// Response header carrying a short machine-readable status.
pub const REGRISK_STATUS_HEADER: &str = "X-Regrisk-Status";
pub const REGRISK_STATUS_HEALTHY: &str = "healthy";
pub const REGRISK_STATUS_READY: &str = "ready";
pub const REGRISK_STATUS_ERROR: &str = "error";
