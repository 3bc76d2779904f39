use thiserror::Error;

/// Scoring itself is total; only building a scorer from bad weights can fail.
#[derive(Debug, Error, PartialEq)]
pub enum ScoringError {
    #[error("invalid {factor} weight {value}: must be a finite number between 0.0 and 1.0")]
    InvalidWeight { factor: &'static str, value: f64 },
}
