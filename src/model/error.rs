//! Data loading error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading regulation or profile files.
///
/// Field-level shape problems are coerced, never reported; only unreadable files and
/// documents that are not JSON (or have the wrong top-level shape) end up here.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {origin}: {source}")]
    Json {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unexpected document shape in {origin}: expected {expected}")]
    UnexpectedShape {
        origin: String,
        expected: &'static str,
    },
}

/// Convenience result type for data loading.
pub type DataResult<T> = Result<T, DataError>;
