//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

use crate::scoring::ScoringError;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Port value is outside valid range (1-65535).
    #[error("invalid port '{value}': must be between 1 and 65535")]
    InvalidPort { value: String },

    /// Port string could not be parsed as a number.
    #[error("failed to parse port '{value}': {source}")]
    PortParseError {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("failed to parse bind address '{value}': {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },

    /// A factor weight variable is not a number.
    #[error("failed to parse {name}='{value}': {source}")]
    WeightParseError {
        name: &'static str,
        value: String,
        #[source]
        source: std::num::ParseFloatError,
    },

    /// Weight parsed but is out of range.
    #[error("invalid factor weight: {0}")]
    InvalidWeight(#[from] ScoringError),

    #[error("invalid boolean for {name}: '{value}' (expected true/false/1/0/yes/no)")]
    InvalidBool { name: &'static str, value: String },

    #[error("invalid {name}: '{value}'")]
    InvalidValue { name: &'static str, value: String },

    /// Specified path does not exist on the filesystem.
    #[error("path does not exist: {path}")]
    PathNotFound { path: PathBuf },

    /// Path exists but is not a file (when a file was expected).
    #[error("path is not a file: {path}")]
    NotAFile { path: PathBuf },

    /// Path exists but is not a directory (when a directory was expected).
    #[error("path is not a directory: {path}")]
    NotADirectory { path: PathBuf },
}
