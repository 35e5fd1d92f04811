//! Error types for the command-line front end.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced to the user before or after a search runs.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid setting: {0}")]
    InvalidSetting(String),

    #[error("Invalid quote '{0}', expected FROM:TO=RATE")]
    InvalidQuote(String),

    #[error("Failed to encode output: {0}")]
    Output(#[from] serde_json::Error),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;
