//! Error types for price sources.

use thiserror::Error;

/// Errors a price source can report for a single coin.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Coin not found: {0}")]
    NotFound(String),

    #[error("Failed to fetch market prices: {0}")]
    FetchFailed(String),

    #[error("Price source unavailable: {0}")]
    Unavailable(String),
}

impl SourceError {
    /// Returns true if retrying the same coin later may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, SourceError::FetchFailed(_) | SourceError::Unavailable(_))
    }
}

/// Result type for price source operations.
pub type SourceResult<T> = Result<T, SourceError>;
