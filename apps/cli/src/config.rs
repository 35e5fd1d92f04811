//! Application configuration.

use crate::error::{CliError, CliResult};
use arbitrage_engine::{
    SearchConfig, DEFAULT_INVESTMENT, DEFAULT_START_AMOUNT, DEFAULT_TOP_N, MAX_PATHS_EXPLORED,
    MAX_PATH_LENGTH, POPULAR_COINS, PROGRESS_INTERVAL,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Cycle search configuration.
    pub search: SearchSettings,
    /// Crypto and sports comparator configuration.
    pub pairwise: PairwiseSettings,
    /// Logging level.
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            search: SearchSettings::default(),
            pairwise: PairwiseSettings::default(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a JSON file. Returns `None` when the file
    /// does not exist so the caller can fall back to defaults.
    pub fn load(path: &Path) -> CliResult<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path).map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: AppConfig = serde_json::from_str(&raw).map_err(|source| CliError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(Some(config))
    }

    /// Reject settings the search cannot run with.
    pub fn validate(&self) -> CliResult<()> {
        let search = &self.search;
        if !(search.start_amount.is_finite() && search.start_amount > 0.0) {
            return Err(CliError::InvalidSetting(format!(
                "search.start_amount must be positive, got {}",
                search.start_amount
            )));
        }
        if search.max_path_length < 2 {
            return Err(CliError::InvalidSetting(format!(
                "search.max_path_length must be at least 2, got {}",
                search.max_path_length
            )));
        }
        if !(self.pairwise.investment_amount.is_finite() && self.pairwise.investment_amount > 0.0) {
            return Err(CliError::InvalidSetting(format!(
                "pairwise.investment_amount must be positive, got {}",
                self.pairwise.investment_amount
            )));
        }
        Ok(())
    }
}

/// Cycle search settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Notional amount held in the start currency.
    pub start_amount: f64,
    /// Maximum steps per candidate path, start included.
    pub max_path_length: usize,
    /// Exploration ceiling across all start currencies.
    pub max_paths_explored: u64,
    /// Paths between progress log lines.
    pub progress_interval: u64,
    /// Opportunities returned to the caller.
    pub top_n: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            start_amount: DEFAULT_START_AMOUNT,
            max_path_length: MAX_PATH_LENGTH,
            max_paths_explored: MAX_PATHS_EXPLORED,
            progress_interval: PROGRESS_INTERVAL,
            top_n: DEFAULT_TOP_N,
        }
    }
}

impl From<&SearchSettings> for SearchConfig {
    fn from(settings: &SearchSettings) -> Self {
        SearchConfig {
            start_amount: settings.start_amount,
            max_path_length: settings.max_path_length,
            max_paths_explored: settings.max_paths_explored,
            progress_interval: settings.progress_interval,
        }
    }
}

/// Two-market comparator settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PairwiseSettings {
    /// Stake used to size potential profit.
    pub investment_amount: f64,
    /// Coins to scan when the command line names none.
    pub coins: Vec<String>,
}

impl Default for PairwiseSettings {
    fn default() -> Self {
        Self {
            investment_amount: DEFAULT_INVESTMENT,
            coins: POPULAR_COINS.iter().map(|c| c.to_string()).collect(),
        }
    }
}
