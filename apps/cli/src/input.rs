//! Local JSON inputs: rate snapshots, exchange prices and match odds.

use crate::error::{CliError, CliResult};
use arbitrage_core::{ExchangePrice, MatchOdds, RateTable};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;
use tracing::info;

/// Read and decode a JSON file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> CliResult<T> {
    let raw = std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| CliError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Rate snapshot, either a bare `{code: rate}` map or the provider envelope.
pub fn load_rates(path: &Path) -> CliResult<RateTable> {
    let table: RateTable = read_json(path)?;
    info!(
        "Received rates for {} currencies (base {})",
        table.len(),
        table.base().map(|b| b.as_str()).unwrap_or("unknown")
    );
    Ok(table)
}

/// Exchange prices keyed by coin id.
pub fn load_prices(path: &Path) -> CliResult<HashMap<String, Vec<ExchangePrice>>> {
    read_json(path)
}

/// Match odds list as published by the odds provider.
pub fn load_matches(path: &Path) -> CliResult<Vec<MatchOdds>> {
    read_json(path)
}

/// Directed cross-rate override given on the command line as `FROM:TO=RATE`.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteOverride {
    pub from: String,
    pub to: String,
    pub rate: f64,
}

impl FromStr for QuoteOverride {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CliError::InvalidQuote(s.to_string());

        let (pair, rate) = s.split_once('=').ok_or_else(invalid)?;
        let (from, to) = pair.split_once(':').ok_or_else(invalid)?;
        let (from, to) = (from.trim(), to.trim());
        let rate: f64 = rate.trim().parse().map_err(|_| invalid())?;

        if from.is_empty() || to.is_empty() || from == to || !(rate.is_finite() && rate > 0.0) {
            return Err(invalid());
        }

        Ok(Self {
            from: from.to_string(),
            to: to.to_string(),
            rate,
        })
    }
}
