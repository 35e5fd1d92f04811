//! Subcommand handlers.

use crate::config::AppConfig;
use crate::error::CliResult;
use crate::input::{load_matches, load_prices, load_rates, QuoteOverride};
use arbitrage_core::{ArbitrageOpportunity, CryptoArbitrageOpportunity, SportsArbitrageOpportunity};
use arbitrage_engine::{
    find_sports_opportunities, scan_coins, CycleSearch, RateMatrix, SearchConfig,
    StaticPriceSource,
};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Response body shared by every subcommand.
#[derive(Debug, Serialize)]
pub struct OpportunitiesResponse<T> {
    pub opportunities: Vec<T>,
}

/// Search a rate snapshot for conversion cycles and keep the top results.
pub fn run_cycles(
    config: &AppConfig,
    rates_path: &Path,
    quotes: &[QuoteOverride],
) -> CliResult<Vec<ArbitrageOpportunity>> {
    let table = load_rates(rates_path)?;

    let mut matrix = RateMatrix::from_table(&table);
    for quote in quotes {
        info!("Overriding {} → {} rate with {}", quote.from, quote.to, quote.rate);
        matrix.set_rate(&quote.from, &quote.to, quote.rate);
    }

    let search = CycleSearch::new(SearchConfig::from(&config.search));
    let outcome = search.run_matrix(&matrix);

    if outcome.budget_exhausted {
        info!(
            "Search stopped at the exploration limit after {} paths; results may be incomplete",
            outcome.paths_explored
        );
    }

    Ok(outcome.into_top(config.search.top_n))
}

/// Compare exchange prices per coin, scanning coins concurrently.
pub async fn run_crypto(
    config: &AppConfig,
    prices_path: &Path,
    coins: &[String],
) -> CliResult<Vec<CryptoArbitrageOpportunity>> {
    let source = StaticPriceSource::from(load_prices(prices_path)?);

    let coins: Vec<&str> = if coins.is_empty() {
        config.pairwise.coins.iter().map(String::as_str).collect()
    } else {
        coins.iter().map(String::as_str).collect()
    };

    Ok(scan_coins(Arc::new(source), &coins, config.pairwise.investment_amount).await)
}

/// Evaluate every match for two-way betting arbitrage.
pub fn run_sports(
    config: &AppConfig,
    odds_path: &Path,
) -> CliResult<Vec<SportsArbitrageOpportunity>> {
    let matches = load_matches(odds_path)?;
    info!("Evaluating {} matches", matches.len());
    Ok(find_sports_opportunities(&matches, config.pairwise.investment_amount))
}
