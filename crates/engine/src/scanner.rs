//! Concurrent multi-coin scanner.
//!
//! Each coin is an independent search: prices are requested from the source
//! and compared on their own task, and the results are merged once every
//! task has finished. A coin that fails contributes nothing.

use crate::{find_crypto_opportunities, rank_by_profit, SourceError, SourceResult};
use arbitrage_core::{CryptoArbitrageOpportunity, ExchangePrice};
use async_trait::async_trait;
use compact_str::CompactString;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

/// Coins scanned when the caller does not name any.
pub const POPULAR_COINS: [&str; 7] = [
    "bitcoin", "ethereum", "ripple", "cardano", "solana", "polkadot", "dogecoin",
];

/// Supplies per-exchange USD prices for a coin.
#[async_trait]
pub trait PriceSource: Send + Sync {
    async fn exchange_prices(&self, coin: &str) -> SourceResult<Vec<ExchangePrice>>;
}

/// In-memory price source backed by a prepared snapshot.
#[derive(Debug, Clone, Default)]
pub struct StaticPriceSource {
    prices: HashMap<CompactString, Vec<ExchangePrice>>,
}

impl StaticPriceSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the quotes for a coin (builder pattern).
    pub fn with_prices(mut self, coin: &str, prices: Vec<ExchangePrice>) -> Self {
        self.insert(coin, prices);
        self
    }

    pub fn insert(&mut self, coin: &str, prices: Vec<ExchangePrice>) {
        self.prices.insert(CompactString::new(coin), prices);
    }

    /// Coins in the snapshot, sorted by name.
    pub fn coins(&self) -> Vec<&str> {
        let mut coins: Vec<&str> = self.prices.keys().map(|c| c.as_str()).collect();
        coins.sort_unstable();
        coins
    }
}

impl From<HashMap<String, Vec<ExchangePrice>>> for StaticPriceSource {
    fn from(map: HashMap<String, Vec<ExchangePrice>>) -> Self {
        Self {
            prices: map
                .into_iter()
                .map(|(coin, prices)| (CompactString::from(coin), prices))
                .collect(),
        }
    }
}

#[async_trait]
impl PriceSource for StaticPriceSource {
    async fn exchange_prices(&self, coin: &str) -> SourceResult<Vec<ExchangePrice>> {
        self.prices
            .get(coin)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(coin.to_string()))
    }
}

/// Scan `coins` concurrently and return every opportunity, highest profit first.
pub async fn scan_coins(
    source: Arc<dyn PriceSource>,
    coins: &[&str],
    investment_amount: f64,
) -> Vec<CryptoArbitrageOpportunity> {
    info!("Scanning {} coins for cross-exchange spreads", coins.len());

    let handles: Vec<_> = coins
        .iter()
        .map(|&coin| {
            let source = Arc::clone(&source);
            let coin = coin.to_string();
            let task_coin = coin.clone();
            let handle = tokio::spawn(async move {
                let prices = source.exchange_prices(&task_coin).await?;
                Ok::<_, SourceError>(find_crypto_opportunities(
                    &task_coin,
                    &prices,
                    investment_amount,
                ))
            });
            (coin, handle)
        })
        .collect();

    let mut all = Vec::new();
    for (coin, handle) in handles {
        match handle.await {
            Ok(Ok(opportunities)) => all.extend(opportunities),
            Ok(Err(e)) => warn!("Error fetching {} opportunities: {}", coin, e),
            Err(e) => warn!("Scan task for {} failed: {}", coin, e),
        }
    }

    rank_by_profit(&mut all);
    info!("Found {} cross-exchange opportunities", all.len());
    all
}
