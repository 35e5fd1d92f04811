//! Cross-exchange comparator for a single coin.
//!
//! Compares every ordered (buy, sell) pair of exchange quotes and keeps the
//! ones where selling fetches more than buying costs.

use crate::rank_by_profit;
use arbitrage_core::{profit_percentage, CryptoArbitrageOpportunity, ExchangePrice};
use compact_str::CompactString;
use tracing::debug;

/// Default notional investment per opportunity, in USD.
pub const DEFAULT_INVESTMENT: f64 = 1000.0;

/// Find every profitable buy/sell combination for `coin`, highest profit first.
///
/// Quotes with a non-positive price or volume are ignored. Quotes are
/// ordered by exchange name, ignoring case, before pairing so ties rank
/// deterministically.
pub fn find_crypto_opportunities(
    coin: &str,
    prices: &[ExchangePrice],
    investment_amount: f64,
) -> Vec<CryptoArbitrageOpportunity> {
    let mut quotes: Vec<&ExchangePrice> = prices.iter().filter(|p| p.is_tradeable()).collect();
    quotes.sort_by_key(|p| p.exchange.to_lowercase());

    if quotes.len() < prices.len() {
        debug!(
            "{}: ignoring {} quotes without price or volume",
            coin,
            prices.len() - quotes.len()
        );
    }

    let mut opportunities = Vec::new();
    for (i, buy) in quotes.iter().enumerate() {
        for (j, sell) in quotes.iter().enumerate() {
            if i == j {
                continue;
            }

            let profit = profit_percentage(buy.price, sell.price);
            if profit > 0.0 {
                opportunities.push(CryptoArbitrageOpportunity {
                    coin: CompactString::new(coin),
                    buy_exchange: buy.exchange.clone(),
                    sell_exchange: sell.exchange.clone(),
                    buy_price: buy.price,
                    sell_price: sell.price,
                    profit_percentage: profit,
                    investment_amount,
                    potential_profit: investment_amount * profit / 100.0,
                    volume_24h: buy.volume.min(sell.volume),
                    last_updated: buy.last_updated,
                });
            }
        }
    }

    rank_by_profit(&mut opportunities);
    opportunities
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn quote(exchange: &str, price: f64, volume: f64) -> ExchangePrice {
        let ts = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        ExchangePrice::new(exchange, price, volume, ts)
    }

    #[test]
    fn test_single_spread() {
        let prices = vec![
            quote("Kraken", 50500.0, 2_000_000.0),
            quote("Binance", 50000.0, 5_000_000.0),
        ];
        let opps = find_crypto_opportunities("bitcoin", &prices, DEFAULT_INVESTMENT);

        assert_eq!(opps.len(), 1);
        let opp = &opps[0];
        assert_eq!(opp.coin, "bitcoin");
        assert_eq!(opp.buy_exchange, "Binance");
        assert_eq!(opp.sell_exchange, "Kraken");
        assert!((opp.profit_percentage - 1.0).abs() < 1e-12);
        assert!((opp.potential_profit - 10.0).abs() < 1e-9);
        assert_eq!(opp.volume_24h, 2_000_000.0);
        assert_eq!(opp.investment_amount, 1000.0);
    }

    #[test]
    fn test_equal_prices_yield_nothing() {
        let prices = vec![quote("A", 100.0, 1.0), quote("B", 100.0, 1.0)];
        assert!(find_crypto_opportunities("x", &prices, DEFAULT_INVESTMENT).is_empty());
    }

    #[test]
    fn test_ranked_across_all_pairs() {
        let prices = vec![
            quote("Coinbase", 102.0, 10.0),
            quote("Binance", 100.0, 10.0),
            quote("Kraken", 101.0, 10.0),
        ];
        let opps = find_crypto_opportunities("ethereum", &prices, DEFAULT_INVESTMENT);

        let legs: Vec<(&str, &str)> = opps
            .iter()
            .map(|o| (o.buy_exchange.as_str(), o.sell_exchange.as_str()))
            .collect();
        assert_eq!(
            legs,
            vec![("Binance", "Coinbase"), ("Binance", "Kraken"), ("Kraken", "Coinbase")]
        );
        assert!(opps.iter().all(|o| o.sell_price > o.buy_price));
    }

    #[test]
    fn test_ties_ordered_by_name_ignoring_case() {
        let prices = vec![
            quote("Crypto.com", 100.0, 10.0),
            quote("Kraken", 110.0, 10.0),
            quote("bitFlyer", 100.0, 10.0),
        ];
        let opps = find_crypto_opportunities("bitcoin", &prices, DEFAULT_INVESTMENT);

        let buys: Vec<&str> = opps.iter().map(|o| o.buy_exchange.as_str()).collect();
        assert_eq!(buys, vec!["bitFlyer", "Crypto.com"]);
        assert_eq!(opps[0].profit_percentage, opps[1].profit_percentage);
    }

    #[test]
    fn test_untradeable_quotes_ignored() {
        let prices = vec![
            quote("Binance", 100.0, 10.0),
            quote("Ghost", 0.0, 10.0),
            quote("Stale", 120.0, 0.0),
        ];
        assert!(find_crypto_opportunities("solana", &prices, DEFAULT_INVESTMENT).is_empty());
    }

    #[test]
    fn test_too_few_quotes() {
        assert!(find_crypto_opportunities("solana", &[], DEFAULT_INVESTMENT).is_empty());
        let prices = vec![quote("Binance", 100.0, 10.0)];
        assert!(find_crypto_opportunities("solana", &prices, DEFAULT_INVESTMENT).is_empty());
    }

    #[test]
    fn test_serialized_shape() {
        let prices = vec![quote("A", 100.0, 10.0), quote("B", 110.0, 20.0)];
        let opps = find_crypto_opportunities("dogecoin", &prices, 500.0);
        let value = serde_json::to_value(&opps[0]).unwrap();

        assert_eq!(value["buyExchange"], "A");
        assert_eq!(value["sellExchange"], "B");
        assert_eq!(value["volume24h"], 10.0);
        assert_eq!(value["investmentAmount"], 500.0);
        assert!(value.get("lastUpdated").is_some());
    }
}
