//! Cross-exchange price quotes and two-market opportunities.

use chrono::{DateTime, Utc};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Last traded price of one coin on one exchange, in USD.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangePrice {
    pub exchange: CompactString,
    pub price: f64,
    /// 24h volume in USD.
    pub volume: f64,
    pub last_updated: DateTime<Utc>,
}

impl ExchangePrice {
    pub fn new(exchange: &str, price: f64, volume: f64, last_updated: DateTime<Utc>) -> Self {
        Self {
            exchange: CompactString::new(exchange),
            price,
            volume,
            last_updated,
        }
    }

    /// Quotes with a non-positive price or volume carry no usable market.
    #[inline]
    pub fn is_tradeable(&self) -> bool {
        self.price > 0.0 && self.volume > 0.0
    }
}

/// Buy on one exchange, sell the same coin on another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CryptoArbitrageOpportunity {
    pub coin: CompactString,
    pub buy_exchange: CompactString,
    pub sell_exchange: CompactString,
    pub buy_price: f64,
    pub sell_price: f64,
    pub profit_percentage: f64,
    pub investment_amount: f64,
    pub potential_profit: f64,
    /// Smaller of the two markets' 24h volumes.
    #[serde(rename = "volume24h")]
    pub volume_24h: f64,
    /// Timestamp of the buy-side quote.
    pub last_updated: DateTime<Utc>,
}
