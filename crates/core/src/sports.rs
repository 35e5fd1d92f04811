//! Head-to-head match odds and two-way betting opportunities.

use chrono::{DateTime, Utc};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Market key for two-way (home/away) moneyline odds.
pub const H2H_MARKET: &str = "h2h";

/// Match record as published by the odds provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchOdds {
    pub id: String,
    pub sport_key: CompactString,
    pub sport_title: CompactString,
    pub commence_time: DateTime<Utc>,
    pub home_team: String,
    pub away_team: String,
    #[serde(default)]
    pub bookmakers: Vec<Bookmaker>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bookmaker {
    pub key: CompactString,
    pub title: String,
    #[serde(default)]
    pub markets: Vec<Market>,
}

impl Bookmaker {
    /// The head-to-head market, if this bookmaker offers one.
    pub fn h2h(&self) -> Option<&Market> {
        self.markets.iter().find(|m| m.key == H2H_MARKET)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Market {
    pub key: CompactString,
    #[serde(default)]
    pub outcomes: Vec<Outcome>,
}

impl Market {
    /// Decimal odds offered for a named outcome.
    pub fn price_for(&self, name: &str) -> Option<f64> {
        self.outcomes.iter().find(|o| o.name == name).map(|o| o.price)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    pub name: String,
    /// Decimal odds.
    pub price: f64,
}

/// Best available odds for one side of a match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookmakerOdds {
    pub bookmaker: String,
    pub odds: f64,
}

/// One side of a sports opportunity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamBet {
    pub name: String,
    pub bookmaker: String,
    pub odds: f64,
}

/// Stake split across both sides.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BetAmounts {
    pub team1: f64,
    pub team2: f64,
}

/// Backing both sides at different bookmakers for a guaranteed return.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SportsArbitrageOpportunity {
    pub sport: CompactString,
    pub event: String,
    pub time: DateTime<Utc>,
    pub team1: TeamBet,
    pub team2: TeamBet,
    pub investment_amount: f64,
    pub profit_percentage: f64,
    pub potential_profit: f64,
    pub bet_amounts: BetAmounts,
}
