//! Two-way sports betting comparator.
//!
//! Takes the best decimal odds for each side of a head-to-head match across
//! bookmakers. When the implied probabilities sum to less than one, staking
//! both sides in proportion to them locks in a profit.

use crate::rank_by_profit;
use arbitrage_core::{
    BetAmounts, BookmakerOdds, MatchOdds, SportsArbitrageOpportunity, TeamBet,
};
use tracing::debug;

/// Default total stake per match.
pub const DEFAULT_STAKE: f64 = 1000.0;

/// Best odds for the home and away side, if every side is quoted somewhere.
///
/// Only the `h2h` market counts. A later bookmaker replaces the current best
/// only with strictly higher odds.
pub fn best_odds(m: &MatchOdds) -> Option<(BookmakerOdds, BookmakerOdds)> {
    let mut best_home: Option<BookmakerOdds> = None;
    let mut best_away: Option<BookmakerOdds> = None;

    for bookmaker in &m.bookmakers {
        let Some(market) = bookmaker.h2h() else {
            continue;
        };

        for (team, best) in [(&m.home_team, &mut best_home), (&m.away_team, &mut best_away)] {
            if let Some(odds) = market.price_for(team) {
                if best.as_ref().map_or(true, |b| odds > b.odds) {
                    *best = Some(BookmakerOdds {
                        bookmaker: bookmaker.title.clone(),
                        odds,
                    });
                }
            }
        }
    }

    Some((best_home?, best_away?))
}

/// Evaluate one match for a two-way arbitrage.
pub fn calculate_sports_arbitrage(
    m: &MatchOdds,
    investment_amount: f64,
) -> Option<SportsArbitrageOpportunity> {
    let (home, away) = best_odds(m)?;

    let implied_home = 1.0 / home.odds;
    let implied_away = 1.0 / away.odds;
    let total_implied = implied_home + implied_away;

    if total_implied >= 1.0 {
        return None;
    }

    let profit = 1.0 / total_implied - 1.0;
    debug!(
        "{} vs {}: implied probability {:.4}, {:.2}% profit",
        m.home_team,
        m.away_team,
        total_implied,
        profit * 100.0
    );

    Some(SportsArbitrageOpportunity {
        sport: m.sport_title.clone(),
        event: format!("{} vs {}", m.home_team, m.away_team),
        time: m.commence_time,
        team1: TeamBet {
            name: m.home_team.clone(),
            bookmaker: home.bookmaker,
            odds: home.odds,
        },
        team2: TeamBet {
            name: m.away_team.clone(),
            bookmaker: away.bookmaker,
            odds: away.odds,
        },
        investment_amount,
        profit_percentage: profit * 100.0,
        potential_profit: investment_amount * profit,
        bet_amounts: BetAmounts {
            team1: investment_amount * implied_home / total_implied,
            team2: investment_amount * implied_away / total_implied,
        },
    })
}

/// Evaluate every match, highest profit first.
pub fn find_sports_opportunities(
    matches: &[MatchOdds],
    investment_amount: f64,
) -> Vec<SportsArbitrageOpportunity> {
    let mut opportunities: Vec<_> = matches
        .iter()
        .filter_map(|m| calculate_sports_arbitrage(m, investment_amount))
        .collect();
    rank_by_profit(&mut opportunities);
    opportunities
}
