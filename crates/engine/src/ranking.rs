//! Profit ranking shared by every opportunity kind.

use arbitrage_core::{ArbitrageOpportunity, CryptoArbitrageOpportunity, SportsArbitrageOpportunity};
use std::cmp::Ordering;

/// Number of opportunities returned to callers by default.
pub const DEFAULT_TOP_N: usize = 5;

/// Anything ranked by its profit percentage.
pub trait ProfitRanked {
    fn profit_percentage(&self) -> f64;
}

impl ProfitRanked for ArbitrageOpportunity {
    fn profit_percentage(&self) -> f64 {
        self.profit_percentage
    }
}

impl ProfitRanked for CryptoArbitrageOpportunity {
    fn profit_percentage(&self) -> f64 {
        self.profit_percentage
    }
}

impl ProfitRanked for SportsArbitrageOpportunity {
    fn profit_percentage(&self) -> f64 {
        self.profit_percentage
    }
}

/// Sort by profit percentage, highest first. Ties keep their relative order.
pub fn rank_by_profit<T: ProfitRanked>(items: &mut [T]) {
    items.sort_by(|a, b| {
        b.profit_percentage()
            .partial_cmp(&a.profit_percentage())
            .unwrap_or(Ordering::Equal)
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug, PartialEq)]
    struct Item(&'static str, f64);

    impl ProfitRanked for Item {
        fn profit_percentage(&self) -> f64 {
            self.1
        }
    }

    #[test]
    fn test_rank_descending() {
        let mut items = vec![Item("a", 0.5), Item("b", 2.0), Item("c", 1.0)];
        rank_by_profit(&mut items);
        assert_eq!(items, vec![Item("b", 2.0), Item("c", 1.0), Item("a", 0.5)]);
    }

    #[test]
    fn test_rank_is_stable_on_ties() {
        let mut items = vec![
            Item("first", 1.0),
            Item("top", 3.0),
            Item("second", 1.0),
            Item("third", 1.0),
        ];
        rank_by_profit(&mut items);
        let names: Vec<_> = items.iter().map(|i| i.0).collect();
        assert_eq!(names, vec!["top", "first", "second", "third"]);
    }
}
