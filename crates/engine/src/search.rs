//! Bounded cycle search.
//!
//! Depth-first enumeration of simple conversion paths from every currency.
//! A path that arrives back at its start currency is closed: it is emitted
//! when the compounded amount beats the starting amount, and is never
//! extended further. Paths may not revisit any other currency.

use crate::{
    rank_by_profit, ExplorationBudget, RateMatrix, SearchObserver, TracingObserver,
    DEFAULT_TOP_N, MAX_PATHS_EXPLORED,
};
use arbitrage_core::{ArbitrageOpportunity, PathStep, RateTable};
use std::sync::Arc;
use tracing::info;

/// Longest candidate path, counted in steps (start included).
pub const MAX_PATH_LENGTH: usize = 4;

/// Notional investment used to scale amounts along a path.
pub const DEFAULT_START_AMOUNT: f64 = 1000.0;

/// Explored paths between progress notifications.
pub const PROGRESS_INTERVAL: u64 = 10_000;

/// Configuration for the cycle search.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Amount held in the start currency. Profit percentages do not depend on it.
    pub start_amount: f64,
    /// Maximum steps in a candidate path, start step included.
    pub max_path_length: usize,
    /// Ceiling on explored partial paths across all start currencies.
    pub max_paths_explored: u64,
    /// Paths between observer progress calls. Zero disables progress calls.
    pub progress_interval: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            start_amount: DEFAULT_START_AMOUNT,
            max_path_length: MAX_PATH_LENGTH,
            max_paths_explored: MAX_PATHS_EXPLORED,
            progress_interval: PROGRESS_INTERVAL,
        }
    }
}

/// Result of one complete search.
#[derive(Debug, Clone, Default)]
pub struct SearchOutcome {
    /// Every profitable cycle found, highest profit first.
    pub opportunities: Vec<ArbitrageOpportunity>,
    pub paths_explored: u64,
    pub pair_count: usize,
    /// True when the exploration budget cut the search short.
    pub budget_exhausted: bool,
}

impl SearchOutcome {
    /// The `n` most profitable cycles.
    pub fn top(&self, n: usize) -> &[ArbitrageOpportunity] {
        &self.opportunities[..n.min(self.opportunities.len())]
    }

    /// Consume the outcome, keeping only the `n` most profitable cycles.
    pub fn into_top(mut self, n: usize) -> Vec<ArbitrageOpportunity> {
        self.opportunities.truncate(n);
        self.opportunities
    }
}

/// Cycle arbitrage search engine.
pub struct CycleSearch {
    config: SearchConfig,
    observer: Arc<dyn SearchObserver>,
}

impl Default for CycleSearch {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl CycleSearch {
    /// Create a search reporting progress through `tracing`.
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            observer: Arc::new(TracingObserver),
        }
    }

    /// Replace the progress observer (builder pattern).
    pub fn with_observer(mut self, observer: Arc<dyn SearchObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Build the conversion matrix for `table` and search it.
    pub fn run(&self, table: &RateTable) -> SearchOutcome {
        self.run_matrix(&RateMatrix::from_table(table))
    }

    /// Search an already built conversion matrix.
    pub fn run_matrix(&self, matrix: &RateMatrix) -> SearchOutcome {
        info!(
            "Starting cycle search over {} currencies, {} pairs",
            matrix.currency_count(),
            matrix.pair_count()
        );

        let mut walker = PathWalker {
            matrix,
            config: &self.config,
            observer: self.observer.as_ref(),
            budget: ExplorationBudget::new(self.config.max_paths_explored),
            path: Vec::with_capacity(self.config.max_path_length),
            visited: vec![false; matrix.currency_count()],
            opportunities: Vec::new(),
        };

        for start in 0..matrix.currency_count() {
            self.observer.on_start_currency(matrix.currency(start));
            walker.explore_from(start);
            if walker.budget.is_exhausted() {
                self.observer.on_budget_exhausted(walker.budget.explored());
                break;
            }
        }

        let budget = walker.budget;
        let mut opportunities = walker.opportunities;
        rank_by_profit(&mut opportunities);

        info!(
            "Finished exploring {} paths, found {} opportunities",
            budget.explored(),
            opportunities.len()
        );

        SearchOutcome {
            opportunities,
            paths_explored: budget.explored(),
            pair_count: matrix.pair_count(),
            budget_exhausted: budget.is_exhausted(),
        }
    }
}

/// Search every cycle in `table` with default limits, highest profit first.
pub fn find_arbitrage_opportunities(
    table: &RateTable,
    start_amount: f64,
) -> Vec<ArbitrageOpportunity> {
    let config = SearchConfig {
        start_amount,
        ..Default::default()
    };
    CycleSearch::new(config).run(table).opportunities
}

/// Search `table` with default limits and keep the top five cycles.
pub fn top_arbitrage_opportunities(table: &RateTable) -> Vec<ArbitrageOpportunity> {
    CycleSearch::default().run(table).into_top(DEFAULT_TOP_N)
}

/// Step on the current path, by currency index.
#[derive(Debug, Clone, Copy)]
struct Frame {
    node: usize,
    amount: f64,
    rate: Option<f64>,
}

/// Mutable state owned by one search invocation.
struct PathWalker<'a> {
    matrix: &'a RateMatrix,
    config: &'a SearchConfig,
    observer: &'a dyn SearchObserver,
    budget: ExplorationBudget,
    path: Vec<Frame>,
    /// Currencies on the current path.
    visited: Vec<bool>,
    opportunities: Vec<ArbitrageOpportunity>,
}

impl PathWalker<'_> {
    fn explore_from(&mut self, start: usize) {
        self.path.clear();
        self.path.push(Frame {
            node: start,
            amount: self.config.start_amount,
            rate: None,
        });
        self.visited[start] = true;

        self.explore();

        self.visited[start] = false;
        self.path.clear();
    }

    fn explore(&mut self) {
        let explored = self.budget.record();
        if self.config.progress_interval > 0 && explored % self.config.progress_interval == 0 {
            self.observer
                .on_progress(explored, self.opportunities.len());
        }

        let start = self.path[0];
        let current = self.path[self.path.len() - 1];

        if self.path.len() > 1 && current.node == start.node {
            if current.amount > self.config.start_amount {
                self.emit();
            }
            return;
        }

        if self.path.len() >= self.config.max_path_length {
            return;
        }

        if self.budget.is_exhausted() {
            return;
        }

        let matrix = self.matrix;
        for edge in matrix.edges_from(current.node) {
            if self.budget.is_exhausted() {
                break;
            }
            let closes = edge.to == start.node;
            if !closes && self.visited[edge.to] {
                continue;
            }

            self.path.push(Frame {
                node: edge.to,
                amount: current.amount * edge.rate,
                rate: Some(edge.rate),
            });
            if !closes {
                self.visited[edge.to] = true;
            }

            self.explore();

            self.path.pop();
            if !closes {
                self.visited[edge.to] = false;
            }
        }
    }

    fn emit(&mut self) {
        let steps: Vec<PathStep> = self
            .path
            .iter()
            .map(|f| {
                let currency = self.matrix.currency(f.node).clone();
                match f.rate {
                    Some(rate) => PathStep::converted(currency, f.amount, rate),
                    None => PathStep::start(currency, f.amount),
                }
            })
            .collect();

        if let Some(opportunity) = ArbitrageOpportunity::from_cycle(steps) {
            self.observer.on_opportunity(&opportunity);
            self.opportunities.push(opportunity);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NoopObserver;
    use arbitrage_core::Currency;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Power-of-two rates: every cross rate and product is exact in f64.
    fn consistent_table() -> RateTable {
        RateTable::from_rates([
            ("USD", 1.0),
            ("EUR", 0.5),
            ("GBP", 0.25),
            ("JPY", 128.0),
            ("CHF", 2.0),
        ])
    }

    fn engineered_matrix() -> RateMatrix {
        let rates = RateTable::from_rates([("USD", 1.0), ("EUR", 0.5), ("GBP", 0.25)]);
        // Consistent GBP→USD is 4.0; the quoted 5.0 leaves a 25% cross-rate gap.
        RateMatrix::from_table(&rates).with_rate("GBP", "USD", 5.0)
    }

    /// Matrix with several independent cross-rate inefficiencies.
    fn noisy_matrix() -> RateMatrix {
        let rates = RateTable::from_rates([
            ("USD", 1.0),
            ("EUR", 0.92),
            ("GBP", 0.79),
            ("JPY", 151.3),
            ("CHF", 0.88),
            ("CAD", 1.36),
        ]);
        RateMatrix::from_table(&rates)
            .with_rate("EUR", "JPY", 166.0)
            .with_rate("GBP", "CHF", 1.14)
            .with_rate("CAD", "USD", 0.75)
            .with_rate("JPY", "GBP", 0.0054)
    }

    fn quiet_search(config: SearchConfig) -> CycleSearch {
        CycleSearch::new(config).with_observer(Arc::new(NoopObserver))
    }

    fn routes(outcome: &SearchOutcome) -> Vec<String> {
        outcome.opportunities.iter().map(|o| o.route()).collect()
    }

    #[test]
    fn test_config_default() {
        let config = SearchConfig::default();
        assert_eq!(config.start_amount, 1000.0);
        assert_eq!(config.max_path_length, 4);
        assert_eq!(config.max_paths_explored, 1_000_000);
        assert_eq!(config.progress_interval, 10_000);
    }

    #[test]
    fn test_engineered_three_hop_cycle() {
        let outcome = quiet_search(SearchConfig::default()).run_matrix(&engineered_matrix());

        assert!(!outcome.budget_exhausted);
        assert_eq!(
            routes(&outcome),
            vec![
                "USD → EUR → GBP → USD",
                "USD → GBP → USD",
                "EUR → GBP → USD → EUR",
                "GBP → USD → EUR → GBP",
                "GBP → USD → GBP",
            ]
        );

        let best = &outcome.opportunities[0];
        assert_eq!(best.profit_percentage, 25.0);
        assert_eq!(best.start_amount(), 1000.0);
        assert_eq!(best.final_amount(), 1250.0);
        assert_eq!(best.steps[1].rate, Some(0.5));
        assert_eq!(best.steps[2].rate, Some(0.5));
        assert_eq!(best.steps[3].rate, Some(5.0));
    }

    #[test]
    fn test_consistent_rates_yield_nothing() {
        let outcome = quiet_search(SearchConfig::default()).run(&consistent_table());
        assert!(outcome.opportunities.is_empty());
        assert!(!outcome.budget_exhausted);
        assert_eq!(outcome.pair_count, 20);
    }

    #[test]
    fn test_single_currency() {
        let table = RateTable::from_rates([("USD", 1.0)]);
        let outcome = quiet_search(SearchConfig::default()).run(&table);

        assert_eq!(outcome.pair_count, 0);
        assert!(outcome.opportunities.is_empty());
        assert_eq!(outcome.paths_explored, 1);
    }

    #[test]
    fn test_empty_table() {
        let outcome = quiet_search(SearchConfig::default()).run(&RateTable::new());
        assert!(outcome.opportunities.is_empty());
        assert_eq!(outcome.paths_explored, 0);
    }

    #[test]
    fn test_paths_explored_for_three_currencies() {
        // Per start: 1 + 2 + 4 + 2 partial paths.
        let rates = RateTable::from_rates([("USD", 1.0), ("EUR", 0.5), ("GBP", 0.25)]);
        let outcome = quiet_search(SearchConfig::default()).run(&rates);
        assert_eq!(outcome.paths_explored, 27);
    }

    #[test]
    fn test_emitted_cycles_are_closed_and_bounded() {
        let outcome = quiet_search(SearchConfig::default()).run_matrix(&noisy_matrix());
        assert!(!outcome.opportunities.is_empty());

        for opp in &outcome.opportunities {
            let first = &opp.steps[0];
            let last = opp.steps.last().unwrap();
            assert_eq!(first.currency, last.currency);
            assert!((2..=4).contains(&opp.steps.len()));
            assert!(first.rate.is_none());
            assert!(opp.steps[1..].iter().all(|s| s.rate.is_some()));
            assert!(opp.profit_percentage > 0.0);
        }
    }

    #[test]
    fn test_amounts_match_rate_product() {
        let outcome = quiet_search(SearchConfig::default()).run_matrix(&noisy_matrix());

        for opp in &outcome.opportunities {
            let expected_final = 1000.0 * opp.compounded_rate();
            assert!((opp.final_amount() - expected_final).abs() < 1e-9 * expected_final);

            let expected_profit = (opp.final_amount() - 1000.0) / 1000.0 * 100.0;
            assert!((opp.profit_percentage - expected_profit).abs() < 1e-9);
        }
    }

    #[test]
    fn test_path_interior_has_no_repeats() {
        let outcome = quiet_search(SearchConfig::default()).run_matrix(&noisy_matrix());

        for opp in &outcome.opportunities {
            let interior = &opp.steps[..opp.steps.len() - 1];
            let unique: HashSet<&Currency> = interior.iter().map(|s| &s.currency).collect();
            assert_eq!(unique.len(), interior.len(), "repeat in {}", opp.route());
        }
    }

    #[test]
    fn test_ranked_by_profit_descending() {
        let outcome = quiet_search(SearchConfig::default()).run_matrix(&noisy_matrix());
        for window in outcome.opportunities.windows(2) {
            assert!(window[0].profit_percentage >= window[1].profit_percentage);
        }
    }

    #[test]
    fn test_search_is_idempotent() {
        let search = quiet_search(SearchConfig::default());
        let matrix = noisy_matrix();
        let first = search.run_matrix(&matrix);
        let second = search.run_matrix(&matrix);

        assert_eq!(first.opportunities, second.opportunities);
        assert_eq!(first.paths_explored, second.paths_explored);
    }

    #[test]
    fn test_profit_independent_of_start_amount() {
        let small = quiet_search(SearchConfig {
            start_amount: 1.0,
            ..Default::default()
        })
        .run_matrix(&engineered_matrix());
        let large = quiet_search(SearchConfig::default()).run_matrix(&engineered_matrix());

        let profits = |outcome: &SearchOutcome| -> Vec<f64> {
            outcome.opportunities.iter().map(|o| o.profit_percentage).collect()
        };
        assert_eq!(profits(&small), profits(&large));
    }

    #[test]
    fn test_closing_stops_extension() {
        // USD→EUR→USD closes at break-even; it must not continue to a
        // longer profitable cycle through the same prefix.
        let rates = RateTable::from_rates([("USD", 1.0), ("EUR", 0.5), ("GBP", 0.25)]);
        let matrix = RateMatrix::from_table(&rates).with_rate("GBP", "USD", 5.0);
        let outcome = quiet_search(SearchConfig::default()).run_matrix(&matrix);

        assert!(outcome
            .opportunities
            .iter()
            .all(|o| o.steps[1..o.steps.len() - 1]
                .iter()
                .all(|s| s.currency != o.steps[0].currency)));
    }

    #[test]
    fn test_shorter_max_path_length() {
        let config = SearchConfig {
            max_path_length: 3,
            ..Default::default()
        };
        let outcome = quiet_search(config).run_matrix(&engineered_matrix());

        assert_eq!(routes(&outcome), vec!["USD → GBP → USD", "GBP → USD → GBP"]);
    }

    #[test]
    fn test_top_truncates() {
        let outcome = quiet_search(SearchConfig::default()).run_matrix(&engineered_matrix());
        assert_eq!(outcome.top(2).len(), 2);
        assert_eq!(outcome.top(50).len(), 5);
        assert_eq!(outcome.clone().into_top(DEFAULT_TOP_N).len(), 5);
        assert_eq!(outcome.into_top(1)[0].route(), "USD → EUR → GBP → USD");
    }

    #[test]
    fn test_small_budget_returns_partial_results() {
        let config = SearchConfig {
            max_paths_explored: 5,
            ..Default::default()
        };
        let outcome = quiet_search(config).run_matrix(&engineered_matrix());

        // USD, USD→EUR, USD→EUR→USD, USD→EUR→GBP, USD→EUR→GBP→USD, then USD→GBP
        // is the sixth path and exhausts the budget.
        assert!(outcome.budget_exhausted);
        assert_eq!(outcome.paths_explored, 6);
        assert_eq!(routes(&outcome), vec!["USD → EUR → GBP → USD"]);
    }

    #[test]
    fn test_large_table_hits_budget() {
        // 40 currencies would need roughly 2.3 million partial paths.
        let rates = RateTable::from_rates(
            (0..40).map(|i| (format!("C{i:02}"), f64::powi(2.0, (i % 9) as i32 - 4))),
        );
        let outcome = quiet_search(SearchConfig::default()).run(&rates);

        assert!(outcome.budget_exhausted);
        assert_eq!(outcome.paths_explored, MAX_PATHS_EXPLORED + 1);
        assert!(outcome.opportunities.is_empty());
        assert_eq!(outcome.pair_count, 40 * 39);
    }

    #[derive(Default)]
    struct RecordingObserver {
        progress_calls: AtomicUsize,
        last_progress: AtomicU64,
        starts: Mutex<Vec<String>>,
        found: AtomicUsize,
        exhausted_at: AtomicU64,
    }

    impl SearchObserver for RecordingObserver {
        fn on_progress(&self, paths_explored: u64, _opportunities_found: usize) {
            self.progress_calls.fetch_add(1, Ordering::SeqCst);
            self.last_progress.store(paths_explored, Ordering::SeqCst);
        }

        fn on_start_currency(&self, currency: &Currency) {
            self.starts.lock().unwrap().push(currency.to_string());
        }

        fn on_opportunity(&self, _opportunity: &ArbitrageOpportunity) {
            self.found.fetch_add(1, Ordering::SeqCst);
        }

        fn on_budget_exhausted(&self, paths_explored: u64) {
            self.exhausted_at.store(paths_explored, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_observer_milestones() {
        let observer = Arc::new(RecordingObserver::default());
        let config = SearchConfig {
            progress_interval: 5,
            ..Default::default()
        };
        let outcome = CycleSearch::new(config)
            .with_observer(observer.clone())
            .run_matrix(&engineered_matrix());

        assert_eq!(outcome.paths_explored, 27);
        assert_eq!(observer.progress_calls.load(Ordering::SeqCst), 5);
        assert_eq!(observer.last_progress.load(Ordering::SeqCst), 25);
        assert_eq!(*observer.starts.lock().unwrap(), vec!["USD", "EUR", "GBP"]);
        assert_eq!(outcome.opportunities.len(), 5);
        assert_eq!(observer.found.load(Ordering::SeqCst), 5);
        assert_eq!(observer.exhausted_at.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_observer_does_not_change_results() {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();

        let traced = CycleSearch::new(SearchConfig {
            progress_interval: 1,
            ..Default::default()
        })
        .run_matrix(&noisy_matrix());
        let quiet = quiet_search(SearchConfig::default()).run_matrix(&noisy_matrix());

        assert_eq!(traced.opportunities, quiet.opportunities);
    }

    #[test]
    fn test_observer_sees_budget_exhaustion() {
        let observer = Arc::new(RecordingObserver::default());
        let config = SearchConfig {
            max_paths_explored: 10,
            ..Default::default()
        };
        let outcome = CycleSearch::new(config)
            .with_observer(observer.clone())
            .run(&consistent_table());

        assert!(outcome.budget_exhausted);
        assert_eq!(observer.exhausted_at.load(Ordering::SeqCst), 11);
        assert_eq!(*observer.starts.lock().unwrap(), vec!["USD"]);
    }

    #[test]
    fn test_find_arbitrage_opportunities_helper() {
        assert!(find_arbitrage_opportunities(&consistent_table(), 1000.0).is_empty());
        assert!(top_arbitrage_opportunities(&consistent_table()).is_empty());
    }

    #[test]
    fn test_search_exposes_config() {
        let search = quiet_search(SearchConfig {
            max_path_length: 3,
            ..Default::default()
        });
        assert_eq!(search.config().max_path_length, 3);
        assert_eq!(search.config().start_amount, DEFAULT_START_AMOUNT);
    }

    #[test]
    fn test_emitted_steps_carry_rates() {
        let outcome = quiet_search(SearchConfig::default()).run_matrix(&engineered_matrix());
        let opp = &outcome.opportunities[0];

        assert_eq!(opp.steps[0].rate, None);
        let rates: Vec<Option<f64>> = opp.steps[1..].iter().map(|s| s.rate).collect();
        assert_eq!(rates, vec![Some(0.5), Some(0.5), Some(5.0)]);
    }

    #[test]
    fn test_zero_and_negative_rates_pass_through() {
        let table =
            RateTable::from_rates([("USD", 1.0), ("ZZZ", 0.0), ("NEG", -1.0), ("EUR", 0.5)]);
        let outcome = quiet_search(SearchConfig::default()).run(&table);

        assert_eq!(outcome.pair_count, 12);
        assert_eq!(outcome.paths_explored, 100);
        assert!(!outcome.budget_exhausted);
        for opp in &outcome.opportunities {
            assert!(opp.profit_percentage.is_finite(), "{}", opp.route());
        }
    }
}
