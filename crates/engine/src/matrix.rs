//! Pairwise conversion matrix.
//!
//! Expands a base-normalized rate table into a complete directed graph of
//! cross rates, one edge per ordered pair of distinct currencies.

use arbitrage_core::{ConversionPair, Currency, RateTable};
use std::collections::HashMap;
use tracing::debug;

/// Outgoing edge in the adjacency view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    /// Index of the destination currency.
    pub to: usize,
    pub rate: f64,
}

/// Dense conversion graph built from a rate snapshot.
#[derive(Debug, Clone, Default)]
pub struct RateMatrix {
    currencies: Vec<Currency>,
    index: HashMap<Currency, usize>,
    /// Pairs in construction order.
    pairs: Vec<ConversionPair>,
    /// Outgoing edges per currency index, in construction order.
    adjacency: Vec<Vec<Edge>>,
}

impl RateMatrix {
    /// Build every cross rate `rates[to] / rates[from]` for `from != to`.
    ///
    /// Pairs are produced with `from` in table order as the outer loop and
    /// `to` in table order as the inner loop. Fewer than two currencies yield
    /// an empty matrix.
    pub fn from_table(table: &RateTable) -> Self {
        let n = table.len();
        let mut pairs = Vec::with_capacity(n * n.saturating_sub(1));

        for (from, from_rate) in table.iter() {
            for (to, to_rate) in table.iter() {
                if from != to {
                    pairs.push(ConversionPair::cross(
                        from.clone(),
                        from_rate,
                        to.clone(),
                        to_rate,
                    ));
                }
            }
        }

        let mut matrix = Self::with_currencies(table.currencies().cloned());
        matrix.pairs = pairs;
        matrix.rebuild_adjacency();

        debug!(
            currencies = matrix.currencies.len(),
            pairs = matrix.pairs.len(),
            "Created currency pairs"
        );
        matrix
    }

    /// Build a matrix from explicit directed quotes, kept in the given order.
    ///
    /// Self-loops are dropped. Currencies are indexed in order of first
    /// appearance.
    pub fn from_pairs(pairs: impl IntoIterator<Item = ConversionPair>) -> Self {
        let mut matrix = Self::default();
        for pair in pairs {
            matrix.push_pair(pair);
        }
        matrix.rebuild_adjacency();
        matrix
    }

    /// Override a single directed rate (builder pattern).
    ///
    /// An existing pair keeps its position in construction order; a new pair
    /// is appended.
    pub fn with_rate(mut self, from: &str, to: &str, rate: f64) -> Self {
        self.set_rate(from, to, rate);
        self
    }

    /// Override a single directed rate in place.
    pub fn set_rate(&mut self, from: &str, to: &str, rate: f64) {
        match self
            .pairs
            .iter_mut()
            .find(|p| p.from.as_str() == from && p.to.as_str() == to)
        {
            Some(pair) => pair.rate = rate,
            None => self.push_pair(ConversionPair::new(from, to, rate)),
        }
        self.rebuild_adjacency();
    }

    fn with_currencies(currencies: impl IntoIterator<Item = Currency>) -> Self {
        let mut matrix = Self::default();
        for currency in currencies {
            matrix.intern(&currency);
        }
        matrix
    }

    fn intern(&mut self, currency: &Currency) -> usize {
        if let Some(&idx) = self.index.get(currency) {
            return idx;
        }
        let idx = self.currencies.len();
        self.currencies.push(currency.clone());
        self.index.insert(currency.clone(), idx);
        idx
    }

    fn push_pair(&mut self, pair: ConversionPair) {
        if pair.from == pair.to {
            debug!(currency = %pair.from, "Ignoring self-conversion pair");
            return;
        }
        self.intern(&pair.from);
        self.intern(&pair.to);
        self.pairs.push(pair);
    }

    fn rebuild_adjacency(&mut self) {
        let mut adjacency = vec![Vec::new(); self.currencies.len()];
        for pair in &self.pairs {
            let from = self.index[&pair.from];
            let to = self.index[&pair.to];
            adjacency[from].push(Edge {
                to,
                rate: pair.rate,
            });
        }
        self.adjacency = adjacency;
    }

    /// Currencies in index order.
    pub fn currencies(&self) -> &[Currency] {
        &self.currencies
    }

    /// Currency at an index.
    pub fn currency(&self, idx: usize) -> &Currency {
        &self.currencies[idx]
    }

    /// Index of a currency, if present.
    pub fn index_of(&self, currency: &str) -> Option<usize> {
        self.index.get(currency).copied()
    }

    /// All pairs in construction order.
    pub fn pairs(&self) -> &[ConversionPair] {
        &self.pairs
    }

    pub fn pair_count(&self) -> usize {
        self.pairs.len()
    }

    pub fn currency_count(&self) -> usize {
        self.currencies.len()
    }

    /// Outgoing edges of a currency, in construction order.
    #[inline]
    pub fn edges_from(&self, idx: usize) -> &[Edge] {
        &self.adjacency[idx]
    }

    /// Directed rate between two currencies, if quoted.
    pub fn rate(&self, from: &str, to: &str) -> Option<f64> {
        let from = self.index_of(from)?;
        let to = self.index_of(to)?;
        self.adjacency[from]
            .iter()
            .find(|e| e.to == to)
            .map(|e| e.rate)
    }
}
