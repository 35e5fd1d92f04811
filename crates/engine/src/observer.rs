//! Progress hooks for the cycle search.
//!
//! Observers only watch; nothing they do feeds back into the search.

use arbitrage_core::{ArbitrageOpportunity, Currency};
use tracing::{debug, info};

/// Receives milestones while a search runs.
pub trait SearchObserver: Send + Sync {
    /// Called every `progress_interval` explored paths.
    fn on_progress(&self, paths_explored: u64, opportunities_found: usize);

    /// Called when exploration from a new start currency begins.
    fn on_start_currency(&self, _currency: &Currency) {}

    /// Called for every profitable cycle as it is found.
    fn on_opportunity(&self, _opportunity: &ArbitrageOpportunity) {}

    /// Called once when the exploration budget runs out.
    fn on_budget_exhausted(&self, _paths_explored: u64) {}
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {
    fn on_progress(&self, _paths_explored: u64, _opportunities_found: usize) {}
}

/// Observer that reports milestones through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl SearchObserver for TracingObserver {
    fn on_progress(&self, paths_explored: u64, opportunities_found: usize) {
        debug!(
            "Explored {} paths, found {} opportunities",
            paths_explored, opportunities_found
        );
    }

    fn on_start_currency(&self, currency: &Currency) {
        debug!("Exploring paths starting with {}", currency);
    }

    fn on_opportunity(&self, opportunity: &ArbitrageOpportunity) {
        debug!(
            "Found profitable cycle with {:.2}% profit: {}",
            opportunity.profit_percentage,
            opportunity.route()
        );
    }

    fn on_budget_exhausted(&self, paths_explored: u64) {
        info!(
            "Reached maximum path exploration limit after {} paths",
            paths_explored
        );
    }
}
