//! Exploration budget for the cycle search.

/// Default ceiling on partial paths explored in one search.
pub const MAX_PATHS_EXPLORED: u64 = 1_000_000;

/// Counts partial paths visited by a single search invocation.
///
/// The budget is exhausted once the count exceeds the limit; from then on
/// the search abandons all further exploration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExplorationBudget {
    explored: u64,
    limit: u64,
}

impl Default for ExplorationBudget {
    fn default() -> Self {
        Self::new(MAX_PATHS_EXPLORED)
    }
}

impl ExplorationBudget {
    pub fn new(limit: u64) -> Self {
        Self { explored: 0, limit }
    }

    /// Count one more explored path. Returns the new total.
    #[inline]
    pub fn record(&mut self) -> u64 {
        self.explored += 1;
        self.explored
    }

    #[inline]
    pub fn explored(&self) -> u64 {
        self.explored
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.explored > self.limit
    }

    /// Paths that may still be recorded before exhaustion.
    pub fn remaining(&self) -> u64 {
        (self.limit + 1).saturating_sub(self.explored)
    }
}
