//! Conversion cycles and detected cycle opportunities.

use crate::Currency;
use serde::{Deserialize, Serialize};

/// A node visited along a candidate cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathStep {
    pub currency: Currency,
    /// Running amount after converting into `currency`.
    pub amount: f64,
    /// Rate used to reach this step. `None` for the starting step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate: Option<f64>,
}

impl PathStep {
    /// Starting step holding the invested amount.
    pub fn start(currency: Currency, amount: f64) -> Self {
        Self {
            currency,
            amount,
            rate: None,
        }
    }

    /// Step reached by converting the previous amount at `rate`.
    pub fn converted(currency: Currency, amount: f64, rate: f64) -> Self {
        Self {
            currency,
            amount,
            rate: Some(rate),
        }
    }
}

/// Relative gain of `final_amount` over `start_amount`, in percent.
#[inline]
pub fn profit_percentage(start_amount: f64, final_amount: f64) -> f64 {
    (final_amount - start_amount) / start_amount * 100.0
}

/// Profitable conversion cycle returning to its starting currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArbitrageOpportunity {
    pub steps: Vec<PathStep>,
    pub profit_percentage: f64,
}

impl ArbitrageOpportunity {
    /// Build an opportunity from a closed path.
    ///
    /// Returns `None` unless the path has at least two steps, ends where it
    /// started, and finishes with more than it began with.
    pub fn from_cycle(steps: Vec<PathStep>) -> Option<Self> {
        let (first, last) = match steps.as_slice() {
            [first, .., last] => (first, last),
            _ => return None,
        };
        if first.currency != last.currency || last.amount <= first.amount {
            return None;
        }

        let profit_percentage = profit_percentage(first.amount, last.amount);
        Some(Self {
            steps,
            profit_percentage,
        })
    }

    /// Currency the cycle starts and ends in.
    pub fn start_currency(&self) -> Option<&Currency> {
        self.steps.first().map(|s| &s.currency)
    }

    pub fn start_amount(&self) -> f64 {
        self.steps.first().map(|s| s.amount).unwrap_or(0.0)
    }

    pub fn final_amount(&self) -> f64 {
        self.steps.last().map(|s| s.amount).unwrap_or(0.0)
    }

    /// Number of conversions in the cycle.
    pub fn hop_count(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    /// Product of every conversion rate along the cycle.
    pub fn compounded_rate(&self) -> f64 {
        self.steps.iter().filter_map(|s| s.rate).product()
    }

    /// Human-readable route, e.g. `USD → EUR → GBP → USD`.
    pub fn route(&self) -> String {
        self.steps
            .iter()
            .map(|s| s.currency.as_str())
            .collect::<Vec<_>>()
            .join(" → ")
    }
}
