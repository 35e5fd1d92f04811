//! Directed conversion between two currencies.

use crate::Currency;
use serde::{Deserialize, Serialize};

/// Multiplicative rate for converting one unit of `from` into `to`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionPair {
    pub from: Currency,
    pub to: Currency,
    pub rate: f64,
}

impl ConversionPair {
    pub fn new(from: impl Into<Currency>, to: impl Into<Currency>, rate: f64) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            rate,
        }
    }

    /// Cross rate derived from two base-relative rates: `to_rate / from_rate`.
    pub fn cross(from: Currency, from_rate: f64, to: Currency, to_rate: f64) -> Self {
        Self {
            from,
            to,
            rate: to_rate / from_rate,
        }
    }
}
