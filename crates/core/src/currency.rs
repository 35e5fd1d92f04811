//! Currency code type.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;

/// ISO-like currency code (e.g., "USD", "EUR", "JPY").
///
/// Codes are kept exactly as supplied by the rate source; no case folding
/// is applied, so "usd" and "USD" are distinct currencies.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Currency(CompactString);

impl Currency {
    /// Create a currency from its code.
    pub fn new(code: &str) -> Self {
        Self(CompactString::new(code))
    }

    /// Get the currency code.
    #[inline]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn usd() -> Self {
        Self::new("USD")
    }
}

impl From<&str> for Currency {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl From<String> for Currency {
    fn from(code: String) -> Self {
        Self(CompactString::from(code))
    }
}

impl Borrow<str> for Currency {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<str> for Currency {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for Currency {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
