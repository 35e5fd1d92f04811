//! Base-normalized exchange rate snapshot.

use crate::Currency;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Rates of every known currency relative to one base currency.
///
/// Entries keep insertion order. The search engine iterates currencies in
/// this order, so it determines which cycles are discovered first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RateTable {
    base: Option<Currency>,
    entries: Vec<(Currency, f64)>,
}

impl RateTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty table with a known base currency.
    pub fn with_base(base: Currency) -> Self {
        Self {
            base: Some(base),
            entries: Vec::new(),
        }
    }

    /// Build a table from `(code, rate)` entries, in order.
    pub fn from_rates<I, C>(rates: I) -> Self
    where
        I: IntoIterator<Item = (C, f64)>,
        C: Into<Currency>,
    {
        let mut table = Self::new();
        for (currency, rate) in rates {
            table.insert(currency, rate);
        }
        table
    }

    /// Insert or replace a rate. A replaced entry keeps its position.
    pub fn insert(&mut self, currency: impl Into<Currency>, rate: f64) {
        let currency = currency.into();
        match self.entries.iter_mut().find(|(c, _)| *c == currency) {
            Some(entry) => entry.1 = rate,
            None => self.entries.push((currency, rate)),
        }
    }

    /// Rate for a currency, if present.
    pub fn get(&self, currency: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(c, _)| c.as_str() == currency)
            .map(|(_, rate)| *rate)
    }

    /// Base currency the rates are expressed against, when known.
    pub fn base(&self) -> Option<&Currency> {
        self.base.as_ref()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Currencies in table order.
    pub fn currencies(&self) -> impl Iterator<Item = &Currency> + '_ {
        self.entries.iter().map(|(c, _)| c)
    }

    /// `(currency, rate)` entries in table order.
    pub fn iter(&self) -> impl Iterator<Item = (&Currency, f64)> + '_ {
        self.entries.iter().map(|(c, rate)| (c, *rate))
    }
}

/// Flat `{code: rate}` JSON object read in document order.
struct OrderedRates(Vec<(Currency, f64)>);

impl<'de> Deserialize<'de> for OrderedRates {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RatesVisitor;

        impl<'de> Visitor<'de> for RatesVisitor {
            type Value = OrderedRates;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of currency codes to rates")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((currency, rate)) = access.next_entry::<Currency, f64>()? {
                    entries.push((currency, rate));
                }
                Ok(OrderedRates(entries))
            }
        }

        deserializer.deserialize_map(RatesVisitor)
    }
}

/// Accepted input shapes: the rate provider's response envelope, or a bare map.
#[derive(Deserialize)]
#[serde(untagged)]
enum RateTableRepr {
    Envelope {
        #[serde(default)]
        base_code: Option<Currency>,
        conversion_rates: OrderedRates,
    },
    Flat(OrderedRates),
}

impl<'de> Deserialize<'de> for RateTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (base, rates) = match RateTableRepr::deserialize(deserializer)? {
            RateTableRepr::Envelope {
                base_code,
                conversion_rates,
            } => (base_code, conversion_rates),
            RateTableRepr::Flat(rates) => (None, rates),
        };

        let mut table = RateTable::from_rates(rates.0);
        table.base = base;
        Ok(table)
    }
}

impl Serialize for RateTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (currency, rate) in &self.entries {
            map.serialize_entry(currency, rate)?;
        }
        map.end()
    }
}
