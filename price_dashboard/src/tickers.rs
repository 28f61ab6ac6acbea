//! Company display name → ticker symbol mapping.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The six companies shown by default, in display order.
pub const DEFAULT_TICKERS: [(&str, &str); 6] = [
    ("apple", "AAPL"),
    ("facebook", "META"),
    ("google", "GOOGL"),
    ("microsoft", "MSFT"),
    ("netflix", "NFLX"),
    ("amazon", "AMZN"),
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TickerMapError {
    #[error("ticker map must contain at least one company")]
    Empty,

    #[error("company name listed twice: {0}")]
    DuplicateName(String),

    #[error("blank company name or ticker symbol")]
    BlankEntry,
}

/// Ordered, immutable mapping from company display name to ticker symbol.
///
/// Iteration order is insertion order and becomes the row order of every
/// price table built from the map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "IndexMap<String, String>", into = "IndexMap<String, String>")]
pub struct TickerMap(IndexMap<String, String>);

impl TickerMap {
    /// Builds a map from `(name, symbol)` pairs, trimming both sides.
    pub fn new<I, K, V>(entries: I) -> Result<Self, TickerMapError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut map = IndexMap::new();
        for (name, symbol) in entries {
            let name = name.into().trim().to_string();
            let symbol = symbol.into().trim().to_string();
            if name.is_empty() || symbol.is_empty() {
                return Err(TickerMapError::BlankEntry);
            }
            if map.insert(name.clone(), symbol).is_some() {
                return Err(TickerMapError::DuplicateName(name));
            }
        }
        if map.is_empty() {
            return Err(TickerMapError::Empty);
        }
        Ok(Self(map))
    }

    /// The built-in six-company map.
    pub fn gafa() -> Self {
        Self(
            DEFAULT_TICKERS
                .iter()
                .map(|(name, symbol)| (name.to_string(), symbol.to_string()))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(name, symbol)| (name.as_str(), symbol.as_str()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn symbol(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Stable textual form, used as part of the price table cache key.
    ///
    /// Two maps serialize identically only if they hold the same pairs in the
    /// same order.
    pub fn serialized(&self) -> String {
        self.iter()
            .map(|(name, symbol)| format!("{name}={symbol}"))
            .collect::<Vec<_>>()
            .join(";")
    }
}

impl Default for TickerMap {
    fn default() -> Self {
        Self::gafa()
    }
}

impl TryFrom<IndexMap<String, String>> for TickerMap {
    type Error = TickerMapError;

    fn try_from(map: IndexMap<String, String>) -> Result<Self, Self::Error> {
        Self::new(map)
    }
}

impl From<TickerMap> for IndexMap<String, String> {
    fn from(map: TickerMap) -> Self {
        map.0
    }
}
