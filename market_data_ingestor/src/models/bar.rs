//! Canonical in-memory representation of a time-series bar (OHLCV).
//!
//! This struct is used as the standard output for all [`DataProvider`](crate::providers::DataProvider)
//! implementations, regardless of vendor.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::models::timeframe::TimeFrame;

/// A single time-series bar (OHLCV) for a given timestamp.
///
/// This struct is vendor-agnostic and is used throughout the data ingestion pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    /// The timestamp for this bar (UTC).
    pub timestamp: DateTime<Utc>,

    /// Opening price.
    pub open: f64,

    /// Highest price during the bar interval.
    pub high: f64,

    /// Lowest price during the bar interval.
    pub low: f64,

    /// Closing price.
    pub close: f64,

    /// Volume traded during the bar interval.
    pub volume: f64,
}

/// Represents a complete set of time-series data for a single symbol.
///
/// This struct groups a vector of [`Bar`]s with their corresponding symbol
/// and [`TimeFrame`], making the data set self-describing.
#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    /// The symbol this data represents (e.g., "AAPL", "GOOGL").
    pub symbol: String,
    /// The time interval for each bar in the series.
    pub timeframe: TimeFrame,
    /// Time zone of the listing exchange, when the vendor reports one.
    pub exchange_tz: Option<Tz>,
    /// The collection of OHLCV bars.
    pub bars: Vec<Bar>,
}

impl BarSeries {
    /// Trading date of `bar` as seen on the listing exchange.
    ///
    /// Daily bars are stamped at the session open, which falls on the previous
    /// UTC day for Asian exchanges, so the date must be taken in exchange time.
    /// Without a known exchange zone the UTC date is used.
    pub fn session_date(&self, bar: &Bar) -> NaiveDate {
        match self.exchange_tz {
            Some(tz) => bar.timestamp.with_timezone(&tz).date_naive(),
            None => bar.timestamp.date_naive(),
        }
    }
}
