use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::timeframe::TimeFrame;

/// Universal parameters for requesting time-series bar data from any market data provider.
///
/// It is intended as the standard input for all
/// [`DataProvider`](crate::providers::DataProvider) implementations.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BarsRequestParams {
    /// List of symbols to request (e.g., `["AAPL"]`, `["MSFT", "GOOGL"]`).
    pub symbols: Vec<String>,

    /// The time interval for each bar (e.g., 1 minute, 1 day).
    ///
    /// **Validation of allowed values is performed by each data provider
    /// implementation, according to their own API rules.**
    pub timeframe: TimeFrame,

    /// Which stretch of history to return.
    pub window: HistoryWindow,
}

impl BarsRequestParams {
    /// Request the trailing `days` calendar days of history for `symbols`.
    pub fn trailing_days(symbols: Vec<String>, timeframe: TimeFrame, days: u32) -> Self {
        Self {
            symbols,
            timeframe,
            window: HistoryWindow::TrailingDays(days),
        }
    }
}

/// The time range covered by a bars request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum HistoryWindow {
    /// The most recent `n` calendar days, ending now. Weekends and exchange
    /// holidays inside the window simply yield no bars.
    TrailingDays(u32),

    /// An explicit range, `start` inclusive and `end` exclusive (UTC).
    Range {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}
