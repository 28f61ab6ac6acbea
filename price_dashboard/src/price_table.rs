//! Wide table of closing prices: one row per company, one column per trading date.

use std::{collections::BTreeSet, fmt};

use chrono::NaiveDate;
use indexmap::IndexMap;
use market_data_ingestor::{
    models::{request_params::BarsRequestParams, timeframe::TimeFrame},
    providers::{DataProvider, ProviderError},
};
use tracing::{debug, warn};

use crate::{errors::DashboardError, tickers::TickerMap};

/// strftime pattern for column labels, e.g. `05 March 2024`.
pub const DATE_LABEL_FORMAT: &str = "%d %B %Y";

pub fn date_label(date: NaiveDate) -> String {
    date.format(DATE_LABEL_FORMAT).to_string()
}

/// Closing prices of one company keyed by trading date, oldest first.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceRow {
    pub name: String,
    pub closes: IndexMap<NaiveDate, f64>,
}

impl PriceRow {
    pub fn new(name: impl Into<String>, closes: impl IntoIterator<Item = (NaiveDate, f64)>) -> Self {
        let mut closes: IndexMap<NaiveDate, f64> = closes.into_iter().collect();
        closes.sort_keys();
        Self {
            name: name.into(),
            closes,
        }
    }

    pub fn close_on(&self, date: NaiveDate) -> Option<f64> {
        self.closes.get(&date).copied()
    }
}

/// Company × date table of closing prices.
///
/// Rows keep their own date sets. A date missing from one company's history
/// is simply absent from that row; nothing is aligned or null-filled.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PriceTable {
    rows: Vec<PriceRow>,
}

impl PriceTable {
    pub fn from_rows(rows: Vec<PriceRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[PriceRow] {
        &self.rows
    }

    pub fn row(&self, name: &str) -> Option<&PriceRow> {
        self.rows.iter().find(|row| row.name == name)
    }

    /// Row labels in table order.
    pub fn names(&self) -> Vec<&str> {
        self.rows.iter().map(|row| row.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Union of all rows' dates, chronological.
    pub fn columns(&self) -> Vec<NaiveDate> {
        self.rows
            .iter()
            .flat_map(|row| row.closes.keys().copied())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn column_labels(&self) -> Vec<String> {
        self.columns().into_iter().map(date_label).collect()
    }

    /// New table holding the named rows in the order given.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<PriceTable, DashboardError> {
        if names.is_empty() {
            return Err(DashboardError::EmptySelection);
        }
        let rows = names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                self.row(name)
                    .cloned()
                    .ok_or_else(|| DashboardError::UnknownCompany(name.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(PriceTable { rows })
    }

    /// New table with rows ordered by company name.
    pub fn sorted_by_name(&self) -> PriceTable {
        let mut rows = self.rows.clone();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        PriceTable { rows }
    }
}

impl fmt::Display for PriceTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let columns = self.columns();
        let name_width = self
            .rows
            .iter()
            .map(|row| row.name.len())
            .chain(std::iter::once("Name".len()))
            .max()
            .unwrap_or(0);

        // Dates run down the page so 50 columns stay readable in a terminal.
        write!(f, "{:<18}", "Date")?;
        for row in &self.rows {
            write!(f, " {:>width$}", row.name, width = name_width.max(9))?;
        }
        writeln!(f)?;
        for date in columns {
            write!(f, "{:<18}", date_label(date))?;
            for row in &self.rows {
                match row.close_on(date) {
                    Some(close) => write!(f, " {:>width$.2}", close, width = name_width.max(9))?,
                    None => write!(f, " {:>width$}", "", width = name_width.max(9))?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Fetches the trailing `days` of daily closes for every company in `tickers`.
///
/// Symbols are requested one after another in map order. The first failing
/// symbol aborts the whole build; nothing fetched before it is returned.
pub async fn build_price_table<P>(
    provider: &P,
    days: u32,
    tickers: &TickerMap,
) -> Result<PriceTable, ProviderError>
where
    P: DataProvider + ?Sized,
{
    let mut rows = Vec::with_capacity(tickers.len());

    for (company, symbol) in tickers.iter() {
        let params = BarsRequestParams::trailing_days(vec![symbol.to_string()], TimeFrame::day(), days);
        let series = provider.fetch_bars(params).await?;

        let closes = match series.into_iter().find(|s| s.symbol == symbol) {
            Some(series) => series
                .bars
                .iter()
                .map(|bar| (series.session_date(bar), bar.close))
                .collect::<Vec<_>>(),
            None => {
                warn!(company, symbol, "provider returned no series");
                Vec::new()
            }
        };
        debug!(company, symbol, sessions = closes.len(), "closing prices collected");

        rows.push(PriceRow::new(company, closes));
    }

    Ok(PriceTable::from_rows(rows))
}
