//! State → view.
//!
//! [`render`] runs the whole pipeline for one widget state and folds any
//! failure into the view, so callers never see an error escape.

use std::fmt;

use market_data_ingestor::providers::DataProvider;
use serde_json::Value;
use tracing::{error, info};

use crate::{
    cache::PriceTableCache,
    chart::line_chart,
    errors::DashboardError,
    long_form::{LongFormRow, to_long_form},
    price_table::PriceTable,
    state::DashboardState,
    tickers::TickerMap,
};

pub const PAGE_TITLE: &str = "US Stock Price Viewer";
pub const EMPTY_SELECTION_MESSAGE: &str = "Select at least one company.";
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred.";

/// Everything the page shows for one widget state.
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub title: String,
    pub header: String,
    pub body: ViewBody,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewBody {
    /// Selected companies' prices, sorted by name, and the chart document.
    Chart { table: PriceTable, chart: Value },
    /// Inline error shown in place of the chart.
    Error { kind: ErrorKind, message: String },
}

/// What the user is told went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    EmptySelection,
    Unexpected,
}

impl View {
    pub fn chart(&self) -> Option<&Value> {
        match &self.body {
            ViewBody::Chart { chart, .. } => Some(chart),
            ViewBody::Error { .. } => None,
        }
    }

    /// Header without its markdown emphasis, for plain-text output.
    pub fn plain_header(&self) -> String {
        self.header.replace("**", "")
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        match &self.body {
            ViewBody::Chart { .. } => None,
            ViewBody::Error { kind, .. } => Some(*kind),
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.title)?;
        writeln!(f, "### {}", self.plain_header())?;
        writeln!(f)?;
        match &self.body {
            ViewBody::Chart { table, .. } => {
                writeln!(f, "### Stock prices (USD)")?;
                write!(f, "{table}")
            }
            ViewBody::Error { message, .. } => writeln!(f, "error: {message}"),
        }
    }
}

/// Intermediate products of a successful render.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub table: PriceTable,
    pub rows: Vec<LongFormRow>,
    pub chart: Value,
}

pub fn header(days: u32) -> String {
    format!("Past **{days}** days of GAFA stock prices")
}

/// Runs the pipeline stage by stage, stopping at the first failure.
pub async fn build_chart_data<P>(
    state: &DashboardState,
    cache: &PriceTableCache,
    provider: &P,
    tickers: &TickerMap,
) -> Result<ChartData, DashboardError>
where
    P: DataProvider + ?Sized,
{
    let full = cache.get_or_build(provider, state.days(), tickers).await?;
    let selected = full.select(state.selection())?;
    let rows = to_long_form(&selected);
    let chart = line_chart(&rows, state.price_range())?;
    Ok(ChartData {
        table: selected.sorted_by_name(),
        rows,
        chart,
    })
}

/// Renders the page for `state`.
///
/// An empty selection is reported as such. Every other failure is logged and
/// shown as a generic message.
pub async fn render<P>(
    state: &DashboardState,
    cache: &PriceTableCache,
    provider: &P,
    tickers: &TickerMap,
) -> View
where
    P: DataProvider + ?Sized,
{
    let body = match build_chart_data(state, cache, provider, tickers).await {
        Ok(data) => {
            info!(
                days = state.days(),
                companies = data.table.len(),
                points = data.rows.len(),
                "view rendered"
            );
            ViewBody::Chart {
                table: data.table,
                chart: data.chart,
            }
        }
        Err(DashboardError::EmptySelection) => ViewBody::Error {
            kind: ErrorKind::EmptySelection,
            message: EMPTY_SELECTION_MESSAGE.to_string(),
        },
        Err(err) => {
            error!(error = %err, "render failed");
            ViewBody::Error {
                kind: ErrorKind::Unexpected,
                message: UNEXPECTED_ERROR_MESSAGE.to_string(),
            }
        }
    };

    View {
        title: PAGE_TITLE.to_string(),
        header: header(state.days()),
        body,
    }
}

/// Owns the collaborators a render needs so a front end only tracks state.
pub struct Dashboard<P> {
    provider: P,
    cache: PriceTableCache,
    tickers: TickerMap,
}

impl<P: DataProvider> Dashboard<P> {
    pub fn new(provider: P, tickers: TickerMap) -> Self {
        Self {
            provider,
            cache: PriceTableCache::new(),
            tickers,
        }
    }

    pub async fn render(&self, state: &DashboardState) -> View {
        render(state, &self.cache, &self.provider, &self.tickers).await
    }

    pub fn cache(&self) -> &PriceTableCache {
        &self.cache
    }

    pub fn tickers(&self) -> &TickerMap {
        &self.tickers
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }
}
