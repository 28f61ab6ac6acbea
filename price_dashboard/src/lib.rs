//! Daily closing prices for a handful of large tech companies, reshaped for a
//! line chart with day-count, price-range and company filters.
//!
//! The flow for every widget change is:
//! [`cache::PriceTableCache`] → [`price_table::PriceTable::select`] →
//! [`long_form::to_long_form`] → [`chart::line_chart`], driven by
//! [`view::render`].

pub mod cache;
pub mod chart;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod errors;
pub mod long_form;
pub mod price_table;
pub mod session;
pub mod state;
pub mod tickers;
pub mod view;
