//! Yahoo Finance v8 chart endpoint.
//!
//! One HTTP request per symbol; [`provider::YahooChartProvider`] issues them
//! strictly in request order and stops at the first failure.

pub mod params;
pub mod provider;
pub mod response;

pub use provider::{YahooChartConfig, YahooChartProvider};
