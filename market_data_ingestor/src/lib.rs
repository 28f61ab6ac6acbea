//! Vendor-agnostic market data retrieval.
//!
//! [`providers::DataProvider`] is the seam every data vendor plugs into; the
//! [`models`] module holds the request and response types shared by all of them.

pub mod models;
pub mod providers;
