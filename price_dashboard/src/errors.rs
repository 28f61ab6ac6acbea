use market_data_ingestor::providers::ProviderError;
use thiserror::Error;

/// Everything that can stop a render from producing a chart.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// The user deselected every company. Expected and recoverable.
    #[error("no company selected")]
    EmptySelection,

    /// A selected name is not a row of the price table.
    #[error("unknown company: {0}")]
    UnknownCompany(String),

    /// A widget value outside its allowed bounds.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Price history retrieval failed for at least one symbol.
    #[error("price retrieval failed: {0}")]
    Retrieval(#[from] ProviderError),

    /// The chart document could not be built.
    #[error("chart construction failed: {0}")]
    Chart(#[from] serde_json::Error),
}
