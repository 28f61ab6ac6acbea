use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, header};
use snafu::ResultExt;
use tracing::debug;

use crate::{
    models::{bar::BarSeries, request_params::BarsRequestParams, timeframe::TimeFrame},
    providers::{
        ApiSnafu, ClientBuildSnafu, DataProvider, DecodeSnafu, InvalidUserAgentSnafu, ProviderError,
        ProviderInitError, ReqwestSnafu,
        yahoo_chart::{
            params::{construct_params, validate_timeframe},
            response::{ChartBody, ChartEnvelope},
        },
    },
};

pub const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";

// The chart endpoint rejects requests without a browser-like agent.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings for [`YahooChartProvider`].
#[derive(Debug, Clone)]
pub struct YahooChartConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for YahooChartConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

pub struct YahooChartProvider {
    client: Client,
    base_url: String,
}

impl YahooChartProvider {
    /// Creates a provider talking to the public Yahoo Finance host.
    pub fn new() -> Result<Self, ProviderInitError> {
        Self::with_config(YahooChartConfig::default())
    }

    pub fn with_config(config: YahooChartConfig) -> Result<Self, ProviderInitError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_str(&config.user_agent).context(InvalidUserAgentSnafu)?,
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .context(ClientBuildSnafu)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn chart_url(&self, symbol: &str) -> String {
        format!("{}/v8/finance/chart/{}", self.base_url, symbol)
    }

    async fn fetch_symbol(
        &self,
        symbol: &str,
        timeframe: &TimeFrame,
        query: &[(String, String)],
    ) -> Result<BarSeries, ProviderError> {
        debug!(symbol, ?query, "requesting chart");

        let response = self
            .client
            .get(self.chart_url(symbol))
            .query(query)
            .send()
            .await
            .context(ReqwestSnafu)?;
        let status = response.status();
        let body = response.text().await.context(ReqwestSnafu)?;
        let envelope = serde_json::from_str::<ChartEnvelope>(&body);

        if !status.is_success() {
            // Unknown symbols come back as 404 with the reason in the envelope.
            let message = match envelope {
                Ok(ChartEnvelope {
                    chart: ChartBody {
                        error: Some(error), ..
                    },
                }) => error.description,
                _ => format!("HTTP {status}"),
            };
            return ApiSnafu {
                message: format!("{symbol}: {message}"),
            }
            .fail();
        }

        let series = envelope
            .context(DecodeSnafu { symbol })?
            .into_series(symbol, timeframe)?;
        debug!(symbol, bars = series.bars.len(), "chart received");
        Ok(series)
    }
}

#[async_trait]
impl DataProvider for YahooChartProvider {
    async fn fetch_bars(&self, params: BarsRequestParams) -> Result<Vec<BarSeries>, ProviderError> {
        let interval = validate_timeframe(&params.timeframe)?;
        let query = construct_params(&params, interval)?;

        let mut result = Vec::with_capacity(params.symbols.len());
        for symbol in &params.symbols {
            result.push(self.fetch_symbol(symbol, &params.timeframe, &query).await?);
        }
        Ok(result)
    }
}
