use chrono::DateTime;
use chrono_tz::Tz;
use serde::Deserialize;
use snafu::OptionExt;

use crate::{
    models::{
        bar::{Bar, BarSeries},
        timeframe::TimeFrame,
    },
    providers::{ApiSnafu, InternalSnafu, ProviderError},
};

#[derive(Deserialize, Debug)]
pub struct ChartEnvelope {
    pub chart: ChartBody,
}

#[derive(Deserialize, Debug)]
pub struct ChartBody {
    pub result: Option<Vec<ChartResult>>,
    pub error: Option<ChartError>,
}

#[derive(Deserialize, Debug)]
pub struct ChartError {
    pub code: String,
    pub description: String,
}

#[derive(Deserialize, Debug)]
pub struct ChartResult {
    pub meta: ChartMeta,
    // Absent when the window holds no trading sessions.
    #[serde(default)]
    pub timestamp: Vec<i64>,
    pub indicators: Indicators,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ChartMeta {
    pub symbol: String,
    pub exchange_timezone_name: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct Indicators {
    #[serde(default)]
    pub quote: Vec<Quote>,
}

#[derive(Deserialize, Debug, Default)]
pub struct Quote {
    #[serde(default)]
    pub open: Vec<Option<f64>>,
    #[serde(default)]
    pub high: Vec<Option<f64>>,
    #[serde(default)]
    pub low: Vec<Option<f64>>,
    #[serde(default)]
    pub close: Vec<Option<f64>>,
    #[serde(default)]
    pub volume: Vec<Option<f64>>,
}

impl ChartEnvelope {
    /// Converts the vendor payload into a [`BarSeries`] labelled with the
    /// requested `symbol`.
    ///
    /// Sessions without a close are dropped. Missing open/high/low values fall
    /// back to the close and a missing volume to zero.
    pub fn into_series(self, symbol: &str, timeframe: &TimeFrame) -> Result<BarSeries, ProviderError> {
        if let Some(error) = self.chart.error {
            return ApiSnafu {
                message: format!("{symbol}: {} ({})", error.description, error.code),
            }
            .fail();
        }

        let result = self
            .chart
            .result
            .and_then(|results| results.into_iter().next())
            .with_context(|| ApiSnafu {
                message: format!("{symbol}: chart response carried no result"),
            })?;

        let exchange_tz = result
            .meta
            .exchange_timezone_name
            .as_deref()
            .and_then(|name| name.parse::<Tz>().ok());
        let quote = result.indicators.quote.into_iter().next().unwrap_or_default();

        let mut bars = Vec::with_capacity(result.timestamp.len());
        for (i, &ts) in result.timestamp.iter().enumerate() {
            let at = |values: &[Option<f64>]| values.get(i).copied().flatten();
            let Some(close) = at(&quote.close) else {
                continue;
            };
            let timestamp = DateTime::from_timestamp(ts, 0).with_context(|| InternalSnafu {
                message: format!("{symbol}: timestamp {ts} is out of range"),
            })?;

            bars.push(Bar {
                timestamp,
                open: at(&quote.open).unwrap_or(close),
                high: at(&quote.high).unwrap_or(close),
                low: at(&quote.low).unwrap_or(close),
                close,
                volume: at(&quote.volume).unwrap_or(0.0),
            });
        }

        Ok(BarSeries {
            symbol: symbol.to_string(),
            timeframe: timeframe.clone(),
            exchange_tz,
            bars,
        })
    }
}
