#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use market_data_ingestor::{
    models::{
        bar::{Bar, BarSeries},
        request_params::{BarsRequestParams, HistoryWindow},
    },
    providers::{ApiSnafu, DataProvider, ProviderError},
};
use price_dashboard::tickers::DEFAULT_TICKERS;

/// Friday 8 March 2024.
pub fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 8).unwrap()
}

/// Weekday closes for the 60 calendar days up to `as_of`, drifting up from `base`.
pub fn weekday_history(as_of: NaiveDate, base: f64) -> Vec<(NaiveDate, f64)> {
    (0..60)
        .rev()
        .map(|back| as_of - Duration::days(back))
        .filter(|date| !matches!(date.weekday(), Weekday::Sat | Weekday::Sun))
        .enumerate()
        .map(|(i, date)| (date, base + i as f64 * 0.5))
        .collect()
}

/// In-memory provider serving canned closes and counting every request.
pub struct ScriptedProvider {
    as_of: NaiveDate,
    history: HashMap<String, Vec<(NaiveDate, f64)>>,
    fail_on: Option<String>,
    calls: AtomicUsize,
    requested: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    pub fn new(as_of: NaiveDate) -> Self {
        Self {
            as_of,
            history: HashMap::new(),
            fail_on: None,
            calls: AtomicUsize::new(0),
            requested: Mutex::new(Vec::new()),
        }
    }

    /// Every default symbol with a full weekday history.
    pub fn gafa() -> Self {
        DEFAULT_TICKERS
            .iter()
            .enumerate()
            .fold(Self::new(as_of()), |provider, (i, (_, symbol))| {
                provider.with_history(symbol, weekday_history(as_of(), 100.0 * (i + 1) as f64))
            })
    }

    pub fn with_history(mut self, symbol: &str, closes: Vec<(NaiveDate, f64)>) -> Self {
        self.history.insert(symbol.to_string(), closes);
        self
    }

    pub fn failing_on(mut self, symbol: &str) -> Self {
        self.fail_on = Some(symbol.to_string());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }

    fn in_window(&self, date: NaiveDate, window: &HistoryWindow) -> bool {
        match window {
            HistoryWindow::TrailingDays(days) => {
                date <= self.as_of && date > self.as_of - Duration::days(i64::from(*days))
            }
            HistoryWindow::Range { start, end } => {
                let at = date.and_hms_opt(14, 30, 0).unwrap().and_utc();
                at >= *start && at < *end
            }
        }
    }
}

#[async_trait]
impl DataProvider for ScriptedProvider {
    async fn fetch_bars(&self, params: BarsRequestParams) -> Result<Vec<BarSeries>, ProviderError> {
        let mut result = Vec::with_capacity(params.symbols.len());
        for symbol in &params.symbols {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.requested.lock().unwrap().push(symbol.clone());

            if self.fail_on.as_deref() == Some(symbol.as_str()) {
                return ApiSnafu {
                    message: format!("{symbol}: Too Many Requests"),
                }
                .fail();
            }
            let Some(closes) = self.history.get(symbol) else {
                return ApiSnafu {
                    message: format!("{symbol}: No data found, symbol may be delisted"),
                }
                .fail();
            };

            let bars = closes
                .iter()
                .filter(|(date, _)| self.in_window(*date, &params.window))
                .map(|(date, close)| Bar {
                    timestamp: date.and_hms_opt(14, 30, 0).unwrap().and_utc(),
                    open: *close,
                    high: *close,
                    low: *close,
                    close: *close,
                    volume: 1_000.0,
                })
                .collect();

            result.push(BarSeries {
                symbol: symbol.clone(),
                timeframe: params.timeframe.clone(),
                exchange_tz: None,
                bars,
            });
        }
        Ok(result)
    }
}
