use crate::{
    models::{
        request_params::{BarsRequestParams, HistoryWindow},
        timeframe::{TimeFrame, TimeFrameUnit},
    },
    providers::{ProviderError, ValidationSnafu},
};

/// Maps a [`TimeFrame`] onto the chart endpoint's `interval`.
///
/// Only daily bars are served; callers key bars by session date.
pub fn validate_timeframe(timeframe: &TimeFrame) -> Result<&'static str, ProviderError> {
    match (timeframe.unit, timeframe.amount) {
        (TimeFrameUnit::Day, 1) => Ok("1d"),
        _ => ValidationSnafu {
            message: format!("Yahoo chart provider only serves daily bars, not {timeframe}"),
        }
        .fail(),
    }
}

/// Builds the query string shared by every symbol of a request.
pub fn construct_params(
    params: &BarsRequestParams,
    interval: &str,
) -> Result<Vec<(String, String)>, ProviderError> {
    let mut query = vec![
        ("interval".to_string(), interval.to_string()),
        ("includePrePost".to_string(), "false".to_string()),
    ];

    match &params.window {
        HistoryWindow::TrailingDays(0) => {
            return ValidationSnafu {
                message: "trailing window must cover at least one day",
            }
            .fail();
        }
        HistoryWindow::TrailingDays(days) => {
            query.push(("range".to_string(), format!("{days}d")));
        }
        HistoryWindow::Range { start, end } if start >= end => {
            return ValidationSnafu {
                message: format!("range start {start} is not before end {end}"),
            }
            .fail();
        }
        HistoryWindow::Range { start, end } => {
            query.push(("period1".to_string(), start.timestamp().to_string()));
            query.push(("period2".to_string(), end.timestamp().to_string()));
        }
    }

    Ok(query)
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn lookup<'a>(query: &'a [(String, String)], key: &str) -> Option<&'a str> {
        query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn daily_bars_map_to_1d() {
        assert_eq!(validate_timeframe(&TimeFrame::day()).unwrap(), "1d");
    }

    #[test]
    fn non_daily_intervals_are_rejected() {
        for (amount, unit) in [
            (5, TimeFrameUnit::Minute),
            (1, TimeFrameUnit::Hour),
            (1, TimeFrameUnit::Week),
            (1, TimeFrameUnit::Month),
        ] {
            let tf = TimeFrame::new(amount, unit).unwrap();
            let err = validate_timeframe(&tf).unwrap_err();
            assert!(matches!(err, ProviderError::Validation { .. }), "{tf} accepted");
        }
    }

    #[test]
    fn trailing_days_become_range() {
        let params = BarsRequestParams::trailing_days(vec!["AAPL".into()], TimeFrame::day(), 20);
        let query = construct_params(&params, "1d").unwrap();
        assert_eq!(lookup(&query, "range"), Some("20d"));
        assert_eq!(lookup(&query, "interval"), Some("1d"));
        assert_eq!(lookup(&query, "period1"), None);
    }

    #[test]
    fn zero_day_window_is_rejected() {
        let params = BarsRequestParams::trailing_days(vec!["AAPL".into()], TimeFrame::day(), 0);
        assert!(construct_params(&params, "1d").is_err());
    }

    #[test]
    fn explicit_range_uses_epoch_seconds() {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 3, 8, 0, 0, 0).unwrap();
        let params = BarsRequestParams {
            symbols: vec!["MSFT".into()],
            timeframe: TimeFrame::day(),
            window: HistoryWindow::Range { start, end },
        };
        let query = construct_params(&params, "1d").unwrap();
        assert_eq!(lookup(&query, "period1"), Some("1709251200"));
        assert_eq!(lookup(&query, "period2"), Some("1709856000"));
        assert_eq!(lookup(&query, "range"), None);

        let backwards = BarsRequestParams {
            window: HistoryWindow::Range { start: end, end: start },
            ..params
        };
        assert!(construct_params(&backwards, "1d").is_err());
    }
}
