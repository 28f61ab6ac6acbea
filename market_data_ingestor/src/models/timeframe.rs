use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TimeFrameError {
    #[error("Invalid amount for {:?}: {}", unit, message)]
    InvalidAmount {
        unit: TimeFrameUnit,
        message: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeFrameUnit {
    Minute,
    Hour,
    Day,
    Week,
    Month,
}

/// Bar interval expressed as amount × unit (e.g. 5 minutes, 1 day).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeFrame {
    pub amount: u32,
    pub unit: TimeFrameUnit,
}

impl TimeFrame {
    pub fn new(amount: u32, unit: TimeFrameUnit) -> Result<Self, TimeFrameError> {
        Self::validate(amount, unit)?;
        Ok(Self { amount, unit })
    }

    /// One bar per trading day.
    pub fn day() -> Self {
        Self {
            amount: 1,
            unit: TimeFrameUnit::Day,
        }
    }

    fn validate(amount: u32, unit: TimeFrameUnit) -> Result<(), TimeFrameError> {
        match unit {
            TimeFrameUnit::Minute if !(1..=59).contains(&amount) => {
                Err(TimeFrameError::InvalidAmount {
                    unit,
                    message: "Minute units can only be used with amounts between 1-59.".into(),
                })
            }
            TimeFrameUnit::Hour if !(1..=23).contains(&amount) => {
                Err(TimeFrameError::InvalidAmount {
                    unit,
                    message: "Hour units can only be used with amounts 1-23".into(),
                })
            }
            TimeFrameUnit::Day | TimeFrameUnit::Week if amount != 1 => {
                Err(TimeFrameError::InvalidAmount {
                    unit,
                    message: "Day and Week units can only be used with amount 1".into(),
                })
            }
            TimeFrameUnit::Month if ![1, 3].contains(&amount) => {
                Err(TimeFrameError::InvalidAmount {
                    unit,
                    message: "Month units can only be used with amount 1 and 3".into(),
                })
            }
            _ => Ok(()),
        }
    }
}

impl fmt::Display for TimeFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = match self.unit {
            TimeFrameUnit::Minute => "Min",
            TimeFrameUnit::Hour => "Hour",
            TimeFrameUnit::Day => "Day",
            TimeFrameUnit::Week => "Week",
            TimeFrameUnit::Month => "Month",
        };
        write!(f, "{}{}", self.amount, unit)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    mod timeframe_creation_tests {
        use super::*;

        #[test]
        fn test_valid_minute_timeframe() {
            let tf = TimeFrame::new(5, TimeFrameUnit::Minute).unwrap();
            assert_eq!(tf.amount, 5);
            assert!(matches!(tf.unit, TimeFrameUnit::Minute));
        }

        #[test]
        fn test_valid_day_timeframe() {
            assert_eq!(TimeFrame::new(1, TimeFrameUnit::Day).unwrap(), TimeFrame::day());
        }

        #[test]
        fn test_invalid_minute_timeframe() {
            assert!(TimeFrame::new(0, TimeFrameUnit::Minute).is_err());
            assert!(TimeFrame::new(60, TimeFrameUnit::Minute).is_err());
        }

        #[test]
        fn test_invalid_day_and_week_timeframe() {
            assert!(TimeFrame::new(2, TimeFrameUnit::Day).is_err());
            assert!(TimeFrame::new(2, TimeFrameUnit::Week).is_err());
        }

        #[test]
        fn test_invalid_month_timeframe() {
            for amount in [0, 2, 4, 6, 12] {
                assert!(
                    TimeFrame::new(amount, TimeFrameUnit::Month).is_err(),
                    "Month with amount {} should be invalid",
                    amount
                );
            }
        }

        #[test]
        fn test_error_messages() {
            match TimeFrame::new(24, TimeFrameUnit::Hour) {
                Err(TimeFrameError::InvalidAmount { unit, message }) => {
                    assert!(matches!(unit, TimeFrameUnit::Hour));
                    assert!(message.contains("Hour units"));
                }
                _ => panic!("Expected InvalidAmount error"),
            }
        }

        #[test]
        fn test_display() {
            assert_eq!(TimeFrame::day().to_string(), "1Day");
            assert_eq!(
                TimeFrame::new(15, TimeFrameUnit::Minute).unwrap().to_string(),
                "15Min"
            );
        }
    }
}
