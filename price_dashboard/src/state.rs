//! Widget state: day-count slider, price-range slider and company multiselect.

use crate::errors::DashboardError;

pub const DAYS_MIN: u32 = 1;
pub const DAYS_MAX: u32 = 50;
pub const DEFAULT_DAYS: u32 = 20;

pub const PRICE_MIN: f64 = 0.0;
pub const PRICE_MAX: f64 = 3500.0;

pub const DEFAULT_SELECTION: [&str; 4] = ["google", "amazon", "facebook", "apple"];

/// Visible y-axis range of the chart, in USD.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    min: f64,
    max: f64,
}

impl PriceRange {
    pub fn new(min: f64, max: f64) -> Result<Self, DashboardError> {
        let in_bounds = |v: f64| (PRICE_MIN..=PRICE_MAX).contains(&v);
        if !in_bounds(min) || !in_bounds(max) {
            return Err(DashboardError::InvalidInput(format!(
                "price range {min}..{max} must lie within {PRICE_MIN}..{PRICE_MAX}"
            )));
        }
        if min > max {
            return Err(DashboardError::InvalidInput(format!(
                "price range start {min} is above its end {max}"
            )));
        }
        Ok(Self { min, max })
    }

    pub fn full() -> Self {
        Self {
            min: PRICE_MIN,
            max: PRICE_MAX,
        }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self::full()
    }
}

/// Current value of every widget on the page.
///
/// Setters validate their input and leave the state untouched on error.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    days: u32,
    price_range: PriceRange,
    selection: Vec<String>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            days: DEFAULT_DAYS,
            price_range: PriceRange::full(),
            selection: DEFAULT_SELECTION.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl DashboardState {
    pub fn new(
        days: u32,
        price_range: PriceRange,
        selection: Vec<String>,
    ) -> Result<Self, DashboardError> {
        let mut state = Self {
            price_range,
            ..Self::default()
        };
        state.set_days(days)?;
        state.set_selection(selection);
        Ok(state)
    }

    pub fn days(&self) -> u32 {
        self.days
    }

    pub fn price_range(&self) -> PriceRange {
        self.price_range
    }

    pub fn selection(&self) -> &[String] {
        &self.selection
    }

    pub fn set_days(&mut self, days: u32) -> Result<(), DashboardError> {
        if !(DAYS_MIN..=DAYS_MAX).contains(&days) {
            return Err(DashboardError::InvalidInput(format!(
                "day count {days} must lie within {DAYS_MIN}..={DAYS_MAX}"
            )));
        }
        self.days = days;
        Ok(())
    }

    pub fn set_price_range(&mut self, min: f64, max: f64) -> Result<(), DashboardError> {
        self.price_range = PriceRange::new(min, max)?;
        Ok(())
    }

    /// Replaces the selection, dropping blanks and repeats. An empty
    /// selection is allowed here and reported when the view is rendered.
    pub fn set_selection(&mut self, selection: Vec<String>) {
        let mut deduped: Vec<String> = Vec::with_capacity(selection.len());
        for name in selection {
            let name = name.trim();
            if !name.is_empty() && !deduped.iter().any(|kept| kept == name) {
                deduped.push(name.to_string());
            }
        }
        self.selection = deduped;
    }
}
