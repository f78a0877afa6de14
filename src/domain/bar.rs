//! Price bar representation and series validation.

use chrono::NaiveDate;

use super::error::TraderError;

/// One point of the price series. The sequence index is the bar's position
/// in the slice it lives in; `date` is carried when the source has one.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub date: Option<NaiveDate>,
    pub close: f64,
}

impl Bar {
    pub fn new(close: f64) -> Self {
        Self { date: None, close }
    }

    pub fn dated(date: NaiveDate, close: f64) -> Self {
        Self {
            date: Some(date),
            close,
        }
    }
}

/// Closing prices in sequence order.
pub fn closes(bars: &[Bar]) -> Vec<f64> {
    bars.iter().map(|b| b.close).collect()
}

/// Rejects non-finite closes and dates that do not strictly increase.
pub fn validate_bars(bars: &[Bar]) -> Result<(), TraderError> {
    for (index, bar) in bars.iter().enumerate() {
        if !bar.close.is_finite() {
            return Err(TraderError::InvalidPrice {
                index,
                close: bar.close,
            });
        }
    }

    for (index, pair) in bars.windows(2).enumerate() {
        if let (Some(prev), Some(next)) = (pair[0].date, pair[1].date) {
            if next <= prev {
                return Err(TraderError::UnorderedBars { index: index + 1 });
            }
        }
    }

    Ok(())
}
