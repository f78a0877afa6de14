//! Technical indicator implementations.
//!
//! This module provides types for representing indicator values and series:
//! - `IndicatorType`: indicator identity + parameters
//! - `IndicatorSeries`: a single-valued series aligned with the price series
//! - `Band` / `BandSeries`: the three-line volatility envelope
//!
//! RSI rides along in the frame for reporting; no trading rule reads it.
//!
//! A value that needs more history than exists at its index is `None`.
//! It is never coerced to zero.

pub mod sma;
pub mod stddev;
pub mod bollinger;
pub mod rolling;
pub mod rsi;
pub mod frame;

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorType {
    Sma(usize),
    Bollinger(usize),
    RollingMin(usize),
    RollingMax(usize),
    Rsi(usize),
}

impl IndicatorType {
    /// Number of leading indices left undefined.
    pub fn warmup(&self) -> usize {
        match self {
            IndicatorType::Sma(period)
            | IndicatorType::Bollinger(period)
            | IndicatorType::RollingMin(period)
            | IndicatorType::RollingMax(period) => period.saturating_sub(1),
            IndicatorType::Rsi(period) => *period,
        }
    }
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorType::Sma(period) => write!(f, "SMA({})", period),
            IndicatorType::Bollinger(period) => write!(f, "BOLLINGER({},2)", period),
            IndicatorType::RollingMin(period) => write!(f, "SUPPORT({})", period),
            IndicatorType::RollingMax(period) => write!(f, "RESISTANCE({})", period),
            IndicatorType::Rsi(period) => write!(f, "RSI({})", period),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSeries {
    pub indicator_type: IndicatorType,
    pub values: Vec<Option<f64>>,
}

impl IndicatorSeries {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at `index`, `None` when undefined or out of range.
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied().flatten()
    }

    pub fn defined_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BandSeries {
    pub indicator_type: IndicatorType,
    pub values: Vec<Option<Band>>,
}

impl BandSeries {
    pub fn get(&self, index: usize) -> Option<Band> {
        self.values.get(index).copied().flatten()
    }
}

/// Applies `f` to every trailing window of `period` prices, leaving the
/// first `period - 1` indices undefined. A zero period yields all `None`.
pub(crate) fn trailing<F>(prices: &[f64], period: usize, f: F) -> Vec<Option<f64>>
where
    F: Fn(&[f64]) -> f64,
{
    if period == 0 {
        return vec![None; prices.len()];
    }

    (0..prices.len())
        .map(|i| {
            if i + 1 >= period {
                Some(f(&prices[i + 1 - period..=i]))
            } else {
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indicator_type_display() {
        assert_eq!(IndicatorType::Sma(20).to_string(), "SMA(20)");
        assert_eq!(IndicatorType::Bollinger(20).to_string(), "BOLLINGER(20,2)");
        assert_eq!(IndicatorType::RollingMin(14).to_string(), "SUPPORT(14)");
        assert_eq!(IndicatorType::RollingMax(14).to_string(), "RESISTANCE(14)");
        assert_eq!(IndicatorType::Rsi(14).to_string(), "RSI(14)");
    }

    #[test]
    fn warmup_is_period_minus_one() {
        assert_eq!(IndicatorType::Sma(5).warmup(), 4);
        assert_eq!(IndicatorType::Sma(1).warmup(), 0);
        assert_eq!(IndicatorType::RollingMax(0).warmup(), 0);
    }

    #[test]
    fn rsi_warmup_needs_one_more_bar() {
        assert_eq!(IndicatorType::Rsi(14).warmup(), 14);
    }

    #[test]
    fn trailing_windows_align_with_input() {
        let prices = [1.0, 2.0, 3.0, 4.0];
        let out = trailing(&prices, 2, |w| w[0] + w[1]);
        assert_eq!(out, vec![None, Some(3.0), Some(5.0), Some(7.0)]);
    }

    #[test]
    fn trailing_zero_period_is_undefined() {
        let out = trailing(&[1.0, 2.0], 0, |w| w[0]);
        assert_eq!(out, vec![None, None]);
    }

    #[test]
    fn trailing_period_longer_than_series() {
        let out = trailing(&[1.0, 2.0], 3, |w| w[0]);
        assert_eq!(out, vec![None, None]);
    }

    #[test]
    fn series_get_out_of_range() {
        let series = IndicatorSeries {
            indicator_type: IndicatorType::Sma(1),
            values: vec![Some(1.0)],
        };
        assert_eq!(series.get(0), Some(1.0));
        assert_eq!(series.get(5), None);
        assert_eq!(series.defined_count(), 1);
    }
}
