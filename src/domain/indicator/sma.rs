//! Simple Moving Average indicator.
//!
//! SMA(n)[i] = (C[i-n+1] + ... + C[i]) / n
//! Warmup: first (n-1) bars are undefined.

use crate::domain::indicator::{trailing, IndicatorSeries, IndicatorType};

pub fn calculate_sma(prices: &[f64], period: usize) -> IndicatorSeries {
    IndicatorSeries {
        indicator_type: IndicatorType::Sma(period),
        values: trailing(prices, period, mean),
    }
}

pub(crate) fn mean(window: &[f64]) -> f64 {
    window.iter().sum::<f64>() / window.len() as f64
}
