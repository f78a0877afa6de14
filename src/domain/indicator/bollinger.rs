//! Bollinger Bands indicator.
//!
//! Bollinger Bands consist of:
//! - Middle: Simple Moving Average (SMA) over n periods
//! - Upper: Middle + (2 × StdDev)
//! - Lower: Middle - (2 × StdDev)
//!
//! Where StdDev is sample standard deviation (divides by N-1, not N).
//!
//! Warmup: first (period-1) bars are undefined.

use crate::domain::indicator::sma::calculate_sma;
use crate::domain::indicator::stddev::sample_stddev;
use crate::domain::indicator::{Band, BandSeries, IndicatorType};

pub const BAND_WIDTH_MULT: f64 = 2.0;

pub fn calculate_bollinger(prices: &[f64], period: usize) -> BandSeries {
    let middle = calculate_sma(prices, period);

    let values = middle
        .values
        .iter()
        .enumerate()
        .map(|(i, middle)| {
            middle.map(|middle| {
                let window = &prices[i + 1 - period..=i];
                let stddev = sample_stddev(window, middle);
                Band {
                    upper: middle + BAND_WIDTH_MULT * stddev,
                    middle,
                    lower: middle - BAND_WIDTH_MULT * stddev,
                }
            })
        })
        .collect();

    BandSeries {
        indicator_type: IndicatorType::Bollinger(period),
        values,
    }
}
