//! RSI (Relative Strength Index) indicator.
//!
//! Wilder smoothing of the average gain and loss:
//! - First average: simple mean of the first n price changes
//! - Subsequent: avg = (prev_avg * (n-1) + current) / n
//!
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss), and 100 when avg_loss is 0.
//!
//! Warmup: first n bars are undefined (n changes need n+1 closes).

use crate::domain::indicator::{IndicatorSeries, IndicatorType};

pub fn calculate_rsi(prices: &[f64], period: usize) -> IndicatorSeries {
    let mut values = vec![None; prices.len()];

    if period > 0 && prices.len() > period {
        let changes: Vec<f64> = prices.windows(2).map(|w| w[1] - w[0]).collect();
        let gain = |c: f64| c.max(0.0);
        let loss = |c: f64| (-c).max(0.0);

        let mut avg_gain = changes[..period].iter().copied().map(gain).sum::<f64>() / period as f64;
        let mut avg_loss = changes[..period].iter().copied().map(loss).sum::<f64>() / period as f64;
        values[period] = Some(rsi_value(avg_gain, avg_loss));

        let n = period as f64;
        for (i, &change) in changes.iter().enumerate().skip(period) {
            avg_gain = (avg_gain * (n - 1.0) + gain(change)) / n;
            avg_loss = (avg_loss * (n - 1.0) + loss(change)) / n;
            values[i + 1] = Some(rsi_value(avg_gain, avg_loss));
        }
    }

    IndicatorSeries {
        indicator_type: IndicatorType::Rsi(period),
        values,
    }
}

fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        100.0
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}
