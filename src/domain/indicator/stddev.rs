//! Standard deviation for the volatility band.
//!
//! Sample standard deviation over n closing prices about their mean:
//! STDDEV = sqrt(sum((C[j] - mean)^2) / (n - 1))
//! A one-bar window has no spread and yields 0.

pub(crate) fn sample_stddev(window: &[f64], mean: f64) -> f64 {
    if window.len() < 2 {
        return 0.0;
    }

    let variance: f64 = window
        .iter()
        .map(|close| {
            let diff = close - mean;
            diff * diff
        })
        .sum::<f64>()
        / (window.len() - 1) as f64;

    variance.sqrt()
}
