//! Rolling support and resistance.
//!
//! SUPPORT(n)[i]    = min(C[i-n+1..=i])
//! RESISTANCE(n)[i] = max(C[i-n+1..=i])
//! Warmup: first (n-1) bars are undefined.

use crate::domain::indicator::{trailing, IndicatorSeries, IndicatorType};

pub fn calculate_rolling_min(prices: &[f64], period: usize) -> IndicatorSeries {
    IndicatorSeries {
        indicator_type: IndicatorType::RollingMin(period),
        values: trailing(prices, period, |window| {
            window.iter().copied().fold(f64::INFINITY, f64::min)
        }),
    }
}

pub fn calculate_rolling_max(prices: &[f64], period: usize) -> IndicatorSeries {
    IndicatorSeries {
        indicator_type: IndicatorType::RollingMax(period),
        values: trailing(prices, period, |window| {
            window.iter().copied().fold(f64::NEG_INFINITY, f64::max)
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRICES: [f64; 6] = [5.0, 3.0, 8.0, 6.0, 1.0, 4.0];

    #[test]
    fn rolling_min_warmup() {
        let series = calculate_rolling_min(&PRICES, 3);
        assert_eq!(series.values[0], None);
        assert_eq!(series.values[1], None);
        assert_eq!(series.defined_count(), 4);
    }

    #[test]
    fn rolling_min_values() {
        let series = calculate_rolling_min(&PRICES, 3);
        assert_eq!(
            series.values,
            vec![None, None, Some(3.0), Some(3.0), Some(1.0), Some(1.0)]
        );
    }

    #[test]
    fn rolling_max_values() {
        let series = calculate_rolling_max(&PRICES, 3);
        assert_eq!(
            series.values,
            vec![None, None, Some(8.0), Some(8.0), Some(8.0), Some(6.0)]
        );
    }

    #[test]
    fn rolling_period_one_is_identity() {
        let min = calculate_rolling_min(&PRICES, 1);
        let max = calculate_rolling_max(&PRICES, 1);
        let expected: Vec<Option<f64>> = PRICES.iter().copied().map(Some).collect();
        assert_eq!(min.values, expected);
        assert_eq!(max.values, expected);
    }

    #[test]
    fn support_never_above_resistance() {
        let min = calculate_rolling_min(&PRICES, 2);
        let max = calculate_rolling_max(&PRICES, 2);
        for i in 0..PRICES.len() {
            if let (Some(s), Some(r)) = (min.get(i), max.get(i)) {
                assert!(s <= r);
            }
        }
    }

    #[test]
    fn rolling_indicator_types() {
        assert_eq!(
            calculate_rolling_min(&PRICES, 14).indicator_type,
            IndicatorType::RollingMin(14)
        );
        assert_eq!(
            calculate_rolling_max(&PRICES, 14).indicator_type,
            IndicatorType::RollingMax(14)
        );
    }
}
