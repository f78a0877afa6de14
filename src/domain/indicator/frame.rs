//! Per-bar indicator frames.
//!
//! Zips the moving averages, the volatility band and support/resistance into
//! one record per bar, aligned index-for-index with the price series. RSI is
//! carried alongside for reporting.

use crate::domain::indicator::bollinger::calculate_bollinger;
use crate::domain::indicator::rolling::{calculate_rolling_max, calculate_rolling_min};
use crate::domain::indicator::rsi::calculate_rsi;
use crate::domain::indicator::sma::calculate_sma;
use crate::domain::indicator::IndicatorType;

pub const DEFAULT_SHORT_WINDOW: usize = 20;
pub const DEFAULT_LONG_WINDOW: usize = 50;
pub const DEFAULT_BAND_WINDOW: usize = 20;
pub const DEFAULT_SUPPORT_RESISTANCE_WINDOW: usize = 14;
pub const DEFAULT_RSI_WINDOW: usize = 14;

/// Window sizes driving the indicator engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndicatorConfig {
    pub short_window: usize,
    pub long_window: usize,
    pub band_window: usize,
    pub support_resistance_window: usize,
    pub rsi_window: usize,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        IndicatorConfig {
            short_window: DEFAULT_SHORT_WINDOW,
            long_window: DEFAULT_LONG_WINDOW,
            band_window: DEFAULT_BAND_WINDOW,
            support_resistance_window: DEFAULT_SUPPORT_RESISTANCE_WINDOW,
            rsi_window: DEFAULT_RSI_WINDOW,
        }
    }
}

impl IndicatorConfig {
    /// Trading windows; the RSI window keeps its default.
    pub fn new(short: usize, long: usize, band: usize, support_resistance: usize) -> Self {
        IndicatorConfig {
            short_window: short,
            long_window: long,
            band_window: band,
            support_resistance_window: support_resistance,
            rsi_window: DEFAULT_RSI_WINDOW,
        }
    }

    pub fn with_rsi_window(self, rsi_window: usize) -> Self {
        IndicatorConfig { rsi_window, ..self }
    }

    /// Named windows, in a fixed order, for validation and reporting.
    pub fn windows(&self) -> [(&'static str, usize); 5] {
        [
            ("short", self.short_window),
            ("long", self.long_window),
            ("band", self.band_window),
            ("support_resistance", self.support_resistance_window),
            ("rsi", self.rsi_window),
        ]
    }

    /// Shortest series length for which every trading indicator is defined
    /// somewhere. RSI is informational and does not raise the minimum.
    pub fn min_bars(&self) -> usize {
        [
            self.short_window,
            self.long_window,
            self.band_window,
            self.support_resistance_window,
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
    }

    pub fn indicator_types(&self) -> [IndicatorType; 6] {
        [
            IndicatorType::Sma(self.short_window),
            IndicatorType::Sma(self.long_window),
            IndicatorType::Bollinger(self.band_window),
            IndicatorType::RollingMin(self.support_resistance_window),
            IndicatorType::RollingMax(self.support_resistance_window),
            IndicatorType::Rsi(self.rsi_window),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct IndicatorFrame {
    pub sma_short: Option<f64>,
    pub sma_long: Option<f64>,
    pub band_middle: Option<f64>,
    pub band_upper: Option<f64>,
    pub band_lower: Option<f64>,
    pub support: Option<f64>,
    pub resistance: Option<f64>,
    pub rsi: Option<f64>,
}

impl IndicatorFrame {
    /// True once every field the trading rules read is defined.
    pub fn is_complete(&self) -> bool {
        [
            self.sma_short,
            self.sma_long,
            self.band_middle,
            self.band_upper,
            self.band_lower,
            self.support,
            self.resistance,
        ]
        .iter()
        .all(Option::is_some)
    }
}

pub fn compute_frames(prices: &[f64], config: &IndicatorConfig) -> Vec<IndicatorFrame> {
    let sma_short = calculate_sma(prices, config.short_window);
    let sma_long = calculate_sma(prices, config.long_window);
    let bands = calculate_bollinger(prices, config.band_window);
    let support = calculate_rolling_min(prices, config.support_resistance_window);
    let resistance = calculate_rolling_max(prices, config.support_resistance_window);
    let rsi = calculate_rsi(prices, config.rsi_window);

    (0..prices.len())
        .map(|i| {
            let band = bands.get(i);
            IndicatorFrame {
                sma_short: sma_short.get(i),
                sma_long: sma_long.get(i),
                band_middle: band.map(|b| b.middle),
                band_upper: band.map(|b| b.upper),
                band_lower: band.map(|b| b.lower),
                support: support.get(i),
                resistance: resistance.get(i),
                rsi: rsi.get(i),
            }
        })
        .collect()
}
