#![allow(dead_code)]

use bandtrader::domain::bar::Bar;
use bandtrader::domain::error::TraderError;
use bandtrader::domain::indicator::frame::{IndicatorConfig, IndicatorFrame};
use bandtrader::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::collections::HashMap;

pub struct MockDataPort {
    pub data: HashMap<String, Vec<Bar>>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_bars(mut self, symbol: &str, bars: Vec<Bar>) -> Self {
        self.data.insert(symbol.to_string(), bars);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_bars(&self, symbol: &str) -> Result<Vec<Bar>, TraderError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(TraderError::Data {
                reason: reason.clone(),
            });
        }
        Ok(self.data.get(symbol).cloned().unwrap_or_default())
    }

    fn list_symbols(&self) -> Result<Vec<String>, TraderError> {
        let mut symbols: Vec<String> = self.data.keys().cloned().collect();
        symbols.sort();
        Ok(symbols)
    }
}

pub fn make_bars(prices: &[f64]) -> Vec<Bar> {
    prices.iter().map(|&p| Bar::new(p)).collect()
}

pub fn make_dated_bars(start_date: &str, prices: &[f64]) -> Vec<Bar> {
    let start = NaiveDate::parse_from_str(start_date, "%Y-%m-%d").unwrap();
    prices
        .iter()
        .enumerate()
        .map(|(i, &close)| Bar::dated(start + chrono::Duration::days(i as i64), close))
        .collect()
}

/// Uptrend with a small oscillation and a sharp one-bar dip every 17 bars.
/// Under [`dipping_config`] each dip opens a long that the rebound closes
/// at its target on the following bar.
pub fn dipping_series(count: usize) -> Vec<f64> {
    (0..count)
        .map(|i| {
            let t = i as f64;
            let dip = if i % 17 == 16 { -15.0 } else { 0.0 };
            100.0 + 0.5 * t + 2.0 * (t * 0.5).sin() + dip
        })
        .collect()
}

pub fn dipping_config() -> IndicatorConfig {
    IndicatorConfig::new(5, 20, 10, 5)
}

/// Frame satisfying the entry rule for any close under 95.
pub fn entry_frame() -> IndicatorFrame {
    IndicatorFrame {
        sma_short: Some(105.0),
        sma_long: Some(100.0),
        band_middle: Some(100.0),
        band_upper: Some(105.0),
        band_lower: Some(95.0),
        support: Some(88.0),
        resistance: Some(110.0),
        rsi: None,
    }
}

/// Frame that never triggers entry (no crossover).
pub fn flat_frame() -> IndicatorFrame {
    IndicatorFrame {
        sma_short: Some(100.0),
        sma_long: Some(100.0),
        ..entry_frame()
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}
