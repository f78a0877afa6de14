//! Configuration validation.
//!
//! Window sizes are checked before any indicator is computed; nothing runs
//! on a configuration that would fail part-way.

use crate::domain::error::TraderError;
use crate::domain::indicator::frame::{
    IndicatorConfig, DEFAULT_BAND_WINDOW, DEFAULT_LONG_WINDOW, DEFAULT_SHORT_WINDOW,
    DEFAULT_RSI_WINDOW, DEFAULT_SUPPORT_RESISTANCE_WINDOW,
};
use crate::ports::config_port::ConfigPort;

const INDICATORS: &str = "indicators";

const WINDOW_KEYS: [(&str, usize); 5] = [
    ("short_window", DEFAULT_SHORT_WINDOW),
    ("long_window", DEFAULT_LONG_WINDOW),
    ("band_window", DEFAULT_BAND_WINDOW),
    ("support_resistance_window", DEFAULT_SUPPORT_RESISTANCE_WINDOW),
    ("rsi_window", DEFAULT_RSI_WINDOW),
];

/// Every window must be at least 1 and the series must cover the largest
/// trading window.
pub fn validate_windows(config: &IndicatorConfig, bar_count: usize) -> Result<(), TraderError> {
    for (name, value) in config.windows() {
        if value == 0 {
            return Err(TraderError::InvalidWindow { name, value });
        }
    }

    let minimum = config.min_bars();
    if bar_count < minimum {
        return Err(TraderError::InsufficientData {
            bars: bar_count,
            minimum,
        });
    }
    Ok(())
}

/// Reads the `[indicators]` windows, falling back to defaults for absent keys.
/// Non-integer and non-positive values are rejected.
pub fn build_indicator_config(config: &dyn ConfigPort) -> Result<IndicatorConfig, TraderError> {
    let [short, long, band, support_resistance, rsi] = WINDOW_KEYS;
    Ok(IndicatorConfig {
        short_window: read_window(config, short.0, short.1)?,
        long_window: read_window(config, long.0, long.1)?,
        band_window: read_window(config, band.0, band.1)?,
        support_resistance_window: read_window(
            config,
            support_resistance.0,
            support_resistance.1,
        )?,
        rsi_window: read_window(config, rsi.0, rsi.1)?,
    })
}

fn read_window(config: &dyn ConfigPort, key: &str, default: usize) -> Result<usize, TraderError> {
    if let Some(raw) = config.get_string(INDICATORS, key) {
        if raw.trim().parse::<i64>().is_err() {
            return Err(TraderError::ConfigInvalid {
                section: INDICATORS.to_string(),
                key: key.to_string(),
                reason: format!("{} must be an integer, got '{}'", key, raw.trim()),
            });
        }
    }

    let value = config.get_int(INDICATORS, key, default as i64);
    if value < 1 {
        return Err(TraderError::ConfigInvalid {
            section: INDICATORS.to_string(),
            key: key.to_string(),
            reason: format!("{} must be at least 1", key),
        });
    }
    Ok(value as usize)
}
