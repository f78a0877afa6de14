//! Backtest driver.
//!
//! Validates the inputs, computes indicator frames, replays the simulator
//! over every bar and summarises the resulting trade log. Validation failures
//! return before any indicator is computed.

use tracing::{debug, info};

use super::bar::{closes, validate_bars, Bar};
use super::config_validation::validate_windows;
use super::error::TraderError;
use super::indicator::frame::{compute_frames, IndicatorConfig, IndicatorFrame};
use super::metrics::TradeSummary;
use super::position::{Position, Trade};
use super::simulator::simulate;

#[derive(Debug, Clone, PartialEq)]
pub struct BacktestResult {
    pub config: IndicatorConfig,
    pub frames: Vec<IndicatorFrame>,
    pub trades: Vec<Trade>,
    pub open_position: Option<Position>,
    pub total_profit: f64,
    pub summary: TradeSummary,
}

pub fn run_backtest(bars: &[Bar], config: &IndicatorConfig) -> Result<BacktestResult, TraderError> {
    validate_windows(config, bars.len())?;
    validate_bars(bars)?;

    let prices = closes(bars);
    for indicator in config.indicator_types() {
        debug!(%indicator, first_defined = indicator.warmup(), "computing");
    }
    let frames = compute_frames(&prices, config);
    debug!(
        bars = prices.len(),
        complete_frames = frames.iter().filter(|f| f.is_complete()).count(),
        "indicators computed"
    );

    let simulation = simulate(&prices, &frames);
    let summary = TradeSummary::compute(&simulation.trades);

    info!(
        trades = summary.total_trades,
        total_profit = summary.total_profit,
        open_position = simulation.open_position.is_some(),
        "backtest complete"
    );

    Ok(BacktestResult {
        config: *config,
        frames,
        total_profit: summary.total_profit,
        trades: simulation.trades,
        open_position: simulation.open_position,
        summary,
    })
}
