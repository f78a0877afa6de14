//! Report generation port trait.

use std::path::Path;

use crate::domain::backtest::BacktestResult;
use crate::domain::bar::Bar;
use crate::domain::error::TraderError;

/// Port for writing backtest output.
pub trait ReportPort {
    /// Writes the closed-trade log.
    fn write_trades(
        &self,
        result: &BacktestResult,
        bars: &[Bar],
        output_path: &Path,
    ) -> Result<(), TraderError>;

    /// Writes the per-bar indicator frames.
    fn write_frames(
        &self,
        result: &BacktestResult,
        bars: &[Bar],
        output_path: &Path,
    ) -> Result<(), TraderError>;
}
