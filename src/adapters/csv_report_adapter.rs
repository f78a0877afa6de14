//! CSV report adapter.
//!
//! Trade log and indicator frames are written as plain CSV. Unknown
//! indicator values are written as empty fields.

use std::path::Path;

use crate::domain::backtest::BacktestResult;
use crate::domain::bar::Bar;
use crate::domain::error::TraderError;
use crate::ports::report_port::ReportPort;

const TRADE_HEADER: [&str; 10] = [
    "entry_index",
    "entry_date",
    "entry_price",
    "exit_index",
    "exit_date",
    "exit_price",
    "stop_loss",
    "take_profit",
    "profit",
    "exit_reason",
];

const FRAME_HEADER: [&str; 11] = [
    "index",
    "date",
    "close",
    "sma_short",
    "sma_long",
    "band_middle",
    "band_upper",
    "band_lower",
    "support",
    "resistance",
    "rsi",
];

pub struct CsvReportAdapter;

impl CsvReportAdapter {
    fn writer(path: &Path) -> Result<csv::Writer<std::fs::File>, TraderError> {
        csv::Writer::from_path(path).map_err(|e| TraderError::Report {
            reason: format!("failed to create {}: {}", path.display(), e),
        })
    }
}

fn write_err(e: csv::Error) -> TraderError {
    TraderError::Report {
        reason: format!("CSV write error: {}", e),
    }
}

fn flush_err(e: std::io::Error) -> TraderError {
    TraderError::Report {
        reason: format!("CSV flush error: {}", e),
    }
}

fn date_field(bars: &[Bar], index: usize) -> String {
    bars.get(index)
        .and_then(|b| b.date)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

fn opt_field(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

impl ReportPort for CsvReportAdapter {
    fn write_trades(
        &self,
        result: &BacktestResult,
        bars: &[Bar],
        output_path: &Path,
    ) -> Result<(), TraderError> {
        let mut wtr = Self::writer(output_path)?;
        wtr.write_record(TRADE_HEADER).map_err(write_err)?;

        for trade in &result.trades {
            wtr.write_record([
                trade.entry_index.to_string(),
                date_field(bars, trade.entry_index),
                trade.entry_price.to_string(),
                trade.exit_index.to_string(),
                date_field(bars, trade.exit_index),
                trade.exit_price.to_string(),
                trade.stop_loss.to_string(),
                trade.take_profit.to_string(),
                trade.profit().to_string(),
                trade.exit_reason.as_str().to_string(),
            ])
            .map_err(write_err)?;
        }

        wtr.flush().map_err(flush_err)?;
        Ok(())
    }

    fn write_frames(
        &self,
        result: &BacktestResult,
        bars: &[Bar],
        output_path: &Path,
    ) -> Result<(), TraderError> {
        let mut wtr = Self::writer(output_path)?;
        wtr.write_record(FRAME_HEADER).map_err(write_err)?;

        for (index, (bar, frame)) in bars.iter().zip(&result.frames).enumerate() {
            wtr.write_record([
                index.to_string(),
                date_field(bars, index),
                bar.close.to_string(),
                opt_field(frame.sma_short),
                opt_field(frame.sma_long),
                opt_field(frame.band_middle),
                opt_field(frame.band_upper),
                opt_field(frame.band_lower),
                opt_field(frame.support),
                opt_field(frame.resistance),
                opt_field(frame.rsi),
            ])
            .map_err(write_err)?;
        }

        wtr.flush().map_err(flush_err)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::backtest::run_backtest;
    use crate::domain::indicator::frame::IndicatorConfig;
    use chrono::NaiveDate;
    use std::fs;
    use tempfile::TempDir;

    fn dated_bars(prices: &[f64]) -> Vec<Bar> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        prices
            .iter()
            .enumerate()
            .map(|(i, &close)| Bar::dated(start + chrono::Duration::days(i as i64), close))
            .collect()
    }

    #[test]
    fn writes_frame_rows_with_empty_unknowns() {
        let bars = dated_bars(&[10.0, 11.0, 12.0, 13.0]);
        let result = run_backtest(&bars, &IndicatorConfig::new(1, 2, 3, 2)).unwrap();

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("frames.csv");
        CsvReportAdapter.write_frames(&result, &bars, &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], FRAME_HEADER.join(","));
        assert_eq!(lines[1], "0,2024-01-01,10,10,,,,,,,");
        assert!(lines[4].starts_with("3,2024-01-04,13,13,12.5,12,"));
    }

    #[test]
    fn writes_trade_rows() {
        let bars = dated_bars(&[100.0; 12]);
        let mut result = run_backtest(&bars, &IndicatorConfig::new(2, 4, 3, 3)).unwrap();
        result.trades.push(crate::domain::position::Trade {
            entry_price: 90.0,
            exit_price: 85.0,
            entry_index: 2,
            exit_index: 3,
            stop_loss: 86.24,
            take_profit: 107.8,
            exit_reason: crate::domain::position::ExitReason::StopLoss,
        });

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("trades.csv");
        CsvReportAdapter.write_trades(&result, &bars, &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], TRADE_HEADER.join(","));
        assert_eq!(
            lines[1],
            "2,2024-01-03,90,3,2024-01-04,85,86.24,107.8,-5,stop_loss"
        );
    }

    #[test]
    fn writes_rsi_column() {
        let bars = dated_bars(&[10.0, 11.0, 12.0, 13.0]);
        let config = IndicatorConfig::new(1, 2, 3, 2).with_rsi_window(2);
        let result = run_backtest(&bars, &config).unwrap();

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("frames.csv");
        CsvReportAdapter.write_frames(&result, &bars, &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert!(lines[0].ends_with(",resistance,rsi"));
        assert!(lines[2].ends_with(",11,"));
        assert!(lines[3].ends_with(",12,100"));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn failed_flush_is_report_error() {
        let bars = dated_bars(&[100.0; 4]);
        let result = run_backtest(&bars, &IndicatorConfig::new(1, 1, 1, 1)).unwrap();
        let full = Path::new("/dev/full");

        let err = CsvReportAdapter.write_frames(&result, &bars, full).unwrap_err();
        assert!(matches!(err, TraderError::Report { .. }));
        assert_eq!(err.exit_code(), 4);

        let err = CsvReportAdapter.write_trades(&result, &bars, full).unwrap_err();
        assert!(matches!(err, TraderError::Report { .. }));
    }

    #[test]
    fn unwritable_path_is_report_error() {
        let bars = dated_bars(&[100.0; 4]);
        let result = run_backtest(&bars, &IndicatorConfig::new(1, 1, 1, 1)).unwrap();
        let err = CsvReportAdapter
            .write_trades(&result, &bars, Path::new("/nonexistent/dir/trades.csv"))
            .unwrap_err();
        assert!(matches!(err, TraderError::Report { .. }));
    }
}
