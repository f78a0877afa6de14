//! CLI definition and dispatch.

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info};

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::backtest::{run_backtest, BacktestResult};
use crate::domain::bar::Bar;
use crate::domain::config_validation::build_indicator_config;
use crate::domain::error::TraderError;
use crate::domain::indicator::frame::IndicatorConfig;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "bandtrader", about = "Band-reversion strategy backtester")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Replay the strategy over a price series
    Backtest {
        #[command(flatten)]
        source: SourceArgs,
        /// Trade log CSV output
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Indicator frame CSV output
        #[arg(long)]
        frames: Option<PathBuf>,
    },
    /// Compute indicator frames only
    Indicators {
        #[command(flatten)]
        source: SourceArgs,
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// List symbols available in the data directory
    ListSymbols {
        #[arg(long)]
        data_dir: Option<PathBuf>,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
    #[arg(long)]
    pub symbol: Option<String>,
    #[arg(long)]
    pub short_window: Option<usize>,
    #[arg(long)]
    pub long_window: Option<usize>,
    #[arg(long)]
    pub band_window: Option<usize>,
    #[arg(long)]
    pub support_resistance_window: Option<usize>,
    #[arg(long)]
    pub rsi_window: Option<usize>,
}

pub fn run(cli: Cli) -> ExitCode {
    match execute(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            (&e).into()
        }
    }
}

pub fn execute(command: Command) -> Result<(), TraderError> {
    match command {
        Command::Backtest {
            source,
            output,
            frames,
        } => run_backtest_command(&source, output.as_deref(), frames.as_deref()),
        Command::Indicators { source, output } => run_indicators_command(&source, &output),
        Command::Validate { config } => run_validate(&config),
        Command::ListSymbols { data_dir, config } => {
            run_list_symbols(data_dir.as_deref(), config.as_deref())
        }
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, TraderError> {
    info!("Loading config from {}", path.display());
    FileConfigAdapter::from_file(path).map_err(|e| TraderError::ConfigParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    })
}

fn load_optional_config(path: Option<&Path>) -> Result<FileConfigAdapter, TraderError> {
    match path {
        Some(p) => load_config(p),
        None => Ok(FileConfigAdapter::empty()),
    }
}

/// Config file windows, overridden by any window flags.
pub fn resolve_indicator_config(
    adapter: &dyn ConfigPort,
    source: &SourceArgs,
) -> Result<IndicatorConfig, TraderError> {
    let mut config = build_indicator_config(adapter)?;
    if let Some(w) = source.short_window {
        config.short_window = w;
    }
    if let Some(w) = source.long_window {
        config.long_window = w;
    }
    if let Some(w) = source.band_window {
        config.band_window = w;
    }
    if let Some(w) = source.support_resistance_window {
        config.support_resistance_window = w;
    }
    if let Some(w) = source.rsi_window {
        config.rsi_window = w;
    }
    Ok(config)
}

pub fn resolve_data_dir(
    override_dir: Option<&Path>,
    adapter: &dyn ConfigPort,
) -> Result<PathBuf, TraderError> {
    match override_dir {
        Some(dir) => Ok(dir.to_path_buf()),
        None => adapter
            .get_string("data", "dir")
            .map(PathBuf::from)
            .ok_or_else(|| TraderError::ConfigMissing {
                section: "data".into(),
                key: "dir".into(),
            }),
    }
}

pub fn resolve_symbol(
    override_symbol: Option<&str>,
    adapter: &dyn ConfigPort,
) -> Result<String, TraderError> {
    match override_symbol {
        Some(s) if !s.trim().is_empty() => Ok(s.trim().to_string()),
        _ => adapter
            .get_string("data", "symbol")
            .ok_or_else(|| TraderError::ConfigMissing {
                section: "data".into(),
                key: "symbol".into(),
            }),
    }
}

/// Loads bars for `symbol` and runs the backtest over them.
pub fn run_backtest_pipeline(
    data_port: &dyn DataPort,
    symbol: &str,
    config: &IndicatorConfig,
) -> Result<(Vec<Bar>, BacktestResult), TraderError> {
    info!(
        symbol,
        short = config.short_window,
        long = config.long_window,
        band = config.band_window,
        support_resistance = config.support_resistance_window,
        rsi = config.rsi_window,
        "running backtest"
    );
    let bars = data_port.fetch_bars(symbol)?;
    info!(symbol, bars = bars.len(), "bars loaded");
    let result = run_backtest(&bars, config)?;
    Ok((bars, result))
}

struct Prepared {
    adapter: FileConfigAdapter,
    symbol: String,
    bars: Vec<Bar>,
    result: BacktestResult,
}

fn prepare(source: &SourceArgs) -> Result<Prepared, TraderError> {
    let adapter = load_optional_config(source.config.as_deref())?;
    let config = resolve_indicator_config(&adapter, source)?;
    let data_dir = resolve_data_dir(source.data_dir.as_deref(), &adapter)?;
    let symbol = resolve_symbol(source.symbol.as_deref(), &adapter)?;

    let data_port = CsvAdapter::new(data_dir);
    let (bars, result) = run_backtest_pipeline(&data_port, &symbol, &config)?;
    Ok(Prepared {
        adapter,
        symbol,
        bars,
        result,
    })
}

fn run_backtest_command(
    source: &SourceArgs,
    output: Option<&Path>,
    frames: Option<&Path>,
) -> Result<(), TraderError> {
    let prepared = prepare(source)?;

    println!("{}", format_summary(&prepared.symbol, &prepared.result));

    let output = output
        .map(Path::to_path_buf)
        .or_else(|| prepared.adapter.get_string("report", "output").map(PathBuf::from));

    let report = CsvReportAdapter;
    if let Some(path) = output {
        report.write_trades(&prepared.result, &prepared.bars, &path)?;
        info!("Trade log written to {}", path.display());
    }
    if let Some(path) = frames {
        report.write_frames(&prepared.result, &prepared.bars, path)?;
        info!("Indicator frames written to {}", path.display());
    }
    Ok(())
}

fn run_indicators_command(source: &SourceArgs, output: &Path) -> Result<(), TraderError> {
    let prepared = prepare(source)?;
    CsvReportAdapter.write_frames(&prepared.result, &prepared.bars, output)?;
    info!(
        symbol = prepared.symbol.as_str(),
        "Indicator frames written to {}",
        output.display()
    );
    Ok(())
}

fn run_validate(config_path: &Path) -> Result<(), TraderError> {
    let adapter = load_config(config_path)?;
    let config = build_indicator_config(&adapter)?;
    println!(
        "Config OK: short={} long={} band={} support_resistance={} rsi={}",
        config.short_window,
        config.long_window,
        config.band_window,
        config.support_resistance_window,
        config.rsi_window
    );
    Ok(())
}

fn run_list_symbols(data_dir: Option<&Path>, config: Option<&Path>) -> Result<(), TraderError> {
    let adapter = load_optional_config(config)?;
    let dir = resolve_data_dir(data_dir, &adapter)?;
    for symbol in CsvAdapter::new(dir).list_symbols()? {
        println!("{symbol}");
    }
    Ok(())
}

pub fn format_summary(symbol: &str, result: &BacktestResult) -> String {
    let s = &result.summary;
    let mut out = format!(
        "{symbol}: {} bars, {} trades ({} won, {} lost, {} breakeven)\n",
        result.frames.len(),
        s.total_trades,
        s.trades_won,
        s.trades_lost,
        s.trades_breakeven
    );
    out.push_str(&format!("total profit: {:.4}\n", result.total_profit));
    out.push_str(&format!("win rate: {:.2}%\n", s.win_rate * 100.0));
    out.push_str(&format!("profit factor: {:.4}", s.profit_factor));
    if let Some(pos) = &result.open_position {
        out.push_str(&format!(
            "\nopen position: entry {} at bar {}, stop {:.4}, target {:.4}",
            pos.entry_price, pos.entry_index, pos.stop_loss, pos.take_profit
        ));
    }
    out
}
