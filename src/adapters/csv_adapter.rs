//! CSV file data adapter.
//!
//! Reads `<base_path>/<symbol>.csv`. The header row must name a `close`
//! column; a `date` column (`YYYY-MM-DD`) is optional. Other columns are
//! ignored. Dated rows are sorted chronologically, undated rows keep file order.

use crate::domain::bar::Bar;
use crate::domain::error::TraderError;
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, symbol: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", symbol))
    }
}

impl DataPort for CsvAdapter {
    fn fetch_bars(&self, symbol: &str) -> Result<Vec<Bar>, TraderError> {
        let path = self.csv_path(symbol);
        let content = fs::read_to_string(&path).map_err(|e| TraderError::Data {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;
        parse_bars(&content)
    }

    fn list_symbols(&self) -> Result<Vec<String>, TraderError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| TraderError::Data {
            reason: format!("failed to list {}: {}", self.base_path.display(), e),
        })?;

        let mut symbols: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "csv"))
            .filter_map(|path| path.file_stem().map(|s| s.to_string_lossy().into_owned()))
            .collect();
        symbols.sort();
        Ok(symbols)
    }
}

pub fn parse_bars(content: &str) -> Result<Vec<Bar>, TraderError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers = rdr
        .headers()
        .map_err(|e| TraderError::Data {
            reason: format!("CSV header error: {}", e),
        })?
        .clone();
    let column = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));
    let close_col = column("close").ok_or_else(|| TraderError::Data {
        reason: "missing close column".into(),
    })?;
    let date_col = column("date");

    let mut bars = Vec::new();
    for (row, result) in rdr.records().enumerate() {
        let record = result.map_err(|e| TraderError::Data {
            reason: format!("CSV parse error: {}", e),
        })?;

        let close: f64 = record
            .get(close_col)
            .ok_or_else(|| TraderError::Data {
                reason: format!("row {}: missing close value", row + 1),
            })?
            .parse()
            .map_err(|e| TraderError::Data {
                reason: format!("row {}: invalid close value: {}", row + 1, e),
            })?;

        let date = match date_col {
            Some(col) => {
                let date_str = record.get(col).ok_or_else(|| TraderError::Data {
                    reason: format!("row {}: missing date value", row + 1),
                })?;
                Some(NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
                    TraderError::Data {
                        reason: format!("row {}: invalid date format: {}", row + 1, e),
                    }
                })?)
            }
            None => None,
        };

        bars.push(Bar { date, close });
    }

    if bars.is_empty() {
        return Err(TraderError::Data {
            reason: "no bars in CSV".into(),
        });
    }

    if date_col.is_some() {
        bars.sort_by_key(|b| b.date);
    }
    Ok(bars)
}
