//! Data access port trait.

use crate::domain::bar::Bar;
use crate::domain::error::TraderError;

pub trait DataPort {
    /// Bars for `symbol`, in sequence order.
    fn fetch_bars(&self, symbol: &str) -> Result<Vec<Bar>, TraderError>;

    fn list_symbols(&self) -> Result<Vec<String>, TraderError>;
}
