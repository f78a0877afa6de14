//! Open position and closed trade records.

use super::indicator::frame::IndicatorFrame;

/// Stop-loss sits this fraction of support (or of the entry close).
pub const STOP_LOSS_FACTOR: f64 = 0.98;
/// Take-profit sits this fraction of resistance.
pub const TAKE_PROFIT_FACTOR: f64 = 0.98;
/// Take-profit relative to the entry close when resistance is unknown.
pub const FALLBACK_TAKE_PROFIT_FACTOR: f64 = 1.02;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub entry_price: f64,
    pub entry_index: usize,
    pub stop_loss: f64,
    pub take_profit: f64,
}

impl Position {
    /// Opens a long position at `close`, deriving exit thresholds from the
    /// bar's support and resistance when they are defined.
    pub fn open(index: usize, close: f64, frame: &IndicatorFrame) -> Self {
        let stop_loss = match frame.support {
            Some(support) => support * STOP_LOSS_FACTOR,
            None => close * STOP_LOSS_FACTOR,
        };
        let take_profit = match frame.resistance {
            Some(resistance) => resistance * TAKE_PROFIT_FACTOR,
            None => close * FALLBACK_TAKE_PROFIT_FACTOR,
        };

        Position {
            entry_price: close,
            entry_index: index,
            stop_loss,
            take_profit,
        }
    }

    pub fn should_stop_loss(&self, price: f64) -> bool {
        price <= self.stop_loss
    }

    pub fn should_take_profit(&self, price: f64) -> bool {
        price >= self.take_profit
    }

    /// Exit reason for `price`, stop-loss first when both hold.
    pub fn exit_reason(&self, price: f64) -> Option<ExitReason> {
        if self.should_stop_loss(price) {
            Some(ExitReason::StopLoss)
        } else if self.should_take_profit(price) {
            Some(ExitReason::TakeProfit)
        } else {
            None
        }
    }

    pub fn unrealized_pnl(&self, price: f64) -> f64 {
        price - self.entry_price
    }

    pub fn close(self, index: usize, price: f64, reason: ExitReason) -> Trade {
        Trade {
            entry_price: self.entry_price,
            exit_price: price,
            entry_index: self.entry_index,
            exit_index: index,
            stop_loss: self.stop_loss,
            take_profit: self.take_profit,
            exit_reason: reason,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    StopLoss,
    TakeProfit,
}

impl ExitReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExitReason::StopLoss => "stop_loss",
            ExitReason::TakeProfit => "take_profit",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trade {
    pub entry_price: f64,
    pub exit_price: f64,
    pub entry_index: usize,
    pub exit_index: usize,
    pub stop_loss: f64,
    pub take_profit: f64,
    pub exit_reason: ExitReason,
}

impl Trade {
    /// Absolute price-unit profit of one unit held.
    pub fn profit(&self) -> f64 {
        self.exit_price - self.entry_price
    }

    pub fn holding_bars(&self) -> usize {
        self.exit_index - self.entry_index
    }
}
