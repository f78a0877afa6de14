//! Trade log statistics.

use super::position::Trade;

#[derive(Debug, Clone, PartialEq)]
pub struct TradeSummary {
    pub total_trades: usize,
    pub trades_won: usize,
    pub trades_lost: usize,
    pub trades_breakeven: usize,
    pub win_rate: f64,
    pub total_profit: f64,
    pub gross_profit: f64,
    pub gross_loss: f64,
    pub profit_factor: f64,
    pub avg_win: f64,
    pub avg_loss: f64,
    pub largest_win: f64,
    pub largest_loss: f64,
    pub avg_holding_bars: f64,
}

impl TradeSummary {
    pub fn compute(trades: &[Trade]) -> Self {
        let mut trades_won = 0usize;
        let mut trades_lost = 0usize;
        let mut trades_breakeven = 0usize;
        let mut gross_profit = 0.0_f64;
        let mut gross_loss = 0.0_f64;
        let mut largest_win = 0.0_f64;
        let mut largest_loss = 0.0_f64;
        let mut total_holding_bars = 0usize;

        for trade in trades {
            let profit = trade.profit();
            if profit > 0.0 {
                trades_won += 1;
                gross_profit += profit;
                largest_win = largest_win.max(profit);
            } else if profit < 0.0 {
                trades_lost += 1;
                gross_loss += profit.abs();
                largest_loss = largest_loss.max(profit.abs());
            } else {
                trades_breakeven += 1;
            }
            total_holding_bars += trade.holding_bars();
        }

        let total_trades = trades.len();
        let total_profit: f64 = trades.iter().map(Trade::profit).sum();

        let win_rate = if total_trades > 0 {
            trades_won as f64 / total_trades as f64
        } else {
            0.0
        };

        let profit_factor = if gross_loss > 0.0 {
            gross_profit / gross_loss
        } else if gross_profit > 0.0 {
            f64::INFINITY
        } else {
            0.0
        };

        let avg_win = if trades_won > 0 {
            gross_profit / trades_won as f64
        } else {
            0.0
        };

        let avg_loss = if trades_lost > 0 {
            gross_loss / trades_lost as f64
        } else {
            0.0
        };

        let avg_holding_bars = if total_trades > 0 {
            total_holding_bars as f64 / total_trades as f64
        } else {
            0.0
        };

        TradeSummary {
            total_trades,
            trades_won,
            trades_lost,
            trades_breakeven,
            win_rate,
            total_profit,
            gross_profit,
            gross_loss,
            profit_factor,
            avg_win,
            avg_loss,
            largest_win,
            largest_loss,
            avg_holding_bars,
        }
    }
}
