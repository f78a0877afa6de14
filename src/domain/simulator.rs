//! Single-position trade simulation.
//!
//! Two states, Flat and InPosition, visited once per bar in index order.
//! On each bar the entry rule is checked first; a position opened on that
//! bar then has its exit rule checked against the same close, so a trade can
//! open and close on one bar. The next bar after an exit may enter again.
//!
//! Entry: `sma_short > sma_long` and `close < band_lower`.
//! Exit:  `close <= stop_loss` or `close >= take_profit`.
//!
//! Comparisons against an unknown indicator value are false.

use tracing::debug;

use super::indicator::frame::IndicatorFrame;
use super::position::{Position, Trade};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PositionState {
    Flat,
    InPosition(Position),
}

/// What happened on one bar.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StepEvents {
    pub entered: Option<Position>,
    pub exited: Option<Trade>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    pub trades: Vec<Trade>,
    pub open_position: Option<Position>,
}

impl SimulationResult {
    pub fn total_profit(&self) -> f64 {
        self.trades.iter().map(Trade::profit).sum()
    }
}

#[derive(Debug, Clone)]
pub struct Simulator {
    state: PositionState,
    trades: Vec<Trade>,
    next_index: usize,
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulator {
    pub fn new() -> Self {
        Simulator {
            state: PositionState::Flat,
            trades: Vec::new(),
            next_index: 0,
        }
    }

    pub fn state(&self) -> &PositionState {
        &self.state
    }

    pub fn open_position(&self) -> Option<&Position> {
        match &self.state {
            PositionState::InPosition(pos) => Some(pos),
            PositionState::Flat => None,
        }
    }

    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    /// Advances over the next bar. Bars must arrive in index order; the
    /// simulator tracks the index itself.
    pub fn step(&mut self, close: f64, frame: &IndicatorFrame) -> StepEvents {
        let index = self.next_index;
        self.next_index += 1;

        let mut events = StepEvents::default();

        if self.state == PositionState::Flat && should_enter(close, frame) {
            let pos = Position::open(index, close, frame);
            debug!(
                index,
                entry_price = pos.entry_price,
                stop_loss = pos.stop_loss,
                take_profit = pos.take_profit,
                "open long"
            );
            self.state = PositionState::InPosition(pos);
            events.entered = Some(pos);
        }

        if let PositionState::InPosition(pos) = self.state {
            if let Some(reason) = pos.exit_reason(close) {
                let trade = pos.close(index, close, reason);
                debug!(
                    index,
                    entry_index = trade.entry_index,
                    exit_price = trade.exit_price,
                    profit = trade.profit(),
                    reason = reason.as_str(),
                    "close long"
                );
                self.trades.push(trade);
                self.state = PositionState::Flat;
                events.exited = Some(trade);
            }
        }

        events
    }

    pub fn finish(self) -> SimulationResult {
        let open_position = match self.state {
            PositionState::InPosition(pos) => Some(pos),
            PositionState::Flat => None,
        };
        SimulationResult {
            trades: self.trades,
            open_position,
        }
    }
}

/// Replays every bar through a fresh simulator.
///
/// `frames` must be aligned index-for-index with `prices`, as produced by
/// `compute_frames`.
pub fn simulate(prices: &[f64], frames: &[IndicatorFrame]) -> SimulationResult {
    debug_assert_eq!(
        prices.len(),
        frames.len(),
        "one indicator frame per price is required"
    );
    let mut simulator = Simulator::new();
    for (close, frame) in prices.iter().zip(frames) {
        simulator.step(*close, frame);
    }
    simulator.finish()
}

pub fn should_enter(close: f64, frame: &IndicatorFrame) -> bool {
    greater(frame.sma_short, frame.sma_long) && greater(frame.band_lower, Some(close))
}

fn greater(left: Option<f64>, right: Option<f64>) -> bool {
    match (left, right) {
        (Some(l), Some(r)) => l > r,
        _ => false,
    }
}
