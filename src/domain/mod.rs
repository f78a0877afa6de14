//! Core domain types and logic.

pub mod bar;
pub mod indicator;
pub mod position;
pub mod simulator;
pub mod backtest;
pub mod metrics;
pub mod config_validation;
pub mod error;
