//! Core domain types and logic.

pub mod trade;
pub mod ohlcv;
pub mod pnl;
pub mod merge;
pub mod annotation;
pub mod summary;
pub mod settings;
pub mod config_validation;
pub mod error;
