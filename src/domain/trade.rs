//! Trade records and the trade loader's normalization step.
//!
//! Adapters hand over [`RawTrade`] rows exactly as read from the source file;
//! [`normalize_trades`] parses them, applies the fixed timezone shift and
//! returns the records in chronological order.

use std::fmt;

use chrono::{Duration, NaiveDateTime};

use crate::domain::error::PnlChartError;

/// Timestamp layout of the broker's `Trade Date/Time` column.
pub const TRADE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d, %H:%M:%S";

/// Shift from the source zone (UTC-4) to the display zone (UTC+3).
/// Static offset, no daylight-saving adjustment.
pub const DEFAULT_TZ_SHIFT_HOURS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Buy,
    Sell,
}

impl Action {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_uppercase().as_str() {
            "BUY" => Some(Action::Buy),
            "SELL" => Some(Action::Sell),
            _ => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Buy => write!(f, "BUY"),
            Action::Sell => write!(f, "SELL"),
        }
    }
}

/// One trade row as found in the source, before any parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTrade {
    pub timestamp: String,
    pub action: String,
    pub quantity: String,
    pub price: String,
    pub notional_value: String,
    pub commission: String,
    pub fee: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TradeRecord {
    pub timestamp: NaiveDateTime,
    pub action: Action,
    pub quantity: i64,
    pub price: f64,
    pub notional_value: f64,
    pub commission: f64,
    pub fee: f64,
}

impl TradeRecord {
    /// Parse one raw row. `row` is the 1-based data row used in error messages.
    pub fn from_raw(raw: &RawTrade, row: usize, tz_shift_hours: i64) -> Result<Self, PnlChartError> {
        let timestamp = NaiveDateTime::parse_from_str(raw.timestamp.trim(), TRADE_TIMESTAMP_FORMAT)
            .map_err(|e| {
                PnlChartError::malformed(
                    row,
                    "Trade Date/Time",
                    format!("'{}' ({})", raw.timestamp, e),
                )
            })?;
        let timestamp = timestamp
            .checked_add_signed(Duration::hours(tz_shift_hours))
            .ok_or_else(|| {
                PnlChartError::malformed(row, "Trade Date/Time", "timestamp out of range after shift")
            })?;

        let action = Action::parse(&raw.action).ok_or_else(|| {
            PnlChartError::malformed(row, "action", format!("expected BUY or SELL, got '{}'", raw.action))
        })?;

        Ok(TradeRecord {
            timestamp,
            action,
            quantity: parse_quantity(&raw.quantity, row)?,
            price: parse_amount(&raw.price, row, "Price")?,
            notional_value: parse_amount(&raw.notional_value, row, "Notional Value")?,
            commission: parse_decimal(&raw.commission, row, "Comm")?,
            fee: parse_decimal(&raw.fee, row, "Fee")?,
        })
    }

    pub fn is_buy(&self) -> bool {
        self.action == Action::Buy
    }
}

/// Parse, shift and sort a batch of raw rows.
///
/// The sort is stable, so trades sharing a timestamp keep their file order.
pub fn normalize_trades(
    raws: &[RawTrade],
    tz_shift_hours: i64,
) -> Result<Vec<TradeRecord>, PnlChartError> {
    let mut trades = raws
        .iter()
        .enumerate()
        .map(|(i, raw)| TradeRecord::from_raw(raw, i + 1, tz_shift_hours))
        .collect::<Result<Vec<_>, _>>()?;
    trades.sort_by_key(|t| t.timestamp);
    Ok(trades)
}

fn strip_separators(value: &str) -> String {
    value.trim().replace(',', "")
}

fn parse_amount(value: &str, row: usize, field: &str) -> Result<f64, PnlChartError> {
    let cleaned = strip_separators(value);
    cleaned
        .parse::<f64>()
        .map_err(|e| PnlChartError::malformed(row, field, format!("'{}' ({})", value, e)))
}

fn parse_decimal(value: &str, row: usize, field: &str) -> Result<f64, PnlChartError> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|e| PnlChartError::malformed(row, field, format!("'{}' ({})", value, e)))
}

fn parse_quantity(value: &str, row: usize) -> Result<i64, PnlChartError> {
    strip_separators(value)
        .parse::<i64>()
        .map_err(|e| PnlChartError::malformed(row, "Quantity", format!("'{}' ({})", value, e)))
}
