//! CSV file data adapter for the trade log and the OHLC history.

use crate::domain::error::PnlChartError;
use crate::domain::ohlcv::{parse_bar_time, PriceBar};
use crate::domain::trade::RawTrade;
use crate::ports::data_port::DataPort;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

/// Broker export columns. Amounts stay as text so the loader can strip
/// thousands separators and report the offending row.
#[derive(Debug, Deserialize)]
struct TradeRow {
    #[serde(rename = "Trade Date/Time")]
    timestamp: String,
    #[serde(rename = "action", alias = "Buy/Sell")]
    action: String,
    #[serde(rename = "Quantity")]
    quantity: String,
    #[serde(rename = "Price")]
    price: String,
    #[serde(rename = "Notional Value")]
    notional_value: String,
    #[serde(rename = "Comm")]
    commission: String,
    #[serde(rename = "Fee")]
    fee: String,
}

impl From<TradeRow> for RawTrade {
    fn from(row: TradeRow) -> Self {
        RawTrade {
            timestamp: row.timestamp,
            action: row.action,
            quantity: row.quantity,
            price: row.price,
            notional_value: row.notional_value,
            commission: row.commission,
            fee: row.fee,
        }
    }
}

#[derive(Debug, Deserialize)]
struct BarRow {
    time: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    #[serde(default)]
    volume: Option<f64>,
}

pub struct CsvAdapter {
    trades_path: PathBuf,
    prices_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(trades_path: PathBuf, prices_path: PathBuf) -> Self {
        Self {
            trades_path,
            prices_path,
        }
    }
}

impl DataPort for CsvAdapter {
    fn fetch_trades(&self) -> Result<Vec<RawTrade>, PnlChartError> {
        let path = &self.trades_path;
        let content = fs::read_to_string(path).map_err(|e| PnlChartError::TradeSource {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .from_reader(content.as_bytes());

        rdr.deserialize::<TradeRow>()
            .map(|result| {
                result.map(RawTrade::from).map_err(|e| PnlChartError::TradeSource {
                    reason: format!("CSV parse error in {}: {}", path.display(), e),
                })
            })
            .collect()
    }

    fn fetch_bars(&self) -> Result<Vec<PriceBar>, PnlChartError> {
        let path = &self.prices_path;
        let content = fs::read_to_string(path).map_err(|e| PnlChartError::PriceSource {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());
        let mut bars = Vec::new();

        for (i, result) in rdr.deserialize::<BarRow>().enumerate() {
            let row = result.map_err(|e| PnlChartError::PriceSource {
                reason: format!("CSV parse error in {}: {}", path.display(), e),
            })?;
            let time = parse_bar_time(&row.time).ok_or_else(|| {
                PnlChartError::malformed(i + 1, "time", format!("unparseable timestamp '{}'", row.time))
            })?;
            bars.push(PriceBar {
                time,
                open: row.open,
                high: row.high,
                low: row.low,
                close: row.close,
                volume: row.volume,
            });
        }

        bars.sort_by_key(|b| b.time);
        Ok(bars)
    }

    fn trade_source(&self) -> String {
        self.trades_path.display().to_string()
    }
}
