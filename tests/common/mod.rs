#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use pnlchart::domain::annotation::{Marker, TrendLine};
use pnlchart::domain::error::PnlChartError;
use pnlchart::domain::merge::PlPoint;
pub use pnlchart::domain::ohlcv::PriceBar;
use pnlchart::domain::settings::ChartSettings;
use pnlchart::domain::trade::{Action, RawTrade, TradeRecord};
use pnlchart::ports::chart_port::ChartPort;
use pnlchart::ports::data_port::DataPort;
use pnlchart::ports::drawing_port::{DrawingPort, Drawings};
use serde_json::Value;
use std::cell::RefCell;
use std::path::{Path, PathBuf};

pub struct MockDataPort {
    pub trades: Vec<RawTrade>,
    pub bars: Vec<PriceBar>,
    pub bar_error: Option<String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            trades: Vec::new(),
            bars: Vec::new(),
            bar_error: None,
        }
    }

    pub fn with_trades(mut self, trades: Vec<RawTrade>) -> Self {
        self.trades = trades;
        self
    }

    pub fn with_bars(mut self, bars: Vec<PriceBar>) -> Self {
        self.bars = bars;
        self
    }

    pub fn with_bar_error(mut self, reason: &str) -> Self {
        self.bar_error = Some(reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_trades(&self) -> Result<Vec<RawTrade>, PnlChartError> {
        Ok(self.trades.clone())
    }

    fn fetch_bars(&self) -> Result<Vec<PriceBar>, PnlChartError> {
        if let Some(reason) = &self.bar_error {
            return Err(PnlChartError::PriceSource {
                reason: reason.clone(),
            });
        }
        Ok(self.bars.clone())
    }

    fn trade_source(&self) -> String {
        "mock".to_string()
    }
}

/// Chart that records every call instead of drawing.
#[derive(Default)]
pub struct RecordingChart {
    pub bars: Vec<PriceBar>,
    pub lines: Vec<(String, String, Vec<PlPoint>)>,
    pub markers: Vec<Marker>,
    pub trend_lines: Vec<TrendLine>,
    pub loaded: Option<(String, Option<Value>)>,
    /// Replaces the loaded state on `drawings()`, as if the user drew.
    pub edited: Option<Value>,
    pub shown: Option<PathBuf>,
}

impl ChartPort for RecordingChart {
    fn set_bars(&mut self, bars: &[PriceBar]) {
        self.bars = bars.to_vec();
    }

    fn create_line(&mut self, name: &str, color: &str, points: &[PlPoint]) {
        self.lines
            .push((name.to_string(), color.to_string(), points.to_vec()));
    }

    fn marker(&mut self, marker: &Marker) {
        self.markers.push(marker.clone());
    }

    fn trend_line(&mut self, line: &TrendLine) {
        self.trend_lines.push(line.clone());
    }

    fn load_drawings(&mut self, symbol: &str, drawings: Option<Value>) {
        self.loaded = Some((symbol.to_string(), drawings));
    }

    fn drawings(&self, symbol: &str) -> Option<Value> {
        match &self.loaded {
            Some((s, loaded)) if s == symbol => self.edited.clone().or_else(|| loaded.clone()),
            _ => None,
        }
    }

    fn show(&mut self, output: &Path) -> Result<(), PnlChartError> {
        self.shown = Some(output.to_path_buf());
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryDrawingStore {
    pub stored: RefCell<Drawings>,
    pub saves: RefCell<usize>,
}

impl DrawingPort for MemoryDrawingStore {
    fn load(&self) -> Result<Drawings, PnlChartError> {
        Ok(self.stored.borrow().clone())
    }

    fn save(&self, drawings: &Drawings) -> Result<(), PnlChartError> {
        *self.stored.borrow_mut() = drawings.clone();
        *self.saves.borrow_mut() += 1;
        Ok(())
    }
}

pub fn at(h: u32, m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 1)
        .unwrap()
        .and_hms_opt(h, m, 0)
        .unwrap()
}

/// Raw broker row at `time` (source zone, `YYYY-MM-DD, HH:MM:SS`).
pub fn raw_trade(time: &str, quantity: i64, price: f64) -> RawTrade {
    RawTrade {
        timestamp: time.to_string(),
        action: if quantity > 0 { "BUY" } else { "SELL" }.to_string(),
        quantity: quantity.to_string(),
        price: format!("{}", price),
        notional_value: format!("{}", -(quantity as f64) * price),
        commission: "0".to_string(),
        fee: "0".to_string(),
    }
}

pub fn trade(time: NaiveDateTime, quantity: i64, price: f64) -> TradeRecord {
    TradeRecord {
        timestamp: time,
        action: if quantity > 0 { Action::Buy } else { Action::Sell },
        quantity,
        price,
        notional_value: -(quantity as f64) * price,
        commission: 0.0,
        fee: 0.0,
    }
}

pub fn bar(time: NaiveDateTime, close: f64) -> PriceBar {
    PriceBar {
        time,
        open: close - 1.0,
        high: close + 1.0,
        low: close - 2.0,
        close,
        volume: Some(100.0),
    }
}

/// One bar every five minutes starting at `start`.
pub fn generate_bars(start: NaiveDateTime, count: usize, start_price: f64) -> Vec<PriceBar> {
    (0..count)
        .map(|i| bar(start + chrono::Duration::minutes(5 * i as i64), start_price + i as f64))
        .collect()
}

pub fn sample_settings() -> ChartSettings {
    let mut settings = ChartSettings::new("Trades.csv".into(), "ohlc.csv".into(), "MNQH4".into());
    settings.tz_shift_hours = 0;
    settings
}
