//! Run settings assembled from the config file and CLI overrides.

use std::path::PathBuf;

use crate::domain::annotation::AnnotationStyle;
use crate::domain::trade::DEFAULT_TZ_SHIFT_HOURS;

pub const DEFAULT_OUTPUT: &str = "chart.html";
pub const DEFAULT_DRAWINGS: &str = "drawings.json";
pub const DEFAULT_PANE_HEIGHT: f64 = 0.3;
pub const DEFAULT_LINE_WIDTH_PER_UNIT: f64 = 2.0;

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSettings {
    pub trades_path: PathBuf,
    pub prices_path: PathBuf,
    pub tz_shift_hours: i64,
    pub symbol: String,
    pub output: PathBuf,
    pub drawings: PathBuf,
    /// Height of the P&L pane relative to the whole chart.
    pub pane_height: f64,
    pub style: AnnotationStyle,
}

impl ChartSettings {
    pub fn new(trades_path: PathBuf, prices_path: PathBuf, symbol: String) -> Self {
        Self {
            trades_path,
            prices_path,
            tz_shift_hours: DEFAULT_TZ_SHIFT_HOURS,
            symbol,
            output: PathBuf::from(DEFAULT_OUTPUT),
            drawings: PathBuf::from(DEFAULT_DRAWINGS),
            pane_height: DEFAULT_PANE_HEIGHT,
            style: AnnotationStyle::default(),
        }
    }
}
