//! Presentation port: what the pipeline asks of a chart.

use std::path::Path;

use serde_json::Value;

use crate::domain::annotation::{Marker, TrendLine};
use crate::domain::error::PnlChartError;
use crate::domain::merge::PlPoint;
use crate::domain::ohlcv::PriceBar;

pub trait ChartPort {
    /// Base OHLC series of the main pane.
    fn set_bars(&mut self, bars: &[PriceBar]);

    /// Named line in the synced secondary pane.
    fn create_line(&mut self, name: &str, color: &str, points: &[PlPoint]);

    fn marker(&mut self, marker: &Marker);

    fn trend_line(&mut self, line: &TrendLine);

    /// Hand the saved drawing state for `symbol` to the chart.
    fn load_drawings(&mut self, symbol: &str, drawings: Option<Value>);

    /// Current drawing state for `symbol`, if the chart holds any.
    fn drawings(&self, symbol: &str) -> Option<Value>;

    fn show(&mut self, output: &Path) -> Result<(), PnlChartError>;
}
