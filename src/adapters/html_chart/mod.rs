//! HTML chart adapter implementing ChartPort.
//!
//! Collects the series, markers and trend lines handed over by the pipeline
//! and writes one self-contained HTML document: a title bar, the price pane,
//! the synced line pane underneath, and the symbol's drawing state embedded
//! as JSON so the document carries it.

pub mod chart_svg;

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::domain::annotation::{Marker, TrendLine};
use crate::domain::error::PnlChartError;
use crate::domain::merge::PlPoint;
use crate::domain::ohlcv::PriceBar;
use crate::domain::settings::DEFAULT_PANE_HEIGHT;
use crate::ports::chart_port::ChartPort;

use chart_svg::{escape, LineSeries, TimeAxis, CHART_WIDTH};

const CHART_HEIGHT: f64 = 640.0;

pub struct HtmlChartAdapter {
    pane_height: f64,
    bars: Vec<PriceBar>,
    lines: Vec<LineSeries>,
    markers: Vec<Marker>,
    trend_lines: Vec<TrendLine>,
    symbol: Option<String>,
    drawings: Option<Value>,
}

impl HtmlChartAdapter {
    /// `pane_height` is the line pane's share of the chart height.
    pub fn new(pane_height: f64) -> Self {
        Self {
            pane_height,
            bars: Vec::new(),
            lines: Vec::new(),
            markers: Vec::new(),
            trend_lines: Vec::new(),
            symbol: None,
            drawings: None,
        }
    }

    pub fn render(&self) -> Result<String, PnlChartError> {
        let axis = TimeAxis::new(&self.bars);
        let pane_px = (CHART_HEIGHT * self.pane_height).round();
        let main_px = CHART_HEIGHT - pane_px;

        let price_svg = if self.bars.is_empty() {
            "<p class=\"empty\">No price data available.</p>".to_string()
        } else {
            chart_svg::generate_price_svg(
                &self.bars,
                &self.markers,
                &self.trend_lines,
                &axis,
                main_px,
            )
        };
        let pane_svg = if self.lines.is_empty() || self.bars.is_empty() {
            String::new()
        } else {
            chart_svg::generate_line_pane_svg(&self.lines, &axis, pane_px)
        };

        let symbol = self.symbol.as_deref().unwrap_or("");
        let drawings_json = match &self.drawings {
            Some(v) => serde_json::to_string(v).map_err(|e| PnlChartError::Render {
                reason: format!("failed to serialize drawings: {e}"),
            })?,
            None => "null".to_string(),
        };
        // keep "</script>" inside the JSON from closing the element
        let drawings_json = drawings_json.replace("</", "<\\/");

        let range = match (self.bars.first(), self.bars.last()) {
            (Some(first), Some(last)) => format!("{} to {}", first.time, last.time),
            _ => String::new(),
        };

        Ok(format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{symbol} - Trades and P&amp;L</title>
<style>
body {{ background: #0b0e14; color: #d1d4dc; font-family: sans-serif; margin: 16px; }}
.topbar {{ display: flex; gap: 24px; align-items: baseline; width: {width:.0}px; }}
.topbar .symbol {{ font-size: 20px; font-weight: bold; }}
.chart svg {{ display: block; }}
</style>
</head>
<body>
<div class="topbar"><span class="symbol">{symbol}</span><span class="range">{range}</span><span class="counts">{bars} bars, {markers} markers, {lines} trend lines</span></div>
<div class="chart">
{price_svg}
{pane_svg}
</div>
<script type="application/json" id="drawings" data-symbol="{symbol}">{drawings_json}</script>
</body>
</html>
"#,
            symbol = escape(symbol),
            width = CHART_WIDTH,
            range = escape(&range),
            bars = self.bars.len(),
            markers = self.markers.len(),
            lines = self.trend_lines.len(),
        ))
    }
}

impl Default for HtmlChartAdapter {
    fn default() -> Self {
        Self::new(DEFAULT_PANE_HEIGHT)
    }
}

impl ChartPort for HtmlChartAdapter {
    fn set_bars(&mut self, bars: &[PriceBar]) {
        self.bars = bars.to_vec();
    }

    fn create_line(&mut self, name: &str, color: &str, points: &[PlPoint]) {
        self.lines.push(LineSeries {
            name: name.to_string(),
            color: color.to_string(),
            points: points.to_vec(),
        });
    }

    fn marker(&mut self, marker: &Marker) {
        self.markers.push(marker.clone());
    }

    fn trend_line(&mut self, line: &TrendLine) {
        self.trend_lines.push(line.clone());
    }

    fn load_drawings(&mut self, symbol: &str, drawings: Option<Value>) {
        self.symbol = Some(symbol.to_string());
        self.drawings = drawings;
    }

    fn drawings(&self, symbol: &str) -> Option<Value> {
        match &self.symbol {
            Some(s) if s == symbol => self.drawings.clone(),
            _ => None,
        }
    }

    fn show(&mut self, output: &Path) -> Result<(), PnlChartError> {
        let html = self.render()?;
        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(PnlChartError::Io)?;
        }
        fs::write(output, html).map_err(PnlChartError::Io)?;
        Ok(())
    }
}
