//! Inline SVG rendering for the price pane and the synced line pane.
//!
//! Both panes share one [`TimeAxis`] built from the bar times, so an x
//! coordinate means the same bar in either pane. Anything timed before the
//! first bar has no slot and is not drawn.

use std::collections::HashMap;
use std::fmt::Write;

use chrono::NaiveDateTime;

use crate::domain::annotation::{LineStyle, Marker, MarkerPosition, MarkerShape, TrendLine};
use crate::domain::merge::PlPoint;
use crate::domain::ohlcv::PriceBar;

pub const CHART_WIDTH: f64 = 1000.0;
const PADDING: f64 = 40.0;
const UP_COLOR: &str = "#26a69a";
const DOWN_COLOR: &str = "#ef5350";
const MARKER_SIZE: f64 = 7.0;
const MARKER_STEP: f64 = 16.0;

#[derive(Debug, Clone, PartialEq)]
pub struct LineSeries {
    pub name: String,
    pub color: String,
    pub points: Vec<PlPoint>,
}

pub struct TimeAxis {
    times: Vec<NaiveDateTime>,
    slot: f64,
}

impl TimeAxis {
    pub fn new(bars: &[PriceBar]) -> Self {
        let times: Vec<NaiveDateTime> = bars.iter().map(|b| b.time).collect();
        let slot = if times.is_empty() {
            0.0
        } else {
            (CHART_WIDTH - 2.0 * PADDING) / times.len() as f64
        };
        Self { times, slot }
    }

    /// Index of the last bar at or before `time`.
    pub fn index_at(&self, time: NaiveDateTime) -> Option<usize> {
        self.times.partition_point(|t| *t <= time).checked_sub(1)
    }

    pub fn x(&self, index: usize) -> f64 {
        PADDING + (index as f64 + 0.5) * self.slot
    }

    pub fn x_at(&self, time: NaiveDateTime) -> Option<f64> {
        self.index_at(time).map(|i| self.x(i))
    }

    pub fn slot(&self) -> f64 {
        self.slot
    }
}

struct ValueScale {
    min: f64,
    range: f64,
    top: f64,
    height: f64,
}

impl ValueScale {
    fn new(min: f64, max: f64, top: f64, height: f64) -> Self {
        let raw = max - min;
        let margin = if raw > 0.0 { raw * 0.05 } else { 1.0 };
        Self {
            min: min - margin,
            range: raw + 2.0 * margin,
            top,
            height,
        }
    }

    fn y(&self, value: f64) -> f64 {
        self.top + self.height - (value - self.min) / self.range * self.height
    }
}

/// Escape text for use in HTML/SVG content and attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn dash_array(style: LineStyle) -> &'static str {
    match style {
        LineStyle::Solid => "",
        LineStyle::Dashed => " stroke-dasharray=\"8 4\"",
        LineStyle::Dotted => " stroke-dasharray=\"2 3\"",
    }
}

pub fn generate_price_svg(
    bars: &[PriceBar],
    markers: &[Marker],
    trend_lines: &[TrendLine],
    axis: &TimeAxis,
    height: f64,
) -> String {
    if bars.is_empty() {
        return String::new();
    }

    let (mut min, mut max) = bars.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |acc, b| {
        (acc.0.min(b.low), acc.1.max(b.high))
    });
    for line in trend_lines {
        min = min.min(line.start_value).min(line.end_value);
        max = max.max(line.start_value).max(line.end_value);
    }
    let scale = ValueScale::new(min, max, PADDING / 2.0, height - PADDING);

    let mut svg = String::new();
    let _ = write!(
        svg,
        r#"<svg class="price-pane" xmlns="http://www.w3.org/2000/svg" width="{w:.0}" height="{h:.0}" viewBox="0 0 {w:.0} {h:.0}">"#,
        w = CHART_WIDTH,
        h = height
    );
    let _ = write!(
        svg,
        r##"<rect width="100%" height="100%" fill="#131722"/>"##
    );

    let body_width = (axis.slot() * 0.7).max(1.0);
    for (i, bar) in bars.iter().enumerate() {
        let x = axis.x(i);
        let color = if bar.is_bullish() { UP_COLOR } else { DOWN_COLOR };
        let top = scale.y(bar.open.max(bar.close));
        let bottom = scale.y(bar.open.min(bar.close));
        let _ = write!(
            svg,
            r#"<line x1="{x:.1}" y1="{:.1}" x2="{x:.1}" y2="{:.1}" stroke="{color}" stroke-width="1"/>"#,
            scale.y(bar.high),
            scale.y(bar.low),
        );
        let _ = write!(
            svg,
            r#"<rect x="{:.1}" y="{top:.1}" width="{body_width:.1}" height="{:.1}" fill="{color}"/>"#,
            x - body_width / 2.0,
            (bottom - top).max(1.0),
        );
    }

    for line in trend_lines {
        let (Some(x1), Some(x2)) = (axis.x_at(line.start_time), axis.x_at(line.end_time)) else {
            continue;
        };
        let _ = write!(
            svg,
            r#"<line class="trend-line" x1="{x1:.1}" y1="{:.1}" x2="{x2:.1}" y2="{:.1}" stroke="{}" stroke-width="{:.1}"{}/>"#,
            scale.y(line.start_value),
            scale.y(line.end_value),
            escape(&line.color),
            line.width,
            dash_array(line.style),
        );
    }

    let mut stacks: HashMap<(usize, u8), usize> = HashMap::new();
    for marker in markers {
        let Some(index) = axis.index_at(marker.time) else {
            continue;
        };
        let bar = &bars[index];
        let slot_key = match marker.position {
            MarkerPosition::Above => 0u8,
            MarkerPosition::Below => 1,
            MarkerPosition::Inside => 2,
        };
        let depth = stacks.entry((index, slot_key)).or_insert(0);
        let offset = *depth as f64 * MARKER_STEP;
        *depth += 1;

        let x = axis.x(index);
        let (y, label_y) = match marker.position {
            MarkerPosition::Above => {
                let y = scale.y(bar.high) - MARKER_SIZE - 4.0 - offset;
                (y, y - MARKER_SIZE - 2.0)
            }
            MarkerPosition::Below => {
                let y = scale.y(bar.low) + MARKER_SIZE + 4.0 + offset;
                (y, y + MARKER_SIZE + 10.0)
            }
            MarkerPosition::Inside => {
                let y = scale.y(bar.midpoint()) - offset;
                (y, y + 4.0)
            }
        };
        write_marker(&mut svg, marker, x, y, label_y);
    }

    svg.push_str("</svg>");
    svg
}

fn write_marker(svg: &mut String, marker: &Marker, x: f64, y: f64, label_y: f64) {
    let color = escape(&marker.color);
    let s = MARKER_SIZE;
    let _ = match marker.shape {
        MarkerShape::ArrowUp => write!(
            svg,
            r#"<polygon class="marker" points="{:.1},{:.1} {:.1},{:.1} {:.1},{:.1}" fill="{color}"/>"#,
            x,
            y - s,
            x - s,
            y + s,
            x + s,
            y + s
        ),
        MarkerShape::ArrowDown => write!(
            svg,
            r#"<polygon class="marker" points="{:.1},{:.1} {:.1},{:.1} {:.1},{:.1}" fill="{color}"/>"#,
            x,
            y + s,
            x - s,
            y - s,
            x + s,
            y - s
        ),
        MarkerShape::Circle => write!(
            svg,
            r#"<circle class="marker" cx="{x:.1}" cy="{y:.1}" r="{s:.1}" fill="{color}"/>"#
        ),
        MarkerShape::Square => write!(
            svg,
            r#"<rect class="marker" x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{color}"/>"#,
            x - s,
            y - s,
            2.0 * s,
            2.0 * s
        ),
    };
    let label_x = match marker.position {
        MarkerPosition::Inside => x + s + 3.0,
        _ => x,
    };
    let anchor = match marker.position {
        MarkerPosition::Inside => "start",
        _ => "middle",
    };
    let _ = write!(
        svg,
        r#"<text x="{label_x:.1}" y="{label_y:.1}" fill="{color}" font-size="11" text-anchor="{anchor}">{}</text>"#,
        escape(&marker.label)
    );
}

pub fn generate_line_pane_svg(series: &[LineSeries], axis: &TimeAxis, height: f64) -> String {
    let plotted: Vec<(&LineSeries, Vec<(f64, f64)>)> = series
        .iter()
        .map(|s| {
            let points = s
                .points
                .iter()
                .filter_map(|p| axis.x_at(p.time).map(|x| (x, p.net_pl)))
                .collect::<Vec<_>>();
            (s, points)
        })
        .collect();

    let values = plotted.iter().flat_map(|(_, pts)| pts.iter().map(|p| p.1));
    let (min, max) = values.fold((0.0_f64, 0.0_f64), |acc, v| (acc.0.min(v), acc.1.max(v)));
    let scale = ValueScale::new(min, max, PADDING / 4.0, height - PADDING / 2.0);

    let mut svg = String::new();
    let _ = write!(
        svg,
        r#"<svg class="line-pane" xmlns="http://www.w3.org/2000/svg" width="{w:.0}" height="{h:.0}" viewBox="0 0 {w:.0} {h:.0}">"#,
        w = CHART_WIDTH,
        h = height
    );
    let _ = write!(
        svg,
        r##"<rect width="100%" height="100%" fill="#131722"/>"##
    );
    let zero = scale.y(0.0);
    let _ = write!(
        svg,
        r##"<line x1="{PADDING:.1}" y1="{zero:.1}" x2="{:.1}" y2="{zero:.1}" stroke="#555" stroke-dasharray="4 4"/>"##,
        CHART_WIDTH - PADDING
    );

    for (n, (s, points)) in plotted.iter().enumerate() {
        let color = escape(&s.color);
        let _ = write!(
            svg,
            r#"<text x="{:.1}" y="{:.1}" fill="{color}" font-size="12">{}</text>"#,
            PADDING,
            14.0 + n as f64 * 14.0,
            escape(&s.name)
        );
        if points.is_empty() {
            continue;
        }
        let polyline = points
            .iter()
            .map(|(x, v)| format!("{:.1},{:.1}", x, scale.y(*v)))
            .collect::<Vec<_>>()
            .join(" ");
        let _ = write!(
            svg,
            r#"<polyline class="series" points="{polyline}" fill="none" stroke="{color}" stroke-width="1.5"/>"#
        );
    }

    svg.push_str("</svg>");
    svg
}
