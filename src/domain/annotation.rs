//! Trade markers and entry-to-exit trend lines.
//!
//! [`annotate`] folds over the trades carrying the still-open entry points.
//! A trade with zero gain adds an entry point; a trade with non-zero gain
//! closes every open entry point with one trend line each and clears them.

use chrono::NaiveDateTime;

use crate::domain::pnl::PositionState;
use crate::domain::trade::TradeRecord;

pub const BUY_COLOR: &str = "#7bfc74";
pub const SELL_COLOR: &str = "#ff8888";
pub const WIN_LINE_COLOR: &str = "#008000";
pub const LOSS_LINE_COLOR: &str = "#bb0000";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerPosition {
    Above,
    Below,
    Inside,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerShape {
    ArrowUp,
    ArrowDown,
    Circle,
    Square,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Solid,
    Dashed,
    Dotted,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub time: NaiveDateTime,
    pub position: MarkerPosition,
    pub shape: MarkerShape,
    pub color: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrendLine {
    pub start_time: NaiveDateTime,
    pub start_value: f64,
    pub end_time: NaiveDateTime,
    pub end_value: f64,
    pub color: String,
    pub width: f64,
    pub style: LineStyle,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnotationStyle {
    /// Trend line width per unit of entry quantity.
    pub line_width_per_unit: f64,
    pub line_style: LineStyle,
}

impl Default for AnnotationStyle {
    fn default() -> Self {
        Self {
            line_width_per_unit: 2.0,
            line_style: LineStyle::Solid,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Annotations {
    pub markers: Vec<Marker>,
    pub trend_lines: Vec<TrendLine>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct EntryPoint {
    time: NaiveDateTime,
    value: f64,
    quantity: i64,
}

#[derive(Default)]
struct Fold {
    open: Vec<EntryPoint>,
    out: Annotations,
}

/// Derive markers and trend lines. `states` must be parallel to `trades`.
pub fn annotate(
    trades: &[TradeRecord],
    states: &[PositionState],
    style: &AnnotationStyle,
) -> Annotations {
    let fold = trades
        .iter()
        .zip(states)
        .fold(Fold::default(), |mut acc, (trade, state)| {
            if state.gain == 0.0 {
                acc.open.push(EntryPoint {
                    time: trade.timestamp,
                    value: trade.price,
                    quantity: trade.quantity,
                });
            } else {
                let color = if state.gain > 0.0 {
                    WIN_LINE_COLOR
                } else {
                    LOSS_LINE_COLOR
                };
                for entry in acc.open.drain(..) {
                    acc.out.trend_lines.push(TrendLine {
                        start_time: entry.time,
                        start_value: entry.value,
                        end_time: trade.timestamp,
                        end_value: trade.price,
                        color: color.to_string(),
                        width: entry.quantity.unsigned_abs() as f64 * style.line_width_per_unit,
                        style: style.line_style,
                    });
                }
                acc.out.markers.push(gain_marker(trade.timestamp, state.gain));
            }
            acc.out.markers.push(direction_marker(trade));
            acc
        });
    fold.out
}

fn gain_marker(time: NaiveDateTime, gain: f64) -> Marker {
    if gain > 0.0 {
        Marker {
            time,
            position: MarkerPosition::Inside,
            shape: MarkerShape::Circle,
            color: BUY_COLOR.to_string(),
            label: format!("+{:.2}", gain),
        }
    } else {
        Marker {
            time,
            position: MarkerPosition::Inside,
            shape: MarkerShape::Square,
            color: SELL_COLOR.to_string(),
            label: format!("{:.2}", gain),
        }
    }
}

fn direction_marker(trade: &TradeRecord) -> Marker {
    let (position, shape, color) = if trade.is_buy() {
        (MarkerPosition::Below, MarkerShape::ArrowUp, BUY_COLOR)
    } else {
        (MarkerPosition::Above, MarkerShape::ArrowDown, SELL_COLOR)
    };
    Marker {
        time: trade.timestamp,
        position,
        shape,
        color: color.to_string(),
        label: trade.quantity.to_string(),
    }
}
