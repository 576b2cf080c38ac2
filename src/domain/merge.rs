//! Backward as-of join of position states onto the price-bar time index.

use chrono::NaiveDateTime;

use crate::domain::ohlcv::PriceBar;
use crate::domain::pnl::PositionState;

#[derive(Debug, Clone, PartialEq)]
pub struct MergedBar {
    pub bar: PriceBar,
    pub state: Option<PositionState>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlPoint {
    pub time: NaiveDateTime,
    pub net_pl: f64,
}

/// Pair every bar with the latest state at or before its time.
///
/// Both inputs must be sorted by time. When several states share a
/// timestamp the last one wins.
pub fn merge_asof(bars: &[PriceBar], states: &[PositionState]) -> Vec<MergedBar> {
    let mut next = 0usize;
    let mut current: Option<&PositionState> = None;

    bars.iter()
        .map(|bar| {
            while next < states.len() && states[next].timestamp <= bar.time {
                current = Some(&states[next]);
                next += 1;
            }
            MergedBar {
                bar: bar.clone(),
                state: current.cloned(),
            }
        })
        .collect()
}

/// Net P&L per bar, dropping bars with no known state.
pub fn net_pl_series(merged: &[MergedBar]) -> Vec<PlPoint> {
    merged
        .iter()
        .filter_map(|m| {
            m.state.as_ref().map(|s| PlPoint {
                time: m.bar.time,
                net_pl: s.net_pl,
            })
        })
        .collect()
}
