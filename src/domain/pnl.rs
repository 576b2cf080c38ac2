//! Running position and realized P&L per trade.
//!
//! Realized P&L only moves on trades that bring the position back to flat.
//! While a position is open the last flat value is carried forward, so open
//! positions are never marked to market.

use chrono::NaiveDateTime;

use crate::domain::trade::TradeRecord;

#[derive(Debug, Clone, PartialEq)]
pub struct PositionState {
    pub timestamp: NaiveDateTime,
    pub position: i64,
    pub realized_pl: f64,
    pub gain: f64,
    pub net_pl: f64,
}

/// Compute one [`PositionState`] per trade. `trades` must already be in
/// chronological order.
pub fn compute_positions(trades: &[TradeRecord]) -> Vec<PositionState> {
    let mut position = 0i64;
    let mut cumulative_notional = 0.0_f64;
    let mut realized_pl = 0.0_f64;
    let mut states = Vec::with_capacity(trades.len());

    for (i, trade) in trades.iter().enumerate() {
        position += trade.quantity;
        cumulative_notional += trade.notional_value;

        let previous = realized_pl;
        if position == 0 {
            realized_pl = cumulative_notional;
        }
        let gain = if i == 0 { 0.0 } else { realized_pl - previous };

        states.push(PositionState {
            timestamp: trade.timestamp,
            position,
            realized_pl,
            gain,
            net_pl: realized_pl + trade.commission + trade.fee,
        });
    }

    states
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::trade::Action;
    use chrono::NaiveDate;

    fn trade(minute: u32, quantity: i64, price: f64) -> TradeRecord {
        TradeRecord {
            timestamp: NaiveDate::from_ymd_opt(2024, 3, 1)
                .unwrap()
                .and_hms_opt(10, minute, 0)
                .unwrap(),
            action: if quantity > 0 { Action::Buy } else { Action::Sell },
            quantity,
            price,
            notional_value: -(quantity as f64) * price,
            commission: 0.0,
            fee: 0.0,
        }
    }

    fn column<T>(states: &[PositionState], f: impl Fn(&PositionState) -> T) -> Vec<T> {
        states.iter().map(f).collect()
    }

    #[test]
    fn empty_input() {
        assert!(compute_positions(&[]).is_empty());
    }

    #[test]
    fn single_round_trip() {
        let states = compute_positions(&[trade(0, 10, 100.0), trade(1, -10, 105.0)]);
        assert_eq!(column(&states, |s| s.position), vec![10, 0]);
        assert_eq!(column(&states, |s| s.realized_pl), vec![0.0, 50.0]);
        assert_eq!(column(&states, |s| s.gain), vec![0.0, 50.0]);
        assert_eq!(column(&states, |s| s.net_pl), vec![0.0, 50.0]);
    }

    #[test]
    fn scaling_in_then_closing() {
        let states = compute_positions(&[
            trade(0, 5, 100.0),
            trade(1, 5, 110.0),
            trade(2, -10, 120.0),
        ]);
        assert_eq!(column(&states, |s| s.position), vec![5, 10, 0]);
        assert_eq!(column(&states, |s| s.realized_pl), vec![0.0, 0.0, 150.0]);
        assert_eq!(column(&states, |s| s.gain), vec![0.0, 0.0, 150.0]);
    }

    #[test]
    fn open_position_is_not_marked_to_market() {
        let mut t = trade(0, 5, 100.0);
        t.commission = -1.25;
        t.fee = -0.5;
        let states = compute_positions(&[t]);
        assert_eq!(states[0].realized_pl, 0.0);
        assert_eq!(states[0].gain, 0.0);
        assert_eq!(states[0].net_pl, -1.75);
    }

    #[test]
    fn realized_carries_forward_across_reopen() {
        let states = compute_positions(&[
            trade(0, 1, 100.0),
            trade(1, -1, 90.0),
            trade(2, -2, 95.0),
            trade(3, 1, 93.0),
        ]);
        assert_eq!(column(&states, |s| s.position), vec![1, 0, -2, -1]);
        assert_eq!(column(&states, |s| s.realized_pl), vec![0.0, -10.0, -10.0, -10.0]);
        assert_eq!(column(&states, |s| s.gain), vec![0.0, -10.0, 0.0, 0.0]);
    }

    #[test]
    fn short_round_trip() {
        let states = compute_positions(&[trade(0, -2, 50.0), trade(1, 2, 40.0)]);
        assert_eq!(column(&states, |s| s.position), vec![-2, 0]);
        assert_eq!(states[1].gain, 20.0);
    }

    #[test]
    fn net_pl_uses_current_row_fees_only() {
        let mut open = trade(0, 1, 100.0);
        open.commission = -2.0;
        let mut close = trade(1, -1, 110.0);
        close.commission = -2.0;
        close.fee = -0.25;
        let states = compute_positions(&[open, close]);
        assert_eq!(states[0].net_pl, -2.0);
        assert_eq!(states[1].net_pl, 10.0 - 2.25);
    }

    #[test]
    fn zero_quantity_while_flat_is_not_a_close() {
        let states = compute_positions(&[
            trade(0, 2, 100.0),
            trade(1, -2, 104.0),
            trade(2, 0, 106.0),
            trade(3, 0, 107.0),
        ]);
        assert_eq!(column(&states, |s| s.position), vec![2, 0, 0, 0]);
        assert_eq!(column(&states, |s| s.realized_pl), vec![0.0, 8.0, 8.0, 8.0]);
        assert_eq!(column(&states, |s| s.gain), vec![0.0, 8.0, 0.0, 0.0]);
    }

    #[test]
    fn recomputation_is_identical() {
        let trades = vec![trade(0, 3, 10.0), trade(1, -1, 11.0), trade(2, -2, 12.5)];
        assert_eq!(compute_positions(&trades), compute_positions(&trades));
    }
}
