//! Round-trip statistics over the computed position states.

use super::pnl::PositionState;

#[derive(Debug, Clone, PartialEq)]
pub struct PnlSummary {
    pub total_trades: usize,
    pub round_trips: usize,
    pub winners: usize,
    pub losers: usize,
    pub win_rate: f64,
    pub realized_pl: f64,
    pub final_net_pl: f64,
    pub largest_win: f64,
    pub largest_loss: f64,
    pub open_position: i64,
}

impl PnlSummary {
    pub fn compute(states: &[PositionState]) -> Self {
        let mut winners = 0usize;
        let mut losers = 0usize;
        let mut largest_win = 0.0_f64;
        let mut largest_loss = 0.0_f64;

        for gain in states.iter().map(|s| s.gain).filter(|g| *g != 0.0) {
            if gain > 0.0 {
                winners += 1;
                largest_win = largest_win.max(gain);
            } else {
                losers += 1;
                largest_loss = largest_loss.max(gain.abs());
            }
        }

        let round_trips = winners + losers;
        let win_rate = if round_trips > 0 {
            winners as f64 / round_trips as f64
        } else {
            0.0
        };

        let last = states.last();
        Self {
            total_trades: states.len(),
            round_trips,
            winners,
            losers,
            win_rate,
            realized_pl: last.map(|s| s.realized_pl).unwrap_or(0.0),
            final_net_pl: last.map(|s| s.net_pl).unwrap_or(0.0),
            largest_win,
            largest_loss,
            open_position: last.map(|s| s.position).unwrap_or(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn state(position: i64, realized_pl: f64, gain: f64) -> PositionState {
        PositionState {
            timestamp: NaiveDate::from_ymd_opt(2024, 1, 2)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap(),
            position,
            realized_pl,
            gain,
            net_pl: realized_pl - 1.0,
        }
    }

    #[test]
    fn empty_states() {
        let s = PnlSummary::compute(&[]);
        assert_eq!(s.total_trades, 0);
        assert_eq!(s.round_trips, 0);
        assert_eq!(s.win_rate, 0.0);
        assert_eq!(s.final_net_pl, 0.0);
    }

    #[test]
    fn counts_wins_and_losses() {
        let states = vec![
            state(1, 0.0, 0.0),
            state(0, 50.0, 50.0),
            state(-1, 50.0, 0.0),
            state(0, 30.0, -20.0),
            state(2, 30.0, 0.0),
        ];
        let s = PnlSummary::compute(&states);
        assert_eq!(s.total_trades, 5);
        assert_eq!(s.round_trips, 2);
        assert_eq!(s.winners, 1);
        assert_eq!(s.losers, 1);
        assert!((s.win_rate - 0.5).abs() < f64::EPSILON);
        assert_eq!(s.largest_win, 50.0);
        assert_eq!(s.largest_loss, 20.0);
        assert_eq!(s.realized_pl, 30.0);
        assert_eq!(s.final_net_pl, 29.0);
        assert_eq!(s.open_position, 2);
    }
}
