//! Data access port trait for the trade log and the price history.

use crate::domain::error::PnlChartError;
use crate::domain::ohlcv::PriceBar;
use crate::domain::trade::RawTrade;

pub trait DataPort {
    /// Trade rows exactly as stored, in file order.
    fn fetch_trades(&self) -> Result<Vec<RawTrade>, PnlChartError>;

    /// Price bars sorted ascending by time.
    fn fetch_bars(&self) -> Result<Vec<PriceBar>, PnlChartError>;

    /// Human-readable origin of the trade rows, used in messages.
    fn trade_source(&self) -> String;
}
