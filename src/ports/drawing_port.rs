//! Drawing persistence port.
//!
//! The stored state is a JSON object keyed by symbol. Values are opaque and
//! only ever passed through to the chart.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::error::PnlChartError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Drawings(BTreeMap<String, Value>);

impl Drawings {
    pub fn get(&self, symbol: &str) -> Option<&Value> {
        self.0.get(symbol)
    }

    /// Replace the state stored under `symbol`. `None` removes it.
    pub fn set(&mut self, symbol: &str, value: Option<Value>) {
        match value {
            Some(v) => {
                self.0.insert(symbol.to_string(), v);
            }
            None => {
                self.0.remove(symbol);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

pub trait DrawingPort {
    fn load(&self) -> Result<Drawings, PnlChartError>;
    fn save(&self, drawings: &Drawings) -> Result<(), PnlChartError>;
}
