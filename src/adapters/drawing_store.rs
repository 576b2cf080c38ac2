//! JSON file drawing store implementing DrawingPort.

use std::fs;
use std::path::PathBuf;

use crate::domain::error::PnlChartError;
use crate::ports::drawing_port::{DrawingPort, Drawings};

pub struct JsonDrawingStore {
    path: PathBuf,
}

impl JsonDrawingStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn error(&self, reason: impl ToString) -> PnlChartError {
        PnlChartError::Drawings {
            path: self.path.display().to_string(),
            reason: reason.to_string(),
        }
    }
}

impl DrawingPort for JsonDrawingStore {
    /// A missing file is an empty store.
    fn load(&self) -> Result<Drawings, PnlChartError> {
        if !self.path.exists() {
            return Ok(Drawings::default());
        }
        let content = fs::read_to_string(&self.path).map_err(|e| self.error(e))?;
        if content.trim().is_empty() {
            return Ok(Drawings::default());
        }
        serde_json::from_str(&content).map_err(|e| self.error(e))
    }

    fn save(&self, drawings: &Drawings) -> Result<(), PnlChartError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.error(e))?;
        }
        let json = serde_json::to_string_pretty(drawings).map_err(|e| self.error(e))?;
        fs::write(&self.path, json).map_err(|e| self.error(e))
    }
}
