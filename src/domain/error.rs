//! Domain error types.

/// Top-level error type for pnlchart.
#[derive(Debug, thiserror::Error)]
pub enum PnlChartError {
    #[error("malformed input at row {row}, field {field}: {reason}")]
    MalformedInput {
        row: usize,
        field: String,
        reason: String,
    },

    #[error("trade source error: {reason}")]
    TradeSource { reason: String },

    #[error("price source error: {reason}")]
    PriceSource { reason: String },

    #[error("no trades found in {path}")]
    NoTrades { path: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("drawing store {path}: {reason}")]
    Drawings { path: String, reason: String },

    #[error("render error: {reason}")]
    Render { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl PnlChartError {
    pub fn malformed(row: usize, field: &str, reason: impl Into<String>) -> Self {
        PnlChartError::MalformedInput {
            row,
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<&PnlChartError> for std::process::ExitCode {
    fn from(err: &PnlChartError) -> Self {
        let code: u8 = match err {
            PnlChartError::Io(_) | PnlChartError::Render { .. } => 1,
            PnlChartError::ConfigParse { .. }
            | PnlChartError::ConfigMissing { .. }
            | PnlChartError::ConfigInvalid { .. } => 2,
            PnlChartError::TradeSource { .. } | PnlChartError::PriceSource { .. } => 3,
            PnlChartError::MalformedInput { .. } => 4,
            PnlChartError::NoTrades { .. } => 5,
            PnlChartError::Drawings { .. } => 6,
        };
        std::process::ExitCode::from(code)
    }
}
