//! Configuration validation.
//!
//! Validates all config fields before any file is loaded.

use crate::domain::error::PnlChartError;
use crate::ports::config_port::ConfigPort;

pub const MAX_TZ_SHIFT_HOURS: i64 = 24;

pub fn validate_chart_config(config: &dyn ConfigPort) -> Result<(), PnlChartError> {
    validate_required_path(config, "trades", "path")?;
    validate_required_path(config, "prices", "path")?;
    validate_symbol(config)?;
    validate_tz_shift(config)?;
    validate_pane_height(config)?;
    validate_line_width(config)?;
    Ok(())
}

fn validate_required_path(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<(), PnlChartError> {
    match config.get_string(section, key) {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(PnlChartError::ConfigMissing {
            section: section.to_string(),
            key: key.to_string(),
        }),
    }
}

fn validate_symbol(config: &dyn ConfigPort) -> Result<(), PnlChartError> {
    match config.get_string("chart", "symbol") {
        None => Err(PnlChartError::ConfigMissing {
            section: "chart".to_string(),
            key: "symbol".to_string(),
        }),
        Some(s) if s.trim().is_empty() => Err(PnlChartError::ConfigInvalid {
            section: "chart".to_string(),
            key: "symbol".to_string(),
            reason: "symbol must not be blank".to_string(),
        }),
        Some(_) => Ok(()),
    }
}

fn validate_tz_shift(config: &dyn ConfigPort) -> Result<(), PnlChartError> {
    let Some(raw) = config.get_string("trades", "tz_shift_hours") else {
        return Ok(());
    };
    let invalid = |reason: &str| PnlChartError::ConfigInvalid {
        section: "trades".to_string(),
        key: "tz_shift_hours".to_string(),
        reason: reason.to_string(),
    };
    let value: i64 = raw
        .trim()
        .parse()
        .map_err(|_| invalid("tz_shift_hours must be a whole number of hours"))?;
    if value.abs() > MAX_TZ_SHIFT_HOURS {
        return Err(invalid("tz_shift_hours must be between -24 and 24"));
    }
    Ok(())
}

fn validate_pane_height(config: &dyn ConfigPort) -> Result<(), PnlChartError> {
    if config.get_string("chart", "pane_height").is_none() {
        return Ok(());
    }
    let value = config.get_double("chart", "pane_height", f64::NAN);
    if !(value > 0.0 && value < 1.0) {
        return Err(PnlChartError::ConfigInvalid {
            section: "chart".to_string(),
            key: "pane_height".to_string(),
            reason: "pane_height must be between 0 and 1 (exclusive)".to_string(),
        });
    }
    Ok(())
}

fn validate_line_width(config: &dyn ConfigPort) -> Result<(), PnlChartError> {
    if config.get_string("chart", "line_width_per_unit").is_none() {
        return Ok(());
    }
    let value = config.get_double("chart", "line_width_per_unit", f64::NAN);
    if !(value > 0.0) {
        return Err(PnlChartError::ConfigInvalid {
            section: "chart".to_string(),
            key: "line_width_per_unit".to_string(),
            reason: "line_width_per_unit must be positive".to_string(),
        });
    }
    Ok(())
}
