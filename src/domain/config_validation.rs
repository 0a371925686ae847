//! Configuration validation.
//!
//! Every field is checked before any data is read, so a bad config never
//! produces partial artifacts.

use crate::domain::error::AnalyzerError;
use crate::domain::strategy::{
    DEFAULT_LONG_WINDOW, DEFAULT_POSITION_SIZE_PCT, DEFAULT_SHORT_WINDOW, DEFAULT_STOP_LOSS_PCT,
};
use crate::domain::universe::parse_codes;
use crate::ports::config_port::ConfigPort;
use chrono::NaiveDate;

pub fn validate_analysis_config(config: &dyn ConfigPort) -> Result<(), AnalyzerError> {
    validate_data_path(config)?;
    validate_codes(config)?;
    validate_dates(config)?;
    Ok(())
}

pub fn validate_strategy_config(config: &dyn ConfigPort) -> Result<(), AnalyzerError> {
    validate_windows(config)?;
    validate_stop_loss(config)?;
    validate_position_size(config)?;
    Ok(())
}

fn validate_data_path(config: &dyn ConfigPort) -> Result<(), AnalyzerError> {
    config
        .get_string("data", "path")
        .ok_or_else(|| AnalyzerError::ConfigMissing {
            section: "data".into(),
            key: "path".into(),
        })?;
    Ok(())
}

fn validate_codes(config: &dyn ConfigPort) -> Result<(), AnalyzerError> {
    let codes = config
        .get_string("data", "codes")
        .ok_or_else(|| AnalyzerError::ConfigMissing {
            section: "data".into(),
            key: "codes".into(),
        })?;

    parse_codes(&codes).map_err(|e| AnalyzerError::ConfigInvalid {
        section: "data".into(),
        key: "codes".into(),
        reason: e.to_string(),
    })?;
    Ok(())
}

fn validate_dates(config: &dyn ConfigPort) -> Result<(), AnalyzerError> {
    let start = parse_date(config, "start_date")?;
    let end = parse_date(config, "end_date")?;

    if start >= end {
        return Err(AnalyzerError::ConfigInvalid {
            section: "data".into(),
            key: "end_date".into(),
            reason: "end_date must be after start_date".into(),
        });
    }
    Ok(())
}

fn parse_date(config: &dyn ConfigPort, key: &str) -> Result<NaiveDate, AnalyzerError> {
    let value = config
        .get_string("data", key)
        .ok_or_else(|| AnalyzerError::ConfigMissing {
            section: "data".into(),
            key: key.into(),
        })?;

    NaiveDate::parse_from_str(&value, "%Y-%m-%d").map_err(|_| AnalyzerError::ConfigInvalid {
        section: "data".into(),
        key: key.into(),
        reason: "invalid date format (expected YYYY-MM-DD)".into(),
    })
}

fn validate_windows(config: &dyn ConfigPort) -> Result<(), AnalyzerError> {
    let short = config.get_int("strategy", "short_window", DEFAULT_SHORT_WINDOW as i64);
    let long = config.get_int("strategy", "long_window", DEFAULT_LONG_WINDOW as i64);

    if short <= 0 {
        return Err(AnalyzerError::ConfigInvalid {
            section: "strategy".into(),
            key: "short_window".into(),
            reason: "short_window must be positive".into(),
        });
    }
    if long <= short {
        return Err(AnalyzerError::ConfigInvalid {
            section: "strategy".into(),
            key: "long_window".into(),
            reason: "long_window must be greater than short_window".into(),
        });
    }
    Ok(())
}

fn validate_stop_loss(config: &dyn ConfigPort) -> Result<(), AnalyzerError> {
    let value = config.get_double("strategy", "stop_loss_pct", DEFAULT_STOP_LOSS_PCT);
    if value <= 0.0 || value >= 100.0 {
        return Err(AnalyzerError::ConfigInvalid {
            section: "strategy".into(),
            key: "stop_loss_pct".into(),
            reason: "stop_loss_pct must be between 0 and 100".into(),
        });
    }
    Ok(())
}

fn validate_position_size(config: &dyn ConfigPort) -> Result<(), AnalyzerError> {
    let value = config.get_double("strategy", "position_size_pct", DEFAULT_POSITION_SIZE_PCT);
    if value <= 0.0 || value > 100.0 {
        return Err(AnalyzerError::ConfigInvalid {
            section: "strategy".into(),
            key: "position_size_pct".into(),
            reason: "position_size_pct must be between 0 and 100".into(),
        });
    }
    Ok(())
}
