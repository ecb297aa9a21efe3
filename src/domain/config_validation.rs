//! Configuration validation.
//!
//! Validates config values before the course is loaded. Every key is
//! optional; only values that are present are checked.

use std::net::SocketAddr;

use crate::domain::error::AcademyError;
use crate::domain::risk::{CalculatorField, MAX_RISK_PERCENT};
use crate::ports::config_port::ConfigPort;

pub fn validate_course_config(config: &dyn ConfigPort) -> Result<(), AcademyError> {
    validate_calculator_amounts(config)?;
    validate_risk_percent(config)?;
    validate_strict_flag(config)?;
    validate_seed(config)?;
    Ok(())
}

pub fn validate_web_config(config: &dyn ConfigPort) -> Result<(), AcademyError> {
    validate_listen(config)?;
    validate_static_dir(config)?;
    validate_session_minutes(config)?;
    Ok(())
}

fn invalid(section: &str, key: &str, reason: impl Into<String>) -> AcademyError {
    AcademyError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.into(),
    }
}

fn parse_number(config: &dyn ConfigPort, key: &str) -> Result<Option<f64>, AcademyError> {
    match config.get_string("calculator", key) {
        None => Ok(None),
        Some(raw) => match raw.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(Some(v)),
            _ => Err(invalid("calculator", key, format!("'{raw}' is not a number"))),
        },
    }
}

fn validate_calculator_amounts(config: &dyn ConfigPort) -> Result<(), AcademyError> {
    for field in [
        CalculatorField::AccountSize,
        CalculatorField::EntryPrice,
        CalculatorField::StopLoss,
    ] {
        if let Some(value) = parse_number(config, field.key())? {
            if value <= 0.0 {
                return Err(invalid(
                    "calculator",
                    field.key(),
                    format!("{} must be positive", field.key()),
                ));
            }
        }
    }
    Ok(())
}

fn validate_risk_percent(config: &dyn ConfigPort) -> Result<(), AcademyError> {
    let key = CalculatorField::RiskPercent.key();
    if let Some(value) = parse_number(config, key)? {
        if value <= 0.0 || value > MAX_RISK_PERCENT {
            return Err(invalid(
                "calculator",
                key,
                format!("risk_percent must be greater than 0 and at most {MAX_RISK_PERCENT}"),
            ));
        }
    }
    Ok(())
}

fn validate_strict_flag(config: &dyn ConfigPort) -> Result<(), AcademyError> {
    match config.get_string("calculator", "strict") {
        None => Ok(()),
        Some(raw) => match raw.trim().to_lowercase().as_str() {
            "true" | "yes" | "1" | "false" | "no" | "0" => Ok(()),
            _ => Err(invalid("calculator", "strict", "expected true or false")),
        },
    }
}

fn validate_seed(config: &dyn ConfigPort) -> Result<(), AcademyError> {
    match config.get_string("timeframes", "seed") {
        None => Ok(()),
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map(|_| ())
            .map_err(|_| invalid("timeframes", "seed", "seed must be a non-negative integer")),
    }
}

fn validate_listen(config: &dyn ConfigPort) -> Result<(), AcademyError> {
    match config.get_string("web", "listen") {
        None => Ok(()),
        Some(raw) => raw
            .trim()
            .parse::<SocketAddr>()
            .map(|_| ())
            .map_err(|_| invalid("web", "listen", format!("'{raw}' is not a socket address"))),
    }
}

fn validate_static_dir(config: &dyn ConfigPort) -> Result<(), AcademyError> {
    match config.get_string("web", "static_dir") {
        Some(dir) if dir.trim().is_empty() => {
            Err(invalid("web", "static_dir", "static_dir must not be empty"))
        }
        _ => Ok(()),
    }
}

fn validate_session_minutes(config: &dyn ConfigPort) -> Result<(), AcademyError> {
    match config.get_string("web", "session_minutes") {
        None => Ok(()),
        Some(raw) => match raw.trim().parse::<i64>() {
            Ok(minutes) if minutes > 0 => Ok(()),
            _ => Err(invalid(
                "web",
                "session_minutes",
                "session_minutes must be a positive whole number",
            )),
        },
    }
}
