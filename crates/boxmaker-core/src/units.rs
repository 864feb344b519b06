//! Unit conversion utilities
//!
//! All box geometry is computed in millimetres (the working unit). The user may
//! enter and read dimensions in either Metric (mm) or Imperial (inch); conversion
//! happens only at the input boundary and when formatting annotation text.
//! Supports decimal and fractional inch parsing and formatting.

use crate::error::{Result, UnitError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Millimetres in one inch
pub const MM_PER_INCH: f64 = 25.4;

/// Measurement system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementSystem {
    /// Metric system (mm)
    #[default]
    Metric,
    /// Imperial system (inches)
    Imperial,
}

impl MeasurementSystem {
    /// Convert a value expressed in this system into working millimetres
    pub fn to_mm(self, value: f64) -> f64 {
        match self {
            Self::Metric => value,
            Self::Imperial => value * MM_PER_INCH,
        }
    }

    /// Convert working millimetres into this system
    pub fn from_mm(self, value_mm: f64) -> f64 {
        match self {
            Self::Metric => value_mm,
            Self::Imperial => value_mm / MM_PER_INCH,
        }
    }
}

impl fmt::Display for MeasurementSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Metric => write!(f, "Metric"),
            Self::Imperial => write!(f, "Imperial"),
        }
    }
}

impl FromStr for MeasurementSystem {
    type Err = UnitError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "metric" | "mm" => Ok(Self::Metric),
            "imperial" | "inch" | "in" => Ok(Self::Imperial),
            _ => Err(UnitError::UnknownSystem {
                name: s.to_string(),
            }),
        }
    }
}

/// Format length value for display
///
/// * `value_mm` - Value in millimetres
/// * `system` - Target measurement system
pub fn format_length(value_mm: f64, system: MeasurementSystem) -> String {
    format!("{:.3}", system.from_mm(value_mm))
}

/// Parse length string to millimetres
///
/// * `input` - String to parse
/// * `system` - Assumed measurement system
pub fn parse_length(input: &str, system: MeasurementSystem) -> Result<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UnitError::invalid_length(input, "empty value"));
    }

    match system {
        MeasurementSystem::Metric => trimmed
            .parse::<f64>()
            .map_err(|e| UnitError::invalid_length(input, e.to_string())),
        MeasurementSystem::Imperial => {
            if !trimmed.contains('/') {
                let inches = trimmed
                    .parse::<f64>()
                    .map_err(|e| UnitError::invalid_length(input, e.to_string()))?;
                return Ok(inches * MM_PER_INCH);
            }

            // Mixed numbers such as "1 1/2" or "-1/4"
            let mut total_inches = 0.0;
            for part in trimmed.split_whitespace() {
                if let Some((num, den)) = part.split_once('/') {
                    if den.contains('/') {
                        return Err(UnitError::invalid_length(input, "invalid fraction format"));
                    }
                    let num = num
                        .parse::<f64>()
                        .map_err(|_| UnitError::invalid_length(input, "invalid numerator"))?;
                    let den = den
                        .parse::<f64>()
                        .map_err(|_| UnitError::invalid_length(input, "invalid denominator"))?;
                    if den == 0.0 {
                        return Err(UnitError::DivisionByZero {
                            input: input.to_string(),
                        });
                    }
                    total_inches += num / den;
                } else {
                    total_inches += part
                        .parse::<f64>()
                        .map_err(|_| UnitError::invalid_length(input, "invalid number part"))?;
                }
            }
            Ok(total_inches * MM_PER_INCH)
        }
    }
}

/// Get the unit label for the given system ("mm" or "in")
pub fn get_unit_label(system: MeasurementSystem) -> &'static str {
    match system {
        MeasurementSystem::Metric => "mm",
        MeasurementSystem::Imperial => "in",
    }
}
