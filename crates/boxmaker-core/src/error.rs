//! Error handling for BoxMaker core
//!
//! Errors raised while converting user-facing lengths into the working unit.
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Unit conversion and length parsing errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UnitError {
    /// Unknown measurement system name
    #[error("Unknown measurement system: {name}")]
    UnknownSystem {
        /// The name that could not be matched.
        name: String,
    },

    /// A length string could not be parsed
    #[error("Invalid length '{input}': {reason}")]
    InvalidLength {
        /// The raw input.
        input: String,
        /// Why parsing failed.
        reason: String,
    },

    /// A fraction had a zero denominator
    #[error("Division by zero in '{input}'")]
    DivisionByZero {
        /// The raw input.
        input: String,
    },
}

impl UnitError {
    /// Create an invalid length error
    pub fn invalid_length(input: impl Into<String>, reason: impl Into<String>) -> Self {
        UnitError::InvalidLength {
            input: input.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for unit operations
pub type Result<T> = std::result::Result<T, UnitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_error_display() {
        let err = UnitError::UnknownSystem {
            name: "furlong".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown measurement system: furlong");

        let err = UnitError::invalid_length("abc", "not a number");
        assert_eq!(err.to_string(), "Invalid length 'abc': not a number");

        let err = UnitError::DivisionByZero {
            input: "1/0".to_string(),
        };
        assert_eq!(err.to_string(), "Division by zero in '1/0'");
    }
}
