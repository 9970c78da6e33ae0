//! Structured errors for date operations
//!
//! Every failure is an "invalid input" of some shape. The code tells callers
//! which shape; the message names the function and the argument at fault.

use crate::MomentError;
use serde::{Deserialize, Serialize};

/// Standard error codes (machine-readable)
pub mod codes {
    pub const INVALID_DATE: &str = "INVALID_DATE";
    pub const INVALID_ARG: &str = "INVALID_ARG";
    pub const INVALID_UNIT: &str = "INVALID_UNIT";
    pub const OUT_OF_RANGE: &str = "OUT_OF_RANGE";
    pub const DATE_PARSE_ERROR: &str = "DATE_PARSE_ERROR";
    pub const DATE_OVERFLOW: &str = "DATE_OVERFLOW";
}

/// Structured error returned by every fallible date operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateError {
    /// Machine-readable error code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Suggestion for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl DateError {
    /// Create a new error
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    /// Builder: add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Builder: prefix the message with the function that rejected the input
    pub fn in_function(mut self, func: &str) -> Self {
        self.message = format!("{}: {}", func, self.message);
        self
    }

    // ========== Common Error Constructors ==========

    pub fn invalid_date(func: &str, details: impl Into<String>) -> Self {
        Self::new(codes::INVALID_DATE, format!("{}: invalid date ({})", func, details.into()))
            .with_suggestion("Pass a Moment, a millisecond timestamp or a string such as 2022-01-18 12:00:00")
    }

    pub fn arg_type(func: &str, arg: &str, expected: &str, got: &str) -> Self {
        Self::new(codes::INVALID_ARG,
            format!("{}: argument '{}' expected {}, got {}", func, arg, expected, got))
    }

    pub fn invalid_unit(func: &str, unit: &str) -> Self {
        Self::new(codes::INVALID_UNIT, format!("{}: unknown time unit '{}'", func, unit))
            .with_suggestion("Use one of: millisecond, second, minute, hour, day, week, month, year")
    }

    pub fn out_of_range(func: &str, arg: &str, value: i64, range: &str) -> Self {
        Self::new(codes::OUT_OF_RANGE,
            format!("{}: argument '{}' = {} is outside {}", func, arg, value, range))
    }

    pub fn date_parse_error(details: impl Into<String>) -> Self {
        Self::new(codes::DATE_PARSE_ERROR, format!("cannot parse date: {}", details.into()))
            .with_suggestion("Use YYYY-MM-DD, YYYY-MM-DDTHH:MM:SS or YYYY-M-D H:MM:SS")
    }

    pub fn date_overflow(millis: i64) -> Self {
        Self::new(codes::DATE_OVERFLOW,
            format!("instant {} ms lies outside the representable range", millis))
            .with_suggestion("Instants must be within ±8.64e15 ms of 1970-01-01T00:00:00Z")
    }
}

impl std::fmt::Display for DateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " (suggestion: {})", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for DateError {}

impl From<MomentError> for DateError {
    fn from(err: MomentError) -> Self {
        match err {
            MomentError::Parse(s) => Self::date_parse_error(s),
            MomentError::OutOfRange(ms) => Self::date_overflow(ms),
        }
    }
}
