//! # Error Types
//!
//! Structured error types for calc_core. Every calculator validates its
//! inputs before computing and reports failures through [`CalcError`], so a
//! caller can show the message verbatim or branch on [`CalcError::error_code`].
//!
//! ## Example
//!
//! ```rust
//! use calc_core::errors::{CalcError, CalcResult};
//!
//! fn validate_years(years: f64) -> CalcResult<()> {
//!     if years <= 0.0 {
//!         return Err(CalcError::InvalidInput {
//!             field: "years".to_string(),
//!             value: years.to_string(),
//!             reason: "Period must be positive".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for calc_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (not finite, not positive, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A denominator or base argument is zero
    #[error("Division by zero: '{field}' cannot be zero")]
    DivisionByZero { field: String },

    /// An integer input lies outside the supported range
    #[error("Out of range for '{field}': {value} (expected {min}..={max})")]
    OutOfRange {
        field: String,
        value: String,
        min: String,
        max: String,
    },

    /// Calculation could not produce a finite answer
    #[error("Calculation failed: {calculation_type} - {reason}")]
    CalculationFailed {
        calculation_type: String,
        reason: String,
    },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// File is locked by another user/process
    #[error("File locked: '{path}' is locked by {locked_by} since {locked_at}")]
    FileLocked {
        path: String,
        locked_by: String,
        locked_at: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a DivisionByZero error
    pub fn division_by_zero(field: impl Into<String>) -> Self {
        CalcError::DivisionByZero { field: field.into() }
    }

    /// Create an OutOfRange error
    pub fn out_of_range(
        field: impl Into<String>,
        value: impl ToString,
        min: impl ToString,
        max: impl ToString,
    ) -> Self {
        CalcError::OutOfRange {
            field: field.into(),
            value: value.to_string(),
            min: min.to_string(),
            max: max.to_string(),
        }
    }

    /// Create a CalculationFailed error
    pub fn calculation_failed(calculation_type: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::CalculationFailed {
            calculation_type: calculation_type.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileLocked error
    pub fn file_locked(path: impl Into<String>, locked_by: impl Into<String>, locked_at: impl Into<String>) -> Self {
        CalcError::FileLocked {
            path: path.into(),
            locked_by: locked_by.into(),
            locked_at: locked_at.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        CalcError::SerializationError { reason: reason.into() }
    }

    /// Check if this is a recoverable error (e.g., can retry)
    pub fn is_recoverable(&self) -> bool {
        matches!(self, CalcError::FileLocked { .. })
    }

    /// Whether the error was caused by the caller's input rather than the environment
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            CalcError::InvalidInput { .. } | CalcError::DivisionByZero { .. } | CalcError::OutOfRange { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::DivisionByZero { .. } => "DIVISION_BY_ZERO",
            CalcError::OutOfRange { .. } => "OUT_OF_RANGE",
            CalcError::CalculationFailed { .. } => "CALCULATION_FAILED",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::FileLocked { .. } => "FILE_LOCKED",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("years", "-5", "Period must be positive");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::division_by_zero("y").error_code(), "DIVISION_BY_ZERO");
        assert_eq!(CalcError::out_of_range("n", 0, 1, 3999).error_code(), "OUT_OF_RANGE");
        assert_eq!(CalcError::serialization("bad").error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_division_by_zero_message() {
        let error = CalcError::division_by_zero("y");
        assert_eq!(error.to_string(), "Division by zero: 'y' cannot be zero");
    }

    #[test]
    fn test_input_errors_are_not_recoverable() {
        let error = CalcError::division_by_zero("old_value");
        assert!(error.is_input_error());
        assert!(!error.is_recoverable());

        let locked = CalcError::file_locked("a.cws", "someone", "now");
        assert!(locked.is_recoverable());
        assert!(!locked.is_input_error());
    }
}
