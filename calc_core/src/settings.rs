//! # Calculation Settings
//!
//! Default numeric parameters used when a request leaves a tuning field
//! unset. Settings live in every worksheet and can also be loaded from a
//! standalone JSON file (see [`crate::file_io::load_settings`]).
//!
//! ```json
//! {
//!   "derivative_step": 0.001,
//!   "integration_intervals": 1000,
//!   "words_per_minute": 200,
//!   "amortization_rows": 12
//! }
//! ```
//!
//! Missing fields fall back to their defaults.

use serde::{Deserialize, Serialize};

use crate::calculations::calculus::{DEFAULT_INTERVALS, DEFAULT_STEP, MAX_INTERVALS};
use crate::calculations::finance::DEFAULT_SCHEDULE_ROWS;
use crate::calculations::text_stats::DEFAULT_WORDS_PER_MINUTE;
use crate::errors::{CalcError, CalcResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalcSettings {
    /// Finite-difference step `h` for numerical derivatives
    pub derivative_step: f64,

    /// Subdivision count `n` for numerical integrals
    pub integration_intervals: usize,

    /// Reading speed used for reading-time estimates
    pub words_per_minute: u32,

    /// Number of amortization schedule rows to emit
    pub amortization_rows: usize,
}

impl Default for CalcSettings {
    fn default() -> Self {
        CalcSettings {
            derivative_step: DEFAULT_STEP,
            integration_intervals: DEFAULT_INTERVALS,
            words_per_minute: DEFAULT_WORDS_PER_MINUTE,
            amortization_rows: DEFAULT_SCHEDULE_ROWS,
        }
    }
}

impl CalcSettings {
    /// Validate settings loaded from disk.
    pub fn validate(&self) -> CalcResult<()> {
        if !self.derivative_step.is_finite() || self.derivative_step <= 0.0 {
            return Err(CalcError::invalid_input(
                "derivative_step",
                self.derivative_step.to_string(),
                "Step must be a positive number",
            ));
        }
        if self.integration_intervals == 0 {
            return Err(CalcError::invalid_input(
                "integration_intervals",
                "0",
                "At least one subinterval is required",
            ));
        }
        if self.integration_intervals > MAX_INTERVALS {
            return Err(CalcError::out_of_range(
                "integration_intervals",
                self.integration_intervals,
                1,
                MAX_INTERVALS,
            ));
        }
        if self.words_per_minute == 0 {
            return Err(CalcError::invalid_input(
                "words_per_minute",
                "0",
                "Reading speed must be positive",
            ));
        }
        if self.amortization_rows == 0 {
            return Err(CalcError::invalid_input(
                "amortization_rows",
                "0",
                "At least one schedule row is required",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = CalcSettings::default();
        assert_eq!(settings.derivative_step, 0.001);
        assert_eq!(settings.integration_intervals, 1000);
        assert_eq!(settings.words_per_minute, 200);
        assert_eq!(settings.amortization_rows, 12);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: CalcSettings = serde_json::from_str(r#"{ "words_per_minute": 250 }"#).unwrap();
        assert_eq!(settings.words_per_minute, 250);
        assert_eq!(settings.integration_intervals, 1000);
    }

    #[test]
    fn test_invalid_settings() {
        let mut settings = CalcSettings::default();
        settings.derivative_step = 0.0;
        assert!(settings.validate().is_err());

        let mut settings = CalcSettings::default();
        settings.amortization_rows = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_interval_limit() {
        let settings = CalcSettings {
            integration_intervals: MAX_INTERVALS,
            ..CalcSettings::default()
        };
        assert!(settings.validate().is_ok());

        let settings = CalcSettings {
            integration_intervals: MAX_INTERVALS + 1,
            ..CalcSettings::default()
        };
        assert_eq!(settings.validate().unwrap_err().error_code(), "OUT_OF_RANGE");
    }
}
