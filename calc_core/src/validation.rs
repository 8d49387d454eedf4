//! Input guards shared by the calculators.
//!
//! Each guard returns the value unchanged on success so it can be used inline:
//! `let years = ensure_positive("years", years)?;`

use crate::errors::{CalcError, CalcResult};

/// Reject NaN and infinities.
pub fn ensure_finite(field: &str, value: f64) -> CalcResult<f64> {
    if !value.is_finite() {
        return Err(CalcError::invalid_input(
            field,
            value.to_string(),
            "Value must be a finite number",
        ));
    }
    Ok(value)
}

/// Require a finite value strictly greater than zero.
pub fn ensure_positive(field: &str, value: f64) -> CalcResult<f64> {
    ensure_finite(field, value)?;
    if value <= 0.0 {
        return Err(CalcError::invalid_input(
            field,
            value.to_string(),
            "Value must be positive",
        ));
    }
    Ok(value)
}

/// Require a finite value greater than or equal to zero.
pub fn ensure_non_negative(field: &str, value: f64) -> CalcResult<f64> {
    ensure_finite(field, value)?;
    if value < 0.0 {
        return Err(CalcError::invalid_input(
            field,
            value.to_string(),
            "Value cannot be negative",
        ));
    }
    Ok(value)
}

/// Require a finite, non-zero value (used for denominators).
pub fn ensure_non_zero(field: &str, value: f64) -> CalcResult<f64> {
    ensure_finite(field, value)?;
    if value == 0.0 {
        return Err(CalcError::division_by_zero(field));
    }
    Ok(value)
}

/// Reject a computed value that overflowed or left the reals.
///
/// Unlike the input guards this reports `CalculationFailed`: the inputs were
/// acceptable but the arithmetic was not representable.
pub fn ensure_finite_result(calculation_type: &str, field: &str, value: f64) -> CalcResult<f64> {
    if !value.is_finite() {
        return Err(CalcError::calculation_failed(
            calculation_type,
            format!("{} is not a finite number ({})", field, value),
        ));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finite_result_guard() {
        assert_eq!(ensure_finite_result("finance", "payment", 12.5).unwrap(), 12.5);
        let err = ensure_finite_result("finance", "payment", f64::INFINITY).unwrap_err();
        assert_eq!(err.error_code(), "CALCULATION_FAILED");
        assert!(ensure_finite_result("finance", "payment", f64::NAN).is_err());
    }

    #[test]
    fn test_finite_guard() {
        assert!(ensure_finite("x", 1.5).is_ok());
        assert!(ensure_finite("x", f64::NAN).is_err());
        assert!(ensure_finite("x", f64::INFINITY).is_err());
    }

    #[test]
    fn test_positive_guard() {
        assert_eq!(ensure_positive("years", 2.0).unwrap(), 2.0);
        assert!(ensure_positive("years", 0.0).is_err());
        assert!(ensure_positive("years", -1.0).is_err());
    }

    #[test]
    fn test_non_negative_guard() {
        assert!(ensure_non_negative("rate", 0.0).is_ok());
        assert!(ensure_non_negative("rate", -0.1).is_err());
    }

    #[test]
    fn test_non_zero_guard_reports_division_by_zero() {
        let err = ensure_non_zero("y", 0.0).unwrap_err();
        assert_eq!(err, CalcError::division_by_zero("y"));
    }
}
