//! # Percentage Calculations
//!
//! Ratios, percent-of, increases/decreases, relative variation and the
//! inversion of a percentage change.
//!
//! All inputs must be finite. Negative and fractional percentages are
//! accepted as-is; nothing is clamped.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::percentage::{increase, percentage_of};
//!
//! assert_eq!(increase(100.0, 20.0).unwrap().result, 120.0);
//! assert_eq!(percentage_of(25.0, 200.0).unwrap().result, 12.5);
//! assert!(percentage_of(1.0, 0.0).is_err());
//! ```

use crate::calculations::ScalarResult;
use crate::derivation::{fmt_num, Derivation};
use crate::errors::{CalcError, CalcResult};
use crate::validation::{ensure_finite, ensure_non_zero};

/// What percentage `x` is of `y`: `(x / y) × 100`.
///
/// # Errors
///
/// `DivisionByZero` when `y == 0`.
pub fn percentage_of(x: f64, y: f64) -> CalcResult<ScalarResult> {
    ensure_finite("x", x)?;
    ensure_non_zero("y", y)?;

    let ratio = x / y;
    let result = ratio * 100.0;

    let derivation = Derivation::new(format!("({} / {}) × 100", fmt_num(x), fmt_num(y)))
        .step(format!("{} / {} = {}", fmt_num(x), fmt_num(y), fmt_num(ratio)))
        .step(format!("{} × 100 = {}%", fmt_num(ratio), fmt_num(result)));

    Ok(ScalarResult::new(result, derivation))
}

/// `p` percent of `base`: `p / 100 × base`.
pub fn percentage_of_number(p: f64, base: f64) -> CalcResult<ScalarResult> {
    ensure_finite("percentage", p)?;
    ensure_finite("base", base)?;

    let fraction = p / 100.0;
    let result = fraction * base;

    let derivation = Derivation::new(format!("({} / 100) × {}", fmt_num(p), fmt_num(base)))
        .step(format!("{}% = {} / 100 = {}", fmt_num(p), fmt_num(p), fmt_num(fraction)))
        .step(format!("{} × {} = {}", fmt_num(fraction), fmt_num(base), fmt_num(result)));

    Ok(ScalarResult::new(result, derivation))
}

/// Increase `value` by `p` percent: `value + value × p / 100`.
pub fn increase(value: f64, p: f64) -> CalcResult<ScalarResult> {
    ensure_finite("value", value)?;
    ensure_finite("percentage", p)?;

    let delta = value * p / 100.0;
    let result = value + delta;

    let derivation = Derivation::new(format!("{} + ({} × {} / 100)", fmt_num(value), fmt_num(value), fmt_num(p)))
        .step(format!("{}% of {} = {}", fmt_num(p), fmt_num(value), fmt_num(delta)))
        .step(format!("{} + {} = {}", fmt_num(value), fmt_num(delta), fmt_num(result)));

    Ok(ScalarResult::new(result, derivation))
}

/// Decrease `value` by `p` percent: `value − value × p / 100`.
pub fn decrease(value: f64, p: f64) -> CalcResult<ScalarResult> {
    ensure_finite("value", value)?;
    ensure_finite("percentage", p)?;

    let delta = value * p / 100.0;
    let result = value - delta;

    let derivation = Derivation::new(format!("{} − ({} × {} / 100)", fmt_num(value), fmt_num(value), fmt_num(p)))
        .step(format!("{}% of {} = {}", fmt_num(p), fmt_num(value), fmt_num(delta)))
        .step(format!("{} − {} = {}", fmt_num(value), fmt_num(delta), fmt_num(result)));

    Ok(ScalarResult::new(result, derivation))
}

/// Relative change from `old_value` to `new_value`, in percent.
///
/// # Errors
///
/// `DivisionByZero` when `old_value == 0`.
pub fn variation_percent(old_value: f64, new_value: f64) -> CalcResult<ScalarResult> {
    ensure_non_zero("old_value", old_value)?;
    ensure_finite("new_value", new_value)?;

    let difference = new_value - old_value;
    let result = difference / old_value * 100.0;

    let direction = if result > 0.0 {
        "increase"
    } else if result < 0.0 {
        "decrease"
    } else {
        "no change"
    };

    let derivation = Derivation::new(format!(
        "(({} − {}) / {}) × 100",
        fmt_num(new_value),
        fmt_num(old_value),
        fmt_num(old_value)
    ))
    .step(format!("{} − {} = {}", fmt_num(new_value), fmt_num(old_value), fmt_num(difference)))
    .step(format!(
        "{} / {} × 100 = {}% ({})",
        fmt_num(difference),
        fmt_num(old_value),
        fmt_num(result),
        direction
    ));

    Ok(ScalarResult::new(result, derivation))
}

/// Value before a `p` percent increase produced `final_value`: `final / (1 + p/100)`.
///
/// # Errors
///
/// `DivisionByZero` when `p == -100`.
pub fn original_value_after_increase(final_value: f64, p: f64) -> CalcResult<ScalarResult> {
    ensure_finite("final_value", final_value)?;
    ensure_finite("percentage", p)?;

    let factor = 1.0 + p / 100.0;
    if factor == 0.0 {
        return Err(CalcError::division_by_zero("percentage"));
    }
    let result = final_value / factor;

    let derivation = Derivation::new(format!("{} / (1 + {} / 100)", fmt_num(final_value), fmt_num(p)))
        .step(format!("1 + {} / 100 = {}", fmt_num(p), fmt_num(factor)))
        .step(format!("{} / {} = {}", fmt_num(final_value), fmt_num(factor), fmt_num(result)));

    Ok(ScalarResult::new(result, derivation))
}

/// Value before a `p` percent decrease produced `final_value`: `final / (1 − p/100)`.
///
/// # Errors
///
/// `DivisionByZero` when `p == 100`.
pub fn original_value_after_decrease(final_value: f64, p: f64) -> CalcResult<ScalarResult> {
    ensure_finite("final_value", final_value)?;
    ensure_finite("percentage", p)?;

    let factor = 1.0 - p / 100.0;
    if factor == 0.0 {
        return Err(CalcError::division_by_zero("percentage"));
    }
    let result = final_value / factor;

    let derivation = Derivation::new(format!("{} / (1 − {} / 100)", fmt_num(final_value), fmt_num(p)))
        .step(format!("1 − {} / 100 = {}", fmt_num(p), fmt_num(factor)))
        .step(format!("{} / {} = {}", fmt_num(final_value), fmt_num(factor), fmt_num(result)));

    Ok(ScalarResult::new(result, derivation))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_percentage_of() {
        let r = percentage_of(30.0, 120.0).unwrap();
        assert_relative_eq!(r.result, (30.0 / 120.0) * 100.0);
        assert_eq!(r.formula, "(30 / 120) × 100");
        assert_eq!(r.steps.len(), 2);
    }

    #[test]
    fn test_percentage_of_zero_denominator() {
        let err = percentage_of(5.0, 0.0).unwrap_err();
        assert_eq!(err.error_code(), "DIVISION_BY_ZERO");
    }

    #[test]
    fn test_percentage_of_number() {
        assert_relative_eq!(percentage_of_number(15.0, 200.0).unwrap().result, 30.0);
        assert_relative_eq!(percentage_of_number(-10.0, 50.0).unwrap().result, -5.0);
    }

    #[test]
    fn test_increase_and_decrease_are_exact() {
        assert_eq!(increase(100.0, 20.0).unwrap().result, 120.0);
        assert_eq!(decrease(100.0, 20.0).unwrap().result, 80.0);
    }

    #[test]
    fn test_negative_percentages_are_not_clamped() {
        assert_eq!(increase(100.0, -150.0).unwrap().result, -50.0);
        assert_eq!(decrease(100.0, 250.0).unwrap().result, -150.0);
    }

    #[test]
    fn test_variation_percent() {
        assert_eq!(variation_percent(100.0, 120.0).unwrap().result, 20.0);
        assert_eq!(variation_percent(100.0, 80.0).unwrap().result, -20.0);
        assert!(variation_percent(0.0, 10.0).is_err());
    }

    #[test]
    fn test_variation_steps_mention_direction() {
        let r = variation_percent(100.0, 80.0).unwrap();
        assert!(r.steps.last().unwrap().contains("decrease"));
    }

    #[test]
    fn test_original_value_after_increase() {
        assert_relative_eq!(original_value_after_increase(120.0, 20.0).unwrap().result, 100.0);
        assert!(original_value_after_increase(10.0, -100.0).is_err());
    }

    #[test]
    fn test_original_value_after_decrease() {
        assert_relative_eq!(original_value_after_decrease(80.0, 20.0).unwrap().result, 100.0);
        assert!(original_value_after_decrease(10.0, 100.0).is_err());
    }

    #[test]
    fn test_rejects_non_finite_input() {
        assert!(increase(f64::NAN, 10.0).is_err());
        assert!(percentage_of_number(10.0, f64::INFINITY).is_err());
    }
}
