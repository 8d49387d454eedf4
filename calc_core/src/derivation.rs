//! # Derivations
//!
//! Every calculator returns a `formula` (the symbolic formula with the actual
//! operands substituted) and an ordered list of `steps` narrating the
//! arithmetic the way a textbook would. [`Derivation`] assembles both.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::derivation::{fmt_num, Derivation};
//!
//! let (formula, steps) = Derivation::new(format!("{} × 20 / 100", fmt_num(150.0)))
//!     .step("150 × 20 = 3000")
//!     .step("3000 / 100 = 30")
//!     .into_parts();
//!
//! assert_eq!(formula, "150 × 20 / 100");
//! assert_eq!(steps.len(), 2);
//! ```

/// Default number of decimals shown in formulas and steps.
pub const DISPLAY_DECIMALS: usize = 2;

/// Accumulates a formula and the steps that evaluate it.
#[derive(Debug, Clone, Default)]
pub struct Derivation {
    formula: String,
    steps: Vec<String>,
}

impl Derivation {
    /// Start a derivation for the given formula.
    pub fn new(formula: impl Into<String>) -> Self {
        Derivation {
            formula: formula.into(),
            steps: Vec::new(),
        }
    }

    /// Append a step.
    pub fn step(mut self, text: impl Into<String>) -> Self {
        self.steps.push(text.into());
        self
    }

    /// Append a step through a mutable reference (for loops).
    pub fn push(&mut self, text: impl Into<String>) {
        self.steps.push(text.into());
    }

    pub fn formula(&self) -> &str {
        &self.formula
    }

    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    /// Split into `(formula, steps)`.
    pub fn into_parts(self) -> (String, Vec<String>) {
        (self.formula, self.steps)
    }
}

/// Format a number with at most [`DISPLAY_DECIMALS`] decimals.
///
/// Trailing zeros are trimmed, so `120.0` renders as `120` and `0.50` as `0.5`.
pub fn fmt_num(value: f64) -> String {
    fmt_decimal(value, DISPLAY_DECIMALS)
}

/// Format a number with at most `places` decimals, trimming trailing zeros.
pub fn fmt_decimal(value: f64, places: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let mut text = format!("{:.*}", places, value);
    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed);
    }

    // "-0" after rounding
    if text == "-0" {
        return "0".to_string();
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_num_trims_zeros() {
        assert_eq!(fmt_num(120.0), "120");
        assert_eq!(fmt_num(0.5), "0.5");
        assert_eq!(fmt_num(8884.8788), "8884.88");
        assert_eq!(fmt_num(-20.0), "-20");
    }

    #[test]
    fn test_fmt_negative_zero() {
        assert_eq!(fmt_num(-0.001), "0");
        assert_eq!(fmt_num(-0.0), "0");
    }

    #[test]
    fn test_fmt_decimal_precision() {
        assert_eq!(fmt_decimal(1.0 / 3.0, 6), "0.333333");
        assert_eq!(fmt_decimal(2.0, 6), "2");
    }

    #[test]
    fn test_builder_collects_steps() {
        let mut derivation = Derivation::new("a + b").step("1 + 2 = 3");
        derivation.push("Result: 3");
        assert_eq!(derivation.formula(), "a + b");
        assert_eq!(derivation.steps(), ["1 + 2 = 3", "Result: 3"]);
    }
}
