//! # Polynomials
//!
//! Analytical derivative and integral of a polynomial by the power rule,
//! kept as a reference to check the numerical methods in
//! [`calculus`](super::calculus) against.
//!
//! Coefficients are stored in ascending power order: `[c0, c1, c2]` is
//! `c0 + c1·x + c2·x²`. In JSON a polynomial is just that array.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::polynomial::Polynomial;
//!
//! let p = Polynomial::new(vec![-1.0, 2.0, 3.0]).unwrap(); // 3x² + 2x − 1
//! assert_eq!(p.to_string(), "3x^2 + 2x - 1");
//! assert_eq!(p.eval(2.0), 15.0);
//! assert_eq!(p.derivative().coefficients(), &[2.0, 6.0]);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::derivation::{fmt_decimal, Derivation};
use crate::errors::{CalcError, CalcResult};
use crate::validation::{ensure_finite, ensure_finite_result};

const COEFFICIENT_DECIMALS: usize = 6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Polynomial(Vec<f64>);

impl Polynomial {
    /// Build a polynomial, rejecting empty or non-finite coefficient lists.
    pub fn new(coefficients: Vec<f64>) -> CalcResult<Self> {
        let polynomial = Polynomial(coefficients);
        polynomial.validate()?;
        Ok(polynomial)
    }

    /// Validate a polynomial that came from deserialization.
    pub fn validate(&self) -> CalcResult<()> {
        self.check_coefficients(ensure_finite)
    }

    /// Power-rule coefficients can overflow even when the input was finite.
    fn ensure_representable(&self, calculation_type: &str) -> CalcResult<()> {
        self.check_coefficients(|field, c| ensure_finite_result(calculation_type, field, c))
    }

    fn check_coefficients<G>(&self, guard: G) -> CalcResult<()>
    where
        G: Fn(&str, f64) -> CalcResult<f64>,
    {
        if self.0.is_empty() {
            return Err(CalcError::invalid_input(
                "coefficients",
                "[]",
                "At least one coefficient is required",
            ));
        }
        for (power, c) in self.0.iter().enumerate() {
            guard(&format!("coefficients[{}]", power), *c)?;
        }
        Ok(())
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.0
    }

    /// Highest power with a non-zero coefficient (0 for constants).
    pub fn degree(&self) -> usize {
        self.0.iter().rposition(|c| *c != 0.0).unwrap_or(0)
    }

    /// Evaluate with Horner's scheme.
    pub fn eval(&self, x: f64) -> f64 {
        self.0.iter().rev().fold(0.0, |acc, c| acc * x + c)
    }

    /// Term-wise power rule: `c·x^k → k·c·x^(k−1)`.
    pub fn derivative(&self) -> Polynomial {
        let coefficients: Vec<f64> = self
            .0
            .iter()
            .enumerate()
            .skip(1)
            .map(|(power, c)| c * power as f64)
            .collect();

        if coefficients.is_empty() {
            Polynomial(vec![0.0])
        } else {
            Polynomial(coefficients)
        }
    }

    /// Term-wise power rule: `c·x^k → c·x^(k+1) / (k+1)`, constant of integration 0.
    pub fn antiderivative(&self) -> Polynomial {
        let mut coefficients = Vec::with_capacity(self.0.len() + 1);
        coefficients.push(0.0);
        coefficients.extend(
            self.0
                .iter()
                .enumerate()
                .map(|(power, c)| c / (power as f64 + 1.0)),
        );
        Polynomial(coefficients)
    }
}

/// Render a single `c·x^power` term without its sign.
fn term(magnitude: f64, power: usize) -> String {
    let coefficient = fmt_decimal(magnitude, COEFFICIENT_DECIMALS);
    match power {
        0 => coefficient,
        _ => {
            let variable = if power == 1 {
                "x".to_string()
            } else {
                format!("x^{}", power)
            };
            if magnitude == 1.0 {
                variable
            } else {
                format!("{}{}", coefficient, variable)
            }
        }
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut wrote_any = false;
        for (power, c) in self.0.iter().enumerate().rev() {
            if *c == 0.0 {
                continue;
            }
            let body = term(c.abs(), power);
            match (wrote_any, *c < 0.0) {
                (false, false) => write!(f, "{}", body)?,
                (false, true) => write!(f, "-{}", body)?,
                (true, false) => write!(f, " + {}", body)?,
                (true, true) => write!(f, " - {}", body)?,
            }
            wrote_any = true;
        }
        if !wrote_any {
            write!(f, "0")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolynomialResult {
    /// Coefficients of the derivative, ascending powers
    pub coefficients: Vec<f64>,
    pub expression: String,
    pub formula: String,
    pub steps: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolynomialIntegralResult {
    /// Coefficients of the antiderivative, ascending powers
    pub coefficients: Vec<f64>,
    pub expression: String,
    pub a: f64,
    pub b: f64,
    /// Exact definite integral over `[a, b]`
    pub value: f64,
    pub formula: String,
    pub steps: Vec<String>,
}

/// Analytical derivative of the polynomial with the given coefficients.
pub fn polynomial_derivative(coefficients: &[f64]) -> CalcResult<PolynomialResult> {
    let polynomial = Polynomial::new(coefficients.to_vec())?;
    let derivative = polynomial.derivative();
    derivative.ensure_representable("polynomial derivative")?;

    let mut derivation = Derivation::new(format!("d/dx [{}]", polynomial));
    for (power, c) in polynomial.coefficients().iter().enumerate().rev() {
        if *c == 0.0 {
            continue;
        }
        let original = Polynomial(single_term(*c, power));
        let derived = original.derivative();
        derivation.push(format!("d/dx ({}) = {}", original, derived));
    }
    derivation.push(format!("f'(x) = {}", derivative));
    let (formula, steps) = derivation.into_parts();

    Ok(PolynomialResult {
        expression: derivative.to_string(),
        coefficients: derivative.0,
        formula,
        steps,
    })
}

/// Antiderivative of the polynomial and its exact integral over `[a, b]`.
pub fn polynomial_integral(coefficients: &[f64], a: f64, b: f64) -> CalcResult<PolynomialIntegralResult> {
    let polynomial = Polynomial::new(coefficients.to_vec())?;
    ensure_finite("a", a)?;
    ensure_finite("b", b)?;

    let antiderivative = polynomial.antiderivative();
    let upper = ensure_finite_result("polynomial integral", "F(b)", antiderivative.eval(b))?;
    let lower = ensure_finite_result("polynomial integral", "F(a)", antiderivative.eval(a))?;
    let value = ensure_finite_result("polynomial integral", "F(b) − F(a)", upper - lower)?;

    let (formula, steps) = Derivation::new(format!(
        "∫[{}, {}] ({}) dx",
        fmt_decimal(a, COEFFICIENT_DECIMALS),
        fmt_decimal(b, COEFFICIENT_DECIMALS),
        polynomial
    ))
    .step(format!("F(x) = {}", antiderivative))
    .step(format!(
        "F({}) = {}",
        fmt_decimal(b, COEFFICIENT_DECIMALS),
        fmt_decimal(upper, COEFFICIENT_DECIMALS)
    ))
    .step(format!(
        "F({}) = {}",
        fmt_decimal(a, COEFFICIENT_DECIMALS),
        fmt_decimal(lower, COEFFICIENT_DECIMALS)
    ))
    .step(format!(
        "F(b) − F(a) = {}",
        fmt_decimal(value, COEFFICIENT_DECIMALS)
    ))
    .into_parts();

    Ok(PolynomialIntegralResult {
        expression: antiderivative.to_string(),
        coefficients: antiderivative.0,
        a,
        b,
        value,
        formula,
        steps,
    })
}

fn single_term(c: f64, power: usize) -> Vec<f64> {
    let mut coefficients = vec![0.0; power + 1];
    coefficients[power] = c;
    coefficients
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_display() {
        let p = Polynomial::new(vec![-1.0, 2.0, 3.0]).unwrap();
        assert_eq!(p.to_string(), "3x^2 + 2x - 1");

        let q = Polynomial::new(vec![0.0, -1.0, 0.0, 1.0]).unwrap();
        assert_eq!(q.to_string(), "x^3 - x");

        let zero = Polynomial::new(vec![0.0]).unwrap();
        assert_eq!(zero.to_string(), "0");
    }

    #[test]
    fn test_eval_horner() {
        let p = Polynomial::new(vec![1.0, 0.0, 2.0]).unwrap();
        assert_eq!(p.eval(3.0), 19.0);
        assert_eq!(p.degree(), 2);
    }

    #[test]
    fn test_derivative_of_constant_is_zero() {
        let p = Polynomial::new(vec![5.0]).unwrap();
        assert_eq!(p.derivative().coefficients(), &[0.0]);
    }

    #[test]
    fn test_polynomial_derivative() {
        let r = polynomial_derivative(&[-1.0, 2.0, 3.0]).unwrap();
        assert_eq!(r.coefficients, vec![2.0, 6.0]);
        assert_eq!(r.expression, "6x + 2");
        assert_eq!(r.formula, "d/dx [3x^2 + 2x - 1]");
        assert!(r.steps.iter().any(|s| s == "d/dx (3x^2) = 6x"));
    }

    #[test]
    fn test_polynomial_integral() {
        let r = polynomial_integral(&[0.0, 0.0, 1.0], 0.0, 1.0).unwrap();
        assert_relative_eq!(r.value, 1.0 / 3.0, epsilon = 1e-12);
        assert_eq!(r.coefficients.len(), 4);
    }

    #[test]
    fn test_rejects_empty_and_non_finite() {
        assert!(polynomial_derivative(&[]).is_err());
        assert!(polynomial_derivative(&[1.0, f64::NAN]).is_err());
        assert!(polynomial_integral(&[1.0], 0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_overflow_is_calculation_failure() {
        let err = polynomial_integral(&[1e300, 1e300], 0.0, 1e10).unwrap_err();
        assert_eq!(err.error_code(), "CALCULATION_FAILED");

        let err = polynomial_derivative(&[0.0, 0.0, 1e308]).unwrap_err();
        assert_eq!(err.error_code(), "CALCULATION_FAILED");
    }

    #[test]
    fn test_serializes_as_array() {
        let p = Polynomial::new(vec![1.0, 2.0]).unwrap();
        assert_eq!(serde_json::to_string(&p).unwrap(), "[1.0,2.0]");
    }
}
