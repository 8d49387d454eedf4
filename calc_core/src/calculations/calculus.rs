//! # Numerical Calculus
//!
//! Finite-difference derivatives and classical quadrature rules.
//!
//! Each method is a direct evaluation: it calls the supplied function a fixed
//! number of times and accumulates the weighted sum of the textbook formula.
//! There is no adaptive step control and no error estimate.
//!
//! ## Derivatives
//!
//! | Method   | Formula                              |
//! |----------|--------------------------------------|
//! | central  | `[f(x+h) − f(x−h)] / 2h`             |
//! | forward  | `[f(x+h) − f(x)] / h`                |
//! | backward | `[f(x) − f(x−h)] / h`                |
//! | second   | `[f(x+h) − 2f(x) + f(x−h)] / h²`     |
//!
//! ## Integrals
//!
//! Simpson's rule (odd `n` is bumped to the next even number), the
//! trapezoidal rule and the midpoint rule over `n` subintervals of `[a, b]`,
//! with `1 <= n <= MAX_INTERVALS`.
//!
//! Function values and final results must be finite; anything else is a
//! `CalculationFailed` error.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::calculus::{integral, IntegrationMethod, DEFAULT_INTERVALS};
//!
//! let r = integral(|x| x * x, 0.0, 1.0, DEFAULT_INTERVALS, IntegrationMethod::Simpson).unwrap();
//! assert!((r.value - 1.0 / 3.0).abs() < 1e-10);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::derivation::{fmt_decimal, Derivation};
use crate::errors::{CalcError, CalcResult};
use crate::validation::{ensure_finite, ensure_finite_result, ensure_positive};

/// Default finite-difference step
pub const DEFAULT_STEP: f64 = 0.001;

/// Default number of quadrature subintervals
pub const DEFAULT_INTERVALS: usize = 1000;

/// Upper bound on quadrature subintervals (keeps one evaluation bounded)
pub const MAX_INTERVALS: usize = 10_000_000;

const DECIMALS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DerivativeMethod {
    #[default]
    Central,
    Forward,
    Backward,
}

impl fmt::Display for DerivativeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DerivativeMethod::Central => write!(f, "central difference"),
            DerivativeMethod::Forward => write!(f, "forward difference"),
            DerivativeMethod::Backward => write!(f, "backward difference"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntegrationMethod {
    #[default]
    Simpson,
    Trapezoidal,
    Midpoint,
}

impl fmt::Display for IntegrationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegrationMethod::Simpson => write!(f, "Simpson's rule"),
            IntegrationMethod::Trapezoidal => write!(f, "trapezoidal rule"),
            IntegrationMethod::Midpoint => write!(f, "midpoint rule"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DerivativeResult {
    pub x: f64,
    pub h: f64,
    /// `None` for the second derivative, which is always central
    pub method: Option<DerivativeMethod>,
    /// 1 for f'(x), 2 for f''(x)
    pub order: u8,
    pub value: f64,
    pub formula: String,
    pub steps: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntegralResult {
    pub a: f64,
    pub b: f64,
    /// Subintervals actually used (Simpson rounds odd counts up)
    pub n: usize,
    pub method: IntegrationMethod,
    pub value: f64,
    pub formula: String,
    pub steps: Vec<String>,
}

fn d(value: f64) -> String {
    fmt_decimal(value, DECIMALS)
}

/// Evaluate `f`, failing if it leaves the reals.
fn sample<F>(f: &F, x: f64) -> CalcResult<f64>
where
    F: Fn(f64) -> f64,
{
    let y = f(x);
    if !y.is_finite() {
        return Err(CalcError::calculation_failed(
            "calculus",
            format!("f({}) is not a finite number", x),
        ));
    }
    Ok(y)
}

/// First derivative of `f` at `x` by finite differences.
pub fn derivative<F>(f: F, x: f64, h: f64, method: DerivativeMethod) -> CalcResult<DerivativeResult>
where
    F: Fn(f64) -> f64,
{
    ensure_finite("x", x)?;
    ensure_positive("h", h)?;

    let mut derivation;
    let value = match method {
        DerivativeMethod::Central => {
            let ahead = sample(&f, x + h)?;
            let behind = sample(&f, x - h)?;
            derivation = Derivation::new("[f(x+h) − f(x−h)] / 2h")
                .step(format!("f({}) = {}", d(x + h), d(ahead)))
                .step(format!("f({}) = {}", d(x - h), d(behind)));
            (ahead - behind) / (2.0 * h)
        }
        DerivativeMethod::Forward => {
            let ahead = sample(&f, x + h)?;
            let fx = sample(&f, x)?;
            derivation = Derivation::new("[f(x+h) − f(x)] / h")
                .step(format!("f({}) = {}", d(x + h), d(ahead)))
                .step(format!("f({}) = {}", d(x), d(fx)));
            (ahead - fx) / h
        }
        DerivativeMethod::Backward => {
            let fx = sample(&f, x)?;
            let behind = sample(&f, x - h)?;
            derivation = Derivation::new("[f(x) − f(x−h)] / h")
                .step(format!("f({}) = {}", d(x), d(fx)))
                .step(format!("f({}) = {}", d(x - h), d(behind)));
            (fx - behind) / h
        }
    };
    let value = ensure_finite_result("calculus", "f'(x)", value)?;
    derivation.push(format!("f'({}) ≈ {} (h = {}, {})", d(x), d(value), h, method));
    let (formula, steps) = derivation.into_parts();

    Ok(DerivativeResult {
        x,
        h,
        method: Some(method),
        order: 1,
        value,
        formula,
        steps,
    })
}

/// Second derivative of `f` at `x`: `[f(x+h) − 2f(x) + f(x−h)] / h²`.
pub fn second_derivative<F>(f: F, x: f64, h: f64) -> CalcResult<DerivativeResult>
where
    F: Fn(f64) -> f64,
{
    ensure_finite("x", x)?;
    ensure_positive("h", h)?;

    let ahead = sample(&f, x + h)?;
    let fx = sample(&f, x)?;
    let behind = sample(&f, x - h)?;
    let value = ensure_finite_result("calculus", "f''(x)", (ahead - 2.0 * fx + behind) / (h * h))?;

    let (formula, steps) = Derivation::new("[f(x+h) − 2f(x) + f(x−h)] / h²")
        .step(format!("f({}) = {}", d(x + h), d(ahead)))
        .step(format!("f({}) = {}", d(x), d(fx)))
        .step(format!("f({}) = {}", d(x - h), d(behind)))
        .step(format!("f''({}) ≈ {} (h = {})", d(x), d(value), h))
        .into_parts();

    Ok(DerivativeResult {
        x,
        h,
        method: None,
        order: 2,
        value,
        formula,
        steps,
    })
}

/// Definite integral of `f` over `[a, b]` with `n` subintervals.
///
/// `a > b` gives the negated integral over `[b, a]`.
pub fn integral<F>(f: F, a: f64, b: f64, n: usize, method: IntegrationMethod) -> CalcResult<IntegralResult>
where
    F: Fn(f64) -> f64,
{
    ensure_finite("a", a)?;
    ensure_finite("b", b)?;
    if n == 0 {
        return Err(CalcError::invalid_input("n", "0", "At least one subinterval is required"));
    }
    if n > MAX_INTERVALS {
        return Err(CalcError::out_of_range("n", n, 1, MAX_INTERVALS));
    }

    let mut derivation;
    let n = match method {
        IntegrationMethod::Simpson if n % 2 == 1 => {
            derivation = Derivation::new("(h/3)[f(x0) + 4Σf(x_odd) + 2Σf(x_even) + f(xn)]")
                .step(format!("Simpson's rule needs an even n: {} → {}", n, n + 1));
            n + 1
        }
        IntegrationMethod::Simpson => {
            derivation = Derivation::new("(h/3)[f(x0) + 4Σf(x_odd) + 2Σf(x_even) + f(xn)]");
            n
        }
        IntegrationMethod::Trapezoidal => {
            derivation = Derivation::new("h[(f(x0) + f(xn))/2 + Σf(xi)]");
            n
        }
        IntegrationMethod::Midpoint => {
            derivation = Derivation::new("h·Σf(x_{i−1/2})");
            n
        }
    };

    let h = (b - a) / n as f64;
    derivation.push(format!("h = ({} − {}) / {} = {}", d(b), d(a), n, d(h)));

    let value = match method {
        IntegrationMethod::Simpson => {
            let mut sum = sample(&f, a)? + sample(&f, b)?;
            for i in 1..n {
                let weight = if i % 2 == 1 { 4.0 } else { 2.0 };
                sum += weight * sample(&f, a + i as f64 * h)?;
            }
            derivation.push(format!("Weighted sum = {}", d(sum)));
            sum * h / 3.0
        }
        IntegrationMethod::Trapezoidal => {
            let mut sum = (sample(&f, a)? + sample(&f, b)?) / 2.0;
            for i in 1..n {
                sum += sample(&f, a + i as f64 * h)?;
            }
            derivation.push(format!("Weighted sum = {}", d(sum)));
            sum * h
        }
        IntegrationMethod::Midpoint => {
            let mut sum = 0.0;
            for i in 0..n {
                sum += sample(&f, a + (i as f64 + 0.5) * h)?;
            }
            derivation.push(format!("Sum of midpoint values = {}", d(sum)));
            sum * h
        }
    };
    let value = ensure_finite_result("calculus", "integral", value)?;
    derivation.push(format!("∫[{}, {}] f(x) dx ≈ {} ({}, n = {})", d(a), d(b), d(value), method, n));
    let (formula, steps) = derivation.into_parts();

    Ok(IntegralResult {
        a,
        b,
        n,
        method,
        value,
        formula,
        steps,
    })
}
