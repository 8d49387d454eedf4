//! # Calculations
//!
//! Every calculator is a pure function: plain numbers (or a string) in, a
//! value object with the answer, a `formula` and ordered `steps` out, or a
//! [`CalcError`](crate::errors::CalcError) when the input is rejected.
//!
//! ## Available Calculations
//!
//! - [`percentage`] - ratios, percent-of, increases/decreases, variation
//! - [`finance`] - simple interest, depreciation, amortization, CPI, savings, FV/PV
//! - [`calculus`] - finite-difference derivatives and quadrature rules
//! - [`polynomial`] - analytical polynomial derivative/integral
//! - [`grades`], [`fuel`], [`text_stats`], [`roman`], [`click_speed`] - everyday calculators
//!
//! ## JSON Requests
//!
//! [`CalculationRequest`] describes any calculation as data, and [`evaluate`]
//! dispatches it:
//!
//! ```rust
//! use calc_core::calculations::{evaluate, CalculationOutcome, CalculationRequest};
//! use calc_core::settings::CalcSettings;
//!
//! let request: CalculationRequest =
//!     serde_json::from_str(r#"{ "type": "Increase", "value": 100.0, "percentage": 20.0 }"#).unwrap();
//! let outcome = evaluate(&request, &CalcSettings::default()).unwrap();
//!
//! match outcome {
//!     CalculationOutcome::Scalar(r) => assert_eq!(r.result, 120.0),
//!     _ => unreachable!(),
//! }
//! ```

pub mod calculus;
pub mod click_speed;
pub mod finance;
pub mod fuel;
pub mod grades;
pub mod percentage;
pub mod polynomial;
pub mod roman;
pub mod text_stats;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::derivation::{fmt_decimal, fmt_num, Derivation};
use crate::errors::CalcResult;
use crate::settings::CalcSettings;

use calculus::{DerivativeMethod, DerivativeResult, IntegralResult, IntegrationMethod};
use click_speed::ClickSpeedResult;
use finance::{AmortizationResult, DepreciationResult, PurchasingPowerResult, SavingsGoalResult, SimpleInterestResult};
use fuel::FuelCostResult;
use grades::GradeResult;
use polynomial::{Polynomial, PolynomialIntegralResult, PolynomialResult};
use roman::{RomanParse, RomanResult};
use text_stats::TextStats;

/// Result of a calculator whose answer is a single number.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalarResult {
    pub result: f64,
    pub formula: String,
    pub steps: Vec<String>,
}

impl ScalarResult {
    pub fn new(result: f64, derivation: Derivation) -> Self {
        let (formula, steps) = derivation.into_parts();
        ScalarResult { result, formula, steps }
    }
}

/// Calculator families, matching the module split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CalcCategory {
    Percentage,
    Finance,
    Calculus,
    Misc,
}

impl CalcCategory {
    pub fn display_name(&self) -> &'static str {
        match self {
            CalcCategory::Percentage => "Percentage",
            CalcCategory::Finance => "Finance",
            CalcCategory::Calculus => "Calculus",
            CalcCategory::Misc => "Miscellaneous",
        }
    }
}

/// A calculation described as data.
///
/// Optional tuning fields (`h`, `n`, `rows`, `words_per_minute`) fall back
/// to [`CalcSettings`] when omitted.
///
/// ## JSON Example
///
/// ```json
/// { "type": "Integral", "function": [0.0, 0.0, 1.0], "a": 0.0, "b": 1.0, "method": "simpson" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationRequest {
    // Percentage
    PercentageOf { x: f64, y: f64 },
    PercentageOfNumber { percentage: f64, base: f64 },
    Increase { value: f64, percentage: f64 },
    Decrease { value: f64, percentage: f64 },
    Variation { old_value: f64, new_value: f64 },
    OriginalBeforeIncrease { final_value: f64, percentage: f64 },
    OriginalBeforeDecrease { final_value: f64, percentage: f64 },

    // Finance
    SimpleInterest {
        capital: f64,
        annual_rate_percent: f64,
        years: f64,
    },
    LinearDepreciation {
        initial_value: f64,
        residual_value: f64,
        useful_life_years: f64,
    },
    Amortization {
        principal: f64,
        annual_rate_percent: f64,
        years: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        rows: Option<usize>,
    },
    PurchasingPower { amount: f64, cpi_start: f64, cpi_end: f64 },
    SavingsGoal {
        goal: f64,
        annual_rate_percent: f64,
        years: f64,
    },
    FutureValue {
        present_value: f64,
        annual_rate_percent: f64,
        years: f64,
    },
    PresentValue {
        future_value: f64,
        annual_rate_percent: f64,
        years: f64,
    },

    // Calculus
    Derivative {
        function: Polynomial,
        x: f64,
        #[serde(default)]
        method: DerivativeMethod,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        h: Option<f64>,
    },
    SecondDerivative {
        function: Polynomial,
        x: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        h: Option<f64>,
    },
    Integral {
        function: Polynomial,
        a: f64,
        b: f64,
        #[serde(default)]
        method: IntegrationMethod,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        n: Option<usize>,
    },
    PolynomialDerivative { coefficients: Vec<f64> },
    PolynomialIntegral { coefficients: Vec<f64>, a: f64, b: f64 },

    // Miscellaneous
    GradeScale { score: f64, max_score: f64 },
    FuelCost {
        distance_km: f64,
        consumption_per_100km: f64,
        price_per_liter: f64,
    },
    TextStats {
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        words_per_minute: Option<u32>,
    },
    ArabicToRoman { arabic: u32 },
    RomanToArabic { roman: String },
    ClickSpeed { clicks: u64, seconds: f64 },
}

impl CalculationRequest {
    /// Get the calculation type as a string
    pub fn calc_type(&self) -> &'static str {
        match self {
            CalculationRequest::PercentageOf { .. } => "PercentageOf",
            CalculationRequest::PercentageOfNumber { .. } => "PercentageOfNumber",
            CalculationRequest::Increase { .. } => "Increase",
            CalculationRequest::Decrease { .. } => "Decrease",
            CalculationRequest::Variation { .. } => "Variation",
            CalculationRequest::OriginalBeforeIncrease { .. } => "OriginalBeforeIncrease",
            CalculationRequest::OriginalBeforeDecrease { .. } => "OriginalBeforeDecrease",
            CalculationRequest::SimpleInterest { .. } => "SimpleInterest",
            CalculationRequest::LinearDepreciation { .. } => "LinearDepreciation",
            CalculationRequest::Amortization { .. } => "Amortization",
            CalculationRequest::PurchasingPower { .. } => "PurchasingPower",
            CalculationRequest::SavingsGoal { .. } => "SavingsGoal",
            CalculationRequest::FutureValue { .. } => "FutureValue",
            CalculationRequest::PresentValue { .. } => "PresentValue",
            CalculationRequest::Derivative { .. } => "Derivative",
            CalculationRequest::SecondDerivative { .. } => "SecondDerivative",
            CalculationRequest::Integral { .. } => "Integral",
            CalculationRequest::PolynomialDerivative { .. } => "PolynomialDerivative",
            CalculationRequest::PolynomialIntegral { .. } => "PolynomialIntegral",
            CalculationRequest::GradeScale { .. } => "GradeScale",
            CalculationRequest::FuelCost { .. } => "FuelCost",
            CalculationRequest::TextStats { .. } => "TextStats",
            CalculationRequest::ArabicToRoman { .. } => "ArabicToRoman",
            CalculationRequest::RomanToArabic { .. } => "RomanToArabic",
            CalculationRequest::ClickSpeed { .. } => "ClickSpeed",
        }
    }

    pub fn category(&self) -> CalcCategory {
        use CalculationRequest as R;
        match self {
            R::PercentageOf { .. }
            | R::PercentageOfNumber { .. }
            | R::Increase { .. }
            | R::Decrease { .. }
            | R::Variation { .. }
            | R::OriginalBeforeIncrease { .. }
            | R::OriginalBeforeDecrease { .. } => CalcCategory::Percentage,
            R::SimpleInterest { .. }
            | R::LinearDepreciation { .. }
            | R::Amortization { .. }
            | R::PurchasingPower { .. }
            | R::SavingsGoal { .. }
            | R::FutureValue { .. }
            | R::PresentValue { .. } => CalcCategory::Finance,
            R::Derivative { .. }
            | R::SecondDerivative { .. }
            | R::Integral { .. }
            | R::PolynomialDerivative { .. }
            | R::PolynomialIntegral { .. } => CalcCategory::Calculus,
            R::GradeScale { .. }
            | R::FuelCost { .. }
            | R::TextStats { .. }
            | R::ArabicToRoman { .. }
            | R::RomanToArabic { .. }
            | R::ClickSpeed { .. } => CalcCategory::Misc,
        }
    }

    /// `"Finance: Amortization"`, used as a display heading.
    pub fn heading(&self) -> String {
        format!("{}: {}", self.category().display_name(), self.calc_type())
    }
}

/// The value object produced by [`evaluate`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", content = "result")]
pub enum CalculationOutcome {
    Scalar(ScalarResult),
    SimpleInterest(SimpleInterestResult),
    Depreciation(DepreciationResult),
    Amortization(AmortizationResult),
    PurchasingPower(PurchasingPowerResult),
    SavingsGoal(SavingsGoalResult),
    Derivative(DerivativeResult),
    Integral(IntegralResult),
    Polynomial(PolynomialResult),
    PolynomialIntegral(PolynomialIntegralResult),
    Grade(GradeResult),
    FuelCost(FuelCostResult),
    TextStats(TextStats),
    Roman(RomanResult),
    RomanParse(RomanParse),
    ClickSpeed(ClickSpeedResult),
}

impl CalculationOutcome {
    /// Formula with operands substituted, when the calculator produces one.
    pub fn formula(&self) -> Option<&str> {
        match self {
            CalculationOutcome::Scalar(r) => Some(&r.formula),
            CalculationOutcome::SimpleInterest(r) => Some(&r.formula),
            CalculationOutcome::Depreciation(r) => Some(&r.formula),
            CalculationOutcome::Amortization(r) => Some(&r.formula),
            CalculationOutcome::PurchasingPower(r) => Some(&r.formula),
            CalculationOutcome::SavingsGoal(r) => Some(&r.formula),
            CalculationOutcome::Derivative(r) => Some(&r.formula),
            CalculationOutcome::Integral(r) => Some(&r.formula),
            CalculationOutcome::Polynomial(r) => Some(&r.formula),
            CalculationOutcome::PolynomialIntegral(r) => Some(&r.formula),
            CalculationOutcome::Grade(r) => Some(&r.formula),
            CalculationOutcome::FuelCost(r) => Some(&r.formula),
            CalculationOutcome::ClickSpeed(r) => Some(&r.formula),
            CalculationOutcome::TextStats(_) | CalculationOutcome::Roman(_) | CalculationOutcome::RomanParse(_) => {
                None
            }
        }
    }

    /// Human-readable steps (empty for plain counters).
    pub fn steps(&self) -> &[String] {
        match self {
            CalculationOutcome::Scalar(r) => &r.steps,
            CalculationOutcome::SimpleInterest(r) => &r.steps,
            CalculationOutcome::Depreciation(r) => &r.steps,
            CalculationOutcome::Amortization(r) => &r.steps,
            CalculationOutcome::PurchasingPower(r) => &r.steps,
            CalculationOutcome::SavingsGoal(r) => &r.steps,
            CalculationOutcome::Derivative(r) => &r.steps,
            CalculationOutcome::Integral(r) => &r.steps,
            CalculationOutcome::Polynomial(r) => &r.steps,
            CalculationOutcome::PolynomialIntegral(r) => &r.steps,
            CalculationOutcome::Grade(r) => &r.steps,
            CalculationOutcome::FuelCost(r) => &r.steps,
            CalculationOutcome::Roman(r) => &r.steps,
            CalculationOutcome::RomanParse(r) => &r.steps,
            CalculationOutcome::ClickSpeed(r) => &r.steps,
            CalculationOutcome::TextStats(_) => &[],
        }
    }

    /// One-line summary of the headline figure.
    pub fn summary(&self) -> String {
        match self {
            CalculationOutcome::Scalar(r) => format!("Result: {}", fmt_num(r.result)),
            CalculationOutcome::SimpleInterest(r) => {
                format!("Interest: {}, total: {}", fmt_num(r.interest), fmt_num(r.total))
            }
            CalculationOutcome::Depreciation(r) => format!(
                "Annual depreciation: {} ({} per month)",
                fmt_num(r.annual_depreciation),
                fmt_num(r.monthly_depreciation)
            ),
            CalculationOutcome::Amortization(r) => format!(
                "Monthly payment: {} over {} months (interest {})",
                fmt_num(r.monthly_payment),
                r.months,
                fmt_num(r.total_interest)
            ),
            CalculationOutcome::PurchasingPower(r) => format!(
                "Purchasing power: {} (CPI {}%)",
                fmt_num(r.purchasing_power),
                fmt_num(r.cpi_variation_percent)
            ),
            CalculationOutcome::SavingsGoal(r) => format!(
                "Monthly contribution: {} over {} months",
                fmt_num(r.monthly_contribution),
                r.months
            ),
            CalculationOutcome::Derivative(r) => {
                let prime = if r.order == 2 { "''" } else { "'" };
                format!("f{}({}) ≈ {}", prime, fmt_decimal(r.x, 6), fmt_decimal(r.value, 6))
            }
            CalculationOutcome::Integral(r) => format!("Integral ≈ {} ({}, n = {})", fmt_decimal(r.value, 6), r.method, r.n),
            CalculationOutcome::Polynomial(r) => format!("f'(x) = {}", r.expression),
            CalculationOutcome::PolynomialIntegral(r) => {
                format!("F(x) = {}, integral = {}", r.expression, fmt_decimal(r.value, 6))
            }
            CalculationOutcome::Grade(r) => format!("{}% → {} ({})", fmt_num(r.percentage), r.grade, r.description),
            CalculationOutcome::FuelCost(r) => format!("{} L, cost {}", fmt_num(r.liters), fmt_num(r.cost)),
            CalculationOutcome::TextStats(r) => format!(
                "{}, {}, {}, {} min read",
                count_of(r.words, "word"),
                count_of(r.sentences, "sentence"),
                count_of(r.paragraphs, "paragraph"),
                r.reading_time_minutes
            ),
            CalculationOutcome::Roman(r) => format!("{} = {}", r.arabic, r.roman),
            CalculationOutcome::RomanParse(r) if r.is_valid => format!("{} = {}", r.input.trim(), r.arabic),
            CalculationOutcome::RomanParse(r) => format!("'{}' is not a valid Roman numeral", r.input),
            CalculationOutcome::ClickSpeed(r) => format!("{} clicks per second", fmt_num(r.clicks_per_second)),
        }
    }
}

fn count_of(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {}", noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

/// Evaluate a request, filling unset tuning fields from `settings`.
pub fn evaluate(request: &CalculationRequest, settings: &CalcSettings) -> CalcResult<CalculationOutcome> {
    debug!(calc_type = request.calc_type(), "evaluating calculation");

    let outcome = dispatch(request, settings);
    if let Err(err) = &outcome {
        warn!(calc_type = request.calc_type(), code = err.error_code(), "calculation rejected: {}", err);
    }
    outcome
}

fn dispatch(request: &CalculationRequest, settings: &CalcSettings) -> CalcResult<CalculationOutcome> {
    use CalculationOutcome as Out;
    use CalculationRequest as Req;

    let outcome = match request {
        Req::PercentageOf { x, y } => Out::Scalar(percentage::percentage_of(*x, *y)?),
        Req::PercentageOfNumber { percentage, base } => {
            Out::Scalar(percentage::percentage_of_number(*percentage, *base)?)
        }
        Req::Increase { value, percentage } => Out::Scalar(percentage::increase(*value, *percentage)?),
        Req::Decrease { value, percentage } => Out::Scalar(percentage::decrease(*value, *percentage)?),
        Req::Variation { old_value, new_value } => {
            Out::Scalar(percentage::variation_percent(*old_value, *new_value)?)
        }
        Req::OriginalBeforeIncrease { final_value, percentage } => {
            Out::Scalar(percentage::original_value_after_increase(*final_value, *percentage)?)
        }
        Req::OriginalBeforeDecrease { final_value, percentage } => {
            Out::Scalar(percentage::original_value_after_decrease(*final_value, *percentage)?)
        }

        Req::SimpleInterest { capital, annual_rate_percent, years } => {
            Out::SimpleInterest(finance::simple_interest(*capital, *annual_rate_percent, *years)?)
        }
        Req::LinearDepreciation { initial_value, residual_value, useful_life_years } => Out::Depreciation(
            finance::linear_depreciation(*initial_value, *residual_value, *useful_life_years)?,
        ),
        Req::Amortization { principal, annual_rate_percent, years, rows } => Out::Amortization(finance::amortization(
            *principal,
            *annual_rate_percent,
            *years,
            rows.unwrap_or(settings.amortization_rows),
        )?),
        Req::PurchasingPower { amount, cpi_start, cpi_end } => {
            Out::PurchasingPower(finance::purchasing_power(*amount, *cpi_start, *cpi_end)?)
        }
        Req::SavingsGoal { goal, annual_rate_percent, years } => {
            Out::SavingsGoal(finance::savings_goal(*goal, *annual_rate_percent, *years)?)
        }
        Req::FutureValue { present_value, annual_rate_percent, years } => {
            Out::Scalar(finance::future_value(*present_value, *annual_rate_percent, *years)?)
        }
        Req::PresentValue { future_value, annual_rate_percent, years } => {
            Out::Scalar(finance::present_value(*future_value, *annual_rate_percent, *years)?)
        }

        Req::Derivative { function, x, method, h } => {
            function.validate()?;
            Out::Derivative(calculus::derivative(
                |t| function.eval(t),
                *x,
                h.unwrap_or(settings.derivative_step),
                *method,
            )?)
        }
        Req::SecondDerivative { function, x, h } => {
            function.validate()?;
            Out::Derivative(calculus::second_derivative(
                |t| function.eval(t),
                *x,
                h.unwrap_or(settings.derivative_step),
            )?)
        }
        Req::Integral { function, a, b, method, n } => {
            function.validate()?;
            Out::Integral(calculus::integral(
                |t| function.eval(t),
                *a,
                *b,
                n.unwrap_or(settings.integration_intervals),
                *method,
            )?)
        }
        Req::PolynomialDerivative { coefficients } => {
            Out::Polynomial(polynomial::polynomial_derivative(coefficients)?)
        }
        Req::PolynomialIntegral { coefficients, a, b } => {
            Out::PolynomialIntegral(polynomial::polynomial_integral(coefficients, *a, *b)?)
        }

        Req::GradeScale { score, max_score } => Out::Grade(grades::convert_to_grade_scale(*score, *max_score)?),
        Req::FuelCost { distance_km, consumption_per_100km, price_per_liter } => {
            Out::FuelCost(fuel::fuel_cost(*distance_km, *consumption_per_100km, *price_per_liter)?)
        }
        Req::TextStats { text, words_per_minute } => Out::TextStats(text_stats::count_words_and_characters(
            text,
            words_per_minute.unwrap_or(settings.words_per_minute),
        )?),
        Req::ArabicToRoman { arabic } => Out::Roman(roman::arabic_to_roman(*arabic)?),
        Req::RomanToArabic { roman } => Out::RomanParse(roman::roman_to_arabic(roman)),
        Req::ClickSpeed { clicks, seconds } => Out::ClickSpeed(click_speed::click_speed(*clicks, *seconds)?),
    };
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn eval_json(json: &str) -> CalcResult<CalculationOutcome> {
        let request: CalculationRequest = serde_json::from_str(json).unwrap();
        evaluate(&request, &CalcSettings::default())
    }

    #[test]
    fn test_percentage_request() {
        match eval_json(r#"{ "type": "PercentageOf", "x": 25.0, "y": 200.0 }"#).unwrap() {
            CalculationOutcome::Scalar(r) => assert_eq!(r.result, 12.5),
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn test_request_errors_propagate() {
        let err = eval_json(r#"{ "type": "Variation", "old_value": 0.0, "new_value": 5.0 }"#).unwrap_err();
        assert_eq!(err.error_code(), "DIVISION_BY_ZERO");
    }

    #[test]
    fn test_amortization_rows_default_from_settings() {
        let request = CalculationRequest::Amortization {
            principal: 10_000.0,
            annual_rate_percent: 5.0,
            years: 5.0,
            rows: None,
        };
        let settings = CalcSettings {
            amortization_rows: 3,
            ..CalcSettings::default()
        };
        match evaluate(&request, &settings).unwrap() {
            CalculationOutcome::Amortization(r) => assert_eq!(r.schedule.len(), 3),
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn test_integral_request_with_polynomial() {
        let outcome = eval_json(r#"{ "type": "Integral", "function": [0.0, 0.0, 1.0], "a": 0.0, "b": 1.0 }"#).unwrap();
        match outcome {
            CalculationOutcome::Integral(r) => {
                assert_eq!(r.method, IntegrationMethod::Simpson);
                assert_eq!(r.n, 1000);
                assert_abs_diff_eq!(r.value, 1.0 / 3.0, epsilon = 1e-10);
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn test_derivative_request_methods() {
        let outcome = eval_json(
            r#"{ "type": "Derivative", "function": [0.0, 0.0, 1.0], "x": 2.0, "method": "backward", "h": 0.5 }"#,
        )
        .unwrap();
        match outcome {
            CalculationOutcome::Derivative(r) => {
                // backward difference of x² at 2 with h = 0.5: (4 − 2.25) / 0.5
                assert_abs_diff_eq!(r.value, 3.5, epsilon = 1e-12);
                assert_eq!(r.method, Some(DerivativeMethod::Backward));
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn test_text_stats_summary_pluralises() {
        let outcome = eval_json(r#"{ "type": "TextStats", "text": "One. Two three.\n\nFour five six." }"#).unwrap();
        assert_eq!(outcome.summary(), "6 words, 3 sentences, 2 paragraphs, 1 min read");
    }

    #[test]
    fn test_request_heading() {
        let request = CalculationRequest::SavingsGoal {
            goal: 1_000.0,
            annual_rate_percent: 2.0,
            years: 1.0,
        };
        assert_eq!(request.heading(), "Finance: SavingsGoal");
        let request = CalculationRequest::ClickSpeed { clicks: 3, seconds: 1.0 };
        assert_eq!(request.heading(), "Miscellaneous: ClickSpeed");
    }

    #[test]
    fn test_oversized_interval_count_rejected() {
        let err = eval_json(
            r#"{ "type": "Integral", "function": [0.0, 1.0], "a": 0.0, "b": 1.0, "n": 18446744073709551615 }"#,
        )
        .unwrap_err();
        assert_eq!(err.error_code(), "OUT_OF_RANGE");
    }

    #[test]
    fn test_empty_polynomial_rejected() {
        let err = eval_json(r#"{ "type": "Derivative", "function": [], "x": 1.0 }"#).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_roman_parse_never_errors() {
        let outcome = eval_json(r#"{ "type": "RomanToArabic", "roman": "hello" }"#).unwrap();
        assert!(outcome.summary().contains("not a valid Roman numeral"));
    }

    #[test]
    fn test_text_stats_outcome_has_no_formula() {
        let outcome = eval_json(r#"{ "type": "TextStats", "text": "Hello world." }"#).unwrap();
        assert!(outcome.formula().is_none());
        assert!(outcome.steps().is_empty());
        assert_eq!(outcome.summary(), "2 words, 1 sentence, 1 paragraph, 1 min read");
    }

    #[test]
    fn test_categories() {
        let request = CalculationRequest::ClickSpeed { clicks: 10, seconds: 1.0 };
        assert_eq!(request.category(), CalcCategory::Misc);
        assert_eq!(request.calc_type(), "ClickSpeed");

        let request = CalculationRequest::FutureValue {
            present_value: 1.0,
            annual_rate_percent: 1.0,
            years: 1.0,
        };
        assert_eq!(request.category(), CalcCategory::Finance);
    }

    #[test]
    fn test_outcome_json_shape() {
        let outcome = eval_json(r#"{ "type": "ArabicToRoman", "arabic": 14 }"#).unwrap();
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["kind"], "Roman");
        assert_eq!(json["result"]["roman"], "XIV");
    }

    #[test]
    fn test_request_roundtrip_skips_unset_options() {
        let request = CalculationRequest::TextStats {
            text: "abc".to_string(),
            words_per_minute: None,
        };
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(json, r#"{"type":"TextStats","text":"abc"}"#);
    }
}
