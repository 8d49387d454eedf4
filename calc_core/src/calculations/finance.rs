//! # Finance Calculations
//!
//! Simple interest, linear depreciation, fixed-rate loan amortization,
//! CPI purchasing power, savings goals and compound future/present value.
//!
//! ## Conventions
//!
//! - Rates are annual percentages (`5.0` means 5 %).
//! - Monthly figures use `r = annual / 100 / 12` and `n = round(years × 12)`.
//! - Inputs are validated up front: amounts and periods must be positive,
//!   rates must lie in `0..=MAX_RATE_PERCENT`. A rate too small to move
//!   `(1 + r)^n` off 1 (0 % included) is handled as the closed-form limit of
//!   the annuity formulas rather than dividing by zero.
//! - Results that still overflow are rejected with `CalculationFailed`.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::finance::{amortization, DEFAULT_SCHEDULE_ROWS};
//!
//! let loan = amortization(200_000.0, 3.5, 30.0, DEFAULT_SCHEDULE_ROWS).unwrap();
//! assert_eq!(loan.months, 360);
//! assert_eq!(loan.schedule.len(), 12);
//! println!("Monthly payment: {:.2}", loan.monthly_payment);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::ScalarResult;
use crate::derivation::{fmt_num, Derivation};
use crate::errors::{CalcError, CalcResult};
use crate::validation::{ensure_finite, ensure_finite_result, ensure_non_negative, ensure_positive};

/// Rows emitted in an amortization schedule unless configured otherwise
pub const DEFAULT_SCHEDULE_ROWS: usize = 12;

/// Longest period accepted by the finance calculators, in years
pub const MAX_YEARS: f64 = 100.0;

/// Highest annual rate accepted by the finance calculators, in percent
pub const MAX_RATE_PERCENT: f64 = 1000.0;

fn ensure_rate(annual_rate_percent: f64) -> CalcResult<f64> {
    ensure_finite("annual_rate_percent", annual_rate_percent)?;
    if !(0.0..=MAX_RATE_PERCENT).contains(&annual_rate_percent) {
        return Err(CalcError::out_of_range(
            "annual_rate_percent",
            annual_rate_percent,
            0.0,
            MAX_RATE_PERCENT,
        ));
    }
    Ok(annual_rate_percent)
}

fn ensure_period(field: &str, years: f64) -> CalcResult<f64> {
    ensure_positive(field, years)?;
    if years > MAX_YEARS {
        return Err(CalcError::invalid_input(
            field,
            years.to_string(),
            format!("Period exceeds {} years", MAX_YEARS),
        ));
    }
    Ok(years)
}

fn months_for(years: f64) -> CalcResult<u32> {
    let months = (years * 12.0).round() as u32;
    if months == 0 {
        return Err(CalcError::invalid_input(
            "years",
            years.to_string(),
            "Period must cover at least one month",
        ));
    }
    Ok(months)
}

// =============================================================================
// Simple interest
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimpleInterestResult {
    pub capital: f64,
    /// Annual rate in percent
    pub rate_percent: f64,
    pub years: f64,
    pub interest: f64,
    /// Capital plus interest
    pub total: f64,
    pub formula: String,
    pub steps: Vec<String>,
}

/// Simple interest: `I = C × r × t`.
pub fn simple_interest(capital: f64, annual_rate_percent: f64, years: f64) -> CalcResult<SimpleInterestResult> {
    ensure_positive("capital", capital)?;
    ensure_rate(annual_rate_percent)?;
    ensure_period("years", years)?;

    let rate = annual_rate_percent / 100.0;
    let interest = capital * rate * years;
    let total = capital + interest;

    let (formula, steps) = Derivation::new(format!(
        "I = {} × {} × {}",
        fmt_num(capital),
        rate,
        fmt_num(years)
    ))
    .step(format!("r = {}% / 100 = {}", fmt_num(annual_rate_percent), rate))
    .step(format!("I = {} × {} × {} = {}", fmt_num(capital), rate, fmt_num(years), fmt_num(interest)))
    .step(format!("Total = {} + {} = {}", fmt_num(capital), fmt_num(interest), fmt_num(total)))
    .into_parts();

    Ok(SimpleInterestResult {
        capital,
        rate_percent: annual_rate_percent,
        years,
        interest,
        total,
        formula,
        steps,
    })
}

// =============================================================================
// Linear depreciation
// =============================================================================

/// One year of a straight-line depreciation schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepreciationRow {
    pub year: u32,
    pub depreciation: f64,
    pub accumulated: f64,
    pub book_value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepreciationResult {
    pub initial_value: f64,
    pub residual_value: f64,
    pub useful_life_years: f64,
    pub annual_depreciation: f64,
    pub monthly_depreciation: f64,
    /// Book value at the end of the first year
    pub value_after_one_year: f64,
    /// Annual depreciation as a percentage of the initial value
    pub depreciation_rate_percent: f64,
    pub schedule: Vec<DepreciationRow>,
    pub formula: String,
    pub steps: Vec<String>,
}

/// Straight-line depreciation: `(initial − residual) / useful_life`.
///
/// The schedule covers `ceil(useful_life)` years; a fractional final year
/// only depreciates down to the residual value.
pub fn linear_depreciation(
    initial_value: f64,
    residual_value: f64,
    useful_life_years: f64,
) -> CalcResult<DepreciationResult> {
    ensure_positive("initial_value", initial_value)?;
    ensure_non_negative("residual_value", residual_value)?;
    ensure_period("useful_life_years", useful_life_years)?;
    if residual_value > initial_value {
        return Err(CalcError::invalid_input(
            "residual_value",
            residual_value.to_string(),
            "Residual value cannot exceed the initial value",
        ));
    }

    let depreciable = initial_value - residual_value;
    let annual_depreciation = depreciable / useful_life_years;
    let monthly_depreciation = annual_depreciation / 12.0;
    let value_after_one_year = (initial_value - annual_depreciation).max(residual_value);
    let depreciation_rate_percent = annual_depreciation / initial_value * 100.0;

    let mut schedule = Vec::new();
    let mut book_value = initial_value;
    let mut accumulated = 0.0;
    for year in 1..=(useful_life_years.ceil() as u32) {
        let depreciation = annual_depreciation.min(book_value - residual_value);
        book_value -= depreciation;
        accumulated += depreciation;
        schedule.push(DepreciationRow {
            year,
            depreciation,
            accumulated,
            book_value,
        });
    }

    let (formula, steps) = Derivation::new(format!(
        "({} − {}) / {}",
        fmt_num(initial_value),
        fmt_num(residual_value),
        fmt_num(useful_life_years)
    ))
    .step(format!(
        "Depreciable amount = {} − {} = {}",
        fmt_num(initial_value),
        fmt_num(residual_value),
        fmt_num(depreciable)
    ))
    .step(format!(
        "Annual depreciation = {} / {} = {}",
        fmt_num(depreciable),
        fmt_num(useful_life_years),
        fmt_num(annual_depreciation)
    ))
    .step(format!(
        "Monthly depreciation = {} / 12 = {}",
        fmt_num(annual_depreciation),
        fmt_num(monthly_depreciation)
    ))
    .step(format!(
        "Value after one year = {} − {} = {}",
        fmt_num(initial_value),
        fmt_num(annual_depreciation),
        fmt_num(value_after_one_year)
    ))
    .into_parts();

    Ok(DepreciationResult {
        initial_value,
        residual_value,
        useful_life_years,
        annual_depreciation,
        monthly_depreciation,
        value_after_one_year,
        depreciation_rate_percent,
        schedule,
        formula,
        steps,
    })
}

// =============================================================================
// Amortization
// =============================================================================

/// One month of an amortization schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationRow {
    pub month: u32,
    pub payment: f64,
    /// Portion of the payment that reduces the balance
    pub principal: f64,
    /// Portion of the payment that pays interest
    pub interest: f64,
    /// Outstanding balance after this payment
    pub balance: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationResult {
    pub principal: f64,
    pub annual_rate_percent: f64,
    pub monthly_rate: f64,
    pub months: u32,
    pub monthly_payment: f64,
    pub total_paid: f64,
    pub total_interest: f64,
    pub schedule: Vec<AmortizationRow>,
    pub formula: String,
    pub steps: Vec<String>,
}

impl AmortizationResult {
    /// Balance left after the last schedule row (the principal if the schedule is empty).
    pub fn remaining_balance(&self) -> f64 {
        self.schedule.last().map_or(self.principal, |row| row.balance)
    }
}

/// Fixed-rate loan payment `P·r(1+r)^n / ((1+r)^n − 1)` with a schedule of
/// the first `rows` months (or every month when the loan is shorter).
pub fn amortization(
    principal: f64,
    annual_rate_percent: f64,
    years: f64,
    rows: usize,
) -> CalcResult<AmortizationResult> {
    ensure_positive("principal", principal)?;
    ensure_rate(annual_rate_percent)?;
    ensure_period("years", years)?;
    if rows == 0 {
        return Err(CalcError::invalid_input("rows", "0", "At least one schedule row is required"));
    }

    let months = months_for(years)?;
    let monthly_rate = annual_rate_percent / 100.0 / 12.0;
    let n = months as f64;

    let factor = ensure_finite_result("amortization", "(1 + r)^n", (1.0 + monthly_rate).powi(months as i32))?;

    let (monthly_payment, mut derivation) = if factor - 1.0 == 0.0 {
        (
            principal / n,
            Derivation::new(format!("{} / {}", fmt_num(principal), months))
                .step(negligible_rate_step(monthly_rate, "payment = P / n")),
        )
    } else {
        let derivation = Derivation::new(format!(
            "{} × [{:.6} × (1 + {:.6})^{}] / [(1 + {:.6})^{} − 1]",
            fmt_num(principal),
            monthly_rate,
            monthly_rate,
            months,
            monthly_rate,
            months
        ))
        .step(format!(
            "r = {}% / 12 / 100 = {:.6}",
            fmt_num(annual_rate_percent),
            monthly_rate
        ))
        .step(format!("(1 + r)^{} = {:.6}", months, factor));
        (principal * monthly_rate * factor / (factor - 1.0), derivation)
    };

    ensure_finite_result("amortization", "monthly payment", monthly_payment)?;
    let total_paid = ensure_finite_result("amortization", "total paid", monthly_payment * n)?;
    let total_interest = total_paid - principal;

    derivation.push(format!("n = {} years × 12 = {} months", fmt_num(years), months));
    derivation.push(format!("Monthly payment = {}", fmt_num(monthly_payment)));
    derivation.push(format!(
        "Total paid = {} × {} = {}",
        fmt_num(monthly_payment),
        months,
        fmt_num(total_paid)
    ));
    derivation.push(format!(
        "Total interest = {} − {} = {}",
        fmt_num(total_paid),
        fmt_num(principal),
        fmt_num(total_interest)
    ));

    let row_count = rows.min(months as usize);
    let mut schedule = Vec::with_capacity(row_count);
    let mut balance = principal;
    for month in 1..=(row_count as u32) {
        let interest = balance * monthly_rate;
        let principal_portion = monthly_payment - interest;
        balance -= principal_portion;
        schedule.push(AmortizationRow {
            month,
            payment: monthly_payment,
            principal: principal_portion,
            interest,
            balance,
        });
    }

    let (formula, steps) = derivation.into_parts();

    Ok(AmortizationResult {
        principal,
        annual_rate_percent,
        monthly_rate,
        months,
        monthly_payment,
        total_paid,
        total_interest,
        schedule,
        formula,
        steps,
    })
}

fn negligible_rate_step(monthly_rate: f64, limit: &str) -> String {
    if monthly_rate == 0.0 {
        format!("Interest rate is 0%: {}", limit)
    } else {
        format!("Interest rate {:e} is too small to change (1 + r)^n: {}", monthly_rate, limit)
    }
}

// =============================================================================
// CPI / purchasing power
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchasingPowerResult {
    pub amount: f64,
    pub cpi_start: f64,
    pub cpi_end: f64,
    /// What `amount` buys at the later price level, in starting-period money
    pub purchasing_power: f64,
    /// Amount needed at the later price level to match the original `amount`
    pub equivalent_amount: f64,
    pub cpi_variation_percent: f64,
    pub formula: String,
    pub steps: Vec<String>,
}

/// Inflation adjustment: `amount × cpi_start / cpi_end`.
pub fn purchasing_power(amount: f64, cpi_start: f64, cpi_end: f64) -> CalcResult<PurchasingPowerResult> {
    ensure_positive("amount", amount)?;
    ensure_positive("cpi_start", cpi_start)?;
    ensure_positive("cpi_end", cpi_end)?;

    let purchasing_power = amount * (cpi_start / cpi_end);
    let equivalent_amount = amount * (cpi_end / cpi_start);
    let cpi_variation_percent = (cpi_end - cpi_start) / cpi_start * 100.0;

    let (formula, steps) = Derivation::new(format!(
        "{} × ({} / {})",
        fmt_num(amount),
        fmt_num(cpi_start),
        fmt_num(cpi_end)
    ))
    .step(format!(
        "CPI variation = ({} − {}) / {} × 100 = {}%",
        fmt_num(cpi_end),
        fmt_num(cpi_start),
        fmt_num(cpi_start),
        fmt_num(cpi_variation_percent)
    ))
    .step(format!(
        "Purchasing power = {} × {:.4} = {}",
        fmt_num(amount),
        cpi_start / cpi_end,
        fmt_num(purchasing_power)
    ))
    .step(format!(
        "Equivalent amount = {} × {:.4} = {}",
        fmt_num(amount),
        cpi_end / cpi_start,
        fmt_num(equivalent_amount)
    ))
    .into_parts();

    Ok(PurchasingPowerResult {
        amount,
        cpi_start,
        cpi_end,
        purchasing_power,
        equivalent_amount,
        cpi_variation_percent,
        formula,
        steps,
    })
}

// =============================================================================
// Savings goal
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavingsGoalResult {
    pub goal: f64,
    pub annual_rate_percent: f64,
    pub months: u32,
    pub monthly_contribution: f64,
    pub total_contributed: f64,
    pub interest_earned: f64,
    pub formula: String,
    pub steps: Vec<String>,
}

/// Monthly deposit that reaches `goal`: `goal·r / ((1+r)^n − 1)`.
pub fn savings_goal(goal: f64, annual_rate_percent: f64, years: f64) -> CalcResult<SavingsGoalResult> {
    ensure_positive("goal", goal)?;
    ensure_rate(annual_rate_percent)?;
    ensure_period("years", years)?;

    let months = months_for(years)?;
    let monthly_rate = annual_rate_percent / 100.0 / 12.0;
    let n = months as f64;

    let factor = ensure_finite_result("savings goal", "(1 + r)^n", (1.0 + monthly_rate).powi(months as i32))?;

    let (monthly_contribution, mut derivation) = if factor - 1.0 == 0.0 {
        (
            goal / n,
            Derivation::new(format!("{} / {}", fmt_num(goal), months))
                .step(negligible_rate_step(monthly_rate, "contribution = goal / n")),
        )
    } else {
        let derivation = Derivation::new(format!(
            "{} × {:.6} / [(1 + {:.6})^{} − 1]",
            fmt_num(goal),
            monthly_rate,
            monthly_rate,
            months
        ))
        .step(format!("r = {}% / 12 / 100 = {:.6}", fmt_num(annual_rate_percent), monthly_rate))
        .step(format!("(1 + r)^{} = {:.6}", months, factor));
        (goal * monthly_rate / (factor - 1.0), derivation)
    };

    ensure_finite_result("savings goal", "monthly contribution", monthly_contribution)?;
    let total_contributed = monthly_contribution * n;
    let interest_earned = goal - total_contributed;

    derivation.push(format!("Monthly contribution = {}", fmt_num(monthly_contribution)));
    derivation.push(format!(
        "Total contributed = {} × {} = {}",
        fmt_num(monthly_contribution),
        months,
        fmt_num(total_contributed)
    ));
    derivation.push(format!(
        "Interest earned = {} − {} = {}",
        fmt_num(goal),
        fmt_num(total_contributed),
        fmt_num(interest_earned)
    ));
    let (formula, steps) = derivation.into_parts();

    Ok(SavingsGoalResult {
        goal,
        annual_rate_percent,
        months,
        monthly_contribution,
        total_contributed,
        interest_earned,
        formula,
        steps,
    })
}

// =============================================================================
// Future / present value
// =============================================================================

/// Compound growth: `FV = PV(1 + r)^t`.
pub fn future_value(present_value: f64, annual_rate_percent: f64, years: f64) -> CalcResult<ScalarResult> {
    ensure_positive("present_value", present_value)?;
    ensure_rate(annual_rate_percent)?;
    ensure_period("years", years)?;

    let rate = annual_rate_percent / 100.0;
    let growth = ensure_finite_result("future value", "(1 + r)^t", (1.0 + rate).powf(years))?;
    let result = ensure_finite_result("future value", "result", present_value * growth)?;

    let derivation = Derivation::new(format!("{} × (1 + {})^{}", fmt_num(present_value), rate, fmt_num(years)))
        .step(format!("(1 + {})^{} = {:.6}", rate, fmt_num(years), growth))
        .step(format!("{} × {:.6} = {}", fmt_num(present_value), growth, fmt_num(result)));

    Ok(ScalarResult::new(result, derivation))
}

/// Discounting: `PV = FV / (1 + r)^t`.
pub fn present_value(future_value: f64, annual_rate_percent: f64, years: f64) -> CalcResult<ScalarResult> {
    ensure_positive("future_value", future_value)?;
    ensure_rate(annual_rate_percent)?;
    ensure_period("years", years)?;

    let rate = annual_rate_percent / 100.0;
    let growth = ensure_finite_result("present value", "(1 + r)^t", (1.0 + rate).powf(years))?;
    let result = future_value / growth;

    let derivation = Derivation::new(format!("{} / (1 + {})^{}", fmt_num(future_value), rate, fmt_num(years)))
        .step(format!("(1 + {})^{} = {:.6}", rate, fmt_num(years), growth))
        .step(format!("{} / {:.6} = {}", fmt_num(future_value), growth, fmt_num(result)));

    Ok(ScalarResult::new(result, derivation))
}
