//! # Click Speed
//!
//! Clicks-per-second and average interval between clicks.

use serde::{Deserialize, Serialize};

use crate::derivation::{fmt_num, Derivation};
use crate::errors::CalcResult;
use crate::validation::ensure_positive;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClickSpeedResult {
    pub clicks: u64,
    pub seconds: f64,
    pub clicks_per_second: f64,
    /// `None` when no clicks were registered
    pub average_interval_ms: Option<f64>,
    pub formula: String,
    pub steps: Vec<String>,
}

/// `cps = clicks / seconds`, `interval = seconds × 1000 / clicks`.
pub fn click_speed(clicks: u64, seconds: f64) -> CalcResult<ClickSpeedResult> {
    ensure_positive("seconds", seconds)?;

    let clicks_per_second = clicks as f64 / seconds;

    let mut derivation = Derivation::new(format!("{} / {}", clicks, fmt_num(seconds)))
        .step(format!("CPS = {} clicks / {} s = {}", clicks, fmt_num(seconds), fmt_num(clicks_per_second)));

    let average_interval_ms = if clicks == 0 {
        derivation.push("No clicks registered: no interval");
        None
    } else {
        let interval = seconds * 1000.0 / clicks as f64;
        derivation.push(format!(
            "Interval = {} s × 1000 / {} = {} ms",
            fmt_num(seconds),
            clicks,
            fmt_num(interval)
        ));
        Some(interval)
    };
    let (formula, steps) = derivation.into_parts();

    Ok(ClickSpeedResult {
        clicks,
        seconds,
        clicks_per_second,
        average_interval_ms,
        formula,
        steps,
    })
}
