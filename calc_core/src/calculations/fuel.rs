//! # Fuel Cost
//!
//! Trip fuel consumption and cost from distance, consumption per 100 km and
//! price per liter.

use serde::{Deserialize, Serialize};

use crate::derivation::{fmt_num, Derivation};
use crate::errors::CalcResult;
use crate::validation::ensure_positive;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FuelCostResult {
    pub distance_km: f64,
    pub consumption_per_100km: f64,
    pub price_per_liter: f64,
    pub liters: f64,
    pub cost: f64,
    pub cost_per_km: f64,
    pub formula: String,
    pub steps: Vec<String>,
}

/// `liters = distance × consumption / 100`, `cost = liters × price`.
///
/// All three inputs must be strictly positive.
pub fn fuel_cost(distance_km: f64, consumption_per_100km: f64, price_per_liter: f64) -> CalcResult<FuelCostResult> {
    ensure_positive("distance_km", distance_km)?;
    ensure_positive("consumption_per_100km", consumption_per_100km)?;
    ensure_positive("price_per_liter", price_per_liter)?;

    let liters = distance_km * consumption_per_100km / 100.0;
    let cost = liters * price_per_liter;
    let cost_per_km = cost / distance_km;

    let (formula, steps) = Derivation::new(format!(
        "({} × {} / 100) × {}",
        fmt_num(distance_km),
        fmt_num(consumption_per_100km),
        fmt_num(price_per_liter)
    ))
    .step(format!(
        "Liters = {} km × {} L/100km / 100 = {} L",
        fmt_num(distance_km),
        fmt_num(consumption_per_100km),
        fmt_num(liters)
    ))
    .step(format!(
        "Cost = {} L × {} = {}",
        fmt_num(liters),
        fmt_num(price_per_liter),
        fmt_num(cost)
    ))
    .step(format!("Cost per km = {} / {} = {}", fmt_num(cost), fmt_num(distance_km), fmt_num(cost_per_km)))
    .into_parts();

    Ok(FuelCostResult {
        distance_km,
        consumption_per_100km,
        price_per_liter,
        liters,
        cost,
        cost_per_km,
        formula,
        steps,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fuel_cost() {
        let r = fuel_cost(350.0, 6.5, 1.8).unwrap();
        assert_relative_eq!(r.liters, 22.75, epsilon = 1e-9);
        assert_relative_eq!(r.cost, 40.95, epsilon = 1e-9);
        assert_relative_eq!(r.cost_per_km, 0.117, epsilon = 1e-9);
    }

    #[test]
    fn test_fuel_cost_requires_positive_inputs() {
        assert!(fuel_cost(0.0, 6.5, 1.8).is_err());
        assert!(fuel_cost(100.0, -1.0, 1.8).is_err());
        assert!(fuel_cost(100.0, 6.5, 0.0).is_err());
    }
}
