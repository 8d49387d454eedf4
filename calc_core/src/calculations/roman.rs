//! # Roman Numerals
//!
//! Arabic → Roman for `1..=3999` with the standard subtractive table, and
//! Roman → Arabic by a right-to-left scan.
//!
//! Parsing never fails: unrecognized input comes back with
//! `is_valid: false`. The parser is permissive (`IIII` reads as 4), so the
//! result also reports whether the input is the canonical spelling.
//!
//! ```rust
//! use calc_core::calculations::roman::{arabic_to_roman, roman_to_arabic};
//!
//! assert_eq!(arabic_to_roman(1994).unwrap().roman, "MCMXCIV");
//! assert_eq!(roman_to_arabic("mcmxciv").arabic, 1994);
//! assert!(!roman_to_arabic("ABC").is_valid);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

pub const MIN_ROMAN: u32 = 1;
pub const MAX_ROMAN: u32 = 3999;

/// Greedy conversion table, largest value first.
const ROMAN_TABLE: [(u32, &str); 13] = [
    (1000, "M"),
    (900, "CM"),
    (500, "D"),
    (400, "CD"),
    (100, "C"),
    (90, "XC"),
    (50, "L"),
    (40, "XL"),
    (10, "X"),
    (9, "IX"),
    (5, "V"),
    (4, "IV"),
    (1, "I"),
];

fn symbol_value(symbol: char) -> Option<u32> {
    match symbol {
        'I' => Some(1),
        'V' => Some(5),
        'X' => Some(10),
        'L' => Some(50),
        'C' => Some(100),
        'D' => Some(500),
        'M' => Some(1000),
        _ => None,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RomanResult {
    pub arabic: u32,
    pub roman: String,
    pub steps: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RomanParse {
    pub input: String,
    /// 0 when the input is invalid
    pub arabic: u32,
    pub is_valid: bool,
    /// True when re-encoding the value reproduces the (uppercased) input
    pub is_canonical: bool,
    pub steps: Vec<String>,
}

impl RomanParse {
    fn invalid(input: &str, reason: String) -> Self {
        RomanParse {
            input: input.to_string(),
            arabic: 0,
            is_valid: false,
            is_canonical: false,
            steps: vec![reason],
        }
    }
}

/// Convert an integer in `1..=3999` to Roman numerals.
///
/// # Errors
///
/// `OutOfRange` outside `1..=3999`.
pub fn arabic_to_roman(n: u32) -> CalcResult<RomanResult> {
    if !(MIN_ROMAN..=MAX_ROMAN).contains(&n) {
        return Err(CalcError::out_of_range("arabic", n, MIN_ROMAN, MAX_ROMAN));
    }

    let mut remaining = n;
    let mut roman = String::new();
    let mut steps = Vec::new();
    for (value, symbol) in ROMAN_TABLE {
        let count = remaining / value;
        if count == 0 {
            continue;
        }
        roman.push_str(&symbol.repeat(count as usize));
        remaining -= count * value;
        steps.push(format!(
            "{} × {} ({}) → {}, remaining {}",
            count, symbol, value, roman, remaining
        ));
    }

    Ok(RomanResult { arabic: n, roman, steps })
}

/// Parse a Roman numeral (case-insensitive, surrounding whitespace ignored).
pub fn roman_to_arabic(input: &str) -> RomanParse {
    let normalized = input.trim().to_uppercase();
    if normalized.is_empty() {
        return RomanParse::invalid(input, "Empty input".to_string());
    }

    let mut total: u32 = 0;
    let mut previous = 0;
    let mut steps = Vec::new();
    for symbol in normalized.chars().rev() {
        let Some(value) = symbol_value(symbol) else {
            return RomanParse::invalid(input, format!("'{}' is not a Roman numeral symbol", symbol));
        };
        if value < previous {
            total = total.saturating_sub(value);
            steps.push(format!("{} ({}) < {} → subtract: {}", symbol, value, previous, total));
        } else {
            total = total.saturating_add(value);
            steps.push(format!("{} ({}) → add: {}", symbol, value, total));
        }
        previous = value;
    }

    let is_canonical = arabic_to_roman(total).is_ok_and(|r| r.roman == normalized);
    if !is_canonical {
        steps.push(format!("'{}' is not the standard spelling of {}", normalized, total));
    }

    RomanParse {
        input: input.to_string(),
        arabic: total,
        is_valid: true,
        is_canonical,
        steps,
    }
}
