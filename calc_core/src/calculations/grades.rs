//! # Grade Scale Conversion
//!
//! Converts a raw score into a percentage and a letter grade:
//!
//! | Percentage | Grade | Description   |
//! |------------|-------|---------------|
//! | ≥ 90       | A     | Excellent     |
//! | ≥ 80       | B     | Good          |
//! | ≥ 70       | C     | Satisfactory  |
//! | ≥ 60       | D     | Sufficient    |
//! | < 60       | F     | Insufficient  |

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::derivation::{fmt_num, Derivation};
use crate::errors::CalcResult;
use crate::validation::{ensure_non_negative, ensure_positive};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LetterGrade {
    A,
    B,
    C,
    D,
    F,
}

impl LetterGrade {
    /// Letter for a percentage score.
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 90.0 {
            LetterGrade::A
        } else if percentage >= 80.0 {
            LetterGrade::B
        } else if percentage >= 70.0 {
            LetterGrade::C
        } else if percentage >= 60.0 {
            LetterGrade::D
        } else {
            LetterGrade::F
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            LetterGrade::A => "Excellent",
            LetterGrade::B => "Good",
            LetterGrade::C => "Satisfactory",
            LetterGrade::D => "Sufficient",
            LetterGrade::F => "Insufficient",
        }
    }

    pub fn is_passing(&self) -> bool {
        *self != LetterGrade::F
    }
}

impl fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            LetterGrade::A => "A",
            LetterGrade::B => "B",
            LetterGrade::C => "C",
            LetterGrade::D => "D",
            LetterGrade::F => "F",
        };
        write!(f, "{}", letter)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeResult {
    pub score: f64,
    pub max_score: f64,
    pub percentage: f64,
    pub grade: LetterGrade,
    pub description: String,
    pub formula: String,
    pub steps: Vec<String>,
}

/// Convert `score` out of `max_score` to a letter grade.
///
/// # Errors
///
/// `InvalidInput` for a negative score or a non-positive maximum.
pub fn convert_to_grade_scale(score: f64, max_score: f64) -> CalcResult<GradeResult> {
    ensure_non_negative("score", score)?;
    ensure_positive("max_score", max_score)?;

    let percentage = score / max_score * 100.0;
    let grade = LetterGrade::from_percentage(percentage);

    let (formula, steps) = Derivation::new(format!("({} / {}) × 100", fmt_num(score), fmt_num(max_score)))
        .step(format!("{} / {} × 100 = {}%", fmt_num(score), fmt_num(max_score), fmt_num(percentage)))
        .step(format!("{}% → {} ({})", fmt_num(percentage), grade, grade.description()))
        .into_parts();

    Ok(GradeResult {
        score,
        max_score,
        percentage,
        grade,
        description: grade.description().to_string(),
        formula,
        steps,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_thresholds() {
        assert_eq!(convert_to_grade_scale(95.0, 100.0).unwrap().grade, LetterGrade::A);
        assert_eq!(convert_to_grade_scale(80.0, 100.0).unwrap().grade, LetterGrade::B);
        assert_eq!(convert_to_grade_scale(14.0, 20.0).unwrap().grade, LetterGrade::C);
        assert_eq!(convert_to_grade_scale(6.0, 10.0).unwrap().grade, LetterGrade::D);
        assert_eq!(convert_to_grade_scale(55.0, 100.0).unwrap().grade, LetterGrade::F);
    }

    #[test]
    fn test_grade_description() {
        let r = convert_to_grade_scale(95.0, 100.0).unwrap();
        assert_eq!(r.description, "Excellent");
        assert_eq!(r.grade.to_string(), "A");
        assert!(r.grade.is_passing());
    }

    #[test]
    fn test_grade_rejects_invalid_scores() {
        assert!(convert_to_grade_scale(-1.0, 100.0).is_err());
        assert!(convert_to_grade_scale(50.0, 0.0).is_err());
        assert!(convert_to_grade_scale(50.0, -10.0).is_err());
    }

    #[test]
    fn test_grade_serialization() {
        let json = serde_json::to_string(&LetterGrade::B).unwrap();
        assert_eq!(json, "\"B\"");
    }
}
