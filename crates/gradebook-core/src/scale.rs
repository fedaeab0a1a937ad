//! The grade scale: numeric grades to letter grades, pass/fail, and points.
//!
//! These functions are pure and total. They are called repeatedly during
//! aggregation, so identical input must always produce identical output.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The minimum numeric grade that counts as passing.
pub const PASSING_THRESHOLD: f64 = 40.0;

/// A letter grade on the seven-band scale.
///
/// Variants are declared in band order (highest first) so that ordered
/// collections keyed by `LetterGrade` iterate from A down to F.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LetterGrade {
    A,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "B-")]
    BMinus,
    #[serde(rename = "C+")]
    CPlus,
    #[serde(rename = "C-")]
    CMinus,
    E,
    F,
}

impl LetterGrade {
    /// All seven letters, in band order.
    pub const ALL: [LetterGrade; 7] = [
        LetterGrade::A,
        LetterGrade::BPlus,
        LetterGrade::BMinus,
        LetterGrade::CPlus,
        LetterGrade::CMinus,
        LetterGrade::E,
        LetterGrade::F,
    ];

    /// Grade-point value used for GPA computation.
    pub fn grade_point(self) -> f64 {
        match self {
            LetterGrade::A => 5.0,
            LetterGrade::BPlus => 4.5,
            LetterGrade::BMinus => 4.0,
            LetterGrade::CPlus => 3.5,
            LetterGrade::CMinus => 3.0,
            LetterGrade::E => 2.0,
            LetterGrade::F => 0.0,
        }
    }
}

impl fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LetterGrade::A => write!(f, "A"),
            LetterGrade::BPlus => write!(f, "B+"),
            LetterGrade::BMinus => write!(f, "B-"),
            LetterGrade::CPlus => write!(f, "C+"),
            LetterGrade::CMinus => write!(f, "C-"),
            LetterGrade::E => write!(f, "E"),
            LetterGrade::F => write!(f, "F"),
        }
    }
}

impl FromStr for LetterGrade {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "A" => Ok(LetterGrade::A),
            "B+" => Ok(LetterGrade::BPlus),
            "B-" => Ok(LetterGrade::BMinus),
            "C+" => Ok(LetterGrade::CPlus),
            "C-" => Ok(LetterGrade::CMinus),
            "E" => Ok(LetterGrade::E),
            "F" => Ok(LetterGrade::F),
            other => Err(format!("unknown letter grade: {other}")),
        }
    }
}

/// Map a numeric grade to its letter grade.
///
/// Bands are inclusive at their lower bound and partition the whole number
/// line: anything below 40 is an F, anything at or above 80 is an A.
pub fn letter_grade(grade: f64) -> LetterGrade {
    if grade >= 80.0 {
        LetterGrade::A
    } else if grade >= 75.0 {
        LetterGrade::BPlus
    } else if grade >= 70.0 {
        LetterGrade::BMinus
    } else if grade >= 60.0 {
        LetterGrade::CPlus
    } else if grade >= 50.0 {
        LetterGrade::CMinus
    } else if grade >= PASSING_THRESHOLD {
        LetterGrade::E
    } else {
        LetterGrade::F
    }
}

/// Whether a numeric grade counts as passing.
pub fn is_passing(grade: f64) -> bool {
    grade >= PASSING_THRESHOLD
}
