//! The fixed grading scale.
//!
//! Maps letter grades to grade points. The table is process-wide constant
//! configuration and must match the published scale exactly.

use std::fmt;

use serde::Serialize;

/// One row of the grading scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeOption {
    /// Letter grade symbol (e.g. "A+").
    pub grade: &'static str,
    /// Grade point in the range 0.0–4.0.
    pub point: f64,
    /// Marks range this grade covers.
    pub range_label: &'static str,
}

impl GradeOption {
    /// Performance band shown next to this grade in the scale view.
    pub fn performance(&self) -> Performance {
        Performance::for_point(self.point)
    }
}

/// The grading scale, highest grade first.
pub const GRADE_SCALE: [GradeOption; 10] = [
    GradeOption { grade: "A+", point: 4.00, range_label: "80-100" },
    GradeOption { grade: "A", point: 3.75, range_label: "75-79" },
    GradeOption { grade: "A-", point: 3.50, range_label: "70-74" },
    GradeOption { grade: "B+", point: 3.25, range_label: "65-69" },
    GradeOption { grade: "B", point: 3.00, range_label: "60-64" },
    GradeOption { grade: "B-", point: 2.75, range_label: "55-59" },
    GradeOption { grade: "C+", point: 2.50, range_label: "50-54" },
    GradeOption { grade: "C", point: 2.25, range_label: "45-49" },
    GradeOption { grade: "D", point: 2.00, range_label: "40-44" },
    GradeOption { grade: "F", point: 0.00, range_label: "Below 40" },
];

/// Look up the scale row for a grade symbol.
pub fn grade_option(grade: &str) -> Option<&'static GradeOption> {
    if grade.is_empty() {
        return None;
    }
    GRADE_SCALE.iter().find(|g| g.grade == grade)
}

/// Returns `true` if `grade` is a symbol on the scale.
pub fn is_recognized(grade: &str) -> bool {
    grade_option(grade).is_some()
}

/// Grade point for a symbol.
///
/// Empty or unrecognized grades mean "not yet graded" and yield 0.
pub fn point_for(grade: &str) -> f64 {
    grade_option(grade).map(|g| g.point).unwrap_or(0.0)
}

/// Performance band of a single grade point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Performance {
    Excellent,
    VeryGood,
    Satisfactory,
    Fail,
}

impl Performance {
    pub fn for_point(point: f64) -> Self {
        if point >= 3.75 {
            Performance::Excellent
        } else if point >= 3.0 {
            Performance::VeryGood
        } else if point >= 2.0 {
            Performance::Satisfactory
        } else {
            Performance::Fail
        }
    }
}

impl fmt::Display for Performance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Performance::Excellent => write!(f, "Excellent"),
            Performance::VeryGood => write!(f, "Very Good"),
            Performance::Satisfactory => write!(f, "Satisfactory"),
            Performance::Fail => write!(f, "Fail"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_matches_published_points() {
        let expected = [
            ("A+", 4.0),
            ("A", 3.75),
            ("A-", 3.5),
            ("B+", 3.25),
            ("B", 3.0),
            ("B-", 2.75),
            ("C+", 2.5),
            ("C", 2.25),
            ("D", 2.0),
            ("F", 0.0),
        ];
        assert_eq!(GRADE_SCALE.len(), expected.len());
        for (grade, point) in expected {
            assert_eq!(point_for(grade), point, "grade {grade}");
        }
    }

    #[test]
    fn grade_symbols_are_unique() {
        let mut symbols: Vec<&str> = GRADE_SCALE.iter().map(|g| g.grade).collect();
        symbols.sort_unstable();
        symbols.dedup();
        assert_eq!(symbols.len(), GRADE_SCALE.len());
    }

    #[test]
    fn empty_and_unknown_grades_score_zero() {
        assert_eq!(point_for(""), 0.0);
        assert_eq!(point_for("E"), 0.0);
        assert_eq!(point_for("a+"), 0.0);
        assert!(!is_recognized(""));
        assert!(is_recognized("F"));
    }

    #[test]
    fn performance_bands() {
        assert_eq!(grade_option("A").unwrap().performance(), Performance::Excellent);
        assert_eq!(grade_option("A-").unwrap().performance(), Performance::VeryGood);
        assert_eq!(grade_option("B").unwrap().performance(), Performance::VeryGood);
        assert_eq!(grade_option("D").unwrap().performance(), Performance::Satisfactory);
        assert_eq!(grade_option("F").unwrap().performance(), Performance::Fail);
        assert_eq!(Performance::VeryGood.to_string(), "Very Good");
    }
}
