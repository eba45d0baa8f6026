//! GPA and CGPA aggregation.
//!
//! Pure functions over courses and semesters. Only eligible courses (a
//! recognized grade and positive credit) contribute, to both the weighted
//! point sum and the credit sum. No rounding happens here.

use serde::{Deserialize, Serialize};

use crate::model::{AcademicRecord, Course, Semester};
use crate::scale::point_for;

/// Weighted sums over a set of eligible courses.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct WeightedTotals {
    points: f64,
    credits: f64,
}

impl WeightedTotals {
    fn add(mut self, course: &Course) -> Self {
        if course.is_eligible() {
            self.points += course.grade_point * course.credit;
            self.credits += course.credit;
        }
        self
    }

    fn average(&self) -> f64 {
        if self.credits > 0.0 {
            self.points / self.credits
        } else {
            0.0
        }
    }
}

/// Credit-weighted GPA of one semester's courses.
///
/// Returns 0 when no course is eligible.
pub fn semester_gpa(courses: &[Course]) -> f64 {
    courses
        .iter()
        .fold(WeightedTotals::default(), WeightedTotals::add)
        .average()
}

/// Cumulative figures across every semester.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CumulativeStats {
    /// Credit-weighted mean over every eligible course.
    pub cgpa: f64,
    /// Sum of eligible credits.
    pub total_credits: f64,
}

/// Compute CGPA and total credits over all semesters.
pub fn cgpa(semesters: &[Semester]) -> CumulativeStats {
    let totals = semesters
        .iter()
        .flat_map(|s| s.courses.iter())
        .fold(WeightedTotals::default(), WeightedTotals::add);

    CumulativeStats {
        cgpa: totals.average(),
        total_credits: totals.credits,
    }
}

/// Refresh every derived field of a record in place.
///
/// Grade points are re-resolved from grades first, then semester GPAs, then
/// the cumulative figures. Running it twice yields the same values.
pub fn recompute(record: &mut AcademicRecord) {
    for semester in &mut record.semesters {
        for course in &mut semester.courses {
            course.grade_point = point_for(&course.grade);
        }
        semester.gpa = semester_gpa(&semester.courses);
    }

    let stats = cgpa(&record.semesters);
    record.cgpa = stats.cgpa;
    record.total_credits = stats.total_credits;

    tracing::debug!(
        semesters = record.semesters.len(),
        cgpa = record.cgpa,
        total_credits = record.total_credits,
        "recomputed derived fields"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(grade: &str, credit: f64) -> Course {
        let mut c = Course::new(credit);
        c.grade = grade.to_string();
        c.grade_point = point_for(grade);
        c
    }

    fn semester(courses: Vec<Course>) -> Semester {
        let mut s = Semester::new(1);
        s.courses = courses;
        s
    }

    #[test]
    fn empty_semester_gpa_is_zero() {
        assert_eq!(semester_gpa(&[]), 0.0);
    }

    #[test]
    fn weighted_gpa_of_two_courses() {
        let gpa = semester_gpa(&[course("A", 3.0), course("B+", 4.0)]);
        let expected = (3.75 * 3.0 + 3.25 * 4.0) / 7.0;
        assert!((gpa - expected).abs() < 1e-12, "expected {expected}, got {gpa}");
        assert!((gpa - 3.464).abs() < 0.001);
    }

    #[test]
    fn ineligible_courses_are_excluded_from_both_sums() {
        let with_noise = semester_gpa(&[
            course("A+", 3.0),
            course("", 4.0),
            course("C", 0.0),
            course("B", -2.0),
        ]);
        assert!((with_noise - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn failing_grade_with_ungraded_course() {
        let s = semester(vec![course("F", 3.0), course("", 4.0)]);
        assert_eq!(semester_gpa(&s.courses), 0.0);
        let stats = cgpa(&[s]);
        assert_eq!(stats.cgpa, 0.0);
        assert_eq!(stats.total_credits, 3.0);
    }

    #[test]
    fn cgpa_spans_all_semesters() {
        let semesters = vec![
            semester(vec![course("A+", 3.0)]),
            semester(vec![course("D", 3.0), course("", 3.0)]),
        ];
        let stats = cgpa(&semesters);
        assert!((stats.cgpa - 3.0).abs() < f64::EPSILON);
        assert_eq!(stats.total_credits, 6.0);
    }

    #[test]
    fn cgpa_is_zero_without_eligible_courses() {
        let semesters = vec![semester(vec![course("", 3.0)]), semester(vec![])];
        assert_eq!(cgpa(&semesters), CumulativeStats::default());
        assert_eq!(cgpa(&[]), CumulativeStats::default());
    }

    #[test]
    fn recompute_refreshes_stale_derived_fields() {
        let mut stale = course("A", 3.0);
        stale.grade_point = 1.0;
        let mut record = AcademicRecord {
            semesters: vec![semester(vec![stale])],
            cgpa: 9.9,
            total_credits: 42.0,
        };
        recompute(&mut record);
        assert_eq!(record.semesters[0].courses[0].grade_point, 3.75);
        assert_eq!(record.semesters[0].gpa, 3.75);
        assert_eq!(record.cgpa, 3.75);
        assert_eq!(record.total_credits, 3.0);
    }

    #[test]
    fn recompute_is_idempotent() {
        let mut record = AcademicRecord {
            semesters: vec![
                semester(vec![course("A-", 2.5), course("C+", 3.0)]),
                semester(vec![course("B-", 1.0)]),
            ],
            cgpa: 0.0,
            total_credits: 0.0,
        };
        recompute(&mut record);
        let first = record.clone();
        recompute(&mut record);
        assert_eq!(record, first);
    }

    #[test]
    fn no_rounding_is_applied() {
        let gpa = semester_gpa(&[course("A", 1.0), course("B", 2.0)]);
        assert_eq!(gpa, (3.75 + 6.0) / 3.0);
    }
}
