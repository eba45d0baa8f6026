//! Read-only summaries of a record, with Markdown and JSON export.
//!
//! Everything here is presentation: rounding happens only while formatting,
//! never in the record itself.

use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::AcademicRecord;
use crate::scale::GRADE_SCALE;

/// Maximum grade point on the scale.
pub const MAX_POINT: f64 = 4.0;

/// CGPA at or above which a student is on track for graduation.
pub const ON_TRACK_CGPA: f64 = 2.0;

/// Academic standing derived from a CGPA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Standing {
    Excellent,
    VeryGood,
    Satisfactory,
    NeedsImprovement,
}

impl Standing {
    pub fn for_cgpa(cgpa: f64) -> Self {
        if cgpa >= 3.75 {
            Standing::Excellent
        } else if cgpa >= 3.0 {
            Standing::VeryGood
        } else if cgpa >= 2.0 {
            Standing::Satisfactory
        } else {
            Standing::NeedsImprovement
        }
    }
}

impl fmt::Display for Standing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Standing::Excellent => write!(f, "Excellent"),
            Standing::VeryGood => write!(f, "Very Good"),
            Standing::Satisfactory => write!(f, "Satisfactory"),
            Standing::NeedsImprovement => write!(f, "Need Improvement"),
        }
    }
}

/// Percentage equivalent of a CGPA on the 4.0 scale, rounded to a whole
/// number. Zero when there is no CGPA yet.
pub fn percentage(cgpa: f64) -> u32 {
    if cgpa > 0.0 {
        ((cgpa / MAX_POINT) * 100.0).round() as u32
    } else {
        0
    }
}

/// Headline figures for a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordSummary {
    pub cgpa: f64,
    pub total_credits: f64,
    pub total_semesters: usize,
    pub total_courses: usize,
    pub standing: Standing,
    pub percentage: u32,
    /// `None` until there is a CGPA to judge.
    pub on_track: Option<bool>,
}

impl RecordSummary {
    pub fn from_record(record: &AcademicRecord) -> Self {
        Self {
            cgpa: record.cgpa,
            total_credits: record.total_credits,
            total_semesters: record.semesters.len(),
            total_courses: record.course_count(),
            standing: Standing::for_cgpa(record.cgpa),
            percentage: percentage(record.cgpa),
            on_track: (record.cgpa > 0.0).then_some(record.cgpa >= ON_TRACK_CGPA),
        }
    }

    /// One-line progress message, if there is a CGPA.
    pub fn progress_message(&self) -> Option<&'static str> {
        self.on_track.map(|on_track| {
            if on_track {
                "You are on track for graduation!"
            } else {
                "Focus on improving your grades."
            }
        })
    }
}

/// Format a credit value without a trailing ".0" for whole numbers.
pub fn format_credit(credit: f64) -> String {
    if credit.fract() == 0.0 {
        format!("{credit:.0}")
    } else {
        format!("{credit}")
    }
}

/// Render the record as a Markdown transcript.
pub fn to_markdown(record: &AcademicRecord) -> String {
    let summary = RecordSummary::from_record(record);
    let mut md = String::new();

    md.push_str("# Academic Transcript\n\n");
    md.push_str(&format!(
        "**CGPA:** {:.2} ({}) | **Credits:** {} | **Semesters:** {} | **Percentage:** {}%\n\n",
        summary.cgpa,
        summary.standing,
        format_credit(summary.total_credits),
        summary.total_semesters,
        summary.percentage
    ));
    if let Some(message) = summary.progress_message() {
        md.push_str(&format!("_{message}_\n\n"));
    }

    for semester in &record.semesters {
        md.push_str(&format!(
            "## {} (GPA {:.2})\n\n",
            semester.name, semester.gpa
        ));
        if semester.courses.is_empty() {
            md.push_str("_No courses yet._\n\n");
            continue;
        }
        md.push_str("| Course | Credits | Grade | Points |\n");
        md.push_str("|--------|---------|-------|--------|\n");
        for course in &semester.courses {
            let name = if course.name.is_empty() {
                "(unnamed)"
            } else {
                course.name.as_str()
            };
            let grade = if course.grade.is_empty() {
                "-"
            } else {
                course.grade.as_str()
            };
            md.push_str(&format!(
                "| {} | {} | {} | {:.2} |\n",
                name,
                format_credit(course.credit),
                grade,
                course.grade_point
            ));
        }
        md.push('\n');
    }

    md
}

/// Render the grading scale as a Markdown table.
pub fn scale_to_markdown() -> String {
    let mut md = String::new();
    md.push_str("| Grade | Grade Point | Marks Range | Performance |\n");
    md.push_str("|-------|-------------|-------------|-------------|\n");
    for option in &GRADE_SCALE {
        md.push_str(&format!(
            "| {} | {:.2} | {} | {} |\n",
            option.grade,
            option.point,
            option.range_label,
            option.performance()
        ));
    }
    md
}

/// Write the Markdown transcript to a file.
pub fn save_markdown(record: &AcademicRecord, path: &Path) -> Result<()> {
    write_file(path, &to_markdown(record))
}

/// Write the record as a pretty-printed persisted-layout document.
pub fn save_json(record: &AcademicRecord, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(record).context("failed to serialize record")?;
    write_file(path, &json)
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    std::fs::write(path, content)
        .with_context(|| format!("failed to write transcript to {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Course;
    use crate::persistence::decode;
    use crate::statistics::recompute;

    fn graded_record() -> AcademicRecord {
        let mut record = AcademicRecord::initial();
        let mut a = Course::new(3.0);
        a.name = "Calculus I".into();
        a.grade = "A".into();
        let mut b = Course::new(4.0);
        b.name = "Physics".into();
        b.grade = "B+".into();
        let unnamed = Course::new(2.5);
        record.semesters[0].courses = vec![a, b, unnamed];
        recompute(&mut record);
        record
    }

    #[test]
    fn standing_thresholds() {
        assert_eq!(Standing::for_cgpa(4.0), Standing::Excellent);
        assert_eq!(Standing::for_cgpa(3.75), Standing::Excellent);
        assert_eq!(Standing::for_cgpa(3.74), Standing::VeryGood);
        assert_eq!(Standing::for_cgpa(2.0), Standing::Satisfactory);
        assert_eq!(Standing::for_cgpa(1.99), Standing::NeedsImprovement);
        assert_eq!(Standing::for_cgpa(0.0), Standing::NeedsImprovement);
    }

    #[test]
    fn percentage_equivalent() {
        assert_eq!(percentage(0.0), 0);
        assert_eq!(percentage(4.0), 100);
        assert_eq!(percentage(3.0), 75);
        assert_eq!(percentage(24.25 / 7.0), 87);
    }

    #[test]
    fn summary_of_fresh_record() {
        let summary = RecordSummary::from_record(&AcademicRecord::initial());
        assert_eq!(summary.total_semesters, 1);
        assert_eq!(summary.total_courses, 0);
        assert_eq!(summary.percentage, 0);
        assert_eq!(summary.on_track, None);
        assert!(summary.progress_message().is_none());
    }

    #[test]
    fn summary_of_graded_record() {
        let summary = RecordSummary::from_record(&graded_record());
        assert_eq!(summary.total_credits, 7.0);
        assert_eq!(summary.total_courses, 3);
        assert_eq!(summary.standing, Standing::VeryGood);
        assert_eq!(summary.on_track, Some(true));
        assert_eq!(
            summary.progress_message(),
            Some("You are on track for graduation!")
        );
    }

    #[test]
    fn credit_formatting() {
        assert_eq!(format_credit(3.0), "3");
        assert_eq!(format_credit(2.5), "2.5");
        assert_eq!(format_credit(0.25), "0.25");
    }

    #[test]
    fn markdown_transcript() {
        let md = to_markdown(&graded_record());
        assert!(md.contains("**CGPA:** 3.46 (Very Good)"));
        assert!(md.contains("## Semester 1 (GPA 3.46)"));
        assert!(md.contains("| Calculus I | 3 | A | 3.75 |"));
        assert!(md.contains("| (unnamed) | 2.5 | - | 0.00 |"));
    }

    #[test]
    fn markdown_of_empty_semester() {
        let md = to_markdown(&AcademicRecord::initial());
        assert!(md.contains("No courses yet"));
    }

    #[test]
    fn scale_markdown_lists_every_grade() {
        let md = scale_to_markdown();
        assert!(md.contains("| A+ | 4.00 | 80-100 | Excellent |"));
        assert!(md.contains("| F | 0.00 | Below 40 | Fail |"));
        assert_eq!(md.lines().count(), GRADE_SCALE.len() + 2);
    }

    #[test]
    fn exports_write_files() {
        let dir = tempfile::tempdir().unwrap();
        let record = graded_record();

        let md_path = dir.path().join("out").join("transcript.md");
        save_markdown(&record, &md_path).unwrap();
        assert!(std::fs::read_to_string(&md_path).unwrap().contains("Physics"));

        let json_path = dir.path().join("transcript.json");
        save_json(&record, &json_path).unwrap();
        let loaded = decode(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(loaded, record);
    }

    #[test]
    fn export_reports_directory_it_cannot_create() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();

        let err = save_markdown(&graded_record(), &blocker.join("out").join("t.md")).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("failed to create directory"));
        assert!(message.contains("blocker"));
    }
}
