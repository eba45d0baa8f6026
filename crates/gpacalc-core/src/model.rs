//! Core data model types for gpacalc.
//!
//! The academic record owns its semesters, which own their courses. The
//! serialized shape of these types is the persisted document layout, so
//! field names are camelCase on the wire.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Credit given to a freshly added course.
pub const DEFAULT_CREDIT: f64 = 3.0;

/// One gradable unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    /// Unique identifier.
    pub id: String,
    /// Display name, may be empty.
    #[serde(default)]
    pub name: String,
    /// Credit weight. Zero or negative credit is representable but never
    /// counts toward an average.
    #[serde(default)]
    pub credit: f64,
    /// Letter grade, or "" when not yet graded.
    #[serde(default)]
    pub grade: String,
    /// Grade point cached from `grade`.
    #[serde(default)]
    pub grade_point: f64,
}

impl Course {
    /// Create an empty, ungraded course.
    pub fn new(credit: f64) -> Self {
        Self {
            id: new_id("course"),
            name: String::new(),
            credit,
            grade: String::new(),
            grade_point: 0.0,
        }
    }

    /// A course counts toward averages only with a recognized grade and
    /// strictly positive credit.
    pub fn is_eligible(&self) -> bool {
        self.credit > 0.0 && crate::scale::is_recognized(&self.grade)
    }
}

/// An ordered collection of courses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Semester {
    /// Unique identifier.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Courses in insertion order.
    #[serde(default)]
    pub courses: Vec<Course>,
    /// Semester GPA derived from `courses`.
    #[serde(default)]
    pub gpa: f64,
}

impl Semester {
    /// Create an empty semester with the default name for `position`
    /// (1-based).
    pub fn new(position: usize) -> Self {
        Self {
            id: new_id("semester"),
            name: default_semester_name(position),
            courses: Vec::new(),
            gpa: 0.0,
        }
    }

    pub fn course(&self, course_id: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == course_id)
    }

    pub fn course_mut(&mut self, course_id: &str) -> Option<&mut Course> {
        self.courses.iter_mut().find(|c| c.id == course_id)
    }

    /// Returns `true` if the name looks auto-generated ("Semester <n>").
    pub fn has_default_name(&self) -> bool {
        self.name
            .strip_prefix("Semester ")
            .is_some_and(|n| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()))
    }
}

/// Default display name of the semester at a 1-based position.
pub fn default_semester_name(position: usize) -> String {
    format!("Semester {position}")
}

/// The top-level aggregate: every semester plus cumulative figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcademicRecord {
    /// Semesters in display order.
    #[serde(default)]
    pub semesters: Vec<Semester>,
    /// Cumulative GPA over every eligible course.
    #[serde(default)]
    pub cgpa: f64,
    /// Sum of credits over every eligible course.
    #[serde(default)]
    pub total_credits: f64,
}

impl AcademicRecord {
    /// The canonical starting state: one empty "Semester 1".
    pub fn initial() -> Self {
        Self {
            semesters: vec![Semester::new(1)],
            cgpa: 0.0,
            total_credits: 0.0,
        }
    }

    pub fn semester(&self, semester_id: &str) -> Option<&Semester> {
        self.semesters.iter().find(|s| s.id == semester_id)
    }

    pub fn semester_mut(&mut self, semester_id: &str) -> Option<&mut Semester> {
        self.semesters.iter_mut().find(|s| s.id == semester_id)
    }

    /// Total number of courses across all semesters.
    pub fn course_count(&self) -> usize {
        self.semesters.iter().map(|s| s.courses.len()).sum()
    }
}

impl Default for AcademicRecord {
    fn default() -> Self {
        Self::initial()
    }
}

fn new_id(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4().simple())
}

/// Editable course fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CourseField {
    Name,
    Credit,
    Grade,
}

impl fmt::Display for CourseField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CourseField::Name => write!(f, "name"),
            CourseField::Credit => write!(f, "credit"),
            CourseField::Grade => write!(f, "grade"),
        }
    }
}

impl FromStr for CourseField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "name" => Ok(CourseField::Name),
            "credit" | "credits" => Ok(CourseField::Credit),
            "grade" => Ok(CourseField::Grade),
            other => Err(format!("unknown course field: {other}")),
        }
    }
}

/// A single edit to a course.
#[derive(Debug, Clone, PartialEq)]
pub enum CourseUpdate {
    Name(String),
    Credit(f64),
    Grade(String),
}

impl CourseUpdate {
    /// Build an update from a field and the raw text a user typed.
    ///
    /// Non-numeric credit input becomes 0 rather than an error.
    pub fn from_field(field: CourseField, raw: &str) -> Self {
        match field {
            CourseField::Name => CourseUpdate::Name(raw.to_string()),
            CourseField::Credit => CourseUpdate::Credit(raw.trim().parse::<f64>().unwrap_or(0.0)),
            CourseField::Grade => CourseUpdate::Grade(raw.to_string()),
        }
    }

    pub fn field(&self) -> CourseField {
        match self {
            CourseUpdate::Name(_) => CourseField::Name,
            CourseUpdate::Credit(_) => CourseField::Credit,
            CourseUpdate::Grade(_) => CourseField::Grade,
        }
    }
}
