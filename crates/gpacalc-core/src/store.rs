//! The record state store.
//!
//! Owns the academic record and is its only mutation surface. Every applied
//! mutation recomputes all derived fields, then persists the record, then
//! notifies observers, before control returns to the caller. Unknown ids
//! make a mutation a silent no-op.

use crate::model::{
    default_semester_name, AcademicRecord, Course, CourseField, CourseUpdate, Semester,
    DEFAULT_CREDIT,
};
use crate::persistence::PersistenceAdapter;
use crate::scale::is_recognized;
use crate::statistics::recompute;
use crate::traits::RecordObserver;

/// Configuration for the state store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Credit given to newly added courses.
    pub default_credit: f64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            default_credit: DEFAULT_CREDIT,
        }
    }
}

/// The single owner of the academic record.
pub struct StateStore {
    record: AcademicRecord,
    persistence: PersistenceAdapter,
    observers: Vec<Box<dyn RecordObserver>>,
    config: StoreConfig,
}

impl StateStore {
    /// Open the store from persisted state.
    ///
    /// Missing, empty, or corrupt state starts from one empty "Semester 1".
    /// Derived fields in the loaded document are recomputed, not trusted.
    pub fn open(persistence: PersistenceAdapter, config: StoreConfig) -> Self {
        let record = match persistence.load() {
            Some(mut record) => {
                sanitize(&mut record);
                recompute(&mut record);
                tracing::debug!(
                    slot = persistence.slot_name(),
                    semesters = record.semesters.len(),
                    courses = record.course_count(),
                    "loaded persisted record"
                );
                record
            }
            None => AcademicRecord::initial(),
        };

        Self {
            record,
            persistence,
            observers: Vec::new(),
            config,
        }
    }

    /// Read-only view of the current record.
    pub fn record(&self) -> &AcademicRecord {
        &self.record
    }

    /// Register an observer notified after every applied mutation.
    pub fn subscribe(&mut self, observer: Box<dyn RecordObserver>) {
        self.observers.push(observer);
    }

    /// Append an empty semester and return its id.
    pub fn add_semester(&mut self) -> String {
        let semester = Semester::new(self.record.semesters.len() + 1);
        let id = semester.id.clone();
        tracing::debug!(semester = %id, name = %semester.name, "adding semester");
        self.record.semesters.push(semester);
        self.commit();
        id
    }

    /// Append an empty course to a semester and return its id.
    ///
    /// Returns `None` (and changes nothing) if the semester does not exist.
    pub fn add_course(&mut self, semester_id: &str) -> Option<String> {
        let credit = normalize_credit(self.config.default_credit);
        let semester = self.record.semester_mut(semester_id)?;
        let course = Course::new(credit);
        let id = course.id.clone();
        tracing::debug!(semester = semester_id, course = %id, "adding course");
        semester.courses.push(course);
        self.commit();
        Some(id)
    }

    /// Apply one edit to a course.
    ///
    /// A grade edit re-resolves the grade point in the same step. Returns
    /// `false` if either id is unknown.
    pub fn update_course(&mut self, semester_id: &str, course_id: &str, update: CourseUpdate) -> bool {
        let Some(course) = self
            .record
            .semester_mut(semester_id)
            .and_then(|s| s.course_mut(course_id))
        else {
            return false;
        };

        let field = update.field();
        match update {
            CourseUpdate::Name(name) => course.name = name,
            CourseUpdate::Credit(credit) => course.credit = normalize_credit(credit),
            CourseUpdate::Grade(grade) => {
                course.grade = normalize_grade(&grade);
                course.grade_point = crate::scale::point_for(&course.grade);
            }
        }
        tracing::debug!(semester = semester_id, course = course_id, %field, "updated course");
        self.commit();
        true
    }

    /// Apply an edit given as a field and raw user text.
    pub fn update_course_field(
        &mut self,
        semester_id: &str,
        course_id: &str,
        field: CourseField,
        raw: &str,
    ) -> bool {
        self.update_course(semester_id, course_id, CourseUpdate::from_field(field, raw))
    }

    /// Remove a course. Returns `false` if it was not found.
    pub fn delete_course(&mut self, semester_id: &str, course_id: &str) -> bool {
        let Some(semester) = self.record.semester_mut(semester_id) else {
            return false;
        };
        let before = semester.courses.len();
        semester.courses.retain(|c| c.id != course_id);
        if semester.courses.len() == before {
            return false;
        }
        tracing::debug!(semester = semester_id, course = course_id, "deleted course");
        self.commit();
        true
    }

    /// Remove a semester and its courses.
    ///
    /// Refused when it is the only semester left. Remaining semesters with
    /// auto-generated names are renumbered by position.
    pub fn delete_semester(&mut self, semester_id: &str) -> bool {
        if self.record.semesters.len() <= 1 {
            tracing::debug!(semester = semester_id, "refusing to delete the last semester");
            return false;
        }
        let before = self.record.semesters.len();
        self.record.semesters.retain(|s| s.id != semester_id);
        if self.record.semesters.len() == before {
            return false;
        }

        for (index, semester) in self.record.semesters.iter_mut().enumerate() {
            if semester.has_default_name() {
                semester.name = default_semester_name(index + 1);
            }
        }
        tracing::debug!(semester = semester_id, "deleted semester");
        self.commit();
        true
    }

    /// Reset to one empty "Semester 1" and erase persisted state.
    pub fn clear_all(&mut self) {
        self.record = AcademicRecord::initial();
        recompute(&mut self.record);
        if let Err(e) = self.persistence.erase() {
            tracing::warn!(slot = self.persistence.slot_name(), error = %e, "failed to erase persisted record");
        }
        tracing::info!("cleared all semesters");
        self.notify();
    }

    fn commit(&mut self) {
        recompute(&mut self.record);
        if let Err(e) = self.persistence.save(&self.record) {
            tracing::warn!(
                slot = self.persistence.slot_name(),
                error = %e,
                transient = e.is_transient(),
                "failed to persist record; keeping in-memory state"
            );
        }
        self.notify();
    }

    fn notify(&self) {
        for observer in &self.observers {
            observer.on_change(&self.record);
        }
    }
}

/// Credits must be finite and non-negative; anything else becomes 0.
fn normalize_credit(credit: f64) -> f64 {
    if credit.is_finite() && credit > 0.0 {
        credit
    } else {
        0.0
    }
}

/// Trim and upper-case a grade; symbols not on the scale become "".
fn normalize_grade(grade: &str) -> String {
    let grade = grade.trim().to_uppercase();
    if is_recognized(&grade) {
        grade
    } else {
        String::new()
    }
}

/// Bring a loaded record back within the model invariants.
fn sanitize(record: &mut AcademicRecord) {
    for semester in &mut record.semesters {
        for course in &mut semester.courses {
            if !course.grade.is_empty() && !is_recognized(&course.grade) {
                tracing::debug!(course = %course.id, grade = %course.grade, "dropping unrecognized grade");
                course.grade = normalize_grade(&course.grade);
            }
            if !course.credit.is_finite() {
                course.credit = 0.0;
            }
        }
    }
}
