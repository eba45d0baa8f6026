//! Subcommand implementations.

use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::Result;

use gpacalc_core::model::AcademicRecord;
use gpacalc_core::store::StateStore;
use gpacalc_core::traits::RecordObserver;
use gpacalc_storage::config::{load_config_from, GpacalcConfig};

pub mod edit;
pub mod export;
pub mod init;
pub mod render;
pub mod show;

/// Options shared by every subcommand.
pub struct Context {
    pub config_path: Option<PathBuf>,
    pub data_file: Option<PathBuf>,
    pub format: String,
}

impl Context {
    /// Resolve configuration, applying the `--data-file` override.
    pub fn config(&self) -> Result<GpacalcConfig> {
        let mut config = load_config_from(self.config_path.as_deref())?;
        if let Some(path) = &self.data_file {
            config.data_file = path.clone();
        }
        Ok(config)
    }

    /// Open the record store and attach a change tracker to it.
    pub fn open(&self) -> Result<(GpacalcConfig, StateStore, ChangeTracker)> {
        let config = self.config()?;
        tracing::debug!(data_file = %config.data_file.display(), "opening record");
        let mut store = gpacalc_storage::open_store(&config);
        let tracker = ChangeTracker::default();
        store.subscribe(Box::new(tracker.clone()));
        Ok((config, store, tracker))
    }
}

/// Counts the snapshots published by the store.
#[derive(Clone, Default)]
pub struct ChangeTracker {
    changes: Rc<Cell<u32>>,
}

impl ChangeTracker {
    pub fn changed(&self) -> bool {
        self.changes.get() > 0
    }
}

impl RecordObserver for ChangeTracker {
    fn on_change(&self, _: &AcademicRecord) {
        self.changes.set(self.changes.get() + 1);
    }
}

/// Resolve a semester reference: an exact id, or a 1-based position.
pub fn resolve_semester(record: &AcademicRecord, key: &str) -> Option<String> {
    let key = key.trim();
    if let Some(semester) = record.semester(key) {
        return Some(semester.id.clone());
    }
    key.parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| record.semesters.get(i))
        .map(|s| s.id.clone())
}

/// Resolve a course reference inside a semester: an exact id, or a 1-based
/// position.
pub fn resolve_course(record: &AcademicRecord, semester_id: &str, key: &str) -> Option<String> {
    let semester = record.semester(semester_id)?;
    let key = key.trim();
    if let Some(course) = semester.course(key) {
        return Some(course.id.clone());
    }
    key.parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| semester.courses.get(i))
        .map(|c| c.id.clone())
}
