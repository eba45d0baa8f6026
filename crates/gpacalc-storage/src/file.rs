//! JSON file storage slot.

use std::io::{ErrorKind, Write};
use std::path::PathBuf;

use tempfile::NamedTempFile;

use gpacalc_core::error::StorageError;
use gpacalc_core::traits::StorageSlot;

/// A storage slot backed by a single file on disk.
///
/// Writes go to a temporary file in the same directory which is then renamed
/// over the target, so a crash mid-write never leaves a truncated document.
#[derive(Debug, Clone)]
pub struct FileSlot {
    path: PathBuf,
    display: String,
}

impl FileSlot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let display = path.display().to_string();
        Self { path, display }
    }
}

impl StorageSlot for FileSlot {
    fn name(&self) -> &str {
        &self.display
    }

    fn read(&self) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(None),
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, document: &str) -> Result<(), StorageError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir)?;

        let mut tmp = NamedTempFile::new_in(&dir)?;
        tmp.write_all(document.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| StorageError::Io(e.error))?;

        tracing::trace!(path = %self.display, bytes = document.len(), "wrote record");
        Ok(())
    }

    fn remove(&self) -> Result<(), StorageError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gpacalc_core::{CourseUpdate, PersistenceAdapter, StateStore, StoreConfig};

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let slot = FileSlot::new(dir.path().join("record.json"));
        assert!(slot.read().unwrap().is_none());
        slot.remove().unwrap();
    }

    #[test]
    fn blank_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("record.json");
        std::fs::write(&path, "  \n").unwrap();
        assert!(FileSlot::new(&path).read().unwrap().is_none());
    }

    #[test]
    fn write_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("record.json");
        let slot = FileSlot::new(&path);

        slot.write("{\"semesters\":[]}").unwrap();
        assert_eq!(slot.read().unwrap().as_deref(), Some("{\"semesters\":[]}"));

        slot.write("{}").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");

        slot.remove().unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn store_state_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("record.json");

        let mut store = StateStore::open(
            PersistenceAdapter::new(FileSlot::new(&path)),
            StoreConfig::default(),
        );
        let sem = store.record().semesters[0].id.clone();
        let course = store.add_course(&sem).unwrap();
        store.update_course(&sem, &course, CourseUpdate::Grade("A+".into()));
        store.add_semester();
        let expected = store.record().clone();

        let reopened = StateStore::open(
            PersistenceAdapter::new(FileSlot::new(&path)),
            StoreConfig::default(),
        );
        assert_eq!(reopened.record(), &expected);
        assert_eq!(reopened.record().cgpa, 4.0);
    }

    #[test]
    fn corrupt_file_opens_default_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("record.json");
        std::fs::write(&path, "{\"semesters\": [ {").unwrap();

        let store = StateStore::open(
            PersistenceAdapter::new(FileSlot::new(&path)),
            StoreConfig::default(),
        );
        assert_eq!(store.record().semesters.len(), 1);
        assert_eq!(store.record().semesters[0].name, "Semester 1");
    }
}
