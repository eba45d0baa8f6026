//! Persistence adapter and in-memory storage slot.
//!
//! The adapter turns an [`AcademicRecord`] into one JSON document and back.
//! Absent, empty, or unparsable documents all load as "no prior data".

use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::StorageError;
use crate::model::AcademicRecord;
use crate::traits::StorageSlot;

/// Serializes the record to a storage slot and restores it.
pub struct PersistenceAdapter {
    slot: Box<dyn StorageSlot>,
}

impl PersistenceAdapter {
    pub fn new(slot: impl StorageSlot + 'static) -> Self {
        Self {
            slot: Box::new(slot),
        }
    }

    /// Description of the backing slot.
    pub fn slot_name(&self) -> &str {
        self.slot.name()
    }

    /// Load the persisted record.
    ///
    /// Returns `None` when nothing usable is stored: no document, a document
    /// with zero semesters, or one that fails to parse. Failures are logged,
    /// never returned.
    pub fn load(&self) -> Option<AcademicRecord> {
        let document = match self.slot.read() {
            Ok(Some(doc)) => doc,
            Ok(None) => {
                tracing::debug!(slot = self.slot.name(), "no persisted record");
                return None;
            }
            Err(e) => {
                tracing::warn!(slot = self.slot.name(), error = %e, "failed to read persisted record");
                return None;
            }
        };

        match decode(&document) {
            Ok(record) if record.semesters.is_empty() => {
                tracing::debug!(slot = self.slot.name(), "persisted record has no semesters");
                None
            }
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(
                    slot = self.slot.name(),
                    error = %e,
                    "discarding malformed persisted record"
                );
                None
            }
        }
    }

    /// Write the full record, derived fields included.
    pub fn save(&self, record: &AcademicRecord) -> Result<(), StorageError> {
        let document = encode(record)?;
        self.slot.write(&document)
    }

    /// Erase whatever is stored.
    pub fn erase(&self) -> Result<(), StorageError> {
        self.slot.remove()
    }
}

/// Encode a record as a persisted document.
pub fn encode(record: &AcademicRecord) -> Result<String, StorageError> {
    Ok(serde_json::to_string(record)?)
}

/// Decode a persisted document.
pub fn decode(document: &str) -> Result<AcademicRecord, serde_json::Error> {
    serde_json::from_str(document)
}

// ---------------------------------------------------------------------------
// In-memory slot
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct MemoryState {
    document: Option<String>,
    fail_writes: bool,
    writes: u32,
}

/// A storage slot held in memory.
///
/// Clones share the same slot, so a test can keep a handle and inspect what
/// the store wrote. Writes can be made to fail to exercise error paths.
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    state: Arc<Mutex<MemoryState>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a slot that already holds `document`.
    pub fn with_document(document: &str) -> Self {
        let slot = Self::default();
        slot.lock().document = Some(document.to_string());
        slot
    }

    /// Make every subsequent write fail (or succeed again).
    pub fn set_fail_writes(&self, fail: bool) {
        self.lock().fail_writes = fail;
    }

    /// The currently stored document.
    pub fn document(&self) -> Option<String> {
        self.lock().document.clone()
    }

    /// Number of successful writes.
    pub fn write_count(&self) -> u32 {
        self.lock().writes
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl StorageSlot for MemorySlot {
    fn name(&self) -> &str {
        "memory"
    }

    fn read(&self) -> Result<Option<String>, StorageError> {
        Ok(self.lock().document.clone())
    }

    fn write(&self, document: &str) -> Result<(), StorageError> {
        let mut state = self.lock();
        if state.fail_writes {
            return Err(StorageError::Unavailable("memory slot quota exceeded".into()));
        }
        state.document = Some(document.to_string());
        state.writes += 1;
        Ok(())
    }

    fn remove(&self) -> Result<(), StorageError> {
        self.lock().document = None;
        Ok(())
    }
}
