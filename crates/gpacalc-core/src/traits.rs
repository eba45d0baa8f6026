//! Core trait definitions for storage slots and record observers.
//!
//! Storage slots are implemented by the `gpacalc-storage` crate (and by the
//! in-memory slot in [`crate::persistence`]); observers are supplied by
//! whatever renders the record.

use crate::error::StorageError;
use crate::model::AcademicRecord;

// ---------------------------------------------------------------------------
// Storage slot trait
// ---------------------------------------------------------------------------

/// A single durable key-value slot holding one serialized document.
pub trait StorageSlot {
    /// Human-readable slot description (e.g. a file path).
    fn name(&self) -> &str;

    /// Read the stored document, or `None` if nothing has been written.
    fn read(&self) -> Result<Option<String>, StorageError>;

    /// Replace the stored document.
    fn write(&self, document: &str) -> Result<(), StorageError>;

    /// Erase the stored document. Erasing an empty slot is not an error.
    fn remove(&self) -> Result<(), StorageError>;
}

// ---------------------------------------------------------------------------
// Observer trait
// ---------------------------------------------------------------------------

/// Receives a read-only snapshot after every applied mutation.
pub trait RecordObserver {
    fn on_change(&self, record: &AcademicRecord);
}

