//! gpacalc-core - Grading scale, GPA/CGPA aggregation, and the record store.
//!
//! This crate defines the data model, the pure aggregation engine, and the
//! state store that keeps derived figures and persisted state consistent
//! with every edit.

pub mod error;
pub mod model;
pub mod persistence;
pub mod report;
pub mod scale;
pub mod statistics;
pub mod store;
pub mod traits;

pub use error::StorageError;
pub use model::{AcademicRecord, Course, CourseField, CourseUpdate, Semester};
pub use persistence::{MemorySlot, PersistenceAdapter};
pub use store::{StateStore, StoreConfig};
pub use traits::{RecordObserver, StorageSlot};
