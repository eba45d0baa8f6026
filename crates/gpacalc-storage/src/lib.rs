//! gpacalc-storage - Durable storage slots and configuration.
//!
//! Implements the `StorageSlot` trait on top of the filesystem and loads the
//! settings that decide where the record lives.

pub mod config;
pub mod file;

pub use config::{load_config_from, GpacalcConfig};
pub use file::FileSlot;

use gpacalc_core::persistence::PersistenceAdapter;
use gpacalc_core::store::StateStore;

/// Open the record store described by `config`.
pub fn open_store(config: &GpacalcConfig) -> StateStore {
    let slot = FileSlot::new(&config.data_file);
    StateStore::open(PersistenceAdapter::new(slot), config.store_config())
}
