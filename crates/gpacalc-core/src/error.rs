//! Storage error types.
//!
//! These errors describe failures of the durable slot that backs the
//! persistence adapter. The state store never propagates them: a failed read
//! means "no prior data" and a failed write is logged and retried on the
//! next mutation.

use thiserror::Error;

/// Errors that can occur when reading or writing a storage slot.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing medium failed.
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The record could not be encoded as a document.
    #[error("failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The slot refused the write (e.g. quota exhausted).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl StorageError {
    /// Returns `true` if retrying the same write later may succeed.
    pub fn is_transient(&self) -> bool {
        !matches!(self, StorageError::Serialize(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transient_classification() {
        let io = StorageError::Io(std::io::Error::other("disk full"));
        assert!(io.is_transient());
        assert!(StorageError::Unavailable("quota".into()).is_transient());
        assert!(io.to_string().contains("disk full"));
    }
}
