//! Key/value persistence trait abstraction.

use crate::error::StorageError;

/// Durable string storage addressed by key.
///
/// Writes replace the previous value. Implementations must report a full
/// store as [`StorageError::QuotaExceeded`] so callers can degrade.
pub trait KeyValueStore: Send + Sync {
    /// Store `value` under `key`.
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Read the value under `key`, `Ok(None)` if absent.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;
}
