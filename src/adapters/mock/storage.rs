//! In-memory key/value store for testing.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::error::StorageError;
use crate::traits::KeyValueStore;

/// In-memory [`KeyValueStore`] with an optional total byte quota.
///
/// The quota counts the bytes of all stored values, with the value being
/// replaced excluded, the same way the file store does.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStorage {
    values: Arc<Mutex<HashMap<String, String>>>,
    quota_bytes: Option<usize>,
    /// Keys of every write attempt, in order
    attempts: Arc<Mutex<Vec<String>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that refuses writes pushing the total over `quota_bytes`.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            quota_bytes: Some(quota_bytes),
            ..Self::default()
        }
    }

    /// Raw stored value (for assertions).
    pub fn get(&self, key: &str) -> Option<String> {
        self.values.lock().unwrap().get(key).cloned()
    }

    /// Keys of all write attempts, including refused ones.
    pub fn write_attempts(&self) -> Vec<String> {
        self.attempts.lock().unwrap().clone()
    }

    /// Total bytes currently stored.
    pub fn used_bytes(&self) -> usize {
        self.values.lock().unwrap().values().map(String::len).sum()
    }
}

impl KeyValueStore for InMemoryStorage {
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.attempts.lock().unwrap().push(key.to_string());
        let mut values = self.values.lock().unwrap();

        if let Some(quota) = self.quota_bytes {
            let others: usize = values
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(_, v)| v.len())
                .sum();
            if others + value.len() > quota {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    size: value.len(),
                });
            }
        }

        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.get(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_then_read() {
        let store = InMemoryStorage::new();
        assert!(store.read("a").unwrap().is_none());
        store.write("a", "1").unwrap();
        assert_eq!(store.read("a").unwrap().as_deref(), Some("1"));
    }

    #[test]
    fn test_quota_counts_other_keys() {
        let store = InMemoryStorage::with_quota(10);
        store.write("a", "123456").unwrap();
        let err = store.write("b", "12345").unwrap_err();
        assert!(err.is_quota_exceeded());

        // Replacing a value does not count its old size
        store.write("a", "1234567890").unwrap();
        assert_eq!(store.used_bytes(), 10);
        assert_eq!(store.write_attempts(), vec!["a", "b", "a"]);
    }
}
