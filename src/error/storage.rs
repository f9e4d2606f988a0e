//! Persistence errors.

use thiserror::Error;

/// Errors from a [`KeyValueStore`](crate::traits::KeyValueStore).
///
/// `QuotaExceeded` is kept distinct so callers can retry with a smaller
/// payload.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage quota exceeded writing '{key}' ({size} bytes)")]
    QuotaExceeded { key: String, size: usize },

    #[error("Storage I/O error on '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize '{key}': {source}")]
    Serialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Could not determine a data directory")]
    NoDataDirectory,
}

impl StorageError {
    pub fn is_quota_exceeded(&self) -> bool {
        matches!(self, StorageError::QuotaExceeded { .. })
    }

    /// Classify an I/O failure, mapping a full disk to quota-exceeded.
    pub fn from_io(key: &str, size: usize, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::StorageFull {
            StorageError::QuotaExceeded {
                key: key.to_string(),
                size,
            }
        } else {
            StorageError::Io {
                key: key.to_string(),
                source: err,
            }
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            StorageError::QuotaExceeded { .. } => {
                "Not enough storage space to save the full history.".to_string()
            }
            StorageError::Io { source, .. } => format!("Could not save history: {}", source),
            StorageError::Serialization { .. } => "Could not encode history for saving.".to_string(),
            StorageError::NoDataDirectory => {
                "Could not find a data directory. Set CHATSTREAM_DATA_DIR.".to_string()
            }
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            StorageError::QuotaExceeded { .. } => "E_STORE_QUOTA",
            StorageError::Io { .. } => "E_STORE_IO",
            StorageError::Serialization { .. } => "E_STORE_SER",
            StorageError::NoDataDirectory => "E_STORE_DIR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_storage_full_maps_to_quota() {
        let err = StorageError::from_io("sessions", 42, io::Error::from(io::ErrorKind::StorageFull));
        assert!(err.is_quota_exceeded());
        assert_eq!(err.error_code(), "E_STORE_QUOTA");
    }

    #[test]
    fn test_other_io_stays_io() {
        let err = StorageError::from_io(
            "sessions",
            42,
            io::Error::from(io::ErrorKind::PermissionDenied),
        );
        assert!(!err.is_quota_exceeded());
        assert!(err.to_string().contains("sessions"));
    }
}
