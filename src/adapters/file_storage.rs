//! File-backed key/value store.
//!
//! Each key is one `<key>.json` file under the data directory. Writes go to
//! a temporary file first and are renamed into place, so a failed write
//! leaves the previous value intact.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::StorageError;
use crate::traits::KeyValueStore;

#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
    /// Total bytes allowed across all keys (None = limited by the disk only)
    quota_bytes: Option<u64>,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            quota_bytes: None,
        }
    }

    pub fn with_quota(mut self, quota_bytes: Option<u64>) -> Self {
        self.quota_bytes = quota_bytes;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    /// Bytes used by every key except `key`.
    fn used_by_others(&self, key: &str) -> Result<u64, StorageError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(StorageError::from_io(key, 0, e)),
        };

        let own = self.path_for(key);
        let mut total = 0;
        for entry in entries.flatten() {
            let path = entry.path();
            if path == own || path.extension().map_or(true, |ext| ext != "json") {
                continue;
            }
            if let Ok(meta) = entry.metadata() {
                total += meta.len();
            }
        }
        Ok(total)
    }
}

impl KeyValueStore for FileStorage {
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let size = value.len();
        fs::create_dir_all(&self.dir).map_err(|e| StorageError::from_io(key, size, e))?;

        if let Some(quota) = self.quota_bytes {
            let used = self.used_by_others(key)?;
            if used + size as u64 > quota {
                debug!(key, size, used, quota, "Write refused by storage quota");
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    size,
                });
            }
        }

        let target = self.path_for(key);
        let tmp = self.dir.join(format!(".{}.json.tmp", key));
        let result = fs::write(&tmp, value).and_then(|()| fs::rename(&tmp, &target));
        if let Err(e) = result {
            let _ = fs::remove_file(&tmp);
            return Err(StorageError::from_io(key, size, e));
        }
        Ok(())
    }

    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::from_io(key, 0, e)),
        }
    }
}
