//! File-based credentials provider adapter.
//!
//! The user-entered key lives in `<config_dir>/chatstream/credentials.json`.
//! The process default comes from `OPENAI_API_KEY`.

use async_trait::async_trait;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::traits::credentials::env_api_key;
use crate::traits::{ApiCredentials, CredentialsError, CredentialsProvider};

const CREDENTIALS_DIR: &str = "chatstream";
const CREDENTIALS_FILE: &str = "credentials.json";

/// File-based credentials provider.
#[derive(Debug, Clone)]
pub struct FileCredentialsProvider {
    credentials_path: PathBuf,
}

impl FileCredentialsProvider {
    /// Create a provider under the platform config directory.
    ///
    /// # Returns
    /// The provider, or an error if the config directory cannot be determined.
    pub fn new() -> Result<Self, CredentialsError> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            CredentialsError::Other("Failed to determine config directory".to_string())
        })?;
        Ok(Self::at(config_dir.join(CREDENTIALS_DIR).join(CREDENTIALS_FILE)))
    }

    /// Create a provider using an explicit file path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            credentials_path: path.into(),
        }
    }

    /// Get the path to the credentials file.
    pub fn credentials_path(&self) -> &Path {
        &self.credentials_path
    }
}

#[async_trait]
impl CredentialsProvider for FileCredentialsProvider {
    async fn load(&self) -> Result<Option<ApiCredentials>, CredentialsError> {
        if !self.credentials_path.exists() {
            return Ok(None);
        }

        let file = File::open(&self.credentials_path)
            .map_err(|e| CredentialsError::LoadFailed(e.to_string()))?;
        let creds: ApiCredentials = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| CredentialsError::Serialization(e.to_string()))?;

        Ok(if creds.is_empty() { None } else { Some(creds) })
    }

    async fn save(&self, creds: &ApiCredentials) -> Result<(), CredentialsError> {
        if let Some(parent) = self.credentials_path.parent() {
            fs::create_dir_all(parent).map_err(|e| CredentialsError::Io(e.to_string()))?;
        }

        let file = File::create(&self.credentials_path)
            .map_err(|e| CredentialsError::SaveFailed(e.to_string()))?;
        restrict_permissions(&self.credentials_path);

        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, creds)
            .map_err(|e| CredentialsError::Serialization(e.to_string()))?;
        writer
            .flush()
            .map_err(|e| CredentialsError::SaveFailed(e.to_string()))
    }

    async fn clear(&self) -> Result<(), CredentialsError> {
        if !self.credentials_path.exists() {
            return Ok(());
        }
        fs::remove_file(&self.credentials_path)
            .map_err(|e| CredentialsError::ClearFailed(e.to_string()))
    }

    fn default_api_key(&self) -> Option<String> {
        env_api_key()
    }
}

/// Keep the key file readable by the owner only.
#[cfg(unix)]
fn restrict_permissions(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    if let Err(e) = fs::set_permissions(path, fs::Permissions::from_mode(0o600)) {
        tracing::warn!("Failed to restrict permissions on {:?}: {}", path, e);
    }
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) {}
