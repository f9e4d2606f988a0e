//! Credentials provider trait abstraction.
//!
//! An API key is resolved from the user-entered key first, then from a
//! process-wide default (normally the `OPENAI_API_KEY` environment variable).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::CredentialError;

/// Environment variable holding the process-wide default key.
pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// User-entered credentials.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiCredentials {
    pub api_key: String,
}

impl ApiCredentials {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }

    /// True if the key is blank.
    pub fn is_empty(&self) -> bool {
        self.api_key.trim().is_empty()
    }
}

/// Credentials operation errors.
#[derive(Debug, Clone)]
pub enum CredentialsError {
    /// Failed to load credentials
    LoadFailed(String),
    /// Failed to save credentials
    SaveFailed(String),
    /// Failed to clear credentials
    ClearFailed(String),
    /// IO error
    Io(String),
    /// Serialization/deserialization error
    Serialization(String),
    /// Other error
    Other(String),
}

impl std::fmt::Display for CredentialsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CredentialsError::LoadFailed(msg) => write!(f, "Failed to load credentials: {}", msg),
            CredentialsError::SaveFailed(msg) => write!(f, "Failed to save credentials: {}", msg),
            CredentialsError::ClearFailed(msg) => {
                write!(f, "Failed to clear credentials: {}", msg)
            }
            CredentialsError::Io(msg) => write!(f, "IO error: {}", msg),
            CredentialsError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
            CredentialsError::Other(msg) => write!(f, "Credentials error: {}", msg),
        }
    }
}

impl std::error::Error for CredentialsError {}

/// Trait for credentials storage and API key resolution.
///
/// # Example
///
/// ```ignore
/// use chatstream::traits::CredentialsProvider;
///
/// async fn key<P: CredentialsProvider>(provider: &P) -> Result<String, CredentialError> {
///     provider.resolve_api_key().await
/// }
/// ```
#[async_trait]
pub trait CredentialsProvider: Send + Sync {
    /// Load the user-entered credentials.
    ///
    /// # Returns
    /// - `Ok(Some(credentials))` if credentials are stored
    /// - `Ok(None)` if nothing is stored
    /// - `Err(error)` if loading failed
    async fn load(&self) -> Result<Option<ApiCredentials>, CredentialsError>;

    /// Store user-entered credentials.
    async fn save(&self, creds: &ApiCredentials) -> Result<(), CredentialsError>;

    /// Remove the user-entered credentials.
    async fn clear(&self) -> Result<(), CredentialsError>;

    /// Process-wide default key, if any.
    fn default_api_key(&self) -> Option<String>;

    /// Resolve the key to use for a request.
    ///
    /// A blank user-entered key counts as absent. Fails with
    /// [`CredentialError::Missing`] when no key is available anywhere.
    async fn resolve_api_key(&self) -> Result<String, CredentialError> {
        if let Some(creds) = self.load().await? {
            if !creds.is_empty() {
                return Ok(creds.api_key.trim().to_string());
            }
        }
        self.default_api_key()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or(CredentialError::Missing)
    }
}

/// Read the default key from the environment.
pub fn env_api_key() -> Option<String> {
    std::env::var(DEFAULT_API_KEY_ENV).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_error_display() {
        assert_eq!(
            CredentialsError::LoadFailed("read error".to_string()).to_string(),
            "Failed to load credentials: read error"
        );
        assert_eq!(
            CredentialsError::SaveFailed("write error".to_string()).to_string(),
            "Failed to save credentials: write error"
        );
        assert_eq!(
            CredentialsError::Io("disk full".to_string()).to_string(),
            "IO error: disk full"
        );
        assert_eq!(
            CredentialsError::Serialization("invalid json".to_string()).to_string(),
            "Serialization error: invalid json"
        );
    }

    #[test]
    fn test_api_credentials_blank() {
        assert!(ApiCredentials::new("   ").is_empty());
        assert!(ApiCredentials::default().is_empty());
        assert!(!ApiCredentials::new("sk-test").is_empty());
    }
}
