//! In-memory credentials provider for testing.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::traits::{ApiCredentials, CredentialsError, CredentialsProvider};

/// In-memory credentials provider for testing.
///
/// Holds a user-entered key and a stand-in for the process default, so key
/// resolution can be tested without touching the environment.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCredentials {
    /// Stored credentials
    credentials: Arc<Mutex<Option<ApiCredentials>>>,
    /// Process default key
    default_key: Arc<Mutex<Option<String>>>,
    /// Whether save should fail
    save_should_fail: Arc<Mutex<bool>>,
    /// Whether load should fail
    load_should_fail: Arc<Mutex<bool>>,
}

impl InMemoryCredentials {
    /// Create a provider with no key anywhere.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a provider with a user-entered key.
    pub fn with_api_key(api_key: &str) -> Self {
        let provider = Self::new();
        provider.set_credentials(Some(ApiCredentials::new(api_key)));
        provider
    }

    /// Set the stand-in process default key.
    pub fn set_default_key(&self, key: Option<&str>) {
        *self.default_key.lock().unwrap() = key.map(str::to_string);
    }

    /// Configure whether save should fail.
    pub fn set_save_should_fail(&self, should_fail: bool) {
        *self.save_should_fail.lock().unwrap() = should_fail;
    }

    /// Configure whether load should fail.
    pub fn set_load_should_fail(&self, should_fail: bool) {
        *self.load_should_fail.lock().unwrap() = should_fail;
    }

    /// Get the current credentials synchronously (for testing).
    pub fn get_credentials(&self) -> Option<ApiCredentials> {
        self.credentials.lock().unwrap().clone()
    }

    /// Set credentials synchronously (for testing).
    pub fn set_credentials(&self, creds: Option<ApiCredentials>) {
        *self.credentials.lock().unwrap() = creds;
    }
}

#[async_trait]
impl CredentialsProvider for InMemoryCredentials {
    async fn load(&self) -> Result<Option<ApiCredentials>, CredentialsError> {
        if *self.load_should_fail.lock().unwrap() {
            return Err(CredentialsError::LoadFailed("Mock load failure".to_string()));
        }
        Ok(self.credentials.lock().unwrap().clone())
    }

    async fn save(&self, creds: &ApiCredentials) -> Result<(), CredentialsError> {
        if *self.save_should_fail.lock().unwrap() {
            return Err(CredentialsError::SaveFailed("Mock save failure".to_string()));
        }
        *self.credentials.lock().unwrap() = Some(creds.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), CredentialsError> {
        *self.credentials.lock().unwrap() = None;
        Ok(())
    }

    fn default_api_key(&self) -> Option<String> {
        self.default_key.lock().unwrap().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CredentialError;

    #[tokio::test]
    async fn test_resolve_missing() {
        let provider = InMemoryCredentials::new();
        assert_eq!(
            provider.resolve_api_key().await,
            Err(CredentialError::Missing)
        );
    }

    #[tokio::test]
    async fn test_user_key_wins_over_default() {
        let provider = InMemoryCredentials::with_api_key("sk-user");
        provider.set_default_key(Some("sk-env"));
        assert_eq!(provider.resolve_api_key().await.unwrap(), "sk-user");
    }

    #[tokio::test]
    async fn test_falls_back_to_default() {
        let provider = InMemoryCredentials::new();
        provider.set_default_key(Some(" sk-env "));
        assert_eq!(provider.resolve_api_key().await.unwrap(), "sk-env");

        provider.set_credentials(Some(ApiCredentials::new("  ")));
        assert_eq!(provider.resolve_api_key().await.unwrap(), "sk-env");
    }

    #[tokio::test]
    async fn test_blank_default_is_missing() {
        let provider = InMemoryCredentials::new();
        provider.set_default_key(Some(""));
        assert_eq!(
            provider.resolve_api_key().await,
            Err(CredentialError::Missing)
        );
    }

    #[tokio::test]
    async fn test_load_failure_is_unreadable() {
        let provider = InMemoryCredentials::with_api_key("sk-user");
        provider.set_load_should_fail(true);
        assert!(matches!(
            provider.resolve_api_key().await,
            Err(CredentialError::Unreadable { .. })
        ));
    }

    #[tokio::test]
    async fn test_save_and_clear() {
        let provider = InMemoryCredentials::new();
        provider.save(&ApiCredentials::new("sk-1")).await.unwrap();
        assert_eq!(provider.load().await.unwrap().unwrap().api_key, "sk-1");

        provider.clear().await.unwrap();
        assert!(provider.load().await.unwrap().is_none());

        provider.set_save_should_fail(true);
        assert!(matches!(
            provider.save(&ApiCredentials::new("sk-2")).await,
            Err(CredentialsError::SaveFailed(_))
        ));
    }

    #[test]
    fn test_clone_shares_state() {
        let provider = InMemoryCredentials::new();
        let cloned = provider.clone();
        provider.set_credentials(Some(ApiCredentials::new("shared")));
        assert_eq!(cloned.get_credentials().unwrap().api_key, "shared");
    }
}
